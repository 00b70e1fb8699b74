//! 列表 + 表单的视图控制器
//!
//! 状态保存在 `watch` 通道里，界面通过 [`ItemController::subscribe`] 订阅变化。
//! 所有操作都接收 `&mut self`，同一个控制器上的请求按调用顺序串行执行。

use tokio::sync::watch;
use tracing::{debug, error};
use uuid::Uuid;

use super::api::ItemsApi;
use crate::app::items::model::{CreateItemRequest, Item, UpdateItemRequest, NAME_REQUIRED};

pub const LOAD_FAILED: &str = "Failed to load items. Check backend configuration.";
pub const CREATE_FAILED: &str = "Failed to create item.";
pub const UPDATE_FAILED: &str = "Failed to update item.";
pub const DELETE_FAILED: &str = "Failed to delete item.";
pub const DELETE_PROMPT: &str = "Delete this item?";

/// 删除前的交互确认
pub trait Confirm {
    fn confirm(&self, message: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, message: &str) -> bool {
        self(message)
    }
}

/// 表单草稿。`id` 为 `None` 时是创建模式
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemForm {
    pub id: Option<Uuid>,
    pub name: String,
    /// `None` 表示描述没被填写过，保存时不发送
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    /// 与服务端列表一致，最新的在前
    pub items: Vec<Item>,
    /// 只在列表请求进行中为 true
    pub loading: bool,
    /// 给用户看的错误提示，空串表示没有错误
    pub error: String,
    pub edit_mode: bool,
    pub form: ItemForm,
}

pub struct ItemController<A, C> {
    api: A,
    confirm: C,
    state: watch::Sender<ViewState>,
}

impl<A, C> ItemController<A, C>
where
    A: ItemsApi,
    C: Confirm,
{
    /// 创建控制器并立即加载一次列表
    pub async fn new(api: A, confirm: C) -> Self {
        let (state, _) = watch::channel(ViewState::default());
        let mut controller = Self {
            api,
            confirm,
            state,
        };
        controller.load().await;
        controller
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> ViewState {
        self.state.borrow().clone()
    }

    fn modify(&self, f: impl FnOnce(&mut ViewState)) {
        self.state.send_modify(f);
    }

    fn set_error(&self, message: &str) {
        self.modify(|s| s.error = message.to_string());
    }

    pub async fn load(&mut self) {
        self.modify(|s| {
            s.loading = true;
            s.error.clear();
        });

        match self.api.list().await {
            Ok(items) => {
                debug!("已加载 {} 个条目", items.len());
                self.modify(|s| s.items = items);
            }
            Err(e) => {
                error!("Error fetching items: {}", e);
                self.set_error(LOAD_FAILED);
            }
        }

        self.modify(|s| s.loading = false);
    }

    /// 编辑模式下更新，否则创建。失败时保留表单，方便重试
    pub async fn save(&mut self) {
        self.modify(|s| s.error.clear());

        let (edit_mode, form) = {
            let state = self.state.borrow();
            (state.edit_mode, state.form.clone())
        };

        if form.name.is_empty() {
            self.set_error(NAME_REQUIRED);
            return;
        }

        let result = match (edit_mode, form.id) {
            (true, Some(id)) => {
                let req = UpdateItemRequest {
                    name: Some(form.name),
                    description: form.description,
                };
                self.api.update(id, &req).await.map_err(|e| {
                    error!("Error updating item: {}", e);
                    UPDATE_FAILED
                })
            }
            _ => {
                let req = CreateItemRequest {
                    name: Some(form.name),
                    description: form.description,
                };
                self.api.create(&req).await.map_err(|e| {
                    error!("Error creating item: {}", e);
                    CREATE_FAILED
                })
            }
        };

        match result {
            Ok(()) => {
                self.reset_form();
                self.load().await;
            }
            Err(message) => self.set_error(message),
        }
    }

    pub fn start_edit(&mut self, item: &Item) {
        self.modify(|s| {
            s.edit_mode = true;
            s.form = ItemForm {
                id: Some(item.id),
                name: item.name.clone(),
                description: item.description.clone(),
            };
        });
    }

    pub fn reset_form(&mut self) {
        self.modify(|s| {
            s.edit_mode = false;
            s.form = ItemForm::default();
            s.error.clear();
        });
    }

    pub fn set_form_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.modify(|s| s.form.name = name);
    }

    pub fn set_form_description(&mut self, description: impl Into<String>) {
        let description = description.into();
        self.modify(|s| s.form.description = Some(description));
    }

    /// 需要用户确认。删掉的正好是正在编辑的条目时，表单回到创建模式
    pub async fn delete(&mut self, item: &Item) {
        if !self.confirm.confirm(DELETE_PROMPT) {
            return;
        }
        self.modify(|s| s.error.clear());

        match self.api.delete(item.id).await {
            Ok(()) => {
                let editing_deleted = self.state.borrow().form.id == Some(item.id);
                if editing_deleted {
                    self.reset_form();
                }
                self.load().await;
            }
            Err(e) => {
                error!("Error deleting item: {}", e);
                self.set_error(DELETE_FAILED);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::api::ClientError;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex,
    };

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        List,
        Create(CreateItemRequest),
        Update(Uuid, UpdateItemRequest),
        Delete(Uuid),
    }

    #[derive(Clone, Default)]
    struct FakeApi {
        items: Arc<Mutex<Vec<Item>>>,
        calls: Arc<Mutex<Vec<Call>>>,
        fail: Arc<AtomicBool>,
        /// list 调用时看到的控制器状态
        observer: Arc<Mutex<Option<watch::Receiver<ViewState>>>>,
        seen_during_list: Arc<Mutex<Vec<ViewState>>>,
    }

    impl FakeApi {
        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn observe(&self, rx: watch::Receiver<ViewState>) {
            *self.observer.lock().unwrap() = Some(rx);
        }

        fn seen_during_list(&self) -> Vec<ViewState> {
            self.seen_during_list.lock().unwrap().clone()
        }

        fn fail(&self, fail: bool) {
            self.fail.store(fail, Ordering::SeqCst);
        }

        fn record(&self, call: Call) -> Result<(), ClientError> {
            self.calls.lock().unwrap().push(call);
            if self.fail.load(Ordering::SeqCst) {
                let err = serde_json::from_str::<Item>("boom").unwrap_err();
                return Err(ClientError::Json(err));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl ItemsApi for FakeApi {
        async fn list(&self) -> Result<Vec<Item>, ClientError> {
            if let Some(rx) = self.observer.lock().unwrap().as_ref() {
                let snapshot = rx.borrow().clone();
                self.seen_during_list.lock().unwrap().push(snapshot);
            }
            self.record(Call::List)?;
            Ok(self.items.lock().unwrap().clone())
        }

        async fn create(&self, req: &CreateItemRequest) -> Result<(), ClientError> {
            self.record(Call::Create(req.clone()))?;
            let item = Item {
                id: Uuid::new_v4(),
                name: req.name.clone().unwrap_or_default(),
                description: req.description.clone(),
                created_at: Utc::now(),
            };
            self.items.lock().unwrap().insert(0, item);
            Ok(())
        }

        async fn update(&self, id: Uuid, req: &UpdateItemRequest) -> Result<(), ClientError> {
            self.record(Call::Update(id, req.clone()))?;
            let mut items = self.items.lock().unwrap();
            let item = items.iter_mut().find(|i| i.id == id).unwrap();
            item.name = req.name.clone().unwrap_or_default();
            if let Some(description) = &req.description {
                item.description = Some(description.clone());
            }
            Ok(())
        }

        async fn delete(&self, id: Uuid) -> Result<(), ClientError> {
            self.record(Call::Delete(id))?;
            self.items.lock().unwrap().retain(|i| i.id != id);
            Ok(())
        }
    }

    fn sample(name: &str) -> Item {
        Item {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: Some(format!("{} description", name)),
            created_at: Utc::now(),
        }
    }

    fn always(answer: bool) -> impl Fn(&str) -> bool {
        move |_: &str| answer
    }

    #[tokio::test]
    async fn test_new_loads_once() {
        let api = FakeApi::default();
        api.items.lock().unwrap().push(sample("a"));

        let controller = ItemController::new(api.clone(), always(true)).await;

        assert_eq!(api.calls(), vec![Call::List]);
        let state = controller.state();
        assert_eq!(state.items.len(), 1);
        assert!(!state.loading);
        assert!(!state.edit_mode);
        assert_eq!(state.form, ItemForm::default());
    }

    #[tokio::test]
    async fn test_load_failure_sets_message_and_clears_loading() {
        let api = FakeApi::default();
        api.fail(true);

        let controller = ItemController::new(api.clone(), always(true)).await;

        let state = controller.state();
        assert_eq!(state.error, LOAD_FAILED);
        assert!(!state.loading);
        assert!(state.items.is_empty());
    }

    #[tokio::test]
    async fn test_save_with_empty_name_makes_no_call() {
        let api = FakeApi::default();
        let mut controller = ItemController::new(api.clone(), always(true)).await;

        controller.set_form_description("only a description");
        controller.save().await;

        assert_eq!(controller.state().error, "Name is required");
        assert_eq!(api.calls(), vec![Call::List]);
    }

    #[tokio::test]
    async fn test_save_creates_then_reloads_and_resets() {
        let api = FakeApi::default();
        let mut controller = ItemController::new(api.clone(), always(true)).await;

        controller.set_form_name("Book");
        controller.save().await;

        let calls = api.calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(
            calls[1],
            Call::Create(CreateItemRequest {
                name: Some("Book".to_string()),
                description: None,
            })
        );
        assert_eq!(calls[2], Call::List);

        let state = controller.state();
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.items[0].name, "Book");
        assert_eq!(state.form, ItemForm::default());
        assert!(!state.edit_mode);
    }

    #[tokio::test]
    async fn test_edit_mode_issues_update() {
        let api = FakeApi::default();
        let item = sample("Book");
        api.items.lock().unwrap().push(item.clone());
        let mut controller = ItemController::new(api.clone(), always(true)).await;

        controller.start_edit(&item);
        let state = controller.state();
        assert!(state.edit_mode);
        assert_eq!(state.form.id, Some(item.id));
        assert_eq!(state.form.name, "Book");
        assert_eq!(state.form.description.as_deref(), Some("Book description"));

        controller.set_form_name("Book2");
        controller.set_form_description("d");
        controller.save().await;

        assert_eq!(
            api.calls()[1],
            Call::Update(
                item.id,
                UpdateItemRequest {
                    name: Some("Book2".to_string()),
                    description: Some("d".to_string()),
                }
            )
        );
        let state = controller.state();
        assert!(!state.edit_mode);
        assert_eq!(state.items[0].name, "Book2");
    }

    #[tokio::test]
    async fn test_failed_update_keeps_form() {
        let api = FakeApi::default();
        let item = sample("Book");
        api.items.lock().unwrap().push(item.clone());
        let mut controller = ItemController::new(api.clone(), always(true)).await;

        controller.start_edit(&item);
        controller.set_form_name("Book2");
        api.fail(true);
        controller.save().await;

        let state = controller.state();
        assert_eq!(state.error, UPDATE_FAILED);
        assert!(state.edit_mode);
        assert_eq!(state.form.name, "Book2");
        assert_eq!(state.items[0].name, "Book");
    }

    #[tokio::test]
    async fn test_failed_create_message() {
        let api = FakeApi::default();
        let mut controller = ItemController::new(api.clone(), always(true)).await;

        controller.set_form_name("Book");
        api.fail(true);
        controller.save().await;

        let state = controller.state();
        assert_eq!(state.error, CREATE_FAILED);
        assert_eq!(state.form.name, "Book");
    }

    #[tokio::test]
    async fn test_reset_form_clears_error() {
        let api = FakeApi::default();
        let item = sample("Book");
        api.items.lock().unwrap().push(item.clone());
        let mut controller = ItemController::new(api.clone(), always(true)).await;

        controller.start_edit(&item);
        controller.set_form_name("");
        controller.save().await;
        assert_eq!(controller.state().error, NAME_REQUIRED);

        controller.reset_form();
        let state = controller.state();
        assert!(state.error.is_empty());
        assert!(!state.edit_mode);
        assert_eq!(state.form, ItemForm::default());
    }

    #[tokio::test]
    async fn test_declined_delete_does_nothing() {
        let api = FakeApi::default();
        let item = sample("Book");
        api.items.lock().unwrap().push(item.clone());
        let mut controller = ItemController::new(api.clone(), always(false)).await;

        controller.delete(&item).await;

        assert_eq!(api.calls(), vec![Call::List]);
        assert_eq!(controller.state().items.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_prompts_and_reloads() {
        let api = FakeApi::default();
        let item = sample("Book");
        api.items.lock().unwrap().push(item.clone());

        let prompts = Arc::new(Mutex::new(Vec::new()));
        let seen = prompts.clone();
        let confirm = move |message: &str| {
            seen.lock().unwrap().push(message.to_string());
            true
        };
        let mut controller = ItemController::new(api.clone(), confirm).await;

        controller.delete(&item).await;

        assert_eq!(*prompts.lock().unwrap(), vec![DELETE_PROMPT.to_string()]);
        assert_eq!(
            api.calls(),
            vec![Call::List, Call::Delete(item.id), Call::List]
        );
        assert!(controller.state().items.is_empty());
    }

    #[tokio::test]
    async fn test_deleting_edited_item_resets_form() {
        let api = FakeApi::default();
        let edited = sample("edited");
        let other = sample("other");
        api.items
            .lock()
            .unwrap()
            .extend([edited.clone(), other.clone()]);
        let mut controller = ItemController::new(api.clone(), always(true)).await;

        controller.start_edit(&edited);
        controller.delete(&other).await;
        assert!(controller.state().edit_mode);

        controller.delete(&edited).await;
        let state = controller.state();
        assert!(!state.edit_mode);
        assert_eq!(state.form, ItemForm::default());
    }

    #[tokio::test]
    async fn test_failed_delete_message() {
        let api = FakeApi::default();
        let item = sample("Book");
        api.items.lock().unwrap().push(item.clone());
        let mut controller = ItemController::new(api.clone(), always(true)).await;

        api.fail(true);
        controller.delete(&item).await;

        let state = controller.state();
        assert_eq!(state.error, DELETE_FAILED);
        assert_eq!(state.items.len(), 1);
    }

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let api = FakeApi::default();
        let mut controller = ItemController::new(api.clone(), always(true)).await;
        let mut rx = controller.subscribe();

        controller.set_form_name("Book");
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().form.name, "Book");
    }

    #[tokio::test]
    async fn test_loading_set_only_while_list_in_flight() {
        let api = FakeApi::default();
        api.fail(true);
        let mut controller = ItemController::new(api.clone(), always(true)).await;
        assert_eq!(controller.state().error, LOAD_FAILED);

        api.fail(false);
        api.observe(controller.subscribe());
        controller.load().await;

        let seen = api.seen_during_list();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].loading);
        assert!(seen[0].error.is_empty());
        assert!(!controller.state().loading);
    }

    #[tokio::test]
    async fn test_untouched_description_is_not_sent() {
        let api = FakeApi::default();
        let item = Item {
            description: None,
            ..sample("Book")
        };
        api.items.lock().unwrap().push(item.clone());
        let mut controller = ItemController::new(api.clone(), always(true)).await;

        controller.start_edit(&item);
        assert_eq!(controller.state().form.description, None);
        controller.set_form_name("Book2");
        controller.save().await;

        assert_eq!(
            api.calls()[1],
            Call::Update(
                item.id,
                UpdateItemRequest {
                    name: Some("Book2".to_string()),
                    description: None,
                }
            )
        );
        assert_eq!(controller.state().items[0].description, None);
    }
}
