//! 内存存储，供测试和本地运行使用

use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

use super::store::{ItemStore, StoreError};
use crate::app::items::model::{Item, ItemChanges, NewItem};

/// 按插入顺序保存记录
#[derive(Clone, Default)]
pub struct InMemoryItemStore {
    items: Arc<Mutex<Vec<Item>>>,
}

impl InMemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.lock().map(|items| items.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Item>>, StoreError> {
        self.items
            .lock()
            .map_err(|e| StoreError::Unavailable(e.to_string()))
    }
}

#[async_trait]
impl ItemStore for InMemoryItemStore {
    async fn list(&self) -> Result<Vec<Item>, StoreError> {
        let items = self.lock()?;
        // 先反转再稳定排序，时间戳相同时后插入的排在前面
        let mut listed: Vec<Item> = items.iter().rev().cloned().collect();
        listed.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(listed)
    }

    async fn insert(&self, item: NewItem) -> Result<Item, StoreError> {
        let mut items = self.lock()?;
        let item = Item {
            id: Uuid::new_v4(),
            name: item.name,
            description: item.description,
            created_at: Utc::now(),
        };
        items.push(item.clone());
        Ok(item)
    }

    async fn update(&self, id: Uuid, changes: ItemChanges) -> Result<Option<Item>, StoreError> {
        let mut items = self.lock()?;
        let Some(item) = items.iter_mut().find(|item| item.id == id) else {
            return Ok(None);
        };

        if let Some(name) = changes.name {
            item.name = name;
        }
        if let Some(description) = changes.description {
            item.description = Some(description);
        }

        Ok(Some(item.clone()))
    }

    async fn remove(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut items = self.lock()?;
        let before = items.len();
        items.retain(|item| item.id != id);
        Ok(items.len() != before)
    }
}
