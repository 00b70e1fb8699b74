//! Item 业务服务

use std::sync::Arc;
use tracing::error;
use uuid::Uuid;
use validator::Validate;

use super::model::{CreateItemRequest, Item, ItemChanges, NewItem, UpdateItemRequest};
use crate::core::error::CoreError;
use crate::infrastructure::store::{ItemStore, StoreError};

pub const ITEM_NOT_FOUND: &str = "Item not found";

#[derive(Clone)]
pub struct ItemService {
    store: Arc<dyn ItemStore>,
}

impl ItemService {
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self { store }
    }

    pub async fn list_items(&self) -> Result<Vec<Item>, CoreError> {
        self.store
            .list()
            .await
            .map_err(|e| store_failure("fetching items", e))
    }

    /// 校验失败时不访问存储
    pub async fn create_item(&self, req: CreateItemRequest) -> Result<Item, CoreError> {
        req.validate()?;

        let item = NewItem {
            name: req.name.unwrap_or_default(),
            description: req.description,
        };
        self.store
            .insert(item)
            .await
            .map_err(|e| store_failure("creating item", e))
    }

    pub async fn update_item(&self, id: &str, req: UpdateItemRequest) -> Result<Item, CoreError> {
        req.validate()?;
        let id = parse_id(id)?;

        self.store
            .update(id, ItemChanges::from(req))
            .await
            .map_err(|e| store_failure("updating item", e))?
            .ok_or_else(not_found)
    }

    pub async fn delete_item(&self, id: &str) -> Result<(), CoreError> {
        let id = parse_id(id)?;

        let removed = self
            .store
            .remove(id)
            .await
            .map_err(|e| store_failure("deleting item", e))?;

        if removed {
            Ok(())
        } else {
            Err(not_found())
        }
    }
}

/// 不是合法 UUID 的 id 不可能存在，按 404 处理
fn parse_id(id: &str) -> Result<Uuid, CoreError> {
    Uuid::parse_str(id).map_err(|_| not_found())
}

fn not_found() -> CoreError {
    CoreError::NotFound(ITEM_NOT_FOUND.to_string())
}

fn store_failure(action: &str, err: StoreError) -> CoreError {
    error!("Error {}: {}", action, err);
    CoreError::InternalServerError
}
