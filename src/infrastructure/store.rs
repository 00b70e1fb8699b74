//! 记录存储接口

use async_trait::async_trait;
use uuid::Uuid;

use crate::app::items::model::{Item, ItemChanges, NewItem};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[cfg(feature = "database")]
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Item 存储。每个方法对应一次存储往返
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// 按 `created_at` 倒序返回全部记录
    async fn list(&self) -> Result<Vec<Item>, StoreError>;

    /// 写入新记录，`id` 和 `created_at` 由存储分配
    async fn insert(&self, item: NewItem) -> Result<Item, StoreError>;

    /// 覆盖给定字段并返回更新后的记录；记录不存在时返回 `None`
    async fn update(&self, id: Uuid, changes: ItemChanges) -> Result<Option<Item>, StoreError>;

    /// 删除记录；不存在时返回 `false`
    async fn remove(&self, id: Uuid) -> Result<bool, StoreError>;
}
