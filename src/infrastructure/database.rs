//! 数据库基础设施

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::info;
use uuid::Uuid;

use super::config::DatabaseConfig;
use super::store::{ItemStore, StoreError};
use crate::app::items::model::{Item, ItemChanges, NewItem};

/// 基于 PostgreSQL 的 Item 存储
#[derive(Clone)]
pub struct PgItemStore {
    pool: PgPool,
}

impl PgItemStore {
    /// 建立连接池并确保表存在。连不上直接返回错误
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(8))
            .connect(&config.url)
            .await?;

        let store = Self { pool };
        store.create_tables().await?;
        Ok(store)
    }

    pub fn get_pool(&self) -> &PgPool {
        &self.pool
    }

    async fn create_tables(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS items (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                name TEXT NOT NULL CHECK (name <> ''),
                description TEXT,
                created_at TIMESTAMPTZ NOT NULL DEFAULT clock_timestamp()
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        info!("items 表已就绪");
        Ok(())
    }
}

#[async_trait]
impl ItemStore for PgItemStore {
    async fn list(&self) -> Result<Vec<Item>, StoreError> {
        let items = sqlx::query_as::<_, Item>(
            "SELECT id, name, description, created_at FROM items ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    async fn insert(&self, item: NewItem) -> Result<Item, StoreError> {
        let item = sqlx::query_as::<_, Item>(
            "INSERT INTO items (name, description) VALUES ($1, $2) \
             RETURNING id, name, description, created_at",
        )
        .bind(&item.name)
        .bind(&item.description)
        .fetch_one(&self.pool)
        .await?;
        Ok(item)
    }

    async fn update(&self, id: Uuid, changes: ItemChanges) -> Result<Option<Item>, StoreError> {
        let item = sqlx::query_as::<_, Item>(
            "UPDATE items SET name = COALESCE($1, name), description = COALESCE($2, description) \
             WHERE id = $3 RETURNING id, name, description, created_at",
        )
        .bind(&changes.name)
        .bind(&changes.description)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(item)
    }

    async fn remove(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
