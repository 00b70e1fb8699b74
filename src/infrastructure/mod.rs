//! 基础设施层：配置、日志、存储

pub mod config;
#[cfg(feature = "database")]
pub mod database;
pub mod logger;
pub mod memory;
pub mod store;

use std::sync::Arc;
use tracing::info;

use config::DatabaseConfig;
use store::{ItemStore, StoreError};

/// 按连接串打开存储
pub async fn open_store(config: &DatabaseConfig) -> Result<Arc<dyn ItemStore>, StoreError> {
    if config.is_memory() {
        info!("使用内存存储");
        return Ok(Arc::new(memory::InMemoryItemStore::new()));
    }
    open_database(config).await
}

#[cfg(feature = "database")]
async fn open_database(config: &DatabaseConfig) -> Result<Arc<dyn ItemStore>, StoreError> {
    info!("连接数据库: {}", config.redacted_url());
    let store = database::PgItemStore::connect(config).await?;
    Ok(Arc::new(store))
}

#[cfg(not(feature = "database"))]
async fn open_database(config: &DatabaseConfig) -> Result<Arc<dyn ItemStore>, StoreError> {
    Err(StoreError::Unavailable(format!(
        "未启用 database 特性，无法连接 {}",
        config.redacted_url()
    )))
}
