//! HTTP 服务启动

use tokio::net::TcpListener;
use tracing::info;

use crate::app::{self, ITEMS_PATH};
use crate::infrastructure::config::{Config, ServerConfig};
use crate::infrastructure::open_store;

/// 监听配置的地址，主机名和 IPv6 地址都交给系统解析
pub async fn bind_listener(config: &ServerConfig) -> std::io::Result<TcpListener> {
    TcpListener::bind((config.bind_address.as_str(), config.port)).await
}

/// 先连上存储再监听端口；任何一步失败都直接返回错误
pub async fn run(config: &Config) -> anyhow::Result<()> {
    let store = open_store(&config.database).await?;
    info!("存储已连接");

    let app = app::router(store);

    let listener = bind_listener(&config.server).await?;
    let addr = listener.local_addr()?;

    info!("🚀 Backend server running on http://{}", addr);
    info!("📖 API 端点:");
    info!("   GET    {}        - 获取全部条目", ITEMS_PATH);
    info!("   POST   {}        - 创建条目", ITEMS_PATH);
    info!("   PUT    {}/:id    - 更新条目", ITEMS_PATH);
    info!("   DELETE {}/:id    - 删除条目", ITEMS_PATH);

    axum::serve(listener, app).await?;
    Ok(())
}
