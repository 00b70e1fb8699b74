use item_crud::infrastructure::{config::load_config, logger::Logger};
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config()?;
    let _guard = Logger::init(&config.logging)?;

    info!("启动 Item CRUD 服务...");

    if let Err(e) = item_crud::server::run(&config).await {
        error!("服务启动失败: {:#}", e);
        return Err(e);
    }

    Ok(())
}
