//! 日志基础设施

use tracing_appender::{non_blocking, non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use super::config::LoggingConfig;

pub struct Logger;

impl Logger {
    /// 初始化日志系统：控制台输出，按配置追加按日期分割的文件输出。
    /// `RUST_LOG` 优先于配置中的级别。返回的 guard 需要在进程结束前一直持有
    pub fn init(config: &LoggingConfig) -> anyhow::Result<Option<WorkerGuard>> {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&config.level))?;

        let (file_layer, guard) = if config.file_output {
            std::fs::create_dir_all(&config.log_dir)?;
            let file_appender = rolling::daily(&config.log_dir, &config.file_prefix);
            let (writer, guard) = non_blocking(file_appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false)
                .with_thread_ids(true);
            (Some(layer), Some(guard))
        } else {
            (None, None)
        };

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stdout).with_target(false))
            .with(file_layer)
            .try_init()?;

        Ok(guard)
    }

    /// 客户端只输出到 stderr，避免和界面混在一起
    pub fn init_client(level: &str) -> anyhow::Result<()> {
        let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr).compact())
            .try_init()?;

        Ok(())
    }
}
