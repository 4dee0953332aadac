//! 日志基础设施

use std::io;

use anyhow::Result;
use tracing_appender::{non_blocking, non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// 日志过滤器：`RUST_LOG` 优先，否则使用配置中的级别
pub fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// 初始化日志系统
///
/// 1. 控制台输出（可关闭）
/// 2. 按日期分割的文件日志（可选）
///
/// 启用文件日志时返回 `WorkerGuard`，调用方需持有到进程退出，
/// 否则缓冲中的日志会丢失。
///
/// # 示例
/// ```rust,no_run
/// use welcome_api::config::LoggingConfig;
/// use welcome_api::infrastructure::logger::init_logging;
///
/// let _guard = init_logging(&LoggingConfig::default())?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let (file_layer, guard) = if config.file_output {
        std::fs::create_dir_all(&config.log_path)?;

        let file_appender = rolling::daily(&config.log_path, &config.file_prefix);
        let (writer, guard) = non_blocking(file_appender);
        let layer = fmt::layer()
            .with_writer(writer)
            .with_ansi(false) // 文件中不使用颜色
            .with_target(false)
            .with_thread_names(true);
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    let console_layer = config
        .console_output
        .then(|| fmt::layer().with_writer(io::stdout).with_ansi(true));

    tracing_subscriber::registry()
        .with(build_filter(&config.level))
        .with(file_layer)
        .with(console_layer)
        .try_init()?;

    Ok(guard)
}
