//! keel-telemetry - 日志初始化

mod config;

pub use config::LoggerConfig;

use keel_config::LogLevel;
use keel_errors::{AppError, AppResult};
use tracing_subscriber::{
    EnvFilter, filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

/// 日志级别映射
pub fn level_filter(level: LogLevel) -> LevelFilter {
    match level {
        LogLevel::Trace => LevelFilter::TRACE,
        LogLevel::Debug => LevelFilter::DEBUG,
        LogLevel::Info => LevelFilter::INFO,
        LogLevel::Warn => LevelFilter::WARN,
        LogLevel::Error => LevelFilter::ERROR,
    }
}

/// 构建过滤器，RUST_LOG 优先于配置的级别
fn build_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(level_filter(level).into())
        .from_env_lossy()
}

/// 初始化 tracing
///
/// 全局 subscriber 只能安装一次，重复调用返回错误
pub fn init_tracing(config: &LoggerConfig) -> AppResult<()> {
    let filter = build_filter(config.log_level);

    let result = if config.production {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .json()
                    .with_file(true)
                    .with_line_number(true),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_file(true).with_line_number(true))
            .try_init()
    };

    result.map_err(|e| AppError::telemetry(format!("failed to install tracing subscriber: {}", e)))
}
