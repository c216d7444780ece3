//! 日志配置

use keel_config::{DefaultValue, EnvConfig, FieldSpec, LogLevel};
use serde::Deserialize;

/// 日志配置
///
/// `PRODUCTION=true` 时输出 JSON，否则输出便于阅读的文本格式
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LoggerConfig {
    pub production: bool,
    pub log_level: LogLevel,
}

impl EnvConfig for LoggerConfig {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::boolean("production", "PRODUCTION")
            .default(DefaultValue::Bool(false))
            .describe("Emit JSON logs for production"),
        FieldSpec::level("log_level", "LOG_LEVEL")
            .default(DefaultValue::Level(LogLevel::Info))
            .describe("Minimum log level: trace, debug, info, warn, error"),
    ];
}
