//! keel-errors - 统一错误处理
//!
//! 启动阶段所有子系统共用的错误类型

use keel_config::ConfigError;
use thiserror::Error;

/// 配置错误的退出码（sysexits.h EX_CONFIG）
pub const EXIT_CONFIG: u8 = 78;

/// 应用错误类型
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Telemetry error: {0}")]
    Telemetry(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Lifecycle error: {0}")]
    Lifecycle(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn telemetry(msg: impl Into<String>) -> Self {
        Self::Telemetry(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    pub fn lifecycle(msg: impl Into<String>) -> Self {
        Self::Lifecycle(msg.into())
    }

    pub fn timeout(msg: impl Into<String>) -> Self {
        Self::Timeout(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// 是否为配置错误
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// 进程退出码
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) => EXIT_CONFIG,
            _ => 1,
        }
    }
}

/// Result 类型别名
pub type AppResult<T> = Result<T, AppError>;
