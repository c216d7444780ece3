//! 配置错误类型

use thiserror::Error;

use crate::field::FieldKind;

/// 配置加载错误
///
/// 所有变体都是启动致命错误，不可重试。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("missing required configuration `{field}`: environment variable {key} is not set")]
    MissingRequired { field: &'static str, key: String },

    #[error("invalid value for `{field}`: environment variable {key} must be a valid {expected}")]
    InvalidValue {
        field: &'static str,
        key: String,
        expected: FieldKind,
    },

    #[error("invalid configuration `{field}` ({key}): {constraint}")]
    SemanticInvalid {
        field: &'static str,
        key: String,
        constraint: String,
    },

    #[error("malformed configuration definition: {0}")]
    Definition(String),

    #[error("failed to map configuration: {0}")]
    Mapping(String),
}

/// 错误种类，便于调用方按类型判断
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigErrorKind {
    MissingRequired,
    InvalidValue,
    SemanticInvalid,
    Definition,
    Mapping,
}

impl ConfigError {
    pub fn kind(&self) -> ConfigErrorKind {
        match self {
            Self::MissingRequired { .. } => ConfigErrorKind::MissingRequired,
            Self::InvalidValue { .. } => ConfigErrorKind::InvalidValue,
            Self::SemanticInvalid { .. } => ConfigErrorKind::SemanticInvalid,
            Self::Definition(_) => ConfigErrorKind::Definition,
            Self::Mapping(_) => ConfigErrorKind::Mapping,
        }
    }

    /// 出错的字段名
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::MissingRequired { field, .. }
            | Self::InvalidValue { field, .. }
            | Self::SemanticInvalid { field, .. } => Some(field),
            _ => None,
        }
    }

    /// 出错字段对应的环境变量（含前缀）
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::MissingRequired { key, .. }
            | Self::InvalidValue { key, .. }
            | Self::SemanticInvalid { key, .. } => Some(key),
            _ => None,
        }
    }
}

/// 领域校验失败
///
/// 由 `EnvConfig::validate` 返回，加载器会补上环境变量名并转换为 `SemanticInvalid`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: &'static str,
    pub constraint: String,
}

impl Violation {
    pub fn new(field: &'static str, constraint: impl Into<String>) -> Self {
        Self {
            field,
            constraint: constraint.into(),
        }
    }
}
