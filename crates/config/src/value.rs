//! 字段值与类型转换

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::field::FieldKind;

/// 日志级别
///
/// 零值为 `Info`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 无法识别的日志级别
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLevel(pub String);

impl fmt::Display for UnknownLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown log level: {}", self.0)
    }
}

impl std::error::Error for UnknownLevel {}

impl FromStr for LogLevel {
    type Err = UnknownLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            // dpanic/panic/fatal 没有对应的 tracing 级别，归入 error
            "error" | "dpanic" | "panic" | "fatal" => Ok(LogLevel::Error),
            _ => Err(UnknownLevel(s.to_string())),
        }
    }
}

/// 解析后的字段值
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Str(String),
    Int(i64),
    Bool(bool),
    Level(LogLevel),
}

impl Value {
    pub fn kind(&self) -> FieldKind {
        match self {
            Value::Str(_) => FieldKind::String,
            Value::Int(_) => FieldKind::Integer,
            Value::Bool(_) => FieldKind::Boolean,
            Value::Level(_) => FieldKind::Level,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_level(&self) -> Option<LogLevel> {
        match self {
            Value::Level(l) => Some(*l),
            _ => None,
        }
    }

    pub(crate) fn into_json(self) -> serde_json::Value {
        match self {
            Value::Str(s) => serde_json::Value::String(s),
            Value::Int(i) => serde_json::Value::from(i),
            Value::Bool(b) => serde_json::Value::Bool(b),
            Value::Level(l) => serde_json::Value::String(l.as_str().to_string()),
        }
    }
}

/// 把原始字符串转换为指定类型，失败返回 None
pub fn coerce(raw: &str, kind: FieldKind) -> Option<Value> {
    match kind {
        FieldKind::String => Some(Value::Str(raw.to_string())),
        FieldKind::Integer => raw.parse::<i64>().ok().map(Value::Int),
        FieldKind::Boolean => parse_bool(raw).map(Value::Bool),
        FieldKind::Level => raw.parse::<LogLevel>().ok().map(Value::Level),
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}
