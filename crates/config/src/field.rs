//! 配置字段描述
//!
//! 每个配置类型用一张静态的 `FieldSpec` 表声明它读取的环境变量

use std::fmt;

use crate::value::{LogLevel, Value};

/// 字段的语义类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Integer,
    Boolean,
    Level,
}

impl FieldKind {
    /// 该类型的零值（可选字段缺失且无默认值时使用）
    pub fn zero_value(self) -> Value {
        match self {
            FieldKind::String => Value::Str(String::new()),
            FieldKind::Integer => Value::Int(0),
            FieldKind::Boolean => Value::Bool(false),
            FieldKind::Level => Value::Level(LogLevel::default()),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Integer => "integer",
            FieldKind::Boolean => "boolean",
            FieldKind::Level => "level",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 默认值，已经是目标类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultValue {
    Str(&'static str),
    Int(i64),
    Bool(bool),
    Level(LogLevel),
}

impl DefaultValue {
    pub fn kind(self) -> FieldKind {
        match self {
            DefaultValue::Str(_) => FieldKind::String,
            DefaultValue::Int(_) => FieldKind::Integer,
            DefaultValue::Bool(_) => FieldKind::Boolean,
            DefaultValue::Level(_) => FieldKind::Level,
        }
    }

    pub fn to_value(self) -> Value {
        match self {
            DefaultValue::Str(s) => Value::Str(s.to_string()),
            DefaultValue::Int(i) => Value::Int(i),
            DefaultValue::Bool(b) => Value::Bool(b),
            DefaultValue::Level(l) => Value::Level(l),
        }
    }
}

impl fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultValue::Str(s) => f.write_str(s),
            DefaultValue::Int(i) => write!(f, "{}", i),
            DefaultValue::Bool(b) => write!(f, "{}", b),
            DefaultValue::Level(l) => write!(f, "{}", l),
        }
    }
}

/// 单个配置字段的元数据
///
/// `field` 是结构体成员名，`name` 是环境变量名（区分大小写，不含前缀）。
///
/// ```
/// use keel_config::{DefaultValue, FieldSpec};
///
/// const PORT: FieldSpec = FieldSpec::integer("port", "DB_PORT")
///     .required()
///     .default(DefaultValue::Int(27017))
///     .describe("Port of the database server");
///
/// assert_eq!(PORT.name, "DB_PORT");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub field: &'static str,
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub default: Option<DefaultValue>,
    pub description: &'static str,
}

impl FieldSpec {
    const fn new(field: &'static str, name: &'static str, kind: FieldKind) -> Self {
        Self {
            field,
            name,
            kind,
            required: false,
            default: None,
            description: "",
        }
    }

    pub const fn string(field: &'static str, name: &'static str) -> Self {
        Self::new(field, name, FieldKind::String)
    }

    pub const fn integer(field: &'static str, name: &'static str) -> Self {
        Self::new(field, name, FieldKind::Integer)
    }

    pub const fn boolean(field: &'static str, name: &'static str) -> Self {
        Self::new(field, name, FieldKind::Boolean)
    }

    pub const fn level(field: &'static str, name: &'static str) -> Self {
        Self::new(field, name, FieldKind::Level)
    }

    /// 标记为必填
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// 设置默认值
    pub const fn default(mut self, value: DefaultValue) -> Self {
        self.default = Some(value);
        self
    }

    /// 设置描述（仅用于文档）
    pub const fn describe(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }
}
