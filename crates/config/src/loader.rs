//! 配置加载器
//!
//! 按字段表从环境变量快照中解析配置：
//! 1. 变量存在且非空：转换为字段类型，失败（包括非 UTF-8 的值）即 `InvalidValue`
//! 2. 变量缺失但有默认值：使用默认值
//! 3. 变量缺失、无默认值且必填：`MissingRequired`
//! 4. 变量缺失、无默认值且可选：使用类型零值
//!
//! 通用解析成功后再执行类型自己的领域校验。

use std::collections::HashSet;

use serde::de::DeserializeOwned;

use crate::env::EnvSnapshot;
use crate::error::{ConfigError, Violation};
use crate::field::FieldSpec;
use crate::value::{Value, coerce};

/// 可以从环境变量加载的配置类型
pub trait EnvConfig: DeserializeOwned {
    /// 字段表，顺序即解析顺序
    const FIELDS: &'static [FieldSpec];

    /// 领域校验，在通用解析成功之后执行
    fn validate(&self) -> Result<(), Violation> {
        Ok(())
    }
}

/// 解析结果，按字段表顺序保存
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    values: Vec<(&'static str, Value)>,
}

impl ResolvedConfig {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.values
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Value)> {
        self.values.iter().map(|(name, value)| (*name, value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// 映射到强类型结构体
    pub fn deserialize<T: DeserializeOwned>(self) -> Result<T, ConfigError> {
        let map: serde_json::Map<String, serde_json::Value> = self
            .values
            .into_iter()
            .map(|(name, value)| (name.to_string(), value.into_json()))
            .collect();

        serde_json::from_value(serde_json::Value::Object(map))
            .map_err(|e| ConfigError::Mapping(e.to_string()))
    }
}

/// 配置加载器
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    env: EnvSnapshot,
    prefix: Option<String>,
}

impl ConfigLoader {
    pub fn new(env: EnvSnapshot) -> Self {
        Self { env, prefix: None }
    }

    /// 基于当前进程环境创建
    pub fn from_env() -> Self {
        Self::new(EnvSnapshot::capture())
    }

    /// 设置前缀，空字符串等同于不设置
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        self.prefix = if prefix.is_empty() { None } else { Some(prefix) };
        self
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// 计算字段对应的环境变量名
    pub fn key_for(&self, name: &str) -> String {
        prefixed_key(self.prefix.as_deref(), name)
    }

    /// 按字段表解析，遇到第一个错误即返回
    pub fn resolve(&self, fields: &[FieldSpec]) -> Result<ResolvedConfig, ConfigError> {
        check_definition(fields)?;

        let values = fields
            .iter()
            .map(|spec| Ok((spec.field, self.resolve_field(spec)?)))
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(ResolvedConfig { values })
    }

    /// 加载并校验强类型配置
    pub fn load<T: EnvConfig>(&self) -> Result<T, ConfigError> {
        let config: T = self.resolve(T::FIELDS)?.deserialize()?;

        config
            .validate()
            .map_err(|violation| self.semantic_error(T::FIELDS, violation))?;

        Ok(config)
    }

    fn resolve_field(&self, spec: &FieldSpec) -> Result<Value, ConfigError> {
        let key = self.key_for(spec.name);

        if self.env.is_non_unicode(&key) {
            return Err(ConfigError::InvalidValue {
                field: spec.field,
                key,
                expected: spec.kind,
            });
        }

        if let Some(raw) = self.env.get(&key) {
            return coerce(raw, spec.kind).ok_or(ConfigError::InvalidValue {
                field: spec.field,
                key,
                expected: spec.kind,
            });
        }

        if let Some(default) = spec.default {
            return Ok(default.to_value());
        }

        if spec.required {
            return Err(ConfigError::MissingRequired {
                field: spec.field,
                key,
            });
        }

        Ok(spec.kind.zero_value())
    }

    fn semantic_error(&self, fields: &[FieldSpec], violation: Violation) -> ConfigError {
        match fields.iter().find(|spec| spec.field == violation.field) {
            Some(spec) => ConfigError::SemanticInvalid {
                field: spec.field,
                key: self.key_for(spec.name),
                constraint: violation.constraint,
            },
            None => ConfigError::Definition(format!(
                "validation refers to undeclared field `{}`",
                violation.field
            )),
        }
    }
}

/// 从当前进程环境加载（无前缀）
pub fn load<T: EnvConfig>() -> Result<T, ConfigError> {
    ConfigLoader::from_env().load()
}

/// 从当前进程环境加载（带前缀）
pub fn load_prefixed<T: EnvConfig>(prefix: &str) -> Result<T, ConfigError> {
    ConfigLoader::from_env().with_prefix(prefix).load()
}

pub(crate) fn prefixed_key(prefix: Option<&str>, name: &str) -> String {
    match prefix {
        Some(prefix) if !prefix.is_empty() => format!("{}_{}", prefix, name),
        _ => name.to_string(),
    }
}

/// 字段表自检：名称唯一、默认值类型与字段类型一致
fn check_definition(fields: &[FieldSpec]) -> Result<(), ConfigError> {
    let mut names = HashSet::new();
    let mut members = HashSet::new();

    for spec in fields {
        if !names.insert(spec.name) {
            return Err(ConfigError::Definition(format!(
                "environment variable {} declared twice",
                spec.name
            )));
        }
        if !members.insert(spec.field) {
            return Err(ConfigError::Definition(format!(
                "field `{}` declared twice",
                spec.field
            )));
        }
        if let Some(default) = spec.default {
            if default.kind() != spec.kind {
                return Err(ConfigError::Definition(format!(
                    "default for {} is a {} but the field is a {}",
                    spec.name,
                    default.kind(),
                    spec.kind
                )));
            }
        }
    }

    Ok(())
}
