//! keel-config - 环境变量配置加载库
//!
//! 每个子系统用一张静态字段表声明自己的配置，进程启动时一次性加载并校验，
//! 任何错误都会中止启动。

mod env;
mod error;
mod field;
mod loader;
pub mod rules;
mod usage;
mod value;

pub use env::EnvSnapshot;
pub use error::{ConfigError, ConfigErrorKind, Violation};
pub use field::{DefaultValue, FieldKind, FieldSpec};
pub use loader::{ConfigLoader, EnvConfig, ResolvedConfig, load, load_prefixed};
pub use usage::usage;
pub use value::{LogLevel, UnknownLevel, Value, coerce};

#[cfg(test)]
mod tests;
