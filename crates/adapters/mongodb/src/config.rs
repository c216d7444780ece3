//! MongoDB 配置

use keel_config::{DefaultValue, EnvConfig, FieldSpec, Violation, rules};
use secrecy::Secret;
use serde::Deserialize;

/// 数据库配置
#[derive(Debug, Clone, Deserialize)]
pub struct DbConfig {
    pub host: String,
    pub port: i64,
    pub user: String,
    pub password: Secret<String>,
    pub name: String,
    /// 认证机制，空字符串表示由驱动协商
    pub mech: String,
}

impl EnvConfig for DbConfig {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::string("host", "DB_HOST")
            .required()
            .default(DefaultValue::Str("0.0.0.0"))
            .describe("Hostname or IP of the database server"),
        FieldSpec::integer("port", "DB_PORT")
            .required()
            .default(DefaultValue::Int(27017))
            .describe("Port of the database server"),
        FieldSpec::string("user", "DB_USER")
            .required()
            .describe("User for authentication in the database"),
        FieldSpec::string("password", "DB_PASSWORD")
            .required()
            .describe("Password for authentication in the database"),
        FieldSpec::string("name", "DB_NAME")
            .required()
            .describe("Name of the database"),
        FieldSpec::string("mech", "DB_MECH")
            .describe("Authentication mechanism of the database (optional)"),
    ];

    fn validate(&self) -> Result<(), Violation> {
        rules::port("port", self.port)
    }
}

impl DbConfig {
    pub fn uri(&self) -> String {
        format!("mongodb://{}:{}", self.host, self.port)
    }

    pub fn mechanism(&self) -> Option<&str> {
        if self.mech.is_empty() {
            None
        } else {
            Some(&self.mech)
        }
    }
}
