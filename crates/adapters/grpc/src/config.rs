//! gRPC 配置

use keel_config::{EnvConfig, FieldSpec, Violation, rules};
use serde::Deserialize;

/// gRPC 配置
///
/// 服务端监听 `GRPC_HOST:GRPC_PORT`，客户端也连接同一个地址
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GrpcConfig {
    pub host: String,
    pub port: i64,
}

impl EnvConfig for GrpcConfig {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::string("host", "GRPC_HOST")
            .required()
            .describe("The hostname or IP address of the gRPC server"),
        FieldSpec::integer("port", "GRPC_PORT")
            .required()
            .describe("The port number on which the gRPC server is listening"),
    ];

    fn validate(&self) -> Result<(), Violation> {
        rules::not_blank("host", &self.host)?;
        rules::port("port", self.port)
    }
}

impl GrpcConfig {
    /// `host:port`，IPv6 地址加方括号
    pub fn endpoint(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }

    /// 客户端使用的 URI
    pub fn uri(&self) -> String {
        format!("http://{}", self.endpoint())
    }
}
