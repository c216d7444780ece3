//! gRPC 客户端

use std::time::Duration;

use keel_errors::{AppError, AppResult};
use tonic::transport::{Channel, Endpoint};
use tracing::info;

use crate::config::GrpcConfig;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// gRPC 客户端
///
/// 连接是惰性的：创建时不做网络 I/O，第一次请求时才真正建立连接
#[derive(Debug)]
pub struct GrpcClient {
    endpoint: String,
    channel: Option<Channel>,
}

impl GrpcClient {
    /// 必须在 tokio 运行时中调用
    pub fn new(config: &GrpcConfig) -> AppResult<Self> {
        let endpoint = config.uri();

        let channel = Endpoint::from_shared(endpoint.clone())
            .map_err(|e| AppError::transport(format!("invalid grpc endpoint {}: {}", endpoint, e)))?
            .connect_timeout(CONNECT_TIMEOUT)
            .connect_lazy();

        info!(endpoint = %endpoint, "grpc client connected");

        Ok(Self {
            endpoint,
            channel: Some(channel),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// 获取连接（`Channel` 克隆开销很小）
    pub fn channel(&self) -> AppResult<Channel> {
        self.channel
            .clone()
            .ok_or_else(|| AppError::transport("grpc client is closed"))
    }

    pub fn is_closed(&self) -> bool {
        self.channel.is_none()
    }

    /// 关闭连接，已克隆出去的 `Channel` 在其最后一个副本释放时断开
    pub fn close(&mut self) {
        if self.channel.take().is_some() {
            info!(endpoint = %self.endpoint, "grpc client closed");
        }
    }
}
