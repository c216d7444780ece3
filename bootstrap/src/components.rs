//! 基础设施组件的生命周期适配

use async_trait::async_trait;
use keel_adapter_grpc::{GrpcClient, GrpcServer};
use keel_adapter_mongodb::{Client, disconnect, ping};
use keel_errors::AppResult;

use crate::lifecycle::Component;

/// MongoDB：启动时 ping 主节点，停止时断开
pub struct MongoComponent {
    client: Option<Client>,
}

impl MongoComponent {
    pub fn new(client: Client) -> Self {
        Self {
            client: Some(client),
        }
    }
}

#[async_trait]
impl Component for MongoComponent {
    fn name(&self) -> &str {
        "mongodb"
    }

    async fn start(&mut self) -> AppResult<()> {
        match &self.client {
            Some(client) => ping(client).await,
            None => Ok(()),
        }
    }

    async fn stop(&mut self) -> AppResult<()> {
        if let Some(client) = self.client.take() {
            disconnect(client).await;
        }
        Ok(())
    }
}

/// gRPC 客户端：停止时关闭连接
pub struct GrpcClientComponent {
    client: GrpcClient,
}

impl GrpcClientComponent {
    pub fn new(client: GrpcClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Component for GrpcClientComponent {
    fn name(&self) -> &str {
        "grpc-client"
    }

    async fn stop(&mut self) -> AppResult<()> {
        self.client.close();
        Ok(())
    }
}

/// gRPC 服务端：启动时监听，停止时优雅关闭
pub struct GrpcServerComponent {
    server: GrpcServer,
}

impl GrpcServerComponent {
    pub fn new(server: GrpcServer) -> Self {
        Self { server }
    }
}

#[async_trait]
impl Component for GrpcServerComponent {
    fn name(&self) -> &str {
        "grpc-server"
    }

    async fn start(&mut self) -> AppResult<()> {
        self.server.start().await
    }

    async fn stop(&mut self) -> AppResult<()> {
        self.server.shutdown().await
    }
}
