//! 基础设施资源管理
//!
//! 统一构建所有服务共享的基础设施资源，并按顺序注册到生命周期

use keel_adapter_grpc::{Channel, GrpcClient, GrpcConfig, GrpcServer, Routes};
use keel_adapter_mongodb::{Client, Database, DbConfig, create_client, database};
use keel_config::{ConfigError, ConfigLoader};
use keel_errors::AppResult;
use keel_telemetry::LoggerConfig;
use tracing::info;

use crate::components::{GrpcClientComponent, GrpcServerComponent, MongoComponent};
use crate::lifecycle::{Lifecycle, LifecycleConfig};

/// 启动所需的全部配置
#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub logger: LoggerConfig,
    pub grpc: GrpcConfig,
    pub database: DbConfig,
}

impl StartupConfig {
    /// 一次性加载所有子系统配置，任一失败即返回
    pub fn load(loader: &ConfigLoader) -> Result<Self, ConfigError> {
        Ok(Self {
            logger: loader.load()?,
            grpc: loader.load()?,
            database: loader.load()?,
        })
    }
}

/// 基础设施资源容器
///
/// 构建时不做网络 I/O；连接验证与端口监听在 `start` 中按顺序进行
pub struct Infrastructure {
    config: StartupConfig,
    mongo_client: Client,
    database: Database,
    grpc_channel: Channel,
    lifecycle: Lifecycle,
}

impl Infrastructure {
    /// 从配置创建基础设施资源
    pub async fn from_config(config: StartupConfig, lifecycle: LifecycleConfig) -> AppResult<Self> {
        let mut lifecycle = Lifecycle::with_config(lifecycle);

        // 1. MongoDB 客户端
        let mongo_client = create_client(&config.database).await?;
        let database = database(&mongo_client, &config.database);
        lifecycle.append(MongoComponent::new(mongo_client.clone()));

        // 2. gRPC 客户端
        let grpc_client = GrpcClient::new(&config.grpc)?;
        let grpc_channel = grpc_client.channel()?;
        lifecycle.append(GrpcClientComponent::new(grpc_client));

        info!("Infrastructure created");

        Ok(Self {
            config,
            mongo_client,
            database,
            grpc_channel,
            lifecycle,
        })
    }

    /// 注册 gRPC 服务端，启动时最后监听
    pub fn serve(&mut self, routes: Routes) {
        let server = GrpcServer::new(&self.config.grpc, routes);
        self.lifecycle.append(GrpcServerComponent::new(server));
    }

    /// 获取启动配置
    pub fn config(&self) -> &StartupConfig {
        &self.config
    }

    /// 获取 MongoDB 客户端
    pub fn mongo_client(&self) -> Client {
        self.mongo_client.clone()
    }

    /// 获取数据库句柄
    pub fn database(&self) -> Database {
        self.database.clone()
    }

    /// 获取 gRPC 客户端连接
    pub fn grpc_channel(&self) -> Channel {
        self.grpc_channel.clone()
    }

    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    /// 按顺序启动所有组件
    pub async fn start(&mut self) -> AppResult<()> {
        self.lifecycle.start().await
    }

    /// 逆序停止所有组件
    pub async fn stop(&mut self) -> AppResult<()> {
        self.lifecycle.stop().await
    }
}
