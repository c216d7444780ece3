//! 服务启动器
//!
//! 提供统一的服务启动模式

use keel_adapter_grpc::RoutesBuilder;
use keel_config::{ConfigLoader, EnvSnapshot};
use keel_errors::AppResult;
use tracing::{info, warn};

use crate::infrastructure::{Infrastructure, StartupConfig};
use crate::lifecycle::LifecycleConfig;
use crate::runtime::{init_runtime, shutdown_signal};
use crate::shutdown::ShutdownController;

/// 服务启动器配置
#[derive(Clone, Default)]
pub struct ServiceConfig {
    /// 环境变量前缀
    pub prefix: Option<String>,
    /// 环境变量来源（默认读取进程环境）
    pub env: Option<EnvSnapshot>,
    /// 组件启动/停止超时
    pub lifecycle: LifecycleConfig,
    /// 除系统信号外的关闭触发器
    pub shutdown: ShutdownController,
}

impl ServiceConfig {
    /// 设置环境变量前缀
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// 使用指定的环境变量快照
    pub fn with_env(mut self, env: EnvSnapshot) -> Self {
        self.env = Some(env);
        self
    }

    /// 设置生命周期超时
    pub fn with_lifecycle(mut self, lifecycle: LifecycleConfig) -> Self {
        self.lifecycle = lifecycle;
        self
    }

    /// 设置关闭触发器
    pub fn with_shutdown(mut self, shutdown: ShutdownController) -> Self {
        self.shutdown = shutdown;
        self
    }

    fn loader(&self) -> ConfigLoader {
        let env = self.env.clone().unwrap_or_else(EnvSnapshot::capture);
        let loader = ConfigLoader::new(env);
        match &self.prefix {
            Some(prefix) => loader.with_prefix(prefix.clone()),
            None => loader,
        }
    }
}

/// 运行 gRPC 服务
///
/// 这是所有服务的统一入口点。它负责：
/// 1. 加载全部配置（任何错误都在获取资源之前返回）
/// 2. 初始化日志
/// 3. 创建基础设施资源（MongoDB、gRPC 客户端）
/// 4. 调用用户提供的闭包注册 gRPC 服务
/// 5. 按顺序启动组件：验证数据库连接，最后监听端口
/// 6. 等待关闭信号，逆序停止组件
///
/// # 示例
///
/// ```ignore
/// use keel_bootstrap::{ServiceConfig, run};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     run(ServiceConfig::default(), |infra, routes| {
///         routes.add_service(MyServiceServer::new(MyService::new(infra.database())));
///         Ok(())
///     })
///     .await?;
///     Ok(())
/// }
/// ```
pub async fn run<F>(service: ServiceConfig, register: F) -> AppResult<()>
where
    F: FnOnce(&Infrastructure, &mut RoutesBuilder) -> AppResult<()>,
{
    // 1. 加载配置
    let config = StartupConfig::load(&service.loader())?;

    // 2. 初始化运行时
    init_runtime(&config.logger)?;

    info!(grpc = %config.grpc.endpoint(), database = %config.database.name, "Starting service");

    // 3. 创建基础设施
    let mut infra = Infrastructure::from_config(config, service.lifecycle.clone()).await?;

    // 4. 注册 gRPC 服务
    let mut routes = RoutesBuilder::default();
    register(&infra, &mut routes)?;
    infra.serve(routes.routes());

    // 5. 启动
    infra.start().await?;
    info!("Service started");

    // 6. 等待关闭
    tokio::select! {
        _ = shutdown_signal() => {},
        _ = service.shutdown.wait() => {},
    }

    if let Err(e) = infra.stop().await {
        warn!(error = %e, "Service stopped with errors");
        return Err(e);
    }

    info!("Service stopped");
    Ok(())
}
