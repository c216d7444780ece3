//! 组件生命周期
//!
//! 按注册顺序启动，按相反顺序停止

use std::time::Duration;

use async_trait::async_trait;
use keel_errors::{AppError, AppResult};
use tokio::time::timeout;
use tracing::{error, info, warn};

/// 由生命周期管理的组件
#[async_trait]
pub trait Component: Send {
    fn name(&self) -> &str;

    async fn start(&mut self) -> AppResult<()> {
        Ok(())
    }

    async fn stop(&mut self) -> AppResult<()> {
        Ok(())
    }
}

/// 生命周期配置
#[derive(Debug, Clone)]
pub struct LifecycleConfig {
    /// 单个组件启动超时
    pub start_timeout: Duration,
    /// 单个组件停止超时
    pub stop_timeout: Duration,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            start_timeout: Duration::from_secs(15),
            stop_timeout: Duration::from_secs(15),
        }
    }
}

/// 有序的组件列表
pub struct Lifecycle {
    config: LifecycleConfig,
    components: Vec<Box<dyn Component>>,
    started: usize,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::with_config(LifecycleConfig::default())
    }

    pub fn with_config(config: LifecycleConfig) -> Self {
        Self {
            config,
            components: Vec::new(),
            started: 0,
        }
    }

    /// 追加组件
    pub fn append(&mut self, component: impl Component + 'static) {
        self.components.push(Box::new(component));
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// 已启动的组件数
    pub fn started(&self) -> usize {
        self.started
    }

    /// 按顺序启动
    ///
    /// 任一组件失败时，逆序停止已经启动的组件并返回该错误
    pub async fn start(&mut self) -> AppResult<()> {
        while self.started < self.components.len() {
            let start_timeout = self.config.start_timeout;
            let component = &mut self.components[self.started];
            let name = component.name().to_string();

            info!(component = %name, "Starting component");
            let result = match timeout(start_timeout, component.start()).await {
                Ok(result) => result,
                Err(_) => Err(AppError::timeout(format!(
                    "{} did not start within {:?}",
                    name, start_timeout
                ))),
            };

            if let Err(e) = result {
                error!(component = %name, error = %e, "Component failed to start, rolling back");
                if let Err(stop_err) = self.stop().await {
                    warn!(error = %stop_err, "Rollback did not complete cleanly");
                }
                return Err(e);
            }

            self.started += 1;
        }

        Ok(())
    }

    /// 逆序停止已启动的组件
    ///
    /// 某个组件停止失败不会阻止其它组件停止，返回第一个错误
    pub async fn stop(&mut self) -> AppResult<()> {
        let mut first_error = None;

        while self.started > 0 {
            self.started -= 1;
            let stop_timeout = self.config.stop_timeout;
            let component = &mut self.components[self.started];
            let name = component.name().to_string();

            info!(component = %name, "Stopping component");
            let result = match timeout(stop_timeout, component.stop()).await {
                Ok(result) => result,
                Err(_) => Err(AppError::timeout(format!(
                    "{} did not stop within {:?}",
                    name, stop_timeout
                ))),
            };

            if let Err(e) = result {
                error!(component = %name, error = %e, "Component failed to stop");
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}
