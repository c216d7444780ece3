//! Graceful Shutdown

use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::info;

/// Shutdown 控制器
///
/// 在任何等待者出现之前触发的关闭也不会丢失
#[derive(Clone)]
pub struct ShutdownController {
    tx: Arc<watch::Sender<bool>>,
}

impl ShutdownController {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// 触发关闭
    pub fn shutdown(&self) {
        info!("Triggering shutdown");
        self.tx.send_replace(true);
    }

    /// 是否已触发
    pub fn is_shutdown(&self) -> bool {
        *self.tx.borrow()
    }

    /// 等待关闭信号
    pub fn wait(&self) -> impl Future<Output = ()> + Send + 'static {
        let mut rx = self.tx.subscribe();
        async move {
            // 发送端由 self 持有，等待期间不会被关闭
            let _ = rx.wait_for(|triggered| *triggered).await;
        }
    }
}

impl Default for ShutdownController {
    fn default() -> Self {
        Self::new()
    }
}
