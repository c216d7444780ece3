//! 服务运行时

use keel_errors::AppResult;
use keel_telemetry::{LoggerConfig, init_tracing};
use tracing::{error, info};

/// 初始化服务运行时
pub fn init_runtime(config: &LoggerConfig) -> AppResult<()> {
    init_tracing(config)?;

    info!(
        production = config.production,
        log_level = %config.log_level,
        "Runtime initialized"
    );
    Ok(())
}

/// 等待关闭信号（Ctrl+C 或 SIGTERM）
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
