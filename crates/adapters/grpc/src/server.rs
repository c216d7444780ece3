//! gRPC 服务端

use std::net::SocketAddr;
use std::time::Duration;

use keel_errors::{AppError, AppResult};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::codegen::http::Request;
use tonic::service::Routes;
use tonic::transport::Server;
use tracing::{Span, error, info, info_span};

use crate::config::GrpcConfig;

/// HTTP/2 keepalive ping 间隔
pub(crate) const KEEPALIVE_INTERVAL: Duration = Duration::from_secs(10 * 60);
/// keepalive ping 应答超时
pub(crate) const KEEPALIVE_TIMEOUT: Duration = Duration::from_secs(15);
/// 单个连接的最长存活时间
pub(crate) const MAX_CONNECTION_AGE: Duration = Duration::from_secs(5 * 60);

/// 每个请求（unary 与 streaming）一个 span
pub(crate) fn request_span(req: &Request<()>) -> Span {
    info_span!("grpc", method = %req.uri().path())
}

type ServeHandle = JoinHandle<Result<(), tonic::transport::Error>>;

/// gRPC 服务端
///
/// `start` 绑定端口并在后台任务中提供服务，`shutdown` 停止接收新连接并等待进行中的请求结束
pub struct GrpcServer {
    endpoint: String,
    routes: Option<Routes>,
    shutdown_tx: Option<oneshot::Sender<()>>,
    handle: Option<ServeHandle>,
    local_addr: Option<SocketAddr>,
}

impl GrpcServer {
    pub fn new(config: &GrpcConfig, routes: Routes) -> Self {
        Self {
            endpoint: config.endpoint(),
            routes: Some(routes),
            shutdown_tx: None,
            handle: None,
            local_addr: None,
        }
    }

    /// 实际监听的地址（启动后可用）
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.local_addr
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// 启动服务端
    ///
    /// 端口绑定失败直接返回错误
    pub async fn start(&mut self) -> AppResult<()> {
        let routes = self
            .routes
            .take()
            .ok_or_else(|| AppError::transport("grpc server already started"))?;

        let listener = TcpListener::bind(&self.endpoint).await.map_err(|e| {
            AppError::transport(format!("failed to listen on {}: {}", self.endpoint, e))
        })?;
        let local_addr = listener
            .local_addr()
            .map_err(|e| AppError::transport(format!("failed to read local address: {}", e)))?;

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let mut server = Server::builder()
            .trace_fn(request_span)
            .http2_keepalive_interval(Some(KEEPALIVE_INTERVAL))
            .http2_keepalive_timeout(Some(KEEPALIVE_TIMEOUT))
            .max_connection_age(MAX_CONNECTION_AGE);
        let router = server.add_routes(routes);

        let handle = tokio::spawn(async move {
            let result = router
                .serve_with_incoming_shutdown(TcpListenerStream::new(listener), async {
                    let _ = shutdown_rx.await;
                })
                .await;

            if let Err(e) = &result {
                error!(error = %e, "grpc server terminated with error");
            }
            result
        });

        self.shutdown_tx = Some(shutdown_tx);
        self.handle = Some(handle);
        self.local_addr = Some(local_addr);

        info!(addr = %local_addr, "grpc server started");
        Ok(())
    }

    /// 优雅关闭
    pub async fn shutdown(&mut self) -> AppResult<()> {
        if let Some(tx) = self.shutdown_tx.take() {
            // 服务任务可能已经退出
            let _ = tx.send(());
        }

        let Some(handle) = self.handle.take() else {
            return Ok(());
        };

        match handle.await {
            Ok(Ok(())) => {
                info!("grpc server stopped gracefully");
                Ok(())
            }
            Ok(Err(e)) => Err(AppError::transport(format!("grpc server error: {}", e))),
            Err(e) => Err(AppError::internal(format!("grpc server task failed: {}", e))),
        }
    }
}
