//! keel-adapter-grpc - gRPC 服务端与客户端
//!
//! 传输层完全交给 tonic，这里只负责按配置构建、启动和关闭

mod client;
mod config;
mod server;

pub use client::GrpcClient;
pub use config::GrpcConfig;
pub use server::GrpcServer;

pub use tonic::service::{Routes, RoutesBuilder};
pub use tonic::transport::Channel;
