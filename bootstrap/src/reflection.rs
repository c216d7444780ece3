//! gRPC 反射辅助工具

use keel_adapter_grpc::RoutesBuilder;
use keel_errors::{AppError, AppResult};
use tonic_reflection::server::Builder;
pub use tonic_reflection::server::v1::{ServerReflection, ServerReflectionServer};

/// 反射服务自身的描述符
pub const REFLECTION_DESCRIPTOR_SET: &[u8] = tonic_reflection::pb::v1::FILE_DESCRIPTOR_SET;

/// 构建一个包含指定文件描述符集的反射服务
pub fn build_reflection(
    file_descriptor_sets: Vec<&'static [u8]>,
) -> AppResult<ServerReflectionServer<impl ServerReflection>> {
    let mut builder = Builder::configure();
    for fds in file_descriptor_sets {
        builder = builder.register_encoded_file_descriptor_set(fds);
    }
    builder
        .build_v1()
        .map_err(|e| AppError::internal(format!("Failed to build reflection service: {}", e)))
}

/// 把反射服务注册到路由
pub fn register_reflection(
    routes: &mut RoutesBuilder,
    file_descriptor_sets: Vec<&'static [u8]>,
) -> AppResult<()> {
    routes.add_service(build_reflection(file_descriptor_sets)?);
    Ok(())
}
