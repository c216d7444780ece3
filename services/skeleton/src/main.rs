//! Skeleton Service
//!
//! 最小可运行的服务：加载配置、连接 MongoDB、提供 gRPC 反射服务

use std::process::ExitCode;

use keel_adapter_grpc::GrpcConfig;
use keel_adapter_mongodb::DbConfig;
use keel_bootstrap::{ServiceConfig, reflection, run};
use keel_config::usage;
use keel_errors::AppError;
use keel_telemetry::LoggerConfig;
use tracing::info;

#[tokio::main]
async fn main() -> ExitCode {
    // 本地开发时从 .env 加载环境变量
    dotenvy::dotenv().ok();

    let result = run(ServiceConfig::default(), |infra, routes| {
        reflection::register_reflection(routes, vec![reflection::REFLECTION_DESCRIPTOR_SET])?;
        info!(database = %infra.database().name(), "Services registered");
        Ok(())
    })
    .await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report(&e);
            ExitCode::from(e.exit_code())
        }
    }
}

/// 日志可能尚未初始化，直接写 stderr
fn report(err: &AppError) {
    eprintln!("{}", err);

    if err.is_config() {
        eprintln!();
        eprintln!("Logging:");
        eprint!("{}", usage::<LoggerConfig>(None));
        eprintln!();
        eprintln!("gRPC:");
        eprint!("{}", usage::<GrpcConfig>(None));
        eprintln!();
        eprintln!("Database:");
        eprint!("{}", usage::<DbConfig>(None));
    }
}
