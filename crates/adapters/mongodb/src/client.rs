//! MongoDB 连接管理

use std::str::FromStr;
use std::time::Duration;

use keel_errors::{AppError, AppResult};
use mongodb::options::{AuthMechanism, ClientOptions, Credential};
use mongodb::{Client, Database};
use secrecy::ExposeSecret;
use tracing::info;

use crate::config::DbConfig;

/// 连接与选主超时
pub const CONNECTION_TIMEOUT: Duration = Duration::from_secs(10);

/// 构建驱动的客户端选项
///
/// 认证源使用数据库名；`DB_MECH` 为空时由驱动协商认证机制
pub async fn client_options(config: &DbConfig) -> AppResult<ClientOptions> {
    let mut options = ClientOptions::parse(config.uri())
        .await
        .map_err(|e| AppError::database(format!("Invalid database uri: {}", e)))?;

    let mechanism = config
        .mechanism()
        .map(|mech| {
            AuthMechanism::from_str(mech).map_err(|e| {
                AppError::database(format!("Unsupported authentication mechanism {}: {}", mech, e))
            })
        })
        .transpose()?;

    let mut credential = Credential::default();
    credential.username = Some(config.user.clone());
    credential.password = Some(config.password.expose_secret().clone());
    credential.source = Some(config.name.clone());
    credential.mechanism = mechanism;

    options.credential = Some(credential);
    options.connect_timeout = Some(CONNECTION_TIMEOUT);
    options.server_selection_timeout = Some(CONNECTION_TIMEOUT);

    Ok(options)
}

/// 创建 MongoDB 客户端
///
/// 驱动在后台建立连接，这里不等待；连通性由 `ping` 验证
pub async fn create_client(config: &DbConfig) -> AppResult<Client> {
    let options = client_options(config).await?;

    let client = Client::with_options(options)
        .map_err(|e| AppError::database(format!("Failed to connect to the database: {}", e)))?;

    info!(host = %config.host, port = config.port, database = %config.name, "MongoDB client created");
    Ok(client)
}

/// 获取数据库句柄
pub fn database(client: &Client, config: &DbConfig) -> Database {
    client.database(&config.name)
}

/// 断开连接，等待驱动释放所有资源
pub async fn disconnect(client: Client) {
    client.shutdown().await;
    info!("MongoDB client disconnected");
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::Secret;

    fn config(mech: &str) -> DbConfig {
        DbConfig {
            host: "db.local".to_string(),
            port: 27017,
            user: "svc".to_string(),
            password: Secret::new("secret".to_string()),
            name: "app".to_string(),
            mech: mech.to_string(),
        }
    }

    #[tokio::test]
    async fn test_credential_uses_database_as_source() {
        let options = client_options(&config("")).await.unwrap();
        let credential = options.credential.unwrap();

        assert_eq!(credential.username.as_deref(), Some("svc"));
        assert_eq!(credential.password.as_deref(), Some("secret"));
        assert_eq!(credential.source.as_deref(), Some("app"));
        assert!(credential.mechanism.is_none());
        assert_eq!(options.connect_timeout, Some(CONNECTION_TIMEOUT));
    }

    #[tokio::test]
    async fn test_explicit_mechanism() {
        let options = client_options(&config("SCRAM-SHA-256")).await.unwrap();
        let credential = options.credential.unwrap();

        assert_eq!(credential.mechanism, Some(AuthMechanism::ScramSha256));
    }

    #[tokio::test]
    async fn test_unknown_mechanism_rejected() {
        let err = client_options(&config("MAGIC")).await.unwrap_err();
        assert!(matches!(err, AppError::Database(_)));
    }

    #[tokio::test]
    async fn test_create_client_does_not_block_on_server() {
        let client = create_client(&config("")).await.unwrap();
        assert_eq!(database(&client, &config("")).name(), "app");
        disconnect(client).await;
    }
}
