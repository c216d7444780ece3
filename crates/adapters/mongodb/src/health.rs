//! MongoDB 健康检查

use keel_errors::{AppError, AppResult};
use mongodb::Client;
use mongodb::bson::doc;
use mongodb::options::{ReadPreference, SelectionCriteria};
use tracing::debug;

/// 向主节点发送 ping，验证连接可用
pub async fn ping(client: &Client) -> AppResult<()> {
    client
        .database("admin")
        .run_command(doc! { "ping": 1 })
        .selection_criteria(SelectionCriteria::ReadPreference(ReadPreference::Primary))
        .await
        .map_err(|e| {
            AppError::database(format!("Failed to verify connection to the database: {}", e))
        })?;

    debug!("MongoDB ping succeeded");
    Ok(())
}
