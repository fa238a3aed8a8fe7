//! Schema bootstrap for the credential store

use sqlx::MySqlPool;

use crate::InfrastructureError;

/// DDL for the `accounts` table
pub const ACCOUNTS_TABLE_SQL: &str = include_str!("../../migrations/001_create_accounts.sql");

/// Create the `accounts` table when it does not exist yet
pub async fn ensure_schema(pool: &MySqlPool) -> Result<(), InfrastructureError> {
    sqlx::query(ACCOUNTS_TABLE_SQL).execute(pool).await?;
    tracing::info!("Account schema is in place");
    Ok(())
}
