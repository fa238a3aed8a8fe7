//! Tests that need no running database

use pv_shared::config::DatabaseConfig;

use crate::database::connection::{DatabasePool, PoolStatistics};
use crate::database::schema::ACCOUNTS_TABLE_SQL;
use crate::InfrastructureError;

#[tokio::test]
async fn test_pool_requires_url() {
    let result = DatabasePool::new(DatabaseConfig::default()).await;

    assert!(matches!(result, Err(InfrastructureError::Config(_))));
}

#[tokio::test]
async fn test_pool_rejects_malformed_url() {
    let result = DatabasePool::new(DatabaseConfig::new("not a url")).await;

    assert!(matches!(result, Err(InfrastructureError::Config(_))));
}

#[test]
fn test_pool_statistics_active() {
    let stats = PoolStatistics {
        size: 5,
        idle: 3,
        max_connections: 10,
    };
    assert_eq!(stats.active(), 2);
}

#[test]
fn test_schema_declares_unique_phone() {
    assert!(ACCOUNTS_TABLE_SQL.contains("CREATE TABLE IF NOT EXISTS accounts"));
    assert!(ACCOUNTS_TABLE_SQL.contains("UNIQUE KEY uq_accounts_phone_number (phone_number)"));
}
