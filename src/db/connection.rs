//! Connection pool and startup checks.

use std::time::Duration;

use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, Statement,
};
use tracing::log::LevelFilter;

use crate::config::DatabaseConfig;
use crate::entities::prelude::*;

/// Open the pool described by the `[database]` section.
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(config.connection_string());
    opt.max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .sqlx_logging(config.log_queries)
        .sqlx_logging_level(LevelFilter::Debug);

    tracing::info!(
        host = %config.host,
        database = %config.name,
        max_connections = config.max_connections,
        "Connecting to PostgreSQL"
    );
    Database::connect(opt).await
}

/// Run `SELECT 1`.
pub async fn ping<C: ConnectionTrait>(db: &C) -> Result<(), DbErr> {
    db.execute_unprepared("SELECT 1").await?;
    Ok(())
}

/// Server version string, or "Unknown" when the query returns no row.
pub async fn server_version<C: ConnectionTrait>(db: &C) -> Result<String, DbErr> {
    let row = db
        .query_one(Statement::from_string(
            db.get_database_backend(),
            "SELECT version() AS version",
        ))
        .await?;

    match row {
        Some(row) => row.try_get("", "version"),
        None => Ok("Unknown".to_owned()),
    }
}

/// Row counts logged at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableCounts {
    pub departments: u64,
    pub employees: u64,
    pub customers: u64,
}

pub async fn table_counts<C: ConnectionTrait>(db: &C) -> Result<TableCounts, DbErr> {
    Ok(TableCounts {
        departments: Departments::find().count(db).await?,
        employees: Employees::find().count(db).await?,
        customers: Customers::find().count(db).await?,
    })
}
