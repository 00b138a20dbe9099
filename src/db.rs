use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use tracing::debug;

use crate::error::SeedResult;

const PRAGMAS: [&str; 3] =
    ["PRAGMA journal_mode=WAL", "PRAGMA synchronous=NORMAL", "PRAGMA foreign_keys=ON"];

/// Opens the store on a single connection and brings the schema up to date.
///
/// Safe to call on every start: tables and indexes are only created when missing.
pub async fn connect_and_migrate(database_url: &str) -> SeedResult<DatabaseConnection> {
    let mut opts = ConnectOptions::new(database_url);
    opts.max_connections(1).min_connections(1).sqlx_logging(false);

    let db = Database::connect(opts).await?;

    for pragma in PRAGMAS {
        db.execute(Statement::from_string(db.get_database_backend(), pragma.to_string())).await?;
    }

    Migrator::up(&db, None).await?;
    debug!(url = %database_url, "schema ready");

    Ok(db)
}

#[cfg(test)]
pub(crate) async fn memory() -> DatabaseConnection {
    connect_and_migrate("sqlite::memory:").await.unwrap()
}
