use std::str::FromStr;
use std::time::Duration;

use migration::{migrate, MigrationCommand};
use sea_orm::{DatabaseConnection, SqlxPostgresConnector, SqlxSqliteConnector};
use sqlx::postgres::PgPoolOptions;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{info, trace};

use crate::config::db::{db_url, DbKind};
use crate::error::AppError;

const SQLITE_BUSY_TIMEOUT_MS: u64 = 5_000;
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);

/// Pool sizing per backend.
///
/// An in-memory SQLite database lives only as long as its connection, so
/// that pool is pinned to exactly one connection that never idles out.
fn pool_bounds(kind: DbKind) -> (u32, u32) {
    match kind {
        DbKind::SqliteMemory => (1, 1),
        DbKind::SqliteFile => (1, 4),
        DbKind::Postgres => (2, 16),
    }
}

async fn apply_sqlite_pragmas(conn: &mut sqlx::SqliteConnection) -> Result<(), sqlx::Error> {
    for stmt in [
        "PRAGMA foreign_keys = ON;".to_string(),
        format!("PRAGMA busy_timeout = {SQLITE_BUSY_TIMEOUT_MS};"),
    ] {
        sqlx::query(&stmt).execute(&mut *conn).await?;
    }
    Ok(())
}

/// Open a pool for `kind` without touching the schema.
pub async fn connect_db(kind: DbKind) -> Result<DatabaseConnection, AppError> {
    let url = db_url(kind)?;
    let (min, max) = pool_bounds(kind);

    match kind {
        DbKind::SqliteFile | DbKind::SqliteMemory => {
            let connect_opts = SqliteConnectOptions::from_str(&url)
                .map_err(|e| AppError::config(format!("invalid SQLite connection options: {e}")))?
                .create_if_missing(true);

            let mut pool_opts = SqlitePoolOptions::new()
                .min_connections(min)
                .max_connections(max)
                .acquire_timeout(ACQUIRE_TIMEOUT);
            if kind == DbKind::SqliteMemory {
                pool_opts = pool_opts.idle_timeout(None).max_lifetime(None);
            }

            let pool: SqlitePool = pool_opts
                .after_connect(|conn, _meta| {
                    Box::pin(async move {
                        apply_sqlite_pragmas(conn).await?;
                        trace!("db=sqlite hook=after_connect ok");
                        Ok::<_, sqlx::Error>(())
                    })
                })
                .connect_with(connect_opts)
                .await
                .map_err(|e| AppError::config(format!("failed to create SQLite pool: {e}")))?;

            info!(engine = "sqlite", kind = ?kind, min, max, "pool created");
            Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
        }
        DbKind::Postgres => {
            let pool = PgPoolOptions::new()
                .min_connections(min)
                .max_connections(max)
                .acquire_timeout(ACQUIRE_TIMEOUT)
                .idle_timeout(Duration::from_secs(30))
                .after_connect(|conn, _meta| {
                    Box::pin(async move {
                        sqlx::query("SET timezone = 'UTC';")
                            .execute(&mut *conn)
                            .await?;
                        Ok::<_, sqlx::Error>(())
                    })
                })
                .connect(&url)
                .await
                .map_err(|e| AppError::config(format!("failed to connect to Postgres: {e}")))?;

            info!(engine = "postgresql", min, max, "pool created");
            Ok(SqlxPostgresConnector::from_sqlx_postgres_pool(pool))
        }
    }
}

/// Connect and bring the schema up to date.
pub async fn bootstrap_db(kind: DbKind) -> Result<DatabaseConnection, AppError> {
    let db = connect_db(kind).await?;
    migrate(&db, MigrationCommand::Up)
        .await
        .map_err(|e| AppError::config(format!("migration failed: {e}")))?;

    let latest = migration::get_latest_migration_version(&db)
        .await
        .map_err(|e| AppError::config(format!("migration status unavailable: {e}")))?;
    info!(kind = ?kind, latest_migration = ?latest, "database ready");
    Ok(db)
}

/// Run an arbitrary migration command; used by the migration CLI.
pub async fn run_migration(kind: DbKind, command: MigrationCommand) -> Result<(), AppError> {
    let db = connect_db(kind).await?;
    migrate(&db, command)
        .await
        .map_err(|e| AppError::config(format!("migration {command:?} failed: {e}")))
}
