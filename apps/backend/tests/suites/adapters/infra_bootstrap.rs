//! Database bootstrap and schema migrations.

use lexibluff::config::db::DbKind;
use lexibluff::infra::db::{bootstrap_db, connect_db};
use lexibluff::AppError;
use migration::{count_applied_migrations, get_latest_migration_version, migrate, MigrationCommand};

#[tokio::test]
async fn bootstrap_applies_all_migrations() -> Result<(), AppError> {
    let db = bootstrap_db(DbKind::SqliteMemory).await?;

    let applied = count_applied_migrations(&db).await?;
    assert!(applied >= 1);
    let latest = get_latest_migration_version(&db).await?;
    assert!(latest.is_some_and(|name| name.contains("init")));
    Ok(())
}

#[tokio::test]
async fn fresh_connection_has_no_schema_until_migrated() -> Result<(), AppError> {
    let db = connect_db(DbKind::SqliteMemory).await?;
    assert_eq!(count_applied_migrations(&db).await?, 0);

    migrate(&db, MigrationCommand::Up).await?;
    assert!(count_applied_migrations(&db).await? >= 1);

    migrate(&db, MigrationCommand::Down).await?;
    assert_eq!(count_applied_migrations(&db).await?, 0);
    Ok(())
}
