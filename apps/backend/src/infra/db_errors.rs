//! SeaORM -> DomainError translation helpers.
//!
//! Adapters return `sea_orm::DbErr`; repos convert it here (via the
//! `From<DbErr> for DomainError` impl below) and services lift the
//! result into `AppError`.

use tracing::{error, warn};

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

/// Columns named by SQLite's "UNIQUE constraint failed: t.a, t.b" message,
/// paired with the Postgres index name covering the same columns.
const UNIQUE_CLAIMS: &[(&str, &str, ClaimKind)] = &[
    (
        "turns.match_id, turns.seq",
        "ux_turns_match_seq",
        ClaimKind::TurnSeq,
    ),
    (
        "turn_definition_fillers.turn_id, turn_definition_fillers.supplier_id",
        "ux_turn_definition_fillers_turn_supplier",
        ClaimKind::Supply,
    ),
    (
        "match_players.match_id, match_players.player_id",
        "ux_match_players_match_player",
        ClaimKind::Membership,
    ),
    (
        "match_players.match_id, match_players.join_seq",
        "ux_match_players_match_join_seq",
        ClaimKind::JoinSeq,
    ),
];

#[derive(Debug, Clone, Copy)]
enum ClaimKind {
    TurnSeq,
    Supply,
    Membership,
    JoinSeq,
}

/// Unique violations on these indexes mean a concurrent request won the
/// same claim; re-running the operation observes the winner's row.
fn map_unique_claim(error_msg: &str) -> Option<DomainError> {
    let (_, _, kind) = UNIQUE_CLAIMS
        .iter()
        .find(|(sqlite_cols, pg_index, _)| {
            error_msg.contains(sqlite_cols) || error_msg.contains(pg_index)
        })?;

    let err = match kind {
        ClaimKind::TurnSeq => DomainError::conflict(
            ConflictKind::TurnAlreadyCreated,
            "Turn was created by a concurrent request",
        ),
        ClaimKind::Supply => DomainError::conflict(
            ConflictKind::Other("DuplicateSupply".into()),
            "Filler was submitted by a concurrent request",
        ),
        ClaimKind::Membership => DomainError::conflict(
            ConflictKind::Other("DuplicateMembership".into()),
            "Player was added to the match by a concurrent request",
        ),
        ClaimKind::JoinSeq => DomainError::conflict(
            ConflictKind::Other("JoinSeqTaken".into()),
            "Join sequence was claimed by a concurrent request",
        ),
    };
    Some(err)
}

/// Translate a `DbErr` into a `DomainError` with sanitized detail.
pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    let error_msg = e.to_string();

    match &e {
        sea_orm::DbErr::RecordNotFound(_) => {
            return DomainError::not_found(
                NotFoundKind::Other("Record".into()),
                "Record not found",
            );
        }
        sea_orm::DbErr::Custom(msg) if msg.starts_with("OPTIMISTIC_LOCK:") => {
            if let Some(json_str) = msg.strip_prefix("OPTIMISTIC_LOCK:") {
                #[derive(serde::Deserialize)]
                struct LockInfo {
                    entity: String,
                    id: i64,
                    expected: i32,
                    actual: i32,
                }

                if let Ok(info) = serde_json::from_str::<LockInfo>(json_str) {
                    warn!(
                        entity = %info.entity,
                        id = info.id,
                        expected = info.expected,
                        actual = info.actual,
                        "Optimistic lock conflict detected"
                    );

                    return DomainError::conflict(
                        ConflictKind::OptimisticLock,
                        format!(
                            "{} {} was modified concurrently (expected version {}, actual version {})",
                            info.entity, info.id, info.expected, info.actual
                        ),
                    );
                }
            }

            warn!("Optimistic lock conflict detected (version info unavailable)");
            return DomainError::conflict(
                ConflictKind::OptimisticLock,
                "Resource was modified by another transaction; please retry",
            );
        }
        sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) => {
            warn!(raw_error = %error_msg, "Database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
        }
        _ => {}
    }

    if mentions_sqlstate(&error_msg, "23505")
        || error_msg.contains("duplicate key value violates unique constraint")
        || error_msg.contains("UNIQUE constraint failed")
    {
        if let Some(err) = map_unique_claim(&error_msg) {
            warn!(raw_error = %error_msg, "Concurrent claim lost on unique index");
            return err;
        }

        warn!(raw_error = %error_msg, "Unique constraint violation");
        return DomainError::integrity("Unique constraint violation");
    }

    if mentions_sqlstate(&error_msg, "23503") || error_msg.contains("FOREIGN KEY constraint failed")
    {
        warn!(raw_error = %error_msg, "Foreign key constraint violation");
        return DomainError::validation(
            crate::errors::domain::ValidationKind::Other("ForeignKey".into()),
            "Foreign key constraint violation",
        );
    }

    if mentions_sqlstate(&error_msg, "23514") || error_msg.contains("CHECK constraint failed") {
        warn!(raw_error = %error_msg, "Check constraint violation");
        return DomainError::validation(
            crate::errors::domain::ValidationKind::Other("Check".into()),
            "Check constraint violation",
        );
    }

    if error_msg.contains("database is locked") || error_msg.contains("timeout") {
        warn!(raw_error = %error_msg, "Database timeout or lock contention");
        return DomainError::infra(InfraErrorKind::Timeout, "Database timeout");
    }

    error!(raw_error = %error_msg, "Unhandled database error");
    DomainError::infra(
        InfraErrorKind::Other("DbErr".into()),
        "Database operation failed",
    )
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        map_db_err(e)
    }
}

/// Build the structured payload adapters attach to a lost version check.
pub(crate) fn optimistic_lock_err(
    entity: &str,
    id: i64,
    expected: i32,
    actual: i32,
) -> sea_orm::DbErr {
    sea_orm::DbErr::Custom(format!(
        "OPTIMISTIC_LOCK:{{\"entity\":\"{entity}\",\"id\":{id},\"expected\":{expected},\"actual\":{actual}}}"
    ))
}
