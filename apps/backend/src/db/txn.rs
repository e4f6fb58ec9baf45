use std::future::Future;
use std::pin::Pin;

use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};
use tracing::{debug, warn};

use crate::error::AppError;

/// Boxed future returned by transaction bodies; borrows the transaction.
pub type TxnFuture<'a, R> = Pin<Box<dyn Future<Output = Result<R, AppError>> + Send + 'a>>;

/// Run `f` inside one transaction: commit on Ok, rollback on Err.
pub async fn with_txn<S, R, F>(db: &DatabaseConnection, svc: &S, f: F) -> Result<R, AppError>
where
    S: Sync,
    F: for<'a> Fn(&'a S, &'a DatabaseTransaction) -> TxnFuture<'a, R>,
{
    let txn = db.begin().await?;
    match f(svc, &txn).await {
        Ok(val) => {
            txn.commit().await?;
            Ok(val)
        }
        Err(err) => {
            // Best-effort rollback; preserve original error
            let _ = txn.rollback().await;
            Err(err)
        }
    }
}

/// Like [`with_txn`], but re-runs the whole body in a fresh transaction when
/// it fails with a retryable conflict, at most `retries` extra times.
pub async fn with_txn_retry<S, R, F>(
    db: &DatabaseConnection,
    svc: &S,
    retries: u32,
    op_name: &'static str,
    f: F,
) -> Result<R, AppError>
where
    S: Sync,
    F: for<'a> Fn(&'a S, &'a DatabaseTransaction) -> TxnFuture<'a, R>,
{
    let mut attempt: u32 = 0;
    loop {
        match with_txn(db, svc, &f).await {
            Err(err) if err.is_retryable_conflict() && attempt < retries => {
                attempt += 1;
                warn!(
                    op = op_name,
                    attempt,
                    code = %err.code(),
                    detail = err.detail(),
                    "conflict detected; retrying operation"
                );
            }
            Err(err) => {
                debug!(op = op_name, attempt, code = %err.code(), "operation failed");
                return Err(err);
            }
            Ok(val) => return Ok(val),
        }
    }
}
