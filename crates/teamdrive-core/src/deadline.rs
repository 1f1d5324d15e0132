//! Per-call deadlines for collaborator calls.
//!
//! Every call into the storage gateway or the metadata store is bounded
//! by its own fixed deadline. Exceeding it surfaces as
//! [`ErrorKind::Timeout`](crate::error::ErrorKind::Timeout); nothing is
//! retried.

use std::future::Future;
use std::time::Duration;

use crate::error::AppError;
use crate::result::AppResult;

/// Run `fut` with a deadline of `limit`.
///
/// `operation` names the call in the timeout message.
pub async fn with_deadline<T, F>(limit: Duration, operation: &str, fut: F) -> AppResult<T>
where
    F: Future<Output = AppResult<T>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => Err(AppError::timeout(format!(
            "{operation} exceeded its deadline of {}ms",
            limit.as_millis()
        ))),
    }
}
