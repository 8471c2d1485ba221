//! Offloading of client calls onto their own tasks

use std::future::Future;

use crate::error::ApplicationError;

/// Run a client call on a separate tokio task and await its result
///
/// If the caller is dropped while waiting, the task keeps running to
/// completion and its result is discarded. A panicking or cancelled task is
/// reported as [`ApplicationError::Internal`].
pub async fn offload<F, T>(call: F) -> Result<T, ApplicationError>
where
    F: Future<Output = Result<T, ApplicationError>> + Send + 'static,
    T: Send + 'static,
{
    tokio::spawn(call)
        .await
        .map_err(|e| ApplicationError::Internal(format!("worker task failed: {e}")))?
}
