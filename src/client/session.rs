//! Scoped session handling.
//!
//! A client is acquired at the start of a command and released exactly once
//! when the command finishes, whether it returned normally, produced a domain
//! failure, or panicked. Release faults are logged and dropped so they never
//! replace the command's own result.

use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;

use super::{ClientError, RemoteClient};

/// Connect, run `body` with the live client, then close.
///
/// Returns `Err` only when connecting fails. The client is closed on that
/// path too. A panic inside `body` is re-raised after the close.
pub async fn run_scoped<T, F, Fut>(client: Arc<dyn RemoteClient>, body: F) -> Result<T, ClientError>
where
    F: FnOnce(Arc<dyn RemoteClient>) -> Fut,
    Fut: Future<Output = T>,
{
    let result = match client.connect().await {
        Ok(()) => {
            log::debug!("Session opened");
            Ok(AssertUnwindSafe(body(Arc::clone(&client))).catch_unwind().await)
        }
        Err(e) => {
            log::warn!("Failed to open session: {}", e);
            Err(e)
        }
    };

    close_quietly(client.as_ref()).await;

    match result {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(panic)) => std::panic::resume_unwind(panic),
        Err(e) => Err(e),
    }
}

/// Close the client, discarding any failure.
pub async fn close_quietly(client: &dyn RemoteClient) {
    match client.close().await {
        Ok(()) => log::debug!("Session closed"),
        Err(e) => log::debug!("Ignoring session close failure: {}", e),
    }
}
