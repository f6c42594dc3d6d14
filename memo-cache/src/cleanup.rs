//! Fire-and-forget dispatch for lazy-expiry cleanup.
//!
//! Jobs run on the blocking pool of the current Tokio runtime when there is
//! one, otherwise on a short-lived named thread. Callers never wait on them.

use tracing::warn;

/// Runs `job` off the caller's thread without waiting for it.
pub(crate) fn dispatch<F>(job: F)
where
    F: FnOnce() + Send + 'static,
{
    match tokio::runtime::Handle::try_current() {
        Ok(handle) => {
            // Detached; the JoinHandle is dropped on purpose.
            let _ = handle.spawn_blocking(job);
        }
        Err(_) => {
            if let Err(error) = std::thread::Builder::new()
                .name("memo-expiry".into())
                .spawn(job)
            {
                warn!(%error, "Failed to spawn expiry cleanup thread");
            }
        }
    }
}
