//! Busy tracking and outcome handling shared by every mutation.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::cache::QueryKey;
use crate::error::ClientResult;
use crate::notify::Notice;
use crate::ClientContext;

/// Counts in-flight mutations so a front end can mark its controls busy.
#[derive(Debug, Clone, Default)]
pub struct MutationState {
    in_flight: Arc<AtomicUsize>,
}

impl MutationState {
    pub fn is_pending(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    fn begin(&self) -> PendingGuard {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        PendingGuard {
            in_flight: self.in_flight.clone(),
        }
    }
}

struct PendingGuard {
    in_flight: Arc<AtomicUsize>,
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Run one mutation to completion.
///
/// On success the `stale` keys are invalidated and `success` is announced; on
/// failure the error's user message is announced. The error is returned
/// either way.
pub(crate) async fn run<T, F>(
    ctx: &ClientContext,
    state: &MutationState,
    stale: &[QueryKey],
    success: &str,
    op: F,
) -> ClientResult<T>
where
    F: Future<Output = ClientResult<T>>,
{
    let _pending = state.begin();

    match op.await {
        Ok(value) => {
            for key in stale {
                ctx.cache.invalidate(*key);
            }
            tracing::info!("{success}");
            ctx.notifier.notify(Notice::success(success));
            Ok(value)
        }
        Err(err) => {
            tracing::warn!("mutation failed: {err}");
            ctx.notifier.notify(Notice::error(err.user_message()));
            Err(err)
        }
    }
}
