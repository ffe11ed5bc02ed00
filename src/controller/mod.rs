//! Fetch lifecycle controller.
//!
//! [`FetchController`] mediates between a renderer and a
//! [`PhotoRepository`]: it owns the current [`FetchState`] for one photo
//! list, re-fetches on demand, and guarantees the transition protocol
//! (`Loading` then `Success` or `Error`) no matter how refreshes and
//! teardown interleave.

mod scope;
mod state;

pub use scope::{LifecycleScope, ScopeHandle};
pub use state::FetchState;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::watch;

use crate::repository::PhotoRepository;

/// Owns the fetch state for one photo list.
///
/// The state is exposed read-only: [`current_state`](Self::current_state)
/// for synchronous reads and [`subscribe`](Self::subscribe) for reactive
/// renderers. Only the controller writes to it.
///
/// Transitions are linearized per instance. Every [`refresh`](Self::refresh)
/// is tagged with a monotonically increasing attempt number, and an
/// attempt's outcome is applied only while it is still the newest attempt —
/// checked atomically with the state write, so a slow superseded attempt can
/// never overwrite a later one's result.
pub struct FetchController {
    repository: Arc<dyn PhotoRepository>,
    state_tx: watch::Sender<FetchState>,
    attempt: Arc<AtomicU64>,
    scope: LifecycleScope,
}

impl FetchController {
    /// Create a controller and start the initial fetch.
    ///
    /// The first observable sequence of every instance is `Loading`
    /// followed by `Success` or `Error`. Must be called from within a Tokio
    /// runtime; the fetch attempt runs as a spawned task.
    pub fn new(repository: Arc<dyn PhotoRepository>) -> Self {
        let (state_tx, _) = watch::channel(FetchState::Loading);
        let controller = Self {
            repository,
            state_tx,
            attempt: Arc::new(AtomicU64::new(0)),
            scope: LifecycleScope::new(),
        };
        controller.refresh();
        controller
    }

    /// Latest known state. Never blocks, never suspends.
    pub fn current_state(&self) -> FetchState {
        self.state_tx.borrow().clone()
    }

    /// Subscribe to state changes.
    ///
    /// The receiver observes every applied transition; renderers typically
    /// loop on `changed()` and re-render from the borrowed value.
    pub fn subscribe(&self) -> watch::Receiver<FetchState> {
        self.state_tx.subscribe()
    }

    /// Trigger a new fetch attempt.
    ///
    /// Synchronously transitions to `Loading`, then fetches in the
    /// background. If a prior attempt is still in flight it keeps running
    /// but its result is discarded once it settles (newest caller wins).
    /// After [`close`](Self::close) this is a no-op.
    pub fn refresh(&self) {
        if self.scope.is_cancelled() {
            tracing::debug!("refresh ignored: controller closed");
            return;
        }

        let attempt = self.attempt.fetch_add(1, Ordering::SeqCst) + 1;
        self.state_tx.send_replace(FetchState::Loading);
        tracing::debug!(attempt, "fetch attempt started");

        let repository = Arc::clone(&self.repository);
        let state_tx = self.state_tx.clone();
        let newest = Arc::clone(&self.attempt);
        let scope = self.scope.handle();

        tokio::spawn(async move {
            let result = tokio::select! {
                _ = scope.cancelled() => {
                    tracing::debug!(attempt, "fetch attempt cancelled");
                    return;
                }
                result = repository.fetch_all() => result,
            };

            let mut outcome = Some(match result {
                Ok(photos) => {
                    tracing::debug!(attempt, count = photos.len(), "fetch attempt succeeded");
                    FetchState::Success(photos)
                }
                Err(err) => {
                    tracing::warn!(attempt, kind = err.kind(), error = %err, "fetch attempt failed");
                    FetchState::Error
                }
            });

            // The supersede check and the state write happen inside one
            // send_if_modified call, under the channel's lock. A newer
            // refresh bumps the counter before it sends Loading, so either
            // this closure sees the bump and aborts, or its write lands
            // before the newer Loading and is overwritten by it.
            let applied = state_tx.send_if_modified(|state| {
                if scope.is_cancelled() || newest.load(Ordering::SeqCst) != attempt {
                    return false;
                }
                match outcome.take() {
                    Some(next) => {
                        *state = next;
                        true
                    }
                    None => false,
                }
            });

            if !applied {
                tracing::debug!(attempt, "fetch attempt superseded, result discarded");
            }
        });
    }

    /// Tear down the controller.
    ///
    /// Cancels any in-flight attempt; no state transition is applied
    /// afterward. Idempotent. Also invoked on drop.
    pub fn close(&self) {
        self.scope.cancel();
    }

    /// Whether [`close`](Self::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.scope.is_cancelled()
    }

    /// Wait until the current attempt has settled and return that state.
    ///
    /// Returns immediately if the state is already `Success` or `Error`.
    /// If the controller is closed while still `Loading`, this future never
    /// resolves; callers that race teardown should wrap it in a timeout.
    pub async fn settled(&self) -> FetchState {
        let mut rx = self.state_tx.subscribe();
        let state = rx
            .wait_for(FetchState::is_settled)
            .await
            .expect("state channel closed while controller alive");
        state.clone()
    }
}

impl Drop for FetchController {
    fn drop(&mut self) {
        self.scope.cancel();
    }
}
