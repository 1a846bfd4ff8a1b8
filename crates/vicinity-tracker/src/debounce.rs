//! Keystroke debouncing for the search query.
//!
//! Every edit claims a monotonically increasing sequence number; the timer
//! task re-checks that number when it fires, so an edit superseded during
//! the quiet period is a no-op even if its timer is already executing.
//! Cancellation never relies on aborting the timer task itself.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// Coalesces rapid text edits into a single committed query.
///
/// After [`QueryDebouncer::on_text_changed`] goes quiet for the configured
/// period, the latest trimmed text — if it differs from the last committed
/// query — is committed exactly once via the commit callback.
///
/// Callable from any thread; timers run on the ambient tokio runtime, so the
/// debouncer must be used from within one.
pub struct QueryDebouncer {
    inner: Arc<Inner>,
}

struct Inner {
    quiet_period: Duration,
    seq: AtomicU64,
    committed: Mutex<String>,
    on_commit: Box<dyn Fn(String) + Send + Sync>,
}

impl Inner {
    fn committed_lock(&self) -> std::sync::MutexGuard<'_, String> {
        self.committed.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl QueryDebouncer {
    pub fn new(quiet_period: Duration, on_commit: impl Fn(String) + Send + Sync + 'static) -> Self {
        Self {
            inner: Arc::new(Inner {
                quiet_period,
                seq: AtomicU64::new(0),
                committed: Mutex::new(String::new()),
                on_commit: Box::new(on_commit),
            }),
        }
    }

    /// Records a new candidate query and restarts the quiet-period timer.
    ///
    /// The sequence number is advanced before the equality check, so an edit
    /// that matches the committed query still supersedes earlier pending
    /// timers without scheduling one of its own.
    pub fn on_text_changed(&self, text: &str) {
        let seq = self.inner.seq.fetch_add(1, Ordering::SeqCst) + 1;
        let candidate = text.trim().to_owned();

        if *self.inner.committed_lock() == candidate {
            return;
        }
        tracing::debug!(query = %candidate, "new candidate query");

        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            tokio::time::sleep(inner.quiet_period).await;

            // A newer edit claimed the sequence while we slept.
            if inner.seq.load(Ordering::SeqCst) != seq {
                return;
            }

            {
                let mut committed = inner.committed_lock();
                if *committed == candidate {
                    return;
                }
                committed.clone_from(&candidate);
            }
            tracing::debug!(query = %candidate, "committing query");
            (inner.on_commit)(candidate);
        });
    }

    /// The last committed query (initially empty).
    #[must_use]
    pub fn committed(&self) -> String {
        self.inner.committed_lock().clone()
    }
}
