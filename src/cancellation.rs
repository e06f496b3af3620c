//! Cooperative cancellation for blocking clone work.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A cloneable flag shared between whoever may abort a clone (the idle
/// watchdog in the orchestrator, a Ctrl+C handler) and the libgit2 callbacks
/// that poll it.
///
/// The token also carries an activity clock. Workers call
/// [`record_activity`](Self::record_activity) whenever they make progress, and
/// the watchdog reads [`idle_time`](Self::idle_time) to spot a stalled clone.
///
/// # Examples
///
/// ```
/// use nice_clone::CancellationToken;
///
/// let token = CancellationToken::new();
/// let seen_by_worker = token.clone();
///
/// let worker = std::thread::spawn(move || {
///     while !seen_by_worker.is_cancelled() {
///         seen_by_worker.record_activity();
///         std::thread::yield_now();
///     }
/// });
///
/// token.cancel();
/// worker.join().unwrap();
/// assert!(token.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
    activity: Arc<ActivityClock>,
}

/// Milliseconds since `origin` at which the last activity was recorded.
#[derive(Debug)]
struct ActivityClock {
    origin: Instant,
    last_ms: AtomicU64,
}

impl Default for ActivityClock {
    fn default() -> Self {
        Self {
            origin: Instant::now(),
            last_ms: AtomicU64::new(0),
        }
    }
}

impl CancellationToken {
    /// Creates a token that is not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels this token and every clone of it. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Marks "now" as the latest moment the guarded work made progress.
    pub fn record_activity(&self) {
        let now = self.activity.origin.elapsed().as_millis() as u64;
        self.activity.last_ms.fetch_max(now, Ordering::SeqCst);
    }

    /// Time since the last recorded activity (or since the token was created).
    pub fn idle_time(&self) -> Duration {
        let now = self.activity.origin.elapsed().as_millis() as u64;
        let last = self.activity.last_ms.load(Ordering::SeqCst);
        Duration::from_millis(now.saturating_sub(last))
    }
}
