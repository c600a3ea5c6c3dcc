//! Nonce generation for private requests
//!
//! Bittrex rejects a private request whose nonce is not strictly greater
//! than the last one it saw for the same API key. Nonces are epoch seconds,
//! so two calls within the same second need a local counter to stay unique.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::trace;

/// Source of fresh nonces for signed requests
///
/// Every call must return a value strictly greater than any value it
/// returned before.
pub trait NonceSource: Send + Sync {
    /// Issue the next nonce
    fn next_nonce(&self) -> u64;
}

impl<T: NonceSource + ?Sized> NonceSource for Arc<T> {
    fn next_nonce(&self) -> u64 {
        (**self).next_nonce()
    }
}

type Clock = Box<dyn Fn() -> u64 + Send + Sync>;

/// Clock-seeded nonce counter
///
/// Returns the current epoch second, or `last + 1` when the clock has not
/// advanced past the previously issued value. The last issued value is held
/// in an atomic so concurrent callers sharing one instance never collide.
pub struct MonotonicNonce {
    last: AtomicU64,
    clock: Clock,
}

impl MonotonicNonce {
    /// Create a counter driven by the system clock
    pub fn new() -> Self {
        Self::with_clock(unix_seconds)
    }

    /// Create a counter driven by a custom clock returning epoch seconds
    pub fn with_clock(clock: impl Fn() -> u64 + Send + Sync + 'static) -> Self {
        Self {
            last: AtomicU64::new(0),
            clock: Box::new(clock),
        }
    }

    /// The most recently issued nonce, if any
    pub fn last_issued(&self) -> Option<u64> {
        match self.last.load(Ordering::SeqCst) {
            0 => None,
            n => Some(n),
        }
    }
}

impl Default for MonotonicNonce {
    fn default() -> Self {
        Self::new()
    }
}

impl NonceSource for MonotonicNonce {
    fn next_nonce(&self) -> u64 {
        let now = (self.clock)();
        let bump = |last: u64| now.max(last.saturating_add(1));

        let previous = match self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| Some(bump(last)))
        {
            Ok(prev) | Err(prev) => prev,
        };
        let nonce = bump(previous);

        if nonce != now {
            trace!(clock = now, nonce, "Clock has not advanced, bumped nonce");
        }
        nonce
    }
}

impl std::fmt::Debug for MonotonicNonce {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MonotonicNonce")
            .field("last", &self.last_issued())
            .finish()
    }
}

fn unix_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
