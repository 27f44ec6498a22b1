//! Fetch orchestration: debouncing and stale-response discard.
//!
//! List pages re-fetch on every search keystroke and filter change. Two
//! hazards follow: hammering the backend while someone types, and slow
//! responses landing after a newer request already answered. Both are
//! handled here rather than per page.
//!
//! ```text
//!   keystroke "t"  ──► ticket #1 ── sleep ──X         (superseded, no fetch)
//!   keystroke "ti" ──► ticket #2 ── sleep ──X         (superseded, no fetch)
//!   keystroke "tif"──► ticket #3 ── sleep ──► fetch ──► still current? apply
//! ```
//!
//! A [`Ticket`] stays valid until the next `begin()` on the same sequence.
//! The page checks it twice: after the debounce sleep (skip the fetch
//! entirely) and again when the response arrives (discard a stale body).

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::trace;

// =============================================================================
// Fetch Sequence
// =============================================================================

/// Monotonic request sequence for one list view.
///
/// Clones share the counter, so a ticket taken from any clone invalidates
/// tickets from every other clone.
#[derive(Debug, Clone, Default)]
pub struct FetchSequence {
    counter: Arc<AtomicU64>,
}

/// One fetch attempt's claim to be the latest.
#[derive(Debug, Clone)]
pub struct Ticket {
    seq: u64,
    counter: Arc<AtomicU64>,
}

impl FetchSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new fetch attempt, invalidating all earlier tickets.
    pub fn begin(&self) -> Ticket {
        let seq = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        trace!(seq, "Fetch ticket issued");
        Ticket {
            seq,
            counter: self.counter.clone(),
        }
    }
}

impl Ticket {
    /// True while no newer ticket has been issued.
    pub fn is_current(&self) -> bool {
        self.counter.load(Ordering::SeqCst) == self.seq
    }
}

// =============================================================================
// Debouncer
// =============================================================================

/// Keystroke debouncer built on the fetch sequence.
///
/// Every input change calls [`Debouncer::settle`]; only the latest call
/// gets a ticket back, the rest resolve to `None` and fetch nothing.
#[derive(Debug, Clone)]
pub struct Debouncer {
    sequence: FetchSequence,
    delay: Duration,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Debouncer {
            sequence: FetchSequence::new(),
            delay,
        }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    /// Waits out the quiet period. Returns a ticket if this call is still
    /// the latest, `None` if another change superseded it meanwhile.
    pub async fn settle(&self) -> Option<Ticket> {
        let ticket = self.sequence.begin();
        tokio::time::sleep(self.delay).await;
        if ticket.is_current() {
            Some(ticket)
        } else {
            trace!("Debounced input superseded");
            None
        }
    }

    /// An immediate ticket, bypassing the quiet period. Used for explicit
    /// refreshes (after a mutation) where no more keystrokes are coming.
    pub fn immediate(&self) -> Ticket {
        self.sequence.begin()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newer_ticket_invalidates_older() {
        let sequence = FetchSequence::new();
        let first = sequence.begin();
        assert!(first.is_current());

        let second = sequence.begin();
        assert!(!first.is_current());
        assert!(second.is_current());
    }

    #[test]
    fn test_clones_share_the_sequence() {
        let sequence = FetchSequence::new();
        let clone = sequence.clone();

        let ticket = sequence.begin();
        clone.begin();
        assert!(!ticket.is_current());
    }

    #[tokio::test(start_paused = true)]
    async fn test_only_last_keystroke_settles() {
        let debouncer = Debouncer::from_millis(400);

        let early = debouncer.clone();
        let first = tokio::spawn(async move { early.settle().await });
        // Let the first call take its ticket before the second fires
        tokio::task::yield_now().await;

        let second = debouncer.settle().await;
        assert!(second.is_some());
        assert!(first.await.unwrap().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_immediate_refresh_stales_inflight_fetch() {
        let debouncer = Debouncer::from_millis(400);
        let ticket = debouncer.settle().await.unwrap();

        // A mutation triggers an immediate re-fetch while the old response
        // is still in flight; the old ticket must no longer apply.
        let refresh = debouncer.immediate();
        assert!(!ticket.is_current());
        assert!(refresh.is_current());
    }
}
