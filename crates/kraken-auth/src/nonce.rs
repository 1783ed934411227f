//! Nonce generation for private requests

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Process-wide source shared by every [`crate::RequestSigner`]
static GLOBAL: NonceSource = NonceSource::new();

/// Strictly increasing nonce generator
///
/// Values are the Unix time in nanoseconds. When the clock has not advanced
/// since the previous call (coarse clocks, rapid successive requests), the
/// previous value plus one is returned instead, so two calls on the same source
/// never produce the same nonce.
#[derive(Debug, Default)]
pub struct NonceSource {
    last: AtomicU64,
}

impl NonceSource {
    /// Create an independent source
    pub const fn new() -> Self {
        Self {
            last: AtomicU64::new(0),
        }
    }

    /// The source used for requests signed through [`crate::Credentials`]
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    /// Next nonce, greater than any value this source returned before
    pub fn next(&self) -> u64 {
        let now = unix_nanos();
        let previous = self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last.saturating_add(1)))
            })
            .unwrap_or_else(|last| last);

        now.max(previous.saturating_add(1))
    }

    /// Next nonce rendered as the decimal string sent on the wire
    pub fn next_string(&self) -> String {
        self.next().to_string()
    }
}

fn unix_nanos() -> u64 {
    // A clock before the epoch still yields increasing values via the counter
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_nanos()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn test_nonce_strictly_increasing() {
        let source = NonceSource::new();
        let mut previous = source.next();
        for _ in 0..10_000 {
            let next = source.next();
            assert!(next > previous);
            previous = next;
        }
    }

    #[test]
    fn test_nonce_is_numeric() {
        let nonce = NonceSource::global().next_string();
        assert!(!nonce.is_empty());
        assert!(nonce.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_nonce_tracks_wall_clock() {
        let nonce = NonceSource::new().next();
        // Later than 2020-09-13 in nanoseconds
        assert!(nonce > 1_600_000_000_000_000_000);
    }

    #[test]
    fn test_nonce_unique_across_threads() {
        let source = Arc::new(NonceSource::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let source = Arc::clone(&source);
                std::thread::spawn(move || (0..1000).map(|_| source.next()).collect::<Vec<_>>())
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for nonce in handle.join().unwrap() {
                assert!(seen.insert(nonce), "duplicate nonce {}", nonce);
            }
        }
        assert_eq!(seen.len(), 4000);
    }
}
