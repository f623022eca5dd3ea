//! De-duplication ledger for status reactions.
//!
//! A status update can reach the bot several times. The ledger remembers
//! which (author, status) pairs already have a reaction scheduled.

use std::collections::HashSet;
use std::sync::Mutex;
use std::time::Duration;
use tracing::info;

/// Ledger key: who posted it and which event it was.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupKey {
    pub author: String,
    pub event_id: String,
}

impl DedupKey {
    pub fn new(author: impl Into<String>, event_id: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            event_id: event_id.into(),
        }
    }
}

/// In-memory set of keys that already have a reaction scheduled.
#[derive(Debug, Default)]
pub struct DeliveryLedger {
    keys: Mutex<HashSet<DedupKey>>,
}

impl DeliveryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically check and insert. Returns `false` if the key was already present.
    pub fn claim(&self, key: DedupKey) -> bool {
        self.lock().insert(key)
    }

    /// Forget a key so a later duplicate of the same event may react again.
    pub fn release(&self, key: &DedupKey) -> bool {
        self.lock().remove(key)
    }

    pub fn contains(&self, key: &DedupKey) -> bool {
        self.lock().contains(key)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drop every key. Returns how many were purged.
    pub fn sweep(&self) -> usize {
        let mut keys = self.lock();
        let purged = keys.len();
        keys.clear();
        purged
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashSet<DedupKey>> {
        // Each critical section is one set operation; a poisoned set is still consistent.
        self.keys.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Background task: purge the ledger every `interval`.
pub async fn sweep_loop(ledger: std::sync::Arc<DeliveryLedger>, interval: Duration) {
    let mut ticker = tokio::time::interval(interval);
    // The first tick fires immediately; skip it.
    ticker.tick().await;
    loop {
        ticker.tick().await;
        let purged = ledger.sweep();
        info!("autoreact: swept {purged} status de-dup entries");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_once() {
        let ledger = DeliveryLedger::new();
        let key = DedupKey::new("alice", "3EB0A");
        assert!(ledger.claim(key.clone()));
        assert!(!ledger.claim(key.clone()));
        assert!(ledger.contains(&key));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_same_event_id_different_author_is_distinct() {
        let ledger = DeliveryLedger::new();
        assert!(ledger.claim(DedupKey::new("alice", "X")));
        assert!(ledger.claim(DedupKey::new("bob", "X")));
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn test_release_allows_reclaim() {
        let ledger = DeliveryLedger::new();
        let key = DedupKey::new("alice", "X");
        ledger.claim(key.clone());
        assert!(ledger.release(&key));
        assert!(!ledger.release(&key));
        assert!(ledger.claim(key));
    }

    #[test]
    fn test_sweep_clears_everything() {
        let ledger = DeliveryLedger::new();
        for i in 0..5 {
            ledger.claim(DedupKey::new("alice", i.to_string()));
        }
        assert_eq!(ledger.sweep(), 5);
        assert!(ledger.is_empty());
        assert_eq!(ledger.sweep(), 0);
    }

    #[test]
    fn test_concurrent_claims_single_winner() {
        let ledger = std::sync::Arc::new(DeliveryLedger::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let l = ledger.clone();
                std::thread::spawn(move || l.claim(DedupKey::new("alice", "S1")))
            })
            .collect();
        let wins = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|won| *won)
            .count();
        assert_eq!(wins, 1);
    }

    #[tokio::test]
    async fn test_sweep_loop_purges_on_interval() {
        let ledger = std::sync::Arc::new(DeliveryLedger::new());
        ledger.claim(DedupKey::new("alice", "S1"));
        let handle = tokio::spawn(sweep_loop(ledger.clone(), Duration::from_millis(20)));

        // Not purged before the first interval elapses.
        assert_eq!(ledger.len(), 1);
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(ledger.is_empty());
        handle.abort();
    }
}
