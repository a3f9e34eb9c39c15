use crate::api::models::BotStatus;
use chrono::{DateTime, Utc};

/// The latest applied status snapshot plus poll bookkeeping.
///
/// Each poll is issued with a monotonically increasing sequence number, and
/// completions are applied in the order they arrive. A completion whose
/// sequence number is older than the newest one already observed is
/// discarded rather than applied retroactively, so the display always
/// reflects the last poll to *finish*, never a late straggler.
#[derive(Debug, Default)]
pub struct StatusStore {
    latest: Option<BotStatus>,
    stale: bool,
    last_seq: u64,
    last_refresh: Option<DateTime<Utc>>,
}

impl StatusStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a successful poll, replacing the previous snapshot wholesale.
    /// Returns false when the completion is out of order; the snapshot is
    /// dropped and nothing changes.
    pub fn apply(&mut self, seq: u64, status: BotStatus) -> bool {
        if seq <= self.last_seq {
            return false;
        }
        self.last_seq = seq;
        self.latest = Some(status);
        self.stale = false;
        self.last_refresh = Some(Utc::now());
        true
    }

    /// Record a failed poll. Last-good data is retained and flagged stale.
    /// The same ordering guard applies: a failure that completes after a
    /// newer poll already landed says nothing about the current data.
    pub fn mark_stale(&mut self, seq: u64) -> bool {
        if seq <= self.last_seq {
            return false;
        }
        self.last_seq = seq;
        self.stale = true;
        true
    }

    pub fn latest(&self) -> Option<&BotStatus> {
        self.latest.as_ref()
    }

    pub fn is_stale(&self) -> bool {
        self.stale
    }

    pub fn last_refresh(&self) -> Option<DateTime<Utc>> {
        self.last_refresh
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn status_with_value(value: rust_decimal::Decimal) -> BotStatus {
        BotStatus {
            active: true,
            portfolio: Some(crate::api::models::Portfolio { total_value: value }),
            ..BotStatus::default()
        }
    }

    fn total_value(store: &StatusStore) -> rust_decimal::Decimal {
        store
            .latest()
            .and_then(|s| s.portfolio.as_ref())
            .map(|p| p.total_value)
            .unwrap()
    }

    #[test]
    fn test_apply_in_order() {
        let mut store = StatusStore::new();
        assert!(store.latest().is_none());

        assert!(store.apply(1, status_with_value(dec!(100))));
        assert!(store.apply(2, status_with_value(dec!(200))));
        assert_eq!(total_value(&store), dec!(200));
        assert!(!store.is_stale());
    }

    #[test]
    fn test_late_completion_is_discarded() {
        let mut store = StatusStore::new();

        // Poll #2 finishes before poll #1
        assert!(store.apply(2, status_with_value(dec!(200))));
        assert!(!store.apply(1, status_with_value(dec!(100))));

        // Display still matches poll #2
        assert_eq!(total_value(&store), dec!(200));
    }

    #[test]
    fn test_failure_keeps_last_good_data() {
        let mut store = StatusStore::new();
        assert!(store.apply(1, status_with_value(dec!(100))));

        assert!(store.mark_stale(2));
        assert!(store.is_stale());
        assert_eq!(total_value(&store), dec!(100));

        // A later success clears the flag
        assert!(store.apply(3, status_with_value(dec!(300))));
        assert!(!store.is_stale());
    }

    #[test]
    fn test_late_failure_is_discarded() {
        let mut store = StatusStore::new();
        assert!(store.apply(2, status_with_value(dec!(200))));

        // Poll #1 failed but only completed after #2 succeeded
        assert!(!store.mark_stale(1));
        assert!(!store.is_stale());
        assert_eq!(total_value(&store), dec!(200));
    }

    #[test]
    fn test_failure_before_first_snapshot() {
        let mut store = StatusStore::new();
        assert!(store.mark_stale(1));
        assert!(store.is_stale());
        assert!(store.latest().is_none());
        assert!(store.last_refresh().is_none());
    }
}
