use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Snapshot of collector activity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectorStats {
    /// Lookups currently holding a permit.
    pub active: usize,
    pub max_concurrent: usize,
    /// Owner files found at the first candidate path.
    pub found_primary: u64,
    /// Owner files found at a later candidate path.
    pub found_fallback: u64,
    /// Repositories with no owner file at any path.
    pub missing: u64,
    /// Fetch failures other than "not found", folded into `missing`.
    pub fetch_errors: u64,
    /// Lookup tasks that panicked.
    pub panicked: u64,
}

#[derive(Default)]
pub(super) struct StatCounters {
    active: AtomicU64,
    found_primary: AtomicU64,
    found_fallback: AtomicU64,
    missing: AtomicU64,
    fetch_errors: AtomicU64,
    panicked: AtomicU64,
}

/// Decrements the active count when dropped, including on panic.
pub(super) struct ActiveGuard(Arc<StatCounters>);

impl Drop for ActiveGuard {
    fn drop(&mut self) {
        self.0.active.fetch_sub(1, Ordering::Relaxed);
    }
}

impl StatCounters {
    pub(super) fn enter(counters: &Arc<Self>) -> ActiveGuard {
        counters.active.fetch_add(1, Ordering::Relaxed);
        ActiveGuard(Arc::clone(counters))
    }

    pub(super) fn record_found(&self, index: usize) {
        if index == 0 {
            self.found_primary.fetch_add(1, Ordering::Relaxed);
        } else {
            self.found_fallback.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub(super) fn record_missing(&self, errors: usize) {
        self.missing.fetch_add(1, Ordering::Relaxed);
        self.fetch_errors.fetch_add(errors as u64, Ordering::Relaxed);
    }

    pub(super) fn record_panic(&self) {
        self.panicked.fetch_add(1, Ordering::Relaxed);
    }

    pub(super) fn snapshot(&self, max_concurrent: usize) -> CollectorStats {
        CollectorStats {
            active: self.active.load(Ordering::Relaxed) as usize,
            max_concurrent,
            found_primary: self.found_primary.load(Ordering::Relaxed),
            found_fallback: self.found_fallback.load(Ordering::Relaxed),
            missing: self.missing.load(Ordering::Relaxed),
            fetch_errors: self.fetch_errors.load(Ordering::Relaxed),
            panicked: self.panicked.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_guard() {
        let counters = Arc::new(StatCounters::default());
        {
            let _a = StatCounters::enter(&counters);
            let _b = StatCounters::enter(&counters);
            assert_eq!(counters.snapshot(20).active, 2);
        }
        assert_eq!(counters.snapshot(20).active, 0);
    }

    #[test]
    fn test_found_and_missing() {
        let counters = StatCounters::default();
        counters.record_found(0);
        counters.record_found(1);
        counters.record_found(1);
        counters.record_missing(2);

        let stats = counters.snapshot(5);
        assert_eq!(stats.max_concurrent, 5);
        assert_eq!(stats.found_primary, 1);
        assert_eq!(stats.found_fallback, 2);
        assert_eq!(stats.missing, 1);
        assert_eq!(stats.fetch_errors, 2);
    }
}
