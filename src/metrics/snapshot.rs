/// Point-in-time copy of a shelf's counters.
///
/// Produced by `ShelfCore::metrics_snapshot` /
/// `ConcurrentShelf::metrics_snapshot`; the gauges at the bottom are
/// captured in the same instant as the counters.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShelfMetricsSnapshot {
    pub access_calls: u64,
    pub access_hits: u64,
    pub access_misses: u64,

    pub add_calls: u64,
    pub add_updates: u64,
    pub add_new: u64,

    pub evict_calls: u64,
    pub evicted_entries: u64,
    pub evict_scan_steps: u64, // victim-scan iterations inside eviction

    pub touch_calls: u64,
    pub touch_found: u64,

    pub peek_calls: u64,
    pub peek_found: u64,

    pub peek_victim_calls: u64,
    pub peek_victim_found: u64,

    pub recency_rank_calls: u64,
    pub recency_rank_found: u64,
    pub recency_rank_scan_steps: u64,

    // gauges captured at snapshot time
    pub shelf_len: usize,
    pub capacity: usize,
    pub clock: u64,
}

impl ShelfMetricsSnapshot {
    /// Hit fraction over all `access` calls, or `None` before the first
    /// call.
    pub fn hit_rate(&self) -> Option<f64> {
        if self.access_calls == 0 {
            return None;
        }
        Some(self.access_hits as f64 / self.access_calls as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_rate_undefined_before_first_access() {
        let snapshot = ShelfMetricsSnapshot::default();
        assert_eq!(snapshot.hit_rate(), None);
    }

    #[test]
    fn hit_rate_is_hits_over_calls() {
        let snapshot = ShelfMetricsSnapshot {
            access_calls: 4,
            access_hits: 3,
            access_misses: 1,
            ..Default::default()
        };
        assert_eq!(snapshot.hit_rate(), Some(0.75));
    }
}
