use crate::metrics::cell::MetricsCell;
use crate::metrics::traits::{ShelfMetricsReadRecorder, ShelfMetricsRecorder};

/// Counter set for one shelf instance.
///
/// Plain `u64` fields are written from `&mut self` operations;
/// [`MetricsCell`] fields are written from `&self` read paths.
#[derive(Debug, Default)]
pub struct ShelfMetrics {
    pub access_calls: u64,
    pub access_hits: u64,
    pub access_misses: u64,
    pub add_calls: u64,
    pub add_updates: u64,
    pub add_new: u64,
    pub evict_calls: u64,
    pub evicted_entries: u64,
    pub evict_scan_steps: u64,
    pub touch_calls: u64,
    pub touch_found: u64,
    pub peek_calls: MetricsCell,
    pub peek_found: MetricsCell,
    pub peek_victim_calls: MetricsCell,
    pub peek_victim_found: MetricsCell,
    pub recency_rank_calls: MetricsCell,
    pub recency_rank_found: MetricsCell,
    pub recency_rank_scan_steps: MetricsCell,
}

impl ShelfMetricsRecorder for ShelfMetrics {
    fn record_access_hit(&mut self) {
        self.access_calls += 1;
        self.access_hits += 1;
    }

    fn record_access_miss(&mut self) {
        self.access_calls += 1;
        self.access_misses += 1;
    }

    fn record_add_call(&mut self) {
        self.add_calls += 1;
    }

    fn record_add_new(&mut self) {
        self.add_new += 1;
    }

    fn record_add_update(&mut self) {
        self.add_updates += 1;
    }

    fn record_evict_call(&mut self) {
        self.evict_calls += 1;
    }

    fn record_evicted_entry(&mut self) {
        self.evicted_entries += 1;
    }

    fn record_evict_scan_step(&mut self) {
        self.evict_scan_steps += 1;
    }

    fn record_touch_call(&mut self) {
        self.touch_calls += 1;
    }

    fn record_touch_found(&mut self) {
        self.touch_found += 1;
    }
}

impl ShelfMetricsReadRecorder for &ShelfMetrics {
    fn record_peek_call(&self) {
        self.peek_calls.incr();
    }

    fn record_peek_found(&self) {
        self.peek_found.incr();
    }

    fn record_peek_victim_call(&self) {
        self.peek_victim_calls.incr();
    }

    fn record_peek_victim_found(&self) {
        self.peek_victim_found.incr();
    }

    fn record_recency_rank_call(&self) {
        self.recency_rank_calls.incr();
    }

    fn record_recency_rank_found(&self) {
        self.recency_rank_found.incr();
    }

    fn record_recency_rank_scan_step(&self) {
        self.recency_rank_scan_steps.incr();
    }
}
