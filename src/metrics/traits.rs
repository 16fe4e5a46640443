//! # Metrics Trait Hierarchy
//!
//! Separates *recording*, *snapshotting*, and *export* responsibilities
//! into small, composable traits so monitoring never couples to policy
//! logic.
//!
//! ## Architecture
//!
//! ```text
//!   Recording (inside shelf operations):
//!   ┌──────────────────────────────┐    ┌──────────────────────────────┐
//!   │ ShelfMetricsRecorder         │    │ ShelfMetricsReadRecorder     │
//!   │ (&mut self paths:            │    │ (&self paths via cells:      │
//!   │  add/access/touch/evict)     │    │  peek/peek_victim/rank)      │
//!   └──────────────────────────────┘    └──────────────────────────────┘
//!
//!   Consumption (decoupled from recording):
//!   ┌──────────────────────────────┐    ┌──────────────────────────────┐
//!   │ MetricsSnapshotProvider<S>   │    │ MetricsExporter<S>           │
//!   │ (bench/test)                 │    │ (production monitoring)      │
//!   └──────────────────────────────┘    └──────────────────────────────┘
//! ```

/// Counters written from `&mut self` shelf operations.
pub trait ShelfMetricsRecorder {
    fn record_access_hit(&mut self);
    fn record_access_miss(&mut self);
    fn record_add_call(&mut self);
    fn record_add_new(&mut self);
    fn record_add_update(&mut self);
    fn record_evict_call(&mut self);
    fn record_evicted_entry(&mut self);
    fn record_evict_scan_step(&mut self);
    fn record_touch_call(&mut self);
    fn record_touch_found(&mut self);
}

/// Counters written from `&self` shelf operations (uses interior
/// mutability).
///
/// Use this for operations that only take `&self` (e.g. `peek`,
/// `peek_victim`, `recency_rank`) where a mutable recorder is not
/// available.
pub trait ShelfMetricsReadRecorder {
    fn record_peek_call(&self);
    fn record_peek_found(&self);
    fn record_peek_victim_call(&self);
    fn record_peek_victim_found(&self);
    fn record_recency_rank_call(&self);
    fn record_recency_rank_found(&self);
    fn record_recency_rank_scan_step(&self);
}

/// Point-in-time snapshot access for benches and tests.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Publishes snapshots to a monitoring system.
pub trait MetricsExporter<S> {
    fn export(&self, snapshot: &S);
}
