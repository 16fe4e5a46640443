//! Shelf operation metrics: recording, snapshotting, and export.
//!
//! Mirrors the policy split: recorders write counters from inside shelf
//! operations, snapshots copy them out with gauges for benches and tests,
//! and exporters publish snapshots to monitoring systems.

pub mod cell;
pub mod exporter;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;

pub use cell::MetricsCell;
pub use exporter::PrometheusTextExporter;
pub use metrics_impl::ShelfMetrics;
pub use snapshot::ShelfMetricsSnapshot;
