use std::io::Write;
use std::sync::Mutex;

use crate::metrics::snapshot::ShelfMetricsSnapshot;
use crate::metrics::traits::MetricsExporter;

/// Prometheus text exporter for shelf metrics snapshots.
///
/// Writes in the Prometheus text exposition format so it can be scraped by
/// Prometheus or forwarded to an OpenTelemetry collector.
///
/// # Example
///
/// ```
/// use shelfkit::metrics::{PrometheusTextExporter, ShelfMetricsSnapshot};
/// use shelfkit::metrics::traits::MetricsExporter;
///
/// let mut buffer = Vec::new();
/// let exporter = PrometheusTextExporter::new("shelf", &mut buffer);
/// exporter.export(&ShelfMetricsSnapshot::default());
/// drop(exporter);
///
/// let text = String::from_utf8(buffer).unwrap();
/// assert!(text.contains("shelf_access_calls_total 0"));
/// assert!(text.contains("# TYPE shelf_capacity gauge"));
/// ```
#[derive(Debug)]
pub struct PrometheusTextExporter<W: Write + Send + Sync> {
    prefix: String,
    writer: Mutex<W>,
}

impl<W: Write + Send + Sync> PrometheusTextExporter<W> {
    pub fn new(prefix: impl Into<String>, writer: W) -> Self {
        Self {
            prefix: prefix.into(),
            writer: Mutex::new(writer),
        }
    }

    fn write_counter(&self, name: &str, value: u64) {
        let mut writer = self
            .writer
            .lock()
            .expect("metrics exporter writer poisoned");
        let _ = writeln!(writer, "# TYPE {} counter", name);
        let _ = writeln!(writer, "{} {}", name, value);
    }

    fn write_gauge(&self, name: &str, value: u64) {
        let mut writer = self
            .writer
            .lock()
            .expect("metrics exporter writer poisoned");
        let _ = writeln!(writer, "# TYPE {} gauge", name);
        let _ = writeln!(writer, "{} {}", name, value);
    }

    fn metric_name(&self, suffix: &str) -> String {
        if self.prefix.is_empty() {
            suffix.to_string()
        } else {
            format!("{}_{}", self.prefix, suffix)
        }
    }
}

impl<W: Write + Send + Sync> MetricsExporter<ShelfMetricsSnapshot> for PrometheusTextExporter<W> {
    fn export(&self, snapshot: &ShelfMetricsSnapshot) {
        self.write_counter(
            &self.metric_name("access_calls_total"),
            snapshot.access_calls,
        );
        self.write_counter(&self.metric_name("access_hits_total"), snapshot.access_hits);
        self.write_counter(
            &self.metric_name("access_misses_total"),
            snapshot.access_misses,
        );
        self.write_counter(&self.metric_name("add_calls_total"), snapshot.add_calls);
        self.write_counter(&self.metric_name("add_updates_total"), snapshot.add_updates);
        self.write_counter(&self.metric_name("add_new_total"), snapshot.add_new);
        self.write_counter(&self.metric_name("evict_calls_total"), snapshot.evict_calls);
        self.write_counter(
            &self.metric_name("evicted_entries_total"),
            snapshot.evicted_entries,
        );
        self.write_counter(
            &self.metric_name("evict_scan_steps_total"),
            snapshot.evict_scan_steps,
        );
        self.write_counter(&self.metric_name("touch_calls_total"), snapshot.touch_calls);
        self.write_counter(&self.metric_name("touch_found_total"), snapshot.touch_found);
        self.write_counter(&self.metric_name("peek_calls_total"), snapshot.peek_calls);
        self.write_counter(&self.metric_name("peek_found_total"), snapshot.peek_found);
        self.write_counter(
            &self.metric_name("peek_victim_calls_total"),
            snapshot.peek_victim_calls,
        );
        self.write_counter(
            &self.metric_name("peek_victim_found_total"),
            snapshot.peek_victim_found,
        );
        self.write_counter(
            &self.metric_name("recency_rank_calls_total"),
            snapshot.recency_rank_calls,
        );
        self.write_counter(
            &self.metric_name("recency_rank_found_total"),
            snapshot.recency_rank_found,
        );
        self.write_counter(
            &self.metric_name("recency_rank_scan_steps_total"),
            snapshot.recency_rank_scan_steps,
        );
        self.write_gauge(&self.metric_name("shelf_len"), snapshot.shelf_len as u64);
        self.write_gauge(&self.metric_name("capacity"), snapshot.capacity as u64);
        self.write_gauge(&self.metric_name("clock"), snapshot.clock);
    }
}
