use std::io;

use shelfkit::metrics::traits::MetricsExporter;
use shelfkit::metrics::PrometheusTextExporter;
use shelfkit::policy::lru::ShelfCore;
use shelfkit::traits::BookShelf;

fn main() {
    let mut shelf = ShelfCore::try_new(4).expect("capacity is positive");

    for id in 0..10 {
        shelf.add(id, id * 7);
    }
    for id in 0..10 {
        shelf.access(id);
    }

    let exporter = PrometheusTextExporter::new("shelf", io::stdout());
    exporter.export(&shelf.metrics_snapshot());
}

// Prints the Prometheus text exposition for the workload above: 10 adds
// (all inserts, 6 of them evicting), then 10 accesses of which only the 4
// surviving ids hit.
