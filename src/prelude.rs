pub use crate::builder::ShelfBuilder;
pub use crate::ds::{LogicalClock, Tick};
pub use crate::error::{CommandError, ConfigError, InvariantError};
pub use crate::policy::lru::{BookEntry, ShelfCore};
pub use crate::protocol::{AccessReply, Command, Header};
pub use crate::traits::{BookId, BookShelf, Popularity, RecencyShelf};

#[cfg(feature = "concurrency")]
pub use crate::policy::lru::ConcurrentShelf;
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::ShelfMetricsSnapshot;
