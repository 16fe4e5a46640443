pub mod logical_clock;

pub use logical_clock::{LogicalClock, Tick};
