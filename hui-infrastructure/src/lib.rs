#![warn(clippy::uninlined_format_args)]

pub mod clock;
pub mod seed;
pub mod snapshot_store;

pub use clock::{SystemClock, TimestampIdGenerator};
pub use seed::sample_state;
pub use snapshot_store::JsonSnapshotStore;
