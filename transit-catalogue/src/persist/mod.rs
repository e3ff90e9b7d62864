//! Saving and restoring a whole dataset.
//!
//! A snapshot holds the catalogue's stops, road distances and bus lines
//! together with the routing and render settings. Derived state (bus
//! statistics, the routing graph and table) is not stored; it is rebuilt on
//! restore through the regular catalogue and router construction paths.
//!
//! On disk a snapshot is the four magic bytes `TCAT`, a format version, and
//! the bincode-encoded records.

mod error;
mod snapshot;

pub use error::PersistError;
pub use snapshot::{Dataset, FORMAT_VERSION, MAGIC, MAX_SNAPSHOT_BYTES, Snapshot};
