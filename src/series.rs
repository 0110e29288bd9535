//! src/series.rs
//!
//! Top-level `series` module: the windowed store for the streamed
//! N-dimensional sample stream.

pub mod config;
pub mod store;

/// Re-exports
pub use config::SeriesConfig;
pub use store::{SeriesStore, Snapshot};
