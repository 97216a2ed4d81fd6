//! Operation counters for the cache policies (feature `metrics`).
//!
//! Counters are plain `u64`s bumped inline by `&mut self` operations;
//! `&self` operations count through [`MetricsCell`]. Call
//! `metrics_snapshot()` on a cache to read them.

pub mod cell;
pub mod metrics_impl;
pub mod snapshot;

pub use cell::MetricsCell;
pub use metrics_impl::{LfuMetrics, LruMetrics};
pub use snapshot::{LfuMetricsSnapshot, LruMetricsSnapshot};
