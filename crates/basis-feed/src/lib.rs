//! Market data state for the basis engine.
//!
//! Holds the latest book snapshot per instrument and the rolling spread
//! statistics. Pure state containers, updated from the driver thread only.

pub mod book;
pub mod error;
pub mod stats;

pub use book::OrderBookView;
pub use error::{FeedError, FeedResult};
pub use stats::RollingStats;
