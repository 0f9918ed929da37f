//! Pricing models for the basis engine.
//!
//! Everything here is a pure decision function or a small state container:
//! the quote engine prices the two-sided quote, the flow tracker biases it
//! with traded-flow imbalance, and the arb model trades the rolling spread
//! distribution. None of them send orders; that is the executor's job.

pub mod arb;
pub mod config;
pub mod flow;
pub mod quote_engine;

pub use arb::{ArbModel, ArbOrder};
pub use config::{ArbConfig, MakerConfig};
pub use flow::FlowTracker;
pub use quote_engine::{compute_quote, QuoteDecision};
