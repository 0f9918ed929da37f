//! Order execution state for the basis engine.
//!
//! Bridges pricing decisions and venue commands: the lifecycle manager runs
//! the per-side quote replacement protocol, the risk guard sizes every
//! insert, the hedge controller keeps the reference leg flat, and the
//! position book is the single owner of signed position state.

pub mod hedge;
pub mod lifecycle;
pub mod position;
pub mod risk;

pub use hedge::HedgeController;
pub use lifecycle::{ActiveOrder, OrderLifecycleManager};
pub use position::PositionBook;
pub use risk::PositionRiskGuard;
