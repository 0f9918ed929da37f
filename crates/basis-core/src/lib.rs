//! Core domain types for the basis trading engine.
//!
//! Price levels are integral cents, volumes integral lots. Everything in this
//! crate is plain data: no I/O, no runtime, no global state.

pub mod error;
pub mod events;
pub mod order;
pub mod types;

pub use error::{CoreError, CoreResult};
pub use events::{Command, Event};
pub use order::{OrderId, OrderIdAllocator};
pub use types::{
    max_ask_nearest_tick, min_bid_nearest_tick, validate_venue, BookSnapshot, Instrument,
    Lifespan, Price, Side, Volume, BOOK_DEPTH, MAXIMUM_ASK, MINIMUM_BID,
};
