//! Inbound venue events and outbound venue commands.
//!
//! The engine is a pure function from an event stream to a command stream;
//! these two enums are its entire outer surface. Both serialize to tagged
//! JSON for the replay tooling.

use crate::order::OrderId;
use crate::types::{BookSnapshot, Instrument, Lifespan, Price, Side, Volume};
use serde::{Deserialize, Serialize};

/// One inbound message from the venue session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// Depth snapshot for one instrument.
    OrderBook {
        instrument: Instrument,
        book: BookSnapshot,
    },
    /// Traded-volume-by-price aggregates since the previous tick message.
    TradeTicks {
        instrument: Instrument,
        book: BookSnapshot,
    },
    /// Partial or full fill of one of our primary orders.
    OrderFilled {
        id: OrderId,
        price: Price,
        volume: Volume,
    },
    /// Order state report; `remaining == 0` is terminal.
    OrderStatus {
        id: OrderId,
        filled: Volume,
        remaining: Volume,
        fees: i64,
    },
    /// Fill of one of our hedge orders on the reference instrument.
    HedgeFilled {
        id: OrderId,
        price: Price,
        volume: Volume,
    },
    /// Venue error frame. `id` is absent for errors not tied to an order.
    Error {
        id: Option<OrderId>,
        message: String,
    },
}

/// One outbound instruction to the venue session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    /// Insert a resting order on the primary instrument.
    Insert {
        id: OrderId,
        side: Side,
        price: Price,
        volume: Volume,
        lifespan: Lifespan,
    },
    /// Cancel a resting primary order.
    Cancel { id: OrderId },
    /// Fire a hedge order on the reference instrument.
    HedgeInsert {
        id: OrderId,
        side: Side,
        price: Price,
        volume: Volume,
    },
}

impl Event {
    /// Parse one JSONL replay line.
    pub fn from_json_line(line: &str) -> crate::error::CoreResult<Event> {
        Ok(serde_json::from_str(line)?)
    }
}
