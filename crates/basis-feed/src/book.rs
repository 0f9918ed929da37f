//! Latest-snapshot order book view.
//!
//! The venue sends full five-level snapshots, so the view only ever keeps the
//! most recent one per instrument. Sequence numbers are used to drop
//! out-of-order frames and to surface gaps; correctness never assumes the
//! sequence is contiguous.

use crate::error::{FeedError, FeedResult};
use basis_core::{BookSnapshot, Instrument, Price};
use std::collections::HashMap;
use tracing::warn;

#[derive(Debug)]
struct InstrumentBook {
    snapshot: BookSnapshot,
}

/// Latest book snapshot per instrument.
#[derive(Debug, Default)]
pub struct OrderBookView {
    books: HashMap<Instrument, InstrumentBook>,
}

impl OrderBookView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a snapshot. Rejects frames whose sequence number is not strictly
    /// greater than the last accepted one for the instrument.
    pub fn apply(&mut self, instrument: Instrument, snapshot: BookSnapshot) -> FeedResult<()> {
        if let Some(entry) = self.books.get(&instrument) {
            let last = entry.snapshot.sequence;
            if snapshot.sequence <= last {
                return Err(FeedError::StaleSequence {
                    instrument,
                    last,
                    got: snapshot.sequence,
                });
            }
            if snapshot.sequence > last + 1 {
                warn!(
                    %instrument,
                    last,
                    got = snapshot.sequence,
                    "sequence gap in book feed"
                );
            }
        }
        self.books.insert(instrument, InstrumentBook { snapshot });
        Ok(())
    }

    /// Latest snapshot for an instrument, if one has arrived.
    pub fn latest(&self, instrument: Instrument) -> Option<&BookSnapshot> {
        self.books.get(&instrument).map(|b| &b.snapshot)
    }

    pub fn best_bid(&self, instrument: Instrument) -> Option<Price> {
        self.latest(instrument).and_then(|s| s.best_bid())
    }

    pub fn best_ask(&self, instrument: Instrument) -> Option<Price> {
        self.latest(instrument).and_then(|s| s.best_ask())
    }
}
