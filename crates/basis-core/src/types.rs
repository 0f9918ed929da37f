//! Instruments, sides, and the integer price/volume newtypes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of levels carried per book side in a snapshot.
pub const BOOK_DEPTH: usize = 5;

/// Lowest price the venue accepts for a bid, in cents.
pub const MINIMUM_BID: u64 = 1;

/// Highest price the venue accepts for an ask, in cents.
pub const MAXIMUM_ASK: u64 = (1 << 31) - 1;

/// Tradable instrument on the venue.
///
/// The future is the hedge/reference leg; the ETF is the primary quoting leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Instrument {
    Future,
    Etf,
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instrument::Future => write!(f, "FUTURE"),
            Instrument::Etf => write!(f, "ETF"),
        }
    }
}

/// Order side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// The opposing side.
    pub fn opposite(&self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }

    /// Position delta sign for a fill on this side.
    pub fn sign(&self) -> i64 {
        match self {
            Side::Buy => 1,
            Side::Sell => -1,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

/// Order lifespan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Lifespan {
    /// Rests in the book until cancelled or filled.
    #[default]
    GoodForDay,
    /// Trades what it can on arrival, remainder is cancelled by the venue.
    FillAndKill,
}

/// Price in integral cents. Zero marks an absent book level.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(pub u64);

impl Price {
    pub const ZERO: Price = Price(0);

    pub fn new(cents: u64) -> Self {
        Price(cents)
    }

    pub fn cents(&self) -> u64 {
        self.0
    }

    /// True when this level is absent from the book.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Price moved by a signed number of ticks, saturating at zero.
    pub fn offset_ticks(&self, ticks: i64, tick_size: u64) -> Price {
        let delta = ticks.unsigned_abs().saturating_mul(tick_size);
        if ticks >= 0 {
            Price(self.0.saturating_add(delta))
        } else {
            Price(self.0.saturating_sub(delta))
        }
    }

    /// Distance above `bid`, in cents. Zero when not above.
    pub fn spread_over(&self, bid: Price) -> u64 {
        self.0.saturating_sub(bid.0)
    }

    /// True when the price sits on the venue tick grid.
    pub fn is_tick_aligned(&self, tick_size: u64) -> bool {
        tick_size != 0 && self.0 % tick_size == 0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lowest tick-aligned price a bid may carry.
pub fn min_bid_nearest_tick(tick_size: u64) -> Price {
    Price((MINIMUM_BID + tick_size) / tick_size * tick_size)
}

/// Highest tick-aligned price an ask may carry.
pub fn max_ask_nearest_tick(tick_size: u64) -> Price {
    Price(MAXIMUM_ASK / tick_size * tick_size)
}

/// Reject venue parameters the engine cannot trade with.
pub fn validate_venue(tick_size: u64, position_limit: i64) -> crate::error::CoreResult<()> {
    if tick_size == 0 {
        return Err(crate::error::CoreError::InvalidTickSize(tick_size));
    }
    if position_limit <= 0 {
        return Err(crate::error::CoreError::InvalidPositionLimit(position_limit));
    }
    Ok(())
}

/// Volume in integral lots.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Volume(pub u64);

impl Volume {
    pub const ZERO: Volume = Volume(0);

    pub fn new(lots: u64) -> Self {
        Volume(lots)
    }

    pub fn lots(&self) -> u64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn saturating_sub(&self, other: Volume) -> Volume {
        Volume(self.0.saturating_sub(other.0))
    }
}

impl fmt::Display for Volume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Five-level depth snapshot of one instrument's book.
///
/// Levels are sorted best-first; absent levels carry zero price and volume.
/// The same shape carries trade-tick aggregates, where each level is traded
/// volume at that price since the previous tick message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSnapshot {
    pub sequence: u64,
    pub ask_prices: [Price; BOOK_DEPTH],
    pub ask_volumes: [Volume; BOOK_DEPTH],
    pub bid_prices: [Price; BOOK_DEPTH],
    pub bid_volumes: [Volume; BOOK_DEPTH],
}

impl BookSnapshot {
    /// Best ask, if the ask side is populated.
    pub fn best_ask(&self) -> Option<Price> {
        (!self.ask_prices[0].is_zero()).then_some(self.ask_prices[0])
    }

    /// Best bid, if the bid side is populated.
    pub fn best_bid(&self) -> Option<Price> {
        (!self.bid_prices[0].is_zero()).then_some(self.bid_prices[0])
    }

    /// Last-trade proxy: the greater of the two top-of-book prices.
    ///
    /// On a trade-tick snapshot this is the most aggressive traded price.
    pub fn last_traded_price(&self) -> Option<Price> {
        let px = self.ask_prices[0].max(self.bid_prices[0]);
        (!px.is_zero()).then_some(px)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_opposite_and_sign() {
        assert_eq!(Side::Buy.opposite(), Side::Sell);
        assert_eq!(Side::Sell.opposite(), Side::Buy);
        assert_eq!(Side::Buy.sign(), 1);
        assert_eq!(Side::Sell.sign(), -1);
    }

    #[test]
    fn test_price_offset_ticks() {
        let px = Price::new(13000);
        assert_eq!(px.offset_ticks(1, 100), Price::new(13100));
        assert_eq!(px.offset_ticks(-2, 100), Price::new(12800));
        assert_eq!(Price::new(50).offset_ticks(-1, 100), Price::ZERO);
    }

    #[test]
    fn test_nearest_tick_bounds() {
        assert_eq!(min_bid_nearest_tick(100), Price::new(100));
        assert_eq!(max_ask_nearest_tick(100).cents() % 100, 0);
        assert!(max_ask_nearest_tick(100).cents() <= MAXIMUM_ASK);
    }

    #[test]
    fn test_snapshot_best_levels() {
        let snap = BookSnapshot {
            sequence: 1,
            ask_prices: [Price::new(13600), Price::ZERO, Price::ZERO, Price::ZERO, Price::ZERO],
            ask_volumes: [Volume::new(5), Volume::ZERO, Volume::ZERO, Volume::ZERO, Volume::ZERO],
            bid_prices: [Price::new(13000), Price::ZERO, Price::ZERO, Price::ZERO, Price::ZERO],
            bid_volumes: [Volume::new(7), Volume::ZERO, Volume::ZERO, Volume::ZERO, Volume::ZERO],
        };
        assert_eq!(snap.best_ask(), Some(Price::new(13600)));
        assert_eq!(snap.best_bid(), Some(Price::new(13000)));
        assert_eq!(snap.last_traded_price(), Some(Price::new(13600)));
    }

    #[test]
    fn test_empty_snapshot_has_no_best() {
        let snap = BookSnapshot {
            sequence: 0,
            ask_prices: [Price::ZERO; BOOK_DEPTH],
            ask_volumes: [Volume::ZERO; BOOK_DEPTH],
            bid_prices: [Price::ZERO; BOOK_DEPTH],
            bid_volumes: [Volume::ZERO; BOOK_DEPTH],
        };
        assert_eq!(snap.best_ask(), None);
        assert_eq!(snap.best_bid(), None);
        assert_eq!(snap.last_traded_price(), None);
    }
}
