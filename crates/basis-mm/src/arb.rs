//! Statistical arbitrage over the ETF/future spread distribution.
//!
//! Tracks the last traded price of each instrument, feeds the signed spread
//! into a rolling window, and trades one lot-sized order at a time when the
//! current spread leaves the mean-centred band. In-flight volume is tracked
//! per side and released as orders fill or die, so the model never stacks
//! more exposure than the configured caps allow.

use crate::config::ArbConfig;
use basis_core::{BookSnapshot, Instrument, OrderId, Price, Side, Volume};
use basis_feed::RollingStats;
use std::collections::HashMap;
use tracing::debug;

/// A priced, sized order the model wants in the book.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArbOrder {
    pub side: Side,
    pub price: Price,
    pub volume: Volume,
}

#[derive(Debug)]
struct InflightOrder {
    side: Side,
    remaining: u64,
}

/// Rolling-spread statistical arbitrage model.
#[derive(Debug)]
pub struct ArbModel {
    cfg: ArbConfig,
    stats: RollingStats,
    last_etf: Option<Price>,
    last_future: Option<Price>,
    active_buy: u64,
    active_sell: u64,
    orders: HashMap<OrderId, InflightOrder>,
}

impl ArbModel {
    pub fn new(cfg: ArbConfig) -> Self {
        let window = cfg.window;
        Self {
            cfg,
            stats: RollingStats::new(window),
            last_etf: None,
            last_future: None,
            active_buy: 0,
            active_sell: 0,
            orders: HashMap::new(),
        }
    }

    /// Record a trade-tick message. Pushes a spread sample once both legs
    /// have traded at least once.
    pub fn observe_trade(&mut self, instrument: Instrument, ticks: &BookSnapshot) {
        let Some(px) = ticks.last_traded_price() else {
            return;
        };
        match instrument {
            Instrument::Etf => self.last_etf = Some(px),
            Instrument::Future => self.last_future = Some(px),
        }
        if let (Some(etf), Some(future)) = (self.last_etf, self.last_future) {
            self.stats.push(etf.cents() as f64 - future.cents() as f64);
        }
    }

    /// Current signed ETF-minus-future spread, if both legs have traded.
    fn current_spread(&self) -> Option<f64> {
        match (self.last_etf, self.last_future) {
            (Some(etf), Some(future)) => Some(etf.cents() as f64 - future.cents() as f64),
            _ => None,
        }
    }

    /// Evaluate the entry rule against the latest primary top of book.
    ///
    /// Returns at most one order; the caller allocates its id and must then
    /// `commit` it so the in-flight accounting stays true.
    pub fn signal(
        &self,
        best_bid: Option<Price>,
        best_ask: Option<Price>,
        position: i64,
        position_limit: i64,
        tick_size: u64,
    ) -> Option<ArbOrder> {
        if self.stats.len() < self.cfg.min_samples {
            return None;
        }
        let spread = self.current_spread()?;
        if self.active_buy + self.active_sell + self.cfg.lot_size > self.cfg.max_inflight_volume {
            return None;
        }

        let mean = self.stats.mean();
        let band = self.cfg.entry_std_devs * self.stats.std_dev();
        let lot = self.cfg.lot_size as i64;

        if spread > mean + band {
            // Spread rich: sell the ETF leg, undercutting the best ask.
            let ask = best_ask?;
            let sell_after = position - self.active_sell as i64 - lot;
            if sell_after > -position_limit {
                debug!(spread, mean, band, "arb sell signal");
                return Some(ArbOrder {
                    side: Side::Sell,
                    price: ask.offset_ticks(-1, tick_size),
                    volume: Volume::new(self.cfg.lot_size),
                });
            }
        } else if spread < mean - band {
            let bid = best_bid?;
            let buy_after = position + self.active_buy as i64 + lot;
            if buy_after < position_limit {
                debug!(spread, mean, band, "arb buy signal");
                return Some(ArbOrder {
                    side: Side::Buy,
                    price: bid.offset_ticks(1, tick_size),
                    volume: Volume::new(self.cfg.lot_size),
                });
            }
        }
        None
    }

    /// Register an order emitted for a signal.
    pub fn commit(&mut self, id: OrderId, order: ArbOrder) {
        match order.side {
            Side::Buy => self.active_buy += order.volume.lots(),
            Side::Sell => self.active_sell += order.volume.lots(),
        }
        self.orders.insert(
            id,
            InflightOrder {
                side: order.side,
                remaining: order.volume.lots(),
            },
        );
    }

    /// True when the id belongs to one of this model's orders.
    pub fn owns(&self, id: OrderId) -> bool {
        self.orders.contains_key(&id)
    }

    /// Apply a fill; returns the order's side when the id is ours.
    pub fn on_fill(&mut self, id: OrderId, volume: Volume) -> Option<Side> {
        let order = self.orders.get_mut(&id)?;
        let taken = volume.lots().min(order.remaining);
        order.remaining -= taken;
        match order.side {
            Side::Buy => self.active_buy = self.active_buy.saturating_sub(taken),
            Side::Sell => self.active_sell = self.active_sell.saturating_sub(taken),
        }
        Some(order.side)
    }

    /// Drop an order on its terminal status, releasing unfilled volume.
    pub fn on_terminal(&mut self, id: OrderId) {
        if let Some(order) = self.orders.remove(&id) {
            match order.side {
                Side::Buy => self.active_buy = self.active_buy.saturating_sub(order.remaining),
                Side::Sell => self.active_sell = self.active_sell.saturating_sub(order.remaining),
            }
        }
    }

    /// Total in-flight volume across both sides, in lots.
    pub fn inflight_volume(&self) -> u64 {
        self.active_buy + self.active_sell
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use basis_core::BOOK_DEPTH;

    fn trade(px: u64) -> BookSnapshot {
        let mut snap = BookSnapshot {
            sequence: 1,
            ask_prices: [Price::ZERO; BOOK_DEPTH],
            ask_volumes: [Volume::ZERO; BOOK_DEPTH],
            bid_prices: [Price::ZERO; BOOK_DEPTH],
            bid_volumes: [Volume::ZERO; BOOK_DEPTH],
        };
        snap.ask_prices[0] = Price::new(px);
        snap.ask_volumes[0] = Volume::new(1);
        snap
    }

    fn warmed_model(cfg: ArbConfig, samples: usize, spread: u64) -> ArbModel {
        let mut model = ArbModel::new(cfg);
        for _ in 0..samples {
            model.observe_trade(Instrument::Future, &trade(13000));
            model.observe_trade(Instrument::Etf, &trade(13000 + spread));
        }
        model
    }

    fn bb() -> Option<Price> {
        Some(Price::new(13000))
    }

    fn ba() -> Option<Price> {
        Some(Price::new(13600))
    }

    #[test]
    fn test_no_signal_before_warmup() {
        let model = warmed_model(ArbConfig::default(), 10, 600);
        assert!(model.signal(bb(), ba(), 0, 100, 100).is_none());
    }

    #[test]
    fn test_no_signal_inside_band() {
        let model = warmed_model(ArbConfig::default(), 50, 600);
        // Constant spread: zero deviation, current spread equals the mean.
        assert!(model.signal(bb(), ba(), 0, 100, 100).is_none());
    }

    #[test]
    fn test_rich_spread_sells_below_ask() {
        let mut model = warmed_model(ArbConfig::default(), 50, 600);
        // One wide print pushes the current spread above mean + band.
        model.observe_trade(Instrument::Etf, &trade(14500));
        let order = model.signal(bb(), ba(), 0, 100, 100).expect("sell signal");
        assert_eq!(order.side, Side::Sell);
        assert_eq!(order.price, Price::new(13500));
        assert_eq!(order.volume, Volume::new(10));
    }

    #[test]
    fn test_cheap_spread_buys_above_bid() {
        let mut model = warmed_model(ArbConfig::default(), 50, 600);
        model.observe_trade(Instrument::Etf, &trade(12500));
        let order = model.signal(bb(), ba(), 0, 100, 100).expect("buy signal");
        assert_eq!(order.side, Side::Buy);
        assert_eq!(order.price, Price::new(13100));
        assert_eq!(order.volume, Volume::new(10));
    }

    #[test]
    fn test_inflight_cap_blocks_signal() {
        let mut model = warmed_model(ArbConfig::default(), 50, 600);
        model.observe_trade(Instrument::Etf, &trade(14500));
        // Wide position limit so only the in-flight cap can bind.
        for i in 0..19 {
            let order = model
                .signal(bb(), ba(), 0, 1000, 100)
                .expect("signal under cap");
            model.commit(OrderId(i + 1), order);
        }
        assert_eq!(model.inflight_volume(), 190);
        assert!(model.signal(bb(), ba(), 0, 1000, 100).is_none());
    }

    #[test]
    fn test_side_headroom_blocks_signal() {
        let mut model = warmed_model(ArbConfig::default(), 50, 600);
        model.observe_trade(Instrument::Etf, &trade(14500));
        // Short position near the limit leaves no room to sell more.
        assert!(model.signal(bb(), ba(), -95, 100, 100).is_none());
        // But buying headroom is judged independently.
        model.observe_trade(Instrument::Etf, &trade(12500));
        assert!(model.signal(bb(), ba(), -95, 100, 100).is_some());
    }

    #[test]
    fn test_fill_and_terminal_release_inflight() {
        let mut model = warmed_model(ArbConfig::default(), 50, 600);
        model.observe_trade(Instrument::Etf, &trade(14500));
        let order = model.signal(bb(), ba(), 0, 100, 100).expect("signal");
        model.commit(OrderId(1), order);
        assert_eq!(model.inflight_volume(), 10);

        assert_eq!(model.on_fill(OrderId(1), Volume::new(4)), Some(Side::Sell));
        assert_eq!(model.inflight_volume(), 6);

        model.on_terminal(OrderId(1));
        assert_eq!(model.inflight_volume(), 0);
        assert!(!model.owns(OrderId(1)));
    }

    #[test]
    fn test_unknown_id_is_ignored() {
        let mut model = ArbModel::new(ArbConfig::default());
        assert_eq!(model.on_fill(OrderId(42), Volume::new(1)), None);
        model.on_terminal(OrderId(42));
        assert_eq!(model.inflight_volume(), 0);
    }
}
