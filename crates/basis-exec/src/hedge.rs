//! Hedge control on the reference instrument.
//!
//! Every primary fill is hedged immediately with an opposite-side order at
//! the venue's outermost tick-aligned price, which is always marketable.
//! Because hedge orders can themselves miss, a correction loop runs on every
//! reference book update: small one-lot nudges while the hedge leg is off,
//! and a single full corrective order once the imbalance has persisted for a
//! configured number of cycles.

use basis_core::{
    max_ask_nearest_tick, min_bid_nearest_tick, Command, OrderId, OrderIdAllocator, Price, Side,
    Volume,
};
use std::collections::HashMap;
use tracing::{debug, info};

#[derive(Debug)]
struct HedgeOrder {
    side: Side,
    remaining: u64,
}

/// Keeps the reference leg at the mirror of the primary position.
#[derive(Debug)]
pub struct HedgeController {
    escalation_threshold: u32,
    counter: u32,
    orders: HashMap<OrderId, HedgeOrder>,
    /// Always-marketable buy price: the venue's top tick.
    buy_price: Price,
    /// Always-marketable sell price: the venue's bottom tick.
    sell_price: Price,
}

impl HedgeController {
    pub fn new(tick_size: u64, escalation_threshold: u32) -> Self {
        Self {
            escalation_threshold,
            counter: 0,
            orders: HashMap::new(),
            buy_price: max_ask_nearest_tick(tick_size),
            sell_price: min_bid_nearest_tick(tick_size),
        }
    }

    fn hedge_price(&self, side: Side) -> Price {
        match side {
            Side::Buy => self.buy_price,
            Side::Sell => self.sell_price,
        }
    }

    fn fire(&mut self, side: Side, volume: Volume, ids: &mut OrderIdAllocator) -> Command {
        let id = ids.next_id();
        self.orders.insert(
            id,
            HedgeOrder {
                side,
                remaining: volume.lots(),
            },
        );
        Command::HedgeInsert {
            id,
            side,
            price: self.hedge_price(side),
            volume,
        }
    }

    /// Hedge a primary fill one for one, on the opposite side.
    pub fn on_primary_fill(
        &mut self,
        filled: Side,
        volume: Volume,
        ids: &mut OrderIdAllocator,
    ) -> Command {
        let side = filled.opposite();
        debug!(%side, %volume, "hedging primary fill");
        self.fire(side, volume, ids)
    }

    /// True when the id belongs to a live hedge order.
    pub fn owns(&self, id: OrderId) -> bool {
        self.orders.contains_key(&id)
    }

    /// Apply a hedge fill; returns the order's side when the id is ours.
    pub fn on_hedge_fill(&mut self, id: OrderId, volume: Volume) -> Option<Side> {
        let order = self.orders.get_mut(&id)?;
        let side = order.side;
        order.remaining = order.remaining.saturating_sub(volume.lots());
        if order.remaining == 0 {
            self.orders.remove(&id);
        }
        Some(side)
    }

    /// Drop a hedge order the venue rejected. The correction loop makes up
    /// whatever it was meant to cover.
    pub fn on_order_error(&mut self, id: OrderId) {
        self.orders.remove(&id);
    }

    /// Reset the escalation counter once the legs are square again.
    pub fn observe_balance(&mut self, imbalance: i64) {
        if imbalance == 0 {
            self.counter = 0;
        }
    }

    /// Run one correction cycle. `imbalance` is the lots of hedge buying
    /// still needed (negative for selling); called on every reference book
    /// update.
    pub fn on_reference_update(
        &mut self,
        imbalance: i64,
        ids: &mut OrderIdAllocator,
    ) -> Option<Command> {
        if imbalance == 0 {
            return None;
        }
        let side = if imbalance > 0 { Side::Buy } else { Side::Sell };
        if self.counter > self.escalation_threshold {
            info!(imbalance, "hedge imbalance persisted, full correction");
            self.counter = 0;
            return Some(self.fire(side, Volume::new(imbalance.unsigned_abs()), ids));
        }
        self.counter += 1;
        Some(self.fire(side, Volume::new(1), ids))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> (HedgeController, OrderIdAllocator) {
        (HedgeController::new(100, 200), OrderIdAllocator::new())
    }

    #[test]
    fn test_primary_fill_hedged_opposite_and_marketable() {
        let (mut hedge, mut ids) = controller();
        let cmd = hedge.on_primary_fill(Side::Sell, Volume::new(10), &mut ids);
        match cmd {
            Command::HedgeInsert { side, price, volume, .. } => {
                assert_eq!(side, Side::Buy);
                assert_eq!(price, max_ask_nearest_tick(100));
                assert_eq!(volume, Volume::new(10));
            }
            other => panic!("expected hedge insert, got {other:?}"),
        }
        let cmd = hedge.on_primary_fill(Side::Buy, Volume::new(5), &mut ids);
        assert!(matches!(
            cmd,
            Command::HedgeInsert { side: Side::Sell, .. }
        ));
    }

    #[test]
    fn test_hedge_fill_routing() {
        let (mut hedge, mut ids) = controller();
        let cmd = hedge.on_primary_fill(Side::Sell, Volume::new(10), &mut ids);
        let id = match cmd {
            Command::HedgeInsert { id, .. } => id,
            other => panic!("expected hedge insert, got {other:?}"),
        };
        assert!(hedge.owns(id));
        assert_eq!(hedge.on_hedge_fill(id, Volume::new(10)), Some(Side::Buy));
        assert!(!hedge.owns(id));
        assert_eq!(hedge.on_hedge_fill(id, Volume::new(1)), None);
    }

    #[test]
    fn test_balanced_leg_emits_nothing() {
        let (mut hedge, mut ids) = controller();
        assert!(hedge.on_reference_update(0, &mut ids).is_none());
    }

    #[test]
    fn test_nudges_below_threshold() {
        let (mut hedge, mut ids) = controller();
        let cmd = hedge.on_reference_update(7, &mut ids);
        assert!(matches!(
            cmd,
            Some(Command::HedgeInsert { side: Side::Buy, volume: Volume(1), .. })
        ));
        let cmd = hedge.on_reference_update(-3, &mut ids);
        assert!(matches!(
            cmd,
            Some(Command::HedgeInsert { side: Side::Sell, volume: Volume(1), .. })
        ));
    }

    #[test]
    fn test_escalates_to_full_correction() {
        let (mut hedge, mut ids) = controller();
        for _ in 0..=200 {
            let cmd = hedge.on_reference_update(15, &mut ids);
            assert!(matches!(
                cmd,
                Some(Command::HedgeInsert { volume: Volume(1), .. })
            ));
        }
        // Counter now past the threshold: the next cycle corrects in full.
        let cmd = hedge.on_reference_update(15, &mut ids);
        assert!(matches!(
            cmd,
            Some(Command::HedgeInsert { side: Side::Buy, volume: Volume(15), .. })
        ));
        // And the counter restarts at nudges.
        let cmd = hedge.on_reference_update(15, &mut ids);
        assert!(matches!(
            cmd,
            Some(Command::HedgeInsert { volume: Volume(1), .. })
        ));
    }

    #[test]
    fn test_balance_resets_counter() {
        let (mut hedge, mut ids) = controller();
        for _ in 0..150 {
            hedge.on_reference_update(4, &mut ids);
        }
        hedge.observe_balance(0);
        for _ in 0..=200 {
            let cmd = hedge.on_reference_update(4, &mut ids);
            assert!(matches!(
                cmd,
                Some(Command::HedgeInsert { volume: Volume(1), .. })
            ));
        }
    }
}
