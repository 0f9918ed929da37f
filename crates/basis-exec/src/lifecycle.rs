//! Per-side quote lifecycle.
//!
//! Each side of the quote runs a three-state machine: `Idle` (nothing
//! resting), `Active` (one resting order), `CancelPending` (cancel sent, new
//! target recorded). Replacement is deferred: the insert for a new price goes
//! out only when the venue acknowledges the cancel, so at most one order per
//! side ever rests. The replacement is sized by the risk guard at
//! acknowledgement time, against the position as it is then.

use crate::risk::PositionRiskGuard;
use basis_core::{Command, Lifespan, OrderId, OrderIdAllocator, Price, Side, Volume};
use std::collections::HashMap;
use tracing::{debug, warn};

/// A resting quote order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveOrder {
    pub id: OrderId,
    pub price: Price,
    pub remaining: Volume,
}

#[derive(Debug)]
enum SideSlot {
    Idle,
    Active(ActiveOrder),
    CancelPending { cancelled: OrderId, target: Price },
}

/// Quote order state machine for both sides of the primary instrument.
#[derive(Debug)]
pub struct OrderLifecycleManager {
    bid: SideSlot,
    ask: SideSlot,
    /// Routes order events back to their side. Entries live until the
    /// order's terminal status, so late fills on a cancelled id still land.
    sides: HashMap<OrderId, Side>,
    guard: PositionRiskGuard,
    halted: bool,
}

impl OrderLifecycleManager {
    pub fn new(guard: PositionRiskGuard) -> Self {
        Self {
            bid: SideSlot::Idle,
            ask: SideSlot::Idle,
            sides: HashMap::new(),
            guard,
            halted: false,
        }
    }

    /// True when the id belongs to a quote order, resting or cancelled.
    pub fn owns(&self, id: OrderId) -> bool {
        self.sides.contains_key(&id)
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// The resting order on a side, if any.
    pub fn resting(&self, side: Side) -> Option<ActiveOrder> {
        match self.slot(side) {
            SideSlot::Active(order) => Some(*order),
            _ => None,
        }
    }

    fn slot(&self, side: Side) -> &SideSlot {
        match side {
            Side::Buy => &self.bid,
            Side::Sell => &self.ask,
        }
    }

    fn slot_mut(&mut self, side: Side) -> &mut SideSlot {
        match side {
            Side::Buy => &mut self.bid,
            Side::Sell => &mut self.ask,
        }
    }

    /// Reconcile both sides against a new quote decision.
    ///
    /// `targets` is `Some((bid, ask))` to quote, `None` to halt. Commands
    /// come out side by side: for each side at most one cancel, or one
    /// insert when the side is idle and the guard allows a volume.
    pub fn sync_quotes(
        &mut self,
        targets: Option<(Price, Price)>,
        position: i64,
        ids: &mut OrderIdAllocator,
    ) -> Vec<Command> {
        let mut out = Vec::new();
        match targets {
            None => {
                if !self.halted {
                    warn!("quote engine halted, pulling both sides");
                }
                self.halted = true;
                self.halt_side(Side::Buy, &mut out);
                self.halt_side(Side::Sell, &mut out);
            }
            Some((bid, ask)) => {
                self.halted = false;
                self.sync_side(Side::Buy, bid, position, ids, &mut out);
                self.sync_side(Side::Sell, ask, position, ids, &mut out);
            }
        }
        out
    }

    fn halt_side(&mut self, side: Side, out: &mut Vec<Command>) {
        if let SideSlot::Active(order) = self.slot(side) {
            let id = order.id;
            let price = order.price;
            out.push(Command::Cancel { id });
            *self.slot_mut(side) = SideSlot::CancelPending {
                cancelled: id,
                target: price,
            };
        }
    }

    fn sync_side(
        &mut self,
        side: Side,
        target: Price,
        position: i64,
        ids: &mut OrderIdAllocator,
        out: &mut Vec<Command>,
    ) {
        match self.slot_mut(side) {
            SideSlot::Idle => {
                let volume = self.guard.quote_volume(side, position);
                if !volume.is_zero() {
                    self.insert(side, target, volume, ids, out);
                }
            }
            SideSlot::Active(order) => {
                if order.price != target {
                    let id = order.id;
                    out.push(Command::Cancel { id });
                    *self.slot_mut(side) = SideSlot::CancelPending {
                        cancelled: id,
                        target,
                    };
                }
            }
            SideSlot::CancelPending { target: recorded, .. } => {
                // Cancel already in flight; just retarget the replacement.
                *recorded = target;
            }
        }
    }

    fn insert(
        &mut self,
        side: Side,
        price: Price,
        volume: Volume,
        ids: &mut OrderIdAllocator,
        out: &mut Vec<Command>,
    ) {
        let id = ids.next_id();
        debug!(%id, %side, %price, %volume, "quote insert");
        self.sides.insert(id, side);
        *self.slot_mut(side) = SideSlot::Active(ActiveOrder {
            id,
            price,
            remaining: volume,
        });
        out.push(Command::Insert {
            id,
            side,
            price,
            volume,
            lifespan: Lifespan::GoodForDay,
        });
    }

    /// Apply a fill to a quote order. Returns its side so the caller can
    /// move the position; fills on a cancel-pending id still count.
    pub fn on_fill(&mut self, id: OrderId, volume: Volume) -> Option<Side> {
        let side = *self.sides.get(&id)?;
        if let SideSlot::Active(order) = self.slot_mut(side) {
            if order.id == id {
                order.remaining = order.remaining.saturating_sub(volume);
                if order.remaining.is_zero() {
                    *self.slot_mut(side) = SideSlot::Idle;
                    self.sides.remove(&id);
                }
            }
        }
        Some(side)
    }

    /// Apply an order status report. A zero remaining volume is terminal; a
    /// terminal status on a pending cancel triggers the deferred insert.
    pub fn on_order_status(
        &mut self,
        id: OrderId,
        remaining: Volume,
        position: i64,
        ids: &mut OrderIdAllocator,
    ) -> Vec<Command> {
        let mut out = Vec::new();
        let Some(&side) = self.sides.get(&id) else {
            return out;
        };

        if !remaining.is_zero() {
            if let SideSlot::Active(order) = self.slot_mut(side) {
                if order.id == id {
                    order.remaining = remaining;
                }
            }
            return out;
        }

        self.sides.remove(&id);
        match self.slot(side) {
            SideSlot::Active(order) if order.id == id => {
                *self.slot_mut(side) = SideSlot::Idle;
            }
            SideSlot::CancelPending { cancelled, target } if *cancelled == id => {
                let target = *target;
                *self.slot_mut(side) = SideSlot::Idle;
                if !self.halted {
                    let volume = self.guard.quote_volume(side, position);
                    if !volume.is_zero() {
                        self.insert(side, target, volume, ids, &mut out);
                    }
                }
            }
            _ => {}
        }
        out
    }

    /// Treat an order-specific venue error as a terminal status.
    pub fn on_order_error(
        &mut self,
        id: OrderId,
        position: i64,
        ids: &mut OrderIdAllocator,
    ) -> Vec<Command> {
        warn!(%id, "venue rejected quote order");
        self.on_order_status(id, Volume::ZERO, position, ids)
    }
}
