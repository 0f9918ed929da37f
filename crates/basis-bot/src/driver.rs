//! Event dispatch.
//!
//! The driver owns every stateful component and wires venue events through
//! them in a fixed order. It holds no pricing or risk logic of its own: each
//! event handler is a straight line from inputs to the components that care.

use crate::config::{AppConfig, StrategyMode};
use basis_core::{
    BookSnapshot, Command, Event, Instrument, Lifespan, OrderId, OrderIdAllocator, Volume,
};
use basis_exec::{HedgeController, OrderLifecycleManager, PositionBook, PositionRiskGuard};
use basis_feed::OrderBookView;
use basis_mm::{compute_quote, ArbModel, ArbOrder, FlowTracker, MakerConfig, QuoteDecision};
use tracing::warn;

/// Single-threaded strategy driver: events in, commands out.
pub struct StrategyDriver {
    mode: StrategyMode,
    maker_cfg: MakerConfig,
    tick_size: u64,
    view: OrderBookView,
    flow: FlowTracker,
    guard: PositionRiskGuard,
    lifecycle: OrderLifecycleManager,
    hedge: HedgeController,
    arb: ArbModel,
    positions: PositionBook,
    ids: OrderIdAllocator,
}

impl StrategyDriver {
    pub fn new(cfg: &AppConfig) -> Self {
        let guard = PositionRiskGuard::new(cfg.venue.position_limit, cfg.venue.max_order_volume);
        Self {
            mode: cfg.mode,
            maker_cfg: cfg.maker.clone(),
            tick_size: cfg.venue.tick_size,
            view: OrderBookView::new(),
            flow: FlowTracker::new(),
            guard,
            lifecycle: OrderLifecycleManager::new(guard),
            hedge: HedgeController::new(cfg.venue.tick_size, cfg.hedge.escalation_threshold),
            arb: ArbModel::new(cfg.arb.clone()),
            positions: PositionBook::new(),
            ids: OrderIdAllocator::new(),
        }
    }

    /// Signed primary position, in lots.
    pub fn position(&self) -> i64 {
        self.positions.primary()
    }

    /// Signed hedge position, in lots.
    pub fn hedge_position(&self) -> i64 {
        self.positions.hedge()
    }

    /// Process one venue event, returning the commands it provokes.
    pub fn on_event(&mut self, event: Event) -> Vec<Command> {
        match event {
            Event::OrderBook { instrument, book } => self.on_order_book(instrument, book),
            Event::TradeTicks { instrument, book } => self.on_trade_ticks(instrument, &book),
            Event::OrderFilled { id, volume, .. } => self.on_order_filled(id, volume),
            Event::OrderStatus { id, remaining, .. } => self.on_order_status(id, remaining),
            Event::HedgeFilled { id, volume, .. } => {
                self.on_hedge_filled(id, volume);
                Vec::new()
            }
            Event::Error { id, message } => self.on_error(id, &message),
        }
    }

    fn on_order_book(&mut self, instrument: Instrument, book: BookSnapshot) -> Vec<Command> {
        // Price off the incoming snapshot, then commit it to the view; a
        // stale frame is dropped whole.
        let decision = match self.mode {
            StrategyMode::Maker if instrument == Instrument::Etf => {
                Some(compute_quote(&book, self.maker_cfg.min_spread, self.tick_size))
            }
            _ => None,
        };
        if let Err(err) = self.view.apply(instrument, book) {
            warn!(error = %err, "dropping stale book snapshot");
            return Vec::new();
        }

        match instrument {
            Instrument::Etf => {
                let Some(decision) = decision else {
                    return Vec::new();
                };
                let shift = self.flow.shift_ticks(&self.maker_cfg);
                self.flow.reset();
                let targets = match decision {
                    QuoteDecision::Halted => None,
                    QuoteDecision::Quotes { bid, ask } => Some((
                        bid.offset_ticks(shift, self.tick_size),
                        ask.offset_ticks(shift, self.tick_size),
                    )),
                };
                self.lifecycle
                    .sync_quotes(targets, self.positions.primary(), &mut self.ids)
            }
            Instrument::Future => self
                .hedge
                .on_reference_update(self.positions.hedge_imbalance(), &mut self.ids)
                .into_iter()
                .collect(),
        }
    }

    fn on_trade_ticks(&mut self, instrument: Instrument, ticks: &BookSnapshot) -> Vec<Command> {
        match self.mode {
            StrategyMode::Maker => {
                if instrument == Instrument::Etf {
                    self.flow.record(ticks);
                }
                Vec::new()
            }
            StrategyMode::Arb => {
                self.arb.observe_trade(instrument, ticks);
                self.arb_signal().into_iter().collect()
            }
        }
    }

    fn arb_signal(&mut self) -> Option<Command> {
        let order = self.arb.signal(
            self.view.best_bid(Instrument::Etf),
            self.view.best_ask(Instrument::Etf),
            self.positions.primary(),
            self.guard.position_limit(),
            self.tick_size,
        )?;
        // The guard has the last word on size, whatever the model asked for.
        let volume = self
            .guard
            .clamp(order.side, order.volume, self.positions.primary());
        if volume.is_zero() {
            return None;
        }
        let id = self.ids.next_id();
        self.arb.commit(id, ArbOrder { volume, ..order });
        Some(Command::Insert {
            id,
            side: order.side,
            price: order.price,
            volume,
            lifespan: Lifespan::GoodForDay,
        })
    }

    fn on_order_filled(&mut self, id: OrderId, volume: Volume) -> Vec<Command> {
        let side = self
            .lifecycle
            .on_fill(id, volume)
            .or_else(|| self.arb.on_fill(id, volume));
        let Some(side) = side else {
            warn!(%id, "fill for unknown order");
            return Vec::new();
        };
        self.positions.apply_primary_fill(side, volume);
        vec![self.hedge.on_primary_fill(side, volume, &mut self.ids)]
    }

    fn on_order_status(&mut self, id: OrderId, remaining: Volume) -> Vec<Command> {
        if self.lifecycle.owns(id) {
            return self.lifecycle.on_order_status(
                id,
                remaining,
                self.positions.primary(),
                &mut self.ids,
            );
        }
        if self.arb.owns(id) && remaining.is_zero() {
            self.arb.on_terminal(id);
        }
        Vec::new()
    }

    fn on_hedge_filled(&mut self, id: OrderId, volume: Volume) {
        let Some(side) = self.hedge.on_hedge_fill(id, volume) else {
            warn!(%id, "hedge fill for unknown order");
            return;
        };
        self.positions.apply_hedge_fill(side, volume);
        self.hedge.observe_balance(self.positions.hedge_imbalance());
    }

    fn on_error(&mut self, id: Option<OrderId>, message: &str) -> Vec<Command> {
        let Some(id) = id else {
            warn!(message, "venue error");
            return Vec::new();
        };
        warn!(%id, message, "venue order error");
        if self.lifecycle.owns(id) {
            return self
                .lifecycle
                .on_order_error(id, self.positions.primary(), &mut self.ids);
        }
        if self.arb.owns(id) {
            self.arb.on_terminal(id);
        } else if self.hedge.owns(id) {
            self.hedge.on_order_error(id);
        }
        Vec::new()
    }
}
