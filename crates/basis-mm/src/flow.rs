//! Traded-flow imbalance tracking.
//!
//! Sums the traded volume on each side of the primary instrument between
//! consecutive book updates. A heavy one-sided flow shifts both quotes one
//! tick toward the pressure; the counters reset on every book update so the
//! shift always reflects the latest inter-snapshot window.

use crate::config::MakerConfig;
use basis_core::BookSnapshot;
use tracing::debug;

/// Per-window traded volume totals for the primary instrument.
#[derive(Debug, Default)]
pub struct FlowTracker {
    /// Lots lifted from the ask side (aggressive buying).
    bought: u64,
    /// Lots hit on the bid side (aggressive selling).
    sold: u64,
}

impl FlowTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulate one trade-tick message.
    pub fn record(&mut self, ticks: &BookSnapshot) {
        for vol in &ticks.ask_volumes {
            self.bought += vol.lots();
        }
        for vol in &ticks.bid_volumes {
            self.sold += vol.lots();
        }
    }

    /// Quote shift in ticks for the current window: positive shifts both
    /// quotes up (selling pressure), negative down (buying pressure).
    pub fn shift_ticks(&self, cfg: &MakerConfig) -> i64 {
        if !cfg.flow_shift_enabled {
            return 0;
        }
        if self.bought <= cfg.flow_threshold && self.sold <= cfg.flow_threshold {
            return 0;
        }
        if self.sold > cfg.flow_ratio * self.bought {
            debug!(bought = self.bought, sold = self.sold, "flow shift up");
            1
        } else if self.bought > cfg.flow_ratio * self.sold {
            debug!(bought = self.bought, sold = self.sold, "flow shift down");
            -1
        } else {
            0
        }
    }

    /// Start a new window; called on every primary book update.
    pub fn reset(&mut self) {
        self.bought = 0;
        self.sold = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use basis_core::{Price, Volume, BOOK_DEPTH};

    fn ticks(bought: u64, sold: u64) -> BookSnapshot {
        let mut snap = BookSnapshot {
            sequence: 1,
            ask_prices: [Price::ZERO; BOOK_DEPTH],
            ask_volumes: [Volume::ZERO; BOOK_DEPTH],
            bid_prices: [Price::ZERO; BOOK_DEPTH],
            bid_volumes: [Volume::ZERO; BOOK_DEPTH],
        };
        snap.ask_volumes[0] = Volume::new(bought);
        snap.bid_volumes[0] = Volume::new(sold);
        snap
    }

    #[test]
    fn test_below_threshold_no_shift() {
        let cfg = MakerConfig::default();
        let mut flow = FlowTracker::new();
        flow.record(&ticks(150, 30));
        assert_eq!(flow.shift_ticks(&cfg), 0);
    }

    #[test]
    fn test_selling_pressure_shifts_up() {
        let cfg = MakerConfig::default();
        let mut flow = FlowTracker::new();
        flow.record(&ticks(50, 250));
        assert_eq!(flow.shift_ticks(&cfg), 1);
    }

    #[test]
    fn test_buying_pressure_shifts_down() {
        let cfg = MakerConfig::default();
        let mut flow = FlowTracker::new();
        flow.record(&ticks(210, 100));
        assert_eq!(flow.shift_ticks(&cfg), -1);
    }

    #[test]
    fn test_balanced_heavy_flow_no_shift() {
        let cfg = MakerConfig::default();
        let mut flow = FlowTracker::new();
        flow.record(&ticks(300, 260));
        assert_eq!(flow.shift_ticks(&cfg), 0);
    }

    #[test]
    fn test_reset_clears_window() {
        let cfg = MakerConfig::default();
        let mut flow = FlowTracker::new();
        flow.record(&ticks(50, 250));
        flow.reset();
        assert_eq!(flow.shift_ticks(&cfg), 0);
    }

    #[test]
    fn test_disabled_shift() {
        let cfg = MakerConfig {
            flow_shift_enabled: false,
            ..MakerConfig::default()
        };
        let mut flow = FlowTracker::new();
        flow.record(&ticks(50, 500));
        assert_eq!(flow.shift_ticks(&cfg), 0);
    }

    #[test]
    fn test_accumulates_across_tick_messages() {
        let cfg = MakerConfig::default();
        let mut flow = FlowTracker::new();
        flow.record(&ticks(10, 120));
        flow.record(&ticks(10, 120));
        assert_eq!(flow.shift_ticks(&cfg), 1);
    }
}
