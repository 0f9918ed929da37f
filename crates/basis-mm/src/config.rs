//! Strategy configuration.

use serde::{Deserialize, Serialize};

fn default_min_spread() -> u64 {
    600
}

fn default_flow_threshold() -> u64 {
    200
}

fn default_flow_ratio() -> u64 {
    2
}

fn default_true() -> bool {
    true
}

/// Maker strategy parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MakerConfig {
    /// Minimum spread, in cents, the quote pair must keep.
    #[serde(default = "default_min_spread")]
    pub min_spread: u64,
    /// Traded flow, in lots, below which no quote shift is applied.
    #[serde(default = "default_flow_threshold")]
    pub flow_threshold: u64,
    /// One flow direction must exceed the other by this factor to shift.
    #[serde(default = "default_flow_ratio")]
    pub flow_ratio: u64,
    /// Whether the flow-imbalance shift is applied at all.
    #[serde(default = "default_true")]
    pub flow_shift_enabled: bool,
}

impl Default for MakerConfig {
    fn default() -> Self {
        Self {
            min_spread: default_min_spread(),
            flow_threshold: default_flow_threshold(),
            flow_ratio: default_flow_ratio(),
            flow_shift_enabled: true,
        }
    }
}

fn default_window() -> usize {
    1000
}

fn default_min_samples() -> usize {
    30
}

fn default_lot_size() -> u64 {
    10
}

fn default_max_inflight_volume() -> u64 {
    190
}

fn default_entry_std_devs() -> f64 {
    1.0
}

/// Statistical arbitrage parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArbConfig {
    /// Rolling window capacity for the spread distribution.
    #[serde(default = "default_window")]
    pub window: usize,
    /// Samples required before the model may trade.
    #[serde(default = "default_min_samples")]
    pub min_samples: usize,
    /// Lots per arb order.
    #[serde(default = "default_lot_size")]
    pub lot_size: u64,
    /// Total in-flight arb volume cap, in lots, across both sides.
    #[serde(default = "default_max_inflight_volume")]
    pub max_inflight_volume: u64,
    /// Entry threshold in standard deviations from the rolling mean.
    #[serde(default = "default_entry_std_devs")]
    pub entry_std_devs: f64,
}

impl Default for ArbConfig {
    fn default() -> Self {
        Self {
            window: default_window(),
            min_samples: default_min_samples(),
            lot_size: default_lot_size(),
            max_inflight_volume: default_max_inflight_volume(),
            entry_std_devs: default_entry_std_devs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maker_defaults() {
        let cfg = MakerConfig::default();
        assert_eq!(cfg.min_spread, 600);
        assert_eq!(cfg.flow_threshold, 200);
        assert_eq!(cfg.flow_ratio, 2);
        assert!(cfg.flow_shift_enabled);
    }

    #[test]
    fn test_arb_defaults_from_empty_toml() {
        let cfg: ArbConfig = toml::from_str("").expect("empty config should deserialize");
        assert_eq!(cfg.window, 1000);
        assert_eq!(cfg.min_samples, 30);
        assert_eq!(cfg.lot_size, 10);
        assert_eq!(cfg.max_inflight_volume, 190);
        assert!((cfg.entry_std_devs - 1.0).abs() < f64::EPSILON);
    }
}
