//! Application configuration.

use crate::error::{BotError, BotResult};
use basis_core::validate_venue;
use basis_mm::{ArbConfig, MakerConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Which strategy the driver runs. Hedging runs in both modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StrategyMode {
    #[default]
    Maker,
    Arb,
}

fn default_tick_size() -> u64 {
    100
}

fn default_position_limit() -> i64 {
    100
}

fn default_max_order_volume() -> u64 {
    100
}

/// Venue trading parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueConfig {
    /// Price grid step, in cents.
    #[serde(default = "default_tick_size")]
    pub tick_size: u64,
    /// Absolute position bound per instrument, in lots.
    #[serde(default = "default_position_limit")]
    pub position_limit: i64,
    /// Per-order volume cap, in lots. Defaults to the position limit, which
    /// makes it inactive.
    #[serde(default = "default_max_order_volume")]
    pub max_order_volume: u64,
}

impl Default for VenueConfig {
    fn default() -> Self {
        Self {
            tick_size: default_tick_size(),
            position_limit: default_position_limit(),
            max_order_volume: default_max_order_volume(),
        }
    }
}

fn default_escalation_threshold() -> u32 {
    200
}

/// Hedge correction parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HedgeConfig {
    /// Reference update cycles an imbalance may persist before a full
    /// corrective hedge fires.
    #[serde(default = "default_escalation_threshold")]
    pub escalation_threshold: u32,
}

impl Default for HedgeConfig {
    fn default() -> Self {
        Self {
            escalation_threshold: default_escalation_threshold(),
        }
    }
}

/// Top-level application configuration, loaded from TOML.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub mode: StrategyMode,
    #[serde(default)]
    pub venue: VenueConfig,
    #[serde(default)]
    pub maker: MakerConfig,
    #[serde(default)]
    pub arb: ArbConfig,
    #[serde(default)]
    pub hedge: HedgeConfig,
}

impl AppConfig {
    /// Load from a TOML file.
    pub fn load(path: &Path) -> BotResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| BotError::Config(format!("failed to read {}: {e}", path.display())))?;
        let cfg: AppConfig = toml::from_str(&content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject parameter combinations the engine cannot trade with.
    pub fn validate(&self) -> BotResult<()> {
        validate_venue(self.venue.tick_size, self.venue.position_limit)?;
        if self.maker.min_spread % self.venue.tick_size != 0 {
            return Err(BotError::InvalidConfig(format!(
                "min_spread {} is not a multiple of tick size {}",
                self.maker.min_spread, self.venue.tick_size
            )));
        }
        if self.venue.max_order_volume == 0 {
            return Err(BotError::InvalidConfig(
                "max_order_volume must be positive".to_string(),
            ));
        }
        if self.arb.lot_size == 0 {
            return Err(BotError::InvalidConfig(
                "arb lot_size must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
