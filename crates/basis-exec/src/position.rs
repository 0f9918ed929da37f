//! Signed position tracking.

use basis_core::{Side, Volume};

/// Signed positions on both legs, in lots. Mutated only by fills.
#[derive(Debug, Default, Clone, Copy)]
pub struct PositionBook {
    primary: i64,
    hedge: i64,
}

impl PositionBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn primary(&self) -> i64 {
        self.primary
    }

    pub fn hedge(&self) -> i64 {
        self.hedge
    }

    pub fn apply_primary_fill(&mut self, side: Side, volume: Volume) {
        self.primary += side.sign() * volume.lots() as i64;
    }

    pub fn apply_hedge_fill(&mut self, side: Side, volume: Volume) {
        self.hedge += side.sign() * volume.lots() as i64;
    }

    /// Lots the hedge leg is short of fully offsetting the primary leg.
    /// Positive means more hedge buying is needed.
    pub fn hedge_imbalance(&self) -> i64 {
        -self.primary - self.hedge
    }

    pub fn is_hedged(&self) -> bool {
        self.hedge_imbalance() == 0
    }
}
