//! Position limit enforcement.

use basis_core::{Side, Volume};

/// Clamps every order's volume so a full fill cannot push the signed
/// position past the venue limit.
#[derive(Debug, Clone, Copy)]
pub struct PositionRiskGuard {
    position_limit: i64,
    max_order_volume: u64,
}

impl PositionRiskGuard {
    pub fn new(position_limit: i64, max_order_volume: u64) -> Self {
        Self {
            position_limit,
            max_order_volume,
        }
    }

    pub fn position_limit(&self) -> i64 {
        self.position_limit
    }

    /// Remaining capacity on a side given the current position, in lots.
    ///
    /// A buy consumes `limit - position`, a sell `limit + position`. A side
    /// already at or past its bound has zero capacity.
    pub fn capacity(&self, side: Side, position: i64) -> u64 {
        let headroom = match side {
            Side::Buy => self.position_limit - position,
            Side::Sell => self.position_limit + position,
        };
        headroom.max(0) as u64
    }

    /// Volume for a quote sized to the full remaining capacity, subject to
    /// the per-order cap. Zero means the side must not be quoted.
    pub fn quote_volume(&self, side: Side, position: i64) -> Volume {
        Volume::new(self.capacity(side, position).min(self.max_order_volume))
    }

    /// Clamp an arbitrary requested volume.
    pub fn clamp(&self, side: Side, raw: Volume, position: i64) -> Volume {
        Volume::new(
            raw.lots()
                .min(self.capacity(side, position))
                .min(self.max_order_volume),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_tracks_position() {
        let guard = PositionRiskGuard::new(100, 100);
        assert_eq!(guard.capacity(Side::Buy, 0), 100);
        assert_eq!(guard.capacity(Side::Sell, 0), 100);
        assert_eq!(guard.capacity(Side::Buy, 40), 60);
        assert_eq!(guard.capacity(Side::Sell, 40), 140);
        assert_eq!(guard.capacity(Side::Buy, -40), 140);
        assert_eq!(guard.capacity(Side::Sell, -40), 60);
    }

    #[test]
    fn test_at_limit_side_gets_zero() {
        let guard = PositionRiskGuard::new(100, 100);
        assert_eq!(guard.quote_volume(Side::Buy, 100), Volume::ZERO);
        assert_eq!(guard.quote_volume(Side::Sell, -100), Volume::ZERO);
        // Past the limit is still zero, never negative.
        assert_eq!(guard.quote_volume(Side::Buy, 120), Volume::ZERO);
    }

    #[test]
    fn test_per_order_cap() {
        let guard = PositionRiskGuard::new(100, 72);
        assert_eq!(guard.quote_volume(Side::Buy, 0), Volume::new(72));
        assert_eq!(guard.quote_volume(Side::Buy, 80), Volume::new(20));
        assert_eq!(
            guard.clamp(Side::Sell, Volume::new(500), 10),
            Volume::new(72)
        );
    }

    #[test]
    fn test_clamp_keeps_small_requests() {
        let guard = PositionRiskGuard::new(100, 100);
        assert_eq!(
            guard.clamp(Side::Buy, Volume::new(10), 0),
            Volume::new(10)
        );
    }
}
