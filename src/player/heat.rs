//! Weapon heat: accumulation per pulse, overheat lockout, passive cooling.
//!
//! Crossing the threshold does not cap heat; it *jumps* heat to the cooldown
//! value, which sits at or above the threshold.  The weapon then stays locked
//! until passive dissipation brings heat back under the threshold.
//!
//! While the fire-rate buff runs, threshold and cooldown are both multiplied by
//! the buff magnitude.  The scale is stored as an absolute factor over the base
//! values, so entering and leaving the boost never accumulates rounding drift.

/// Heat state of the ship's primary weapon.
#[derive(Debug, Clone, PartialEq)]
pub struct WeaponHeat {
    heat: f32,
    base_threshold: f32,
    base_cooldown: f32,
    dissipation_rate: f32,
    heat_per_shot: f32,
    boost_scale: f32,
}

impl WeaponHeat {
    pub fn new(threshold: f32, cooldown: f32, dissipation_rate: f32, heat_per_shot: f32) -> Self {
        Self {
            heat: 0.0,
            base_threshold: threshold,
            base_cooldown: cooldown,
            dissipation_rate,
            heat_per_shot,
            boost_scale: 1.0,
        }
    }

    #[inline]
    pub fn heat(&self) -> f32 {
        self.heat
    }

    /// Heat level that locks the weapon, including the current boost scale.
    #[inline]
    pub fn overheat_threshold(&self) -> f32 {
        self.base_threshold * self.boost_scale
    }

    /// Heat level the weapon snaps to on overheat, including the boost scale.
    #[inline]
    pub fn overheat_cooldown(&self) -> f32 {
        self.base_cooldown * self.boost_scale
    }

    #[inline]
    pub fn boost_scale(&self) -> f32 {
        self.boost_scale
    }

    /// Set the fire-rate boost factor applied to threshold and cooldown.
    ///
    /// Called once when a boost starts (or is replaced) and once with `1.0`
    /// when it ends.
    pub fn set_boost_scale(&mut self, scale: f32) {
        self.boost_scale = scale;
    }

    #[inline]
    pub fn can_fire(&self) -> bool {
        self.heat < self.overheat_threshold()
    }

    /// Add the heat of one pulse.  Returns `true` when this pulse overheated
    /// the weapon (heat snapped to the cooldown value).
    pub fn accumulate(&mut self) -> bool {
        self.heat += self.heat_per_shot;
        if self.heat >= self.overheat_threshold() {
            self.heat = self.overheat_cooldown();
            true
        } else {
            false
        }
    }

    /// Passive cooling for `dt` seconds; never drops below zero.
    pub fn decay(&mut self, dt: f32) {
        self.heat = (self.heat - dt * self.dissipation_rate).max(0.0);
    }

    /// Heat as a fraction of the threshold, clamped to `[0, 1]` for display.
    pub fn fraction(&self) -> f32 {
        (self.heat / self.overheat_threshold()).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_heat() -> WeaponHeat {
        WeaponHeat::new(20.0, 25.0, 6.0, 1.0)
    }

    #[test]
    fn accumulates_one_unit_per_pulse() {
        let mut heat = default_heat();
        for expected in 1..=5 {
            assert!(!heat.accumulate());
            assert_eq!(heat.heat(), expected as f32);
        }
    }

    #[test]
    fn crossing_threshold_snaps_to_cooldown_and_locks() {
        let mut heat = default_heat();
        let mut snaps = 0;
        for _ in 0..19 {
            if heat.accumulate() {
                snaps += 1;
            }
        }
        assert_eq!(snaps, 0);
        assert!(heat.can_fire(), "19 heat is still below the threshold");

        assert!(heat.accumulate(), "20th pulse reaches the threshold");
        assert_eq!(heat.heat(), 25.0, "heat jumps to the cooldown value, not capped at 20");
        assert!(!heat.can_fire());
    }

    #[test]
    fn decay_floors_at_zero() {
        let mut heat = default_heat();
        heat.accumulate();
        heat.decay(10.0);
        assert_eq!(heat.heat(), 0.0);
    }

    #[test]
    fn lockout_lasts_until_heat_drops_below_threshold() {
        let mut heat = default_heat();
        for _ in 0..20 {
            heat.accumulate();
        }
        // 25 → 20 at 6/s takes 5/6 s.
        heat.decay(0.8);
        assert!(!heat.can_fire(), "heat {} should still be locked", heat.heat());
        heat.decay(0.1);
        assert!(heat.can_fire(), "heat {} should be unlocked", heat.heat());
    }

    #[test]
    fn fraction_is_clamped_for_display() {
        let mut heat = default_heat();
        assert_eq!(heat.fraction(), 0.0);
        for _ in 0..10 {
            heat.accumulate();
        }
        assert!((heat.fraction() - 0.5).abs() < 1e-6);
        for _ in 0..10 {
            heat.accumulate();
        }
        assert_eq!(heat.fraction(), 1.0, "25/20 must clamp to 1.0");
    }

    #[test]
    fn boost_scales_threshold_and_cooldown() {
        let mut heat = default_heat();
        heat.set_boost_scale(2.0);
        assert_eq!(heat.overheat_threshold(), 40.0);
        assert_eq!(heat.overheat_cooldown(), 50.0);
        for _ in 0..39 {
            assert!(!heat.accumulate());
        }
        assert!(heat.accumulate());
        assert_eq!(heat.heat(), 50.0);
    }

    #[test]
    fn repeated_boost_transitions_do_not_drift() {
        let mut heat = default_heat();
        for scale in [2.0, 3.0, 1.7, 0.5, 2.0] {
            heat.set_boost_scale(scale);
            heat.set_boost_scale(1.0);
        }
        assert_eq!(heat.overheat_threshold(), 20.0);
        assert_eq!(heat.overheat_cooldown(), 25.0);
    }
}
