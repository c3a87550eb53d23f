//! Timed ship buffs: fire-rate, laser-size, and triple-shot.
//!
//! All three categories share one [`BuffTimer`] shape (a magnitude plus a
//! countdown) and differ only in how a new grant combines with an active one
//! and in the remaining-time threshold at which they expire:
//!
//! | Buff | Grant while active | Expires at `remaining <=` |
//! |------|--------------------|---------------------------|
//! | fire-rate | same magnitude → extend, else replace | 0 |
//! | laser-size | same magnitude → extend, else replace | 1 (configurable) |
//! | triple-shot | always extend (magnitude unused) | 0 |
//!
//! Expiry always restores `magnitude = 1.0`, so no buff effect survives its timer.

use crate::constants::BUFF_EXPIRY_THRESHOLD;
use crate::error::{ShipError, ShipResult};

/// Buff category, used for logging and error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuffKind {
    FireRate,
    LaserSize,
    TripleShot,
}

impl BuffKind {
    pub fn label(self) -> &'static str {
        match self {
            BuffKind::FireRate => "fire-rate",
            BuffKind::LaserSize => "laser-size",
            BuffKind::TripleShot => "triple-shot",
        }
    }
}

/// How a grant combines with a buff that is still running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stacking {
    /// Equal magnitude extends the timer; any other magnitude replaces both fields.
    ExtendOrReplace,
    /// Every grant adds its duration; the magnitude never changes.
    Accumulate,
}

/// What a successful [`BuffTimer::grant`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrantOutcome {
    /// Magnitude and remaining time were overwritten.
    Replaced,
    /// Duration was added on top of the remaining time.
    Extended,
    /// Zero or negative duration; nothing changed.
    Ignored,
}

/// Remaining time and strength of one buff category.
#[derive(Debug, Clone, PartialEq)]
pub struct BuffTimer {
    kind: BuffKind,
    magnitude: f32,
    remaining: f32,
    stacking: Stacking,
    expiry_threshold: f32,
}

impl BuffTimer {
    /// Inactive buff (`magnitude = 1`, `remaining = 0`).
    pub fn new(kind: BuffKind, stacking: Stacking, expiry_threshold: f32) -> Self {
        Self {
            kind,
            magnitude: 1.0,
            remaining: 0.0,
            stacking,
            expiry_threshold,
        }
    }

    pub fn fire_rate() -> Self {
        Self::new(BuffKind::FireRate, Stacking::ExtendOrReplace, BUFF_EXPIRY_THRESHOLD)
    }

    pub fn laser_size(expiry_threshold: f32) -> Self {
        Self::new(BuffKind::LaserSize, Stacking::ExtendOrReplace, expiry_threshold)
    }

    pub fn triple_shot() -> Self {
        Self::new(BuffKind::TripleShot, Stacking::Accumulate, BUFF_EXPIRY_THRESHOLD)
    }

    #[inline]
    pub fn kind(&self) -> BuffKind {
        self.kind
    }

    /// Multiplicative strength; `1.0` when inactive.
    #[inline]
    pub fn magnitude(&self) -> f32 {
        self.magnitude
    }

    /// Seconds left on the timer.
    #[inline]
    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.remaining > 0.0
    }

    /// Apply a pickup.
    ///
    /// Magnitudes that are not finite and positive are rejected for
    /// magnitude-carrying buffs;
    /// `magnitude` is ignored for [`Stacking::Accumulate`] buffs.
    pub fn grant(&mut self, magnitude: f32, duration: f32) -> ShipResult<GrantOutcome> {
        if self.stacking == Stacking::ExtendOrReplace
            && !(magnitude.is_finite() && magnitude > 0.0)
        {
            return Err(ShipError::InvalidBoostMagnitude {
                buff: self.kind,
                magnitude,
            });
        }
        if !(duration > 0.0) {
            return Ok(GrantOutcome::Ignored);
        }

        match self.stacking {
            Stacking::Accumulate => {
                self.remaining += duration;
                Ok(GrantOutcome::Extended)
            }
            Stacking::ExtendOrReplace => {
                if self.remaining <= 0.0 || self.magnitude != magnitude {
                    self.magnitude = magnitude;
                    self.remaining = duration;
                    Ok(GrantOutcome::Replaced)
                } else {
                    self.remaining += duration;
                    Ok(GrantOutcome::Extended)
                }
            }
        }
    }

    /// Count the timer down by `dt` seconds while it is running.
    pub fn decay_tick(&mut self, dt: f32) {
        if self.remaining > 0.0 {
            self.remaining -= dt;
        }
    }

    /// Reset to the inactive state once the timer crosses the expiry threshold.
    ///
    /// Returns `true` only on the tick the buff actually ends, i.e. when it was
    /// still carrying a magnitude or remaining time before the reset.
    pub fn expire_if_done(&mut self) -> bool {
        if self.remaining > self.expiry_threshold {
            return false;
        }
        let was_holding = self.magnitude != 1.0 || self.remaining != 0.0;
        self.magnitude = 1.0;
        self.remaining = 0.0;
        was_holding
    }
}
