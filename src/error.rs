//! Ship-specific error types.
//!
//! The simulation core reports rejected configuration and rejected buff grants
//! through these types instead of panicking; Bevy systems log them and carry on.

use crate::player::BuffKind;
use std::fmt;

/// Top-level error enum for the player ship core.
#[derive(Debug, Clone, PartialEq)]
pub enum ShipError {
    /// A buff grant asked for a magnitude that is not strictly positive.
    ///
    /// A zero fire-rate magnitude would divide the firing delay by zero.
    InvalidBoostMagnitude {
        /// Buff category the grant targeted.
        buff: BuffKind,
        /// The rejected magnitude.
        magnitude: f32,
    },

    /// The firing delay must be strictly positive and finite.
    InvalidFiringDelay { value: f32 },

    /// Padding swallowed the whole viewport on one axis, leaving no room to move.
    DegenerateBounds {
        /// Axis name (`"x"` or `"y"`).
        axis: &'static str,
        min: f32,
        max: f32,
    },

    /// A configuration constant is outside its safe operating range.
    UnsafeConstant {
        /// Name of the constant (for logging).
        name: &'static str,
        /// The value that was rejected.
        value: f32,
        /// Human-readable description of the safe range.
        safe_range: &'static str,
    },

    /// The configuration file could not be parsed.
    ConfigParse { path: String, message: String },
}

impl fmt::Display for ShipError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShipError::InvalidBoostMagnitude { buff, magnitude } => write!(
                f,
                "{} boost magnitude must be > 0, got {}",
                buff.label(),
                magnitude
            ),
            ShipError::InvalidFiringDelay { value } => {
                write!(f, "firing delay must be a positive number of seconds, got {}", value)
            }
            ShipError::DegenerateBounds { axis, min, max } => write!(
                f,
                "movement bounds collapsed on the {} axis: min {} > max {} (padding too large)",
                axis, min, max
            ),
            ShipError::UnsafeConstant {
                name,
                value,
                safe_range,
            } => write!(
                f,
                "constant '{}' = {} is outside safe range {}",
                name, value, safe_range
            ),
            ShipError::ConfigParse { path, message } => {
                write!(f, "failed to parse {}: {}", path, message)
            }
        }
    }
}

impl std::error::Error for ShipError {}

/// Convenience alias: a `Result` using `ShipError` as the error type.
pub type ShipResult<T> = Result<T, ShipError>;

// ── Validation helpers ────────────────────────────────────────────────────────

/// Returns an error unless `value` is finite and strictly positive.
pub fn require_positive(name: &'static str, value: f32) -> ShipResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ShipError::UnsafeConstant {
            name,
            value,
            safe_range: "(0.0, ∞)",
        })
    }
}

/// Returns an error unless `value` is finite and not negative.
pub fn require_non_negative(name: &'static str, value: f32) -> ShipResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ShipError::UnsafeConstant {
            name,
            value,
            safe_range: "[0.0, ∞)",
        })
    }
}
