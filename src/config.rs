//! Runtime ship configuration loaded from `assets/ship.toml`.
//!
//! [`ShipConfig`] is a Bevy [`Resource`] that mirrors every constant in
//! [`crate::constants`].  [`load_ship_config`] reads the TOML file and
//! overwrites the defaults with any values present in it.  Missing keys fall
//! back to the compile-time defaults, so a minimal TOML can override just the
//! values you care about.
//!
//! ## Tuning workflow
//!
//! 1. Edit `assets/ship.toml`.
//! 2. Restart the game — no recompilation required.
//!
//! Keep `src/constants.rs` in sync: it remains the **authoritative default**
//! source used by `ShipConfig::default()`.

use crate::constants::*;
use crate::error::{require_non_negative, require_positive, ShipError, ShipResult};
use bevy::prelude::*;
use serde::Deserialize;

/// Default location of the tuning file, relative to the working directory.
pub const SHIP_CONFIG_PATH: &str = "assets/ship.toml";

/// Runtime-tunable ship and weapon configuration.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ShipConfig {
    // ── Movement ──────────────────────────────────────────────────────────────
    pub move_speed: f32,
    pub padding: f32,

    // ── Firing / Heat ─────────────────────────────────────────────────────────
    pub firing_delay: f32,
    pub overheat_threshold: f32,
    pub overheat_cooldown: f32,
    pub heat_dissipation_rate: f32,
    pub heat_per_shot: f32,

    // ── Projectiles ───────────────────────────────────────────────────────────
    pub projectile_speed: f32,
    pub projectile_damage: f32,
    pub projectile_lifetime: f32,
    pub projectile_collider_radius: f32,
    pub laser_sprite_width: f32,
    pub laser_sprite_height: f32,

    // ── Buffs ─────────────────────────────────────────────────────────────────
    pub laser_size_expiry_threshold: f32,

    // ── Audio ─────────────────────────────────────────────────────────────────
    pub shoot_sound_volume: f32,

    // ── Camera / Window ───────────────────────────────────────────────────────
    pub pixels_per_unit: f32,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for ShipConfig {
    fn default() -> Self {
        Self {
            // Movement
            move_speed: MOVE_SPEED,
            padding: PADDING,
            // Firing / Heat
            firing_delay: FIRING_DELAY,
            overheat_threshold: OVERHEAT_THRESHOLD,
            overheat_cooldown: OVERHEAT_COOLDOWN,
            heat_dissipation_rate: HEAT_DISSIPATION_RATE,
            heat_per_shot: HEAT_PER_SHOT,
            // Projectiles
            projectile_speed: PROJECTILE_SPEED,
            projectile_damage: PROJECTILE_DAMAGE,
            projectile_lifetime: PROJECTILE_LIFETIME,
            projectile_collider_radius: PROJECTILE_COLLIDER_RADIUS,
            laser_sprite_width: LASER_SPRITE_WIDTH,
            laser_sprite_height: LASER_SPRITE_HEIGHT,
            // Buffs
            laser_size_expiry_threshold: LASER_SIZE_EXPIRY_THRESHOLD,
            // Audio
            shoot_sound_volume: SHOOT_SOUND_VOLUME,
            // Camera / Window
            pixels_per_unit: PIXELS_PER_UNIT,
            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,
        }
    }
}

impl ShipConfig {
    /// Parse a (possibly partial) TOML document and validate the result.
    pub fn from_toml_str(contents: &str) -> ShipResult<Self> {
        let config: ShipConfig =
            toml::from_str(contents).map_err(|e| ShipError::ConfigParse {
                path: "<inline>".to_string(),
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Check every value the simulation divides by or relies on for ordering.
    pub fn validate(&self) -> ShipResult<()> {
        require_positive("move_speed", self.move_speed)?;
        require_non_negative("padding", self.padding)?;
        require_positive("firing_delay", self.firing_delay)?;
        require_positive("overheat_threshold", self.overheat_threshold)?;
        require_non_negative("heat_dissipation_rate", self.heat_dissipation_rate)?;
        require_non_negative("heat_per_shot", self.heat_per_shot)?;
        require_positive("projectile_lifetime", self.projectile_lifetime)?;
        require_non_negative("projectile_speed", self.projectile_speed)?;
        require_non_negative("laser_size_expiry_threshold", self.laser_size_expiry_threshold)?;
        require_non_negative("shoot_sound_volume", self.shoot_sound_volume)?;
        require_positive("pixels_per_unit", self.pixels_per_unit)?;
        require_positive("window_width", self.window_width)?;
        require_positive("window_height", self.window_height)?;

        // The snap target has to sit at or above the threshold or the weapon
        // would keep firing right after "overheating".
        if !(self.overheat_cooldown >= self.overheat_threshold) {
            return Err(ShipError::UnsafeConstant {
                name: "overheat_cooldown",
                value: self.overheat_cooldown,
                safe_range: "[overheat_threshold, ∞)",
            });
        }
        Ok(())
    }

    /// Window size in logical pixels.
    #[inline]
    pub fn window_size(&self) -> Vec2 {
        Vec2::new(self.window_width, self.window_height)
    }
}

/// Load `path` into a [`ShipConfig`], falling back to compiled defaults.
///
/// A missing file is not an error.  Parse or validation failures are printed
/// to stderr and the defaults are used instead, so a typo in the tuning file
/// never prevents the game from starting.
pub fn load_ship_config(path: &str) -> ShipConfig {
    match std::fs::read_to_string(path) {
        Ok(contents) => match ShipConfig::from_toml_str(&contents) {
            Ok(loaded) => {
                println!("✓ Loaded ship config from {path}");
                loaded
            }
            Err(e) => {
                eprintln!("⚠ Rejected {path}: {e}; using defaults");
                ShipConfig::default()
            }
        },
        Err(_) => {
            println!("ℹ No {path} found; using compiled defaults");
            ShipConfig::default()
        }
    }
}
