//! Centralised ship and weapon constants.
//!
//! All tuneable values live here so they can be found, reasoned-about, and
//! modified in one place.  [`crate::config::ShipConfig::default`] reads every
//! value from this module; `assets/ship.toml` can override any subset at runtime.

// ── Movement ──────────────────────────────────────────────────────────────────

/// Ship movement speed at full axis deflection (world units per second).
pub const MOVE_SPEED: f32 = 10.0;

/// Distance kept between the ship and every screen edge (world units).
pub const PADDING: f32 = 0.75;

// ── Firing ────────────────────────────────────────────────────────────────────

/// Seconds between firing pulses while the fire button is held (unboosted).
pub const FIRING_DELAY: f32 = 0.1;

/// Heat level at which the weapon locks out.
///
/// At the default delay the weapon fires 10 pulses/s, so a sustained burst
/// overheats after roughly two seconds.
pub const OVERHEAT_THRESHOLD: f32 = 20.0;

/// Heat value the weapon jumps to when it crosses [`OVERHEAT_THRESHOLD`].
///
/// Must be ≥ the threshold, otherwise the snap would not lock the weapon.
/// With the default dissipation rate, 25 → 20 takes ≈ 0.83 s of idling.
pub const OVERHEAT_COOLDOWN: f32 = 25.0;

/// Passive heat dissipation while the trigger is released (heat per second).
pub const HEAT_DISSIPATION_RATE: f32 = 6.0;

/// Heat added by one successful firing pulse, regardless of beam count.
pub const HEAT_PER_SHOT: f32 = 1.0;

/// Upper bound on pulses the fire scheduler releases in a single tick.
///
/// A long frame catches up on missed pulses up to this many; any backlog
/// beyond it is dropped.  Also bounds the work done when the pulse interval
/// collapses towards zero under a huge fire-rate boost.
pub const MAX_PULSES_PER_TICK: u32 = 8;

// ── Projectiles ───────────────────────────────────────────────────────────────

/// Laser travel speed (world units per second).
pub const PROJECTILE_SPEED: f32 = 10.0;

/// Damage carried by every laser beam.
pub const PROJECTILE_DAMAGE: f32 = 100.0;

/// Seconds a laser lives before it is despawned.
pub const PROJECTILE_LIFETIME: f32 = 1.0;

/// Sensor collider radius of a laser at scale 1.0 (world units).
pub const PROJECTILE_COLLIDER_RADIUS: f32 = 0.08;

/// Sprite size of a laser at scale 1.0 (world units).
pub const LASER_SPRITE_WIDTH: f32 = 0.1;
pub const LASER_SPRITE_HEIGHT: f32 = 0.45;

/// Spawn offsets of the three beams of a triple shot, left to right.
pub const TRIPLE_SHOT_OFFSETS: [(f32, f32); 3] = [(-0.3, -0.2), (0.0, 0.0), (0.3, -0.2)];

// ── Buffs ─────────────────────────────────────────────────────────────────────

/// Remaining-time threshold at or below which the fire-rate and triple-shot
/// buffs expire.
pub const BUFF_EXPIRY_THRESHOLD: f32 = 0.0;

/// Remaining-time threshold at or below which the laser-size buff expires.
///
/// The laser-size buff ends one second before its nominal duration runs out.
pub const LASER_SIZE_EXPIRY_THRESHOLD: f32 = 1.0;

// ── HUD ───────────────────────────────────────────────────────────────────────

/// Heat bar size at full heat (world units).  The bar fills upward from its
/// bottom edge.
pub const HEAT_BAR_WIDTH: f32 = 0.15;
pub const HEAT_BAR_HEIGHT: f32 = 2.0;

// ── Audio ─────────────────────────────────────────────────────────────────────

/// Linear playback volume of the shot sound.
pub const SHOOT_SOUND_VOLUME: f32 = 0.25;

/// Asset path of the shot sound, relative to `assets/`.
pub const SHOOT_SOUND_PATH: &str = "sounds/shoot.ogg";

// ── Camera / Window ───────────────────────────────────────────────────────────

/// Screen pixels per world unit; the camera's orthographic scale is the inverse.
pub const PIXELS_PER_UNIT: f32 = 64.0;

/// Default window size in logical pixels (portrait, vertical shooter).
pub const WINDOW_WIDTH: f32 = 576.0;
pub const WINDOW_HEIGHT: f32 = 960.0;
