//! The player ship controller.
//!
//! [`PlayerShip`] owns every piece of per-ship combat state and advances it
//! once per tick in a fixed order:
//!
//! 1. movement (clamped to the screen bounds)
//! 2. buff timers count down and expire
//! 3. passive heat dissipation, only while the trigger is idle
//! 4. the fire scheduler runs; each due pulse calls [`Spaceship::shoot`]
//! 5. the heat fraction is pushed to the indicator
//!
//! The outside world is reached only through the collaborator traits below,
//! so the whole tick runs headless in unit tests.

use super::buff::{BuffTimer, GrantOutcome};
use super::heat::WeaponHeat;
use super::movement::{self, MovementBounds, ViewportProjector};
use super::scheduler::{FireScheduler, Trigger};
use super::spawn_plan::{plan_pulse, Direction, ProjectileSpec, SpawnDescriptor};
use crate::config::ShipConfig;
use crate::error::{ShipError, ShipResult};
use bevy::prelude::*;

// ── Collaborators ─────────────────────────────────────────────────────────────

/// Instantiates planned projectiles and removes them after their lifetime.
pub trait ProjectileSpawner {
    type Handle;

    fn spawn(&mut self, origin: Vec2, descriptor: &SpawnDescriptor) -> Self::Handle;
    fn schedule_destroy(&mut self, handle: Self::Handle, after_secs: f32);
}

/// Sound effects the ship can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Shoot,
}

/// Fire-and-forget audio playback.
pub trait ShotAudio {
    fn play_one_shot(&mut self, cue: SoundCue, position: Vec2, volume: f32);
}

/// Read-only consumer of the normalised weapon heat, `[0, 1]`.
pub trait HeatIndicator {
    fn set_fraction(&mut self, value: f32);
}

/// Notified once when the ship is destroyed.
pub trait GameOverListener {
    fn on_game_over(&mut self);
}

/// Everything a tick writes to.
pub trait ShipEnvironment: ProjectileSpawner + ShotAudio + HeatIndicator {}

impl<T: ProjectileSpawner + ShotAudio + HeatIndicator> ShipEnvironment for T {}

/// Capability contract shared by every ship kind.
pub trait Spaceship {
    /// Evaluate the trigger for this tick and shoot every pulse that is due.
    fn fire(&mut self, trigger: Trigger, dt: f32, env: &mut impl ShipEnvironment) -> FireReport;

    /// Fire a single pulse in `direction`.
    fn shoot(&mut self, direction: Direction, env: &mut impl ShipEnvironment) -> ShotOutcome;

    fn on_death(&mut self, listener: &mut impl GameOverListener);
}

// ── Input / Reports ───────────────────────────────────────────────────────────

/// Immutable input snapshot for one tick.
///
/// Input systems write this resource once per frame; tests populate it
/// directly to drive the ship without a real input device.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct ShipInput {
    /// Horizontal / vertical axis, each in `[-1, 1]`.
    pub axis: Vec2,
    /// Fire button went down this frame.
    pub fire_pressed: bool,
    /// Fire button went up this frame.
    pub fire_released: bool,
}

impl ShipInput {
    #[inline]
    pub fn trigger(&self) -> Trigger {
        Trigger {
            pressed: self.fire_pressed,
            released: self.fire_released,
        }
    }
}

/// Result of one [`Spaceship::shoot`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotOutcome {
    Fired { beams: usize, overheated: bool },
    /// Weapon overheated (or ship dead): nothing spawned, no heat added.
    Suppressed,
}

/// Pulses evaluated during one [`Spaceship::fire`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FireReport {
    pub pulses: u32,
    pub beams_spawned: u32,
    pub suppressed_pulses: u32,
    pub overheated: bool,
}

/// Summary of one [`PlayerShip::tick`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickReport {
    pub fire: FireReport,
    pub position: Vec2,
    pub heat_fraction: f32,
}

// ── Controller ────────────────────────────────────────────────────────────────

/// Player ship state: position, buffs, weapon heat, fire scheduler.
#[derive(Component, Debug, Clone)]
pub struct PlayerShip {
    position: Vec2,
    bounds: MovementBounds,
    move_speed: f32,
    firing_delay: f32,
    fire_rate: BuffTimer,
    laser_size: BuffTimer,
    triple_shot: BuffTimer,
    heat: WeaponHeat,
    scheduler: FireScheduler,
    projectile: ProjectileSpec,
    shoot_volume: f32,
    alive: bool,
}

impl PlayerShip {
    /// Build a ship at `position` (clamped into `bounds`).
    pub fn new(config: &ShipConfig, bounds: MovementBounds, position: Vec2) -> ShipResult<Self> {
        config.validate()?;
        Ok(Self {
            position: bounds.clamp(position),
            bounds,
            move_speed: config.move_speed,
            firing_delay: config.firing_delay,
            fire_rate: BuffTimer::fire_rate(),
            laser_size: BuffTimer::laser_size(config.laser_size_expiry_threshold),
            triple_shot: BuffTimer::triple_shot(),
            heat: WeaponHeat::new(
                config.overheat_threshold,
                config.overheat_cooldown,
                config.heat_dissipation_rate,
                config.heat_per_shot,
            ),
            scheduler: FireScheduler::default(),
            projectile: ProjectileSpec {
                speed: config.projectile_speed,
                damage: config.projectile_damage,
                lifetime: config.projectile_lifetime,
            },
            shoot_volume: config.shoot_sound_volume,
            alive: true,
        })
    }

    /// Build a ship whose bounds come from the camera viewport, minus padding.
    pub fn from_viewport(
        config: &ShipConfig,
        projector: &impl ViewportProjector,
        position: Vec2,
    ) -> ShipResult<Self> {
        let bounds = MovementBounds::from_viewport(projector, config.padding)?;
        Self::new(config, bounds, position)
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    pub fn bounds(&self) -> &MovementBounds {
        &self.bounds
    }

    #[inline]
    pub fn heat(&self) -> &WeaponHeat {
        &self.heat
    }

    #[inline]
    pub fn fire_rate_boost(&self) -> &BuffTimer {
        &self.fire_rate
    }

    #[inline]
    pub fn laser_size_boost(&self) -> &BuffTimer {
        &self.laser_size
    }

    #[inline]
    pub fn triple_laser_boost(&self) -> &BuffTimer {
        &self.triple_shot
    }

    #[inline]
    pub fn scheduler(&self) -> &FireScheduler {
        &self.scheduler
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    // ── Buff grants ───────────────────────────────────────────────────────────

    /// Fire-rate boost: divides the firing delay and scales the heat limits by `magnitude`.
    pub fn give_speed_boost(&mut self, magnitude: f32, duration: f32) -> ShipResult<GrantOutcome> {
        let outcome = self.fire_rate.grant(magnitude, duration)?;
        if outcome == GrantOutcome::Replaced {
            self.heat.set_boost_scale(magnitude);
        }
        debug!("[ship] fire-rate boost x{magnitude} for {duration}s: {outcome:?}");
        Ok(outcome)
    }

    /// Laser-size boost: scales every spawned beam by `magnitude`.
    pub fn give_laser_size_boost(
        &mut self,
        magnitude: f32,
        duration: f32,
    ) -> ShipResult<GrantOutcome> {
        let outcome = self.laser_size.grant(magnitude, duration)?;
        debug!("[ship] laser-size boost x{magnitude} for {duration}s: {outcome:?}");
        Ok(outcome)
    }

    /// Triple-shot boost: each pulse fires three beams while the timer runs.
    pub fn give_triple_laser_boost(&mut self, duration: f32) -> ShipResult<GrantOutcome> {
        let outcome = self.triple_shot.grant(1.0, duration)?;
        debug!("[ship] triple-shot for {duration}s: {outcome:?}");
        Ok(outcome)
    }

    // ── Tuning ────────────────────────────────────────────────────────────────

    #[inline]
    pub fn firing_delay(&self) -> f32 {
        self.firing_delay
    }

    /// Replace the unboosted firing delay; returns the stored value.
    pub fn set_firing_delay(&mut self, value: f32) -> ShipResult<f32> {
        if !(value.is_finite() && value > 0.0) {
            return Err(ShipError::InvalidFiringDelay { value });
        }
        self.firing_delay = value;
        Ok(self.firing_delay)
    }

    /// Seconds between pulses with the current fire-rate boost applied.
    #[inline]
    pub fn pulse_interval(&self) -> f32 {
        self.firing_delay / self.fire_rate.magnitude()
    }

    // ── Tick ──────────────────────────────────────────────────────────────────

    /// Advance the ship by `dt` seconds.
    pub fn tick(&mut self, input: &ShipInput, dt: f32, env: &mut impl ShipEnvironment) -> TickReport {
        if !self.alive {
            env.set_fraction(self.heat.fraction());
            return TickReport {
                position: self.position,
                heat_fraction: self.heat.fraction(),
                ..Default::default()
            };
        }

        self.position = movement::step(self.position, input.axis, self.move_speed, dt, &self.bounds);

        self.update_buffs(dt);

        if !self.scheduler.is_firing() {
            self.heat.decay(dt);
        }

        let fire = self.fire(input.trigger(), dt, env);

        let heat_fraction = self.heat.fraction();
        env.set_fraction(heat_fraction);

        TickReport {
            fire,
            position: self.position,
            heat_fraction,
        }
    }

    fn update_buffs(&mut self, dt: f32) {
        for buff in [&mut self.fire_rate, &mut self.laser_size, &mut self.triple_shot] {
            buff.decay_tick(dt);
        }

        if self.fire_rate.expire_if_done() {
            self.heat.set_boost_scale(1.0);
            debug!("[ship] fire-rate boost expired");
        }
        if self.laser_size.expire_if_done() {
            debug!("[ship] laser-size boost expired");
        }
        if self.triple_shot.expire_if_done() {
            debug!("[ship] triple-shot expired");
        }
    }
}

impl Spaceship for PlayerShip {
    fn fire(&mut self, trigger: Trigger, dt: f32, env: &mut impl ShipEnvironment) -> FireReport {
        let was_firing = self.scheduler.is_firing();
        let firing_delay = self.firing_delay;
        let fire_rate = &self.fire_rate;
        let pulses = self
            .scheduler
            .update(trigger, dt, || firing_delay / fire_rate.magnitude());

        match (was_firing, self.scheduler.is_firing()) {
            (false, true) => debug!("[ship] firing started"),
            (true, false) => debug!("[ship] firing stopped"),
            _ => {}
        }

        let mut report = FireReport {
            pulses,
            ..Default::default()
        };
        for _ in 0..pulses {
            match self.shoot(Direction::Up, env) {
                ShotOutcome::Fired { beams, overheated } => {
                    report.beams_spawned += beams as u32;
                    report.overheated |= overheated;
                }
                ShotOutcome::Suppressed => report.suppressed_pulses += 1,
            }
        }
        report
    }

    fn shoot(&mut self, direction: Direction, env: &mut impl ShipEnvironment) -> ShotOutcome {
        if !self.alive || !self.heat.can_fire() {
            return ShotOutcome::Suppressed;
        }

        let plan = plan_pulse(
            self.triple_shot.is_active(),
            self.laser_size.magnitude(),
            direction,
            self.projectile,
        );
        for descriptor in &plan {
            let handle = env.spawn(self.position, descriptor);
            env.schedule_destroy(handle, descriptor.lifetime);
        }

        let overheated = self.heat.accumulate();
        if overheated {
            info!("[ship] weapon overheated; heat jumped to {}", self.heat.heat());
        }

        env.play_one_shot(SoundCue::Shoot, self.position, self.shoot_volume);

        ShotOutcome::Fired {
            beams: plan.len(),
            overheated,
        }
    }

    fn on_death(&mut self, listener: &mut impl GameOverListener) {
        if !self.alive {
            return;
        }
        self.alive = false;
        self.scheduler.cancel();
        info!("[ship] player ship destroyed");
        listener.on_game_over();
    }
}
