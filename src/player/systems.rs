//! Bevy systems that connect [`PlayerShip`] to the engine.
//!
//! ## Pipeline (runs in order every `Update` frame while `Playing`)
//!
//! 1. [`keyboard_to_input_system`] — captures one [`ShipInput`] snapshot.
//! 2. [`apply_buff_pickups_system`] — turns [`BuffPickup`] messages into grants.
//! 3. [`player_tick_system`] — advances every ship; spawns lasers and sounds.
//! 4. [`heat_indicator_system`] — scales the heat bar from [`HeatGauge`].
//!
//! [`laser_lifetime_system`] and [`player_death_system`] run alongside.
//! Tests populate `ShipInput` directly and skip step 1.

use super::ship::{
    GameOverListener, HeatIndicator, PlayerShip, ProjectileSpawner, ShipInput, ShotAudio,
    SoundCue, Spaceship,
};
use super::spawn_plan::SpawnDescriptor;
use crate::config::ShipConfig;
use bevy::audio::{AudioPlayer, AudioSource, PlaybackSettings, Volume};
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

// ── Components / Resources / Messages ─────────────────────────────────────────

/// A laser beam in flight.
#[derive(Component, Debug, Clone, Copy)]
pub struct Laser {
    pub damage: f32,
}

/// Counts down to despawn.
#[derive(Component, Debug, Clone, Copy)]
pub struct Lifetime {
    pub remaining: f32,
}

/// Heat bar sprite.  Its Y scale tracks [`HeatGauge`] and it grows upward
/// from `bottom`, so the sprite is re-centred as it scales.
#[derive(Component, Debug, Clone, Copy)]
pub struct HeatIndicatorBar {
    /// World-space Y of the bar's bottom edge.
    pub bottom: f32,
    /// Bar height at full heat (world units).
    pub height: f32,
}

/// Last heat fraction reported by the player ship, `[0, 1]`.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct HeatGauge(pub f32);

/// Shot sound; `None` when the asset is not shipped.
#[derive(Resource, Default)]
pub struct ShotSound(pub Option<Handle<AudioSource>>);

/// Buff pickup collected by the player.
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub enum BuffPickup {
    FireRate { magnitude: f32, duration: f32 },
    LaserSize { magnitude: f32, duration: f32 },
    TripleShot { duration: f32 },
}

/// The ship's hull reached zero (sent by whatever owns ship health).
#[derive(Message, Debug, Clone, Copy)]
pub struct ShipDestroyed {
    pub ship: Entity,
}

/// Top-level session flow.
#[derive(States, Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SessionState {
    #[default]
    Playing,
    GameOver,
}

// ── Engine adapters ───────────────────────────────────────────────────────────

/// Collaborator implementation backed by `Commands`.
struct CommandsEnvironment<'a, 'w, 's> {
    commands: &'a mut Commands<'w, 's>,
    config: &'a ShipConfig,
    sound: Option<&'a Handle<AudioSource>>,
    heat_fraction: f32,
}

impl ProjectileSpawner for CommandsEnvironment<'_, '_, '_> {
    type Handle = Entity;

    fn spawn(&mut self, origin: Vec2, descriptor: &SpawnDescriptor) -> Entity {
        let size = Vec2::new(self.config.laser_sprite_width, self.config.laser_sprite_height);
        self.commands
            .spawn((
                Laser {
                    damage: descriptor.damage,
                },
                Sprite::from_color(Color::srgb(1.0, 0.25, 0.2), size),
                Transform::from_translation(descriptor.world_position(origin).extend(0.0))
                    .with_scale(Vec3::new(descriptor.scale, descriptor.scale, 1.0)),
                Visibility::default(),
                RigidBody::KinematicVelocityBased,
                Velocity {
                    linvel: descriptor.velocity(),
                    angvel: 0.0,
                },
                // Sensor: lasers report hits but never push what they touch.
                Collider::ball(self.config.projectile_collider_radius),
                Sensor,
                ActiveEvents::COLLISION_EVENTS,
            ))
            .id()
    }

    fn schedule_destroy(&mut self, handle: Entity, after_secs: f32) {
        self.commands.entity(handle).insert(Lifetime {
            remaining: after_secs,
        });
    }
}

impl ShotAudio for CommandsEnvironment<'_, '_, '_> {
    fn play_one_shot(&mut self, cue: SoundCue, position: Vec2, volume: f32) {
        let Some(handle) = self.sound else {
            return;
        };
        match cue {
            SoundCue::Shoot => {
                self.commands.spawn((
                    AudioPlayer::new(handle.clone()),
                    PlaybackSettings::DESPAWN.with_volume(Volume::Linear(volume)),
                    Transform::from_translation(position.extend(0.0)),
                ));
            }
        }
    }
}

impl HeatIndicator for CommandsEnvironment<'_, '_, '_> {
    fn set_fraction(&mut self, value: f32) {
        self.heat_fraction = value;
    }
}

/// Routes the ship's death to the session state machine.
struct SessionGameOver<'a> {
    next: &'a mut NextState<SessionState>,
}

impl GameOverListener for SessionGameOver<'_> {
    fn on_game_over(&mut self) {
        self.next.set(SessionState::GameOver);
    }
}

// ── Step 1: Input ─────────────────────────────────────────────────────────────

/// Capture arrows / WASD and Space / left mouse into [`ShipInput`].
pub fn keyboard_to_input_system(
    keys: Res<ButtonInput<KeyCode>>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut input: ResMut<ShipInput>,
) {
    let axis_of = |neg: [KeyCode; 2], pos: [KeyCode; 2]| -> f32 {
        let mut value = 0.0;
        if keys.any_pressed(neg) {
            value -= 1.0;
        }
        if keys.any_pressed(pos) {
            value += 1.0;
        }
        value
    };

    *input = ShipInput {
        axis: Vec2::new(
            axis_of([KeyCode::ArrowLeft, KeyCode::KeyA], [KeyCode::ArrowRight, KeyCode::KeyD]),
            axis_of([KeyCode::ArrowDown, KeyCode::KeyS], [KeyCode::ArrowUp, KeyCode::KeyW]),
        ),
        fire_pressed: keys.just_pressed(KeyCode::Space)
            || mouse_buttons.just_pressed(MouseButton::Left),
        fire_released: keys.just_released(KeyCode::Space)
            || mouse_buttons.just_released(MouseButton::Left),
    };
}

// ── Step 2: Pickups ───────────────────────────────────────────────────────────

/// Apply every pending [`BuffPickup`] to every player ship.
///
/// Rejected grants (non-positive magnitude) are logged and dropped.
pub fn apply_buff_pickups_system(
    mut pickups: MessageReader<BuffPickup>,
    mut ships: Query<&mut PlayerShip>,
) {
    for pickup in pickups.read() {
        for mut ship in ships.iter_mut() {
            let result = match *pickup {
                BuffPickup::FireRate {
                    magnitude,
                    duration,
                } => ship.give_speed_boost(magnitude, duration),
                BuffPickup::LaserSize {
                    magnitude,
                    duration,
                } => ship.give_laser_size_boost(magnitude, duration),
                BuffPickup::TripleShot { duration } => ship.give_triple_laser_boost(duration),
            };
            if let Err(e) = result {
                warn!("[pickup] ignored {pickup:?}: {e}");
            }
        }
    }
}

// ── Step 3: Tick ──────────────────────────────────────────────────────────────

/// Advance every player ship by one frame and mirror its position to `Transform`.
pub fn player_tick_system(
    mut commands: Commands,
    mut ships: Query<(&mut PlayerShip, &mut Transform)>,
    input: Res<ShipInput>,
    sound: Res<ShotSound>,
    config: Res<ShipConfig>,
    mut gauge: ResMut<HeatGauge>,
    time: Res<Time>,
) {
    let dt = time.delta_secs();
    for (mut ship, mut transform) in ships.iter_mut() {
        let mut env = CommandsEnvironment {
            commands: &mut commands,
            config: &config,
            sound: sound.0.as_ref(),
            heat_fraction: gauge.0,
        };
        let report = ship.tick(&input, dt, &mut env);
        gauge.0 = env.heat_fraction;

        transform.translation.x = report.position.x;
        transform.translation.y = report.position.y;
    }
}

// ── Step 4: Heat bar ──────────────────────────────────────────────────────────

/// Stretch the heat bar upward from its bottom edge to the current heat fraction.
pub fn heat_indicator_system(
    gauge: Res<HeatGauge>,
    mut bars: Query<(&HeatIndicatorBar, &mut Transform)>,
) {
    let fraction = gauge.0.clamp(0.0, 1.0);
    for (bar, mut transform) in bars.iter_mut() {
        transform.scale = Vec3::new(1.0, fraction, 1.0);
        transform.translation.y = bar.bottom + bar.height * fraction * 0.5;
    }
}

// ── Lasers ────────────────────────────────────────────────────────────────────

/// Count down [`Lifetime`] and despawn expired entities.
pub fn laser_lifetime_system(
    mut commands: Commands,
    mut q: Query<(Entity, &mut Lifetime)>,
    time: Res<Time>,
) {
    let dt = time.delta_secs();
    for (entity, mut lifetime) in q.iter_mut() {
        lifetime.remaining -= dt;
        if lifetime.remaining <= 0.0 {
            commands.entity(entity).despawn();
        }
    }
}

// ── Death ─────────────────────────────────────────────────────────────────────

/// Handle [`ShipDestroyed`]: notify the session and remove the ship.
pub fn player_death_system(
    mut commands: Commands,
    mut destroyed: MessageReader<ShipDestroyed>,
    mut ships: Query<&mut PlayerShip>,
    mut next: ResMut<NextState<SessionState>>,
) {
    for message in destroyed.read() {
        let Ok(mut ship) = ships.get_mut(message.ship) else {
            continue;
        };
        ship.on_death(&mut SessionGameOver { next: &mut next });
        commands.entity(message.ship).despawn();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BAR: HeatIndicatorBar = HeatIndicatorBar {
        bottom: -6.0,
        height: 2.0,
    };

    fn app_with_gauge(fraction: f32) -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(HeatGauge(fraction));
        app.add_systems(Update, heat_indicator_system);
        app
    }

    #[test]
    fn heat_bar_tracks_gauge() {
        let mut app = app_with_gauge(0.4);
        let bar = app.world_mut().spawn((BAR, Transform::default())).id();
        app.update();
        let scale = app.world().get::<Transform>(bar).unwrap().scale;
        assert_eq!(scale, Vec3::new(1.0, 0.4, 1.0));
    }

    #[test]
    fn heat_bar_fills_up_from_its_bottom_edge() {
        for fraction in [0.0, 0.25, 1.0] {
            let mut app = app_with_gauge(fraction);
            let bar = app.world_mut().spawn((BAR, Transform::default())).id();
            app.update();
            let transform = app.world().get::<Transform>(bar).unwrap();
            let bottom_edge = transform.translation.y - BAR.height * transform.scale.y * 0.5;
            assert!(
                (bottom_edge - BAR.bottom).abs() < 1e-5,
                "bottom edge moved to {bottom_edge} at fraction {fraction}"
            );
        }
    }

    #[test]
    fn heat_bar_scale_is_clamped() {
        let mut app = app_with_gauge(3.0);
        let bar = app.world_mut().spawn((BAR, Transform::default())).id();
        app.update();
        let scale = app.world().get::<Transform>(bar).unwrap().scale;
        assert_eq!(scale.y, 1.0);
    }

    #[test]
    fn keyboard_snapshot_reads_fire_edges_and_axes() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        let mut keys = ButtonInput::<KeyCode>::default();
        keys.press(KeyCode::Space);
        keys.press(KeyCode::KeyA);
        keys.press(KeyCode::ArrowUp);
        app.insert_resource(keys);
        app.insert_resource(ButtonInput::<MouseButton>::default());
        app.insert_resource(ShipInput::default());
        app.add_systems(Update, keyboard_to_input_system);
        app.update();

        let input = *app.world().resource::<ShipInput>();
        assert!(input.fire_pressed);
        assert!(!input.fire_released);
        assert_eq!(input.axis, Vec2::new(-1.0, 1.0));
    }
}
