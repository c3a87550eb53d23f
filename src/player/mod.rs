//! Player module: ship controller, weapon heat, buffs, fire scheduling, and
//! the Bevy systems that drive them.
//!
//! ## Sub-module layout
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`buff`] | `BuffTimer` — fire-rate, laser-size, triple-shot timers and stacking |
//! | [`heat`] | `WeaponHeat` — accumulation, overheat snap, passive cooling |
//! | [`scheduler`] | `FireScheduler` — Idle ⇄ Firing pulse scheduling |
//! | [`spawn_plan`] | Beam offsets / scale / velocity for one pulse |
//! | [`movement`] | Screen bounds from the camera viewport, clamped movement |
//! | [`ship`] | `PlayerShip` controller, `Spaceship` trait, collaborator traits |
//! | [`systems`] | Input capture, pickups, tick, lasers, heat bar, death |
//!
//! All public items are re-exported at this level so the rest of the crate
//! can use flat `crate::player::*` imports.

pub mod buff;
pub mod heat;
pub mod movement;
pub mod scheduler;
pub mod ship;
pub mod spawn_plan;
pub mod systems;

// ── Flat re-exports ───────────────────────────────────────────────────────────

pub use buff::{BuffKind, BuffTimer, GrantOutcome, Stacking};
pub use heat::WeaponHeat;
pub use movement::{CameraViewport, MovementBounds, ViewportProjector};
pub use scheduler::{FireScheduler, FireState, Trigger};
pub use ship::{
    FireReport, GameOverListener, HeatIndicator, PlayerShip, ProjectileSpawner, ShipEnvironment,
    ShipInput, ShotAudio, ShotOutcome, SoundCue, Spaceship, TickReport,
};
pub use spawn_plan::{plan_pulse, Direction, ProjectileSpec, SpawnDescriptor};
pub use systems::{
    apply_buff_pickups_system, heat_indicator_system, keyboard_to_input_system,
    laser_lifetime_system, player_death_system, player_tick_system, BuffPickup, HeatGauge,
    HeatIndicatorBar, Laser, Lifetime, SessionState, ShipDestroyed, ShotSound,
};

// ── Plugin ────────────────────────────────────────────────────────────────────

use crate::config::ShipConfig;
use crate::constants::{HEAT_BAR_HEIGHT, HEAT_BAR_WIDTH, SHOOT_SOUND_PATH};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

/// Registers player resources, messages, and the per-frame pipeline.
///
/// Expects a [`ShipConfig`] resource (falls back to defaults) and a states
/// plugin (`DefaultPlugins` or `StatesPlugin`).  Keyboard capture is only
/// wired when an input plugin provides `ButtonInput<KeyCode>`.
pub struct PlayerShipPlugin;

impl Plugin for PlayerShipPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ShipConfig>()
            .init_resource::<ShipInput>()
            .init_resource::<HeatGauge>()
            .init_resource::<ShotSound>()
            .init_state::<SessionState>()
            .add_message::<BuffPickup>()
            .add_message::<ShipDestroyed>()
            .add_systems(
                Update,
                (
                    keyboard_to_input_system
                        .run_if(resource_exists::<ButtonInput<KeyCode>>)
                        .run_if(resource_exists::<ButtonInput<MouseButton>>),
                    apply_buff_pickups_system,
                    player_tick_system,
                    heat_indicator_system,
                )
                    .chain()
                    .run_if(in_state(SessionState::Playing)),
            )
            .add_systems(Update, (laser_lifetime_system, player_death_system));
    }
}

// ── Spawn ─────────────────────────────────────────────────────────────────────

/// Load the shot sound if the asset is shipped; otherwise shots stay silent.
pub fn load_shot_sound(mut sound: ResMut<ShotSound>, asset_server: Res<AssetServer>) {
    if std::path::Path::new("assets").join(SHOOT_SOUND_PATH).exists() {
        sound.0 = Some(asset_server.load(SHOOT_SOUND_PATH));
    } else {
        info!("[setup] {SHOOT_SOUND_PATH} not found; shots are silent");
    }
}

/// Spawn the player ship near the bottom of the screen, plus its heat bar.
///
/// Movement bounds are derived once here from the primary window (or the
/// configured window size when running headless); the camera never moves.
pub fn spawn_player(
    mut commands: Commands,
    config: Res<ShipConfig>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    let window_size = windows
        .single()
        .map(|w| Vec2::new(w.width(), w.height()))
        .unwrap_or_else(|_| config.window_size());
    let viewport = CameraViewport::from_window(Vec2::ZERO, window_size, config.pixels_per_unit);
    let start = viewport.viewport_to_world(0.5, 0.15);

    let ship = match PlayerShip::from_viewport(&config, &viewport, start) {
        Ok(ship) => ship,
        Err(e) => {
            error!("[setup] cannot spawn player ship: {e}");
            return;
        }
    };

    commands.spawn((
        Sprite::from_color(Color::srgb(0.3, 0.8, 1.0), Vec2::new(0.6, 0.6)),
        Transform::from_translation(ship.position().extend(1.0)),
        Visibility::default(),
        ship,
    ));

    // Heat bar in the lower-right corner, empty until the first tick.
    let bar_bottom = viewport.viewport_to_world(0.96, 0.06);
    commands.spawn((
        HeatIndicatorBar {
            bottom: bar_bottom.y,
            height: HEAT_BAR_HEIGHT,
        },
        Sprite::from_color(
            Color::srgb(1.0, 0.45, 0.1),
            Vec2::new(HEAT_BAR_WIDTH, HEAT_BAR_HEIGHT),
        ),
        Transform::from_translation(bar_bottom.extend(2.0)).with_scale(Vec3::new(1.0, 0.0, 1.0)),
        Visibility::default(),
    ));

    println!("✓ Player ship spawned at {start}");
}
