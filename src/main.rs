use bevy::prelude::*;
use bevy::window::WindowResolution;
use bevy_rapier2d::prelude::*;

use suicide_mission::config::{load_ship_config, ShipConfig, SHIP_CONFIG_PATH};
use suicide_mission::player::{self, BuffPickup, PlayerShipPlugin};

/// Static 2D camera; one world unit spans `pixels_per_unit` screen pixels.
fn setup_camera(mut commands: Commands, config: Res<ShipConfig>) {
    commands.spawn((
        Camera2d,
        Projection::from(OrthographicProjection {
            scale: 1.0 / config.pixels_per_unit,
            ..OrthographicProjection::default_2d()
        }),
    ));
    eprintln!("[SETUP] Camera spawned");
}

/// Disable gravity: lasers are kinematic and nothing else is simulated.
fn setup_physics_config(mut config: Query<&mut RapierConfiguration>) {
    for mut cfg in config.iter_mut() {
        cfg.gravity = Vec2::ZERO;
    }
}

/// Keys 1–3 grant pickups so buffs can be tried without a level.
fn debug_pickup_keys_system(keys: Res<ButtonInput<KeyCode>>, mut pickups: MessageWriter<BuffPickup>) {
    if keys.just_pressed(KeyCode::Digit1) {
        pickups.write(BuffPickup::FireRate {
            magnitude: 2.0,
            duration: 5.0,
        });
    }
    if keys.just_pressed(KeyCode::Digit2) {
        pickups.write(BuffPickup::LaserSize {
            magnitude: 2.0,
            duration: 6.0,
        });
    }
    if keys.just_pressed(KeyCode::Digit3) {
        pickups.write(BuffPickup::TripleShot { duration: 5.0 });
    }
}

fn main() {
    // Load config before the window exists so its size comes from the file too.
    let config = load_ship_config(SHIP_CONFIG_PATH);

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Suicide Mission".into(),
                resolution: WindowResolution::new(
                    config.window_width as u32,
                    config.window_height as u32,
                ),
                resizable: false,
                ..Default::default()
            }),
            ..Default::default()
        }))
        .insert_resource(ClearColor(Color::BLACK))
        .insert_resource(config)
        // pixels_per_meter(1.0) keeps Rapier units identical to world units.
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(1.0))
        .add_plugins(PlayerShipPlugin)
        .add_systems(
            Startup,
            (
                setup_camera,
                setup_physics_config,
                player::load_shot_sound,
                player::spawn_player.after(setup_camera),
            ),
        )
        .add_systems(Update, debug_pickup_keys_system)
        .run();
}
