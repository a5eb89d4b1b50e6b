use bevy::prelude::*;
use goalsim_simulation::{GoalSimConfig, GoalSimPlugin};

mod camera;
mod input;
mod rendering;

use camera::CameraPlugin;
use input::BallInputPlugin;
use rendering::RenderingSyncPlugin;

fn main() {
    // Первый аргумент: путь к JSON конфигу (иначе defaults)
    let config = match std::env::args().nth(1) {
        Some(path) => match GoalSimConfig::load(&path) {
            Ok(config) => config,
            Err(err) => {
                goalsim_simulation::log_error(&format!("Config {}: {}", path, err));
                std::process::exit(1);
            }
        },
        None => GoalSimConfig::default(),
    };

    goalsim_simulation::init_logger();

    App::new()
        // Bevy defaults (rendering, input, time, etc.)
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "GoalSim".to_string(),
                resolution: (1280., 720.).into(),
                ..default()
            }),
            ..default()
        }))
        // Simulation: Rapier + мяч + ворота
        .add_plugins(GoalSimPlugin::new(config))
        // Rendering sync (simulation → visuals)
        .add_plugins(RenderingSyncPlugin)
        // Camera controls
        .add_plugins(CameraPlugin)
        // Keyboard → BallCommand
        .add_plugins(BallInputPlugin)
        .add_systems(Startup, setup_scene)
        .run();
}

/// Lights + camera; газон, мяч и ворота спавнит GoalSimPlugin
fn setup_scene(mut commands: Commands, config: Res<GoalSimConfig>) {
    // Directional light (sun)
    commands.spawn((
        DirectionalLight {
            illuminance: 10000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_rotation_x(-std::f32::consts::FRAC_PI_4)),
    ));

    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 0.3,
        affects_lightmapped_meshes: false,
    });

    // Камера за мячом, смотрит на ворота
    let ball = config.ball.start_position();
    let goal = config.goal.position();
    let focus = ball.lerp(goal, 0.5) + Vec3::Y;

    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 8.0, -10.0).looking_at(focus, Vec3::Y),
        camera::OrbitCamera {
            focus,
            distance: 25.0,
            yaw: std::f32::consts::PI - 0.4,
            ..default()
        },
    ));
}
