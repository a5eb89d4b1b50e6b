use bevy::prelude::*;
use bevy_rapier3d::prelude::Velocity;
use goalsim_simulation::{log_info, Ball, BallCommand, ShotPreset};

/// Debug kick: толчок вниз по мячу
const KICK_IMPULSE: Vec3 = Vec3::new(0.0, -1.0, 0.0);

pub struct BallInputPlugin;

impl Plugin for BallInputPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(BallDebugTimer(Timer::from_seconds(1.0, TimerMode::Repeating)))
            .add_systems(Update, (keyboard_ball_commands, log_ball_state));
    }
}

#[derive(Resource)]
struct BallDebugTimer(Timer);

/// Space: topspin, ←/→: curve, R: reset, K: kick
fn keyboard_ball_commands(keys: Res<ButtonInput<KeyCode>>, mut commands: EventWriter<BallCommand>) {
    if keys.just_pressed(KeyCode::Space) {
        commands.write(BallCommand::preset(ShotPreset::TopSpin));
    }
    if keys.just_pressed(KeyCode::ArrowLeft) {
        commands.write(BallCommand::preset(ShotPreset::CurveLeft));
    }
    if keys.just_pressed(KeyCode::ArrowRight) {
        commands.write(BallCommand::preset(ShotPreset::CurveRight));
    }
    if keys.just_pressed(KeyCode::KeyR) {
        commands.write(BallCommand::reset());
    }
    if keys.just_pressed(KeyCode::KeyK) {
        commands.write(BallCommand::kick(KICK_IMPULSE));
    }
}

/// Раз в секунду: высота и вертикальная скорость мяча
fn log_ball_state(
    time: Res<Time>,
    mut timer: ResMut<BallDebugTimer>,
    balls: Query<(&Transform, &Velocity), With<Ball>>,
) {
    if !timer.0.tick(time.delta()).just_finished() {
        return;
    }

    for (transform, velocity) in balls.iter() {
        log_info(&format!(
            "Ball y = {:.3}, vy = {:.3}",
            transform.translation.y, velocity.linvel.y
        ));
    }
}
