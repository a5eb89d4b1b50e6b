use bevy::input::mouse::{MouseMotion, MouseWheel};
use bevy::prelude::*;
use goalsim_simulation::Ball;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (orbit_camera_controls, follow_ball, update_camera_transform).chain(),
        );
    }
}

#[derive(Component)]
pub struct OrbitCamera {
    pub focus: Vec3,
    pub distance: f32,
    pub yaw: f32,   // Horizontal rotation (radians)
    pub pitch: f32, // Vertical rotation (radians)
    pub sensitivity: f32,
    pub zoom_speed: f32,
    /// F: фокус следует за мячом
    pub follow_ball: bool,
    /// Доля расстояния до мяча, проходимая за секунду
    pub follow_rate: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            focus: Vec3::ZERO,
            distance: 25.0,
            yaw: std::f32::consts::PI,          // за мячом, смотрит на +z
            pitch: std::f32::consts::FRAC_PI_6, // 30°
            sensitivity: 0.005,
            zoom_speed: 1.5,
            follow_ball: false,
            follow_rate: 3.0,
        }
    }
}

/// ПКМ: orbit, колесо: zoom, F: follow on/off
fn orbit_camera_controls(
    mut query: Query<&mut OrbitCamera>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    keys: Res<ButtonInput<KeyCode>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut mouse_wheel: EventReader<MouseWheel>,
) {
    let mut camera = match query.single_mut() {
        Ok(cam) => cam,
        Err(_) => return,
    };

    if mouse_buttons.pressed(MouseButton::Right) {
        for motion in mouse_motion.read() {
            camera.yaw -= motion.delta.x * camera.sensitivity;
            camera.pitch -= motion.delta.y * camera.sensitivity;

            // Не ниже газона и не в зенит
            camera.pitch = camera.pitch.clamp(0.05, std::f32::consts::FRAC_PI_2 - 0.1);
        }
    } else {
        mouse_motion.clear();
    }

    for wheel in mouse_wheel.read() {
        camera.distance -= wheel.y * camera.zoom_speed;
        camera.distance = camera.distance.clamp(3.0, 80.0);
    }

    if keys.just_pressed(KeyCode::KeyF) {
        camera.follow_ball = !camera.follow_ball;
    }
}

/// Плавно тянет focus к мячу (только в follow режиме)
fn follow_ball(
    time: Res<Time>,
    mut cameras: Query<&mut OrbitCamera>,
    balls: Query<&Transform, With<Ball>>,
) {
    let Some(ball) = balls.iter().next() else {
        return;
    };

    for mut camera in cameras.iter_mut() {
        if !camera.follow_ball {
            continue;
        }

        let t = (camera.follow_rate * time.delta_secs()).min(1.0);
        let target = ball.translation;
        if camera.focus.distance_squared(target) > 1e-6 {
            camera.focus = camera.focus.lerp(target, t);
        }
    }
}

/// Позиция камеры из сферических координат вокруг focus
fn update_camera_transform(mut query: Query<(&OrbitCamera, &mut Transform), Changed<OrbitCamera>>) {
    for (camera, mut transform) in query.iter_mut() {
        let x = camera.distance * camera.pitch.cos() * camera.yaw.sin();
        let y = camera.distance * camera.pitch.sin();
        let z = camera.distance * camera.pitch.cos() * camera.yaw.cos();

        let position = camera.focus + Vec3::new(x, y, z);

        *transform = Transform::from_translation(position).looking_at(camera.focus, Vec3::Y);
    }
}
