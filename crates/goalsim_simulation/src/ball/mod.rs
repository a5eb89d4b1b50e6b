//! Мяч: rigid body + Magnus listener + shoot/reset
//!
//! Одно Rapier тело (collision-authoritative), визуал: через RenderProxy.
//! Мяч создаётся один раз; reset только переставляет то же тело.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::config::BallConfig;
use crate::logger;
use crate::physics::collision_layers;
use crate::physics::MagnusEffect;
use crate::render_proxy::{ProxyMaterial, RenderProxy};

pub mod commands;


pub use commands::{handle_ball_commands, recover_fallen_ball, BallAction, BallCommand, ShotPreset};

/// Мяч
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Ball {
    /// Куда возвращается мяч на reset
    pub start_position: Vec3,
    pub radius: f32,
}

impl Default for Ball {
    fn default() -> Self {
        Self {
            start_position: Vec3::new(0.0, 5.0, 0.0),
            radius: 0.5,
        }
    }
}

/// Spawn мяча в `position`
///
/// Тело сразу активно (не засыпает на spawn), MagnusEffect регистрирует
/// pre-step listener.
pub fn spawn_ball(commands: &mut Commands, config: &BallConfig, position: Vec3) -> Entity {
    let radius = config.radius();

    let mut entity = commands.spawn((
        Ball {
            start_position: config.start_position(),
            radius,
        },
        Transform::from_translation(position),
        (
            RigidBody::Dynamic,
            Collider::ball(radius),
            ColliderMassProperties::Mass(config.mass),
            Restitution::coefficient(config.restitution),
            Friction::coefficient(config.friction),
            // Лёгкий damping гасит нефизичный jitter
            Damping {
                linear_damping: config.linear_damping,
                angular_damping: config.angular_damping,
            },
            Velocity::zero(),
            ExternalForce::default(),
            ExternalImpulse::default(),
            Sleeping {
                sleeping: false,
                ..default()
            },
            collision_layers::ball_groups(),
        ),
        MagnusEffect {
            coefficient: config.magnus_coefficient,
        },
        RenderProxy::sphere(radius, ProxyMaterial::Ball),
    ));

    if config.ccd_enabled {
        entity.insert(Ccd::enabled());
    }

    let id = entity.id();
    logger::log_info(&format!("Ball {:?} spawned at {:?}", id, position));
    id
}

/// Удар: импульс в центр мяча + прямое выставление угловой скорости
///
/// Импульс применится на ближайшем Rapier step, ω видна сразу.
/// Величины не валидируются: ответственность вызывающего.
pub fn shoot(
    velocity: &mut Velocity,
    external_impulse: &mut ExternalImpulse,
    linear_impulse: Vec3,
    angular_velocity: Vec3,
) {
    // Импульс в центр масс → без torque
    external_impulse.impulse += linear_impulse;
    velocity.angvel = angular_velocity;
}

/// Возврат на start_position: скорости и ориентация в ноль
///
/// Тело и listener те же. Повторный вызов даёт то же состояние.
pub fn reset(
    ball: &Ball,
    transform: &mut Transform,
    velocity: &mut Velocity,
    external_impulse: &mut ExternalImpulse,
    external_force: &mut ExternalForce,
) {
    transform.translation = ball.start_position;
    transform.rotation = Quat::IDENTITY;
    *velocity = Velocity::zero();
    *external_impulse = ExternalImpulse::default();
    *external_force = ExternalForce::default();
}
