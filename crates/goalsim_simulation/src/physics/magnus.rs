//! Magnus effect: боковая сила на вращающемся мяче
//!
//! Упрощённая модель: F = k · (ω × v). Без плотности воздуха и площади
//! сечения: k подбирается под ощущение полёта, не под аэродинамику.
//!
//! Система работает в GoalSimSet::PreStep, т.е. до Rapier step того же тика:
//! сила входит в velocity update именно этого шага.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

/// Регистрация entity в pre-step списке Magnus
///
/// Пока компонент есть: сила пересчитывается каждый тик.
/// Удаление компонента (или despawn) = отписка.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct MagnusEffect {
    pub coefficient: f32,
}

impl Default for MagnusEffect {
    fn default() -> Self {
        Self { coefficient: 0.2 }
    }
}

/// F = k · (ω × v)
///
/// Ноль если ω ∥ v или любой из векторов нулевой.
pub fn magnus_force(angular_velocity: Vec3, linear_velocity: Vec3, coefficient: f32) -> Vec3 {
    angular_velocity.cross(linear_velocity) * coefficient
}

/// Pre-step listener: пересчитывает ExternalForce по текущим скоростям
///
/// ExternalForce в Rapier не сбрасывается между шагами, поэтому силу
/// перезаписываем каждый тик (а не прибавляем).
/// Нет Velocity или NaN → силу этого тика обнуляем и пропускаем.
pub fn apply_magnus_effect(
    mut bodies: Query<(
        &MagnusEffect,
        Option<&Velocity>,
        &GlobalTransform,
        &mut ExternalForce,
    )>,
) {
    for (magnus, velocity, transform, mut external_force) in bodies.iter_mut() {
        let Some(velocity) = velocity else {
            *external_force = ExternalForce::default();
            continue;
        };

        if !velocity.linvel.is_finite() || !velocity.angvel.is_finite() {
            *external_force = ExternalForce::default();
            continue;
        }

        let force = magnus_force(velocity.angvel, velocity.linvel, magnus.coefficient);
        // Точка приложения = центр мяча → torque нулевой
        let position = transform.translation();
        *external_force = ExternalForce::at_point(force, position, position);
    }
}

/// Отписка: после удаления MagnusEffect последняя сила не должна висеть на теле
pub fn clear_unregistered_magnus_force(
    mut removed: RemovedComponents<MagnusEffect>,
    mut forces: Query<&mut ExternalForce, Without<MagnusEffect>>,
) {
    for entity in removed.read() {
        if let Ok(mut external_force) = forces.get_mut(entity) {
            *external_force = ExternalForce::default();
        }
    }
}
