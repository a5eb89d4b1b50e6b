//! Physics layer: Rapier backend + pre-step listeners
//!
//! Порядок одного тика (PostUpdate, один Rapier step на app.update()):
//! 1. GoalSimSet::Commands: shoot/reset/kick, recovery упавшего мяча
//! 2. GoalSimSet::PreStep: pre-step listeners (Magnus), в порядке регистрации
//! 3. PhysicsSet::SyncBackend → StepSimulation → Writeback (Rapier)

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::config::GoalSimConfig;
use crate::error::GoalSimError;
use crate::logger;

pub mod collision_layers;
pub mod joints;
pub mod magnus;

pub use joints::{JointAnchors, JointKind, JointSpec};
pub use magnus::{apply_magnus_effect, clear_unregistered_magnus_force, magnus_force, MagnusEffect};

/// Фазы симуляции перед Rapier step
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GoalSimSet {
    Commands,
    PreStep,
}

/// Состояние physics backend (проверяется один раз на Startup)
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PhysicsAvailability {
    #[default]
    Pending,
    Available,
    Unavailable,
}

/// Run condition для всех систем, которым нужен Rapier
pub fn physics_available(availability: Res<PhysicsAvailability>) -> bool {
    *availability == PhysicsAvailability::Available
}

/// Plugin: Rapier + TimestepMode + system sets
pub struct GoalSimPhysicsPlugin {
    /// false → хост уже добавил RapierPhysicsPlugin сам
    pub install_backend: bool,
}

impl Default for GoalSimPhysicsPlugin {
    fn default() -> Self {
        Self {
            install_backend: true,
        }
    }
}

impl Plugin for GoalSimPhysicsPlugin {
    fn build(&self, app: &mut App) {
        if self.install_backend {
            app.add_plugins(RapierPhysicsPlugin::<NoUserData>::default());
        }

        let physics = app
            .world()
            .get_resource::<GoalSimConfig>()
            .map(|config| config.physics.clone())
            .unwrap_or_default();

        // Фиксированный шаг: ровно один step на app.update(), независимо от real time
        app.insert_resource(TimestepMode::Fixed {
            dt: physics.dt,
            substeps: physics.substeps,
        });

        app.init_resource::<PhysicsAvailability>();

        app.configure_sets(
            PostUpdate,
            (GoalSimSet::Commands, GoalSimSet::PreStep)
                .chain()
                .before(PhysicsSet::SyncBackend)
                .run_if(physics_available),
        );

        app.add_systems(Startup, verify_physics_backend);

        app.add_systems(
            PostUpdate,
            (apply_magnus_effect, clear_unregistered_magnus_force)
                .chain()
                .in_set(GoalSimSet::PreStep),
        );
    }
}

/// Проверка что Rapier context создан (PreStartup) + применение gravity
///
/// Нет context → PhysicsEngineUnavailable, логируем один раз,
/// все системы из GoalSimSet больше не запускаются.
pub fn verify_physics_backend(
    mut availability: ResMut<PhysicsAvailability>,
    mut rapier_configs: Query<&mut RapierConfiguration>,
    config: Option<Res<GoalSimConfig>>,
) {
    if rapier_configs.is_empty() {
        *availability = PhysicsAvailability::Unavailable;
        logger::log_error(&format!("{}", GoalSimError::PhysicsEngineUnavailable));
        return;
    }

    let gravity = config
        .map(|config| config.physics.gravity())
        .unwrap_or(Vec3::new(0.0, -9.82, 0.0));

    for mut rapier_config in rapier_configs.iter_mut() {
        rapier_config.gravity = gravity;
    }

    *availability = PhysicsAvailability::Available;
    logger::log_info(&format!("Physics initialized with Rapier (gravity {:?})", gravity));
}
