//! GoalSim Simulation Core
//!
//! Мяч с Magnus effect + ворота с сеткой из цепочек rigid сегментов.
//! Bevy ECS + Rapier (bevy_rapier3d), рендер живёт в отдельном клиенте.
//!
//! Тик (PostUpdate):
//! - GoalSimSet::Commands: shoot/reset/kick, recovery упавшего мяча
//! - GoalSimSet::PreStep: Magnus force
//! - Rapier: SyncBackend → StepSimulation → Writeback

use bevy::prelude::*;

pub mod ball;
pub mod config;
pub mod error;
pub mod goal;
pub mod logger;
pub mod physics;
pub mod pitch;
pub mod render_proxy;

pub use ball::{spawn_ball, Ball, BallAction, BallCommand, ShotPreset};
pub use config::{BallConfig, GoalConfig, GoalDimensions, GoalSimConfig, NetConfig, NetStrategy, PhysicsConfig, PitchConfig};
pub use error::{GoalSimError, Result};
pub use goal::{spawn_goal, FrameBar, FrameBarTag, Goal, GoalFrame, GoalNet, NetLink, NetSegment};
pub use logger::{init_logger, log, log_error, log_info, log_warning};
pub use physics::{
    magnus_force, physics_available, GoalSimPhysicsPlugin, GoalSimSet, JointKind, JointSpec, MagnusEffect,
    PhysicsAvailability,
};
pub use pitch::{spawn_pitch, Pitch};
pub use render_proxy::{ProxyMaterial, ProxyShape, RenderProxy};

/// Главный plugin симуляции
pub struct GoalSimPlugin {
    pub config: GoalSimConfig,
    /// false → хост сам добавил RapierPhysicsPlugin
    pub install_backend: bool,
    /// false → сцену спавнит вызывающий (тесты, кастомные сцены)
    pub spawn_scene: bool,
}

impl Default for GoalSimPlugin {
    fn default() -> Self {
        Self {
            config: GoalSimConfig::default(),
            install_backend: true,
            spawn_scene: true,
        }
    }
}

impl GoalSimPlugin {
    pub fn new(config: GoalSimConfig) -> Self {
        Self {
            config,
            ..default()
        }
    }

    pub fn without_physics_backend(mut self) -> Self {
        self.install_backend = false;
        self
    }

    pub fn without_scene(mut self) -> Self {
        self.spawn_scene = false;
        self
    }
}

impl Plugin for GoalSimPlugin {
    fn build(&self, app: &mut App) {
        let config = validated_or_default(&self.config);

        // Config должен быть в мире до physics plugin (TimestepMode из него)
        app.insert_resource(config)
            .add_event::<BallCommand>()
            .add_plugins(GoalSimPhysicsPlugin {
                install_backend: self.install_backend,
            });

        app.add_systems(
            PostUpdate,
            (ball::recover_fallen_ball, ball::handle_ball_commands)
                .chain()
                .in_set(GoalSimSet::Commands),
        );

        if self.spawn_scene {
            app.add_systems(
                Startup,
                spawn_scene
                    .after(physics::verify_physics_backend)
                    .run_if(physics_available),
            );
        }
    }
}

/// Невалидный config (dt <= 0, пустая сетка, ...) не доходит до Rapier:
/// логируем ошибку и берём defaults
fn validated_or_default(config: &GoalSimConfig) -> GoalSimConfig {
    match config.validate() {
        Ok(()) => config.clone(),
        Err(err) => {
            log_error(&format!("Invalid GoalSim config, falling back to defaults: {}", err));
            GoalSimConfig::default()
        }
    }
}

/// Startup: газон, мяч на start_position, ворота
pub fn spawn_scene(mut commands: Commands, config: Res<GoalSimConfig>) {
    if config.pitch.enabled {
        spawn_pitch(&mut commands, &config.pitch);
    }

    spawn_ball(&mut commands, &config.ball, config.ball.start_position());

    if let Err(err) = spawn_goal(&mut commands, &config.goal, &config.net) {
        log_error(&format!("Goal setup failed: {}", err));
    }
}

/// Создаёт minimal Bevy App для headless симуляции (без GoalSimPlugin)
pub fn create_headless_app() -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins((MinimalPlugins, TransformPlugin));

    app
}

/// Snapshot компонентов T для сравнения детерминизма
pub fn world_snapshot<T>(world: &mut World) -> Vec<u8>
where
    T: Component + std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
