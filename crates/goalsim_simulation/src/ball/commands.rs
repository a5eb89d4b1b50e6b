//! Команды мячу (shoot / kick / reset) от input/driver слоя
//!
//! Применяются в GoalSimSet::Commands: до pre-step listeners и Rapier step,
//! никогда параллельно с Magnus hook.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::{reset, shoot, Ball};
use crate::config::GoalSimConfig;
use crate::logger;

/// Высота, ниже которой мяч считается провалившимся сквозь газон
pub const DEFAULT_FALL_RESET_THRESHOLD: f32 = -10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BallAction {
    /// Импульс + прямой set угловой скорости
    Shoot { impulse: Vec3, angular_velocity: Vec3 },
    /// Debug: только импульс, спин не трогаем
    Kick { impulse: Vec3 },
    Reset,
}

/// Команда мячу
///
/// `ball: None` → всем мячам в мире.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct BallCommand {
    pub ball: Option<Entity>,
    pub action: BallAction,
}

impl BallCommand {
    pub fn shoot(impulse: Vec3, angular_velocity: Vec3) -> Self {
        Self {
            ball: None,
            action: BallAction::Shoot {
                impulse,
                angular_velocity,
            },
        }
    }

    pub fn preset(preset: ShotPreset) -> Self {
        Self::shoot(preset.impulse(), preset.angular_velocity())
    }

    pub fn kick(impulse: Vec3) -> Self {
        Self {
            ball: None,
            action: BallAction::Kick { impulse },
        }
    }

    pub fn reset() -> Self {
        Self {
            ball: None,
            action: BallAction::Reset,
        }
    }

    pub fn for_ball(mut self, ball: Entity) -> Self {
        self.ball = Some(ball);
        self
    }
}

/// Фиксированные удары с клавиатуры
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShotPreset {
    TopSpin,
    CurveLeft,
    CurveRight,
}

impl ShotPreset {
    pub const IMPULSE: Vec3 = Vec3::new(0.0, 1.0, 5.0);
    pub const SPIN_RATE: f32 = 10.0;

    pub fn impulse(&self) -> Vec3 {
        Self::IMPULSE
    }

    pub fn angular_velocity(&self) -> Vec3 {
        match self {
            ShotPreset::TopSpin => Vec3::new(Self::SPIN_RATE, 0.0, 0.0),
            ShotPreset::CurveLeft => Vec3::new(0.0, Self::SPIN_RATE, 0.0),
            ShotPreset::CurveRight => Vec3::new(0.0, -Self::SPIN_RATE, 0.0),
        }
    }
}

/// Система: применение BallCommand
///
/// Нет тела у мяча (или мяча вообще) → тихий no-op.
pub fn handle_ball_commands(
    mut events: EventReader<BallCommand>,
    mut balls: Query<(
        Entity,
        &Ball,
        &mut Transform,
        &mut Velocity,
        &mut ExternalImpulse,
        &mut ExternalForce,
    )>,
) {
    for command in events.read() {
        let mut applied = 0usize;

        for (entity, ball, mut transform, mut velocity, mut impulse, mut force) in balls.iter_mut() {
            if command.ball.is_some_and(|target| target != entity) {
                continue;
            }

            match command.action {
                BallAction::Shoot {
                    impulse: linear_impulse,
                    angular_velocity,
                } => {
                    shoot(&mut velocity, &mut impulse, linear_impulse, angular_velocity);
                    logger::log(&format!(
                        "Ball {:?} shot: impulse {:?}, spin {:?}",
                        entity, linear_impulse, angular_velocity
                    ));
                }
                BallAction::Kick {
                    impulse: linear_impulse,
                } => {
                    impulse.impulse += linear_impulse;
                    logger::log(&format!("Ball {:?} kicked: impulse {:?}", entity, linear_impulse));
                }
                BallAction::Reset => {
                    reset(ball, &mut transform, &mut velocity, &mut impulse, &mut force);
                    logger::log(&format!("Ball {:?} reset to {:?}", entity, ball.start_position));
                }
            }

            applied += 1;
        }

        if applied == 0 {
            logger::log(&format!("BallCommand {:?} ignored: no ball body", command.action));
        }
    }
}

/// Система: мяч провалился сквозь газон → reset
///
/// Recovery, не ошибка: пользователь видит только возврат мяча.
pub fn recover_fallen_ball(
    balls: Query<(Entity, &Transform), With<Ball>>,
    config: Option<Res<GoalSimConfig>>,
    mut commands: EventWriter<BallCommand>,
) {
    let threshold = config
        .map(|config| config.ball.fall_reset_threshold)
        .unwrap_or(DEFAULT_FALL_RESET_THRESHOLD);

    for (entity, transform) in balls.iter() {
        if transform.translation.y < threshold {
            logger::log_warning(&format!(
                "Ball {:?} fell through ground (y = {:.2}), resetting",
                entity, transform.translation.y
            ));
            commands.write(BallCommand::reset().for_ball(entity));
        }
    }
}
