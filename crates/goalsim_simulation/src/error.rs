//! Ошибки симуляции
//!
//! MissingBody / MissingVelocityData сюда не входят: это штатные no-op
//! ситуации внутри систем, наружу они не пробрасываются.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GoalSimError {
    /// Rapier context не создан: ни одна физическая система не запускается
    #[error("physics engine unavailable: no Rapier context in the world")]
    PhysicsEngineUnavailable,

    #[error("invalid joint: {reason}")]
    InvalidJoint { reason: String },

    #[error("invalid config field `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ConfigIo(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

impl GoalSimError {
    pub fn invalid_joint(reason: impl Into<String>) -> Self {
        Self::InvalidJoint {
            reason: reason.into(),
        }
    }

    pub fn invalid_config(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GoalSimError>;
