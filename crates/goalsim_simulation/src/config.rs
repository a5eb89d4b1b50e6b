//! Конфигурация сцены (ball, goal, net, pitch, physics)
//!
//! Defaults = регуляционная сцена (ворота 7.32 x 2.44, мяч на 5m).
//! JSON файл может переопределить любое поле, остальные берутся из Default.

use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{GoalSimError, Result};

/// Полная конфигурация симуляции (Resource)
#[derive(Resource, Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GoalSimConfig {
    pub ball: BallConfig,
    pub goal: GoalConfig,
    pub net: NetConfig,
    pub pitch: PitchConfig,
    pub physics: PhysicsConfig,
}

impl GoalSimConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<()> {
        let ball = &self.ball;
        require_finite3("ball.start_position", ball.start_position)?;
        require_positive("ball.diameter", ball.diameter)?;
        require_positive("ball.mass", ball.mass)?;
        require_non_negative("ball.restitution", ball.restitution)?;
        require_non_negative("ball.friction", ball.friction)?;
        require_finite("ball.magnus_coefficient", ball.magnus_coefficient)?;
        require_non_negative("ball.linear_damping", ball.linear_damping)?;
        require_non_negative("ball.angular_damping", ball.angular_damping)?;
        require_finite("ball.fall_reset_threshold", ball.fall_reset_threshold)?;

        let goal = &self.goal;
        require_finite3("goal.position", goal.position)?;
        require_positive("goal.width", goal.dimensions.width)?;
        require_positive("goal.height", goal.dimensions.height)?;
        require_positive("goal.depth", goal.dimensions.depth)?;
        require_positive("goal.post_radius", goal.dimensions.post_radius)?;
        require_positive("goal.back_radius_scale", goal.dimensions.back_radius_scale)?;

        let net = &self.net;
        if net.chain_count == 0 {
            return Err(GoalSimError::invalid_config("net.chain_count", "must be at least 1"));
        }
        if net.segment_count == 0 {
            return Err(GoalSimError::invalid_config("net.segment_count", "must be at least 1"));
        }
        require_positive("net.segment_mass", net.segment_mass)?;
        require_positive("net.thickness", net.thickness)?;
        if !(net.width_fill > 0.0 && net.width_fill <= 1.0) {
            return Err(GoalSimError::invalid_config(
                "net.width_fill",
                format!("must be in (0, 1], got {}", net.width_fill),
            ));
        }
        require_non_negative("net.friction", net.friction)?;
        require_non_negative("net.restitution", net.restitution)?;

        let pitch = &self.pitch;
        require_positive("pitch.size.x", pitch.size[0])?;
        require_positive("pitch.size.y", pitch.size[1])?;
        require_positive("pitch.size.z", pitch.size[2])?;
        require_finite("pitch.top_y", pitch.top_y)?;

        let physics = &self.physics;
        require_finite3("physics.gravity", physics.gravity)?;
        require_positive("physics.dt", physics.dt)?;
        if physics.substeps == 0 {
            return Err(GoalSimError::invalid_config("physics.substeps", "must be at least 1"));
        }

        Ok(())
    }
}

/// Параметры мяча
///
/// mass/restitution/friction фиксируются при spawn и дальше не меняются.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallConfig {
    pub start_position: [f32; 3],
    /// Диаметр collision сферы (visual mesh того же размера)
    pub diameter: f32,
    pub mass: f32,
    pub restitution: f32,
    pub friction: f32,
    /// k в F = k · (ω × v)
    pub magnus_coefficient: f32,
    pub linear_damping: f32,
    pub angular_damping: f32,
    /// Ниже этой высоты мяч считается провалившимся сквозь газон
    pub fall_reset_threshold: f32,
    pub ccd_enabled: bool,
}

impl Default for BallConfig {
    fn default() -> Self {
        Self {
            start_position: [0.0, 5.0, 0.0],
            diameter: 1.0,
            mass: 1.0,
            restitution: 0.9,
            friction: 0.5,
            magnus_coefficient: 0.2,
            linear_damping: 0.1,
            angular_damping: 0.0,
            fall_reset_threshold: -10.0,
            ccd_enabled: false,
        }
    }
}

impl BallConfig {
    pub fn start_position(&self) -> Vec3 {
        Vec3::from_array(self.start_position)
    }

    pub fn radius(&self) -> f32 {
        self.diameter * 0.5
    }
}

/// Геометрия ворот (метры)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GoalDimensions {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    pub post_radius: f32,
    /// Задняя рама тоньше передней (0.75 → диаметр 1.5r)
    pub back_radius_scale: f32,
}

impl Default for GoalDimensions {
    fn default() -> Self {
        Self {
            width: 7.32,
            height: 2.44,
            depth: 2.0,
            post_radius: 0.06,
            back_radius_scale: 0.75,
        }
    }
}

impl GoalDimensions {
    pub fn back_radius(&self) -> f32 {
        self.post_radius * self.back_radius_scale
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GoalConfig {
    /// Центр линии ворот на газоне
    pub position: [f32; 3],
    pub dimensions: GoalDimensions,
}

impl Default for GoalConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 20.0],
            dimensions: GoalDimensions::default(),
        }
    }
}

impl GoalConfig {
    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }
}

/// Стратегия сетки: одна на deployment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NetStrategy {
    /// Задняя сетка из цепочек сегментов на joint'ах, боковые и верхняя: static панели
    #[default]
    ChainLink,
    /// Все панели static (дешевле, сетка не реагирует на удар)
    StaticPanels,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetConfig {
    pub strategy: NetStrategy,
    /// Число вертикальных цепочек по ширине ворот
    pub chain_count: usize,
    /// Сегментов в цепочке (вертикальное разрешение)
    pub segment_count: usize,
    pub segment_mass: f32,
    /// Толщина сегмента/панели
    pub thickness: f32,
    /// segment_width = chain_spacing * width_fill (зазор между соседними цепочками)
    pub width_fill: f32,
    pub friction: f32,
    pub restitution: f32,
}

impl Default for NetConfig {
    fn default() -> Self {
        Self {
            strategy: NetStrategy::ChainLink,
            chain_count: 20,
            segment_count: 6,
            segment_mass: 0.2,
            thickness: 0.05,
            width_fill: 0.9,
            friction: 0.5,
            restitution: 0.1,
        }
    }
}

/// Газон: static box, верхняя грань на top_y
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PitchConfig {
    pub enabled: bool,
    pub size: [f32; 3],
    pub top_y: f32,
    pub restitution: f32,
    pub friction: f32,
}

impl Default for PitchConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            size: [100.0, 1.0, 60.0],
            top_y: 0.0,
            restitution: 0.5,
            friction: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravity: [f32; 3],
    /// Шаг интеграции Rapier (один шаг на app.update())
    pub dt: f32,
    pub substeps: usize,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: [0.0, -9.82, 0.0],
            dt: 1.0 / 60.0,
            substeps: 1,
        }
    }
}

impl PhysicsConfig {
    pub fn gravity(&self) -> Vec3 {
        Vec3::from_array(self.gravity)
    }
}

fn require_finite(field: &'static str, value: f32) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(GoalSimError::invalid_config(field, format!("must be finite, got {}", value)))
    }
}

fn require_finite3(field: &'static str, value: [f32; 3]) -> Result<()> {
    if value.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(GoalSimError::invalid_config(field, format!("must be finite, got {:?}", value)))
    }
}

fn require_positive(field: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GoalSimError::invalid_config(field, format!("must be > 0, got {}", value)))
    }
}

fn require_non_negative(field: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(GoalSimError::invalid_config(field, format!("must be >= 0, got {}", value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = GoalSimConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.ball.mass, 1.0);
        assert_eq!(config.goal.dimensions.width, 7.32);
        assert_eq!(config.net.chain_count, 20);
        assert_eq!(config.net.strategy, NetStrategy::ChainLink);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{
            "ball": { "magnus_coefficient": 0.35 },
            "net": { "strategy": "StaticPanels", "chain_count": 12 }
        }"#;

        let config = GoalSimConfig::from_json_str(json).expect("valid config");

        assert_eq!(config.ball.magnus_coefficient, 0.35);
        assert_eq!(config.ball.mass, 1.0);
        assert_eq!(config.net.strategy, NetStrategy::StaticPanels);
        assert_eq!(config.net.chain_count, 12);
        assert_eq!(config.net.segment_count, 6);
        assert_eq!(config.goal.dimensions.height, 2.44);
    }

    #[test]
    fn test_zero_segments_rejected() {
        let json = r#"{ "net": { "segment_count": 0 } }"#;

        match GoalSimConfig::from_json_str(json) {
            Err(GoalSimError::InvalidConfig { field, .. }) => assert_eq!(field, "net.segment_count"),
            other => panic!("expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_width_fill_out_of_range_rejected() {
        let mut config = GoalSimConfig::default();
        config.net.width_fill = 1.5;

        assert!(matches!(
            config.validate(),
            Err(GoalSimError::InvalidConfig { field: "net.width_fill", .. })
        ));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let result = GoalSimConfig::from_json_str("{ ball: ");
        assert!(matches!(result, Err(GoalSimError::ConfigParse(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = GoalSimConfig::load("/definitely/not/here/goalsim.json");
        assert!(matches!(result, Err(GoalSimError::ConfigIo(_))));
    }
}
