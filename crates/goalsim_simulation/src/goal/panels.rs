//! Static панели сетки: один zero-mass box на панель
//!
//! Дешёвая альтернатива цепочкам там, где динамика не нужна (бока, верх).
//! Панели укорочены по глубине на толщину, чтобы не пересекаться
//! с задней плоскостью сетки.

use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::config::{GoalDimensions, NetStrategy};
use crate::physics::collision_layers;
use crate::render_proxy::{ProxyMaterial, RenderProxy};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum NetPanel {
    Left,
    Right,
    Top,
    Back,
}

impl NetPanel {
    pub fn name(&self) -> &'static str {
        match self {
            NetPanel::Left => "leftNet",
            NetPanel::Right => "rightNet",
            NetPanel::Top => "topNet",
            NetPanel::Back => "backNet",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticPanelSpec {
    pub panel: NetPanel,
    pub translation: Vec3,
    pub rotation: Quat,
    pub half_extents: Vec3,
}

#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct NetPanelTag(pub NetPanel);

/// Какие панели static при данной стратегии
///
/// ChainLink: бока + верх (задняя сетка из цепочек).
/// StaticPanels: бока + верх + задняя.
pub fn static_panel_layout(
    position: Vec3,
    dims: &GoalDimensions,
    thickness: f32,
    strategy: NetStrategy,
) -> Vec<StaticPanelSpec> {
    let w = dims.width;
    let h = dims.height;
    let side_depth = (dims.depth - thickness).max(thickness);
    let mid_z = position.z + side_depth / 2.0;

    let side_rotation = Quat::from_rotation_y(FRAC_PI_2);
    let side_half = Vec3::new(side_depth / 2.0, h / 2.0, thickness / 2.0);

    let mut panels = vec![
        StaticPanelSpec {
            panel: NetPanel::Left,
            translation: Vec3::new(position.x - w / 2.0, h / 2.0, mid_z),
            rotation: side_rotation,
            half_extents: side_half,
        },
        StaticPanelSpec {
            panel: NetPanel::Right,
            translation: Vec3::new(position.x + w / 2.0, h / 2.0, mid_z),
            rotation: side_rotation,
            half_extents: side_half,
        },
        StaticPanelSpec {
            panel: NetPanel::Top,
            translation: Vec3::new(position.x, h, mid_z),
            rotation: Quat::from_rotation_x(FRAC_PI_2),
            half_extents: Vec3::new(w / 2.0, side_depth / 2.0, thickness / 2.0),
        },
    ];

    if strategy == NetStrategy::StaticPanels {
        panels.push(StaticPanelSpec {
            panel: NetPanel::Back,
            translation: Vec3::new(position.x, h / 2.0, position.z + dims.depth),
            rotation: Quat::IDENTITY,
            half_extents: Vec3::new(w / 2.0, h / 2.0, thickness / 2.0),
        });
    }

    panels
}

pub fn spawn_static_panel(commands: &mut Commands, spec: &StaticPanelSpec) -> Entity {
    commands
        .spawn((
            NetPanelTag(spec.panel),
            Name::new(spec.panel.name()),
            Transform::from_translation(spec.translation).with_rotation(spec.rotation),
            RigidBody::Fixed,
            Collider::cuboid(spec.half_extents.x, spec.half_extents.y, spec.half_extents.z),
            collision_layers::net_panel_groups(),
            RenderProxy::cuboid(spec.half_extents, ProxyMaterial::Net),
        ))
        .id()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_link_keeps_back_dynamic() {
        let panels = static_panel_layout(Vec3::ZERO, &GoalDimensions::default(), 0.05, NetStrategy::ChainLink);

        assert_eq!(panels.len(), 3);
        assert!(panels.iter().all(|spec| spec.panel != NetPanel::Back));
    }

    #[test]
    fn test_static_strategy_adds_back_panel() {
        let dims = GoalDimensions::default();
        let panels = static_panel_layout(Vec3::new(0.0, 0.0, 20.0), &dims, 0.05, NetStrategy::StaticPanels);

        let back = panels
            .iter()
            .find(|spec| spec.panel == NetPanel::Back)
            .expect("back panel");
        assert!((back.translation - Vec3::new(0.0, 1.22, 22.0)).length() < 1e-5);
        assert!((back.half_extents.x - 3.66).abs() < 1e-5);
    }

    #[test]
    fn test_side_panels_stop_before_back_plane() {
        let dims = GoalDimensions::default();
        let thickness = 0.05;
        let panels = static_panel_layout(Vec3::new(0.0, 0.0, 20.0), &dims, thickness, NetStrategy::ChainLink);

        for spec in &panels {
            // Протяжённость панели по мировой Z
            let world_half = (spec.rotation * spec.half_extents).abs();
            let max_z = spec.translation.z + world_half.z;
            assert!(
                max_z <= 20.0 + dims.depth - thickness / 2.0 + 1e-4,
                "{:?} reaches z = {}",
                spec.panel,
                max_z
            );
        }
    }
}
