//! Сетка из цепочек rigid сегментов (без soft-body solver)
//!
//! Каждая вертикальная цепочка: `segment_count` лёгких box'ов сверху вниз.
//! - сегмент 0 → hinge к static штанге (ткань висит на раме, качается
//!   только в плоскости, перпендикулярной штанге), контакт со штангой выключен
//! - сегмент i → ball-and-socket к сегменту i-1 (свободное покачивание),
//!   контакты включены
//!
//! У каждого сегмента ровно один ImpulseJoint (вверх) → цепочка линейная,
//! циклов нет по построению.
//!
//! Планирование (NetLayout / plan_chain): чистая геометрия, spawn отдельно.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::config::{GoalDimensions, NetConfig};
use crate::error::Result;
use crate::physics::collision_layers;
use crate::physics::{JointAnchors, JointSpec};
use crate::render_proxy::{ProxyMaterial, RenderProxy};

/// Производные размеры сетки
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NetLayout {
    pub chain_count: usize,
    pub segment_count: usize,
    pub chain_spacing: f32,
    pub segment_height: f32,
    /// Чуть уже spacing: соседние цепочки не трутся друг о друга
    pub segment_width: f32,
    pub thickness: f32,
    pub goal_height: f32,
}

impl NetLayout {
    pub fn new(dims: &GoalDimensions, net: &NetConfig) -> Self {
        let chain_spacing = dims.width / net.chain_count as f32;
        let segment_height = dims.height / net.segment_count as f32;

        Self {
            chain_count: net.chain_count,
            segment_count: net.segment_count,
            chain_spacing,
            segment_height,
            segment_width: chain_spacing * net.width_fill,
            thickness: net.thickness,
            goal_height: dims.height,
        }
    }

    /// X центров цепочек: от левого края + spacing/2, шаг spacing
    pub fn chain_x_positions(&self, goal_x: f32, goal_width: f32) -> Vec<f32> {
        let start_x = goal_x - goal_width / 2.0 + self.chain_spacing / 2.0;
        (0..self.chain_count)
            .map(|c| start_x + c as f32 * self.chain_spacing)
            .collect()
    }

    /// Y центра сегмента i (верхний: самый высокий)
    pub fn segment_center_y(&self, index: usize) -> f32 {
        self.goal_height - self.segment_height * index as f32 - self.segment_height / 2.0
    }

    pub fn segment_half_extents(&self) -> Vec3 {
        Vec3::new(
            self.segment_width / 2.0,
            self.segment_height / 2.0,
            self.thickness / 2.0,
        )
    }
}

/// Static штанга, к которой крепится верх цепочки
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorBar {
    pub translation: Vec3,
    pub rotation: Quat,
}

impl AnchorBar {
    /// Мировая точка → local frame штанги (с учётом реального поворота)
    pub fn world_to_local_point(&self, point: Vec3) -> Vec3 {
        self.rotation.inverse() * (point - self.translation)
    }

    pub fn world_to_local_direction(&self, direction: Vec3) -> Vec3 {
        self.rotation.inverse() * direction
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainParent {
    Anchor,
    /// Индекс сегмента выше в той же цепочке
    Segment(usize),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentPlan {
    pub index: usize,
    pub center: Vec3,
    pub half_extents: Vec3,
    pub parent: ChainParent,
    pub joint: JointSpec,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChainPlan {
    pub x: f32,
    pub z: f32,
    pub segments: Vec<SegmentPlan>,
}

/// План одной цепочки в (x, z)
pub fn plan_chain(layout: &NetLayout, x: f32, z: f32, anchor: &AnchorBar) -> Result<ChainPlan> {
    let half_height = layout.segment_height / 2.0;
    let top_anchor = Vec3::new(0.0, half_height, 0.0);
    let bottom_anchor = Vec3::new(0.0, -half_height, 0.0);

    let mut segments = Vec::with_capacity(layout.segment_count);

    for i in 0..layout.segment_count {
        let center = Vec3::new(x, layout.segment_center_y(i), z);

        let (parent, joint) = if i == 0 {
            // Верхняя кромка сегмента в local frame штанги
            let attach_point = center + top_anchor;
            let joint = JointSpec::hinge(
                anchor.world_to_local_direction(Vec3::X),
                Vec3::X,
                JointAnchors::new(anchor.world_to_local_point(attach_point), top_anchor),
                false,
            )?;
            (ChainParent::Anchor, joint)
        } else {
            let joint = JointSpec::ball_socket(JointAnchors::new(bottom_anchor, top_anchor), true)?;
            (ChainParent::Segment(i - 1), joint)
        };

        segments.push(SegmentPlan {
            index: i,
            center,
            half_extents: layout.segment_half_extents(),
            parent,
            joint,
        });
    }

    Ok(ChainPlan { x, z, segments })
}

/// Планы всех цепочек задней сетки (z = задняя плоскость ворот)
pub fn plan_back_net(
    layout: &NetLayout,
    goal_position: Vec3,
    dims: &GoalDimensions,
    anchor: &AnchorBar,
) -> Result<Vec<ChainPlan>> {
    let z = goal_position.z + dims.depth;

    layout
        .chain_x_positions(goal_position.x, dims.width)
        .into_iter()
        .map(|x| plan_chain(layout, x, z, anchor))
        .collect()
}

/// Сегмент сетки
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct NetSegment {
    pub chain: usize,
    pub index: usize,
}

/// Верхний joint сегмента (дублирует ImpulseJoint в читаемом виде)
#[derive(Component, Debug, Clone, Copy)]
pub struct NetLink {
    pub parent: Entity,
    pub spec: JointSpec,
}

/// Handles одной цепочки
#[derive(Debug, Clone, PartialEq)]
pub struct NetChain {
    pub anchor: Entity,
    /// Сверху вниз
    pub segments: Vec<Entity>,
}

/// Spawn цепочки по плану: сегменты + joint'ы
pub fn spawn_chain(
    commands: &mut Commands,
    plan: &ChainPlan,
    chain_index: usize,
    anchor: Entity,
    net: &NetConfig,
) -> NetChain {
    let mut segments: Vec<Entity> = Vec::with_capacity(plan.segments.len());

    for segment in &plan.segments {
        let parent = match segment.parent {
            ChainParent::Anchor => anchor,
            ChainParent::Segment(index) => segments[index],
        };

        let entity = commands
            .spawn((
                NetSegment {
                    chain: chain_index,
                    index: segment.index,
                },
                Transform::from_translation(segment.center),
                (
                    RigidBody::Dynamic,
                    Collider::cuboid(
                        segment.half_extents.x,
                        segment.half_extents.y,
                        segment.half_extents.z,
                    ),
                    ColliderMassProperties::Mass(net.segment_mass),
                    Friction::coefficient(net.friction),
                    Restitution::coefficient(net.restitution),
                    collision_layers::net_segment_groups(),
                ),
                ImpulseJoint::new(parent, segment.joint.to_rapier()),
                NetLink {
                    parent,
                    spec: segment.joint,
                },
                RenderProxy::cuboid(segment.half_extents, ProxyMaterial::Net),
            ))
            .id();

        segments.push(entity);
    }

    NetChain { anchor, segments }
}
