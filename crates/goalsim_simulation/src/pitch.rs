//! Газон: static box, верхняя грань на `top_y`

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::config::PitchConfig;
use crate::physics::collision_layers;
use crate::render_proxy::{ProxyMaterial, RenderProxy};

#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Pitch;

pub fn spawn_pitch(commands: &mut Commands, config: &PitchConfig) -> Entity {
    let half_extents = Vec3::from_array(config.size) / 2.0;

    commands
        .spawn((
            Pitch,
            Name::new("ground"),
            Transform::from_xyz(0.0, config.top_y - half_extents.y, 0.0),
            RigidBody::Fixed,
            Collider::cuboid(half_extents.x, half_extents.y, half_extents.z),
            Restitution::coefficient(config.restitution),
            Friction::coefficient(config.friction),
            collision_layers::pitch_groups(),
            RenderProxy::cuboid(half_extents, ProxyMaterial::Pitch),
        ))
        .id()
}
