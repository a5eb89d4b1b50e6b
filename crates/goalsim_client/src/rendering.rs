use bevy::prelude::*;
use bevy_rapier3d::prelude::PhysicsSet;
use goalsim_simulation::{ProxyMaterial, ProxyShape, RenderProxy};

pub struct RenderingSyncPlugin;

impl Plugin for RenderingSyncPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_proxy_materials)
            .add_systems(Update, spawn_visuals_for_new_entities);
        add_transform_sync(app);
    }
}

/// Копирование transform после Rapier writeback того же кадра
/// (в Update визуал отставал бы на один step)
fn add_transform_sync(app: &mut App) {
    app.add_systems(PostUpdate, sync_transforms.after(PhysicsSet::Writeback));
}

/// Link: visual entity → simulation entity
#[derive(Component)]
pub struct VisualOf(pub Entity);

/// Link: simulation entity → visual entity
#[derive(Component)]
pub struct HasVisual(pub Entity);

/// Общие материалы: один handle на ProxyMaterial
#[derive(Resource)]
struct ProxyMaterials {
    ball: Handle<StandardMaterial>,
    post: Handle<StandardMaterial>,
    net: Handle<StandardMaterial>,
    pitch: Handle<StandardMaterial>,
}

impl ProxyMaterials {
    fn get(&self, material: ProxyMaterial) -> Handle<StandardMaterial> {
        match material {
            ProxyMaterial::Ball => self.ball.clone(),
            ProxyMaterial::Post => self.post.clone(),
            ProxyMaterial::Net => self.net.clone(),
            ProxyMaterial::Pitch => self.pitch.clone(),
        }
    }
}

fn setup_proxy_materials(mut commands: Commands, mut materials: ResMut<Assets<StandardMaterial>>) {
    commands.insert_resource(ProxyMaterials {
        ball: materials.add(StandardMaterial {
            base_color: Color::srgb(0.95, 0.95, 0.95),
            perceptual_roughness: 0.6,
            ..default()
        }),
        post: materials.add(StandardMaterial {
            base_color: Color::WHITE,
            metallic: 0.2,
            ..default()
        }),
        // Сетка полупрозрачная, чтобы мяч был виден за ней
        net: materials.add(StandardMaterial {
            base_color: Color::srgba(0.9, 0.9, 0.9, 0.35),
            alpha_mode: AlphaMode::Blend,
            double_sided: true,
            cull_mode: None,
            ..default()
        }),
        pitch: materials.add(Color::srgb(0.3, 0.5, 0.3)),
    });
}

fn proxy_mesh(shape: ProxyShape) -> Mesh {
    match shape {
        ProxyShape::Sphere { radius } => Sphere::new(radius).mesh().build(),
        // Bevy и Rapier: ось цилиндра Y
        ProxyShape::Cylinder { radius, length } => Cylinder::new(radius, length).into(),
        ProxyShape::Cuboid { half_extents } => {
            Cuboid::new(half_extents.x * 2.0, half_extents.y * 2.0, half_extents.z * 2.0).into()
        }
    }
}

/// Spawn visual representation для новых simulation entities с RenderProxy
fn spawn_visuals_for_new_entities(
    mut commands: Commands,
    query: Query<(Entity, &RenderProxy, &Transform), Without<HasVisual>>,
    proxy_materials: Option<Res<ProxyMaterials>>,
    mut meshes: ResMut<Assets<Mesh>>,
) {
    let Some(proxy_materials) = proxy_materials else {
        return;
    };

    for (sim_entity, proxy, sim_transform) in query.iter() {
        let visual_entity = commands
            .spawn((
                Mesh3d(meshes.add(proxy_mesh(proxy.shape))),
                MeshMaterial3d(proxy_materials.get(proxy.material)),
                *sim_transform,
                VisualOf(sim_entity),
            ))
            .id();

        // Link simulation ↔ visual
        commands.entity(sim_entity).insert(HasVisual(visual_entity));
    }
}

/// Sync simulation transforms → visual transforms
fn sync_transforms(
    sim_query: Query<(&Transform, &HasVisual), Changed<Transform>>,
    mut visual_query: Query<&mut Transform, (With<VisualOf>, Without<HasVisual>)>,
) {
    for (sim_transform, has_visual) in sim_query.iter() {
        if let Ok(mut visual_transform) = visual_query.get_mut(has_visual.0) {
            *visual_transform = *sim_transform;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Стоит на месте Rapier writeback: двигает simulation body
    fn fake_writeback(mut bodies: Query<&mut Transform, With<HasVisual>>) {
        for mut transform in bodies.iter_mut() {
            transform.translation.z += 1.0;
        }
    }

    #[test]
    fn test_visual_matches_body_in_same_frame() {
        let mut app = App::new();
        app.add_systems(PostUpdate, fake_writeback.in_set(PhysicsSet::Writeback));
        add_transform_sync(&mut app);

        let visual = app.world_mut().spawn(Transform::default()).id();
        let body = app
            .world_mut()
            .spawn((Transform::from_xyz(0.0, 5.0, 0.0), HasVisual(visual)))
            .id();
        app.world_mut().entity_mut(visual).insert(VisualOf(body));

        app.update();

        let body_transform = *app.world().get::<Transform>(body).expect("body");
        let visual_transform = *app.world().get::<Transform>(visual).expect("visual");
        assert_eq!(body_transform.translation, Vec3::new(0.0, 5.0, 1.0));
        assert_eq!(visual_transform, body_transform);
    }
}
