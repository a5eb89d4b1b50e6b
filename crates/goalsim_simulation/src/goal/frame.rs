//! Рама ворот: 8 неподвижных цилиндров
//!
//! Все штанги RigidBody::Fixed (zero mass): не двигаются ни от каких сил.
//! Цилиндр Rapier направлен вдоль локальной оси Y, горизонтальные штанги
//! повёрнуты на 90°.

use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::config::GoalDimensions;
use crate::physics::collision_layers;
use crate::render_proxy::{ProxyMaterial, RenderProxy};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum FrameBar {
    LeftPost,
    RightPost,
    Crossbar,
    LeftBackPost,
    RightBackPost,
    BackTopBar,
    LeftTopBar,
    RightTopBar,
}

impl FrameBar {
    pub const ALL: [FrameBar; 8] = [
        FrameBar::LeftPost,
        FrameBar::RightPost,
        FrameBar::Crossbar,
        FrameBar::LeftBackPost,
        FrameBar::RightBackPost,
        FrameBar::BackTopBar,
        FrameBar::LeftTopBar,
        FrameBar::RightTopBar,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FrameBar::LeftPost => "leftPost",
            FrameBar::RightPost => "rightPost",
            FrameBar::Crossbar => "crossbar",
            FrameBar::LeftBackPost => "leftBackPost",
            FrameBar::RightBackPost => "rightBackPost",
            FrameBar::BackTopBar => "backTopBar",
            FrameBar::LeftTopBar => "leftTopBar",
            FrameBar::RightTopBar => "rightTopBar",
        }
    }

    fn index(&self) -> usize {
        match self {
            FrameBar::LeftPost => 0,
            FrameBar::RightPost => 1,
            FrameBar::Crossbar => 2,
            FrameBar::LeftBackPost => 3,
            FrameBar::RightBackPost => 4,
            FrameBar::BackTopBar => 5,
            FrameBar::LeftTopBar => 6,
            FrameBar::RightTopBar => 7,
        }
    }
}

/// Геометрия одной штанги (до spawn)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameBarSpec {
    pub bar: FrameBar,
    pub translation: Vec3,
    pub rotation: Quat,
    pub length: f32,
    pub radius: f32,
}

/// Маркер штанги на entity
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct FrameBarTag(pub FrameBar);

/// Handles всех штанг рамы (anchor'ы для сетки)
#[derive(Component, Debug, Clone, Copy)]
pub struct GoalFrame {
    bars: [Entity; 8],
    specs: [FrameBarSpec; 8],
}

impl GoalFrame {
    pub fn bar(&self, bar: FrameBar) -> Entity {
        self.bars[bar.index()]
    }

    pub fn spec(&self, bar: FrameBar) -> &FrameBarSpec {
        &self.specs[bar.index()]
    }

    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.bars.iter().copied()
    }
}

/// Раскладка рамы от позиции ворот (центр линии ворот на газоне)
pub fn frame_layout(position: Vec3, dims: &GoalDimensions) -> [FrameBarSpec; 8] {
    let w = dims.width;
    let h = dims.height;
    let d = dims.depth;
    let r = dims.post_radius;
    let back_r = dims.back_radius();

    // Цилиндр вдоль Y → вдоль X (поворот вокруг оси глубины Z) / вдоль Z (вокруг X)
    let along_x = Quat::from_rotation_z(FRAC_PI_2);
    let along_z = Quat::from_rotation_x(FRAC_PI_2);

    let bar = |bar, translation, rotation, length, radius| FrameBarSpec {
        bar,
        translation,
        rotation,
        length,
        radius,
    };

    [
        bar(
            FrameBar::LeftPost,
            Vec3::new(position.x - w / 2.0, h / 2.0, position.z),
            Quat::IDENTITY,
            h,
            r,
        ),
        bar(
            FrameBar::RightPost,
            Vec3::new(position.x + w / 2.0, h / 2.0, position.z),
            Quat::IDENTITY,
            h,
            r,
        ),
        bar(
            FrameBar::Crossbar,
            Vec3::new(position.x, h, position.z),
            along_x,
            w + r * 2.0,
            r,
        ),
        bar(
            FrameBar::LeftBackPost,
            Vec3::new(position.x - w / 2.0, h / 2.0, position.z + d),
            Quat::IDENTITY,
            h,
            back_r,
        ),
        bar(
            FrameBar::RightBackPost,
            Vec3::new(position.x + w / 2.0, h / 2.0, position.z + d),
            Quat::IDENTITY,
            h,
            back_r,
        ),
        bar(
            FrameBar::BackTopBar,
            Vec3::new(position.x, h, position.z + d),
            along_x,
            w,
            back_r,
        ),
        bar(
            FrameBar::LeftTopBar,
            Vec3::new(position.x - w / 2.0, h, position.z + d / 2.0),
            along_z,
            d,
            back_r,
        ),
        bar(
            FrameBar::RightTopBar,
            Vec3::new(position.x + w / 2.0, h, position.z + d / 2.0),
            along_z,
            d,
            back_r,
        ),
    ]
}

/// Spawn рамы, возвращает handles штанг
pub fn spawn_frame(commands: &mut Commands, position: Vec3, dims: &GoalDimensions) -> GoalFrame {
    let specs = frame_layout(position, dims);
    let bars = specs.map(|spec| spawn_bar(commands, &spec));

    GoalFrame { bars, specs }
}

fn spawn_bar(commands: &mut Commands, spec: &FrameBarSpec) -> Entity {
    commands
        .spawn((
            FrameBarTag(spec.bar),
            Name::new(spec.bar.name()),
            Transform::from_translation(spec.translation).with_rotation(spec.rotation),
            RigidBody::Fixed,
            Collider::cylinder(spec.length / 2.0, spec.radius),
            collision_layers::frame_groups(),
            RenderProxy::cylinder(spec.radius, spec.length, ProxyMaterial::Post),
        ))
        .id()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn layout() -> [FrameBarSpec; 8] {
        frame_layout(Vec3::new(0.0, 0.0, 20.0), &GoalDimensions::default())
    }

    fn find(specs: &[FrameBarSpec; 8], bar: FrameBar) -> FrameBarSpec {
        specs
            .iter()
            .copied()
            .find(|spec| spec.bar == bar)
            .expect("bar in layout")
    }

    #[test]
    fn test_layout_has_every_bar_once() {
        let specs = layout();
        for bar in FrameBar::ALL {
            assert_eq!(specs.iter().filter(|spec| spec.bar == bar).count(), 1, "{:?}", bar);
        }
    }

    #[test]
    fn test_front_posts() {
        let specs = layout();
        let left = find(&specs, FrameBar::LeftPost);
        let right = find(&specs, FrameBar::RightPost);

        assert!((left.translation - Vec3::new(-3.66, 1.22, 20.0)).length() < EPS);
        assert!((right.translation - Vec3::new(3.66, 1.22, 20.0)).length() < EPS);
        assert!((left.length - 2.44).abs() < EPS);
        assert!((left.radius - 0.06).abs() < EPS);
        assert_eq!(left.rotation, Quat::IDENTITY);
    }

    #[test]
    fn test_crossbar_runs_along_width() {
        let specs = layout();
        let crossbar = find(&specs, FrameBar::Crossbar);

        assert!((crossbar.translation - Vec3::new(0.0, 2.44, 20.0)).length() < EPS);
        assert!((crossbar.length - (7.32 + 0.12)).abs() < EPS);

        // Локальная ось Y цилиндра должна лечь вдоль X
        let axis = crossbar.rotation * Vec3::Y;
        assert!(axis.x.abs() > 1.0 - EPS, "axis = {:?}", axis);
    }

    #[test]
    fn test_back_frame_mirrors_front_at_depth() {
        let specs = layout();
        let back_left = find(&specs, FrameBar::LeftBackPost);
        let back_top = find(&specs, FrameBar::BackTopBar);

        assert!((back_left.translation - Vec3::new(-3.66, 1.22, 22.0)).length() < EPS);
        assert!((back_left.radius - 0.045).abs() < EPS);
        assert!((back_top.translation - Vec3::new(0.0, 2.44, 22.0)).length() < EPS);
        assert!((back_top.length - 7.32).abs() < EPS);
    }

    #[test]
    fn test_side_top_bars_run_along_depth() {
        let specs = layout();
        let left_top = find(&specs, FrameBar::LeftTopBar);

        assert!((left_top.translation - Vec3::new(-3.66, 2.44, 21.0)).length() < EPS);
        assert!((left_top.length - 2.0).abs() < EPS);

        let axis = left_top.rotation * Vec3::Y;
        assert!(axis.z.abs() > 1.0 - EPS, "axis = {:?}", axis);
    }
}
