//! Goal + net integration tests
//!
//! Проверяем собранные в мире ворота:
//! - топология цепочек (hinge к штанге, ball-socket между сегментами)
//! - static рама не двигается
//! - сетка держит форму под гравитацией и прогибается от мяча

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use goalsim_simulation::goal::{NetPanel, NetPanelTag};
use goalsim_simulation::*;

/// Helper: App с газоном и воротами по конфигу
fn create_goal_app(config: GoalSimConfig, with_pitch: bool) -> (App, Entity) {
    let mut app = create_headless_app();
    app.add_plugins(GoalSimPlugin::new(config.clone()).without_scene());
    app.update();

    let goal = {
        let world = app.world_mut();
        let mut commands = world.commands();
        if with_pitch {
            spawn_pitch(&mut commands, &config.pitch);
        }
        let goal = spawn_goal(&mut commands, &config.goal, &config.net).expect("goal spawns");
        world.flush();
        goal
    };

    (app, goal)
}

fn segment_translations(app: &mut App) -> Vec<(NetSegment, Vec3)> {
    let mut query = app.world_mut().query::<(&NetSegment, &Transform)>();
    let mut segments: Vec<_> = query
        .iter(app.world())
        .map(|(segment, transform)| (*segment, transform.translation))
        .collect();
    segments.sort_by_key(|(segment, _)| (segment.chain, segment.index));
    segments
}

#[test]
fn test_chain_link_net_topology() {
    let (mut app, goal) = create_goal_app(GoalSimConfig::default(), true);

    let frame = *app.world().get::<GoalFrame>(goal).expect("frame");
    let back_top = frame.bar(FrameBar::BackTopBar);

    let bar_transform = app.world().get::<Transform>(back_top).expect("bar transform");
    assert_eq!(bar_transform.translation, frame.spec(FrameBar::BackTopBar).translation);

    let mut query = app.world_mut().query::<(Entity, &NetSegment, &NetLink, &ImpulseJoint)>();
    let links: Vec<_> = query
        .iter(app.world())
        .map(|(entity, segment, link, joint)| (entity, *segment, *link, joint.parent))
        .collect();

    assert_eq!(links.len(), 120, "20 chains × 6 segments");

    let hinges: Vec<_> = links
        .iter()
        .filter(|(_, _, link, _)| link.spec.kind() == JointKind::Hinge)
        .collect();
    assert_eq!(hinges.len(), 20, "one hinge per chain");

    for (_, segment, link, joint_parent) in &links {
        // ImpulseJoint и NetLink описывают одно и то же ребро
        assert_eq!(*joint_parent, link.parent);

        if segment.index == 0 {
            assert_eq!(link.spec.kind(), JointKind::Hinge);
            assert_eq!(link.parent, back_top);
        } else {
            assert_eq!(link.spec.kind(), JointKind::BallSocket);
            let parent = app.world().get::<NetSegment>(link.parent).expect("parent is a segment");
            assert_eq!(parent.chain, segment.chain);
            assert_eq!(parent.index, segment.index - 1);
        }
    }

    let net = app.world().get::<GoalNet>(goal).expect("net");
    assert_eq!(net.chains.len(), 20);
    assert_eq!(net.joint_count(), 120);
    assert_eq!(net.panels.len(), 3, "sides + top stay static");
}

#[test]
fn test_static_panels_strategy_has_no_joints() {
    let mut config = GoalSimConfig::default();
    config.net.strategy = NetStrategy::StaticPanels;
    let (mut app, goal) = create_goal_app(config, true);

    let mut joints = app.world_mut().query::<&ImpulseJoint>();
    assert_eq!(joints.iter(app.world()).count(), 0);

    let net = app.world().get::<GoalNet>(goal).expect("net").clone();
    assert!(net.chains.is_empty());
    assert_eq!(net.panels.len(), 4);

    let has_back = net.panels.iter().any(|panel| {
        app.world()
            .get::<NetPanelTag>(*panel)
            .is_some_and(|tag| tag.0 == NetPanel::Back)
    });
    assert!(has_back, "back panel replaces the chains");
}

#[test]
fn test_frame_bars_are_immovable() {
    let (mut app, goal) = create_goal_app(GoalSimConfig::default(), true);
    let frame = *app.world().get::<GoalFrame>(goal).expect("frame");

    let before: Vec<Transform> = frame
        .entities()
        .map(|bar| *app.world().get::<Transform>(bar).expect("bar transform"))
        .collect();

    // Толкаем каждую штангу: fixed body не должен сдвинуться
    for bar in frame.entities() {
        app.world_mut().entity_mut(bar).insert((
            ExternalForce {
                force: Vec3::new(500.0, 500.0, 500.0),
                torque: Vec3::splat(50.0),
            },
            ExternalImpulse {
                impulse: Vec3::new(0.0, 0.0, 100.0),
                torque_impulse: Vec3::ZERO,
            },
        ));
    }

    for _ in 0..120 {
        app.update();
    }

    for (bar, expected) in frame.entities().zip(before) {
        let transform = app.world().get::<Transform>(bar).expect("bar transform");
        assert!(
            (transform.translation - expected.translation).length() < 1e-5,
            "bar {:?} moved: {:?} → {:?}",
            app.world().get::<FrameBarTag>(bar).map(|tag| tag.0.name()),
            expected.translation,
            transform.translation
        );
        assert!(transform.rotation.angle_between(expected.rotation) < 1e-5);
    }
}

#[test]
fn test_net_holds_shape_under_gravity() {
    let (mut app, _) = create_goal_app(GoalSimConfig::default(), false);
    let start = segment_translations(&mut app);

    for _ in 0..120 {
        app.update();
    }

    let end = segment_translations(&mut app);
    assert_eq!(start.len(), end.len());

    for ((segment, before), (_, after)) in start.iter().zip(end.iter()) {
        // Висит на штанге: сегменты не падают вниз
        assert!(
            (after.y - before.y).abs() < 0.1,
            "chain {} segment {} sagged: {} → {}",
            segment.chain,
            segment.index,
            before.y,
            after.y
        );
        assert!((after.x - before.x).abs() < 0.1);
        assert!((after.z - before.z).abs() < 0.1);
    }
}

#[test]
fn test_ball_shot_into_goal_pushes_net_back() {
    let config = GoalSimConfig::default();
    let (mut app, _) = create_goal_app(config.clone(), true);

    let ball = {
        let world = app.world_mut();
        let mut commands = world.commands();
        let ball = spawn_ball(&mut commands, &config.ball, Vec3::new(0.0, 1.2, 17.0));
        world.flush();
        ball
    };
    app.world_mut().get_mut::<Velocity>(ball).expect("velocity").linvel = Vec3::new(0.0, 0.0, 15.0);

    let back_z = config.goal.position().z + config.goal.dimensions.depth;
    let mut max_segment_z = f32::MIN;

    for _ in 0..60 {
        app.update();
        for (_, translation) in segment_translations(&mut app) {
            max_segment_z = max_segment_z.max(translation.z);
        }
    }

    assert!(
        max_segment_z > back_z + 0.05,
        "net should bulge behind the goal: max z = {}",
        max_segment_z
    );

    // Сетка поймала мяч: далеко за ворота он не улетел
    let ball_z = app.world().get::<Transform>(ball).expect("ball").translation.z;
    assert!(ball_z < back_z + 3.0, "ball passed through the net: z = {}", ball_z);
}
