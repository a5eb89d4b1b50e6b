//! Тесты детерминизма
//!
//! Фиксированный dt + одинаковый порядок spawn → одинаковая траектория

use bevy::prelude::*;
use bevy_rapier3d::prelude::Velocity;
use goalsim_simulation::{
    create_headless_app, spawn_ball, spawn_pitch, world_snapshot, BallCommand, GoalSimConfig, GoalSimPlugin,
    ShotPreset,
};

#[test]
fn test_determinism_same_shot() {
    const TICK_COUNT: usize = 300;

    let (transforms1, velocities1) = run_simulation(ShotPreset::CurveLeft, TICK_COUNT);
    let (transforms2, velocities2) = run_simulation(ShotPreset::CurveLeft, TICK_COUNT);

    assert_eq!(transforms1, transforms2, "Одинаковый удар дал разные позиции!");
    assert_eq!(velocities1, velocities2, "Одинаковый удар дал разные скорости!");
}

#[test]
fn test_determinism_multiple_runs() {
    const TICK_COUNT: usize = 120;

    // Запускаем 3 раза: все должны быть идентичны
    let snapshots: Vec<_> = (0..3)
        .map(|_| run_simulation(ShotPreset::TopSpin, TICK_COUNT))
        .collect();

    for (i, snapshot) in snapshots.iter().enumerate().skip(1) {
        assert_eq!(
            snapshots[0], *snapshot,
            "Прогон {} дал результат отличный от прогона 0",
            i
        );
    }
}

#[test]
fn test_different_shots_diverge() {
    let (left, _) = run_simulation(ShotPreset::CurveLeft, 60);
    let (right, _) = run_simulation(ShotPreset::CurveRight, 60);

    assert_ne!(left, right);
}

/// Газон + мяч, удар на первом тике; snapshot Transform и Velocity
fn run_simulation(preset: ShotPreset, tick_count: usize) -> (Vec<u8>, Vec<u8>) {
    let mut app = create_headless_app();
    app.add_plugins(GoalSimPlugin::default().without_scene());
    app.update();

    let config = GoalSimConfig::default();
    {
        let world = app.world_mut();
        let mut commands = world.commands();
        spawn_pitch(&mut commands, &config.pitch);
        spawn_ball(&mut commands, &config.ball, config.ball.start_position());
        world.flush();
    }

    app.world_mut().send_event(BallCommand::preset(preset));

    for _ in 0..tick_count {
        app.update();
    }

    (
        world_snapshot::<Transform>(app.world_mut()),
        world_snapshot::<Velocity>(app.world_mut()),
    )
}
