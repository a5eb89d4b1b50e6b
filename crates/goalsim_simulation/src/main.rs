//! Headless симуляция GoalSim
//!
//! `goalsim_simulation [config.json]`: падение мяча, удар с подкруткой,
//! лог траектории.

use bevy::prelude::*;
use goalsim_simulation::logger::{set_log_level, LogLevel};
use goalsim_simulation::{
    create_headless_app, log_error, log_info, Ball, BallCommand, GoalSimConfig, GoalSimPlugin, ShotPreset,
};

const TICKS: usize = 900;
const SHOT_TICK: usize = 300;

fn main() {
    let mut app = create_headless_app();

    // Debug (per-command) логи только с GOALSIM_DEBUG
    if std::env::var_os("GOALSIM_DEBUG").is_none() {
        set_log_level(LogLevel::Info);
    }

    let config = match std::env::args().nth(1) {
        Some(path) => match GoalSimConfig::load(&path) {
            Ok(config) => config,
            Err(err) => {
                log_error(&format!("Config {}: {}", path, err));
                std::process::exit(1);
            }
        },
        None => GoalSimConfig::default(),
    };

    log_info(&format!(
        "Starting GoalSim headless simulation ({} ticks, dt {:.4})",
        TICKS, config.physics.dt
    ));

    app.add_plugins(GoalSimPlugin::new(config));

    for tick in 0..TICKS {
        if tick == SHOT_TICK {
            app.world_mut().send_event(BallCommand::preset(ShotPreset::CurveLeft));
        }

        app.update();

        if tick % 60 == 0 {
            let mut balls = app.world_mut().query_filtered::<&Transform, With<Ball>>();
            for transform in balls.iter(app.world()) {
                log_info(&format!("Tick {}: ball at {:.2?}", tick, transform.translation));
            }
        }
    }

    log_info("Simulation complete!");
}
