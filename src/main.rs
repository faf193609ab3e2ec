//! Final call headless runner.
//!
//! Builds the final-call screen in a `bevy_ecs` world and drives it at a
//! fixed tick rate, without a window. Useful to check timings, listen for
//! cue order in the log, or produce a JSON timeline of the reveal.
//!
//! # Main Loop
//!
//! 1. Load `finalcall.ini` (timing, effects, audio ids, texts), falling back
//!    to the stock values
//! 2. Spawn the audio thread with the logging backend and preload the cues
//! 3. Spawn the scene and trigger the reveal
//! 4. Tick: advance world time, run the update schedule, optionally reset
//!    and restart once at `--restart-at`
//! 5. Shut the audio thread down and write the report
//!
//! # Running
//!
//! ```sh
//! RUST_LOG=debug cargo run -- --report timeline.json
//! ```

use bevy_ecs::prelude::*;
use clap::Parser;
use log::{error, info, warn};
use serde::Serialize;
use std::path::PathBuf;

use finalcall::components::dynamictext::DynamicText;
use finalcall::components::revealsequencer::{RevealSequencer, SequencerState};
use finalcall::events::audio::AudioCmd;
use finalcall::events::reveal::{ResetRevealEvent, StartRevealEvent};
use finalcall::game::{self, FinalCallScene};
use finalcall::resources::animatorconfig::{AnimatorConfig, DEFAULT_CONFIG_PATH};
use finalcall::resources::audio::{LogAudioBackend, setup_audio, shutdown_audio};
use finalcall::resources::revealtimeline::{RevealTimeline, TimelineEntry};
use finalcall::resources::textcontent::TextContent;
use finalcall::resources::worldtime::WorldTime;
use finalcall::systems::time::update_world_time;

/// Seconds to keep ticking after the celebration when no duration is given.
const TAIL_SECONDS: f32 = 4.0;

/// Final call reveal runner
#[derive(Parser)]
#[command(version, about = "Runs the fencing club final-call reveal headlessly")]
struct Cli {
    /// Configuration file (INI).
    #[arg(long, value_name = "PATH", default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Override `[runner] ticks_per_second`.
    #[arg(long, value_name = "N")]
    ticks_per_second: Option<u32>,

    /// Simulated seconds to run. Defaults to the reveal length plus the
    /// final pulse and a short tail.
    #[arg(long, value_name = "SECONDS")]
    duration: Option<f32>,

    /// Reset and restart the reveal once at this simulated time.
    #[arg(long, value_name = "SECONDS")]
    restart_at: Option<f32>,

    /// Write a JSON report of the reveal timeline to this path.
    #[arg(long, value_name = "PATH")]
    report: Option<PathBuf>,

    /// Write the effective configuration (including texts) and exit.
    #[arg(long)]
    save_config: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    ticks: u64,
    simulated_seconds: f32,
    final_state: &'static str,
    medal_label: String,
    timeline: &'a [TimelineEntry],
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = AnimatorConfig::with_path(&cli.config);
    let mut texts = TextContent::default();
    match config.load_from_file() {
        Ok(()) => {
            if let Err(e) = texts.load_from_file(&cli.config) {
                warn!("{}; using built-in texts", e);
            }
        }
        Err(e) => warn!("{}; using defaults", e),
    }
    if let Some(tps) = cli.ticks_per_second {
        config.ticks_per_second = tps;
    }

    if cli.save_config {
        let saved = config
            .save_to_file()
            .and_then(|()| texts.save_to_file(&config.config_path));
        if let Err(e) = saved {
            error!("{}", e);
            std::process::exit(1);
        }
        return;
    }

    // --------------- ECS world + resources ---------------
    let mut world = World::new();
    game::init_world(&mut world);
    world.insert_resource(RevealTimeline::default());

    setup_audio(&mut world, Box::new(LogAudioBackend::new()));
    {
        let mut audio_cmds = world.resource_mut::<Messages<AudioCmd>>();
        for (id, path) in config.sound_assets() {
            audio_cmds.write(AudioCmd::LoadFx { id, path });
        }
    }

    let scene = game::setup_final_call(&mut world, &config, &texts);
    world.insert_resource(config.clone());

    let run_length = world
        .get::<RevealSequencer>(scene.sequencer)
        .map(|s| s.run_length())
        .unwrap_or_default();
    let total = cli.duration.unwrap_or(
        cli.restart_at.unwrap_or(0.0) + run_length + config.pulse_duration + TAIL_SECONDS,
    );
    let dt = 1.0 / config.ticks_per_second.max(1) as f32;
    info!(
        "running {:.2}s at {} ticks/s (reveal takes {:.2}s)",
        total, config.ticks_per_second, run_length
    );

    let mut update = game::build_update_schedule();
    update
        .initialize(&mut world)
        .unwrap_or_else(|e| {
            error!("failed to initialize schedule: {}", e);
            std::process::exit(1);
        });

    world.trigger(StartRevealEvent {
        sequencer: scene.sequencer,
    });

    // --------------- Main loop ---------------
    let mut restart_pending = cli.restart_at;
    let mut last_state = sequencer_state(&world, &scene);
    while world.resource::<WorldTime>().elapsed < total {
        update_world_time(&mut world, dt);
        update.run(&mut world);
        world.clear_trackers();

        let elapsed = world.resource::<WorldTime>().elapsed;
        if let Some(at) = restart_pending
            && elapsed >= at
        {
            info!("restarting reveal at {:.2}s", elapsed);
            world.trigger(ResetRevealEvent {
                sequencer: scene.sequencer,
            });
            world.trigger(StartRevealEvent {
                sequencer: scene.sequencer,
            });
            restart_pending = None;
        }

        let state = sequencer_state(&world, &scene);
        if state != last_state {
            info!("[{:.2}s] sequencer {}", elapsed, state.label());
            last_state = state;
        }
    }

    shutdown_audio(&mut world);

    if let Some(path) = cli.report {
        let time = *world.resource::<WorldTime>();
        let medal_label = world
            .get::<DynamicText>(scene.medal_counter)
            .map(|t| t.content.clone())
            .unwrap_or_default();
        let timeline = world.resource::<RevealTimeline>();
        let report = Report {
            ticks: time.frame_count,
            simulated_seconds: time.elapsed,
            final_state: last_state.label(),
            medal_label,
            timeline: &timeline.entries,
        };
        let written = std::fs::File::create(&path)
            .map_err(|e| e.to_string())
            .and_then(|file| serde_json::to_writer_pretty(file, &report).map_err(|e| e.to_string()));
        match written {
            Ok(()) => info!("report written to {}", path.display()),
            Err(e) => {
                error!("cannot write report {}: {}", path.display(), e);
                std::process::exit(1);
            }
        }
    }
}

fn sequencer_state(world: &World, scene: &FinalCallScene) -> SequencerState {
    world
        .get::<RevealSequencer>(scene.sequencer)
        .map(|s| s.state())
        .unwrap_or_default()
}
