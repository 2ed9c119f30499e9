use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use log::info;

use ocular_app::game_loop::spawn_game_loop;
use ocular_app::logging;
use ocular_app::state::{HostCommand, HostSettings, LoopOptions, SharedSnapshot};
use ocular_sim::SimConfig;

/// Headless top-down wave shooter
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// RNG seed for the level
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Stop after this many ticks
    #[arg(long, default_value_t = 18_000)]
    ticks: u64,

    /// TileInfo map file; plays on the bare arena when omitted
    #[arg(long)]
    map: Option<PathBuf>,

    /// Directory textures are loaded from
    #[arg(long, default_value = "assets")]
    assets: PathBuf,

    #[arg(long, default_value = "savegame.txt")]
    save: PathBuf,

    #[arg(long, default_value = "highscores.txt")]
    scores: PathBuf,

    /// Resume from the save file
    #[arg(long = "continue")]
    continue_run: bool,

    /// Name recorded in the high score table
    #[arg(long, default_value = "PLAYER")]
    name: String,

    /// Last wave of the level; 0 plays endlessly
    #[arg(long, default_value_t = 10)]
    final_wave: u32,

    #[arg(long, default_value_t = 1.0)]
    time_scale: f32,

    /// Outline bodies and sensing radii when drawing
    #[arg(long)]
    debug_draw: bool,

    /// Pace the loop at the nominal tick rate instead of running flat out
    #[arg(long)]
    realtime: bool,

    /// Stop the loop after this many wall-clock seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Write the final report as JSON to this path
    #[arg(long)]
    dump: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let settings = HostSettings {
        config: SimConfig {
            seed: args.seed,
            time_scale: args.time_scale,
            final_wave: (args.final_wave > 0).then_some(args.final_wave),
            debug_draw: args.debug_draw,
            ..Default::default()
        },
        map: args.map,
        assets: args.assets,
        save_path: args.save,
        scores_path: args.scores,
        continue_run: args.continue_run,
        player_name: args.name,
    };
    let options = LoopOptions {
        max_ticks: args.ticks,
        realtime: args.realtime,
    };

    let latest: SharedSnapshot = Arc::new(Mutex::new(None));
    let (cmd_tx, handle) =
        spawn_game_loop(settings, options, latest).context("failed to spawn game loop thread")?;

    let started = Instant::now();
    while !handle.is_finished() {
        if args
            .timeout_secs
            .is_some_and(|secs| started.elapsed() >= Duration::from_secs(secs))
        {
            info!("timeout reached, stopping");
            // The loop may already be gone; nothing to do then.
            let _ = cmd_tx.send(HostCommand::Shutdown);
            break;
        }
        std::thread::sleep(Duration::from_millis(20));
    }

    let report = handle
        .join()
        .map_err(|_| anyhow!("game loop thread panicked"))?;
    info!(
        "run ended after {} ticks in {:?} with score {}",
        report.ticks, report.scene, report.score
    );

    if let Some(path) = args.dump {
        let json = serde_json::to_string_pretty(&report).context("failed to serialize report")?;
        fs::write(&path, json).with_context(|| format!("failed to write {}", path.display()))?;
        info!("report written to {}", path.display());
    }

    Ok(())
}
