//! Game loop thread: runs the scene registry at the nominal tick rate.
//!
//! The scenes and their services are created inside this thread because it's
//! cleaner for ownership. Commands arrive via an `mpsc` channel; the latest
//! level snapshot is stored in shared state for polling.

use std::io;
use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use serde::Serialize;

use ocular_core::constants::{DT, TICK_RATE};
use ocular_core::state::LevelSnapshot;

use crate::headless::{DrawStats, HeadlessCanvas};
use crate::scenes::{SceneContext, SceneId, SceneRegistry};
use crate::state::{HostCommand, HostSettings, LoopOptions, SharedSnapshot};

/// Nominal duration of one tick at 1x speed.
const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Summary of a finished game loop.
#[derive(Debug, Clone, Serialize)]
pub struct LoopReport {
    pub ticks: u64,
    #[serde(skip)]
    pub scene: Option<SceneId>,
    pub score: u32,
    pub draw_stats: DrawStats,
    pub snapshot: Option<LevelSnapshot>,
}

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and the handle yielding the run's report.
pub fn spawn_game_loop(
    settings: HostSettings,
    options: LoopOptions,
    latest_snapshot: SharedSnapshot,
) -> io::Result<(mpsc::Sender<HostCommand>, JoinHandle<LoopReport>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<HostCommand>();

    let handle = std::thread::Builder::new()
        .name("ocular-game-loop".into())
        .spawn(move || {
            let mut ctx = SceneContext::new(settings);
            let mut registry = SceneRegistry::standard();
            run_game_loop(&mut ctx, &mut registry, cmd_rx, options, &latest_snapshot)
        })?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until the run finishes, the tick limit is hit, a
/// Shutdown command arrives or the channel disconnects.
pub fn run_game_loop(
    ctx: &mut SceneContext,
    registry: &mut SceneRegistry,
    cmd_rx: mpsc::Receiver<HostCommand>,
    options: LoopOptions,
    latest_snapshot: &SharedSnapshot,
) -> LoopReport {
    let mut canvas = HeadlessCanvas::default();
    let mut next_tick_time = Instant::now();
    let mut ticks = 0;

    registry.switch_to(SceneId::MainMenu, ctx);

    'run: while ticks < options.max_ticks && !ctx.finished {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(HostCommand::Input(input)) => {
                    ctx.autopilot = false;
                    ctx.pending_input.push(input);
                }
                Ok(HostCommand::SetTimeScale(scale)) => ctx.time_scale = Some(scale),
                Ok(HostCommand::Shutdown) => break 'run,
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => break 'run,
            }
        }

        // 2. Advance the current scene one frame
        registry.update(ctx, DT);
        ticks += 1;

        // 3. Draw into the headless canvas
        registry.draw(&mut canvas);

        // 4. Store latest snapshot for synchronous polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            lock.clone_from(&ctx.latest);
        }

        // 5. Sleep until next tick
        if options.realtime {
            next_tick_time += TICK_DURATION;
            let now = Instant::now();
            if next_tick_time > now {
                std::thread::sleep(next_tick_time - now);
            } else if now - next_tick_time > TICK_DURATION * 2 {
                // Too far behind, reset to avoid catch-up spiral
                next_tick_time = now;
            }
        }
    }

    LoopReport {
        ticks,
        scene: registry.current(),
        score: ctx.latest.as_ref().map_or(ctx.last_score, |s| s.score.points),
        draw_stats: canvas.stats,
        snapshot: ctx.latest.clone(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use ocular_core::commands::PlayerInput;
    use tempfile::TempDir;

    use super::*;

    fn temp_settings(dir: &TempDir) -> HostSettings {
        let dir = dir.path();
        HostSettings {
            assets: dir.to_path_buf(),
            save_path: dir.join("save.txt"),
            scores_path: dir.join("scores.txt"),
            ..Default::default()
        }
    }

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<HostCommand>();

        tx.send(HostCommand::Input(PlayerInput::idle())).unwrap();
        tx.send(HostCommand::SetTimeScale(2.0)).unwrap();
        tx.send(HostCommand::Shutdown).unwrap();

        let mut commands = Vec::new();
        while let Ok(cmd) = rx.try_recv() {
            commands.push(cmd);
        }

        assert_eq!(commands.len(), 3);
        assert!(matches!(commands[0], HostCommand::Input(_)));
        assert!(matches!(commands[1], HostCommand::SetTimeScale(_)));
        assert!(matches!(commands[2], HostCommand::Shutdown));
    }

    #[test]
    fn test_loop_stops_at_tick_limit() {
        let latest: SharedSnapshot = Arc::new(Mutex::new(None));
        let options = LoopOptions {
            max_ticks: 120,
            realtime: false,
        };
        let dir = TempDir::new().unwrap();
        let (_tx, handle) = spawn_game_loop(temp_settings(&dir), options, latest.clone()).unwrap();
        let report = handle.join().unwrap();

        assert_eq!(report.ticks, 120);
        assert_eq!(report.scene, Some(SceneId::Level));
        let polled = latest.lock().unwrap().clone().unwrap();
        assert_eq!(polled.time.tick, report.snapshot.unwrap().time.tick);
    }

    #[test]
    fn test_shutdown_command_stops_loop() {
        let latest: SharedSnapshot = Arc::new(Mutex::new(None));
        let options = LoopOptions {
            max_ticks: u64::MAX,
            realtime: true,
        };
        let dir = TempDir::new().unwrap();
        let (tx, handle) = spawn_game_loop(temp_settings(&dir), options, latest).unwrap();
        tx.send(HostCommand::Shutdown).unwrap();
        let report = handle.join().unwrap();
        assert!(report.ticks < 1000);
    }

    #[test]
    fn test_tick_duration_constant() {
        // 60Hz = 16.666ms per tick
        let expected_nanos = 1_000_000_000u64 / 60;
        assert_eq!(TICK_DURATION.as_nanos(), expected_nanos as u128);
    }
}
