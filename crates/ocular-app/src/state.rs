//! Host configuration and the messages the main thread sends to the game
//! loop thread.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use ocular_core::commands::PlayerInput;
use ocular_core::state::LevelSnapshot;
use ocular_sim::SimConfig;

/// Commands sent to the game loop thread.
#[derive(Debug)]
pub enum HostCommand {
    /// Player input; switches the level from autopilot to manual control.
    Input(PlayerInput),
    SetTimeScale(f32),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Latest level snapshot, shared with the game loop thread.
pub type SharedSnapshot = Arc<Mutex<Option<LevelSnapshot>>>;

/// Everything the scenes need to know about this run.
#[derive(Debug, Clone)]
pub struct HostSettings {
    pub config: SimConfig,
    /// `TileInfo` file for the level; `None` plays on the bare arena.
    pub map: Option<PathBuf>,
    /// Directory texture paths are resolved against.
    pub assets: PathBuf,
    pub save_path: PathBuf,
    pub scores_path: PathBuf,
    /// Resume from the save slot instead of starting at wave 1.
    pub continue_run: bool,
    pub player_name: String,
}

impl Default for HostSettings {
    fn default() -> Self {
        Self {
            config: SimConfig::default(),
            map: None,
            assets: PathBuf::from("assets"),
            save_path: PathBuf::from("savegame.txt"),
            scores_path: PathBuf::from("highscores.txt"),
            continue_run: false,
            player_name: "PLAYER".to_string(),
        }
    }
}

/// How the game loop paces itself.
#[derive(Debug, Clone, Copy)]
pub struct LoopOptions {
    /// Stop after this many ticks even if the run is not over.
    pub max_ticks: u64,
    /// Sleep between ticks to hold the nominal rate; otherwise run flat out.
    pub realtime: bool,
}

impl Default for LoopOptions {
    fn default() -> Self {
        Self {
            max_ticks: 60 * 60 * 5,
            realtime: false,
        }
    }
}
