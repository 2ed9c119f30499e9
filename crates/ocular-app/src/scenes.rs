//! Typed scene registry and the scenes of a headless run.
//!
//! Scenes are registered under a `SceneId` and switched by id. The level
//! scene translates the level's events into host actions: checkpoints are
//! written to the save slot and scene requests become scene switches.

use std::collections::HashMap;

use glam::Vec2;
use log::{info, warn};

use ocular_campaign::{HighScoreTable, SaveData, SaveSystem};
use ocular_core::canvas::{Canvas, Color};
use ocular_core::commands::PlayerInput;
use ocular_core::events::{LevelEvent, SceneRequest};
use ocular_core::state::LevelSnapshot;
use ocular_sim::{Level, ResourceManager};
use ocular_tilemap::TileMap;

use crate::headless::{autopilot, FsAssetLoader};
use crate::state::HostSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneId {
    MainMenu,
    Level,
    GameOver,
    Victory,
    Leaderboard,
}

/// Services and run state shared by every scene.
pub struct SceneContext {
    pub settings: HostSettings,
    pub resources: ResourceManager<FsAssetLoader>,
    pub saves: SaveSystem,
    pub scores: HighScoreTable,
    /// Manual input queued since the last frame.
    pub pending_input: Vec<PlayerInput>,
    /// Drive the player with the autopilot until manual input arrives.
    pub autopilot: bool,
    pub time_scale: Option<f32>,
    pub last_score: u32,
    pub latest: Option<LevelSnapshot>,
    /// Set once the run has nothing left to show.
    pub finished: bool,
}

impl SceneContext {
    pub fn new(settings: HostSettings) -> Self {
        let resources = ResourceManager::new(FsAssetLoader::new(settings.assets.clone()));
        let saves = SaveSystem::new(settings.save_path.clone());
        let scores = HighScoreTable::load(settings.scores_path.clone());
        Self {
            settings,
            resources,
            saves,
            scores,
            pending_input: Vec::new(),
            autopilot: true,
            time_scale: None,
            last_score: 0,
            latest: None,
            finished: false,
        }
    }
}

pub trait Scene {
    fn enter(&mut self, _ctx: &mut SceneContext) {}

    /// Advance one frame. Returning a scene id switches to it.
    fn update(&mut self, ctx: &mut SceneContext, dt: f32) -> Option<SceneId>;

    fn draw(&self, canvas: &mut dyn Canvas);

    fn exit(&mut self, _ctx: &mut SceneContext) {}
}

#[derive(Default)]
pub struct SceneRegistry {
    scenes: HashMap<SceneId, Box<dyn Scene>>,
    current: Option<SceneId>,
}

impl SceneRegistry {
    /// Registry holding every scene of a run.
    pub fn standard() -> Self {
        let mut registry = Self::default();
        registry.register(SceneId::MainMenu, Box::new(MainMenuScene));
        registry.register(SceneId::Level, Box::new(LevelScene::default()));
        registry.register(SceneId::GameOver, Box::new(SummaryScene::new("GAME OVER")));
        registry.register(SceneId::Victory, Box::new(SummaryScene::new("VICTORY")));
        registry.register(SceneId::Leaderboard, Box::new(LeaderboardScene::default()));
        registry
    }

    pub fn register(&mut self, id: SceneId, scene: Box<dyn Scene>) {
        self.scenes.insert(id, scene);
    }

    pub fn current(&self) -> Option<SceneId> {
        self.current
    }

    /// Leave the current scene (if any) and enter `id`. Unknown ids are
    /// logged and ignored.
    pub fn switch_to(&mut self, id: SceneId, ctx: &mut SceneContext) {
        if !self.scenes.contains_key(&id) {
            warn!("no scene registered for {id:?}");
            return;
        }
        if let Some(scene) = self.current.and_then(|cur| self.scenes.get_mut(&cur)) {
            scene.exit(ctx);
        }
        info!("entering scene {id:?}");
        self.current = Some(id);
        if let Some(scene) = self.scenes.get_mut(&id) {
            scene.enter(ctx);
        }
    }

    pub fn update(&mut self, ctx: &mut SceneContext, dt: f32) {
        let next = self
            .current
            .and_then(|cur| self.scenes.get_mut(&cur))
            .and_then(|scene| scene.update(ctx, dt));
        if let Some(next) = next {
            self.switch_to(next, ctx);
        }
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        if let Some(scene) = self.current.and_then(|cur| self.scenes.get(&cur)) {
            scene.draw(canvas);
        }
    }
}

/// Starts the run straight away.
pub struct MainMenuScene;

impl Scene for MainMenuScene {
    fn update(&mut self, _ctx: &mut SceneContext, _dt: f32) -> Option<SceneId> {
        Some(SceneId::Level)
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.clear(Color::BLACK);
        canvas.draw_text("OCULAR", Vec2::new(540.0, 300.0), 60.0, Color::WHITE);
    }
}

#[derive(Default)]
pub struct LevelScene {
    level: Option<Level>,
    frame: u32,
}

impl LevelScene {
    fn handle_event(ctx: &mut SceneContext, event: LevelEvent) -> Option<SceneId> {
        match event {
            LevelEvent::Checkpoint {
                wave,
                player_health,
            } => {
                let data = SaveData {
                    wave,
                    player_health,
                };
                if let Err(err) = ctx.saves.save(data) {
                    warn!("checkpoint not saved: {err}");
                }
                None
            }
            LevelEvent::SceneRequest(SceneRequest::GameOver { score }) => {
                ctx.last_score = score;
                Some(SceneId::GameOver)
            }
            LevelEvent::SceneRequest(SceneRequest::Victory { score }) => {
                ctx.last_score = score;
                if let Err(err) = ctx.saves.clear() {
                    warn!("save slot not cleared: {err}");
                }
                Some(SceneId::Victory)
            }
            _ => None,
        }
    }
}

impl Scene for LevelScene {
    fn enter(&mut self, ctx: &mut SceneContext) {
        let config = ctx.settings.config.clone();
        let mut level = if ctx.settings.continue_run {
            let data = ctx.saves.load_or_default();
            Level::continue_from(config, data.wave, data.player_health)
        } else {
            Level::new(config)
        };

        match &ctx.settings.map {
            Some(path) => level.begin_from_file(path, &mut ctx.resources),
            None => level.begin(TileMap::empty(), &mut ctx.resources),
        }
        for event in level.drain_events() {
            Self::handle_event(ctx, event);
        }
        ctx.latest = Some(level.snapshot());
        self.level = Some(level);
        self.frame = 0;
    }

    fn update(&mut self, ctx: &mut SceneContext, dt: f32) -> Option<SceneId> {
        let level = self.level.as_mut()?;

        if let Some(scale) = ctx.time_scale.take() {
            level.set_time_scale(scale);
        }
        if ctx.autopilot {
            if let Some(snapshot) = &ctx.latest {
                level.queue_input(autopilot(snapshot, self.frame));
            }
        } else {
            for input in ctx.pending_input.drain(..) {
                level.queue_input(input);
            }
        }

        level.update(dt);
        self.frame += 1;
        ctx.latest = Some(level.snapshot());

        let mut next = None;
        for event in level.drain_events() {
            next = next.or(Self::handle_event(ctx, event));
        }
        next
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        if let Some(level) = &self.level {
            level.draw(canvas);
        }
    }

    fn exit(&mut self, ctx: &mut SceneContext) {
        if let Some(mut level) = self.level.take() {
            level.end(&mut ctx.resources);
        }
    }
}

/// End-of-run card. Records the score if it makes the table.
pub struct SummaryScene {
    title: &'static str,
    score: u32,
}

impl SummaryScene {
    pub fn new(title: &'static str) -> Self {
        Self { title, score: 0 }
    }
}

impl Scene for SummaryScene {
    fn enter(&mut self, ctx: &mut SceneContext) {
        self.score = ctx.last_score;
        info!("{}: final score {}", self.title, self.score);
        if ctx.scores.is_high_score(self.score) {
            let name = ctx.settings.player_name.clone();
            if let Err(err) = ctx.scores.add(&name, self.score) {
                warn!("high score not recorded: {err}");
            }
        }
    }

    fn update(&mut self, _ctx: &mut SceneContext, _dt: f32) -> Option<SceneId> {
        Some(SceneId::Leaderboard)
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.clear(Color::BLACK);
        canvas.draw_text(self.title, Vec2::new(500.0, 300.0), 60.0, Color::RED);
        canvas.draw_text(
            &format!("Score {}", self.score),
            Vec2::new(500.0, 380.0),
            30.0,
            Color::WHITE,
        );
    }
}

#[derive(Default)]
pub struct LeaderboardScene {
    lines: Vec<String>,
}

impl Scene for LeaderboardScene {
    fn enter(&mut self, ctx: &mut SceneContext) {
        self.lines = ctx
            .scores
            .entries()
            .iter()
            .enumerate()
            .map(|(rank, e)| format!("{}. {} {}", rank + 1, e.name, e.score))
            .collect();
        for line in &self.lines {
            info!("{line}");
        }
        ctx.finished = true;
    }

    fn update(&mut self, _ctx: &mut SceneContext, _dt: f32) -> Option<SceneId> {
        None
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.clear(Color::BLACK);
        canvas.draw_text("HIGH SCORES", Vec2::new(500.0, 150.0), 40.0, Color::YELLOW);
        for (i, line) in self.lines.iter().enumerate() {
            let y = 220.0 + i as f32 * 40.0;
            canvas.draw_text(line, Vec2::new(500.0, y), 30.0, Color::WHITE);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use tempfile::tempdir;

    use ocular_sim::{SimConfig, WaveConfig};

    use super::*;

    fn settings(dir: &Path, final_wave: Option<u32>) -> HostSettings {
        HostSettings {
            config: SimConfig {
                final_wave,
                waves: WaveConfig {
                    base_points: 0,
                    points_per_wave: 0,
                    ..Default::default()
                },
                ..Default::default()
            },
            assets: dir.to_path_buf(),
            save_path: dir.join("save.txt"),
            scores_path: dir.join("scores.txt"),
            player_name: "tester".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_victory_run_reaches_leaderboard() {
        let dir = tempdir().unwrap();
        let mut ctx = SceneContext::new(settings(dir.path(), Some(1)));
        let mut registry = SceneRegistry::standard();

        registry.switch_to(SceneId::MainMenu, &mut ctx);
        registry.update(&mut ctx, 1.0 / 60.0);
        assert_eq!(registry.current(), Some(SceneId::Level));
        assert_eq!(ctx.saves.load().unwrap(), SaveData::default());

        registry.update(&mut ctx, 1.0 / 60.0);
        assert_eq!(registry.current(), Some(SceneId::Victory));
        assert!(!ctx.saves.has_save());
        assert_eq!(ctx.resources.loaded_count(), 0);

        registry.update(&mut ctx, 1.0 / 60.0);
        assert_eq!(registry.current(), Some(SceneId::Leaderboard));
        assert!(ctx.finished);
        assert_eq!(ctx.scores.entries()[0].name, "tester");
    }

    #[test]
    fn test_checkpoint_written_on_wave_clear() {
        let dir = tempdir().unwrap();
        let mut ctx = SceneContext::new(settings(dir.path(), None));
        let mut registry = SceneRegistry::standard();

        registry.switch_to(SceneId::Level, &mut ctx);
        registry.update(&mut ctx, 1.0 / 60.0);

        let saved = ctx.saves.load().unwrap();
        assert_eq!(saved.wave, 2);
        assert_eq!(saved.player_health, 70);
    }

    #[test]
    fn test_continue_resumes_saved_wave() {
        let dir = tempdir().unwrap();
        let mut settings = settings(dir.path(), None);
        settings.continue_run = true;
        SaveSystem::new(settings.save_path.clone())
            .save(SaveData {
                wave: 3,
                player_health: 25,
            })
            .unwrap();

        let mut ctx = SceneContext::new(settings);
        let mut registry = SceneRegistry::standard();
        registry.switch_to(SceneId::Level, &mut ctx);

        let snapshot = ctx.latest.as_ref().unwrap();
        assert_eq!(snapshot.wave.number, 3);
        assert_eq!(snapshot.player.health, 25);
    }
}
