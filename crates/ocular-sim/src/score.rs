//! Running score for a level.

use ocular_core::state::ScoreView;

#[derive(Debug, Clone, Default)]
pub struct ScoreState {
    pub points: u32,
    pub enemies_defeated: u32,
    pub projectiles_fired: u32,
}

impl ScoreState {
    pub fn view(&self) -> ScoreView {
        ScoreView {
            points: self.points,
            enemies_defeated: self.enemies_defeated,
            projectiles_fired: self.projectiles_fired,
        }
    }
}
