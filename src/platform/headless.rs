//! Headless adapters for the native build
//!
//! No window, no DOM: the scene tracks which entities are live and the HUD
//! remembers what it was told, both reporting through `log`.

use std::collections::HashSet;

use super::{FrameSnapshot, Hud, Scene, SceneEntity};
use crate::sim::EntityRef;

/// Scene that only keeps the set of live entities
#[derive(Debug, Default)]
pub struct LogScene {
    live: HashSet<EntityRef>,
    frames: u64,
    last_frame: Option<FrameSnapshot>,
}

impl LogScene {
    pub fn live(&self) -> &HashSet<EntityRef> {
        &self.live
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn last_frame(&self) -> Option<&FrameSnapshot> {
        self.last_frame.as_ref()
    }
}

impl Scene for LogScene {
    fn add(&mut self, entity: SceneEntity<'_>) {
        if let SceneEntity::Obstacle(obstacle) = entity {
            log::trace!(
                "+ obstacle {} {:?} #{:06x}",
                obstacle.id,
                obstacle.shape,
                obstacle.color
            );
        }
        self.live.insert(entity.entity_ref());
    }

    fn remove(&mut self, entity: EntityRef) {
        if self.live.remove(&entity) {
            log::trace!("- {:?}", entity);
        }
    }

    fn present(&mut self, frame: &FrameSnapshot) {
        self.frames += 1;
        self.last_frame = Some(frame.clone());
    }
}

/// HUD that remembers the last values shown
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LogHud {
    pub score: u64,
    pub level: u32,
    pub power_up_visible: bool,
    /// Final score while the game-over panel is up
    pub game_over: Option<u64>,
}

impl Hud for LogHud {
    fn set_score(&mut self, score: u64) {
        self.score = score;
    }

    fn set_level(&mut self, level: u32) {
        if level != self.level {
            log::info!("Level {}", level);
        }
        self.level = level;
    }

    fn show_power_up(&mut self, visible: bool) {
        self.power_up_visible = visible;
    }

    fn show_game_over(&mut self, final_score: u64) {
        log::info!("GAME OVER - score {}", final_score);
        self.game_over = Some(final_score);
    }

    fn hide_game_over(&mut self) {
        self.game_over = None;
    }
}
