//! Frame driver
//!
//! Owns the session plus the platform adapters. Each `frame` samples input,
//! runs one tick and forwards what happened to the scene and HUD.

use crate::platform::input::Keyboard;
use crate::platform::{FrameSnapshot, Hud, Scene, SceneEntity};
use crate::sim::{EntityRef, GameEvent, GameState, TickInput, autopilot_input};

/// Game instance wiring a [`GameState`] to a scene and a HUD
pub struct Game<S: Scene, H: Hud> {
    state: GameState,
    keyboard: Keyboard,
    scene: S,
    hud: H,
    /// Play by itself instead of reading the keyboard
    autopilot: bool,
    last_score: Option<u64>,
    last_level: Option<u32>,
}

impl<S: Scene, H: Hud> Game<S, H> {
    /// Take over a freshly started state; its opening obstacles are handed to
    /// the scene right away
    pub fn new(state: GameState, scene: S, hud: H) -> Self {
        let mut game = Self {
            state,
            keyboard: Keyboard::new(),
            scene,
            hud,
            autopilot: false,
            last_score: None,
            last_level: None,
        };
        game.hud.hide_game_over();
        game.hud.show_power_up(false);
        game.dispatch();
        game
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn keyboard_mut(&mut self) -> &mut Keyboard {
        &mut self.keyboard
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn hud(&self) -> &H {
        &self.hud
    }

    pub fn set_autopilot(&mut self, enabled: bool) {
        self.autopilot = enabled;
    }

    /// One display frame: one simulation tick. Does nothing visible after
    /// game over until [`Game::restart`].
    pub fn frame(&mut self) {
        let keys = self.keyboard.snapshot();
        if !self.state.is_active() {
            return;
        }

        let input: TickInput = if self.autopilot {
            autopilot_input(&self.state)
        } else {
            keys
        };
        let dt_ms = self.state.tuning.tick_ms;
        self.state.tick(&input, dt_ms);

        self.dispatch();
        self.scene.present(&FrameSnapshot::capture(&self.state));
    }

    /// Restart after game over. Returns whether a new session began.
    pub fn restart(&mut self) -> bool {
        if !self.state.restart() {
            return false;
        }
        self.keyboard.clear();
        self.dispatch();
        true
    }

    /// Forward pending events to the adapters, then sync the score/level text
    fn dispatch(&mut self) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::Spawned(entity) => {
                    if let Some(found) = find_entity(&self.state, entity) {
                        self.scene.add(found);
                    }
                }
                GameEvent::Removed(entity) => self.scene.remove(entity),
                GameEvent::ObstacleAvoided { .. } => {}
                GameEvent::PowerUpCollected => self.hud.show_power_up(true),
                GameEvent::PowerUpExpired => self.hud.show_power_up(false),
                GameEvent::LevelUp { level } => {
                    self.hud.set_level(level);
                    self.last_level = Some(level);
                }
                GameEvent::GameOver { final_score } => self.hud.show_game_over(final_score),
                GameEvent::Restarted => {
                    self.hud.hide_game_over();
                    self.hud.show_power_up(false);
                }
            }
        }

        let session = &self.state.session;
        if self.last_score != Some(session.score) {
            self.hud.set_score(session.score);
            self.last_score = Some(session.score);
        }
        if self.last_level != Some(session.level) {
            self.hud.set_level(session.level);
            self.last_level = Some(session.level);
        }
    }
}

/// Look up a live entity; `None` if it already left the field
fn find_entity(state: &GameState, entity: EntityRef) -> Option<SceneEntity<'_>> {
    match entity {
        EntityRef::Obstacle(id) => state
            .obstacles
            .iter()
            .find(|o| o.id == id)
            .map(SceneEntity::Obstacle),
        EntityRef::PowerUp(id) => state
            .power_ups
            .iter()
            .find(|p| p.id == id)
            .map(SceneEntity::PowerUp),
    }
}
