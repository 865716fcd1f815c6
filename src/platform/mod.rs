//! Platform abstraction layer
//!
//! The simulation never draws or touches the DOM. It talks to the outside
//! through three seams:
//! - [`Scene`]: the 3D renderer (entity add/remove, per-frame transforms)
//! - [`Hud`]: score/level text, power-up and game-over panels
//! - [`input::Keyboard`]: key events folded into per-tick input

pub mod headless;
pub mod input;

use glam::Vec3;
use serde::Serialize;

use crate::sim::{BallLook, CameraTarget, EntityRef, GameState, Obstacle, PowerUp};

/// Position and orientation of a drawable
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameSnapshot {
    pub ball: Transform,
    pub ball_look: BallLook,
    /// (id, transform) in spawn order
    pub obstacles: Vec<(u32, Transform)>,
    /// (id, transform) in spawn order
    pub power_ups: Vec<(u32, Transform)>,
    /// Ground tile z positions
    pub segments: Vec<f32>,
    pub camera: CameraTarget,
}

impl FrameSnapshot {
    pub fn capture(state: &GameState) -> Self {
        Self {
            ball: Transform {
                position: state.ball.pos,
                rotation: state.ball.rotation,
            },
            ball_look: state.ball.look,
            obstacles: state
                .obstacles
                .iter()
                .map(|o| {
                    (
                        o.id,
                        Transform {
                            position: o.pos,
                            rotation: o.rotation,
                        },
                    )
                })
                .collect(),
            power_ups: state
                .power_ups
                .iter()
                .map(|p| {
                    (
                        p.id,
                        Transform {
                            position: p.pos,
                            rotation: p.rotation,
                        },
                    )
                })
                .collect(),
            segments: state.segments.iter().map(|s| s.z).collect(),
            camera: state.camera,
        }
    }
}

/// A newly spawned entity, borrowed from the state for mesh creation
#[derive(Debug, Clone, Copy)]
pub enum SceneEntity<'a> {
    Obstacle(&'a Obstacle),
    PowerUp(&'a PowerUp),
}

impl SceneEntity<'_> {
    pub fn entity_ref(&self) -> EntityRef {
        match self {
            SceneEntity::Obstacle(o) => EntityRef::Obstacle(o.id),
            SceneEntity::PowerUp(p) => EntityRef::PowerUp(p.id),
        }
    }
}

/// Render adapter. Calls arrive in event order, but implementations must not
/// depend on it: removing an entity that was never added is a no-op.
pub trait Scene {
    fn add(&mut self, entity: SceneEntity<'_>);
    fn remove(&mut self, entity: EntityRef);
    /// Called once per active tick with the current transforms
    fn present(&mut self, frame: &FrameSnapshot);
}

/// Score display adapter
pub trait Hud {
    fn set_score(&mut self, score: u64);
    fn set_level(&mut self, level: u32);
    fn show_power_up(&mut self, visible: bool);
    fn show_game_over(&mut self, final_score: u64);
    fn hide_game_over(&mut self);
}
