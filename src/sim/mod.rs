//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through `tick`
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod difficulty;
pub mod integrator;
pub mod scheduler;
pub mod spawner;
pub mod state;
pub mod tick;

pub use autopilot::autopilot_input;
pub use collision::check_collision;
pub use integrator::{TickInput, integrate};
pub use scheduler::{Scheduler, TimerKind};
pub use spawner::{spawn_initial_obstacles, spawn_obstacle_wave, spawn_power_up};
pub use state::{
    Ball, BallLook, CameraTarget, EntityRef, GameEvent, GamePhase, GameSession, GameState,
    Obstacle, ObstacleShape, PowerUp, TrackSegment,
};
pub use tick::tick;
