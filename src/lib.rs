//! Ball Runner - an endless-runner arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, physics, collisions, scoring, game state)
//! - `tuning`: Data-driven game balance
//! - `platform`: Input, scene and HUD abstraction
//! - `game`: Frame driver wiring the simulation to the platform adapters

pub mod game;
pub mod platform;
pub mod sim;
pub mod tuning;

pub use game::Game;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants that are not tunable
pub mod consts {
    /// Default simulation step in milliseconds (one display refresh at ~60 Hz)
    pub const TICK_MS: u32 = 16;

    /// Largest number of obstacles a single wave may hold
    pub const MAX_WAVE_SIZE: usize = 3;
    /// Attempts per obstacle when searching for a free lateral slot
    pub const MAX_PLACEMENT_ATTEMPTS: u32 = 32;
    /// Full redraws of a wave before settling for fewer obstacles
    pub const MAX_WAVE_ATTEMPTS: u32 = 16;

    /// Obstacle colour palette (0xRRGGBB)
    pub const OBSTACLE_COLORS: [u32; 5] = [0xff0000, 0x00ff00, 0x0000ff, 0xffff00, 0xff00ff];

    /// Ball colours
    pub const BALL_COLOR: u32 = 0x1E90FF;
    pub const POWER_UP_COLOR: u32 = 0xFFD700;
    pub const LEVEL_UP_GLOW: u32 = 0x00ff00;

    /// Power-up spin (radians per tick)
    pub const POWER_UP_SPIN: [f32; 3] = [0.02, 0.03, 0.01];
    /// Power-up float animation
    pub const POWER_UP_BASE_HEIGHT: f32 = 1.0;
    pub const POWER_UP_FLOAT_SPEED: f32 = 0.01;
    pub const POWER_UP_FLOAT_HEIGHT: f32 = 0.2;
}
