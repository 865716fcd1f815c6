//! Game balance values
//!
//! Every number the simulation uses to move, spawn and score lives here so a
//! run can be rebalanced from a JSON file without touching code. Missing fields
//! fall back to the defaults.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::MAX_WAVE_SIZE;

/// Rejected tuning values
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("invalid tuning json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{field} must be positive (got {value})")]
    NotPositive { field: &'static str, value: f64 },

    #[error("base speed {base} exceeds max speed {max}")]
    SpeedRange { base: f32, max: f32 },

    #[error(
        "{count} obstacles spaced {spacing} apart do not fit in a spawn band {band} wide"
    )]
    SpacingInfeasible { count: usize, spacing: f32, band: f32 },

    #[error("track needs at least one segment")]
    NoSegments,
}

/// Tunable gameplay values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Track ===
    /// Width of the drivable track
    pub track_width: f32,
    /// Length of one ground segment
    pub track_length: f32,
    /// Number of recycled ground segments
    pub segment_count: usize,
    /// Fraction of the track width obstacles and power-ups spawn in
    pub spawn_band: f32,
    /// Entities past this z are behind the player and get culled
    pub despawn_z: f32,

    // === Ball ===
    pub ball_radius: f32,
    /// Lateral distance per tick while steering
    pub lateral_step: f32,
    /// Gap kept between the ball and the track edge
    pub edge_margin: f32,
    pub jump_velocity: f32,
    pub gravity: f32,
    /// Lean added per tick while steering (radians)
    pub lean_step: f32,
    /// Lean decay factor per tick while not steering
    pub lean_decay: f32,

    // === Speed ===
    pub base_speed: f32,
    pub max_speed: f32,
    pub acceleration: f32,
    pub max_speed_step: f32,
    pub base_speed_step: f32,

    // === Collision ===
    pub collision_threshold: f32,
    pub min_obstacle_spacing: f32,

    // === Scoring ===
    pub avoid_bonus: u64,
    pub pickup_bonus: u64,

    // === Timers (ms) ===
    pub tick_ms: u32,
    pub obstacle_interval_ms: u32,
    pub min_obstacle_interval_ms: u32,
    pub obstacle_interval_step_ms: u32,
    pub power_up_interval_ms: u32,
    pub difficulty_interval_ms: u32,
    pub power_up_duration_ms: u32,
    pub level_up_flash_ms: u32,

    // === Opening field ===
    pub initial_waves: u32,
    pub initial_wave_z: f32,
    pub initial_wave_spacing: f32,

    // === Camera ===
    pub camera_offset: Vec3,
    /// How far ahead of the ball the camera looks
    pub camera_look_ahead: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            track_width: 5.0,
            track_length: 100.0,
            segment_count: 3,
            spawn_band: 0.8,
            despawn_z: 10.0,

            ball_radius: 0.3,
            lateral_step: 0.1,
            edge_margin: 0.5,
            jump_velocity: 0.2,
            gravity: 0.01,
            lean_step: 0.05,
            lean_decay: 0.95,

            base_speed: 0.2,
            max_speed: 0.5,
            acceleration: 0.0005,
            max_speed_step: 0.05,
            base_speed_step: 0.02,

            collision_threshold: 0.7,
            min_obstacle_spacing: 1.0,

            avoid_bonus: 10,
            pickup_bonus: 50,

            tick_ms: crate::consts::TICK_MS,
            obstacle_interval_ms: 2000,
            min_obstacle_interval_ms: 500,
            obstacle_interval_step_ms: 200,
            power_up_interval_ms: 10_000,
            difficulty_interval_ms: 20_000,
            power_up_duration_ms: 5000,
            level_up_flash_ms: 1000,

            initial_waves: 10,
            initial_wave_z: -20.0,
            initial_wave_spacing: 10.0,

            camera_offset: Vec3::new(0.0, 3.0, 6.0),
            camera_look_ahead: 2.0,
        }
    }
}

impl Tuning {
    /// Parse overrides from JSON and validate them
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check that the values describe a playable game
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("track_width", self.track_width as f64),
            ("track_length", self.track_length as f64),
            ("spawn_band", self.spawn_band as f64),
            ("ball_radius", self.ball_radius as f64),
            ("base_speed", self.base_speed as f64),
            ("collision_threshold", self.collision_threshold as f64),
            ("tick_ms", self.tick_ms as f64),
            ("obstacle_interval_ms", self.obstacle_interval_ms as f64),
            ("min_obstacle_interval_ms", self.min_obstacle_interval_ms as f64),
            ("power_up_interval_ms", self.power_up_interval_ms as f64),
            ("difficulty_interval_ms", self.difficulty_interval_ms as f64),
        ];
        for (field, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(TuningError::NotPositive { field, value });
            }
        }

        if self.segment_count == 0 {
            return Err(TuningError::NoSegments);
        }

        if self.base_speed > self.max_speed {
            return Err(TuningError::SpeedRange {
                base: self.base_speed,
                max: self.max_speed,
            });
        }

        // A full wave must always fit, otherwise placement could starve
        let band = self.spawn_width();
        if self.min_obstacle_spacing * MAX_WAVE_SIZE as f32 > band {
            return Err(TuningError::SpacingInfeasible {
                count: MAX_WAVE_SIZE,
                spacing: self.min_obstacle_spacing,
                band,
            });
        }

        Ok(())
    }

    /// Width of the band entities spawn in
    pub fn spawn_width(&self) -> f32 {
        self.track_width * self.spawn_band
    }

    /// Furthest the ball may stray from the track centre
    pub fn lateral_limit(&self) -> f32 {
        self.track_width / 2.0 - self.edge_margin
    }

    /// Resting height of the ball's centre
    pub fn ground_y(&self) -> f32 {
        self.ball_radius
    }

    /// Where timed spawns appear, well past the visible horizon
    pub fn spawn_z(&self) -> f32 {
        -self.track_length * 1.5
    }

    /// Obstacle spawn interval for a level: shortens by a fixed step per level
    /// down to a floor
    pub fn obstacle_interval_for_level(&self, level: u32) -> u32 {
        let step = level
            .saturating_sub(1)
            .saturating_mul(self.obstacle_interval_step_ms);
        self.obstacle_interval_ms
            .saturating_sub(step)
            .max(self.min_obstacle_interval_ms)
    }
}
