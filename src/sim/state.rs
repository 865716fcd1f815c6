//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives in [`GameState`]; there are no
//! globals. Entity types are serializable so adapters can ship them as-is.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::scheduler::Scheduler;
use crate::consts::*;
use crate::tuning::{Tuning, TuningError};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball rolling, timers running
    Active,
    /// Run ended, waiting for a restart request
    GameOver,
}

/// How the ball should be drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BallLook {
    #[default]
    Neutral,
    /// Gold tint while invulnerable
    PowerUp,
    /// Brief green glow after a level up, over the gold tint if still powered
    LevelUp { powered: bool },
}

impl BallLook {
    /// Base colour (0xRRGGBB)
    pub fn color(self) -> u32 {
        match self {
            BallLook::PowerUp | BallLook::LevelUp { powered: true } => POWER_UP_COLOR,
            BallLook::Neutral | BallLook::LevelUp { powered: false } => BALL_COLOR,
        }
    }

    /// Emissive glow colour and intensity, if any
    pub fn emissive(self) -> Option<(u32, f32)> {
        match self {
            BallLook::Neutral => None,
            BallLook::PowerUp => Some((POWER_UP_COLOR, 0.5)),
            BallLook::LevelUp { .. } => Some((LEVEL_UP_GLOW, 0.5)),
        }
    }
}

/// The player's ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec3,
    pub rotation: Vec3,
    /// Vertical velocity while airborne
    pub vel_y: f32,
    pub jumping: bool,
    /// Invulnerable while set
    pub powered: bool,
    /// Invulnerability left (ms)
    pub power_up_ms: u32,
    pub look: BallLook,
}

impl Ball {
    /// Ball resting at the track centre
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec3::new(0.0, tuning.ground_y(), 0.0),
            rotation: Vec3::ZERO,
            vel_y: 0.0,
            jumping: false,
            powered: false,
            power_up_ms: 0,
            look: BallLook::Neutral,
        }
    }

    /// On or below the ground
    pub fn grounded(&self, tuning: &Tuning) -> bool {
        self.pos.y <= tuning.ground_y()
    }
}

/// Obstacle geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ObstacleShape {
    Box { size: f32 },
    Cylinder { radius: f32, height: f32 },
    Sphere { radius: f32 },
}

impl ObstacleShape {
    /// Height of the shape's centre when it sits on the track
    pub fn rest_height(&self) -> f32 {
        match *self {
            ObstacleShape::Box { size } => size / 2.0,
            ObstacleShape::Cylinder { height, .. } => height / 2.0,
            ObstacleShape::Sphere { radius } => radius,
        }
    }
}

/// An obstacle entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub shape: ObstacleShape,
    pub color: u32,
    pub pos: Vec3,
    pub rotation: Vec3,
    /// Rotation per tick on each axis
    pub spin: Vec3,
    /// Spawned lifted off the track
    pub requires_jump: bool,
    /// Touched the ball while it was invulnerable
    #[serde(default)]
    pub grazed: bool,
}

impl Obstacle {
    /// Roll toward the player and spin
    pub fn advance(&mut self, speed: f32) {
        self.pos.z += speed;
        self.rotation += self.spin;
    }
}

/// A collectible power-up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub pos: Vec3,
    pub rotation: Vec3,
    pub spin: Vec3,
    /// Phase offset of the bob animation (radians)
    pub float_phase: f32,
    /// Bob angular speed (radians per ms)
    pub float_speed: f32,
    pub float_height: f32,
}

impl PowerUp {
    /// Roll toward the player, spin and bob around the base height
    pub fn advance(&mut self, speed: f32, elapsed_ms: u64) {
        self.pos.z += speed;
        self.rotation += self.spin;
        let angle = elapsed_ms as f64 * self.float_speed as f64 + self.float_phase as f64;
        self.pos.y = POWER_UP_BASE_HEIGHT + angle.sin() as f32 * self.float_height;
    }
}

/// A recycled ground tile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackSegment {
    pub z: f32,
}

impl TrackSegment {
    /// Lay out `count` segments back to back starting at the player
    pub fn layout(tuning: &Tuning) -> Vec<Self> {
        (0..tuning.segment_count)
            .map(|i| TrackSegment {
                z: -(i as f32) * tuning.track_length,
            })
            .collect()
    }

    /// Scroll toward the player; once half a tile has passed, jump to the back
    /// of the line
    pub fn advance(&mut self, speed: f32, tuning: &Tuning) {
        self.z += speed;
        if self.z > tuning.track_length / 2.0 {
            self.z -= tuning.track_length * tuning.segment_count as f32;
        }
    }
}

/// Score, level and speed of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    pub score: u64,
    pub level: u32,
    pub speed: f32,
    pub base_speed: f32,
    pub max_speed: f32,
}

impl GameSession {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            score: 0,
            level: 1,
            speed: tuning.base_speed,
            base_speed: tuning.base_speed,
            max_speed: tuning.max_speed,
        }
    }

    /// Slowest the player may brake to
    pub fn speed_floor(&self) -> f32 {
        self.base_speed * 0.5
    }
}

/// Where the camera sits and what it looks at
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraTarget {
    pub position: Vec3,
    pub look_at: Vec3,
}

impl CameraTarget {
    /// Chase camera behind and above the ball
    pub fn follow(ball: Vec3, tuning: &Tuning) -> Self {
        Self {
            position: ball + tuning.camera_offset,
            look_at: ball - Vec3::Z * tuning.camera_look_ahead,
        }
    }
}

/// Handle to a spawned entity, for scene add/remove
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityRef {
    Obstacle(u32),
    PowerUp(u32),
}

/// Things that happened during a tick, drained by the frame driver
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Spawned(EntityRef),
    Removed(EntityRef),
    /// Obstacle passed the player untouched
    ObstacleAvoided { id: u32 },
    PowerUpCollected,
    PowerUpExpired,
    LevelUp { level: u32 },
    GameOver { final_score: u64 },
    Restarted,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    /// Run seed for reproducibility
    pub seed: u64,
    pub phase: GamePhase,
    pub session: GameSession,
    pub ball: Ball,
    /// Live obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    /// Live power-ups in spawn order
    pub power_ups: Vec<PowerUp>,
    pub segments: Vec<TrackSegment>,
    pub camera: CameraTarget,
    pub scheduler: Scheduler,
    /// Active ticks this session
    pub time_ticks: u64,
    /// Active time this session (ms)
    pub elapsed_ms: u64,
    /// Pending events for adapters
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Start a session with default tuning
    pub fn new(seed: u64) -> Self {
        Self::build(seed, Tuning::default())
    }

    /// Start a session with custom tuning, rejecting unplayable values
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::build(seed, tuning))
    }

    fn build(seed: u64, tuning: Tuning) -> Self {
        let ball = Ball::new(&tuning);
        let mut state = Self {
            seed,
            phase: GamePhase::Active,
            session: GameSession::new(&tuning),
            camera: CameraTarget::follow(ball.pos, &tuning),
            ball,
            obstacles: Vec::new(),
            power_ups: Vec::new(),
            segments: TrackSegment::layout(&tuning),
            scheduler: Scheduler::new(),
            time_ticks: 0,
            elapsed_ms: 0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
            tuning,
        };
        state.start();
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_active(&self) -> bool {
        self.phase == GamePhase::Active
    }

    /// Take the events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_active_with_opening_field() {
        let state = GameState::new(7);
        assert_eq!(state.phase, GamePhase::Active);
        assert_eq!(state.session.score, 0);
        assert_eq!(state.session.level, 1);
        assert_eq!(state.obstacles.len(), 10);
        assert!(state.power_ups.is_empty());
        assert_eq!(state.segments.len(), 3);
        assert_eq!(state.ball.pos, Vec3::new(0.0, 0.3, 0.0));
    }

    #[test]
    fn test_with_tuning_rejects_invalid() {
        let tuning = Tuning {
            segment_count: 0,
            ..Default::default()
        };
        assert!(GameState::with_tuning(1, tuning).is_err());
    }

    #[test]
    fn test_segment_recycles_to_back() {
        let tuning = Tuning::default();
        let mut segment = TrackSegment { z: 49.9 };
        segment.advance(0.2, &tuning);
        assert!((segment.z - (50.1 - 300.0)).abs() < 1e-3);
    }

    #[test]
    fn test_rest_height_per_shape() {
        assert_eq!(ObstacleShape::Box { size: 0.8 }.rest_height(), 0.4);
        assert_eq!(
            ObstacleShape::Cylinder {
                radius: 0.4,
                height: 1.2
            }
            .rest_height(),
            0.6
        );
        assert_eq!(ObstacleShape::Sphere { radius: 0.5 }.rest_height(), 0.5);
    }

    #[test]
    fn test_power_up_bobs_around_base_height() {
        let mut power_up = PowerUp {
            id: 1,
            pos: Vec3::new(0.0, 1.0, -10.0),
            rotation: Vec3::ZERO,
            spin: Vec3::new(0.02, 0.03, 0.01),
            float_phase: 0.0,
            float_speed: POWER_UP_FLOAT_SPEED,
            float_height: POWER_UP_FLOAT_HEIGHT,
        };
        for t in 0..200 {
            power_up.advance(0.2, t * 16);
            assert!((power_up.pos.y - 1.0).abs() <= 0.2 + 1e-5);
        }
        assert!((power_up.pos.z - 30.0).abs() < 1e-3);
    }

    #[test]
    fn test_level_up_glow_keeps_base_colour() {
        let powered = BallLook::LevelUp { powered: true };
        assert_eq!(powered.color(), POWER_UP_COLOR);
        assert_eq!(powered.emissive(), Some((LEVEL_UP_GLOW, 0.5)));

        let plain = BallLook::LevelUp { powered: false };
        assert_eq!(plain.color(), BALL_COLOR);
        assert_eq!(plain.emissive(), Some((LEVEL_UP_GLOW, 0.5)));
    }

    #[test]
    fn test_camera_follows_ball() {
        let tuning = Tuning::default();
        let camera = CameraTarget::follow(Vec3::new(1.0, 0.3, 0.0), &tuning);
        assert_eq!(camera.position, Vec3::new(1.0, 3.3, 6.0));
        assert_eq!(camera.look_at, Vec3::new(1.0, 0.3, -2.0));
    }
}
