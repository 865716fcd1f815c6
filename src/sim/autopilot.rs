//! Idle/demo mode - the game plays itself
//!
//! Reads the state and produces the input a cautious player would: dodge the
//! nearest obstacle in the ball's lane, hop when there is no time left to
//! dodge, drift toward power-ups when the lane is clear.

use super::integrator::TickInput;
use super::state::{GameState, Obstacle};

/// How far ahead (negative z) obstacles are considered
const LOOK_AHEAD: f32 = 14.0;
/// Lateral distance at which an obstacle counts as being in the ball's lane
const LANE_HALF_WIDTH: f32 = 0.9;
/// Closer than this and a dodge will not finish in time
const JUMP_DISTANCE: f32 = 3.0;
/// Steering dead zone
const STEER_TOLERANCE: f32 = 0.05;

/// Input for this tick
pub fn autopilot_input(state: &GameState) -> TickInput {
    let ball = state.ball.pos;
    let limit = state.tuning.lateral_limit();

    let threat = state
        .obstacles
        .iter()
        .filter(|o| o.pos.z < ball.z + 0.5 && o.pos.z > ball.z - LOOK_AHEAD)
        .filter(|o| (o.pos.x - ball.x).abs() < LANE_HALF_WIDTH)
        .max_by(|a, b| a.pos.z.total_cmp(&b.pos.z));

    let mut input = TickInput::default();

    let target_x = match threat {
        Some(obstacle) => {
            if ball.z - obstacle.pos.z < JUMP_DISTANCE
                && (obstacle.pos.x - ball.x).abs() < state.tuning.collision_threshold
            {
                input.jump = true;
            }
            Some(dodge_target(obstacle, ball.x, limit))
        }
        None => state
            .power_ups
            .iter()
            .filter(|p| p.pos.z < ball.z && p.pos.z > ball.z - LOOK_AHEAD)
            .max_by(|a, b| a.pos.z.total_cmp(&b.pos.z))
            .map(|p| p.pos.x),
    };

    if let Some(target) = target_x {
        input.left = target < ball.x - STEER_TOLERANCE;
        input.right = target > ball.x + STEER_TOLERANCE;
    }
    input
}

/// Side of the obstacle to pass on: the one the ball is already leaning
/// toward, unless that side runs off the track
fn dodge_target(obstacle: &Obstacle, ball_x: f32, limit: f32) -> f32 {
    let left = obstacle.pos.x - LANE_HALF_WIDTH - 0.1;
    let right = obstacle.pos.x + LANE_HALF_WIDTH + 0.1;
    let prefer_left = ball_x <= obstacle.pos.x;
    match (prefer_left, left >= -limit, right <= limit) {
        (true, true, _) | (false, true, false) => left,
        _ => right,
    }
}
