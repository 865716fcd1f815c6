//! Ball physics and input integration
//!
//! Turns one input snapshot into ball movement: lateral steering, speed
//! control, the jump arc and the cosmetic spin/lean. Pure and deterministic.

use serde::{Deserialize, Serialize};

use super::state::{Ball, GameSession};
use crate::tuning::Tuning;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    /// Steer left (held)
    pub left: bool,
    /// Steer right (held)
    pub right: bool,
    /// Speed up (held)
    pub accelerate: bool,
    /// Brake (held)
    pub decelerate: bool,
    /// Jump requested this tick (edge)
    pub jump: bool,
}

/// Advance the ball and session speed by one tick
pub fn integrate(ball: &mut Ball, session: &mut GameSession, input: &TickInput, tuning: &Tuning) {
    steer(ball, input, tuning);
    apply_throttle(session, input, tuning);
    update_jump(ball, input, tuning);
    spin(ball, session.speed, input, tuning);
}

fn steer(ball: &mut Ball, input: &TickInput, tuning: &Tuning) {
    let limit = tuning.lateral_limit();
    if input.left {
        ball.pos.x = (ball.pos.x - tuning.lateral_step).max(-limit);
    }
    if input.right {
        ball.pos.x = (ball.pos.x + tuning.lateral_step).min(limit);
    }
}

fn apply_throttle(session: &mut GameSession, input: &TickInput, tuning: &Tuning) {
    if input.accelerate && session.speed < session.max_speed {
        session.speed = (session.speed + tuning.acceleration).min(session.max_speed);
    }
    let floor = session.speed_floor();
    if input.decelerate && session.speed > floor {
        session.speed = (session.speed - tuning.acceleration * 2.0).max(floor);
    }
}

fn update_jump(ball: &mut Ball, input: &TickInput, tuning: &Tuning) {
    let ground = tuning.ground_y();

    if input.jump && !ball.jumping && ball.grounded(tuning) {
        ball.jumping = true;
        ball.vel_y = tuning.jump_velocity;
    }

    if ball.jumping {
        ball.vel_y -= tuning.gravity;
        ball.pos.y += ball.vel_y;

        if ball.pos.y <= ground && ball.vel_y < 0.0 {
            ball.pos.y = ground;
            ball.vel_y = 0.0;
            ball.jumping = false;
        }
    }
}

fn spin(ball: &mut Ball, speed: f32, input: &TickInput, tuning: &Tuning) {
    // Roll forward
    ball.rotation.x -= speed * 2.0;

    // Lean into turns, settle back when straight
    if input.left {
        ball.rotation.z += tuning.lean_step;
    } else if input.right {
        ball.rotation.z -= tuning.lean_step;
    } else {
        ball.rotation.z *= tuning.lean_decay;
    }
}
