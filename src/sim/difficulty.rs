//! Scoring, power-ups and difficulty escalation
//!
//! Score comes from three places: a point per tick survived, a bonus per
//! obstacle that passes untouched, and a bonus per power-up. Survival and
//! avoidance points both count for the same obstacle. Difficulty rises on a
//! timer: each level speeds the track up and shortens the obstacle spawn
//! interval.

use super::scheduler::TimerKind;
use super::state::{BallLook, GameEvent, GameSession, GameState};
use crate::tuning::Tuning;

/// Add points to the running score
#[inline]
pub fn award(session: &mut GameSession, points: u64) {
    session.score = session.score.saturating_add(points);
}

/// Pick up a power-up: bonus points and a fresh invulnerability window.
///
/// Picking one up while already powered restarts the window rather than
/// extending it.
pub fn activate_power_up(state: &mut GameState) {
    state.ball.powered = true;
    state.ball.power_up_ms = state.tuning.power_up_duration_ms;
    state.ball.look = BallLook::PowerUp;
    award(&mut state.session, state.tuning.pickup_bonus);
    state.events.push(GameEvent::PowerUpCollected);
    log::debug!("Power-up collected, score {}", state.session.score);
}

/// Count down the invulnerability window
pub fn update_power_up(state: &mut GameState, dt_ms: u32) {
    if !state.ball.powered {
        return;
    }
    state.ball.power_up_ms = state.ball.power_up_ms.saturating_sub(dt_ms);
    if state.ball.power_up_ms == 0 {
        state.ball.powered = false;
        state.ball.look = match state.ball.look {
            // Glow outlives the gold tint
            BallLook::LevelUp { .. } => BallLook::LevelUp { powered: false },
            _ => BallLook::Neutral,
        };
        state.events.push(GameEvent::PowerUpExpired);
        log::debug!("Power-up expired");
    }
}

/// Raise the level by one: faster track, denser waves, brief glow on the ball
pub fn escalate(state: &mut GameState) {
    if !state.is_active() {
        return;
    }

    let session = &mut state.session;
    session.level += 1;
    session.max_speed += state.tuning.max_speed_step;
    session.base_speed += state.tuning.base_speed_step;
    // Braking floor rose with the base speed
    session.speed = session.speed.max(session.speed_floor()).min(session.max_speed);
    let level = session.level;

    let interval = state.tuning.obstacle_interval_for_level(level);
    state.scheduler.every(TimerKind::SpawnObstacles, interval);

    state.ball.look = BallLook::LevelUp {
        powered: state.ball.powered,
    };
    state
        .scheduler
        .once(TimerKind::EndLevelUpFlash, state.tuning.level_up_flash_ms);

    state.events.push(GameEvent::LevelUp { level });
    log::info!(
        "Level {}: speed {:.3} (base {:.2}, max {:.2}), obstacles every {} ms",
        level,
        state.session.speed,
        state.session.base_speed,
        state.session.max_speed,
        interval
    );
}

/// The level-up glow is over: back to gold if still powered, else plain
pub fn end_level_up_flash(state: &mut GameState) {
    state.ball.look = if state.ball.powered {
        BallLook::PowerUp
    } else {
        BallLook::Neutral
    };
}

/// Arm the session timers at their base intervals
pub fn arm_timers(state: &mut GameState) {
    let tuning: &Tuning = &state.tuning;
    let scheduler = &mut state.scheduler;
    scheduler.every(TimerKind::SpawnObstacles, tuning.obstacle_interval_ms);
    scheduler.every(TimerKind::SpawnPowerUp, tuning.power_up_interval_ms);
    scheduler.every(TimerKind::Escalate, tuning.difficulty_interval_ms);
}
