//! Per-frame simulation tick and session lifecycle
//!
//! One tick while active: score a point, integrate the ball, roll obstacles
//! and power-ups toward the player, run due timers, scroll the track and
//! re-aim the camera. A crash ends the tick on the spot.

use super::collision::check_collision;
use super::difficulty::{
    activate_power_up, arm_timers, award, end_level_up_flash, escalate, update_power_up,
};
use super::integrator::{TickInput, integrate};
use super::scheduler::{Scheduler, TimerKind};
use super::spawner::{spawn_initial_obstacles, spawn_obstacle_wave, spawn_power_up};
use super::state::{
    Ball, CameraTarget, EntityRef, GameEvent, GamePhase, GameSession, GameState,
};

/// Advance the game state by one step of `dt_ms` milliseconds
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: u32) {
    // Frozen until restart
    if !state.is_active() {
        return;
    }

    state.time_ticks += 1;
    state.elapsed_ms += dt_ms as u64;
    award(&mut state.session, 1);

    integrate(&mut state.ball, &mut state.session, input, &state.tuning);

    if let Some(id) = advance_obstacles(state) {
        game_over(state, id);
        return;
    }
    advance_power_ups(state);
    update_power_up(state, dt_ms);

    run_timers(state, dt_ms);

    let speed = state.session.speed;
    for segment in &mut state.segments {
        segment.advance(speed, &state.tuning);
    }

    state.camera = CameraTarget::follow(state.ball.pos, &state.tuning);
}

/// Move, collide and cull obstacles. Returns the obstacle that ended the run.
fn advance_obstacles(state: &mut GameState) -> Option<u32> {
    let speed = state.session.speed;
    let ball = state.ball.pos;
    let invulnerable = state.ball.powered;
    let threshold = state.tuning.collision_threshold;

    let mut crashed = None;
    for obstacle in &mut state.obstacles {
        obstacle.advance(speed);
        if check_collision(ball, obstacle.pos, threshold) {
            if invulnerable {
                obstacle.grazed = true;
            } else if crashed.is_none() {
                crashed = Some(obstacle.id);
            }
        }
    }
    if crashed.is_some() {
        return crashed;
    }

    let despawn_z = state.tuning.despawn_z;
    let mut passed = Vec::new();
    state.obstacles.retain(|o| {
        let behind = o.pos.z > despawn_z;
        if behind {
            passed.push((o.id, o.grazed));
        }
        !behind
    });

    for (id, grazed) in passed {
        if !grazed {
            award(&mut state.session, state.tuning.avoid_bonus);
            state.events.push(GameEvent::ObstacleAvoided { id });
        }
        state.events.push(GameEvent::Removed(EntityRef::Obstacle(id)));
    }
    None
}

/// Move, collect and cull power-ups
fn advance_power_ups(state: &mut GameState) {
    let speed = state.session.speed;
    let elapsed_ms = state.elapsed_ms;
    let ball = state.ball.pos;
    let threshold = state.tuning.collision_threshold;
    let despawn_z = state.tuning.despawn_z;

    let mut collected = 0;
    let mut removed = Vec::new();
    for power_up in &mut state.power_ups {
        power_up.advance(speed, elapsed_ms);
    }
    state.power_ups.retain(|p| {
        if check_collision(ball, p.pos, threshold) {
            collected += 1;
        } else if p.pos.z <= despawn_z {
            return true;
        }
        removed.push(p.id);
        false
    });

    for id in removed {
        state.events.push(GameEvent::Removed(EntityRef::PowerUp(id)));
    }
    for _ in 0..collected {
        activate_power_up(state);
    }
}

/// Fire every timer that fell due during this tick
fn run_timers(state: &mut GameState, dt_ms: u32) {
    let deadline = state.scheduler.deadline(dt_ms);
    while let Some(kind) = state.scheduler.pop_due(deadline) {
        match kind {
            TimerKind::SpawnObstacles => {
                let level = state.session.level;
                let z = state.tuning.spawn_z();
                spawn_obstacle_wave(state, level, z);
            }
            TimerKind::SpawnPowerUp => spawn_power_up(state),
            TimerKind::Escalate => escalate(state),
            TimerKind::EndLevelUpFlash => end_level_up_flash(state),
        }
    }
    state.scheduler.settle(deadline);
}

/// Active -> GameOver
fn game_over(state: &mut GameState, obstacle_id: u32) {
    state.phase = GamePhase::GameOver;
    state.stop();
    let final_score = state.session.score;
    state.events.push(GameEvent::GameOver { final_score });
    log::info!(
        "Game over: hit obstacle {} at level {}, final score {}",
        obstacle_id,
        state.session.level,
        final_score
    );
}

impl GameState {
    /// Begin a fresh session: reset score, level, speed and ball, clear the
    /// field, lay out the opening obstacles and arm timers from their base
    /// intervals. Track segments keep their positions.
    pub fn start(&mut self) {
        for obstacle in self.obstacles.drain(..) {
            self.events
                .push(GameEvent::Removed(EntityRef::Obstacle(obstacle.id)));
        }
        for power_up in self.power_ups.drain(..) {
            self.events
                .push(GameEvent::Removed(EntityRef::PowerUp(power_up.id)));
        }

        self.session = GameSession::new(&self.tuning);
        self.ball = Ball::new(&self.tuning);
        self.camera = CameraTarget::follow(self.ball.pos, &self.tuning);
        self.time_ticks = 0;
        self.elapsed_ms = 0;
        self.scheduler = Scheduler::new();
        self.phase = GamePhase::Active;

        spawn_initial_obstacles(self);
        arm_timers(self);

        log::info!(
            "Session started (seed {}, {} opening obstacles)",
            self.seed,
            self.obstacles.len()
        );
    }

    /// Advance one step
    pub fn tick(&mut self, input: &TickInput, dt_ms: u32) {
        tick(self, input, dt_ms);
    }

    /// GameOver -> Active. Ignored while a session is running; returns
    /// whether a restart happened.
    pub fn restart(&mut self) -> bool {
        if self.phase != GamePhase::GameOver {
            log::debug!("Restart ignored, session still active");
            return false;
        }
        self.start();
        self.events.push(GameEvent::Restarted);
        true
    }

    /// Cancel every session timer. Only tears down the timers: the phase is
    /// left alone, so an active session keeps scoring and moving but spawns
    /// and escalates no more. Game over calls this after leaving `Active`.
    pub fn stop(&mut self) {
        self.scheduler.cancel_all();
    }
}
