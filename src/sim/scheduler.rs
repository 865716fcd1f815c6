//! Timer scheduling driven by the simulation tick
//!
//! Spawning and difficulty run on wall-clock style intervals, but they are not
//! free-running timers: the tick advances the scheduler clock by its own delta
//! and pops whatever fell due, in fire-time order. Cancelling an entry removes
//! it outright, so a cancelled timer can never fire.

use serde::{Deserialize, Serialize};

/// What a timer does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimerKind {
    /// Spawn an obstacle wave at the horizon
    SpawnObstacles,
    /// Spawn a power-up at the horizon
    SpawnPowerUp,
    /// Raise the level
    Escalate,
    /// End the level-up glow on the ball
    EndLevelUpFlash,
}

#[derive(Debug, Clone)]
struct TimerEntry {
    kind: TimerKind,
    interval_ms: u32,
    next_fire_ms: u64,
    repeat: bool,
    /// Registration order, breaks ties between entries due at the same time
    seq: u64,
}

/// Deterministic timer list owned by the game state
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    now_ms: u64,
    entries: Vec<TimerEntry>,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current scheduler clock
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Arm a repeating timer. Replaces any timer of the same kind, so the
    /// first firing is a full interval from now.
    pub fn every(&mut self, kind: TimerKind, interval_ms: u32) {
        self.insert(kind, interval_ms, true);
    }

    /// Arm a one-shot timer. Replaces any timer of the same kind.
    pub fn once(&mut self, kind: TimerKind, delay_ms: u32) {
        self.insert(kind, delay_ms, false);
    }

    fn insert(&mut self, kind: TimerKind, interval_ms: u32, repeat: bool) {
        self.cancel(kind);
        // Zero intervals would spin forever in pop_due
        let interval_ms = interval_ms.max(1);
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.push(TimerEntry {
            kind,
            interval_ms,
            next_fire_ms: self.now_ms + interval_ms as u64,
            repeat,
            seq,
        });
    }

    /// Remove a timer. Returns whether one was armed.
    pub fn cancel(&mut self, kind: TimerKind) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.kind != kind);
        self.entries.len() != before
    }

    /// Remove every timer
    pub fn cancel_all(&mut self) {
        self.entries.clear();
    }

    pub fn is_armed(&self, kind: TimerKind) -> bool {
        self.entries.iter().any(|e| e.kind == kind)
    }

    /// Interval of an armed timer
    pub fn interval_of(&self, kind: TimerKind) -> Option<u32> {
        self.entries
            .iter()
            .find(|e| e.kind == kind)
            .map(|e| e.interval_ms)
    }

    /// Number of armed timers
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Clock value after advancing by `dt_ms`
    pub fn deadline(&self, dt_ms: u32) -> u64 {
        self.now_ms + dt_ms as u64
    }

    /// Pop the earliest timer due at or before `deadline`.
    ///
    /// The clock moves to the popped timer's fire time, so anything armed
    /// while handling it is measured from the moment it fired. Repeating
    /// timers are rescheduled and may pop again before the deadline.
    pub fn pop_due(&mut self, deadline: u64) -> Option<TimerKind> {
        let idx = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.next_fire_ms <= deadline)
            .min_by_key(|(_, e)| (e.next_fire_ms, e.seq))
            .map(|(i, _)| i)?;

        let entry = &mut self.entries[idx];
        let kind = entry.kind;
        self.now_ms = self.now_ms.max(entry.next_fire_ms);
        if entry.repeat {
            entry.next_fire_ms += entry.interval_ms as u64;
        } else {
            self.entries.remove(idx);
        }
        Some(kind)
    }

    /// Move the clock to `deadline` once everything due has been popped
    pub fn settle(&mut self, deadline: u64) {
        self.now_ms = self.now_ms.max(deadline);
    }

    /// Advance by `dt_ms`, collecting every firing in order
    pub fn advance(&mut self, dt_ms: u32) -> Vec<TimerKind> {
        let deadline = self.deadline(dt_ms);
        let mut fired = Vec::new();
        while let Some(kind) = self.pop_due(deadline) {
            fired.push(kind);
        }
        self.settle(deadline);
        fired
    }
}
