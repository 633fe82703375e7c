//! Difficulty scheduler
//!
//! Obstacle speed and spawn probability step up once per elapsed interval
//! and saturate at their caps.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Current difficulty of a run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    /// Obstacle rows per tick
    pub speed: f32,
    /// Per-tick spawn probability
    pub spawn_rate: f32,
}

impl Default for Difficulty {
    fn default() -> Self {
        Self {
            speed: START_SPEED,
            spawn_rate: START_SPAWN_RATE,
        }
    }
}

impl Difficulty {
    /// One saturating step up the curve
    pub fn step(&mut self) {
        self.speed = (self.speed + SPEED_STEP).min(MAX_SPEED);
        self.spawn_rate = (self.spawn_rate + SPAWN_RATE_STEP).min(MAX_SPAWN_RATE);
    }

    pub fn is_maxed(&self) -> bool {
        self.speed >= MAX_SPEED && self.spawn_rate >= MAX_SPAWN_RATE
    }
}

/// Raise difficulty on exact interval boundaries. Returns true when a step
/// was applied.
pub fn update(difficulty: &mut Difficulty, frame_count: u64, fps: u32) -> bool {
    let interval = (fps * DIFFICULTY_INTERVAL_SECS).max(1) as u64;
    if frame_count == 0 || frame_count % interval != 0 {
        return false;
    }
    difficulty.step();
    true
}
