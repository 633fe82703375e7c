//! Nitro boost controller
//!
//! Activation starts both the boost and its cooldown; the cooldown keeps
//! counting down while the boost is still running.

use serde::{Deserialize, Serialize};

use crate::consts::NITRO_COOLDOWN_SECS;

/// How the end of a boost is decided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NitroTiming {
    /// Boost ends on the first frame where `frame_count % (fps / 2) == 0`,
    /// so it can be much shorter than half a second.
    #[default]
    FrameParity,
    /// Boost lasts `fps / 2` frames from activation.
    SinceActivation,
}

/// Nitro boost state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NitroState {
    pub active: bool,
    pub cooldown_ticks: u32,
    /// Frame count at the most recent activation
    pub activated_at: u64,
}

impl NitroState {
    /// Ready to fire
    pub fn is_ready(&self) -> bool {
        !self.active && self.cooldown_ticks == 0
    }
}

/// Boost window in frames (half a second)
fn boost_frames(fps: u32) -> u64 {
    (fps / 2).max(1) as u64
}

/// Try to fire the boost. No-op while active or cooling down.
pub fn try_activate(nitro: &mut NitroState, frame_count: u64, fps: u32) -> bool {
    if !nitro.is_ready() {
        return false;
    }
    nitro.active = true;
    nitro.cooldown_ticks = fps * NITRO_COOLDOWN_SECS;
    nitro.activated_at = frame_count;
    true
}

/// Per-tick timer update. Returns true if the boost ran out this tick.
pub fn update(nitro: &mut NitroState, frame_count: u64, fps: u32, timing: NitroTiming) -> bool {
    let mut expired = false;
    if nitro.active {
        let window = boost_frames(fps);
        let done = match timing {
            NitroTiming::FrameParity => frame_count % window == 0,
            NitroTiming::SinceActivation => {
                frame_count.saturating_sub(nitro.activated_at) >= window
            }
        };
        if done {
            nitro.active = false;
            expired = true;
        }
    }

    nitro.cooldown_ticks = nitro.cooldown_ticks.saturating_sub(1);
    expired
}
