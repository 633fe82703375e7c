//! Obstacle spawning
//!
//! One roll per tick: at most one obstacle enters at the top row.

use rand::Rng;

use super::field::LaneField;
use super::state::{Glyph, Obstacle};

/// Roll once against `spawn_rate` and push a new obstacle on success.
pub fn spawn_obstacle<R: Rng>(
    field: &LaneField,
    spawn_rate: f32,
    rng: &mut R,
    obstacles: &mut Vec<Obstacle>,
) -> bool {
    let roll: f32 = rng.random();
    if roll >= spawn_rate {
        return false;
    }

    let lane = rng.random_range(0..field.lanes);
    // Keep clear of the lane's right edge
    let offset_span = field.lane_width.saturating_sub(2).max(1);
    let offset = rng.random_range(0..offset_span);
    let glyph = Glyph::ALL[rng.random_range(0..Glyph::ALL.len())];

    obstacles.push(Obstacle {
        x: field.lane_left(lane) + offset as i32,
        y: 0.0,
        glyph,
    });
    true
}
