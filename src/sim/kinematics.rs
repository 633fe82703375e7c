//! Obstacle movement and culling

use super::difficulty::Difficulty;
use super::nitro::NitroState;
use super::state::Obstacle;
use crate::consts::NITRO_SPEED_BONUS;

/// Rows per tick, boosted while nitro is running
pub fn move_speed(difficulty: &Difficulty, nitro: &NitroState) -> f32 {
    if nitro.active {
        difficulty.speed + NITRO_SPEED_BONUS
    } else {
        difficulty.speed
    }
}

/// Scroll every obstacle down by `move_speed` rows and drop the ones that
/// left the field.
pub fn advance_obstacles(obstacles: &mut Vec<Obstacle>, move_speed: f32, height: u16) {
    for obstacle in obstacles.iter_mut() {
        obstacle.y += move_speed;
    }
    let limit = height as f32;
    obstacles.retain(|o| o.y < limit);
}
