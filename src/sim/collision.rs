//! Collision detection between the player's car and obstacles
//!
//! Cells either coincide or they don't: an obstacle hits when its floored
//! row is the player's row and its column is one of the car's three columns.

use super::state::{Obstacle, Player};
use crate::consts::PLAYER_WIDTH;

/// Whether a single cell is covered by the player's footprint
pub fn hits_player(player: &Player, x: i32, row: i32) -> bool {
    row == player.y && (player.x..player.x + PLAYER_WIDTH).contains(&x)
}

/// True if any obstacle overlaps the player. Pure query.
pub fn check(player: &Player, obstacles: &[Obstacle]) -> bool {
    obstacles.iter().any(|o| hits_player(player, o.x, o.row()))
}
