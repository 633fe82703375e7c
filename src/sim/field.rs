//! Lane field geometry
//!
//! The road is a strip of equal-width lanes centered in the terminal. All
//! positions are terminal cells; x grows to the right, y grows downward.

use serde::{Deserialize, Serialize};

use super::state::Player;
use crate::consts::{PLAYER_ROW_FROM_BOTTOM, PLAYER_WIDTH};

/// Direction of a lane change request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Steer {
    Left,
    Right,
}

/// Fixed road layout for one terminal size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaneField {
    /// Leftmost road column
    pub x0: i32,
    pub lanes: u32,
    pub lane_width: u32,
    /// Field height in rows
    pub height: u16,
}

impl LaneField {
    /// Center `lanes` lanes of `lane_width` columns in a terminal of the given size
    pub fn new(width: u16, height: u16, lanes: u32, lane_width: u32) -> Self {
        let road = (lanes * lane_width) as i32;
        let x0 = ((width as i32 - road) / 2).max(0);
        Self {
            x0,
            lanes,
            lane_width,
            height,
        }
    }

    /// Total road width in columns (`L * W`)
    pub fn road_width(&self) -> i32 {
        (self.lanes * self.lane_width) as i32
    }

    /// One past the rightmost road column
    pub fn right_edge(&self) -> i32 {
        self.x0 + self.road_width()
    }

    /// Leftmost column of a lane
    pub fn lane_left(&self, lane: u32) -> i32 {
        self.x0 + (lane * self.lane_width) as i32
    }

    /// Player x when driving in `lane`
    pub fn player_x(&self, lane: u32) -> i32 {
        self.lane_left(lane) + 1
    }

    /// Fixed player row, a few rows above the bottom edge
    pub fn player_row(&self) -> i32 {
        self.height as i32 - PLAYER_ROW_FROM_BOTTOM as i32
    }

    pub fn center_lane(&self) -> u32 {
        self.lanes / 2
    }

    /// Whether a column lies on the road
    pub fn contains(&self, x: i32) -> bool {
        self.x0 <= x && x < self.right_edge()
    }

    /// Whether the whole car footprint starting at `x` fits on the road
    pub fn fits_player(&self, x: i32) -> bool {
        self.x0 <= x && x + PLAYER_WIDTH - 1 < self.right_edge()
    }

    /// Fresh player in the center lane
    pub fn spawn_player(&self) -> Player {
        Player {
            x: self.player_x(self.center_lane()),
            y: self.player_row(),
        }
    }

    /// Move the player one lane over. Returns false (and leaves the player
    /// untouched) when the move would push the footprint off the road.
    pub fn steer(&self, player: &mut Player, steer: Steer) -> bool {
        let step = self.lane_width as i32;
        let new_x = match steer {
            Steer::Left => player.x - step,
            Steer::Right => player.x + step,
        };
        if !self.fits_player(new_x) {
            return false;
        }
        player.x = new_x;
        true
    }
}
