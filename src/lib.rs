//! Terminal Racer - a lane-dodging arcade racer for the terminal
//!
//! Core modules:
//! - `sim`: Frame-locked simulation (entities, spawning, kinematics, collisions, state machine)
//! - `game_loop`: Fixed-rate driver tying input, simulation and rendering together
//! - `platform`: Renderer/input seams and the crossterm terminal adapter
//! - `highscores`: Best-score persistence
//! - `settings`: Data-driven configuration

pub mod game_loop;
pub mod highscores;
pub mod platform;
pub mod settings;
pub mod sim;

pub use game_loop::GameLoop;
pub use highscores::{FileScoreStore, MemoryScoreStore, ScoreStore};
pub use settings::{NitroTiming, Settings};

/// Game configuration constants
pub mod consts {
    /// Target simulation rate (ticks per second)
    pub const FPS: u32 = 25;

    /// Road layout
    pub const LANES: u32 = 5;
    pub const LANE_WIDTH: u32 = 4;

    /// Player car occupies this many columns
    pub const PLAYER_WIDTH: i32 = 3;
    /// Player row, counted up from the bottom of the field
    pub const PLAYER_ROW_FROM_BOTTOM: u16 = 3;

    /// Frames per point of score
    pub const FRAMES_PER_POINT: u64 = 10;

    /// Difficulty curve
    pub const START_SPEED: f32 = 1.0;
    pub const MAX_SPEED: f32 = 3.0;
    pub const SPEED_STEP: f32 = 0.2;
    pub const START_SPAWN_RATE: f32 = 0.3;
    pub const MAX_SPAWN_RATE: f32 = 0.8;
    pub const SPAWN_RATE_STEP: f32 = 0.05;
    /// Seconds between difficulty steps
    pub const DIFFICULTY_INTERVAL_SECS: u32 = 10;

    /// Nitro boost
    pub const NITRO_SPEED_BONUS: f32 = 2.0;
    pub const NITRO_COOLDOWN_SECS: u32 = 3;

    /// Smallest terminal the game will start in
    pub const MIN_TERM_WIDTH: u16 = 60;
    pub const MIN_TERM_HEIGHT: u16 = 20;
}
