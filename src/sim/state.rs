//! Game state and core simulation types
//!
//! Everything the loop owns for a single process lives in [`GameState`].
//! Entities are plain values; the systems in sibling modules act on them.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::difficulty::Difficulty;
use super::field::LaneField;
use super::nitro::{NitroState, NitroTiming};
use crate::consts::{FPS, FRAMES_PER_POINT};

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for confirm
    Menu,
    /// Active run
    Playing,
    /// Run frozen until pause is pressed again
    Paused,
    /// Run ended in a crash
    GameOver,
}

/// The player's car. `x` is the leftmost of its three columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub x: i32,
    pub y: i32,
}

/// Obstacle glyph identifiers (the renderer picks the actual characters)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Glyph {
    Cross,
    Hash,
    Triangle,
    Circle,
    Square,
}

impl Glyph {
    pub const ALL: [Glyph; 5] = [
        Glyph::Cross,
        Glyph::Hash,
        Glyph::Triangle,
        Glyph::Circle,
        Glyph::Square,
    ];
}

/// An obstacle scrolling down the road
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub x: i32,
    /// Fractional row; floored when drawn or collided
    pub y: f32,
    pub glyph: Glyph,
}

impl Obstacle {
    /// Row the obstacle currently occupies
    pub fn row(&self) -> i32 {
        self.y.floor() as i32
    }
}

/// Fixed rules for a process, taken from settings at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rules {
    pub fps: u32,
    pub nitro_timing: NitroTiming,
    /// Replays the same obstacle stream every run when set
    pub seed: Option<u64>,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            fps: FPS,
            nitro_timing: NitroTiming::default(),
            seed: None,
        }
    }
}

/// Complete game state for the process
#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: GamePhase,
    pub rules: Rules,
    pub field: LaneField,
    pub player: Player,
    /// Unordered; systems may reorder or rebuild it
    pub obstacles: Vec<Obstacle>,
    pub score: u64,
    pub high_score: u64,
    /// Ticks spent Playing in the current run
    pub frame_count: u64,
    pub difficulty: Difficulty,
    pub nitro: NitroState,
    /// Seed of the current run's obstacle stream
    pub run_seed: u64,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Fresh process state, sitting at the menu
    pub fn new(field: LaneField, rules: Rules, high_score: u64) -> Self {
        let run_seed = rules.seed.unwrap_or(0);
        Self {
            phase: GamePhase::Menu,
            rules,
            field,
            player: field.spawn_player(),
            obstacles: Vec::new(),
            score: 0,
            high_score,
            frame_count: 0,
            difficulty: Difficulty::default(),
            nitro: NitroState::default(),
            run_seed,
            rng: Pcg32::seed_from_u64(run_seed),
        }
    }

    /// Restore every per-run value to its default and reseed the obstacle
    /// stream. Phase and high score are left alone.
    pub fn reset(&mut self) {
        self.score = 0;
        self.frame_count = 0;
        self.difficulty = Difficulty::default();
        self.nitro = NitroState::default();
        self.obstacles.clear();
        self.player = self.field.spawn_player();
        self.run_seed = self.rules.seed.unwrap_or_else(rand::random);
        self.rng = Pcg32::seed_from_u64(self.run_seed);
    }

    /// Score earned so far this run
    pub fn score_for_frames(frame_count: u64) -> u64 {
        frame_count / FRAMES_PER_POINT
    }

    /// Obstacle rows advanced per tick, nitro included
    pub fn move_speed(&self) -> f32 {
        super::kinematics::move_speed(&self.difficulty, &self.nitro)
    }

    /// Immutable view handed to the renderer
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            phase: self.phase,
            field: &self.field,
            player: self.player,
            obstacles: &self.obstacles,
            score: self.score,
            high_score: self.high_score,
            difficulty: self.difficulty,
            nitro: self.nitro,
            frame_count: self.frame_count,
            fps: self.rules.fps,
        }
    }
}

/// Per-tick read-only view of the game for drawing
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub phase: GamePhase,
    pub field: &'a LaneField,
    pub player: Player,
    pub obstacles: &'a [Obstacle],
    pub score: u64,
    pub high_score: u64,
    pub difficulty: Difficulty,
    pub nitro: NitroState,
    pub frame_count: u64,
    pub fps: u32,
}
