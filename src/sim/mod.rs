//! Frame-locked simulation module
//!
//! All gameplay logic lives here. This module stays free of I/O:
//! - One tick per call, no wall-clock time
//! - Seeded RNG only
//! - Entities are plain values, systems are free functions
//! - No rendering, terminal or storage dependencies

pub mod collision;
pub mod difficulty;
pub mod field;
pub mod kinematics;
pub mod nitro;
pub mod spawn;
pub mod state;
pub mod tick;

pub use difficulty::Difficulty;
pub use field::{LaneField, Steer};
pub use nitro::{NitroState, NitroTiming};
pub use state::{GamePhase, GameState, Glyph, Obstacle, Player, Rules, Snapshot};
pub use tick::{Action, Flow, GameEvent, TickOutcome, handle_action, tick};
