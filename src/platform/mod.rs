//! Platform abstraction layer
//!
//! The simulation only sees these two seams:
//! - [`InputSource`]: non-blocking poll for a logical action
//! - [`Renderer`]: draws a snapshot once per tick
//!
//! `terminal` implements both on top of crossterm.

use std::io;

use crate::sim::{Action, Snapshot};

pub mod keymap;
pub mod terminal;

/// Where actions come from
pub trait InputSource {
    /// Return immediately; `Action::None` when nothing was pressed
    fn poll(&mut self) -> io::Result<Action>;
}

/// Where frames go
pub trait Renderer {
    fn render(&mut self, snapshot: &Snapshot<'_>) -> io::Result<()>;
}
