//! Game settings
//!
//! Read once at startup from a JSON file in the working directory. Every
//! field is optional in the file; anything missing or unusable falls back to
//! the default.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{FPS, LANE_WIDTH, LANES, PLAYER_WIDTH};
use crate::highscores::{self, PersistError};
use crate::sim::Rules;

pub use crate::sim::NitroTiming;

/// Default settings file name
pub const DEFAULT_PATH: &str = "racer_settings.json";

/// Narrowest lane that still holds the car, which sits one column in
const MIN_LANE_WIDTH: u32 = PLAYER_WIDTH as u32 + 1;
const MAX_LANE_WIDTH: u32 = 16;
const MAX_LANES: u32 = 16;
const MAX_FPS: u32 = 240;
/// Border column on each side of the road
const BORDER_COLUMNS: u32 = 2;

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Simulation ticks per second
    pub fps: u32,
    /// Number of lanes on the road
    pub lanes: u32,
    /// Columns per lane
    pub lane_width: u32,
    /// Where the best score is kept
    pub high_score_path: PathBuf,
    /// Fixed obstacle seed; a fresh random seed per run when absent
    pub seed: Option<u64>,
    /// How nitro decides the boost is over
    pub nitro_timing: NitroTiming,
    /// Draw obstacles, the car and borders with plain ASCII only, for
    /// terminals without box-drawing or block glyphs
    pub ascii_glyphs: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fps: FPS,
            lanes: LANES,
            lane_width: LANE_WIDTH,
            high_score_path: PathBuf::from(highscores::DEFAULT_PATH),
            seed: None,
            nitro_timing: NitroTiming::FrameParity,
            ascii_glyphs: false,
        }
    }
}

impl Settings {
    /// Load from the default file
    pub fn load() -> Self {
        Self::load_from(DEFAULT_PATH)
    }

    /// Load from `path`, falling back to defaults when the file is absent or
    /// malformed
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::try_load_from(path) {
            Ok(Some(settings)) => {
                log::info!("Loaded settings from {}", path.display());
                settings.validated()
            }
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring settings at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn try_load_from(path: &Path) -> Result<Option<Self>, PersistError> {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&json)?))
    }

    /// Replace values the simulation cannot run with
    pub fn validated(mut self) -> Self {
        let defaults = Self::default();
        if !(1..=MAX_FPS).contains(&self.fps) {
            log::warn!("fps must be in 1..={}, using {}", MAX_FPS, defaults.fps);
            self.fps = defaults.fps;
        }
        if !(1..=MAX_LANES).contains(&self.lanes) {
            log::warn!("lanes must be in 1..={}, using {}", MAX_LANES, defaults.lanes);
            self.lanes = defaults.lanes;
        }
        if !(MIN_LANE_WIDTH..=MAX_LANE_WIDTH).contains(&self.lane_width) {
            log::warn!(
                "lane_width must be in {}..={}, using {}",
                MIN_LANE_WIDTH,
                MAX_LANE_WIDTH,
                defaults.lane_width
            );
            self.lane_width = defaults.lane_width;
        }
        self
    }

    /// Columns needed for the road plus its borders
    pub fn road_columns(&self) -> u32 {
        self.lanes * self.lane_width + BORDER_COLUMNS
    }

    /// Fall back to the default road when the configured one is wider than
    /// the terminal
    pub fn fit_to_terminal(mut self, cols: u16) -> Self {
        if self.road_columns() > cols as u32 {
            let defaults = Self::default();
            log::warn!(
                "{} lanes of width {} do not fit in {} columns, using {}x{}",
                self.lanes,
                self.lane_width,
                cols,
                defaults.lanes,
                defaults.lane_width
            );
            self.lanes = defaults.lanes;
            self.lane_width = defaults.lane_width;
        }
        self
    }

    /// Best-effort write to `path`
    pub fn save_to(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        match self.try_save_to(path) {
            Ok(()) => log::info!("Settings saved to {}", path.display()),
            Err(e) => log::warn!("Could not save settings to {}: {}", path.display(), e),
        }
    }

    /// Write via a temp file and rename
    pub fn try_save_to(&self, path: &Path) -> Result<(), PersistError> {
        let json = serde_json::to_string_pretty(self)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }

    /// Simulation rules derived from these settings
    pub fn rules(&self) -> Rules {
        Rules {
            fps: self.fps,
            nitro_timing: self.nitro_timing,
            seed: self.seed,
        }
    }
}
