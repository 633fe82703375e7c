//! Terminal Racer entry point
//!
//! Checks the terminal, sets up logging and the terminal adapter, and runs
//! the game loop until the player quits.

use std::fs::File;
use std::io::{self, BufWriter, stdout};
use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use terminal_racer::consts::{MIN_TERM_HEIGHT, MIN_TERM_WIDTH};
use terminal_racer::platform::terminal::{self, KeyboardInput, TerminalGuard, TerminalRenderer};
use terminal_racer::sim::LaneField;
use terminal_racer::{FileScoreStore, GameLoop, Settings};

/// Log file in the working directory; the screen belongs to the game
const LOG_PATH: &str = "terminal_racer.log";

fn init_logging() {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if let Ok(file) = File::create(LOG_PATH) {
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
}

fn run(settings: &Settings, cols: u16, rows: u16) -> io::Result<()> {
    let _guard = TerminalGuard::enter()?;

    let field = LaneField::new(cols, rows, settings.lanes, settings.lane_width);
    let renderer = TerminalRenderer::new(BufWriter::new(stdout()), cols, rows, settings.ascii_glyphs);
    let store = FileScoreStore::new(&settings.high_score_path);

    let mut game = GameLoop::new(field, settings.rules(), KeyboardInput, renderer, store);
    game.run()
}

fn main() -> ExitCode {
    init_logging();
    log::info!("Terminal Racer starting...");

    let settings = Settings::load();

    let (cols, rows) = match terminal::size() {
        Ok(size) => size,
        Err(e) => {
            log::warn!("Could not read terminal size: {}", e);
            (MIN_TERM_WIDTH, MIN_TERM_HEIGHT)
        }
    };
    if cols < MIN_TERM_WIDTH || rows < MIN_TERM_HEIGHT {
        println!(
            "Terminal too small! Please resize to at least {}x{} characters.",
            MIN_TERM_WIDTH, MIN_TERM_HEIGHT
        );
        println!("Current size: {}x{}", cols, rows);
        return ExitCode::FAILURE;
    }

    println!("Starting Terminal Racer...");
    println!(
        "Make sure your terminal supports colors and is at least {}x{}!",
        MIN_TERM_WIDTH, MIN_TERM_HEIGHT
    );
    thread::sleep(Duration::from_secs(1));

    let settings = settings.fit_to_terminal(cols);
    match run(&settings, cols, rows) {
        Ok(()) => {
            log::info!("Terminal Racer exited normally");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Game error: {}", e);
            eprintln!("Game error: {}", e);
            ExitCode::FAILURE
        }
    }
}
