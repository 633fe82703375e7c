//! Fixed-rate game loop
//!
//! Each tick: poll input, advance the simulation, act on its events, render,
//! then sleep out whatever is left of the tick budget.

use std::io;
use std::thread;
use std::time::{Duration, Instant};

use crate::highscores::ScoreStore;
use crate::platform::{InputSource, Renderer};
use crate::sim::{self, Flow, GameEvent, GameState, LaneField, Rules};

/// Owns the game instance and its collaborators
pub struct GameLoop<I, R, S> {
    state: GameState,
    input: I,
    renderer: R,
    store: S,
    tick_budget: Duration,
}

impl<I: InputSource, R: Renderer, S: ScoreStore> GameLoop<I, R, S> {
    /// Build the loop at the menu, with the stored high score loaded
    pub fn new(field: LaneField, rules: Rules, input: I, renderer: R, store: S) -> Self {
        let high_score = store.load();
        let tick_budget = Duration::from_secs(1) / rules.fps.max(1);
        Self {
            state: GameState::new(field, rules, high_score),
            input,
            renderer,
            store,
            tick_budget,
        }
    }

    /// Override the per-tick pacing budget
    pub fn with_tick_budget(mut self, budget: Duration) -> Self {
        self.tick_budget = budget;
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn tick_budget(&self) -> Duration {
        self.tick_budget
    }

    /// Run one tick without pacing
    pub fn step(&mut self) -> io::Result<Flow> {
        let action = self.input.poll()?;
        let outcome = sim::tick(&mut self.state, action);
        if outcome.flow == Flow::Quit {
            log::info!("Quit requested");
            return Ok(Flow::Quit);
        }

        for event in outcome.events {
            self.on_event(event);
        }

        self.renderer.render(&self.state.snapshot())?;
        Ok(Flow::Continue)
    }

    /// Tick until quit, pacing to the target rate
    pub fn run(&mut self) -> io::Result<()> {
        log::info!(
            "Game loop running at {} ticks/s ({:?} per tick)",
            self.state.rules.fps,
            self.tick_budget
        );
        loop {
            let started = Instant::now();
            if self.step()? == Flow::Quit {
                return Ok(());
            }
            if let Some(rest) = self.tick_budget.checked_sub(started.elapsed()) {
                thread::sleep(rest);
            }
        }
    }

    fn on_event(&mut self, event: GameEvent) {
        match event {
            GameEvent::RunStarted { seed } => log::info!("Run started (seed {})", seed),
            GameEvent::Paused => log::info!("Paused at frame {}", self.state.frame_count),
            GameEvent::Resumed => log::info!("Resumed"),
            GameEvent::NitroEngaged => log::debug!("Nitro engaged"),
            GameEvent::NitroSpent => log::debug!("Nitro spent"),
            GameEvent::DifficultyRaised { speed, spawn_rate } => {
                log::info!("Difficulty up: speed {:.1}, spawn rate {:.2}", speed, spawn_rate)
            }
            GameEvent::Crashed { score } => log::info!("Crashed with score {}", score),
            GameEvent::NewHighScore { score } => {
                log::info!("New high score: {}", score);
                self.store.save(score);
            }
            GameEvent::ReturnedToMenu => log::debug!("Back to menu"),
        }
    }
}
