//! Fixed timestep simulation tick
//!
//! Applies one logical action to the phase machine, then advances the run
//! by a single frame if it is being played.

use super::field::Steer;
use super::state::{GamePhase, GameState};
use super::{collision, difficulty, kinematics, nitro, spawn};

/// Logical input for a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Action {
    #[default]
    None,
    MoveLeft,
    MoveRight,
    ActivateNitro,
    TogglePause,
    Confirm,
    Quit,
}

/// Notable things that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    RunStarted { seed: u64 },
    Paused,
    Resumed,
    NitroEngaged,
    NitroSpent,
    DifficultyRaised { speed: f32, spawn_rate: f32 },
    Crashed { score: u64 },
    /// High score beaten; the caller must persist it before presenting GameOver
    NewHighScore { score: u64 },
    ReturnedToMenu,
}

/// Whether the loop should keep running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flow {
    #[default]
    Continue,
    Quit,
}

/// Result of one tick
#[derive(Debug, Clone, Default)]
pub struct TickOutcome {
    pub flow: Flow,
    pub events: Vec<GameEvent>,
}

/// Advance the game by one tick
pub fn tick(state: &mut GameState, action: Action) -> TickOutcome {
    let mut outcome = TickOutcome::default();

    // Quit wins over everything, in every phase
    if action == Action::Quit {
        outcome.flow = Flow::Quit;
        return outcome;
    }

    handle_action(state, action, &mut outcome.events);

    if state.phase == GamePhase::Playing {
        update_playing(state, &mut outcome.events);
    }

    outcome
}

/// Phase transitions and in-run controls. Anything not listed for a phase is
/// ignored.
pub fn handle_action(state: &mut GameState, action: Action, events: &mut Vec<GameEvent>) {
    match state.phase {
        GamePhase::Menu => match action {
            Action::Confirm => {
                state.reset();
                state.phase = GamePhase::Playing;
                events.push(GameEvent::RunStarted {
                    seed: state.run_seed,
                });
            }
            Action::MoveLeft
            | Action::MoveRight
            | Action::ActivateNitro
            | Action::TogglePause
            | Action::Quit
            | Action::None => {}
        },
        GamePhase::Playing => match action {
            Action::MoveLeft => {
                state.field.steer(&mut state.player, Steer::Left);
            }
            Action::MoveRight => {
                state.field.steer(&mut state.player, Steer::Right);
            }
            Action::ActivateNitro => {
                if nitro::try_activate(&mut state.nitro, state.frame_count, state.rules.fps) {
                    events.push(GameEvent::NitroEngaged);
                }
            }
            Action::TogglePause => {
                state.phase = GamePhase::Paused;
                events.push(GameEvent::Paused);
            }
            Action::Confirm | Action::Quit | Action::None => {}
        },
        GamePhase::Paused => match action {
            Action::TogglePause => {
                state.phase = GamePhase::Playing;
                events.push(GameEvent::Resumed);
            }
            Action::MoveLeft
            | Action::MoveRight
            | Action::ActivateNitro
            | Action::Confirm
            | Action::Quit
            | Action::None => {}
        },
        GamePhase::GameOver => match action {
            Action::Confirm => {
                state.phase = GamePhase::Menu;
                events.push(GameEvent::ReturnedToMenu);
            }
            Action::MoveLeft
            | Action::MoveRight
            | Action::ActivateNitro
            | Action::TogglePause
            | Action::Quit
            | Action::None => {}
        },
    }
}

/// One frame of play: timers, spawning, movement, then the collision check
/// against the moved obstacles.
fn update_playing(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let fps = state.rules.fps;

    state.frame_count += 1;
    state.score = GameState::score_for_frames(state.frame_count);

    if difficulty::update(&mut state.difficulty, state.frame_count, fps) {
        events.push(GameEvent::DifficultyRaised {
            speed: state.difficulty.speed,
            spawn_rate: state.difficulty.spawn_rate,
        });
    }

    if nitro::update(
        &mut state.nitro,
        state.frame_count,
        fps,
        state.rules.nitro_timing,
    ) {
        events.push(GameEvent::NitroSpent);
    }

    spawn::spawn_obstacle(
        &state.field,
        state.difficulty.spawn_rate,
        &mut state.rng,
        &mut state.obstacles,
    );
    let speed = state.move_speed();
    kinematics::advance_obstacles(&mut state.obstacles, speed, state.field.height);

    if collision::check(&state.player, &state.obstacles) {
        state.phase = GamePhase::GameOver;
        events.push(GameEvent::Crashed { score: state.score });
        if state.score > state.high_score {
            state.high_score = state.score;
            events.push(GameEvent::NewHighScore { score: state.score });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Glyph, LaneField, Obstacle, Rules};

    const ALL_ACTIONS: [Action; 7] = [
        Action::None,
        Action::MoveLeft,
        Action::MoveRight,
        Action::ActivateNitro,
        Action::TogglePause,
        Action::Confirm,
        Action::Quit,
    ];

    fn new_state() -> GameState {
        let rules = Rules {
            seed: Some(12345),
            ..Default::default()
        };
        GameState::new(LaneField::new(80, 24, 5, 4), rules, 0)
    }

    fn playing_state() -> GameState {
        let mut state = new_state();
        tick(&mut state, Action::Confirm);
        assert_eq!(state.phase, GamePhase::Playing);
        state
    }

    fn state_in(phase: GamePhase) -> GameState {
        let mut state = playing_state();
        match phase {
            GamePhase::Menu => state.phase = GamePhase::Menu,
            GamePhase::Playing => {}
            GamePhase::Paused => {
                tick(&mut state, Action::TogglePause);
            }
            GamePhase::GameOver => crash_with_score(&mut state, 3),
        }
        assert_eq!(state.phase, phase);
        state
    }

    /// Put an obstacle one row above the car so the next frame hits it
    fn crash_with_score(state: &mut GameState, score: u64) {
        state.frame_count = score * 10 - 1;
        state.difficulty.spawn_rate = 0.0;
        state.obstacles = vec![Obstacle {
            x: state.player.x + 1,
            y: state.player.y as f32 - state.move_speed(),
            glyph: Glyph::Hash,
        }];
        tick(state, Action::None);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.score, score);
    }

    #[test]
    fn test_menu_confirm_starts_run() {
        let mut state = new_state();
        tick(&mut state, Action::None);
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.frame_count, 0);

        let out = tick(&mut state, Action::Confirm);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(out.events[0], GameEvent::RunStarted { seed: 12345 });
        // The starting tick already plays a frame
        assert_eq!(state.frame_count, 1);
    }

    #[test]
    fn test_quit_from_every_phase() {
        for phase in [
            GamePhase::Menu,
            GamePhase::Playing,
            GamePhase::Paused,
            GamePhase::GameOver,
        ] {
            let mut state = state_in(phase);
            let frames = state.frame_count;
            let out = tick(&mut state, Action::Quit);
            assert_eq!(out.flow, Flow::Quit, "{phase:?}");
            assert_eq!(state.phase, phase);
            assert_eq!(state.frame_count, frames);
        }
    }

    #[test]
    fn test_illegal_actions_leave_phase_unchanged() {
        let legal = |phase: GamePhase, action: Action| match phase {
            GamePhase::Menu => action == Action::Confirm,
            GamePhase::Playing => action == Action::TogglePause,
            GamePhase::Paused => action == Action::TogglePause,
            GamePhase::GameOver => action == Action::Confirm,
        };
        for phase in [
            GamePhase::Menu,
            GamePhase::Paused,
            GamePhase::GameOver,
        ] {
            for action in ALL_ACTIONS {
                if action == Action::Quit || legal(phase, action) {
                    continue;
                }
                let mut state = state_in(phase);
                let out = tick(&mut state, action);
                assert_eq!(state.phase, phase, "{phase:?} + {action:?}");
                assert_eq!(out.flow, Flow::Continue);
            }
        }
    }

    #[test]
    fn test_playing_ignores_confirm() {
        let mut state = playing_state();
        state.difficulty.spawn_rate = 0.0;
        tick(&mut state, Action::Confirm);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.frame_count, 2);
    }

    #[test]
    fn test_pause_freezes_and_resumes() {
        let mut state = playing_state();
        let out = tick(&mut state, Action::TogglePause);
        assert_eq!(state.phase, GamePhase::Paused);
        assert!(out.events.contains(&GameEvent::Paused));
        let frames = state.frame_count;
        let player = state.player;
        let obstacles = state.obstacles.clone();

        for action in [Action::None, Action::MoveLeft, Action::ActivateNitro] {
            tick(&mut state, action);
        }
        assert_eq!(state.frame_count, frames);
        assert_eq!(state.player, player);
        assert_eq!(state.obstacles, obstacles);
        assert!(!state.nitro.active);

        let out = tick(&mut state, Action::TogglePause);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(out.events.contains(&GameEvent::Resumed));
        assert_eq!(state.frame_count, frames + 1);
    }

    #[test]
    fn test_steering_while_playing() {
        let mut state = playing_state();
        state.difficulty.spawn_rate = 0.0;
        let start = state.player.x;
        tick(&mut state, Action::MoveLeft);
        assert_eq!(state.player.x, start - 4);
        tick(&mut state, Action::MoveRight);
        tick(&mut state, Action::MoveRight);
        assert_eq!(state.player.x, start + 4);
    }

    #[test]
    fn test_nitro_through_tick() {
        let mut state = playing_state();
        state.difficulty.spawn_rate = 0.0;
        let out = tick(&mut state, Action::ActivateNitro);
        assert!(out.events.contains(&GameEvent::NitroEngaged));
        assert!(state.nitro.active);
        assert_eq!(state.nitro.cooldown_ticks, 74);

        // Second press while cooling down does nothing
        let out = tick(&mut state, Action::ActivateNitro);
        assert!(!out.events.contains(&GameEvent::NitroEngaged));
    }

    #[test]
    fn test_crash_ends_run_and_freezes_score() {
        let mut state = playing_state();
        crash_with_score(&mut state, 7);
        assert_eq!(state.high_score, 7);

        tick(&mut state, Action::None);
        tick(&mut state, Action::None);
        assert_eq!(state.score, 7);
        assert_eq!(state.frame_count, 70);
    }

    #[test]
    fn test_high_score_is_monotonic() {
        let mut state = new_state();
        let mut seen = Vec::new();
        for score in [10, 5, 20, 15] {
            tick(&mut state, Action::Confirm);
            crash_with_score(&mut state, score);
            seen.push(state.high_score);
            let out = tick(&mut state, Action::Confirm);
            assert_eq!(state.phase, GamePhase::Menu);
            assert_eq!(out.events, vec![GameEvent::ReturnedToMenu]);
        }
        assert_eq!(seen, vec![10, 10, 20, 20]);
    }

    #[test]
    fn test_new_high_score_event_only_when_beaten() {
        let mut state = playing_state();
        state.high_score = 8;
        state.frame_count = 89;
        state.difficulty.spawn_rate = 0.0;
        state.obstacles = vec![Obstacle {
            x: state.player.x,
            y: state.player.y as f32 - 1.0,
            glyph: Glyph::Cross,
        }];
        let out = tick(&mut state, Action::None);
        assert_eq!(
            out.events,
            vec![
                GameEvent::Crashed { score: 9 },
                GameEvent::NewHighScore { score: 9 }
            ]
        );

        let mut state = playing_state();
        state.high_score = 50;
        crash_with_score(&mut state, 9);
        assert_eq!(state.high_score, 50);
    }

    #[test]
    fn test_game_over_returns_to_menu_not_playing() {
        let mut state = state_in(GamePhase::GameOver);
        tick(&mut state, Action::Confirm);
        assert_eq!(state.phase, GamePhase::Menu);
        tick(&mut state, Action::None);
        assert_eq!(state.phase, GamePhase::Menu);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut state = state_in(GamePhase::GameOver);
        state.reset();
        let first = state.clone();
        state.reset();

        for s in [&first, &state] {
            assert_eq!(s.score, 0);
            assert_eq!(s.frame_count, 0);
            assert_eq!(s.difficulty.speed, 1.0);
            assert_eq!(s.difficulty.spawn_rate, 0.3);
            assert!(s.obstacles.is_empty());
            assert_eq!(s.player, s.field.spawn_player());
        }
        assert_eq!(first.nitro, state.nitro);
        assert_eq!(first.run_seed, state.run_seed);
    }

    #[test]
    fn test_new_run_after_crash_is_fresh() {
        let mut state = state_in(GamePhase::GameOver);
        tick(&mut state, Action::Confirm);
        state.obstacles.push(Obstacle {
            x: 0,
            y: 0.0,
            glyph: Glyph::Cross,
        });
        tick(&mut state, Action::Confirm);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.frame_count, 1);
        assert!(state.obstacles.iter().all(|o| o.x != 0));
    }

    #[test]
    fn test_difficulty_rises_during_long_run() {
        let mut state = playing_state();
        // Keep the road empty so the run survives
        let mut raised = 0;
        for _ in 0..(250 * 12) {
            state.obstacles.clear();
            let out = tick(&mut state, Action::None);
            raised += out
                .events
                .iter()
                .filter(|e| matches!(e, GameEvent::DifficultyRaised { .. }))
                .count();
        }
        assert_eq!(raised, 12);
        assert_eq!(state.difficulty.speed, 3.0);
        assert_eq!(state.difficulty.spawn_rate, 0.8);
        assert_eq!(state.phase, GamePhase::Playing);
    }
}
