//! crossterm terminal adapter
//!
//! Raw mode + alternate screen for the lifetime of [`TerminalGuard`], a
//! non-blocking keyboard [`InputSource`], and a full-redraw [`Renderer`].

use std::io::{self, Write, stdout};
use std::time::Duration;

use crossterm::{
    cursor, event, execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};

use super::{InputSource, Renderer, keymap};
use crate::sim::{Action, GamePhase, Glyph, Snapshot};

const PLAYER_COLOR: Color = Color::Cyan;
const OBSTACLE_COLOR: Color = Color::Red;
const LANE_COLOR: Color = Color::Yellow;
const UI_COLOR: Color = Color::Green;
const NITRO_COLOR: Color = Color::Magenta;
const TEXT_COLOR: Color = Color::White;
const BORDER_COLOR: Color = Color::Blue;

/// Seconds the control hint stays on screen at the start of a run
const HINT_SECS: u64 = 5;

/// Current terminal size as (columns, rows)
pub fn size() -> io::Result<(u16, u16)> {
    terminal::size()
}

/// Puts the terminal in game mode; restores it when dropped, including
/// while unwinding from a panic.
pub struct TerminalGuard {
    _private: (),
}

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        if let Err(e) = execute!(stdout(), EnterAlternateScreen, cursor::Hide) {
            let _ = terminal::disable_raw_mode();
            return Err(e);
        }
        Ok(Self { _private: () })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), ResetColor, cursor::Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Keyboard input read through crossterm's event queue
#[derive(Debug, Default)]
pub struct KeyboardInput;

impl InputSource for KeyboardInput {
    fn poll(&mut self) -> io::Result<Action> {
        if !event::poll(Duration::ZERO)? {
            return Ok(Action::None);
        }
        match event::read()? {
            event::Event::Key(key) => Ok(keymap::map_key(key)),
            _ => Ok(Action::None),
        }
    }
}

/// Character for an obstacle glyph
pub fn glyph_char(glyph: Glyph, ascii: bool) -> char {
    match (glyph, ascii) {
        (Glyph::Cross, _) => 'X',
        (Glyph::Hash, _) => '#',
        (Glyph::Triangle, false) => '▲',
        (Glyph::Triangle, true) => '^',
        (Glyph::Circle, false) => '●',
        (Glyph::Circle, true) => 'o',
        (Glyph::Square, false) => '■',
        (Glyph::Square, true) => '%',
    }
}

/// Redraws the whole screen every tick
pub struct TerminalRenderer<W: Write> {
    out: W,
    width: u16,
    height: u16,
    ascii: bool,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, width: u16, height: u16, ascii: bool) -> Self {
        Self {
            out,
            width,
            height,
            ascii,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Print `text` at a cell, skipping anything that starts off screen
    fn put(&mut self, x: i32, y: i32, text: &str, color: Color) -> io::Result<()> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return Ok(());
        }
        queue!(
            self.out,
            cursor::MoveTo(x as u16, y as u16),
            SetForegroundColor(color),
            Print(text),
            ResetColor
        )
    }

    fn put_centered(&mut self, y: i32, text: &str, color: Color) -> io::Result<()> {
        let len = text.chars().count() as i32;
        let x = ((self.width as i32 - len) / 2).max(0);
        self.put(x, y, text, color)
    }

    fn put_right(&mut self, y: i32, text: &str, color: Color) -> io::Result<()> {
        let len = text.chars().count() as i32;
        self.put(self.width as i32 - len - 2, y, text, color)
    }

    fn draw_menu(&mut self, snap: &Snapshot<'_>) -> io::Result<()> {
        let title = [
            "╔══════════════════════════════════════╗",
            "║            TERMINAL RACER            ║",
            "║                                      ║",
            "║         ASCII Racing Action!         ║",
            "╚══════════════════════════════════════╝",
        ];
        let high = format!("HIGH SCORE: {}", snap.high_score);
        let menu = [
            "",
            "CONTROLS:",
            "  <- -> or A/D : Move left/right",
            "  SPACEBAR     : Nitro boost",
            "  P            : Pause game",
            "  Q            : Quit",
            "",
            high.as_str(),
            "",
            "Press ENTER to start racing!",
        ];

        let start_y = self.height as i32 / 2 - 8;
        for (i, line) in title.iter().enumerate() {
            self.put_centered(start_y + i as i32, line, TEXT_COLOR)?;
        }
        let menu_y = start_y + title.len() as i32 + 1;
        for (i, line) in menu.iter().enumerate() {
            let color = if line.starts_with("HIGH") {
                UI_COLOR
            } else {
                TEXT_COLOR
            };
            self.put_centered(menu_y + i as i32, line, color)?;
        }
        Ok(())
    }

    fn draw_road(&mut self, snap: &Snapshot<'_>) -> io::Result<()> {
        let field = snap.field;
        let border = if self.ascii { "|" } else { "║" };
        let height = field.height as i32;
        for y in 0..height {
            self.put(field.x0 - 1, y, border, BORDER_COLOR)?;
            self.put(field.right_edge(), y, border, BORDER_COLOR)?;
        }

        // Dashes scroll with the frame count
        let phase = (snap.frame_count / 2) as i32;
        for lane in 1..field.lanes {
            let x = field.lane_left(lane) - 1;
            for y in 0..height {
                if (y + phase).rem_euclid(4) < 2 {
                    self.put(x, y, "|", LANE_COLOR)?;
                }
            }
        }
        Ok(())
    }

    fn draw_obstacles(&mut self, snap: &Snapshot<'_>) -> io::Result<()> {
        for obstacle in snap.obstacles {
            let mut buf = [0u8; 4];
            let ch = glyph_char(obstacle.glyph, self.ascii).encode_utf8(&mut buf);
            self.put(obstacle.x, obstacle.row(), ch, OBSTACLE_COLOR)?;
        }
        Ok(())
    }

    fn draw_player(&mut self, snap: &Snapshot<'_>) -> io::Result<()> {
        let player = snap.player;
        let color = if snap.nitro.active {
            NITRO_COLOR
        } else {
            PLAYER_COLOR
        };
        let car = if self.ascii { "|A|" } else { "▐█▌" };
        self.put(player.x, player.y, car, color)?;
        if snap.nitro.active {
            let flame = if self.ascii { "^^^" } else { "░░░" };
            self.put(player.x, player.y + 1, flame, NITRO_COLOR)?;
        }
        Ok(())
    }

    fn draw_hud(&mut self, snap: &Snapshot<'_>) -> io::Result<()> {
        self.put(2, 1, &format!("SCORE: {}", snap.score), UI_COLOR)?;
        self.put(2, 2, &format!("HIGH: {}", snap.high_score), UI_COLOR)?;
        self.put_right(1, &format!("SPEED: {:.1}", snap.difficulty.speed), UI_COLOR)?;

        let fps = snap.fps.max(1);
        let (nitro, color) = if snap.nitro.active {
            ("NITRO: ACTIVE!".to_string(), NITRO_COLOR)
        } else if snap.nitro.cooldown_ticks > 0 {
            (
                format!("NITRO: {}s", snap.nitro.cooldown_ticks / fps + 1),
                OBSTACLE_COLOR,
            )
        } else {
            ("NITRO: READY".to_string(), UI_COLOR)
        };
        self.put_right(2, &nitro, color)?;

        if snap.frame_count < fps as u64 * HINT_SECS {
            let hint = "<- -> Move | SPACE Nitro | P Pause | Q Quit";
            self.put_centered(self.height as i32 - 1, hint, TEXT_COLOR)?;
        }
        Ok(())
    }

    fn draw_game(&mut self, snap: &Snapshot<'_>) -> io::Result<()> {
        self.draw_road(snap)?;
        self.draw_obstacles(snap)?;
        self.draw_player(snap)?;
        self.draw_hud(snap)
    }

    fn draw_pause(&mut self) -> io::Result<()> {
        let panel = [
            "╔══════════════════╗",
            "║      PAUSED      ║",
            "║                  ║",
            "║  Press P to      ║",
            "║  continue        ║",
            "╚══════════════════╝",
        ];
        let start_y = self.height as i32 / 2 - panel.len() as i32 / 2;
        for (i, line) in panel.iter().enumerate() {
            self.put_centered(start_y + i as i32, line, TEXT_COLOR)?;
        }
        Ok(())
    }

    fn draw_game_over(&mut self, snap: &Snapshot<'_>) -> io::Result<()> {
        let final_line = format!("║         FINAL SCORE: {:4}            ║", snap.score);
        let high_line = format!("║         HIGH SCORE:  {:4}            ║", snap.high_score);
        let panel = [
            "╔══════════════════════════════════════╗",
            "║              GAME OVER!              ║",
            "║                                      ║",
            final_line.as_str(),
            high_line.as_str(),
            "║                                      ║",
            "║       Press ENTER to continue        ║",
            "║       Press Q to quit                ║",
            "╚══════════════════════════════════════╝",
        ];
        let start_y = self.height as i32 / 2 - panel.len() as i32 / 2;
        for (i, line) in panel.iter().enumerate() {
            let color = if line.contains("SCORE") {
                UI_COLOR
            } else {
                TEXT_COLOR
            };
            self.put_centered(start_y + i as i32, line, color)?;
        }

        if snap.score == snap.high_score && snap.score > 0 {
            self.put_centered(start_y - 2, "*** NEW HIGH SCORE! ***", NITRO_COLOR)?;
        }
        Ok(())
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn render(&mut self, snap: &Snapshot<'_>) -> io::Result<()> {
        queue!(self.out, Clear(ClearType::All))?;
        match snap.phase {
            GamePhase::Menu => self.draw_menu(snap)?,
            GamePhase::Playing => self.draw_game(snap)?,
            GamePhase::Paused => {
                self.draw_game(snap)?;
                self.draw_pause()?;
            }
            GamePhase::GameOver => self.draw_game_over(snap)?,
        }
        self.out.flush()
    }
}
