//! Text rendering
//!
//! Renderers only read a [`Snapshot`]; nothing here can change the game.
//! [`TextRenderer`] draws the board as a character grid with the HUD and the
//! per-phase overlay underneath, which is enough for a terminal host and for
//! asserting on frames in tests.

use std::fmt::Write;

use crate::sim::{Cell, GamePhase, MainMenuItem, OptionItem, Snapshot, grid};

/// Anything that can present a frame
pub trait Renderer {
    fn draw_frame(&mut self, snapshot: &Snapshot<'_>);
}

/// Glyphs
const WALL: char = '#';
const PORTAL_WALL: char = ':';
const EMPTY: char = ' ';
const HEAD: char = '@';
const BODY: char = 'o';
const FOOD: char = '*';
const OBSTACLE: char = 'X';
const MOVING_OBSTACLE: char = '%';

/// Character-grid renderer; keeps the last frame it drew
#[derive(Debug, Default, Clone)]
pub struct TextRenderer {
    frame: String,
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent frame
    pub fn frame(&self) -> &str {
        &self.frame
    }

    /// Draw a snapshot to a fresh string
    pub fn render(snapshot: &Snapshot<'_>) -> String {
        let mut out = String::new();
        match snapshot.phase {
            GamePhase::MainMenu => draw_main_menu(&mut out, snapshot),
            GamePhase::Options => draw_options(&mut out, snapshot),
            _ => {
                draw_board(&mut out, snapshot);
                draw_hud(&mut out, snapshot);
                draw_overlay(&mut out, snapshot);
            }
        }
        out
    }
}

impl Renderer for TextRenderer {
    fn draw_frame(&mut self, snapshot: &Snapshot<'_>) {
        self.frame = Self::render(snapshot);
    }
}

fn to_index(pos: Cell, cols: i32, rows: i32, cell_size: i32) -> Option<usize> {
    if pos.x < 0 || pos.y < 0 {
        return None;
    }
    let (col, row) = (pos.x / cell_size, pos.y / cell_size);
    (col < cols && row < rows).then(|| (row * cols + col) as usize)
}

fn draw_board(out: &mut String, s: &Snapshot<'_>) {
    let (cols, rows) = grid::grid_dims(s.screen_width, s.screen_height, s.cell_size);
    let mut cells = vec![EMPTY; (cols * rows).max(0) as usize];

    let mut put = |pos: Cell, glyph: char| {
        if let Some(i) = to_index(pos, cols, rows, s.cell_size) {
            cells[i] = glyph;
        }
    };
    put(s.food, FOOD);
    for o in s.obstacles {
        put(o.position, if o.is_moving() { MOVING_OBSTACLE } else { OBSTACLE });
    }
    // Tail to head so the head glyph wins on overlap
    for (i, seg) in s.snake.iter().enumerate().rev() {
        put(*seg, if i == 0 { HEAD } else { BODY });
    }

    let wall = match s.mode {
        grid::GameMode::Classic => WALL,
        grid::GameMode::PortalWalls => PORTAL_WALL,
    };
    let edge: String = std::iter::repeat_n(wall, cols as usize + 2).collect();
    out.push_str(&edge);
    out.push('\n');
    for row in cells.chunks(cols.max(1) as usize) {
        out.push(wall);
        out.extend(row.iter());
        out.push(wall);
        out.push('\n');
    }
    out.push_str(&edge);
    out.push('\n');
}

fn draw_hud(out: &mut String, s: &Snapshot<'_>) {
    let _ = write!(
        out,
        "Score: {}  Length: {}  Mode: {}  Speed: {}ms",
        s.score,
        s.snake.len(),
        s.mode.as_str(),
        s.move_interval_ms
    );
    if s.is_boosting {
        out.push_str("  BOOST");
    }
    out.push('\n');
}

fn draw_overlay(out: &mut String, s: &Snapshot<'_>) {
    match s.phase {
        GamePhase::Paused => out.push_str("PAUSED - press P to resume\n"),
        GamePhase::GameOver => {
            let _ = writeln!(out, "GAME OVER - final score {}", s.score);
            draw_high_scores(out, s);
            out.push_str("Press R to play again, Esc for menu\n");
        }
        GamePhase::EnteringHighScore => {
            match s.pending_rank {
                Some(rank) => {
                    let _ = writeln!(out, "NEW HIGH SCORE: {} (rank #{})", s.score, rank);
                }
                None => {
                    let _ = writeln!(out, "NEW HIGH SCORE: {}", s.score);
                }
            }
            let _ = writeln!(out, "Enter name: {}_", s.player_name);
        }
        _ => {}
    }
}

fn draw_high_scores(out: &mut String, s: &Snapshot<'_>) {
    out.push_str("High Scores\n");
    if s.high_scores.is_empty() {
        out.push_str("  (none yet)\n");
    }
    for (i, e) in s.high_scores.iter().enumerate() {
        let _ = writeln!(out, "  {}. {:<15} {:>5}", i + 1, e.name, e.score);
    }
}

fn marker(selected: bool) -> &'static str {
    if selected { "> " } else { "  " }
}

fn draw_main_menu(out: &mut String, s: &Snapshot<'_>) {
    out.push_str("VORAX SERPENS\n\n");
    for (i, item) in MainMenuItem::ALL.iter().enumerate() {
        let _ = writeln!(out, "{}{}", marker(i == s.main_menu_index), item.label());
    }
    out.push('\n');
    draw_high_scores(out, s);
}

fn draw_options(out: &mut String, s: &Snapshot<'_>) {
    out.push_str("OPTIONS\n\n");
    for (i, item) in OptionItem::ALL.iter().enumerate() {
        let _ = writeln!(out, "{}{}", marker(i == s.options_index), item.label(s.settings));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::HighScoreTable;
    use crate::settings::Settings;
    use crate::sim::{Game, Obstacle};
    use crate::tuning::Tuning;

    fn small_game() -> Game {
        let tuning = Tuning {
            screen_width: 200,
            screen_height: 100,
            obstacle_count: 0,
            ..Default::default()
        };
        Game::new(tuning, Settings::default(), HighScoreTable::default(), 3)
    }

    #[test]
    fn test_main_menu_marks_selection() {
        let mut g = small_game();
        g.main_menu_index = 1;
        let frame = TextRenderer::render(&g.snapshot());
        assert!(frame.starts_with("VORAX SERPENS"));
        assert!(frame.contains("> Options"));
        assert!(frame.contains("  Play"));
        assert!(frame.contains("(none yet)"));
    }

    #[test]
    fn test_board_glyphs() {
        let mut g = small_game();
        g.reset();
        g.food.position = Cell::new(0, 0);
        g.obstacles.push(Obstacle::fixed(Cell::new(180, 80)));
        let mut r = TextRenderer::new();
        r.draw_frame(&g.snapshot());
        let lines: Vec<&str> = r.frame().lines().collect();

        // 10x5 cells plus the border
        assert_eq!(lines[0], "############");
        assert_eq!(lines[1].chars().nth(1), Some(FOOD));
        assert_eq!(lines[5].chars().nth(10), Some(OBSTACLE));
        // Head at the centre cell (5, 2), body trailing left
        assert_eq!(&lines[3][4..7], "oo@");
        assert!(lines[7].starts_with("Score: 0  Length: 3  Mode: Classic"));
    }

    #[test]
    fn test_game_over_overlay() {
        let mut g = small_game();
        g.reset();
        g.high_scores.add_high_score("Ada", 9);
        g.phase = GamePhase::GameOver;
        let frame = TextRenderer::render(&g.snapshot());
        assert!(frame.contains("GAME OVER"));
        assert!(frame.contains("1. Ada"));
    }

    #[test]
    fn test_name_entry_overlay() {
        let mut g = small_game();
        g.reset();
        g.high_scores.add_high_score("Ada", 9);
        g.score = 4;
        g.phase = GamePhase::EnteringHighScore;
        g.player_name.push_str("Bo");
        let frame = TextRenderer::render(&g.snapshot());
        assert!(frame.contains("NEW HIGH SCORE: 4 (rank #2)"));
        assert!(frame.contains("Enter name: Bo_"));
    }

    #[test]
    fn test_portal_mode_border() {
        let mut g = small_game();
        g.settings.game_mode = grid::GameMode::PortalWalls;
        g.reset();
        let frame = TextRenderer::render(&g.snapshot());
        assert!(frame.starts_with("::::"));
    }
}
