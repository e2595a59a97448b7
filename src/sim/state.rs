//! Game state and core simulation types
//!
//! [`Game`] owns everything a round needs: snake, food, obstacles, the
//! leaderboard and the seeded RNG. Rendering and audio only ever see a
//! [`Snapshot`] and the drained [`GameEvent`] queue.

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::food::Food;
use super::grid::{self, Cell, Direction, GameMode};
use super::obstacle::{self, Obstacle};
use super::snake::Snake;
use crate::highscores::{HighScoreEntry, HighScoreTable};
use crate::settings::Settings;
use crate::tuning::Tuning;

/// Top-level state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    MainMenu,
    Options,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Round ended
    GameOver,
    /// Round ended with a qualifying score; typing a name
    EnteringHighScore,
}

/// What ended a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionKind {
    Wall,
    SelfBody,
    Obstacle,
}

/// Things that happened during input handling or simulation, for the
/// audio/persistence collaborators to react to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PhaseChanged { from: GamePhase, to: GamePhase },
    FoodEaten { score: u32 },
    Collision(CollisionKind),
    GameOver { score: u32 },
    /// Final score qualified; name entry started
    HighScoreQualified { score: u32 },
    /// Entry stored at the given rank (1-indexed)
    HighScoreRecorded { rank: usize },
    /// Table contents changed and should be persisted
    HighScoresChanged,
    SettingsChanged,
    ObstacleAdded,
    BoostStarted,
    BoostStopped,
    MenuMoved,
    MenuConfirmed,
    QuitRequested,
}

/// Main menu entries, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainMenuItem {
    Play,
    Options,
    Quit,
}

impl MainMenuItem {
    pub const ALL: [MainMenuItem; 3] = [MainMenuItem::Play, MainMenuItem::Options, MainMenuItem::Quit];

    pub fn label(&self) -> &'static str {
        match self {
            MainMenuItem::Play => "Play",
            MainMenuItem::Options => "Options",
            MainMenuItem::Quit => "Quit",
        }
    }
}

/// Options menu entries, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionItem {
    ToggleMode,
    ToggleSound,
    ResetHighScores,
    Back,
}

impl OptionItem {
    pub const ALL: [OptionItem; 4] = [
        OptionItem::ToggleMode,
        OptionItem::ToggleSound,
        OptionItem::ResetHighScores,
        OptionItem::Back,
    ];

    pub fn label(&self, settings: &Settings) -> String {
        match self {
            OptionItem::ToggleMode => format!("Mode: {}", settings.game_mode.as_str()),
            OptionItem::ToggleSound => {
                format!("Sound: {}", if settings.sound_enabled { "On" } else { "Off" })
            }
            OptionItem::ResetHighScores => "Reset High Scores".to_string(),
            OptionItem::Back => "Back".to_string(),
        }
    }
}

/// Read-only view handed to renderers
#[derive(Debug, Clone)]
pub struct Snapshot<'a> {
    pub phase: GamePhase,
    pub mode: GameMode,
    pub score: u32,
    pub snake: &'a VecDeque<Cell>,
    pub food: Cell,
    pub obstacles: &'a [Obstacle],
    pub high_scores: &'a [HighScoreEntry],
    pub is_boosting: bool,
    pub move_interval_ms: u32,
    pub player_name: &'a str,
    /// Rank the score would take, while a name is being entered
    pub pending_rank: Option<usize>,
    pub main_menu_index: usize,
    pub options_index: usize,
    pub settings: &'a Settings,
    pub screen_width: i32,
    pub screen_height: i32,
    pub cell_size: i32,
}

/// The game controller
#[derive(Debug, Clone)]
pub struct Game {
    pub tuning: Tuning,
    pub settings: Settings,
    /// Seed the RNG was created from
    pub seed: u64,
    pub rng: Pcg32,

    pub phase: GamePhase,
    pub snake: Snake,
    pub food: Food,
    pub obstacles: Vec<Obstacle>,
    pub high_scores: HighScoreTable,

    pub score: u32,
    /// Background tick period (ms)
    pub move_interval_ms: u32,
    /// Unsimulated time carried between frames (seconds)
    pub time_accumulator: f32,

    pub is_boosting: bool,
    /// Seconds of boost since the last cost was charged
    pub boost_cost_timer: f32,
    /// Score deductions since the last shrink
    pub boost_cost_cycles: u32,

    pub next_obstacle_score_threshold: u32,

    /// Name being typed in `EnteringHighScore`
    pub player_name: String,
    pub main_menu_index: usize,
    pub options_index: usize,
    pub quit_requested: bool,

    events: Vec<GameEvent>,
}

impl Game {
    /// Create a game sitting on the main menu
    pub fn new(tuning: Tuning, settings: Settings, high_scores: HighScoreTable, seed: u64) -> Self {
        Self::with_rng(tuning, settings, high_scores, seed, Pcg32::seed_from_u64(seed))
    }

    /// Create a game with an explicit RNG
    pub fn with_rng(
        tuning: Tuning,
        settings: Settings,
        high_scores: HighScoreTable,
        seed: u64,
        rng: Pcg32,
    ) -> Self {
        let tuning = tuning.sanitized();
        let cell = tuning.cell_size;
        let mut game = Self {
            snake: Snake::new(Cell::ZERO, Direction::Right, 1, cell, tuning.input_buffer_size),
            food: Food::new(cell),
            obstacles: Vec::new(),
            high_scores,
            score: 0,
            move_interval_ms: tuning.initial_move_interval_ms,
            time_accumulator: 0.0,
            is_boosting: false,
            boost_cost_timer: 0.0,
            boost_cost_cycles: 0,
            next_obstacle_score_threshold: tuning.obstacle_score_interval,
            player_name: String::new(),
            main_menu_index: 0,
            options_index: 0,
            quit_requested: false,
            events: Vec::new(),
            phase: GamePhase::MainMenu,
            tuning,
            settings,
            seed,
            rng,
        };
        game.build_round();
        game
    }

    /// Current wall mode
    pub fn mode(&self) -> GameMode {
        self.settings.game_mode
    }

    /// Where a new snake's head spawns: the centre cell
    pub fn calculate_start_position(&self) -> Cell {
        let (cols, rows) = grid::grid_dims(
            self.tuning.screen_width,
            self.tuning.screen_height,
            self.tuning.cell_size,
        );
        grid::cell_at(cols / 2, rows / 2, self.tuning.cell_size)
    }

    /// Fresh snake, obstacles, food and counters; leaves the phase alone
    fn build_round(&mut self) {
        let t = &self.tuning;
        self.snake = Snake::new(
            self.calculate_start_position(),
            Direction::Right,
            t.initial_snake_length,
            t.cell_size,
            t.input_buffer_size,
        );
        self.score = 0;
        self.move_interval_ms = t.initial_move_interval_ms;
        self.next_obstacle_score_threshold = t.obstacle_score_interval;
        self.time_accumulator = 0.0;
        self.is_boosting = false;
        self.boost_cost_timer = 0.0;
        self.boost_cost_cycles = 0;
        self.player_name.clear();

        self.obstacles = obstacle::generate_obstacles(&self.tuning, &self.snake, self.score, &mut self.rng);
        self.food = Food::new(self.tuning.cell_size);
        self.place_food();
    }

    /// Start a new round
    pub fn reset(&mut self) {
        self.build_round();
        log::info!(
            "New round: mode={}, obstacles={}, seed={}",
            self.mode().as_str(),
            self.obstacles.len(),
            self.seed
        );
        self.set_phase(GamePhase::Playing);
    }

    /// Put the food on a free cell (or the sentinel if the board is full)
    pub fn place_food(&mut self) -> bool {
        self.food.generate(
            self.tuning.screen_width,
            self.tuning.screen_height,
            self.snake.body(),
            &self.obstacles,
            &mut self.rng,
        )
    }

    /// Shave the tick period, never below the floor
    pub fn increase_speed(&mut self) {
        self.move_interval_ms = self
            .move_interval_ms
            .saturating_sub(self.tuning.speed_increment_ms)
            .max(self.tuning.min_move_interval_ms);
    }

    /// Seconds per simulation tick right now
    pub fn tick_period(&self) -> f32 {
        let ms = if self.is_boosting {
            self.tuning.boost_move_interval_ms
        } else {
            self.move_interval_ms
        };
        ms as f32 / 1000.0
    }

    pub(crate) fn set_phase(&mut self, to: GamePhase) {
        let from = self.phase;
        if from == to {
            return;
        }
        self.phase = to;
        log::debug!("Phase {:?} -> {:?}", from, to);
        self.push_event(GameEvent::PhaseChanged { from, to });
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Leaderboard rank the staged entry would get, during name entry only
    pub fn pending_rank(&self) -> Option<usize> {
        if self.phase != GamePhase::EnteringHighScore {
            return None;
        }
        self.high_scores.potential_rank(self.score)
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            phase: self.phase,
            mode: self.mode(),
            score: self.score,
            snake: self.snake.body(),
            food: self.food.position,
            obstacles: &self.obstacles,
            high_scores: self.high_scores.entries(),
            is_boosting: self.is_boosting,
            move_interval_ms: self.move_interval_ms,
            player_name: &self.player_name,
            pending_rank: self.pending_rank(),
            main_menu_index: self.main_menu_index,
            options_index: self.options_index,
            settings: &self.settings,
            screen_width: self.tuning.screen_width,
            screen_height: self.tuning.screen_height,
            cell_size: self.tuning.cell_size,
        }
    }
}
