//! Vorax Serpens - A grid Snake arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (snake, food, obstacles, state machine)
//! - `highscores`: Bounded leaderboard and its flat-file format
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences (game mode, sound)
//! - `audio`: Routes game events to sound effects
//! - `render`: Read-only text renderer over a simulation snapshot
//! - `demo`: Autopilot used by the headless host

pub mod audio;
pub mod demo;
pub mod highscores;
pub mod render;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use highscores::{HighScoreEntry, HighScoreTable};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (pixels)
    pub const SCREEN_WIDTH: i32 = 800;
    pub const SCREEN_HEIGHT: i32 = 600;
    /// Side of one grid cell (pixels)
    pub const CELL_SIZE: i32 = 20;

    /// Snake defaults
    pub const INITIAL_SNAKE_LENGTH: usize = 3;
    /// Queued direction changes, applied one per tick
    pub const INPUT_BUFFER_SIZE: usize = 2;

    /// Background tick period (ms) at round start
    pub const INITIAL_MOVE_INTERVAL_MS: u32 = 150;
    /// Fastest the background tick can get
    pub const MIN_MOVE_INTERVAL_MS: u32 = 50;
    /// Interval shaved off per food eaten
    pub const SPEED_INCREMENT_MS: u32 = 4;

    /// Boost (hold modifier key)
    pub const BOOST_MOVE_INTERVAL_MS: u32 = 40;
    pub const MIN_BOOST_LENGTH: usize = 3;
    pub const BOOST_COST_INTERVAL_SECS: f32 = 0.5;
    pub const BOOST_SCORE_COST: u32 = 1;
    /// Score deductions per one segment of shrink
    pub const BOOST_LENGTH_COST_INTERVALS: u32 = 3;

    /// Obstacles
    pub const OBSTACLE_COUNT: usize = 5;
    pub const OBSTACLE_SCORE_INTERVAL: u32 = 5;
    /// Cells kept clear around the spawn head (Chebyshev radius)
    pub const OBSTACLE_SAFE_RADIUS: i32 = 2;
    pub const ADD_OBSTACLE_ATTEMPTS: u32 = 100;
    /// Grid occupancy at which no more obstacles are added
    pub const GRID_FULL_RATIO: f32 = 0.9;
    pub const BASE_MOVING_RATIO: f32 = 0.2;
    pub const MOVING_RATIO_PER_SCORE: f32 = 0.02;
    pub const MAX_MOVING_RATIO: f32 = 0.6;
    pub const BASE_OBSTACLE_SPEED_FACTOR: u32 = 4;
    pub const MIN_OBSTACLE_SPEED_FACTOR: u32 = 1;
    pub const OBSTACLE_SPEED_DIVISOR: u32 = 10;

    /// Leaderboard
    pub const MAX_HIGH_SCORES: usize = 5;
    pub const MAX_NAME_LENGTH: usize = 15;
    pub const DEFAULT_PLAYER_NAME: &str = "Player";
}
