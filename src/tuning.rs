//! Data-driven game balance
//!
//! Every constant the simulation consumes is carried here so a host can
//! inject its own numbers (or load them from JSON) at construction time.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Gameplay constants injected into [`crate::sim::Game`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Playfield ===
    pub screen_width: i32,
    pub screen_height: i32,
    pub cell_size: i32,

    // === Snake ===
    pub initial_snake_length: usize,
    pub input_buffer_size: usize,

    // === Speed curve ===
    pub initial_move_interval_ms: u32,
    pub min_move_interval_ms: u32,
    pub speed_increment_ms: u32,

    // === Boost ===
    pub boost_move_interval_ms: u32,
    pub min_boost_length: usize,
    pub boost_cost_interval_secs: f32,
    pub boost_score_cost: u32,
    pub boost_length_cost_intervals: u32,

    // === Obstacles ===
    pub obstacle_count: usize,
    pub obstacle_score_interval: u32,
    pub obstacle_safe_radius: i32,
    pub add_obstacle_attempts: u32,
    pub grid_full_ratio: f32,
    pub base_moving_ratio: f32,
    pub moving_ratio_per_score: f32,
    pub max_moving_ratio: f32,
    pub base_obstacle_speed_factor: u32,
    pub min_obstacle_speed_factor: u32,
    pub obstacle_speed_divisor: u32,

    // === Leaderboard ===
    pub max_high_scores: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            cell_size: CELL_SIZE,

            initial_snake_length: INITIAL_SNAKE_LENGTH,
            input_buffer_size: INPUT_BUFFER_SIZE,

            initial_move_interval_ms: INITIAL_MOVE_INTERVAL_MS,
            min_move_interval_ms: MIN_MOVE_INTERVAL_MS,
            speed_increment_ms: SPEED_INCREMENT_MS,

            boost_move_interval_ms: BOOST_MOVE_INTERVAL_MS,
            min_boost_length: MIN_BOOST_LENGTH,
            boost_cost_interval_secs: BOOST_COST_INTERVAL_SECS,
            boost_score_cost: BOOST_SCORE_COST,
            boost_length_cost_intervals: BOOST_LENGTH_COST_INTERVALS,

            obstacle_count: OBSTACLE_COUNT,
            obstacle_score_interval: OBSTACLE_SCORE_INTERVAL,
            obstacle_safe_radius: OBSTACLE_SAFE_RADIUS,
            add_obstacle_attempts: ADD_OBSTACLE_ATTEMPTS,
            grid_full_ratio: GRID_FULL_RATIO,
            base_moving_ratio: BASE_MOVING_RATIO,
            moving_ratio_per_score: MOVING_RATIO_PER_SCORE,
            max_moving_ratio: MAX_MOVING_RATIO,
            base_obstacle_speed_factor: BASE_OBSTACLE_SPEED_FACTOR,
            min_obstacle_speed_factor: MIN_OBSTACLE_SPEED_FACTOR,
            obstacle_speed_divisor: OBSTACLE_SPEED_DIVISOR,

            max_high_scores: MAX_HIGH_SCORES,
        }
    }
}

impl Tuning {
    /// Grid columns
    pub fn grid_cols(&self) -> i32 {
        self.screen_width / self.cell_size
    }

    /// Grid rows
    pub fn grid_rows(&self) -> i32 {
        self.screen_height / self.cell_size
    }

    /// Total number of cells on the playfield
    pub fn grid_area(&self) -> usize {
        (self.grid_cols().max(0) * self.grid_rows().max(0)) as usize
    }

    /// Clamp values that would break the simulation (zero cell size, an
    /// interval floor above the start interval, ...)
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if self.cell_size <= 0 {
            log::warn!("cell_size {} is invalid, using {}", self.cell_size, defaults.cell_size);
            self.cell_size = defaults.cell_size;
        }
        if self.screen_width < self.cell_size || self.screen_height < self.cell_size {
            log::warn!(
                "Playfield {}x{} smaller than one cell, using defaults",
                self.screen_width,
                self.screen_height
            );
            self.screen_width = defaults.screen_width;
            self.screen_height = defaults.screen_height;
            self.cell_size = defaults.cell_size;
        }
        // Snap the playfield to whole cells
        self.screen_width -= self.screen_width % self.cell_size;
        self.screen_height -= self.screen_height % self.cell_size;

        self.initial_snake_length = self.initial_snake_length.max(1);
        self.input_buffer_size = self.input_buffer_size.max(1);
        self.min_move_interval_ms = self.min_move_interval_ms.max(1);
        self.initial_move_interval_ms = self.initial_move_interval_ms.max(self.min_move_interval_ms);
        self.boost_move_interval_ms = self.boost_move_interval_ms.max(1);
        if !(self.boost_cost_interval_secs > 0.0) {
            self.boost_cost_interval_secs = defaults.boost_cost_interval_secs;
        }
        self.boost_length_cost_intervals = self.boost_length_cost_intervals.max(1);
        self.obstacle_score_interval = self.obstacle_score_interval.max(1);
        self.obstacle_speed_divisor = self.obstacle_speed_divisor.max(1);
        self.min_obstacle_speed_factor = self.min_obstacle_speed_factor.max(1);
        self.base_obstacle_speed_factor = self
            .base_obstacle_speed_factor
            .max(self.min_obstacle_speed_factor);
        self.grid_full_ratio = self.grid_full_ratio.clamp(0.0, 1.0);
        self.max_moving_ratio = self.max_moving_ratio.clamp(0.0, 1.0);
        self.base_moving_ratio = self.base_moving_ratio.clamp(0.0, 1.0);
        self
    }

    /// Load tuning from a JSON file. Missing fields take their defaults; a
    /// missing or unreadable file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<Tuning>(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning.sanitized()
                }
                Err(e) => {
                    log::warn!("Bad tuning file {}: {}, using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No tuning file at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!("Failed to read tuning {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}
