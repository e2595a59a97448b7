//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering, audio or file I/O

pub mod food;
pub mod grid;
pub mod input;
pub mod obstacle;
pub mod snake;
pub mod state;
pub mod tick;

pub use food::Food;
pub use grid::{Cell, Direction, GameMode};
pub use input::{Action, TextInput};
pub use obstacle::{Obstacle, ObstacleMovement, moving_ratio, obstacle_speed_factor};
pub use snake::Snake;
pub use state::{
    CollisionKind, Game, GameEvent, GamePhase, MainMenuItem, OptionItem, Snapshot,
};
pub use tick::TickOutcome;
