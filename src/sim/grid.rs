//! Grid geometry
//!
//! Positions are pixel coordinates of a cell's top-left corner and are always
//! multiples of the cell size. Everything here is a pure function.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// A cell position in pixels
pub type Cell = IVec2;

/// Direction of travel on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }

    /// Unit step in grid units (y grows downward)
    pub fn delta(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }
}

/// Wall behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameMode {
    /// Leaving the playfield is fatal
    #[default]
    Classic,
    /// Leaving the playfield wraps to the opposite edge
    PortalWalls,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Classic => "Classic",
            GameMode::PortalWalls => "Portal Walls",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            GameMode::Classic => GameMode::PortalWalls,
            GameMode::PortalWalls => GameMode::Classic,
        }
    }
}

/// Off-grid position meaning "no valid placement"
pub fn sentinel(cell_size: i32) -> Cell {
    IVec2::new(-cell_size, -cell_size)
}

/// Number of columns and rows that fit on the playfield
pub fn grid_dims(width: i32, height: i32, cell_size: i32) -> (i32, i32) {
    if cell_size <= 0 {
        return (0, 0);
    }
    (width / cell_size, height / cell_size)
}

/// Pixel position of grid cell (col, row)
#[inline]
pub fn cell_at(col: i32, row: i32, cell_size: i32) -> Cell {
    IVec2::new(col * cell_size, row * cell_size)
}

/// One cell further along `dir`
#[inline]
pub fn step(pos: Cell, dir: Direction, cell_size: i32) -> Cell {
    pos + dir.delta() * cell_size
}

/// True if the cell lies inside a `width` x `height` playfield
#[inline]
pub fn in_bounds(pos: Cell, width: i32, height: i32) -> bool {
    pos.x >= 0 && pos.x < width && pos.y >= 0 && pos.y < height
}

/// Wrap a position back onto the playfield (portal walls)
#[inline]
pub fn wrap(pos: Cell, width: i32, height: i32) -> Cell {
    IVec2::new(pos.x.rem_euclid(width), pos.y.rem_euclid(height))
}

/// Resolve a candidate move against the walls for the given mode.
/// Returns `None` when the move leaves a Classic playfield.
pub fn resolve_walls(pos: Cell, mode: GameMode, width: i32, height: i32) -> Option<Cell> {
    match mode {
        GameMode::Classic => in_bounds(pos, width, height).then_some(pos),
        GameMode::PortalWalls => Some(wrap(pos, width, height)),
    }
}

/// Chebyshev distance between two cells, in cells
pub fn cell_distance(a: Cell, b: Cell, cell_size: i32) -> i32 {
    let d = (a - b).abs();
    d.x.max(d.y) / cell_size.max(1)
}
