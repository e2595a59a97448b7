//! Food placement

use std::collections::HashSet;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::grid::{self, Cell};
use super::obstacle::Obstacle;

/// The single active food cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Food {
    pub position: Cell,
    cell_size: i32,
}

impl Food {
    /// Unplaced food, parked on the off-grid sentinel
    pub fn new(cell_size: i32) -> Self {
        Self {
            position: grid::sentinel(cell_size),
            cell_size,
        }
    }

    /// True while the food sits on the sentinel (nowhere to place it)
    pub fn is_placed(&self) -> bool {
        self.position != grid::sentinel(self.cell_size)
    }

    /// Move the food to a random free cell.
    ///
    /// Random sampling first, then a row-major scan so a nearly full board
    /// still finds the last free cells. Returns false (and parks the food on
    /// the sentinel) when nothing is free.
    pub fn generate<'a, R: Rng>(
        &mut self,
        width: i32,
        height: i32,
        snake_body: impl IntoIterator<Item = &'a Cell>,
        obstacles: &[Obstacle],
        rng: &mut R,
    ) -> bool {
        let (cols, rows) = grid::grid_dims(width, height, self.cell_size);
        let area = (cols.max(0) * rows.max(0)) as usize;

        let occupied: HashSet<Cell> = snake_body
            .into_iter()
            .copied()
            .chain(obstacles.iter().map(|o| o.position))
            .filter(|c| grid::in_bounds(*c, width, height))
            .collect();

        if occupied.len() >= area {
            log::warn!("No room for food ({} of {} cells occupied)", occupied.len(), area);
            self.position = grid::sentinel(self.cell_size);
            return false;
        }

        let max_attempts = area * 3 + 50;
        for _ in 0..max_attempts {
            let candidate = grid::cell_at(
                rng.random_range(0..cols),
                rng.random_range(0..rows),
                self.cell_size,
            );
            if !occupied.contains(&candidate) {
                self.position = candidate;
                return true;
            }
        }

        log::debug!("Food sampling exhausted after {} attempts, scanning", max_attempts);
        for row in 0..rows {
            for col in 0..cols {
                let candidate = grid::cell_at(col, row, self.cell_size);
                if !occupied.contains(&candidate) {
                    self.position = candidate;
                    return true;
                }
            }
        }

        log::warn!("Food placement failed: no free cell");
        self.position = grid::sentinel(self.cell_size);
        false
    }
}
