//! Obstacles: static blockers and patrolling movers
//!
//! The board gets more hostile as the score rises: more of the new obstacles
//! move, and movers step more often.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use super::grid::{self, Cell, Direction, GameMode};
use super::snake::Snake;
use crate::tuning::Tuning;

/// Patrol range for obstacles placed at round start
pub const INITIAL_RANGE: std::ops::RangeInclusive<u32> = 3..=8;
/// Patrol range for obstacles added mid-round
pub const ADDED_RANGE: std::ops::RangeInclusive<u32> = 3..=6;

/// How an obstacle moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ObstacleMovement {
    #[default]
    Static,
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Obstacle {
    pub position: Cell,
    pub movement: ObstacleMovement,
    pub move_direction: Direction,
    /// Steps taken before turning around
    pub move_range: u32,
    pub current_move_step: u32,
    pub move_delay_counter: u32,
    /// Snake ticks per obstacle step
    pub move_speed_factor: u32,
}

impl Obstacle {
    /// A static blocker
    pub fn fixed(position: Cell) -> Self {
        Self {
            position,
            movement: ObstacleMovement::Static,
            move_direction: Direction::Right,
            move_range: 0,
            current_move_step: 0,
            move_delay_counter: 0,
            move_speed_factor: 1,
        }
    }

    /// A patrolling blocker. The direction must lie on the movement axis.
    pub fn moving(position: Cell, move_direction: Direction, move_range: u32, move_speed_factor: u32) -> Self {
        let movement = match move_direction {
            Direction::Left | Direction::Right => ObstacleMovement::Horizontal,
            Direction::Up | Direction::Down => ObstacleMovement::Vertical,
        };
        Self {
            position,
            movement,
            move_direction,
            move_range: move_range.max(1),
            current_move_step: 0,
            move_delay_counter: 0,
            move_speed_factor: move_speed_factor.max(1),
        }
    }

    pub fn is_moving(&self) -> bool {
        self.movement != ObstacleMovement::Static
    }

    fn turn_around(&mut self) {
        self.move_direction = self.move_direction.opposite();
        self.current_move_step = 0;
    }
}

/// Chance that a newly placed obstacle moves
pub fn moving_ratio(score: u32, tuning: &Tuning) -> f32 {
    (tuning.base_moving_ratio + score as f32 * tuning.moving_ratio_per_score)
        .min(tuning.max_moving_ratio)
        .clamp(0.0, 1.0)
}

/// Snake ticks per obstacle step; lower is faster
pub fn obstacle_speed_factor(score: u32, tuning: &Tuning) -> u32 {
    tuning
        .base_obstacle_speed_factor
        .saturating_sub(score / tuning.obstacle_speed_divisor.max(1))
        .max(tuning.min_obstacle_speed_factor)
        .max(1)
}

/// Roll a static or moving obstacle at `position` for the current difficulty
fn roll_obstacle<R: Rng>(
    position: Cell,
    score: u32,
    range: std::ops::RangeInclusive<u32>,
    tuning: &Tuning,
    rng: &mut R,
) -> Obstacle {
    if !rng.random_bool(f64::from(moving_ratio(score, tuning))) {
        return Obstacle::fixed(position);
    }
    let horizontal = rng.random_bool(0.5);
    let forward = rng.random_bool(0.5);
    let direction = match (horizontal, forward) {
        (true, true) => Direction::Right,
        (true, false) => Direction::Left,
        (false, true) => Direction::Down,
        (false, false) => Direction::Up,
    };
    Obstacle::moving(
        position,
        direction,
        rng.random_range(range),
        obstacle_speed_factor(score, tuning),
    )
}

/// Populate the board at round start.
///
/// Cells within `obstacle_safe_radius` of the spawn head and the snake body
/// itself are never used.
pub fn generate_obstacles<R: Rng>(
    tuning: &Tuning,
    snake: &Snake,
    score: u32,
    rng: &mut R,
) -> Vec<Obstacle> {
    let (cols, rows) = grid::grid_dims(tuning.screen_width, tuning.screen_height, tuning.cell_size);
    let head = snake.head();

    let mut candidates: Vec<Cell> = (0..rows)
        .flat_map(|row| (0..cols).map(move |col| (col, row)))
        .map(|(col, row)| grid::cell_at(col, row, tuning.cell_size))
        .filter(|cell| grid::cell_distance(*cell, head, tuning.cell_size) > tuning.obstacle_safe_radius)
        .filter(|cell| !snake.occupies(*cell, false))
        .collect();

    candidates.shuffle(rng);
    if candidates.len() < tuning.obstacle_count {
        log::warn!(
            "Only {} free cells for {} obstacles",
            candidates.len(),
            tuning.obstacle_count
        );
    }

    let obstacles: Vec<Obstacle> = candidates
        .into_iter()
        .take(tuning.obstacle_count)
        .map(|pos| roll_obstacle(pos, score, INITIAL_RANGE, tuning, rng))
        .collect();

    log::debug!(
        "Generated {} obstacles ({} moving)",
        obstacles.len(),
        obstacles.iter().filter(|o| o.is_moving()).count()
    );
    obstacles
}

/// Try to add one obstacle mid-round. Fails quietly when the board is
/// nearly full or no free cell turns up within the attempt budget.
pub fn add_single_obstacle<R: Rng>(
    obstacles: &mut Vec<Obstacle>,
    snake: &Snake,
    food: Cell,
    score: u32,
    tuning: &Tuning,
    rng: &mut R,
) -> bool {
    let (cols, rows) = grid::grid_dims(tuning.screen_width, tuning.screen_height, tuning.cell_size);
    let area = tuning.grid_area();
    let occupied = snake.len() + obstacles.len() + 1;
    if area == 0 || occupied as f32 >= area as f32 * tuning.grid_full_ratio {
        log::debug!("Grid too full for another obstacle ({}/{})", occupied, area);
        return false;
    }

    let head = snake.head();
    for _ in 0..tuning.add_obstacle_attempts {
        let cell = grid::cell_at(rng.random_range(0..cols), rng.random_range(0..rows), tuning.cell_size);
        if cell == food
            || snake.occupies(cell, false)
            || check_obstacle_collision(obstacles, cell)
            // Never drop one right in front of the head
            || grid::cell_distance(cell, head, tuning.cell_size) <= 1
        {
            continue;
        }
        let obstacle = roll_obstacle(cell, score, ADDED_RANGE, tuning, rng);
        log::debug!("Added {:?} obstacle at {:?}", obstacle.movement, obstacle.position);
        obstacles.push(obstacle);
        return true;
    }

    log::debug!("No free cell for a new obstacle after {} attempts", tuning.add_obstacle_attempts);
    false
}

/// Is any obstacle at `pos`?
pub fn check_obstacle_collision(obstacles: &[Obstacle], pos: Cell) -> bool {
    obstacles.iter().any(|o| o.position == pos)
}

/// Step every moving obstacle whose delay has elapsed.
///
/// A mover turns around when its next cell is off a Classic board, holds
/// another obstacle, or holds a snake segment (the tail counts only while
/// the snake is growing). It also turns around after `move_range` steps.
/// Returns true if an obstacle landed on `food`.
pub fn update_obstacles(
    obstacles: &mut [Obstacle],
    snake: &Snake,
    food: Cell,
    mode: GameMode,
    tuning: &Tuning,
) -> bool {
    let mut food_hit = false;

    for i in 0..obstacles.len() {
        if !obstacles[i].is_moving() {
            continue;
        }

        obstacles[i].move_delay_counter += 1;
        if obstacles[i].move_delay_counter < obstacles[i].move_speed_factor {
            continue;
        }
        obstacles[i].move_delay_counter = 0;

        let ahead = grid::step(obstacles[i].position, obstacles[i].move_direction, tuning.cell_size);
        let next = grid::resolve_walls(ahead, mode, tuning.screen_width, tuning.screen_height);

        let blocked = match next {
            None => true,
            Some(cell) => {
                obstacles
                    .iter()
                    .enumerate()
                    .any(|(j, o)| j != i && o.position == cell)
                    || snake.occupies(cell, true)
            }
        };

        let obstacle = &mut obstacles[i];
        match next {
            Some(cell) if !blocked => {
                obstacle.position = cell;
                obstacle.current_move_step += 1;
                if cell == food {
                    food_hit = true;
                }
                if obstacle.current_move_step >= obstacle.move_range {
                    obstacle.turn_around();
                }
            }
            _ => obstacle.turn_around(),
        }
    }

    food_hit
}
