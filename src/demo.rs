//! Demo mode - a simple AI that plays the game
//!
//! Used by the headless host and handy for soak-testing the simulation.
//! Only ever produces [`Action`]s, the same as a human would.

use std::collections::{HashSet, VecDeque};

use crate::sim::obstacle::check_obstacle_collision;
use crate::sim::{Action, Cell, Direction, Game, GamePhase, grid};

/// Flood fill stops counting here; enough to tell a pocket from open space
const ESCAPE_SEARCH_LIMIT: usize = 256;

fn action_for(dir: Direction) -> Action {
    match dir {
        Direction::Up => Action::Up,
        Direction::Down => Action::Down,
        Direction::Left => Action::Left,
        Direction::Right => Action::Right,
    }
}

/// Where the head would land going `dir`, or `None` if that kills the snake
fn safe_step(game: &Game, from: Cell, dir: Direction) -> Option<Cell> {
    let t = &game.tuning;
    let next = grid::resolve_walls(
        grid::step(from, dir, t.cell_size),
        game.mode(),
        t.screen_width,
        t.screen_height,
    )?;
    if check_obstacle_collision(&game.obstacles, next) || game.snake.occupies(next, true) {
        return None;
    }
    Some(next)
}

/// Free cells reachable from `start`, capped at `limit`
fn escape_route_count(game: &Game, start: Cell, limit: usize) -> usize {
    let t = &game.tuning;
    let mut seen = HashSet::from([start]);
    let mut queue = VecDeque::from([start]);
    while let Some(pos) = queue.pop_front() {
        if seen.len() >= limit {
            break;
        }
        for dir in Direction::ALL {
            let Some(next) = grid::resolve_walls(
                grid::step(pos, dir, t.cell_size),
                game.mode(),
                t.screen_width,
                t.screen_height,
            ) else {
                continue;
            };
            if seen.contains(&next)
                || check_obstacle_collision(&game.obstacles, next)
                || game.snake.occupies(next, false)
            {
                continue;
            }
            seen.insert(next);
            queue.push_back(next);
        }
    }
    seen.len()
}

fn manhattan(a: Cell, b: Cell) -> i32 {
    let d = (a - b).abs();
    d.x + d.y
}

/// Choose the next move while playing: stay alive first, keep room to
/// manoeuvre second, head for the food third.
fn steer(game: &Game) -> Action {
    // One queued turn at a time
    if !game.snake.pending_inputs().is_empty() {
        return Action::None;
    }

    let head = game.snake.head();
    let current = game.snake.current_direction();
    let needed = game.snake.len();

    let best = Direction::ALL
        .into_iter()
        .filter(|dir| !dir.is_opposite(current))
        .filter_map(|dir| safe_step(game, head, dir).map(|next| (dir, next)))
        .map(|(dir, next)| {
            let room = escape_route_count(game, next, ESCAPE_SEARCH_LIMIT);
            let roomy = room >= needed.min(ESCAPE_SEARCH_LIMIT);
            let dist = manhattan(next, game.food.position);
            (dir, roomy, room, dist)
        })
        // Roomy beats cramped, then closer food, then more space, then going straight
        .min_by_key(|&(dir, roomy, room, dist)| {
            let tie = if roomy { dist } else { -(room as i32) };
            (!roomy, tie, dir != current)
        });

    match best {
        Some((dir, ..)) if dir != current => action_for(dir),
        _ => Action::None,
    }
}

/// The action the autopilot wants this frame
pub fn autopilot_action(game: &Game) -> Action {
    match game.phase {
        GamePhase::MainMenu => Action::Confirm,
        GamePhase::Playing => steer(game),
        GamePhase::Paused => Action::Pause,
        GamePhase::Options => Action::Escape,
        // Name entry and the game over screen belong to the host
        GamePhase::GameOver | GamePhase::EnteringHighScore => Action::None,
    }
}
