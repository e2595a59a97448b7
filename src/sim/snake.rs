//! The snake: body segments, direction and buffered turns

use std::collections::VecDeque;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::grid::{Cell, Direction, step};

/// Head position reported for an empty body
pub const NO_HEAD: Cell = IVec2::new(-1, -1);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snake {
    /// Segments, head first
    body: VecDeque<Cell>,
    current_direction: Direction,
    /// Requested turns, applied one per tick
    pending_inputs: VecDeque<Direction>,
    input_buffer_size: usize,
    /// Keep the tail on the next move
    growing: bool,
    cell_size: i32,
}

impl Snake {
    /// Lay out `length` segments behind `head`, travelling along `direction`
    pub fn new(
        head: Cell,
        direction: Direction,
        length: usize,
        cell_size: i32,
        input_buffer_size: usize,
    ) -> Self {
        let behind = direction.opposite();
        let body = (0..length.max(1) as i32)
            .map(|i| head + behind.delta() * (i * cell_size))
            .collect();
        Self {
            body,
            current_direction: direction,
            pending_inputs: VecDeque::with_capacity(input_buffer_size),
            input_buffer_size,
            growing: false,
            cell_size,
        }
    }

    pub fn body(&self) -> &VecDeque<Cell> {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Current head, or [`NO_HEAD`] for an empty body
    pub fn head(&self) -> Cell {
        self.body.front().copied().unwrap_or(NO_HEAD)
    }

    pub fn current_direction(&self) -> Direction {
        self.current_direction
    }

    pub fn pending_inputs(&self) -> &VecDeque<Direction> {
        &self.pending_inputs
    }

    pub fn is_growing(&self) -> bool {
        self.growing
    }

    /// Buffer a turn. Dropped silently when the buffer is full, or when the
    /// turn reverses or repeats the last queued direction.
    pub fn queue_direction_change(&mut self, dir: Direction) {
        if self.pending_inputs.len() >= self.input_buffer_size {
            return;
        }
        let reference = self
            .pending_inputs
            .back()
            .copied()
            .unwrap_or(self.current_direction);
        if dir == reference || dir.is_opposite(reference) {
            return;
        }
        self.pending_inputs.push_back(dir);
    }

    /// Apply at most one buffered turn to the committed direction
    fn apply_next_input(&mut self) {
        if let Some(dir) = self.pending_inputs.pop_front() {
            // The committed direction may differ from what the turn was checked against
            if !dir.is_opposite(self.current_direction) {
                self.current_direction = dir;
            }
        }
    }

    /// Consume one buffered turn and return where the head goes next.
    /// Does not touch the body.
    pub fn calculate_next_head_position(&mut self) -> Cell {
        self.apply_next_input();
        if self.body.is_empty() {
            return NO_HEAD;
        }
        step(self.head(), self.current_direction, self.cell_size)
    }

    /// Advance onto `next_head`
    pub fn move_to(&mut self, next_head: Cell) {
        self.body.push_front(next_head);
        if self.growing {
            self.growing = false;
        } else {
            self.body.pop_back();
        }
    }

    /// Grow by one segment on the next move
    pub fn grow(&mut self) {
        self.growing = true;
    }

    /// Drop the tail segment (never below one segment)
    pub fn shrink(&mut self) -> bool {
        if self.body.len() > 1 {
            self.body.pop_back();
            true
        } else {
            false
        }
    }

    pub fn check_food_collision(&self, food: Cell) -> bool {
        self.body.front().is_some_and(|head| *head == food)
    }

    /// Would moving onto `next_head` hit the body? The tail is ignored
    /// unless growing since it is vacated in the same move.
    pub fn check_self_collision_with_next(&self, next_head: Cell) -> bool {
        let checked = if self.growing {
            self.body.len()
        } else {
            self.body.len().saturating_sub(1)
        };
        self.body.iter().take(checked).any(|seg| *seg == next_head)
    }

    /// Is the current head overlapping another segment?
    pub fn check_self_collision(&self) -> bool {
        let Some(head) = self.body.front() else {
            return false;
        };
        self.body.iter().skip(1).any(|seg| seg == head)
    }

    /// Does any segment occupy `pos`? With `exclude_vacating_tail` the tail is
    /// skipped unless growing, matching [`Self::check_self_collision_with_next`].
    pub fn occupies(&self, pos: Cell, exclude_vacating_tail: bool) -> bool {
        if exclude_vacating_tail {
            self.check_self_collision_with_next(pos)
        } else {
            self.body.contains(&pos)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn straight(len: usize) -> Snake {
        Snake::new(IVec2::new(200, 200), Direction::Right, len, 20, 2)
    }

    #[test]
    fn test_initial_layout() {
        let snake = straight(3);
        let body: Vec<_> = snake.body().iter().copied().collect();
        assert_eq!(
            body,
            vec![IVec2::new(200, 200), IVec2::new(180, 200), IVec2::new(160, 200)]
        );
        assert_eq!(snake.current_direction(), Direction::Right);
    }

    #[test]
    fn test_queue_rejects_reverse_duplicate_and_overflow() {
        let mut snake = straight(3);
        snake.queue_direction_change(Direction::Left); // reverse
        snake.queue_direction_change(Direction::Right); // duplicate
        assert!(snake.pending_inputs().is_empty());

        snake.queue_direction_change(Direction::Up);
        snake.queue_direction_change(Direction::Up); // duplicate of last queued
        snake.queue_direction_change(Direction::Down); // reverse of last queued
        snake.queue_direction_change(Direction::Left);
        snake.queue_direction_change(Direction::Down); // buffer full
        assert_eq!(
            snake.pending_inputs().iter().copied().collect::<Vec<_>>(),
            vec![Direction::Up, Direction::Left]
        );
    }

    #[test]
    fn test_inputs_apply_one_per_tick() {
        let mut snake = straight(3);
        snake.queue_direction_change(Direction::Up);
        snake.queue_direction_change(Direction::Left);

        let next = snake.calculate_next_head_position();
        assert_eq!(next, IVec2::new(200, 180));
        snake.move_to(next);
        let next = snake.calculate_next_head_position();
        assert_eq!(next, IVec2::new(180, 180));
        assert_eq!(snake.current_direction(), Direction::Left);
    }

    #[test]
    fn test_growth_conservation() {
        let mut snake = straight(3);
        snake.grow();
        let next = snake.calculate_next_head_position();
        snake.move_to(next);
        assert_eq!(snake.len(), 4);
        assert!(!snake.is_growing());
        for _ in 0..3 {
            let next = snake.calculate_next_head_position();
            snake.move_to(next);
            assert_eq!(snake.len(), 4);
        }
    }

    #[test]
    fn test_shrink_keeps_one_segment() {
        let mut snake = straight(2);
        assert!(snake.shrink());
        assert_eq!(snake.len(), 1);
        assert!(!snake.shrink());
        assert_eq!(snake.len(), 1);
    }

    #[test]
    fn test_tail_excluded_unless_growing() {
        // A 2x2 loop: head at (200,200) moving Up, tail directly above it
        let mut snake = Snake::new(IVec2::new(200, 200), Direction::Left, 4, 20, 2);
        // body: (200,200) (220,200) (240,200) (260,200); move it into a U
        snake.queue_direction_change(Direction::Up);
        let n = snake.calculate_next_head_position();
        snake.move_to(n); // (200,180)
        snake.queue_direction_change(Direction::Right);
        let n = snake.calculate_next_head_position();
        snake.move_to(n); // (220,180)
        // body: (220,180) (200,180) (200,200) (220,200); tail is (220,200)
        let tail = *snake.body().back().unwrap();
        assert_eq!(tail, IVec2::new(220, 200));
        assert!(!snake.check_self_collision_with_next(tail));
        snake.grow();
        assert!(snake.check_self_collision_with_next(tail));
        assert!(snake.check_self_collision_with_next(IVec2::new(200, 180)));
    }

    #[test]
    fn test_food_collision_and_empty_body() {
        let snake = straight(3);
        assert!(snake.check_food_collision(IVec2::new(200, 200)));
        assert!(!snake.check_food_collision(IVec2::new(180, 200)));

        let mut empty = straight(1);
        empty.body.clear();
        assert_eq!(empty.head(), NO_HEAD);
        assert_eq!(empty.calculate_next_head_position(), NO_HEAD);
        assert!(!empty.check_food_collision(NO_HEAD));
        assert!(!empty.check_self_collision_with_next(IVec2::ZERO));
        assert!(!empty.check_self_collision());
    }

    fn any_direction() -> impl Strategy<Value = Direction> {
        prop_oneof![
            Just(Direction::Up),
            Just(Direction::Down),
            Just(Direction::Left),
            Just(Direction::Right),
        ]
    }

    proptest! {
        #[test]
        fn prop_single_turn_never_reverses_into_body(
            len in 2usize..12,
            heading in any_direction(),
            turn in any_direction(),
        ) {
            let mut snake = Snake::new(IVec2::new(400, 300), heading, len, 20, 2);
            snake.queue_direction_change(turn);
            let next = snake.calculate_next_head_position();
            prop_assert!(!snake.check_self_collision_with_next(next));
        }

        #[test]
        fn prop_committed_direction_never_reverses(
            turns in proptest::collection::vec(any_direction(), 0..32),
        ) {
            let mut snake = Snake::new(IVec2::new(400, 300), Direction::Right, 4, 20, 2);
            for turn in turns {
                let before = snake.current_direction();
                snake.queue_direction_change(turn);
                let next = snake.calculate_next_head_position();
                prop_assert!(!snake.current_direction().is_opposite(before));
                snake.move_to(next);
            }
        }
    }
}
