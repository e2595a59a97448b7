//! Fixed timestep simulation tick
//!
//! `run_frame` turns real elapsed time into zero or more discrete ticks so the
//! snake moves at the same speed regardless of frame rate.

use super::grid;
use super::obstacle;
use super::state::{CollisionKind, Game, GameEvent, GamePhase};

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not playing; nothing simulated
    Idle,
    Moved,
    Ate,
    Died(CollisionKind),
}

impl Game {
    /// Advance real time by `delta_time` seconds. `boost_held` is the sampled
    /// state of the boost modifier key.
    pub fn run_frame(&mut self, delta_time: f32, boost_held: bool) {
        self.handle_boosting(delta_time, boost_held);

        if self.phase != GamePhase::Playing {
            self.time_accumulator = 0.0;
            return;
        }

        self.time_accumulator += delta_time.max(0.0);
        let mut period = self.tick_period();

        while self.time_accumulator >= period {
            let was_boosting = self.is_boosting;
            self.tick();
            self.time_accumulator -= period;

            if self.phase != GamePhase::Playing || (was_boosting && !self.is_boosting) {
                self.time_accumulator = 0.0;
                break;
            }
            // Eating may have sped things up
            period = self.tick_period();
        }
    }

    /// One discrete simulation step: the snake moves exactly one cell
    pub fn tick(&mut self) -> TickOutcome {
        if self.phase != GamePhase::Playing {
            return TickOutcome::Idle;
        }

        let mode = self.mode();

        // Obstacles step first so one can slide into the cell the tail leaves
        let food_hit = obstacle::update_obstacles(
            &mut self.obstacles,
            &self.snake,
            self.food.position,
            mode,
            &self.tuning,
        );
        if food_hit {
            log::debug!("Obstacle landed on food, relocating");
            self.place_food();
        }

        let ahead = self.snake.calculate_next_head_position();
        let Some(next_head) = grid::resolve_walls(
            ahead,
            mode,
            self.tuning.screen_width,
            self.tuning.screen_height,
        ) else {
            self.end_round(CollisionKind::Wall);
            return TickOutcome::Died(CollisionKind::Wall);
        };

        if obstacle::check_obstacle_collision(&self.obstacles, next_head) {
            self.end_round(CollisionKind::Obstacle);
            return TickOutcome::Died(CollisionKind::Obstacle);
        }
        if self.snake.check_self_collision_with_next(next_head) {
            self.end_round(CollisionKind::SelfBody);
            return TickOutcome::Died(CollisionKind::SelfBody);
        }

        self.snake.move_to(next_head);

        if !self.snake.check_food_collision(self.food.position) {
            return TickOutcome::Moved;
        }

        self.score += 1;
        self.snake.grow();
        self.place_food();
        self.increase_speed();
        self.push_event(GameEvent::FoodEaten { score: self.score });
        log::debug!("Food eaten: score={}, interval={}ms", self.score, self.move_interval_ms);

        if self.score >= self.next_obstacle_score_threshold {
            let added = obstacle::add_single_obstacle(
                &mut self.obstacles,
                &self.snake,
                self.food.position,
                self.score,
                &self.tuning,
                &mut self.rng,
            );
            if added {
                self.push_event(GameEvent::ObstacleAdded);
            }
            // Advances even when the board had no room
            self.next_obstacle_score_threshold += self.tuning.obstacle_score_interval;
        }

        TickOutcome::Ate
    }

    /// Start, charge for, or stop the boost
    pub(crate) fn handle_boosting(&mut self, delta_time: f32, boost_held: bool) {
        let t = &self.tuning;
        let allowed = boost_held
            && self.phase == GamePhase::Playing
            && self.score > 0
            && self.snake.len() > t.min_boost_length;

        if !allowed {
            if self.is_boosting {
                self.stop_boosting();
            }
            return;
        }

        if !self.is_boosting {
            self.is_boosting = true;
            self.boost_cost_timer = 0.0;
            self.boost_cost_cycles = 0;
            self.push_event(GameEvent::BoostStarted);
            log::debug!("Boost started");
        }

        self.boost_cost_timer += delta_time.max(0.0);
        while self.is_boosting && self.boost_cost_timer >= self.tuning.boost_cost_interval_secs {
            self.boost_cost_timer -= self.tuning.boost_cost_interval_secs;
            self.score = self.score.saturating_sub(self.tuning.boost_score_cost);
            self.boost_cost_cycles += 1;

            if self.boost_cost_cycles >= self.tuning.boost_length_cost_intervals {
                self.boost_cost_cycles = 0;
                if !self.snake.shrink() {
                    self.stop_boosting();
                    break;
                }
            }

            if self.score == 0 || self.snake.len() <= self.tuning.min_boost_length {
                self.stop_boosting();
            }
        }
    }

    fn stop_boosting(&mut self) {
        if !self.is_boosting {
            return;
        }
        self.is_boosting = false;
        self.boost_cost_timer = 0.0;
        self.boost_cost_cycles = 0;
        self.push_event(GameEvent::BoostStopped);
        log::debug!("Boost stopped");
    }

    /// Round over: name entry if the score qualifies, else straight to game over
    fn end_round(&mut self, cause: CollisionKind) {
        log::info!("Round over ({:?}), score {}", cause, self.score);
        self.stop_boosting();
        self.time_accumulator = 0.0;
        self.push_event(GameEvent::Collision(cause));
        self.push_event(GameEvent::GameOver { score: self.score });

        if self.high_scores.is_high_score(self.score) {
            self.player_name.clear();
            log::info!(
                "Score {} qualifies at rank {:?}",
                self.score,
                self.high_scores.potential_rank(self.score)
            );
            self.push_event(GameEvent::HighScoreQualified { score: self.score });
            self.set_phase(GamePhase::EnteringHighScore);
        } else {
            self.set_phase(GamePhase::GameOver);
        }
    }
}
