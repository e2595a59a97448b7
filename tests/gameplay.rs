//! End-to-end gameplay scenarios driven through the public API

use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use vorax_serpens::audio::{AudioManager, SoundEffect, SoundSink};
use vorax_serpens::demo::autopilot_action;
use vorax_serpens::render::{Renderer, TextRenderer};
use vorax_serpens::sim::obstacle::update_obstacles;
use vorax_serpens::sim::{
    Action, Cell, CollisionKind, Direction, Food, Game, GameEvent, GameMode, GamePhase, Obstacle,
    Snake, TextInput, TickOutcome,
};
use vorax_serpens::{HighScoreTable, Settings, Tuning};

fn playing(mode: GameMode, high_scores: HighScoreTable) -> Game {
    let tuning = Tuning {
        obstacle_count: 0,
        ..Default::default()
    };
    let settings = Settings {
        game_mode: mode,
        ..Default::default()
    };
    let mut game = Game::new(tuning, settings, high_scores, 2024);
    game.reset();
    game.drain_events();
    game
}

fn full_table() -> HighScoreTable {
    let mut table = HighScoreTable::new(5);
    for score in 10..15 {
        table.add_high_score("cpu", score);
    }
    table
}

#[test]
fn classic_wall_death_without_high_score() {
    let mut game = playing(GameMode::Classic, full_table());
    game.snake = Snake::new(Cell::new(780, 0), Direction::Right, 3, 20, 2);
    game.food.position = Cell::new(0, 300);
    game.score = 2;

    assert_eq!(game.tick(), TickOutcome::Died(CollisionKind::Wall));
    assert_eq!(game.phase, GamePhase::GameOver);
    // The fatal move is not applied
    assert_eq!(game.snake.head(), Cell::new(780, 0));
    let events = game.drain_events();
    assert!(events.contains(&GameEvent::Collision(CollisionKind::Wall)));
    assert!(!events.iter().any(|e| matches!(e, GameEvent::HighScoreQualified { .. })));
}

#[test]
fn classic_wall_death_with_high_score_goes_to_name_entry() {
    let mut game = playing(GameMode::Classic, HighScoreTable::new(5));
    game.snake = Snake::new(Cell::new(780, 0), Direction::Right, 3, 20, 2);
    game.food.position = Cell::new(0, 300);
    game.score = 7;

    game.tick();
    assert_eq!(game.phase, GamePhase::EnteringHighScore);

    for c in "Ada".chars() {
        game.handle_text_input(TextInput::Char(c));
    }
    game.handle_text_input(TextInput::Confirm);
    assert_eq!(game.phase, GamePhase::GameOver);
    assert_eq!(game.high_scores.entries()[0].name, "Ada");
    assert_eq!(game.high_scores.entries()[0].score, 7);
    assert!(game.drain_events().contains(&GameEvent::HighScoresChanged));
}

#[test]
fn food_consumption_speeds_up_and_grows() {
    let mut game = playing(GameMode::Classic, HighScoreTable::default());
    let head = game.snake.head();
    game.food.position = head + Cell::new(20, 0);
    assert_eq!(game.move_interval_ms, 150);

    assert_eq!(game.tick(), TickOutcome::Ate);
    assert_eq!(game.score, 1);
    assert_eq!(game.move_interval_ms, 146);
    assert!(game.food.is_placed());
    assert!(!game.snake.body().contains(&game.food.position));

    // Growth lands on the following move
    assert_eq!(game.snake.len(), 3);
    game.food.position = Cell::new(0, 0);
    game.tick();
    assert_eq!(game.snake.len(), 4);
    game.tick();
    assert_eq!(game.snake.len(), 4);
}

#[test]
fn boost_shrinks_after_length_cost_intervals() {
    let mut game = playing(GameMode::PortalWalls, HighScoreTable::default());
    game.snake = Snake::new(Cell::new(400, 300), Direction::Right, 10, 20, 2);
    game.food.position = Cell::new(0, 0);
    game.score = 5;

    let held = game.tuning.boost_cost_interval_secs
        * game.tuning.boost_length_cost_intervals as f32;
    let frames = (held / 0.25).round() as u32;
    for _ in 0..frames {
        game.run_frame(0.25, true);
    }

    // One deduction per interval, one segment per length-cost cycle
    let deductions = game.tuning.boost_length_cost_intervals * game.tuning.boost_score_cost;
    assert_eq!(game.score, 5 - deductions);
    assert_eq!(game.snake.len(), 9);
    assert!(game.is_boosting);
    assert_eq!(game.phase, GamePhase::Playing);
}

#[test]
fn moving_obstacle_wraps_through_portal() {
    let tuning = Tuning::default();
    let snake = Snake::new(Cell::new(400, 300), Direction::Right, 3, 20, 2);
    let mut obstacles = vec![Obstacle::moving(Cell::new(780, 100), Direction::Right, 5, 1)];

    let food_hit = update_obstacles(
        &mut obstacles,
        &snake,
        Cell::new(0, 0),
        GameMode::PortalWalls,
        &tuning,
    );
    assert!(!food_hit);
    assert_eq!(obstacles[0].position, Cell::new(0, 100));
    assert_eq!(obstacles[0].move_direction, Direction::Right);
}

#[test]
fn full_grid_parks_food_on_sentinel() {
    let tuning = Tuning {
        screen_width: 60,
        screen_height: 40,
        ..Default::default()
    };
    // 3x2 board, fully covered by snake and obstacles
    let body = [Cell::new(0, 0), Cell::new(20, 0), Cell::new(40, 0)];
    let obstacles: Vec<Obstacle> = [Cell::new(0, 20), Cell::new(20, 20), Cell::new(40, 20)]
        .into_iter()
        .map(Obstacle::fixed)
        .collect();
    let mut food = Food::new(tuning.cell_size);
    let mut rng = Pcg32::seed_from_u64(1);

    assert!(!food.generate(60, 40, &body, &obstacles, &mut rng));
    assert!(!food.is_placed());
    assert_eq!(food.position, Cell::new(-20, -20));
}

#[test]
fn high_scores_survive_save_and_load() {
    let path = std::env::temp_dir().join(format!("vorax-serpens-it-{}.txt", std::process::id()));
    let table = full_table();
    table.save(&path).expect("save");
    let loaded = HighScoreTable::load(&path, 5);
    let _ = std::fs::remove_file(&path);
    assert_eq!(loaded, table);
    assert_eq!(loaded.top_score(), Some(14));
}

#[test]
fn menu_to_play_to_pause_round_trip() {
    let mut game = Game::new(Tuning::default(), Settings::default(), HighScoreTable::default(), 5);
    assert_eq!(game.phase, GamePhase::MainMenu);
    game.handle_action(Action::Confirm);
    assert_eq!(game.phase, GamePhase::Playing);
    game.handle_action(Action::Pause);
    let head = game.snake.head();
    game.run_frame(1.0, false);
    assert_eq!(game.snake.head(), head);
    game.handle_action(Action::Pause);
    game.handle_action(Action::Escape);
    assert_eq!(game.phase, GamePhase::MainMenu);
}

#[derive(Default)]
struct CountingSink(usize);

impl SoundSink for CountingSink {
    fn play(&mut self, _effect: SoundEffect, _volume: f32) {
        self.0 += 1;
    }
}

#[test]
fn autopilot_round_plays_to_completion() {
    let mut game = Game::new(Tuning::default(), Settings::default(), HighScoreTable::default(), 99);
    let mut audio = AudioManager::new(Some(Box::new(CountingSink::default())));
    let mut renderer = TextRenderer::new();

    for _ in 0..60 * 60 * 5 {
        if game.phase == GamePhase::EnteringHighScore {
            game.handle_text_input(TextInput::Confirm);
        }
        if game.phase == GamePhase::GameOver {
            break;
        }
        let action = autopilot_action(&game);
        game.handle_action(action);
        game.run_frame(1.0 / 60.0, false);
        audio.handle_events(&game.drain_events());
        renderer.draw_frame(&game.snapshot());
        assert!(!game.snake.check_self_collision());
    }
    assert!(game.score > 0);
    assert!(!renderer.frame().is_empty());
}

proptest! {
    #[test]
    fn prop_move_interval_stays_in_range(eaten in 0usize..100) {
        let mut game = Game::new(Tuning::default(), Settings::default(), HighScoreTable::default(), 1);
        for _ in 0..eaten {
            game.increase_speed();
        }
        let t = &game.tuning;
        prop_assert!(game.move_interval_ms >= t.min_move_interval_ms);
        prop_assert!(game.move_interval_ms <= t.initial_move_interval_ms);
        let expected = t
            .initial_move_interval_ms
            .saturating_sub(t.speed_increment_ms * eaten as u32)
            .max(t.min_move_interval_ms);
        prop_assert_eq!(game.move_interval_ms, expected);
    }

    #[test]
    fn prop_same_seed_same_round(seed in any::<u64>()) {
        let mut a = Game::new(Tuning::default(), Settings::default(), HighScoreTable::default(), seed);
        let mut b = Game::new(Tuning::default(), Settings::default(), HighScoreTable::default(), seed);
        a.reset();
        b.reset();
        for _ in 0..30 {
            a.tick();
            b.tick();
        }
        prop_assert_eq!(a.snake.body(), b.snake.body());
        prop_assert_eq!(a.food, b.food);
        prop_assert_eq!(a.obstacles, b.obstacles);
    }
}
