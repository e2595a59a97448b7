//! Vorax Serpens entry point
//!
//! Headless host: loads tuning, settings and high scores, lets the autopilot
//! play a number of rounds on a fixed 60 Hz frame clock, persists whatever
//! the game asks to be persisted, and prints the final frame.
//!
//! Usage: `vorax-serpens [seed] [rounds]`

use std::time::{SystemTime, UNIX_EPOCH};

use vorax_serpens::audio::{AudioManager, LogSink};
use vorax_serpens::demo::autopilot_action;
use vorax_serpens::render::{Renderer, TextRenderer};
use vorax_serpens::sim::{Action, Game, GameEvent, GamePhase, TextInput};
use vorax_serpens::{HighScoreTable, Settings, Tuning};

const TUNING_PATH: &str = "tuning.json";
const SETTINGS_PATH: &str = "settings.json";
const HIGH_SCORES_PATH: &str = "highscores.txt";

/// Host frame period (seconds)
const FRAME_DT: f32 = 1.0 / 60.0;
/// Hard stop so a stuck autopilot can't spin forever (10 simulated minutes)
const MAX_FRAMES: u64 = 60 * 60 * 10;
const AUTOPILOT_NAME: &str = "Autopilot";

fn seed_from_clock() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x5EED)
}

/// Save whatever the drained events mark as dirty
fn persist(game: &Game, events: &[GameEvent]) {
    if events.contains(&GameEvent::HighScoresChanged) {
        match game.high_scores.save(HIGH_SCORES_PATH) {
            Ok(()) => log::info!("High scores saved to {}", HIGH_SCORES_PATH),
            Err(e) => log::error!("Failed to save high scores: {}", e),
        }
    }
    if events.contains(&GameEvent::SettingsChanged) {
        match game.settings.save(SETTINGS_PATH) {
            Ok(()) => log::info!("Settings saved to {}", SETTINGS_PATH),
            Err(e) => log::error!("Failed to save settings: {}", e),
        }
    }
}

fn enter_name(game: &mut Game) {
    for c in AUTOPILOT_NAME.chars() {
        game.handle_text_input(TextInput::Char(c));
    }
    game.handle_text_input(TextInput::Confirm);
}

fn main() {
    env_logger::init();
    log::info!("Vorax Serpens (headless) starting...");

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or_else(seed_from_clock);
    let rounds = args.next().and_then(|s| s.parse::<u32>().ok()).unwrap_or(1).max(1);

    let tuning = Tuning::load(TUNING_PATH);
    let settings = Settings::load(SETTINGS_PATH);
    let high_scores = HighScoreTable::load(HIGH_SCORES_PATH, tuning.max_high_scores);

    let mut audio = AudioManager::new(Some(Box::new(LogSink)));
    audio.apply_settings(&settings);

    let mut game = Game::new(tuning, settings, high_scores, seed);
    log::info!("Game initialized with seed: {}", seed);

    let mut renderer = TextRenderer::new();
    let mut rounds_played = 0;
    let mut frame = 0u64;

    while !game.quit_requested && frame < MAX_FRAMES {
        frame += 1;

        match game.phase {
            GamePhase::EnteringHighScore => enter_name(&mut game),
            GamePhase::GameOver => {
                rounds_played += 1;
                log::info!("Round {} finished with score {}", rounds_played, game.score);
                if rounds_played >= rounds {
                    break;
                }
                game.handle_action(Action::Restart);
            }
            _ => {
                let action = autopilot_action(&game);
                game.handle_action(action);
            }
        }

        game.run_frame(FRAME_DT, false);

        let events = game.drain_events();
        if events.contains(&GameEvent::SettingsChanged) {
            audio.apply_settings(&game.settings);
        }
        audio.handle_events(&events);
        persist(&game, &events);
    }

    if frame >= MAX_FRAMES {
        log::warn!("Frame limit reached, stopping");
    }

    renderer.draw_frame(&game.snapshot());
    println!("{}", renderer.frame());
    if let Some(top) = game.high_scores.top_score() {
        println!("Best: {}", top);
    }
}
