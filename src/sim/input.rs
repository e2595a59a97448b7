//! Abstract input and the per-phase handlers
//!
//! The host translates keys/mouse into [`Action`]s (and [`TextInput`] while a
//! name is being typed); everything past that point lives here.

use serde::{Deserialize, Serialize};

use super::grid::Direction;
use super::state::{Game, GameEvent, GamePhase, MainMenuItem, OptionItem};
use crate::consts::MAX_NAME_LENGTH;

/// Abstract actions produced by the raw-input translator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
    Confirm,
    Restart,
    Pause,
    Escape,
    #[default]
    None,
}

impl Action {
    fn direction(self) -> Option<Direction> {
        match self {
            Action::Up => Some(Direction::Up),
            Action::Down => Some(Direction::Down),
            Action::Left => Some(Direction::Left),
            Action::Right => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Text-entry events, only consumed in `EnteringHighScore`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextInput {
    Char(char),
    Backspace,
    Confirm,
    Cancel,
}

impl Game {
    /// Feed one abstract action into the state machine
    pub fn handle_action(&mut self, action: Action) {
        if action == Action::None {
            return;
        }
        if action == Action::Escape {
            self.handle_escape();
            return;
        }
        match self.phase {
            GamePhase::MainMenu => self.handle_main_menu_input(action),
            GamePhase::Options => self.handle_options_input(action),
            GamePhase::Playing => self.handle_playing_input(action),
            GamePhase::Paused => self.handle_paused_input(action),
            GamePhase::GameOver => self.handle_game_over_input(action),
            // Name entry listens to text input only
            GamePhase::EnteringHighScore => {}
        }
    }

    /// Feed one text-entry event (ignored outside name entry)
    pub fn handle_text_input(&mut self, input: TextInput) {
        if self.phase != GamePhase::EnteringHighScore {
            return;
        }
        match input {
            TextInput::Char(c) => {
                if !c.is_control() && self.player_name.chars().count() < MAX_NAME_LENGTH {
                    self.player_name.push(c);
                }
            }
            TextInput::Backspace => {
                self.player_name.pop();
            }
            TextInput::Confirm => self.submit_high_score(),
            TextInput::Cancel => self.handle_escape(),
        }
    }

    fn handle_escape(&mut self) {
        match self.phase {
            GamePhase::MainMenu => {
                log::info!("Quit requested");
                self.quit_requested = true;
                self.push_event(GameEvent::QuitRequested);
            }
            GamePhase::EnteringHighScore => {
                log::info!("High score entry abandoned");
                self.player_name.clear();
                self.set_phase(GamePhase::MainMenu);
            }
            _ => self.set_phase(GamePhase::MainMenu),
        }
    }

    fn submit_high_score(&mut self) {
        let rank = self.high_scores.add_high_score(&self.player_name, self.score);
        log::info!("High score {} recorded at rank {:?}", self.score, rank);
        if let Some(rank) = rank {
            self.push_event(GameEvent::HighScoreRecorded { rank });
        }
        self.push_event(GameEvent::HighScoresChanged);
        self.player_name.clear();
        self.set_phase(GamePhase::GameOver);
    }

    fn handle_main_menu_input(&mut self, action: Action) {
        let count = MainMenuItem::ALL.len();
        match action {
            Action::Up => {
                self.main_menu_index = (self.main_menu_index + count - 1) % count;
                self.push_event(GameEvent::MenuMoved);
            }
            Action::Down => {
                self.main_menu_index = (self.main_menu_index + 1) % count;
                self.push_event(GameEvent::MenuMoved);
            }
            Action::Confirm => {
                let item = MainMenuItem::ALL[self.main_menu_index % count];
                self.activate_main_menu_item(item);
            }
            _ => {}
        }
    }

    /// Run a main menu entry
    pub fn activate_main_menu_item(&mut self, item: MainMenuItem) {
        self.push_event(GameEvent::MenuConfirmed);
        match item {
            MainMenuItem::Play => self.reset(),
            MainMenuItem::Options => {
                self.options_index = 0;
                self.set_phase(GamePhase::Options);
            }
            MainMenuItem::Quit => {
                log::info!("Quit requested");
                self.quit_requested = true;
                self.push_event(GameEvent::QuitRequested);
            }
        }
    }

    fn handle_options_input(&mut self, action: Action) {
        let count = OptionItem::ALL.len();
        match action {
            Action::Up => {
                self.options_index = (self.options_index + count - 1) % count;
                self.push_event(GameEvent::MenuMoved);
            }
            Action::Down => {
                self.options_index = (self.options_index + 1) % count;
                self.push_event(GameEvent::MenuMoved);
            }
            Action::Confirm => {
                let item = OptionItem::ALL[self.options_index % count];
                self.activate_option_item(item);
            }
            _ => {}
        }
    }

    /// Run an options menu entry
    pub fn activate_option_item(&mut self, item: OptionItem) {
        self.push_event(GameEvent::MenuConfirmed);
        match item {
            OptionItem::ToggleMode => {
                self.settings.game_mode = self.settings.game_mode.toggled();
                log::info!("Game mode: {}", self.settings.game_mode.as_str());
                self.push_event(GameEvent::SettingsChanged);
            }
            OptionItem::ToggleSound => {
                self.settings.sound_enabled = !self.settings.sound_enabled;
                log::info!("Sound enabled: {}", self.settings.sound_enabled);
                self.push_event(GameEvent::SettingsChanged);
            }
            OptionItem::ResetHighScores => {
                self.high_scores.clear();
                log::info!("High scores cleared");
                self.push_event(GameEvent::HighScoresChanged);
            }
            OptionItem::Back => self.set_phase(GamePhase::MainMenu),
        }
    }

    fn handle_playing_input(&mut self, action: Action) {
        if let Some(dir) = action.direction() {
            self.snake.queue_direction_change(dir);
        } else if action == Action::Pause {
            self.set_phase(GamePhase::Paused);
        }
    }

    fn handle_paused_input(&mut self, action: Action) {
        if matches!(action, Action::Pause | Action::Confirm) {
            self.time_accumulator = 0.0;
            self.set_phase(GamePhase::Playing);
        }
    }

    fn handle_game_over_input(&mut self, action: Action) {
        if matches!(action, Action::Restart | Action::Confirm) {
            self.reset();
        }
    }
}
