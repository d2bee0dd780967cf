use std::sync::Arc;

use itertools::Itertools;
use telegram_bot::{InlineKeyboardButton, InlineKeyboardMarkup, User, UserId};

use crate::dictionary::WordList;
use crate::game::{Action, Game, InteractResult};
use crate::word_chain::{WordChainTracker, SIZE};

// Binds a WordChainTracker to one player's inline keyboard.  Translates
// callbacks into tracker calls and tracker state back into text + markup.
pub struct Boggle {
    tracker: WordChainTracker,
    dictionary: Arc<WordList>,
    owner: (UserId, String),
}

impl Boggle {
    pub fn create(user: &User, dictionary: Arc<WordList>) -> (Self, String, InlineKeyboardMarkup) {
        let owner = (
            user.id,
            user.username.to_owned().unwrap_or_else(|| user.first_name.to_owned()),
        );
        let game = Self {
            tracker: WordChainTracker::new(),
            dictionary,
            owner,
        };
        let text = game.get_text();
        let inline_keyboard = game.to_inline_keyboard();
        (game, text, inline_keyboard)
    }

    fn guess_lists(&self) -> String {
        format!(
            "Correct guesses:\n- {}\n\nWrong guesses:\n- {}",
            self.tracker.correct_guesses().iter().join("\n- "),
            self.tracker.wrong_guesses().iter().join("\n- "),
        )
    }

    fn get_text(&self) -> String {
        format!(
            "Boggle: {}\nCurrent word: {}\n\n{}",
            self.owner.1,
            self.tracker.current_word(),
            self.guess_lists(),
        )
    }

    fn final_text(&self) -> String {
        format!(
            "Game over, {}! {} correct, {} wrong.\n\n{}",
            self.owner.1,
            self.tracker.correct_guesses().len(),
            self.tracker.wrong_guesses().len(),
            self.guess_lists(),
        )
    }

    fn to_inline_keyboard(&self) -> InlineKeyboardMarkup {
        let mut inline_keyboard = InlineKeyboardMarkup::new();
        for i in 0..SIZE {
            inline_keyboard.add_row(
                self.tracker
                    .iter_row(i)
                    .enumerate()
                    .map(|(j, (letter, selected))| {
                        let label = if selected {
                            format!("[{}]", letter)
                        } else {
                            letter.to_string()
                        };
                        InlineKeyboardButton::callback(label, format!("{} {}", i, j))
                    })
                    .collect(),
            );
        }
        inline_keyboard.add_row(vec![
            InlineKeyboardButton::callback("Enter", "enter"),
            InlineKeyboardButton::callback("Stop", "stop"),
        ]);
        inline_keyboard
    }

    fn updated(&self) -> InteractResult {
        InteractResult {
            answer: None,
            update_text: Some(self.get_text()),
            update_board: Some(self.to_inline_keyboard()),
            game_end: false,
        }
    }

    fn notice(text: impl Into<String>) -> InteractResult {
        InteractResult {
            answer: Some(text.into()),
            update_text: None,
            update_board: None,
            game_end: false,
        }
    }
}

impl Game for Boggle {
    fn interact(&mut self, action: Action, user: &User) -> Option<InteractResult> {
        if user.id != self.owner.0 {
            return Some(Self::notice("This is not your game!"));
        }
        match action {
            // A click either extends the chain or takes back the tail;
            // anything else is a click outside the valid path and is ignored.
            Action::Cell(coord) => {
                if self.tracker.select(coord) || self.tracker.deselect_last(coord) {
                    Some(self.updated())
                } else {
                    None
                }
            }
            Action::Enter => match self.tracker.submit(self.dictionary.as_ref()) {
                Ok(_) => Some(self.updated()),
                Err(error) => Some(Self::notice(error.to_string())),
            },
            // Dropping the keyboard ends the session; the manager discards
            // the game once it sees game_end.
            Action::Stop => Some(InteractResult {
                answer: None,
                update_text: Some(self.final_text()),
                update_board: None,
                game_end: true,
            }),
        }
    }
}
