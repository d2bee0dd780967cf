use std::mem;

use rand::Rng;
use thiserror::Error;

use crate::dictionary::Dictionary;
use crate::game::Coord;

pub const SIZE: usize = 4;
const MIN_WORD_LEN: usize = 3;

#[derive(Debug, Eq, PartialEq)]
pub enum Submission {
    Correct,
    Wrong,
}

// Submission preconditions are reported as values, not propagated; the chat
// layer shows the Display string as a callback answer.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum SubmitError {
    #[error("You have no current guesses!")]
    EmptyWord,
    #[error("Word must be of at least 3 letters in length!")]
    TooShort,
}

// The selection state machine: letters are chained one 8-neighbor step at a
// time, the chain spells the current word, and submission records the word
// against a dictionary and resets the chain.  Knows nothing about rendering
// or transport.
pub struct WordChainTracker {
    board: [[char; SIZE]; SIZE],
    selected: [[bool; SIZE]; SIZE],
    chain: Vec<Coord>,
    current_word: String,
    correct_guesses: Vec<String>,
    wrong_guesses: Vec<String>,
}

impl WordChainTracker {
    const DIRECTIONS: [(i32, i32); 8] = [
        (-1, -1),
        (-1, 0),
        (-1, 1),
        (0, -1),
        (0, 1),
        (1, -1),
        (1, 0),
        (1, 1),
    ];

    pub fn new() -> Self {
        let mut rng = rand::thread_rng();
        let mut board = [[' '; SIZE]; SIZE];
        for row in board.iter_mut() {
            for letter in row.iter_mut() {
                *letter = (b'A' + rng.gen_range(0..26)) as char;
            }
        }
        Self::with_board(board)
    }

    pub fn with_board(board: [[char; SIZE]; SIZE]) -> Self {
        Self {
            board,
            selected: [[false; SIZE]; SIZE],
            chain: Vec::new(),
            current_word: String::new(),
            correct_guesses: Vec::new(),
            wrong_guesses: Vec::new(),
        }
    }

    pub fn current_word(&self) -> &str {
        &self.current_word
    }

    pub fn correct_guesses(&self) -> &[String] {
        &self.correct_guesses
    }

    pub fn wrong_guesses(&self) -> &[String] {
        &self.wrong_guesses
    }

    pub fn is_selected(&self, coord: Coord) -> bool {
        self.selected[coord.0][coord.1]
    }

    pub fn iter_row(&self, row: usize) -> impl Iterator<Item = (char, bool)> + '_ {
        self.board[row]
            .iter()
            .zip(self.selected[row].iter())
            .map(|(&letter, &selected)| (letter, selected))
    }

    // The coordinates a chain ending at `coord` may extend to: the 8
    // surrounding cells clipped to the board, minus anything already in the
    // chain.
    pub fn neighbors_of(&self, coord: Coord) -> Vec<Coord> {
        Self::DIRECTIONS
            .iter()
            .map(|&(di, dj)| (coord.0 as i32 + di, coord.1 as i32 + dj))
            .filter(|&(i, j)| i >= 0 && i < SIZE as i32 && j >= 0 && j < SIZE as i32)
            .map(|(i, j)| (i as usize, j as usize))
            .filter(|&c| !self.is_selected(c))
            .collect()
    }

    // A rejected selection is an ordinary click outside the valid path; no
    // state changes and the caller may ignore it.
    pub fn select(&mut self, coord: Coord) -> bool {
        if coord.0 >= SIZE || coord.1 >= SIZE || self.is_selected(coord) {
            return false;
        }
        if let Some(&tail) = self.chain.last() {
            if !self.neighbors_of(tail).contains(&coord) {
                return false;
            }
        }
        self.current_word.push(self.board[coord.0][coord.1]);
        self.chain.push(coord);
        self.selected[coord.0][coord.1] = true;
        true
    }

    // Only the chain tail can be taken back.
    pub fn deselect_last(&mut self, coord: Coord) -> bool {
        if self.chain.last() != Some(&coord) {
            return false;
        }
        self.chain.pop();
        self.current_word.pop();
        self.selected[coord.0][coord.1] = false;
        true
    }

    pub fn submit(&mut self, dictionary: &impl Dictionary) -> Result<Submission, SubmitError> {
        if self.current_word.is_empty() {
            return Err(SubmitError::EmptyWord);
        }
        if self.current_word.len() < MIN_WORD_LEN {
            return Err(SubmitError::TooShort);
        }
        let correct = dictionary.contains(&self.current_word);
        let word = mem::take(&mut self.current_word);
        if correct {
            self.correct_guesses.push(word);
        } else {
            self.wrong_guesses.push(word);
        }
        self.chain.clear();
        self.selected = [[false; SIZE]; SIZE];
        Ok(if correct {
            Submission::Correct
        } else {
            Submission::Wrong
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::WordList;

    fn cat_board() -> [[char; SIZE]; SIZE] {
        let mut board = [['X'; SIZE]; SIZE];
        board[0][0] = 'C';
        board[0][1] = 'A';
        board[1][1] = 'T';
        board
    }

    #[test]
    fn word_length_tracks_chain_length() {
        let mut tracker = WordChainTracker::with_board(cat_board());
        for (n, &coord) in [(0, 0), (0, 1), (1, 1), (2, 2)].iter().enumerate() {
            assert!(tracker.select(coord));
            assert_eq!(tracker.current_word().len(), n + 1);
        }
        assert_eq!(tracker.current_word(), "CATX");
    }

    #[test]
    fn any_cell_is_a_valid_first_selection() {
        let mut tracker = WordChainTracker::with_board(cat_board());
        assert!(tracker.select((3, 3)));
    }

    #[test]
    fn non_adjacent_selection_is_a_noop() {
        let mut tracker = WordChainTracker::with_board(cat_board());
        assert!(tracker.select((0, 0)));
        assert!(!tracker.select((3, 3)));
        assert!(!tracker.select((0, 2)));
        assert_eq!(tracker.current_word(), "C");
        assert!(!tracker.is_selected((3, 3)));
    }

    #[test]
    fn reselecting_a_selected_cell_is_rejected() {
        let mut tracker = WordChainTracker::with_board(cat_board());
        assert!(tracker.select((0, 0)));
        assert!(!tracker.select((0, 0)));
        assert_eq!(tracker.current_word(), "C");
    }

    #[test]
    fn diagonal_neighbors_are_adjacent() {
        let mut tracker = WordChainTracker::with_board(cat_board());
        assert!(tracker.select((1, 1)));
        assert!(tracker.select((0, 0)));
        assert_eq!(tracker.current_word(), "TC");
    }

    #[test]
    fn out_of_bounds_selection_is_rejected() {
        let mut tracker = WordChainTracker::with_board(cat_board());
        assert!(!tracker.select((4, 0)));
        assert!(!tracker.select((0, 4)));
        assert_eq!(tracker.current_word(), "");
    }

    #[test]
    fn only_the_tail_can_be_deselected() {
        let mut tracker = WordChainTracker::with_board(cat_board());
        assert!(tracker.select((0, 0)));
        assert!(tracker.select((0, 1)));
        assert!(!tracker.deselect_last((0, 0)));
        assert_eq!(tracker.current_word(), "CA");
        assert!(tracker.deselect_last((0, 1)));
        assert_eq!(tracker.current_word(), "C");
        assert!(!tracker.is_selected((0, 1)));
        assert!(tracker.deselect_last((0, 0)));
        assert_eq!(tracker.current_word(), "");
    }

    #[test]
    fn neighbors_are_clipped_at_the_corner() {
        let tracker = WordChainTracker::with_board(cat_board());
        let mut neighbors = tracker.neighbors_of((0, 0));
        neighbors.sort();
        assert_eq!(neighbors, vec![(0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn neighbors_exclude_selected_cells() {
        let mut tracker = WordChainTracker::with_board(cat_board());
        assert!(tracker.select((0, 1)));
        let neighbors = tracker.neighbors_of((0, 0));
        assert!(!neighbors.contains(&(0, 1)));
        assert!(neighbors.contains(&(1, 1)));
    }

    #[test]
    fn submitting_an_empty_word_records_nothing() {
        let dictionary = WordList::from_words(vec!["cat"]);
        let mut tracker = WordChainTracker::with_board(cat_board());
        assert_eq!(tracker.submit(&dictionary), Err(SubmitError::EmptyWord));
        assert!(tracker.correct_guesses().is_empty());
        assert!(tracker.wrong_guesses().is_empty());
    }

    #[test]
    fn submitting_a_short_word_keeps_the_chain() {
        let dictionary = WordList::from_words(vec!["cat"]);
        let mut tracker = WordChainTracker::with_board(cat_board());
        assert!(tracker.select((0, 0)));
        assert!(tracker.select((0, 1)));
        assert_eq!(tracker.submit(&dictionary), Err(SubmitError::TooShort));
        assert_eq!(tracker.current_word(), "CA");
        assert!(tracker.is_selected((0, 0)));
    }

    #[test]
    fn correct_word_is_recorded_and_chain_resets() {
        let dictionary = WordList::from_words(vec!["cat"]);
        let mut tracker = WordChainTracker::with_board(cat_board());
        assert!(tracker.select((0, 0)));
        assert!(tracker.select((0, 1)));
        assert!(tracker.select((1, 1)));
        assert_eq!(tracker.current_word(), "CAT");
        assert_eq!(tracker.submit(&dictionary), Ok(Submission::Correct));
        assert_eq!(tracker.correct_guesses(), ["CAT"]);
        assert!(tracker.wrong_guesses().is_empty());
        assert_eq!(tracker.current_word(), "");
        assert!(!tracker.is_selected((0, 0)));
        // the board is reusable after reset
        assert!(tracker.select((0, 0)));
    }

    #[test]
    fn unknown_word_is_recorded_as_wrong_and_chain_resets() {
        let dictionary = WordList::from_words(vec!["dog"]);
        let mut tracker = WordChainTracker::with_board(cat_board());
        assert!(tracker.select((0, 0)));
        assert!(tracker.select((0, 1)));
        assert!(tracker.select((1, 1)));
        assert_eq!(tracker.submit(&dictionary), Ok(Submission::Wrong));
        assert!(tracker.correct_guesses().is_empty());
        assert_eq!(tracker.wrong_guesses(), ["CAT"]);
        assert_eq!(tracker.current_word(), "");
    }
}
