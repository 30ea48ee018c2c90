//! Game engine for the word-guessing game
//!
//! Pure game state with no UI dependency: the presentation layer reads
//! the board through the query methods and mutates it only through
//! [`Game::submit_guess`], [`Game::request_hint`] and the draft edits.
//!
//! # State Machine
//! - `InProgress` → `Won` when a submitted guess matches the target
//! - `InProgress` → `Lost` when the last row is used without a match
//! - `Won` / `Lost` are terminal until [`GuessEngine::reset`]

use crate::error::{CellError, GuessError, HintError};
use crate::feedback::{Feedback, get_feedback};
use crate::wordbank::WordBank;
use crate::{debug_log, info_log};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use std::fmt;
use std::str::FromStr;

pub const MAX_GUESSES: usize = 6;
pub const WORD_LENGTH: usize = 5;
pub const HINT_BUDGET: usize = 3;

/// A validated 5-letter word, stored as uppercase ASCII.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Word([u8; WORD_LENGTH]);

impl Word {
    /// Validate `input` as a guessable word.
    ///
    /// # Errors
    /// `InvalidLength` unless `input` has exactly 5 characters,
    /// `InvalidCharacters` unless every character is an ASCII letter.
    pub fn parse(input: &str) -> Result<Self, GuessError> {
        let length = input.chars().count();
        if length != WORD_LENGTH {
            return Err(GuessError::InvalidLength(length));
        }
        if !input.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(GuessError::InvalidCharacters);
        }
        let mut letters = [0; WORD_LENGTH];
        for (slot, byte) in letters.iter_mut().zip(input.bytes()) {
            *slot = byte.to_ascii_uppercase();
        }
        Ok(Self(letters))
    }

    pub fn letters(&self) -> &[u8; WORD_LENGTH] {
        &self.0
    }

    pub fn letter(&self, column: usize) -> char {
        char::from(self.0[column])
    }

    pub fn contains(&self, letter: u8) -> bool {
        self.0.contains(&letter.to_ascii_uppercase())
    }

    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.0.iter().map(|&b| char::from(b))
    }
}

impl FromStr for Word {
    type Err = GuessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.chars().try_for_each(|c| write!(f, "{c}"))
    }
}

impl fmt::Debug for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Word({self})")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

/// One cell of the active row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Typed(char),
    /// Revealed by a hint; the player can no longer edit it.
    Hinted(char),
}

impl Cell {
    pub fn letter(self) -> Option<char> {
        match self {
            Self::Empty => None,
            Self::Typed(c) | Self::Hinted(c) => Some(c),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Self::Empty
    }

    pub fn is_locked(self) -> bool {
        matches!(self, Self::Hinted(_))
    }
}

/// A revealed letter of the target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hint {
    pub row: usize,
    pub column: usize,
    pub letter: char,
}

/// A guess that has been accepted onto the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubmittedRow {
    pub word: Word,
    pub feedback: [Feedback; WORD_LENGTH],
}

/// Result of an accepted guess.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GuessOutcome {
    pub row: usize,
    pub guess: Word,
    pub feedback: [Feedback; WORD_LENGTH],
    pub status: GameStatus,
}

/// State of a single round against one target word.
#[derive(Clone, Debug)]
pub struct Game {
    target: Word,
    current_row: usize,
    hints_used: usize,
    status: GameStatus,
    rows: Vec<SubmittedRow>,
    draft: [Cell; WORD_LENGTH],
}

impl Game {
    pub fn new(target: Word) -> Self {
        Self {
            target,
            current_row: 0,
            hints_used: 0,
            status: GameStatus::InProgress,
            rows: Vec::with_capacity(MAX_GUESSES),
            draft: [Cell::Empty; WORD_LENGTH],
        }
    }

    pub fn target(&self) -> &Word {
        &self.target
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status != GameStatus::InProgress
    }

    pub fn current_row(&self) -> usize {
        self.current_row
    }

    pub fn hints_used(&self) -> usize {
        self.hints_used
    }

    pub fn hints_remaining(&self) -> usize {
        HINT_BUDGET.saturating_sub(self.hints_used)
    }

    pub fn rows(&self) -> &[SubmittedRow] {
        &self.rows
    }

    pub fn draft(&self) -> &[Cell; WORD_LENGTH] {
        &self.draft
    }

    /// Submit a full word for the active row.
    ///
    /// On success the row is recorded, the active row advances by one and
    /// the draft is cleared. Rejected input leaves the game untouched.
    ///
    /// # Errors
    /// `HintMismatch` when the word drops a letter a hint locked in place.
    pub fn submit_guess(&mut self, input: &str) -> Result<GuessOutcome, GuessError> {
        if self.is_over() {
            return Err(GuessError::GameAlreadyOver);
        }
        let guess = Word::parse(input)?;
        self.check_hints_kept(&guess)?;
        let feedback = get_feedback(&guess, &self.target);
        let row = self.current_row;

        self.rows.push(SubmittedRow {
            word: guess,
            feedback,
        });
        self.current_row += 1;
        self.draft = [Cell::Empty; WORD_LENGTH];
        self.status = if guess == self.target {
            GameStatus::Won
        } else if self.current_row == MAX_GUESSES {
            GameStatus::Lost
        } else {
            GameStatus::InProgress
        };

        info_log!(
            "Row {} accepted '{}' -> {:?}",
            row + 1,
            guess,
            self.status
        );
        Ok(GuessOutcome {
            row,
            guess,
            feedback,
            status: self.status,
        })
    }

    fn check_hints_kept(&self, guess: &Word) -> Result<(), GuessError> {
        for (column, cell) in self.draft.iter().enumerate() {
            if let Cell::Hinted(letter) = *cell
                && guess.letter(column) != letter
            {
                return Err(GuessError::HintMismatch { column, letter });
            }
        }
        Ok(())
    }

    /// Submit whatever the draft row currently holds.
    pub fn submit_draft(&mut self) -> Result<GuessOutcome, GuessError> {
        if self.is_over() {
            return Err(GuessError::GameAlreadyOver);
        }
        let word: Option<String> = self.draft.iter().map(|cell| cell.letter()).collect();
        match word {
            Some(word) => self.submit_guess(&word),
            None => Err(GuessError::InvalidLength(
                self.draft.iter().filter(|cell| !cell.is_empty()).count(),
            )),
        }
    }

    /// Reveal the target letter in a random empty cell of the active row.
    pub fn request_hint<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Hint, HintError> {
        if self.is_over() {
            return Err(HintError::GameAlreadyOver);
        }
        if self.hints_used >= HINT_BUDGET {
            return Err(HintError::HintBudgetExhausted);
        }
        self.hints_used += 1;

        let free: Vec<usize> = self
            .draft
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_empty())
            .map(|(column, _)| column)
            .collect();
        let Some(&column) = free.choose(rng) else {
            // A wasted attempt is refunded.
            self.hints_used -= 1;
            debug_log!("Hint refused: row {} is full", self.current_row + 1);
            return Err(HintError::NoFreeCells);
        };

        let letter = self.target.letter(column);
        self.draft[column] = Cell::Hinted(letter);
        info_log!(
            "Hint {}/{} revealed column {}",
            self.hints_used,
            HINT_BUDGET,
            column + 1
        );
        Ok(Hint {
            row: self.current_row,
            column,
            letter,
        })
    }

    /// Type `letter` into `column` of the active row.
    pub fn set_letter(&mut self, column: usize, letter: char) -> Result<(), CellError> {
        let cell = self.editable_cell(column)?;
        if !letter.is_ascii_alphabetic() {
            return Err(CellError::InvalidLetter(letter));
        }
        *cell = Cell::Typed(letter.to_ascii_uppercase());
        Ok(())
    }

    pub fn clear_letter(&mut self, column: usize) -> Result<(), CellError> {
        *self.editable_cell(column)? = Cell::Empty;
        Ok(())
    }

    fn editable_cell(&mut self, column: usize) -> Result<&mut Cell, CellError> {
        if self.is_over() {
            return Err(CellError::GameAlreadyOver);
        }
        let cell = self
            .draft
            .get_mut(column)
            .ok_or(CellError::OutOfBounds(column))?;
        if cell.is_locked() {
            return Err(CellError::Locked(column));
        }
        Ok(cell)
    }
}

/// Owns the word bank, the random source and the running [`Game`].
pub struct GuessEngine {
    wordbank: WordBank,
    rng: StdRng,
    game: Game,
}

impl GuessEngine {
    pub fn new(wordbank: WordBank, mut rng: StdRng) -> Self {
        let game = Game::new(wordbank.choose(&mut rng));
        debug_log!("New game, target '{}'", game.target());
        Self {
            wordbank,
            rng,
            game,
        }
    }

    pub fn with_seed(wordbank: WordBank, seed: u64) -> Self {
        Self::new(wordbank, StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy(wordbank: WordBank) -> Self {
        Self::new(wordbank, StdRng::from_os_rng())
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut Game {
        &mut self.game
    }

    pub fn wordbank(&self) -> &WordBank {
        &self.wordbank
    }

    pub fn status(&self) -> GameStatus {
        self.game.status()
    }

    pub fn submit_guess(&mut self, input: &str) -> Result<GuessOutcome, GuessError> {
        self.game.submit_guess(input)
    }

    pub fn submit_draft(&mut self) -> Result<GuessOutcome, GuessError> {
        self.game.submit_draft()
    }

    pub fn request_hint(&mut self) -> Result<Hint, HintError> {
        self.game.request_hint(&mut self.rng)
    }

    /// Discard the current round and start over with a fresh target.
    pub fn reset(&mut self) {
        self.game = Game::new(self.wordbank.choose(&mut self.rng));
        info_log!("Game reset");
        debug_log!("New game, target '{}'", self.game.target());
    }
}
