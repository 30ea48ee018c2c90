// Error types: guess validation, hint requests, draft edits, word bank loading, logging setup

use std::io;
use thiserror::Error;

/// Rejected guess submissions
#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum GuessError {
    /// Carries the number of characters actually supplied.
    #[error("The word must have 5 letters!")]
    InvalidLength(usize),
    #[error("The word must have 5 letters!")]
    InvalidCharacters,
    /// The guess changes a letter revealed by a hint; `column` is 0-based.
    #[error("Letter {} must stay '{letter}' from the hint", .column + 1)]
    HintMismatch { column: usize, letter: char },
    #[error("The game is already over")]
    GameAlreadyOver,
}

/// Rejected hint requests
#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum HintError {
    #[error("No hints left")]
    HintBudgetExhausted,
    #[error("Free up space for a hint")]
    NoFreeCells,
    #[error("The game is already over")]
    GameAlreadyOver,
}

/// Rejected edits of the active row
#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum CellError {
    #[error("Column {0} is outside the row")]
    OutOfBounds(usize),
    #[error("Column {0} holds a hint and cannot be edited")]
    Locked(usize),
    #[error("Only letters are allowed! ('{0}' is not a letter)")]
    InvalidLetter(char),
    #[error("The game is already over")]
    GameAlreadyOver,
}

/// Word list loading errors
#[derive(Error, Debug)]
pub enum WordbankError {
    #[error("failed to read word list: {0}")]
    Io(#[from] io::Error),
    #[error("word list contains no valid 5-letter words")]
    Empty,
}

/// Logger setup errors
#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("failed to open log file: {0}")]
    Io(#[from] io::Error),
    #[error("logger already initialised")]
    AlreadyInitialised(#[from] log::SetLoggerError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_share_player_message() {
        assert_eq!(
            GuessError::InvalidLength(3).to_string(),
            GuessError::InvalidCharacters.to_string()
        );
        assert_eq!(
            GuessError::InvalidCharacters.to_string(),
            "The word must have 5 letters!"
        );
    }

    #[test]
    fn test_hint_mismatch_names_column_from_one() {
        let err = GuessError::HintMismatch {
            column: 2,
            letter: 'A',
        };
        assert_eq!(err.to_string(), "Letter 3 must stay 'A' from the hint");
    }

    #[test]
    fn test_no_free_cells_message() {
        assert_eq!(HintError::NoFreeCells.to_string(), "Free up space for a hint");
    }

    #[test]
    fn test_wordbank_io_error_wraps_source() {
        let err = WordbankError::from(io::Error::new(io::ErrorKind::NotFound, "missing"));
        assert!(err.to_string().contains("missing"));
    }
}
