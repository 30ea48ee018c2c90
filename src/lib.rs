// Library interface for wordle-game
// This allows integration tests to access internal modules

pub mod cli;
pub mod engine;
pub mod error;
pub mod feedback;
pub mod game_state;
pub mod logging;
pub mod tui;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use engine::{Cell, Game, GameStatus, GuessEngine, GuessOutcome, Hint, Word};
pub use error::{CellError, GuessError, HintError, WordbankError};
pub use feedback::{Feedback, get_feedback};
pub use game_state::{GameInterface, SessionStats, UserAction, game_loop};
pub use wordbank::{WordBank, load_wordbank_from_file, load_wordbank_from_str};
