use crate::debug_log;
use crate::engine::{Cell, Game, GuessOutcome, Hint, MAX_GUESSES, SubmittedRow};
use crate::error::{GuessError, HintError};
use crate::feedback::feedback_pattern;
use crate::game_state::{GameInterface, UserAction};
use crate::logging::default_log_path;
use clap::Parser;
use std::io::BufRead;
use std::path::PathBuf;

/// Wordle game options
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a newline-delimited wordbank file
    #[arg(short = 'i', long = "input")]
    pub wordbank_path: Option<PathBuf>,

    /// Play with line-based prompts instead of the terminal UI
    #[arg(long)]
    pub plain: bool,

    /// Seed for target and hint selection
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write logs to this file
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Where logs go, if anywhere.
    ///
    /// The TUI owns the screen, so it logs to `--log-file` or the default
    /// cache file. The plain CLI shares stdout and stderr with the player
    /// and only logs when `--log-file` is given.
    pub fn log_destination(&self) -> Option<PathBuf> {
        if self.plain {
            self.log_file.clone()
        } else {
            self.log_file.clone().or_else(default_log_path)
        }
    }
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// Map one line of input to an action. Blank lines map to `None`.
pub fn parse_action(line: &str) -> Option<UserAction> {
    let input = line.trim();
    if input.is_empty() {
        return None;
    }
    match input.to_uppercase().as_str() {
        "EXIT" => Some(UserAction::Exit),
        "NEXT" => Some(UserAction::NewGame),
        "HINT" => Some(UserAction::Hint),
        _ => Some(UserAction::Guess(input.to_string())),
    }
}

/// `C R A N E  [GGYXX]`
pub fn format_row(row: &SubmittedRow) -> String {
    let letters: Vec<String> = row.word.chars().map(String::from).collect();
    format!("{}  [{}]", letters.join(" "), feedback_pattern(&row.feedback))
}

/// The active row with `_` for empty cells, e.g. `_ R _ _ E`.
pub fn format_draft(draft: &[Cell]) -> String {
    let cells: Vec<String> = draft
        .iter()
        .map(|cell| cell.letter().unwrap_or('_').to_string())
        .collect();
    cells.join(" ")
}

pub fn display_board(game: &Game) {
    for (i, row) in game.rows().iter().enumerate() {
        println!("{}. {}", i + 1, format_row(row));
    }
}

fn display_prompt(game: &Game) {
    if game.is_over() {
        println!("\nType 'next' to play again or 'exit' to quit:");
        return;
    }
    println!(
        "\nRow {}/{} - enter a 5-letter word ('hint' for a hint [{} left], 'next' to restart, 'exit' to quit):",
        game.current_row() + 1,
        MAX_GUESSES,
        game.hints_remaining()
    );
    if game.draft().iter().any(|cell| !cell.is_empty()) {
        println!("Hints: {}", format_draft(game.draft()));
    }
}

/// CLI implementation of the `GameInterface` trait over any `BufRead`.
pub struct CliInterface<R: BufRead> {
    reader: R,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> GameInterface for CliInterface<R> {
    fn display_new_game(&mut self, _game: &Game, word_count: usize) {
        println!("New game started. Loaded {word_count} words.");
        println!("Feedback: G = right place, Y = in the word, X = not in the word.");
    }

    fn read_action(&mut self, game: &mut Game) -> Option<UserAction> {
        display_prompt(game);
        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) => Some(UserAction::Exit),
            Ok(_) => parse_action(&line),
            Err(e) => {
                debug_log!("read_action() - Input error: {}", e);
                Some(UserAction::Exit)
            }
        }
    }

    fn display_outcome(&mut self, game: &Game, _outcome: &GuessOutcome) {
        display_board(game);
    }

    fn display_hint(&mut self, game: &Game, hint: &Hint) {
        println!("Hint: letter {} is '{}'", hint.column + 1, hint.letter);
        println!("Hints: {}", format_draft(game.draft()));
    }

    fn display_guess_error(&mut self, error: &GuessError) {
        println!("{error}");
    }

    fn display_hint_error(&mut self, error: &HintError) {
        println!("{error}");
    }

    fn display_win(&mut self, _game: &Game) {
        println!("You win!");
    }

    fn display_loss(&mut self, game: &Game) {
        println!("The correct word is {}", game.target());
    }

    fn display_exit_message(&mut self) {
        println!("Exiting.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Word;
    use crate::feedback::get_feedback;
    use std::io::Cursor;

    #[test]
    fn test_cli_flags() {
        let cli = Cli::parse_from(["wordle-game", "-i", "words.txt", "--plain", "--seed", "7"]);
        assert_eq!(cli.wordbank_path, Some(PathBuf::from("words.txt")));
        assert!(cli.plain);
        assert_eq!(cli.seed, Some(7));
        assert_eq!(cli.log_file, None);
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["wordle-game"]);
        assert_eq!(cli.wordbank_path, None);
        assert!(!cli.plain);
        assert_eq!(cli.seed, None);
    }

    #[test]
    fn test_plain_mode_logs_only_to_explicit_file() {
        let cli = Cli::parse_from(["wordle-game", "--plain"]);
        assert_eq!(cli.log_destination(), None);

        let cli = Cli::parse_from(["wordle-game", "--plain", "--log-file", "game.log"]);
        assert_eq!(cli.log_destination(), Some(PathBuf::from("game.log")));
    }

    #[test]
    fn test_tui_mode_logs_to_file() {
        let cli = Cli::parse_from(["wordle-game"]);
        assert_eq!(cli.log_destination(), default_log_path());

        let cli = Cli::parse_from(["wordle-game", "--log-file", "game.log"]);
        assert_eq!(cli.log_destination(), Some(PathBuf::from("game.log")));
    }

    #[test]
    fn test_parse_action_commands_are_case_insensitive() {
        assert_eq!(parse_action("exit\n"), Some(UserAction::Exit));
        assert_eq!(parse_action("EXIT"), Some(UserAction::Exit));
        assert_eq!(parse_action(" Next "), Some(UserAction::NewGame));
        assert_eq!(parse_action("hint"), Some(UserAction::Hint));
    }

    #[test]
    fn test_parse_action_guess_is_trimmed() {
        assert_eq!(
            parse_action("  crane  \n"),
            Some(UserAction::Guess("crane".to_string()))
        );
        // Validation is left to the engine.
        assert_eq!(
            parse_action("CR4NE"),
            Some(UserAction::Guess("CR4NE".to_string()))
        );
    }

    #[test]
    fn test_parse_action_blank_line() {
        assert_eq!(parse_action("\n"), None);
        assert_eq!(parse_action("   "), None);
    }

    #[test]
    fn test_format_row() {
        let word = Word::parse("TRACE").unwrap();
        let row = SubmittedRow {
            word,
            feedback: get_feedback(&word, &Word::parse("CRANE").unwrap()),
        };
        assert_eq!(format_row(&row), "T R A C E  [XGGYG]");
    }

    #[test]
    fn test_format_draft() {
        let draft = [
            Cell::Empty,
            Cell::Hinted('R'),
            Cell::Empty,
            Cell::Typed('N'),
            Cell::Empty,
        ];
        assert_eq!(format_draft(&draft), "_ R _ N _");
    }

    #[test]
    fn test_read_action_eof_exits() {
        let mut game = Game::new(Word::parse("CRANE").unwrap());
        let mut cli = CliInterface::new(Cursor::new(""));
        assert_eq!(cli.read_action(&mut game), Some(UserAction::Exit));
    }

    #[test]
    fn test_read_action_reads_one_line_at_a_time() {
        let mut game = Game::new(Word::parse("CRANE").unwrap());
        let mut cli = CliInterface::new(Cursor::new("slate\nhint\n\nexit\n"));
        assert_eq!(
            cli.read_action(&mut game),
            Some(UserAction::Guess("slate".to_string()))
        );
        assert_eq!(cli.read_action(&mut game), Some(UserAction::Hint));
        assert_eq!(cli.read_action(&mut game), None);
        assert_eq!(cli.read_action(&mut game), Some(UserAction::Exit));
    }
}
