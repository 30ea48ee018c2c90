use crate::engine::{Game, GameStatus, GuessEngine, GuessOutcome, Hint};
use crate::error::{GuessError, HintError};
use crate::info_log;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    /// A full word typed in one go.
    Guess(String),
    /// Submit the letters currently placed in the active row.
    SubmitDraft,
    Hint,
    NewGame,
    Exit,
}

/// Presentation side of a session. Implemented by the CLI and the TUI.
pub trait GameInterface {
    fn display_new_game(&mut self, game: &Game, word_count: usize);
    /// `None` means nothing actionable was entered; the loop asks again.
    ///
    /// The interface may edit the draft row through `game` while reading.
    fn read_action(&mut self, game: &mut Game) -> Option<UserAction>;
    fn display_outcome(&mut self, game: &Game, outcome: &GuessOutcome);
    fn display_hint(&mut self, game: &Game, hint: &Hint);
    fn display_guess_error(&mut self, error: &GuessError);
    fn display_hint_error(&mut self, error: &HintError);
    fn display_win(&mut self, game: &Game);
    fn display_loss(&mut self, game: &Game);
    fn display_exit_message(&mut self);
}

/// Finished rounds of one session. Abandoned rounds are not counted.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionStats {
    pub games_played: usize,
    pub games_won: usize,
}

impl SessionStats {
    fn record(&mut self, status: GameStatus) {
        match status {
            GameStatus::Won => {
                self.games_played += 1;
                self.games_won += 1;
            }
            GameStatus::Lost => self.games_played += 1,
            GameStatus::InProgress => {}
        }
    }
}

pub fn game_loop<I: GameInterface + ?Sized>(
    engine: &mut GuessEngine,
    interface: &mut I,
) -> SessionStats {
    let mut stats = SessionStats::default();
    interface.display_new_game(engine.game(), engine.wordbank().len());

    loop {
        let Some(action) = interface.read_action(engine.game_mut()) else {
            continue;
        };

        match action {
            UserAction::Exit => {
                interface.display_exit_message();
                break;
            }
            UserAction::NewGame => {
                engine.reset();
                interface.display_new_game(engine.game(), engine.wordbank().len());
            }
            UserAction::Hint => match engine.request_hint() {
                Ok(hint) => interface.display_hint(engine.game(), &hint),
                Err(e) => interface.display_hint_error(&e),
            },
            UserAction::Guess(guess) => {
                let result = engine.submit_guess(&guess);
                handle_submission(result, engine.game(), interface, &mut stats);
            }
            UserAction::SubmitDraft => {
                let result = engine.submit_draft();
                handle_submission(result, engine.game(), interface, &mut stats);
            }
        }
    }

    info_log!(
        "Session over: {} played, {} won",
        stats.games_played,
        stats.games_won
    );
    stats
}

fn handle_submission<I: GameInterface + ?Sized>(
    result: Result<GuessOutcome, GuessError>,
    game: &Game,
    interface: &mut I,
    stats: &mut SessionStats,
) {
    let outcome = match result {
        Ok(outcome) => outcome,
        Err(e) => {
            interface.display_guess_error(&e);
            return;
        }
    };

    interface.display_outcome(game, &outcome);
    stats.record(outcome.status);
    match outcome.status {
        GameStatus::Won => interface.display_win(game),
        GameStatus::Lost => interface.display_loss(game),
        GameStatus::InProgress => {}
    }
}
