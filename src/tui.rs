//! TUI (Terminal User Interface) module for the Wordle game
//!
//! This module provides an interactive terminal interface using Ratatui.
//!
//! # Layout
//! A 6×5 board, an information panel, a status line and key instructions.
//! Submitted rows are coloured by feedback; the active row shows typed
//! letters, locked hint letters and the cursor.
//!
//! # State Machine
//! - `Playing` → `GameOver` once the engine reports a win or a loss
//! - `GameOver` → `Playing` on a new game

use crate::engine::{Cell, Game, GuessOutcome, Hint, MAX_GUESSES, WORD_LENGTH};
use crate::error::{GuessError, HintError};
use crate::feedback::Feedback;
use crate::game_state::{GameInterface, UserAction};
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;

const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const ROW_SPACING: u16 = 2;
const ASCII_CONTROL_CHAR_THRESHOLD: u32 = 32;

const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const INFO_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);

/// How a single board cell is painted.
#[derive(Clone, Copy, PartialEq, Debug)]
enum CellLook {
    Blank,
    Typed,
    Hinted,
    Scored(Feedback),
}

impl CellLook {
    fn colors(self) -> (Color, Color) {
        match self {
            Self::Blank | Self::Typed => (Color::DarkGray, Color::White),
            Self::Hinted => (Color::Blue, Color::White),
            Self::Scored(Feedback::Correct) => (Color::Green, Color::Black),
            Self::Scored(Feedback::Present) => (Color::Yellow, Color::Black),
            Self::Scored(Feedback::Absent) => (Color::Gray, Color::White),
        }
    }

    fn from_cell(cell: Cell) -> Self {
        match cell {
            Cell::Empty => Self::Blank,
            Cell::Typed(_) => Self::Typed,
            Cell::Hinted(_) => Self::Hinted,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum TuiState {
    Playing,
    /// Round finished - message stored in interface.message
    GameOver,
}

/// Cursor and key handling for the active row, kept apart from the terminal.
#[derive(Debug, Default)]
struct RowEditor {
    cursor: usize,
    error_message: String,
}

impl RowEditor {
    fn reset(&mut self) {
        self.cursor = 0;
        self.error_message.clear();
    }

    fn handle_key(&mut self, key: KeyEvent, game: &mut Game) -> Option<UserAction> {
        self.error_message.clear();

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return matches!(key.code, KeyCode::Char('r' | 'R')).then_some(UserAction::NewGame);
        }
        if key.modifiers.contains(KeyModifiers::ALT) {
            debug_log!("RowEditor::handle_key() - Ignoring key with ALT");
            return None;
        }

        match key.code {
            KeyCode::Char(c) if c.is_ascii_alphabetic() => self.type_letter(game, c),
            KeyCode::Char(c) => {
                self.error_message = format!("Only letters are allowed! ('{c}' is not a letter)");
            }
            KeyCode::Backspace => self.erase_letter(game),
            KeyCode::Delete => {
                if let Err(e) = game.clear_letter(self.cursor) {
                    self.error_message = e.to_string();
                }
            }
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(WORD_LENGTH - 1),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = WORD_LENGTH - 1,
            KeyCode::Enter => return Some(UserAction::SubmitDraft),
            KeyCode::Tab => return Some(UserAction::Hint),
            KeyCode::Esc => return Some(UserAction::Exit),
            _ => {
                debug_log!("RowEditor::handle_key() - Ignoring key: {:?}", key.code);
            }
        }
        None
    }

    /// Place `c` at the cursor, skipping locked hint cells, then step right.
    fn type_letter(&mut self, game: &mut Game, c: char) {
        let Some(column) = (self.cursor..WORD_LENGTH).find(|&i| !game.draft()[i].is_locked())
        else {
            self.error_message = "No free cell to the right of the cursor".to_string();
            return;
        };
        match game.set_letter(column, c) {
            Ok(()) => self.cursor = (column + 1).min(WORD_LENGTH - 1),
            Err(e) => self.error_message = e.to_string(),
        }
    }

    /// Erase the typed letter under the cursor, or the one before it.
    fn erase_letter(&mut self, game: &mut Game) {
        if !matches!(game.draft()[self.cursor], Cell::Typed(_)) && self.cursor > 0 {
            self.cursor -= 1;
        }
        if matches!(game.draft()[self.cursor], Cell::Typed(_)) {
            // Cannot fail: the cell is typed, hence unlocked and in range.
            let _ = game.clear_letter(self.cursor);
        }
    }
}

/// Context for rendering the UI - groups related parameters to avoid too many function arguments.
struct RenderContext<'a> {
    game: &'a Game,
    cursor: usize,
    state: TuiState,
    word_count: usize,
    message: &'a str,
    error_message: &'a str,
    status: &'a str,
}

/// Main TUI interface component.
///
/// Owns the terminal and the row editor. The letters themselves live in
/// the engine's draft row.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    editor: RowEditor,
    state: TuiState,
    word_count: usize,
    message: String,
    status: String,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal setup complete");

        Ok(Self {
            terminal,
            editor: RowEditor::default(),
            state: TuiState::Playing,
            word_count: 0,
            message: String::new(),
            status: "Ready to start".to_string(),
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    fn draw(&mut self, game: &Game) -> Result<(), io::Error> {
        let ctx = RenderContext {
            game,
            cursor: self.editor.cursor,
            state: self.state,
            word_count: self.word_count,
            message: &self.message,
            error_message: &self.editor.error_message,
            status: &self.status,
        };

        self.terminal.draw(|f| {
            Self::render_static(f, &ctx);
        })?;
        Ok(())
    }

    fn draw_or_log(&mut self, game: &Game) {
        if let Err(e) = self.draw(game) {
            debug_log!("Draw error: {}", e);
        }
    }

    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),  // Title
                Constraint::Length(14), // Board: 6 rows with spacing
                Constraint::Min(6),     // Info panel
                Constraint::Length(3),  // Status line
                Constraint::Length(3),  // Instructions
            ])
            .split(f.area());

        Self::render_title(f, chunks[0]);
        Self::render_board(f, chunks[1], ctx);
        Self::render_info(f, chunks[2], ctx);
        Self::render_status(f, chunks[3], ctx.status);
        Self::render_instructions(f, chunks[4], ctx.state);
    }

    fn render_title(f: &mut Frame, area: Rect) {
        let title = Paragraph::new("WORDLE")
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_board(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let block = Block::default().title("Board").borders(Borders::ALL);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let game = ctx.game;
        for row in 0..MAX_GUESSES {
            let cells = if let Some(submitted) = game.rows().get(row) {
                Self::submitted_cells(submitted.word.chars(), &submitted.feedback)
            } else if row == game.current_row() && !game.is_over() {
                Self::draft_cells(game.draft())
            } else {
                [(' ', CellLook::Blank); WORD_LENGTH]
            };
            let cursor = (row == game.current_row() && ctx.state == TuiState::Playing)
                .then_some(ctx.cursor);
            Self::render_row(f, inner, row, &cells, cursor);
        }
    }

    fn submitted_cells(
        letters: impl Iterator<Item = char>,
        feedback: &[Feedback; WORD_LENGTH],
    ) -> [(char, CellLook); WORD_LENGTH] {
        let mut cells = [(' ', CellLook::Blank); WORD_LENGTH];
        for ((slot, letter), mark) in cells.iter_mut().zip(letters).zip(feedback) {
            *slot = (letter, CellLook::Scored(*mark));
        }
        cells
    }

    fn draft_cells(draft: &[Cell; WORD_LENGTH]) -> [(char, CellLook); WORD_LENGTH] {
        draft.map(|cell| (cell.letter().unwrap_or(' '), CellLook::from_cell(cell)))
    }

    #[allow(clippy::cast_possible_truncation)]
    fn render_row(
        f: &mut Frame,
        area: Rect,
        row_index: usize,
        cells: &[(char, CellLook); WORD_LENGTH],
        cursor: Option<usize>,
    ) {
        let y = area.y + (row_index as u16 * ROW_SPACING);
        if y >= area.y + area.height {
            return;
        }

        let mut spans = vec![Span::raw("  ")];
        for (i, &(letter, look)) in cells.iter().enumerate() {
            let (bg_color, fg_color) = look.colors();
            let mut style = Style::default().fg(fg_color).bg(bg_color);
            if cursor == Some(i) {
                style = style.add_modifier(Modifier::REVERSED);
            }
            spans.push(Span::styled(format!(" {letter} "), style));
            spans.push(Span::raw(" "));
        }

        let paragraph = Paragraph::new(Line::from(spans));
        f.render_widget(
            paragraph,
            Rect {
                x: area.x,
                y,
                width: area.width,
                height: 1,
            },
        );
    }

    fn render_info(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let mut lines = vec![
            Line::from(vec![Span::styled(
                format!("Hints left: {}", ctx.game.hints_remaining()),
                INFO_STYLE,
            )]),
            Line::from(format!("Words loaded: {}", ctx.word_count)),
            Line::from(""),
        ];

        if !ctx.message.is_empty() {
            let style = if ctx.state == TuiState::GameOver {
                SUCCESS_STYLE
            } else {
                MESSAGE_STYLE
            };
            lines.push(Line::from(vec![Span::styled(ctx.message, style)]));
        }

        if !ctx.error_message.is_empty() {
            lines.push(Line::from(vec![Span::styled(ctx.error_message, ERROR_STYLE)]));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Information").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect, state: TuiState) {
        let text = match state {
            TuiState::Playing => {
                "Type letters | ←/→: Move | BACKSPACE: Erase | ENTER: Submit | TAB: Hint | CTRL+R: Restart | ESC: Quit"
            }
            TuiState::GameOver => "N: New Game | ESC: Quit",
        };

        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_status(f: &mut Frame, area: Rect, status: &str) {
        let status_text = if status.is_empty() { "Ready" } else { status };
        let paragraph = Paragraph::new(status_text)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(paragraph, area);
    }

    fn handle_input(&mut self, game: &mut Game) -> Result<Option<UserAction>, io::Error> {
        if !event::poll(std::time::Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }

        let Event::Key(key) = event::read()? else {
            // Mouse, focus, paste and resize events are redrawn on the next pass
            return Ok(None);
        };

        // Only process Press events, ignore Release and Repeat to avoid double input
        if key.kind != event::KeyEventKind::Press {
            return Ok(None);
        }

        // Alt-tab can leak replacement or control characters from escape sequences
        if let KeyCode::Char(c) = key.code
            && (c == '\u{FFFD}' || (c as u32) < ASCII_CONTROL_CHAR_THRESHOLD)
        {
            debug_log!("handle_input() - Ignoring invalid character: {:?}", c);
            return Ok(None);
        }

        debug_log!(
            "handle_input() - Key event: code={:?}, modifiers={:?}",
            key.code,
            key.modifiers
        );
        Ok(match self.state {
            TuiState::Playing => self.editor.handle_key(key, game),
            TuiState::GameOver => Self::handle_game_over_input(key),
        })
    }

    fn handle_game_over_input(key: KeyEvent) -> Option<UserAction> {
        match key.code {
            KeyCode::Char('n' | 'N') => Some(UserAction::NewGame),
            KeyCode::Esc => Some(UserAction::Exit),
            _ => None,
        }
    }

    fn playing_status(game: &Game) -> String {
        format!(
            "Row {}/{} - {} hint(s) left",
            game.current_row() + 1,
            MAX_GUESSES,
            game.hints_remaining()
        )
    }
}

impl GameInterface for TuiInterface {
    fn display_new_game(&mut self, game: &Game, word_count: usize) {
        self.editor.reset();
        self.word_count = word_count;
        self.state = TuiState::Playing;
        self.message = format!("New game started. Loaded {word_count} words.");
        self.status = Self::playing_status(game);
        self.draw_or_log(game);
    }

    fn read_action(&mut self, game: &mut Game) -> Option<UserAction> {
        loop {
            if self.draw(game).is_err() {
                info_log!("read_action() - Draw failed, returning Exit");
                return Some(UserAction::Exit);
            }

            match self.handle_input(game) {
                Ok(Some(action)) => {
                    info_log!("read_action() - Action received: {:?}", action);
                    return Some(action);
                }
                Ok(None) => {}
                Err(_e) => {
                    info_log!("read_action() - Error handling input, returning Exit");
                    return Some(UserAction::Exit);
                }
            }
        }
    }

    fn display_outcome(&mut self, game: &Game, outcome: &GuessOutcome) {
        self.editor.reset();
        self.message = format!("Row {}: {}", outcome.row + 1, outcome.guess);
        self.status = Self::playing_status(game);
        self.draw_or_log(game);
    }

    fn display_hint(&mut self, game: &Game, hint: &Hint) {
        self.message = format!("Hint: letter {} is '{}'", hint.column + 1, hint.letter);
        self.status = Self::playing_status(game);
        self.draw_or_log(game);
    }

    fn display_guess_error(&mut self, error: &GuessError) {
        self.editor.error_message = error.to_string();
    }

    fn display_hint_error(&mut self, error: &HintError) {
        self.editor.error_message = error.to_string();
    }

    fn display_win(&mut self, game: &Game) {
        self.state = TuiState::GameOver;
        self.message = "You win!".to_string();
        self.status = "Game Over - Play again?".to_string();
        self.draw_or_log(game);
    }

    fn display_loss(&mut self, game: &Game) {
        self.state = TuiState::GameOver;
        self.message = format!("The correct word is {}", game.target());
        self.status = "Game Over".to_string();
        self.draw_or_log(game);
    }

    fn display_exit_message(&mut self) {
        self.message = "Exiting...".to_string();
        self.status = "Exiting application...".to_string();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Word;
    use rand::SeedableRng;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn crane() -> Game {
        Game::new(Word::parse("CRANE").unwrap())
    }

    fn type_word(editor: &mut RowEditor, game: &mut Game, word: &str) {
        for c in word.chars() {
            assert_eq!(editor.handle_key(key(KeyCode::Char(c)), game), None);
        }
    }

    #[test]
    fn test_typing_stops_at_last_column() {
        let mut game = crane();
        let mut editor = RowEditor::default();
        type_word(&mut editor, &mut game, "slate");
        assert_eq!(editor.cursor, WORD_LENGTH - 1);
        assert_eq!(game.draft()[4], Cell::Typed('E'));

        // A sixth letter overwrites the last cell in place.
        type_word(&mut editor, &mut game, "x");
        assert_eq!(editor.cursor, WORD_LENGTH - 1);
        assert_eq!(game.draft()[4], Cell::Typed('X'));
        assert_eq!(game.draft()[3], Cell::Typed('T'));
    }

    #[test]
    fn test_typing_skips_hinted_cell() {
        let mut game = crane();
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        let hint = game.request_hint(&mut rng).unwrap();
        let mut editor = RowEditor {
            cursor: hint.column,
            ..RowEditor::default()
        };
        type_word(&mut editor, &mut game, "q");
        assert_eq!(game.draft()[hint.column], Cell::Hinted(hint.letter));
        if hint.column + 1 < WORD_LENGTH {
            assert_eq!(game.draft()[hint.column + 1], Cell::Typed('Q'));
            assert_eq!(editor.cursor, (hint.column + 2).min(WORD_LENGTH - 1));
        } else {
            assert_eq!(
                editor.error_message,
                "No free cell to the right of the cursor"
            );
        }
    }

    #[test]
    fn test_backspace_on_empty_cell_clears_previous_letter() {
        let mut game = crane();
        let mut editor = RowEditor::default();
        type_word(&mut editor, &mut game, "ab");
        assert_eq!(editor.cursor, 2);
        assert!(game.draft()[2].is_empty());

        editor.handle_key(key(KeyCode::Backspace), &mut game);
        assert_eq!(editor.cursor, 1);
        assert!(game.draft()[1].is_empty());
        assert_eq!(game.draft()[0], Cell::Typed('A'));

        editor.handle_key(key(KeyCode::Backspace), &mut game);
        editor.handle_key(key(KeyCode::Backspace), &mut game);
        assert_eq!(editor.cursor, 0);
        assert!(game.draft().iter().all(|cell| cell.is_empty()));
    }

    #[test]
    fn test_control_keys_and_actions() {
        let mut game = crane();
        let mut editor = RowEditor::default();
        let ctrl = |c| KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL);
        assert_eq!(editor.handle_key(ctrl('r'), &mut game), Some(UserAction::NewGame));
        assert_eq!(editor.handle_key(ctrl('c'), &mut game), None);
        assert_eq!(
            editor.handle_key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::ALT), &mut game),
            None
        );
        assert!(game.draft()[0].is_empty());

        assert_eq!(editor.handle_key(key(KeyCode::Enter), &mut game), Some(UserAction::SubmitDraft));
        assert_eq!(editor.handle_key(key(KeyCode::Tab), &mut game), Some(UserAction::Hint));
        assert_eq!(editor.handle_key(key(KeyCode::Esc), &mut game), Some(UserAction::Exit));
    }

    #[test]
    fn test_non_letter_sets_error_until_next_key() {
        let mut game = crane();
        let mut editor = RowEditor::default();
        editor.handle_key(key(KeyCode::Char('7')), &mut game);
        assert!(editor.error_message.contains("'7'"));
        assert!(game.draft()[0].is_empty());

        editor.handle_key(key(KeyCode::Right), &mut game);
        assert!(editor.error_message.is_empty());
        assert_eq!(editor.cursor, 1);
        editor.handle_key(key(KeyCode::End), &mut game);
        editor.handle_key(key(KeyCode::Right), &mut game);
        assert_eq!(editor.cursor, WORD_LENGTH - 1);
        editor.handle_key(key(KeyCode::Home), &mut game);
        assert_eq!(editor.cursor, 0);
    }

    #[test]
    fn test_cell_look_colors() {
        assert_eq!(
            CellLook::Scored(Feedback::Correct).colors(),
            (Color::Green, Color::Black)
        );
        assert_eq!(
            CellLook::Scored(Feedback::Present).colors(),
            (Color::Yellow, Color::Black)
        );
        assert_eq!(
            CellLook::Scored(Feedback::Absent).colors(),
            (Color::Gray, Color::White)
        );
        assert_ne!(CellLook::Hinted.colors(), CellLook::Typed.colors());
    }

    #[test]
    fn test_draft_cells_mark_hints() {
        let draft = [
            Cell::Typed('C'),
            Cell::Hinted('R'),
            Cell::Empty,
            Cell::Empty,
            Cell::Empty,
        ];
        let cells = TuiInterface::draft_cells(&draft);
        assert_eq!(cells[0], ('C', CellLook::Typed));
        assert_eq!(cells[1], ('R', CellLook::Hinted));
        assert_eq!(cells[2], (' ', CellLook::Blank));
    }

    #[test]
    fn test_game_over_keys() {
        assert_eq!(
            TuiInterface::handle_game_over_input(key(KeyCode::Char('n'))),
            Some(UserAction::NewGame)
        );
        assert_eq!(
            TuiInterface::handle_game_over_input(key(KeyCode::Esc)),
            Some(UserAction::Exit)
        );
        assert_eq!(
            TuiInterface::handle_game_over_input(key(KeyCode::Enter)),
            None
        );
    }
}
