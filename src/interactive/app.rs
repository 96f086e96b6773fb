//! TUI application state and logic

use crate::catalog::{self, DICTIONARIES, WORD_LENGTHS};
use crate::core::{CharStatus, KeyStatuses, PuzzleError, PuzzleState};
use crate::prefs::UiPreferences;
use crate::suggest::scheduler::TICK_INTERVAL;
use crate::suggest::{
    PanelView, PredictRequest, Suggester, SuggestionOutcome, SuggestionPanel,
    SuggestionScheduler, TickAction,
};
use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// How long the current row stays marked after a rejected submit
pub const SHAKE_DURATION: Duration = Duration::from_millis(600);

/// Shown when a guess is submitted with the wrong number of letters
pub const NOT_ENOUGH_LETTERS: &str = "Not enough letters";

/// Which suggestion list a cursor points into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionColumn {
    Exploit,
    Explore,
}

/// Where keyboard input goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Typing the next guess
    Input,
    /// Cursor on a cell of a completed row
    Grid { row: usize, col: usize },
    /// Cursor on a suggested word
    Suggestions {
        column: SuggestionColumn,
        index: usize,
    },
}

#[derive(Debug, Clone)]
pub struct Message {
    pub text: String,
    pub style: MessageStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStyle {
    Info,
    Success,
    Error,
}

/// Application state
pub struct App {
    pub puzzle: PuzzleState,
    pub prefs: UiPreferences,
    pub scheduler: SuggestionScheduler,
    pub panel: SuggestionPanel,
    pub focus: Focus,
    pub messages: Vec<Message>,
    pub shake_until: Option<Instant>,
    pub show_help: bool,
    pub should_quit: bool,
    pub result_count: usize,
}

impl App {
    /// Build the app with an armed scheduler so suggestions load at startup
    #[must_use]
    pub fn new(prefs: UiPreferences, quiet: Duration, result_count: usize, now: Instant) -> Self {
        let puzzle = PuzzleState::new(prefs.word_length());
        Self {
            puzzle,
            prefs,
            scheduler: SuggestionScheduler::armed(quiet, now),
            panel: SuggestionPanel::default(),
            focus: Focus::Input,
            messages: vec![
                Message {
                    text: "Type the words you played and mark each letter's colour.".to_string(),
                    style: MessageStyle::Info,
                },
                Message {
                    text: "Tab moves between the grid and suggestions, ? for help.".to_string(),
                    style: MessageStyle::Info,
                },
            ],
            shake_until: None,
            show_help: false,
            should_quit: false,
            result_count,
        }
    }

    /// Periodic tick; returns a request when one should be sent now
    pub fn on_tick(&mut self, now: Instant) -> Option<PredictRequest> {
        if self.shake_until.is_some_and(|until| now >= until) {
            self.shake_until = None;
        }

        match self.scheduler.tick(now) {
            TickAction::Fire => {
                self.panel.start_loading();
                Some(PredictRequest::from_puzzle(
                    &self.puzzle,
                    self.prefs.dictionary(),
                    self.result_count,
                ))
            }
            TickAction::Wait => None,
        }
    }

    /// A request issued by [`App::on_tick`] has finished
    pub fn on_suggestion(&mut self, outcome: SuggestionOutcome) {
        self.scheduler.complete();
        self.panel.apply(outcome);
        if let Focus::Suggestions { .. } = self.focus {
            self.focus = self.clamp_suggestion_focus(self.focus);
        }
    }

    fn request_new_suggestion(&mut self, now: Instant) {
        self.scheduler.mark_dirty(now);
    }

    #[must_use]
    pub fn is_shaking(&self) -> bool {
        self.shake_until.is_some()
    }

    #[must_use]
    pub fn key_statuses(&self) -> KeyStatuses {
        KeyStatuses::from_puzzle(&self.puzzle)
    }

    pub fn add_message(&mut self, text: &str, style: MessageStyle) {
        self.messages.push(Message {
            text: text.to_string(),
            style,
        });

        // Keep only last 5 messages
        if self.messages.len() > 5 {
            self.messages.remove(0);
        }
    }

    pub fn type_char(&mut self, c: char) {
        self.puzzle.push_char(c);
    }

    pub fn backspace(&mut self) {
        self.puzzle.pop_char();
    }

    /// Submit the typed guess
    pub fn submit(&mut self, now: Instant) {
        match self.puzzle.submit() {
            Ok(()) => {
                debug!(rows = self.puzzle.guesses().len(), "guess submitted");
                self.request_new_suggestion(now);
            }
            Err(err) => self.reject(&err, now),
        }
    }

    fn reject(&mut self, err: &PuzzleError, now: Instant) {
        let text = match err {
            PuzzleError::WrongLength { .. } => NOT_ENOUGH_LETTERS.to_string(),
            other => other.to_string(),
        };
        self.shake_until = Some(now + SHAKE_DURATION);
        self.add_message(&text, MessageStyle::Error);
    }

    /// Cycle the mark under the grid cursor
    pub fn toggle_selected(&mut self, now: Instant) {
        if let Focus::Grid { row, col } = self.focus {
            match self.puzzle.toggle(row, col) {
                Ok(status) => {
                    debug!(row, col, %status, "letter marked");
                    self.request_new_suggestion(now);
                }
                Err(err) => warn!(error = %err, "toggle on stale cursor"),
            }
        }
    }

    /// Delete the row under the grid cursor
    pub fn delete_selected_row(&mut self, now: Instant) {
        if let Focus::Grid { row, col } = self.focus {
            match self.puzzle.delete_row(row) {
                Ok(word) => {
                    self.add_message(&format!("Removed {word}"), MessageStyle::Info);
                    self.request_new_suggestion(now);
                    let rows = self.puzzle.guesses().len();
                    self.focus = if rows == 0 {
                        Focus::Input
                    } else {
                        Focus::Grid {
                            row: row.min(rows - 1),
                            col,
                        }
                    };
                }
                Err(err) => warn!(error = %err, "delete on stale cursor"),
            }
        }
    }

    /// The word under the suggestion cursor, if any
    #[must_use]
    pub fn selected_suggestion(&self) -> Option<&str> {
        let Focus::Suggestions { column, index } = self.focus else {
            return None;
        };
        let PanelView::Lists(lists) = self.panel.view() else {
            return None;
        };
        let list = match column {
            SuggestionColumn::Exploit => &lists.to_exploit,
            SuggestionColumn::Explore => &lists.to_explore,
        };
        list.get(index).map(|(_, word)| word.as_str())
    }

    /// Add the word under the suggestion cursor as a new row
    pub fn accept_selected_suggestion(&mut self, now: Instant) {
        let Some(word) = self.selected_suggestion().map(str::to_string) else {
            return;
        };
        match self.puzzle.accept_suggestion(&word) {
            Ok(()) => {
                self.add_message(&format!("Added {}", word.to_uppercase()), MessageStyle::Success);
                self.request_new_suggestion(now);
                self.focus = Focus::Input;
            }
            Err(err) => self.reject(&err, now),
        }
    }

    /// Clear the board and fetch fresh suggestions
    pub fn reset_board(&mut self, now: Instant) {
        self.puzzle.reset(self.prefs.word_length());
        self.focus = Focus::Input;
        self.request_new_suggestion(now);
    }

    /// Switch to the next word length; this always resets the board
    pub fn cycle_word_length(&mut self, now: Instant) {
        let Some(len) = catalog::next_value(WORD_LENGTHS, self.prefs.word_length()) else {
            return;
        };
        self.persist(|p| p.set_word_length(len));
        self.reset_board(now);
        info!(word_length = len, "word length changed");
        self.add_message(&format!("Word length: {len}"), MessageStyle::Info);
    }

    /// Switch to the next dictionary
    pub fn cycle_dictionary(&mut self, now: Instant) {
        let current = self.prefs.dictionary().to_string();
        let Some(dict) = catalog::next_value(DICTIONARIES, current.as_str()) else {
            return;
        };
        self.persist(|p| p.set_dictionary(dict));
        self.request_new_suggestion(now);
        let name = catalog::display_name(DICTIONARIES, dict).unwrap_or(dict);
        self.add_message(&format!("Dictionary: {name}"), MessageStyle::Info);
    }

    pub fn toggle_theme(&mut self) {
        let theme = self.prefs.theme().toggled();
        self.persist(|p| p.set_theme(theme));
    }

    pub fn toggle_high_contrast(&mut self) {
        let on = !self.prefs.high_contrast();
        self.persist(|p| p.set_high_contrast(on));
    }

    fn persist(&mut self, update: impl FnOnce(&mut UiPreferences) -> Result<()>) {
        if let Err(err) = update(&mut self.prefs) {
            warn!(error = %format!("{err:#}"), "failed to save preferences");
            self.add_message("Could not save preferences", MessageStyle::Error);
        }
    }

    /// Move focus to the next area that has something to select
    pub fn cycle_focus(&mut self) {
        let rows = self.puzzle.guesses().len();
        let has_suggestions = self.suggestion_len(SuggestionColumn::Exploit) > 0
            || self.suggestion_len(SuggestionColumn::Explore) > 0;

        let grid = (rows > 0).then_some(Focus::Grid {
            row: rows.saturating_sub(1),
            col: 0,
        });
        let suggestions = has_suggestions.then(|| {
            self.clamp_suggestion_focus(Focus::Suggestions {
                column: SuggestionColumn::Exploit,
                index: 0,
            })
        });

        self.focus = match self.focus {
            Focus::Input => grid.or(suggestions).unwrap_or(Focus::Input),
            Focus::Grid { .. } => suggestions.unwrap_or(Focus::Input),
            Focus::Suggestions { .. } => Focus::Input,
        };
    }

    fn suggestion_len(&self, column: SuggestionColumn) -> usize {
        match self.panel.view() {
            PanelView::Lists(lists) => match column {
                SuggestionColumn::Exploit => lists.to_exploit.len(),
                SuggestionColumn::Explore => lists.to_explore.len(),
            },
            PanelView::Loading | PanelView::Error(_) => 0,
        }
    }

    fn clamp_suggestion_focus(&self, focus: Focus) -> Focus {
        let Focus::Suggestions { column, index } = focus else {
            return focus;
        };
        let other = match column {
            SuggestionColumn::Exploit => SuggestionColumn::Explore,
            SuggestionColumn::Explore => SuggestionColumn::Exploit,
        };
        for col in [column, other] {
            let len = self.suggestion_len(col);
            if len > 0 {
                return Focus::Suggestions {
                    column: col,
                    index: index.min(len - 1),
                };
            }
        }
        Focus::Input
    }

    fn move_cursor(&mut self, d_row: isize, d_col: isize) {
        match self.focus {
            Focus::Grid { row, col } => {
                let rows = self.puzzle.guesses().len();
                let cols = self.puzzle.statuses().get(row).map_or(0, Vec::len);
                if rows == 0 || cols == 0 {
                    self.focus = Focus::Input;
                    return;
                }
                let row = row.saturating_add_signed(d_row).min(rows - 1);
                let cols = self.puzzle.statuses()[row].len();
                let col = col.saturating_add_signed(d_col).min(cols - 1);
                self.focus = Focus::Grid { row, col };
            }
            Focus::Suggestions { column, index } => {
                let column = match d_col {
                    d if d < 0 => SuggestionColumn::Exploit,
                    d if d > 0 => SuggestionColumn::Explore,
                    _ => column,
                };
                let index = index.saturating_add_signed(d_row);
                self.focus = self.clamp_suggestion_focus(Focus::Suggestions { column, index });
            }
            Focus::Input => {}
        }
    }

    /// Dispatch one key press
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        // Global keys
        match key.code {
            KeyCode::Char('c' | 'q') if ctrl => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('r') if ctrl => {
                self.reset_board(now);
                self.add_message("Board cleared", MessageStyle::Info);
                return;
            }
            KeyCode::F(2) => return self.cycle_word_length(now),
            KeyCode::F(3) => return self.cycle_dictionary(now),
            KeyCode::F(4) => return self.toggle_theme(),
            KeyCode::F(5) => return self.toggle_high_contrast(),
            KeyCode::F(1) | KeyCode::Char('?') => {
                self.show_help = !self.show_help;
                return;
            }
            KeyCode::Tab => return self.cycle_focus(),
            KeyCode::Esc => {
                if self.show_help {
                    self.show_help = false;
                } else {
                    self.focus = Focus::Input;
                }
                return;
            }
            _ => {}
        }

        match self.focus {
            Focus::Input => match key.code {
                KeyCode::Char(c) if !ctrl && c.is_alphabetic() => self.type_char(c),
                KeyCode::Backspace => self.backspace(),
                KeyCode::Enter => self.submit(now),
                _ => {}
            },
            Focus::Grid { .. } => match key.code {
                KeyCode::Up => self.move_cursor(-1, 0),
                KeyCode::Down => self.move_cursor(1, 0),
                KeyCode::Left => self.move_cursor(0, -1),
                KeyCode::Right => self.move_cursor(0, 1),
                KeyCode::Char(' ') | KeyCode::Enter => self.toggle_selected(now),
                KeyCode::Backspace | KeyCode::Delete => self.delete_selected_row(now),
                _ => {}
            },
            Focus::Suggestions { .. } => match key.code {
                KeyCode::Up => self.move_cursor(-1, 0),
                KeyCode::Down => self.move_cursor(1, 0),
                KeyCode::Left => self.move_cursor(0, -1),
                KeyCode::Right => self.move_cursor(0, 1),
                KeyCode::Enter => self.accept_selected_suggestion(now),
                _ => {}
            },
        }
    }

    /// Status of the cell under the grid cursor, for the status bar
    #[must_use]
    pub fn selected_status(&self) -> Option<CharStatus> {
        let Focus::Grid { row, col } = self.focus else {
            return None;
        };
        self.puzzle.statuses().get(row)?.get(col).copied()
    }
}

/// Run the TUI application
///
/// Suggestion requests run on `runtime`; their results are applied on this
/// thread, so all state changes stay serialized through the event loop.
///
/// # Errors
///
/// Returns an error if terminal setup/cleanup fails or if there's an I/O error
/// during rendering or event handling.
pub fn run_tui<S: Suggester>(app: App, suggester: Arc<S>, runtime: &Handle) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let res = run_app(&mut terminal, app, &suggester, runtime);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {err}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend, S: Suggester>(
    terminal: &mut Terminal<B>,
    mut app: App,
    suggester: &Arc<S>,
    runtime: &Handle,
) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<SuggestionOutcome>();
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| super::rendering::ui(f, &app))?;

        let timeout = TICK_INTERVAL.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)?
            && let Event::Key(key) = event::read()?
            // Only process key press events (fixes Windows double-input bug)
            && key.kind == KeyEventKind::Press
        {
            app.handle_key(key, Instant::now());
        }

        while let Ok(outcome) = rx.try_recv() {
            app.on_suggestion(outcome);
        }

        if last_tick.elapsed() >= TICK_INTERVAL {
            last_tick = Instant::now();
            if let Some(request) = app.on_tick(last_tick) {
                let suggester = Arc::clone(suggester);
                let tx = tx.clone();
                runtime.spawn(async move {
                    let outcome = suggester.suggest(request).await;
                    // The receiver is gone only when the app is shutting down
                    let _ = tx.send(outcome);
                });
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
