//! TUI rendering with ratatui
//!
//! Grid, suggestion lists and on-screen keyboard.

use super::app::{App, Focus, MessageStyle, SuggestionColumn};
use crate::catalog::{self, DICTIONARIES};
use crate::core::{CharStatus, KEY_ROWS, KeyStatuses, grapheme};
use crate::prefs::Theme;
use crate::suggest::{EXPLOIT_TITLE, EXPLORE_TITLE, PanelView, ScoredWord, format_score};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, Paragraph, Wrap},
};

/// Colours derived from theme and contrast preferences
#[derive(Debug, Clone, Copy)]
struct Palette {
    text: Color,
    background: Color,
    empty: Color,
    absent: Color,
    present: Color,
    correct: Color,
    accent: Color,
}

impl Palette {
    const fn new(theme: Theme, high_contrast: bool) -> Self {
        let (text, background, empty, absent) = match theme {
            Theme::Dark => (Color::White, Color::Black, Color::DarkGray, Color::Gray),
            Theme::Light => (Color::Black, Color::White, Color::Gray, Color::DarkGray),
        };
        let (present, correct) = if high_contrast {
            (Color::Cyan, Color::Rgb(249, 115, 22))
        } else {
            (Color::Yellow, Color::Green)
        };
        Self {
            text,
            background,
            empty,
            absent,
            present,
            correct,
            accent: Color::Cyan,
        }
    }

    const fn status(&self, status: CharStatus) -> Color {
        match status {
            CharStatus::Absent => self.absent,
            CharStatus::Present => self.present,
            CharStatus::Correct => self.correct,
        }
    }

    fn base(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }
}

/// Main UI rendering function
pub fn ui(f: &mut Frame, app: &App) {
    let palette = Palette::new(app.prefs.theme(), app.prefs.high_contrast());
    f.render_widget(Block::default().style(palette.base()), f.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Grid + suggestions
            Constraint::Length(5), // Keyboard
            Constraint::Length(4), // Messages
            Constraint::Length(1), // Status bar
        ])
        .split(f.area());

    render_header(f, &palette, chunks[0]);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    render_grid(f, app, &palette, main_chunks[0]);
    render_suggestions(f, app, &palette, main_chunks[1]);
    render_keyboard(f, app, &palette, chunks[2]);
    render_messages(f, app, &palette, chunks[3]);
    render_status(f, app, &palette, chunks[4]);

    if app.show_help {
        render_help(f, &palette);
    }
}

fn render_header(f: &mut Frame, palette: &Palette, area: Rect) {
    let header = Paragraph::new("WORDLE ASSISTANT")
        .style(
            palette
                .base()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(palette.base().fg(palette.accent)),
        );
    f.render_widget(header, area);
}

fn cell(letter: &str, bg: Color, fg: Color) -> Span<'static> {
    Span::styled(
        format!(" {letter} "),
        Style::default().fg(fg).bg(bg).add_modifier(Modifier::BOLD),
    )
}

fn render_grid(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let word_len = app.puzzle.word_len();
    let mut lines = Vec::with_capacity(app.puzzle.max_rows());

    for (row, (guess, marks)) in app.puzzle.rows().enumerate() {
        let mut spans = Vec::with_capacity(word_len * 2);
        for (col, (letter, &mark)) in grapheme::split(guess).into_iter().zip(marks).enumerate() {
            let mut span = cell(letter, palette.status(mark), Color::White);
            if app.focus == (Focus::Grid { row, col }) {
                span = span.patch_style(
                    Style::default().add_modifier(Modifier::REVERSED | Modifier::UNDERLINED),
                );
            }
            spans.push(span);
            spans.push(Span::raw(" "));
        }
        lines.push(Line::from(spans));
    }

    if app.puzzle.has_room() {
        let typed = grapheme::split(app.puzzle.current());
        let border = if app.is_shaking() {
            Color::Red
        } else {
            palette.text
        };
        let mut spans = Vec::with_capacity(word_len * 2);
        for i in 0..word_len {
            let letter = typed.get(i).copied().unwrap_or("·");
            spans.push(Span::styled(
                format!("[{letter}]"),
                Style::default().fg(border).add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::raw(" "));
        }
        lines.push(Line::from(spans));
    }

    let filled = app.puzzle.guesses().len() + usize::from(app.puzzle.has_room());
    for _ in filled..app.puzzle.max_rows() {
        let spans: Vec<Span> = (0..word_len)
            .flat_map(|_| [cell(" ", palette.empty, palette.text), Span::raw(" ")])
            .collect();
        lines.push(Line::from(spans));
    }

    let title = match app.selected_status() {
        Some(status) => format!(" Grid: {status} (Space: colour, Del: remove row) "),
        None => " Grid ".to_string(),
    };
    let grid = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .style(palette.base()),
    );
    f.render_widget(grid, area);
}

fn suggestion_items<'a>(
    words: &'a [ScoredWord],
    palette: &Palette,
    selected: Option<usize>,
) -> Vec<ListItem<'a>> {
    words
        .iter()
        .enumerate()
        .map(|(i, (score, word))| {
            let mut style = palette.base().fg(palette.correct);
            if selected == Some(i) {
                style = style.add_modifier(Modifier::REVERSED);
            }
            ListItem::new(Line::from(vec![
                Span::styled(format!("→ {:<10}", word.to_uppercase()), style),
                Span::styled(format_score(*score), palette.base().fg(palette.accent)),
            ]))
        })
        .collect()
}

fn render_suggestions(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let block = Block::default()
        .title(" Suggestions ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .style(palette.base());

    match app.panel.view() {
        PanelView::Loading => {
            let loading = Paragraph::new("Loading suggestions…")
                .alignment(Alignment::Center)
                .style(palette.base().fg(palette.accent))
                .block(block);
            f.render_widget(loading, area);
        }
        PanelView::Error(message) => {
            let error = Paragraph::new(message.to_string())
                .alignment(Alignment::Center)
                .style(palette.base().fg(Color::Red))
                .wrap(Wrap { trim: true })
                .block(block);
            f.render_widget(error, area);
        }
        PanelView::Lists(lists) => {
            let inner = block.inner(area);
            f.render_widget(block, area);

            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(inner);

            let selected = |column: SuggestionColumn| match app.focus {
                Focus::Suggestions { column: c, index } if c == column => Some(index),
                _ => None,
            };

            let exploit = List::new(suggestion_items(
                &lists.to_exploit,
                palette,
                selected(SuggestionColumn::Exploit),
            ))
            .block(Block::default().title(EXPLOIT_TITLE));
            let explore = List::new(suggestion_items(
                &lists.to_explore,
                palette,
                selected(SuggestionColumn::Explore),
            ))
            .block(Block::default().title(EXPLORE_TITLE));

            f.render_widget(exploit, columns[0]);
            f.render_widget(explore, columns[1]);
        }
    }
}

fn render_keyboard(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let keys: KeyStatuses = app.key_statuses();
    let mut lines: Vec<Line> = KEY_ROWS
        .iter()
        .map(|row| {
            let spans: Vec<Span> = row
                .chars()
                .flat_map(|c| {
                    let letter = c.to_string();
                    let (bg, fg) = keys
                        .get(&letter)
                        .map_or((palette.empty, palette.text), |s| {
                            (palette.status(s), Color::White)
                        });
                    [cell(&letter, bg, fg), Span::raw(" ")]
                })
                .collect();
            Line::from(spans)
        })
        .collect();
    lines.push(Line::from(Span::styled(
        "Enter: submit   Backspace: delete",
        palette.base().fg(Color::DarkGray),
    )));

    let keyboard = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(palette.base());
    f.render_widget(keyboard, area);
}

fn render_messages(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let messages: Vec<ListItem> = app
        .messages
        .iter()
        .rev()
        .take(2)
        .map(|msg| {
            let color = match msg.style {
                MessageStyle::Info => palette.text,
                MessageStyle::Success => Color::Green,
                MessageStyle::Error => Color::Red,
            };
            ListItem::new(msg.text.clone()).style(palette.base().fg(color))
        })
        .collect();

    let messages_list = List::new(messages).block(
        Block::default()
            .title(" Messages ")
            .borders(Borders::ALL)
            .style(palette.base()),
    );

    f.render_widget(messages_list, area);
}

fn render_status(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let dict = app.prefs.dictionary();
    let dict_name = catalog::display_name(DICTIONARIES, dict).unwrap_or(dict);
    let texts = [
        format!("Dictionary: {dict_name}"),
        format!("Length: {}", app.puzzle.word_len()),
        format!(
            "{} | Contrast: {}",
            match app.prefs.theme() {
                Theme::Dark => "Dark",
                Theme::Light => "Light",
            },
            if app.prefs.high_contrast() { "high" } else { "normal" }
        ),
        "?: Help | Ctrl-C: Quit".to_string(),
    ];

    for (text, chunk) in texts.into_iter().zip(chunks.iter()) {
        let para = Paragraph::new(text)
            .alignment(Alignment::Center)
            .style(palette.base().fg(Color::DarkGray));
        f.render_widget(para, *chunk);
    }
}

fn render_help(f: &mut Frame, palette: &Palette) {
    let area = centered(f.area(), 60, 16);
    let lines = vec![
        Line::from("Put the letters and colours from your puzzle here."),
        Line::from("Suggestions refresh a moment after every change."),
        Line::from(""),
        Line::from("Letters / Backspace / Enter   type and submit a guess"),
        Line::from("Tab                           grid → suggestions → typing"),
        Line::from("Arrows, Space                 move, cycle a letter's colour"),
        Line::from("Del (in grid)                 remove the selected row"),
        Line::from("Enter (in suggestions)        use the selected word"),
        Line::from("Ctrl-R                        clear the board"),
        Line::from("F2 / F3                       word length / dictionary"),
        Line::from("F4 / F5                       theme / high contrast"),
        Line::from("Esc                           close / back to typing"),
    ];
    let help = Paragraph::new(lines).style(palette.base()).block(
        Block::default()
            .title(" How to use ")
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .style(palette.base().fg(palette.accent)),
    );
    f.render_widget(Clear, area);
    f.render_widget(help, area);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interactive::App;
    use crate::prefs::{PreferenceStore, UiPreferences};
    use crate::suggest::scheduler::DEFAULT_QUIET_PERIOD;
    use crate::suggest::{SuggestionLists, SuggestionOutcome};
    use ratatui::{Terminal, backend::TestBackend};
    use std::time::Instant;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    /// Top-left cell of the first occurrence of `needle` (ASCII only)
    fn find(terminal: &Terminal<TestBackend>, needle: &str) -> Option<(u16, u16)> {
        let buffer = terminal.backend().buffer();
        let area = buffer.area;
        let width = needle.len() as u16;
        (area.top()..area.bottom()).find_map(|y| {
            (area.left()..area.right().saturating_sub(width.saturating_sub(1))).find_map(|x| {
                let hit = needle.chars().enumerate().all(|(i, c)| {
                    buffer
                        .cell((x + i as u16, y))
                        .is_some_and(|cell| cell.symbol() == c.to_string())
                });
                hit.then_some((x, y))
            })
        })
    }

    fn app_with(outcome: SuggestionOutcome) -> App {
        let t0 = Instant::now();
        let prefs = UiPreferences::load(PreferenceStore::in_memory());
        let mut app = App::new(prefs, DEFAULT_QUIET_PERIOD, 5, t0);
        app.on_tick(t0 + DEFAULT_QUIET_PERIOD);
        app.on_suggestion(outcome);
        app
    }

    #[test]
    fn renders_both_lists_with_scores() {
        let app = app_with(SuggestionOutcome::Ok(SuggestionLists {
            to_exploit: vec![(0.92, "WORLD".to_string())],
            to_explore: vec![(0.5, "AUDIO".to_string())],
        }));
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|f| ui(f, &app)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("0.92"));
        assert!(text.contains("0.5"));

        let (solve_x, solve_y) = find(&terminal, EXPLOIT_TITLE).unwrap();
        let (reduce_x, reduce_y) = find(&terminal, EXPLORE_TITLE).unwrap();
        let (world_x, world_y) = find(&terminal, "WORLD").unwrap();
        let (audio_x, audio_y) = find(&terminal, "AUDIO").unwrap();

        assert_eq!(solve_y, reduce_y);
        assert!(solve_x < reduce_x);
        assert!(world_y > solve_y && audio_y > reduce_y);
        // Each word sits in its own column
        assert!(world_x >= solve_x && world_x < reduce_x, "WORLD at {world_x}");
        assert!(audio_x >= reduce_x, "AUDIO at {audio_x}");
    }

    #[test]
    fn typing_row_is_visible_on_a_full_board_at_80x24() {
        let mut app = app_with(SuggestionOutcome::Ok(SuggestionLists::default()));
        for word in ["WEARY", "PILOT", "MOUND", "CHEST", "FLAKY"] {
            app.puzzle.accept_suggestion(word).unwrap();
        }
        for c in "bri".chars() {
            app.type_char(c);
        }

        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| ui(f, &app)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("[B]"));
        assert!(text.contains("[I]"));
        assert!(find(&terminal, " F  L  A  K  Y ").is_some());
    }

    #[test]
    fn grid_title_names_the_selected_mark() {
        let mut app = app_with(SuggestionOutcome::Ok(SuggestionLists::default()));
        app.puzzle.accept_suggestion("WEARY").unwrap();
        app.focus = Focus::Grid { row: 0, col: 0 };

        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|f| ui(f, &app)).unwrap();

        assert!(buffer_text(&terminal).contains("Grid: absent"));
    }

    #[test]
    fn error_replaces_lists() {
        let app = app_with(SuggestionOutcome::Err("rate limited".to_string()));
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|f| ui(f, &app)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("rate limited"));
        assert!(!text.contains(EXPLOIT_TITLE));
    }

    #[test]
    fn centered_fits_small_areas() {
        let area = Rect::new(0, 0, 20, 5);
        let inner = centered(area, 60, 16);
        assert_eq!(inner, area);
    }
}
