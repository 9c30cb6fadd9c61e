//! UI rendering functions for the TUI.
//!
//! Lays out the sample list, question form, status line, and answer panel
//! using ratatui widgets and layout management.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use super::app::{App, Focus};
use crate::models::AnswerResult;
use crate::submitter::SAMPLE_QUESTIONS;

const SPINNER_FRAMES: [&str; 4] = ["|", "/", "-", "\\"];

// One row per sample plus the borders.
const SAMPLE_LIST_HEIGHT: u16 = SAMPLE_QUESTIONS.len() as u16 + 2;

/// Main rendering function for the TUI.
///
/// # Arguments
///
/// * `frame` - The ratatui Frame to render into
/// * `app` - The application state containing the form, result, and focus
pub fn draw(frame: &mut Frame, app: &App) {
    let size = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(SAMPLE_LIST_HEIGHT), // Samples
            Constraint::Length(6), // Question
            Constraint::Length(3), // Image
            Constraint::Length(1), // Status line
            Constraint::Min(0), // Answer
            Constraint::Length(1), // Shortcut bar
        ])
        .split(size);

    render_title(frame, chunks[0]);
    render_samples(frame, app, chunks[1]);
    render_question_input(frame, app, chunks[2]);
    render_image_input(frame, app, chunks[3]);
    frame.render_widget(Paragraph::new(status_line(app)), chunks[4]);
    render_answer(frame, app, chunks[5]);
    render_shortcut_bar(frame, app, chunks[6]);
}

fn focus_border(is_focused: bool) -> Style {
    if is_focused {
        Style::default().fg(Color::Magenta)
    } else {
        Style::default()
    }
}

fn render_title(frame: &mut Frame, area: Rect) {
    let line = Line::from(vec![
        Span::styled(
            "Virtual TA",
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "  for IIT Madras BS Degree - TDS Course",
            Style::default().add_modifier(Modifier::ITALIC),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_samples(frame: &mut Frame, app: &App, area: Rect) {
    let is_focused = matches!(app.focus(), Focus::Samples);

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Sample Questions")
        .border_style(focus_border(is_focused));

    let items: Vec<ListItem> = SAMPLE_QUESTIONS
        .iter()
        .map(|q| ListItem::new(Line::from(*q)))
        .collect();

    let list = List::new(items).block(block).highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::REVERSED),
    );

    let mut list_state = ListState::default();
    if is_focused {
        list_state.select(Some(app.selected_sample()));
    }

    frame.render_stateful_widget(list, area, &mut list_state);
}

fn render_question_input(frame: &mut Frame, app: &App, area: Rect) {
    let is_focused = matches!(app.focus(), Focus::Question);

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Enter your question")
        .border_style(focus_border(is_focused));

    let mut content = app.state().input().question().to_string();
    if is_focused {
        content.push('█');
    }

    let paragraph = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_image_input(frame: &mut Frame, app: &App, area: Rect) {
    let is_focused = matches!(app.focus(), Focus::Image);

    let title = match app.state().input().image() {
        Some(image) => format!("Upload image (optional): {} [{}]", image.name(), image.mime()),
        None => "Upload image (optional)".to_string(),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(focus_border(is_focused));

    let mut content = app.image_input().to_string();
    if is_focused {
        content.push('█');
    }

    frame.render_widget(Paragraph::new(content).block(block), area);
}

/// Builds the single status line under the form.
///
/// Priority: loading indicator, then the error message, then a notice.
fn status_line(app: &App) -> Line<'static> {
    let state = app.state();
    if state.is_loading() {
        let frame = SPINNER_FRAMES[app.tick() % SPINNER_FRAMES.len()];
        return Line::from(Span::styled(
            format!("{frame} Processing your question..."),
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ));
    }
    if let Some(error) = state.error() {
        return Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
    }
    if let Some(notice) = app.notice() {
        return Line::from(Span::styled(
            notice.to_string(),
            Style::default().fg(Color::Yellow),
        ));
    }
    Line::default()
}

/// Builds the answer panel text: the answer, then references when present.
///
/// The reference at `selected` is highlighted.
fn answer_text(answer: &AnswerResult, selected: Option<usize>) -> Text<'_> {
    let mut text = Text::default();
    for line in answer.answer().lines() {
        text.lines.push(Line::from(line));
    }

    if answer.has_links() {
        text.lines.push(Line::from(""));
        text.lines.push(Line::from(Span::styled(
            "References:",
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for (index, link) in answer.links().iter().enumerate() {
            let mut line = Line::from(vec![
                Span::raw("  - "),
                Span::raw(link.label()),
                Span::raw(" "),
                Span::styled(
                    format!("<{}>", link.url),
                    Style::default()
                        .fg(Color::Magenta)
                        .add_modifier(Modifier::UNDERLINED),
                ),
            ]);
            if selected == Some(index) {
                line = line.style(Style::default().add_modifier(Modifier::REVERSED));
            }
            text.lines.push(line);
        }
    }

    text
}

fn render_answer(frame: &mut Frame, app: &App, area: Rect) {
    let is_focused = matches!(app.focus(), Focus::Answer);

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Answer")
        .border_style(focus_border(is_focused));

    let content = match app.state().answer() {
        Some(answer) => {
            let selected = if is_focused { app.selected_link() } else { None };
            answer_text(answer, selected)
        }
        None => Text::from(Span::styled(
            "Ask a question to see the answer here.",
            Style::default().fg(Color::DarkGray),
        )),
    };

    let paragraph = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.answer_scroll(), 0));

    frame.render_widget(paragraph, area);
}

/// Renders the shortcut bar at the bottom of the screen.
///
/// Format: `Key: action | Key: action` with keys highlighted.
fn render_shortcut_bar(frame: &mut Frame, app: &App, area: Rect) {
    let key_style = Style::default().fg(Color::Magenta);
    let sep_style = Style::default().fg(Color::DarkGray);

    let mut spans = vec![
        Span::styled("Ctrl+S", key_style),
        Span::raw(": ask"),
        Span::styled(" | ", sep_style),
        Span::styled("Tab", key_style),
        Span::raw(": next panel"),
        Span::styled(" | ", sep_style),
        Span::styled("Ctrl+C", key_style),
        Span::raw(": quit"),
    ];

    match app.focus() {
        Focus::Samples => {
            spans.push(Span::styled(" | ", sep_style));
            spans.push(Span::styled("j/k", key_style));
            spans.push(Span::raw(": choose"));
            spans.push(Span::styled(" | ", sep_style));
            spans.push(Span::styled("Enter", key_style));
            spans.push(Span::raw(": use sample"));
        }
        Focus::Image => {
            spans.push(Span::styled(" | ", sep_style));
            spans.push(Span::styled("Enter", key_style));
            spans.push(Span::raw(": attach (empty clears)"));
        }
        Focus::Answer => {
            spans.push(Span::styled(" | ", sep_style));
            spans.push(Span::styled("j/k", key_style));
            spans.push(Span::raw(": scroll"));
            spans.push(Span::styled(" | ", sep_style));
            spans.push(Span::styled("h/l", key_style));
            spans.push(Span::raw(": pick link"));
            spans.push(Span::styled(" | ", sep_style));
            spans.push(Span::styled("Enter", key_style));
            spans.push(Span::raw(": open link"));
        }
        Focus::Question => {}
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
