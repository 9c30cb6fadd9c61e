//! Keyboard event handling for the TUI.
//!
//! Maps crossterm keyboard events to application state changes.
//! Handles focus-shifting model where key behavior depends on current focus.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Focus};

/// Handles a keyboard event and updates the app state accordingly.
///
/// Returns `true` if the application should quit, `false` otherwise.
///
/// # Event Handling
///
/// - `Ctrl+C`: Quit application (from any focus state)
/// - `Ctrl+S`: Submit the question (from any focus state)
/// - `Tab` / `Shift+Tab`: Cycle focus between panels
/// - `Esc`: Return to question input focus
/// - When `Question` focused: characters, Enter for newline, Backspace
/// - When `Image` focused: characters, Enter to attach, Backspace
/// - When `Samples` focused: j/k navigation, Enter to use the sample
/// - When `Answer` focused: j/k scrolling, h/l to pick a reference link,
///   Enter to open it in the browser
///
/// # Examples
///
/// ```
/// use vta::tui::{App, event::handle_key_event};
/// use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
///
/// let mut app = App::new();
/// let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
/// let should_quit = handle_key_event(&mut app, key);
/// assert!(should_quit);
/// ```
pub fn handle_key_event(app: &mut App, key: KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => return true,
            KeyCode::Char('s') => {
                app.submit();
                return false;
            }
            _ => return false,
        }
    }

    // Global focus cycling with Tab / Shift+Tab (BackTab)
    if key.code == KeyCode::Tab {
        app.next_focus();
        return false;
    }
    if key.code == KeyCode::BackTab {
        app.prev_focus();
        return false;
    }

    if key.code == KeyCode::Esc {
        app.reset_focus();
        return false;
    }

    match app.focus() {
        Focus::Question => handle_question_input(app, key),
        Focus::Image => handle_image_input(app, key),
        Focus::Samples => handle_samples(app, key),
        Focus::Answer => handle_answer(app, key),
    }

    false
}

fn is_plain_char(key: &KeyEvent) -> bool {
    key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT
}

/// Handles keyboard input when the question input is focused.
fn handle_question_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char(c) if is_plain_char(&key) => app.push_question_char(c),
        KeyCode::Enter => app.push_question_char('\n'),
        KeyCode::Backspace => app.pop_question_char(),
        _ => {}
    }
}

/// Handles keyboard input when the image path input is focused.
fn handle_image_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char(c) if is_plain_char(&key) => app.push_image_char(c),
        KeyCode::Enter => app.attach_image(),
        KeyCode::Backspace => app.pop_image_char(),
        _ => {}
    }
}

/// Handles keyboard input when the sample list is focused.
///
/// Supports Vim-style navigation (j/k), arrows, and Enter to use a sample.
fn handle_samples(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.select_next_sample(),
        KeyCode::Char('k') | KeyCode::Up => app.select_previous_sample(),
        KeyCode::Enter => app.choose_sample(),
        _ => {}
    }
}

/// Handles keyboard input when the answer panel is focused.
fn handle_answer(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.scroll_answer_down(1),
        KeyCode::Char('k') | KeyCode::Up => app.scroll_answer_up(1),
        KeyCode::PageDown => app.scroll_answer_down(10),
        KeyCode::PageUp => app.scroll_answer_up(10),
        KeyCode::Char('l') | KeyCode::Right => app.select_next_link(),
        KeyCode::Char('h') | KeyCode::Left => app.select_previous_link(),
        KeyCode::Enter | KeyCode::Char('o') => app.open_selected_link(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AnswerResult, Link};
    use crate::submitter::{Effect, Phase, SAMPLE_QUESTIONS, SubmissionOutcome};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn ctrl_c_quits_from_any_focus() {
        let mut app = App::new();
        for _ in 0..4 {
            assert!(handle_key_event(&mut app, ctrl('c')));
            app.next_focus();
        }
    }

    #[test]
    fn plain_q_is_typed_not_quit() {
        let mut app = App::new();
        assert!(!handle_key_event(&mut app, key(KeyCode::Char('q'))));
        assert_eq!(app.state().input().question(), "q");
    }

    #[test]
    fn characters_and_newlines_edit_question() {
        let mut app = App::new();
        handle_key_event(&mut app, key(KeyCode::Char('h')));
        handle_key_event(&mut app, key(KeyCode::Enter));
        handle_key_event(&mut app, KeyEvent::new(KeyCode::Char('I'), KeyModifiers::SHIFT));
        assert_eq!(app.state().input().question(), "h\nI");

        handle_key_event(&mut app, key(KeyCode::Backspace));
        assert_eq!(app.state().input().question(), "h\n");
    }

    #[test]
    fn backspace_on_empty_question_is_safe() {
        let mut app = App::new();
        handle_key_event(&mut app, key(KeyCode::Backspace));
        handle_key_event(&mut app, key(KeyCode::Backspace));
        assert_eq!(app.state().input().question(), "");
    }

    #[test]
    fn ctrl_s_submits() {
        let mut app = App::new();
        handle_key_event(&mut app, key(KeyCode::Char('x')));
        assert!(!handle_key_event(&mut app, ctrl('s')));

        assert_eq!(app.state().phase(), Phase::Submitting);
        assert_eq!(app.take_effects().len(), 1);
    }

    #[test]
    fn repeated_ctrl_s_while_loading_sends_once() {
        let mut app = App::new();
        handle_key_event(&mut app, key(KeyCode::Char('x')));
        handle_key_event(&mut app, ctrl('s'));
        handle_key_event(&mut app, ctrl('s'));
        assert_eq!(app.take_effects().len(), 1);
    }

    #[test]
    fn tab_and_backtab_cycle_focus() {
        let mut app = App::new();
        handle_key_event(&mut app, key(KeyCode::Tab));
        assert_eq!(app.focus(), Focus::Image);
        handle_key_event(&mut app, KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT));
        assert_eq!(app.focus(), Focus::Question);
    }

    #[test]
    fn esc_returns_to_question() {
        let mut app = App::new();
        app.next_focus();
        app.next_focus();
        handle_key_event(&mut app, key(KeyCode::Esc));
        assert_eq!(app.focus(), Focus::Question);
    }

    #[test]
    fn enter_in_samples_selects_without_submitting() {
        let mut app = App::new();
        app.prev_focus();
        assert_eq!(app.focus(), Focus::Samples);

        handle_key_event(&mut app, key(KeyCode::Char('j')));
        handle_key_event(&mut app, key(KeyCode::Enter));

        assert_eq!(app.state().input().question(), SAMPLE_QUESTIONS[1]);
        assert_eq!(app.state().phase(), Phase::Idle);
        assert!(app.take_effects().is_empty());
    }

    #[test]
    fn jk_in_samples_does_not_type() {
        let mut app = App::new();
        app.prev_focus();
        handle_key_event(&mut app, key(KeyCode::Char('j')));
        handle_key_event(&mut app, key(KeyCode::Char('k')));
        assert_eq!(app.selected_sample(), 0);
        assert_eq!(app.state().input().question(), "");
    }

    #[test]
    fn jk_scrolls_answer_panel() {
        let mut app = App::new();
        app.prev_focus();
        app.prev_focus();
        assert_eq!(app.focus(), Focus::Answer);

        handle_key_event(&mut app, key(KeyCode::Char('j')));
        handle_key_event(&mut app, key(KeyCode::Char('j')));
        assert_eq!(app.answer_scroll(), 2);
        handle_key_event(&mut app, key(KeyCode::Char('k')));
        assert_eq!(app.answer_scroll(), 1);
    }

    #[test]
    fn enter_in_answer_opens_highlighted_link() {
        let mut app = App::new();
        handle_key_event(&mut app, key(KeyCode::Char('q')));
        handle_key_event(&mut app, ctrl('s'));
        let Effect::Submit { id, .. } = app.take_effects().remove(0);
        app.finish_submission(
            id,
            SubmissionOutcome::Answered(AnswerResult::new(
                "X",
                vec![
                    Link::new("Thread", "https://example.com/t/1"),
                    Link::new("Docs", "https://example.com/docs"),
                ],
            )),
        );

        app.prev_focus();
        app.prev_focus();
        assert_eq!(app.focus(), Focus::Answer);

        handle_key_event(&mut app, key(KeyCode::Enter));
        assert!(app.take_link_requests().is_empty());

        handle_key_event(&mut app, key(KeyCode::Char('l')));
        handle_key_event(&mut app, key(KeyCode::Char('l')));
        assert_eq!(app.selected_link(), Some(1));
        handle_key_event(&mut app, key(KeyCode::Enter));
        assert_eq!(
            app.take_link_requests(),
            vec!["https://example.com/docs".to_string()]
        );

        handle_key_event(&mut app, key(KeyCode::Char('h')));
        handle_key_event(&mut app, key(KeyCode::Char('o')));
        assert_eq!(
            app.take_link_requests(),
            vec!["https://example.com/t/1".to_string()]
        );
    }

    #[test]
    fn image_input_accepts_path_characters() {
        let mut app = App::new();
        app.next_focus();
        for c in "/tmp/a.png".chars() {
            handle_key_event(&mut app, key(KeyCode::Char(c)));
        }
        assert_eq!(app.image_input(), "/tmp/a.png");
        handle_key_event(&mut app, key(KeyCode::Backspace));
        assert_eq!(app.image_input(), "/tmp/a.pn");
        assert_eq!(app.state().input().question(), "");
    }
}
