use crate::models::ImageAttachment;
use crate::submitter::{
    Effect, Msg, SAMPLE_QUESTIONS, SubmissionId, SubmissionOutcome, SubmitterState, update,
};

/// Application state for the TUI.
///
/// Wraps the submitter state with the purely presentational bits: focus,
/// the image path being typed, sample selection, and answer scrolling.
#[derive(Debug, Clone)]
pub struct App {
    /// Form and request state, changed only through `update`
    state: SubmitterState,
    /// Currently focused panel
    focus: Focus,
    /// Image path (or data URL) input buffer
    image_input: String,
    /// Problem with the last attach or open attempt, if any
    notice: Option<String>,
    /// Highlighted row in the sample list
    selected_sample: usize,
    /// Scroll offset for the answer panel
    answer_scroll: u16,
    /// Highlighted reference link in the answer panel
    selected_link: Option<usize>,
    /// URLs the user asked to open that the event loop has not opened yet
    pending_links: Vec<String>,
    /// Effects produced by `update` that the event loop has not run yet
    pending_effects: Vec<Effect>,
    /// Frame counter for the loading spinner
    tick: usize,
}

/// Panel focus state for keyboard navigation.
///
/// Determines which panel receives keyboard input and how keys are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Sample question list (j/k navigation, Enter to use)
    Samples,
    /// Multi-line question input
    Question,
    /// Image path input (Enter to attach)
    Image,
    /// Answer panel (j/k scrolling)
    Answer,
}

impl App {
    /// Creates a new App with an empty form.
    ///
    /// Default focus is `Question`.
    ///
    /// # Examples
    ///
    /// ```
    /// use vta::tui::{App, Focus};
    ///
    /// let app = App::new();
    /// assert_eq!(app.focus(), Focus::Question);
    /// assert!(!app.state().is_loading());
    /// ```
    pub fn new() -> Self {
        Self {
            state: SubmitterState::new(),
            focus: Focus::Question,
            image_input: String::new(),
            notice: None,
            selected_sample: 0,
            answer_scroll: 0,
            selected_link: None,
            pending_links: Vec::new(),
            pending_effects: Vec::new(),
            tick: 0,
        }
    }

    /// Returns the submitter state.
    pub fn state(&self) -> &SubmitterState {
        &self.state
    }

    /// Returns the current focus state.
    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Returns the image path input buffer.
    pub fn image_input(&self) -> &str {
        &self.image_input
    }

    /// Returns the message from the last failed attach or open attempt.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Returns the highlighted sample index.
    pub fn selected_sample(&self) -> usize {
        self.selected_sample
    }

    /// Returns the answer panel scroll offset.
    pub fn answer_scroll(&self) -> u16 {
        self.answer_scroll
    }

    /// Returns the highlighted reference link index.
    pub fn selected_link(&self) -> Option<usize> {
        self.selected_link
    }

    /// Shows a notice on the status line.
    pub fn set_notice(&mut self, notice: impl Into<String>) {
        self.notice = Some(notice.into());
    }

    /// Returns the spinner frame counter.
    pub fn tick(&self) -> usize {
        self.tick
    }

    /// Advances the spinner frame counter.
    pub fn on_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    /// Runs a message through the submitter reducer and queues its effects.
    pub fn dispatch(&mut self, msg: Msg) {
        let starts_submission = matches!(msg, Msg::SubmitRequested);
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;

        if starts_submission && !effects.is_empty() {
            self.answer_scroll = 0;
            self.selected_link = None;
        }
        self.pending_effects.extend(effects);
    }

    /// Removes and returns the queued effects.
    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.pending_effects)
    }

    /// Requests a submission of the current form (Ask).
    pub fn submit(&mut self) {
        self.dispatch(Msg::SubmitRequested);
    }

    /// Applies the outcome of a finished submission.
    pub fn finish_submission(&mut self, id: SubmissionId, outcome: SubmissionOutcome) {
        self.dispatch(Msg::SubmissionFinished { id, outcome });
    }

    /// Appends a character to the question.
    pub fn push_question_char(&mut self, c: char) {
        let mut question = self.state.input().question().to_string();
        question.push(c);
        self.dispatch(Msg::QuestionChanged(question));
    }

    /// Removes the last character of the question.
    pub fn pop_question_char(&mut self) {
        let mut question = self.state.input().question().to_string();
        if question.pop().is_some() {
            self.dispatch(Msg::QuestionChanged(question));
        }
    }

    /// Appends a character to the image path buffer.
    pub fn push_image_char(&mut self, c: char) {
        self.image_input.push(c);
    }

    /// Removes the last character of the image path buffer.
    pub fn pop_image_char(&mut self) {
        self.image_input.pop();
    }

    /// Attaches the image named by the image input buffer.
    ///
    /// An empty buffer detaches the current image. Input starting with
    /// `data:` is treated as a data URL, anything else as a file path. On
    /// failure the current image is kept and a notice is shown.
    pub fn attach_image(&mut self) {
        let input = self.image_input.trim();
        if input.is_empty() {
            self.notice = None;
            self.dispatch(Msg::ImageChanged(None));
            return;
        }

        match ImageAttachment::from_input(input) {
            Ok(image) => {
                log::info!("attached image {} ({})", image.name(), image.mime());
                self.notice = None;
                self.dispatch(Msg::ImageChanged(Some(image)));
            }
            Err(e) => {
                log::warn!("could not attach image: {e}");
                self.notice = Some(e.to_string());
            }
        }
    }

    /// Moves the sample highlight down, wrapping to the top.
    pub fn select_next_sample(&mut self) {
        self.selected_sample = (self.selected_sample + 1) % SAMPLE_QUESTIONS.len();
    }

    /// Moves the sample highlight up, wrapping to the bottom.
    pub fn select_previous_sample(&mut self) {
        self.selected_sample = match self.selected_sample {
            0 => SAMPLE_QUESTIONS.len() - 1,
            i => i - 1,
        };
    }

    /// Copies the highlighted sample into the question and focuses it.
    ///
    /// Does not submit.
    pub fn choose_sample(&mut self) {
        let sample = SAMPLE_QUESTIONS[self.selected_sample];
        self.dispatch(Msg::SampleSelected(sample.to_string()));
        self.focus = Focus::Question;
    }

    /// Cycles focus to the next panel in Tab order.
    ///
    /// Order: `Samples` -> `Question` -> `Image` -> `Answer` -> `Samples`
    pub fn next_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Samples => Focus::Question,
            Focus::Question => Focus::Image,
            Focus::Image => Focus::Answer,
            Focus::Answer => Focus::Samples,
        };
    }

    /// Cycles focus to the previous panel in reverse Tab order.
    pub fn prev_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Samples => Focus::Answer,
            Focus::Question => Focus::Samples,
            Focus::Image => Focus::Question,
            Focus::Answer => Focus::Image,
        };
    }

    /// Returns focus to the question input (Esc key behavior).
    pub fn reset_focus(&mut self) {
        self.focus = Focus::Question;
    }

    /// Scrolls the answer panel down by the specified amount.
    pub fn scroll_answer_down(&mut self, amount: u16) {
        self.answer_scroll = self.answer_scroll.saturating_add(amount);
    }

    /// Scrolls the answer panel up by the specified amount.
    pub fn scroll_answer_up(&mut self, amount: u16) {
        self.answer_scroll = self.answer_scroll.saturating_sub(amount);
    }

    fn link_count(&self) -> usize {
        self.state.answer().map_or(0, |answer| answer.links().len())
    }

    /// Highlights the next reference link, wrapping to the first.
    pub fn select_next_link(&mut self) {
        let count = self.link_count();
        if count == 0 {
            return;
        }
        self.selected_link = Some(match self.selected_link {
            Some(i) => (i + 1) % count,
            None => 0,
        });
    }

    /// Highlights the previous reference link, wrapping to the last.
    pub fn select_previous_link(&mut self) {
        let count = self.link_count();
        if count == 0 {
            return;
        }
        self.selected_link = Some(match self.selected_link {
            Some(0) | None => count - 1,
            Some(i) => i - 1,
        });
    }

    /// Queues the highlighted link to be opened in the browser.
    ///
    /// Does nothing when no link is highlighted.
    pub fn open_selected_link(&mut self) {
        let url = self
            .selected_link
            .and_then(|i| self.state.answer()?.links().get(i))
            .map(|link| link.url.clone());
        if let Some(url) = url {
            self.pending_links.push(url);
        }
    }

    /// Removes and returns the URLs waiting to be opened.
    pub fn take_link_requests(&mut self) -> Vec<String> {
        std::mem::take(&mut self.pending_links)
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AnswerResult, Link};
    use crate::submitter::Phase;

    fn type_question(app: &mut App, text: &str) {
        for c in text.chars() {
            app.push_question_char(c);
        }
    }

    #[test]
    fn app_initializes_with_default_state() {
        let app = App::new();
        assert_eq!(app.focus(), Focus::Question);
        assert_eq!(app.state().phase(), Phase::Idle);
        assert_eq!(app.image_input(), "");
        assert_eq!(app.selected_sample(), 0);
        assert!(app.notice().is_none());
    }

    #[test]
    fn typing_updates_question() {
        let mut app = App::new();
        type_question(&mut app, "hi");
        assert_eq!(app.state().input().question(), "hi");

        app.pop_question_char();
        assert_eq!(app.state().input().question(), "h");

        app.pop_question_char();
        app.pop_question_char();
        assert_eq!(app.state().input().question(), "");
    }

    #[test]
    fn submit_queues_one_effect() {
        let mut app = App::new();
        type_question(&mut app, "q");
        app.submit();

        assert!(app.state().is_loading());
        let effects = app.take_effects();
        assert_eq!(effects.len(), 1);
        assert!(app.take_effects().is_empty());
    }

    #[test]
    fn submit_with_empty_question_queues_nothing() {
        let mut app = App::new();
        app.submit();
        assert!(app.take_effects().is_empty());
        assert_eq!(app.state().phase(), Phase::Idle);
    }

    #[test]
    fn finish_submission_applies_outcome() {
        let mut app = App::new();
        type_question(&mut app, "q");
        app.submit();
        let Effect::Submit { id, .. } = app.take_effects().remove(0);

        app.finish_submission(id, SubmissionOutcome::Answered(AnswerResult::new("X", vec![])));
        assert_eq!(app.state().phase(), Phase::Answered);
        assert_eq!(app.state().answer().unwrap().answer(), "X");
    }

    #[test]
    fn new_submission_resets_answer_scroll() {
        let mut app = App::new();
        type_question(&mut app, "q");
        app.scroll_answer_down(5);
        app.submit();
        assert_eq!(app.answer_scroll(), 0);
    }

    #[test]
    fn samples_wrap_in_both_directions() {
        let mut app = App::new();
        app.select_previous_sample();
        assert_eq!(app.selected_sample(), SAMPLE_QUESTIONS.len() - 1);
        app.select_next_sample();
        assert_eq!(app.selected_sample(), 0);
        app.select_next_sample();
        assert_eq!(app.selected_sample(), 1);
    }

    #[test]
    fn choose_sample_fills_question_without_submitting() {
        let mut app = App::new();
        app.focus = Focus::Samples;
        app.select_next_sample();
        app.choose_sample();

        assert_eq!(app.state().input().question(), SAMPLE_QUESTIONS[1]);
        assert_eq!(app.focus(), Focus::Question);
        assert!(!app.state().is_loading());
        assert!(app.take_effects().is_empty());
    }

    #[test]
    fn attach_image_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("screenshot.png");
        std::fs::write(&path, b"png").unwrap();

        let mut app = App::new();
        for c in path.display().to_string().chars() {
            app.push_image_char(c);
        }
        app.attach_image();

        let image = app.state().input().image().expect("image should be attached");
        assert_eq!(image.name(), "screenshot.png");
        assert!(app.notice().is_none());
    }

    #[test]
    fn attach_image_failure_keeps_previous_image_and_sets_notice() {
        let mut app = App::new();
        for c in "data:image/png;base64,AAAA".chars() {
            app.push_image_char(c);
        }
        app.attach_image();
        assert!(app.state().input().image().is_some());

        app.image_input = "/no/such/file.png".to_string();
        app.attach_image();
        assert!(app.state().input().image().is_some());
        assert!(app.notice().unwrap().contains("/no/such/file.png"));
    }

    #[test]
    fn attach_with_empty_input_detaches() {
        let mut app = App::new();
        app.image_input = "data:image/png;base64,AAAA".to_string();
        app.attach_image();
        assert!(app.state().input().image().is_some());

        app.image_input.clear();
        app.attach_image();
        assert!(app.state().input().image().is_none());
    }

    #[test]
    fn focus_cycles_in_tab_order() {
        let mut app = App::new();
        app.next_focus();
        assert_eq!(app.focus(), Focus::Image);
        app.next_focus();
        assert_eq!(app.focus(), Focus::Answer);
        app.next_focus();
        assert_eq!(app.focus(), Focus::Samples);
        app.next_focus();
        assert_eq!(app.focus(), Focus::Question);
    }

    #[test]
    fn focus_cycles_in_reverse_tab_order() {
        let mut app = App::new();
        app.prev_focus();
        assert_eq!(app.focus(), Focus::Samples);
        app.prev_focus();
        assert_eq!(app.focus(), Focus::Answer);
        app.prev_focus();
        assert_eq!(app.focus(), Focus::Image);
        app.prev_focus();
        assert_eq!(app.focus(), Focus::Question);
    }

    fn answered_app(links: Vec<Link>) -> App {
        let mut app = App::new();
        type_question(&mut app, "q");
        app.submit();
        let Effect::Submit { id, .. } = app.take_effects().remove(0);
        app.finish_submission(id, SubmissionOutcome::Answered(AnswerResult::new("X", links)));
        app
    }

    #[test]
    fn link_selection_wraps_in_both_directions() {
        let mut app = answered_app(vec![
            Link::new("A", "https://a"),
            Link::new("B", "https://b"),
        ]);
        assert_eq!(app.selected_link(), None);

        app.select_next_link();
        assert_eq!(app.selected_link(), Some(0));
        app.select_next_link();
        assert_eq!(app.selected_link(), Some(1));
        app.select_next_link();
        assert_eq!(app.selected_link(), Some(0));
        app.select_previous_link();
        assert_eq!(app.selected_link(), Some(1));
    }

    #[test]
    fn link_selection_without_links_is_noop() {
        let mut app = answered_app(vec![]);
        app.select_next_link();
        app.open_selected_link();
        assert_eq!(app.selected_link(), None);
        assert!(app.take_link_requests().is_empty());
    }

    #[test]
    fn open_selected_link_queues_url_once() {
        let mut app = answered_app(vec![
            Link::new("A", "https://a"),
            Link::new("B", "https://b"),
        ]);
        app.open_selected_link();
        assert!(app.take_link_requests().is_empty());

        app.select_previous_link();
        app.open_selected_link();
        assert_eq!(app.take_link_requests(), vec!["https://b".to_string()]);
        assert!(app.take_link_requests().is_empty());
    }

    #[test]
    fn new_submission_clears_link_selection() {
        let mut app = answered_app(vec![Link::new("A", "https://a")]);
        app.select_next_link();
        app.submit();
        assert_eq!(app.selected_link(), None);
    }

    #[test]
    fn answer_scroll_saturates_at_zero() {
        let mut app = App::new();
        app.scroll_answer_down(2);
        app.scroll_answer_up(5);
        assert_eq!(app.answer_scroll(), 0);
    }
}
