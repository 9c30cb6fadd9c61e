use std::fmt;

use crate::models::{AnswerResult, ImageAttachment, QueryInput};

/// Identifier of one submission cycle.
///
/// Ids increase monotonically per submitter, so a completion can be matched
/// to the request that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubmissionId(u64);

impl SubmissionId {
    /// Creates a new submission ID.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying ID value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where the submitter is in its request lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing has been submitted yet.
    Idle,
    /// A request is in flight.
    Submitting,
    /// The last request returned an answer.
    Answered,
    /// The last request failed.
    Failed,
}

impl Phase {
    /// Returns true for `Answered` and `Failed`.
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Answered | Phase::Failed)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Submitting => write!(f, "submitting"),
            Self::Answered => write!(f, "answered"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Form state owned by the query submitter.
///
/// Invariants, maintained by [`super::update`]:
/// - while `Submitting`, both `answer` and `error` are `None` and `in_flight` is set;
/// - `Answered` implies `answer` is set and `error` is not;
/// - `Failed` implies `error` is set and `answer` is not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitterState {
    input: QueryInput,
    phase: Phase,
    answer: Option<AnswerResult>,
    error: Option<String>,
    in_flight: Option<SubmissionId>,
    next_id: u64,
}

impl SubmitterState {
    /// Creates an idle submitter with an empty form.
    pub fn new() -> Self {
        Self {
            input: QueryInput::default(),
            phase: Phase::Idle,
            answer: None,
            error: None,
            in_flight: None,
            next_id: 1,
        }
    }

    /// Returns the current form input.
    pub fn input(&self) -> &QueryInput {
        &self.input
    }

    /// Returns the lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns true while a request is in flight.
    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Submitting
    }

    /// Returns the last answer, if the last request succeeded.
    pub fn answer(&self) -> Option<&AnswerResult> {
        self.answer.as_ref()
    }

    /// Returns the last error message, if the last request failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Returns the id of the in-flight submission.
    pub fn in_flight(&self) -> Option<SubmissionId> {
        self.in_flight
    }

    pub(super) fn set_question(&mut self, question: String) {
        self.input.set_question(question);
    }

    pub(super) fn set_image(&mut self, image: Option<ImageAttachment>) {
        self.input.set_image(image);
    }

    /// Clears the previous result and enters `Submitting`.
    pub(super) fn begin_submission(&mut self) -> SubmissionId {
        let id = SubmissionId::new(self.next_id);
        self.next_id += 1;
        self.answer = None;
        self.error = None;
        self.phase = Phase::Submitting;
        self.in_flight = Some(id);
        id
    }

    pub(super) fn finish_answered(&mut self, answer: AnswerResult) {
        self.answer = Some(answer);
        self.error = None;
        self.phase = Phase::Answered;
        self.in_flight = None;
    }

    pub(super) fn finish_failed(&mut self, message: String) {
        self.answer = None;
        self.error = Some(message);
        self.phase = Phase::Failed;
        self.in_flight = None;
    }
}

impl Default for SubmitterState {
    fn default() -> Self {
        Self::new()
    }
}
