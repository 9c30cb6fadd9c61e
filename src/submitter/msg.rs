use crate::models::{AnswerResult, ImageAttachment};

use super::SubmissionId;

/// Inputs to the submitter state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the question text.
    QuestionChanged(String),
    /// User picked or cleared the image.
    ImageChanged(Option<ImageAttachment>),
    /// User clicked a sample question.
    SampleSelected(String),
    /// User pressed Ask.
    SubmitRequested,
    /// The pipeline for submission `id` resolved.
    SubmissionFinished {
        id: SubmissionId,
        outcome: SubmissionOutcome,
    },
}

/// Terminal result of one encode-then-send pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// The endpoint returned an answer.
    Answered(AnswerResult),
    /// Encoding, transport, or the endpoint failed; carries the user-facing message.
    Failed(String),
}
