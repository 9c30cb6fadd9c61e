pub mod encoding;
pub mod logging;
pub mod models;
pub mod qa;
pub mod submitter;
pub mod tui;
pub mod utils;

pub use encoding::EncodeError;
pub use models::{AnswerResult, EncodedPayload, ImageAttachment, Link, QueryInput};
pub use qa::{QaClient, QaClientBuilder, QaClientTrait, QaError};
pub use submitter::{Effect, Msg, Phase, SubmissionOutcome, SubmitterState, update};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_builder_accessible_from_crate_root() {
        let client = QaClientBuilder::new()
            .endpoint("http://localhost:9999/query")
            .build();
        assert!(client.is_ok());
    }

    #[test]
    fn types_accessible_from_crate_root() {
        let state = SubmitterState::new();
        assert_eq!(state.phase(), Phase::Idle);

        let (state, effects) = update(state, Msg::QuestionChanged("hi".to_string()));
        assert!(effects.is_empty());
        assert_eq!(state.input(), &QueryInput::new("hi"));

        let answer = AnswerResult::new("ok", vec![Link::new("a", "https://a")]);
        assert!(answer.has_links());
    }
}
