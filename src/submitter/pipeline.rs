use crate::models::{EncodedPayload, QueryInput};
use crate::qa::{FALLBACK_ERROR_MESSAGE, QaClientTrait};

use super::SubmissionOutcome;

/// Runs one submission: encode the input, then send it.
///
/// Encoding fully completes before the request is issued. Every failure is
/// converted to a user-facing message, so this always yields exactly one
/// outcome.
pub fn run_submission(client: &dyn QaClientTrait, input: &QueryInput) -> SubmissionOutcome {
    let payload = match EncodedPayload::encode(input) {
        Ok(payload) => payload,
        Err(e) => {
            log::warn!("image encoding failed: {e}");
            return SubmissionOutcome::Failed(message_or_fallback(e.to_string()));
        }
    };

    match client.ask(&payload) {
        Ok(answer) => SubmissionOutcome::Answered(answer),
        Err(e) => SubmissionOutcome::Failed(e.user_message()),
    }
}

fn message_or_fallback(message: String) -> String {
    if message.trim().is_empty() {
        FALLBACK_ERROR_MESSAGE.to_string()
    } else {
        message
    }
}
