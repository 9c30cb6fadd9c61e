use super::{Effect, Msg, Phase, SubmissionOutcome, SubmitterState};

/// Pure update function: applies a message to state and returns any effects.
///
/// A submit is ignored while another submission is in flight, and a
/// completion whose id does not match the in-flight submission is discarded.
pub fn update(mut state: SubmitterState, msg: Msg) -> (SubmitterState, Vec<Effect>) {
    let effects = match msg {
        Msg::QuestionChanged(question) | Msg::SampleSelected(question) => {
            state.set_question(question);
            Vec::new()
        }
        Msg::ImageChanged(image) => {
            state.set_image(image);
            Vec::new()
        }
        Msg::SubmitRequested => {
            if state.phase() == Phase::Submitting {
                log::info!("submit ignored: submission {:?} still in flight", state.in_flight());
                return (state, Vec::new());
            }
            if !state.input().has_question() {
                log::debug!("submit ignored: question is empty");
                return (state, Vec::new());
            }

            let id = state.begin_submission();
            log::info!(
                "submission {id} started (question: {} chars, image: {})",
                state.input().question().chars().count(),
                state.input().image().is_some()
            );
            vec![Effect::Submit {
                id,
                input: state.input().clone(),
            }]
        }
        Msg::SubmissionFinished { id, outcome } => {
            if state.in_flight() != Some(id) {
                log::warn!("discarding stale completion for submission {id}");
                return (state, Vec::new());
            }
            match outcome {
                SubmissionOutcome::Answered(answer) => {
                    log::info!("submission {id} answered ({} links)", answer.links().len());
                    state.finish_answered(answer);
                }
                SubmissionOutcome::Failed(message) => {
                    log::info!("submission {id} failed: {message}");
                    state.finish_failed(message);
                }
            }
            Vec::new()
        }
    };

    (state, effects)
}
