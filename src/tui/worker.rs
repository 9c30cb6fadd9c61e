//! Background execution of submission effects.
//!
//! Each `Effect::Submit` runs the encode-then-send pipeline on its own thread
//! and reports back as a `Msg::SubmissionFinished` over a channel that the
//! event loop drains. Worker threads never touch UI state.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use crate::qa::QaClientTrait;
use crate::submitter::{Effect, Msg, SubmissionOutcome, run_submission};

/// Runs submission effects off the UI thread.
pub struct SubmissionWorker {
    client: Arc<dyn QaClientTrait>,
    sender: Sender<Msg>,
    receiver: Receiver<Msg>,
}

impl SubmissionWorker {
    /// Creates a worker that sends requests through `client`.
    pub fn new(client: Arc<dyn QaClientTrait>) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            client,
            sender,
            receiver,
        }
    }

    /// Starts executing an effect in the background.
    ///
    /// If the thread cannot be spawned the submission fails immediately, so a
    /// completion message is still delivered.
    pub fn execute(&self, effect: Effect) {
        match effect {
            Effect::Submit { id, input } => {
                let client = Arc::clone(&self.client);
                let sender = self.sender.clone();
                let spawned = thread::Builder::new()
                    .name(format!("vta-submit-{id}"))
                    .spawn(move || {
                        let outcome = run_submission(client.as_ref(), &input);
                        // The receiver only disappears when the UI is shutting down.
                        let _ = sender.send(Msg::SubmissionFinished { id, outcome });
                    });

                if let Err(e) = spawned {
                    log::error!("failed to spawn submission thread: {e}");
                    let _ = self.sender.send(Msg::SubmissionFinished {
                        id,
                        outcome: SubmissionOutcome::Failed(e.to_string()),
                    });
                }
            }
        }
    }

    /// Returns every completion received so far without blocking.
    pub fn drain(&self) -> Vec<Msg> {
        self.receiver.try_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    use crate::models::{AnswerResult, EncodedPayload, QueryInput};
    use crate::qa::QaError;
    use crate::submitter::SubmissionId;

    struct EchoClient;

    impl QaClientTrait for EchoClient {
        fn ask(&self, payload: &EncodedPayload) -> Result<AnswerResult, QaError> {
            Ok(AnswerResult::new(payload.question.clone(), vec![]))
        }
    }

    fn wait_for_messages(worker: &SubmissionWorker) -> Vec<Msg> {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            let messages = worker.drain();
            if !messages.is_empty() || Instant::now() > deadline {
                return messages;
            }
            thread::sleep(Duration::from_millis(10));
        }
    }

    #[test]
    fn execute_reports_completion_with_matching_id() {
        let worker = SubmissionWorker::new(Arc::new(EchoClient));
        let id = SubmissionId::new(7);
        worker.execute(Effect::Submit {
            id,
            input: QueryInput::new("ping"),
        });

        let messages = wait_for_messages(&worker);
        assert_eq!(
            messages,
            vec![Msg::SubmissionFinished {
                id,
                outcome: SubmissionOutcome::Answered(AnswerResult::new("ping", vec![])),
            }]
        );
    }

    #[test]
    fn drain_is_empty_without_work() {
        let worker = SubmissionWorker::new(Arc::new(EchoClient));
        assert!(worker.drain().is_empty());
    }
}
