//! The query submitter: explicit form state and its transition function.
//!
//! All state changes go through [`update`], a pure function from
//! `(SubmitterState, Msg)` to the next state plus any [`Effect`]s the host
//! must run. The host executes `Effect::Submit` with [`run_submission`] and
//! feeds the outcome back as `Msg::SubmissionFinished`.

mod effect;
mod msg;
mod pipeline;
mod samples;
mod state;
mod update;

pub use effect::Effect;
pub use msg::{Msg, SubmissionOutcome};
pub use pipeline::run_submission;
pub use samples::SAMPLE_QUESTIONS;
pub use state::{Phase, SubmissionId, SubmitterState};
pub use update::update;
