use crate::models::QueryInput;

use super::SubmissionId;

/// Work the host must perform on behalf of the reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Encode `input` and send it to the endpoint, then report back with `id`.
    Submit { id: SubmissionId, input: QueryInput },
}
