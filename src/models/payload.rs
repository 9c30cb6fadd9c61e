use serde::Serialize;

use super::QueryInput;
use crate::encoding::{self, EncodeError};

/// Wire-ready request body for the question-answering endpoint.
///
/// `image` serializes as `null` when no image is attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncodedPayload {
    /// The question text.
    pub question: String,
    /// Base64 image data without any `data:` prefix.
    pub image: Option<String>,
}

impl EncodedPayload {
    /// Encodes a `QueryInput` into a payload.
    ///
    /// Reads and base64-encodes the attached image, if any. This completes
    /// before the payload is returned, so a caller never sends a request with
    /// a partially encoded image.
    ///
    /// # Errors
    ///
    /// Returns an `EncodeError` if the image cannot be read.
    pub fn encode(input: &QueryInput) -> Result<Self, EncodeError> {
        let image = input.image().map(encoding::encode_image).transpose()?;
        Ok(Self {
            question: input.question().to_string(),
            image,
        })
    }
}
