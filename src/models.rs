mod answer;
mod image;
mod payload;
mod query_input;

pub use answer::{AnswerResult, Link};
pub use image::{ImageAttachment, ImageSource};
pub use payload::EncodedPayload;
pub use query_input::QueryInput;
