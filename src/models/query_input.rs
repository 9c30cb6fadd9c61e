use super::ImageAttachment;

/// The question text and optional image entered by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryInput {
    question: String,
    image: Option<ImageAttachment>,
}

impl QueryInput {
    /// Creates an input with the given question and no image.
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            image: None,
        }
    }

    /// Sets the attached image.
    pub fn with_image(mut self, image: ImageAttachment) -> Self {
        self.image = Some(image);
        self
    }

    /// Returns the question text.
    pub fn question(&self) -> &str {
        &self.question
    }

    /// Returns the attached image, if any.
    pub fn image(&self) -> Option<&ImageAttachment> {
        self.image.as_ref()
    }

    /// Returns true if the question passes the required-field check.
    ///
    /// Any non-empty text passes, including whitespace.
    pub fn has_question(&self) -> bool {
        !self.question.is_empty()
    }

    /// Replaces the question text.
    pub fn set_question(&mut self, question: impl Into<String>) {
        self.question = question.into();
    }

    /// Replaces or clears the attached image.
    pub fn set_image(&mut self, image: Option<ImageAttachment>) {
        self.image = image;
    }
}
