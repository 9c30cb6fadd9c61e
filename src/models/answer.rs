use serde::{Deserialize, Deserializer, Serialize};

/// A reference link returned alongside an answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Display text for the link, possibly empty.
    #[serde(default)]
    pub text: String,
    /// Target URL.
    pub url: String,
}

impl Link {
    /// Creates a new link.
    pub fn new(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            url: url.into(),
        }
    }

    /// Returns the text to show for this link, falling back to the URL.
    pub fn label(&self) -> &str {
        if self.text.trim().is_empty() {
            &self.url
        } else {
            &self.text
        }
    }
}

/// Successful response from the question-answering endpoint.
///
/// `links` is optional on the wire and deserializes as empty when absent or null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerResult {
    /// The answer text, shown as plain text.
    pub answer: String,
    /// Ordered reference links, possibly empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub links: Vec<Link>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Link>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Link>>::deserialize(deserializer)?.unwrap_or_default())
}

impl AnswerResult {
    /// Creates a new answer with the given links.
    pub fn new(answer: impl Into<String>, links: Vec<Link>) -> Self {
        Self {
            answer: answer.into(),
            links,
        }
    }

    /// Returns the answer text.
    pub fn answer(&self) -> &str {
        &self.answer
    }

    /// Returns the reference links.
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Returns true if the references section should be shown.
    pub fn has_links(&self) -> bool {
        !self.links.is_empty()
    }
}
