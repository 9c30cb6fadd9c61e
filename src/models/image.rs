use std::path::{Path, PathBuf};

use crate::encoding::{self, EncodeError};

/// Where the bytes of an attached image come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// A file on disk, read when the payload is encoded.
    Path(PathBuf),
    /// Raw image bytes already in memory.
    Bytes(Vec<u8>),
    /// A `data:` URL whose base64 body is sent as-is.
    DataUrl(String),
}

/// An optional image selected alongside the question.
///
/// Only `image/*` MIME types are accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAttachment {
    name: String,
    mime: String,
    source: ImageSource,
}

impl ImageAttachment {
    /// Attaches an image file by path.
    ///
    /// The file must exist and have a recognised image extension. Its contents
    /// are not read until the payload is encoded.
    ///
    /// # Errors
    ///
    /// Returns `EncodeError::Io` if the file cannot be found, or
    /// `EncodeError::UnsupportedType` if the extension is not an image type.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, EncodeError> {
        let path = path.as_ref();
        let metadata = std::fs::metadata(path).map_err(|source| EncodeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if !metadata.is_file() {
            return Err(EncodeError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a file"),
            });
        }

        let mime = encoding::guess_image_mime(path)
            .ok_or_else(|| EncodeError::UnsupportedType(path.display().to_string()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self {
            name,
            mime: mime.to_string(),
            source: ImageSource::Path(path.to_path_buf()),
        })
    }

    /// Attaches in-memory image bytes.
    ///
    /// # Errors
    ///
    /// Returns `EncodeError::UnsupportedType` if `mime` is not an `image/*` type.
    pub fn from_bytes(
        name: impl Into<String>,
        mime: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Result<Self, EncodeError> {
        let mime = mime.into();
        if !encoding::is_image_mime(&mime) {
            return Err(EncodeError::UnsupportedType(mime));
        }
        Ok(Self {
            name: name.into(),
            mime,
            source: ImageSource::Bytes(bytes),
        })
    }

    /// Attaches an image given as a `data:image/...;base64,...` URL.
    ///
    /// # Errors
    ///
    /// Returns `EncodeError::UnsupportedType` if the URL is malformed or does
    /// not carry an image type, or `EncodeError::NotBase64` if the body is not
    /// base64-encoded.
    pub fn from_data_url(url: impl Into<String>) -> Result<Self, EncodeError> {
        let url = url.into();
        let mime = encoding::data_url_mime(&url)
            .filter(|mime| encoding::is_image_mime(mime))
            .ok_or_else(|| EncodeError::UnsupportedType(truncate_for_message(&url)))?
            .to_string();
        if !encoding::is_base64_data_url(&url) {
            return Err(EncodeError::NotBase64(truncate_for_message(&url)));
        }
        Ok(Self {
            name: "pasted image".to_string(),
            mime,
            source: ImageSource::DataUrl(url),
        })
    }

    /// Attaches an image from user-typed text.
    ///
    /// Text starting with `data:` is treated as a data URL, anything else as
    /// a file path.
    ///
    /// # Errors
    ///
    /// Returns the error of the matching constructor.
    pub fn from_input(input: &str) -> Result<Self, EncodeError> {
        let input = input.trim();
        if input.starts_with("data:") {
            Self::from_data_url(input)
        } else {
            Self::from_path(input)
        }
    }

    /// Returns the display name (file name for path attachments).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the MIME type.
    pub fn mime(&self) -> &str {
        &self.mime
    }

    /// Returns where the image bytes come from.
    pub fn source(&self) -> &ImageSource {
        &self.source
    }
}

fn truncate_for_message(url: &str) -> String {
    match url.char_indices().nth(32) {
        Some((idx, _)) => format!("{}...", &url[..idx]),
        None => url.to_string(),
    }
}
