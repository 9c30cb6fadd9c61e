//! Image encoding for request payloads.
//!
//! Turns an attached image into the bare base64 string the endpoint expects:
//! file and byte sources are base64-encoded, `data:` URLs have their prefix
//! stripped.

use std::path::{Path, PathBuf};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use thiserror::Error;

use crate::models::{ImageAttachment, ImageSource};

/// Errors that can occur while preparing an image for upload.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The image file could not be read.
    #[error("Failed to read image {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file or data URL is not an image type.
    #[error("Unsupported image type: {0}")]
    UnsupportedType(String),

    /// The data URL body is not marked as base64.
    #[error("Image data URL must be base64-encoded: {0}")]
    NotBase64(String),
}

/// Guesses an image MIME type from a file extension.
///
/// Returns `None` for extensions that are not images.
pub fn guess_image_mime(path: &Path) -> Option<&'static str> {
    let ext = path
        .extension()
        .and_then(|value| value.to_str())
        .map(|value| value.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "bmp" => Some("image/bmp"),
        "svg" => Some("image/svg+xml"),
        "heic" | "heif" => Some("image/heic"),
        _ => None,
    }
}

/// Returns true for `image/*` MIME types.
pub fn is_image_mime(mime: &str) -> bool {
    mime.strip_prefix("image/")
        .is_some_and(|subtype| !subtype.is_empty())
}

/// Extracts the MIME type from a `data:<mime>[;base64],<body>` URL.
pub fn data_url_mime(url: &str) -> Option<&str> {
    let rest = url.strip_prefix("data:")?;
    let header = &rest[..rest.find(',')?];
    let mime = header.split(';').next().unwrap_or_default();
    (!mime.is_empty()).then_some(mime)
}

/// Returns true if a `data:` URL header carries the `;base64` marker.
pub fn is_base64_data_url(url: &str) -> bool {
    let Some(rest) = url.strip_prefix("data:") else {
        return false;
    };
    let Some(comma) = rest.find(',') else {
        return false;
    };
    rest[..comma]
        .split(';')
        .skip(1)
        .any(|param| param.trim().eq_ignore_ascii_case("base64"))
}

/// Builds a base64 `data:` URL for the given bytes.
pub fn to_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", BASE64.encode(bytes))
}

/// Removes a leading `data:...,` prefix, returning the encoded body.
///
/// Strings without a data-URI prefix are returned unchanged.
pub fn strip_data_uri_prefix(value: &str) -> &str {
    if value.starts_with("data:")
        && let Some(idx) = value.find(',')
    {
        return &value[idx + 1..];
    }
    value
}

/// Encodes an attached image to a bare base64 string.
///
/// # Errors
///
/// Returns `EncodeError::Io` if a path-backed image cannot be read.
pub fn encode_image(image: &ImageAttachment) -> Result<String, EncodeError> {
    match image.source() {
        ImageSource::Path(path) => {
            let bytes = std::fs::read(path).map_err(|source| EncodeError::Io {
                path: path.clone(),
                source,
            })?;
            log::debug!("encoded image {} ({} bytes)", image.name(), bytes.len());
            Ok(BASE64.encode(bytes))
        }
        ImageSource::Bytes(bytes) => Ok(BASE64.encode(bytes)),
        ImageSource::DataUrl(url) => Ok(strip_data_uri_prefix(url).to_string()),
    }
}
