#![forbid(unsafe_code)]

//! Decoding the word-list response.
//!
//! The host performs the HTTP GET itself and hands the status code and body
//! over. A usable response is a 2xx status with a JSON array of strings;
//! anything else becomes a [`LoadError`] and the browser stays unpopulated.
//! There is no retry.

use std::fmt;

/// Why the word list could not be loaded.
#[derive(Debug)]
pub enum LoadError {
    /// The server answered with a non-2xx status.
    Status(u16),
    /// The request never produced a response (network error, CORS, abort).
    Transport(String),
    /// The body was not a JSON array of strings.
    Decode(serde_json::Error),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status(status) => write!(f, "word list request failed with HTTP {status}"),
            Self::Transport(reason) => write!(f, "word list request failed: {reason}"),
            Self::Decode(err) => write!(f, "word list is not a JSON array of strings: {err}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Decode(err) => Some(err),
            Self::Status(_) | Self::Transport(_) => None,
        }
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err)
    }
}

/// Whether `status` is in the 2xx range.
#[must_use]
pub const fn is_success(status: u16) -> bool {
    status >= 200 && status < 300
}

/// Decode a word-list response.
///
/// The words are returned in server order; the list is expected to be
/// sorted case-insensitively already.
pub fn decode_word_list(status: u16, body: &str) -> Result<Vec<String>, LoadError> {
    if !is_success(status) {
        return Err(LoadError::Status(status));
    }
    let words: Vec<String> = serde_json::from_str(body)?;
    Ok(words)
}
