//! Opaque continuation cursor for the wish feed.
//!
//! A token is the URL-safe, unpadded base64 of the JSON form of a
//! [`PageKey`]. Callers must treat it as opaque; only [`PageToken::decode`]
//! may look inside.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use thiserror::Error;

use crate::infrastructure::PageKey;

/// Why a page token could not be decoded.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PageTokenError {
    #[error("nextToken is not valid base64: {0}")]
    InvalidEncoding(String),

    #[error("nextToken does not contain a page key: {0}")]
    InvalidPayload(String),

    #[error("nextToken has an empty wish id")]
    EmptyWishId,

    #[error("nextToken has a negative timestamp: {0}")]
    NegativeTimestamp(i64),
}

/// An encoded [`PageKey`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageToken(String);

impl PageToken {
    /// Encodes a page key.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if the key cannot be serialized.
    pub fn encode(key: &PageKey) -> Result<Self, serde_json::Error> {
        let json = serde_json::to_vec(key)?;
        Ok(Self(URL_SAFE_NO_PAD.encode(json)))
    }

    /// Decodes a token received from a caller.
    ///
    /// # Errors
    ///
    /// Returns `PageTokenError` if the token is not base64, does not hold a
    /// page key, or holds a key no listing could have produced.
    pub fn decode(token: &str) -> Result<PageKey, PageTokenError> {
        let bytes = URL_SAFE_NO_PAD
            .decode(token.trim())
            .map_err(|error| PageTokenError::InvalidEncoding(error.to_string()))?;

        let key: PageKey = serde_json::from_slice(&bytes)
            .map_err(|error| PageTokenError::InvalidPayload(error.to_string()))?;

        if key.wish_id.as_str().is_empty() {
            return Err(PageTokenError::EmptyWishId);
        }
        if key.created_at.as_millis() < 0 {
            return Err(PageTokenError::NegativeTimestamp(key.created_at.as_millis()));
        }

        Ok(key)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for PageToken {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(&self.0)
    }
}
