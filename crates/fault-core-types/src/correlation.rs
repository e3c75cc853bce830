//! Correlation identifiers for distributed tracing
//!
//! Both ids use the W3C trace-context encoding: lowercase hex, 16 bytes for a
//! trace and 8 bytes for a span. An all-zero id is never valid.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Length of a hex-encoded trace id
pub const TRACE_ID_HEX_LEN: usize = 32;

/// Length of a hex-encoded span id
pub const SPAN_ID_HEX_LEN: usize = 16;

/// Reasons a string is rejected as a trace or span id
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    #[error("expected {expected} hex characters, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("id contains characters outside [0-9a-f]")]
    InvalidHex,

    #[error("id must not be all zeros")]
    AllZero,
}

fn validate_hex(s: &str, expected: usize) -> Result<(), IdError> {
    if s.len() != expected {
        return Err(IdError::InvalidLength {
            expected,
            actual: s.len(),
        });
    }

    // hex::decode accepts upper case too; trace-context ids are lower case only.
    if !s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')) {
        return Err(IdError::InvalidHex);
    }

    let bytes = hex::decode(s).map_err(|_| IdError::InvalidHex)?;
    if bytes.iter().all(|b| *b == 0) {
        return Err(IdError::AllZero);
    }

    Ok(())
}

/// Trace identifier shared by every span of one distributed operation
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TraceId(String);

impl TraceId {
    /// Parse a 32-character lowercase hex trace id
    ///
    /// # Errors
    ///
    /// Returns an [`IdError`] if the input has the wrong length, contains
    /// non-hex characters, or is all zeros.
    pub fn from_hex(s: &str) -> Result<Self, IdError> {
        validate_hex(s, TRACE_ID_HEX_LEN)?;
        Ok(Self(s.to_string()))
    }

    /// Generate a new random TraceId
    pub fn generate() -> Self {
        Self(hex::encode(Uuid::new_v4().as_bytes()))
    }

    /// Get the hex representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TraceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TraceId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        validate_hex(&value, TRACE_ID_HEX_LEN)?;
        Ok(Self(value))
    }
}

impl From<TraceId> for String {
    fn from(id: TraceId) -> Self {
        id.0
    }
}

impl std::fmt::Display for TraceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Span identifier for one unit of work within a trace
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SpanId(String);

impl SpanId {
    /// Parse a 16-character lowercase hex span id
    ///
    /// # Errors
    ///
    /// Returns an [`IdError`] if the input has the wrong length, contains
    /// non-hex characters, or is all zeros.
    pub fn from_hex(s: &str) -> Result<Self, IdError> {
        validate_hex(s, SPAN_ID_HEX_LEN)?;
        Ok(Self(s.to_string()))
    }

    /// Generate a new random SpanId
    pub fn generate() -> Self {
        // The version nibble lives in byte 6, so the first half of a v4 uuid is never zero.
        Self(hex::encode(&Uuid::new_v4().as_bytes()[..8]))
    }

    /// Get the hex representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for SpanId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SpanId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        validate_hex(&value, SPAN_ID_HEX_LEN)?;
        Ok(Self(value))
    }
}

impl From<SpanId> for String {
    fn from(id: SpanId) -> Self {
        id.0
    }
}

impl std::fmt::Display for SpanId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
