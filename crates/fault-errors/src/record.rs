//! The canonical error record

use crate::any::AnyError;
use crate::builder::FaultBuilder;
use crate::capability::{
    ErrorAssociated, ErrorAttributes, ErrorCauses, ErrorCode, ErrorDomain, ErrorExitStatus,
    ErrorHttpStatus, ErrorMessage, ErrorSpanId, ErrorTags, ErrorTime, ErrorTraceId,
    ErrorUserMessage, Inspect,
};
use crate::projection::{self, ProjectionOptions};
use chrono::{DateTime, Utc};
use fault_core_types::schema::domain;
use fault_core_types::{Attributes, SpanId, TraceId};
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeSet;

/// Placeholder message for records finalized without one
pub const EMPTY_MESSAGE: &str = "empty error message";

/// Code of a record (or chain) that never had one set
pub const CODE_UNSPECIFIED: &str = "ERR_UNKNOWN";

/// Exit status of a record that never had one set
pub const DEFAULT_EXIT_STATUS: i32 = 1;

/// HTTP status of a record that never had one set
pub const DEFAULT_HTTP_STATUS: u16 = 500;

/// Immutable, fully-faceted error record
///
/// Build one with [`FaultBuilder`] (or [`Fault::builder`]). Code, exit
/// status and HTTP status are only exposed as capabilities once they have
/// been set, so an unset one is resolved from the causes by the
/// [`facet`](crate::facet) functions. Every other capability is always
/// exposed and answered from the record alone. The accessors never resolve:
/// they report the record's own value or the default.
#[derive(Debug, Clone)]
pub struct Fault {
    pub(crate) time: DateTime<Utc>,
    pub(crate) message: String,
    pub(crate) user_message: Option<String>,
    pub(crate) domain: Option<String>,
    pub(crate) code: Option<String>,
    pub(crate) exit_status: Option<i32>,
    pub(crate) http_status: Option<u16>,
    pub(crate) causes: Vec<AnyError>,
    pub(crate) associated: Vec<AnyError>,
    pub(crate) tags: BTreeSet<String>,
    pub(crate) attributes: Attributes,
    pub(crate) trace_id: Option<TraceId>,
    pub(crate) span_id: Option<SpanId>,
}

impl Fault {
    /// Create a record with the given message and default facets
    ///
    /// # Panics
    ///
    /// Panics if `message` is empty. Use [`crate::msg`] to get the
    /// placeholder message instead.
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        assert!(!message.is_empty(), "fault message must not be empty");
        FaultBuilder::new().msg(message)
    }

    /// Start building a record
    pub fn builder() -> FaultBuilder {
        FaultBuilder::new()
    }

    /// Builder seeded with a copy of this record
    pub fn to_builder(&self) -> FaultBuilder {
        FaultBuilder::from(self.clone())
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// User-facing message, `None` when never set
    pub fn user_message(&self) -> Option<&str> {
        self.user_message.as_deref()
    }

    /// Code, or [`CODE_UNSPECIFIED`] when never set
    pub fn code(&self) -> &str {
        self.code.as_deref().unwrap_or(CODE_UNSPECIFIED)
    }

    /// Exit status, or [`DEFAULT_EXIT_STATUS`] when never set
    pub fn exit_status(&self) -> i32 {
        self.exit_status.unwrap_or(DEFAULT_EXIT_STATUS)
    }

    /// HTTP status, or [`DEFAULT_HTTP_STATUS`] when never set
    pub fn http_status(&self) -> u16 {
        self.http_status.unwrap_or(DEFAULT_HTTP_STATUS)
    }

    /// Domain, or [`domain::UNKNOWN`] when never set
    pub fn domain(&self) -> &str {
        self.domain.as_deref().unwrap_or(domain::UNKNOWN)
    }

    /// Copy of the direct causes, in attachment order
    pub fn causes(&self) -> Vec<AnyError> {
        self.causes.clone()
    }

    /// Copy of the associated errors, in attachment order
    pub fn associated(&self) -> Vec<AnyError> {
        self.associated.clone()
    }

    /// Copy of the tag set
    pub fn tags(&self) -> BTreeSet<String> {
        self.tags.clone()
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Copy of the attribute map
    pub fn attributes(&self) -> Attributes {
        self.attributes.clone()
    }

    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    pub fn time(&self) -> DateTime<Utc> {
        self.time
    }

    pub fn trace_id(&self) -> Option<&TraceId> {
        self.trace_id.as_ref()
    }

    pub fn span_id(&self) -> Option<&SpanId> {
        self.span_id.as_ref()
    }
}

impl std::fmt::Display for Fault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Fault {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.causes
            .first()
            .map(|cause| cause.as_error() as &(dyn std::error::Error + 'static))
    }
}

impl ErrorMessage for Fault {
    fn error_message(&self) -> String {
        self.message.clone()
    }
}

impl ErrorUserMessage for Fault {
    fn error_user_message(&self) -> String {
        self.user_message.clone().unwrap_or_default()
    }
}

impl ErrorCode for Fault {
    fn error_code(&self) -> String {
        self.code().to_string()
    }
}

impl ErrorExitStatus for Fault {
    fn error_exit_status(&self) -> i32 {
        self.exit_status()
    }
}

impl ErrorHttpStatus for Fault {
    fn error_http_status(&self) -> u16 {
        self.http_status()
    }
}

impl ErrorDomain for Fault {
    fn error_domain(&self) -> String {
        self.domain().to_string()
    }
}

impl ErrorCauses for Fault {
    fn error_causes(&self) -> Vec<AnyError> {
        self.causes()
    }
}

impl ErrorAssociated for Fault {
    fn error_associated(&self) -> Vec<AnyError> {
        self.associated()
    }
}

impl ErrorTags for Fault {
    fn error_tags(&self) -> Vec<String> {
        self.tags.iter().cloned().collect()
    }
}

impl ErrorAttributes for Fault {
    fn error_attributes(&self) -> Attributes {
        self.attributes()
    }
}

impl ErrorTime for Fault {
    fn error_time(&self) -> Option<DateTime<Utc>> {
        Some(self.time)
    }
}

impl ErrorTraceId for Fault {
    fn error_trace_id(&self) -> String {
        self.trace_id
            .as_ref()
            .map(|id| id.as_str().to_string())
            .unwrap_or_default()
    }
}

impl ErrorSpanId for Fault {
    fn error_span_id(&self) -> String {
        self.span_id
            .as_ref()
            .map(|id| id.as_str().to_string())
            .unwrap_or_default()
    }
}

impl Inspect for Fault {
    fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self
    }

    fn as_message(&self) -> Option<&dyn ErrorMessage> {
        Some(self)
    }

    fn as_user_message(&self) -> Option<&dyn ErrorUserMessage> {
        Some(self)
    }

    fn as_code(&self) -> Option<&dyn ErrorCode> {
        self.code.as_ref().map(|_| self as &dyn ErrorCode)
    }

    fn as_exit_status(&self) -> Option<&dyn ErrorExitStatus> {
        self.exit_status.map(|_| self as &dyn ErrorExitStatus)
    }

    fn as_http_status(&self) -> Option<&dyn ErrorHttpStatus> {
        self.http_status.map(|_| self as &dyn ErrorHttpStatus)
    }

    fn as_domain(&self) -> Option<&dyn ErrorDomain> {
        Some(self)
    }

    fn as_causes(&self) -> Option<&dyn ErrorCauses> {
        Some(self)
    }

    fn as_associated(&self) -> Option<&dyn ErrorAssociated> {
        Some(self)
    }

    fn as_tags(&self) -> Option<&dyn ErrorTags> {
        Some(self)
    }

    fn as_attributes(&self) -> Option<&dyn ErrorAttributes> {
        Some(self)
    }

    fn as_time(&self) -> Option<&dyn ErrorTime> {
        Some(self)
    }

    fn as_trace_id(&self) -> Option<&dyn ErrorTraceId> {
        Some(self)
    }

    fn as_span_id(&self) -> Option<&dyn ErrorSpanId> {
        Some(self)
    }
}

/// Serializes as the default JSON projection
impl Serialize for Fault {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        projection::to_value(Some(self), &ProjectionOptions::default()).serialize(serializer)
    }
}
