//! Fluent construction of [`Fault`] records

use crate::any::AnyError;
use crate::capability::Inspect;
use crate::facet;
use crate::record::{Fault, EMPTY_MESSAGE};
use chrono::{DateTime, Utc};
use fault_core_types::schema::domain;
use fault_core_types::{Attributes, ErrorContext, SpanId, TraceId};
use serde_json::Value;
use std::collections::BTreeSet;
use std::ops::RangeInclusive;

/// HTTP statuses a record may carry
const HTTP_ERROR_RANGE: RangeInclusive<u16> = 400..=599;

/// Accumulates facets and finalizes them into a [`Fault`]
///
/// Every setter takes the builder by value and returns it. Setters never
/// fail: invalid input is ignored and the builder is returned unchanged.
///
/// ```
/// use fault_errors::{facet, FaultBuilder};
///
/// let fault = FaultBuilder::new()
///     .code("E_DB_TIMEOUT")
///     .exit_status(3)
///     .exit_status(-5)
///     .http_status(250)
///     .msg("db failed");
///
/// assert_eq!(fault.exit_status(), 3);
/// assert_eq!(fault.http_status(), 500);
/// assert_eq!(facet::code(Some(&fault)), "E_DB_TIMEOUT");
/// ```
#[derive(Debug, Clone)]
#[must_use]
pub struct FaultBuilder {
    time: Option<DateTime<Utc>>,
    message: String,
    user_message: Option<String>,
    domain: Option<String>,
    code: Option<String>,
    exit_status: Option<i32>,
    http_status: Option<u16>,
    causes: Vec<AnyError>,
    associated: Vec<AnyError>,
    tags: BTreeSet<String>,
    attributes: Attributes,
    trace_id: Option<TraceId>,
    span_id: Option<SpanId>,
}

impl Default for FaultBuilder {
    fn default() -> Self {
        Self {
            time: None,
            message: String::new(),
            user_message: None,
            domain: None,
            code: None,
            exit_status: None,
            http_status: None,
            causes: Vec::new(),
            associated: Vec::new(),
            tags: BTreeSet::new(),
            attributes: Attributes::new(),
            trace_id: None,
            span_id: None,
        }
    }
}

impl From<Fault> for FaultBuilder {
    fn from(fault: Fault) -> Self {
        Self {
            time: Some(fault.time),
            message: fault.message,
            user_message: fault.user_message,
            domain: fault.domain,
            code: fault.code,
            exit_status: fault.exit_status,
            http_status: fault.http_status,
            causes: fault.causes,
            associated: fault.associated,
            tags: fault.tags,
            attributes: fault.attributes,
            trace_id: fault.trace_id,
            span_id: fault.span_id,
        }
    }
}

impl FaultBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a builder from an existing error
    ///
    /// A [`Fault`] is copied directly. Any other error has each facet
    /// extracted through [`facet`] and fed through the setters, so values
    /// the builder would reject are left at their defaults. Code, exit status
    /// and HTTP status are only copied from the matching capability; without
    /// one they stay unset and keep resolving over the copied causes.
    pub fn derive(err: &dyn Inspect) -> Self {
        if let Some(fault) = err.as_error().downcast_ref::<Fault>() {
            return Self::from(fault.clone());
        }

        let mut builder = Self::new();
        if let Some(cap) = err.as_code() {
            builder = builder.code(cap.error_code());
        }
        if let Some(cap) = err.as_exit_status() {
            builder = builder.exit_status(cap.error_exit_status());
        }
        if let Some(cap) = err.as_http_status() {
            builder = builder.http_status(cap.error_http_status());
        }

        let err = Some(err);
        builder = builder
            .message(facet::message(err))
            .user_msg(facet::user_message(err))
            .domain(facet::domain(err))
            .causes(facet::causes(err))
            .associates(facet::associated(err))
            .tags(facet::tags(err))
            .attributes(facet::attributes(err))
            .trace_id(facet::trace_id(err))
            .span_id(facet::span_id(err));
        if let Some(time) = facet::time(err) {
            builder = builder.time(time);
        }
        builder
    }

    /// Set the message; empty strings are ignored
    pub fn message(mut self, message: impl Into<String>) -> Self {
        let message = message.into();
        if !message.is_empty() {
            self.message = message;
        }
        self
    }

    /// Set the user-facing message; empty strings are ignored
    pub fn user_msg(mut self, message: impl Into<String>) -> Self {
        let message = message.into();
        if !message.is_empty() {
            self.user_message = Some(message);
        }
        self
    }

    /// Set the code; empty strings are ignored
    pub fn code(mut self, code: impl Into<String>) -> Self {
        let code = code.into();
        if !code.is_empty() {
            self.code = Some(code);
        }
        self
    }

    /// Set the domain; empty strings are ignored
    pub fn domain(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if name == domain::UNKNOWN {
            self.domain = None;
        } else if !name.is_empty() {
            self.domain = Some(name);
        }
        self
    }

    /// Set the exit status; zero and negative values are ignored
    pub fn exit_status(mut self, status: i32) -> Self {
        if status > 0 {
            self.exit_status = Some(status);
        }
        self
    }

    /// Set the HTTP status; values outside `400..=599` are ignored
    pub fn http_status(mut self, status: u16) -> Self {
        if HTTP_ERROR_RANGE.contains(&status) {
            self.http_status = Some(status);
        }
        self
    }

    /// Set the trace id from 32 lowercase hex digits; malformed ids are ignored
    pub fn trace_id(mut self, id: impl AsRef<str>) -> Self {
        if let Ok(id) = TraceId::from_hex(id.as_ref()) {
            self.trace_id = Some(id);
        }
        self
    }

    /// Set the span id from 16 lowercase hex digits; malformed ids are ignored
    pub fn span_id(mut self, id: impl AsRef<str>) -> Self {
        if let Ok(id) = SpanId::from_hex(id.as_ref()) {
            self.span_id = Some(id);
        }
        self
    }

    /// Set the timestamp; the zero instant and instants in the future are
    /// ignored, leaving the current time to be stamped at build
    pub fn time(mut self, time: DateTime<Utc>) -> Self {
        if time != DateTime::<Utc>::default() && time <= Utc::now() {
            self.time = Some(time);
        }
        self
    }

    /// Append one cause
    pub fn cause(mut self, cause: impl Into<AnyError>) -> Self {
        self.causes.push(cause.into());
        self
    }

    /// Append causes in order, skipping `None`
    pub fn causes<I>(mut self, causes: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Option<AnyError>>,
    {
        self.causes
            .extend(causes.into_iter().filter_map(|cause| cause.into()));
        self
    }

    /// Append one associated error
    pub fn associate(mut self, err: impl Into<AnyError>) -> Self {
        self.associated.push(err.into());
        self
    }

    /// Append associated errors in order, skipping `None`
    pub fn associates<I>(mut self, errs: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Option<AnyError>>,
    {
        self.associated
            .extend(errs.into_iter().filter_map(|err| err.into()));
        self
    }

    /// Add a tag; empty tags are ignored
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        let tag = tag.into();
        if !tag.is_empty() {
            self.tags.insert(tag);
        }
        self
    }

    pub fn tags<I, S>(self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        tags.into_iter().fold(self, |builder, tag| builder.tag(tag))
    }

    /// Set one attribute, overwriting an earlier value for the key
    ///
    /// Empty keys and `null` values are ignored.
    pub fn attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        let value = value.into();
        if !key.is_empty() && !value.is_null() {
            self.attributes.insert(key, value);
        }
        self
    }

    pub fn attributes<I, K, V>(self, attributes: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        attributes
            .into_iter()
            .fold(self, |builder, (key, value)| builder.attribute(key, value))
    }

    /// Merge tags, attributes and tracing ids from an operation context
    pub fn context(mut self, ctx: &ErrorContext) -> Self {
        if let Some(tags) = ctx.tags() {
            self = self.tags(tags.iter().cloned());
        }
        if let Some(attributes) = ctx.attributes() {
            self = self.attributes(attributes.clone());
        }
        if let Some(span_id) = ctx.span_id() {
            self = self.span_id(span_id);
        }
        if let Some(trace_id) = ctx.trace_id() {
            self = self.trace_id(trace_id);
        }
        self
    }

    /// Finalize into an immutable record
    pub fn build(self) -> Fault {
        let message = if self.message.is_empty() {
            EMPTY_MESSAGE.to_string()
        } else {
            self.message
        };
        Fault {
            time: self.time.unwrap_or_else(Utc::now),
            message,
            user_message: self.user_message,
            domain: self.domain,
            code: self.code,
            exit_status: self.exit_status,
            http_status: self.http_status,
            causes: self.causes,
            associated: self.associated,
            tags: self.tags,
            attributes: self.attributes,
            trace_id: self.trace_id,
            span_id: self.span_id,
        }
    }

    /// Set the message and finalize
    pub fn msg(self, message: impl Into<String>) -> Fault {
        self.message(message).build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{CODE_UNSPECIFIED, DEFAULT_EXIT_STATUS, DEFAULT_HTTP_STATUS};
    use chrono::Duration;

    const TRACE: &str = "4bf92f3577b34da6a3ce929d0e0e4736";
    const SPAN: &str = "00f067aa0ba902b7";

    #[test]
    fn test_unset_message_uses_placeholder() {
        assert_eq!(FaultBuilder::new().build().message(), EMPTY_MESSAGE);
        assert_eq!(FaultBuilder::new().msg("").message(), EMPTY_MESSAGE);
    }

    #[test]
    fn test_empty_strings_are_ignored() {
        let fault = FaultBuilder::new()
            .message("kept")
            .message("")
            .user_msg("")
            .code("E_KEPT")
            .code("")
            .domain(domain::DATABASE)
            .domain("")
            .tag("")
            .build();
        assert_eq!(fault.message(), "kept");
        assert_eq!(fault.user_message(), None);
        assert_eq!(fault.code(), "E_KEPT");
        assert_eq!(fault.domain(), domain::DATABASE);
        assert!(fault.tags().is_empty());
    }

    #[test]
    fn test_invalid_numbers_are_ignored() {
        let fault = FaultBuilder::new()
            .exit_status(0)
            .exit_status(-5)
            .http_status(250)
            .http_status(600)
            .msg("x");
        assert_eq!(fault.exit_status(), DEFAULT_EXIT_STATUS);
        assert_eq!(fault.http_status(), DEFAULT_HTTP_STATUS);

        let fault = FaultBuilder::new().http_status(400).http_status(599).msg("x");
        assert_eq!(fault.http_status(), 599);
    }

    #[test]
    fn test_ids_are_validated() {
        let fault = FaultBuilder::new()
            .trace_id("not-hex")
            .span_id("00000000000000000")
            .msg("x");
        assert!(fault.trace_id().is_none());
        assert!(fault.span_id().is_none());

        let fault = FaultBuilder::new().trace_id(TRACE).span_id(SPAN).msg("x");
        assert_eq!(fault.trace_id().map(TraceId::as_str), Some(TRACE));
        assert_eq!(fault.span_id().map(SpanId::as_str), Some(SPAN));
    }

    #[test]
    fn test_time_rejects_zero_and_future() {
        let before = Utc::now();
        let fault = FaultBuilder::new()
            .time(DateTime::<Utc>::default())
            .time(Utc::now() + Duration::hours(1))
            .msg("x");
        assert!(fault.time() >= before);
        assert!(fault.time() <= Utc::now());

        let past = Utc::now() - Duration::days(1);
        assert_eq!(FaultBuilder::new().time(past).msg("x").time(), past);
    }

    #[test]
    fn test_attribute_filtering_and_last_write_wins() {
        let fault = FaultBuilder::new()
            .attribute("", 1)
            .attribute("gone", Value::Null)
            .attribute("user_id", 123)
            .attributes([("user_id", 456)])
            .msg("x");
        assert_eq!(fault.attributes().len(), 1);
        assert_eq!(fault.attribute("user_id"), Some(&Value::from(456)));
    }

    #[test]
    fn test_tags_are_idempotent() {
        let fault = FaultBuilder::new()
            .tag("db")
            .tags(["db", "net"])
            .tag("db")
            .msg("x");
        assert_eq!(fault.tags().len(), 2);
    }

    #[test]
    fn test_causes_keep_order_and_drop_none() {
        let fault = FaultBuilder::new()
            .cause(crate::msg("a"))
            .causes([None, Some(AnyError::from(crate::msg("b")))])
            .causes(vec![AnyError::from(crate::msg("c"))])
            .associate(crate::msg("x"))
            .associates([None::<AnyError>])
            .msg("outer");
        let messages: Vec<_> = fault.causes().iter().map(ToString::to_string).collect();
        assert_eq!(messages, vec!["a", "b", "c"]);
        assert_eq!(fault.associated().len(), 1);
    }

    #[test]
    fn test_context_merge() {
        let ctx = ErrorContext::new()
            .with_tags(["api"])
            .add_attribute("request", "r-1")
            .with_trace_id(TRACE)
            .with_span_id("bogus");
        let fault = FaultBuilder::new().tag("db").context(&ctx).msg("x");
        assert!(fault.has_tag("api"));
        assert!(fault.has_tag("db"));
        assert_eq!(fault.attribute("request"), Some(&Value::from("r-1")));
        assert!(fault.trace_id().is_some());
        assert!(fault.span_id().is_none());
    }

    #[test]
    fn test_empty_context_is_noop() {
        let fault = FaultBuilder::new()
            .tag("db")
            .context(&ErrorContext::new())
            .msg("x");
        assert_eq!(fault.tags().len(), 1);
        assert!(fault.attributes().is_empty());
    }

    #[test]
    fn test_derive_from_fault_is_observationally_equal() {
        let original = FaultBuilder::new()
            .code("E_X")
            .exit_status(4)
            .http_status(404)
            .domain(domain::API)
            .user_msg("not here")
            .tag("api")
            .attribute("k", "v")
            .trace_id(TRACE)
            .span_id(SPAN)
            .cause(crate::msg("inner"))
            .msg("outer");
        let derived = FaultBuilder::derive(&original).build();

        assert_eq!(derived.message(), original.message());
        assert_eq!(derived.user_message(), original.user_message());
        assert_eq!(derived.code(), original.code());
        assert_eq!(derived.exit_status(), original.exit_status());
        assert_eq!(derived.http_status(), original.http_status());
        assert_eq!(derived.domain(), original.domain());
        assert_eq!(derived.tags(), original.tags());
        assert_eq!(derived.attributes(), original.attributes());
        assert_eq!(derived.time(), original.time());
        assert_eq!(derived.trace_id(), original.trace_id());
        assert_eq!(derived.span_id(), original.span_id());
        assert!(derived.causes()[0].ptr_eq(&original.causes()[0]));
    }

    #[test]
    fn test_derive_from_foreign_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let any = AnyError::foreign(io);
        let fault = FaultBuilder::derive(any.inspect()).build();
        assert_eq!(fault.message(), "no such file");
        assert_eq!(fault.code(), CODE_UNSPECIFIED);
        assert_eq!(fault.exit_status(), DEFAULT_EXIT_STATUS);
        assert_eq!(fault.domain(), domain::UNKNOWN);
        assert!(fault.causes().is_empty());
    }

    #[test]
    fn test_explicit_default_status_still_wins() {
        let fault = FaultBuilder::new()
            .exit_status(DEFAULT_EXIT_STATUS)
            .cause(FaultBuilder::new().exit_status(8).msg("inner"))
            .msg("outer");
        assert_eq!(facet::exit_status(Some(&fault)), DEFAULT_EXIT_STATUS);
    }

    #[test]
    fn test_derive_keeps_unset_facets_resolving() {
        let inner = FaultBuilder::new().code("E_INNER").exit_status(6).msg("inner");
        let outer = crate::Foreign::new(crate::wrap("outer", inner));
        let fault = FaultBuilder::derive(&outer).build();
        assert_eq!(fault.code(), CODE_UNSPECIFIED);
        assert_eq!(facet::code(Some(&fault)), "E_INNER");
        assert_eq!(facet::exit_status(Some(&fault)), 6);
    }
}
