//! Context carried through operation boundaries into error construction
//!
//! An `ErrorContext` is an explicit, read-only value threaded by the caller.
//! Each part is independently optional; an absent part is a no-op when the
//! context is merged into an error builder.

use serde_json::Value;
use std::collections::BTreeMap;

/// Key-value attributes attached to an error
pub type Attributes = BTreeMap<String, Value>;

/// Ambient tags, attributes and tracing ids for the current operation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorContext {
    tags: Option<Vec<String>>,
    attributes: Option<Attributes>,
    trace_id: Option<String>,
    span_id: Option<String>,
}

impl ErrorContext {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the tags carried by the context
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    /// Append tags to any already carried; duplicates are kept here and
    /// collapse when merged into an error
    pub fn add_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags
            .get_or_insert_with(Vec::new)
            .extend(tags.into_iter().map(Into::into));
        self
    }

    /// Replace the attributes carried by the context
    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = Some(attributes);
        self
    }

    /// Set one attribute, overwriting a previous value for the key
    pub fn add_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes
            .get_or_insert_with(Attributes::new)
            .insert(key.into(), value.into());
        self
    }

    /// Set the trace id; validation happens when the context is merged
    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }

    /// Set the span id; validation happens when the context is merged
    pub fn with_span_id(mut self, span_id: impl Into<String>) -> Self {
        self.span_id = Some(span_id.into());
        self
    }

    pub fn tags(&self) -> Option<&[String]> {
        self.tags.as_deref()
    }

    pub fn attributes(&self) -> Option<&Attributes> {
        self.attributes.as_ref()
    }

    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    pub fn span_id(&self) -> Option<&str> {
        self.span_id.as_deref()
    }
}
