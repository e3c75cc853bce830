//! Log field values extracted from an error

use fault_errors::{facet, Inspect};
use serde_json::Value;

/// Facets of one error, flattened into loggable values
///
/// Everything is read through [`facet`], so foreign errors log with their
/// resolved values (code and statuses from their causes).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaultFields {
    pub msg: String,
    pub code: String,
    pub exit_code: i32,
    pub http_status: u16,
    pub domain: String,
    pub trace_id: String,
    pub span_id: String,
    /// Sorted, comma separated
    pub tags: String,
    /// Attributes as a JSON object
    pub attrs: String,
    /// Number of direct causes
    pub causes: usize,
}

impl FaultFields {
    pub fn collect(err: &dyn Inspect) -> Self {
        let err = Some(err);
        let tags: Vec<String> = facet::tags(err).into_iter().collect();
        let attrs = Value::Object(facet::attributes(err).into_iter().collect());
        Self {
            msg: facet::message(err),
            code: facet::code(err),
            exit_code: facet::exit_status(err),
            http_status: facet::http_status(err),
            domain: facet::domain(err),
            trace_id: facet::trace_id(err),
            span_id: facet::span_id(err),
            tags: tags.join(","),
            attrs: attrs.to_string(),
            causes: facet::causes(err).len(),
        }
    }

    /// Whether the error maps to a 5xx response, logged at ERROR
    pub fn is_server_error(&self) -> bool {
        self.http_status >= 500
    }
}
