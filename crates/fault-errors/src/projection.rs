//! JSON projection of errors
//!
//! Any inspectable error can be rendered as a JSON object. Facets are read
//! through [`facet`], so foreign errors project as well as records do. A
//! facet is left out when it is disabled in [`ProjectionOptions`], empty, or
//! still at its default (unspecified code, unknown domain, exit status 1,
//! HTTP status 500). A message-only record therefore projects to just `msg`
//! and `time`.

use crate::capability::Inspect;
use crate::facet;
use crate::record::{CODE_UNSPECIFIED, DEFAULT_EXIT_STATUS, DEFAULT_HTTP_STATUS};
use chrono::{DateTime, SecondsFormat, Utc};
use fault_core_types::schema::{self, domain};
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use std::fmt::Write;

/// Which facets to emit and how to format them
///
/// Every field has a default, so a partial configuration table is enough:
///
/// ```
/// use fault_errors::ProjectionOptions;
///
/// let opts: ProjectionOptions = serde_json::from_str(r#"{ "time": false, "indent": 0 }"#).unwrap();
/// assert!(!opts.time);
/// assert!(opts.causes);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProjectionOptions {
    pub time: bool,
    pub user_msg: bool,
    pub code: bool,
    pub domain: bool,
    pub exit_code: bool,
    pub http_status_code: bool,
    pub causes: bool,
    pub associated: bool,
    pub tags: bool,
    pub attributes: bool,
    pub trace_id: bool,
    pub span_id: bool,
    /// Spaces per indentation level in [`to_json`]; 0 renders compact JSON
    pub indent: usize,
    /// chrono `strftime` pattern; RFC 3339 in UTC with a `Z` suffix when unset
    pub time_format: Option<String>,
    /// Levels of nested causes and associated errors to render; 0 is unlimited
    pub cause_depth: usize,
}

impl Default for ProjectionOptions {
    fn default() -> Self {
        Self {
            time: true,
            user_msg: true,
            code: true,
            domain: true,
            exit_code: true,
            http_status_code: true,
            causes: true,
            associated: true,
            tags: true,
            attributes: true,
            trace_id: true,
            span_id: true,
            indent: 2,
            time_format: None,
            cause_depth: 0,
        }
    }
}

/// Project an error into a JSON value; `None` projects to `null`
pub fn to_value(err: Option<&dyn Inspect>, opts: &ProjectionOptions) -> Value {
    match err {
        Some(err) => Value::Object(project(err, opts, 0)),
        None => Value::Null,
    }
}

/// Project an error into a JSON string, indented per [`ProjectionOptions::indent`]
pub fn to_json(err: Option<&dyn Inspect>, opts: &ProjectionOptions) -> String {
    let value = to_value(err, opts);
    if opts.indent == 0 {
        return value.to_string();
    }

    let indent = " ".repeat(opts.indent);
    let mut buf = Vec::new();
    let mut ser =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(indent.as_bytes()));
    if value.serialize(&mut ser).is_err() {
        return value.to_string();
    }
    String::from_utf8(buf).unwrap_or_else(|_| value.to_string())
}

fn project(err: &dyn Inspect, opts: &ProjectionOptions, depth: usize) -> Map<String, Value> {
    let err = Some(err);
    let mut out = Map::new();

    let message = facet::message(err);
    out.insert(schema::KEY_MSG.into(), Value::from(message.as_str()));

    if opts.time {
        if let Some(time) = facet::time(err) {
            out.insert(
                schema::KEY_TIME.into(),
                Value::from(format_time(time, opts.time_format.as_deref())),
            );
        }
    }

    if opts.user_msg {
        let user_message = facet::user_message(err);
        if !user_message.is_empty() && user_message != message {
            out.insert(schema::KEY_USER_MSG.into(), Value::from(user_message));
        }
    }

    if opts.code {
        let code = facet::code(err);
        if !code.is_empty() && code != CODE_UNSPECIFIED {
            out.insert(schema::KEY_CODE.into(), Value::from(code));
        }
    }

    if opts.domain {
        let name = facet::domain(err);
        if !name.is_empty() && name != domain::UNKNOWN {
            out.insert(schema::KEY_DOMAIN.into(), Value::from(name));
        }
    }

    if opts.exit_code {
        let status = facet::exit_status(err);
        if status != DEFAULT_EXIT_STATUS {
            out.insert(schema::KEY_EXIT_CODE.into(), Value::from(status));
        }
    }

    if opts.http_status_code {
        let status = facet::http_status(err);
        if status != DEFAULT_HTTP_STATUS {
            out.insert(schema::KEY_HTTP_STATUS_CODE.into(), Value::from(status));
        }
    }

    let nest = opts.cause_depth == 0 || depth < opts.cause_depth;

    if opts.causes && nest {
        let causes: Vec<Value> = facet::causes(err)
            .iter()
            .map(|cause| Value::Object(project(cause.inspect(), opts, depth + 1)))
            .collect();
        if !causes.is_empty() {
            out.insert(schema::KEY_CAUSES.into(), Value::Array(causes));
        }
    }

    if opts.associated && nest {
        let associated: Vec<Value> = facet::associated(err)
            .iter()
            .map(|other| Value::Object(project(other.inspect(), opts, depth + 1)))
            .collect();
        if !associated.is_empty() {
            out.insert(schema::KEY_ASSOCIATED.into(), Value::Array(associated));
        }
    }

    if opts.tags {
        let tags = facet::tags(err);
        if !tags.is_empty() {
            out.insert(
                schema::KEY_TAGS.into(),
                Value::Array(tags.into_iter().map(Value::from).collect()),
            );
        }
    }

    if opts.attributes {
        let attributes = facet::attributes(err);
        if !attributes.is_empty() {
            out.insert(
                schema::KEY_ATTRIBUTES.into(),
                Value::Object(attributes.into_iter().collect()),
            );
        }
    }

    if opts.trace_id {
        let id = facet::trace_id(err);
        if !id.is_empty() {
            out.insert(schema::KEY_TRACE_ID.into(), Value::from(id));
        }
    }

    if opts.span_id {
        let id = facet::span_id(err);
        if !id.is_empty() {
            out.insert(schema::KEY_SPAN_ID.into(), Value::from(id));
        }
    }

    out
}

fn format_time(time: DateTime<Utc>, pattern: Option<&str>) -> String {
    if let Some(pattern) = pattern {
        let mut out = String::new();
        if write!(out, "{}", time.format(pattern)).is_ok() {
            return out;
        }
    }
    time.to_rfc3339_opts(SecondsFormat::Secs, true)
}
