//! Canonical schema constants for error projection and structured logging
//!
//! These constants keep JSON output, log fields and categorisation labels
//! consistent across crates.

// JSON projection keys
pub const KEY_MSG: &str = "msg";
pub const KEY_TIME: &str = "time";
pub const KEY_USER_MSG: &str = "user_msg";
pub const KEY_CODE: &str = "code";
pub const KEY_DOMAIN: &str = "domain";
pub const KEY_EXIT_CODE: &str = "exit_code";
pub const KEY_HTTP_STATUS_CODE: &str = "http_status_code";
pub const KEY_CAUSES: &str = "causes";
pub const KEY_ASSOCIATED: &str = "associated";
pub const KEY_TAGS: &str = "tags";
pub const KEY_ATTRIBUTES: &str = "attributes";
pub const KEY_TRACE_ID: &str = "trace_id";
pub const KEY_SPAN_ID: &str = "span_id";

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";

// Error fields
pub const FIELD_ERR_MSG: &str = "err.msg";
pub const FIELD_ERR_CODE: &str = "err.code";
pub const FIELD_ERR_EXIT_CODE: &str = "err.exit_code";
pub const FIELD_ERR_HTTP_STATUS: &str = "err.http_status";
pub const FIELD_ERR_DOMAIN: &str = "err.domain";
pub const FIELD_ERR_TRACE_ID: &str = "err.trace_id";
pub const FIELD_ERR_SPAN_ID: &str = "err.span_id";
pub const FIELD_ERR_TAGS: &str = "err.tags";
pub const FIELD_ERR_ATTRS: &str = "err.attrs";
pub const FIELD_ERR_CAUSES: &str = "err.causes";

// Canonical event names
pub const EVENT_FAULT: &str = "fault";

/// Error domains: one coarse category per error
pub mod domain {
    pub const UNKNOWN: &str = "unknown";
    pub const NETWORK: &str = "network";
    pub const CONFIG: &str = "config";
    pub const DATABASE: &str = "database";
    pub const VALIDATION: &str = "validation";
    pub const AUTH: &str = "auth";
    pub const RATE_LIMIT: &str = "ratelimit";
    pub const IO: &str = "io";
    pub const TIMEOUT: &str = "timeout";
    pub const DEPENDENCY: &str = "dependency";
    pub const INTERNAL: &str = "internal";
    pub const API: &str = "api";
}

/// Common tags; they share their spelling with the domains
pub mod tag {
    use super::domain;

    pub const NETWORK: &str = domain::NETWORK;
    pub const CONFIG: &str = domain::CONFIG;
    pub const DATABASE: &str = domain::DATABASE;
    pub const VALIDATION: &str = domain::VALIDATION;
    pub const AUTH: &str = domain::AUTH;
    pub const RATE_LIMIT: &str = domain::RATE_LIMIT;
    pub const IO: &str = domain::IO;
    pub const TIMEOUT: &str = domain::TIMEOUT;
    pub const DEPENDENCY: &str = domain::DEPENDENCY;
    pub const INTERNAL: &str = domain::INTERNAL;
    pub const API: &str = domain::API;
}
