//! Facet extraction from arbitrary errors
//!
//! Every function here is total: it takes `None` for "no error" and always
//! returns a defined value. When the error implements the facet's capability
//! its value is returned as-is. Otherwise a facet-specific fallback applies:
//!
//! | facet | no error | fallback |
//! |---|---|---|
//! | message, user message | `""` | `to_string()` |
//! | code | `""` | dominant code of the causes, see [`resolve`] |
//! | exit status | `0` | max over causes, at least 1 |
//! | HTTP status | `200` | max over causes, at least 500 |
//! | domain | `""` | `"unknown"` |
//! | causes | empty | legacy shapes, see [`causes`] |
//! | everything else | empty | empty |

use crate::any::{promote, AnyError};
use crate::capability::Inspect;
use crate::resolve;
use chrono::{DateTime, Utc};
use fault_core_types::schema::domain as domains;
use fault_core_types::Attributes;
use std::collections::BTreeSet;

/// HTTP status reported for "no error"
pub const HTTP_STATUS_OK: u16 = 200;

pub fn message(err: Option<&dyn Inspect>) -> String {
    let Some(err) = err else {
        return String::new();
    };
    match err.as_message() {
        Some(cap) => cap.error_message(),
        None => err.to_string(),
    }
}

/// User-facing message; falls back to `to_string()`, which is not guaranteed
/// to be safe to show
pub fn user_message(err: Option<&dyn Inspect>) -> String {
    let Some(err) = err else {
        return String::new();
    };
    match err.as_user_message() {
        Some(cap) => cap.error_user_message(),
        None => err.to_string(),
    }
}

pub fn code(err: Option<&dyn Inspect>) -> String {
    let Some(err) = err else {
        return String::new();
    };
    match err.as_code() {
        Some(cap) => cap.error_code(),
        None => resolve::dominant_code(&causes(Some(err))),
    }
}

pub fn exit_status(err: Option<&dyn Inspect>) -> i32 {
    let Some(err) = err else {
        return 0;
    };
    match err.as_exit_status() {
        Some(cap) => cap.error_exit_status(),
        None => resolve::max_exit_status(&causes(Some(err))),
    }
}

pub fn http_status(err: Option<&dyn Inspect>) -> u16 {
    let Some(err) = err else {
        return HTTP_STATUS_OK;
    };
    match err.as_http_status() {
        Some(cap) => cap.error_http_status(),
        None => resolve::max_http_status(&causes(Some(err))),
    }
}

pub fn domain(err: Option<&dyn Inspect>) -> String {
    let Some(err) = err else {
        return String::new();
    };
    match err.as_domain() {
        Some(cap) => cap.error_domain(),
        None => domains::UNKNOWN.to_string(),
    }
}

/// Direct causes of an error
///
/// Probed in order: the [`ErrorCauses`](crate::capability::ErrorCauses)
/// capability, [`UnwrapAll`](crate::capability::UnwrapAll),
/// `std::error::Error::source` (one element) and
/// [`RootCause`](crate::capability::RootCause) (one element). The first shape
/// present wins.
pub fn causes(err: Option<&dyn Inspect>) -> Vec<AnyError> {
    let Some(err) = err else {
        return Vec::new();
    };
    if let Some(cap) = err.as_causes() {
        return cap.error_causes();
    }
    if let Some(cap) = err.as_unwrap_all() {
        return cap.unwrap_all();
    }
    if let Some(source) = err.source() {
        return vec![promote(source)];
    }
    if let Some(cap) = err.as_root_cause() {
        return vec![cap.root_cause()];
    }
    Vec::new()
}

pub fn associated(err: Option<&dyn Inspect>) -> Vec<AnyError> {
    err.and_then(|err| err.as_associated())
        .map(|cap| cap.error_associated())
        .unwrap_or_default()
}

/// Tags as a set, whatever the capability returned
pub fn tags(err: Option<&dyn Inspect>) -> BTreeSet<String> {
    err.and_then(|err| err.as_tags())
        .map(|cap| cap.error_tags().into_iter().collect())
        .unwrap_or_default()
}

pub fn attributes(err: Option<&dyn Inspect>) -> Attributes {
    err.and_then(|err| err.as_attributes())
        .map(|cap| cap.error_attributes())
        .unwrap_or_default()
}

/// Timestamp; `None` stands for the zero instant
pub fn time(err: Option<&dyn Inspect>) -> Option<DateTime<Utc>> {
    err.and_then(|err| err.as_time())
        .and_then(|cap| cap.error_time())
}

pub fn trace_id(err: Option<&dyn Inspect>) -> String {
    err.and_then(|err| err.as_trace_id())
        .map(|cap| cap.error_trace_id())
        .unwrap_or_default()
}

pub fn span_id(err: Option<&dyn Inspect>) -> String {
    err.and_then(|err| err.as_span_id())
        .map(|cap| cap.error_span_id())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::{ErrorCode, ErrorMessage, ErrorTags, RootCause, UnwrapAll};
    use crate::{impl_inspect, Fault, CODE_UNSPECIFIED, DEFAULT_EXIT_STATUS, DEFAULT_HTTP_STATUS};
    use std::fmt;

    #[derive(Debug)]
    struct Plain(&'static str);

    impl fmt::Display for Plain {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.0)
        }
    }

    impl std::error::Error for Plain {}

    impl_inspect!(Plain);

    #[derive(Debug)]
    struct Verbose;

    impl fmt::Display for Verbose {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "query failed: connection reset by peer")
        }
    }

    impl std::error::Error for Verbose {}

    impl ErrorMessage for Verbose {
        fn error_message(&self) -> String {
            "query failed".into()
        }
    }

    impl ErrorCode for Verbose {
        fn error_code(&self) -> String {
            "E_QUERY".into()
        }
    }

    impl_inspect!(Verbose: message, code);

    #[derive(Debug)]
    struct Sloppy;

    impl fmt::Display for Sloppy {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "sloppy")
        }
    }

    impl std::error::Error for Sloppy {}

    impl ErrorTags for Sloppy {
        fn error_tags(&self) -> Vec<String> {
            vec!["net".into(), "net".into(), "db".into(), "net".into()]
        }
    }

    impl_inspect!(Sloppy: tags);

    #[derive(Debug)]
    struct Batch(Vec<AnyError>);

    impl fmt::Display for Batch {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "batch of {}", self.0.len())
        }
    }

    impl std::error::Error for Batch {}

    impl UnwrapAll for Batch {
        fn unwrap_all(&self) -> Vec<AnyError> {
            self.0.clone()
        }
    }

    impl_inspect!(Batch: unwrap_all);

    #[derive(Debug)]
    struct Legacy(AnyError);

    impl fmt::Display for Legacy {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "legacy")
        }
    }

    impl std::error::Error for Legacy {}

    impl RootCause for Legacy {
        fn root_cause(&self) -> AnyError {
            self.0.clone()
        }
    }

    impl_inspect!(Legacy: root_cause);

    #[test]
    fn test_nil_defaults() {
        assert_eq!(message(None), "");
        assert_eq!(user_message(None), "");
        assert_eq!(code(None), "");
        assert_eq!(exit_status(None), 0);
        assert_eq!(http_status(None), 200);
        assert_eq!(domain(None), "");
        assert!(causes(None).is_empty());
        assert!(associated(None).is_empty());
        assert!(tags(None).is_empty());
        assert!(attributes(None).is_empty());
        assert!(time(None).is_none());
        assert_eq!(trace_id(None), "");
        assert_eq!(span_id(None), "");
    }

    #[test]
    fn test_plain_error_fallbacks() {
        let err = Plain("plain");
        let err: &dyn Inspect = &err;
        assert_eq!(message(Some(err)), "plain");
        assert_eq!(user_message(Some(err)), "plain");
        assert_eq!(code(Some(err)), CODE_UNSPECIFIED);
        assert_eq!(exit_status(Some(err)), DEFAULT_EXIT_STATUS);
        assert_eq!(http_status(Some(err)), DEFAULT_HTTP_STATUS);
        assert_eq!(domain(Some(err)), "unknown");
        assert!(causes(Some(err)).is_empty());
        assert!(time(Some(err)).is_none());
    }

    #[test]
    fn test_capability_wins_over_display() {
        let err = Verbose;
        assert_eq!(message(Some(&err)), "query failed");
        assert_eq!(user_message(Some(&err)), "query failed: connection reset by peer");
        assert_eq!(code(Some(&err)), "E_QUERY");
    }

    #[test]
    fn test_tags_are_deduplicated() {
        let tags = tags(Some(&Sloppy));
        assert_eq!(tags.len(), 2);
        assert!(tags.contains("net"));
        assert!(tags.contains("db"));
    }

    #[test]
    fn test_causes_from_unwrap_all() {
        let batch = Batch(vec![
            AnyError::new(Plain("a")),
            AnyError::new(Plain("b")),
        ]);
        let found = causes(Some(&batch));
        let messages: Vec<_> = found.iter().map(|c| c.to_string()).collect();
        assert_eq!(messages, vec!["a", "b"]);
    }

    #[test]
    fn test_causes_from_root_cause() {
        let legacy = Legacy(AnyError::new(Plain("root")));
        let found = causes(Some(&legacy));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].to_string(), "root");
    }

    #[derive(Debug)]
    struct Outer(Plain);

    impl fmt::Display for Outer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "outer")
        }
    }

    impl std::error::Error for Outer {
        fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn test_causes_from_source_chain() {
        let outer = crate::Foreign::new(Outer(Plain("inner")));
        let found = causes(Some(&outer));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].to_string(), "inner");
    }

    #[test]
    fn test_record_facets_are_not_merged_with_causes() {
        let fault = Fault::builder()
            .cause(Fault::builder().tag("inner").exit_status(9).msg("inner"))
            .tag("outer")
            .exit_status(2)
            .msg("outer");
        assert_eq!(exit_status(Some(&fault)), 2);
        assert_eq!(tags(Some(&fault)).into_iter().collect::<Vec<_>>(), vec!["outer"]);
    }

    #[test]
    fn test_record_without_exit_status_resolves_causes() {
        let fault = Fault::builder()
            .cause(Fault::builder().exit_status(9).msg("inner"))
            .cause(Plain("plain"))
            .msg("outer");
        assert_eq!(exit_status(Some(&fault)), 9);
        assert_eq!(http_status(Some(&fault)), DEFAULT_HTTP_STATUS);
        assert_eq!(code(Some(&fault)), CODE_UNSPECIFIED);
    }
}
