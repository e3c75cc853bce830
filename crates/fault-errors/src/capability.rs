//! Single-facet capability contracts
//!
//! Each trait lets an error supply exactly one facet. Facets are orthogonal:
//! an error may implement any subset, and implementing one says nothing about
//! the others. Capabilities are discovered at runtime through [`Inspect`],
//! whose probe methods hand out a trait object when the error has opted in.
//!
//! Use [`impl_inspect!`](crate::impl_inspect) to declare which capabilities a
//! type exposes.

use crate::AnyError;
use chrono::{DateTime, Utc};
use fault_core_types::Attributes;

/// Canonical, stable message describing only this error (not its causes)
pub trait ErrorMessage {
    fn error_message(&self) -> String;
}

/// Message safe to show to end users
pub trait ErrorUserMessage {
    fn error_user_message(&self) -> String;
}

/// Stable machine-readable code, letters, digits and underscores only
pub trait ErrorCode {
    fn error_code(&self) -> String;
}

/// Process exit status to use when this error terminates the program
pub trait ErrorExitStatus {
    fn error_exit_status(&self) -> i32;
}

/// HTTP response status for this error
pub trait ErrorHttpStatus {
    fn error_http_status(&self) -> u16;
}

/// Coarse category label, see [`fault_core_types::schema::domain`]
pub trait ErrorDomain {
    fn error_domain(&self) -> String;
}

/// Direct causal predecessors, in attachment order
pub trait ErrorCauses {
    fn error_causes(&self) -> Vec<AnyError>;
}

/// Related but non-causal errors
pub trait ErrorAssociated {
    fn error_associated(&self) -> Vec<AnyError>;
}

/// Tags; implementations should not return duplicates, but extraction
/// deduplicates regardless
pub trait ErrorTags {
    fn error_tags(&self) -> Vec<String>;
}

/// Key-value attributes; the returned map is owned by the caller
pub trait ErrorAttributes {
    fn error_attributes(&self) -> Attributes;
}

/// When the error occurred
pub trait ErrorTime {
    fn error_time(&self) -> Option<DateTime<Utc>>;
}

/// Hex trace id, empty when unset
pub trait ErrorTraceId {
    fn error_trace_id(&self) -> String;
}

/// Hex span id, empty when unset
pub trait ErrorSpanId {
    fn error_span_id(&self) -> String;
}

/// Legacy shape: an error that unwraps to several errors at once
pub trait UnwrapAll {
    fn unwrap_all(&self) -> Vec<AnyError>;
}

/// Legacy shape: an error exposing one named root cause
pub trait RootCause {
    fn root_cause(&self) -> AnyError;
}

/// Runtime probe for capabilities
///
/// Every probe defaults to `None`. Implementations override the probes for
/// the capabilities they implement, returning `Some(self)`. The single-error
/// unwrap shape needs no probe: it is [`std::error::Error::source`].
pub trait Inspect: std::error::Error + Send + Sync + 'static {
    /// View as a plain error object, used for downcasting
    fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static);

    fn as_message(&self) -> Option<&dyn ErrorMessage> {
        None
    }

    fn as_user_message(&self) -> Option<&dyn ErrorUserMessage> {
        None
    }

    fn as_code(&self) -> Option<&dyn ErrorCode> {
        None
    }

    fn as_exit_status(&self) -> Option<&dyn ErrorExitStatus> {
        None
    }

    fn as_http_status(&self) -> Option<&dyn ErrorHttpStatus> {
        None
    }

    fn as_domain(&self) -> Option<&dyn ErrorDomain> {
        None
    }

    fn as_causes(&self) -> Option<&dyn ErrorCauses> {
        None
    }

    fn as_associated(&self) -> Option<&dyn ErrorAssociated> {
        None
    }

    fn as_tags(&self) -> Option<&dyn ErrorTags> {
        None
    }

    fn as_attributes(&self) -> Option<&dyn ErrorAttributes> {
        None
    }

    fn as_time(&self) -> Option<&dyn ErrorTime> {
        None
    }

    fn as_trace_id(&self) -> Option<&dyn ErrorTraceId> {
        None
    }

    fn as_span_id(&self) -> Option<&dyn ErrorSpanId> {
        None
    }

    fn as_unwrap_all(&self) -> Option<&dyn UnwrapAll> {
        None
    }

    fn as_root_cause(&self) -> Option<&dyn RootCause> {
        None
    }
}

/// Implement [`Inspect`] for a type, listing the capabilities it exposes
///
/// Capability names: `message`, `user_message`, `code`, `exit_status`,
/// `http_status`, `domain`, `causes`, `associated`, `tags`, `attributes`,
/// `time`, `trace_id`, `span_id`, `unwrap_all`, `root_cause`.
///
/// # Example
///
/// ```
/// use fault_errors::capability::ErrorExitStatus;
/// use fault_errors::{facet, impl_inspect};
///
/// #[derive(Debug)]
/// struct Busy;
///
/// impl std::fmt::Display for Busy {
///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
///         write!(f, "resource busy")
///     }
/// }
///
/// impl std::error::Error for Busy {}
///
/// impl ErrorExitStatus for Busy {
///     fn error_exit_status(&self) -> i32 {
///         75
///     }
/// }
///
/// impl_inspect!(Busy: exit_status);
///
/// assert_eq!(facet::exit_status(Some(&Busy)), 75);
/// ```
#[macro_export]
macro_rules! impl_inspect {
    (@probe message) => {
        fn as_message(&self) -> ::core::option::Option<&dyn $crate::capability::ErrorMessage> {
            ::core::option::Option::Some(self)
        }
    };
    (@probe user_message) => {
        fn as_user_message(
            &self,
        ) -> ::core::option::Option<&dyn $crate::capability::ErrorUserMessage> {
            ::core::option::Option::Some(self)
        }
    };
    (@probe code) => {
        fn as_code(&self) -> ::core::option::Option<&dyn $crate::capability::ErrorCode> {
            ::core::option::Option::Some(self)
        }
    };
    (@probe exit_status) => {
        fn as_exit_status(
            &self,
        ) -> ::core::option::Option<&dyn $crate::capability::ErrorExitStatus> {
            ::core::option::Option::Some(self)
        }
    };
    (@probe http_status) => {
        fn as_http_status(
            &self,
        ) -> ::core::option::Option<&dyn $crate::capability::ErrorHttpStatus> {
            ::core::option::Option::Some(self)
        }
    };
    (@probe domain) => {
        fn as_domain(&self) -> ::core::option::Option<&dyn $crate::capability::ErrorDomain> {
            ::core::option::Option::Some(self)
        }
    };
    (@probe causes) => {
        fn as_causes(&self) -> ::core::option::Option<&dyn $crate::capability::ErrorCauses> {
            ::core::option::Option::Some(self)
        }
    };
    (@probe associated) => {
        fn as_associated(
            &self,
        ) -> ::core::option::Option<&dyn $crate::capability::ErrorAssociated> {
            ::core::option::Option::Some(self)
        }
    };
    (@probe tags) => {
        fn as_tags(&self) -> ::core::option::Option<&dyn $crate::capability::ErrorTags> {
            ::core::option::Option::Some(self)
        }
    };
    (@probe attributes) => {
        fn as_attributes(
            &self,
        ) -> ::core::option::Option<&dyn $crate::capability::ErrorAttributes> {
            ::core::option::Option::Some(self)
        }
    };
    (@probe time) => {
        fn as_time(&self) -> ::core::option::Option<&dyn $crate::capability::ErrorTime> {
            ::core::option::Option::Some(self)
        }
    };
    (@probe trace_id) => {
        fn as_trace_id(&self) -> ::core::option::Option<&dyn $crate::capability::ErrorTraceId> {
            ::core::option::Option::Some(self)
        }
    };
    (@probe span_id) => {
        fn as_span_id(&self) -> ::core::option::Option<&dyn $crate::capability::ErrorSpanId> {
            ::core::option::Option::Some(self)
        }
    };
    (@probe unwrap_all) => {
        fn as_unwrap_all(&self) -> ::core::option::Option<&dyn $crate::capability::UnwrapAll> {
            ::core::option::Option::Some(self)
        }
    };
    (@probe root_cause) => {
        fn as_root_cause(&self) -> ::core::option::Option<&dyn $crate::capability::RootCause> {
            ::core::option::Option::Some(self)
        }
    };
    ($ty:ty $(: $($cap:ident),+ $(,)?)?) => {
        impl $crate::capability::Inspect for $ty {
            fn as_error(&self) -> &(dyn ::std::error::Error + Send + Sync + 'static) {
                self
            }

            $($($crate::impl_inspect!(@probe $cap);)+)?
        }
    };
}
