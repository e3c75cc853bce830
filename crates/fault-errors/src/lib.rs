//! Structured errors with facet extraction and cause-chain resolution
//!
//! An error here is a bundle of independently queryable facets: message,
//! user message, code, exit status, HTTP status, domain, causes, associated
//! errors, tags, attributes, time and tracing ids.
//!
//! - [`Fault`] is the immutable record carrying every facet, built with
//!   [`FaultBuilder`]
//! - [`capability`] defines one trait per facet, discovered at runtime
//!   through [`Inspect`]
//! - [`facet`] extracts a facet from any error, falling back to
//!   [`resolve`] over its causes when the error does not supply it
//! - [`projection`] renders errors as JSON
//!
//! # Usage
//!
//! ```rust
//! use fault_errors::{facet, msg, Fault};
//!
//! let cause = Fault::builder().code("E_CONN").exit_status(3).msg("connection reset");
//! let err = Fault::builder().cause(cause).cause(msg("retry exhausted")).msg("db failed");
//!
//! // nothing set on the outer record, so the causes decide
//! assert_eq!(facet::exit_status(Some(&err)), 3);
//! assert_eq!(facet::code(Some(&err)), "E_CONN");
//! assert_eq!(err.exit_status(), 1);
//! ```

pub mod any;
pub mod builder;
pub mod capability;
pub mod ext;
pub mod facet;
pub mod projection;
pub mod record;
pub mod resolve;
pub mod shortcut;

pub use any::{AnyError, Foreign};
pub use builder::FaultBuilder;
pub use capability::Inspect;
pub use ext::ResultExt;
pub use projection::ProjectionOptions;
pub use record::{Fault, CODE_UNSPECIFIED, DEFAULT_EXIT_STATUS, DEFAULT_HTTP_STATUS, EMPTY_MESSAGE};
pub use shortcut::{msg, wrap, wrap_many};

/// Result type alias using Fault
pub type Result<T, E = Fault> = std::result::Result<T, E>;
