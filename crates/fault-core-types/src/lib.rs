//! Core types shared across the fault facilities
//!
//! This crate provides the foundational types used by both the error record
//! and the logging facility:
//!
//! - **Correlation types**: TraceId, SpanId and their parse error
//! - **Context carrier**: ErrorContext, the explicit source of ambient tags,
//!   attributes and tracing ids
//! - **Schema constants**: JSON keys, log field keys, domains and tags

pub mod context;
pub mod correlation;
pub mod schema;

pub use context::{Attributes, ErrorContext};
pub use correlation::{IdError, SpanId, TraceId};
