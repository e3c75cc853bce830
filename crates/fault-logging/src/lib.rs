//! Structured logging of faults
//!
//! This crate provides:
//! - Single initialization point via `init(profile)`
//! - The `log_fault!` macro, emitting one structured event per error with
//!   its facets as `err.*` fields
//! - Test capture mode for deterministic assertions
//!
//! # Usage
//!
//! ```rust
//! use fault_logging::{init, log_fault, Profile};
//!
//! init(Profile::Development);
//!
//! let err = fault_errors::Fault::builder().code("E_DB").msg("db failed");
//! log_fault!("load_user", err, user_id = 42);
//! ```

pub mod fields;
pub mod init;
pub mod macros;
pub mod test_capture;

pub use fault_core_types::schema;
pub use fields::FaultFields;
pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};

#[doc(hidden)]
pub use tracing;
