//! Resolution of numeric and code facets across direct causes

use crate::any::AnyError;
use crate::facet;
use crate::record::{CODE_UNSPECIFIED, DEFAULT_EXIT_STATUS, DEFAULT_HTTP_STATUS};

/// Largest exit status among the causes that report one, never below 1
///
/// Only direct causes exposing the exit-status capability count. A cause
/// without it contributes nothing, even if its own causes do.
pub fn max_exit_status(causes: &[AnyError]) -> i32 {
    causes
        .iter()
        .filter_map(|cause| cause.as_exit_status())
        .map(|cap| cap.error_exit_status())
        .fold(DEFAULT_EXIT_STATUS, i32::max)
}

/// Largest HTTP status among the causes that report one, never below 500
pub fn max_http_status(causes: &[AnyError]) -> u16 {
    causes
        .iter()
        .filter_map(|cause| cause.as_http_status())
        .map(|cap| cap.error_http_status())
        .fold(DEFAULT_HTTP_STATUS, u16::max)
}

/// Code of the cause with the strictly highest exit status
///
/// Causes are visited in order; each one's code and exit status are
/// themselves resolved through [`facet`], which recurses into causes that
/// lack the capabilities. A cause that does not beat the best exit status so
/// far can still supply the code while none has been found yet.
///
/// The walk has no cycle detection. Records are immutable and cannot form
/// cycles; custom error types that report themselves as their own cause do
/// not terminate.
pub fn dominant_code(causes: &[AnyError]) -> String {
    let mut best_status = 0;
    let mut best_code = CODE_UNSPECIFIED.to_string();

    for cause in causes {
        let status = facet::exit_status(Some(cause.inspect()));
        let code = facet::code(Some(cause.inspect()));
        if status > best_status {
            best_status = status;
            best_code = code;
        } else if best_code == CODE_UNSPECIFIED && code != CODE_UNSPECIFIED {
            best_code = code;
        }
    }

    best_code
}
