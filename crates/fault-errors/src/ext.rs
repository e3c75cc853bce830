//! Extension trait for wrapping errors in `Result`s

use crate::any::AnyError;
use crate::record::Fault;
use crate::shortcut::wrap;

/// Wrap the error of a `Result` in a [`Fault`] carrying it as the only cause
///
/// Works for any error convertible into [`AnyError`]: records, handles and
/// every [`Inspect`](crate::Inspect) type, whose capabilities the cause keeps.
/// Plain library errors go through [`Foreign`](crate::Foreign) first.
///
/// ```
/// use fault_errors::{facet, Foreign, ResultExt};
///
/// let parsed: Result<u16, _> = "x".parse::<u16>();
/// let err = parsed.map_err(Foreign::new).wrap_err("bad port").unwrap_err();
/// assert_eq!(err.message(), "bad port");
/// assert_eq!(facet::causes(Some(&err)).len(), 1);
/// ```
pub trait ResultExt<T> {
    /// Wrap the error with a message
    fn wrap_err(self, message: impl Into<String>) -> crate::Result<T>;

    /// Wrap the error with a message computed only on failure
    fn wrap_err_with<F: FnOnce() -> String>(self, f: F) -> crate::Result<T>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<AnyError>,
{
    fn wrap_err(self, message: impl Into<String>) -> crate::Result<T> {
        self.map_err(|err| wrap(message, err))
    }

    fn wrap_err_with<F: FnOnce() -> String>(self, f: F) -> crate::Result<T> {
        self.map_err(|err| wrap(f(), err))
    }
}

impl<T> ResultExt<T> for Option<T> {
    fn wrap_err(self, message: impl Into<String>) -> crate::Result<T> {
        self.ok_or_else(|| Fault::builder().msg(message))
    }

    fn wrap_err_with<F: FnOnce() -> String>(self, f: F) -> crate::Result<T> {
        self.ok_or_else(|| Fault::builder().msg(f()))
    }
}
