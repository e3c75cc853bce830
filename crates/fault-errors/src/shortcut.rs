//! One-call constructors and single-facet overrides

use crate::any::AnyError;
use crate::builder::FaultBuilder;
use crate::record::Fault;

/// Record with a message and default facets
///
/// An empty message yields the placeholder message.
pub fn msg(message: impl Into<String>) -> Fault {
    FaultBuilder::new().msg(message)
}

/// Record with a message and one cause
pub fn wrap(message: impl Into<String>, cause: impl Into<AnyError>) -> Fault {
    FaultBuilder::new().cause(cause).msg(message)
}

/// Record with a message and several causes, `None` when no cause is given
pub fn wrap_many<I>(message: impl Into<String>, causes: I) -> Option<Fault>
where
    I: IntoIterator,
    I::Item: Into<Option<AnyError>>,
{
    let causes: Vec<AnyError> = causes.into_iter().filter_map(Into::into).collect();
    if causes.is_empty() {
        return None;
    }
    Some(FaultBuilder::new().causes(causes).msg(message))
}

impl AnyError {
    /// Same error with the exit status replaced
    ///
    /// The error is derived into a new record. Non-positive statuses return
    /// the handle unchanged.
    pub fn with_exit_status(self, status: i32) -> AnyError {
        if status <= 0 {
            return self;
        }
        FaultBuilder::derive(self.inspect())
            .exit_status(status)
            .build()
            .into()
    }

    /// Same error with the HTTP status replaced; statuses outside
    /// `400..=599` return the handle unchanged
    pub fn with_http_status(self, status: u16) -> AnyError {
        if !(400..=599).contains(&status) {
            return self;
        }
        FaultBuilder::derive(self.inspect())
            .http_status(status)
            .build()
            .into()
    }

    /// Same error with the domain replaced; an empty domain returns the
    /// handle unchanged
    pub fn with_domain(self, domain: impl Into<String>) -> AnyError {
        let domain = domain.into();
        if domain.is_empty() {
            return self;
        }
        FaultBuilder::derive(self.inspect())
            .domain(domain)
            .build()
            .into()
    }
}
