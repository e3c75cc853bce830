//! Fault logging macros

/// Log an error as one structured event
///
/// The event carries `component`, `op`, `event = "fault"` and the error's
/// facets as `err.*` fields. It is emitted at ERROR when the error's HTTP
/// status is 5xx and at WARN otherwise. Extra fields follow the error.
///
/// The error is borrowed, so pass a [`Fault`](fault_errors::Fault), an
/// [`AnyError`](fault_errors::AnyError) or any other `Inspect` value.
///
/// # Example
///
/// ```
/// # use fault_logging::log_fault;
/// let err = fault_errors::Fault::builder().http_status(404).msg("no such user");
/// log_fault!("load_user", err);
/// log_fault!("load_user", err, user_id = 42);
/// ```
#[macro_export]
macro_rules! log_fault {
    ($op:expr, $err:expr) => {
        $crate::log_fault!($op, $err,)
    };
    ($op:expr, $err:expr, $($field:tt)*) => {{
        let fields = $crate::FaultFields::collect(&$err);
        if fields.is_server_error() {
            $crate::__emit_fault!($crate::tracing::Level::ERROR, $op, fields, $($field)*);
        } else {
            $crate::__emit_fault!($crate::tracing::Level::WARN, $op, fields, $($field)*);
        }
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __emit_fault {
    ($lvl:expr, $op:expr, $fields:ident, $($field:tt)*) => {
        $crate::tracing::event!(
            $lvl,
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_FAULT,
            err.msg = $fields.msg.as_str(),
            err.code = $fields.code.as_str(),
            err.exit_code = $fields.exit_code,
            err.http_status = $fields.http_status,
            err.domain = $fields.domain.as_str(),
            err.trace_id = $fields.trace_id.as_str(),
            err.span_id = $fields.span_id.as_str(),
            err.tags = $fields.tags.as_str(),
            err.attrs = $fields.attrs.as_str(),
            err.causes = $fields.causes,
            $($field)*
        )
    };
}
