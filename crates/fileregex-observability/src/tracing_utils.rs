//! Span helpers shared by services.

use tracing::Span;

/// Span for one validation pass.
///
/// ```ignore
/// let span = validation_span!(assignment_id, submission_id);
/// async { /* ... */ }.instrument(span).await;
/// ```
#[macro_export]
macro_rules! validation_span {
    ($assignment:expr, $submission:expr) => {
        tracing::info_span!(
            "fileregex.validate",
            assignment.id = %$assignment,
            submission.id = %$submission,
            validation.result = tracing::field::Empty,
            validation.reason = tracing::field::Empty,
            otel.kind = "internal",
            otel.status_code = tracing::field::Empty
        )
    };
}

/// Log an audit event at INFO level for configuration changes.
#[macro_export]
macro_rules! audit_event {
    ($action:expr, $resource:expr, $($field:tt)*) => {
        tracing::info!(
            audit.action = $action,
            audit.resource = $resource,
            $($field)*
        )
    };
}

/// Record the verdict on the current validation span.
pub fn record_validation(accepted: bool, reason: &str) {
    let span = Span::current();
    span.record("validation.result", if accepted { "accepted" } else { "rejected" });
    span.record("validation.reason", reason);
    span.record("otel.status_code", "OK");
}

/// Adds logging to a `Result` without changing it.
pub trait ErrorExt {
    fn log_error(self, context: &str) -> Self;
}

impl<T, E: std::fmt::Display> ErrorExt for Result<T, E> {
    fn log_error(self, context: &str) -> Self {
        if let Err(ref e) = self {
            tracing::error!(error = %e, context = context, "Operation failed");
        }
        self
    }
}
