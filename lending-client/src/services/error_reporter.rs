use client_core::ClientError;

/// Centralized sink for errors caught at a screen boundary.
///
/// Implementations must not panic; the caller has already decided to keep
/// the screen alive.
pub trait ErrorReporter: Send + Sync {
    fn report(&self, error: &ClientError, context: &str);
}

#[derive(Debug, Default, Clone)]
pub struct TracingErrorReporter;

impl ErrorReporter for TracingErrorReporter {
    fn report(&self, error: &ClientError, context: &str) {
        if error.is_retryable() {
            tracing::warn!(context = %context, error = %error, "Retryable error");
        } else {
            tracing::error!(context = %context, error = %error, "Unhandled screen error");
        }
    }
}
