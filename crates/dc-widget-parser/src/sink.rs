use tracing::error;

use crate::WidgetValueError;

/// Receives parse failures that were not expected from well-formed input.
///
/// Only [`WidgetValueError::InternalParseError`] is reported; validation
/// failures are ordinary results and never reach the sink.
pub trait DiagnosticSink {
    fn report(&self, raw: &str, error: &WidgetValueError);
}

/// Default sink: emits a `tracing` error event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, raw: &str, error: &WidgetValueError) {
        error!(raw, %error, "widget value parse failed");
    }
}

impl<F> DiagnosticSink for F
where
    F: Fn(&str, &WidgetValueError),
{
    fn report(&self, raw: &str, error: &WidgetValueError) {
        self(raw, error)
    }
}
