use dc_widget_parser::{DiagnosticSink, WidgetValueError};

/// Reports unexpected parse failures to the browser console.
pub struct ConsoleSink;

impl DiagnosticSink for ConsoleSink {
    fn report(&self, raw: &str, error: &WidgetValueError) {
        gloo_console::error!(format!("widget value parse failed for {raw:?}: {error}"));
    }
}
