//! Collector for warnings raised while parsing a document.

use crate::error::Diagnostic;

/// Accumulates non-fatal diagnostics for one document.
///
/// Fatal diagnostics never pass through the collector: parsing is
/// fail-fast and returns them directly.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a diagnostic to this collector.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Finish collection and return everything emitted, in order.
    pub fn finish(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collector_new_finish_empty() {
        assert!(DiagnosticCollector::new().finish().is_empty());
    }

    #[test]
    fn test_collector_keeps_order() {
        let mut collector = DiagnosticCollector::new();

        collector.emit(Diagnostic::warning("warning 1"));
        collector.emit(Diagnostic::warning("warning 2"));

        let diagnostics = collector.finish();
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics[0].message(), "warning 1");
        assert_eq!(diagnostics[1].message(), "warning 2");
    }
}
