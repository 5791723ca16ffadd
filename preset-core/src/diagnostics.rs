//! Diagnostic sink shared between pass producers and the host.

use std::{
    fmt,
    sync::{
        Arc, Mutex, MutexGuard, PoisonError,
        atomic::{AtomicBool, Ordering},
    },
};

use crate::{Diagnostic, Severity};

/// Callback invoked synchronously for every recorded diagnostic.
pub type DiagnosticReporter = Arc<dyn Fn(Severity, &str) + Send + Sync>;

/// Accumulates diagnostics for one transformation unit.
///
/// Messages keep their insertion order and duplicates are kept. The sink is
/// `Send + Sync` so a pass can hold it behind an `Arc` while the host keeps
/// another handle to read the results.
///
/// # Example
///
/// ```
/// use ngpreset_core::{Diagnostics, Severity};
///
/// let diagnostics = Diagnostics::new();
/// diagnostics.warn("translation for 'greeting' is empty");
/// diagnostics.add(Severity::Ignore, "dropped");
///
/// assert_eq!(diagnostics.len(), 1);
/// assert!(!diagnostics.has_errors());
/// ```
#[derive(Default)]
pub struct Diagnostics {
    messages: Mutex<Vec<Diagnostic>>,
    has_errors: AtomicBool,
    reporter: Option<DiagnosticReporter>,
}

impl Diagnostics {
    /// Create an empty sink with no reporter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty sink that forwards every message to `reporter`.
    pub fn with_reporter(reporter: Option<DiagnosticReporter>) -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
            has_errors: AtomicBool::new(false),
            reporter,
        }
    }

    /// Record a message.
    ///
    /// [`Severity::Ignore`] messages are dropped without reaching the reporter.
    pub fn add(&self, severity: Severity, message: impl Into<String>) {
        if severity.is_ignored() {
            return;
        }

        let message = message.into();
        self.lock().push(Diagnostic::new(severity, message.as_str()));
        if severity.is_error() {
            self.has_errors.store(true, Ordering::SeqCst);
        }

        // Reporter runs outside the lock so it may read this sink.
        if let Some(reporter) = &self.reporter {
            reporter(severity, &message);
        }
    }

    /// Record an error.
    pub fn error(&self, message: impl Into<String>) {
        self.add(Severity::Error, message);
    }

    /// Record a warning.
    pub fn warn(&self, message: impl Into<String>) {
        self.add(Severity::Warning, message);
    }

    /// Record an informational message.
    pub fn info(&self, message: impl Into<String>) {
        self.add(Severity::Info, message);
    }

    /// Replay every message of `other` through [`Diagnostics::add`].
    pub fn merge(&self, other: &Diagnostics) {
        for diagnostic in other.messages() {
            self.add(diagnostic.severity, diagnostic.message);
        }
    }

    /// Rendering diagnostics is the host's job.
    ///
    /// # Panics
    ///
    /// Always panics. Reaching this is a caller contract violation.
    pub fn format_diagnostics(&self, _message: &str) -> ! {
        panic!("Diagnostics::format_diagnostics must not be called from within a transform pass");
    }

    /// Whether at least one error was recorded.
    pub fn has_errors(&self) -> bool {
        self.has_errors.load(Ordering::SeqCst)
    }

    /// Whether at least one warning was recorded.
    pub fn has_warnings(&self) -> bool {
        self.lock().iter().any(|d| d.severity.is_warning())
    }

    /// Snapshot of all recorded messages in insertion order.
    pub fn messages(&self) -> Vec<Diagnostic> {
        self.lock().clone()
    }

    /// All error diagnostics.
    pub fn errors(&self) -> Vec<Diagnostic> {
        self.filtered(Severity::Error)
    }

    /// All warning diagnostics.
    pub fn warnings(&self) -> Vec<Diagnostic> {
        self.filtered(Severity::Warning)
    }

    /// Count the number of error diagnostics.
    pub fn error_count(&self) -> usize {
        self.lock().iter().filter(|d| d.severity.is_error()).count()
    }

    /// Count the number of warning diagnostics.
    pub fn warning_count(&self) -> usize {
        self.lock().iter().filter(|d| d.severity.is_warning()).count()
    }

    /// Number of recorded messages.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether no message was recorded.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn filtered(&self, severity: Severity) -> Vec<Diagnostic> {
        self.lock()
            .iter()
            .filter(|d| d.severity == severity)
            .cloned()
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Diagnostic>> {
        self.messages.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Diagnostics")
            .field("messages", &*self.lock())
            .field("has_errors", &self.has_errors())
            .field("reporter", &self.reporter.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recording_reporter() -> (DiagnosticReporter, Arc<Mutex<Vec<(Severity, String)>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let reporter: DiagnosticReporter = Arc::new(move |severity: Severity, message: &str| {
            sink.lock().unwrap().push((severity, message.to_string()));
        });
        (reporter, seen)
    }

    #[test]
    fn test_add_keeps_order_and_duplicates() {
        let diagnostics = Diagnostics::new();
        diagnostics.warn("a");
        diagnostics.info("b");
        diagnostics.warn("a");

        let messages: Vec<_> = diagnostics
            .messages()
            .into_iter()
            .map(|d| d.message)
            .collect();
        assert_eq!(messages, vec!["a", "b", "a"]);
    }

    #[test]
    fn test_ignore_is_dropped() {
        let (reporter, seen) = recording_reporter();
        let diagnostics = Diagnostics::with_reporter(Some(reporter));

        diagnostics.add(Severity::Ignore, "hidden");

        assert!(diagnostics.is_empty());
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_has_errors() {
        let diagnostics = Diagnostics::new();
        diagnostics.warn("just a warning");
        assert!(!diagnostics.has_errors());
        assert!(diagnostics.has_warnings());

        diagnostics.error("broken");
        assert!(diagnostics.has_errors());
        assert_eq!(diagnostics.error_count(), 1);
        assert_eq!(diagnostics.warning_count(), 1);
    }

    #[test]
    fn test_reporter_receives_messages() {
        let (reporter, seen) = recording_reporter();
        let diagnostics = Diagnostics::with_reporter(Some(reporter));

        diagnostics.error("e");
        diagnostics.info("i");

        assert_eq!(
            *seen.lock().unwrap(),
            vec![(Severity::Error, "e".to_string()), (Severity::Info, "i".to_string())]
        );
    }

    #[test]
    fn test_merge_replays_through_add() {
        let (reporter, seen) = recording_reporter();
        let outer = Diagnostics::with_reporter(Some(reporter));
        let inner = Diagnostics::new();
        inner.warn("nested warning");
        inner.error("nested error");

        outer.merge(&inner);

        assert!(outer.has_errors());
        assert_eq!(outer.messages(), inner.messages());
        assert_eq!(seen.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_merge_into_self() {
        let diagnostics = Diagnostics::new();
        diagnostics.info("once");

        diagnostics.merge(&diagnostics);

        assert_eq!(diagnostics.len(), 2);
    }

    #[test]
    #[should_panic(expected = "must not be called")]
    fn test_format_diagnostics_panics() {
        Diagnostics::new().format_diagnostics("anything");
    }
}
