// Copyright (c) 2016-2021 Fabian Schuiki

//! Utilities to implement diagnostics and error reporting facilities.

use std::cell::{Cell, RefCell};
use std::fmt;

/// Emits diagnostic messages.
pub trait DiagEmitter {
    /// Emit a diagnostic message.
    fn emit(&self, diag: DiagBuilder);
}

impl<'a, T> DiagEmitter for &'a T
where
    T: DiagEmitter + ?Sized,
{
    fn emit(&self, diag: DiagBuilder) {
        (*self).emit(diag)
    }
}

/// Used to emit structured diagnostic messages.
#[must_use]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiagBuilder {
    pub severity: Severity,
    pub message: String,
    pub segments: Vec<DiagSegment>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DiagSegment {
    Note(String),
}

impl DiagBuilder {
    pub fn new<S: Into<String>>(severity: Severity, message: S) -> DiagBuilder {
        DiagBuilder {
            severity,
            message: message.into(),
            segments: Vec::new(),
        }
    }

    pub fn error<S: Into<String>>(message: S) -> DiagBuilder {
        DiagBuilder::new(Severity::Error, message)
    }

    pub fn warning<S: Into<String>>(message: S) -> DiagBuilder {
        DiagBuilder::new(Severity::Warning, message)
    }

    /// Attach a note that gives context to the message.
    pub fn add_note<S: Into<String>>(mut self, message: S) -> DiagBuilder {
        self.segments.push(DiagSegment::Note(message.into()));
        self
    }

    pub fn get_severity(&self) -> Severity {
        self.severity
    }

    pub fn get_message(&self) -> &String {
        &self.message
    }
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum Severity {
    Warning,
    Error,
}

impl Severity {
    pub fn to_str(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl fmt::Display for DiagBuilder {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let colorcode = match self.get_severity() {
            Severity::Error => "\x1B[31;1m",
            Severity::Warning => "\x1B[33;1m",
        };
        write!(
            f,
            "{}{}:\x1B[m\x1B[1m {}\x1B[m\n",
            colorcode,
            self.get_severity(),
            self.get_message()
        )?;

        for segment in &self.segments {
            match *segment {
                DiagSegment::Note(ref message) => {
                    write!(f, "   = \x1B[1mnote:\x1B[m {}\n", message)?
                }
            }
        }

        Ok(())
    }
}

/// Prints diagnostics to stderr as they are emitted.
#[derive(Default, Debug)]
pub struct StderrEmitter {
    worst: Cell<Option<Severity>>,
}

impl StderrEmitter {
    pub fn new() -> Self {
        Default::default()
    }

    /// The most severe diagnostic emitted so far.
    pub fn worst(&self) -> Option<Severity> {
        self.worst.get()
    }

    /// Check whether any error has been emitted.
    pub fn has_errors(&self) -> bool {
        self.worst().map_or(false, |s| s >= Severity::Error)
    }
}

impl DiagEmitter for StderrEmitter {
    fn emit(&self, diag: DiagBuilder) {
        if self.worst.get().map_or(true, |s| diag.severity > s) {
            self.worst.set(Some(diag.severity));
        }
        eprint!("{}", diag);
    }
}

/// Records diagnostics in memory, for library callers that want to inspect
/// them after a pass.
#[derive(Default, Debug)]
pub struct DiagCollector {
    diags: RefCell<Vec<DiagBuilder>>,
}

impl DiagCollector {
    pub fn new() -> Self {
        Default::default()
    }

    /// A snapshot of the diagnostics emitted so far.
    pub fn diags(&self) -> Vec<DiagBuilder> {
        self.diags.borrow().clone()
    }

    /// The number of diagnostics of the given severity.
    pub fn count(&self, severity: Severity) -> usize {
        self.diags
            .borrow()
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.diags.borrow().is_empty()
    }

    /// Check whether any diagnostic message contains `needle`.
    pub fn mentions(&self, needle: &str) -> bool {
        self.diags
            .borrow()
            .iter()
            .any(|d| d.message.contains(needle))
    }
}

impl DiagEmitter for DiagCollector {
    fn emit(&self, diag: DiagBuilder) {
        self.diags.borrow_mut().push(diag);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collector_counts_by_severity() {
        let diag = DiagCollector::new();
        diag.emit(DiagBuilder::warning("non-terminal 'a' has no production rule"));
        diag.emit(DiagBuilder::warning("something else"));
        diag.emit(DiagBuilder::error("symbol 'b' not found"));
        assert_eq!(diag.count(Severity::Warning), 2);
        assert_eq!(diag.count(Severity::Error), 1);
        assert!(diag.mentions("'b' not found"));
        assert!(!diag.mentions("'c'"));
    }

    #[test]
    fn stderr_emitter_tracks_worst() {
        let emitter = StderrEmitter::new();
        assert!(!emitter.has_errors());
        emitter.emit(DiagBuilder::warning("careful"));
        assert_eq!(emitter.worst(), Some(Severity::Warning));
        assert!(!emitter.has_errors());
        emitter.emit(DiagBuilder::error("broken"));
        emitter.emit(DiagBuilder::warning("after the fact"));
        assert_eq!(emitter.worst(), Some(Severity::Error));
        assert!(emitter.has_errors());
    }

    #[test]
    fn display_includes_notes() {
        let d = DiagBuilder::warning("mixed alternation").add_note("in <foo>");
        let text = format!("{}", d);
        assert!(text.contains("warning:"));
        assert!(text.contains("mixed alternation"));
        assert!(text.contains("note:\x1B[m in <foo>"));
    }
}
