// crates/apksplit/src/diag.rs

//! Diagnostics sink used by every fallible operation.
//!
//! Operations report user-facing problems here (anchored at a source location
//! when one is known) and return a typed error to the caller. The sink is
//! append-only; the operations never read back from it.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

/// A location in an input file, optionally narrowed to a line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Source {
    pub path: String,
    pub line: Option<usize>,
}

impl Source {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            line: None,
        }
    }

    /// Returns a copy of this source anchored at `line`.
    pub fn with_line(&self, line: usize) -> Self {
        Self {
            path: self.path.clone(),
            line: Some(line),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{}", self.path, line),
            None => write!(f, "{}", self.path),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DiagLevel {
    Note,
    Warn,
    Error,
}

impl fmt::Display for DiagLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagLevel::Note => write!(f, "note"),
            DiagLevel::Warn => write!(f, "warn"),
            DiagLevel::Error => write!(f, "error"),
        }
    }
}

/// A single diagnostic message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagMessage {
    pub source: Option<Source>,
    pub message: String,
}

impl DiagMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            source: None,
            message: message.into(),
        }
    }

    pub fn at(source: Source, message: impl Into<String>) -> Self {
        Self {
            source: Some(source),
            message: message.into(),
        }
    }
}

impl fmt::Display for DiagMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Some(source) => write!(f, "{}: {}", source, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

/// The sink every operation reports to.
pub trait Diagnostics {
    fn log(&mut self, level: DiagLevel, message: DiagMessage);

    fn error(&mut self, message: DiagMessage) {
        self.log(DiagLevel::Error, message);
    }

    fn warn(&mut self, message: DiagMessage) {
        self.log(DiagLevel::Warn, message);
    }

    fn note(&mut self, message: DiagMessage) {
        self.log(DiagLevel::Note, message);
    }
}

/// Forwards diagnostics to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn log(&mut self, level: DiagLevel, message: DiagMessage) {
        match level {
            DiagLevel::Error => log::error!("{}", message),
            DiagLevel::Warn => log::warn!("{}", message),
            DiagLevel::Note => log::info!("{}", message),
        }
    }
}

/// Records every diagnostic in order. Also mirrors them to `log` at debug level.
#[derive(Debug, Default, Clone)]
pub struct CollectingDiagnostics {
    entries: Vec<(DiagLevel, DiagMessage)>,
}

impl CollectingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[(DiagLevel, DiagMessage)] {
        &self.entries
    }

    pub fn error_count(&self) -> usize {
        self.count(DiagLevel::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(DiagLevel::Warn)
    }

    pub fn count(&self, level: DiagLevel) -> usize {
        self.entries.iter().filter(|(l, _)| *l == level).count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Moves every recorded diagnostic into another sink.
    pub fn drain_into(&mut self, other: &mut dyn Diagnostics) {
        for (level, message) in self.entries.drain(..) {
            other.log(level, message);
        }
    }
}

impl Diagnostics for CollectingDiagnostics {
    fn log(&mut self, level: DiagLevel, message: DiagMessage) {
        log::debug!("[{}] {}", level, message);
        self.entries.push((level, message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_source_display() {
        let src = Source::new("AndroidManifest.xml");
        assert_eq!(src.to_string(), "AndroidManifest.xml");
        assert_eq!(src.with_line(12).to_string(), "AndroidManifest.xml:12");
        // with_line does not touch the original.
        assert_eq!(src.line, None);
    }

    #[test]
    fn test_collecting_preserves_order() {
        let mut diag = CollectingDiagnostics::new();
        diag.error(DiagMessage::new("first"));
        diag.warn(DiagMessage::new("second"));
        diag.note(DiagMessage::at(Source::new("a.xml").with_line(3), "third"));

        let entries = diag.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].0, DiagLevel::Error);
        assert_eq!(entries[1].1.message, "second");
        assert_eq!(entries[2].1.to_string(), "a.xml:3: third");
        assert_eq!(diag.error_count(), 1);
        assert_eq!(diag.warning_count(), 1);
    }

    #[test]
    fn test_drain_into() {
        let mut first = CollectingDiagnostics::new();
        first.warn(DiagMessage::new("w"));
        let mut second = CollectingDiagnostics::new();
        first.drain_into(&mut second);
        assert!(first.is_empty());
        assert_eq!(second.warning_count(), 1);
    }
}
