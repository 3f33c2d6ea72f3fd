//! Diagnostics for the Clarion structural parser.
//!
//! Nothing in this crate is fatal: parse failure is represented as data, a
//! best-effort tree plus an ordered list of [`Diagnostic`] values. The taxonomy is
//! deliberately small; message text carries the specifics.
//!
//! For host tooling that wants rendered, source-annotated output, [`Diagnostic::render`]
//! lifts a diagnostic into a `miette` report.

use miette::{NamedSource, SourceSpan};
use thiserror::Error;

use crate::tokens::Span;

/// Coarse classification of a parse diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DiagnosticKind {
    /// A token was present but of the wrong kind.
    #[error("unexpected token")]
    UnexpectedToken,
    /// A scope was closed by end of input instead of an explicit terminator.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    /// Lookahead was exhausted without resolving an alternative.
    ///
    /// Defensive: the bounded-lookahead rules should make this unreachable, but it
    /// is surfaced as a diagnostic rather than a crash if they are ever violated.
    #[error("ambiguous construct")]
    AmbiguousConstruct,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// A single parse diagnostic with location information.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    pub span: Span,
    pub severity: Severity,
}

impl Diagnostic {
    pub fn unexpected_token(message: impl Into<String>, span: Span) -> Self {
        Self {
            kind: DiagnosticKind::UnexpectedToken,
            message: message.into(),
            span,
            severity: Severity::Error,
        }
    }

    pub fn unexpected_eof(message: impl Into<String>, span: Span) -> Self {
        Self {
            kind: DiagnosticKind::UnexpectedEndOfInput,
            message: message.into(),
            span,
            severity: Severity::Error,
        }
    }

    pub fn ambiguous(message: impl Into<String>, span: Span) -> Self {
        Self {
            kind: DiagnosticKind::AmbiguousConstruct,
            message: message.into(),
            span,
            severity: Severity::Error,
        }
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Lift this diagnostic into a renderable `miette` report over the given source.
    pub fn render(&self, source_name: &str, source: &str) -> RenderedDiagnostic {
        let len = self.span.end.saturating_sub(self.span.start).max(1);
        RenderedDiagnostic {
            kind: self.kind,
            message: self.message.clone(),
            src: NamedSource::new(source_name, source.to_string()),
            at: SourceSpan::new(self.span.start.into(), len),
        }
    }
}

/// A [`Diagnostic`] bound to its source text, suitable for fancy terminal or
/// editor-side rendering through `miette`.
#[derive(Debug, Error, miette::Diagnostic)]
#[error("{kind}: {message}")]
pub struct RenderedDiagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    #[source_code]
    src: NamedSource<String>,
    #[label("{message}")]
    at: SourceSpan,
}
