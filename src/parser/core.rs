/// Parser core types and entrypoint plumbing.
///
/// This chunk defines the [`Parser`] type and the [`ParseOutcome`] wrapper returned
/// by every public entry point.
///
/// ## Notes
/// - This file is `include!`'d into `crate::parser` to keep all parser methods in a
///   single module while avoiding a single "god file".

/// Result of one parse invocation: a best-effort tree plus everything the host
/// needs to publish diagnostics and resume after the construct.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutcome<T> {
    /// The parsed (possibly partial) tree.
    pub node: Spanned<T>,
    /// Number of tokens consumed; the host resumes the next construct here.
    pub consumed: usize,
    /// Ordered diagnostics collected during the parse.
    pub diagnostics: Vec<Diagnostic>,
}

/// Parser state.
///
/// ## Notes
/// - Single pass over an immutable token slice; re-entrant and shareable across
///   worker threads (one parser per invocation, no global state).
/// - Recoverable mismatches are pushed onto `diagnostics` in place; `Result` errors
///   are reserved for leaf-level failures the enclosing structure recovers from.
pub struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    diagnostics: Vec<Diagnostic>,
    /// Synthetic EOF returned when peeking past the end of the slice.
    eof: Token,
}

impl<'a> Parser<'a> {
    /// Create a new parser for a token stream.
    ///
    /// The stream does not need to be EOF-terminated; running off the end behaves
    /// as if a trailing [`TokenKind::Eof`] were present.
    pub fn new(tokens: &'a [Token]) -> Self {
        let end = tokens.last().map(|t| t.span.end).unwrap_or(0);
        Self {
            tokens,
            pos: 0,
            diagnostics: Vec::new(),
            eof: Token::new(TokenKind::Eof, Span::new(end, end)),
        }
    }

    fn into_outcome<T>(self, node: Spanned<T>) -> ParseOutcome<T> {
        ParseOutcome {
            node,
            consumed: self.pos,
            diagnostics: self.diagnostics,
        }
    }
}
