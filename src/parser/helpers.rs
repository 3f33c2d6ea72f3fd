/// Token-stream helpers and error recovery.
///
/// This chunk contains the low-level primitives used throughout parsing:
/// - Peeking/consuming tokens (`peek`, `peek_at`, `advance`)
/// - Matching / expecting keywords, operators, and punctuation
/// - Layout handling (`skip_line_breaks`)
/// - Terminator handling shared by statements and blocks
///
/// Most functions in this file are internal (`fn`) and are documented primarily
/// to aid maintenance and onboarding.
impl<'a> Parser<'a> {
    // ========================================================================
    // Helpers
    // ========================================================================

    /// Return `true` if the current token is [`TokenKind::Eof`] or past the end.
    fn is_at_end(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Eof)
    }

    /// Return the current token without consuming it.
    fn peek(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&self.eof)
    }

    /// Return the token `offset` positions ahead without consuming anything.
    ///
    /// The assignment-target and block-header alternatives need up to four tokens
    /// of lookahead; everything else uses one.
    fn peek_at(&self, offset: usize) -> &Token {
        self.tokens.get(self.pos + offset).unwrap_or(&self.eof)
    }

    /// Return the token after the current token without consuming it.
    fn peek_next(&self) -> &Token {
        self.peek_at(1)
    }

    /// Advance to the next token and return the token we just consumed.
    fn advance(&mut self) -> &Token {
        if self.pos < self.tokens.len() {
            self.pos += 1;
            &self.tokens[self.pos - 1]
        } else {
            &self.eof
        }
    }

    /// Return the span of the most recently consumed token.
    fn previous_span(&self) -> Span {
        if self.pos == 0 {
            self.current_span()
        } else {
            self.tokens[self.pos - 1].span
        }
    }

    fn current_span(&self) -> Span {
        self.peek().span
    }

    fn check_keyword(&self, id: KeywordId) -> bool {
        self.peek().kind.is_keyword(id)
    }

    fn check_op(&self, id: OperatorId) -> bool {
        self.peek().kind.is_operator(id)
    }

    fn check_punct(&self, id: PunctuationId) -> bool {
        self.peek().kind.is_punctuation(id)
    }

    fn match_keyword(&mut self, id: KeywordId) -> bool {
        if self.check_keyword(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_op(&mut self, id: OperatorId) -> bool {
        if self.check_op(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_punct(&mut self, id: PunctuationId) -> bool {
        if self.check_punct(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect_keyword(&mut self, id: KeywordId, msg: &str) -> Result<(), Diagnostic> {
        if self.match_keyword(id) {
            Ok(())
        } else {
            Err(self.unexpected(msg))
        }
    }

    fn expect_punct(&mut self, id: PunctuationId, msg: &str) -> Result<(), Diagnostic> {
        if self.match_punct(id) {
            Ok(())
        } else {
            Err(self.unexpected(msg))
        }
    }

    /// Build an `UnexpectedToken`/`UnexpectedEndOfInput` diagnostic at the cursor.
    fn unexpected(&self, msg: &str) -> Diagnostic {
        if self.is_at_end() {
            Diagnostic::unexpected_eof(format!("{}, found end of input", msg), self.current_span())
        } else {
            Diagnostic::unexpected_token(
                format!("{}, found {:?}", msg, self.peek().kind),
                self.current_span(),
            )
        }
    }

    fn skip_line_breaks(&mut self) {
        while matches!(self.peek().kind, TokenKind::LineBreak) {
            self.advance();
        }
    }

    /// Return `true` if the current token closes a statement or block
    /// (`STATEMENT_END`, `END`, `;`, a line break, or end of input).
    fn at_terminator(&self) -> bool {
        self.is_at_end() || self.peek().kind.is_terminator()
    }

    /// Return `true` if the current token closes a *block* scope: `END`,
    /// `STATEMENT_END`/`;`, or end of input. Line breaks do not close blocks.
    fn at_block_end(&self) -> bool {
        self.is_at_end()
            || matches!(
                self.peek().kind,
                TokenKind::StatementEnd
                    | TokenKind::Keyword(KeywordId::End)
                    | TokenKind::Punctuation(PunctuationId::Semi)
            )
    }

    /// Consume a statement terminator.
    ///
    /// `STATEMENT_END`, `END`, and a raw line break are interchangeable. End of
    /// input closes a statement silently (Clarion statement ends are sometimes
    /// absent), yielding [`Terminator::Implicit`].
    fn statement_terminator(&mut self, msg: &str) -> Result<Terminator, Diagnostic> {
        match &self.peek().kind {
            TokenKind::StatementEnd | TokenKind::Punctuation(PunctuationId::Semi) => {
                self.advance();
                Ok(Terminator::StatementEnd)
            }
            TokenKind::Keyword(KeywordId::End) => {
                self.advance();
                Ok(Terminator::End)
            }
            TokenKind::LineBreak => {
                self.advance();
                Ok(Terminator::LineBreak)
            }
            TokenKind::Eof => Ok(Terminator::Implicit),
            _ => {
                // One-token error-skip: drop the offender and retry once.
                let diag = self.unexpected(msg);
                self.advance();
                if self.at_terminator() {
                    self.diagnostics.push(diag);
                    self.statement_terminator(msg)
                } else {
                    Err(diag)
                }
            }
        }
    }

    /// Consume a block terminator (`END` or `STATEMENT_END`), tolerating leading
    /// line breaks.
    ///
    /// If the scope ends without one, a diagnostic is emitted and an implicit End
    /// is synthesized so the enclosing scope sees the remaining tokens.
    fn block_end(&mut self, what: &str) -> Terminator {
        self.skip_line_breaks();
        match &self.peek().kind {
            TokenKind::Keyword(KeywordId::End) => {
                self.advance();
                Terminator::End
            }
            TokenKind::StatementEnd | TokenKind::Punctuation(PunctuationId::Semi) => {
                self.advance();
                Terminator::StatementEnd
            }
            TokenKind::Eof => {
                tracing::debug!(block = what, "synthesizing implicit END at end of input");
                let diag = Diagnostic::unexpected_eof(
                    format!("{} not closed before end of input", what),
                    self.current_span(),
                );
                self.diagnostics.push(diag);
                Terminator::Implicit
            }
            _ => {
                tracing::debug!(block = what, "synthesizing implicit END before foreign token");
                let diag = Diagnostic::unexpected_token(
                    format!("expected END to close {}, found {:?}", what, self.peek().kind),
                    self.current_span(),
                );
                self.diagnostics.push(diag);
                Terminator::Implicit
            }
        }
    }
}
