/// Shared lexical primitives.
///
/// This chunk implements the leaf constructs every structural parser bottoms out
/// in: identifiers (including keyword spellings used as identifiers), dotted
/// identifiers, property accessors, argument lists, and opaque token capture.
impl<'a> Parser<'a> {
    // ========================================================================
    // Identifiers
    // ========================================================================

    /// Return `true` if the current token can serve as an identifier.
    ///
    /// Clarion keywords are not reserved: `FONT`, `ICON`, `SELF`, etc. are legal
    /// identifiers in most positions. `END` is the one spelling the parser never
    /// reinterprets, since it would swallow block terminators.
    fn check_identifier_like(&self) -> bool {
        match &self.peek().kind {
            TokenKind::Ident(_) => true,
            TokenKind::Keyword(KeywordId::End) => false,
            TokenKind::Keyword(_) => true,
            _ => false,
        }
    }

    /// Consume an identifier, accepting keyword spellings.
    fn identifier_like(&mut self, msg: &str) -> Result<Ident, Diagnostic> {
        match &self.peek().kind {
            TokenKind::Ident(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            TokenKind::Keyword(id) if *id != KeywordId::End => {
                let name = id.as_str().to_string();
                self.advance();
                Ok(name)
            }
            _ => Err(self.unexpected(msg)),
        }
    }

    /// Consume a string literal.
    fn string_literal(&mut self, msg: &str) -> Result<String, Diagnostic> {
        match &self.peek().kind {
            TokenKind::String(s) => {
                let s = s.clone();
                self.advance();
                Ok(s)
            }
            _ => Err(self.unexpected(msg)),
        }
    }

    // ========================================================================
    // Dotted identifiers and property accessors
    // ========================================================================

    /// Parse a dotted identifier: `a`, `a.b.c`, `SELF.x`, `PARENT.y`.
    ///
    /// A `SELF`/`PARENT` spelling acts as a qualifier only when a `.` follows;
    /// otherwise it is an ordinary identifier. With a qualifier present, exactly
    /// one segment follows. A trailing `.` that is not followed by an identifier
    /// is left alone, since it may be a statement terminator in the host's lexing.
    fn dotted_identifier(&mut self) -> Result<DottedIdentifier, Diagnostic> {
        let qualifier = match &self.peek().kind {
            TokenKind::Keyword(KeywordId::SelfKw)
                if self.peek_next().kind.is_punctuation(PunctuationId::Dot) =>
            {
                self.advance();
                self.advance();
                Some(Qualifier::SelfRef)
            }
            TokenKind::Keyword(KeywordId::Parent)
                if self.peek_next().kind.is_punctuation(PunctuationId::Dot) =>
            {
                self.advance();
                self.advance();
                Some(Qualifier::Parent)
            }
            _ => None,
        };

        let first = self.identifier_like("expected identifier")?;
        let mut segments = vec![first];

        if qualifier.is_none() {
            while self.check_punct(PunctuationId::Dot)
                && matches!(
                    self.peek_next().kind,
                    TokenKind::Ident(_) | TokenKind::Keyword(_)
                )
                && !self.peek_next().kind.is_keyword(KeywordId::End)
            {
                self.advance();
                segments.push(self.identifier_like("expected identifier after '.'")?);
            }
        }

        Ok(DottedIdentifier {
            qualifier,
            segments,
        })
    }

    /// Parse a property accessor: `base{property:mod1:mod2}`.
    ///
    /// The caller has already established that the current token is an identifier
    /// followed by `{`.
    fn property_access(&mut self) -> Result<PropertyAccess, Diagnostic> {
        let base = self.identifier_like("expected property base identifier")?;
        self.expect_punct(PunctuationId::LBrace, "expected '{' in property accessor")?;
        let property = self.identifier_like("expected property identifier")?;
        let mut modifiers = Vec::new();
        while self.match_punct(PunctuationId::Colon) {
            modifiers.push(self.identifier_like("expected property modifier after ':'")?);
        }
        self.expect_punct(PunctuationId::RBrace, "expected '}' to close property accessor")?;
        Ok(PropertyAccess {
            base,
            property,
            modifiers,
        })
    }

    // ========================================================================
    // Argument lists
    // ========================================================================

    /// Parse a call argument list; the opening `(` is already consumed and the
    /// caller consumes the closing `)`.
    ///
    /// Each argument is tried as a structured expression first (tentatively, with
    /// cursor backtracking); anything that does not parse cleanly up to the next
    /// `,`/`)` boundary is captured as an opaque token run instead. Clarion embeds
    /// macro-like argument positions that are not true expressions, so the opaque
    /// fallback is part of the grammar, not an error path.
    fn argument_list(&mut self) -> Vec<CallArg> {
        let mut args = Vec::new();
        if self.check_punct(PunctuationId::RParen) {
            return args;
        }
        loop {
            args.push(self.call_argument());
            if !self.match_punct(PunctuationId::Comma) {
                break;
            }
        }
        args
    }

    fn call_argument(&mut self) -> CallArg {
        let saved = self.pos;
        let saved_diags = self.diagnostics.len();
        if let Ok(expr) = self.expression() {
            // Commit only if the expression ended exactly at an argument boundary.
            if self.check_punct(PunctuationId::Comma)
                || self.check_punct(PunctuationId::RParen)
                || self.is_at_end()
            {
                return CallArg::Expr(expr);
            }
        }
        // Backtrack: discard the tentative parse and its diagnostics.
        self.pos = saved;
        self.diagnostics.truncate(saved_diags);
        CallArg::Opaque(self.opaque_run_in_parens())
    }

    /// Capture tokens up to the next `,` or the `)` balancing the enclosing `(`,
    /// tracking nested parentheses.
    fn opaque_run_in_parens(&mut self) -> OpaqueRun {
        let mut tokens = Vec::new();
        let mut depth = 0usize;
        loop {
            match &self.peek().kind {
                TokenKind::Eof => break,
                TokenKind::Punctuation(PunctuationId::LParen) => depth += 1,
                TokenKind::Punctuation(PunctuationId::RParen) => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                }
                TokenKind::Punctuation(PunctuationId::Comma) if depth == 0 => break,
                _ => {}
            }
            let tok = self.advance();
            tokens.push(Spanned::new(tok.lexeme(), tok.span));
        }
        OpaqueRun { tokens }
    }

    /// Consume a balanced `( ... )` span opaquely, returning the inner tokens.
    ///
    /// This is the "ignored attribute" escape valve: the span's content is kept
    /// verbatim and never interpreted. An unbalanced span is cut off at end of
    /// input with a diagnostic.
    fn balanced_paren_span(&mut self) -> Result<OpaqueRun, Diagnostic> {
        self.expect_punct(PunctuationId::LParen, "expected '('")?;
        let mut tokens = Vec::new();
        let mut depth = 0usize;
        loop {
            match &self.peek().kind {
                TokenKind::Eof => {
                    return Err(Diagnostic::unexpected_eof(
                        "unbalanced '(' ran off the end of input",
                        self.current_span(),
                    ));
                }
                TokenKind::Punctuation(PunctuationId::LParen) => depth += 1,
                TokenKind::Punctuation(PunctuationId::RParen) => {
                    if depth == 0 {
                        self.advance();
                        return Ok(OpaqueRun { tokens });
                    }
                    depth -= 1;
                }
                _ => {}
            }
            let tok = self.advance();
            tokens.push(Spanned::new(tok.lexeme(), tok.span));
        }
    }

    /// Parse one ignored attribute: `name` or `name ( anything-until-matching-paren )`.
    fn ignored_attribute(&mut self) -> Result<IgnoredAttribute, Diagnostic> {
        let name = self.identifier_like("expected attribute name")?;
        let content = if self.check_punct(PunctuationId::LParen) {
            Some(self.balanced_paren_span()?)
        } else {
            None
        };
        Ok(IgnoredAttribute { name, content })
    }

    /// Parse the `[, attr]*` decoration tail shared by every UI block header.
    ///
    /// Unparseable attributes are recovered in place: the diagnostic is recorded
    /// and the parse resumes at the next comma or line boundary.
    fn ignored_attribute_list(&mut self) -> Vec<IgnoredAttribute> {
        let mut attrs = Vec::new();
        while self.match_punct(PunctuationId::Comma) {
            match self.ignored_attribute() {
                Ok(attr) => attrs.push(attr),
                Err(diag) => {
                    self.diagnostics.push(diag);
                    while !self.at_terminator() && !self.check_punct(PunctuationId::Comma) {
                        self.advance();
                    }
                }
            }
        }
        attrs
    }

    /// Parse an optional `('Title')` header argument.
    fn optional_title(&mut self) -> Result<Option<String>, Diagnostic> {
        if !self.check_punct(PunctuationId::LParen) {
            return Ok(None);
        }
        self.advance();
        let title = self.string_literal("expected title string")?;
        self.expect_punct(PunctuationId::RParen, "expected ')' after title string")?;
        Ok(Some(title))
    }

    /// Capture a run of tokens up to the end of the current line or enclosing
    /// block terminator. Always consumes at least one token when not at a
    /// boundary, guaranteeing forward progress.
    fn opaque_run_to_line_end(&mut self) -> OpaqueRun {
        let mut tokens = Vec::new();
        while !self.at_terminator() {
            let tok = self.advance();
            tokens.push(Spanned::new(tok.lexeme(), tok.span));
        }
        OpaqueRun { tokens }
    }
}
