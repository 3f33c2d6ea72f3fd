/// FILE / RECORD / KEY declaration parsing.
///
/// A FILE declaration is `name FILE [, attr]* structure END` where structure is a
/// possibly-empty interleaving of KEY definitions and RECORD blocks. The two are
/// disambiguated by lookahead: an identifier followed by `KEY` starts a key, a
/// `RECORD` keyword (optionally preceded by a label) starts a record block.
impl<'a> Parser<'a> {
    // ========================================================================
    // FILE declarations
    // ========================================================================

    fn file_declaration(&mut self) -> Result<FileDeclaration, Diagnostic> {
        let name = self.identifier_like("expected FILE declaration label")?;
        self.expect_keyword(KeywordId::File, "expected FILE keyword")?;

        let mut attributes = Vec::new();
        while self.match_punct(PunctuationId::Comma) {
            match self.file_attribute() {
                Ok(attr) => attributes.push(attr),
                Err(diag) => {
                    self.diagnostics.push(diag);
                    while !self.at_terminator() && !self.check_punct(PunctuationId::Comma) {
                        self.advance();
                    }
                }
            }
        }
        self.skip_line_breaks();

        let mut structures = Vec::new();
        while !self.at_block_end() {
            let start = self.current_span();
            if self.check_keyword(KeywordId::Record) {
                let record = self.record_block(None);
                let span = start.merge(self.previous_span());
                structures.push(Spanned::new(FileStructure::Record(record), span));
            } else if self.check_identifier_like()
                && self.peek_next().kind.is_keyword(KeywordId::Record)
            {
                let label = self.identifier_like("expected record label")?;
                let record = self.record_block(Some(label));
                let span = start.merge(self.previous_span());
                structures.push(Spanned::new(FileStructure::Record(record), span));
            } else if self.check_identifier_like()
                && self.peek_next().kind.is_keyword(KeywordId::Key)
            {
                match self.key_definition() {
                    Ok(key) => {
                        let span = start.merge(self.previous_span());
                        structures.push(Spanned::new(FileStructure::Key(key), span));
                    }
                    Err(diag) => {
                        self.diagnostics.push(diag);
                        while !self.at_terminator() {
                            self.advance();
                        }
                    }
                }
            } else if matches!(self.peek().kind, TokenKind::LineBreak) {
                self.advance();
            } else {
                // Foreign token inside the FILE structure: report once, step over it.
                let diag = self.unexpected("expected KEY definition or RECORD block");
                self.diagnostics.push(diag);
                self.advance();
            }
        }

        let terminator = self.block_end("FILE declaration");
        Ok(FileDeclaration {
            name,
            attributes,
            structures,
            terminator,
        })
    }

    /// One FILE attribute: `name` or `name(arg)` with a single raw argument
    /// (`PRE(CUS)`, `DRIVER('TopSpeed')`).
    fn file_attribute(&mut self) -> Result<FileAttribute, Diagnostic> {
        let name = self.identifier_like("expected FILE attribute name")?;
        let argument = if self.match_punct(PunctuationId::LParen) {
            let tok = self.peek();
            let arg = match &tok.kind {
                TokenKind::String(_) | TokenKind::Ident(_) | TokenKind::Number(_)
                | TokenKind::Keyword(_) => {
                    let text = tok.lexeme();
                    self.advance();
                    text
                }
                _ => return Err(self.unexpected("expected FILE attribute argument")),
            };
            self.expect_punct(PunctuationId::RParen, "expected ')' after attribute argument")?;
            Some(arg)
        } else {
            None
        };
        Ok(FileAttribute { name, argument })
    }

    // ========================================================================
    // RECORD blocks
    // ========================================================================

    /// Parse a RECORD block; the caller has already consumed any leading label.
    ///
    /// Field-level failures are recovered line by line so one bad field does not
    /// take down the whole record.
    fn record_block(&mut self, label: Option<Ident>) -> RecordBlock {
        // Caller guarantees the RECORD keyword is current.
        self.advance();

        let mut prefixes = Vec::new();
        while self.match_punct(PunctuationId::Comma) {
            match self.record_prefix() {
                Ok(prefix) => prefixes.push(prefix),
                Err(diag) => {
                    self.diagnostics.push(diag);
                    while !self.at_terminator() && !self.check_punct(PunctuationId::Comma) {
                        self.advance();
                    }
                }
            }
        }
        self.skip_line_breaks();

        let mut fields = Vec::new();
        while !self.at_block_end() {
            if matches!(self.peek().kind, TokenKind::LineBreak) {
                self.advance();
                continue;
            }
            let start = self.current_span();
            match self.field_definition() {
                Ok(field) => {
                    let span = start.merge(self.previous_span());
                    fields.push(Spanned::new(field, span));
                }
                Err(diag) => {
                    self.diagnostics.push(diag);
                    while !self.at_terminator() {
                        self.advance();
                    }
                }
            }
        }

        let terminator = self.block_end("RECORD block");
        RecordBlock {
            label,
            prefixes,
            fields,
            terminator,
        }
    }

    /// One `PRE(name)`-style record attribute; only the carried name is kept.
    fn record_prefix(&mut self) -> Result<Ident, Diagnostic> {
        self.identifier_like("expected record attribute name")?;
        self.expect_punct(PunctuationId::LParen, "expected '(' after record attribute")?;
        let prefix = self.identifier_like("expected prefix name")?;
        self.expect_punct(PunctuationId::RParen, "expected ')' after prefix name")?;
        Ok(prefix)
    }

    // ========================================================================
    // Field definitions
    // ========================================================================

    /// `name TYPE[(n[, m])] [, option]*`
    ///
    /// The second numeric parameter, when present, is typically a decimal-places
    /// count; more than two parameters produce a diagnostic and the extras are
    /// discarded. Options are accepted uninterpreted; validation is external.
    fn field_definition(&mut self) -> Result<FieldDefinition, Diagnostic> {
        let name = self.identifier_like("expected field name")?;
        let type_name = self.identifier_like("expected field type")?;

        let mut params = Vec::new();
        if self.match_punct(PunctuationId::LParen) {
            params.push(self.numeric_param()?);
            if self.match_punct(PunctuationId::Comma) {
                params.push(self.numeric_param()?);
            }
            if self.check_punct(PunctuationId::Comma) {
                let diag = self.unexpected("field types take at most two numeric parameters");
                self.diagnostics.push(diag);
                while !self.check_punct(PunctuationId::RParen) && !self.at_terminator() {
                    self.advance();
                }
            }
            self.expect_punct(PunctuationId::RParen, "expected ')' after type parameters")?;
        }

        let mut options = Vec::new();
        while self.match_punct(PunctuationId::Comma) {
            options.push(self.identifier_like("expected field option")?);
            // Parameterized options are tolerated; the payload is discarded.
            if self.check_punct(PunctuationId::LParen) {
                self.balanced_paren_span()?;
            }
        }

        Ok(FieldDefinition {
            name,
            field_type: FieldType {
                name: type_name,
                params,
            },
            options,
        })
    }

    fn numeric_param(&mut self) -> Result<String, Diagnostic> {
        match &self.peek().kind {
            TokenKind::Number(n) => {
                let n = n.clone();
                self.advance();
                Ok(n)
            }
            _ => Err(self.unexpected("expected numeric type parameter")),
        }
    }

    // ========================================================================
    // KEY definitions
    // ========================================================================

    /// `name KEY(field, ...) [, attr]*`
    ///
    /// Key components accept prefixed spellings (`CUS:ID`), kept as joined text.
    fn key_definition(&mut self) -> Result<KeyDefinition, Diagnostic> {
        let name = self.identifier_like("expected key label")?;
        self.expect_keyword(KeywordId::Key, "expected KEY keyword")?;
        self.expect_punct(PunctuationId::LParen, "expected '(' after KEY")?;

        let mut fields = Vec::new();
        if self.check_punct(PunctuationId::RParen) {
            let diag = self.unexpected("expected at least one key field");
            self.diagnostics.push(diag);
        } else {
            loop {
                fields.push(self.key_field()?);
                if !self.match_punct(PunctuationId::Comma) {
                    break;
                }
            }
        }
        self.expect_punct(PunctuationId::RParen, "expected ')' after key fields")?;

        let mut attributes = Vec::new();
        while self.match_punct(PunctuationId::Comma) {
            attributes.push(self.identifier_like("expected key attribute")?);
            // Attribute payloads are tolerated and discarded, same escape valve
            // as UI decorations.
            if self.check_punct(PunctuationId::LParen) {
                self.balanced_paren_span()?;
            }
        }

        Ok(KeyDefinition {
            name,
            fields,
            attributes,
        })
    }

    /// One key component: `ident (':' ident)*`, stored joined.
    fn key_field(&mut self) -> Result<Ident, Diagnostic> {
        let mut field = self.identifier_like("expected key field name")?;
        while self.match_punct(PunctuationId::Colon) {
            field.push(':');
            field.push_str(&self.identifier_like("expected key field name after ':'")?);
        }
        Ok(field)
    }
}
