/// Expression parsing methods.
///
/// This chunk implements the expression grammar with two precedence tiers:
/// additive (`+`, `-`) over multiplicative (`*`, `/`) over factor. Both tiers use
/// an **iterative left-fold** rather than recursion, so `a-b-c-…` chains cost no
/// stack depth and fold left-associatively: `a-b-c` is `(a-b)-c`.
///
/// ## Notes
/// - The function-call vs. bare-dotted-identifier alternative is resolved with one
///   token of lookahead *after* the dotted identifier has been fully consumed: a
///   `(` immediately following commits to a call.
/// - An unmatched `(` is recoverable: the factor synthesizes a `Parenthesized`
///   node, records a diagnostic, and resumes after the nearest `)` or terminator.
impl<'a> Parser<'a> {
    // ========================================================================
    // Expressions
    // ========================================================================

    fn expression(&mut self) -> Result<Spanned<Expr>, Diagnostic> {
        self.additive()
    }

    fn additive(&mut self) -> Result<Spanned<Expr>, Diagnostic> {
        let mut left = self.multiplicative()?;

        loop {
            let op = if self.match_op(OperatorId::Plus) {
                BinaryOp::Add
            } else if self.match_op(OperatorId::Minus) {
                BinaryOp::Sub
            } else {
                break;
            };

            let right = self.multiplicative()?;
            let span = left.span.merge(right.span);
            left = Spanned::new(Expr::Binary(Box::new(left), op, Box::new(right)), span);
        }

        Ok(left)
    }

    fn multiplicative(&mut self) -> Result<Spanned<Expr>, Diagnostic> {
        let mut left = self.factor()?;

        loop {
            let op = if self.match_op(OperatorId::Star) {
                BinaryOp::Mul
            } else if self.match_op(OperatorId::Slash) {
                BinaryOp::Div
            } else {
                break;
            };

            let right = self.factor()?;
            let span = left.span.merge(right.span);
            left = Spanned::new(Expr::Binary(Box::new(left), op, Box::new(right)), span);
        }

        Ok(left)
    }

    fn factor(&mut self) -> Result<Spanned<Expr>, Diagnostic> {
        let start = self.current_span();

        // Parenthesized sub-expression, with unmatched-paren recovery.
        if self.match_punct(PunctuationId::LParen) {
            return Ok(self.paren_factor(start));
        }

        // Literals.
        match &self.peek().kind {
            TokenKind::Number(n) => {
                let n = n.clone();
                self.advance();
                return Ok(Spanned::new(Expr::NumberLit(n), start));
            }
            TokenKind::String(s) => {
                let s = s.clone();
                self.advance();
                return Ok(Spanned::new(Expr::StringLit(s), start));
            }
            TokenKind::FieldEquate(t) => {
                let t = t.clone();
                self.advance();
                return Ok(Spanned::new(Expr::FieldEquate(t), start));
            }
            _ => {}
        }

        if self.check_identifier_like() {
            // Property accessor needs the `{` right after a single identifier.
            if self.peek_next().kind.is_punctuation(PunctuationId::LBrace) {
                let prop = self.property_access()?;
                let span = start.merge(self.previous_span());
                return Ok(Spanned::new(Expr::Property(prop), span));
            }

            let callee = self.dotted_identifier()?;
            if self.match_punct(PunctuationId::LParen) {
                let args = self.argument_list();
                if !self.match_punct(PunctuationId::RParen) {
                    let diag = self.unexpected("expected ')' after arguments");
                    self.diagnostics.push(diag);
                    self.recover_to_paren_or_terminator();
                }
                let span = start.merge(self.previous_span());
                return Ok(Spanned::new(Expr::Call(FunctionCall { callee, args }), span));
            }
            let span = start.merge(self.previous_span());
            return Ok(Spanned::new(Expr::Dotted(callee), span));
        }

        Err(self.unexpected("expected expression"))
    }

    /// Parse the inside of a `( … )` factor; the `(` is already consumed.
    ///
    /// Recovery: if the inner expression fails, a placeholder is synthesized; if
    /// the closing `)` is missing, a diagnostic is recorded and the parse resumes
    /// after the nearest `)` or statement terminator.
    fn paren_factor(&mut self, start: Span) -> Spanned<Expr> {
        let inner = match self.expression() {
            Ok(inner) => inner,
            Err(diag) => {
                self.diagnostics.push(diag);
                let placeholder = Spanned::new(Expr::Missing, self.current_span());
                self.recover_to_paren_or_terminator();
                let span = start.merge(self.previous_span());
                return Spanned::new(Expr::Paren(Box::new(placeholder)), span);
            }
        };

        if !self.match_punct(PunctuationId::RParen) {
            let diag = self.unexpected("expected ')' to close parenthesized expression");
            self.diagnostics.push(diag);
            self.recover_to_paren_or_terminator();
        }
        let span = start.merge(self.previous_span());
        Spanned::new(Expr::Paren(Box::new(inner)), span)
    }

    /// Skip forward to just after the nearest `)`, or stop before a statement
    /// terminator / end of input, whichever comes first.
    fn recover_to_paren_or_terminator(&mut self) {
        while !self.at_terminator() {
            if self.match_punct(PunctuationId::RParen) {
                return;
            }
            self.advance();
        }
    }
}
