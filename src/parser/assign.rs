/// Assignment statement parsing.
///
/// An assignment is `assignable op expression terminator` with `op` one of `=`
/// and `&=`. The assignable alternatives are not LL(1); instead of backtracking,
/// the target is picked directly with up to four tokens of lookahead:
///
/// - `? ident { ident }` → control reference with decoration
/// - `? ident`           → control reference
/// - `ident { ident }`   → decorated identifier
/// - `ident . …`         → dotted identifier
/// - `ident`             → plain identifier
impl<'a> Parser<'a> {
    // ========================================================================
    // Assignments
    // ========================================================================

    fn assignment(&mut self) -> Result<Assignment, Diagnostic> {
        let target = self.assignable()?;
        let op = self.assign_op()?;

        // `x = ;`: missing value is recovered with a placeholder, not a failure.
        let value = if self.at_terminator() {
            let diag = self.unexpected("expected expression after assignment operator");
            self.diagnostics.push(diag);
            Spanned::new(Expr::Missing, self.current_span())
        } else {
            match self.expression() {
                Ok(value) => value,
                Err(diag) => {
                    self.diagnostics.push(diag);
                    let placeholder = Spanned::new(Expr::Missing, self.current_span());
                    while !self.at_terminator() {
                        self.advance();
                    }
                    placeholder
                }
            }
        };

        let terminator = self.statement_terminator("expected statement terminator")?;

        Ok(Assignment {
            target,
            op,
            value,
            terminator,
        })
    }

    fn assign_op(&mut self) -> Result<AssignOp, Diagnostic> {
        if self.match_op(OperatorId::Eq) {
            Ok(AssignOp::Assign)
        } else if self.match_op(OperatorId::AmpEq) {
            Ok(AssignOp::RefAssign)
        } else {
            // One-token error-skip: drop the offender and retry once.
            let diag = self.unexpected("expected '=' or '&=' in assignment");
            self.advance();
            if self.match_op(OperatorId::Eq) {
                self.diagnostics.push(diag);
                Ok(AssignOp::Assign)
            } else if self.match_op(OperatorId::AmpEq) {
                self.diagnostics.push(diag);
                Ok(AssignOp::RefAssign)
            } else {
                Err(diag)
            }
        }
    }

    fn assignable(&mut self) -> Result<Spanned<Assignable>, Diagnostic> {
        let start = self.current_span();

        if self.match_punct(PunctuationId::Question) {
            let name = self.identifier_like("expected identifier after '?'")?;
            let node = if self.check_punct(PunctuationId::LBrace) {
                let deco = self.brace_decoration()?;
                Assignable::ControlRefDecorated(name, deco)
            } else {
                Assignable::ControlRef(name)
            };
            return Ok(Spanned::new(node, start.merge(self.previous_span())));
        }

        if !self.check_identifier_like() {
            return Err(self.unexpected("expected assignment target"));
        }

        // Dotted chains win over plain identifiers; `{` right after a lone
        // identifier means a decoration, not a property accessor, on the LHS.
        let node = if self.peek_next().kind.is_punctuation(PunctuationId::Dot) {
            Assignable::Dotted(self.dotted_identifier()?)
        } else {
            let name = self.identifier_like("expected assignment target")?;
            if self.check_punct(PunctuationId::LBrace) {
                Assignable::Decorated(name, self.brace_decoration()?)
            } else {
                Assignable::Ident(name)
            }
        };

        Ok(Spanned::new(node, start.merge(self.previous_span())))
    }

    /// Parse a `{ident}` decoration suffix.
    fn brace_decoration(&mut self) -> Result<Ident, Diagnostic> {
        self.expect_punct(PunctuationId::LBrace, "expected '{'")?;
        let deco = self.identifier_like("expected identifier inside '{...}'")?;
        self.expect_punct(PunctuationId::RBrace, "expected '}' to close decoration")?;
        Ok(deco)
    }
}
