//! Small helper APIs for working with `Token` / `TokenKind`.
//!
//! These helpers exist to reduce repetitive `matches!(...)` at call sites and to make
//! it easy to work with ID-based tokens.

use crate::tokens::{KeywordId, OperatorId, PunctuationId, Token, TokenKind};

impl TokenKind {
    /// Return the keyword id, if this is a keyword token.
    pub fn keyword_id(&self) -> Option<KeywordId> {
        match self {
            TokenKind::Keyword(id) => Some(*id),
            _ => None,
        }
    }

    /// Return `true` if this is the given keyword.
    pub fn is_keyword(&self, id: KeywordId) -> bool {
        matches!(self, TokenKind::Keyword(k) if *k == id)
    }

    /// Return the operator id, if this is an operator token.
    pub fn operator_id(&self) -> Option<OperatorId> {
        match self {
            TokenKind::Operator(id) => Some(*id),
            _ => None,
        }
    }

    /// Return `true` if this is the given operator.
    pub fn is_operator(&self, id: OperatorId) -> bool {
        matches!(self, TokenKind::Operator(o) if *o == id)
    }

    /// Return the punctuation id, if this is a punctuation token.
    pub fn punctuation_id(&self) -> Option<PunctuationId> {
        match self {
            TokenKind::Punctuation(id) => Some(*id),
            _ => None,
        }
    }

    /// Return `true` if this is the given punctuation.
    pub fn is_punctuation(&self, id: PunctuationId) -> bool {
        matches!(self, TokenKind::Punctuation(p) if *p == id)
    }

    /// Return `true` if this token closes a statement or block.
    ///
    /// Clarion is lenient here: `STATEMENT_END`, `END`, and a raw line break are
    /// interchangeable terminators.
    pub fn is_terminator(&self) -> bool {
        matches!(
            self,
            TokenKind::StatementEnd
                | TokenKind::LineBreak
                | TokenKind::Keyword(KeywordId::End)
                | TokenKind::Punctuation(PunctuationId::Semi)
        )
    }

    /// Reconstruct the source spelling of this token.
    ///
    /// Used by opaque capture so unmodeled content survives re-serialization.
    /// String literals are re-quoted in Clarion's single-quote style.
    pub fn lexeme(&self) -> String {
        match self {
            TokenKind::Keyword(id) => id.as_str().to_string(),
            TokenKind::Operator(id) => id.as_str().to_string(),
            TokenKind::Punctuation(id) => id.as_str().to_string(),
            TokenKind::Ident(s) | TokenKind::Number(s) | TokenKind::FieldEquate(s) => s.clone(),
            TokenKind::String(s) => format!("'{}'", s),
            TokenKind::LineBreak => "\n".to_string(),
            TokenKind::StatementEnd => ";".to_string(),
            TokenKind::Unhandled(s) => s.clone(),
            TokenKind::Eof => String::new(),
        }
    }
}

impl Token {
    /// Convenience wrapper for `self.kind.keyword_id()`.
    pub fn keyword_id(&self) -> Option<KeywordId> {
        self.kind.keyword_id()
    }

    /// Convenience wrapper for `self.kind.operator_id()`.
    pub fn operator_id(&self) -> Option<OperatorId> {
        self.kind.operator_id()
    }

    /// Convenience wrapper for `self.kind.punctuation_id()`.
    pub fn punctuation_id(&self) -> Option<PunctuationId> {
        self.kind.punctuation_id()
    }

    /// Convenience wrapper for `self.kind.lexeme()`.
    pub fn lexeme(&self) -> String {
        self.kind.lexeme()
    }
}
