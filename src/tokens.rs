//! Token vocabulary for the Clarion syntax frontend.
//!
//! Tokenization itself is an external collaborator: the host lexer feeds this crate
//! a ready-made token stream. This module is the **contract** for that stream: the
//! token kinds the parser understands, plus source spans for diagnostics.
//!
//! The vocabulary uses **registry-backed IDs**:
//! - `Keyword(KeywordId)` for the structural keyword set (FILE, WINDOW, MENU, …)
//! - `Operator(OperatorId)` for operators (including the compound `&=`)
//! - `Punctuation(PunctuationId)` for punctuation tokens
//!
//! ## Notes
//! - ID-bearing tokens avoid stringly-typed checks in the parser.
//! - Clarion keywords are **not reserved**: `SELF`, `FONT`, `ICON`, etc. can legally
//!   appear as ordinary identifiers in many positions. The parser, not the lexer,
//!   owns that disambiguation: the lexer may tag every keyword spelling as a
//!   keyword token and the parser reinterprets where the grammar allows it.
//! - Use `crate::token_helpers` for ergonomic token matching at call sites.

/// Source location span (byte offsets).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// A node with source location.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

/// Stable identifier for every structural keyword.
///
/// ## Notes
/// - Lookup via [`keyword_id`] is **case-insensitive** (Clarion source is).
/// - The canonical spelling is accessible via [`KeywordId::as_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordId {
    // Data declarations
    File,
    Record,
    Key,

    // UI declarations
    Window,
    Application,
    Menubar,
    Menu,
    Item,
    Toolbar,
    Button,
    Sheet,
    Tab,
    Group,
    Option,

    // Block terminator
    End,

    // Qualifiers
    SelfKw,
    Parent,

    // Decoration keywords the lexer may tag; legal identifiers in most positions
    Font,
    Icon,
}

impl KeywordId {
    /// Canonical (upper-case) spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            KeywordId::File => "FILE",
            KeywordId::Record => "RECORD",
            KeywordId::Key => "KEY",
            KeywordId::Window => "WINDOW",
            KeywordId::Application => "APPLICATION",
            KeywordId::Menubar => "MENUBAR",
            KeywordId::Menu => "MENU",
            KeywordId::Item => "ITEM",
            KeywordId::Toolbar => "TOOLBAR",
            KeywordId::Button => "BUTTON",
            KeywordId::Sheet => "SHEET",
            KeywordId::Tab => "TAB",
            KeywordId::Group => "GROUP",
            KeywordId::Option => "OPTION",
            KeywordId::End => "END",
            KeywordId::SelfKw => "SELF",
            KeywordId::Parent => "PARENT",
            KeywordId::Font => "FONT",
            KeywordId::Icon => "ICON",
        }
    }
}

/// Resolve a spelling to a keyword id, if it is in the structural keyword set.
pub fn keyword_id(name: &str) -> Option<KeywordId> {
    let upper = name.to_ascii_uppercase();
    let id = match upper.as_str() {
        "FILE" => KeywordId::File,
        "RECORD" => KeywordId::Record,
        "KEY" => KeywordId::Key,
        "WINDOW" => KeywordId::Window,
        "APPLICATION" => KeywordId::Application,
        "MENUBAR" => KeywordId::Menubar,
        "MENU" => KeywordId::Menu,
        "ITEM" => KeywordId::Item,
        "TOOLBAR" => KeywordId::Toolbar,
        "BUTTON" => KeywordId::Button,
        "SHEET" => KeywordId::Sheet,
        "TAB" => KeywordId::Tab,
        "GROUP" => KeywordId::Group,
        "OPTION" => KeywordId::Option,
        "END" => KeywordId::End,
        "SELF" => KeywordId::SelfKw,
        "PARENT" => KeywordId::Parent,
        "FONT" => KeywordId::Font,
        "ICON" => KeywordId::Icon,
        _ => return None,
    };
    Some(id)
}

/// Stable identifier for operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorId {
    Plus,
    Minus,
    Star,
    Slash,
    /// `=` (assignment)
    Eq,
    /// `&` (reference / concatenation)
    Amp,
    /// `&=` (reference assignment)
    AmpEq,
}

impl OperatorId {
    pub fn as_str(self) -> &'static str {
        match self {
            OperatorId::Plus => "+",
            OperatorId::Minus => "-",
            OperatorId::Star => "*",
            OperatorId::Slash => "/",
            OperatorId::Eq => "=",
            OperatorId::Amp => "&",
            OperatorId::AmpEq => "&=",
        }
    }
}

/// Stable identifier for punctuation tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PunctuationId {
    Comma,
    Dot,
    Colon,
    /// `=>`
    FatArrow,
    LParen,
    RParen,
    LBrace,
    RBrace,
    Semi,
    Question,
}

impl PunctuationId {
    pub fn as_str(self) -> &'static str {
        match self {
            PunctuationId::Comma => ",",
            PunctuationId::Dot => ".",
            PunctuationId::Colon => ":",
            PunctuationId::FatArrow => "=>",
            PunctuationId::LParen => "(",
            PunctuationId::RParen => ")",
            PunctuationId::LBrace => "{",
            PunctuationId::RBrace => "}",
            PunctuationId::Semi => ";",
            PunctuationId::Question => "?",
        }
    }
}

/// Kind of token fed to the parser.
///
/// ## Notes
/// - `Number` keeps the raw spelling: the parser never does arithmetic and keeping
///   the text makes re-serialization lossless.
/// - `FieldEquate` is an opaque atomic literal class; its exact lexical trigger is
///   owned by the host lexer.
/// - `Unhandled` is the lexer's fallback for anything it could not classify; the
///   parser preserves it verbatim inside opaque runs.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Keyword(KeywordId),
    Operator(OperatorId),
    Punctuation(PunctuationId),

    Ident(String),
    Number(String),
    String(String),
    FieldEquate(String),

    /// Raw line break; significant as a loose statement/block separator.
    LineBreak,
    /// Explicit statement-end marker emitted by the lexer.
    StatementEnd,

    Unhandled(String),
    Eof,
}

/// A token with its kind and source span.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}
