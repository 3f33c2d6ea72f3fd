//! Syntax tree definitions for the Clarion structural parser.
//!
//! Every node owns its children exclusively (no sharing, no cycles). Nodes are built
//! bottom-up in a single parse pass and are never mutated after their parent closes,
//! so a finished tree can be handed across threads freely.
//!
//! Expression-level nodes implement [`std::fmt::Display`] so a parsed tree can be
//! re-serialized to source text; unmodeled constructs are preserved verbatim in
//! [`OpaqueRun`] values rather than dropped.

use std::fmt;

pub use crate::tokens::{Span, Spanned};

/// Identifier text as it appeared in source.
pub type Ident = String;

// ============================================================================
// Opaque capture
// ============================================================================

/// A run of tokens preserved verbatim without structural interpretation.
///
/// Used where Clarion embeds macro-like arguments, unrecognized control content,
/// or attribute payloads the grammar deliberately does not model.
#[derive(Debug, Clone, PartialEq)]
pub struct OpaqueRun {
    /// Source spelling of each captured token, in order.
    pub tokens: Vec<Spanned<String>>,
}

impl OpaqueRun {
    pub fn span(&self) -> Span {
        match (self.tokens.first(), self.tokens.last()) {
            (Some(first), Some(last)) => first.span.merge(last.span),
            _ => Span::default(),
        }
    }
}

impl fmt::Display for OpaqueRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, tok) in self.tokens.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", tok.node)?;
        }
        Ok(())
    }
}

// ============================================================================
// Lexical primitives
// ============================================================================

/// Leading qualifier of a dotted identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Qualifier {
    /// `SELF.x`
    SelfRef,
    /// `PARENT.x`
    Parent,
}

impl fmt::Display for Qualifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Qualifier::SelfRef => write!(f, "SELF"),
            Qualifier::Parent => write!(f, "PARENT"),
        }
    }
}

/// A `.`-separated chain of names, optionally led by `SELF`/`PARENT`.
///
/// Invariant: with a qualifier present there is exactly one segment (`SELF.x`);
/// without one, segments chain with no arity limit (`a.b.c`).
#[derive(Debug, Clone, PartialEq)]
pub struct DottedIdentifier {
    pub qualifier: Option<Qualifier>,
    pub segments: Vec<Ident>,
}

impl DottedIdentifier {
    pub fn plain(name: impl Into<Ident>) -> Self {
        Self {
            qualifier: None,
            segments: vec![name.into()],
        }
    }
}

impl fmt::Display for DottedIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(q) = &self.qualifier {
            write!(f, "{}.", q)?;
        }
        for (i, seg) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{}", seg)?;
        }
        Ok(())
    }
}

/// Property accessor: `base{property:mod1:mod2}`.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyAccess {
    pub base: Ident,
    pub property: Ident,
    pub modifiers: Vec<Ident>,
}

impl fmt::Display for PropertyAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{{{}", self.base, self.property)?;
        for m in &self.modifiers {
            write!(f, ":{}", m)?;
        }
        write!(f, "}}")
    }
}

/// Function call: `callee(arg, ...)`.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub callee: DottedIdentifier,
    pub args: Vec<CallArg>,
}

impl fmt::Display for FunctionCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.callee)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", arg)?;
        }
        write!(f, ")")
    }
}

/// One argument of a [`FunctionCall`].
#[derive(Debug, Clone, PartialEq)]
pub enum CallArg {
    /// A structured expression argument.
    Expr(Spanned<Expr>),
    /// An opaque run of unclassified tokens (macro-like argument positions).
    Opaque(OpaqueRun),
}

impl fmt::Display for CallArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallArg::Expr(e) => write!(f, "{}", e.node),
            CallArg::Opaque(run) => write!(f, "{}", run),
        }
    }
}

// ============================================================================
// Expressions
// ============================================================================

/// Binary operators, two precedence tiers: `*`/`/` bind tighter than `+`/`-`.
/// All are left-associative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BinaryOp::Add => write!(f, "+"),
            BinaryOp::Sub => write!(f, "-"),
            BinaryOp::Mul => write!(f, "*"),
            BinaryOp::Div => write!(f, "/"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// String literal (content without quotes).
    StringLit(String),
    /// Numeric literal, raw spelling preserved.
    NumberLit(String),
    /// Field equate: an opaque atomic literal class (`?SomeField`).
    FieldEquate(String),
    /// Dotted identifier reference.
    Dotted(DottedIdentifier),
    /// Property accessor: `base{prop:mod}`.
    Property(PropertyAccess),
    /// Function call.
    Call(FunctionCall),
    /// `left op right`.
    Binary(Box<Spanned<Expr>>, BinaryOp, Box<Spanned<Expr>>),
    /// Parenthesized sub-expression.
    Paren(Box<Spanned<Expr>>),
    /// Placeholder synthesized during error recovery.
    Missing,
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::StringLit(s) => write!(f, "'{}'", s),
            Expr::NumberLit(n) => write!(f, "{}", n),
            Expr::FieldEquate(t) => write!(f, "{}", t),
            Expr::Dotted(d) => write!(f, "{}", d),
            Expr::Property(p) => write!(f, "{}", p),
            Expr::Call(c) => write!(f, "{}", c),
            Expr::Binary(left, op, right) => write!(f, "{}{}{}", left.node, op, right.node),
            Expr::Paren(inner) => write!(f, "({})", inner.node),
            Expr::Missing => Ok(()),
        }
    }
}

// ============================================================================
// Assignments
// ============================================================================

/// Left-hand side of an assignment.
#[derive(Debug, Clone, PartialEq)]
pub enum Assignable {
    /// Plain identifier: `x`.
    Ident(Ident),
    /// Dotted identifier: `SELF.x`, `a.b.c`.
    Dotted(DottedIdentifier),
    /// `?`-prefixed identifier: `?field`.
    ControlRef(Ident),
    /// `?`-prefixed identifier with a `{ID}` decoration: `?field{PROP}`.
    ControlRefDecorated(Ident, Ident),
    /// Identifier with a `{ID}` decoration: `field{PROP}`.
    Decorated(Ident, Ident),
}

impl fmt::Display for Assignable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Assignable::Ident(name) => write!(f, "{}", name),
            Assignable::Dotted(d) => write!(f, "{}", d),
            Assignable::ControlRef(name) => write!(f, "?{}", name),
            Assignable::ControlRefDecorated(name, deco) => write!(f, "?{}{{{}}}", name, deco),
            Assignable::Decorated(name, deco) => write!(f, "{}{{{}}}", name, deco),
        }
    }
}

/// Assignment operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOp {
    /// `=`
    Assign,
    /// `&=`
    RefAssign,
}

impl fmt::Display for AssignOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssignOp::Assign => write!(f, "="),
            AssignOp::RefAssign => write!(f, "&="),
        }
    }
}

/// How a statement or block was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminator {
    /// Explicit statement-end token.
    StatementEnd,
    /// `END` keyword.
    End,
    /// Raw line break.
    LineBreak,
    /// Synthesized at end of scope; no token was consumed.
    Implicit,
}

/// An assignment statement: `target op value terminator`.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub target: Spanned<Assignable>,
    pub op: AssignOp,
    pub value: Spanned<Expr>,
    pub terminator: Terminator,
}

// ============================================================================
// FILE / RECORD / KEY declarations
// ============================================================================

/// One attribute in a FILE attribute list: `name` or `name(arg)`.
#[derive(Debug, Clone, PartialEq)]
pub struct FileAttribute {
    pub name: Ident,
    /// Raw argument text, when present (`PRE(CUS)`, `DRIVER('TopSpeed')`).
    pub argument: Option<String>,
}

/// A FILE declaration: `name FILE [, attr]* structure END`.
#[derive(Debug, Clone, PartialEq)]
pub struct FileDeclaration {
    pub name: Ident,
    pub attributes: Vec<FileAttribute>,
    /// Interleaving of KEY definitions and RECORD blocks, order preserved.
    pub structures: Vec<Spanned<FileStructure>>,
    pub terminator: Terminator,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FileStructure {
    Key(KeyDefinition),
    Record(RecordBlock),
}

/// A KEY definition: `name KEY(field, ...) [, attr]*`.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyDefinition {
    pub name: Ident,
    /// Key component names; prefixed spellings (`CUS:ID`) are kept joined.
    pub fields: Vec<Ident>,
    pub attributes: Vec<Ident>,
}

/// A RECORD block: `[label] RECORD [, PRE(name)]* field* END`.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordBlock {
    pub label: Option<Ident>,
    /// Names carried by `PRE(...)` attributes, in order.
    pub prefixes: Vec<Ident>,
    pub fields: Vec<Spanned<FieldDefinition>>,
    pub terminator: Terminator,
}

/// A typed field: `name TYPE[(n[, m])] [, option]*`.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDefinition {
    pub name: Ident,
    pub field_type: FieldType,
    /// Bare-identifier options, accepted uninterpreted (validation is external).
    pub options: Vec<Ident>,
}

/// Field type with up to two numeric parameters (`STRING(30)`, `DECIMAL(7,2)`).
#[derive(Debug, Clone, PartialEq)]
pub struct FieldType {
    pub name: Ident,
    pub params: Vec<String>,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.params.is_empty() {
            write!(f, "({})", self.params.join(","))?;
        }
        Ok(())
    }
}

// ============================================================================
// WINDOW / APPLICATION declarations
// ============================================================================

/// A recognized-but-unmodeled decoration, consumed as an opaque balanced span.
///
/// This is the grammar's escape valve: any current or future attribute vocabulary
/// is tolerated without grammar changes.
#[derive(Debug, Clone, PartialEq)]
pub struct IgnoredAttribute {
    pub name: Ident,
    /// Tokens between the balancing parentheses, when an argument list was present.
    pub content: Option<OpaqueRun>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowKind {
    Application,
    Window,
}

/// A WINDOW/APPLICATION declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowDefinition {
    pub name: Ident,
    pub kind: WindowKind,
    pub title: String,
    pub attributes: Vec<IgnoredAttribute>,
    pub elements: Vec<Spanned<WindowElement>>,
    pub terminator: Terminator,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WindowElement {
    Menubar(MenubarBlock),
    Toolbar(ToolbarBlock),
    Sheet(SheetBlock),
    Group(GroupBlock),
    Option(OptionBlock),
    /// Marker for a preserved blank line between elements.
    BlankLine,
}

/// `MENUBAR ... END`; contains only MENU blocks.
#[derive(Debug, Clone, PartialEq)]
pub struct MenubarBlock {
    pub attributes: Vec<IgnoredAttribute>,
    pub menus: Vec<Spanned<MenuBlock>>,
    pub terminator: Terminator,
}

/// `MENU('Title') ... END`; contains only ITEM definitions.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuBlock {
    pub title: Option<String>,
    pub attributes: Vec<IgnoredAttribute>,
    pub items: Vec<Spanned<ItemDefinition>>,
    pub terminator: Terminator,
}

/// A single menu item line: `ITEM('Label') [, attr]*`.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDefinition {
    pub label: Option<String>,
    pub attributes: Vec<IgnoredAttribute>,
}

/// `TOOLBAR ... END`; body preserved as opaque content.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolbarBlock {
    pub attributes: Vec<IgnoredAttribute>,
    pub content: OpaqueRun,
    pub terminator: Terminator,
}

/// `SHEET ... END`; contains only TAB blocks.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetBlock {
    pub title: Option<String>,
    pub attributes: Vec<IgnoredAttribute>,
    pub tabs: Vec<Spanned<TabBlock>>,
    pub terminator: Terminator,
}

/// `TAB('Title') ... END`; contains only controls.
#[derive(Debug, Clone, PartialEq)]
pub struct TabBlock {
    pub title: Option<String>,
    pub attributes: Vec<IgnoredAttribute>,
    pub controls: Vec<Spanned<ControlBlock>>,
    pub terminator: Terminator,
}

/// `GROUP('Title') ... END`; contains only controls.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupBlock {
    pub title: Option<String>,
    pub attributes: Vec<IgnoredAttribute>,
    pub controls: Vec<Spanned<ControlBlock>>,
    pub terminator: Terminator,
}

/// `OPTION('Title') ... END`; contains only controls.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionBlock {
    pub title: Option<String>,
    pub attributes: Vec<IgnoredAttribute>,
    pub controls: Vec<Spanned<ControlBlock>>,
    pub terminator: Terminator,
}

/// One control line inside a TAB/GROUP/OPTION body.
///
/// The parser does not model every control type: a lone identifier is kept as a
/// reference, everything else is preserved verbatim as an opaque run so nothing
/// is ever dropped.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlBlock {
    Reference(Ident),
    Unknown(OpaqueRun),
}
