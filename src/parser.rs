//! Parser for Clarion structural syntax.
//!
//! Converts a token stream into the syntax trees of [`crate::ast`]. There is one
//! entry point per top-level construct (expression, assignment, FILE declaration,
//! WINDOW/APPLICATION declaration) because program-level sectioning (which entry
//! applies to which source region) is owned by the host editor layer.
//!
//! ## Examples
//!
//! ```rust,no_run
//! use clarion_syntax::parser;
//! use clarion_syntax::tokens::Token;
//!
//! let tokens: Vec<Token> = Vec::new(); // produced by the host lexer
//! let outcome = parser::parse_assignment(&tokens);
//! for diag in &outcome.diagnostics {
//!     eprintln!("{}: {}", diag.kind, diag.message);
//! }
//! ```

use crate::ast::*;
use crate::diagnostics::Diagnostic;
use crate::tokens::{KeywordId, OperatorId, PunctuationId, Span, Spanned, Token, TokenKind};

// NOTE: This module is split across multiple files using `include!` to keep all parser
// methods in the same Rust module (preserving privacy + call patterns) while avoiding
// a single large source file.

include!("parser/core.rs");
include!("parser/helpers.rs");
include!("parser/primitives.rs");
include!("parser/expr.rs");
include!("parser/assign.rs");
include!("parser/file.rs");
include!("parser/window.rs");
include!("parser/api.rs");
include!("parser/tests.rs");
