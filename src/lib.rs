//! Structural syntax frontend for the Clarion 4GL: tokens, AST, parser, diagnostics.
//!
//! This crate turns a host-provided token stream into diagnostics-friendly syntax
//! trees for editor tooling. It is intentionally "syntax-only": tokenization, document
//! synchronization, symbol resolution, and code generation are external collaborators.
//!
//! ## Notes
//! - Clarion source is loosely structured: statement ends are sometimes a token,
//!   sometimes a newline, sometimes absent, and keyword spellings can double as
//!   ordinary identifiers. The parser owns all of that disambiguation.
//! - Every entry point is total: it returns a (possibly partial) tree plus an
//!   ordered diagnostic list, and never panics or loops forever on malformed input.
//!
//! ## Examples
//! ```rust,no_run
//! use clarion_syntax::parser;
//! use clarion_syntax::tokens::Token;
//!
//! let tokens: Vec<Token> = Vec::new(); // produced by the host lexer
//! let outcome = parser::parse_expression(&tokens);
//! assert!(outcome.consumed <= tokens.len());
//! ```

pub mod ast;
pub mod diagnostics;
pub mod parser;
pub mod token_helpers;
pub mod tokens;
