/// Public parsing entry points.
///
/// There is one entry point per top-level construct; the host editor layer picks
/// the right one for each syntactic region (statement-level code vs. declaration
/// sections). Each entry is **total**: it always returns a tree (possibly partial,
/// with placeholder nodes) plus the ordered diagnostics collected along the way.
/// No error type crosses this boundary and nothing here panics on malformed input.

/// Parse a single expression.
#[tracing::instrument(skip_all, fields(token_count = tokens.len()))]
pub fn parse_expression(tokens: &[Token]) -> ParseOutcome<Expr> {
    let mut parser = Parser::new(tokens);
    let node = match parser.expression() {
        Ok(node) => node,
        Err(diag) => {
            let span = diag.span;
            parser.diagnostics.push(diag);
            Spanned::new(Expr::Missing, span)
        }
    };
    parser.into_outcome(node)
}

/// Parse a single assignment statement (`target = value` / `target &= value`).
#[tracing::instrument(skip_all, fields(token_count = tokens.len()))]
pub fn parse_assignment(tokens: &[Token]) -> ParseOutcome<Assignment> {
    let mut parser = Parser::new(tokens);
    let start = parser.current_span();
    let node = match parser.assignment() {
        Ok(node) => {
            let span = start.merge(parser.previous_span());
            Spanned::new(node, span)
        }
        Err(diag) => {
            let span = diag.span;
            parser.diagnostics.push(diag);
            // Best-effort placeholder so the host still gets a tree.
            Spanned::new(
                Assignment {
                    target: Spanned::new(Assignable::Ident(String::new()), span),
                    op: AssignOp::Assign,
                    value: Spanned::new(Expr::Missing, span),
                    terminator: Terminator::Implicit,
                },
                span,
            )
        }
    };
    parser.into_outcome(node)
}

/// Parse a FILE declaration (`name FILE ... END`).
#[tracing::instrument(skip_all, fields(token_count = tokens.len()))]
pub fn parse_file_declaration(tokens: &[Token]) -> ParseOutcome<FileDeclaration> {
    let mut parser = Parser::new(tokens);
    let start = parser.current_span();
    let node = match parser.file_declaration() {
        Ok(node) => {
            let span = start.merge(parser.previous_span());
            Spanned::new(node, span)
        }
        Err(diag) => {
            let span = diag.span;
            parser.diagnostics.push(diag);
            Spanned::new(
                FileDeclaration {
                    name: String::new(),
                    attributes: Vec::new(),
                    structures: Vec::new(),
                    terminator: Terminator::Implicit,
                },
                span,
            )
        }
    };
    parser.into_outcome(node)
}

/// Parse a WINDOW or APPLICATION declaration (`name WINDOW('Title') ... END`).
#[tracing::instrument(skip_all, fields(token_count = tokens.len()))]
pub fn parse_window_definition(tokens: &[Token]) -> ParseOutcome<WindowDefinition> {
    let mut parser = Parser::new(tokens);
    let start = parser.current_span();
    let node = match parser.window_definition() {
        Ok(node) => {
            let span = start.merge(parser.previous_span());
            Spanned::new(node, span)
        }
        Err(diag) => {
            let span = diag.span;
            parser.diagnostics.push(diag);
            Spanned::new(
                WindowDefinition {
                    name: String::new(),
                    kind: WindowKind::Window,
                    title: String::new(),
                    attributes: Vec::new(),
                    elements: Vec::new(),
                    terminator: Terminator::Implicit,
                },
                span,
            )
        }
    };
    parser.into_outcome(node)
}
