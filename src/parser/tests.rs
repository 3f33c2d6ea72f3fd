#[cfg(test)]
/// Parser unit tests.
///
/// Clarion tokenization is owned by the host, so these tests drive the parser
/// through a small test-only tokenizer (`lex`) covering exactly the vocabulary of
/// `crate::tokens`. Cases focus on precedence/associativity, the loose-terminator
/// rules, keyword-as-identifier positions, and the parser's recovery guarantees
/// (always a tree, always forward progress).
mod tests {
    use super::*;
    use crate::diagnostics::DiagnosticKind;
    use crate::tokens::keyword_id;

    // ========================================================================
    // Test tokenizer
    // ========================================================================

    fn lex(source: &str) -> Vec<Token> {
        let bytes = source.as_bytes();
        let mut tokens = Vec::new();
        let mut i = 0;
        while i < bytes.len() {
            let start = i;
            let c = bytes[i] as char;
            match c {
                ' ' | '\t' | '\r' => {
                    i += 1;
                    continue;
                }
                '\n' => {
                    i += 1;
                    tokens.push(Token::new(TokenKind::LineBreak, Span::new(start, i)));
                }
                ';' => {
                    i += 1;
                    tokens.push(Token::new(TokenKind::StatementEnd, Span::new(start, i)));
                }
                '\'' => {
                    i += 1;
                    let text_start = i;
                    while i < bytes.len() && bytes[i] != b'\'' {
                        i += 1;
                    }
                    let text = source[text_start..i].to_string();
                    i += 1; // closing quote
                    tokens.push(Token::new(TokenKind::String(text), Span::new(start, i)));
                }
                '0'..='9' => {
                    while i < bytes.len() && bytes[i].is_ascii_digit() {
                        i += 1;
                    }
                    if i + 1 < bytes.len() && bytes[i] == b'.' && bytes[i + 1].is_ascii_digit() {
                        i += 1;
                        while i < bytes.len() && bytes[i].is_ascii_digit() {
                            i += 1;
                        }
                    }
                    let text = source[start..i].to_string();
                    tokens.push(Token::new(TokenKind::Number(text), Span::new(start, i)));
                }
                c if c.is_ascii_alphabetic() || c == '_' => {
                    while i < bytes.len()
                        && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_')
                    {
                        i += 1;
                    }
                    let word = &source[start..i];
                    let kind = match keyword_id(word) {
                        Some(id) => TokenKind::Keyword(id),
                        None => TokenKind::Ident(word.to_string()),
                    };
                    tokens.push(Token::new(kind, Span::new(start, i)));
                }
                '&' => {
                    if i + 1 < bytes.len() && bytes[i + 1] == b'=' {
                        i += 2;
                        tokens.push(Token::new(
                            TokenKind::Operator(OperatorId::AmpEq),
                            Span::new(start, i),
                        ));
                    } else {
                        i += 1;
                        tokens.push(Token::new(
                            TokenKind::Operator(OperatorId::Amp),
                            Span::new(start, i),
                        ));
                    }
                }
                '=' => {
                    if i + 1 < bytes.len() && bytes[i + 1] == b'>' {
                        i += 2;
                        tokens.push(Token::new(
                            TokenKind::Punctuation(PunctuationId::FatArrow),
                            Span::new(start, i),
                        ));
                    } else {
                        i += 1;
                        tokens.push(Token::new(
                            TokenKind::Operator(OperatorId::Eq),
                            Span::new(start, i),
                        ));
                    }
                }
                _ => {
                    i += 1;
                    let span = Span::new(start, i);
                    let kind = match c {
                        '+' => TokenKind::Operator(OperatorId::Plus),
                        '-' => TokenKind::Operator(OperatorId::Minus),
                        '*' => TokenKind::Operator(OperatorId::Star),
                        '/' => TokenKind::Operator(OperatorId::Slash),
                        ',' => TokenKind::Punctuation(PunctuationId::Comma),
                        '.' => TokenKind::Punctuation(PunctuationId::Dot),
                        ':' => TokenKind::Punctuation(PunctuationId::Colon),
                        '(' => TokenKind::Punctuation(PunctuationId::LParen),
                        ')' => TokenKind::Punctuation(PunctuationId::RParen),
                        '{' => TokenKind::Punctuation(PunctuationId::LBrace),
                        '}' => TokenKind::Punctuation(PunctuationId::RBrace),
                        '?' => TokenKind::Punctuation(PunctuationId::Question),
                        other => TokenKind::Unhandled(other.to_string()),
                    };
                    tokens.push(Token::new(kind, span));
                }
            }
        }
        tokens
    }

    fn expr(source: &str) -> ParseOutcome<Expr> {
        parse_expression(&lex(source))
    }

    fn assign(source: &str) -> ParseOutcome<Assignment> {
        parse_assignment(&lex(source))
    }

    fn file_decl(source: &str) -> ParseOutcome<FileDeclaration> {
        parse_file_declaration(&lex(source))
    }

    fn window(source: &str) -> ParseOutcome<WindowDefinition> {
        parse_window_definition(&lex(source))
    }

    fn binary_parts(expr: &Expr) -> (&Expr, BinaryOp, &Expr) {
        match expr {
            Expr::Binary(left, op, right) => (&left.node, *op, &right.node),
            other => panic!("expected binary expression, got {:?}", other),
        }
    }

    fn dotted_name(expr: &Expr) -> String {
        match expr {
            Expr::Dotted(d) => d.to_string(),
            other => panic!("expected dotted identifier, got {:?}", other),
        }
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    #[test]
    fn test_additive_is_left_associative() {
        let out = expr("a+b-c");
        assert!(out.diagnostics.is_empty());
        let (left, op, right) = binary_parts(&out.node.node);
        assert_eq!(op, BinaryOp::Sub);
        assert_eq!(dotted_name(right), "c");
        let (ll, lop, lr) = binary_parts(left);
        assert_eq!(lop, BinaryOp::Add);
        assert_eq!(dotted_name(ll), "a");
        assert_eq!(dotted_name(lr), "b");
    }

    #[test]
    fn test_multiplicative_binds_tighter() {
        let out = expr("a+b*c");
        assert!(out.diagnostics.is_empty());
        let (left, op, right) = binary_parts(&out.node.node);
        assert_eq!(op, BinaryOp::Add);
        assert_eq!(dotted_name(left), "a");
        let (rl, rop, rr) = binary_parts(right);
        assert_eq!(rop, BinaryOp::Mul);
        assert_eq!(dotted_name(rl), "b");
        assert_eq!(dotted_name(rr), "c");
    }

    #[test]
    fn test_parenthesized_overrides_precedence() {
        let out = expr("(a+b)*c");
        assert!(out.diagnostics.is_empty());
        let (left, op, _) = binary_parts(&out.node.node);
        assert_eq!(op, BinaryOp::Mul);
        assert!(matches!(left, Expr::Paren(_)));
    }

    #[test]
    fn test_function_call_vs_bare_identifier() {
        let out = expr("foo.Bar(1, 2)");
        assert!(out.diagnostics.is_empty());
        match &out.node.node {
            Expr::Call(call) => {
                assert_eq!(call.callee.to_string(), "foo.Bar");
                assert_eq!(call.args.len(), 2);
                assert!(matches!(
                    &call.args[0],
                    CallArg::Expr(e) if e.node == Expr::NumberLit("1".into())
                ));
            }
            other => panic!("expected call, got {:?}", other),
        }

        // Same spelling without the '(' stays a dotted identifier.
        let out = expr("foo.Bar");
        assert!(matches!(&out.node.node, Expr::Dotted(_)));
    }

    #[test]
    fn test_property_access_with_modifiers() {
        let out = expr("Frame{Prop:Text}");
        assert!(out.diagnostics.is_empty());
        match &out.node.node {
            Expr::Property(p) => {
                assert_eq!(p.base, "Frame");
                assert_eq!(p.property, "Prop");
                assert_eq!(p.modifiers, vec!["Text".to_string()]);
            }
            other => panic!("expected property access, got {:?}", other),
        }
    }

    #[test]
    fn test_keyword_spellings_are_legal_identifiers() {
        // FONT and ICON are keyword tokens but ordinary identifiers here.
        let out = expr("FONT+ICON");
        assert!(out.diagnostics.is_empty());
        let (left, op, right) = binary_parts(&out.node.node);
        assert_eq!(op, BinaryOp::Add);
        assert_eq!(dotted_name(left), "FONT");
        assert_eq!(dotted_name(right), "ICON");
    }

    #[test]
    fn test_self_qualifier_takes_one_segment() {
        let out = expr("SELF.value");
        assert!(out.diagnostics.is_empty());
        match &out.node.node {
            Expr::Dotted(d) => {
                assert_eq!(d.qualifier, Some(Qualifier::SelfRef));
                assert_eq!(d.segments, vec!["value".to_string()]);
            }
            other => panic!("expected dotted identifier, got {:?}", other),
        }
    }

    #[test]
    fn test_qualifier_stops_after_one_segment() {
        // `SELF.x.y`: the qualified chain ends at `x`; the trailing `.y` is left
        // for the host to interpret.
        let out = expr("SELF.x.y");
        assert!(out.diagnostics.is_empty());
        match &out.node.node {
            Expr::Dotted(d) => {
                assert_eq!(d.qualifier, Some(Qualifier::SelfRef));
                assert_eq!(d.segments, vec!["x".to_string()]);
            }
            other => panic!("expected dotted identifier, got {:?}", other),
        }
        assert_eq!(out.consumed, 3);
    }

    #[test]
    fn test_field_equate_is_a_factor() {
        let tokens = vec![
            Token::new(TokenKind::FieldEquate("?Ok".into()), Span::new(0, 3)),
            Token::new(TokenKind::Operator(OperatorId::Plus), Span::new(3, 4)),
            Token::new(TokenKind::Number("1".into()), Span::new(4, 5)),
        ];
        let out = parse_expression(&tokens);
        assert!(out.diagnostics.is_empty());
        let (left, op, right) = binary_parts(&out.node.node);
        assert_eq!(op, BinaryOp::Add);
        assert_eq!(*left, Expr::FieldEquate("?Ok".into()));
        assert_eq!(*right, Expr::NumberLit("1".into()));
    }

    #[test]
    fn test_opaque_call_argument() {
        let out = expr("Foo(1+2, COLOR:Red)");
        assert!(out.diagnostics.is_empty());
        match &out.node.node {
            Expr::Call(call) => {
                assert_eq!(call.args.len(), 2);
                assert!(matches!(&call.args[0], CallArg::Expr(_)));
                match &call.args[1] {
                    CallArg::Opaque(run) => assert_eq!(run.to_string(), "COLOR : Red"),
                    other => panic!("expected opaque argument, got {:?}", other),
                }
            }
            other => panic!("expected call, got {:?}", other),
        }
    }

    #[test]
    fn test_unmatched_paren_recovers_with_placeholder() {
        let out = expr("(a+b");
        assert_eq!(out.diagnostics.len(), 1);
        assert_eq!(out.diagnostics[0].kind, DiagnosticKind::UnexpectedEndOfInput);
        assert!(matches!(&out.node.node, Expr::Paren(_)));
    }

    #[test]
    fn test_empty_input_yields_placeholder_not_panic() {
        let out = parse_expression(&[]);
        assert_eq!(out.node.node, Expr::Missing);
        assert_eq!(out.consumed, 0);
        assert_eq!(out.diagnostics.len(), 1);
        assert_eq!(out.diagnostics[0].kind, DiagnosticKind::UnexpectedEndOfInput);
    }

    /// Re-serializing a parsed tree and re-parsing it yields an identical tree.
    #[test]
    fn test_reserialize_reparse_idempotence() {
        for source in [
            "a+b*c",
            "(a-b)/c",
            "SELF.x+foo.Bar(1, 2)",
            "Frame{Prop:Text}-10",
            "'lit'+x.y.z",
        ] {
            let first = expr(source);
            assert!(first.diagnostics.is_empty(), "diagnostics for {:?}", source);
            let rendered = first.node.node.to_string();
            let second = expr(&rendered);
            assert!(second.diagnostics.is_empty(), "diagnostics for {:?}", rendered);
            assert_eq!(first.node, second.node, "re-parse changed {:?}", source);
        }
    }

    #[test]
    fn test_expression_rendering_snapshot() {
        let out = expr("a+b*c-(d/e)");
        assert!(out.diagnostics.is_empty());
        insta::assert_snapshot!(out.node.node.to_string(), @"a+b*c-(d/e)");
    }

    // ========================================================================
    // Assignments
    // ========================================================================

    #[test]
    fn test_simple_assignment_with_statement_end() {
        let out = assign("SELF.x = 5;");
        assert!(out.diagnostics.is_empty());
        let a = &out.node.node;
        match &a.target.node {
            Assignable::Dotted(d) => {
                assert_eq!(d.qualifier, Some(Qualifier::SelfRef));
                assert_eq!(d.segments, vec!["x".to_string()]);
            }
            other => panic!("expected dotted target, got {:?}", other),
        }
        assert_eq!(a.op, AssignOp::Assign);
        assert_eq!(a.value.node, Expr::NumberLit("5".into()));
        assert_eq!(a.terminator, Terminator::StatementEnd);
    }

    #[test]
    fn test_control_ref_decorated_ref_assignment() {
        let out = assign("?field{ID} &= foo.Bar(1, 2)");
        assert!(out.diagnostics.is_empty());
        let a = &out.node.node;
        assert_eq!(
            a.target.node,
            Assignable::ControlRefDecorated("field".into(), "ID".into())
        );
        assert_eq!(a.op, AssignOp::RefAssign);
        match &a.value.node {
            Expr::Call(call) => assert_eq!(call.args.len(), 2),
            other => panic!("expected call value, got {:?}", other),
        }
        // End of input closes the statement silently.
        assert_eq!(a.terminator, Terminator::Implicit);
        insta::assert_snapshot!(
            format!("{} {} {}", a.target.node, a.op, a.value.node),
            @"?field{ID} &= foo.Bar(1, 2)"
        );
    }

    #[test]
    fn test_decorated_identifier_target() {
        let out = assign("fld{Prop} = 1\n");
        assert!(out.diagnostics.is_empty());
        let a = &out.node.node;
        assert_eq!(a.target.node, Assignable::Decorated("fld".into(), "Prop".into()));
        assert_eq!(a.terminator, Terminator::LineBreak);
    }

    #[test]
    fn test_missing_value_recovers_with_placeholder() {
        let out = assign("x = ;");
        assert_eq!(out.diagnostics.len(), 1);
        let a = &out.node.node;
        assert_eq!(a.target.node, Assignable::Ident("x".into()));
        assert_eq!(a.value.node, Expr::Missing);
        assert_eq!(a.terminator, Terminator::StatementEnd);
    }

    #[test]
    fn test_operator_error_skip_recovery() {
        // One bogus token between target and '=' is skipped with a diagnostic.
        let out = assign("x + = 5");
        assert_eq!(out.diagnostics.len(), 1);
        assert_eq!(out.diagnostics[0].kind, DiagnosticKind::UnexpectedToken);
        let a = &out.node.node;
        assert_eq!(a.op, AssignOp::Assign);
        assert_eq!(a.value.node, Expr::NumberLit("5".into()));
    }

    #[test]
    fn test_consumed_allows_host_to_resume() {
        let tokens = lex("x = 1;y = 2");
        let first = parse_assignment(&tokens);
        assert!(first.diagnostics.is_empty());
        assert_eq!(first.consumed, 4);
        let second = parse_assignment(&tokens[first.consumed..]);
        assert!(second.diagnostics.is_empty());
        assert_eq!(second.node.node.target.node, Assignable::Ident("y".into()));
    }

    #[test]
    fn test_unparseable_assignment_still_returns_tree() {
        let out = assign("= 5");
        assert_eq!(out.diagnostics.len(), 1);
        assert_eq!(out.node.node.value.node, Expr::Missing);
    }

    // ========================================================================
    // FILE / RECORD / KEY
    // ========================================================================

    #[test]
    fn test_file_declaration_with_key_and_record() {
        let out = file_decl("Cust FILE,PRE(CUS) KeyID KEY(CUS:ID) RECORD Name STRING(30) END END");
        assert!(out.diagnostics.is_empty());
        let file = &out.node.node;
        assert_eq!(file.name, "Cust");
        assert_eq!(file.attributes.len(), 1);
        assert_eq!(file.attributes[0].name, "PRE");
        assert_eq!(file.attributes[0].argument.as_deref(), Some("CUS"));
        assert_eq!(file.structures.len(), 2);
        match &file.structures[0].node {
            FileStructure::Key(key) => {
                assert_eq!(key.name, "KeyID");
                assert_eq!(key.fields, vec!["CUS:ID".to_string()]);
            }
            other => panic!("expected key, got {:?}", other),
        }
        match &file.structures[1].node {
            FileStructure::Record(rec) => {
                assert_eq!(rec.fields.len(), 1);
                let field = &rec.fields[0].node;
                assert_eq!(field.name, "Name");
                assert_eq!(field.field_type.name, "STRING");
                assert_eq!(field.field_type.params, vec!["30".to_string()]);
                assert_eq!(rec.terminator, Terminator::End);
            }
            other => panic!("expected record, got {:?}", other),
        }
        assert_eq!(file.terminator, Terminator::End);
    }

    #[test]
    fn test_labeled_record_with_field_options() {
        let out = file_decl(
            "Cust FILE,DRIVER('TopSpeed'),PRE(CUS)\nRec RECORD\nName STRING(30),CAP\nAmount DECIMAL(7,2)\nAge LONG\nEND\nEND",
        );
        assert!(out.diagnostics.is_empty());
        let file = &out.node.node;
        assert_eq!(file.attributes[0].argument.as_deref(), Some("'TopSpeed'"));
        match &file.structures[0].node {
            FileStructure::Record(rec) => {
                assert_eq!(rec.label.as_deref(), Some("Rec"));
                assert_eq!(rec.fields.len(), 3);
                assert_eq!(rec.fields[0].node.options, vec!["CAP".to_string()]);
                assert_eq!(
                    rec.fields[1].node.field_type.params,
                    vec!["7".to_string(), "2".to_string()]
                );
                assert!(rec.fields[2].node.field_type.params.is_empty());
            }
            other => panic!("expected record, got {:?}", other),
        }
    }

    #[test]
    fn test_field_type_extra_params_are_discarded() {
        let out = file_decl("Cust FILE RECORD Amt DECIMAL(7,2,3) END END");
        assert_eq!(out.diagnostics.len(), 1);
        assert_eq!(out.diagnostics[0].kind, DiagnosticKind::UnexpectedToken);
        match &out.node.node.structures[0].node {
            FileStructure::Record(rec) => {
                // The first two parameters survive; the extras are dropped.
                assert_eq!(
                    rec.fields[0].node.field_type.params,
                    vec!["7".to_string(), "2".to_string()]
                );
                assert_eq!(rec.terminator, Terminator::End);
            }
            other => panic!("expected record, got {:?}", other),
        }
        assert_eq!(out.node.node.terminator, Terminator::End);
    }

    #[test]
    fn test_key_trailing_attributes_kept_in_order() {
        let out = file_decl("Cust FILE KeyID KEY(ID),DUP,OPT END");
        assert!(out.diagnostics.is_empty());
        match &out.node.node.structures[0].node {
            FileStructure::Key(key) => {
                assert_eq!(key.fields, vec!["ID".to_string()]);
                assert_eq!(key.attributes, vec!["DUP".to_string(), "OPT".to_string()]);
            }
            other => panic!("expected key, got {:?}", other),
        }
    }

    #[test]
    fn test_key_requires_at_least_one_field() {
        let out = file_decl("Cust FILE KeyID KEY() END");
        assert_eq!(out.diagnostics.len(), 1);
        match &out.node.node.structures[0].node {
            FileStructure::Key(key) => assert!(key.fields.is_empty()),
            other => panic!("expected key, got {:?}", other),
        }
    }

    #[test]
    fn test_record_prefix_attribute() {
        let out = file_decl("Cust FILE RECORD,PRE(CUS) Name STRING(10) END END");
        assert!(out.diagnostics.is_empty());
        match &out.node.node.structures[0].node {
            FileStructure::Record(rec) => {
                assert_eq!(rec.prefixes, vec!["CUS".to_string()]);
            }
            other => panic!("expected record, got {:?}", other),
        }
    }

    // ========================================================================
    // WINDOW / APPLICATION
    // ========================================================================

    #[test]
    fn test_window_menubar_menu_item_nesting() {
        let out = window("Win WINDOW('Title') MENUBAR MENU('File') ITEM('Exit') END END END");
        assert!(out.diagnostics.is_empty());
        let win = &out.node.node;
        assert_eq!(win.name, "Win");
        assert_eq!(win.kind, WindowKind::Window);
        assert_eq!(win.title, "Title");
        assert_eq!(win.elements.len(), 1);
        match &win.elements[0].node {
            WindowElement::Menubar(bar) => {
                assert_eq!(bar.menus.len(), 1);
                let menu = &bar.menus[0].node;
                assert_eq!(menu.title.as_deref(), Some("File"));
                assert_eq!(menu.items.len(), 1);
                assert_eq!(menu.items[0].node.label.as_deref(), Some("Exit"));
                // Each block is closed by its own END, no cross-block leakage.
                assert_eq!(menu.terminator, Terminator::End);
                assert_eq!(bar.terminator, Terminator::End);
            }
            other => panic!("expected menubar, got {:?}", other),
        }
        assert_eq!(win.terminator, Terminator::End);
    }

    #[test]
    fn test_unknown_window_attribute_is_discarded_silently() {
        let out = window("Win WINDOW('T'),NEWATTR(xyz123),CENTER END");
        assert!(out.diagnostics.is_empty());
        let win = &out.node.node;
        assert_eq!(win.attributes.len(), 2);
        assert_eq!(win.attributes[0].name, "NEWATTR");
        assert_eq!(
            win.attributes[0].content.as_ref().map(|c| c.to_string()),
            Some("xyz123".to_string())
        );
        assert_eq!(win.attributes[1].name, "CENTER");
        assert!(win.attributes[1].content.is_none());
    }

    #[test]
    fn test_sheet_tab_controls_and_opaque_fallback() {
        let out = window(
            "Win WINDOW('T')\nSHEET,AT(1,2)\nTAB('General')\nOkButton\nBUTTON('OK'),USE(?Ok)\nEND\nEND\nEND",
        );
        assert!(out.diagnostics.is_empty());
        let win = &out.node.node;
        assert_eq!(win.elements.len(), 1);
        match &win.elements[0].node {
            WindowElement::Sheet(sheet) => {
                assert_eq!(sheet.attributes.len(), 1);
                assert_eq!(sheet.attributes[0].name, "AT");
                assert_eq!(sheet.tabs.len(), 1);
                let tab = &sheet.tabs[0].node;
                assert_eq!(tab.title.as_deref(), Some("General"));
                assert_eq!(tab.controls.len(), 2);
                assert_eq!(
                    tab.controls[0].node,
                    ControlBlock::Reference("OkButton".into())
                );
                match &tab.controls[1].node {
                    ControlBlock::Unknown(run) => {
                        // Unmodeled control content is preserved verbatim.
                        assert_eq!(run.to_string(), "BUTTON ( 'OK' ) , USE ( ? Ok )");
                    }
                    other => panic!("expected opaque control, got {:?}", other),
                }
            }
            other => panic!("expected sheet, got {:?}", other),
        }
    }

    #[test]
    fn test_group_and_option_blocks() {
        let out = window("App APPLICATION('Main')\nGROUP('G')\nLeft\nEND\nOPTION('O')\nRight\nEND\nEND");
        assert!(out.diagnostics.is_empty());
        let win = &out.node.node;
        assert_eq!(win.kind, WindowKind::Application);
        let kinds: Vec<_> = win
            .elements
            .iter()
            .map(|e| match &e.node {
                WindowElement::Group(_) => "group",
                WindowElement::Option(_) => "option",
                WindowElement::BlankLine => "blank",
                _ => "other",
            })
            .collect();
        assert_eq!(kinds, vec!["group", "option"]);
    }

    #[test]
    fn test_toolbar_content_is_opaque() {
        let out = window("Win WINDOW('T')\nTOOLBAR,AT(0,0)\nFlushButton\nEND\nEND");
        assert!(out.diagnostics.is_empty());
        match &out.node.node.elements[0].node {
            WindowElement::Toolbar(bar) => {
                assert_eq!(bar.attributes[0].name, "AT");
                assert!(bar.content.to_string().contains("FlushButton"));
                assert_eq!(bar.terminator, Terminator::End);
            }
            other => panic!("expected toolbar, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_lines_between_elements_are_preserved() {
        let out = window("Win WINDOW('T')\nMENUBAR\nEND\n\nGROUP('G')\nEND\nEND");
        assert!(out.diagnostics.is_empty());
        let kinds: Vec<_> = out
            .node
            .node
            .elements
            .iter()
            .map(|e| match &e.node {
                WindowElement::Menubar(_) => "menubar",
                WindowElement::Group(_) => "group",
                WindowElement::BlankLine => "blank",
                _ => "other",
            })
            .collect();
        assert_eq!(kinds, vec!["menubar", "blank", "group"]);
    }

    #[test]
    fn test_statement_end_closes_blocks_like_end() {
        let out = window("Win WINDOW('T') MENUBAR MENU('File') ; ; END");
        assert!(out.diagnostics.is_empty());
        match &out.node.node.elements[0].node {
            WindowElement::Menubar(bar) => {
                assert_eq!(bar.menus[0].node.terminator, Terminator::StatementEnd);
                assert_eq!(bar.terminator, Terminator::StatementEnd);
            }
            other => panic!("expected menubar, got {:?}", other),
        }
        assert_eq!(out.node.node.terminator, Terminator::End);
    }

    #[test]
    fn test_unterminated_window_closes_implicitly() {
        let out = window("Win WINDOW('T') MENUBAR END");
        assert_eq!(out.diagnostics.len(), 1);
        assert_eq!(out.diagnostics[0].kind, DiagnosticKind::UnexpectedEndOfInput);
        assert_eq!(out.node.node.terminator, Terminator::Implicit);
        // The menubar still got its explicit END.
        match &out.node.node.elements[0].node {
            WindowElement::Menubar(bar) => assert_eq!(bar.terminator, Terminator::End),
            other => panic!("expected menubar, got {:?}", other),
        }
    }

    #[test]
    fn test_foreign_tokens_at_window_level_make_forward_progress() {
        let out = window("Win WINDOW('T') 1 2 3 END");
        assert_eq!(out.diagnostics.len(), 3);
        assert!(out
            .diagnostics
            .iter()
            .all(|d| d.kind == DiagnosticKind::UnexpectedToken));
        assert_eq!(out.node.node.terminator, Terminator::End);
    }
}
