/// WINDOW / APPLICATION declaration parsing.
///
/// Every block kind shares one shape, implemented as an explicit state machine:
///
/// ```text
/// Start → Header → Attributes* → LineBreaks* → (Child LineBreaks*)* → End
/// ```
///
/// `End` accepts either `STATEMENT_END` or `END`; legacy Clarion sources mix the
/// two freely, so all block parsers treat them uniformly. A block whose terminator
/// never arrives is closed implicitly at the end of the enclosing scope with a
/// diagnostic, never a failure.
///
/// Nesting rules: SHEET contains only TABs; TAB/GROUP/OPTION contain only
/// controls; MENUBAR contains only MENUs; MENU contains only ITEMs. Content the
/// grammar does not model (window decorations, toolbar bodies, unrecognized
/// controls) is preserved verbatim as opaque spans, never dropped and never
/// rejected.
impl<'a> Parser<'a> {
    // ========================================================================
    // WINDOW / APPLICATION
    // ========================================================================

    fn window_definition(&mut self) -> Result<WindowDefinition, Diagnostic> {
        let name = self.identifier_like("expected WINDOW declaration label")?;

        let kind = if self.match_keyword(KeywordId::Window) {
            WindowKind::Window
        } else if self.match_keyword(KeywordId::Application) {
            WindowKind::Application
        } else {
            return Err(self.unexpected("expected WINDOW or APPLICATION keyword"));
        };

        // Title is mandatory on windows; recover with an empty one if absent.
        let title = match self.optional_title() {
            Ok(Some(title)) => title,
            Ok(None) => {
                let diag = self.unexpected("expected window title");
                self.diagnostics.push(diag);
                String::new()
            }
            Err(diag) => {
                self.diagnostics.push(diag);
                self.recover_to_paren_or_terminator();
                String::new()
            }
        };

        let attributes = self.ignored_attribute_list();
        self.skip_line_breaks();

        let mut elements = Vec::new();
        while !self.at_block_end() {
            let start = self.current_span();
            match &self.peek().kind {
                TokenKind::LineBreak => {
                    // The first break after a child is structural; each extra one
                    // is a preserved blank line.
                    self.advance();
                    while matches!(self.peek().kind, TokenKind::LineBreak) {
                        let span = self.current_span();
                        self.advance();
                        elements.push(Spanned::new(WindowElement::BlankLine, span));
                    }
                }
                TokenKind::Keyword(KeywordId::Menubar) => {
                    let block = self.menubar_block();
                    let span = start.merge(self.previous_span());
                    elements.push(Spanned::new(WindowElement::Menubar(block), span));
                }
                TokenKind::Keyword(KeywordId::Toolbar) => {
                    let block = self.toolbar_block();
                    let span = start.merge(self.previous_span());
                    elements.push(Spanned::new(WindowElement::Toolbar(block), span));
                }
                TokenKind::Keyword(KeywordId::Sheet) => {
                    let block = self.sheet_block();
                    let span = start.merge(self.previous_span());
                    elements.push(Spanned::new(WindowElement::Sheet(block), span));
                }
                TokenKind::Keyword(KeywordId::Group) => {
                    let (title, attributes, controls, terminator) =
                        self.control_container(KeywordId::Group);
                    let span = start.merge(self.previous_span());
                    elements.push(Spanned::new(
                        WindowElement::Group(GroupBlock {
                            title,
                            attributes,
                            controls,
                            terminator,
                        }),
                        span,
                    ));
                }
                TokenKind::Keyword(KeywordId::Option) => {
                    let (title, attributes, controls, terminator) =
                        self.control_container(KeywordId::Option);
                    let span = start.merge(self.previous_span());
                    elements.push(Spanned::new(
                        WindowElement::Option(OptionBlock {
                            title,
                            attributes,
                            controls,
                            terminator,
                        }),
                        span,
                    ));
                }
                _ => {
                    // Not a modeled window element: report once and step over one
                    // token so the parse always makes forward progress.
                    let diag = self.unexpected("expected window element");
                    self.diagnostics.push(diag);
                    self.advance();
                }
            }
        }

        let terminator = self.block_end("WINDOW declaration");
        Ok(WindowDefinition {
            name,
            kind,
            title,
            attributes,
            elements,
            terminator,
        })
    }

    // ========================================================================
    // MENUBAR / MENU / ITEM
    // ========================================================================

    fn menubar_block(&mut self) -> MenubarBlock {
        // Caller guarantees the MENUBAR keyword is current.
        self.advance();
        let attributes = self.ignored_attribute_list();
        self.skip_line_breaks();

        let mut menus = Vec::new();
        loop {
            self.skip_line_breaks();
            if !self.check_keyword(KeywordId::Menu) {
                break;
            }
            let start = self.current_span();
            let menu = self.menu_block();
            let span = start.merge(self.previous_span());
            menus.push(Spanned::new(menu, span));
        }

        let terminator = self.block_end("MENUBAR block");
        MenubarBlock {
            attributes,
            menus,
            terminator,
        }
    }

    fn menu_block(&mut self) -> MenuBlock {
        // Caller guarantees the MENU keyword is current.
        self.advance();
        let title = self.header_title();
        let attributes = self.ignored_attribute_list();
        self.skip_line_breaks();

        let mut items = Vec::new();
        loop {
            self.skip_line_breaks();
            if !self.check_keyword(KeywordId::Item) {
                break;
            }
            let start = self.current_span();
            let item = self.item_definition();
            let span = start.merge(self.previous_span());
            items.push(Spanned::new(item, span));
        }

        let terminator = self.block_end("MENU block");
        MenuBlock {
            title,
            attributes,
            items,
            terminator,
        }
    }

    /// A single-line item: `ITEM [('Label')] [, attr]*`. Items have no END of
    /// their own; the enclosing MENU's child loop owns the line break.
    fn item_definition(&mut self) -> ItemDefinition {
        // Caller guarantees the ITEM keyword is current.
        self.advance();
        let label = self.header_title();
        let attributes = self.ignored_attribute_list();
        ItemDefinition { label, attributes }
    }

    // ========================================================================
    // TOOLBAR
    // ========================================================================

    /// `TOOLBAR [, attr]*` followed by an opaque body up to the block terminator.
    /// Toolbar content is not modeled; it is preserved verbatim.
    fn toolbar_block(&mut self) -> ToolbarBlock {
        // Caller guarantees the TOOLBAR keyword is current.
        self.advance();
        let attributes = self.ignored_attribute_list();
        self.skip_line_breaks();

        let mut tokens = Vec::new();
        while !self.at_block_end() {
            let tok = self.advance();
            tokens.push(Spanned::new(tok.lexeme(), tok.span));
        }
        let content = OpaqueRun { tokens };

        let terminator = self.block_end("TOOLBAR block");
        ToolbarBlock {
            attributes,
            content,
            terminator,
        }
    }

    // ========================================================================
    // SHEET / TAB
    // ========================================================================

    fn sheet_block(&mut self) -> SheetBlock {
        // Caller guarantees the SHEET keyword is current.
        self.advance();
        let title = self.header_title();
        let attributes = self.ignored_attribute_list();
        self.skip_line_breaks();

        let mut tabs = Vec::new();
        loop {
            self.skip_line_breaks();
            if !self.check_keyword(KeywordId::Tab) {
                break;
            }
            let start = self.current_span();
            let (tab_title, tab_attributes, controls, terminator) =
                self.control_container(KeywordId::Tab);
            let span = start.merge(self.previous_span());
            tabs.push(Spanned::new(
                TabBlock {
                    title: tab_title,
                    attributes: tab_attributes,
                    controls,
                    terminator,
                },
                span,
            ));
        }

        let terminator = self.block_end("SHEET block");
        SheetBlock {
            title,
            attributes,
            tabs,
            terminator,
        }
    }

    // ========================================================================
    // TAB / GROUP / OPTION bodies (control containers)
    // ========================================================================

    /// Shared body for the three block kinds whose children are controls.
    /// The caller guarantees the opening keyword (`kind`) is current.
    fn control_container(
        &mut self,
        kind: KeywordId,
    ) -> (
        Option<String>,
        Vec<IgnoredAttribute>,
        Vec<Spanned<ControlBlock>>,
        Terminator,
    ) {
        self.advance();
        let title = self.header_title();
        let attributes = self.ignored_attribute_list();
        self.skip_line_breaks();

        let mut controls = Vec::new();
        loop {
            self.skip_line_breaks();
            if self.at_block_end() {
                break;
            }
            let start = self.current_span();
            let control = self.control_block();
            let span = start.merge(self.previous_span());
            controls.push(Spanned::new(control, span));
        }

        let terminator = self.block_end(kind.as_str());
        (title, attributes, controls, terminator)
    }

    /// One control line: a lone identifier is a reference; anything else is an
    /// opaque run to the end of the line. Either way at least one token is
    /// consumed, so malformed content cannot stall the parse.
    fn control_block(&mut self) -> ControlBlock {
        if self.check_identifier_like() {
            let next = &self.peek_next().kind;
            if matches!(next, TokenKind::LineBreak | TokenKind::Eof) || next.is_terminator() {
                let name = self
                    .identifier_like("expected control reference")
                    .unwrap_or_default();
                return ControlBlock::Reference(name);
            }
        }
        ControlBlock::Unknown(self.opaque_run_to_line_end())
    }

    /// Parse an optional `('Title')` header argument, recovering in place if the
    /// parenthesized content is not a string.
    fn header_title(&mut self) -> Option<String> {
        match self.optional_title() {
            Ok(title) => title,
            Err(diag) => {
                self.diagnostics.push(diag);
                self.recover_to_paren_or_terminator();
                None
            }
        }
    }
}
