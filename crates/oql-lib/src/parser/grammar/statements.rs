use rowan::TextRange;

use crate::diagnostics::DiagnosticKind;
use crate::parser::Parser;
use crate::parser::cst::SyntaxKind;
use crate::parser::cst::token_sets::{RECURSE, SET_PREFIXED, STATEMENT_RECOVERY};

impl Parser<'_> {
    pub fn parse_root(&mut self) {
        self.start_node(SyntaxKind::Oql);

        while !self.at_end() {
            self.parse_statement();
        }

        self.drain_trivia();
        self.finish_node();
    }

    /// EOF or fatal error, looking past trivia.
    pub(super) fn at_end(&mut self) -> bool {
        self.skip_trivia_to_buffer();
        self.should_stop()
    }

    /// One statement, or an `Error` node covering tokens that cannot start one.
    pub(super) fn parse_statement(&mut self) {
        match self.current() {
            SyntaxKind::BracketOpen => self.parse_settings(),
            SyntaxKind::Keyword | SyntaxKind::MacroOpen => self.parse_query(),
            SyntaxKind::ParenOpen => self.parse_block(),
            SyntaxKind::Dot => self.parse_set_prefixed(),
            kind if SET_PREFIXED.contains(kind) => self.parse_set_prefixed(),
            _ => self.error_statement(),
        }
    }

    /// `(Keyword Set? | Macro | Set) SquareFilter* RoundFilter* Assignment? ";"`
    ///
    /// Square and round filters are accepted in any order.
    fn parse_query(&mut self) {
        self.start_node(SyntaxKind::Query);

        if self.eat_token(SyntaxKind::Keyword) {
            if self.currently_is(SyntaxKind::Dot) {
                self.parse_set();
            }
        } else if self.currently_is(SyntaxKind::Dot) {
            self.parse_set();
        } else {
            self.parse_macro();
        }

        loop {
            match self.current() {
                SyntaxKind::BracketOpen => self.parse_square_filter(),
                SyntaxKind::ParenOpen => self.parse_round_filter(),
                _ => break,
            }
        }

        self.parse_assignment_opt();
        self.parse_terminator();
        self.finish_node();
    }

    /// `("[" SettingName ":" SettingValue "]")+ ";"`
    fn parse_settings(&mut self) {
        self.start_node(SyntaxKind::Settings);

        while self.currently_is(SyntaxKind::BracketOpen) {
            self.push_delimiter(SyntaxKind::BracketOpen);
            self.bump();

            if self.currently_is(SyntaxKind::Identifier) {
                self.start_node(SyntaxKind::SettingName);
                self.bump_identifier();
                self.finish_node();
            } else {
                self.error_msg(DiagnosticKind::ExpectedToken, "setting name");
            }

            if self.expect(SyntaxKind::Colon, "`:` after setting name") {
                self.parse_setting_value();
            }

            self.skip_to_closing(SyntaxKind::BracketClose);
            self.close_delimiter(SyntaxKind::BracketClose);
        }

        self.parse_terminator();
        self.finish_node();
    }

    fn parse_setting_value(&mut self) {
        match self.current() {
            SyntaxKind::Identifier => {
                self.start_node(SyntaxKind::SettingValue);
                self.bump_identifier();
                self.finish_node();
            }
            SyntaxKind::MacroOpen => {
                self.start_node(SyntaxKind::SettingValue);
                self.parse_macro();
                self.finish_node();
            }
            _ => self.error_msg(DiagnosticKind::ExpectedToken, "setting value"),
        }
    }

    /// Statements that may take an input set: `out`, `is_in`, `foreach`,
    /// recursion, and bare set queries.
    fn parse_set_prefixed(&mut self) {
        let keyword = if self.currently_is(SyntaxKind::Dot) {
            if self.peek_nth(1) == SyntaxKind::Variable {
                self.peek_nth(2)
            } else {
                self.peek_nth(1)
            }
        } else {
            self.current()
        };

        let kind = match keyword {
            SyntaxKind::KwOut => SyntaxKind::Out,
            SyntaxKind::KwIsIn => SyntaxKind::IsIn,
            SyntaxKind::KwForeach => SyntaxKind::Foreach,
            SyntaxKind::Lt => SyntaxKind::RecurseUp,
            SyntaxKind::LtLt => SyntaxKind::RecurseUpRelations,
            SyntaxKind::Gt => SyntaxKind::RecurseDown,
            SyntaxKind::GtGt => SyntaxKind::RecurseDownRelations,
            // `.a;` and `.a[...]` select the set's elements
            SyntaxKind::Semicolon | SyntaxKind::Arrow | SyntaxKind::BracketOpen
                if self.currently_is(SyntaxKind::Dot) =>
            {
                self.parse_query();
                return;
            }
            _ => {
                self.error_statement();
                return;
            }
        };

        self.start_node(kind);
        if self.currently_is(SyntaxKind::Dot) {
            self.parse_set();
        }

        match kind {
            SyntaxKind::Out => self.parse_out_body(),
            SyntaxKind::IsIn => self.parse_is_in_body(),
            SyntaxKind::Foreach => self.parse_foreach_body(),
            _ => self.parse_recurse_body(),
        }
        self.finish_node();
    }

    /// `out (Word | Number)* ";"`
    fn parse_out_body(&mut self) {
        self.assert_current(SyntaxKind::KwOut);
        self.bump();
        while self.currently_is(SyntaxKind::Word) || self.currently_is(SyntaxKind::Number) {
            self.bump();
        }
        self.parse_terminator();
    }

    /// `is_in ("(" Number "," Number ")")? Assignment? ";"`
    fn parse_is_in_body(&mut self) {
        self.assert_current(SyntaxKind::KwIsIn);
        self.bump();

        if self.currently_is(SyntaxKind::ParenOpen) {
            self.push_delimiter(SyntaxKind::ParenOpen);
            self.bump();
            self.expect_number();
            if self.expect(SyntaxKind::Comma, "`,` between coordinates") {
                self.expect_number();
            }
            self.skip_to_closing(SyntaxKind::ParenClose);
            self.close_delimiter(SyntaxKind::ParenClose);
        }

        self.parse_assignment_opt();
        self.parse_terminator();
    }

    /// `foreach Set? Assignment? "(" Statement* ")" ";"?`
    fn parse_foreach_body(&mut self) {
        self.assert_current(SyntaxKind::KwForeach);
        self.bump();

        if self.currently_is(SyntaxKind::Dot) {
            self.parse_set();
        }
        self.parse_assignment_opt();

        if !self.currently_is(SyntaxKind::ParenOpen) {
            self.error_msg(DiagnosticKind::ExpectedToken, "`(` to open the loop body");
            return;
        }

        self.push_delimiter(SyntaxKind::ParenOpen);
        self.bump();
        if !self.enter_recursion() {
            self.pop_delimiter();
            return;
        }
        while !self.at_end() && !self.currently_is(SyntaxKind::ParenClose) {
            self.parse_statement();
        }
        self.exit_recursion();
        self.close_delimiter(SyntaxKind::ParenClose);

        self.eat_token(SyntaxKind::Semicolon);
    }

    /// `("<" | ">" | "<<" | ">>") Assignment? ";"`
    fn parse_recurse_body(&mut self) {
        debug_assert!(RECURSE.contains(self.current()));
        self.bump();
        self.parse_assignment_opt();
        self.parse_terminator();
    }

    /// Consumes the statement's `;`.
    ///
    /// Stray tokens before it are wrapped in an `Error` node. A missing `;`
    /// is reported with an insertion fix.
    pub(super) fn parse_terminator(&mut self) {
        if self.eat_token(SyntaxKind::Semicolon) {
            return;
        }

        if !self.at_end() && !self.currently_is_one_of(STATEMENT_RECOVERY) {
            self.error_recover(DiagnosticKind::ExpectedToken, "`;`", STATEMENT_RECOVERY);
            self.eat_token(SyntaxKind::Semicolon);
            return;
        }

        let at = self
            .last_non_trivia_end()
            .unwrap_or_else(|| self.current_span().start());
        self.error_with_fix(
            DiagnosticKind::MissingSemicolon,
            TextRange::empty(at),
            "add `;`",
            ";",
        );
    }

    /// Wraps tokens that cannot start a statement in an `Error` node, up to
    /// and including the next `;`.
    fn error_statement(&mut self) {
        self.start_node(SyntaxKind::Error);
        self.error(DiagnosticKind::ExpectedStatement);
        self.bump();
        while !self.at_end() && !self.currently_is_one_of(STATEMENT_RECOVERY) {
            self.bump();
        }
        self.eat_token(SyntaxKind::Semicolon);
        self.finish_node();
    }
}
