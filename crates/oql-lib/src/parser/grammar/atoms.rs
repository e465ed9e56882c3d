use crate::diagnostics::DiagnosticKind;
use crate::parser::Parser;
use crate::parser::cst::SyntaxKind;
use crate::parser::cst::token_sets::MACRO_RECOVERY;
use crate::parser::lexer::is_unterminated_string;

impl Parser<'_> {
    /// `"." Variable`
    pub(super) fn parse_set(&mut self) {
        self.assert_current(SyntaxKind::Dot);
        self.start_node(SyntaxKind::Set);
        self.bump();
        if !self.eat_token(SyntaxKind::Variable) {
            self.error(DiagnosticKind::ExpectedVariable);
        }
        self.finish_node();
    }

    /// `"->" Set`, if present.
    pub(super) fn parse_assignment_opt(&mut self) {
        if !self.currently_is(SyntaxKind::Arrow) {
            return;
        }
        self.start_node(SyntaxKind::Assignment);
        self.bump();
        if self.currently_is(SyntaxKind::Dot) {
            self.parse_set();
        } else {
            self.error_msg(DiagnosticKind::ExpectedVariable, "`->` must be followed by `.name`");
        }
        self.finish_node();
    }

    /// `"{{" Identifier (":" MacroValue (";" MacroValue)*)? "}}"`
    pub(super) fn parse_macro(&mut self) {
        self.assert_current(SyntaxKind::MacroOpen);
        self.start_node(SyntaxKind::Macro);
        self.push_delimiter(SyntaxKind::MacroOpen);
        self.bump();

        if !self.eat_token(SyntaxKind::Identifier) {
            self.error_msg(DiagnosticKind::ExpectedToken, "macro name");
        }

        if self.eat_token(SyntaxKind::Colon) {
            self.parse_macro_value();
            while self.eat_token(SyntaxKind::Semicolon) {
                self.parse_macro_value();
            }
        }

        if !self.at_end() && !self.currently_is_one_of(MACRO_RECOVERY) {
            self.error_recover(DiagnosticKind::UnexpectedToken, "in macro", MACRO_RECOVERY);
        }
        self.close_delimiter(SyntaxKind::MacroClose);
        self.finish_node();
    }

    /// `MacroText* ("@" LanguageCode)?`
    fn parse_macro_value(&mut self) {
        self.start_node(SyntaxKind::MacroValue);
        while self.currently_is(SyntaxKind::MacroText) {
            self.bump();
        }
        if self.eat_token(SyntaxKind::At) && !self.eat_token(SyntaxKind::LanguageCode) {
            self.error_msg(DiagnosticKind::ExpectedToken, "language code after `@`");
        }
        self.finish_node();
    }

    /// Bumps an `Identifier`/`Regex`, reporting a missing closing quote.
    pub(super) fn bump_identifier(&mut self) {
        let span = self.current_span();
        if is_unterminated_string(self.current_text()) {
            self.error_at(DiagnosticKind::UnterminatedString, span);
        }
        self.bump();
    }

    pub(super) fn expect_number(&mut self) -> bool {
        if self.eat_token(SyntaxKind::Number) {
            return true;
        }
        self.error(DiagnosticKind::ExpectedNumber);
        false
    }

    /// Wraps stray tokens before `close` in an `Error` node.
    pub(super) fn skip_to_closing(&mut self, close: SyntaxKind) {
        use crate::parser::cst::token_sets::FILTER_RECOVERY;

        if self.at_end() || self.currently_is_one_of(FILTER_RECOVERY) {
            return;
        }
        let what = match close {
            SyntaxKind::BracketClose => "`]`",
            _ => "`)`",
        };
        self.error_recover(DiagnosticKind::ExpectedToken, what, FILTER_RECOVERY);
    }
}
