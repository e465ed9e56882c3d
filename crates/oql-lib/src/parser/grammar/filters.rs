use crate::diagnostics::DiagnosticKind;
use crate::parser::Parser;
use crate::parser::cst::SyntaxKind;

impl Parser<'_> {
    /// `"[" Tag "]"`
    pub(super) fn parse_square_filter(&mut self) {
        self.assert_current(SyntaxKind::BracketOpen);
        self.start_node(SyntaxKind::SquareFilter);
        self.push_delimiter(SyntaxKind::BracketOpen);
        self.bump();

        match self.current() {
            SyntaxKind::Identifier | SyntaxKind::Negation | SyntaxKind::Tilde => self.parse_tag(),
            _ => self.error(DiagnosticKind::ExpectedKey),
        }

        self.skip_to_closing(SyntaxKind::BracketClose);
        self.close_delimiter(SyntaxKind::BracketClose);
        self.finish_node();
    }

    /// ```text
    /// Tag := "!" Key
    ///      | Key (("=" | "!=") Value | ("~" | "!~") Regex ("," Identifier)?)?
    ///      | "~" Regex "~" Regex ("," Identifier)?
    /// ```
    fn parse_tag(&mut self) {
        self.start_node(SyntaxKind::Tag);

        match self.current() {
            SyntaxKind::Negation => {
                self.bump();
                self.parse_key();
            }
            SyntaxKind::Tilde => {
                self.bump();
                if self.expect_regex()
                    && self.expect(SyntaxKind::Tilde, "`~` between key and value patterns")
                {
                    self.expect_regex();
                }
                self.parse_regex_flags();
            }
            _ => {
                self.parse_key();
                match self.current() {
                    SyntaxKind::Equals | SyntaxKind::NotEquals => {
                        self.bump();
                        self.parse_value();
                    }
                    SyntaxKind::Tilde | SyntaxKind::NotTilde => {
                        self.bump();
                        self.expect_regex();
                        self.parse_regex_flags();
                    }
                    _ => {}
                }
            }
        }

        self.finish_node();
    }

    fn parse_key(&mut self) {
        if !self.currently_is(SyntaxKind::Identifier) {
            self.error(DiagnosticKind::ExpectedKey);
            return;
        }
        self.start_node(SyntaxKind::Key);
        self.bump_identifier();
        self.finish_node();
    }

    fn parse_value(&mut self) {
        if !self.currently_is(SyntaxKind::Identifier) {
            self.error(DiagnosticKind::ExpectedValue);
            return;
        }
        self.start_node(SyntaxKind::Value);
        self.bump_identifier();
        self.finish_node();
    }

    fn expect_regex(&mut self) -> bool {
        if !self.currently_is(SyntaxKind::Regex) {
            self.error(DiagnosticKind::ExpectedRegex);
            return false;
        }
        self.bump_identifier();
        true
    }

    /// `("," Identifier)?`, e.g. `,i` for case-insensitive matching.
    fn parse_regex_flags(&mut self) {
        if !self.eat_token(SyntaxKind::Comma) {
            return;
        }
        if !self.eat_token(SyntaxKind::Identifier) {
            self.error_msg(DiagnosticKind::ExpectedToken, "regex flag after `,`");
        }
    }

    /// `"(" (Macro | Around | Area | Bbox) ")"`
    pub(super) fn parse_round_filter(&mut self) {
        self.assert_current(SyntaxKind::ParenOpen);
        self.start_node(SyntaxKind::RoundFilter);
        self.push_delimiter(SyntaxKind::ParenOpen);
        self.bump();

        match self.current() {
            SyntaxKind::MacroOpen => self.parse_macro(),
            SyntaxKind::KwAround => self.parse_around(),
            SyntaxKind::Keyword if self.current_text() == "area" => self.parse_area(),
            SyntaxKind::Number => self.parse_bbox(),
            _ => self.error(DiagnosticKind::ExpectedFilter),
        }

        self.skip_to_closing(SyntaxKind::ParenClose);
        self.close_delimiter(SyntaxKind::ParenClose);
        self.finish_node();
    }

    /// `"around" Set? ":" Radius ("," Number "," Number)*`
    ///
    /// The trailing coordinate pairs select points instead of an input set.
    fn parse_around(&mut self) {
        self.start_node(SyntaxKind::Around);
        self.bump();

        if self.currently_is(SyntaxKind::Dot) {
            self.parse_set();
        }

        if self.expect(SyntaxKind::Colon, "`:` before the radius") {
            if self.currently_is(SyntaxKind::Number) {
                self.start_node(SyntaxKind::Radius);
                self.bump();
                self.finish_node();
            } else {
                self.error(DiagnosticKind::ExpectedNumber);
            }
        }

        while self.eat_token(SyntaxKind::Comma) {
            if !self.expect_number() {
                break;
            }
        }

        self.finish_node();
    }

    /// `"area" Set?`
    fn parse_area(&mut self) {
        self.start_node(SyntaxKind::Area);
        self.bump();
        if self.currently_is(SyntaxKind::Dot) {
            self.parse_set();
        }
        self.finish_node();
    }

    /// `Number ("," Number)*`
    fn parse_bbox(&mut self) {
        self.start_node(SyntaxKind::Bbox);
        self.bump();
        while self.eat_token(SyntaxKind::Comma) {
            if !self.expect_number() {
                break;
            }
        }
        self.finish_node();
    }
}
