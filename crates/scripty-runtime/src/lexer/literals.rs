//! Literal scanning for the lexer

use crate::diagnostic::error_codes;
use crate::lexer::{LexResult, Lexer};
use crate::token::{Token, TokenKind};

impl Lexer {
    /// Scan a string literal opened by `quote`
    ///
    /// The literal may span lines and ends at the next matching quote character;
    /// backslashes are not interpreted here.
    pub(super) fn string(&mut self, quote: char) -> LexResult<Token> {
        while !self.is_at_end() && self.peek() != quote {
            if self.peek() == '\n' {
                self.line += 1;
            }
            self.advance();
        }

        if self.is_at_end() {
            return Err(self
                .error(error_codes::UNTERMINATED_STRING, "Unterminated string literal")
                .with_help(format!("add a closing {} to end the string", quote)));
        }

        self.advance(); // Closing quote
        Ok(self.make_token(TokenKind::String))
    }

    /// Scan a number literal (integer or float)
    pub(super) fn number(&mut self) -> Token {
        while !self.is_at_end() && self.peek().is_ascii_digit() {
            self.advance();
        }

        // A fraction needs a digit right after the dot
        let is_float = self.peek() == '.' && self.peek_next().is_some_and(|c| c.is_ascii_digit());
        if is_float {
            self.advance(); // consume .
            while !self.is_at_end() && self.peek().is_ascii_digit() {
                self.advance();
            }
            self.make_token(TokenKind::Float)
        } else {
            self.make_token(TokenKind::Integer)
        }
    }

    /// Scan an identifier or keyword
    pub(super) fn identifier(&mut self) -> Token {
        while !self.is_at_end() {
            let c = self.peek();
            if c.is_alphanumeric() || c == '_' {
                self.advance();
            } else {
                break;
            }
        }

        let lexeme: String = self.chars[self.start_pos..self.current].iter().collect();
        let kind = TokenKind::is_keyword(&lexeme).unwrap_or(TokenKind::Identifier);
        Token::new(kind, lexeme, self.start_line)
    }
}
