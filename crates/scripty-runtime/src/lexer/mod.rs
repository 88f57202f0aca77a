//! Lexical analysis (tokenization)
//!
//! The lexer converts Scripty source code into a stream of tokens, each tagged with
//! the line it started on. Scanning stops at the first malformed token.

use crate::diagnostic::{error_codes, Diagnostic};
use crate::token::{Token, TokenKind};

mod literals;

/// Result of scanning a single token
pub(super) type LexResult<T> = Result<T, Diagnostic>;

/// Lexer state for tokenizing source code
pub struct Lexer {
    /// Original source code
    pub(super) source: String,
    /// Characters of source code
    pub(super) chars: Vec<char>,
    /// Current position in chars
    pub(super) current: usize,
    /// Current line number (1-indexed)
    pub(super) line: usize,
    /// Start position of current token
    pub(super) start_pos: usize,
    /// Start line of current token
    pub(super) start_line: usize,
}

impl Lexer {
    /// Create a new lexer for the given source code
    pub fn new(source: impl Into<String>) -> Self {
        let source = source.into();
        let chars: Vec<char> = source.chars().collect();
        Self {
            source,
            chars,
            current: 0,
            line: 1,
            start_pos: 0,
            start_line: 1,
        }
    }

    /// Tokenize the source code
    ///
    /// The returned stream always ends with an `Eof` token.
    pub fn tokenize(&mut self) -> LexResult<Vec<Token>> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token()?;
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }

        tracing::debug!(count = tokens.len(), "tokenized source");
        Ok(tokens)
    }

    /// Scan the next token
    fn next_token(&mut self) -> LexResult<Token> {
        self.skip_whitespace_and_comments()?;

        // Mark start of token
        self.start_pos = self.current;
        self.start_line = self.line;

        if self.is_at_end() {
            return Ok(self.make_token(TokenKind::Eof));
        }

        let c = self.advance();

        let token = match c {
            // Single-character tokens
            '(' => self.make_token(TokenKind::LeftParen),
            ')' => self.make_token(TokenKind::RightParen),
            '{' => self.make_token(TokenKind::LeftBrace),
            '}' => self.make_token(TokenKind::RightBrace),
            '[' => self.make_token(TokenKind::LeftBracket),
            ']' => self.make_token(TokenKind::RightBracket),
            '.' => self.make_token(TokenKind::Dot),
            ',' => self.make_token(TokenKind::Comma),
            ';' => self.make_token(TokenKind::Semicolon),
            '+' => self.make_token(TokenKind::Plus),
            '-' => self.make_token(TokenKind::Minus),
            '*' => self.make_token(TokenKind::Star),
            '/' => self.make_token(TokenKind::Slash),
            '^' => self.make_token(TokenKind::Caret),
            '%' => self.make_token(TokenKind::Percent),
            '?' => self.make_token(TokenKind::Question),

            // Operators with potential compound forms
            '=' => {
                if self.match_char('=') {
                    self.make_token(TokenKind::EqEq)
                } else {
                    self.make_token(TokenKind::Equal)
                }
            }
            '~' => {
                if self.match_char('=') {
                    self.make_token(TokenKind::Ne)
                } else {
                    self.make_token(TokenKind::Not)
                }
            }
            '<' => {
                if self.match_char('=') {
                    self.make_token(TokenKind::Le)
                } else {
                    self.make_token(TokenKind::Lt)
                }
            }
            '>' => {
                if self.match_char('=') {
                    self.make_token(TokenKind::Ge)
                } else {
                    self.make_token(TokenKind::Gt)
                }
            }
            ':' => {
                if self.match_char(':') {
                    self.make_token(TokenKind::Colon)
                } else {
                    // Both `:` and `:=` assign
                    self.match_char('=');
                    self.make_token(TokenKind::Assign)
                }
            }

            // String literals
            '"' | '\'' => self.string(c)?,

            // Numbers
            c if c.is_ascii_digit() => self.number(),

            // Identifiers and keywords
            c if c.is_alphabetic() || c == '_' => self.identifier(),

            // Unexpected character
            _ => {
                return Err(self.error(
                    error_codes::UNEXPECTED_CHARACTER,
                    &format!("Unexpected character '{}'", c),
                ))
            }
        };

        Ok(token)
    }

    /// Skip whitespace and comments
    fn skip_whitespace_and_comments(&mut self) -> LexResult<()> {
        loop {
            if self.is_at_end() {
                return Ok(());
            }

            match self.peek() {
                ' ' | '\r' | '\t' => {
                    self.advance();
                }
                '\n' => {
                    self.advance();
                    self.line += 1;
                }
                '-' if self.peek_next() == Some('-') => {
                    // Line comment
                    while !self.is_at_end() && self.peek() != '\n' {
                        self.advance();
                    }
                }
                '/' if self.peek_next() == Some('*') => self.block_comment()?,
                _ => return Ok(()),
            }
        }
    }

    /// Skip a `/* ... */` comment; the first `*/` closes it
    fn block_comment(&mut self) -> LexResult<()> {
        let comment_start_line = self.line;
        self.advance(); // /
        self.advance(); // *

        while !self.is_at_end() {
            if self.peek() == '*' && self.peek_next() == Some('/') {
                self.advance(); // *
                self.advance(); // /
                return Ok(());
            }
            if self.peek() == '\n' {
                self.line += 1;
            }
            self.advance();
        }

        Err(
            Diagnostic::lexing(
                error_codes::UNTERMINATED_COMMENT,
                "Unterminated block comment",
                comment_start_line,
            )
            .with_source(&self.source)
            .with_help("add '*/' to close the block comment"),
        )
    }

    // === Character navigation ===

    /// Advance to next character and return it
    pub(super) fn advance(&mut self) -> char {
        let c = self.chars[self.current];
        self.current += 1;
        c
    }

    /// Peek at current character without advancing
    pub(super) fn peek(&self) -> char {
        self.lookahead(0).unwrap_or('\0')
    }

    /// Peek at next character (current + 1)
    pub(super) fn peek_next(&self) -> Option<char> {
        self.lookahead(1)
    }

    /// Peek `n` characters past the current one
    pub(super) fn lookahead(&self, n: usize) -> Option<char> {
        self.chars.get(self.current + n).copied()
    }

    /// Check if current character matches expected, and advance if so
    fn match_char(&mut self, expected: char) -> bool {
        if self.is_at_end() || self.chars[self.current] != expected {
            false
        } else {
            self.advance();
            true
        }
    }

    /// Check if we've reached the end of source
    pub(super) fn is_at_end(&self) -> bool {
        self.current >= self.chars.len()
    }

    // === Token creation ===

    /// Create a token of the given kind from the current lexeme
    pub(super) fn make_token(&self, kind: TokenKind) -> Token {
        let lexeme: String = self.chars[self.start_pos..self.current].iter().collect();
        Token::new(kind, lexeme, self.start_line)
    }

    /// Build a lexing diagnostic located at the start of the current token
    pub(super) fn error(&self, code: &str, message: &str) -> Diagnostic {
        Diagnostic::lexing(code, message, self.start_line).with_source(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    fn lex_error(source: &str) -> Diagnostic {
        Lexer::new(source)
            .tokenize()
            .expect_err("expected a lexing error")
    }

    #[test]
    fn test_empty_input() {
        let tokens = Lexer::new("").tokenize().unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Eof);
        assert_eq!(tokens[0].lexeme, "");
    }

    #[test]
    fn test_single_char_tokens() {
        assert_eq!(
            kinds("(){}[].,;?"),
            vec![
                TokenKind::LeftParen,
                TokenKind::RightParen,
                TokenKind::LeftBrace,
                TokenKind::RightBrace,
                TokenKind::LeftBracket,
                TokenKind::RightBracket,
                TokenKind::Dot,
                TokenKind::Comma,
                TokenKind::Semicolon,
                TokenKind::Question,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            kinds("+ - * / ^ % == ~= ~ < <= > >= = :: :="),
            vec![
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::Caret,
                TokenKind::Percent,
                TokenKind::EqEq,
                TokenKind::Ne,
                TokenKind::Not,
                TokenKind::Lt,
                TokenKind::Le,
                TokenKind::Gt,
                TokenKind::Ge,
                TokenKind::Equal,
                TokenKind::Colon,
                TokenKind::Assign,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_assign_lexemes() {
        let tokens = Lexer::new("x := 1 y : 2").tokenize().unwrap();
        assert_eq!(tokens[1].kind, TokenKind::Assign);
        assert_eq!(tokens[1].lexeme, ":=");
        assert_eq!(tokens[4].kind, TokenKind::Assign);
        assert_eq!(tokens[4].lexeme, ":");
    }

    #[test]
    fn test_keywords() {
        assert_eq!(
            kinds("if then else end while do for func ret local print println and or true false"),
            vec![
                TokenKind::If,
                TokenKind::Then,
                TokenKind::Else,
                TokenKind::End,
                TokenKind::While,
                TokenKind::Do,
                TokenKind::For,
                TokenKind::Func,
                TokenKind::Ret,
                TokenKind::Local,
                TokenKind::Print,
                TokenKind::Println,
                TokenKind::And,
                TokenKind::Or,
                TokenKind::True,
                TokenKind::False,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_identifiers() {
        let tokens = Lexer::new("foo bar_baz _test x123 ending").tokenize().unwrap();
        for (i, name) in ["foo", "bar_baz", "_test", "x123", "ending"].iter().enumerate() {
            assert_eq!(tokens[i].kind, TokenKind::Identifier);
            assert_eq!(tokens[i].lexeme, *name);
        }
    }

    #[test]
    fn test_numbers() {
        let tokens = Lexer::new("42 3.14 0 1.").tokenize().unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Integer);
        assert_eq!(tokens[0].lexeme, "42");
        assert_eq!(tokens[1].kind, TokenKind::Float);
        assert_eq!(tokens[1].lexeme, "3.14");
        assert_eq!(tokens[2].kind, TokenKind::Integer);
        // A dot not followed by a digit ends the number
        assert_eq!(tokens[3].kind, TokenKind::Integer);
        assert_eq!(tokens[3].lexeme, "1");
        assert_eq!(tokens[4].kind, TokenKind::Dot);
    }

    #[test]
    fn test_strings_keep_quotes() {
        let tokens = Lexer::new(r#"'single' "double" 'it"s'"#).tokenize().unwrap();
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].lexeme, "'single'");
        assert_eq!(tokens[1].lexeme, "\"double\"");
        assert_eq!(tokens[2].lexeme, "'it\"s'");
    }

    #[test]
    fn test_multiline_string_advances_line() {
        let tokens = Lexer::new("'a\nb' x").tokenize().unwrap();
        assert_eq!(tokens[0].line, 1);
        assert_eq!(tokens[1].line, 2);
    }

    #[test]
    fn test_line_comment() {
        assert_eq!(
            kinds("x := 5 -- a comment\nprint x"),
            vec![
                TokenKind::Identifier,
                TokenKind::Assign,
                TokenKind::Integer,
                TokenKind::Print,
                TokenKind::Identifier,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_minus_is_not_a_comment() {
        assert_eq!(
            kinds("1 - -2"),
            vec![
                TokenKind::Integer,
                TokenKind::Minus,
                TokenKind::Minus,
                TokenKind::Integer,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_block_comment() {
        let tokens = Lexer::new("a /* one\ntwo */ b").tokenize().unwrap();
        assert_eq!(tokens[0].lexeme, "a");
        assert_eq!(tokens[1].lexeme, "b");
        assert_eq!(tokens[1].line, 2);
    }

    #[test]
    fn test_block_comment_first_close_wins() {
        assert_eq!(
            kinds("/* /* inner */ x"),
            vec![TokenKind::Identifier, TokenKind::Eof]
        );
    }

    #[test]
    fn test_line_tracking() {
        let tokens = Lexer::new("a\n\nb\n  c").tokenize().unwrap();
        assert_eq!(tokens[0].line, 1);
        assert_eq!(tokens[1].line, 3);
        assert_eq!(tokens[2].line, 4);
        assert_eq!(tokens[3].kind, TokenKind::Eof);
        assert_eq!(tokens[3].line, 4);
    }

    #[test]
    fn test_lookahead() {
        let mut lexer = Lexer::new("abc");
        assert_eq!(lexer.lookahead(0), Some('a'));
        assert_eq!(lexer.lookahead(2), Some('c'));
        assert_eq!(lexer.lookahead(3), None);
        lexer.advance();
        assert_eq!(lexer.peek(), 'b');
        assert_eq!(lexer.peek_next(), Some('c'));
    }

    #[test]
    fn test_unterminated_string() {
        let diag = lex_error("x := 'hello");
        assert_eq!(diag.code, error_codes::UNTERMINATED_STRING);
        assert!(diag.message.contains("Unterminated string"));
        assert_eq!(diag.line, 1);
    }

    #[test]
    fn test_mismatched_quotes_are_unterminated() {
        let diag = lex_error("print \"hello'");
        assert_eq!(diag.code, error_codes::UNTERMINATED_STRING);
    }

    #[test]
    fn test_unterminated_string_reports_opening_line() {
        let diag = lex_error("x := 1\ny := 'abc\n\n");
        assert_eq!(diag.line, 2);
        assert_eq!(diag.snippet, "y := 'abc");
    }

    #[test]
    fn test_unterminated_block_comment() {
        let diag = lex_error("x := 1\n/* never\nends");
        assert_eq!(diag.code, error_codes::UNTERMINATED_COMMENT);
        assert_eq!(diag.line, 2);
    }

    #[test]
    fn test_unexpected_character() {
        for source in ["@", "#", "$", "&", "|", "`", "!"] {
            let diag = lex_error(source);
            assert_eq!(diag.code, error_codes::UNEXPECTED_CHARACTER, "source {}", source);
            assert!(diag.message.contains(source));
        }
    }

    #[test]
    fn test_unexpected_character_line() {
        let diag = lex_error("x := 1\nprint x @ 2");
        assert_eq!(diag.line, 2);
        assert_eq!(diag.kind, crate::diagnostic::DiagnosticKind::Lexing);
    }
}
