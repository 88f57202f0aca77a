//! Parsing (tokens to AST)
//!
//! The parser converts a stream of tokens into an Abstract Syntax Tree (AST).
//! Expressions follow a fixed precedence ladder, statements are dispatched
//! predictively on their first token. Parsing stops at the first error.

mod expr;
mod stmt;

use crate::ast::*;
use crate::diagnostic::{error_codes, Diagnostic};
use crate::token::{Token, TokenKind};

/// Result of a parse step
pub(super) type ParseResult<T> = Result<T, Diagnostic>;

/// Maximum number of parameters in a function declaration
pub const MAX_PARAMS: usize = 255;

/// Parser state for building AST from tokens
pub struct Parser {
    pub(super) tokens: Vec<Token>,
    pub(super) current: usize,
}

impl Parser {
    /// Create a new parser for the given tokens
    ///
    /// A missing trailing `Eof` token is supplied.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map(|t| t.kind) != Some(TokenKind::Eof) {
            let line = tokens.last().map(|t| t.line).unwrap_or(1);
            tokens.push(Token::new(TokenKind::Eof, "", line));
        }
        Self { tokens, current: 0 }
    }

    /// Parse tokens into an AST
    pub fn parse(&mut self) -> ParseResult<Program> {
        let program = self.parse_stmts()?;

        // parse_stmts only stops early on a block terminator
        if !self.is_at_end() {
            let lexeme = self.peek().lexeme.clone();
            return Err(self.error(format!("Unexpected '{}'", lexeme)));
        }

        tracing::debug!(statements = program.len(), "parsed program");
        Ok(program)
    }

    // === Helper methods ===

    /// Advance to next token
    pub(super) fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    /// Most recently consumed token
    pub(super) fn previous(&self) -> &Token {
        &self.tokens[self.current.saturating_sub(1)]
    }

    /// Peek at current token
    pub(super) fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    /// Check if current token matches kind
    pub(super) fn check(&self, kind: TokenKind) -> bool {
        !self.is_at_end() && self.peek().kind == kind
    }

    /// Match and consume token if it matches
    pub(super) fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume token of given kind or error
    pub(super) fn consume(&mut self, kind: TokenKind, message: &str) -> ParseResult<&Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.error_found(message))
        }
    }

    /// Consume an identifier, rejecting keywords with a dedicated message
    pub(super) fn consume_identifier(&mut self, context: &str) -> ParseResult<Identifier> {
        let current = self.peek();

        if current.kind == TokenKind::Identifier {
            let ident = Identifier::new(current.lexeme.clone(), current.line);
            self.advance();
            Ok(ident)
        } else if TokenKind::is_keyword(&current.lexeme) == Some(current.kind) {
            Err(self.error(format!(
                "Cannot use keyword '{}' as {}",
                current.lexeme, context
            )))
        } else {
            Err(self.error_found(&format!("Expected {}", context)))
        }
    }

    /// Check if at end of token stream
    pub(super) fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    /// Describe the current token for error messages
    pub(super) fn found(&self) -> String {
        if self.is_at_end() {
            "end of input".to_string()
        } else {
            format!("'{}'", self.peek().lexeme)
        }
    }

    /// Build a syntax error located at the current token
    pub(super) fn error(&self, message: impl Into<String>) -> Diagnostic {
        Diagnostic::parse(error_codes::SYNTAX_ERROR, message, self.peek().line)
    }

    /// Build a syntax error that names the offending token
    pub(super) fn error_found(&self, message: &str) -> Diagnostic {
        self.error(format!("{}, found {}", message, self.found()))
    }
}
