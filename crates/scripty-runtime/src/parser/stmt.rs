//! Statement parsing

use std::rc::Rc;

use crate::ast::*;
use crate::diagnostic::{error_codes, Diagnostic};
use crate::parser::{ParseResult, Parser, MAX_PARAMS};
use crate::token::TokenKind;

impl Parser {
    /// Parse a statement sequence
    ///
    /// Stops at end of input or at a block terminator (`else`, `end`) left for
    /// the enclosing construct.
    pub(super) fn parse_stmts(&mut self) -> ParseResult<Stmts> {
        let line = self.peek().line;
        let mut statements = Vec::new();

        while !self.is_at_end() && !self.check(TokenKind::Else) && !self.check(TokenKind::End) {
            statements.push(self.parse_statement()?);
            self.match_token(TokenKind::Semicolon);
        }

        Ok(Stmts::new(statements, line))
    }

    /// Parse a statement
    pub(super) fn parse_statement(&mut self) -> ParseResult<Stmt> {
        match self.peek().kind {
            TokenKind::Print | TokenKind::Println => self.parse_print_stmt(),
            TokenKind::If => self.parse_if_stmt(),
            TokenKind::While => self.parse_while_stmt(),
            TokenKind::For => self.parse_for_stmt(),
            TokenKind::Func => Ok(Stmt::FuncDecl(Rc::new(self.parse_function()?))),
            TokenKind::Ret => self.parse_return_stmt(),
            TokenKind::Local => self.parse_local_decl(),
            _ => self.parse_assign_or_call_stmt(),
        }
    }

    fn parse_print_stmt(&mut self) -> ParseResult<Stmt> {
        let token = self.advance();
        let newline = token.kind == TokenKind::Println;
        let line = token.line;
        let value = self.parse_expression()?;

        Ok(Stmt::Print(PrintStmt {
            value,
            newline,
            line,
        }))
    }

    fn parse_if_stmt(&mut self) -> ParseResult<Stmt> {
        let line = self.advance().line;
        let test = self.parse_expression()?;
        self.consume(TokenKind::Then, "Expected 'then' after if condition")?;

        let then_stmts = self.parse_stmts()?;
        let else_stmts = if self.match_token(TokenKind::Else) {
            Some(self.parse_stmts()?)
        } else {
            None
        };

        self.consume(TokenKind::End, "Expected 'end' to close 'if'")?;

        Ok(Stmt::If(IfStmt {
            test,
            then_stmts,
            else_stmts,
            line,
        }))
    }

    fn parse_while_stmt(&mut self) -> ParseResult<Stmt> {
        let line = self.advance().line;
        let test = self.parse_expression()?;
        self.consume(TokenKind::Do, "Expected 'do' after while condition")?;
        let body = self.parse_stmts()?;
        self.consume(TokenKind::End, "Expected 'end' to close 'while'")?;

        Ok(Stmt::While(WhileStmt { test, body, line }))
    }

    fn parse_for_stmt(&mut self) -> ParseResult<Stmt> {
        let line = self.advance().line;
        let var = self.consume_identifier("a loop variable")?;
        self.consume_assign("Expected ':=' after loop variable")?;

        let start = self.parse_expression()?;
        self.consume(TokenKind::Comma, "Expected ',' after loop start")?;
        let end = self.parse_expression()?;
        let step = if self.match_token(TokenKind::Comma) {
            Some(self.parse_expression()?)
        } else {
            None
        };

        self.consume(TokenKind::Do, "Expected 'do' after for range")?;
        let body = self.parse_stmts()?;
        self.consume(TokenKind::End, "Expected 'end' to close 'for'")?;

        Ok(Stmt::For(ForStmt {
            var,
            start,
            end,
            step,
            body,
            line,
        }))
    }

    /// Parse a function declaration
    fn parse_function(&mut self) -> ParseResult<FuncDecl> {
        let line = self.advance().line;
        let name = self.consume_identifier("a function name")?;
        self.consume(TokenKind::LeftParen, "Expected '(' after function name")?;

        let mut params = Vec::new();
        if !self.check(TokenKind::RightParen) {
            loop {
                if params.len() >= MAX_PARAMS {
                    return Err(Diagnostic::parse(
                        error_codes::TOO_MANY_PARAMETERS,
                        format!(
                            "Too many parameters (max {}), found {}",
                            MAX_PARAMS,
                            self.found()
                        ),
                        self.peek().line,
                    ));
                }
                params.push(self.consume_identifier("a parameter name")?);

                if !self.match_token(TokenKind::Comma) {
                    break;
                }
            }
        }

        self.consume(TokenKind::RightParen, "Expected ')' after parameters")?;
        let body = self.parse_stmts()?;
        self.consume(TokenKind::End, "Expected 'end' to close function body")?;

        Ok(FuncDecl {
            name,
            params,
            body,
            line,
        })
    }

    /// `ret` takes a value only from an expression starting on its own line
    fn parse_return_stmt(&mut self) -> ParseResult<Stmt> {
        let line = self.advance().line;

        let next = self.peek();
        let value = if next.kind.starts_expression() && next.line == line {
            Some(self.parse_expression()?)
        } else {
            None
        };

        Ok(Stmt::Ret(ReturnStmt { value, line }))
    }

    fn parse_local_decl(&mut self) -> ParseResult<Stmt> {
        let line = self.advance().line;
        let name = self.consume_identifier("a variable name")?;

        let value = if self.check(TokenKind::Assign) || self.check(TokenKind::Equal) {
            self.consume_assign("Expected ':=' after variable name")?;
            Some(self.parse_expression()?)
        } else {
            None
        };

        Ok(Stmt::Local(LocalDecl { name, value, line }))
    }

    /// Parse `target := value` or a call statement
    fn parse_assign_or_call_stmt(&mut self) -> ParseResult<Stmt> {
        let first = self.peek().clone();
        let expr = self.parse_expression()?;

        if self.check(TokenKind::Assign) || self.check(TokenKind::Equal) {
            let name = match expr {
                Expr::Identifier(ident) => ident,
                _ => {
                    return Err(Diagnostic::parse(
                        error_codes::SYNTAX_ERROR,
                        format!("Invalid assignment target, found '{}'", first.lexeme),
                        first.line,
                    ))
                }
            };
            self.consume_assign("Expected ':=' in assignment")?;
            let value = self.parse_expression()?;
            let line = name.line;
            return Ok(Stmt::Assign(Assign { name, value, line }));
        }

        match expr {
            Expr::Call(call) => Ok(Stmt::Call(call)),
            _ => Err(Diagnostic::parse(
                error_codes::SYNTAX_ERROR,
                format!("Expected a statement, found '{}'", first.lexeme),
                first.line,
            )
            .with_note("only assignments and function calls can stand alone")),
        }
    }

    /// Consume `:=`, pointing users of `=` at the assignment operator
    fn consume_assign(&mut self, message: &str) -> ParseResult<()> {
        if self.check(TokenKind::Equal) {
            return Err(self
                .error_found(message)
                .with_help("use ':=' for assignment"));
        }
        self.consume(TokenKind::Assign, message)?;
        Ok(())
    }
}
