//! Expression parsing (precedence ladder)
//!
//! Lowest to highest: `or`, `and`, equality, comparison, addition,
//! multiplication, modulo, exponent, unary, primary.

use crate::ast::*;
use crate::parser::{ParseResult, Parser};
use crate::token::TokenKind;

impl Parser {
    /// Parse an expression
    pub(super) fn parse_expression(&mut self) -> ParseResult<Expr> {
        self.parse_or()
    }

    fn parse_or(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_and()?;

        while self.match_token(TokenKind::Or) {
            let line = self.previous().line;
            let right = self.parse_and()?;
            left = logical(LogicalOp::Or, left, right, line);
        }

        Ok(left)
    }

    fn parse_and(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_equality()?;

        while self.match_token(TokenKind::And) {
            let line = self.previous().line;
            let right = self.parse_equality()?;
            left = logical(LogicalOp::And, left, right, line);
        }

        Ok(left)
    }

    fn parse_equality(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_comparison()?;

        loop {
            let op = match self.peek().kind {
                TokenKind::EqEq => BinaryOp::Eq,
                TokenKind::Ne => BinaryOp::Ne,
                _ => break,
            };
            let line = self.advance().line;
            let right = self.parse_comparison()?;
            left = binary(op, left, right, line);
        }

        Ok(left)
    }

    fn parse_comparison(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_addition()?;

        loop {
            let op = match self.peek().kind {
                TokenKind::Gt => BinaryOp::Gt,
                TokenKind::Ge => BinaryOp::Ge,
                TokenKind::Lt => BinaryOp::Lt,
                TokenKind::Le => BinaryOp::Le,
                _ => break,
            };
            let line = self.advance().line;
            let right = self.parse_addition()?;
            left = binary(op, left, right, line);
        }

        Ok(left)
    }

    fn parse_addition(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_multiplication()?;

        loop {
            let op = match self.peek().kind {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => break,
            };
            let line = self.advance().line;
            let right = self.parse_multiplication()?;
            left = binary(op, left, right, line);
        }

        Ok(left)
    }

    fn parse_multiplication(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_modulo()?;

        loop {
            let op = match self.peek().kind {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                _ => break,
            };
            let line = self.advance().line;
            let right = self.parse_modulo()?;
            left = binary(op, left, right, line);
        }

        Ok(left)
    }

    fn parse_modulo(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_exponent()?;

        while self.match_token(TokenKind::Percent) {
            let line = self.previous().line;
            let right = self.parse_exponent()?;
            left = binary(BinaryOp::Mod, left, right, line);
        }

        Ok(left)
    }

    /// Right associative: `2 ^ 3 ^ 2` is `2 ^ (3 ^ 2)`
    fn parse_exponent(&mut self) -> ParseResult<Expr> {
        let base = self.parse_unary()?;

        if self.match_token(TokenKind::Caret) {
            let line = self.previous().line;
            let exponent = self.parse_exponent()?;
            return Ok(binary(BinaryOp::Pow, base, exponent, line));
        }

        Ok(base)
    }

    fn parse_unary(&mut self) -> ParseResult<Expr> {
        let op = match self.peek().kind {
            TokenKind::Minus => UnaryOp::Negate,
            TokenKind::Plus => UnaryOp::Plus,
            TokenKind::Not => UnaryOp::Not,
            _ => return self.parse_primary(),
        };
        let line = self.advance().line;
        let expr = self.parse_unary()?;

        Ok(Expr::Unary(UnaryExpr {
            op,
            expr: Box::new(expr),
            line,
        }))
    }

    fn parse_primary(&mut self) -> ParseResult<Expr> {
        match self.peek().kind {
            TokenKind::Integer => {
                let value = self.parse_number_lexeme()?;
                Ok(Expr::Literal(Literal::Integer(value), self.previous().line))
            }
            TokenKind::Float => {
                let value = self.parse_number_lexeme()?;
                Ok(Expr::Literal(Literal::Float(value), self.previous().line))
            }
            TokenKind::True | TokenKind::False => {
                let token = self.advance();
                let value = token.kind == TokenKind::True;
                Ok(Expr::Literal(Literal::Bool(value), token.line))
            }
            TokenKind::String => {
                let token = self.advance();
                // Strip the quote characters kept by the lexer
                let lexeme = &token.lexeme;
                let contents = lexeme
                    .get(1..lexeme.len().saturating_sub(1))
                    .unwrap_or_default()
                    .to_string();
                Ok(Expr::Literal(Literal::String(contents), token.line))
            }
            TokenKind::LeftParen => {
                let line = self.advance().line;
                let expr = self.parse_expression()?;
                self.consume(TokenKind::RightParen, "Expected ')' after expression")?;
                Ok(Expr::Grouping(GroupExpr {
                    expr: Box::new(expr),
                    line,
                }))
            }
            TokenKind::Identifier => {
                let token = self.advance();
                let ident = Identifier::new(token.lexeme.clone(), token.line);
                if self.check(TokenKind::LeftParen) {
                    Ok(Expr::Call(self.parse_call(ident)?))
                } else {
                    Ok(Expr::Identifier(ident))
                }
            }
            _ => Err(self.error_found("Expected expression")),
        }
    }

    /// Parse the argument list of a call to `callee`
    fn parse_call(&mut self, callee: Identifier) -> ParseResult<CallExpr> {
        self.consume(TokenKind::LeftParen, "Expected '(' after function name")?;

        let mut args = Vec::new();
        if !self.check(TokenKind::RightParen) {
            loop {
                args.push(self.parse_expression()?);
                if !self.match_token(TokenKind::Comma) {
                    break;
                }
            }
        }

        self.consume(TokenKind::RightParen, "Expected ')' after arguments")?;

        let line = callee.line;
        Ok(CallExpr { callee, args, line })
    }

    fn parse_number_lexeme(&mut self) -> ParseResult<f64> {
        let token = self.advance();
        let line = token.line;
        let lexeme = token.lexeme.clone();
        lexeme
            .parse::<f64>()
            .map_err(|_| self.error(format!("Invalid number literal '{}'", lexeme)).with_line(line))
    }
}

fn binary(op: BinaryOp, left: Expr, right: Expr, line: usize) -> Expr {
    Expr::Binary(BinaryExpr {
        op,
        left: Box::new(left),
        right: Box::new(right),
        line,
    })
}

fn logical(op: LogicalOp, left: Expr, right: Expr, line: usize) -> Expr {
    Expr::Logical(LogicalExpr {
        op,
        left: Box::new(left),
        right: Box::new(right),
        line,
    })
}
