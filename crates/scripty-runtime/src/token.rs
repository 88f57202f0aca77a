//! Token types for lexical analysis
//!
//! Defines all token types recognized by the Scripty lexer.

use serde::{Deserialize, Serialize};

/// Token type produced by the lexer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The kind of token
    pub kind: TokenKind,
    /// The exact source text of this token (string literals keep their quotes)
    pub lexeme: String,
    /// Source line (1-based)
    pub line: usize,
}

impl Token {
    /// Create a new token
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            line,
        }
    }
}

/// Classification of token types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    // Literals
    /// Integer literal (42)
    Integer,
    /// Float literal (3.14)
    Float,
    /// String literal ('hi' or "hi")
    String,
    /// Identifier
    Identifier,

    // Keywords
    /// `if` keyword
    If,
    /// `then` keyword
    Then,
    /// `else` keyword
    Else,
    /// `end` keyword
    End,
    /// `while` keyword
    While,
    /// `do` keyword
    Do,
    /// `for` keyword
    For,
    /// `func` keyword
    Func,
    /// `ret` keyword
    Ret,
    /// `local` keyword
    Local,
    /// `print` keyword
    Print,
    /// `println` keyword
    Println,
    /// `and` keyword
    And,
    /// `or` keyword
    Or,
    /// `true` keyword
    True,
    /// `false` keyword
    False,

    // Operators
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `^` (exponent)
    Caret,
    /// `%` (modulo)
    Percent,
    /// `?`
    Question,
    /// `:=` or `:` (assignment)
    Assign,
    /// `::`
    Colon,
    /// `=` (not an assignment; reserved)
    Equal,
    /// `==`
    EqEq,
    /// `~` (logical not)
    Not,
    /// `~=`
    Ne,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,

    // Punctuation
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `{`
    LeftBrace,
    /// `}`
    RightBrace,
    /// `[`
    LeftBracket,
    /// `]`
    RightBracket,
    /// `.`
    Dot,
    /// `,`
    Comma,
    /// `;`
    Semicolon,

    // Special
    /// End of input
    Eof,
}

impl TokenKind {
    /// Check if a string is a keyword and return its token kind
    pub fn is_keyword(s: &str) -> Option<TokenKind> {
        match s {
            "if" => Some(TokenKind::If),
            "then" => Some(TokenKind::Then),
            "else" => Some(TokenKind::Else),
            "end" => Some(TokenKind::End),
            "while" => Some(TokenKind::While),
            "do" => Some(TokenKind::Do),
            "for" => Some(TokenKind::For),
            "func" => Some(TokenKind::Func),
            "ret" => Some(TokenKind::Ret),
            "local" => Some(TokenKind::Local),
            "print" => Some(TokenKind::Print),
            "println" => Some(TokenKind::Println),
            "and" => Some(TokenKind::And),
            "or" => Some(TokenKind::Or),
            "true" => Some(TokenKind::True),
            "false" => Some(TokenKind::False),
            _ => None,
        }
    }

    /// Whether a token of this kind can begin an expression
    pub fn starts_expression(&self) -> bool {
        matches!(
            self,
            TokenKind::Integer
                | TokenKind::Float
                | TokenKind::String
                | TokenKind::Identifier
                | TokenKind::True
                | TokenKind::False
                | TokenKind::LeftParen
                | TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::Not
        )
    }

    /// Get the string representation of this token kind
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Integer => "integer",
            TokenKind::Float => "float",
            TokenKind::String => "string",
            TokenKind::Identifier => "identifier",
            TokenKind::If => "if",
            TokenKind::Then => "then",
            TokenKind::Else => "else",
            TokenKind::End => "end",
            TokenKind::While => "while",
            TokenKind::Do => "do",
            TokenKind::For => "for",
            TokenKind::Func => "func",
            TokenKind::Ret => "ret",
            TokenKind::Local => "local",
            TokenKind::Print => "print",
            TokenKind::Println => "println",
            TokenKind::And => "and",
            TokenKind::Or => "or",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Caret => "^",
            TokenKind::Percent => "%",
            TokenKind::Question => "?",
            TokenKind::Assign => ":=",
            TokenKind::Colon => "::",
            TokenKind::Equal => "=",
            TokenKind::EqEq => "==",
            TokenKind::Not => "~",
            TokenKind::Ne => "~=",
            TokenKind::Lt => "<",
            TokenKind::Le => "<=",
            TokenKind::Gt => ">",
            TokenKind::Ge => ">=",
            TokenKind::LeftParen => "(",
            TokenKind::RightParen => ")",
            TokenKind::LeftBrace => "{",
            TokenKind::RightBrace => "}",
            TokenKind::LeftBracket => "[",
            TokenKind::RightBracket => "]",
            TokenKind::Dot => ".",
            TokenKind::Comma => ",",
            TokenKind::Semicolon => ";",
            TokenKind::Eof => "EOF",
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
