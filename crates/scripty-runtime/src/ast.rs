//! Abstract Syntax Tree (AST) definitions
//!
//! Every node records the source line it started on.

use serde::{Deserialize, Serialize};
use std::rc::Rc;

/// AST schema version
///
/// This version number is included in JSON dumps to ensure compatibility.
/// Increment when making breaking changes to the AST structure.
pub const AST_VERSION: u32 = 1;

/// Ordered statement sequence (program body or block)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stmts {
    pub statements: Vec<Stmt>,
    /// Line of the first token of the sequence
    pub line: usize,
}

impl Stmts {
    pub fn new(statements: Vec<Stmt>, line: usize) -> Self {
        Self { statements, line }
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }
}

/// Root of a parsed source file
pub type Program = Stmts;

/// Versioned AST wrapper for JSON serialization
///
/// Used when dumping the AST to JSON for tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionedProgram {
    /// AST schema version
    pub ast_version: u32,
    /// The actual program AST
    #[serde(flatten)]
    pub program: Program,
}

impl VersionedProgram {
    /// Create a new versioned program wrapper
    pub fn new(program: Program) -> Self {
        Self {
            ast_version: AST_VERSION,
            program,
        }
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl From<Program> for VersionedProgram {
    fn from(program: Program) -> Self {
        Self::new(program)
    }
}

/// Statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Stmt {
    Print(PrintStmt),
    If(IfStmt),
    While(WhileStmt),
    For(ForStmt),
    Assign(Assign),
    Local(LocalDecl),
    FuncDecl(Rc<FuncDecl>),
    Call(CallExpr),
    Ret(ReturnStmt),
}

/// `print expr` / `println expr`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrintStmt {
    pub value: Expr,
    /// `println` appends a newline
    pub newline: bool,
    pub line: usize,
}

/// `if test then ... [else ...] end`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IfStmt {
    pub test: Expr,
    pub then_stmts: Stmts,
    pub else_stmts: Option<Stmts>,
    pub line: usize,
}

/// `while test do ... end`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhileStmt {
    pub test: Expr,
    pub body: Stmts,
    pub line: usize,
}

/// `for ident := start, end [, step] do ... end`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForStmt {
    pub var: Identifier,
    pub start: Expr,
    pub end: Expr,
    pub step: Option<Expr>,
    pub body: Stmts,
    pub line: usize,
}

/// `name := value`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assign {
    pub name: Identifier,
    pub value: Expr,
    pub line: usize,
}

/// `local name [:= value]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalDecl {
    pub name: Identifier,
    pub value: Option<Expr>,
    pub line: usize,
}

/// Function declaration
///
/// Shared by reference between the AST and the function tables that capture it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuncDecl {
    pub name: Identifier,
    pub params: Vec<Identifier>,
    pub body: Stmts,
    pub line: usize,
}

/// `ret [value]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnStmt {
    pub value: Option<Expr>,
    pub line: usize,
}

/// Expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    Literal(Literal, usize),
    Identifier(Identifier),
    Grouping(GroupExpr),
    Unary(UnaryExpr),
    Binary(BinaryExpr),
    Logical(LogicalExpr),
    Call(CallExpr),
}

/// Literal value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    /// Integer literal, widened to f64 at parse time
    Integer(f64),
    Float(f64),
    Bool(bool),
    /// String contents without the surrounding quotes
    String(String),
}

/// Identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identifier {
    pub name: String,
    pub line: usize,
}

impl Identifier {
    pub fn new(name: impl Into<String>, line: usize) -> Self {
        Self {
            name: name.into(),
            line,
        }
    }
}

/// Parenthesized expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupExpr {
    pub expr: Box<Expr>,
    pub line: usize,
}

/// Unary expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnaryExpr {
    pub op: UnaryOp,
    pub expr: Box<Expr>,
    pub line: usize,
}

/// Binary expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryExpr {
    pub op: BinaryOp,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
    pub line: usize,
}

/// Short-circuiting `and` / `or`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogicalExpr {
    pub op: LogicalOp,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
    pub line: usize,
}

/// Function call (as expression or statement)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallExpr {
    pub callee: Identifier,
    pub args: Vec<Expr>,
    pub line: usize,
}

/// Unary operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOp {
    Negate, // -
    Plus,   // +
    Not,    // ~
}

/// Binary operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    // Comparison
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl BinaryOp {
    /// Source spelling of the operator
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Pow => "^",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "~=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
        }
    }
}

/// Logical operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogicalOp {
    And,
    Or,
}

// Helper methods for getting lines from AST nodes

impl Expr {
    /// Get the source line of this expression
    pub fn line(&self) -> usize {
        match self {
            Expr::Literal(_, line) => *line,
            Expr::Identifier(id) => id.line,
            Expr::Grouping(g) => g.line,
            Expr::Unary(u) => u.line,
            Expr::Binary(b) => b.line,
            Expr::Logical(l) => l.line,
            Expr::Call(c) => c.line,
        }
    }
}

impl Stmt {
    /// Get the source line of this statement
    pub fn line(&self) -> usize {
        match self {
            Stmt::Print(p) => p.line,
            Stmt::If(i) => i.line,
            Stmt::While(w) => w.line,
            Stmt::For(f) => f.line,
            Stmt::Assign(a) => a.line,
            Stmt::Local(l) => l.line,
            Stmt::FuncDecl(f) => f.line,
            Stmt::Call(c) => c.line,
            Stmt::Ret(r) => r.line,
        }
    }
}
