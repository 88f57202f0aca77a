//! Scripty Runtime - Core language implementation
//!
//! This library provides the complete Scripty language runtime:
//! - Lexical analysis and parsing
//! - A tree-walking interpreter over lexical environments
//! - Unified diagnostics for lexing, parse and runtime errors

/// Scripty runtime version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Public API modules
pub mod ast;
pub mod config;
pub mod diagnostic;
pub mod environment;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod runtime;
pub mod token;
pub mod value;

// Re-export commonly used types
pub use ast::{Program, VersionedProgram, AST_VERSION};
pub use config::RuntimeConfig;
pub use diagnostic::{error_codes, Diagnostic, DiagnosticKind, DIAG_VERSION};
pub use interpreter::Interpreter;
pub use lexer::Lexer;
pub use parser::Parser;
pub use runtime::{parse, tokenize, RuntimeResult, Scripty};
pub use token::{Token, TokenKind};
pub use value::{RuntimeError, Value};
