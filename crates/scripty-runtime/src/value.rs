//! Runtime value representation
//!
//! Values are immutable; strings share their buffer through `Rc<str>` so copying a
//! value between bindings never reallocates.

use std::fmt;
use std::rc::Rc;
use thiserror::Error;

/// Runtime value type
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Numeric value (integer and float literals both widen to f64)
    Number(f64),
    /// String value (reference-counted, immutable)
    String(Rc<str>),
    /// Boolean value
    Bool(bool),
}

impl Value {
    /// Create a string value
    pub fn string(s: impl AsRef<str>) -> Self {
        Value::String(Rc::from(s.as_ref()))
    }

    /// Get the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Bool(_) => "bool",
        }
    }

    /// Truthiness used by `and` / `or`
    ///
    /// Conditions of `if` and `while` do not use this; they require a `Bool`.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0,
            Value::String(s) => !s.is_empty(),
        }
    }

    /// Whether two values have the same variant
    pub fn same_kind(&self, other: &Value) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => {
                if n.is_nan() {
                    write!(f, "nan")
                } else if n.is_infinite() {
                    write!(f, "{}", if *n > 0.0 { "inf" } else { "-inf" })
                } else if *n == 0.0 {
                    // Covers negative zero
                    write!(f, "0")
                } else if n.fract() == 0.0 {
                    write!(f, "{:.0}", n)
                } else {
                    write!(f, "{}", n)
                }
            }
            Value::String(s) => write!(f, "{}", s.as_ref()),
            Value::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

/// Runtime error type with source line information
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RuntimeError {
    /// Operand or operator kind mismatch
    #[error("{msg}")]
    TypeError { msg: String, line: usize },
    /// Name not bound anywhere in the environment chain
    #[error("Undefined variable '{name}'")]
    UndefinedVariable { name: String, line: usize },
    /// Name declared with `local` but never assigned
    #[error("Variable '{name}' used before it was initialized")]
    UninitializedVariable { name: String, line: usize },
    /// Call to a function not registered in the chain
    #[error("Undefined function '{name}'")]
    UndefinedFunction { name: String, line: usize },
    /// Division or modulo by zero
    #[error("Division by zero")]
    DivideByZero { line: usize },
    /// `if` / `while` condition that is not a Bool
    #[error("Condition must be a boolean, got {found}")]
    NonBooleanCondition { found: &'static str, line: usize },
    /// Wrong number of call arguments
    #[error("Function '{name}' expects {expected} arguments but got {found}")]
    ArityMismatch {
        name: String,
        expected: usize,
        found: usize,
        line: usize,
    },
    /// Call used as a value whose function finished without `ret value`
    #[error("Function '{name}' did not return a value")]
    MissingReturnValue { name: String, line: usize },
    /// Nested calls went past the configured limit
    #[error("Maximum call depth exceeded")]
    CallDepthExceeded { limit: usize, line: usize },
    /// `for` loop with a zero step
    #[error("For loop step cannot be zero")]
    ZeroForStep { line: usize },
    /// Writing program output failed
    #[error("I/O error: {msg}")]
    Io { msg: String, line: usize },
}

impl RuntimeError {
    /// Source line the error was raised at
    pub fn line(&self) -> usize {
        match self {
            RuntimeError::TypeError { line, .. }
            | RuntimeError::UndefinedVariable { line, .. }
            | RuntimeError::UninitializedVariable { line, .. }
            | RuntimeError::UndefinedFunction { line, .. }
            | RuntimeError::DivideByZero { line }
            | RuntimeError::NonBooleanCondition { line, .. }
            | RuntimeError::ArityMismatch { line, .. }
            | RuntimeError::MissingReturnValue { line, .. }
            | RuntimeError::CallDepthExceeded { line, .. }
            | RuntimeError::ZeroForStep { line }
            | RuntimeError::Io { line, .. } => *line,
        }
    }
}
