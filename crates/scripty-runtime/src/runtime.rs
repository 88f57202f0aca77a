//! Scripty runtime API for embedding

use std::io::{self, Write};
use std::path::Path;

use crate::ast::Program;
use crate::config::RuntimeConfig;
use crate::diagnostic::{error_codes, Diagnostic};
use crate::interpreter::Interpreter;
use crate::lexer::Lexer;
use crate::parser::Parser;
use crate::token::Token;
use crate::value::{RuntimeError, Value};

/// Result type for runtime operations
pub type RuntimeResult<T> = Result<T, Diagnostic>;

/// File name used in diagnostics when none is given
const DEFAULT_FILE_NAME: &str = "<input>";

/// Tokenize source code
pub fn tokenize(source: &str) -> RuntimeResult<Vec<Token>> {
    Lexer::new(source).tokenize()
}

/// Tokenize and parse source code
///
/// Parse diagnostics carry the offending source line as their snippet.
pub fn parse(source: &str) -> RuntimeResult<Program> {
    let tokens = tokenize(source)?;
    Parser::new(tokens)
        .parse()
        .map_err(|diag| diag.with_source(source))
}

/// Scripty runtime instance
///
/// Provides a high-level API for embedding Scripty in host applications.
/// Globals and functions persist across [`Scripty::eval`] calls.
///
/// # Examples
///
/// ```
/// use scripty_runtime::Scripty;
///
/// let mut runtime = Scripty::with_output(Vec::new());
/// runtime.eval("println 1 + 2").unwrap();
/// assert_eq!(runtime.into_output(), b"3\n");
/// ```
pub struct Scripty<W: Write = io::Stdout> {
    interpreter: Interpreter<W>,
    file: String,
}

impl Scripty<io::Stdout> {
    /// Create a runtime printing to stdout
    pub fn new() -> Self {
        Self::with_output(io::stdout())
    }
}

impl Default for Scripty<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> Scripty<W> {
    /// Create a runtime printing to `out`
    pub fn with_output(out: W) -> Self {
        Self::with_config(out, RuntimeConfig::default())
    }

    /// Create a runtime printing to `out` with explicit limits
    pub fn with_config(out: W, config: RuntimeConfig) -> Self {
        Self {
            interpreter: Interpreter::with_config(out, config),
            file: DEFAULT_FILE_NAME.to_string(),
        }
    }

    /// Set the file name reported in diagnostics
    pub fn with_file_name(mut self, file: impl Into<String>) -> Self {
        self.file = file.into();
        self
    }

    /// Evaluate Scripty source code
    ///
    /// # Examples
    ///
    /// ```
    /// use scripty_runtime::{Scripty, Value};
    ///
    /// let mut runtime = Scripty::with_output(Vec::new());
    /// runtime.eval("x := 20").unwrap();
    /// runtime.eval("x := x * 2 + 2").unwrap();
    /// assert_eq!(runtime.get_global("x"), Some(Value::Number(42.0)));
    /// ```
    pub fn eval(&mut self, source: &str) -> RuntimeResult<()> {
        let program = parse(source).map_err(|diag| diag.with_file(&self.file))?;

        self.interpreter
            .run(&program)
            .map_err(|error| runtime_error_to_diagnostic(error, source).with_file(&self.file))
    }

    /// Evaluate a Scripty source file
    ///
    /// Diagnostics name the file that was read.
    pub fn eval_file(&mut self, path: impl AsRef<Path>) -> RuntimeResult<()> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| {
            Diagnostic::runtime(
                error_codes::IO_ERROR,
                format!("Failed to read source file: {}", e),
                0,
            )
            .with_file(path.display().to_string())
        })?;

        self.file = path.display().to_string();
        self.eval(&source)
    }

    /// Current value of a global variable
    pub fn get_global(&self, name: &str) -> Option<Value> {
        self.interpreter.get_global(name)
    }

    /// Consume the runtime and return the output sink
    pub fn into_output(self) -> W {
        self.interpreter.into_output()
    }
}

/// Convert a RuntimeError to a Diagnostic
pub fn runtime_error_to_diagnostic(error: RuntimeError, source: &str) -> Diagnostic {
    let code = match &error {
        RuntimeError::TypeError { .. } => error_codes::TYPE_MISMATCH,
        RuntimeError::UndefinedVariable { .. } => error_codes::UNDEFINED_VARIABLE,
        RuntimeError::UninitializedVariable { .. } => error_codes::UNINITIALIZED_VARIABLE,
        RuntimeError::UndefinedFunction { .. } => error_codes::UNDEFINED_FUNCTION,
        RuntimeError::DivideByZero { .. } => error_codes::DIVIDE_BY_ZERO,
        RuntimeError::NonBooleanCondition { .. } => error_codes::NON_BOOLEAN_CONDITION,
        RuntimeError::ArityMismatch { .. } => error_codes::ARITY_MISMATCH,
        RuntimeError::MissingReturnValue { .. } => error_codes::MISSING_RETURN_VALUE,
        RuntimeError::CallDepthExceeded { .. } => error_codes::CALL_DEPTH_EXCEEDED,
        RuntimeError::ZeroForStep { .. } => error_codes::ZERO_FOR_STEP,
        RuntimeError::Io { .. } => error_codes::IO_ERROR,
    };

    let diag = Diagnostic::runtime(code, error.to_string(), error.line()).with_source(source);

    match &error {
        RuntimeError::UndefinedVariable { name, .. } => {
            diag.with_help(format!("assign it first with '{} := ...'", name))
        }
        RuntimeError::UninitializedVariable { name, .. } => {
            diag.with_help(format!("'local {}' declares it without a value", name))
        }
        RuntimeError::NonBooleanCondition { .. } => {
            diag.with_help("compare explicitly, e.g. 'x ~= 0'")
        }
        RuntimeError::MissingReturnValue { .. } => {
            diag.with_help("end every path with 'ret <value>'")
        }
        RuntimeError::CallDepthExceeded { limit, .. } => {
            diag.with_note(format!("the limit is {} nested calls", limit))
        }
        _ => diag,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::DiagnosticKind;

    #[test]
    fn test_eval_prints_to_sink() {
        let mut runtime = Scripty::with_output(Vec::new());
        runtime.eval("println 'hello'").unwrap();
        assert_eq!(runtime.into_output(), b"hello\n");
    }

    #[test]
    fn test_functions_persist_across_evals() {
        let mut runtime = Scripty::with_output(Vec::new());
        runtime.eval("func sq(n) ret n * n end").unwrap();
        runtime.eval("print sq(7)").unwrap();
        assert_eq!(runtime.into_output(), b"49");
    }

    #[test]
    fn test_lexing_diagnostic() {
        let mut runtime = Scripty::with_output(Vec::new()).with_file_name("lex.scr");
        let diag = runtime.eval("x := 'open").unwrap_err();
        assert_eq!(diag.kind, DiagnosticKind::Lexing);
        assert_eq!(diag.file, "lex.scr");
        assert_eq!(diag.snippet, "x := 'open");
    }

    #[test]
    fn test_parse_diagnostic_has_snippet() {
        let mut runtime = Scripty::with_output(Vec::new());
        let diag = runtime.eval("x := 1\nif x then print x").unwrap_err();
        assert_eq!(diag.kind, DiagnosticKind::Parse);
        assert_eq!(diag.line, 2);
        assert_eq!(diag.snippet, "if x then print x");
        assert_eq!(diag.file, "<input>");
    }

    #[test]
    fn test_runtime_diagnostic() {
        let mut runtime = Scripty::with_output(Vec::new()).with_file_name("prog.scr");
        let diag = runtime.eval("x := 1\nprint x / 0").unwrap_err();
        assert_eq!(diag.kind, DiagnosticKind::Runtime);
        assert_eq!(diag.code, error_codes::DIVIDE_BY_ZERO);
        assert_eq!(diag.message, "Division by zero");
        assert_eq!(diag.line, 2);
        assert_eq!(diag.snippet, "print x / 0");
    }

    #[test]
    fn test_error_codes_by_variant() {
        let cases = [
            ("print 'a' - 1", error_codes::TYPE_MISMATCH),
            ("print nope", error_codes::UNDEFINED_VARIABLE),
            ("local u print u", error_codes::UNINITIALIZED_VARIABLE),
            ("nope()", error_codes::UNDEFINED_FUNCTION),
            ("while 1 do end", error_codes::NON_BOOLEAN_CONDITION),
            ("func f(a) end f()", error_codes::ARITY_MISMATCH),
            ("func f() end print f()", error_codes::MISSING_RETURN_VALUE),
            ("for i := 1, 2, 0 do end", error_codes::ZERO_FOR_STEP),
        ];
        for (source, code) in cases {
            let mut runtime = Scripty::with_output(Vec::new());
            let diag = runtime.eval(source).unwrap_err();
            assert_eq!(diag.code, code, "source: {}", source);
        }
    }

    #[test]
    fn test_call_depth_diagnostic() {
        let config = RuntimeConfig::default().with_max_call_depth(10);
        let mut runtime = Scripty::with_config(Vec::new(), config);
        let diag = runtime.eval("func f() ret f() end\nprint f()").unwrap_err();
        assert_eq!(diag.code, error_codes::CALL_DEPTH_EXCEEDED);
        assert_eq!(diag.notes, vec!["the limit is 10 nested calls".to_string()]);
    }

    #[test]
    fn test_runtime_recovers_after_error() {
        let mut runtime = Scripty::with_output(Vec::new());
        assert!(runtime.eval("x := 1 print 1 / 0").is_err());
        runtime.eval("print x").unwrap();
        assert_eq!(runtime.into_output(), b"1");
    }

    #[test]
    fn test_eval_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("main.scr");
        std::fs::write(&path, "println 'from file'\nprint 1 / 0\n").unwrap();

        let mut runtime = Scripty::with_output(Vec::new());
        let diag = runtime.eval_file(&path).unwrap_err();
        assert_eq!(diag.file, path.display().to_string());
        assert_eq!(diag.line, 2);
        assert_eq!(runtime.into_output(), b"from file\n");
    }

    #[test]
    fn test_eval_missing_file() {
        let mut runtime = Scripty::with_output(Vec::new());
        let diag = runtime.eval_file("/definitely/not/here.scr").unwrap_err();
        assert_eq!(diag.code, error_codes::IO_ERROR);
        assert!(diag.message.starts_with("Failed to read source file"));
    }
}
