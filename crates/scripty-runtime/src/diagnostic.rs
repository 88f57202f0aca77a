//! Diagnostic system for errors
//!
//! Lexing, parse and runtime errors all flow through the unified Diagnostic type,
//! so the CLI and embedders render them the same way.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Diagnostic schema version
pub const DIAG_VERSION: u32 = 1;

/// Pipeline stage that produced a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticKind {
    /// Malformed token (unterminated string/comment, unexpected character)
    Lexing,
    /// Grammar violation
    Parse,
    /// Error raised while executing the program
    Runtime,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::Lexing => write!(f, "lexing error"),
            DiagnosticKind::Parse => write!(f, "parse error"),
            DiagnosticKind::Runtime => write!(f, "runtime error"),
        }
    }
}

/// A fatal diagnostic message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Diagnostic schema version
    pub diag_version: u32,
    /// Stage that produced the error
    pub kind: DiagnosticKind,
    /// Error code (e.g., "SC0005")
    pub code: String,
    /// Main diagnostic message
    pub message: String,
    /// File path
    pub file: String,
    /// Line number (1-based)
    pub line: usize,
    /// Source line string
    pub snippet: String,
    /// Additional notes (optional)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub notes: Vec<String>,
    /// Suggested fix (optional)
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub help: Option<String>,
}

impl Diagnostic {
    /// Create a new diagnostic of the given kind
    pub fn new(
        kind: DiagnosticKind,
        code: impl Into<String>,
        message: impl Into<String>,
        line: usize,
    ) -> Self {
        Self {
            diag_version: DIAG_VERSION,
            kind,
            code: code.into(),
            message: message.into(),
            file: "<unknown>".to_string(),
            line,
            snippet: String::new(),
            notes: Vec::new(),
            help: None,
        }
    }

    /// Create a lexing diagnostic
    pub fn lexing(code: impl Into<String>, message: impl Into<String>, line: usize) -> Self {
        Self::new(DiagnosticKind::Lexing, code, message, line)
    }

    /// Create a parse diagnostic
    pub fn parse(code: impl Into<String>, message: impl Into<String>, line: usize) -> Self {
        Self::new(DiagnosticKind::Parse, code, message, line)
    }

    /// Create a runtime diagnostic
    pub fn runtime(code: impl Into<String>, message: impl Into<String>, line: usize) -> Self {
        Self::new(DiagnosticKind::Runtime, code, message, line)
    }

    /// Set the file path
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = file.into();
        self
    }

    /// Set the line number
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = line;
        self
    }

    /// Set the snippet (source line)
    pub fn with_snippet(mut self, snippet: impl Into<String>) -> Self {
        self.snippet = snippet.into();
        self
    }

    /// Fill the snippet from the full source text, using the diagnostic's line
    pub fn with_source(self, source: &str) -> Self {
        let snippet = line_snippet(source, self.line);
        self.with_snippet(snippet)
    }

    /// Add a note
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Add a help message
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Format as human-readable string
    pub fn to_human_string(&self) -> String {
        let mut output = String::new();

        // Header: runtime error[SC0005]: Division by zero
        output.push_str(&format!("{}[{}]: {}\n", self.kind, self.code, self.message));

        // Gutter fits the line number, at least two columns wide
        let width = self.line.to_string().len().max(2);
        let pad = " ".repeat(width);

        // Location: --> path/to/file.scr:12
        output.push_str(&format!("{}--> {}:{}\n", pad, self.file, self.line));

        if !self.snippet.is_empty() {
            output.push_str(&format!("{} |\n", pad));
            output.push_str(&format!("{:>width$} | {}\n", self.line, self.snippet, width = width));
            output.push_str(&format!("{} |\n", pad));
        }

        for note in &self.notes {
            output.push_str(&format!("{} = note: {}\n", pad, note));
        }

        if let Some(help) = &self.help {
            output.push_str(&format!("{} = help: {}\n", pad, help));
        }

        output
    }

    /// Format as JSON string
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at line {}: {}", self.kind, self.line, self.message)
    }
}

impl std::error::Error for Diagnostic {}

/// Get the source line for a given 1-based line number
pub fn line_snippet(source: &str, line: usize) -> String {
    source
        .lines()
        .nth(line.saturating_sub(1))
        .unwrap_or("")
        .trim_end()
        .to_string()
}

/// Error code registry
pub mod error_codes {
    // SC0xxx - Runtime errors
    pub const TYPE_MISMATCH: &str = "SC0001";
    pub const UNDEFINED_VARIABLE: &str = "SC0002";
    pub const UNINITIALIZED_VARIABLE: &str = "SC0003";
    pub const UNDEFINED_FUNCTION: &str = "SC0004";
    pub const DIVIDE_BY_ZERO: &str = "SC0005";
    pub const NON_BOOLEAN_CONDITION: &str = "SC0006";
    pub const ARITY_MISMATCH: &str = "SC0007";
    pub const MISSING_RETURN_VALUE: &str = "SC0008";
    pub const CALL_DEPTH_EXCEEDED: &str = "SC0009";
    pub const ZERO_FOR_STEP: &str = "SC0010";
    pub const IO_ERROR: &str = "SC0011";

    // SC1xxx - Lexing errors
    pub const UNEXPECTED_CHARACTER: &str = "SC1001";
    pub const UNTERMINATED_STRING: &str = "SC1002";
    pub const UNTERMINATED_COMMENT: &str = "SC1004";

    // SC2xxx - Parse errors
    pub const SYNTAX_ERROR: &str = "SC2000";
    pub const TOO_MANY_PARAMETERS: &str = "SC2001";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_creation() {
        let diag = Diagnostic::runtime(error_codes::DIVIDE_BY_ZERO, "Division by zero", 4);
        assert_eq!(diag.kind, DiagnosticKind::Runtime);
        assert_eq!(diag.code, "SC0005");
        assert_eq!(diag.line, 4);
        assert_eq!(diag.diag_version, DIAG_VERSION);
    }

    #[test]
    fn test_builder_pattern() {
        let diag = Diagnostic::parse(error_codes::SYNTAX_ERROR, "Expected 'then'", 1)
            .with_file("test.scr")
            .with_line(2)
            .with_snippet("if x > 1 print x end")
            .with_note("found 'print'")
            .with_help("add 'then' after the condition");

        assert_eq!(diag.file, "test.scr");
        assert_eq!(diag.line, 2);
        assert_eq!(diag.snippet, "if x > 1 print x end");
        assert_eq!(diag.notes.len(), 1);
        assert!(diag.help.is_some());
    }

    #[test]
    fn test_with_source_picks_line() {
        let source = "x := 1\ny := x / 0\nprint y\n";
        let diag = Diagnostic::runtime(error_codes::DIVIDE_BY_ZERO, "Division by zero", 2)
            .with_source(source);
        assert_eq!(diag.snippet, "y := x / 0");
    }

    #[test]
    fn test_with_source_out_of_range_line() {
        let diag = Diagnostic::lexing(error_codes::UNTERMINATED_STRING, "boom", 99)
            .with_source("one line");
        assert_eq!(diag.snippet, "");
    }

    #[test]
    fn test_human_format() {
        let diag = Diagnostic::runtime(error_codes::DIVIDE_BY_ZERO, "Division by zero", 3)
            .with_file("prog.scr")
            .with_snippet("print 1 / 0");

        let output = diag.to_human_string();
        assert!(output.starts_with("runtime error[SC0005]: Division by zero\n"));
        assert!(output.contains("--> prog.scr:3"));
        assert!(output.contains(" 3 | print 1 / 0"));
    }

    #[test]
    fn test_human_format_wide_line_numbers() {
        let diag = Diagnostic::runtime(error_codes::DIVIDE_BY_ZERO, "Division by zero", 1234)
            .with_file("long.scr")
            .with_snippet("x := 1 / 0")
            .with_help("check the divisor");

        let expected = [
            "runtime error[SC0005]: Division by zero",
            "    --> long.scr:1234",
            "     |",
            "1234 | x := 1 / 0",
            "     |",
            "     = help: check the divisor",
            "",
        ]
        .join("\n");
        assert_eq!(diag.to_human_string(), expected);
    }

    #[test]
    fn test_display_format() {
        let diag = Diagnostic::lexing(error_codes::UNEXPECTED_CHARACTER, "Unexpected character '@'", 7);
        assert_eq!(
            diag.to_string(),
            "lexing error at line 7: Unexpected character '@'"
        );
    }

    #[test]
    fn test_json_format() {
        let diag = Diagnostic::parse(error_codes::SYNTAX_ERROR, "Expected ')'", 1)
            .with_file("test.scr");

        let json = diag.to_json_string().unwrap();
        assert!(json.contains("\"diag_version\": 1"));
        assert!(json.contains("\"kind\": \"parse\""));
        assert!(json.contains("\"code\": \"SC2000\""));
        assert!(!json.contains("\"help\""));
    }

    #[test]
    fn test_json_round_trip() {
        let diag = Diagnostic::runtime(error_codes::ARITY_MISMATCH, "bad call", 5)
            .with_file("a.scr")
            .with_help("check the call");

        let json = diag.to_json_string().unwrap();
        let back: Diagnostic = serde_json::from_str(&json).unwrap();
        assert_eq!(back, diag);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(DiagnosticKind::Lexing.to_string(), "lexing error");
        assert_eq!(DiagnosticKind::Parse.to_string(), "parse error");
        assert_eq!(DiagnosticKind::Runtime.to_string(), "runtime error");
    }
}
