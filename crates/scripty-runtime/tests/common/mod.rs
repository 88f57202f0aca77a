//! Shared test utilities
//!
//! Common helpers for Scripty integration tests: run a program against an
//! in-memory output sink and inspect what it printed or why it failed.

use scripty_runtime::{Diagnostic, RuntimeConfig, Scripty};

// Re-export testing utilities
pub use pretty_assertions::{assert_eq, assert_ne};

/// Run source code and return everything it printed
///
/// Panics with the rendered diagnostic if the program fails.
pub fn run_ok(source: &str) -> String {
    let mut runtime = Scripty::with_output(Vec::new());
    if let Err(diag) = runtime.eval(source) {
        panic!("Expected success, got:\n{}", diag.to_human_string());
    }
    String::from_utf8(runtime.into_output()).expect("output is UTF-8")
}

/// Run source code and return the diagnostic it failed with
pub fn run_err(source: &str) -> Diagnostic {
    run_err_with_config(source, RuntimeConfig::default())
}

/// Run source code with explicit limits and return the diagnostic it failed with
pub fn run_err_with_config(source: &str, config: RuntimeConfig) -> Diagnostic {
    let mut runtime = Scripty::with_config(Vec::new(), config).with_file_name("test.scr");
    match runtime.eval(source) {
        Err(diag) => diag,
        Ok(()) => panic!("Expected an error, got success for:\n{}", source),
    }
}

/// Assert that source code prints exactly `expected`
///
/// # Example
/// ```
/// assert_output("print 1 + 2", "3");
/// ```
pub fn assert_output(source: &str, expected: &str) {
    assert_eq!(run_ok(source), expected, "output of:\n{}", source);
}

/// Assert that source code fails with a specific code on a specific line
///
/// # Example
/// ```
/// assert_error("print 1 / 0", "SC0005", 1);
/// ```
pub fn assert_error(source: &str, expected_code: &str, expected_line: usize) {
    let diag = run_err(source);
    assert_eq!(
        (diag.code.as_str(), diag.line),
        (expected_code, expected_line),
        "diagnostic for:\n{}\nwas: {}",
        source,
        diag
    );
}
