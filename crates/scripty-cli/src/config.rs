//! CLI configuration from command-line arguments
//!
//! Scripty takes all of its settings from flags; nothing is read from the
//! environment or from config files.

use clap::{ArgAction, Parser};
use scripty_runtime::config::DEFAULT_MAX_CALL_DEPTH;
use scripty_runtime::RuntimeConfig;
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;

/// What to do with the source file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Execute the program
    Run,
    /// Print the token stream
    DumpTokens,
    /// Print the AST as JSON
    DumpAst,
}

/// Scripty interpreter.
///
/// Runs a Scripty source file, or dumps its tokens or syntax tree.
///
/// EXAMPLES:
///     scripty main.scr                  Run a program
///     scripty main.scr --json           Report errors as JSON
///     scripty main.scr --dump-ast       Print the syntax tree
///     scripty main.scr -vv              Run with debug logging
#[derive(Debug, Parser)]
#[command(name = "scripty")]
#[command(version)]
pub struct CliConfig {
    /// Path to the Scripty source file
    pub file: PathBuf,

    /// Emit diagnostics as JSON on stderr
    #[arg(long)]
    pub json: bool,

    /// Print the token stream and exit
    #[arg(long, conflicts_with = "dump_ast")]
    pub dump_tokens: bool,

    /// Print the versioned AST as JSON and exit
    #[arg(long)]
    pub dump_ast: bool,

    /// Maximum number of nested function calls
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_CALL_DEPTH)]
    pub max_call_depth: usize,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(long, short = 'q', conflicts_with = "verbose")]
    pub quiet: bool,
}

impl CliConfig {
    /// Selected mode of operation
    pub fn mode(&self) -> Mode {
        if self.dump_tokens {
            Mode::DumpTokens
        } else if self.dump_ast {
            Mode::DumpAst
        } else {
            Mode::Run
        }
    }

    /// Log level from `-q` / `-v`
    ///
    /// Warnings are shown by default.
    pub fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::ERROR;
        }
        match self.verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }

    /// Limits for the interpreter
    pub fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig::default().with_max_call_depth(self.max_call_depth)
    }

    /// Name reported in diagnostics
    pub fn file_name(&self) -> String {
        self.file.display().to_string()
    }
}
