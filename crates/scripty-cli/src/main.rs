use anyhow::{anyhow, Context, Result};
use clap::Parser;
use scripty_runtime::{tokenize, Diagnostic, Scripty, TokenKind, VersionedProgram};
use std::fs;
use std::io::{self, BufWriter, Write};
use std::process::ExitCode;
use std::thread;

mod config;

use config::{CliConfig, Mode};

/// Stack reserved per permitted nested call
const STACK_PER_CALL: usize = 64 * 1024;

/// Bounds on the interpreter thread's stack
const MIN_STACK_SIZE: usize = 8 * 1024 * 1024;
const MAX_STACK_SIZE: usize = 1024 * 1024 * 1024;

fn main() -> ExitCode {
    let config = CliConfig::parse();
    init_logging(&config);

    match run(config) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

/// Install the stderr log subscriber
fn init_logging(config: &CliConfig) {
    tracing_subscriber::fmt()
        .with_max_level(config.log_level())
        .with_writer(io::stderr)
        .with_ansi(false)
        .with_target(false)
        .init();
}

fn run(config: CliConfig) -> Result<ExitCode> {
    let source = fs::read_to_string(&config.file)
        .with_context(|| format!("Failed to read source file: {}", config.file.display()))?;
    tracing::info!(file = %config.file.display(), bytes = source.len(), "read source");

    match config.mode() {
        Mode::DumpTokens => dump_tokens(&config, &source),
        Mode::DumpAst => dump_ast(&config, &source),
        Mode::Run => run_on_large_stack(config, source),
    }
}

/// Print one `line kind lexeme` row per token
fn dump_tokens(config: &CliConfig, source: &str) -> Result<ExitCode> {
    let tokens = match tokenize(source) {
        Ok(tokens) => tokens,
        Err(diag) => return report(config, diag.with_file(config.file_name())),
    };

    let mut out = BufWriter::new(io::stdout().lock());
    for token in &tokens {
        match token.kind {
            TokenKind::Eof => writeln!(out, "{} {:?}", token.line, token.kind)?,
            _ => writeln!(out, "{} {:?} {}", token.line, token.kind, token.lexeme)?,
        }
    }
    out.flush()?;

    Ok(ExitCode::SUCCESS)
}

/// Print the versioned AST as pretty JSON
fn dump_ast(config: &CliConfig, source: &str) -> Result<ExitCode> {
    let program = match scripty_runtime::parse(source) {
        Ok(program) => program,
        Err(diag) => return report(config, diag.with_file(config.file_name())),
    };

    let json = VersionedProgram::new(program)
        .to_json()
        .context("Failed to serialize AST")?;
    println!("{}", json);

    Ok(ExitCode::SUCCESS)
}

/// Execute the program on a thread whose stack fits the call-depth limit
fn run_on_large_stack(config: CliConfig, source: String) -> Result<ExitCode> {
    let stack_size = config
        .max_call_depth
        .saturating_mul(STACK_PER_CALL)
        .clamp(MIN_STACK_SIZE, MAX_STACK_SIZE);
    tracing::debug!(stack_size, "spawning interpreter thread");

    let handle = thread::Builder::new()
        .name("scripty-main".to_string())
        .stack_size(stack_size)
        .spawn(move || execute(&config, &source))
        .context("Failed to start interpreter thread")?;

    handle
        .join()
        .map_err(|_| anyhow!("interpreter thread panicked"))?
}

fn execute(config: &CliConfig, source: &str) -> Result<ExitCode> {
    let out = BufWriter::new(io::stdout().lock());
    let mut runtime =
        Scripty::with_config(out, config.runtime_config()).with_file_name(config.file_name());

    match runtime.eval(source) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(diag) => report(config, diag),
    }
}

/// Render a diagnostic to stderr and fail the process
fn report(config: &CliConfig, diag: Diagnostic) -> Result<ExitCode> {
    if config.json {
        eprintln!("{}", diag.to_json_string()?);
    } else {
        eprint!("{}", diag.to_human_string());
    }
    Ok(ExitCode::FAILURE)
}
