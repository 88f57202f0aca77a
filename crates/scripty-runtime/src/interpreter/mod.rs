//! AST interpreter (tree-walking)
//!
//! Direct AST evaluation against an arena of lexical environments.
//! Supports:
//! - Expression evaluation (literals, arithmetic, comparison, short-circuit logic, calls)
//! - Statement execution (assignment, `local`, print, control flow)
//! - User-defined functions with lexical scoping and a call depth limit

mod expr;
mod stmt;

use std::io::Write;

use crate::ast::Program;
use crate::config::RuntimeConfig;
use crate::environment::{Binding, EnvId, Environments};
use crate::value::{RuntimeError, Value};

/// Outcome of executing a statement
#[derive(Debug, Clone, PartialEq)]
pub(super) enum Flow {
    Normal,
    /// `ret` was executed, with its value if any
    Return(Option<Value>),
}

/// Interpreter state
///
/// Printed output goes to `W`; globals persist across [`Interpreter::run`] calls.
pub struct Interpreter<W: Write> {
    pub(super) envs: Environments,
    pub(super) out: W,
    pub(super) config: RuntimeConfig,
    /// Number of user function calls currently active
    pub(super) call_depth: usize,
}

impl<W: Write> Interpreter<W> {
    /// Create a new interpreter writing to `out`
    pub fn new(out: W) -> Self {
        Self::with_config(out, RuntimeConfig::default())
    }

    /// Create a new interpreter with explicit limits
    pub fn with_config(out: W, config: RuntimeConfig) -> Self {
        Self {
            envs: Environments::new(),
            out,
            config,
            call_depth: 0,
        }
    }

    /// Execute a program in the global environment
    ///
    /// A top-level `ret` stops the program without error.
    pub fn run(&mut self, program: &Program) -> Result<(), RuntimeError> {
        let result = self.exec_stmts(program, EnvId::GLOBAL);

        if result.is_err() {
            self.envs.reset_to_global();
            self.call_depth = 0;
        }

        // Output written before a failure is still delivered
        let flushed = self.out.flush().map_err(|e| RuntimeError::Io {
            msg: e.to_string(),
            line: program.line,
        });

        let flow = result?;
        flushed?;

        tracing::debug!(returned = matches!(flow, Flow::Return(_)), "program finished");
        Ok(())
    }

    /// Current value of a global variable
    pub fn get_global(&self, name: &str) -> Option<Value> {
        match self.envs.get(EnvId::GLOBAL, name) {
            Some(Binding::Value(value)) => Some(value.clone()),
            _ => None,
        }
    }

    /// Access the output sink
    pub fn output(&self) -> &W {
        &self.out
    }

    /// Consume the interpreter and return the output sink
    pub fn into_output(self) -> W {
        self.out
    }
}
