//! Statement execution

use std::io::Write;
use std::rc::Rc;

use crate::ast::*;
use crate::environment::{Binding, EnvId};
use crate::interpreter::{Flow, Interpreter};
use crate::value::{RuntimeError, Value};

impl<W: Write> Interpreter<W> {
    /// Execute a statement sequence directly in `env`
    pub(super) fn exec_stmts(&mut self, stmts: &Stmts, env: EnvId) -> Result<Flow, RuntimeError> {
        for stmt in &stmts.statements {
            if let Flow::Return(value) = self.exec_stmt(stmt, env)? {
                return Ok(Flow::Return(value));
            }
        }
        Ok(Flow::Normal)
    }

    /// Execute a statement sequence in a fresh child of `parent`
    fn exec_block(&mut self, stmts: &Stmts, parent: EnvId) -> Result<Flow, RuntimeError> {
        let env = self.envs.push(parent);
        let result = self.exec_stmts(stmts, env);
        self.envs.pop(env);
        result
    }

    fn exec_stmt(&mut self, stmt: &Stmt, env: EnvId) -> Result<Flow, RuntimeError> {
        match stmt {
            Stmt::Print(print) => {
                let value = self.eval_expr(&print.value, env)?;
                self.write_value(&value, print.newline, print.line)?;
                Ok(Flow::Normal)
            }
            Stmt::If(if_stmt) => {
                if self.eval_condition(&if_stmt.test, env)? {
                    self.exec_block(&if_stmt.then_stmts, env)
                } else if let Some(else_stmts) = &if_stmt.else_stmts {
                    self.exec_block(else_stmts, env)
                } else {
                    Ok(Flow::Normal)
                }
            }
            Stmt::While(while_stmt) => self.exec_while(while_stmt, env),
            Stmt::For(for_stmt) => self.exec_for(for_stmt, env),
            Stmt::Assign(assign) => {
                let value = self.eval_expr(&assign.value, env)?;
                self.envs.assign(env, &assign.name.name, value);
                Ok(Flow::Normal)
            }
            Stmt::Local(local) => {
                let binding = match &local.value {
                    Some(expr) => Binding::Value(self.eval_expr(expr, env)?),
                    None => Binding::Uninitialized,
                };
                self.envs.define(env, local.name.name.clone(), binding);
                Ok(Flow::Normal)
            }
            Stmt::FuncDecl(decl) => {
                self.envs.define_function(env, Rc::clone(decl));
                Ok(Flow::Normal)
            }
            Stmt::Call(call) => {
                self.call_function(call, env)?;
                Ok(Flow::Normal)
            }
            Stmt::Ret(ret) => {
                let value = match &ret.value {
                    Some(expr) => Some(self.eval_expr(expr, env)?),
                    None => None,
                };
                Ok(Flow::Return(value))
            }
        }
    }

    /// Conditions must evaluate to a Bool
    fn eval_condition(&mut self, test: &Expr, env: EnvId) -> Result<bool, RuntimeError> {
        match self.eval_expr(test, env)? {
            Value::Bool(b) => Ok(b),
            other => Err(RuntimeError::NonBooleanCondition {
                found: other.type_name(),
                line: test.line(),
            }),
        }
    }

    /// The condition is evaluated in `env`; the body shares one child frame
    /// across all iterations
    fn exec_while(&mut self, while_stmt: &WhileStmt, env: EnvId) -> Result<Flow, RuntimeError> {
        let body_env = self.envs.push(env);
        let result = self.run_while(while_stmt, env, body_env);
        self.envs.pop(body_env);
        result
    }

    fn run_while(
        &mut self,
        while_stmt: &WhileStmt,
        env: EnvId,
        body_env: EnvId,
    ) -> Result<Flow, RuntimeError> {
        while self.eval_condition(&while_stmt.test, env)? {
            if let Flow::Return(value) = self.exec_stmts(&while_stmt.body, body_env)? {
                return Ok(Flow::Return(value));
            }
        }
        Ok(Flow::Normal)
    }

    /// Bounds and step are evaluated once, before the first iteration
    fn exec_for(&mut self, for_stmt: &ForStmt, env: EnvId) -> Result<Flow, RuntimeError> {
        let start = self.eval_bound(&for_stmt.start, env, "start")?;
        let end = self.eval_bound(&for_stmt.end, env, "end")?;
        let step = match &for_stmt.step {
            Some(expr) => self.eval_bound(expr, env, "step")?,
            None if start <= end => 1.0,
            None => -1.0,
        };

        if step == 0.0 {
            return Err(RuntimeError::ZeroForStep {
                line: for_stmt.line,
            });
        }

        let body_env = self.envs.push(env);
        let result = self.run_for(for_stmt, body_env, start, end, step);
        self.envs.pop(body_env);
        result
    }

    fn run_for(
        &mut self,
        for_stmt: &ForStmt,
        body_env: EnvId,
        start: f64,
        end: f64,
        step: f64,
    ) -> Result<Flow, RuntimeError> {
        let mut counter = start;
        while (step > 0.0 && counter <= end) || (step < 0.0 && counter >= end) {
            // Rebound from the counter on every iteration
            self.envs.define(
                body_env,
                for_stmt.var.name.clone(),
                Binding::Value(Value::Number(counter)),
            );
            if let Flow::Return(value) = self.exec_stmts(&for_stmt.body, body_env)? {
                return Ok(Flow::Return(value));
            }
            counter += step;
        }
        Ok(Flow::Normal)
    }

    fn eval_bound(&mut self, expr: &Expr, env: EnvId, what: &str) -> Result<f64, RuntimeError> {
        match self.eval_expr(expr, env)? {
            Value::Number(n) => Ok(n),
            other => Err(RuntimeError::TypeError {
                msg: format!("For loop {} must be a number, got {}", what, other.type_name()),
                line: expr.line(),
            }),
        }
    }

    fn write_value(&mut self, value: &Value, newline: bool, line: usize) -> Result<(), RuntimeError> {
        let mut text = expand_escapes(&value.to_string());
        if newline {
            text.push('\n');
        }
        self.out
            .write_all(text.as_bytes())
            .map_err(|e| RuntimeError::Io {
                msg: e.to_string(),
                line,
            })
    }
}

/// Expand backslash escapes in printed text
///
/// Unknown escapes and a trailing backslash are kept verbatim.
pub(crate) fn expand_escapes(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some('r') => result.push('\r'),
            Some('\\') => result.push('\\'),
            Some('\'') => result.push('\''),
            Some('"') => result.push('"'),
            Some('0') => result.push('\0'),
            Some(other) => {
                result.push('\\');
                result.push(other);
            }
            None => result.push('\\'),
        }
    }

    result
}
