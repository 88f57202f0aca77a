//! Expression evaluation

use std::cmp::Ordering;
use std::io::Write;

use crate::ast::*;
use crate::environment::{Binding, EnvId};
use crate::interpreter::{Flow, Interpreter};
use crate::value::{RuntimeError, Value};

impl<W: Write> Interpreter<W> {
    /// Evaluate an expression in `env`
    pub(super) fn eval_expr(&mut self, expr: &Expr, env: EnvId) -> Result<Value, RuntimeError> {
        match expr {
            Expr::Literal(lit, _) => Ok(self.eval_literal(lit)),
            Expr::Identifier(id) => self.eval_identifier(id, env),
            Expr::Grouping(group) => self.eval_expr(&group.expr, env),
            Expr::Unary(unary) => self.eval_unary(unary, env),
            Expr::Binary(binary) => self.eval_binary(binary, env),
            Expr::Logical(logical) => self.eval_logical(logical, env),
            Expr::Call(call) => match self.call_function(call, env)? {
                Some(value) => Ok(value),
                None => Err(RuntimeError::MissingReturnValue {
                    name: call.callee.name.clone(),
                    line: call.line,
                }),
            },
        }
    }

    fn eval_literal(&self, lit: &Literal) -> Value {
        match lit {
            Literal::Integer(n) | Literal::Float(n) => Value::Number(*n),
            Literal::Bool(b) => Value::Bool(*b),
            Literal::String(s) => Value::string(s),
        }
    }

    fn eval_identifier(&self, id: &Identifier, env: EnvId) -> Result<Value, RuntimeError> {
        match self.envs.get(env, &id.name) {
            Some(Binding::Value(value)) => Ok(value.clone()),
            Some(Binding::Uninitialized) => Err(RuntimeError::UninitializedVariable {
                name: id.name.clone(),
                line: id.line,
            }),
            None => Err(RuntimeError::UndefinedVariable {
                name: id.name.clone(),
                line: id.line,
            }),
        }
    }

    fn eval_unary(&mut self, unary: &UnaryExpr, env: EnvId) -> Result<Value, RuntimeError> {
        let operand = self.eval_expr(&unary.expr, env)?;

        match (unary.op, &operand) {
            (UnaryOp::Negate, Value::Number(n)) => Ok(Value::Number(-n)),
            (UnaryOp::Plus, Value::Number(n)) => Ok(Value::Number(*n)),
            (UnaryOp::Not, Value::Bool(b)) => Ok(Value::Bool(!b)),
            (UnaryOp::Not, other) => Err(RuntimeError::TypeError {
                msg: format!("Operand of '~' must be a boolean, got {}", other.type_name()),
                line: unary.line,
            }),
            (op, other) => {
                let symbol = if op == UnaryOp::Negate { "-" } else { "+" };
                Err(RuntimeError::TypeError {
                    msg: format!(
                        "Operand of unary '{}' must be a number, got {}",
                        symbol,
                        other.type_name()
                    ),
                    line: unary.line,
                })
            }
        }
    }

    fn eval_binary(&mut self, binary: &BinaryExpr, env: EnvId) -> Result<Value, RuntimeError> {
        let left = self.eval_expr(&binary.left, env)?;
        let right = self.eval_expr(&binary.right, env)?;
        binary_op(binary.op, &left, &right, binary.line)
    }

    /// `and` / `or` return one of their operands unchanged
    fn eval_logical(&mut self, logical: &LogicalExpr, env: EnvId) -> Result<Value, RuntimeError> {
        let left = self.eval_expr(&logical.left, env)?;

        let short_circuit = match logical.op {
            LogicalOp::And => !left.is_truthy(),
            LogicalOp::Or => left.is_truthy(),
        };

        if short_circuit {
            Ok(left)
        } else {
            self.eval_expr(&logical.right, env)
        }
    }

    /// Call a user-defined function
    ///
    /// Returns the value passed to `ret`, or `None` when the body finished without one.
    pub(super) fn call_function(
        &mut self,
        call: &CallExpr,
        env: EnvId,
    ) -> Result<Option<Value>, RuntimeError> {
        let name = &call.callee.name;
        let entry = self
            .envs
            .get_function(env, name)
            .ok_or_else(|| RuntimeError::UndefinedFunction {
                name: name.clone(),
                line: call.line,
            })?;
        let decl = entry.decl;

        if call.args.len() != decl.params.len() {
            return Err(RuntimeError::ArityMismatch {
                name: name.clone(),
                expected: decl.params.len(),
                found: call.args.len(),
                line: call.line,
            });
        }

        let mut args = Vec::with_capacity(call.args.len());
        for arg in &call.args {
            args.push(self.eval_expr(arg, env)?);
        }

        if self.call_depth >= self.config.max_call_depth {
            return Err(RuntimeError::CallDepthExceeded {
                limit: self.config.max_call_depth,
                line: call.line,
            });
        }

        self.call_depth += 1;
        tracing::trace!(function = %name, depth = self.call_depth, "enter function");

        let frame = self.envs.push(entry.env);
        for (param, value) in decl.params.iter().zip(args) {
            self.envs
                .define(frame, param.name.clone(), Binding::Value(value));
        }
        let result = self.exec_stmts(&decl.body, frame);
        self.envs.pop(frame);

        tracing::trace!(function = %name, depth = self.call_depth, "exit function");
        self.call_depth -= 1;

        match result? {
            Flow::Return(value) => Ok(value),
            Flow::Normal => Ok(None),
        }
    }
}

/// Apply a binary operator to two evaluated operands
fn binary_op(op: BinaryOp, left: &Value, right: &Value, line: usize) -> Result<Value, RuntimeError> {
    match op {
        BinaryOp::Add => match (left, right) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
            (Value::String(_), _) | (_, Value::String(_)) => {
                Ok(Value::string(format!("{}{}", left, right)))
            }
            _ => Err(operand_error(op, left, right, "numbers or strings", line)),
        },
        BinaryOp::Div => {
            if *right == Value::Number(0.0) {
                return Err(RuntimeError::DivideByZero { line });
            }
            let (a, b) = numbers(op, left, right, line)?;
            Ok(Value::Number(a / b))
        }
        BinaryOp::Mod => {
            let (a, b) = numbers(op, left, right, line)?;
            if b == 0.0 {
                return Err(RuntimeError::DivideByZero { line });
            }
            // Floored: the result takes the sign of the divisor
            Ok(Value::Number(a - b * (a / b).floor()))
        }
        BinaryOp::Sub => numbers(op, left, right, line).map(|(a, b)| Value::Number(a - b)),
        BinaryOp::Mul => numbers(op, left, right, line).map(|(a, b)| Value::Number(a * b)),
        BinaryOp::Pow => numbers(op, left, right, line).map(|(a, b)| Value::Number(a.powf(b))),
        BinaryOp::Eq | BinaryOp::Ne => {
            if !left.same_kind(right) {
                return Err(compare_error(op, left, right, line));
            }
            let equal = left == right;
            Ok(Value::Bool(if op == BinaryOp::Eq { equal } else { !equal }))
        }
        BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge => {
            let ordering = match (left, right) {
                (Value::Number(a), Value::Number(b)) => a.partial_cmp(b),
                (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
                _ => return Err(compare_error(op, left, right, line)),
            };
            // NaN compares false with everything
            let result = match ordering {
                Some(ordering) => match op {
                    BinaryOp::Lt => ordering == Ordering::Less,
                    BinaryOp::Le => ordering != Ordering::Greater,
                    BinaryOp::Gt => ordering == Ordering::Greater,
                    _ => ordering != Ordering::Less,
                },
                None => false,
            };
            Ok(Value::Bool(result))
        }
    }
}

fn numbers(op: BinaryOp, left: &Value, right: &Value, line: usize) -> Result<(f64, f64), RuntimeError> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok((*a, *b)),
        _ => Err(operand_error(op, left, right, "numbers", line)),
    }
}

fn operand_error(op: BinaryOp, left: &Value, right: &Value, expected: &str, line: usize) -> RuntimeError {
    RuntimeError::TypeError {
        msg: format!(
            "Operands of '{}' must be {}, got {} and {}",
            op.as_str(),
            expected,
            left.type_name(),
            right.type_name()
        ),
        line,
    }
}

fn compare_error(op: BinaryOp, left: &Value, right: &Value, line: usize) -> RuntimeError {
    RuntimeError::TypeError {
        msg: format!(
            "Cannot compare {} and {} with '{}'",
            left.type_name(),
            right.type_name(),
            op.as_str()
        ),
        line,
    }
}
