//! The tree-walking evaluator. Walks the AST produced by the parser,
//! maintaining one flat [`Environment`], performing `Print` I/O through an
//! injected sink, and resolving/splicing imported modules in place.
mod environment;
mod error;
mod value;

pub use environment::Environment;
pub use error::RuntimeError;
pub use value::Value;

use std::collections::HashSet;
use std::fs;
use std::io::Write;

use log::trace;

use crate::ast::{
    ArithOp, Assign, BinOp, Block, CompareOp, Comparison, Expr, If, Import, Number, Print,
    Program, Stmt, TryCatch, While,
};
use crate::lexer::Lexer;
use crate::loader;
use crate::parser::Parser;

const MAX_LOOP_ITERATIONS: u32 = 10_000;

pub struct Interpreter<'a> {
    environment: Environment,
    imported: HashSet<String>,
    output: &'a mut dyn Write,
}

impl<'a> Interpreter<'a> {
    pub fn new(output: &'a mut dyn Write) -> Self {
        Self {
            environment: Environment::default(),
            imported: HashSet::new(),
            output,
        }
    }

    pub fn interpret(&mut self, program: &Program) -> Result<(), RuntimeError> {
        self.exec_block(program)
    }

    fn exec_block(&mut self, block: &Block) -> Result<(), RuntimeError> {
        for statement in block {
            self.exec_stmt(statement)?;
        }
        Ok(())
    }

    fn exec_stmt(&mut self, statement: &Stmt) -> Result<(), RuntimeError> {
        match statement {
            Stmt::Assign(node) => self.exec_assign(node),
            Stmt::Print(node) => self.exec_print(node),
            Stmt::If(node) => self.exec_if(node),
            Stmt::While(node) => self.exec_while(node),
            Stmt::Import(node) => self.exec_import(node),
            Stmt::TryCatch(node) => self.exec_try_catch(node),
        }
    }

    fn exec_assign(&mut self, node: &Assign) -> Result<(), RuntimeError> {
        let value = self.eval(&node.value)?;
        self.environment.set(node.name.clone(), value);
        Ok(())
    }

    fn exec_print(&mut self, node: &Print) -> Result<(), RuntimeError> {
        let value = self.eval(&node.value)?;
        writeln!(self.output, "{value}").map_err(|err| {
            RuntimeError::new(node.position.clone(), format!("failed to write output: {err}"))
        })
    }

    fn exec_if(&mut self, node: &If) -> Result<(), RuntimeError> {
        let condition = self.eval_condition(&node.condition, &node.position)?;
        if condition {
            self.exec_block(&node.then_block)
        } else if let Some(else_block) = &node.else_block {
            self.exec_block(else_block)
        } else {
            Ok(())
        }
    }

    fn exec_while(&mut self, node: &While) -> Result<(), RuntimeError> {
        let mut iterations: u32 = 0;

        loop {
            if !self.eval_condition(&node.condition, &node.position)? {
                break;
            }
            if iterations >= MAX_LOOP_ITERATIONS {
                return Err(RuntimeError::new(
                    node.position.clone(),
                    "loop iteration limit exceeded",
                ));
            }
            self.exec_block(&node.body)?;
            iterations += 1;
        }

        Ok(())
    }

    fn exec_import(&mut self, node: &Import) -> Result<(), RuntimeError> {
        if self.imported.contains(&node.module) {
            trace!("module '{}' already imported, skipping", node.module);
            return Ok(());
        }
        self.imported.insert(node.module.clone());

        let path = loader::resolve_module(&node.module, &node.position)?;

        let source = fs::read_to_string(&path).map_err(|err| {
            RuntimeError::new(
                node.position.clone(),
                format!("failed to load module '{}': {err}", node.module),
            )
        })?;

        let wrap = |err: String| {
            RuntimeError::new(
                node.position.clone(),
                format!("failed to load module '{}': {err}", node.module),
            )
        };

        let tokens = Lexer::new(&source, path.to_string_lossy().into_owned())
            .tokenize()
            .map_err(|err| wrap(err.to_string()))?;
        let program = Parser::new(tokens)
            .parse_program()
            .map_err(|err| wrap(err.to_string()))?;

        self.exec_block(&program).map_err(|err| wrap(err.to_string()))
    }

    fn exec_try_catch(&mut self, node: &TryCatch) -> Result<(), RuntimeError> {
        match self.exec_block(&node.try_block) {
            Ok(()) => Ok(()),
            Err(failure) => {
                self.environment
                    .set(node.error_var.clone(), Value::Text(failure.message));
                self.exec_block(&node.catch_block)
            }
        }
    }

    fn eval_condition(
        &mut self,
        condition: &Expr,
        statement_position: &crate::lexer::Position,
    ) -> Result<bool, RuntimeError> {
        match self.eval(condition)? {
            Value::Boolean(value) => Ok(value),
            other => Err(RuntimeError::new(
                statement_position.clone(),
                format!("condition must be boolean, got {}", other.kind_name()),
            )),
        }
    }

    fn eval(&mut self, expr: &Expr) -> Result<Value, RuntimeError> {
        match expr {
            Expr::Number(n, _) => Ok(Value::Number(*n)),
            Expr::String(s, _) => Ok(Value::Text(s.clone())),
            Expr::Variable(name, position) => self.eval_variable(name, position),
            Expr::BinOp(node) => self.eval_binop(node),
            Expr::Comparison(node) => self.eval_comparison(node),
        }
    }

    fn eval_variable(
        &self,
        name: &str,
        position: &crate::lexer::Position,
    ) -> Result<Value, RuntimeError> {
        self.environment.get(name).cloned().ok_or_else(|| {
            let available = self.environment.names().join(", ");
            RuntimeError::new(
                position.clone(),
                format!("unbound variable '{name}' (available: {available})"),
            )
        })
    }

    fn eval_binop(&mut self, node: &BinOp) -> Result<Value, RuntimeError> {
        let left = self.eval(&node.left)?;
        let right = self.eval(&node.right)?;
        let position = &node.position;

        match node.op {
            ArithOp::Add => match (&left, &right) {
                (Value::Text(_), _) | (_, Value::Text(_)) => {
                    Ok(Value::Text(format!("{left}{right}")))
                }
                _ => numeric_binop(&left, &right, node.op, position),
            },
            ArithOp::Sub => numeric_binop(&left, &right, node.op, position),
            ArithOp::Mul => match (&left, &right) {
                (Value::Text(text), Value::Number(Number::Int(count)))
                | (Value::Number(Number::Int(count)), Value::Text(text)) => {
                    let count = usize::try_from(*count).unwrap_or(0);
                    Ok(Value::Text(text.repeat(count)))
                }
                _ => numeric_binop(&left, &right, node.op, position),
            },
            ArithOp::Div => {
                let (Value::Number(l), Value::Number(r)) = (&left, &right) else {
                    return Err(type_error(&left, &right, node.op, position));
                };
                if r.as_f64() == 0.0 {
                    return Err(RuntimeError::new(position.clone(), "division by zero"));
                }
                Ok(Value::Number(Number::Frac(l.as_f64() / r.as_f64())))
            }
        }
    }

    fn eval_comparison(&mut self, node: &Comparison) -> Result<Value, RuntimeError> {
        let left = self.eval(&node.left)?;
        let right = self.eval(&node.right)?;
        let position = &node.position;

        match node.op {
            CompareOp::Eq | CompareOp::Ne => {
                if left.kind_name() != right.kind_name() {
                    return Err(RuntimeError::new(
                        position.clone(),
                        format!(
                            "cannot compare {} with {} using '{}'",
                            left.kind_name(),
                            right.kind_name(),
                            node.op
                        ),
                    ));
                }
                let equal = left == right;
                Ok(Value::Boolean(if node.op == CompareOp::Eq {
                    equal
                } else {
                    !equal
                }))
            }
            CompareOp::Lt | CompareOp::Le | CompareOp::Gt | CompareOp::Ge => {
                let (Value::Number(l), Value::Number(r)) = (&left, &right) else {
                    return Err(RuntimeError::new(
                        position.clone(),
                        format!(
                            "cannot order {} and {} using '{}'",
                            left.kind_name(),
                            right.kind_name(),
                            node.op
                        ),
                    ));
                };
                let (a, b) = (l.as_f64(), r.as_f64());
                let result = match node.op {
                    CompareOp::Lt => a < b,
                    CompareOp::Le => a <= b,
                    CompareOp::Gt => a > b,
                    CompareOp::Ge => a >= b,
                    CompareOp::Eq | CompareOp::Ne => unreachable!("handled above"),
                };
                Ok(Value::Boolean(result))
            }
        }
    }
}

fn type_error(left: &Value, right: &Value, op: ArithOp, position: &crate::lexer::Position) -> RuntimeError {
    RuntimeError::new(
        position.clone(),
        format!(
            "cannot apply '{op}' to {} and {}",
            left.kind_name(),
            right.kind_name()
        ),
    )
}

fn numeric_binop(
    left: &Value,
    right: &Value,
    op: ArithOp,
    position: &crate::lexer::Position,
) -> Result<Value, RuntimeError> {
    let (Value::Number(l), Value::Number(r)) = (left, right) else {
        return Err(type_error(left, right, op, position));
    };

    if let (Number::Int(a), Number::Int(b)) = (l, r) {
        let result = match op {
            ArithOp::Add => a + b,
            ArithOp::Sub => a - b,
            ArithOp::Mul => a * b,
            ArithOp::Div => unreachable!("division has its own fractional path"),
        };
        return Ok(Value::Number(Number::Int(result)));
    }

    let (a, b) = (l.as_f64(), r.as_f64());
    let result = match op {
        ArithOp::Add => a + b,
        ArithOp::Sub => a - b,
        ArithOp::Mul => a * b,
        ArithOp::Div => unreachable!("division has its own fractional path"),
    };
    Ok(Value::Number(Number::Frac(result)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;
    use crate::parser::Parser;

    fn run(source: &str) -> Result<String, RuntimeError> {
        let tokens = Lexer::new(source, "<test>").tokenize().unwrap();
        let program = Parser::new(tokens).parse_program().unwrap();
        let mut output = Vec::new();
        {
            let mut interpreter = Interpreter::new(&mut output);
            interpreter.interpret(&program)?;
        }
        Ok(String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_arithmetic_and_concat() {
        let out = run("x = 2 + 3 * 4; 打印(x); 打印(\"v=\" + x);").unwrap();
        assert_eq!(out, "14\nv=14\n");
    }

    #[test]
    fn test_if_else_with_comparison() {
        let out = run("n = 5; 如果 (n < 10) { 打印(\"small\"); } 否则 { 打印(\"big\"); }").unwrap();
        assert_eq!(out, "small\n");
    }

    #[test]
    fn test_while_with_loop_guard() {
        let out = run("i = 0; 循环 (i < 3) { 打印(i); i = i + 1; }").unwrap();
        assert_eq!(out, "0\n1\n2\n");
    }

    #[test]
    fn test_while_iteration_cap_is_enforced() {
        let err = run("i = 0; 循环 (i < 999999) { i = i + 1; }").unwrap_err();
        assert!(err.message.contains("loop iteration limit exceeded"));
    }

    #[test]
    fn test_divide_by_zero_is_caught() {
        let out = run(
            "尝试 { x = 10 / 0; 打印(x); } 捕获 (e) { 打印(\"caught:\" + e); }",
        )
        .unwrap();
        assert!(out.starts_with("caught:"));
        assert!(out.contains("division by zero"));
    }

    #[test]
    fn test_unbound_variable_is_fatal() {
        let err = run("打印(y);").unwrap_err();
        assert!(err.message.contains('y'));
        assert!(err.message.contains("available: "));
    }

    #[test]
    fn test_string_multiplication_replicates() {
        let out = run("打印(\"ab\" * 3);").unwrap();
        assert_eq!(out, "ababab\n");
    }

    #[test]
    fn test_negative_replication_yields_empty_text() {
        let out = run("打印(\"ab\" * (0 - 1));").unwrap();
        assert_eq!(out, "\n");
    }

    #[test]
    fn test_int_division_always_fractional() {
        let out = run("打印(4 / 2);").unwrap();
        assert_eq!(out, "2.0\n");
    }

    #[test]
    fn test_equality_requires_same_kind() {
        let err = run("如果 (1 == \"1\") { 打印(\"y\"); }").unwrap_err();
        assert!(err.message.contains("cannot compare"));
    }
}
