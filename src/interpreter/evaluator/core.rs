use tracing::trace;

use crate::{
    ast::{Expr, Program, Stmt},
    config::Limits,
    error::RuntimeError,
    hardware::PadHardware,
    interpreter::{environment::Environment, value::Value},
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or the
/// `RuntimeError` that aborts the script.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Walks a syntax tree against an [`Environment`].
///
/// The interpreter borrows the hardware collaborator for the duration of a
/// run; native functions reach it through the call boundary. The environment
/// is passed explicitly to every evaluation so that the same global scope can
/// outlive the interpreter (see [`crate::session::Session`]).
pub struct Interpreter<'h> {
    pub(crate) hardware: &'h mut dyn PadHardware,
    limits:              Limits,
    depth:               usize,
}

impl<'h> Interpreter<'h> {
    #[must_use]
    pub fn new(hardware: &'h mut dyn PadHardware, limits: Limits) -> Self {
        Self { hardware,
               limits,
               depth: 0 }
    }

    /// Evaluates every top-level statement in order and returns the value of
    /// the last one, or `Null` for an empty program.
    ///
    /// Top-level statements run directly in `env`; no child scope is opened.
    /// The hardware yield hook runs before each statement.
    ///
    /// # Errors
    /// Any fatal error from a statement, and `BreakOutsideLoop` when a break
    /// reaches the program level.
    ///
    /// # Example
    /// ```
    /// use padscript::{
    ///     config::Limits,
    ///     hardware::simulated::SimulatedRig,
    ///     interpreter::{
    ///         environment::Environment, evaluator::core::Interpreter, parser::core::produce_tree,
    ///         value::Value,
    ///     },
    /// };
    ///
    /// let parsed = produce_tree(b"let x = 6; x * 7;", &Limits::default());
    /// let mut rig = SimulatedRig::default();
    /// let mut env = Environment::global();
    ///
    /// let mut interpreter = Interpreter::new(&mut rig, Limits::default());
    /// let value = interpreter.evaluate_program(&parsed.program, &mut env).unwrap();
    /// assert_eq!(value, Value::Number(42));
    /// ```
    pub fn evaluate_program(&mut self, program: &Program, env: &mut Environment) -> EvalResult<Value> {
        let mut last = Value::Null;

        for statement in &program.body {
            self.hardware.yield_now();
            last = self.evaluate(statement, env)?;
            if last.is_break() {
                return Err(RuntimeError::BreakOutsideLoop { line: statement.line() });
            }
        }

        Ok(last)
    }

    /// Evaluates one statement.
    ///
    /// Dispatch is purely by node kind. A `break` statement evaluates to
    /// [`Value::Break`], which blocks relay and loops consume.
    pub fn evaluate(&mut self, statement: &Stmt, env: &mut Environment) -> EvalResult<Value> {
        self.descend(statement.line(), |this| {
                trace!(kind = %statement.kind(), line = statement.line(), "evaluating statement");

                match statement {
                    Stmt::VarDeclaration { name,
                                           constant,
                                           value,
                                           line, } => {
                        this.eval_var_declaration(name, *constant, value.as_ref(), *line, env)
                    },
                    Stmt::If { test,
                               consequent,
                               alternate,
                               line, } => this.eval_if(test, consequent, alternate.as_ref(), *line, env),
                    Stmt::While { test, body, line } => this.eval_while(test, body, *line, env),
                    Stmt::Break { .. } => Ok(Value::Break),
                    Stmt::Block(block) => this.eval_block(block, env),
                    Stmt::Expression { expr } => this.evaluate_expr(expr, env),
                }
            })
    }

    /// Evaluates one expression.
    pub fn evaluate_expr(&mut self, expr: &Expr, env: &mut Environment) -> EvalResult<Value> {
        self.descend(expr.line(), |this| match expr {
                Expr::Identifier { name, line } => env.lookup(name, *line),
                Expr::NumericLiteral { value, .. } => Ok(Value::Number(*value)),
                Expr::StringLiteral { value, .. } => Ok(Value::String(value.clone())),
                Expr::ObjectLiteral { properties, .. } => this.eval_object_literal(properties, env),
                Expr::ArrayLiteral { elements, .. } => this.eval_array_literal(elements, env),
                Expr::Binary { left,
                               operator,
                               right,
                               line, } => this.eval_binary(left, *operator, right, *line, env),
                Expr::Logical { left,
                                operator,
                                right,
                                line, } => this.eval_logical(left, *operator, right, *line, env),
                Expr::Assignment { assignee, value, line } => {
                    this.eval_assignment(assignee, value, *line, env)
                },
                Expr::Call { callee, args, line } => this.eval_call(callee, args, *line, env),
                Expr::Member { object,
                               property,
                               computed,
                               line, } => this.eval_member(object, property, *computed, *line, env),
            })
    }

    /// Runs `f` one level deeper, failing once the configured evaluation depth
    /// is reached.
    pub(crate) fn descend<T>(&mut self,
                             line: usize,
                             f: impl FnOnce(&mut Self) -> EvalResult<T>)
                             -> EvalResult<T> {
        if self.depth >= self.limits.max_eval_depth {
            return Err(RuntimeError::DepthExceeded { limit: self.limits.max_eval_depth,
                                                     line });
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }
}
