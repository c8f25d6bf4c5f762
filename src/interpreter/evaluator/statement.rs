use crate::{
    ast::{Block, Expr},
    interpreter::{
        environment::Environment,
        evaluator::core::{EvalResult, Interpreter},
        value::Value,
    },
};

impl Interpreter<'_> {
    /// Evaluates the initializer, or takes `Null` when there is none, and
    /// declares the result in the current scope.
    ///
    /// # Returns
    /// The declared value.
    pub(crate) fn eval_var_declaration(&mut self,
                                       name: &str,
                                       constant: bool,
                                       value: Option<&Expr>,
                                       line: usize,
                                       env: &mut Environment)
                                       -> EvalResult<Value> {
        let value = match value {
            Some(expr) => self.evaluate_expr(expr, env)?,
            None => Value::Null,
        };
        env.declare(name, value.clone(), constant, line)?;
        Ok(value)
    }

    /// Evaluates an `if` statement.
    ///
    /// The test must be Boolean. Without an alternate, a false test yields
    /// `Null`. A break inside either branch is returned as is, so the
    /// enclosing loop sees it.
    pub(crate) fn eval_if(&mut self,
                          test: &Expr,
                          consequent: &Block,
                          alternate: Option<&Block>,
                          line: usize,
                          env: &mut Environment)
                          -> EvalResult<Value> {
        if self.evaluate_expr(test, env)?.as_bool("if test", line)? {
            self.eval_block(consequent, env)
        } else if let Some(alternate) = alternate {
            self.eval_block(alternate, env)
        } else {
            Ok(Value::Null)
        }
    }

    /// Evaluates a `while` loop.
    ///
    /// The test is re-evaluated, and must be Boolean, before every iteration.
    /// Each iteration runs the body in a fresh scope. A break from the body
    /// ends the loop and goes no further.
    pub(crate) fn eval_while(&mut self,
                             test: &Expr,
                             body: &Block,
                             line: usize,
                             env: &mut Environment)
                             -> EvalResult<Value> {
        loop {
            self.hardware.yield_now();
            if !self.evaluate_expr(test, env)?.as_bool("while test", line)? {
                break;
            }
            if self.eval_block(body, env)?.is_break() {
                break;
            }
        }
        Ok(Value::Null)
    }

    /// Evaluates a block in its own child scope.
    ///
    /// Stops at the first statement that yields a break and relays it. The
    /// scope is discarded on every exit path, errors included.
    ///
    /// # Returns
    /// The value of the last statement evaluated, `Value::Break` if the block
    /// was cut short, or `Null` for an empty block.
    pub(crate) fn eval_block(&mut self, block: &Block, env: &mut Environment) -> EvalResult<Value> {
        env.with_scope(|env| {
               let mut last = Value::Null;
               for statement in &block.body {
                   self.hardware.yield_now();
                   last = self.evaluate(statement, env)?;
                   if last.is_break() {
                       break;
                   }
               }
               Ok(last)
           })
    }
}
