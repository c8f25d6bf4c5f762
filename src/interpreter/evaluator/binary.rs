use crate::{
    ast::{BinaryOperator, Expr, LogicalOperator},
    error::RuntimeError,
    interpreter::{
        environment::Environment,
        evaluator::core::{EvalResult, Interpreter},
        value::{Value, ValueKind},
    },
};

impl Interpreter<'_> {
    /// Evaluates both operands, left first, and applies `operator`.
    pub(crate) fn eval_binary(&mut self,
                              left: &Expr,
                              operator: BinaryOperator,
                              right: &Expr,
                              line: usize,
                              env: &mut Environment)
                              -> EvalResult<Value> {
        let left = self.evaluate_expr(left, env)?;
        let right = self.evaluate_expr(right, env)?;
        apply_binary(operator, &left, &right, line)
    }

    /// Evaluates an `and`/`or` expression.
    ///
    /// Both operands are always evaluated and both must be Boolean.
    pub(crate) fn eval_logical(&mut self,
                               left: &Expr,
                               operator: LogicalOperator,
                               right: &Expr,
                               line: usize,
                               env: &mut Environment)
                               -> EvalResult<Value> {
        let left = self.evaluate_expr(left, env)?;
        let right = self.evaluate_expr(right, env)?;

        match (&left, &right) {
            (Value::Boolean(a), Value::Boolean(b)) => Ok(Value::Boolean(match operator {
                                                            LogicalOperator::And => *a && *b,
                                                            LogicalOperator::Or => *a || *b,
                                                        })),
            _ => Err(RuntimeError::TypeMismatch { operator: operator.symbol(),
                                                  left: left.kind(),
                                                  right: right.kind(),
                                                  line }),
        }
    }
}

/// Applies a binary operator to two evaluated operands.
///
/// Numbers support arithmetic and ordering; Booleans and Strings support only
/// `==` and `!=` (strings compare byte-wise). Operands of different kinds
/// are never combined.
///
/// # Errors
/// - `TypeMismatch` naming both kinds when they differ.
/// - `UnsupportedOperator` when the shared kind lacks the operator.
/// - `DivisionByZero` for `/` or `%` by zero.
/// - `Overflow` when the result does not fit a Number.
///
/// # Example
/// ```
/// use padscript::{
///     ast::BinaryOperator, interpreter::{evaluator::binary::apply_binary, value::Value},
/// };
///
/// let r = apply_binary(BinaryOperator::Modulo, &Value::Number(-7), &Value::Number(2), 1);
/// assert_eq!(r, Ok(Value::Number(-1)));
///
/// let r = apply_binary(BinaryOperator::Equal, &Value::Number(1), &Value::from("1"), 1);
/// assert!(r.is_err());
/// ```
pub fn apply_binary(operator: BinaryOperator,
                    left: &Value,
                    right: &Value,
                    line: usize)
                    -> EvalResult<Value> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => apply_numeric(operator, *a, *b, line),
        (Value::Boolean(a), Value::Boolean(b)) => apply_equality(operator, a, b, ValueKind::Boolean, line),
        (Value::String(a), Value::String(b)) => apply_equality(operator, a, b, ValueKind::String, line),
        _ if left.kind() == right.kind() => {
            Err(RuntimeError::UnsupportedOperator { operator: operator.symbol(),
                                                    kind: left.kind(),
                                                    line })
        },
        _ => Err(RuntimeError::TypeMismatch { operator: operator.symbol(),
                                              left: left.kind(),
                                              right: right.kind(),
                                              line }),
    }
}

fn apply_numeric(operator: BinaryOperator, a: i32, b: i32, line: usize) -> EvalResult<Value> {
    let overflow = || RuntimeError::Overflow { line };

    let value = match operator {
        BinaryOperator::Add => Value::Number(a.checked_add(b).ok_or_else(overflow)?),
        BinaryOperator::Subtract => Value::Number(a.checked_sub(b).ok_or_else(overflow)?),
        BinaryOperator::Multiply => Value::Number(a.checked_mul(b).ok_or_else(overflow)?),
        BinaryOperator::Divide | BinaryOperator::Modulo if b == 0 => {
            return Err(RuntimeError::DivisionByZero { line });
        },
        // Both truncate toward zero.
        BinaryOperator::Divide => Value::Number(a.checked_div(b).ok_or_else(overflow)?),
        BinaryOperator::Modulo => Value::Number(a.checked_rem(b).ok_or_else(overflow)?),
        BinaryOperator::Less => Value::Boolean(a < b),
        BinaryOperator::LessEqual => Value::Boolean(a <= b),
        BinaryOperator::Greater => Value::Boolean(a > b),
        BinaryOperator::GreaterEqual => Value::Boolean(a >= b),
        BinaryOperator::Equal => Value::Boolean(a == b),
        BinaryOperator::NotEqual => Value::Boolean(a != b),
    };

    Ok(value)
}

fn apply_equality<T: PartialEq + ?Sized>(operator: BinaryOperator,
                                         a: &T,
                                         b: &T,
                                         kind: ValueKind,
                                         line: usize)
                                         -> EvalResult<Value> {
    match operator {
        BinaryOperator::Equal => Ok(Value::Boolean(a == b)),
        BinaryOperator::NotEqual => Ok(Value::Boolean(a != b)),
        _ => Err(RuntimeError::UnsupportedOperator { operator: operator.symbol(),
                                                     kind,
                                                     line }),
    }
}
