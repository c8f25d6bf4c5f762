use std::collections::BTreeMap;

use crate::{
    ast::Expr,
    interpreter::{
        environment::Environment,
        evaluator::core::{EvalResult, Interpreter},
        value::Value,
    },
};

impl Interpreter<'_> {
    /// Builds an Object. Properties declared without a value hold `Null`.
    pub(crate) fn eval_object_literal(&mut self,
                                      properties: &BTreeMap<String, Option<Expr>>,
                                      env: &mut Environment)
                                      -> EvalResult<Value> {
        let mut object = BTreeMap::new();
        for (key, value) in properties {
            let value = match value {
                Some(expr) => self.evaluate_expr(expr, env)?,
                None => Value::Null,
            };
            object.insert(key.clone(), value);
        }
        Ok(Value::Object(object))
    }

    pub(crate) fn eval_array_literal(&mut self,
                                     elements: &[Expr],
                                     env: &mut Environment)
                                     -> EvalResult<Value> {
        let values = elements.iter()
                             .map(|e| self.evaluate_expr(e, env))
                             .collect::<EvalResult<Vec<_>>>()?;
        Ok(Value::Array(values))
    }
}
