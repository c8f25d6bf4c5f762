use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{core::EvalResult, function::core::native_functions},
        value::Value,
    },
};

#[derive(Debug, Default, Clone)]
struct Scope {
    variables: HashMap<String, Value>,
    constants: HashSet<String>,
}

/// The chain of lexical scopes a script runs against.
///
/// Scopes form a strict stack: the root (global) scope lives for the whole
/// run, and child scopes are pushed on block entry and popped on exit. Each
/// scope's parent is simply the scope below it. Names resolve innermost first.
#[derive(Debug, Clone)]
pub struct Environment {
    scopes: Vec<Scope>,
}

#[allow(clippy::new_without_default)]
impl Environment {
    /// Creates an environment with one empty root scope and nothing declared.
    #[must_use]
    pub fn new() -> Self {
        Self { scopes: vec![Scope::default()] }
    }

    /// Creates the global environment: `true`, `false`, `null` and every
    /// native function, all constant.
    ///
    /// # Example
    /// ```
    /// use padscript::interpreter::{environment::Environment, value::Value};
    ///
    /// let env = Environment::global();
    /// assert_eq!(env.lookup("true", 1), Ok(Value::Boolean(true)));
    /// assert!(matches!(env.lookup("print", 1), Ok(Value::NativeFunction(_))));
    /// ```
    #[must_use]
    pub fn global() -> Self {
        let mut env = Self::new();
        env.define_constant("true", Value::Boolean(true));
        env.define_constant("false", Value::Boolean(false));
        env.define_constant("null", Value::Null);
        for function in native_functions() {
            env.define_constant(function.name, Value::NativeFunction(function));
        }
        env
    }

    fn define_constant(&mut self, name: &str, value: Value) {
        let scope = self.current_mut();
        scope.variables.insert(name.to_string(), value);
        scope.constants.insert(name.to_string());
    }

    /// Number of scopes on the chain, the root included.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn push_scope(&mut self) {
        self.scopes.push(Scope::default());
        debug!(depth = self.scopes.len(), "entered scope");
    }

    /// Discards the innermost scope. The root scope is never popped.
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
            debug!(depth = self.scopes.len(), "left scope");
        }
    }

    /// Runs `f` inside a fresh child scope, discarding the scope afterwards
    /// whatever `f` returns.
    pub fn with_scope<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        self.push_scope();
        let result = f(self);
        self.pop_scope();
        result
    }

    fn current_mut(&mut self) -> &mut Scope {
        if self.scopes.is_empty() {
            self.scopes.push(Scope::default());
        }
        let last = self.scopes.len() - 1;
        &mut self.scopes[last]
    }

    fn resolve(&self, name: &str) -> Option<&Scope> {
        self.scopes.iter().rev().find(|s| s.variables.contains_key(name))
    }

    /// Declares `name` in the current scope.
    ///
    /// Shadowing a name from an enclosing scope is allowed.
    ///
    /// # Errors
    /// `Redeclaration` if `name` already exists in the current scope.
    pub fn declare(&mut self,
                   name: &str,
                   value: Value,
                   constant: bool,
                   line: usize)
                   -> EvalResult<()> {
        let scope = self.current_mut();
        if scope.variables.contains_key(name) {
            return Err(RuntimeError::Redeclaration { name: name.to_string(),
                                                     line });
        }
        scope.variables.insert(name.to_string(), value);
        if constant {
            scope.constants.insert(name.to_string());
        }
        Ok(())
    }

    /// Replaces the value of the nearest binding of `name`.
    ///
    /// # Errors
    /// - `UnknownVariable` if no scope binds `name`.
    /// - `ConstantReassignment` if the nearest binding is constant.
    pub fn assign(&mut self, name: &str, value: Value, line: usize) -> EvalResult<()> {
        let Some(scope) = self.scopes
                              .iter_mut()
                              .rev()
                              .find(|s| s.variables.contains_key(name))
        else {
            return Err(RuntimeError::UnknownVariable { name: name.to_string(),
                                                       line });
        };
        if scope.constants.contains(name) {
            return Err(RuntimeError::ConstantReassignment { name: name.to_string(),
                                                            line });
        }
        scope.variables.insert(name.to_string(), value);
        Ok(())
    }

    /// Returns a copy of the nearest binding of `name`.
    ///
    /// # Errors
    /// `UnknownVariable` if no scope binds `name`.
    pub fn lookup(&self, name: &str, line: usize) -> EvalResult<Value> {
        self.resolve(name)
            .and_then(|s| s.variables.get(name))
            .cloned()
            .ok_or_else(|| RuntimeError::UnknownVariable { name: name.to_string(),
                                                           line })
    }

    /// Returns whether the nearest binding of `name` is constant.
    #[must_use]
    pub fn is_constant(&self, name: &str) -> bool {
        self.resolve(name).is_some_and(|s| s.constants.contains(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redeclaring_in_the_same_scope_fails() {
        let mut env = Environment::new();
        env.declare("x", Value::Number(1), false, 1).unwrap();
        assert_eq!(env.declare("x", Value::Number(2), false, 2),
                   Err(RuntimeError::Redeclaration { name: "x".to_string(),
                                                     line: 2, }));
    }

    #[test]
    fn shadowing_a_parent_is_allowed_and_scoped() {
        let mut env = Environment::new();
        env.declare("x", Value::Number(1), false, 1).unwrap();
        env.with_scope(|env| {
               env.declare("x", Value::Number(2), false, 2).unwrap();
               assert_eq!(env.lookup("x", 2), Ok(Value::Number(2)));
           });
        assert_eq!(env.lookup("x", 3), Ok(Value::Number(1)));
        assert_eq!(env.depth(), 1);
    }

    #[test]
    fn assign_reaches_enclosing_scopes() {
        let mut env = Environment::new();
        env.declare("x", Value::Number(1), false, 1).unwrap();
        env.with_scope(|env| env.assign("x", Value::Number(5), 2)).unwrap();
        assert_eq!(env.lookup("x", 3), Ok(Value::Number(5)));
    }

    #[test]
    fn constants_cannot_be_reassigned() {
        let mut env = Environment::new();
        env.declare("c", Value::Number(1), true, 1).unwrap();
        assert!(env.is_constant("c"));
        assert_eq!(env.assign("c", Value::Number(2), 2),
                   Err(RuntimeError::ConstantReassignment { name: "c".to_string(),
                                                            line: 2, }));
    }

    #[test]
    fn missing_names_fail() {
        let mut env = Environment::new();
        assert!(matches!(env.lookup("nope", 1), Err(RuntimeError::UnknownVariable { .. })));
        assert!(matches!(env.assign("nope", Value::Null, 1),
                         Err(RuntimeError::UnknownVariable { .. })));
    }

    #[test]
    fn globals_are_constant() {
        let mut env = Environment::global();
        assert!(env.is_constant("delay"));
        assert!(matches!(env.assign("false", Value::Boolean(true), 1),
                         Err(RuntimeError::ConstantReassignment { .. })));
    }

    #[test]
    fn root_scope_is_never_popped() {
        let mut env = Environment::global();
        env.pop_scope();
        assert_eq!(env.depth(), 1);
        assert_eq!(env.lookup("null", 1), Ok(Value::Null));
    }
}
