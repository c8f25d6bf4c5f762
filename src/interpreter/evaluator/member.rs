use std::mem;

use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        environment::Environment,
        evaluator::core::{EvalResult, Interpreter},
        value::Value,
    },
};

/// A resolved member key: `.name`, or the value of `[expr]`.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Key {
    Name(String),
    Computed(Value),
}

impl Key {
    fn describe(&self) -> String {
        match self {
            Self::Name(name) => format!("'.{name}'"),
            Self::Computed(value) => format!("a {} key", value.kind()),
        }
    }
}

/// Borrows the existing slot `key` names inside `container`.
///
/// Objects take `.name` or a String key; arrays take a Number index. Members
/// are never created here, so an unknown key or out-of-range index fails.
fn slot_mut<'v>(container: &'v mut Value, key: &Key, line: usize) -> EvalResult<&'v mut Value> {
    let container_kind = container.kind();

    match (container, key) {
        (Value::Object(properties), Key::Name(name) | Key::Computed(Value::String(name))) => {
            properties.get_mut(name)
                      .ok_or_else(|| RuntimeError::UnknownProperty { name: name.clone(),
                                                                     line })
        },
        (Value::Array(elements), Key::Computed(Value::Number(index))) => {
            let len = elements.len();
            match usize::try_from(*index) {
                Ok(i) if i < len => Ok(&mut elements[i]),
                _ => Err(RuntimeError::IndexOutOfBounds { len,
                                                          found: *index,
                                                          line }),
            }
        },
        (_, key) => Err(RuntimeError::InvalidMemberAccess { details: format!("cannot access {container_kind} with {}",
                                                                             key.describe()),
                                                            line }),
    }
}

impl Interpreter<'_> {
    fn property_key(&mut self,
                    property: &Expr,
                    computed: bool,
                    env: &mut Environment)
                    -> EvalResult<Key> {
        if computed {
            return Ok(Key::Computed(self.evaluate_expr(property, env)?));
        }
        match property {
            Expr::Identifier { name, .. } => Ok(Key::Name(name.clone())),
            other => Err(RuntimeError::InvalidMemberAccess { details: format!("property must be an identifier, found {}",
                                                                              other.kind()),
                                                             line:    other.line(), }),
        }
    }

    /// Reads `object.property` or `object[property]`.
    pub(crate) fn eval_member(&mut self,
                              object: &Expr,
                              property: &Expr,
                              computed: bool,
                              line: usize,
                              env: &mut Environment)
                              -> EvalResult<Value> {
        let mut container = self.evaluate_expr(object, env)?;
        let key = self.property_key(property, computed, env)?;
        let slot = slot_mut(&mut container, &key, line)?;
        Ok(mem::replace(slot, Value::Null))
    }

    /// Evaluates an assignment and returns the assigned value.
    ///
    /// Assigning to a member goes through read, modify, rebind. The root
    /// variable is copied first, then the keys along the member chain are
    /// evaluated (outermost object first), then the new value. That copy is
    /// updated at the path and written back as a whole, even if evaluating the
    /// value rebound the root in the meantime. Nested writes such as
    /// `board.rows[1][2] = 0` therefore work at any depth.
    pub(crate) fn eval_assignment(&mut self,
                                  assignee: &Expr,
                                  value: &Expr,
                                  line: usize,
                                  env: &mut Environment)
                                  -> EvalResult<Value> {
        if let Expr::Identifier { name, .. } = assignee {
            let value = self.evaluate_expr(value, env)?;
            env.assign(name, value.clone(), line)?;
            return Ok(value);
        }

        let (root, mut container, keys) = self.resolve_place(assignee, env)?;
        let value = self.evaluate_expr(value, env)?;

        let mut slot = &mut container;
        for key in &keys {
            slot = slot_mut(slot, key, line)?;
        }
        *slot = value.clone();

        env.assign(&root, container, line)?;
        Ok(value)
    }

    /// Splits an assignment target into its root variable, a copy of that
    /// variable's current value, and the keys leading from it to the slot
    /// being written.
    fn resolve_place(&mut self,
                     target: &Expr,
                     env: &mut Environment)
                     -> EvalResult<(String, Value, Vec<Key>)> {
        self.descend(target.line(), |this| match target {
                Expr::Identifier { name, line } => Ok((name.clone(), env.lookup(name, *line)?, Vec::new())),
                Expr::Member { object,
                               property,
                               computed,
                               .. } => {
                    let (root, container, mut keys) = this.resolve_place(object, env)?;
                    keys.push(this.property_key(property, *computed, env)?);
                    Ok((root, container, keys))
                },
                other => Err(RuntimeError::InvalidAssignmentTarget { line: other.line() }),
            })
    }
}
