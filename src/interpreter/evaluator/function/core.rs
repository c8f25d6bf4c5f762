use std::fmt;

use tracing::debug;

use crate::{
    ast::Expr,
    error::RuntimeError,
    hardware::{Jingle, PadHardware},
    interpreter::{
        environment::Environment,
        evaluator::{
            core::{EvalResult, Interpreter},
            function::{output, pads, sound},
        },
        value::Value,
    },
};

/// Type alias for native function handlers.
///
/// A native receives the call with its evaluated arguments and returns the
/// script-visible result.
pub type NativeFn = fn(&mut NativeCall<'_>) -> EvalResult<Value>;

/// Everything a native function gets to see.
pub struct NativeCall<'a> {
    /// The native's script-visible name, for diagnostics.
    pub function: &'static str,
    /// Evaluated arguments, left to right.
    pub args:     Vec<Value>,
    /// The environment of the calling code.
    pub env:      &'a mut Environment,
    pub hardware: &'a mut dyn PadHardware,
    /// The source line of the call.
    pub line:     usize,
}

/// Specifies the allowed number of arguments for a native.
///
/// - `Exact(n)` means the native must receive exactly `n` arguments.
/// - `OneOf(slice)` means the native accepts any arity listed in `slice`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    OneOf(&'static [usize]),
}

impl Arity {
    /// Tests whether the given argument count satisfies this arity constraint.
    #[must_use]
    pub fn check(&self, n: usize) -> bool {
        match self {
            Self::Exact(m) => n == *m,
            Self::OneOf(arr) => arr.contains(&n),
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(n) => write!(f, "{n}"),
            Self::OneOf(counts) => {
                for (i, n) in counts.iter().enumerate() {
                    if i + 1 == counts.len() && i > 0 {
                        f.write_str(" or ")?;
                    } else if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{n}")?;
                }
                Ok(())
            },
        }
    }
}

/// A host function exposed to scripts.
///
/// Natives compare equal by name; the table never holds two with one name.
#[derive(Clone, Copy)]
pub struct NativeFunction {
    pub name:  &'static str,
    pub arity: Arity,
    func:      NativeFn,
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFunction")
         .field("name", &self.name)
         .field("arity", &self.arity)
         .finish_non_exhaustive()
    }
}

impl PartialEq for NativeFunction {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for NativeFunction {}

impl NativeFunction {
    /// Checks the argument count, then runs the native.
    ///
    /// # Errors
    /// `ArgumentCountMismatch` if the count is not accepted, otherwise
    /// whatever the native reports.
    pub fn call(&self, mut call: NativeCall<'_>) -> EvalResult<Value> {
        if !self.arity.check(call.args.len()) {
            return Err(RuntimeError::ArgumentCountMismatch { function: self.name,
                                                             expected: self.arity.to_string(),
                                                             found:    call.args.len(),
                                                             line:     call.line, });
        }
        (self.func)(&mut call)
    }
}

/// Defines the native table.
///
/// Each entry provides a script-visible name, an arity specification and the
/// handler. The macro produces `NATIVE_TABLE` (the definitions installed into
/// the global scope) and `NATIVE_FUNCTIONS` (the list of their names).
macro_rules! native_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        static NATIVE_TABLE: &[NativeFunction] = &[
            $(
                NativeFunction { name: $name, arity: $arity, func: $func },
            )*
        ];
        /// Names of every native function, in table order.
        pub const NATIVE_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

native_functions! {
    "print"                         => { arity: Arity::Exact(1), func: output::print },
    "random"                        => { arity: Arity::OneOf(&[1, 2]), func: output::random },
    "playSound"                     => { arity: Arity::OneOf(&[2, 3]), func: sound::play_sound },
    "playSounds"                    => { arity: Arity::OneOf(&[2, 3]), func: sound::play_sounds },
    "playJingle"                    => { arity: Arity::OneOf(&[1, 2]), func: sound::play_jingle },
    "playCorrectActionJingle"       => { arity: Arity::OneOf(&[0, 1]), func: |call| sound::play_fixed_jingle(call, Jingle::Correct) },
    "playWrongActionJingle"         => { arity: Arity::OneOf(&[0, 1]), func: |call| sound::play_fixed_jingle(call, Jingle::Wrong) },
    "playWinnerJingle"              => { arity: Arity::OneOf(&[0, 1]), func: |call| sound::play_fixed_jingle(call, Jingle::Winner) },
    "playLoserJingle"               => { arity: Arity::OneOf(&[0, 1]), func: |call| sound::play_fixed_jingle(call, Jingle::Loser) },
    "waitForPlayerOnPad"            => { arity: Arity::OneOf(&[0, 1]), func: pads::wait_for_player_on_pad },
    "waitForPlayerOnAnyPad"         => { arity: Arity::Exact(0), func: pads::wait_for_player_on_any_pad },
    "waitForPlayersOnAllActivePads" => { arity: Arity::Exact(0), func: pads::wait_for_players_on_all_active_pads },
    "delay"                         => { arity: Arity::Exact(1), func: pads::delay },
    "isPadOccupied"                 => { arity: Arity::Exact(1), func: pads::is_pad_occupied },
}

/// Iterates over every native function, in table order.
pub fn native_functions() -> impl Iterator<Item = NativeFunction> {
    NATIVE_TABLE.iter().copied()
}

impl Interpreter<'_> {
    /// Evaluates a call expression.
    ///
    /// Arguments are evaluated left to right before the callee. The callee
    /// must be a native function, which validates the arguments itself.
    pub(crate) fn eval_call(&mut self,
                            callee: &Expr,
                            args: &[Expr],
                            line: usize,
                            env: &mut Environment)
                            -> EvalResult<Value> {
        let args = args.iter()
                       .map(|arg| self.evaluate_expr(arg, env))
                       .collect::<EvalResult<Vec<_>>>()?;

        let function = match self.evaluate_expr(callee, env)? {
            Value::NativeFunction(function) => function,
            other => return Err(RuntimeError::NotCallable { found: other.kind(),
                                                            line }),
        };

        debug!(function = function.name, args = args.len(), line, "native call");
        function.call(NativeCall { function: function.name,
                                   args,
                                   env,
                                   hardware: &mut *self.hardware,
                                   line })
    }
}
