use thiserror::Error;

use crate::interpreter::value::ValueKind;

/// Represents all fatal errors that can occur during evaluation.
///
/// Any of these aborts the running script. They unwind out of the evaluator
/// unchanged and are handed to the host, which decides what a restart means.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// Tried to use an undeclared variable.
    #[error("Error on line {line}: Cannot resolve variable '{name}'.")]
    UnknownVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Declared a name twice in the same scope.
    #[error("Error on line {line}: Variable '{name}' is already declared in this scope.")]
    Redeclaration {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Assigned to a binding marked constant.
    #[error("Error on line {line}: Cannot reassign constant '{name}'.")]
    ConstantReassignment {
        /// The name of the constant.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A binary or logical operator applied to two different kinds.
    #[error("Error on line {line}: Cannot apply '{operator}' to {left} and {right}.")]
    TypeMismatch {
        /// The operator symbol.
        operator: &'static str,
        /// Kind of the left operand.
        left:     ValueKind,
        /// Kind of the right operand.
        right:    ValueKind,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// An operator that a kind does not support, such as `<` on strings.
    #[error("Error on line {line}: Operator '{operator}' is not supported for {kind}.")]
    UnsupportedOperator {
        /// The operator symbol.
        operator: &'static str,
        /// Kind of both operands.
        kind:     ValueKind,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// A test or operand that had to be Boolean.
    #[error("Error on line {line}: Expected Boolean in {context}, found {found}.")]
    ExpectedBoolean {
        /// The construct that required a Boolean.
        context: &'static str,
        /// Kind of the value found.
        found:   ValueKind,
        /// The source line where the error occurred.
        line:    usize,
    },
    #[error("Error on line {line}: Division by zero.")]
    DivisionByZero {
        /// The source line where the error occurred.
        line: usize,
    },
    #[error("Error on line {line}: Integer overflow while trying to compute result.")]
    Overflow {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Called something that is not a native function.
    #[error("Error on line {line}: {found} is not callable.")]
    NotCallable {
        /// Kind of the callee value.
        found: ValueKind,
        /// The source line where the error occurred.
        line:  usize,
    },
    #[error("Error on line {line}: '{function}' expects {expected} argument(s), found {found}.")]
    ArgumentCountMismatch {
        /// The native function name.
        function: &'static str,
        /// The accepted argument counts.
        expected: String,
        /// The number of arguments supplied.
        found:    usize,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// An argument of the wrong kind or out of its accepted range.
    #[error("Error on line {line}: Invalid argument to '{function}': {details}.")]
    InvalidArgument {
        /// The native function name.
        function: &'static str,
        /// Details about why the argument is invalid.
        details:  String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// A member access on a value or with a key kind that does not support it.
    #[error("Error on line {line}: Invalid member access: {details}.")]
    InvalidMemberAccess {
        /// Details about the container and key involved.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    #[error("Error on line {line}: Index out of bounds. Length is {len}, but found {found} instead.")]
    IndexOutOfBounds {
        /// Length of the array.
        len:   usize,
        /// The index used.
        found: i32,
        /// The source line where the error occurred.
        line:  usize,
    },
    #[error("Error on line {line}: Object has no property '{name}'.")]
    UnknownProperty {
        /// The missing key.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Assignment through a member chain that does not end in a variable.
    #[error("Error on line {line}: Assignment target must be a variable or a member of one.")]
    InvalidAssignmentTarget {
        /// The source line where the error occurred.
        line: usize,
    },
    #[error("Error on line {line}: A break statement may only be used within a loop.")]
    BreakOutsideLoop {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Evaluation recursed past the configured depth.
    #[error("Error on line {line}: Evaluation exceeds the maximum depth of {limit}.")]
    DepthExceeded {
        /// The configured evaluation depth limit.
        limit: usize,
        /// The source line where the error occurred.
        line:  usize,
    },
}
