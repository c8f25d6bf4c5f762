/// Core evaluation logic.
///
/// Contains the `Interpreter`, statement and expression dispatch, and the
/// evaluation depth guard.
pub mod core;

/// Statement evaluation.
///
/// Implements declarations, `if`, `while` and blocks, including how a break
/// value travels from a block to its loop.
pub mod statement;

/// Object and array literal construction.
pub mod literal;

/// Binary and logical operator evaluation.
///
/// Implements integer arithmetic, comparisons and equality, and reports
/// operands of mismatched kinds.
pub mod binary;

/// Member access and assignment.
///
/// Reads through `.name` and `[expr]`, and writes back through the
/// read-modify-rebind path that keeps values copy-valued.
pub mod member;

/// Native function calls.
///
/// Holds the fixed table of host functions and every native's argument
/// handling.
pub mod function;
