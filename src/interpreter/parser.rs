/// Parser entry points.
///
/// Contains `produce_tree`, the `ParseResult` alias and the top of the
/// expression grammar.
pub mod core;

/// Logical, relational, assignment and arithmetic levels of the precedence
/// chain.
pub mod binary;

/// Object and array literals, including the array homogeneity check.
pub mod literal;

/// Calls, member access chains and primary expressions.
pub mod primary;

/// Block parsing and per-statement error recovery.
pub mod block;

/// Statement parsing.
///
/// Implements declarations, `if`, `while`, `break` and expression
/// statements.
pub mod statement;

/// The token queue, synchronization and shared list helpers.
pub mod utils;
