/// Parsing errors.
///
/// Defines all recoverable diagnostics raised while lexing and parsing. They
/// are collected rather than returned, so parsing continues past them.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all fatal errors raised during evaluation, such as division by
/// zero, type mismatches, bad native arguments or a break outside a loop.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
