//! # padscript
//!
//! padscript is the scripting runtime of a pressure-pad game controller,
//! written in Rust. It lexes, parses and evaluates small game scripts that
//! drive pads and audio through a fixed set of native functions.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use tracing::error;

use crate::{
    config::Limits,
    error::{ParseError, RuntimeError},
    hardware::PadHardware,
    interpreter::{
        environment::Environment, evaluator::core::Interpreter, parser::core::produce_tree,
        value::Value,
    },
};

/// Defines the structure of parsed code.
///
/// This module declares the `Program`, `Stmt` and `Expr` types that represent
/// a script as a tree. The tree is built by the parser, traversed by the
/// evaluator and can be dumped as JSON.
///
/// # Responsibilities
/// - Defines statement and expression nodes for all language constructs.
/// - Attaches source lines to nodes for error reporting.
/// - Names node kinds for the array homogeneity check and diagnostics.
pub mod ast;
/// Runtime bounds and the device configuration preamble.
pub mod config;
/// Provides unified error types for parsing and evaluation.
///
/// Parse errors are recoverable diagnostics collected while a script is read.
/// Runtime errors are fatal and abort the running script.
///
/// # Responsibilities
/// - Defines error enums for both severities.
/// - Attaches line numbers and detailed messages for context.
pub mod error;
/// The pad hardware collaborator and a simulated rig implementing it.
pub mod hardware;
/// Buffers script bytes from a transport until the `EOF` marker.
pub mod ingest;
/// Orchestrates lexing, parsing and evaluation.
///
/// # Responsibilities
/// - Coordinates the lexer, parser, evaluator and value types.
/// - Holds the environment and native function bridge.
pub mod interpreter;
/// A long-lived session that keeps one global environment across scripts.
pub mod session;
/// General utilities for safe numeric conversion.
pub mod util;

/// The result of a script that ran to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Execution {
    /// The value of the last top-level statement, or `Null`.
    pub value:       Value,
    /// Recoverable diagnostics reported while lexing and parsing.
    pub diagnostics: Vec<ParseError>,
}

/// Parses and runs one script against a fresh global environment.
///
/// Syntax errors never stop a run: malformed statements are reported in
/// [`Execution::diagnostics`] and skipped, and the remaining statements
/// still execute. A runtime error aborts the script immediately.
///
/// # Parameters
/// - `source`: The script bytes.
/// - `hardware`: The pad rig natives talk to.
/// - `limits`: Token, nesting and evaluation bounds.
///
/// # Errors
/// Returns the fatal [`RuntimeError`] that aborted the script. Nothing runs
/// after it.
///
/// # Examples
/// ```
/// use padscript::{config::Limits, hardware::simulated::SimulatedRig, run_script};
///
/// let mut rig = SimulatedRig::default();
///
/// let execution = run_script(b"let score = 2; print(score * 21);", &mut rig, Limits::default());
/// assert!(execution.is_ok());
/// assert_eq!(rig.output(), ["42"]);
///
/// // 'missing' was never declared.
/// let execution = run_script(b"let y = missing + 1;", &mut rig, Limits::default());
/// assert!(execution.is_err());
/// ```
pub fn run_script(source: &[u8],
                  hardware: &mut dyn PadHardware,
                  limits: Limits)
                  -> Result<Execution, RuntimeError> {
    let mut env = Environment::global();
    execute(source, hardware, limits, &mut env)
}

pub(crate) fn execute(source: &[u8],
                      hardware: &mut dyn PadHardware,
                      limits: Limits,
                      env: &mut Environment)
                      -> Result<Execution, RuntimeError> {
    let parsed = produce_tree(source, &limits);

    let mut interpreter = Interpreter::new(hardware, limits);
    match interpreter.evaluate_program(&parsed.program, env) {
        Ok(value) => Ok(Execution { value,
                                    diagnostics: parsed.diagnostics }),
        Err(err) => {
            error!(error = %err, "script aborted");
            Err(err)
        },
    }
}
