use tracing::debug;

use crate::{
    ast::{Expr, Program},
    config::Limits,
    error::ParseError,
    interpreter::{
        lexer::tokenize,
        parser::{binary::parse_logical, block::parse_or_recover, utils::TokenQueue},
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// The outcome of parsing one script: a best-effort tree plus every
/// recoverable diagnostic, in the order they were reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parsed {
    pub program:     Program,
    pub diagnostics: Vec<ParseError>,
}

/// Lexes and parses a script buffer.
///
/// Parsing never aborts. A malformed statement is reported and skipped by
/// synchronizing to the next statement boundary, so the returned program
/// holds every statement that parsed cleanly.
///
/// # Parameters
/// - `source`: The script bytes.
/// - `limits`: Token and nesting bounds.
///
/// # Returns
/// The program and the diagnostics from both the lexer and the parser.
///
/// # Example
/// ```
/// use padscript::{config::Limits, interpreter::parser::core::produce_tree};
///
/// let parsed = produce_tree(b"let x = 1; let = 2; x;", &Limits::default());
/// assert_eq!(parsed.program.body.len(), 2);
/// assert_eq!(parsed.diagnostics.len(), 1);
/// ```
pub fn produce_tree(source: &[u8], limits: &Limits) -> Parsed {
    let mut diagnostics = Vec::new();
    let tokens = tokenize(source, limits, &mut diagnostics);
    let mut tokens = TokenQueue::new(tokens, diagnostics, *limits);

    let mut body = Vec::new();
    while !tokens.end_of_file() {
        if let Some(stmt) = parse_or_recover(&mut tokens) {
            body.push(stmt);
        }
    }

    let diagnostics = tokens.into_diagnostics();
    debug!(statements = body.len(), diagnostics = diagnostics.len(), "parsed program");

    Parsed { program: Program { body },
             diagnostics }
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing. It begins at the
/// lowest-precedence level, logical `and`/`or`, and descends through the
/// precedence hierarchy. Every entry counts as one nesting level.
///
/// Grammar: `expression := logical`
pub fn parse_expression(tokens: &mut TokenQueue) -> ParseResult<Expr> {
    tokens.nested(parse_logical)
}
