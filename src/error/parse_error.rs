use thiserror::Error;

use crate::ast::NodeKind;

/// Represents all recoverable errors that can occur during lexing or parsing.
///
/// None of these abort a parse. The lexer skips the offending input and the
/// parser synchronizes to the next statement boundary, so a script with only
/// this class of error still produces a best-effort tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A character that starts no token.
    #[error("Error on line {line}: Unrecognized character '{character}'.")]
    UnrecognizedCharacter {
        /// The skipped character.
        character: char,
        /// The source line where the error occurred.
        line:      usize,
    },
    /// A string literal without its closing quote.
    #[error("Error on line {line}: Unterminated string literal.")]
    UnterminatedString {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A numeric literal that does not fit a Number.
    #[error("Error on line {line}: Literal '{literal}' is too large.")]
    LiteralTooLarge {
        /// The literal as written.
        literal: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// The lexer stopped because the token limit was reached.
    #[error("Error on line {line}: Script exceeds the limit of {limit} tokens.")]
    TooManyTokens {
        /// The configured token limit.
        limit: usize,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A specific token was required but something else was found.
    #[error("Error on line {line}: Expected {expected}, found '{found}'.")]
    Expected {
        /// Description of what was required.
        expected: &'static str,
        /// The lexeme found instead.
        found:    String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// Found a token that cannot start an expression.
    #[error("Error on line {line}: Unexpected token: {token}.")]
    UnexpectedToken {
        /// The token encountered.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Reached the end of input unexpectedly.
    #[error("Error on line {line}: Unexpected end of input.")]
    UnexpectedEndOfInput {
        /// The source line where the error occurred.
        line: usize,
    },
    /// `const name;` without a value.
    #[error("Error on line {line}: Constant '{name}' must be assigned a value.")]
    ConstWithoutInitializer {
        /// The name of the constant.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// The left side of `=` is neither an identifier nor a member expression.
    #[error("Error on line {line}: Invalid assignment target {found}.")]
    InvalidAssignmentTarget {
        /// Kind of the node found on the left side.
        found: NodeKind,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// An array literal element of a different kind than the first element.
    #[error("Error on line {line}: Array elements must all be {expected}, found {found}.")]
    MixedArrayElements {
        /// Kind of the first element.
        expected: NodeKind,
        /// Kind of the offending element.
        found:    NodeKind,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// `.` followed by something other than an identifier.
    #[error("Error on line {line}: Expected an identifier after '.', found {found}.")]
    InvalidMemberProperty {
        /// Kind of the node found after the dot.
        found: NodeKind,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Nesting of blocks and expressions went past the configured depth.
    #[error("Error on line {line}: Nesting exceeds the maximum depth of {limit}.")]
    NestingTooDeep {
        /// The configured nesting limit.
        limit: usize,
        /// The source line where the error occurred.
        line:  usize,
    },
}

impl ParseError {
    /// Returns the source line the diagnostic points at.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::UnrecognizedCharacter { line, .. }
            | Self::UnterminatedString { line }
            | Self::LiteralTooLarge { line, .. }
            | Self::TooManyTokens { line, .. }
            | Self::Expected { line, .. }
            | Self::UnexpectedToken { line, .. }
            | Self::UnexpectedEndOfInput { line }
            | Self::ConstWithoutInitializer { line, .. }
            | Self::InvalidAssignmentTarget { line, .. }
            | Self::MixedArrayElements { line, .. }
            | Self::InvalidMemberProperty { line, .. }
            | Self::NestingTooDeep { line, .. } => *line,
        }
    }
}
