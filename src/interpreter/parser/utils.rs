use std::collections::VecDeque;

use tracing::warn;

use crate::{
    config::Limits,
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::core::ParseResult,
    },
};

/// The parser's view of the token queue.
///
/// Tokens are consumed front to back exactly once. The end-of-file token is
/// never dequeued, so reading past the end keeps returning it instead of
/// failing. The queue also carries the diagnostic channel and the nesting
/// counters used for recovery and the depth guard.
pub struct TokenQueue {
    tokens:        VecDeque<Token>,
    end:           Token,
    diagnostics:   Vec<ParseError>,
    limits:        Limits,
    nesting_depth: usize,
    block_depth:   usize,
}

impl TokenQueue {
    /// Wraps a lexed queue together with the diagnostics the lexer reported.
    #[must_use]
    pub fn new(tokens: VecDeque<Token>, diagnostics: Vec<ParseError>, limits: Limits) -> Self {
        let end = match tokens.back() {
            Some(token) if token.kind == TokenKind::EndOfFile => token.clone(),
            Some(token) => Token::end_of_file(token.line),
            None => Token::end_of_file(1),
        };
        Self { tokens,
               end,
               diagnostics,
               limits,
               nesting_depth: 0,
               block_depth: 0 }
    }

    /// The current token, without consuming it.
    #[must_use]
    pub fn at(&self) -> &Token {
        self.tokens.front().unwrap_or(&self.end)
    }

    #[must_use]
    pub fn check(&self, kind: TokenKind) -> bool {
        self.at().kind == kind
    }

    #[must_use]
    pub fn end_of_file(&self) -> bool {
        self.check(TokenKind::EndOfFile)
    }

    /// Number of tokens left, used to tell whether a failed statement made
    /// any progress.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.tokens.len()
    }

    /// Consumes and returns the current token. At the end of input this
    /// returns the end-of-file token and leaves it in place.
    pub fn eat(&mut self) -> Token {
        if self.end_of_file() {
            return self.end.clone();
        }
        self.tokens.pop_front().unwrap_or_else(|| self.end.clone())
    }

    /// Consumes the current token if it has the given kind.
    ///
    /// # Parameters
    /// - `kind`: The required token kind.
    /// - `expected`: What the caller wanted, for the diagnostic.
    ///
    /// # Errors
    /// `Expected` naming what was found. The offending token is left in the
    /// queue so recovery can inspect it.
    pub fn expect(&mut self, kind: TokenKind, expected: &'static str) -> ParseResult<Token> {
        if self.check(kind) {
            return Ok(self.eat());
        }
        let found = self.at();
        Err(ParseError::Expected { expected,
                                   found: found.lexeme.clone(),
                                   line: found.line })
    }

    /// Pushes a recoverable diagnostic.
    pub fn report(&mut self, error: ParseError) {
        warn!(%error, "parser diagnostic");
        self.diagnostics.push(error);
    }

    /// Discards tokens until a safe restart point.
    ///
    /// Stops after a `;`, or before a statement keyword or the end of input.
    /// Inside a block it also stops before `}` so the block keeps its
    /// closing brace.
    pub fn synchronize(&mut self) {
        while !self.end_of_file() {
            match self.at().kind {
                TokenKind::Semicolon => {
                    self.eat();
                    return;
                },
                TokenKind::Let
                | TokenKind::Const
                | TokenKind::If
                | TokenKind::While
                | TokenKind::Break
                | TokenKind::Else => return,
                TokenKind::RBrace if self.block_depth > 0 => return,
                _ => {
                    self.eat();
                },
            }
        }
    }

    /// Runs `parse` one nesting level deeper.
    ///
    /// # Errors
    /// `NestingTooDeep` once the configured depth would be exceeded, plus
    /// whatever `parse` reports.
    pub fn nested<T>(&mut self, parse: impl FnOnce(&mut Self) -> ParseResult<T>) -> ParseResult<T> {
        if self.nesting_depth >= self.limits.max_nesting_depth {
            return Err(ParseError::NestingTooDeep { limit: self.limits.max_nesting_depth,
                                                    line:  self.at().line, });
        }
        self.nesting_depth += 1;
        let result = parse(self);
        self.nesting_depth -= 1;
        result
    }

    /// Like [`TokenQueue::nested`], and additionally marks the tokens parsed
    /// by `parse` as being inside a block.
    pub fn within_block<T>(&mut self, parse: impl FnOnce(&mut Self) -> ParseResult<T>) -> ParseResult<T> {
        self.nested(|tokens| {
                tokens.block_depth += 1;
                let result = parse(tokens);
                tokens.block_depth -= 1;
                result
            })
    }

    /// Hands back every diagnostic collected while lexing and parsing.
    #[must_use]
    pub fn into_diagnostics(self) -> Vec<ParseError> {
        self.diagnostics
    }
}

/// Parses a comma-separated list of items until a closing token.
///
/// Shared by array literals and call arguments. An immediately encountered
/// closing token gives an empty list, and a trailing comma before the
/// closing token is accepted.
///
/// Grammar (simplified): `list := (item ("," item)* ","?)? closing`
///
/// # Parameters
/// - `tokens`: Queue positioned at the first item or the closing token.
/// - `parse_item`: Function used to parse each element.
/// - `closing`: The token that ends the list.
/// - `expected`: Diagnostic text for a missing separator.
///
/// # Errors
/// Returns a `ParseError` if an item fails to parse or an item is followed by
/// neither a comma nor the closing token.
pub(in crate::interpreter::parser) fn parse_comma_separated<T>(
    tokens: &mut TokenQueue,
    mut parse_item: impl FnMut(&mut TokenQueue) -> ParseResult<T>,
    closing: TokenKind,
    expected: &'static str)
    -> ParseResult<Vec<T>> {
    let mut items = Vec::new();
    while !tokens.end_of_file() && !tokens.check(closing) {
        items.push(parse_item(tokens)?);
        if tokens.check(TokenKind::Comma) {
            tokens.eat();
        } else if !tokens.check(closing) {
            let found = tokens.at();
            return Err(ParseError::Expected { expected,
                                              found: found.lexeme.clone(),
                                              line: found.line });
        }
    }
    tokens.expect(closing, expected)?;
    Ok(items)
}

/// Parses a plain identifier and returns its name.
///
/// # Errors
/// `Expected` if the current token is not an identifier.
pub(in crate::interpreter::parser) fn parse_identifier(tokens: &mut TokenQueue,
                                                       expected: &'static str)
                                                       -> ParseResult<String> {
    Ok(tokens.expect(TokenKind::Identifier, expected)?.lexeme)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::lexer::tokenize;

    fn queue(source: &str) -> TokenQueue {
        let mut diagnostics = Vec::new();
        let tokens = tokenize(source.as_bytes(), &Limits::default(), &mut diagnostics);
        TokenQueue::new(tokens, diagnostics, Limits::default())
    }

    #[test]
    fn eat_never_passes_the_end() {
        let mut tokens = queue("x");
        assert_eq!(tokens.eat().kind, TokenKind::Identifier);
        assert_eq!(tokens.eat().kind, TokenKind::EndOfFile);
        assert_eq!(tokens.eat().kind, TokenKind::EndOfFile);
        assert!(tokens.end_of_file());
    }

    #[test]
    fn expect_leaves_the_offending_token() {
        let mut tokens = queue("1 2");
        tokens.eat();
        assert!(tokens.expect(TokenKind::Semicolon, "';'").is_err());
        assert_eq!(tokens.at().lexeme, "2");
    }

    #[test]
    fn synchronize_stops_after_semicolon_and_before_keywords() {
        let mut tokens = queue("a b ; c");
        tokens.synchronize();
        assert_eq!(tokens.at().lexeme, "c");

        let mut tokens = queue("a b while");
        tokens.synchronize();
        assert!(tokens.check(TokenKind::While));
    }

    #[test]
    fn synchronize_respects_block_braces() {
        let mut tokens = queue("a } b");
        tokens.synchronize();
        assert!(tokens.end_of_file());

        let mut tokens = queue("a } b");
        let stopped_at = tokens.within_block(|tokens| {
                                   tokens.synchronize();
                                   Ok(tokens.at().kind)
                               });
        assert_eq!(stopped_at, Ok(TokenKind::RBrace));
    }

    #[test]
    fn nesting_is_bounded() {
        let mut tokens = TokenQueue::new(VecDeque::new(),
                                         Vec::new(),
                                         Limits { max_nesting_depth: 2,
                                                  ..Limits::default() });
        fn dive(tokens: &mut TokenQueue) -> ParseResult<()> {
            tokens.nested(dive)
        }
        assert!(matches!(dive(&mut tokens), Err(ParseError::NestingTooDeep { limit: 2, .. })));
    }
}
