use crate::{
    ast::{Block, Stmt},
    interpreter::{
        lexer::TokenKind,
        parser::{core::ParseResult, statement::parse_statement, utils::TokenQueue},
    },
};

/// Parses one statement, recovering from a syntax error.
///
/// On failure the error is reported and the queue is synchronized to the
/// next statement boundary. A statement that failed without consuming
/// anything first loses its offending token, so recovery always advances.
///
/// # Returns
/// The statement, or `None` when it was malformed and skipped.
pub(in crate::interpreter::parser) fn parse_or_recover(tokens: &mut TokenQueue) -> Option<Stmt> {
    let before = tokens.remaining();
    match parse_statement(tokens) {
        Ok(stmt) => Some(stmt),
        Err(error) => {
            tokens.report(error);
            if tokens.remaining() == before {
                tokens.eat();
            }
            tokens.synchronize();
            None
        },
    }
}

/// Parses a brace-delimited block.
///
/// Statements inside the block recover individually, so one malformed
/// statement does not discard its siblings.
///
/// Grammar: `block := "{" statement* "}"`
///
/// # Errors
/// - `Expected` if the opening or closing brace is missing.
/// - `NestingTooDeep` if blocks are nested past the configured depth.
pub fn parse_block(tokens: &mut TokenQueue) -> ParseResult<Block> {
    let line = tokens.expect(TokenKind::LBrace, "'{' to start a block")?.line;

    tokens.within_block(|tokens| {
              let mut body = Vec::new();
              while !tokens.end_of_file() && !tokens.check(TokenKind::RBrace) {
                  if let Some(stmt) = parse_or_recover(tokens) {
                      body.push(stmt);
                  }
              }
              tokens.expect(TokenKind::RBrace, "'}' to end a block")?;

              Ok(Block { body, line })
          })
}
