use crate::{
    ast::{Expr, NodeKind},
    error::ParseError,
    interpreter::{
        lexer::TokenKind,
        parser::{
            core::{ParseResult, parse_expression},
            utils::{TokenQueue, parse_comma_separated},
        },
    },
};

/// Parses a member expression optionally followed by one call.
///
/// Grammar: `call := member ("(" arguments ")")?`
pub fn parse_call_member(tokens: &mut TokenQueue) -> ParseResult<Expr> {
    let callee = parse_member(tokens)?;
    if !tokens.check(TokenKind::LParen) {
        return Ok(callee);
    }

    let line = tokens.eat().line;
    let args = parse_comma_separated(tokens,
                                     parse_expression,
                                     TokenKind::RParen,
                                     "',' or ')' after a call argument")?;

    Ok(Expr::Call { callee: Box::new(callee),
                    args,
                    line })
}

/// Parses chains of `.name` and `[expr]` accesses, left to right.
///
/// Grammar: `member := primary ("." identifier | "[" expression "]")*`
///
/// # Errors
/// `InvalidMemberProperty` when a `.` is followed by anything other than an
/// identifier.
pub fn parse_member(tokens: &mut TokenQueue) -> ParseResult<Expr> {
    let object = parse_primary(tokens)?;
    extend_member(tokens, object)
}

/// Adds the next `.name` or `[expr]` access to `object`. Each access counts
/// as one nesting level.
fn extend_member(tokens: &mut TokenQueue, object: Expr) -> ParseResult<Expr> {
    let computed = match tokens.at().kind {
        TokenKind::Dot => false,
        TokenKind::LBracket => true,
        _ => return Ok(object),
    };
    let line = tokens.eat().line;

    tokens.nested(|tokens| {
              let property = if computed {
                  let property = parse_expression(tokens)?;
                  tokens.expect(TokenKind::RBracket, "']' after a computed member")?;
                  property
              } else {
                  let property = parse_primary(tokens)?;
                  if property.kind() != NodeKind::Identifier {
                      return Err(ParseError::InvalidMemberProperty { found: property.kind(),
                                                                     line });
                  }
                  property
              };

              let object = Expr::Member { object: Box::new(object),
                                          property: Box::new(property),
                                          computed,
                                          line };
              extend_member(tokens, object)
          })
}

/// Parses a primary expression: an identifier, a numeric or string literal,
/// or a parenthesized expression.
///
/// # Errors
/// - `LiteralTooLarge` if a numeric literal does not fit a Number.
/// - `UnexpectedEndOfInput` at the end of the input.
/// - `UnexpectedToken` for any other token.
pub fn parse_primary(tokens: &mut TokenQueue) -> ParseResult<Expr> {
    match tokens.at().kind {
        TokenKind::Identifier => {
            let token = tokens.eat();
            Ok(Expr::Identifier { name: token.lexeme,
                                  line: token.line })
        },
        TokenKind::Number => {
            let token = tokens.eat();
            let value = token.lexeme
                             .parse::<i32>()
                             .map_err(|_| ParseError::LiteralTooLarge { literal: token.lexeme.clone(),
                                                                        line:    token.line, })?;
            Ok(Expr::NumericLiteral { value,
                                      line: token.line })
        },
        TokenKind::String | TokenKind::UnterminatedString => {
            let token = tokens.eat();
            let inner = token.lexeme.strip_prefix('"').unwrap_or(&token.lexeme);
            let inner = if token.kind == TokenKind::String {
                inner.strip_suffix('"').unwrap_or(inner)
            } else {
                inner
            };
            Ok(Expr::StringLiteral { value: inner.to_string(),
                                     line:  token.line, })
        },
        TokenKind::LParen => {
            tokens.eat();
            let expr = parse_expression(tokens)?;
            tokens.expect(TokenKind::RParen, "')' to close the parenthesis")?;
            Ok(expr)
        },
        TokenKind::EndOfFile => Err(ParseError::UnexpectedEndOfInput { line: tokens.at().line }),
        _ => {
            let token = tokens.at();
            Err(ParseError::UnexpectedToken { token: format!("'{}'", token.lexeme),
                                              line:  token.line, })
        },
    }
}
