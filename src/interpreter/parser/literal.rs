use std::collections::BTreeMap;

use crate::{
    ast::Expr,
    error::ParseError,
    interpreter::{
        lexer::TokenKind,
        parser::{
            binary::parse_additive,
            core::{ParseResult, parse_expression},
            utils::{TokenQueue, parse_comma_separated, parse_identifier},
        },
    },
};

/// Parses an object literal, or falls through to the array level.
///
/// Properties are `key: value` or a bare `key`, which declares the property
/// with a null value. A repeated key keeps its last value.
///
/// Grammar: `object := "{" (property ("," property)* ","?)? "}" | array`
/// where `property := identifier (":" expression)?`
pub fn parse_object(tokens: &mut TokenQueue) -> ParseResult<Expr> {
    if !tokens.check(TokenKind::LBrace) {
        return parse_array(tokens);
    }
    let line = tokens.eat().line;

    let mut properties = BTreeMap::new();
    while !tokens.end_of_file() && !tokens.check(TokenKind::RBrace) {
        let key = parse_identifier(tokens, "an identifier as object key")?;

        if tokens.check(TokenKind::Comma) || tokens.check(TokenKind::RBrace) {
            if tokens.check(TokenKind::Comma) {
                tokens.eat();
            }
            properties.insert(key, None);
            continue;
        }

        tokens.expect(TokenKind::Colon, "':' or ',' after an object key")?;
        let value = parse_expression(tokens)?;
        properties.insert(key, Some(value));

        if !tokens.check(TokenKind::RBrace) {
            tokens.expect(TokenKind::Comma, "',' or '}' after an object property")?;
        }
    }
    tokens.expect(TokenKind::RBrace, "'}' to end an object literal")?;

    Ok(Expr::ObjectLiteral { properties, line })
}

/// Parses an array literal, or falls through to the additive level.
///
/// Every element must be the same kind of syntax node as the first, so
/// `[1, 2]` is accepted while `[1, "x"]` and `[1, a]` are not.
///
/// Grammar: `array := "[" (expression ("," expression)* ","?)? "]" | additive`
///
/// # Errors
/// `MixedArrayElements` naming the first element's kind and the offending
/// one.
pub fn parse_array(tokens: &mut TokenQueue) -> ParseResult<Expr> {
    if !tokens.check(TokenKind::LBracket) {
        return parse_additive(tokens);
    }
    let line = tokens.eat().line;

    let mut element_kind = None;
    let elements = parse_comma_separated(tokens,
                                         |tokens| {
                                             let element = parse_expression(tokens)?;
                                             match element_kind {
                                                 None => element_kind = Some(element.kind()),
                                                 Some(expected) if expected != element.kind() => {
                                                     return Err(ParseError::MixedArrayElements {
                                                         expected,
                                                         found: element.kind(),
                                                         line: element.line(),
                                                     });
                                                 },
                                                 Some(_) => {},
                                             }
                                             Ok(element)
                                         },
                                         TokenKind::RBracket,
                                         "',' or ']' after an array element")?;

    Ok(Expr::ArrayLiteral { elements,
                            element_kind,
                            line })
}
