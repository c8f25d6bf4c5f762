use crate::{
    ast::Stmt,
    error::ParseError,
    interpreter::{
        lexer::TokenKind,
        parser::{
            block::parse_block,
            core::{ParseResult, parse_expression},
            utils::{TokenQueue, parse_identifier},
        },
    },
};

/// Parses a single statement.
///
/// Dispatches on the leading token:
/// - `let` / `const` for declarations,
/// - `if` and `while` for control flow,
/// - `break`,
/// - `{` for a nested block,
/// - anything else as an expression statement terminated by `;`.
///
/// # Errors
/// Propagates the first syntax error; the caller is responsible for
/// recovery.
pub fn parse_statement(tokens: &mut TokenQueue) -> ParseResult<Stmt> {
    match tokens.at().kind {
        TokenKind::Let | TokenKind::Const => parse_var_declaration(tokens),
        TokenKind::If => parse_if(tokens),
        TokenKind::While => parse_while(tokens),
        TokenKind::Break => parse_break(tokens),
        TokenKind::LBrace => Ok(Stmt::Block(parse_block(tokens)?)),
        _ => {
            let expr = parse_expression(tokens)?;
            tokens.expect(TokenKind::Semicolon, "';' after an expression")?;
            Ok(Stmt::Expression { expr })
        },
    }
}

/// Parses `let name;`, `let name = value;` or `const name = value;`.
///
/// # Errors
/// `ConstWithoutInitializer` for `const name;`. The `;` is left in the queue
/// so recovery ends right after this statement.
fn parse_var_declaration(tokens: &mut TokenQueue) -> ParseResult<Stmt> {
    let keyword = tokens.eat();
    let constant = keyword.kind == TokenKind::Const;
    let line = keyword.line;
    let name = parse_identifier(tokens, "an identifier after 'let' or 'const'")?;

    if tokens.check(TokenKind::Semicolon) {
        if constant {
            return Err(ParseError::ConstWithoutInitializer { name, line });
        }
        tokens.eat();
        return Ok(Stmt::VarDeclaration { name,
                                         constant,
                                         value: None,
                                         line });
    }

    tokens.expect(TokenKind::Equals, "'=' or ';' after the variable name")?;
    let value = parse_expression(tokens)?;
    tokens.expect(TokenKind::Semicolon, "';' after the declaration")?;

    Ok(Stmt::VarDeclaration { name,
                              constant,
                              value: Some(value),
                              line })
}

/// Parses `if (test) { ... }` with an optional `else { ... }`.
///
/// Only a block may follow `else`; chains are written as a nested `if`
/// inside the alternate block.
fn parse_if(tokens: &mut TokenQueue) -> ParseResult<Stmt> {
    let line = tokens.eat().line;
    tokens.expect(TokenKind::LParen, "'(' after 'if'")?;
    let test = parse_expression(tokens)?;
    tokens.expect(TokenKind::RParen, "')' after the if test")?;

    let consequent = parse_block(tokens)?;
    let alternate = if tokens.check(TokenKind::Else) {
        tokens.eat();
        Some(parse_block(tokens)?)
    } else {
        None
    };

    Ok(Stmt::If { test,
                  consequent,
                  alternate,
                  line })
}

fn parse_while(tokens: &mut TokenQueue) -> ParseResult<Stmt> {
    let line = tokens.eat().line;
    tokens.expect(TokenKind::LParen, "'(' after 'while'")?;
    let test = parse_expression(tokens)?;
    tokens.expect(TokenKind::RParen, "')' after the while test")?;
    let body = parse_block(tokens)?;

    Ok(Stmt::While { test, body, line })
}

fn parse_break(tokens: &mut TokenQueue) -> ParseResult<Stmt> {
    let line = tokens.eat().line;
    tokens.expect(TokenKind::Semicolon, "';' after 'break'")?;
    Ok(Stmt::Break { line })
}
