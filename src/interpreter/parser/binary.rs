use crate::{
    ast::{BinaryOperator, Expr, LogicalOperator, NodeKind},
    error::ParseError,
    interpreter::{
        lexer::TokenKind,
        parser::{
            core::ParseResult,
            literal::parse_object,
            primary::parse_call_member,
            utils::TokenQueue,
        },
    },
};

/// Parses `and` / `or` chains.
///
/// Both operators share one level and associate to the right:
/// `a and b or c` parses as `a and (b or c)`.
///
/// The rule is: `logical := relational (("and" | "or") logical)?`
pub fn parse_logical(tokens: &mut TokenQueue) -> ParseResult<Expr> {
    let left = parse_relational(tokens)?;

    let operator = match tokens.at().kind {
        TokenKind::And => LogicalOperator::And,
        TokenKind::Or => LogicalOperator::Or,
        _ => return Ok(left),
    };
    let line = tokens.eat().line;
    let right = tokens.nested(parse_logical)?;

    Ok(Expr::Logical { left: Box::new(left),
                       operator,
                       right: Box::new(right),
                       line })
}

/// Parses a single relational comparison.
///
/// Relational operators do not chain. Both operands are parsed at the
/// assignment level, so in `a < b < c` the second `<` is left for the
/// caller, which then reports it.
///
/// The rule is: `relational := assignment (relop assignment)?`
pub fn parse_relational(tokens: &mut TokenQueue) -> ParseResult<Expr> {
    let left = parse_assignment(tokens)?;

    let Some(operator) = relational_operator(tokens.at().kind) else {
        return Ok(left);
    };
    let line = tokens.eat().line;
    let right = parse_assignment(tokens)?;

    Ok(Expr::Binary { left: Box::new(left),
                      operator,
                      right: Box::new(right),
                      line })
}

/// Parses assignments, which associate to the right: `a = b = 1`.
///
/// The rule is: `assignment := object ("=" assignment)?`
///
/// # Errors
/// `InvalidAssignmentTarget` if the left side is neither an identifier nor a
/// member expression.
pub fn parse_assignment(tokens: &mut TokenQueue) -> ParseResult<Expr> {
    let assignee = parse_object(tokens)?;
    if !tokens.check(TokenKind::Equals) {
        return Ok(assignee);
    }

    let line = tokens.eat().line;
    if !matches!(assignee.kind(), NodeKind::Identifier | NodeKind::MemberExpr) {
        return Err(ParseError::InvalidAssignmentTarget { found: assignee.kind(),
                                                         line });
    }
    let value = tokens.nested(parse_assignment)?;

    Ok(Expr::Assignment { assignee: Box::new(assignee),
                          value: Box::new(value),
                          line })
}

/// Parses addition and subtraction.
///
/// The rule is: `additive := multiplicative (("+" | "-") multiplicative)*`
pub fn parse_additive(tokens: &mut TokenQueue) -> ParseResult<Expr> {
    parse_left_associative(tokens, parse_multiplicative, |kind| match kind {
        TokenKind::Plus => Some(BinaryOperator::Add),
        TokenKind::Minus => Some(BinaryOperator::Subtract),
        _ => None,
    })
}

/// Parses multiplication, division and modulo.
///
/// The rule is: `multiplicative := call (("*" | "/" | "%") call)*`
pub fn parse_multiplicative(tokens: &mut TokenQueue) -> ParseResult<Expr> {
    parse_left_associative(tokens, parse_call_member, |kind| match kind {
        TokenKind::Star => Some(BinaryOperator::Multiply),
        TokenKind::Slash => Some(BinaryOperator::Divide),
        TokenKind::Percent => Some(BinaryOperator::Modulo),
        _ => None,
    })
}

fn parse_left_associative(tokens: &mut TokenQueue,
                          operand: fn(&mut TokenQueue) -> ParseResult<Expr>,
                          operator: fn(TokenKind) -> Option<BinaryOperator>)
                          -> ParseResult<Expr> {
    let left = operand(tokens)?;
    extend_left_associative(tokens, left, operand, operator)
}

/// Adds the next `operator operand` link to a left-associative chain.
///
/// Every link deepens the tree by one level, so a long chain such as
/// `1 + 1 + ... + 1` runs into the nesting limit just like deep parentheses
/// do.
fn extend_left_associative(tokens: &mut TokenQueue,
                           left: Expr,
                           operand: fn(&mut TokenQueue) -> ParseResult<Expr>,
                           operator: fn(TokenKind) -> Option<BinaryOperator>)
                           -> ParseResult<Expr> {
    let Some(op) = operator(tokens.at().kind) else {
        return Ok(left);
    };
    let line = tokens.eat().line;

    tokens.nested(|tokens| {
              let right = operand(tokens)?;
              let left = Expr::Binary { left: Box::new(left),
                                        operator: op,
                                        right: Box::new(right),
                                        line };
              extend_left_associative(tokens, left, operand, operator)
          })
}

const fn relational_operator(kind: TokenKind) -> Option<BinaryOperator> {
    match kind {
        TokenKind::Less => Some(BinaryOperator::Less),
        TokenKind::LessEqual => Some(BinaryOperator::LessEqual),
        TokenKind::Greater => Some(BinaryOperator::Greater),
        TokenKind::GreaterEqual => Some(BinaryOperator::GreaterEqual),
        TokenKind::EqualEqual => Some(BinaryOperator::Equal),
        TokenKind::BangEqual => Some(BinaryOperator::NotEqual),
        _ => None,
    }
}
