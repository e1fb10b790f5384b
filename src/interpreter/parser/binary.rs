use std::iter::Peekable;

use crate::{
    ast::{AstNode, BinaryOp},
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseCtx, ParseResult},
            unary::parse_unary,
        },
    },
};

/// Maps a token to its corresponding binary operator.
///
/// Returns `None` for all tokens that are not infix operators.
///
/// # Example
/// ```
/// use algom::{ast::BinaryOp, interpreter::{lexer::Token, parser::binary::token_to_binary_op}};
///
/// assert_eq!(token_to_binary_op(&Token::Plus), Some(BinaryOp::Add));
/// assert_eq!(token_to_binary_op(&Token::Comma), None);
/// ```
#[must_use]
pub const fn token_to_binary_op(token: &Token) -> Option<BinaryOp> {
    match token {
        Token::Plus => Some(BinaryOp::Add),
        Token::Minus => Some(BinaryOp::Sub),
        Token::Star => Some(BinaryOp::Mul),
        Token::Slash => Some(BinaryOp::Div),
        Token::Caret => Some(BinaryOp::Pow),
        Token::Mod => Some(BinaryOp::Mod),
        Token::Percent | Token::Rem => Some(BinaryOp::Rem),
        Token::Div => Some(BinaryOp::Quot),
        Token::Less => Some(BinaryOp::Lt),
        Token::Greater => Some(BinaryOp::Gt),
        Token::LessEqual => Some(BinaryOp::Lte),
        Token::GreaterEqual => Some(BinaryOp::Gte),
        Token::EqualEqual => Some(BinaryOp::Eq),
        Token::BangEqual => Some(BinaryOp::Neq),
        Token::And => Some(BinaryOp::And),
        Token::Or => Some(BinaryOp::Or),
        Token::Xor => Some(BinaryOp::Xor),
        Token::Nand => Some(BinaryOp::Nand),
        Token::Nor => Some(BinaryOp::Nor),
        Token::Xnor => Some(BinaryOp::Xnor),
        _ => None,
    }
}

/// Parses one left-associative precedence level: `next ((ops) next)*`.
fn parse_level<'a, I>(tokens: &mut Peekable<I>,
                      ctx: &mut ParseCtx,
                      ops: &[BinaryOp],
                      next: fn(&mut Peekable<I>, &mut ParseCtx) -> ParseResult<AstNode>)
                      -> ParseResult<AstNode>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = next(tokens, ctx)?;
    loop {
        let op = match tokens.peek() {
            Some((token, _)) => match token_to_binary_op(token) {
                Some(op) if ops.contains(&op) => op,
                _ => break,
            },
            None => break,
        };
        tokens.next();
        let right = next(tokens, ctx)?;
        left = AstNode::binex(left, op, right);
    }
    Ok(left)
}

/// Parses logical OR expressions.
///
/// Grammar: `logical_or := logical_xor (("or" | "nor") logical_xor)*`
pub fn parse_logical_or<'a, I>(tokens: &mut Peekable<I>, ctx: &mut ParseCtx)
                               -> ParseResult<AstNode>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_level(tokens, ctx, &[BinaryOp::Or, BinaryOp::Nor], parse_logical_xor)
}

/// Parses logical XOR expressions.
///
/// Grammar: `logical_xor := logical_and (("xor" | "xnor") logical_and)*`
pub fn parse_logical_xor<'a, I>(tokens: &mut Peekable<I>, ctx: &mut ParseCtx)
                                -> ParseResult<AstNode>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_level(tokens, ctx, &[BinaryOp::Xor, BinaryOp::Xnor], parse_logical_and)
}

/// Parses logical AND expressions.
///
/// Grammar: `logical_and := relation (("and" | "nand") relation)*`
pub fn parse_logical_and<'a, I>(tokens: &mut Peekable<I>, ctx: &mut ParseCtx)
                                -> ParseResult<AstNode>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_level(tokens, ctx, &[BinaryOp::And, BinaryOp::Nand], parse_relation)
}

/// Parses relational and equality operators.
///
/// Grammar: `relation := term ((!= | == | <= | >= | < | >) term)*`
pub fn parse_relation<'a, I>(tokens: &mut Peekable<I>, ctx: &mut ParseCtx) -> ParseResult<AstNode>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_level(tokens,
                ctx,
                &[BinaryOp::Eq,
                  BinaryOp::Neq,
                  BinaryOp::Lte,
                  BinaryOp::Gte,
                  BinaryOp::Lt,
                  BinaryOp::Gt],
                parse_term)
}

/// Parses addition and subtraction.
///
/// Grammar: `term := factor (("+" | "-") factor)*`
pub fn parse_term<'a, I>(tokens: &mut Peekable<I>, ctx: &mut ParseCtx) -> ParseResult<AstNode>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_level(tokens, ctx, &[BinaryOp::Add, BinaryOp::Sub], parse_factor)
}

/// Parses multiplication and division.
///
/// Grammar: `factor := imul (("*" | "/") imul)*`
pub fn parse_factor<'a, I>(tokens: &mut Peekable<I>, ctx: &mut ParseCtx) -> ParseResult<AstNode>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_level(tokens, ctx, &[BinaryOp::Mul, BinaryOp::Div], parse_imul)
}

/// Parses implicit multiplication.
///
/// Any two adjacent primaries with no operator between them (`2x`, `x(y+1)`,
/// `3/4x`) fold into a `*` node. Adjacency is detected by lookahead on the
/// token kind immediately after a completed quotient: a symbol, an opening
/// parenthesis, or any numeric literal kind.
///
/// Grammar: `imul := quotient (quotient)*`
pub fn parse_imul<'a, I>(tokens: &mut Peekable<I>, ctx: &mut ParseCtx) -> ParseResult<AstNode>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_quotient(tokens, ctx)?;
    loop {
        match tokens.peek() {
            Some((token, _)) if token.starts_primary() => {
                let right = parse_quotient(tokens, ctx)?;
                left = AstNode::binex(left, BinaryOp::Mul, right);
            },
            _ => break,
        }
    }
    Ok(left)
}

/// Parses the integer-arithmetic operators.
///
/// Grammar: `quotient := unary (("%" | "mod" | "rem" | "div") unary)*`
pub fn parse_quotient<'a, I>(tokens: &mut Peekable<I>, ctx: &mut ParseCtx) -> ParseResult<AstNode>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_level(tokens,
                ctx,
                &[BinaryOp::Rem, BinaryOp::Mod, BinaryOp::Quot],
                parse_unary)
}

/// Parses exponentiation.
///
/// Right-associative: `a ^ b ^ c` parses as `a ^ (b ^ c)`, because the
/// right-hand side re-enters the unary level.
///
/// Grammar: `power := primary ("^" unary)*`
pub fn parse_power<'a, I>(tokens: &mut Peekable<I>, ctx: &mut ParseCtx) -> ParseResult<AstNode>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = crate::interpreter::parser::unary::parse_primary(tokens, ctx)?;
    while let Some((Token::Caret, _)) = tokens.peek() {
        tokens.next();
        let right = parse_unary(tokens, ctx)?;
        left = AstNode::binex(left, BinaryOp::Pow, right);
    }
    Ok(left)
}
