use std::iter::Peekable;

use crate::{
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::core::{ParseCtx, ParseResult},
    },
};

/// Parses a comma-separated list of items until a closing token.
///
/// This utility is shared by call arguments, parameter lists and set
/// literals. It repeatedly calls `parse_item` to parse one element, expecting
/// either a comma to continue the list or the given closing token to end it.
/// An immediately encountered closing token produces an empty list. The
/// closing token is consumed.
///
/// # Errors
/// Returns a `ParseError` if an item fails to parse, an unexpected token is
/// encountered, or the stream ends before the closing token.
pub fn parse_comma_separated<'a, I, T>(
    tokens: &mut Peekable<I>,
    ctx: &mut ParseCtx,
    mut parse_item: impl FnMut(&mut Peekable<I>, &mut ParseCtx) -> ParseResult<T>,
    closing: &Token)
    -> ParseResult<Vec<T>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut items = Vec::new();
    if let Some((tok, _)) = tokens.peek() {
        if tok == closing {
            tokens.next();
            return Ok(items);
        }
    }
    loop {
        items.push(parse_item(tokens, ctx)?);
        match tokens.peek() {
            Some((Token::Comma, _)) => {
                tokens.next();
            },
            Some((tok, _)) if tok == closing => {
                tokens.next();
                break;
            },
            Some((tok, line)) => {
                return Err(ParseError::UnexpectedToken { token: format!("Expected ',' or {closing:?}, found {tok:?}"),
                                                         line:  *line, });
            },
            None => return Err(ParseError::UnexpectedEndOfInput { line: 0 }),
        }
    }
    Ok(items)
}

/// Parses a plain identifier and returns its name.
///
/// # Errors
/// Returns a `ParseError` if the next token is not a symbol or the input ends
/// unexpectedly.
pub fn parse_identifier<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<String>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.next() {
        Some((Token::Symbol(s), _)) => Ok(s.clone()),
        Some((tok, line)) => {
            Err(ParseError::UnexpectedToken { token: format!("Expected identifier, found {tok:?}"),
                                              line:  *line, })
        },
        None => Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    }
}
