use std::iter::Peekable;

use crate::{
    ast::{AstNode, Definition},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::{parse_expression, ParseCtx, ParseResult},
            utils::{parse_comma_separated, parse_identifier},
        },
    },
};

/// Parses an entire program: statements until the token stream runs dry.
///
/// Stray semicolons between statements are skipped.
pub fn parse_program<'a, I>(tokens: &mut Peekable<I>,
                            ctx: &mut ParseCtx)
                            -> ParseResult<Vec<AstNode>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut statements = Vec::new();
    loop {
        while let Some((Token::Semicolon, _)) = tokens.peek() {
            tokens.next();
        }
        if tokens.peek().is_none() {
            break;
        }
        statements.push(parse_statement(tokens, ctx)?);
    }
    Ok(statements)
}

/// Parses a single statement.
///
/// A statement may be one of:
/// - a `let` declaration of a variable or a function,
/// - an `if (…) … else …` conditional,
/// - a `while (…) …` loop,
/// - a braced block,
/// - an expression statement terminated by `;`.
///
/// The terminating semicolon may be omitted at the end of input and before a
/// closing brace.
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>, ctx: &mut ParseCtx) -> ParseResult<AstNode>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.peek() {
        Some((Token::Let, _)) => parse_declaration(tokens, ctx),
        Some((Token::If, _)) => parse_conditional(tokens, ctx),
        Some((Token::While, _)) => parse_while(tokens, ctx),
        Some((Token::LBrace, _)) => parse_block(tokens, ctx),
        _ => {
            let expr = parse_expression(tokens, ctx)?;
            end_statement(tokens)?;
            Ok(expr)
        },
    }
}

/// Consumes a statement terminator.
///
/// Accepts an explicit `;`, the end of input, or a following `}` (block
/// close); anything else is an error.
fn end_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<()>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.peek() {
        Some((Token::Semicolon, _)) => {
            tokens.next();
            Ok(())
        },
        Some((Token::RBrace | Token::Else, _)) | None => Ok(()),
        Some((_, line)) => Err(ParseError::ExpectedSemicolon { line: *line }),
    }
}

/// Parses a `let` declaration.
///
/// Two forms exist:
///
/// ```text
///     let x := expression ;
///     let f(a, b) := body ;
/// ```
///
/// The function form registers `f` with the parse context immediately, so
/// that later statements read `f(…)` as a call rather than an adjacency. The
/// bare form without `:=` declares the name bound to null. The body of the
/// function form may be a braced block.
fn parse_declaration<'a, I>(tokens: &mut Peekable<I>, ctx: &mut ParseCtx) -> ParseResult<AstNode>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (_, line) = *tokens.next().unwrap();
    let name = parse_identifier(tokens)?;

    match tokens.peek() {
        Some((Token::LParen, _)) => {
            tokens.next();
            let params = parse_comma_separated(tokens,
                                               ctx,
                                               |toks, _| parse_identifier(toks),
                                               &Token::RParen)?;
            ctx.declare_function(&name);

            match tokens.next() {
                Some((Token::Define, _)) => {},
                _ => return Err(ParseError::InvalidFunctionDefinition { line }),
            }

            let body = if let Some((Token::LBrace, _)) = tokens.peek() {
                parse_block(tokens, ctx)?
            } else {
                let expr = parse_expression(tokens, ctx)?;
                end_statement(tokens)?;
                expr
            };

            Ok(AstNode::Definition(Definition { name,
                                                params: Some(params),
                                                body: Box::new(body) }))
        },
        Some((Token::Define, _)) => {
            tokens.next();
            let body = parse_expression(tokens, ctx)?;
            end_statement(tokens)?;
            Ok(AstNode::Definition(Definition { name,
                                                params: None,
                                                body: Box::new(body) }))
        },
        _ => {
            end_statement(tokens)?;
            Ok(AstNode::Definition(Definition { name,
                                                params: None,
                                                body: Box::new(AstNode::Null) }))
        },
    }
}

/// Parses an `if` statement with an optional `else` branch.
///
/// Syntax: `if ( condition ) statement else statement`
fn parse_conditional<'a, I>(tokens: &mut Peekable<I>, ctx: &mut ParseCtx) -> ParseResult<AstNode>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (_, line) = *tokens.next().unwrap();

    match tokens.next() {
        Some((Token::LParen, _)) => {},
        _ => {
            return Err(ParseError::UnexpectedToken { token: "Expected '(' in conditional"
                                                            .to_string(),
                                                     line });
        },
    }
    let condition = parse_expression(tokens, ctx)?;
    match tokens.next() {
        Some((Token::RParen, _)) => {},
        _ => return Err(ParseError::ExpectedClosingParen { line }),
    }

    let consequent = parse_statement(tokens, ctx)?;
    let alternate = if let Some((Token::Else, _)) = tokens.peek() {
        tokens.next();
        parse_statement(tokens, ctx)?
    } else {
        AstNode::Null
    };

    Ok(AstNode::Cond { condition:  Box::new(condition),
                       consequent: Box::new(consequent),
                       alternate:  Box::new(alternate), })
}

/// Parses a `while` statement.
///
/// Syntax: `while ( condition ) statement`
fn parse_while<'a, I>(tokens: &mut Peekable<I>, ctx: &mut ParseCtx) -> ParseResult<AstNode>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (_, line) = *tokens.next().unwrap();

    match tokens.next() {
        Some((Token::LParen, _)) => {},
        _ => {
            return Err(ParseError::UnexpectedToken { token: "Expected '(' after 'while'"
                                                            .to_string(),
                                                     line });
        },
    }
    let condition = parse_expression(tokens, ctx)?;
    match tokens.next() {
        Some((Token::RParen, _)) => {},
        _ => return Err(ParseError::ExpectedClosingParen { line }),
    }

    let body = parse_statement(tokens, ctx)?;
    Ok(AstNode::While { condition: Box::new(condition),
                        body:      Box::new(body), })
}

/// Parses a braced statement block in statement position.
pub fn parse_block<'a, I>(tokens: &mut Peekable<I>, ctx: &mut ParseCtx) -> ParseResult<AstNode>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (_, line) = *tokens.next().unwrap();
    let mut statements = Vec::new();

    loop {
        while let Some((Token::Semicolon, _)) = tokens.peek() {
            tokens.next();
        }
        match tokens.peek() {
            Some((Token::RBrace, _)) => {
                tokens.next();
                break;
            },
            None => return Err(ParseError::ExpectedClosingBrace { line }),
            _ => statements.push(parse_statement(tokens, ctx)?),
        }
    }

    Ok(AstNode::Block(statements))
}
