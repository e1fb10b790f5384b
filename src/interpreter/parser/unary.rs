use std::iter::Peekable;

use crate::{
    ast::{AstNode, BinaryOp, Matrix, UnaryOp},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            binary::parse_power,
            core::{parse_expression, ParseCtx, ParseResult},
            utils::parse_comma_separated,
        },
        value::num::Num,
    },
};

/// Parses a unary expression.
///
/// Supports the prefix operators `-`, `not`, and `~` (an alias for `not`).
/// Prefixes are right-associative; with no prefix present, parsing continues
/// at the exponentiation level.
///
/// Grammar:
/// ```text
///     unary := ("-" | "not" | "~") unary
///            | power
/// ```
pub fn parse_unary<'a, I>(tokens: &mut Peekable<I>, ctx: &mut ParseCtx) -> ParseResult<AstNode>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.peek() {
        Some((Token::Minus, _)) => {
            tokens.next();
            let arg = parse_unary(tokens, ctx)?;
            Ok(AstNode::unex(UnaryOp::Neg, arg))
        },
        Some((Token::Not | Token::Tilde, _)) => {
            tokens.next();
            let arg = parse_unary(tokens, ctx)?;
            Ok(AstNode::unex(UnaryOp::Not, arg))
        },
        _ => parse_power(tokens, ctx),
    }
}

/// Parses a primary (atomic) expression.
///
/// Primaries form the base of the expression grammar:
/// - numeric literals in every lexical class
/// - booleans, `null`, `NaN`, `Inf`, strings
/// - symbols, assignments, and function calls
/// - grouped expressions and tuples `( … )`
/// - sets `{ … }`
/// - vectors and matrices `[ … ]`
/// - absolute values `|expr|`
///
/// A symbol followed by `(` becomes a call only when the symbol is a known
/// function name; otherwise the parenthesized group is adjacent and folds
/// into an implicit multiplication one level up.
pub fn parse_primary<'a, I>(tokens: &mut Peekable<I>, ctx: &mut ParseCtx) -> ParseResult<AstNode>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (token, line) = match tokens.peek() {
        Some((token, line)) => ((*token).clone(), *line),
        None => return Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    };

    match token {
        Token::Int(lex) => {
            tokens.next();
            Ok(AstNode::Num(Num::int(&lex, 10)))
        },
        Token::Float(lex) => {
            tokens.next();
            Ok(AstNode::Num(Num::float(&lex)))
        },
        Token::Fraction(lex) => {
            tokens.next();
            Ok(AstNode::Num(Num::fraction(&lex)))
        },
        Token::Hex(lex) => {
            tokens.next();
            Ok(AstNode::Num(Num::int(&lex[2..], 16)))
        },
        Token::Octal(lex) => {
            tokens.next();
            Ok(AstNode::Num(Num::int(&lex[2..], 8)))
        },
        Token::Binary(lex) => {
            tokens.next();
            Ok(AstNode::Num(Num::int(&lex[2..], 2)))
        },
        Token::Scientific(lex) => {
            tokens.next();
            Ok(scientific_to_power(&lex))
        },
        Token::Complex(lex) => {
            tokens.next();
            let imaginary = lex.trim_end_matches('i').parse().unwrap_or(f64::NAN);
            Ok(AstNode::Num(Num::complex(0.0, imaginary)))
        },
        Token::Bool(b) => {
            tokens.next();
            Ok(AstNode::Bool(b))
        },
        Token::Chars(s) => {
            tokens.next();
            Ok(AstNode::Chars(s))
        },
        Token::Null => {
            tokens.next();
            Ok(AstNode::Null)
        },
        Token::NanLit => {
            tokens.next();
            Ok(AstNode::Num(Num::from_f64(f64::NAN)))
        },
        Token::InfLit => {
            tokens.next();
            Ok(AstNode::Num(Num::from_f64(f64::INFINITY)))
        },
        Token::LParen => parse_group(tokens, ctx),
        Token::LBrace => parse_set(tokens, ctx),
        Token::LBracket => parse_array(tokens, ctx),
        Token::Pipe => parse_abs(tokens, ctx),
        Token::Symbol(name) => parse_symbol(tokens, ctx, name),
        other => Err(ParseError::UnexpectedToken { token: format!("{other:?}"),
                                                   line }),
    }
}

/// Rewrites a scientific literal into `base * 10^exp`, with each side
/// independently classified as INT or FLOAT. No distinct scientific node
/// exists in the tree.
fn scientific_to_power(lexeme: &str) -> AstNode {
    let (base, exp) = lexeme.split_once(|c| c == 'e' || c == 'E').unwrap_or((lexeme, "0"));
    let base_node = if base.contains('.') {
        Num::float(base)
    } else {
        Num::int(base, 10)
    };
    let exp_node = Num::from_i64(exp.parse().unwrap_or(0));
    AstNode::binex(AstNode::Num(base_node),
                   BinaryOp::Mul,
                   AstNode::binex(AstNode::Num(Num::from_i64(10)),
                                  BinaryOp::Pow,
                                  AstNode::Num(exp_node)))
}

/// Parses a symbol: a variable reference, an assignment, a call, or the
/// imaginary unit.
fn parse_symbol<'a, I>(tokens: &mut Peekable<I>,
                       ctx: &mut ParseCtx,
                       name: String)
                       -> ParseResult<AstNode>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    tokens.next();
    match tokens.peek() {
        Some((Token::LParen, _)) if ctx.is_function(&name) => {
            tokens.next();
            let args = parse_comma_separated(tokens, ctx, parse_expression, &Token::RParen)?;
            Ok(AstNode::Call { callee: name,
                               args })
        },
        Some((Token::Assign, _)) => {
            tokens.next();
            let value = parse_expression(tokens, ctx)?;
            Ok(AstNode::Assign { name,
                                 value: Box::new(value), })
        },
        _ if name == "i" || name == "j" => Ok(AstNode::Num(Num::complex(0.0, 1.0))),
        _ => Ok(AstNode::Sym(name)),
    }
}

/// Parses a parenthesized expression or a tuple.
///
/// `( expr )` yields a `Group` wrapper (kept so renderers can reproduce the
/// parentheses); `( expr, expr, … )` yields a `Tuple`.
fn parse_group<'a, I>(tokens: &mut Peekable<I>, ctx: &mut ParseCtx) -> ParseResult<AstNode>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (_, line) = *tokens.next().unwrap();
    let first = parse_expression(tokens, ctx)?;

    if let Some((Token::Comma, _)) = tokens.peek() {
        let mut elements = vec![first];
        while let Some((Token::Comma, _)) = tokens.peek() {
            tokens.next();
            elements.push(parse_expression(tokens, ctx)?);
        }
        return match tokens.next() {
            Some((Token::RParen, _)) => Ok(AstNode::Tuple(elements)),
            _ => Err(ParseError::ExpectedClosingParen { line }),
        };
    }

    match tokens.next() {
        Some((Token::RParen, _)) => Ok(AstNode::Group(Box::new(first))),
        _ => Err(ParseError::ExpectedClosingParen { line }),
    }
}

/// Parses a set literal `{ expr, expr, … }` in expression position.
fn parse_set<'a, I>(tokens: &mut Peekable<I>, ctx: &mut ParseCtx) -> ParseResult<AstNode>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    tokens.next();
    let elements = parse_comma_separated(tokens, ctx, parse_expression, &Token::RBrace)?;
    Ok(AstNode::Set(elements))
}

/// Parses an absolute-value expression `| expr |` as sugar for `abs(expr)`.
fn parse_abs<'a, I>(tokens: &mut Peekable<I>, ctx: &mut ParseCtx) -> ParseResult<AstNode>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (_, line) = *tokens.next().unwrap();
    let expr = parse_expression(tokens, ctx)?;
    match tokens.next() {
        Some((Token::Pipe, _)) => Ok(AstNode::Call { callee: "abs".to_string(),
                                                     args:   vec![expr], }),
        _ => Err(ParseError::ExpectedClosingPipe { line }),
    }
}

/// Parses a bracketed comma-list into a vector or a matrix.
///
/// When the first element is itself a vector, the whole construct becomes a
/// matrix and two invariants are enforced on the spot: every element must be
/// a vector, and every row must have the same length. No jagged arrays are
/// permitted.
fn parse_array<'a, I>(tokens: &mut Peekable<I>, ctx: &mut ParseCtx) -> ParseResult<AstNode>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (_, line) = *tokens.next().unwrap();

    if let Some((Token::RBracket, _)) = tokens.peek() {
        tokens.next();
        return Ok(AstNode::Vector(Vec::new()));
    }

    let first = parse_expression(tokens, ctx)?;
    let columns = match &first {
        AstNode::Vector(elements) => Some(elements.len()),
        _ => None,
    };

    let mut elements = vec![first];
    while let Some((Token::Comma, _)) = tokens.peek() {
        tokens.next();
        let element = parse_expression(tokens, ctx)?;
        match (columns, &element) {
            (Some(cols), AstNode::Vector(row)) => {
                if row.len() != cols {
                    return Err(ParseError::JaggedMatrix { line });
                }
            },
            (Some(_), _) | (None, AstNode::Vector(_)) => {
                return Err(ParseError::MixedMatrixElements { line });
            },
            (None, _) => {},
        }
        elements.push(element);
    }

    match tokens.next() {
        Some((Token::RBracket, _)) => {},
        _ => return Err(ParseError::ExpectedClosingBracket { line }),
    }

    if columns.is_some() {
        let rows = elements.into_iter()
                           .map(|element| match element {
                               AstNode::Vector(row) => row,
                               _ => unreachable!("matrix rows are vectors by construction"),
                           })
                           .collect();
        let matrix = Matrix::from_rows(rows).ok_or(ParseError::JaggedMatrix { line })?;
        return Ok(AstNode::Matrix(matrix));
    }
    Ok(AstNode::Vector(elements))
}
