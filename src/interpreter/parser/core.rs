use std::{collections::HashSet, iter::Peekable};

use crate::{
    ast::AstNode,
    error::ParseError,
    interpreter::{environment::Environment, lexer::Token, parser::binary::parse_logical_or},
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Shared parser state.
///
/// The grammar is not context-free in one place: a symbol followed by `(` is
/// a call only when the symbol names a known function, and adjacency
/// otherwise. `ParseCtx` carries that knowledge — the builtin names, the
/// environment's user-defined functions, and any functions declared earlier
/// in the source being parsed.
pub struct ParseCtx {
    functions: HashSet<String>,
}

impl ParseCtx {
    /// Snapshots the callable names visible in `env`.
    #[must_use]
    pub fn new(env: &Environment) -> Self {
        let mut functions: HashSet<String> =
            env.library().function_names().map(str::to_string).collect();
        functions.extend(env.function_names());
        Self { functions }
    }

    /// Records a function declared mid-parse, so later statements can call it.
    pub fn declare_function(&mut self, name: &str) {
        self.functions.insert(name.to_string());
    }

    /// Returns `true` when `name` is known to be callable.
    #[must_use]
    pub fn is_function(&self, name: &str) -> bool {
        self.functions.contains(name)
    }
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing. It begins at the
/// lowest-precedence level, logical OR, and recursively descends through the
/// precedence hierarchy.
///
/// Grammar: `expression := logical_or`
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>, ctx: &mut ParseCtx) -> ParseResult<AstNode>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_logical_or(tokens, ctx)
}
