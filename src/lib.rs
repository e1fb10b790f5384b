//! # algom
//!
//! algom is an algebraic expression language engine: a lexer, a
//! recursive-descent parser, a numeric tower with exact fractions, and a
//! tree-walking interpreter that turn user-typed expressions
//! (`let f(x) := x^2 + 1/2;`, `[[1,2],[3,4]] + [[1,0],[0,1]]`) into callable
//! numeric functions or evaluated values.
//!
//! The engine is a purely synchronous, in-process library with no I/O of its
//! own. Hosts — plotting samplers, spreadsheet cells, LaTeX previews — hold a
//! [`runtime::Session`] (or use the one-shot free functions below), compile
//! once, and apply the result many times.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
)]
#![allow(clippy::missing_errors_doc, clippy::multiple_crate_versions)]

/// Defines the structure of parsed code.
///
/// This module declares the `AstNode` sum type and related types that
/// represent the syntactic structure of source code as a tree, together with
/// the `Visitor` protocol through which every behavior over the tree —
/// evaluation, stringification, LaTeX rendering — is expressed.
///
/// # Responsibilities
/// - Defines every expression and statement variant the language has.
/// - Enforces structural invariants (matrices are rectangular).
/// - Dispatches nodes to visitors without downcasting.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// # Responsibilities
/// - Defines the parse-error enum covering lexical and syntactic failures,
///   each carrying its source line.
/// - Defines the typed capability-gap errors of the numeric tower.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation, value
/// representations, the environment, and the builtin library.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator.
/// - Owns the numeric tower and the scope machinery.
pub mod interpreter;
/// An optional LRU-memoizing decorator around parsing.
pub mod memo;
/// The public runtime façade: sessions, parse/compile results, and compiled
/// callable functions.
pub mod runtime;
/// Presentation visitors rendering the AST to text and LaTeX.
pub mod visitors;

pub use runtime::{CompiledFn, Parsed, RuntimeValue, Session};

/// Parses source text with a fresh session.
///
/// Failures are returned as data: `error` carries a line-prefixed message
/// and the root holds a single error node.
///
/// # Example
/// ```
/// let good = algom::parse("2x;");
/// assert!(good.error.is_none());
///
/// let bad = algom::parse("let x := ;");
/// assert!(bad.error.is_some());
/// ```
#[must_use]
pub fn parse(source: &str) -> Parsed {
    Session::new().parse(source)
}

/// Parses and evaluates source text with a fresh session.
///
/// # Example
/// ```
/// let result = algom::compile("let f(x) := x^2; f(4);");
/// assert_eq!(algom::evaluate("let f(x) := x^2; f(4);"), "16");
/// assert!(result.error.is_none());
/// ```
#[must_use]
pub fn compile(source: &str) -> RuntimeValue {
    Session::new().compile(source)
}

/// Parses, evaluates, and stringifies source text with a fresh session.
///
/// # Example
/// ```
/// assert_eq!(algom::evaluate("1/2 + 1/3;"), "5/6");
/// assert_eq!(algom::evaluate("2 + 3 * 4;"), "14");
/// ```
#[must_use]
pub fn evaluate(source: &str) -> String {
    Session::new().evaluate(source)
}

/// Compiles an expression body over named parameters into a callable
/// numeric function.
///
/// # Errors
/// Returns the diagnostic message when the body does not compile to a
/// function.
///
/// # Example
/// ```
/// let mut f = algom::make_function("x^2 + 1", &["x"]).unwrap();
/// assert_eq!(f.call(&[3.0]).unwrap(), 10.0);
/// ```
pub fn make_function(body: &str, params: &[&str]) -> Result<CompiledFn, String> {
    Session::new().make_function(body, params)
}

/// Parses source text for LaTeX rendering with a fresh session. The consumer
/// renders the returned tree through [`visitors::ToLatex`].
#[must_use]
pub fn to_latex(source: &str) -> Parsed {
    Session::new().to_latex(source)
}
