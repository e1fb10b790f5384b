/// Parsing errors.
///
/// Defines all error types that can occur during lexing and parsing of source
/// code. Parse errors include syntax mistakes, unexpected tokens, invalid
/// literals, and any other issues detected before evaluation.
pub mod parse_error;
/// Evaluation errors.
///
/// Contains the typed capability-gap errors the evaluator is allowed to
/// surface as hard results. Every other runtime failure is represented as an
/// error node in the evaluated tree rather than an `Err`.
pub mod eval_error;

pub use eval_error::EvalError;
pub use parse_error::ParseError;
