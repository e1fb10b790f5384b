/// Parser entry points and shared state.
pub mod core;
/// Binary operator precedence levels, including implicit multiplication.
pub mod binary;
/// Unary prefixes and primary expressions.
pub mod unary;
/// Statement-level parsing: declarations, conditionals, loops, blocks.
pub mod statement;
/// Small shared parsing helpers.
pub mod utils;
