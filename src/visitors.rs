/// Canonical textual rendering of the AST.
pub mod to_string;
/// LaTeX rendering of the AST.
pub mod to_latex;

pub use to_latex::ToLatex;
pub use to_string::ToString;
