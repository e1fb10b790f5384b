/// The numeric tower.
///
/// Defines `Num`, the numeric leaf of the AST, together with its kind tag and
/// the exact/approximate arithmetic defined over it.
pub mod num;
/// Hashable dedup keys for set elements.
pub mod set_key;
