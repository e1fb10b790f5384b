use ordered_float::OrderedFloat;

use crate::{
    ast::AstNode,
    interpreter::value::num::{Num, NumVal},
};

/// A hashable identity key for evaluated set elements.
///
/// Numeric elements compare by value (`1/2` and `2/4` collapse), booleans by
/// truth, and everything else by its canonical textual form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SetKey {
    /// A boolean element.
    Bool(bool),
    /// An exactly-integer element.
    Int(i64),
    /// Any other real numeric element.
    Float(OrderedFloat<f64>),
    /// A non-numeric element, keyed by its rendered form.
    Text(String),
}

impl SetKey {
    /// Computes the dedup key for an evaluated node.
    #[must_use]
    pub fn of(node: &AstNode) -> Self {
        match node {
            AstNode::Bool(b) => Self::Bool(*b),
            AstNode::Num(n) => Self::of_num(n),
            other => Self::Text(crate::visitors::to_string::render(other)),
        }
    }

    fn of_num(n: &Num) -> Self {
        match n.numval() {
            NumVal::Int(i) => Self::Int(i),
            NumVal::Complex(..) => Self::Text(n.value.clone()),
            _ => {
                let raw = n.raw();
                if raw.fract() == 0.0 && raw.is_finite() {
                    #[allow(clippy::cast_possible_truncation)]
                    Self::Int(raw as i64)
                } else {
                    Self::Float(OrderedFloat(raw))
                }
            },
        }
    }
}
