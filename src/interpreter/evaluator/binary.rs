use crate::{
    ast::{AstNode, BinaryOp},
    interpreter::evaluator::core::{EvalResult, Interpreter},
};

impl Interpreter<'_> {
    /// Dispatches a binary operator over two evaluated operands.
    ///
    /// - Two numbers go through the numeric tower.
    /// - Two booleans go through the logical connectives.
    /// - Two matrices support `+` (element-wise, partially evaluating).
    /// - Every other combination rebuilds the node symbolically with its
    ///   evaluated children, which is what lets expressions over free
    ///   variables survive evaluation intact.
    ///
    /// # Errors
    /// Returns an [`EvalError`](crate::error::EvalError) when the tower hits
    /// a typed capability gap (fractional exponents).
    pub(crate) fn eval_binary(&mut self,
                              left: AstNode,
                              op: BinaryOp,
                              right: AstNode)
                              -> EvalResult<AstNode> {
        match (&left, &right) {
            (AstNode::Num(a), AstNode::Num(b)) => {
                let result = match op {
                    BinaryOp::Add => AstNode::Num(a.add(b)),
                    BinaryOp::Sub => AstNode::Num(a.minus(b)),
                    BinaryOp::Mul => AstNode::Num(a.times(b)),
                    BinaryOp::Div => AstNode::Num(a.divide(b)),
                    BinaryOp::Pow => AstNode::Num(a.pow(b)?),
                    BinaryOp::Mod => AstNode::Num(a.modulo(b)),
                    BinaryOp::Rem => AstNode::Num(a.rem(b)),
                    BinaryOp::Quot => AstNode::Num(a.int_div(b)),
                    BinaryOp::Lt => AstNode::Bool(a.lt(b)),
                    BinaryOp::Gt => AstNode::Bool(a.gt(b)),
                    BinaryOp::Lte => AstNode::Bool(a.lte(b)),
                    BinaryOp::Gte => AstNode::Bool(a.gte(b)),
                    BinaryOp::Eq => AstNode::Bool(a.equals(b)),
                    BinaryOp::Neq => AstNode::Bool(!a.equals(b)),
                    // Logical connectives are not defined over numbers.
                    BinaryOp::And
                    | BinaryOp::Or
                    | BinaryOp::Xor
                    | BinaryOp::Nand
                    | BinaryOp::Nor
                    | BinaryOp::Xnor => AstNode::binex(left.clone(), op, right.clone()),
                };
                Ok(result)
            },
            (AstNode::Bool(a), AstNode::Bool(b)) => Ok(eval_logic(*a, op, *b)
                .unwrap_or_else(|| AstNode::binex(left.clone(), op, right.clone()))),
            (AstNode::Matrix(a), AstNode::Matrix(b)) => {
                if op == BinaryOp::Add && a.rows == b.rows && a.columns == b.columns {
                    Ok(AstNode::Matrix(a.add(b)))
                } else {
                    // Only matrix addition is currently defined; everything
                    // else stays an unevaluated symbolic node.
                    Ok(AstNode::binex(left.clone(), op, right.clone()))
                }
            },
            _ => Ok(AstNode::binex(left.clone(), op, right.clone())),
        }
    }
}

/// The logical connectives over two booleans. Returns `None` for operators
/// that have no boolean meaning.
fn eval_logic(a: bool, op: BinaryOp, b: bool) -> Option<AstNode> {
    let value = match op {
        BinaryOp::And => a && b,
        BinaryOp::Or => a || b,
        BinaryOp::Xor => a != b,
        BinaryOp::Nand => !(a && b),
        BinaryOp::Nor => !(a || b),
        BinaryOp::Xnor => a == b,
        BinaryOp::Eq => a == b,
        BinaryOp::Neq => a != b,
        _ => return None,
    };
    Some(AstNode::Bool(value))
}
