use crate::{
    ast::AstNode,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        value::num::Num,
    },
};

/// Builds the arity-mismatch error node for a call.
fn args_err(callee: &str, expected: usize, actual: usize) -> AstNode {
    let plural = if expected == 1 { "argument" } else { "arguments" };
    AstNode::Error(format!("Function '{callee}' requires {expected} {plural}, but {actual} were passed."))
}

impl Interpreter<'_> {
    /// Evaluates a function call.
    ///
    /// Arguments are evaluated first. Dispatch then checks user-defined
    /// functions before the builtin library, so a user's `let f(…)` shadows a
    /// builtin of the same name. A builtin applied to arguments that did not
    /// reduce to numbers rebuilds the call symbolically instead of failing.
    /// Unknown functions and arity mismatches evaluate to error nodes.
    ///
    /// # Errors
    /// Returns an [`EvalError`](crate::error::EvalError) only for the
    /// tower's typed capability gaps (`nthroot` between fractions).
    pub(crate) fn eval_call(&mut self, callee: &str, args: &[AstNode]) -> EvalResult<AstNode> {
        let mut evaluated = Vec::with_capacity(args.len());
        for arg in args {
            let value = self.evaluate(arg)?;
            if value.erred() {
                return Ok(value);
            }
            evaluated.push(value);
        }

        if let Some(function) = self.env.get_function(callee).cloned() {
            if evaluated.len() != function.params.len() {
                return Ok(args_err(callee, function.params.len(), evaluated.len()));
            }
            self.env.push_scope();
            for (param, value) in function.params.iter().zip(evaluated) {
                self.env.define(param, value);
            }
            let result = self.evaluate(&function.body);
            self.env.pop_scope();
            return result;
        }

        if let Some(native) = self.env.library().function(callee).copied() {
            // Exact and complex cases the float natives cannot see.
            match (callee, evaluated.as_slice()) {
                ("nthroot", [AstNode::Num(a), AstNode::Num(b)]) => {
                    return Ok(AstNode::Num(a.nth_root(b)?));
                },
                ("abs", [AstNode::Num(a)]) => {
                    return Ok(AstNode::Num(a.abs()));
                },
                _ => {},
            }

            let mut nums = Vec::with_capacity(evaluated.len());
            for value in &evaluated {
                match value {
                    AstNode::Num(n) => nums.push(n.raw()),
                    // A symbolic argument keeps the whole call symbolic.
                    _ => {
                        return Ok(AstNode::Call { callee: callee.to_string(),
                                                  args:   evaluated, });
                    },
                }
            }
            return Ok(match native.apply(&nums) {
                Some(result) => AstNode::Num(Num::classify(result)),
                None => args_err(callee, native.arity().unwrap_or(0), nums.len()),
            });
        }

        Ok(AstNode::Error(format!("No function named {callee} exists.")))
    }
}
