use std::collections::HashSet;

use crate::{
    ast::{AstNode, Definition, Matrix, UnaryOp, Visitor},
    error::EvalError,
    interpreter::{
        environment::{Environment, Function},
        value::{num::Num, set_key::SetKey},
    },
};

/// Result type used by the evaluator.
///
/// The `Err` channel carries only the typed capability gaps of the numeric
/// tower ([`EvalError`]); user-input failures evaluate to `Error` nodes in
/// the result tree instead.
pub type EvalResult<T> = Result<T, EvalError>;

/// The tree-walking interpreter.
///
/// `Interpreter` is a [`Visitor`] that evaluates an AST to a value AST. It is
/// total over every variant: a subtree that cannot be reduced — a free
/// symbol, an operator over symbolic operands — is rebuilt with its children
/// evaluated, which is what keeps partially-specified algebraic expressions
/// printable instead of erroring.
///
/// # Example
/// ```
/// use algom::{
///     ast::AstNode,
///     interpreter::{environment::Environment, evaluator::core::Interpreter},
/// };
///
/// let mut env = Environment::new();
/// let node = algom::parse("2 + 3;").root.remove(0);
/// let result = Interpreter::new(&mut env).evaluate(&node).unwrap();
/// assert!(matches!(result, AstNode::Num(n) if n.value == "5"));
/// ```
pub struct Interpreter<'a> {
    pub(crate) env: &'a mut Environment,
}

impl<'a> Interpreter<'a> {
    /// Creates an interpreter bound to the given environment.
    pub fn new(env: &'a mut Environment) -> Self {
        Self { env }
    }

    /// Evaluates a single node.
    ///
    /// # Errors
    /// Returns an [`EvalError`] only for the tower's typed capability gaps.
    pub fn evaluate(&mut self, node: &AstNode) -> EvalResult<AstNode> {
        if node.erred() {
            return Ok(node.clone());
        }
        node.accept(self)
    }

    /// Evaluates a statement list, returning the last result.
    ///
    /// Evaluation short-circuits as soon as a statement produces an error
    /// node.
    ///
    /// # Errors
    /// Returns an [`EvalError`] only for the tower's typed capability gaps.
    pub fn eval_program(&mut self, nodes: &[AstNode]) -> EvalResult<AstNode> {
        let mut result = AstNode::Null;
        for node in nodes {
            result = self.evaluate(node)?;
            if result.erred() {
                break;
            }
        }
        Ok(result)
    }

    /// Evaluates a list of elements in order, stopping at the first error
    /// node.
    fn eval_elements(&mut self, elements: &[AstNode]) -> EvalResult<Result<Vec<AstNode>, AstNode>> {
        let mut out = Vec::with_capacity(elements.len());
        for element in elements {
            let value = self.evaluate(element)?;
            if value.erred() {
                return Ok(Err(value));
            }
            out.push(value);
        }
        Ok(Ok(out))
    }

    /// Truthiness of an evaluated node: booleans are themselves, numbers are
    /// true when strictly positive, everything else is false.
    fn truthy(node: &AstNode) -> bool {
        match node {
            AstNode::Bool(b) => *b,
            AstNode::Num(n) => n.is_true(),
            _ => false,
        }
    }
}

impl Visitor<EvalResult<AstNode>> for Interpreter<'_> {
    fn root(&mut self, nodes: &[AstNode]) -> EvalResult<AstNode> {
        self.eval_program(nodes)
    }

    fn block(&mut self, body: &[AstNode]) -> EvalResult<AstNode> {
        self.env.push_scope();
        let result = self.eval_program(body);
        self.env.pop_scope();
        result
    }

    fn tuple(&mut self, elements: &[AstNode]) -> EvalResult<AstNode> {
        Ok(match self.eval_elements(elements)? {
            Ok(values) => AstNode::Tuple(values),
            Err(error) => error,
        })
    }

    fn set(&mut self, elements: &[AstNode]) -> EvalResult<AstNode> {
        let values = match self.eval_elements(elements)? {
            Ok(values) => values,
            Err(error) => return Ok(error),
        };
        let mut seen = HashSet::new();
        let mut unique = Vec::new();
        for value in values {
            if seen.insert(SetKey::of(&value)) {
                unique.push(value);
            }
        }
        Ok(AstNode::Set(unique))
    }

    fn vector(&mut self, elements: &[AstNode]) -> EvalResult<AstNode> {
        Ok(match self.eval_elements(elements)? {
            Ok(values) => AstNode::Vector(values),
            Err(error) => error,
        })
    }

    fn matrix(&mut self, matrix: &Matrix) -> EvalResult<AstNode> {
        let mut rows = Vec::with_capacity(matrix.rows);
        for row in matrix.row_iter() {
            match self.eval_elements(row)? {
                Ok(values) => rows.push(values),
                Err(error) => return Ok(error),
            }
        }
        match Matrix::from_rows(rows) {
            Some(evaluated) => Ok(AstNode::Matrix(evaluated)),
            None => Ok(AstNode::Matrix(matrix.clone())),
        }
    }

    fn group(&mut self, expression: &AstNode) -> EvalResult<AstNode> {
        self.evaluate(expression)
    }

    fn null(&mut self) -> EvalResult<AstNode> {
        Ok(AstNode::Null)
    }

    fn boolean(&mut self, value: bool) -> EvalResult<AstNode> {
        Ok(AstNode::Bool(value))
    }

    fn num(&mut self, num: &Num) -> EvalResult<AstNode> {
        Ok(AstNode::Num(num.clone()))
    }

    fn sym(&mut self, name: &str) -> EvalResult<AstNode> {
        if let Some(bound) = self.env.get(name).cloned() {
            return self.evaluate(&bound);
        }
        if let Some(constant) = self.env.library().constant(name) {
            return Ok(AstNode::Num(Num::from_f64(constant)));
        }
        // Unbound symbols degrade to strings so that partially symbolic
        // expressions stay printable.
        Ok(AstNode::Chars(name.to_string()))
    }

    fn chars(&mut self, value: &str) -> EvalResult<AstNode> {
        Ok(AstNode::Chars(value.to_string()))
    }

    fn definition(&mut self, def: &Definition) -> EvalResult<AstNode> {
        match &def.params {
            Some(params) => {
                let function = Function::new(&def.name, params.clone(), (*def.body).clone());
                self.env.define_function(function);
                Ok(AstNode::Null)
            },
            None => {
                let value = self.evaluate(&def.body)?;
                if value.erred() {
                    return Ok(value);
                }
                self.env.define(&def.name, value.clone());
                Ok(value)
            },
        }
    }

    fn assign(&mut self, name: &str, value: &AstNode) -> EvalResult<AstNode> {
        let value = self.evaluate(value)?;
        if value.erred() {
            return Ok(value);
        }
        self.env.assign(name, value.clone());
        Ok(value)
    }

    fn unary_expr(&mut self, op: UnaryOp, arg: &AstNode) -> EvalResult<AstNode> {
        let value = self.evaluate(arg)?;
        if value.erred() {
            return Ok(value);
        }
        Ok(match (op, &value) {
            (UnaryOp::Neg, AstNode::Num(n)) => AstNode::Num(n.neg()),
            (UnaryOp::Not, AstNode::Bool(b)) => AstNode::Bool(!*b),
            (UnaryOp::Not, AstNode::Num(n)) => AstNode::Bool(!n.is_true()),
            _ => AstNode::unex(op, value),
        })
    }

    fn binary_expr(&mut self,
                   left: &AstNode,
                   op: crate::ast::BinaryOp,
                   right: &AstNode)
                   -> EvalResult<AstNode> {
        let left = self.evaluate(left)?;
        if left.erred() {
            return Ok(left);
        }
        let right = self.evaluate(right)?;
        if right.erred() {
            return Ok(right);
        }
        self.eval_binary(left, op, right)
    }

    fn call_expr(&mut self, callee: &str, args: &[AstNode]) -> EvalResult<AstNode> {
        self.eval_call(callee, args)
    }

    fn cond(&mut self,
            condition: &AstNode,
            consequent: &AstNode,
            alternate: &AstNode)
            -> EvalResult<AstNode> {
        let test = self.evaluate(condition)?;
        if test.erred() {
            return Ok(test);
        }
        if Self::truthy(&test) {
            self.evaluate(consequent)
        } else {
            self.evaluate(alternate)
        }
    }

    fn while_stmt(&mut self, condition: &AstNode, body: &AstNode) -> EvalResult<AstNode> {
        let mut result = AstNode::Null;
        loop {
            let test = self.evaluate(condition)?;
            if test.erred() {
                return Ok(test);
            }
            if !Self::truthy(&test) {
                break;
            }
            result = self.evaluate(body)?;
            if result.erred() {
                break;
            }
        }
        Ok(result)
    }

    fn error(&mut self, message: &str) -> EvalResult<AstNode> {
        Ok(AstNode::Error(message.to_string()))
    }
}
