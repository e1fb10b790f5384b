use crate::interpreter::value::num::Num;

/// Represents a binary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOp {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Exponentiation (`^`)
    Pow,
    /// Floor-modulo (`mod`)
    Mod,
    /// Remainder (`%` or `rem`)
    Rem,
    /// Floored integer division (`div`)
    Quot,
    /// Less than (`<`)
    Lt,
    /// Greater than (`>`)
    Gt,
    /// Less than or equal (`<=`)
    Lte,
    /// Greater than or equal (`>=`)
    Gte,
    /// Equal to (`==`)
    Eq,
    /// Not equal to (`!=`)
    Neq,
    /// Logical and (`and`)
    And,
    /// Logical or (`or`)
    Or,
    /// Logical exclusive or (`xor`)
    Xor,
    /// Logical not-and (`nand`)
    Nand,
    /// Logical not-or (`nor`)
    Nor,
    /// Logical biconditional (`xnor`)
    Xnor,
}

impl std::fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let operator = match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Pow => "^",
            Self::Mod => "mod",
            Self::Rem => "%",
            Self::Quot => "div",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::Lte => "<=",
            Self::Gte => ">=",
            Self::Eq => "==",
            Self::Neq => "!=",
            Self::And => "and",
            Self::Or => "or",
            Self::Xor => "xor",
            Self::Nand => "nand",
            Self::Nor => "nor",
            Self::Xnor => "xnor",
        };
        write!(f, "{operator}")
    }
}

/// Represents a unary prefix operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOp {
    /// Arithmetic negation (`-x`).
    Neg,
    /// Logical negation (`not x` or `~x`).
    Not,
}

impl std::fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Neg => write!(f, "-"),
            Self::Not => write!(f, "not "),
        }
    }
}

/// A `let` declaration.
///
/// `params` distinguishes the two forms: `None` declares a variable
/// (`let x := expr`), `Some` declares a function (`let f(a, b) := body`), an
/// empty parameter list included.
#[derive(Debug, Clone, PartialEq)]
pub struct Definition {
    /// The declared name.
    pub name:   String,
    /// Parameter names for the function form, `None` for the variable form.
    pub params: Option<Vec<String>>,
    /// The (unevaluated) bound expression.
    pub body:   Box<AstNode>,
}

/// A rectangular matrix of AST cells.
///
/// Rectangularity is enforced at construction: every row has exactly
/// `columns` cells. Cells are arbitrary AST nodes, which is what lets matrix
/// arithmetic partially evaluate symbolic entries.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    /// Number of rows.
    pub rows:    usize,
    /// Number of columns.
    pub columns: usize,
    cells:       Vec<Vec<AstNode>>,
}

impl Matrix {
    /// Builds a matrix from row vectors, or `None` when the rows are jagged
    /// or empty.
    #[must_use]
    pub fn from_rows(rows: Vec<Vec<AstNode>>) -> Option<Self> {
        let columns = rows.first()?.len();
        if rows.iter().any(|row| row.len() != columns) {
            return None;
        }
        Some(Self { rows: rows.len(),
                    columns,
                    cells: rows })
    }

    /// Returns the cell at `(row, column)`.
    #[must_use]
    pub fn ith(&self, row: usize, column: usize) -> &AstNode {
        &self.cells[row][column]
    }

    /// Iterates over the rows of the matrix.
    pub fn row_iter(&self) -> impl Iterator<Item = &[AstNode]> + '_ {
        self.cells.iter().map(Vec::as_slice)
    }

    /// Builds a new matrix by applying `f` to every cell.
    #[must_use]
    pub fn map(&self, mut f: impl FnMut(&AstNode, usize, usize) -> AstNode) -> Self {
        let cells = self.cells
                        .iter()
                        .enumerate()
                        .map(|(r, row)| {
                            row.iter()
                               .enumerate()
                               .map(|(c, cell)| f(cell, r, c))
                               .collect()
                        })
                        .collect();
        Self { rows: self.rows,
               columns: self.columns,
               cells }
    }

    /// Element-wise addition with partial evaluation: numeric pairs add
    /// through the tower, anything else becomes a symbolic `+` node.
    ///
    /// Callers must check that the dimensions agree.
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        self.map(|cell, r, c| {
                let elem = other.ith(r, c);
                match (cell, elem) {
                    (AstNode::Num(a), AstNode::Num(b)) => AstNode::Num(a.add(b)),
                    _ => AstNode::binex(cell.clone(), BinaryOp::Add, elem.clone()),
                }
            })
    }
}

/// An abstract syntax tree node.
///
/// `AstNode` is a closed tagged union covering every construct the language
/// can express. New behaviors (stringify, latexify, interpret) are added as
/// [`Visitor`] implementations, not as new variants.
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    /// The root of a parse: the list of top-level statements.
    Root(Vec<AstNode>),
    /// A braced statement block.
    Block(Vec<AstNode>),
    /// A parenthesized comma-list: `(a, b, c)`.
    Tuple(Vec<AstNode>),
    /// A braced comma-list: `{a, b, c}`.
    Set(Vec<AstNode>),
    /// A bracketed comma-list: `[a, b, c]`.
    Vector(Vec<AstNode>),
    /// A rectangular matrix of vectors.
    Matrix(Matrix),
    /// A parenthesized expression, kept for faithful re-rendering.
    Group(Box<AstNode>),
    /// The null value.
    Null,
    /// A boolean value.
    Bool(bool),
    /// A numeric value.
    Num(Num),
    /// A symbol (identifier) reference.
    Sym(String),
    /// A string of characters; also what an unbound symbol degrades to.
    Chars(String),
    /// A `let` declaration of a variable or function.
    Definition(Definition),
    /// Reassignment of an existing name.
    Assign {
        /// The assigned name.
        name:  String,
        /// The assigned expression.
        value: Box<AstNode>,
    },
    /// A unary prefix operation.
    UnaryExpr {
        /// The operator.
        op:  UnaryOp,
        /// The operand.
        arg: Box<AstNode>,
    },
    /// A binary operation.
    BinaryExpr {
        /// Left operand.
        left:  Box<AstNode>,
        /// The operator.
        op:    BinaryOp,
        /// Right operand.
        right: Box<AstNode>,
    },
    /// A call of a builtin or user-defined function.
    Call {
        /// The function name.
        callee: String,
        /// Argument expressions.
        args:   Vec<AstNode>,
    },
    /// An `if (…) … else …` conditional.
    Cond {
        /// The test expression.
        condition:  Box<AstNode>,
        /// Evaluated when the test is true.
        consequent: Box<AstNode>,
        /// Evaluated otherwise.
        alternate:  Box<AstNode>,
    },
    /// A `while (…) …` loop.
    While {
        /// The loop condition.
        condition: Box<AstNode>,
        /// The loop body.
        body:      Box<AstNode>,
    },
    /// An error carried as a value through the tree.
    Error(String),
}

/// The double-dispatch protocol over [`AstNode`].
///
/// Implementors get one callback per variant; `AstNode::accept` routes a node
/// to the matching method. The interpreter, the canonical stringifier and the
/// LaTeX renderer are all visitors.
pub trait Visitor<T> {
    /// Visits the root statement list.
    fn root(&mut self, nodes: &[AstNode]) -> T;
    /// Visits a statement block.
    fn block(&mut self, body: &[AstNode]) -> T;
    /// Visits a tuple.
    fn tuple(&mut self, elements: &[AstNode]) -> T;
    /// Visits a set.
    fn set(&mut self, elements: &[AstNode]) -> T;
    /// Visits a vector.
    fn vector(&mut self, elements: &[AstNode]) -> T;
    /// Visits a matrix.
    fn matrix(&mut self, matrix: &Matrix) -> T;
    /// Visits a parenthesized group.
    fn group(&mut self, expression: &AstNode) -> T;
    /// Visits the null value.
    fn null(&mut self) -> T;
    /// Visits a boolean.
    fn boolean(&mut self, value: bool) -> T;
    /// Visits a number.
    fn num(&mut self, num: &Num) -> T;
    /// Visits a symbol.
    fn sym(&mut self, name: &str) -> T;
    /// Visits a character string.
    fn chars(&mut self, value: &str) -> T;
    /// Visits a `let` declaration.
    fn definition(&mut self, def: &Definition) -> T;
    /// Visits an assignment.
    fn assign(&mut self, name: &str, value: &AstNode) -> T;
    /// Visits a unary expression.
    fn unary_expr(&mut self, op: UnaryOp, arg: &AstNode) -> T;
    /// Visits a binary expression.
    fn binary_expr(&mut self, left: &AstNode, op: BinaryOp, right: &AstNode) -> T;
    /// Visits a function call.
    fn call_expr(&mut self, callee: &str, args: &[AstNode]) -> T;
    /// Visits a conditional.
    fn cond(&mut self, condition: &AstNode, consequent: &AstNode, alternate: &AstNode) -> T;
    /// Visits a while loop.
    fn while_stmt(&mut self, condition: &AstNode, body: &AstNode) -> T;
    /// Visits an error node.
    fn error(&mut self, message: &str) -> T;
}

impl AstNode {
    /// Dispatches this node to the matching visitor method.
    pub fn accept<T>(&self, visitor: &mut impl Visitor<T>) -> T {
        match self {
            Self::Root(nodes) => visitor.root(nodes),
            Self::Block(body) => visitor.block(body),
            Self::Tuple(elements) => visitor.tuple(elements),
            Self::Set(elements) => visitor.set(elements),
            Self::Vector(elements) => visitor.vector(elements),
            Self::Matrix(matrix) => visitor.matrix(matrix),
            Self::Group(expression) => visitor.group(expression),
            Self::Null => visitor.null(),
            Self::Bool(value) => visitor.boolean(*value),
            Self::Num(num) => visitor.num(num),
            Self::Sym(name) => visitor.sym(name),
            Self::Chars(value) => visitor.chars(value),
            Self::Definition(def) => visitor.definition(def),
            Self::Assign { name, value } => visitor.assign(name, value),
            Self::UnaryExpr { op, arg } => visitor.unary_expr(*op, arg),
            Self::BinaryExpr { left, op, right } => visitor.binary_expr(left, *op, right),
            Self::Call { callee, args } => visitor.call_expr(callee, args),
            Self::Cond { condition,
                         consequent,
                         alternate, } => visitor.cond(condition, consequent, alternate),
            Self::While { condition, body } => visitor.while_stmt(condition, body),
            Self::Error(message) => visitor.error(message),
        }
    }

    /// Shorthand constructor for a binary expression.
    #[must_use]
    pub fn binex(left: Self, op: BinaryOp, right: Self) -> Self {
        Self::BinaryExpr { left: Box::new(left),
                           op,
                           right: Box::new(right), }
    }

    /// Shorthand constructor for a unary expression.
    #[must_use]
    pub fn unex(op: UnaryOp, arg: Self) -> Self {
        Self::UnaryExpr { op,
                          arg: Box::new(arg), }
    }

    /// Returns `true` if the node is an [`Error`](Self::Error).
    #[must_use]
    pub const fn erred(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// Returns `true` if the node is a [`Num`](Self::Num).
    #[must_use]
    pub const fn is_num(&self) -> bool {
        matches!(self, Self::Num(_))
    }

    /// Returns `true` if the node is a [`Sym`](Self::Sym).
    #[must_use]
    pub const fn is_sym(&self) -> bool {
        matches!(self, Self::Sym(_))
    }

    /// Returns `true` if the node is a [`Vector`](Self::Vector).
    #[must_use]
    pub const fn is_vector(&self) -> bool {
        matches!(self, Self::Vector(_))
    }

    /// Returns `true` if the node is a [`Matrix`](Self::Matrix).
    #[must_use]
    pub const fn is_matrix(&self) -> bool {
        matches!(self, Self::Matrix(_))
    }

    /// Returns `true` if the node is a [`Tuple`](Self::Tuple).
    #[must_use]
    pub const fn is_tuple(&self) -> bool {
        matches!(self, Self::Tuple(_))
    }

    /// Returns `true` if the node is [`Null`](Self::Null).
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` if the node is a [`Bool`](Self::Bool).
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Self::Bool(_))
    }

    /// Returns `true` if the node is a [`Chars`](Self::Chars).
    #[must_use]
    pub const fn is_chars(&self) -> bool {
        matches!(self, Self::Chars(_))
    }

    /// Returns `true` if the node is a [`Definition`](Self::Definition).
    #[must_use]
    pub const fn is_definition(&self) -> bool {
        matches!(self, Self::Definition(_))
    }
}

#[cfg(test)]
mod tests {
    use super::{AstNode, BinaryOp, Matrix};
    use crate::interpreter::value::num::Num;

    fn n(v: i64) -> AstNode {
        AstNode::Num(Num::from_i64(v))
    }

    #[test]
    fn matrix_construction_is_rectangular() {
        assert!(Matrix::from_rows(vec![vec![n(1), n(2)], vec![n(3)]]).is_none());
        let m = Matrix::from_rows(vec![vec![n(1), n(2)], vec![n(3), n(4)]]).unwrap();
        assert_eq!((m.rows, m.columns), (2, 2));
        assert_eq!(m.ith(1, 0), &n(3));
    }

    #[test]
    fn matrix_add_partially_evaluates() {
        let a = Matrix::from_rows(vec![vec![n(1), AstNode::Sym("x".into())]]).unwrap();
        let b = Matrix::from_rows(vec![vec![n(2), n(3)]]).unwrap();
        let sum = a.add(&b);
        assert_eq!(sum.ith(0, 0), &n(3));
        assert_eq!(sum.ith(0, 1),
                   &AstNode::binex(AstNode::Sym("x".into()), BinaryOp::Add, n(3)));
    }
}
