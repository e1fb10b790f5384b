use crate::{
    ast::{AstNode, BinaryOp, Definition, Matrix, UnaryOp, Visitor},
    interpreter::value::num::{Num, NumKind},
};

/// Renders a node to LaTeX.
///
/// # Example
/// ```
/// use algom::visitors::to_latex::render;
///
/// let parsed = algom::parse("1/2;");
/// assert_eq!(render(&parsed.root[0]), "\\dfrac{1}{2}");
/// ```
#[must_use]
pub fn render(node: &AstNode) -> String {
    node.accept(&mut ToLatex)
}

/// Known function names with dedicated LaTeX spellings.
fn latex_function_name(name: &str) -> Option<&'static str> {
    Some(match name {
        "sin" => "\\sin",
        "cos" => "\\cos",
        "tan" => "\\tan",
        "sinh" => "\\sinh",
        "cosh" => "\\cosh",
        "tanh" => "\\tanh",
        "asin" => "\\arcsin",
        "acos" => "\\arccos",
        "atan" => "\\arctan",
        "ln" => "\\ln",
        "log" => "\\log",
        "exp" => "\\exp",
        "max" => "\\max",
        "min" => "\\min",
        "gcd" => "\\gcd",
        _ => return None,
    })
}

/// Symbols with dedicated LaTeX spellings.
fn latex_symbol(name: &str) -> Option<&'static str> {
    Some(match name {
        "alpha" => "\\alpha",
        "beta" => "\\beta",
        "gamma" => "\\gamma",
        "delta" => "\\delta",
        "epsilon" => "\\epsilon",
        "theta" => "\\theta",
        "lambda" => "\\lambda",
        "mu" => "\\mu",
        "pi" => "\\pi",
        "sigma" => "\\sigma",
        "phi" => "\\phi",
        "omega" => "\\omega",
        "PI" => "\\pi",
        "TAU" => "\\tau",
        _ => return None,
    })
}

/// The LaTeX renderer.
///
/// Fractions render as `\dfrac`, division as a display fraction, products
/// as `\times` (juxtaposed for coefficient-symbol pairs), exponents braced,
/// and matrices as `bmatrix` environments. Declarations and control
/// statements render to nothing; LaTeX is a value-presentation format.
pub struct ToLatex;

impl ToLatex {
    fn list(&mut self, nodes: &[AstNode], sep: &str, delims: (&str, &str)) -> String {
        let rendered: Vec<String> = nodes.iter().map(|n| n.accept(self)).collect();
        format!("{}{}{}", delims.0, rendered.join(sep), delims.1)
    }
}

impl Visitor<String> for ToLatex {
    fn root(&mut self, nodes: &[AstNode]) -> String {
        nodes.iter().map(|n| n.accept(self)).collect()
    }

    fn block(&mut self, body: &[AstNode]) -> String {
        self.list(body, ", ", ("\\left(", "\\right)"))
    }

    fn tuple(&mut self, elements: &[AstNode]) -> String {
        self.list(elements, ", ", ("\\left(", "\\right)"))
    }

    fn set(&mut self, elements: &[AstNode]) -> String {
        self.list(elements, ", ", ("\\left\\{", "\\right\\}"))
    }

    fn vector(&mut self, elements: &[AstNode]) -> String {
        self.list(elements, ", ", ("\\left[", "\\right]"))
    }

    fn matrix(&mut self, matrix: &Matrix) -> String {
        let rows: Vec<String> = matrix.row_iter()
                                      .map(|row| {
                                          row.iter()
                                             .map(|cell| cell.accept(self))
                                             .collect::<Vec<_>>()
                                             .join(" & ")
                                      })
                                      .collect();
        format!("\\begin{{bmatrix}} {} \\end{{bmatrix}}", rows.join(" \\\\ "))
    }

    fn group(&mut self, expression: &AstNode) -> String {
        format!("\\left({}\\right)", expression.accept(self))
    }

    fn null(&mut self) -> String {
        String::new()
    }

    fn boolean(&mut self, value: bool) -> String {
        format!("\\text{{{value}}}")
    }

    fn num(&mut self, num: &Num) -> String {
        match num.kind {
            NumKind::Fraction => match num.value.split_once('/') {
                Some((n, d)) => format!("\\dfrac{{{n}}}{{{d}}}"),
                None => num.value.clone(),
            },
            _ => num.value.clone(),
        }
    }

    fn sym(&mut self, name: &str) -> String {
        latex_symbol(name).map_or_else(|| name.to_string(), |s| s.to_string())
    }

    fn chars(&mut self, value: &str) -> String {
        format!("\\text{{\\textquotedblleft}}{value}\\text{{\\textquotedblright}}")
    }

    fn definition(&mut self, _def: &Definition) -> String {
        String::new()
    }

    fn assign(&mut self, _name: &str, _value: &AstNode) -> String {
        String::new()
    }

    fn unary_expr(&mut self, op: UnaryOp, arg: &AstNode) -> String {
        let arg = arg.accept(self);
        match op {
            UnaryOp::Neg => format!("-{arg}"),
            UnaryOp::Not => format!("\\neg {arg}"),
        }
    }

    fn binary_expr(&mut self, left: &AstNode, op: BinaryOp, right: &AstNode) -> String {
        if op == BinaryOp::Mul
           && matches!(left, AstNode::Num(_) | AstNode::Group(_))
           && right.is_sym()
        {
            return format!("{}{}", left.accept(self), right.accept(self));
        }
        let l = left.accept(self);
        let r = right.accept(self);
        match op {
            BinaryOp::Div => format!("\\dfrac{{{l}}}{{{r}}}"),
            BinaryOp::Pow => format!("{l}^{{{r}}}"),
            BinaryOp::Mul => format!("{l} \\times {r}"),
            BinaryOp::Neq => format!("{l} \\ne {r}"),
            BinaryOp::Lte => format!("{l} \\le {r}"),
            BinaryOp::Gte => format!("{l} \\ge {r}"),
            _ => format!("{l} {op} {r}"),
        }
    }

    fn call_expr(&mut self, callee: &str, args: &[AstNode]) -> String {
        let bare = self.list(args, ", ", ("", ""));
        match callee {
            "ceil" => format!("\\lceil{bare}\\rceil"),
            "floor" => format!("\\lfloor{bare}\\rfloor"),
            "cbrt" => format!("\\sqrt[3]{{{bare}}}"),
            "abs" => format!("\\lvert{{{bare}}}\\rvert"),
            "sqrt" => format!("\\sqrt{{{bare}}}"),
            _ => {
                let name = latex_function_name(callee).map_or_else(|| callee.to_string(),
                                                                   |s| s.to_string());
                format!("{name}\\left({bare}\\right)")
            },
        }
    }

    fn cond(&mut self, _c: &AstNode, _t: &AstNode, _e: &AstNode) -> String {
        String::new()
    }

    fn while_stmt(&mut self, _condition: &AstNode, _body: &AstNode) -> String {
        String::new()
    }

    fn error(&mut self, _message: &str) -> String {
        String::new()
    }
}
