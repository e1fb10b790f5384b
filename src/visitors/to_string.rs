use crate::{
    ast::{AstNode, BinaryOp, Definition, Matrix, UnaryOp, Visitor},
    interpreter::value::num::Num,
};

/// Renders a node to its canonical textual form.
///
/// # Example
/// ```
/// use algom::visitors::to_string::render;
///
/// let parsed = algom::parse("2x;");
/// assert_eq!(render(&parsed.root[0]), "2x");
/// ```
#[must_use]
pub fn render(node: &AstNode) -> String {
    node.accept(&mut ToString)
}

/// The canonical stringifier.
///
/// Products of a number and a symbol print in juxtaposed form (`2x`); `^`
/// and `/` bind tightly and print without surrounding spaces; vectors print
/// bracketed on one line and matrices one row per line.
pub struct ToString;

impl ToString {
    fn list(&mut self, nodes: &[AstNode], delims: (&str, &str)) -> String {
        let rendered: Vec<String> = nodes.iter().map(|n| n.accept(self)).collect();
        format!("{}{}{}", delims.0, rendered.join(", "), delims.1)
    }
}

impl Visitor<String> for ToString {
    fn root(&mut self, nodes: &[AstNode]) -> String {
        nodes.iter().map(|n| n.accept(self)).collect::<Vec<_>>().join("\n")
    }

    fn block(&mut self, body: &[AstNode]) -> String {
        let mut result = String::new();
        for statement in body {
            result.push_str(&statement.accept(self));
            result.push('\n');
        }
        result
    }

    fn tuple(&mut self, elements: &[AstNode]) -> String {
        self.list(elements, ("(", ")"))
    }

    fn set(&mut self, elements: &[AstNode]) -> String {
        self.list(elements, ("{", "}"))
    }

    fn vector(&mut self, elements: &[AstNode]) -> String {
        self.list(elements, ("[", "]"))
    }

    fn matrix(&mut self, matrix: &Matrix) -> String {
        let rows: Vec<String> = matrix.row_iter()
                                      .map(|row| format!("\t{}", self.list(row, ("[", "]"))))
                                      .collect();
        format!("[\n{}\n]", rows.join("\n"))
    }

    fn group(&mut self, expression: &AstNode) -> String {
        format!("({})", expression.accept(self))
    }

    fn null(&mut self) -> String {
        "null".to_string()
    }

    fn boolean(&mut self, value: bool) -> String {
        value.to_string()
    }

    fn num(&mut self, num: &Num) -> String {
        num.value.clone()
    }

    fn sym(&mut self, name: &str) -> String {
        name.to_string()
    }

    fn chars(&mut self, value: &str) -> String {
        value.to_string()
    }

    fn definition(&mut self, def: &Definition) -> String {
        let body = def.body.accept(self);
        match &def.params {
            Some(params) => format!("let {}({}) := {}", def.name, params.join(", "), body),
            None => format!("let {} := {}", def.name, body),
        }
    }

    fn assign(&mut self, name: &str, value: &AstNode) -> String {
        format!("{name} = {}", value.accept(self))
    }

    fn unary_expr(&mut self, op: UnaryOp, arg: &AstNode) -> String {
        format!("{op}({})", arg.accept(self))
    }

    fn binary_expr(&mut self, left: &AstNode, op: BinaryOp, right: &AstNode) -> String {
        if op == BinaryOp::Mul {
            if let (AstNode::Num(n), AstNode::Sym(s)) = (left, right) {
                return format!("{}{s}", n.value);
            }
        }
        let l = left.accept(self);
        let r = right.accept(self);
        match op {
            BinaryOp::Pow | BinaryOp::Div => format!("{l}{op}{r}"),
            _ => format!("{l} {op} {r}"),
        }
    }

    fn call_expr(&mut self, callee: &str, args: &[AstNode]) -> String {
        format!("{callee}{}", self.list(args, ("(", ")")))
    }

    fn cond(&mut self, condition: &AstNode, consequent: &AstNode, alternate: &AstNode) -> String {
        format!("if ({}) {{{}}} else {{{}}}",
                condition.accept(self),
                consequent.accept(self),
                alternate.accept(self))
    }

    fn while_stmt(&mut self, condition: &AstNode, body: &AstNode) -> String {
        format!("while ({}) {{{}}}", condition.accept(self), body.accept(self))
    }

    fn error(&mut self, message: &str) -> String {
        message.to_string()
    }
}
