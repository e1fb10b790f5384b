use algom::{
    ast::{AstNode, BinaryOp},
    interpreter::{
        environment::Environment,
        evaluator::core::Interpreter,
        value::num::{Num, NumKind},
    },
    visitors::to_string,
    Session,
};

fn assert_evaluates(source: &str, expected: &str) {
    let got = algom::evaluate(source);
    assert_eq!(got, expected, "evaluating {source:?}");
}

fn eval_node(node: &AstNode) -> AstNode {
    let mut env = Environment::new();
    Interpreter::new(&mut env).evaluate(node).unwrap()
}

#[test]
fn fraction_normalization() {
    assert_evaluates("1/2 + 1/3;", "5/6");
    assert_evaluates("1/2 + 1/2;", "1/1");
    assert_evaluates("2/4 * 2/1;", "1/1");
    assert_evaluates("1/2 - 3/4;", "-1/4");
}

#[test]
fn arithmetic_round_trips_through_text() {
    for source in ["1/2 + 1/3;", "2 + 3;", "7 / 2;", "2^10;"] {
        let first = algom::evaluate(source);
        let again = algom::evaluate(&format!("{first};"));
        assert_eq!(first, again, "round-tripping {source:?}");
    }
}

#[test]
fn promotion_lattice_end_to_end() {
    // fraction (x) int stays exact
    assert_evaluates("1/2 * 2;", "1/1");
    // fraction (x) float drops to float
    assert_evaluates("1/2 + 0.25;", "0.75");
    // ints that stay whole stay ints
    assert_evaluates("6 * 7;", "42");
    // ints that split become floats
    assert_evaluates("7 / 2;", "3.5");
}

#[test]
fn matrix_rectangularity() {
    let jagged = algom::parse("[[1,2,3],[4,5]];");
    assert!(jagged.error.is_some());

    let square = algom::parse("[[1,2],[3,4]];");
    assert!(square.error.is_none());
    match &square.root[0] {
        AstNode::Matrix(m) => {
            assert_eq!(m.rows, 2);
            assert_eq!(m.columns, 2);
        },
        other => panic!("expected a matrix, got {other:?}"),
    }

    let mixed = algom::parse("[[1,2], 3];");
    assert!(mixed.error.is_some());
}

#[test]
fn implicit_multiplication_matches_explicit() {
    let implicit = algom::parse("2x;");
    let explicit = algom::parse("2*x;");
    assert!(implicit.error.is_none());
    assert_eq!(implicit.root, explicit.root);

    let adjacency = algom::parse("x(y + 1);");
    let spelled = algom::parse("x*(y + 1);");
    assert_eq!(adjacency.root, spelled.root);

    let coefficient = algom::parse("3/4x;");
    let spelled = algom::parse("3/4*x;");
    assert_eq!(coefficient.root, spelled.root);
}

#[test]
fn known_functions_call_rather_than_multiply() {
    let mut session = Session::new();
    session.compile("let g(x) := x + 1;");
    let call = session.parse("g(2);");
    assert!(matches!(&call.root[0], AstNode::Call { callee, .. } if callee == "g"));

    // An unknown name followed by a group is adjacency, not a call.
    let unknown = session.parse("h(2);");
    assert!(matches!(&unknown.root[0], AstNode::BinaryExpr { op: BinaryOp::Mul, .. }));
}

#[test]
fn function_round_trip() {
    let mut f = algom::make_function("x^2 + 1", &["x"]).unwrap();
    assert_eq!(f.call(&[3.0]).unwrap(), 10.0);
    assert_eq!(f.call(&[-2.0]).unwrap(), 5.0);
    // Wrong arity degrades to NaN rather than failing.
    assert!(f.call(&[1.0, 2.0]).unwrap().is_nan());
}

#[test]
fn compiled_functions_are_cheap_to_resample() {
    let mut f = algom::make_function("sin(x)^2 + cos(x)^2", &["x"]).unwrap();
    for i in 0..100 {
        let x = f64::from(i) * 0.1;
        assert!((f.call(&[x]).unwrap() - 1.0).abs() < 1e-12);
    }
}

#[test]
fn symbolic_partial_evaluation() {
    let node = AstNode::binex(AstNode::Sym("x".to_string()),
                              BinaryOp::Add,
                              AstNode::Num(Num::from_i64(0)));
    let result = eval_node(&node);
    assert!(matches!(result, AstNode::BinaryExpr { op: BinaryOp::Add, .. }),
            "expected a preserved symbolic node, got {result:?}");
}

#[test]
fn unbound_symbols_degrade_to_strings() {
    let result = eval_node(&AstNode::Sym("q".to_string()));
    assert_eq!(result, AstNode::Chars("q".to_string()));
    // They still render sensibly.
    assert_eq!(algom::evaluate("q + 0;"), "q + 0");
}

#[test]
fn compile_end_to_end() {
    let result = algom::compile("let f(x) := x^2; f(4);");
    assert_eq!(result.error, None);
    match result.value {
        Some(AstNode::Num(n)) => {
            assert_eq!(n.value, "16");
            assert_eq!(n.kind, NumKind::Int);
        },
        other => panic!("expected Num(16), got {other:?}"),
    }
}

#[test]
fn matrix_addition_end_to_end() {
    let result = algom::compile("[[1,2],[3,4]] + [[1,0],[0,1]];");
    assert_eq!(result.error, None);
    match result.value {
        Some(AstNode::Matrix(m)) => {
            let cells: Vec<String> = (0..2).flat_map(|r| {
                                               (0..2).map(move |c| (r, c))
                                           })
                                           .map(|(r, c)| to_string::render(m.ith(r, c)))
                                           .collect();
            assert_eq!(cells, vec!["2", "2", "3", "5"]);
        },
        other => panic!("expected a matrix, got {other:?}"),
    }
}

#[test]
fn symbolic_matrix_addition_partially_evaluates() {
    let result = algom::compile("[[a, 2]] + [[1, 2]];");
    assert_eq!(result.error, None);
    match result.value {
        Some(AstNode::Matrix(m)) => {
            assert!(matches!(m.ith(0, 0), AstNode::BinaryExpr { .. }));
            assert_eq!(to_string::render(m.ith(0, 1)), "4");
        },
        other => panic!("expected a matrix, got {other:?}"),
    }
}

#[test]
fn parse_error_scenarios() {
    let missing_value = algom::parse("let x := ;");
    assert!(missing_value.error.is_some());
    assert!(missing_value.root[0].erred());

    assert!(algom::parse("(1 + 2;").error.is_some());
    assert!(algom::parse("f(1, ;").error.is_some());
    assert!(algom::parse("1 + 2").error.is_none()); // semicolon optional at EOF
    assert!(algom::parse("2 ? 3;").error.is_some()); // lexical error, same channel
}

#[test]
fn errors_carry_line_numbers() {
    let parsed = algom::parse("1 + 2;\nlet x := ;");
    let message = parsed.error.unwrap();
    assert!(message.contains("line 2"), "got: {message}");
}

#[test]
fn fractional_exponent_is_a_typed_error() {
    let result = algom::compile("2 ^ (1/2);");
    assert!(result.value.is_none());
    assert!(result.error.unwrap().contains("Unsupported operation"));

    // A fraction base with an integer exponent is exact, not an error.
    assert_evaluates("(1/2) ^ 2;", "1/4");

    // And the callable surfaces the gap as Err, not a panic or NaN.
    let mut f = algom::make_function("x ^ (1/2)", &["x"]).unwrap();
    assert!(f.call(&[4.0]).is_err());
}

#[test]
fn domain_errors_are_nan_not_failures() {
    let mut f = algom::make_function("sqrt(x)", &["x"]).unwrap();
    assert!(f.call(&[-1.0]).unwrap().is_nan());

    let mut g = algom::make_function("1 / x", &["x"]).unwrap();
    assert_eq!(g.call(&[0.0]).unwrap(), f64::INFINITY);
}

#[test]
fn builtins_and_constants() {
    assert_evaluates("sqrt(9);", "3");
    assert_evaluates("|0 - 5|;", "5");
    assert_evaluates("max(1, 5, 3);", "5");
    assert_evaluates("sign(0 - 42);", "-1");
    let pi = algom::evaluate("PI;");
    assert!(pi.starts_with("3.14159"), "got: {pi}");
}

#[test]
fn user_definitions_shadow_builtins() {
    let mut session = Session::new();
    session.compile("let sin(x) := 0;");
    assert_eq!(session.evaluate("sin(1);"), "0");
}

#[test]
fn sessions_accumulate_and_reset() {
    let mut session = Session::new();
    session.compile("let a := 10;");
    session.compile("let a := 20;"); // last write wins
    assert_eq!(session.evaluate("a;"), "20");

    session.compile("a = a + 1;");
    assert_eq!(session.evaluate("a;"), "21");

    session.reset();
    assert_eq!(session.evaluate("a;"), "a");
}

#[test]
fn statements_and_control_flow() {
    assert_evaluates("let x := 3; if (x > 2) 1; else 2;", "1");
    assert_evaluates("let x := 1; if (x > 2) 1; else 2;", "2");
    assert_evaluates("let n := 0; while (n < 5) { n = n + 1; } n;", "5");
    assert_evaluates("{ let inner := 2; inner + 1; };", "3");
}

#[test]
fn logical_connectives() {
    assert_evaluates("true and false;", "false");
    assert_evaluates("true or false;", "true");
    assert_evaluates("true xor true;", "false");
    assert_evaluates("not (1 > 2);", "true");
    assert_evaluates("2 > 1 and 3 > 2;", "true");
}

#[test]
fn numeric_literal_classes_evaluate() {
    assert_evaluates("0xff;", "255");
    assert_evaluates("0o17;", "15");
    assert_evaluates("0b101;", "5");
    assert_evaluates("1.5e2;", "150");
    assert_evaluates("2e3;", "2000");
    assert_evaluates("7 mod 3;", "1");
    assert_evaluates("(0 - 7) mod 3;", "2"); // floor-modulo, not remainder
    assert_evaluates("7 rem 3;", "1");
    assert_evaluates("7 div 2;", "3");
}

#[test]
fn scientific_literals_are_rewritten_to_powers() {
    let parsed = algom::parse("1.5e2;");
    assert!(matches!(&parsed.root[0], AstNode::BinaryExpr { op: BinaryOp::Mul, .. }));
}

#[test]
fn complex_numbers() {
    assert_evaluates("2i + 3i;", "0 + 5i");
    assert_evaluates("i * i;", "-1");
    assert_evaluates("(1 + 2i) + (2 - 2i);", "3");
}

#[test]
fn tuples_and_sets() {
    assert_evaluates("(1 + 1, 2);", "(2, 2)");
    // Braces in expression position build a set; duplicates (including
    // numerically equal fractions) collapse.
    assert_evaluates("let s := {1, 2, 2, 1/2, 2/4};", "{1, 2, 1/2}");
}

#[test]
fn latex_surface() {
    let mut session = Session::new();
    assert_eq!(session.latex("1/2;"), "\\dfrac{1}{2}");
    assert_eq!(session.latex("[[1,2],[3,4]];"),
               "\\begin{bmatrix} 1 & 2 \\\\ 3 & 4 \\end{bmatrix}");
    assert_eq!(session.latex("sqrt(2);"), "\\sqrt{2}");

    // evalNode: evaluate then render through the LaTeX visitor.
    let parsed = session.parse("1/2 + 1/4;");
    assert_eq!(session.eval_node(&parsed.root[0]), "\\dfrac{3}{4}");

    // toLatex parses only; rendering is the consumer's job.
    let parsed = algom::to_latex("x^2;");
    assert!(parsed.error.is_none());
}
