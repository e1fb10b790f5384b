use crate::{
    ast::AstNode,
    error::EvalError,
    interpreter::{
        environment::Environment,
        evaluator::core::Interpreter,
        lexer::tokenize,
        parser::{core::ParseCtx, statement::parse_program},
        value::num::Num,
    },
    visitors::{to_latex, to_string},
};

/// The result of parsing a source string.
///
/// Parse failures are data: `root` then holds a single error node and
/// `error` carries the line-prefixed message. The parser never panics across
/// this boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed {
    /// The parsed top-level statements.
    pub root:  Vec<AstNode>,
    /// The parse failure, if any.
    pub error: Option<String>,
}

impl Parsed {
    /// Returns `true` when the parse failed.
    #[must_use]
    pub const fn erred(&self) -> bool {
        self.error.is_some()
    }

    /// Wraps the statement list in a [`AstNode::Root`] for visitor use.
    #[must_use]
    pub fn ast(&self) -> AstNode {
        AstNode::Root(self.root.clone())
    }
}

/// The result of compiling (parsing and evaluating) a source string.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeValue {
    /// The final evaluated node, when compilation succeeded.
    pub value: Option<AstNode>,
    /// The failure message, when it did not.
    pub error: Option<String>,
}

/// A compiled, callable numeric function.
///
/// Produced by [`Session::make_function`]. The callable carries its
/// parameter list, unevaluated body, and a snapshot of the defining
/// environment; each call binds the positional arguments into a fresh child
/// scope. It accepts exactly `params.len()` arguments and returns `NaN` for
/// every ordinary numeric domain error — it only errs on the tower's typed
/// capability gaps. Clone it to share across threads: calls mutate only the
/// clone's own scopes.
#[derive(Debug, Clone)]
pub struct CompiledFn {
    params: Vec<String>,
    body:   AstNode,
    env:    Environment,
}

impl CompiledFn {
    /// Number of parameters the callable expects.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Applies the function to positional numeric arguments.
    ///
    /// This is the hot path for plot samplers and spreadsheet cells:
    /// parse/compile once, then call repeatedly.
    ///
    /// # Errors
    /// Returns an [`EvalError`] only for the typed capability gaps; domain
    /// errors (including an argument-count mismatch) come back as `NaN`.
    ///
    /// # Example
    /// ```
    /// use algom::make_function;
    ///
    /// let mut f = make_function("x^2 + 1", &["x"]).unwrap();
    /// assert_eq!(f.call(&[3.0]).unwrap(), 10.0);
    /// assert_eq!(f.call(&[-2.0]).unwrap(), 5.0);
    /// ```
    pub fn call(&mut self, args: &[f64]) -> Result<f64, EvalError> {
        if args.len() != self.params.len() {
            return Ok(f64::NAN);
        }
        self.env.push_scope();
        for (param, arg) in self.params.iter().zip(args) {
            self.env.define(param, AstNode::Num(Num::classify(*arg)));
        }
        let Self { env, body, .. } = self;
        let result = Interpreter::new(env).evaluate(body);
        env.pop_scope();
        match result? {
            AstNode::Num(n) => Ok(n.raw()),
            _ => Ok(f64::NAN),
        }
    }
}

/// An evaluation session: the explicit owner of the shared Environment.
///
/// Definitions accumulate across calls for the lifetime of the session;
/// redefinition is last-write-wins. The host resets or drops the session to
/// tear the state down — there are no hidden globals.
///
/// # Example
/// ```
/// use algom::runtime::Session;
///
/// let mut session = Session::new();
/// session.compile("let a := 2;");
/// assert_eq!(session.evaluate("a + 1;"), "3");
/// session.reset();
/// assert_eq!(session.evaluate("a;"), "a");
/// ```
#[derive(Debug, Clone)]
pub struct Session {
    env: Environment,
}

#[allow(clippy::new_without_default)]
impl Session {
    /// Creates a session with an empty root environment.
    #[must_use]
    pub fn new() -> Self {
        Self { env: Environment::new(), }
    }

    /// Drops every accumulated definition.
    pub fn reset(&mut self) {
        self.env.reset();
    }

    /// Gives the host direct access to the session environment.
    pub fn environment(&mut self) -> &mut Environment {
        &mut self.env
    }

    /// Parses source text into a statement list.
    ///
    /// All failures — lexical and syntactic — are returned as data: the
    /// result's `error` holds the message and the root holds a single error
    /// node so downstream visitors stay total.
    #[must_use]
    pub fn parse(&self, source: &str) -> Parsed {
        let tokens = match tokenize(source) {
            Ok(tokens) => tokens,
            Err(e) => {
                let message = e.to_string();
                return Parsed { root:  vec![AstNode::Error(message.clone())],
                                error: Some(message), };
            },
        };

        let mut ctx = ParseCtx::new(&self.env);
        let mut iter = tokens.iter().peekable();
        match parse_program(&mut iter, &mut ctx) {
            Ok(root) => Parsed { root, error: None },
            Err(e) => {
                let message = e.to_string();
                Parsed { root:  vec![AstNode::Error(message.clone())],
                         error: Some(message), }
            },
        }
    }

    /// Parses and evaluates source text against the session environment.
    ///
    /// On a parse failure the interpreter is never invoked and the error is
    /// passed through. A runtime failure (unknown function, arity mismatch,
    /// capability gap) also lands in `error`.
    pub fn compile(&mut self, source: &str) -> RuntimeValue {
        let parsed = self.parse(source);
        if let Some(error) = parsed.error {
            return RuntimeValue { value: None,
                                  error: Some(error), };
        }
        match Interpreter::new(&mut self.env).eval_program(&parsed.root) {
            Ok(AstNode::Error(message)) => RuntimeValue { value: None,
                                                          error: Some(message), },
            Ok(node) => RuntimeValue { value: Some(node),
                                       error: None, },
            Err(e) => RuntimeValue { value: None,
                                     error: Some(e.to_string()), },
        }
    }

    /// Parses and evaluates source text, rendering the final value through
    /// the canonical stringifier.
    pub fn evaluate(&mut self, source: &str) -> String {
        let parsed = self.parse(source);
        if let Some(error) = parsed.error {
            return error;
        }
        match Interpreter::new(&mut self.env).eval_program(&parsed.root) {
            Ok(node) => to_string::render(&node),
            Err(e) => e.to_string(),
        }
    }

    /// Parses source for LaTeX rendering. Rendering itself is delegated to
    /// [`ToLatex`](crate::visitors::ToLatex), which the consumer applies.
    #[must_use]
    pub fn to_latex(&self, source: &str) -> Parsed {
        self.parse(source)
    }

    /// Convenience: parse and render to LaTeX in one step.
    pub fn latex(&self, source: &str) -> String {
        to_latex::render(&self.parse(source).ast())
    }

    /// Evaluates a node and renders the result through the LaTeX visitor.
    /// Used for live previews of already-parsed trees.
    pub fn eval_node(&mut self, node: &AstNode) -> String {
        match Interpreter::new(&mut self.env).evaluate(node) {
            Ok(result) => to_latex::render(&result),
            Err(e) => e.to_string(),
        }
    }

    /// Synthesizes `let f(params) := body;`, compiles it, and returns the
    /// callable.
    ///
    /// This is the bridge to numeric callers: plot samplers and spreadsheet
    /// formulas compile once and then apply the [`CompiledFn`] at many
    /// points. The session environment is snapshotted into the callable, so
    /// constants and functions already defined remain visible; the session
    /// itself is left untouched.
    ///
    /// # Errors
    /// Returns the diagnostic message when the body does not parse or does
    /// not compile to a function.
    pub fn make_function(&self, body: &str, params: &[&str]) -> Result<CompiledFn, String> {
        let source = format!("let f({}) := {};", params.join(", "), body);
        let mut env = self.env.clone();

        let tokens = tokenize(&source).map_err(|e| e.to_string())?;
        let mut ctx = ParseCtx::new(&env);
        let mut iter = tokens.iter().peekable();
        let root = parse_program(&mut iter, &mut ctx).map_err(|e| e.to_string())?;

        if let Err(e) = Interpreter::new(&mut env).eval_program(&root) {
            return Err(e.to_string());
        }
        match env.get_function("f").cloned() {
            Some(function) => Ok(CompiledFn { params: function.params,
                                              body: function.body,
                                              env }),
            None => Err(format!("Invalid expression {body}")),
        }
    }
}
