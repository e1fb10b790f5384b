use std::collections::HashMap;

use crate::{
    ast::AstNode,
    interpreter::library::Library,
};

/// A user-defined function: a parameter list bound over an unevaluated body.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    /// The declared name.
    pub name:   String,
    /// Parameter names, duplicates removed (first occurrence wins).
    pub params: Vec<String>,
    /// The unevaluated body expression.
    pub body:   AstNode,
}

impl Function {
    /// Builds a function definition, deduplicating parameter names.
    #[must_use]
    pub fn new(name: &str, params: Vec<String>, body: AstNode) -> Self {
        let mut seen = std::collections::HashSet::new();
        let params = params.into_iter().filter(|p| seen.insert(p.clone())).collect();
        Self { name: name.to_string(),
               params,
               body }
    }
}

/// One lexical scope: name bindings plus function definitions.
#[derive(Debug, Clone, Default)]
struct Scope {
    variables: HashMap<String, AstNode>,
    functions: HashMap<String, Function>,
}

/// The evaluation environment: a stack of nested scopes over a shared,
/// read-only builtin library.
///
/// The environment is an explicitly constructed, explicitly passed context
/// object. Its lifetime is owned by the host (usually through a
/// [`Session`](crate::runtime::Session)), which resets or drops it;
/// definitions accumulate until then and redefinition is last-write-wins.
///
/// # Example
/// ```
/// use algom::{ast::AstNode, interpreter::environment::Environment};
///
/// let mut env = Environment::new();
/// env.define("x", AstNode::Bool(true));
/// assert_eq!(env.get("x"), Some(&AstNode::Bool(true)));
/// assert_eq!(env.get("y"), None);
/// ```
#[derive(Debug, Clone)]
pub struct Environment {
    scopes: Vec<Scope>,
}

#[allow(clippy::new_without_default)]
impl Environment {
    /// Creates an environment with a single root scope.
    #[must_use]
    pub fn new() -> Self {
        Self { scopes: vec![Scope::default()], }
    }

    /// Returns the shared builtin library.
    #[must_use]
    pub fn library(&self) -> &'static Library {
        Library::shared()
    }

    /// Pushes a fresh child scope.
    pub fn push_scope(&mut self) {
        self.scopes.push(Scope::default());
    }

    /// Pops the innermost scope. The root scope is never popped.
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Drops every binding and returns to a single empty root scope.
    pub fn reset(&mut self) {
        self.scopes.clear();
        self.scopes.push(Scope::default());
    }

    /// Defines a name in the innermost scope. Redefinition overwrites.
    pub fn define(&mut self, name: &str, value: AstNode) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.variables.insert(name.to_string(), value);
        }
    }

    /// Defines a function in the innermost scope. Redefinition overwrites.
    pub fn define_function(&mut self, function: Function) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.functions.insert(function.name.clone(), function);
        }
    }

    /// Assigns to the nearest scope that already owns `name`; if no scope
    /// does, the name is defined locally instead.
    ///
    /// # Example
    /// ```
    /// use algom::{ast::AstNode, interpreter::environment::Environment};
    ///
    /// let mut env = Environment::new();
    /// env.define("x", AstNode::Bool(false));
    /// env.push_scope();
    /// env.assign("x", AstNode::Bool(true));
    /// env.pop_scope();
    /// assert_eq!(env.get("x"), Some(&AstNode::Bool(true)));
    /// ```
    pub fn assign(&mut self, name: &str, value: AstNode) {
        for scope in self.scopes.iter_mut().rev() {
            if scope.variables.contains_key(name) {
                scope.variables.insert(name.to_string(), value);
                return;
            }
        }
        self.define(name, value);
    }

    /// Looks a name up, walking from the innermost scope outward.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&AstNode> {
        for scope in self.scopes.iter().rev() {
            if let Some(value) = scope.variables.get(name) {
                return Some(value);
            }
        }
        None
    }

    /// Looks a user-defined function up, innermost scope first.
    #[must_use]
    pub fn get_function(&self, name: &str) -> Option<&Function> {
        for scope in self.scopes.iter().rev() {
            if let Some(function) = scope.functions.get(name) {
                return Some(function);
            }
        }
        None
    }

    /// Returns `true` when `name` is callable: a user-defined function in any
    /// scope, or a builtin. User definitions shadow builtins.
    #[must_use]
    pub fn has_function(&self, name: &str) -> bool {
        self.get_function(name).is_some() || self.library().has_function(name)
    }

    /// Collects the names of every user-defined function in scope.
    #[must_use]
    pub fn function_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        for scope in &self.scopes {
            names.extend(scope.functions.keys().cloned());
        }
        names
    }
}

#[cfg(test)]
mod tests {
    use super::{Environment, Function};
    use crate::ast::AstNode;

    #[test]
    fn definitions_are_scope_local() {
        let mut env = Environment::new();
        env.define("x", AstNode::Chars("outer".into()));
        env.push_scope();
        env.define("x", AstNode::Chars("inner".into()));
        assert_eq!(env.get("x"), Some(&AstNode::Chars("inner".into())));
        env.pop_scope();
        assert_eq!(env.get("x"), Some(&AstNode::Chars("outer".into())));
    }

    #[test]
    fn assign_walks_to_nearest_owner() {
        let mut env = Environment::new();
        env.define("x", AstNode::Null);
        env.push_scope();
        env.assign("x", AstNode::Bool(true));
        env.assign("fresh", AstNode::Bool(false));
        env.pop_scope();
        assert_eq!(env.get("x"), Some(&AstNode::Bool(true)));
        // "fresh" was defined in the popped scope, not hoisted.
        assert_eq!(env.get("fresh"), None);
    }

    #[test]
    fn redefinition_is_last_write_wins() {
        let mut env = Environment::new();
        env.define("x", AstNode::Bool(false));
        env.define("x", AstNode::Bool(true));
        assert_eq!(env.get("x"), Some(&AstNode::Bool(true)));
    }

    #[test]
    fn user_functions_shadow_builtins() {
        let mut env = Environment::new();
        assert!(env.has_function("sin"));
        assert!(env.get_function("sin").is_none());
        env.define_function(Function::new("sin", vec!["x".into()], AstNode::Null));
        assert!(env.get_function("sin").is_some());
    }

    #[test]
    fn duplicate_params_are_dropped() {
        let f = Function::new("f", vec!["x".into(), "x".into(), "y".into()], AstNode::Null);
        assert_eq!(f.params, vec!["x".to_string(), "y".to_string()]);
    }
}
