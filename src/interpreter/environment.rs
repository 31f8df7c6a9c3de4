use std::collections::HashMap;

use crate::{
    error::SemanticError,
    interpreter::{
        evaluator::{
            core::EvalResult,
            function::core::{Builtin, lookup_builtin},
            utils::is_special_form,
        },
        value::{complex::I, expression::Expression},
    },
};

/// A symbol table of bound values layered over an optional parent scope.
///
/// The root environment holds the baseline constants `pi`, `e` and `I` and
/// every user `define`. Calling a user procedure creates a child environment
/// that borrows its parent immutably and holds the call's parameters and any
/// local definitions; it is dropped when the call returns. A closure built
/// inside such a call copies the call's bindings with
/// [`local_bindings`](Self::local_bindings), so its own calls see them later.
///
/// Built-in procedures are not stored per environment. They come from the
/// fixed procedure table, so user code can never extend or override them.
///
/// Bindings are single-assignment: a symbol that already has a value anywhere
/// in the scope chain, or that names a built-in procedure or special form,
/// cannot be bound again.
#[derive(Debug)]
pub struct Environment<'p> {
    values: HashMap<String, Expression>,
    parent: Option<&'p Environment<'p>>,
}

impl Default for Environment<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment<'static> {
    /// Creates a root environment holding the baseline bindings.
    ///
    /// # Example
    /// ```
    /// use plotscript::interpreter::environment::Environment;
    ///
    /// let env = Environment::new();
    /// assert!(env.is_bound_value("pi"));
    /// assert!(env.is_bound_procedure("+"));
    /// assert!(!env.is_bound_value("x"));
    /// ```
    #[must_use]
    pub fn new() -> Self {
        let mut env = Self { values: HashMap::new(),
                             parent: None, };
        env.reset();
        env
    }
}

impl<'p> Environment<'p> {
    /// Creates an empty scope whose lookups fall back to `parent`.
    #[must_use]
    pub fn child(parent: &'p Environment<'p>) -> Self {
        Self::with_bindings(parent, HashMap::new())
    }

    /// Creates a scope over `parent` that starts out holding `bindings`.
    #[must_use]
    pub fn with_bindings(parent: &'p Environment<'p>, bindings: HashMap<String, Expression>) -> Self {
        Self { values: bindings,
               parent: Some(parent), }
    }

    /// Returns the outermost scope of the chain.
    #[must_use]
    pub fn root(&self) -> &Environment<'p> {
        match self.parent {
            Some(parent) => parent.root(),
            None => self,
        }
    }

    /// Collects the bindings of every scope above the root. Inner scopes
    /// shadow outer ones.
    ///
    /// # Example
    /// ```
    /// use plotscript::interpreter::environment::Environment;
    ///
    /// let root = Environment::new();
    /// assert!(root.local_bindings().is_empty());
    ///
    /// let mut outer = Environment::child(&root);
    /// outer.bind_parameter("x", 1.0.into()).unwrap();
    /// let mut inner = Environment::child(&outer);
    /// inner.bind_parameter("x", 2.0.into()).unwrap();
    ///
    /// let bindings = inner.local_bindings();
    /// assert_eq!(bindings.len(), 1);
    /// assert_eq!(bindings["x"], 2.0.into());
    /// ```
    #[must_use]
    pub fn local_bindings(&self) -> HashMap<String, Expression> {
        let mut bindings = HashMap::new();

        let mut scope = self;
        while let Some(parent) = scope.parent {
            for (name, value) in &scope.values {
                bindings.entry(name.clone())
                        .or_insert_with(|| value.clone());
            }
            scope = parent;
        }

        bindings
    }

    /// Removes every user binding of this scope.
    ///
    /// A root environment gets its baseline constants back: `pi`, `e` and the
    /// imaginary unit `I`.
    pub fn reset(&mut self) {
        self.values.clear();

        if self.parent.is_none() {
            self.values
                .insert("pi".to_string(), std::f64::consts::PI.into());
            self.values
                .insert("e".to_string(), std::f64::consts::E.into());
            self.values.insert("I".to_string(), I.into());
        }
    }

    /// Looks up the value bound to `name`, searching enclosing scopes.
    #[must_use]
    pub fn lookup_value(&self, name: &str) -> Option<&Expression> {
        self.values
            .get(name)
            .or_else(|| self.parent.and_then(|parent| parent.lookup_value(name)))
    }

    /// Looks up the built-in procedure named `name`.
    #[must_use]
    pub fn lookup_procedure(&self, name: &str) -> Option<&'static Builtin> {
        lookup_builtin(name)
    }

    /// Returns `true` if `name` has a bound value in this scope chain.
    #[must_use]
    pub fn is_bound_value(&self, name: &str) -> bool {
        self.lookup_value(name).is_some()
    }

    /// Returns `true` if `name` is a built-in procedure.
    #[must_use]
    pub fn is_bound_procedure(&self, name: &str) -> bool {
        self.lookup_procedure(name).is_some()
    }

    /// Returns `true` if `name` is bound to a user-defined procedure, that is
    /// to a value headed by the symbol `lambda`.
    #[must_use]
    pub fn is_user_procedure(&self, name: &str) -> bool {
        self.lookup_value(name).is_some_and(Expression::is_lambda)
    }

    /// Binds `name` to `value` in this scope.
    ///
    /// # Errors
    /// - `SpecialFormRedefinition` if `name` is a special form.
    /// - `BuiltinRedefinition` if `name` is a built-in procedure.
    /// - `SymbolRedefinition` if `name` already has a value.
    ///
    /// # Example
    /// ```
    /// use plotscript::interpreter::environment::Environment;
    ///
    /// let mut env = Environment::new();
    /// assert!(env.bind_value("answer", 42.0.into()).is_ok());
    /// assert!(env.bind_value("answer", 43.0.into()).is_err());
    /// assert!(env.bind_value("pi", 3.14.into()).is_err());
    /// assert!(env.bind_value("+", 1.0.into()).is_err());
    /// ```
    pub fn bind_value(&mut self, name: &str, value: Expression) -> EvalResult<()> {
        check_bindable(name)?;

        if self.is_bound_value(name) {
            return Err(SemanticError::SymbolRedefinition { name: name.to_string() });
        }

        self.values.insert(name.to_string(), value);
        Ok(())
    }

    /// Binds a procedure parameter in this scope.
    ///
    /// Parameters may shadow values of enclosing scopes, but never special
    /// forms or built-in procedures.
    ///
    /// # Errors
    /// Returns an error if `name` is reserved or already bound in this scope.
    pub fn bind_parameter(&mut self, name: &str, value: Expression) -> EvalResult<()> {
        check_bindable(name)?;

        if self.values.contains_key(name) {
            return Err(SemanticError::SymbolRedefinition { name: name.to_string() });
        }

        self.values.insert(name.to_string(), value);
        Ok(())
    }
}

/// Rejects names that user code may never bind.
///
/// # Errors
/// Returns `SpecialFormRedefinition` or `BuiltinRedefinition`.
pub fn check_bindable(name: &str) -> EvalResult<()> {
    if is_special_form(name) {
        return Err(SemanticError::SpecialFormRedefinition { name: name.to_string() });
    }
    if lookup_builtin(name).is_some() {
        return Err(SemanticError::BuiltinRedefinition { name: name.to_string() });
    }
    Ok(())
}
