use std::collections::HashMap;

use crate::interpreter::value::{atom::Atom, complex::ComplexNumber};

/// The head symbol of a canonical list.
pub const LIST: &str = "list";
/// The head symbol of a closure value.
pub const LAMBDA: &str = "lambda";

/// A node of the abstract syntax tree, and the type of every runtime value.
///
/// An expression is a head [`Atom`], an ordered tail of child expressions and
/// an unordered map of named properties. Cloning is a deep, independent copy.
///
/// Equality compares heads and tails only. Everything else is ignored.
#[derive(Debug, Clone, Default)]
pub struct Expression {
    /// The head atom.
    pub head:       Atom,
    /// The ordered child expressions.
    pub tail:       Vec<Self>,
    /// Named annotations attached with `set-property` or by plot generators.
    pub properties: HashMap<String, Self>,
    /// Bindings a closure took over from the procedure call that created it.
    /// Empty for every other value and never rendered.
    pub captured:   HashMap<String, Self>,
    /// Marks the body of a lambda. Only affects rendering of `list` heads.
    pub in_lambda:  bool,
}

impl Expression {
    /// Creates a leaf expression with the given head and an empty tail.
    #[must_use]
    pub fn new(head: Atom) -> Self {
        Self { head,
               ..Self::default() }
    }

    /// Creates a leaf expression headed by `name`.
    #[must_use]
    pub fn symbol(name: &str) -> Self {
        Self::new(Atom::Symbol(name.to_string()))
    }

    /// Creates a leaf expression holding a string literal.
    #[must_use]
    pub fn string(text: &str) -> Self {
        Self::new(Atom::Str(text.to_string()))
    }

    /// Creates a canonical list from its elements.
    ///
    /// # Example
    /// ```
    /// use plotscript::interpreter::value::expression::Expression;
    ///
    /// let list = Expression::list(vec![1.0.into(), 2.0.into()]);
    /// assert!(list.is_list());
    /// assert_eq!(list.to_string(), "((1) (2))");
    /// ```
    #[must_use]
    pub fn list(elements: Vec<Self>) -> Self {
        Self { head: Atom::Symbol(LIST.to_string()),
               tail: elements,
               ..Self::default() }
    }

    /// Appends a child expression to the tail.
    pub fn push(&mut self, child: Self) {
        self.tail.push(child);
    }

    /// Attaches `value` under `key`, replacing any previous value.
    pub fn set_property(&mut self, key: &str, value: Self) {
        self.properties.insert(key.to_string(), value);
    }

    /// Returns the property stored under `key`, or the empty expression if
    /// there is none.
    #[must_use]
    pub fn property(&self, key: &str) -> Self {
        self.properties.get(key).cloned().unwrap_or_default()
    }

    /// Returns `true` if this is a canonical list (head is the symbol `list`).
    #[must_use]
    pub fn is_list(&self) -> bool {
        self.head.is_symbol_named(LIST)
    }

    /// Returns `true` if this is a closure value (head is the symbol
    /// `lambda`).
    #[must_use]
    pub fn is_lambda(&self) -> bool {
        self.head.is_symbol_named(LAMBDA)
    }

    /// Returns `true` if the node has no children.
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        self.tail.is_empty()
    }

    /// Returns `true` if this is the empty default expression.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        self.head.is_none() && self.tail.is_empty()
    }

    /// The head of a `Number` leaf.
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        self.head.as_number()
    }

    /// The name of a bare symbol: a `Symbol` head with nothing applied to it.
    #[must_use]
    pub fn as_bare_symbol(&self) -> Option<&str> {
        if self.is_leaf() { self.head.as_symbol() } else { None }
    }
}

impl PartialEq for Expression {
    fn eq(&self, other: &Self) -> bool {
        self.head == other.head && self.tail == other.tail
    }
}

impl From<Atom> for Expression {
    fn from(atom: Atom) -> Self {
        Self::new(atom)
    }
}

impl From<f64> for Expression {
    fn from(value: f64) -> Self {
        Self::new(Atom::Number(value))
    }
}

impl From<ComplexNumber> for Expression {
    fn from(value: ComplexNumber) -> Self {
        Self::new(Atom::Complex(value))
    }
}

impl std::fmt::Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.head.is_none() {
            return write!(f, "NONE");
        }

        write!(f, "(")?;

        let mut first = true;
        if !(self.is_lambda() || self.is_list() && !self.in_lambda) {
            write!(f, "{}", self.head)?;
            first = false;
        }

        for child in &self.tail {
            if !first {
                write!(f, " ")?;
            }
            write!(f, "{child}")?;
            first = false;
        }

        write!(f, ")")
    }
}
