use crate::interpreter::value::complex::ComplexNumber;

/// Absolute tolerance used when comparing numeric atoms.
///
/// Only comparisons use it; arithmetic is plain IEEE double arithmetic.
pub const EPSILON: f64 = 1e-7;

/// A tagged leaf value.
///
/// Every node of an [`Expression`](super::expression::Expression) has an atom
/// as its head. Exactly one kind is active at a time.
#[derive(Debug, Clone, Default)]
pub enum Atom {
    /// The empty atom. Heads the default expression and missing properties.
    #[default]
    None,
    /// A double precision real number.
    Number(f64),
    /// A name, compared by its exact text.
    Symbol(String),
    /// A complex number.
    Complex(ComplexNumber),
    /// A string literal, compared by its exact text.
    Str(String),
}

impl Atom {
    /// Classifies a plain (non string literal) lexeme.
    ///
    /// A lexeme that parses completely as a floating-point literal becomes a
    /// `Number`. Otherwise a lexeme that does not begin with a digit becomes a
    /// `Symbol`. Anything else is a malformed number and yields `None`.
    ///
    /// Words such as `inf` or `nan` are symbols, not numbers.
    ///
    /// # Example
    /// ```
    /// use plotscript::interpreter::value::atom::Atom;
    ///
    /// assert!(matches!(Atom::from_lexeme("1e-0"), Some(Atom::Number(n)) if n == 1.0));
    /// assert!(matches!(Atom::from_lexeme("+1"), Some(Atom::Number(n)) if n == 1.0));
    /// assert!(matches!(Atom::from_lexeme("-"), Some(Atom::Symbol(_))));
    /// assert!(matches!(Atom::from_lexeme("nan"), Some(Atom::Symbol(_))));
    /// assert!(Atom::from_lexeme("1abc").is_none());
    /// ```
    #[must_use]
    pub fn from_lexeme(lexeme: &str) -> Option<Self> {
        let unsigned = lexeme.strip_prefix(['+', '-']).unwrap_or(lexeme);
        let numeric_start = unsigned.starts_with(|c: char| c.is_ascii_digit() || c == '.');

        if numeric_start && let Ok(value) = lexeme.parse::<f64>() {
            return Some(Self::Number(value));
        }

        if lexeme.is_empty() || lexeme.starts_with(|c: char| c.is_ascii_digit()) {
            return None;
        }

        Some(Self::Symbol(lexeme.to_string()))
    }

    /// Returns `true` if the atom is [`Atom::None`].
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Returns `true` if the atom is a [`Atom::Number`].
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Self::Number(..))
    }

    /// Returns `true` if the atom is a [`Atom::Symbol`].
    #[must_use]
    pub const fn is_symbol(&self) -> bool {
        matches!(self, Self::Symbol(..))
    }

    /// Returns `true` if the atom is a [`Atom::Complex`].
    #[must_use]
    pub const fn is_complex(&self) -> bool {
        matches!(self, Self::Complex(..))
    }

    /// Returns `true` if the atom is a [`Atom::Str`].
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Self::Str(..))
    }

    /// The value of a `Number` atom.
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The name of a `Symbol` atom.
    #[must_use]
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Self::Symbol(s) => Some(s),
            _ => None,
        }
    }

    /// The value of a `Complex` atom.
    #[must_use]
    pub const fn as_complex(&self) -> Option<ComplexNumber> {
        match self {
            Self::Complex(c) => Some(*c),
            _ => None,
        }
    }

    /// The text of a `Str` atom.
    #[must_use]
    pub fn as_string(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns `true` if the atom is the symbol `name`.
    #[must_use]
    pub fn is_symbol_named(&self, name: &str) -> bool {
        self.as_symbol() == Some(name)
    }
}

impl PartialEq for Atom {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::None, Self::None) => true,
            (Self::Number(a), Self::Number(b)) => (a - b).abs() <= EPSILON,
            (Self::Complex(a), Self::Complex(b)) => a == b,
            (Self::Symbol(a), Self::Symbol(b)) | (Self::Str(a), Self::Str(b)) => a == b,
            _ => false,
        }
    }
}

impl From<f64> for Atom {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<ComplexNumber> for Atom {
    fn from(c: ComplexNumber) -> Self {
        Self::Complex(c)
    }
}

impl std::fmt::Display for Atom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => Ok(()),
            Self::Number(n) => write!(f, "{n}"),
            Self::Symbol(s) => write!(f, "{s}"),
            Self::Complex(c) => write!(f, "{c}"),
            Self::Str(s) => write!(f, "\"{s}\""),
        }
    }
}
