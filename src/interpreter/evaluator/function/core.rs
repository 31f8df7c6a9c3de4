use crate::{
    error::SemanticError,
    interpreter::{
        evaluator::{
            core::EvalResult,
            function::{arithmetic, builtin, list, plot},
        },
        value::expression::Expression,
    },
};

/// Type alias for builtin procedure handlers.
///
/// A builtin receives a slice of evaluated argument expressions and returns
/// the result expression.
pub type BuiltinFn = fn(&[Expression]) -> EvalResult<Expression>;

/// Specifies the allowed number of arguments for a builtin.
///
/// - `Exact(n)` means the builtin must receive exactly `n` arguments.
/// - `OneOf(slice)` means the builtin accepts any arity listed in `slice`.
/// - `Any` means the builtin accepts any number of arguments.
#[derive(Debug, Clone, Copy)]
pub enum Arity {
    Exact(usize),
    OneOf(&'static [usize]),
    Any,
}

/// Defines builtin procedures by generating a lookup table and a name list.
///
/// Each entry provides:
/// - a string name,
/// - an arity specification,
/// - a function pointer implementing the builtin.
///
/// The macro produces:
/// - `BUILTIN_TABLE` (static table for lookup),
/// - `BUILTIN_PROCEDURES` (public list of builtin names).
macro_rules! builtin_procedures {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        static BUILTIN_TABLE: &[Builtin] = &[
            $(
                Builtin { name: $name, arity: $arity, func: $func },
            )*
        ];
        /// Names of every built-in procedure, in table order.
        pub const BUILTIN_PROCEDURES: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_procedures! {
    "+"             => { arity: Arity::Any,             func: arithmetic::add },
    "-"             => { arity: Arity::OneOf(&[1, 2]),  func: arithmetic::subtract },
    "*"             => { arity: Arity::Any,             func: arithmetic::multiply },
    "/"             => { arity: Arity::OneOf(&[1, 2]),  func: arithmetic::divide },
    "^"             => { arity: Arity::Exact(2),        func: arithmetic::power },
    "sqrt"          => { arity: Arity::Exact(1),        func: arithmetic::sqrt },
    "ln"            => { arity: Arity::Exact(1),        func: builtin::ln },
    "sin"           => { arity: Arity::Exact(1),        func: builtin::sin },
    "cos"           => { arity: Arity::Exact(1),        func: builtin::cos },
    "tan"           => { arity: Arity::Exact(1),        func: builtin::tan },
    "real"          => { arity: Arity::Exact(1),        func: builtin::real },
    "imag"          => { arity: Arity::Exact(1),        func: builtin::imag },
    "mag"           => { arity: Arity::Exact(1),        func: builtin::mag },
    "arg"           => { arity: Arity::Exact(1),        func: builtin::arg },
    "conj"          => { arity: Arity::Exact(1),        func: builtin::conj },
    "list"          => { arity: Arity::Any,             func: list::list },
    "first"         => { arity: Arity::Exact(1),        func: list::first },
    "rest"          => { arity: Arity::Exact(1),        func: list::rest },
    "length"        => { arity: Arity::Exact(1),        func: list::length },
    "append"        => { arity: Arity::Exact(2),        func: list::append },
    "join"          => { arity: Arity::Exact(2),        func: list::join },
    "range"         => { arity: Arity::Exact(3),        func: list::range },
    "discrete-plot" => { arity: Arity::OneOf(&[1, 2]),  func: plot::discrete_plot },
}

impl Arity {
    /// Tests whether the given argument count satisfies this arity constraint.
    ///
    /// Returns `true` if the count is permitted, `false` otherwise.
    #[must_use]
    pub fn check(&self, n: usize) -> bool {
        match self {
            Self::Exact(m) => n == *m,
            Self::OneOf(arr) => arr.contains(&n),
            Self::Any => true,
        }
    }
}

/// A native procedure: its name, accepted arities and implementation.
#[derive(Debug)]
pub struct Builtin {
    pub name:  &'static str,
    pub arity: Arity,
    func:      BuiltinFn,
}

impl Builtin {
    /// Verifies the argument count and runs the procedure.
    ///
    /// # Errors
    /// `ArgumentCountMismatch` on a bad argument count, otherwise whatever
    /// the procedure reports.
    ///
    /// # Example
    /// ```
    /// use plotscript::interpreter::evaluator::function::core::lookup_builtin;
    ///
    /// let length = lookup_builtin("length").unwrap();
    /// assert!(length.call(&[]).is_err());
    /// ```
    pub fn call(&self, args: &[Expression]) -> EvalResult<Expression> {
        if !self.arity.check(args.len()) {
            return Err(SemanticError::ArgumentCountMismatch { procedure: self.name.to_string() });
        }
        (self.func)(args)
    }
}

/// Finds the built-in procedure named `name`.
#[must_use]
pub fn lookup_builtin(name: &str) -> Option<&'static Builtin> {
    BUILTIN_TABLE.iter().find(|b| b.name == name)
}
