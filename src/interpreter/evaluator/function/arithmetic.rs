use crate::{
    error::SemanticError,
    interpreter::{
        evaluator::core::EvalResult,
        value::{
            atom::Atom,
            complex::{ComplexNumber, ONE},
            expression::Expression,
        },
    },
};

/// A numeric argument, before or after promotion to complex.
#[derive(Debug, Clone, Copy)]
enum Operand {
    Real(f64),
    Complex(ComplexNumber),
}

impl Operand {
    /// Reads a numeric argument.
    ///
    /// # Errors
    /// `TypeError` if `arg` is not a `Number` or `Complex` leaf.
    fn from_arg(arg: &Expression, procedure: &str) -> EvalResult<Self> {
        match (&arg.head, arg.is_leaf()) {
            (Atom::Number(n), true) => Ok(Self::Real(*n)),
            (Atom::Complex(c), true) => Ok(Self::Complex(*c)),
            _ => Err(SemanticError::TypeError { procedure: procedure.to_string(),
                                                details:   format!("expected a numeric argument, got {arg}"), }),
        }
    }

    fn to_complex(self) -> ComplexNumber {
        match self {
            Self::Real(r) => r.into(),
            Self::Complex(c) => c,
        }
    }
}

impl From<Operand> for Expression {
    fn from(operand: Operand) -> Self {
        match operand {
            Operand::Real(r) => r.into(),
            Operand::Complex(c) => c.into(),
        }
    }
}

/// Combines two operands, promoting both to complex if either one is.
fn combine(left: Operand,
           right: Operand,
           real_op: fn(f64, f64) -> f64,
           complex_op: fn(ComplexNumber, ComplexNumber) -> ComplexNumber)
           -> Operand {
    match (left, right) {
        (Operand::Real(a), Operand::Real(b)) => Operand::Real(real_op(a, b)),
        (a, b) => Operand::Complex(complex_op(a.to_complex(), b.to_complex())),
    }
}

/// Folds every argument into `init` with the given operation.
fn fold(args: &[Expression],
        procedure: &str,
        init: f64,
        real_op: fn(f64, f64) -> f64,
        complex_op: fn(ComplexNumber, ComplexNumber) -> ComplexNumber)
        -> EvalResult<Expression> {
    args.iter()
        .try_fold(Operand::Real(init), |acc, arg| {
            Ok(combine(acc, Operand::from_arg(arg, procedure)?, real_op, complex_op))
        })
        .map(Expression::from)
}

/// Sums any number of arguments. With no arguments the result is `0`.
///
/// The result is `Complex` as soon as one argument is.
///
/// # Example
/// ```
/// use plotscript::interpreter::{
///     evaluator::function::arithmetic::add,
///     value::{complex::ComplexNumber, expression::Expression},
/// };
///
/// let sum = add(&[2.0.into(), 3.0.into()]).unwrap();
/// assert_eq!(sum, 5.0.into());
///
/// let sum = add(&[2.0.into(), ComplexNumber::new(0.0, 1.0).into()]).unwrap();
/// assert_eq!(sum, ComplexNumber::new(2.0, 1.0).into());
/// ```
pub fn add(args: &[Expression]) -> EvalResult<Expression> {
    fold(args, "+", 0.0, |a, b| a + b, |a, b| a + b)
}

/// Multiplies any number of arguments. With no arguments the result is `1`.
pub fn multiply(args: &[Expression]) -> EvalResult<Expression> {
    fold(args, "*", 1.0, |a, b| a * b, |a, b| a * b)
}

/// Negates one argument, or subtracts the second argument from the first.
///
/// # Example
/// ```
/// use plotscript::interpreter::evaluator::function::arithmetic::subtract;
///
/// assert_eq!(subtract(&[4.0.into()]).unwrap(), (-4.0).into());
/// assert_eq!(subtract(&[4.0.into(), 1.5.into()]).unwrap(), 2.5.into());
/// ```
pub fn subtract(args: &[Expression]) -> EvalResult<Expression> {
    let result = match args {
        [x] => combine(Operand::Real(0.0),
                       Operand::from_arg(x, "-")?,
                       |a, b| a - b,
                       |a, b| a - b),
        [a, b] => combine(Operand::from_arg(a, "-")?,
                          Operand::from_arg(b, "-")?,
                          |a, b| a - b,
                          |a, b| a - b),
        _ => return Err(SemanticError::ArgumentCountMismatch { procedure: "-".to_string() }),
    };

    Ok(result.into())
}

/// Inverts one argument, or divides the first argument by the second.
///
/// Division follows IEEE semantics: dividing by zero yields an infinity or
/// NaN rather than an error.
pub fn divide(args: &[Expression]) -> EvalResult<Expression> {
    let result = match args {
        [x] => match Operand::from_arg(x, "/")? {
            Operand::Real(r) => Operand::Real(r.recip()),
            Operand::Complex(c) => Operand::Complex(ONE / c),
        },
        [a, b] => combine(Operand::from_arg(a, "/")?,
                          Operand::from_arg(b, "/")?,
                          |a, b| a / b,
                          |a, b| a / b),
        _ => return Err(SemanticError::ArgumentCountMismatch { procedure: "/".to_string() }),
    };

    Ok(result.into())
}

/// Raises the first argument to the power of the second.
///
/// Two `Number`s use the real power function. A `Complex` operand switches to
/// the principal complex power.
///
/// # Example
/// ```
/// use plotscript::interpreter::evaluator::function::arithmetic::power;
///
/// assert_eq!(power(&[2.0.into(), 10.0.into()]).unwrap(), 1024.0.into());
/// ```
pub fn power(args: &[Expression]) -> EvalResult<Expression> {
    let [base, exponent] = args else {
        return Err(SemanticError::ArgumentCountMismatch { procedure: "^".to_string() });
    };

    let result = combine(Operand::from_arg(base, "^")?,
                         Operand::from_arg(exponent, "^")?,
                         f64::powf,
                         ComplexNumber::powc);
    Ok(result.into())
}

/// Computes square roots of numeric values.
///
/// - A non-negative `Number` returns a `Number`.
/// - A negative `Number` returns a purely imaginary `Complex`.
/// - A `Complex` returns its principal square root.
///
/// # Example
/// ```
/// use plotscript::interpreter::{
///     evaluator::function::arithmetic::sqrt,
///     value::complex::ComplexNumber,
/// };
///
/// assert_eq!(sqrt(&[4.0.into()]).unwrap(), 2.0.into());
/// assert_eq!(sqrt(&[(-4.0).into()]).unwrap(), ComplexNumber::new(0.0, 2.0).into());
/// ```
pub fn sqrt(args: &[Expression]) -> EvalResult<Expression> {
    let [x] = args else {
        return Err(SemanticError::ArgumentCountMismatch { procedure: "sqrt".to_string() });
    };

    let root = match Operand::from_arg(x, "sqrt")? {
        Operand::Real(r) if r >= 0.0 => Operand::Real(r.sqrt()),
        Operand::Real(r) => Operand::Complex(ComplexNumber::new(0.0, (-r).sqrt())),
        Operand::Complex(c) => Operand::Complex(c.sqrt()),
    };

    Ok(root.into())
}
