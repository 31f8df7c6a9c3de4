use crate::{
    error::SemanticError,
    interpreter::{
        evaluator::{
            core::EvalResult,
            utils::{check_arity, expect_number},
        },
        value::expression::Expression,
    },
};

/// Applies a unary real function to a `Number` argument.
///
/// The generated functions accept exactly one argument, which must be a
/// `Number`. Complex arguments are rejected.
///
/// # Example
/// ```
/// use plotscript::interpreter::evaluator::function::builtin::sin;
///
/// let r = sin(&[(std::f64::consts::PI / 2.0).into()]).unwrap();
/// assert_eq!(r, 1.0.into());
/// ```
macro_rules! real_builtin {
    ($fname:ident, $name:literal, $real_fn:ident) => {
        #[doc = concat!("Computes `", $name, "` of a `Number`.")]
        pub fn $fname(args: &[Expression]) -> EvalResult<Expression> {
            check_arity(args, 1, $name)?;

            Ok(expect_number(&args[0], $name)?.$real_fn().into())
        }
    };
}

real_builtin!(sin, "sin", sin);
real_builtin!(cos, "cos", cos);
real_builtin!(tan, "tan", tan);

/// Computes the natural logarithm of a `Number`.
///
/// # Errors
/// Negative arguments are rejected. `ln 0` is negative infinity.
///
/// # Example
/// ```
/// use plotscript::interpreter::evaluator::function::builtin::ln;
///
/// assert_eq!(ln(&[1.0.into()]).unwrap(), 0.0.into());
/// assert!(ln(&[(-1.0).into()]).is_err());
/// ```
pub fn ln(args: &[Expression]) -> EvalResult<Expression> {
    check_arity(args, 1, "ln")?;

    let x = expect_number(&args[0], "ln")?;
    if x < 0.0 {
        return Err(SemanticError::InvalidArgument { procedure: "ln".to_string(),
                                                    details:   format!("{x} is negative") });
    }

    Ok(x.ln().into())
}

/// Applies a function to a `Complex` argument.
///
/// The generated functions accept exactly one argument, which must be a
/// `Complex`. Plain `Number`s are rejected.
macro_rules! complex_builtin {
    ($fname:ident, $name:literal, $doc:literal, |$c:ident| $body:expr) => {
        #[doc = $doc]
        pub fn $fname(args: &[Expression]) -> EvalResult<Expression> {
            check_arity(args, 1, $name)?;

            let $c = args[0].head
                            .as_complex()
                            .filter(|_| args[0].is_leaf())
                            .ok_or_else(|| SemanticError::TypeError { procedure: $name.to_string(),
                                                                      details:   format!("expected a Complex, got {}", args[0]), })?;
            Ok($body.into())
        }
    };
}

complex_builtin!(real, "real", "Returns the real part of a `Complex`.", |c| c.real);
complex_builtin!(imag, "imag", "Returns the imaginary part of a `Complex`.", |c| c.imaginary);
complex_builtin!(mag, "mag", "Returns the magnitude of a `Complex`.", |c| c.abs());
complex_builtin!(arg, "arg", "Returns the phase angle of a `Complex`, in radians.", |c| c.arg());
complex_builtin!(conj, "conj", "Returns the complex conjugate of a `Complex`.", |c| c.conj());
