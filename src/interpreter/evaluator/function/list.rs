use crate::{
    error::SemanticError,
    interpreter::{
        evaluator::{
            core::EvalResult,
            utils::{check_arity, expect_list, expect_number},
        },
        value::expression::Expression,
    },
    util::num::usize_to_f64_checked,
};

/// Builds a list from its arguments.
///
/// # Example
/// ```
/// use plotscript::interpreter::evaluator::function::list::list;
///
/// let l = list(&[1.0.into(), 2.0.into()]).unwrap();
/// assert_eq!(l.to_string(), "((1) (2))");
/// ```
pub fn list(args: &[Expression]) -> EvalResult<Expression> {
    Ok(Expression::list(args.to_vec()))
}

/// Returns the first element of a non-empty list.
pub fn first(args: &[Expression]) -> EvalResult<Expression> {
    check_arity(args, 1, "first")?;

    expect_list(&args[0], "first")?.first()
                                    .cloned()
                                    .ok_or_else(|| empty_list("first"))
}

/// Returns every element of a non-empty list but the first.
///
/// # Example
/// ```
/// use plotscript::interpreter::{
///     evaluator::function::list::rest,
///     value::expression::Expression,
/// };
///
/// let single = Expression::list(vec![1.0.into()]);
/// assert!(rest(&[single]).unwrap().is_leaf());
///
/// assert!(rest(&[Expression::list(vec![])]).is_err());
/// ```
pub fn rest(args: &[Expression]) -> EvalResult<Expression> {
    check_arity(args, 1, "rest")?;

    match expect_list(&args[0], "rest")? {
        [] => Err(empty_list("rest")),
        [_, rest @ ..] => Ok(Expression::list(rest.to_vec())),
    }
}

/// Returns the number of elements of a list.
pub fn length(args: &[Expression]) -> EvalResult<Expression> {
    check_arity(args, 1, "length")?;

    let elements = expect_list(&args[0], "length")?;
    Ok(usize_to_f64_checked(elements.len(), "length")?.into())
}

/// Returns a copy of a list with one more element at the end.
///
/// The appended expression is added as a single element, even if it is a
/// list itself.
pub fn append(args: &[Expression]) -> EvalResult<Expression> {
    check_arity(args, 2, "append")?;

    let mut elements = expect_list(&args[0], "append")?.to_vec();
    elements.push(args[1].clone());
    Ok(Expression::list(elements))
}

/// Concatenates two lists.
pub fn join(args: &[Expression]) -> EvalResult<Expression> {
    check_arity(args, 2, "join")?;

    let mut elements = expect_list(&args[0], "join")?.to_vec();
    elements.extend_from_slice(expect_list(&args[1], "join")?);
    Ok(Expression::list(elements))
}

/// Builds the list `begin, begin + step, ...` of every value not past `end`.
///
/// # Errors
/// - Any argument is not a `Number`, or a bound is not finite.
/// - `begin` is greater than `end`.
/// - `step` is zero or negative.
///
/// # Example
/// ```
/// use plotscript::interpreter::evaluator::function::list::range;
///
/// let r = range(&[0.0.into(), 5.0.into(), 1.0.into()]).unwrap();
/// assert_eq!(r.to_string(), "((0) (1) (2) (3) (4) (5))");
///
/// assert!(range(&[5.0.into(), 0.0.into(), 1.0.into()]).is_err());
/// assert!(range(&[0.0.into(), 5.0.into(), (-1.0).into()]).is_err());
/// ```
pub fn range(args: &[Expression]) -> EvalResult<Expression> {
    check_arity(args, 3, "range")?;

    let begin = expect_number(&args[0], "range")?;
    let end = expect_number(&args[1], "range")?;
    let step = expect_number(&args[2], "range")?;

    if !begin.is_finite() || !end.is_finite() {
        return Err(SemanticError::InvalidArgument { procedure: "range".to_string(),
                                                    details:   "bounds must be finite".to_string(), });
    }
    if begin > end {
        return Err(SemanticError::InvalidArgument { procedure: "range".to_string(),
                                                    details:   format!("begin {begin} is greater than end {end}"), });
    }
    if step <= 0.0 || step.is_nan() {
        return Err(SemanticError::InvalidArgument { procedure: "range".to_string(),
                                                    details:   format!("increment {step} is not positive"), });
    }

    let mut elements = Vec::new();
    let mut value = begin;
    while value <= end {
        elements.push(value.into());

        let next = value + step;
        if next == value {
            return Err(SemanticError::InvalidArgument { procedure: "range".to_string(),
                                                        details:   format!("increment {step} is too small to advance past {value}"), });
        }
        value = next;
    }

    Ok(Expression::list(elements))
}

fn empty_list(procedure: &str) -> SemanticError {
    SemanticError::InvalidArgument { procedure: procedure.to_string(),
                                     details:   "argument is an empty list".to_string(), }
}
