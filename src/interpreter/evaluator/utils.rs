use crate::{
    error::SemanticError,
    interpreter::{evaluator::core::EvalResult, value::expression::Expression},
};

/// Head symbols evaluated with their own rules instead of procedure
/// application. None of them can be bound by user code.
pub const SPECIAL_FORMS: &[&str] = &["begin",
                                     "define",
                                     "lambda",
                                     "apply",
                                     "map",
                                     "set-property",
                                     "get-property",
                                     "continuous-plot"];

/// Returns `true` if `name` is a special form.
///
/// # Example
/// ```
/// use plotscript::interpreter::evaluator::utils::is_special_form;
///
/// assert!(is_special_form("define"));
/// assert!(!is_special_form("list"));
/// ```
#[must_use]
pub fn is_special_form(name: &str) -> bool {
    SPECIAL_FORMS.contains(&name)
}

/// Checks that a built-in received exactly `expected` arguments.
///
/// # Errors
/// `ArgumentCountMismatch` naming `procedure` otherwise.
pub fn check_arity(args: &[Expression], expected: usize, procedure: &str) -> EvalResult<()> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(SemanticError::ArgumentCountMismatch { procedure: procedure.to_string() })
    }
}

/// Checks that a special form has exactly `expected` children.
///
/// # Errors
/// `MalformedSpecialForm` naming `form` otherwise.
pub fn check_form_arity(expr: &Expression, expected: usize, form: &str) -> EvalResult<()> {
    if expr.tail.len() == expected {
        Ok(())
    } else {
        Err(SemanticError::MalformedSpecialForm { form:    form.to_string(),
                                                  details: format!("expected {expected} arguments, got {}",
                                                                   expr.tail.len()), })
    }
}

/// Extracts a `Number` argument.
///
/// # Errors
/// `TypeError` naming `procedure` if `arg` is not a numeric leaf.
pub fn expect_number(arg: &Expression, procedure: &str) -> EvalResult<f64> {
    arg.as_number()
       .filter(|_| arg.is_leaf())
       .ok_or_else(|| SemanticError::TypeError { procedure: procedure.to_string(),
                                                 details:   format!("expected a Number, got {arg}"), })
}

/// Extracts a canonical list argument.
///
/// # Errors
/// `TypeError` naming `procedure` if `arg` is not headed by `list`.
pub fn expect_list<'a>(arg: &'a Expression, procedure: &str) -> EvalResult<&'a [Expression]> {
    if arg.is_list() {
        Ok(&arg.tail)
    } else {
        Err(SemanticError::TypeError { procedure: procedure.to_string(),
                                       details:   format!("expected a list, got {arg}"), })
    }
}
