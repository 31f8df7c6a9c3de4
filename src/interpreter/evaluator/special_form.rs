use std::collections::HashSet;

use log::debug;

use crate::{
    error::SemanticError,
    interpreter::{
        environment::{Environment, check_bindable},
        evaluator::{
            core::{EvalResult, Evaluator, Procedure},
            function::plot,
            utils::check_form_arity,
        },
        value::expression::{Expression, LAMBDA},
    },
};

impl Evaluator<'_> {
    /// Evaluates `(begin expr...)`.
    ///
    /// Every child is evaluated in order and the value of the last one is
    /// returned. Definitions made by earlier children stay in effect even if
    /// a later child fails.
    pub(crate) fn eval_begin(&self,
                             expr: &Expression,
                             env: &mut Environment<'_>)
                             -> EvalResult<Expression> {
        let mut result = None;
        for child in &expr.tail {
            result = Some(self.eval(child, env)?);
        }

        result.ok_or_else(|| SemanticError::MalformedSpecialForm { form:    "begin".to_string(),
                                                                   details: "expected at least one expression".to_string(), })
    }

    /// Evaluates `(define symbol expr)`.
    ///
    /// The value is evaluated in the current environment and bound there.
    /// Returns the bound value.
    ///
    /// # Errors
    /// - Wrong shape or a non-symbol target.
    /// - The symbol is a special form, a built-in, or already bound.
    pub(crate) fn eval_define(&self,
                              expr: &Expression,
                              env: &mut Environment<'_>)
                              -> EvalResult<Expression> {
        check_form_arity(expr, 2, "define")?;

        let name = expr.tail[0].as_bare_symbol().ok_or_else(|| {
                                                    SemanticError::MalformedSpecialForm { form:    "define".to_string(),
                                                                                          details: "first argument must be a symbol".to_string(), }
                                                })?;

        check_bindable(name)?;
        if env.is_bound_value(name) {
            return Err(SemanticError::SymbolRedefinition { name: name.to_string() });
        }

        let value = self.eval(&expr.tail[1], env)?;

        debug!("defining '{name}' as {value}");
        env.bind_value(name, value.clone())?;
        Ok(value)
    }

    /// Evaluates `(lambda (params...) body)` into a closure value.
    ///
    /// The body is not evaluated. The result has the shape
    /// `(lambda (list params...) body)`. Inside a procedure call the closure
    /// also captures every binding of the call's scopes, so it keeps working
    /// after the call returns.
    ///
    /// # Errors
    /// Fails if a parameter is not a symbol, is reserved, or is repeated.
    pub(crate) fn eval_lambda(expr: &Expression, env: &Environment<'_>) -> EvalResult<Expression> {
        check_form_arity(expr, 2, "lambda")?;

        // `(x y)` parses as `x` applied to `y`, so the head is the first parameter.
        let declared = &expr.tail[0];
        let first = Expression::new(declared.head.clone());
        let mut seen = HashSet::new();
        let mut params = Vec::with_capacity(declared.tail.len() + 1);

        for param in std::iter::once(&first).chain(&declared.tail) {
            let Some(name) = param.as_bare_symbol() else {
                return Err(SemanticError::MalformedSpecialForm { form:    "lambda".to_string(),
                                                                 details: format!("parameter '{param}' is not a symbol"), });
            };

            check_bindable(name)?;
            if !seen.insert(name) {
                return Err(SemanticError::MalformedSpecialForm { form:    "lambda".to_string(),
                                                                 details: format!("duplicate parameter '{name}'"), });
            }

            params.push(Expression::symbol(name));
        }

        let mut body = expr.tail[1].clone();
        body.in_lambda = true;

        let mut closure = Expression::symbol(LAMBDA);
        closure.push(Expression::list(params));
        closure.push(body);
        closure.captured = env.local_bindings();
        Ok(closure)
    }

    /// Evaluates `(apply procedure list)`.
    ///
    /// The procedure is applied to the elements of the evaluated list.
    pub(crate) fn eval_apply(&self,
                             expr: &Expression,
                             env: &mut Environment<'_>)
                             -> EvalResult<Expression> {
        let (name, list) = self.procedure_and_list(expr, "apply", env)?;

        let env: &Environment<'_> = env;
        let procedure = Self::resolve_procedure(name, env)?;
        self.invoke(name, procedure, list.tail, env)
    }

    /// Evaluates `(map procedure list)`.
    ///
    /// The procedure is applied to each element separately. Results keep the
    /// order of the input list.
    pub(crate) fn eval_map(&self,
                           expr: &Expression,
                           env: &mut Environment<'_>)
                           -> EvalResult<Expression> {
        let (name, list) = self.procedure_and_list(expr, "map", env)?;

        let env: &Environment<'_> = env;
        let procedure = Self::resolve_procedure(name, env)?;

        let results = list.tail
                          .into_iter()
                          .map(|element| self.invoke(name, procedure, vec![element], env))
                          .collect::<EvalResult<Vec<_>>>()?;

        Ok(Expression::list(results))
    }

    /// Checks the shared shape of `apply` and `map`: a bare procedure name
    /// followed by an expression that evaluates to a list.
    fn procedure_and_list<'e>(&self,
                              expr: &'e Expression,
                              form: &str,
                              env: &mut Environment<'_>)
                              -> EvalResult<(&'e str, Expression)> {
        if expr.tail.len() != 2 {
            return Err(SemanticError::ArgumentCountMismatch { procedure: form.to_string() });
        }

        let name = expr.tail[0].as_bare_symbol()
                               .ok_or_else(|| SemanticError::TypeError { procedure: form.to_string(),
                                                                         details:   "first argument must be a procedure".to_string(), })?;

        let list = self.eval(&expr.tail[1], env)?;
        if !list.is_list() {
            return Err(SemanticError::TypeError { procedure: form.to_string(),
                                                  details:   "second argument must be a list".to_string(), });
        }

        Ok((name, list))
    }

    /// Evaluates `(set-property key value target)`.
    ///
    /// Returns a copy of the evaluated target carrying the evaluated value
    /// under `key`. The target is evaluated before the value.
    pub(crate) fn eval_set_property(&self,
                                    expr: &Expression,
                                    env: &mut Environment<'_>)
                                    -> EvalResult<Expression> {
        if expr.tail.len() != 3 {
            return Err(SemanticError::ArgumentCountMismatch { procedure: "set-property".to_string() });
        }

        let key = property_key(&expr.tail[0], "set-property")?;

        let mut target = self.eval(&expr.tail[2], env)?;
        let value = self.eval(&expr.tail[1], env)?;

        target.set_property(key, value);
        Ok(target)
    }

    /// Evaluates `(get-property key target)`.
    ///
    /// Returns the property stored under `key`, or `NONE` if there is none.
    pub(crate) fn eval_get_property(&self,
                                    expr: &Expression,
                                    env: &mut Environment<'_>)
                                    -> EvalResult<Expression> {
        if expr.tail.len() != 2 {
            return Err(SemanticError::ArgumentCountMismatch { procedure: "get-property".to_string() });
        }

        let key = property_key(&expr.tail[0], "get-property")?;
        let target = self.eval(&expr.tail[1], env)?;

        Ok(target.property(key))
    }

    /// Evaluates `(continuous-plot procedure bounds [options])`.
    ///
    /// `procedure` is either a bare procedure name or an expression that
    /// evaluates to a lambda. The procedure is sampled without polling the
    /// interrupt, so a plot always runs to completion once started.
    pub(crate) fn eval_continuous_plot(&self,
                                       expr: &Expression,
                                       env: &mut Environment<'_>)
                                       -> EvalResult<Expression> {
        const FORM: &str = "continuous-plot";

        if !(2..=3).contains(&expr.tail.len()) {
            return Err(SemanticError::ArgumentCountMismatch { procedure: FORM.to_string() });
        }

        let target = &expr.tail[0];
        let closure = match target.as_bare_symbol() {
            Some(_) => None,
            None => Some(self.eval(target, env)?),
        };

        let bounds = self.eval(&expr.tail[1], env)?;
        let options = match expr.tail.get(2) {
            Some(options) => self.eval(options, env)?,
            None => Expression::list(Vec::new()),
        };

        let env: &Environment<'_> = env;
        let (name, procedure) = match (target.as_bare_symbol(), &closure) {
            (Some(name), _) => (name, Self::resolve_procedure(name, env)?),
            (None, Some(value)) if value.is_lambda() => (LAMBDA, Procedure::Lambda(value)),
            _ => {
                return Err(SemanticError::TypeError { procedure: FORM.to_string(),
                                                      details:   "first argument must be a procedure".to_string(), });
            },
        };

        let sampler = self.uninterruptible();
        plot::continuous_plot(&bounds, &options, |x| {
            let y = sampler.invoke(name, procedure, vec![x.into()], env)?;
            y.as_number()
             .filter(|_| y.is_leaf())
             .ok_or_else(|| SemanticError::TypeError { procedure: FORM.to_string(),
                                                       details:   format!("procedure returned {y}, expected a Number"), })
        })
    }
}

/// Extracts the string literal naming a property.
fn property_key<'e>(expr: &'e Expression, form: &str) -> EvalResult<&'e str> {
    expr.head
        .as_string()
        .filter(|_| expr.is_leaf())
        .ok_or_else(|| SemanticError::TypeError { procedure: form.to_string(),
                                                  details:   "first argument must be a String".to_string(), })
}
