use std::cell::Cell;

use log::{debug, trace};

use crate::{
    error::SemanticError,
    interpreter::{
        environment::Environment,
        evaluator::function::core::Builtin,
        interrupt::Interrupt,
        value::{atom::Atom, expression::Expression},
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `SemanticError` describing the failure.
pub type EvalResult<T> = Result<T, SemanticError>;

/// Deepest nesting of [`Evaluator::eval`] calls before evaluation fails.
pub const MAX_DEPTH: usize = 128;

/// Something that can be applied to evaluated arguments.
///
/// Built-ins come from the fixed procedure table. User procedures are closure
/// values of the form `(lambda (list params...) body)`.
#[derive(Debug, Clone, Copy)]
pub enum Procedure<'a> {
    /// A native procedure.
    Builtin(&'static Builtin),
    /// A user-defined closure value.
    Lambda(&'a Expression),
}

/// Walks expression trees and computes their values.
///
/// The evaluator itself holds no bindings. Every call receives the
/// [`Environment`] to work in, so the same evaluator can serve a root
/// environment and the short-lived scopes created for procedure calls.
///
/// ## Cancellation
///
/// If an [`Interrupt`] is attached, it is polled before every node is
/// evaluated. Once raised, evaluation stops with
/// [`SemanticError::Interrupted`] and the flag is cleared.
///
/// ## Depth
///
/// Nested evaluation, including procedure calls, is limited to
/// [`MAX_DEPTH`] levels. Past that, evaluation fails with
/// [`SemanticError::DepthExceeded`] instead of exhausting the stack.
#[derive(Debug, Clone, Default)]
pub struct Evaluator<'i> {
    interrupt: Option<&'i Interrupt>,
    depth:     Cell<usize>,
}

impl<'i> Evaluator<'i> {
    /// Creates an evaluator that cannot be interrupted.
    #[must_use]
    pub const fn new() -> Self {
        Self { interrupt: None,
               depth:     Cell::new(0), }
    }

    /// Creates an evaluator that polls `interrupt` at every node.
    #[must_use]
    pub const fn with_interrupt(interrupt: &'i Interrupt) -> Self {
        Self { interrupt: Some(interrupt),
               depth:     Cell::new(0), }
    }

    /// An evaluator that ignores the interrupt but continues at the current
    /// depth.
    pub(crate) fn uninterruptible(&self) -> Self {
        Self { interrupt: None,
               depth:     Cell::new(self.depth.get()), }
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation. Dispatch
    /// follows a fixed precedence:
    ///
    /// 1. a pending interrupt or the depth limit aborts evaluation,
    /// 2. the special forms `continuous-plot`, `map`, `apply`, `set-property`
    ///    and `get-property`,
    /// 3. terminals (a node with no children whose head is not `list`),
    /// 4. `begin`, `define` and `lambda`,
    /// 5. procedure application.
    ///
    /// # Parameters
    /// - `expr`: Expression to evaluate.
    /// - `env`: Environment used for lookups and definitions.
    ///
    /// # Returns
    /// The value of the expression, or the first error encountered. Bindings
    /// made before an error are kept.
    ///
    /// # Example
    /// ```
    /// use plotscript::interpreter::{
    ///     environment::Environment,
    ///     evaluator::core::Evaluator,
    ///     parser::parse_program,
    /// };
    ///
    /// let mut env = Environment::new();
    /// let program = parse_program("(begin (define a 1) (+ a 2))").unwrap();
    ///
    /// let value = Evaluator::new().eval(&program, &mut env).unwrap();
    /// assert_eq!(value, 3.0.into());
    /// assert!(env.is_bound_value("a"));
    /// ```
    pub fn eval(&self, expr: &Expression, env: &mut Environment<'_>) -> EvalResult<Expression> {
        if let Some(interrupt) = self.interrupt
           && interrupt.take()
        {
            debug!("interrupt observed, aborting evaluation");
            return Err(SemanticError::Interrupted);
        }

        let depth = self.depth.get() + 1;
        if depth > MAX_DEPTH {
            debug!("evaluation depth limit of {MAX_DEPTH} reached");
            return Err(SemanticError::DepthExceeded { limit: MAX_DEPTH });
        }

        self.depth.set(depth);
        let result = self.eval_node(expr, env);
        self.depth.set(depth - 1);
        result
    }

    /// Dispatches a single node.
    fn eval_node(&self, expr: &Expression, env: &mut Environment<'_>) -> EvalResult<Expression> {
        if let Some(form) = expr.head.as_symbol() {
            match form {
                "continuous-plot" => return self.eval_continuous_plot(expr, env),
                "map" => return self.eval_map(expr, env),
                "apply" => return self.eval_apply(expr, env),
                "set-property" => return self.eval_set_property(expr, env),
                "get-property" => return self.eval_get_property(expr, env),
                _ => {},
            }
        }

        if expr.is_leaf() && !expr.is_list() {
            return Self::eval_terminal(&expr.head, env);
        }

        match expr.head.as_symbol() {
            Some("begin") => self.eval_begin(expr, env),
            Some("define") => self.eval_define(expr, env),
            Some("lambda") => Self::eval_lambda(expr, env),
            _ => self.eval_application(expr, env),
        }
    }

    /// Evaluates a node without children.
    ///
    /// Symbols resolve to their bound value. Every other atom evaluates to
    /// itself.
    fn eval_terminal(head: &Atom, env: &Environment<'_>) -> EvalResult<Expression> {
        match head {
            Atom::Symbol(name) => {
                env.lookup_value(name)
                   .cloned()
                   .ok_or_else(|| SemanticError::UnknownSymbol { name: name.clone() })
            },
            atom => Ok(Expression::new(atom.clone())),
        }
    }

    /// Evaluates a procedure application `(name args...)`.
    ///
    /// Arguments are evaluated eagerly, left to right, before the procedure
    /// is looked up.
    fn eval_application(&self,
                        expr: &Expression,
                        env: &mut Environment<'_>)
                        -> EvalResult<Expression> {
        let Some(name) = expr.head.as_symbol() else {
            return Err(SemanticError::NotAProcedure { name: expr.head.to_string() });
        };

        let args = self.eval_children(&expr.tail, env)?;

        let env: &Environment<'_> = env;
        let procedure = Self::resolve_procedure(name, env)?;
        self.invoke(name, procedure, args, env)
    }

    /// Evaluates each expression in order and collects the results.
    pub(crate) fn eval_children(&self,
                                children: &[Expression],
                                env: &mut Environment<'_>)
                                -> EvalResult<Vec<Expression>> {
        children.iter().map(|child| self.eval(child, env)).collect()
    }

    /// Finds the procedure named `name`.
    ///
    /// # Errors
    /// `NotAProcedure` if `name` is neither a built-in nor bound to a lambda.
    pub fn resolve_procedure<'a>(name: &str, env: &'a Environment<'_>) -> EvalResult<Procedure<'a>> {
        if let Some(builtin) = env.lookup_procedure(name) {
            return Ok(Procedure::Builtin(builtin));
        }

        match env.lookup_value(name) {
            Some(value) if value.is_lambda() => Ok(Procedure::Lambda(value)),
            _ => Err(SemanticError::NotAProcedure { name: name.to_string() }),
        }
    }

    /// Applies a procedure to already evaluated arguments.
    ///
    /// # Parameters
    /// - `name`: Name used in error messages.
    /// - `procedure`: The procedure to call.
    /// - `args`: Evaluated arguments.
    /// - `env`: Environment the call is made from. A lambda body only sees
    ///   its root.
    pub fn invoke(&self,
                  name: &str,
                  procedure: Procedure<'_>,
                  args: Vec<Expression>,
                  env: &Environment<'_>)
                  -> EvalResult<Expression> {
        match procedure {
            Procedure::Builtin(builtin) => {
                trace!("calling built-in '{name}' with {} argument(s)", args.len());
                builtin.call(&args)
            },
            Procedure::Lambda(lambda) => self.call_lambda(name, lambda, args, env),
        }
    }

    /// Calls a user-defined procedure.
    ///
    /// The body is evaluated in a fresh scope that binds the parameters
    /// positionally to `args`. That scope sits on the bindings the closure
    /// captured, which in turn sit on the root of `env`. Nothing local to the
    /// caller is visible. The scope, and any definition made inside the body,
    /// is discarded when the call returns.
    ///
    /// # Errors
    /// - `ArgumentCountMismatch` if `args` does not match the parameter count.
    /// - Any error raised by the body.
    pub fn call_lambda(&self,
                       name: &str,
                       lambda: &Expression,
                       args: Vec<Expression>,
                       env: &Environment<'_>)
                       -> EvalResult<Expression> {
        let (Some(params), Some(body)) = (lambda.tail.first(), lambda.tail.get(1)) else {
            return Err(SemanticError::NotAProcedure { name: name.to_string() });
        };

        if params.tail.len() != args.len() {
            return Err(SemanticError::ArgumentCountMismatch { procedure: name.to_string() });
        }

        debug!("calling procedure '{name}' with {} argument(s)", args.len());

        let closure_scope = Environment::with_bindings(env.root(), lambda.captured.clone());
        let mut scope = Environment::child(&closure_scope);
        for (param, arg) in params.tail.iter().zip(args) {
            let param = param.as_bare_symbol()
                             .ok_or_else(|| SemanticError::MalformedSpecialForm { form:    "lambda".to_string(),
                                                                                  details: "parameters must be symbols".to_string(), })?;
            scope.bind_parameter(param, arg)?;
        }

        self.eval(body, &mut scope)
    }
}
