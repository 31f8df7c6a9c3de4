use std::{thread, time::Duration};

use plotscript::{
    error::SemanticError,
    interpreter::{
        Interpreter,
        environment::Environment,
        evaluator::core::MAX_DEPTH,
        interrupt::Interrupt,
        value::expression::Expression,
    },
};

fn run(interp: &mut Interpreter, src: &str) -> Result<Expression, SemanticError> {
    assert!(interp.parse_stream(src.as_bytes()), "Program did not parse: {src}");
    interp.evaluate()
}

#[test]
fn definitions_persist_across_programs() {
    let mut interp = Interpreter::new();

    run(&mut interp, "(define a 2)").unwrap();
    run(&mut interp, "(define double (lambda (x) (* 2 x)))").unwrap();

    assert_eq!(run(&mut interp, "(double a)").unwrap(), 4.0.into());
    assert!(interp.environment().is_user_procedure("double"));
    assert!(!interp.environment().is_user_procedure("a"));
}

#[test]
fn redefinition_fails_across_programs() {
    let mut interp = Interpreter::new();

    run(&mut interp, "(define a 2)").unwrap();
    assert_eq!(run(&mut interp, "(define a 3)"),
               Err(SemanticError::SymbolRedefinition { name: "a".to_string() }));
    assert_eq!(run(&mut interp, "(a)").unwrap(), 2.0.into());
}

#[test]
fn failed_programs_keep_earlier_definitions() {
    let mut interp = Interpreter::new();

    assert!(run(&mut interp, "(begin (define a 1) (undefined-procedure a))").is_err());
    assert_eq!(run(&mut interp, "(+ a 1)").unwrap(), 2.0.into());
}

#[test]
fn reset_restores_the_baseline() {
    let mut interp = Interpreter::new();

    run(&mut interp, "(define a 1)").unwrap();
    interp.reset();

    assert_eq!(run(&mut interp, "(a)"),
               Err(SemanticError::UnknownSymbol { name: "a".to_string() }));
    assert!(interp.environment().is_bound_value("pi"));
    assert!(interp.environment().is_bound_value("e"));
    assert!(interp.environment().is_bound_value("I"));
    assert!(run(&mut interp, "(define a 5)").is_ok());
}

#[test]
fn evaluate_without_program_fails() {
    let mut interp = Interpreter::new();
    assert_eq!(interp.evaluate(), Err(SemanticError::NoProgram));

    run(&mut interp, "(+ 1 2)").unwrap();
    assert!(!interp.parse_stream("(+ 1".as_bytes()));
    assert_eq!(interp.evaluate(), Err(SemanticError::NoProgram));
    assert_eq!(SemanticError::NoProgram.to_string(),
               "Error: Invalid Program. Could not parse.");
}

#[test]
fn parse_reports_the_error() {
    let mut interp = Interpreter::new();

    assert!(interp.parse("(define a 1)").is_ok());
    assert!(interp.parse("()").is_err());
    assert_eq!(interp.evaluate(), Err(SemanticError::NoProgram));
}

#[test]
fn captured_bindings_outlive_the_program() {
    let mut interp = Interpreter::new();

    run(&mut interp, "(define make-scaler (lambda (k) (lambda (x) (* k x))))").unwrap();
    run(&mut interp, "(define triple (make-scaler 3))").unwrap();

    assert_eq!(run(&mut interp, "(triple 5)").unwrap(), 15.0.into());
    assert_eq!(run(&mut interp, "(k)"),
               Err(SemanticError::UnknownSymbol { name: "k".to_string() }));
}

#[test]
fn deep_recursion_fails_without_ending_the_session() {
    let mut interp = Interpreter::new();

    run(&mut interp, "(define loop (lambda (x) (loop x)))").unwrap();
    assert_eq!(run(&mut interp, "(loop 1)"),
               Err(SemanticError::DepthExceeded { limit: MAX_DEPTH }));

    assert_eq!(run(&mut interp, "(+ 1 2)").unwrap(), 3.0.into());
}

#[test]
fn raised_interrupt_aborts_evaluation() {
    let mut interp = Interpreter::new();
    let interrupt = interp.interrupt();

    interrupt.raise();
    assert_eq!(run(&mut interp, "(+ 1 2)"), Err(SemanticError::Interrupted));

    // The flag is cleared once observed.
    assert!(!interrupt.is_raised());
    assert_eq!(run(&mut interp, "(+ 1 2)").unwrap(), 3.0.into());
}

#[test]
fn interrupt_can_be_raised_from_another_thread() {
    let mut interp = Interpreter::new();
    let interrupt = Interrupt::new();
    interp.set_interrupt(interrupt.clone());

    let remote = interrupt.clone();
    thread::spawn(move || remote.raise()).join().unwrap();

    assert!(interrupt.is_raised());
    assert_eq!(run(&mut interp, "(begin (define a 1) a)"), Err(SemanticError::Interrupted));
    assert!(!interp.environment().is_bound_value("a"));
}

#[test]
fn interrupt_stops_a_long_evaluation() {
    let mut interp = Interpreter::new();
    let interrupt = interp.interrupt();

    let remote = interrupt.clone();
    let raiser = thread::spawn(move || {
        thread::sleep(Duration::from_millis(10));
        remote.raise();
    });

    // Keeps evaluating until it observes the interrupt.
    let program = "(begin (define f (lambda (x) (length (range 0 20000 1)))) \
                   (map f (range 0 100000 1)))";
    assert!(interp.parse_stream(program.as_bytes()));

    let result = interp.evaluate();
    raiser.join().unwrap();

    assert_eq!(result, Err(SemanticError::Interrupted));
    assert!(!interrupt.is_raised());
}

#[test]
fn child_scopes_shadow_without_leaking() {
    let mut root = Environment::new();
    root.bind_value("x", 1.0.into()).unwrap();

    {
        let mut scope = Environment::child(&root);
        scope.bind_parameter("x", 2.0.into()).unwrap();
        scope.bind_value("y", 3.0.into()).unwrap();

        assert_eq!(scope.lookup_value("x"), Some(&2.0.into()));
        assert_eq!(scope.lookup_value("pi"), Some(&std::f64::consts::PI.into()));
        assert!(scope.bind_parameter("x", 4.0.into()).is_err());
        assert!(scope.bind_parameter("list", 4.0.into()).is_err());
        assert!(scope.bind_parameter("lambda", 4.0.into()).is_err());
    }

    assert_eq!(root.lookup_value("x"), Some(&1.0.into()));
    assert!(!root.is_bound_value("y"));
}

#[test]
fn bindings_reject_reserved_names() {
    let mut env = Environment::new();

    assert_eq!(env.bind_value("define", 1.0.into()),
               Err(SemanticError::SpecialFormRedefinition { name: "define".to_string() }));
    assert_eq!(env.bind_value("sqrt", 1.0.into()),
               Err(SemanticError::BuiltinRedefinition { name: "sqrt".to_string() }));
    assert_eq!(env.bind_value("e", 1.0.into()),
               Err(SemanticError::SymbolRedefinition { name: "e".to_string() }));
}

#[test]
fn builtins_are_procedures_not_values() {
    let env = Environment::new();

    assert!(env.is_bound_procedure("discrete-plot"));
    assert!(!env.is_bound_procedure("continuous-plot"));
    assert!(!env.is_bound_value("+"));
    assert!(env.lookup_procedure("nope").is_none());
}
