use std::fs;

use plotscript::get_result;
use walkdir::WalkDir;

#[test]
fn sample_programs_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/programs").into_iter()
                                      .filter_map(Result::ok)
                                      .filter(|e| e.path().extension().is_some_and(|ext| ext == "pls"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        count += 1;
        if let Err(e) = get_result(&content) {
            panic!("Program {path:?} failed:\n{content}\nError: {e}");
        }
    }

    assert!(count > 0, "No programs found in tests/programs");
}

fn assert_success(src: &str) {
    if let Err(e) = get_result(src) {
        panic!("Program failed: {src}\n{e}");
    }
}

fn assert_failure(src: &str) {
    if let Ok(result) = get_result(src) {
        panic!("Program succeeded with {result} but was expected to fail: {src}")
    }
}

fn assert_renders(src: &str, expected: &str) {
    match get_result(src) {
        Ok(result) => assert_eq!(result.to_string(), expected, "rendering of {src}"),
        Err(e) => panic!("Program failed: {src}\n{e}"),
    }
}

#[test]
fn terminals() {
    assert_renders("(1)", "(1)");
    assert_renders("(-2.5)", "(-2.5)");
    assert_renders("(1e2)", "(100)");
    assert_renders("(pi)", "(3.141592653589793)");
    assert_renders("(I)", "(0,1)");
    assert_renders("(\"a string\")", "(\"a string\")");
    assert_failure("(undefined-symbol)");
}

#[test]
fn real_arithmetic() {
    assert_renders("(+ 1 2)", "(3)");
    assert_renders("(+ 1 2 3 4)", "(10)");
    assert_renders("(* 2 3 4)", "(24)");
    assert_renders("(- 5)", "(-5)");
    assert_renders("(- 5 2)", "(3)");
    assert_renders("(/ 2)", "(0.5)");
    assert_renders("(/ 1 4)", "(0.25)");
    assert_renders("(^ 2 10)", "(1024)");
    assert_renders("(sqrt 4)", "(2)");
    assert_renders("(ln 1)", "(0)");
    assert_renders("(sin 0)", "(0)");
    assert_renders("(cos 0)", "(1)");
    assert_renders("(tan 0)", "(0)");
    assert_renders("(apply + (list))", "(0)");
    assert_renders("(apply * (list))", "(1)");
}

#[test]
fn division_by_zero_follows_ieee() {
    assert_renders("(/ 1 0)", "(inf)");
    assert_renders("(/ -1 0)", "(-inf)");
}

#[test]
fn arithmetic_type_and_arity_errors() {
    assert_failure("(+ 1 (list 1 2))");
    assert_failure("(- 1 2 3)");
    assert_failure("(/ 1 2 3)");
    assert_failure("(^ 2)");
    assert_failure("(sqrt 1 2)");
    assert_failure("(ln -1)");
    assert_failure("(ln I)");
    assert_failure("(sin I)");
    assert_failure("(cos (list 1))");
    assert_failure("(+ 1 \"two\")");
}

#[test]
fn complex_arithmetic() {
    assert_renders("(+ 2 I)", "(2,1)");
    assert_renders("(+ 2 3 I)", "(5,1)");
    assert_renders("(- I)", "(0,-1)");
    assert_renders("(* I I)", "(-1,0)");
    assert_renders("(sqrt -4)", "(0,2)");
    assert_renders("(real (+ 1 (* 2 I)))", "(1)");
    assert_renders("(imag (+ 1 (* 2 I)))", "(2)");
    assert_renders("(mag (+ 3 (* 4 I)))", "(5)");
    assert_renders("(arg (+ 0 I))", "(1.5707963267948966)");
    assert_renders("(conj (+ 1 I))", "(1,-1)");
}

#[test]
fn complex_accessors_reject_numbers() {
    assert_failure("(real 1)");
    assert_failure("(imag 1)");
    assert_failure("(mag 1)");
    assert_failure("(arg 1)");
    assert_failure("(conj 1)");
}

#[test]
fn complex_power_and_sqrt() {
    assert_success("(begin (define z (^ I 2)) (real z))");
    assert_renders("(^ 4 0.5)", "(2)");
}

#[test]
fn define_binds_and_returns_value() {
    assert_renders("(define a 1)", "(1)");
    assert_renders("(begin (define a 1) (define b (+ a 1)) (* a b))", "(2)");
}

#[test]
fn define_rejects_redefinition() {
    assert_failure("(define pi 3.14)");
    assert_failure("(define e 1)");
    assert_failure("(define I 1)");
    assert_failure("(define begin 1)");
    assert_failure("(define lambda 1)");
    assert_failure("(define continuous-plot 1)");
    assert_failure("(define + 1)");
    assert_failure("(define list 1)");
    assert_failure("(begin (define a 1) (define a 2))");
}

#[test]
fn define_requires_a_symbol_and_a_value() {
    assert_failure("(define 1 2)");
    assert_failure("(define \"a\" 2)");
    assert_failure("(define a)");
    assert_failure("(define a 1 2)");
}

#[test]
fn begin_returns_last_value() {
    assert_renders("(begin 1 2 3)", "(3)");
    assert_failure("(begin)");
}

#[test]
fn lambda_renders_parameters_and_body() {
    assert_renders("(lambda (x) (* 2 x))", "(((x)) (* (2) (x)))");
    assert_renders("(lambda (x y) (list x y))", "(((x) (y)) (list (x) (y)))");
}

#[test]
fn lambda_application() {
    assert_renders("(begin (define f (lambda (x) (* 2 x))) (f 3))", "(6)");
    assert_renders("(begin (define add (lambda (a b) (+ a b))) (add 3 4))", "(7)");
    assert_renders("(begin (define k 10) (define g (lambda (x) (+ x k))) (g 1))", "(11)");
}

#[test]
fn lambda_parameters_shadow_outer_values() {
    assert_renders("(begin (define x 10) (define f (lambda (x) (* x 2))) (f 3))", "(6)");
    assert_renders("(begin (define x 10) (define f (lambda (x) (* x 2))) (f 3) x)", "(10)");
}

#[test]
fn lambda_definitions_stay_local() {
    assert_renders("(begin (define f (lambda (x) (begin (define y x) y))) (+ (f 1) (f 2)))",
                   "(3)");
    assert_failure("(begin (define f (lambda (x) (begin (define y x) y))) (f 1) y)");
}

#[test]
fn closures_keep_the_bindings_they_were_built_with() {
    assert_renders("(begin (define make-adder (lambda (n) (lambda (x) (+ x n)))) \
                    (define add5 (make-adder 5)) \
                    (add5 1))",
                   "(6)");
    assert_renders("(begin (define curry (lambda (a) (lambda (b) (lambda (c) (+ a b c))))) \
                    (define f (curry 1)) (define g (f 2)) (g 3))",
                   "(6)");
    assert_renders("(begin (define make (lambda (n) (begin (define m (* n 2)) (lambda (x) (+ x m))))) \
                    (define g (make 3)) (g 1))",
                   "(7)");
    assert_renders("(begin (define scale (lambda (k) (begin (define h (lambda (x) (* k x))) (map h (list 1 2))))) \
                    (scale 3))",
                   "((3) (6))");
}

#[test]
fn closures_do_not_see_their_callers() {
    assert_failure("(begin (define f (lambda (x) (+ x y))) (define g (lambda (y) (f 1))) (g 10))");
    assert_failure("(begin (define f (lambda (x) (+ x z))) \
                    (define g (lambda (y) (begin (define z 1) (f y)))) (g 10))");
    assert_renders("(begin (define f (lambda (x) (+ x z))) (define z 1) (f 10))", "(11)");
}

#[test]
fn runaway_recursion_fails() {
    assert_failure("(begin (define f (lambda (x) (f x))) (f 1))");
    assert_failure("(begin (define f (lambda (x) (+ 1 (f x)))) (f 1))");
}

#[test]
fn nested_programs_evaluate() {
    let depth = 100;
    let program = format!("{}1{}", "(+ 1 ".repeat(depth), ")".repeat(depth));
    assert_renders(&program, "(101)");
}

#[test]
fn lambda_rejects_bad_parameters_at_construction() {
    assert_failure("(lambda (x x) x)");
    assert_failure("(lambda (x +) x)");
    assert_failure("(lambda (define) 1)");
    assert_failure("(lambda (x 1) x)");
    assert_failure("(lambda (x))");
}

#[test]
fn lambda_arity_is_checked_at_call() {
    assert_failure("(begin (define f (lambda (x) x)) (f 1 2))");
    assert_failure("(begin (define f (lambda (x y) x)) (f 1))");
}

#[test]
fn application_requires_a_procedure() {
    assert_failure("(1 2)");
    assert_failure("(begin (define a 1) (a 2))");
    assert_failure("(nope 1 2)");
}

#[test]
fn list_procedures() {
    assert_renders("(list 1 2 3)", "((1) (2) (3))");
    assert_renders("(list)", "()");
    assert_renders("(list (list 1) 2)", "(((1)) (2))");
    assert_renders("(first (list 1 2 3))", "(1)");
    assert_renders("(rest (list 1 2 3))", "((2) (3))");
    assert_renders("(rest (list 1))", "()");
    assert_renders("(length (list 1 2 3))", "(3)");
    assert_renders("(length (list))", "(0)");
    assert_renders("(append (list 1 2) 3)", "((1) (2) (3))");
    assert_renders("(append (list 1) (list 2))", "((1) ((2)))");
    assert_renders("(join (list 1) (list 2 3))", "((1) (2) (3))");
}

#[test]
fn list_procedure_errors() {
    assert_failure("(first (list))");
    assert_failure("(rest (list))");
    assert_failure("(first 1)");
    assert_failure("(length 1)");
    assert_failure("(append 1 (list 2))");
    assert_failure("(join (list 1) 2)");
}

#[test]
fn range_procedure() {
    assert_renders("(range 0 5 1)", "((0) (1) (2) (3) (4) (5))");
    assert_renders("(range 0 1 0.5)", "((0) (0.5) (1))");
    assert_renders("(range 1 1 1)", "((1))");
    assert_failure("(range 5 0 1)");
    assert_failure("(range 0 5 -1)");
    assert_failure("(range 0 5 0)");
    assert_failure("(range 0 5)");
}

#[test]
fn apply_unpacks_the_list() {
    assert_renders("(apply + (list 1 2 3))", "(6)");
    assert_renders("(begin (define f (lambda (a b) (- a b))) (apply f (list 5 2)))", "(3)");
    assert_failure("(apply + 3)");
    assert_failure("(apply (+ 1 2) (list 1))");
    assert_failure("(apply nope (list 1))");
    assert_failure("(apply - (list 1 2 3))");
}

#[test]
fn map_preserves_order_and_length() {
    assert_renders("(begin (define f (lambda (x) (* x x))) (map f (list 1 2 3)))", "((1) (4) (9))");
    assert_renders("(map - (list 1 2))", "((-1) (-2))");
    assert_renders("(map sqrt (list))", "()");
    assert_failure("(begin (define f (lambda (x y) x)) (map f (list 1 2)))");
    assert_failure("(map + 1)");
}

#[test]
fn properties() {
    assert_renders("(get-property \"note\" (set-property \"note\" \"a number\" (3)))",
                   "(\"a number\")");
    assert_renders("(get-property \"missing\" (3))", "NONE");
    assert_renders("(set-property \"size\" 2 (list 1 2))", "((1) (2))");
    assert_renders("(begin (define a (set-property \"k\" (+ 1 2) (4))) (get-property \"k\" a))",
                   "(3)");
    assert_failure("(set-property 1 2 (3))");
    assert_failure("(set-property \"k\" 2)");
    assert_failure("(get-property k (3))");
    assert_failure("(get-property \"k\")");
}

#[test]
fn special_forms_check_their_arguments() {
    assert_failure("(map)");
    assert_failure("(apply)");
    assert_failure("(set-property)");
    assert_failure("(get-property)");
    assert_failure("(continuous-plot)");
}

#[test]
fn rendering_is_deterministic() {
    let program = "(begin (define f (lambda (x) (list x (* 2 x)))) (map f (range 0 3 1)))";

    let first = get_result(program).map(|r| r.to_string()).ok();
    let second = get_result(program).map(|r| r.to_string()).ok();

    assert!(first.is_some());
    assert_eq!(first, second);
}
