//! # plotscript
//!
//! plotscript is a small Scheme-like expression language written in Rust.
//! It parses and evaluates programs over numbers, complex numbers, strings and
//! lists, supports user-defined procedures, and generates 2-D plots as lists
//! of graphic primitives.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use crate::interpreter::{
    environment::Environment,
    evaluator::core::Evaluator,
    parser::parse_program,
    value::expression::Expression,
};

/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised while lexing, parsing or
/// evaluating a program. Parse errors carry the source line; semantic errors
/// carry the procedure or symbol involved.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, evaluator).
/// - Renders every error as a user-facing message starting with `Error`.
/// - Integrates with `std::error::Error` for boxing and reporting.
pub mod error;
/// Orchestrates the entire process of program execution.
///
/// This module ties together lexing, parsing, evaluation, the value model and
/// the environment, and exposes the [`Interpreter`](interpreter::Interpreter)
/// session used by front ends.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, and values.
/// - Provides entry points for parsing and evaluating programs.
/// - Carries definitions between programs and supports cancellation.
pub mod interpreter;
/// General utilities for safe numeric conversion and formatting.
pub mod util;

/// Parses and evaluates a program in a fresh environment.
///
/// # Errors
/// Returns a `ParseError` if the program does not parse, or a
/// `SemanticError` if evaluation fails.
///
/// # Examples
/// ```
/// use plotscript::get_result;
///
/// let result = get_result("(begin (define a 1) (+ a 2))").unwrap();
/// assert_eq!(result.to_string(), "(3)");
///
/// // Unknown symbol.
/// assert!(get_result("(+ x 1)").is_err());
///
/// // Not a parenthesized expression.
/// assert!(get_result("x").is_err());
/// ```
pub fn get_result(source: &str) -> Result<Expression, Box<dyn std::error::Error>> {
    let program = parse_program(source)?;
    let mut environment = Environment::new();

    Ok(Evaluator::new().eval(&program, &mut environment)?)
}
