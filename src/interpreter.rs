use std::io::Read;

use log::debug;

use crate::{
    error::{ParseError, SemanticError},
    interpreter::{
        environment::Environment,
        evaluator::core::{EvalResult, Evaluator},
        interrupt::Interrupt,
        parser::{ParseResult, parse_program},
        value::expression::Expression,
    },
};

/// The symbol table used during evaluation.
///
/// Maps symbols to values in a chain of scopes, holds the baseline constants
/// and enforces single assignment.
pub mod environment;
/// The evaluator module executes expression trees and computes results.
///
/// The evaluator dispatches special forms, resolves symbols, applies built-in
/// and user-defined procedures and reports semantic errors.
///
/// # Responsibilities
/// - Evaluates expressions, special forms and procedure applications.
/// - Provides the built-in procedure library, including plot generators.
/// - Reports semantic errors such as unknown symbols or invalid arguments.
pub mod evaluator;
/// Cooperative cancellation of running evaluations.
pub mod interrupt;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces a stream of tokens:
/// parentheses, string literals and plain lexemes. Comments and whitespace are
/// dropped and line numbers are tracked for error reporting.
pub mod lexer;
/// The parser module builds an expression tree from tokens.
///
/// # Responsibilities
/// - Converts tokens into a single root expression.
/// - Classifies lexemes into numbers and symbols.
/// - Rejects unbalanced, empty or trailing input with a located error.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// Declares the tagged [`Atom`](value::atom::Atom) leaf type, complex numbers
/// and the [`Expression`] tree that doubles as the type of every runtime value.
pub mod value;

/// A long-lived interpreter session.
///
/// A session owns one environment, so definitions made by one program are
/// visible to the programs evaluated after it until [`Interpreter::reset`] is
/// called. Each program is parsed first and then evaluated.
///
/// # Example
/// ```
/// use plotscript::interpreter::Interpreter;
///
/// let mut interp = Interpreter::new();
///
/// assert!(interp.parse_stream("(define answer 42)".as_bytes()));
/// assert!(interp.evaluate().is_ok());
///
/// assert!(interp.parse_stream("(+ answer 1)".as_bytes()));
/// assert_eq!(interp.evaluate().unwrap(), 43.0.into());
/// ```
#[derive(Debug, Default)]
pub struct Interpreter {
    environment: Environment<'static>,
    program:     Option<Expression>,
    interrupt:   Option<Interrupt>,
}

impl Interpreter {
    /// Creates a session with a fresh environment and no interrupt attached.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads and parses a whole program from `stream`.
    ///
    /// Returns `true` if the program parsed. On failure the previous program
    /// is discarded, so a following [`Interpreter::evaluate`] fails too.
    pub fn parse_stream<R: Read>(&mut self, mut stream: R) -> bool {
        self.program = None;

        let mut source = String::new();
        let parsed = stream.read_to_string(&mut source)
                           .map_err(|e| ParseError::Io { message: e.to_string() })
                           .and_then(|_| self.parse(&source));

        parsed.is_ok()
    }

    /// Parses a program held in memory.
    ///
    /// # Errors
    /// Returns the parse error. The previous program is discarded either way.
    pub fn parse(&mut self, source: &str) -> ParseResult<()> {
        self.program = None;
        self.program = Some(parse_program(source)?);
        Ok(())
    }

    /// Evaluates the last parsed program in the session environment.
    ///
    /// # Errors
    /// - `NoProgram` if the last parse failed or nothing was parsed.
    /// - Any semantic error raised by the program, including `Interrupted`.
    pub fn evaluate(&mut self) -> EvalResult<Expression> {
        let program = self.program.as_ref().ok_or(SemanticError::NoProgram)?;

        let evaluator = self.interrupt
                            .as_ref()
                            .map_or_else(Evaluator::new, Evaluator::with_interrupt);

        evaluator.eval(program, &mut self.environment)
                 .inspect_err(|e| debug!("evaluation failed: {e}"))
    }

    /// Attaches an interrupt that is polled during evaluation.
    pub fn set_interrupt(&mut self, interrupt: Interrupt) {
        self.interrupt = Some(interrupt);
    }

    /// Returns a handle to the attached interrupt, attaching a new one if
    /// there is none yet.
    pub fn interrupt(&mut self) -> Interrupt {
        self.interrupt.get_or_insert_with(Interrupt::new).clone()
    }

    /// Drops every user definition and restores the baseline environment.
    pub fn reset(&mut self) {
        debug!("resetting environment");
        self.environment.reset();
    }

    /// The session environment.
    #[must_use]
    pub const fn environment(&self) -> &Environment<'static> {
        &self.environment
    }
}
