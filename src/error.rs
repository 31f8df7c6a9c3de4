/// Parsing errors.
///
/// Defines all error types that can occur while tokenizing and parsing a
/// program. Parse errors cover unbalanced parentheses, malformed numeric
/// literals, unterminated strings and programs that are not a single
/// parenthesized expression.
pub mod parse_error;
/// Semantic errors.
///
/// Contains all error types that can be raised during evaluation. Semantic
/// errors include unknown symbols, arity and type mismatches, illegal
/// redefinitions, malformed special forms and external interruption.
pub mod semantic_error;

pub use parse_error::ParseError;
pub use semantic_error::SemanticError;
