/// Core evaluation logic.
///
/// Contains the main evaluation engine: node dispatch, terminal lookup,
/// procedure resolution and user procedure calls.
pub mod core;

/// Special form evaluation.
///
/// Implements `begin`, `define`, `lambda`, `apply`, `map`, `set-property`,
/// `get-property` and `continuous-plot`, each with its own argument rules.
pub mod special_form;

/// Utility functions for evaluation.
///
/// Provides the special form table and argument checking helpers shared by
/// special forms and built-in procedures.
pub mod utils;

/// Built-in procedures.
///
/// Holds the fixed procedure table and the arithmetic, complex, list and plot
/// procedures it points to.
pub mod function;
