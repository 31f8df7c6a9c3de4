/// Numeric conversion and formatting helpers.
///
/// This module provides a safe `usize` to `f64` conversion that never loses
/// data silently, and the `%g`-style significant-digit formatter used for the
/// numeric labels of generated plots.
pub mod num;
