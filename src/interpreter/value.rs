/// Tagged leaf values.
///
/// Defines the `Atom` type that heads every expression node: the empty atom,
/// real numbers, symbols, complex numbers and string literals, together with
/// the tolerant equality used for numeric atoms.
pub mod atom;
/// Complex number support.
///
/// Defines the `ComplexNumber` type used for arithmetic with real and imaginary
/// parts, including square roots, powers, logarithms and the tolerant
/// component-wise equality.
pub mod complex;
/// The recursive expression type.
///
/// Defines `Expression`, the node type of the syntax tree and the type of every
/// runtime value, with its property map and textual rendering.
pub mod expression;
