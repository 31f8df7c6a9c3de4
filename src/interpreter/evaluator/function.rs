/// Arithmetic procedures.
///
/// `+`, `-`, `*`, `/`, `^` and `sqrt` over Numbers, promoting to complex
/// arithmetic as soon as one operand is Complex.
pub mod arithmetic;
/// Unary math and complex accessor procedures.
///
/// `ln`, `sin`, `cos` and `tan` on Numbers, and `real`, `imag`, `mag`, `arg`
/// and `conj` on Complex values.
pub mod builtin;
/// The builtin procedure table.
pub mod core;
/// List procedures.
pub mod list;
/// Plot generators and graphic primitives.
///
/// Scales data into a fixed box and emits points, lines and text labels.
pub mod plot;
