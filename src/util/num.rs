use crate::{error::SemanticError, interpreter::evaluator::core::EvalResult};

/// Largest integer value exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_U64_INT: u64 = 9_007_199_254_740_991;

/// Safely converts a `usize` to `f64` if and only if it is exactly
/// representable.
///
/// ## Errors
/// Returns an error if the value exceeds `MAX_SAFE_U64_INT`.
///
/// ## Parameters
/// - `value`: The unsigned integer to convert.
/// - `procedure`: The procedure that needs the conversion, for error reporting.
///
/// ## Returns
/// - `Ok(f64)`: The converted value if safe.
/// - `Err(SemanticError::InvalidArgument)`: If the value is too large.
///
/// ## Example
/// ```
/// use plotscript::util::num::usize_to_f64_checked;
///
/// assert_eq!(usize_to_f64_checked(42, "length").unwrap(), 42.0);
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn usize_to_f64_checked(value: usize, procedure: &str) -> EvalResult<f64> {
    if value as u64 > MAX_SAFE_U64_INT {
        return Err(SemanticError::InvalidArgument { procedure: procedure.to_string(),
                                                    details:   format!("{value} is too large to be represented exactly") });
    }
    Ok(value as f64)
}

/// Formats a number with a fixed count of significant digits, `%g` style.
///
/// Trailing zeros are dropped. Values whose decimal exponent is below `-4` or
/// at least `digits` are written in scientific notation with a signed,
/// two-digit exponent.
///
/// ## Example
/// ```
/// use plotscript::util::num::format_significant;
///
/// assert_eq!(format_significant(-1.0, 2), "-1");
/// assert_eq!(format_significant(0.5, 2), "0.5");
/// assert_eq!(format_significant(3.14159, 2), "3.1");
/// assert_eq!(format_significant(123.0, 2), "1.2e+02");
/// assert_eq!(format_significant(0.0, 2), "0");
/// ```
#[must_use]
pub fn format_significant(value: f64, digits: usize) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return format!("{value}");
    }

    let digits = digits.max(1);
    let scientific = format!("{value:.prec$e}", prec = digits - 1);
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((&scientific, "0"));
    let exponent: i64 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= i64::try_from(digits).unwrap_or(i64::MAX) {
        let sign = if exponent < 0 { '-' } else { '+' };
        return format!("{}e{sign}{:02}", trim_fraction(mantissa), exponent.unsigned_abs());
    }

    let decimals = usize::try_from(i64::try_from(digits).unwrap_or(0) - 1 - exponent).unwrap_or(0);
    trim_fraction(&format!("{value:.decimals$}")).to_string()
}

/// Drops trailing zeros, and then a dangling decimal point, from a fixed
/// notation number.
fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}
