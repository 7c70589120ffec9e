//! Projection of a variable's per-mode value into a scalar definition.
//!
//! Aliases always win. Otherwise the variable's declared type decides how the
//! raw value is coerced; values that do not fit degrade instead of failing.
//! Coercions follow host (JavaScript) conversion rules, so number parsing
//! and formatting are done by hand rather than with `f64`'s own `FromStr`
//! and `Display`.

use tracing::debug;

use crate::alias::resolve_alias;
use crate::color::rgba_to_hex;
use crate::models::{DefinitionRecord, ResolvedType, Scalar, Variable, VariableValue};
use crate::source::{SourceError, VariableSource};

/// Project `variable`'s value for `mode_id`.
///
/// Every variable yields a record. A mode without a value is projected as an
/// absent value of the declared type (see [`coerce_missing`]).
pub async fn project(
    source: &dyn VariableSource,
    variable: &Variable,
    mode_id: &str,
) -> Result<DefinitionRecord, SourceError> {
    let scalar = match variable.value_for(mode_id) {
        None => {
            debug!(variable = %variable.id, mode = mode_id, "no value for mode");
            coerce_missing(variable.resolved_type)
        }
        Some(VariableValue::Alias(alias)) => {
            Scalar::String(resolve_alias(source, &alias.id, &variable.id).await?)
        }
        Some(literal) => coerce(variable.resolved_type, literal),
    };

    Ok(DefinitionRecord::new(variable.name.clone(), scalar))
}

/// Scalar for a mode the variable has no value in.
///
/// FLOAT gives NaN, STRING gives `"undefined"`, BOOLEAN gives `false`, and
/// everything else the empty string.
pub fn coerce_missing(resolved_type: ResolvedType) -> Scalar {
    match resolved_type {
        ResolvedType::Float => Scalar::Number(f64::NAN),
        ResolvedType::String => Scalar::from("undefined"),
        ResolvedType::Boolean => Scalar::Boolean(false),
        ResolvedType::Color | ResolvedType::Unknown => Scalar::empty(),
    }
}

/// Coerce a literal value to the declared type.
///
/// # Examples
///
/// ```
/// use tokensrc::color::Rgba;
/// use tokensrc::models::{ResolvedType, Scalar, VariableValue};
/// use tokensrc::projector::coerce;
///
/// let red = VariableValue::Color(Rgba::rgb(1.0, 0.0, 0.0));
/// assert_eq!(coerce(ResolvedType::Color, &red), Scalar::String("#ff0000ff".into()));
/// assert_eq!(coerce(ResolvedType::Boolean, &VariableValue::Float(0.0)), Scalar::Boolean(false));
/// assert_eq!(coerce(ResolvedType::Unknown, &VariableValue::Float(1.0)), Scalar::empty());
/// ```
pub fn coerce(resolved_type: ResolvedType, value: &VariableValue) -> Scalar {
    match resolved_type {
        ResolvedType::Color => match value {
            VariableValue::Color(c) => Scalar::String(rgba_to_hex(c)),
            _ => Scalar::empty(),
        },
        ResolvedType::Float => Scalar::Number(to_number(value)),
        ResolvedType::String => Scalar::String(to_text(value)),
        ResolvedType::Boolean => Scalar::Boolean(to_bool(value)),
        ResolvedType::Unknown => Scalar::empty(),
    }
}

fn to_number(value: &VariableValue) -> f64 {
    match value {
        VariableValue::Float(n) => *n,
        VariableValue::Boolean(b) => f64::from(u8::from(*b)),
        VariableValue::String(s) => parse_number(s),
        VariableValue::Color(_) | VariableValue::Alias(_) => f64::NAN,
    }
}

/// Parse a string the way the host's `Number(..)` does.
///
/// Blank is `0`; `0x`/`0o`/`0b` prefixes select a radix; only the exact words
/// `Infinity`, `+Infinity` and `-Infinity` are infinite. Anything else that
/// is not a decimal literal is NaN.
fn parse_number(s: &str) -> f64 {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    let radix = match trimmed.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &trimmed[2..];
        if digits.is_empty() {
            return f64::NAN;
        }
        return digits
            .chars()
            .try_fold(0.0, |acc, c| c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d)))
            .unwrap_or(f64::NAN);
    }

    // f64's FromStr also takes "inf", "infinity" and "nan"
    if trimmed.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') {
        return f64::NAN;
    }
    trimmed.parse().unwrap_or(f64::NAN)
}

/// Format a number the way the host's `String(..)` does.
///
/// Magnitudes in `[1e-6, 1e21)` print in plain decimal; others use an
/// exponent with an explicit sign (`1e+21`, `1.5e-7`).
fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        let name = if n > 0.0 { "Infinity" } else { "-Infinity" };
        return name.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }
    if (1e-6..1e21).contains(&n.abs()) {
        return n.to_string();
    }

    let exponential = format!("{:e}", n);
    match exponential.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => format!("{}e+{}", mantissa, exponent),
        _ => exponential,
    }
}

fn to_text(value: &VariableValue) -> String {
    match value {
        VariableValue::String(s) => s.clone(),
        VariableValue::Float(n) => format_number(*n),
        VariableValue::Boolean(b) => b.to_string(),
        VariableValue::Color(c) => rgba_to_hex(c),
        VariableValue::Alias(a) => a.id.clone(),
    }
}

fn to_bool(value: &VariableValue) -> bool {
    match value {
        VariableValue::Boolean(b) => *b,
        VariableValue::Float(n) => *n != 0.0 && !n.is_nan(),
        VariableValue::String(s) => !s.is_empty(),
        VariableValue::Color(_) | VariableValue::Alias(_) => true,
    }
}
