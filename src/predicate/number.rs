//! Number checks

use crate::reflector::Reflector;
use crate::value::Value;

/// Returns true if `value` is a number or a numeric string.
///
/// A numeric string is a decimal number, optionally signed, with an optional
/// fraction and exponent. Leading whitespace is ignored, trailing whitespace
/// is not. Hex, `inf` and `nan` spellings are not numeric.
///
/// # Example
///
/// ```rust
/// use duckcheck::predicate::is_numeric;
/// use duckcheck::{ClassRegistry, Reflector, Value};
///
/// let cx = Reflector::new(ClassRegistry::default());
///
/// assert!(is_numeric(&cx, &Value::from(3)));
/// assert!(is_numeric(&cx, &Value::from(" -1.5e3")));
/// assert!(!is_numeric(&cx, &Value::from("0x1A")));
/// assert!(!is_numeric(&cx, &Value::from(true)));
/// ```
pub fn is_numeric(_: &Reflector, value: &Value) -> bool {
    match value {
        Value::Int(_) | Value::Float(_) => true,
        Value::Str(s) => parse_number(s).is_some(),
        _ => false,
    }
}

/// Returns true if `value` has an integral value: an integer, a finite float
/// with no fractional part, or a numeric string denoting one.
///
/// # Example
///
/// ```rust
/// use duckcheck::predicate::is_integery;
/// use duckcheck::{ClassRegistry, Reflector, Value};
///
/// let cx = Reflector::new(ClassRegistry::default());
///
/// assert!(is_integery(&cx, &Value::from(2.0)));
/// assert!(is_integery(&cx, &Value::from("42")));
/// assert!(!is_integery(&cx, &Value::from("4.2")));
/// ```
pub fn is_integery(_: &Reflector, value: &Value) -> bool {
    match value {
        Value::Int(_) => true,
        Value::Float(x) => is_integral(*x),
        Value::Str(s) => parse_number(s).is_some_and(is_integral),
        _ => false,
    }
}

fn is_integral(x: f64) -> bool {
    x.is_finite() && x.fract() == 0.0
}

fn parse_number(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let mut digits = false;
    for c in s.chars() {
        match c {
            '0'..='9' => digits = true,
            '+' | '-' | '.' | 'e' | 'E' => {}
            _ => return None,
        }
    }
    if !digits {
        return None;
    }
    s.parse::<f64>().ok().filter(|x| x.is_finite())
}
