//! Numeric validation functions

use alloc::format;
use alloc::string::String;

pub const NOT_A_NUMBER_MESSAGE: &str = "Must be a number";
pub const NOT_AN_INTEGER_MESSAGE: &str = "Must be a whole number";

/// Largest integer an `f64` holds exactly (2^53 - 1)
pub const MAX_SAFE_INTEGER: i64 = (1 << 53) - 1;

/// Validates minimum value for numeric types
pub fn validate_min<T: PartialOrd + core::fmt::Display>(value: T, min: T) -> Result<(), String> {
    if value >= min {
        Ok(())
    } else {
        Err(format!("Must be at least {}", min))
    }
}

/// Validates maximum value for numeric types
pub fn validate_max<T: PartialOrd + core::fmt::Display>(value: T, max: T) -> Result<(), String> {
    if value <= max {
        Ok(())
    } else {
        Err(format!("Must be at most {}", max))
    }
}

/// Parses text input into a finite number
///
/// Surrounding whitespace is ignored. `NaN` and infinities are rejected.
pub fn parse_number(s: &str) -> Result<f64, String> {
    match s.trim().parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(n),
        _ => Err(String::from(NOT_A_NUMBER_MESSAGE)),
    }
}

/// Parses text input into a safe integer
///
/// Plain digits go straight to `i64`; anything else (`"18.0"`, `"1e3"`) is
/// read as a number and must be whole.
pub fn parse_integer(s: &str) -> Result<i64, String> {
    match s.trim().parse::<i64>() {
        Ok(n) => validate_safe_integer(n),
        Err(_) => parse_number(s).and_then(validate_integer),
    }
}

/// Converts a finite number into an `i64` if it is whole and safe
pub fn validate_integer(n: f64) -> Result<i64, String> {
    if n.fract() != 0.0 {
        return Err(String::from(NOT_AN_INTEGER_MESSAGE));
    }
    if n.abs() > MAX_SAFE_INTEGER as f64 {
        return Err(unsafe_integer_message());
    }
    Ok(n as i64)
}

/// Rejects integers outside `-(2^53 - 1)..=2^53 - 1`
pub fn validate_safe_integer(n: i64) -> Result<i64, String> {
    if (-MAX_SAFE_INTEGER..=MAX_SAFE_INTEGER).contains(&n) {
        Ok(n)
    } else {
        Err(unsafe_integer_message())
    }
}

fn unsafe_integer_message() -> String {
    format!(
        "Must be between {} and {}",
        -MAX_SAFE_INTEGER, MAX_SAFE_INTEGER
    )
}
