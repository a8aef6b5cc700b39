//! Typed value validation.
//!
//! [`coerce`] is the single entry point used for every value the scanner
//! accepts, whether it came from the following token or from an inline
//! `key=value` form. Non-string values are trimmed before validation and
//! the normalized text is what ends up in the parsed values.
//!
//! # Examples
//!
//! ```
//! use usage_core::{ValueType, coerce};
//!
//! assert_eq!(coerce(" 42 ", ValueType::Int).unwrap(), "42");
//! assert_eq!(coerce("ff", ValueType::Hex).unwrap(), "0xff");
//! assert_eq!(coerce("Enabled", ValueType::Bool).unwrap(), "true");
//! assert!(coerce("12x", ValueType::Int).is_err());
//! ```

use thiserror::Error;

use crate::ValueType;

/// A value rejected by [`coerce`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("validation failure, expected {expected}, got {value:?}")]
pub struct CoercionError {
    /// Type the value was validated against.
    pub expected: ValueType,
    /// Offending text (trimmed for non-string types).
    pub value: String,
}

/// Validates `raw` against `value_type` and returns its normalized form.
///
/// | type     | accepted                               | stored            |
/// |----------|----------------------------------------|-------------------|
/// | `String` | anything                               | unchanged         |
/// | `Int`    | ASCII digits only                      | trimmed           |
/// | `Float`  | digits with at most one `.`            | trimmed           |
/// | `Hex`    | hex digits, optionally `0x`/`x`/`#`    | `0x`-prefixed     |
/// | `Bool`   | `true false yes no enabled disabled 1 0` | `true`/`false`  |
///
/// # Errors
///
/// Returns a [`CoercionError`] carrying the expected type and the trimmed
/// offending text when validation fails.
pub fn coerce(raw: &str, value_type: ValueType) -> Result<String, CoercionError> {
    let value = raw.trim();
    let normalized = match value_type {
        ValueType::String => return Ok(raw.to_string()),
        ValueType::Int => is_number(value).then(|| value.to_string()),
        ValueType::Float => is_float(value).then(|| value.to_string()),
        ValueType::Hex => {
            let candidate = normalize_hex(value);
            is_hex(&candidate).then_some(candidate)
        }
        ValueType::Bool => normalize_bool(value),
    };

    normalized.ok_or_else(|| CoercionError {
        expected: value_type,
        value: value.to_string(),
    })
}

/// Returns `true` if `s` is non-empty and made only of ASCII digits.
pub fn is_number(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Returns `true` if `s` has at least one digit, at most one `.` and
/// nothing else.
pub fn is_float(s: &str) -> bool {
    let mut digits = 0;
    let mut dots = 0;
    for b in s.bytes() {
        match b {
            b'0'..=b'9' => digits += 1,
            b'.' => dots += 1,
            _ => return false,
        }
    }
    digits > 0 && dots <= 1
}

/// Returns `true` if `s` is hex digits, with or without a `0x` prefix.
pub fn is_hex(s: &str) -> bool {
    let digits = s.strip_prefix("0x").unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_hexdigit())
}

// `#12` and `x12` are accepted as spellings of `0x12`. A `#` followed by a
// letter is left alone and fails validation.
fn normalize_hex(value: &str) -> String {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some('#'), Some(c)) if c.is_ascii_digit() => format!("0x{}", &value[1..]),
        (Some('x'), Some(_)) => format!("0{value}"),
        _ if value.starts_with("0x") => value.to_string(),
        _ => format!("0x{value}"),
    }
}

fn normalize_bool(value: &str) -> Option<String> {
    let lowered = value.to_ascii_lowercase();
    let normalized = match lowered.as_str() {
        "0" | "no" | "disabled" | "false" => "false",
        "1" | "yes" | "enabled" | "true" => "true",
        _ => return None,
    };
    Some(normalized.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_passes_through_untrimmed() {
        assert_eq!(coerce("  spaced  ", ValueType::String).unwrap(), "  spaced  ");
        assert_eq!(coerce("", ValueType::String).unwrap(), "");
    }

    #[test]
    fn test_int_accepts_trimmed_digits() {
        assert_eq!(coerce(" 0042\t", ValueType::Int).unwrap(), "0042");
    }

    #[test]
    fn test_int_rejects_signs_and_prefixes() {
        for bad in ["", "   ", "-1", "+1", "0x10", "12x", "1.0"] {
            let err = coerce(bad, ValueType::Int).unwrap_err();
            assert_eq!(err.expected, ValueType::Int);
            assert_eq!(err.value, bad.trim());
        }
    }

    #[test]
    fn test_float_digit_and_dot_rule() {
        assert_eq!(coerce("3.", ValueType::Float).unwrap(), "3.");
        assert_eq!(coerce(".5", ValueType::Float).unwrap(), ".5");
        assert_eq!(coerce("10", ValueType::Float).unwrap(), "10");
        assert!(coerce(".", ValueType::Float).is_err());
        assert!(coerce("..", ValueType::Float).is_err());
        assert!(coerce("1.2.3", ValueType::Float).is_err());
        assert!(coerce("1e5", ValueType::Float).is_err());
        assert!(coerce("", ValueType::Float).is_err());
    }

    #[test]
    fn test_hex_normalization() {
        assert_eq!(coerce("ff", ValueType::Hex).unwrap(), "0xff");
        assert_eq!(coerce("0x1A", ValueType::Hex).unwrap(), "0x1A");
        assert_eq!(coerce("#12", ValueType::Hex).unwrap(), "0x12");
        assert_eq!(coerce("xff", ValueType::Hex).unwrap(), "0xff");
        assert_eq!(coerce(" 0 ", ValueType::Hex).unwrap(), "0x0");
    }

    #[test]
    fn test_hex_rejections_report_trimmed_input() {
        let err = coerce(" #ff ", ValueType::Hex).unwrap_err();
        assert_eq!(err.value, "#ff");

        assert!(coerce("", ValueType::Hex).is_err());
        assert!(coerce("0x", ValueType::Hex).is_err());
        assert!(coerce("x", ValueType::Hex).is_err());
        assert!(coerce("0xfg", ValueType::Hex).is_err());
        assert!(coerce("xx1", ValueType::Hex).is_err());
    }

    #[test]
    fn test_bool_aliases() {
        for (raw, expected) in [
            ("yes", "true"),
            ("ENABLED", "true"),
            ("1", "true"),
            ("True", "true"),
            ("no", "false"),
            (" Disabled ", "false"),
            ("0", "false"),
            ("FALSE", "false"),
        ] {
            assert_eq!(coerce(raw, ValueType::Bool).unwrap(), expected, "input {raw:?}");
        }
        assert!(coerce("on", ValueType::Bool).is_err());
        assert!(coerce("", ValueType::Bool).is_err());
    }

    #[test]
    fn test_predicates() {
        assert!(is_number("007"));
        assert!(!is_number(""));
        assert!(is_float("0.0"));
        assert!(!is_float("a.1"));
        assert!(is_hex("DEADbeef"));
        assert!(is_hex("0x0"));
        assert!(!is_hex("0x"));
    }

    #[test]
    fn test_error_message() {
        let err = coerce("abc", ValueType::Int).unwrap_err();
        assert_eq!(
            err.to_string(),
            "validation failure, expected integer number, got \"abc\""
        );
    }
}
