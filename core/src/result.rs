//! Scan results.
//!
//! A scan produces one [`Validated`] value: the accepted option values,
//! every anomaly found along the way as a [`ParseError`], and the trailing
//! arguments that were not interpreted as options. The result is immutable
//! once built.

use std::fmt;

use indexmap::IndexMap;
use thiserror::Error;

use crate::ValueType;

/// Classification of a [`ParseError`].
///
/// The scanner only classifies; whether a kind is fatal is up to the
/// caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    /// The token did not match any declared alias.
    UnknownOption,
    /// A required value was never supplied.
    MissingArg,
    /// A supplied value failed type validation.
    ArgValidation,
    /// The option was already supplied earlier.
    Duplicate,
}

/// One anomaly found while scanning.
///
/// The `Display` impl renders one summary line, e.g.
/// `--age: validation failure, expected integer number, got 12x`.
///
/// # Examples
///
/// ```
/// use usage_core::{ParseError, ParseErrorKind, ValueType};
///
/// let err = ParseError::ArgValidation {
///     name: "age".into(),
///     expected: ValueType::Int,
///     value: "12x".into(),
/// };
/// assert_eq!(err.kind(), ParseErrorKind::ArgValidation);
/// assert_eq!(err.to_string(), "--age: validation failure, expected integer number, got 12x");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// No declared option has this alias.
    #[error("--{name}: unknown option")]
    UnknownOption {
        /// The unmatched option text, dashes stripped.
        name: String,
    },
    /// A required-value option was the last token.
    #[error("--{name}: missing required arg")]
    MissingArg {
        /// Option name from the table.
        name: String,
        /// Type the value would have been validated against.
        expected: ValueType,
    },
    /// The supplied value was rejected.
    #[error("--{name}: validation failure, expected {expected}{}", got(.value))]
    ArgValidation {
        /// Option name from the table.
        name: String,
        /// Type the value was validated against.
        expected: ValueType,
        /// The rejected text.
        value: String,
    },
    /// The option was supplied more than once; the later value is kept.
    #[error("--{name}: duplicated option")]
    Duplicate {
        /// Option name from the table.
        name: String,
    },
}

fn got(value: &str) -> String {
    if value.is_empty() {
        String::new()
    } else {
        format!(", got {value}")
    }
}

impl ParseError {
    /// Returns the error classification.
    pub fn kind(&self) -> ParseErrorKind {
        match self {
            ParseError::UnknownOption { .. } => ParseErrorKind::UnknownOption,
            ParseError::MissingArg { .. } => ParseErrorKind::MissingArg,
            ParseError::ArgValidation { .. } => ParseErrorKind::ArgValidation,
            ParseError::Duplicate { .. } => ParseErrorKind::Duplicate,
        }
    }

    /// Returns the option name (or unmatched text) the error refers to.
    pub fn name(&self) -> &str {
        match self {
            ParseError::UnknownOption { name }
            | ParseError::MissingArg { name, .. }
            | ParseError::ArgValidation { name, .. }
            | ParseError::Duplicate { name } => name,
        }
    }

    /// Returns the expected value type for missing or rejected values.
    pub fn expected(&self) -> Option<ValueType> {
        match self {
            ParseError::MissingArg { expected, .. } | ParseError::ArgValidation { expected, .. } => {
                Some(*expected)
            }
            _ => None,
        }
    }

    /// Returns the rejected text for validation failures.
    pub fn value(&self) -> Option<&str> {
        match self {
            ParseError::ArgValidation { value, .. } => Some(value),
            _ => None,
        }
    }
}

/// Display adapter rendering an error list as a summary block.
///
/// Each error is written on its own line with a leading space.
///
/// # Examples
///
/// ```
/// use usage_core::{ParseError, ParseErrors};
///
/// let errors = vec![
///     ParseError::UnknownOption { name: "q".into() },
///     ParseError::Duplicate { name: "sudo".into() },
/// ];
/// assert_eq!(
///     ParseErrors(&errors).to_string(),
///     " --q: unknown option\n --sudo: duplicated option"
/// );
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ParseErrors<'a>(pub &'a [ParseError]);

impl fmt::Display for ParseErrors<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, " {error}")?;
        }
        Ok(())
    }
}

/// Lookup result for one option: whether it was supplied, and its text.
///
/// The typed accessors never fail. Like C's `strtol`/`strtod` they read
/// the longest numeric prefix and fall back to zero when there is none or
/// the number does not fit.
///
/// # Examples
///
/// ```
/// use usage_core::OptionValue;
///
/// let hex = OptionValue::new("0x1A");
/// assert!(hex.is_present());
/// assert_eq!(hex.as_hex(), 26);
///
/// let missing = OptionValue::absent();
/// assert!(!missing.is_present());
/// assert_eq!(missing.as_int(), 0);
/// assert_eq!(missing.as_str(), "");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionValue {
    present: bool,
    raw: String,
}

impl OptionValue {
    /// A supplied value.
    pub fn new(raw: impl Into<String>) -> Self {
        Self {
            present: true,
            raw: raw.into(),
        }
    }

    /// An option that was not supplied.
    pub fn absent() -> Self {
        Self::default()
    }

    /// Returns `true` if the option was supplied.
    pub fn is_present(&self) -> bool {
        self.present
    }

    /// Returns the stored text, empty for flags and absent options.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Reads a decimal integer prefix.
    pub fn as_int(&self) -> i64 {
        parse_int_prefix(&self.raw, Some(10))
    }

    /// Reads a floating point prefix.
    pub fn as_float(&self) -> f64 {
        parse_float_prefix(&self.raw)
    }

    /// Returns `true` only for the text `true`, ignoring case and padding.
    pub fn as_bool(&self) -> bool {
        self.raw.trim().eq_ignore_ascii_case("true")
    }

    /// Reads an integer prefix, detecting the radix from a `0x` or `0`
    /// prefix.
    pub fn as_hex(&self) -> i64 {
        parse_int_prefix(&self.raw, None)
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn parse_int_prefix(text: &str, radix: Option<u32>) -> i64 {
    let mut s = text.trim_start();
    let negative = s.starts_with('-');
    if let Some(rest) = s.strip_prefix(|c: char| c == '-' || c == '+') {
        s = rest;
    }

    let radix = match radix {
        Some(radix) => radix,
        None => {
            let hex_body = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X"));
            match hex_body {
                Some(body) if body.starts_with(|c: char| c.is_ascii_hexdigit()) => {
                    s = body;
                    16
                }
                _ if s.starts_with('0') => 8,
                _ => 10,
            }
        }
    };

    // Magnitude is accumulated unsigned so that `i64::MIN` stays representable.
    let mut magnitude: u64 = 0;
    let mut digits = 0;
    for c in s.chars() {
        let Some(digit) = c.to_digit(radix) else {
            break;
        };
        let next = magnitude
            .checked_mul(u64::from(radix))
            .and_then(|v| v.checked_add(u64::from(digit)));
        match next {
            Some(next) => magnitude = next,
            None => return 0,
        }
        digits += 1;
    }

    if digits == 0 {
        return 0;
    }
    let value = if negative {
        0i64.checked_sub_unsigned(magnitude)
    } else {
        i64::try_from(magnitude).ok()
    };
    value.unwrap_or(0)
}

fn parse_float_prefix(text: &str) -> f64 {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_end = digits_from(end);
    let mut digits = int_end - end;
    end = int_end;
    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        digits += frac_end - (end + 1);
        end = frac_end;
    }
    if digits == 0 {
        return 0.0;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    match s[..end].parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Outcome of scanning an argument list against an option table.
///
/// Built by [`Validated::scan`](crate::Validated::scan).
///
/// # Examples
///
/// ```
/// use usage_core::{OptionSpec, OptionTable, Validated, ValueType};
///
/// let table = OptionTable::new()
///     .with_option("age", OptionSpec::required("a", "age", ValueType::Int))
///     .with_option("sudo", OptionSpec::flag("s", "sudo"));
///
/// let result = Validated::scan(&table, ["--age", "42", "-s", "notes.txt", "-x"]);
/// assert!(result.is_ok());
/// assert_eq!(result.value("age"), "42");
/// assert!(result.contains("sudo"));
/// assert_eq!(result.get("age").as_int(), 42);
/// assert_eq!(result.remainder(), ["notes.txt", "-x"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validated {
    pub(crate) values: IndexMap<String, String>,
    pub(crate) errors: Vec<ParseError>,
    pub(crate) remainder: Vec<String>,
}

impl Validated {
    /// Returns accepted option values keyed by option name, in the order
    /// they were first supplied.
    pub fn values(&self) -> &IndexMap<String, String> {
        &self.values
    }

    /// Returns `true` if the option was supplied and accepted.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Returns the stored value, or an empty string if absent.
    pub fn value(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or_default()
    }

    /// Returns a typed view of one option.
    pub fn get(&self, name: &str) -> OptionValue {
        match self.values.get(name) {
            Some(raw) => OptionValue::new(raw.as_str()),
            None => OptionValue::absent(),
        }
    }

    /// Returns every anomaly in detection order.
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    /// Returns the trailing arguments in their original order.
    pub fn remainder(&self) -> &[String] {
        &self.remainder
    }

    /// Returns the number of accepted options.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if no option was accepted.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns `true` if the scan recorded no errors of any kind.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}
