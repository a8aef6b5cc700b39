//! Single-pass argument scanner.
//!
//! The scanner walks the argument list once, left to right. Each token is
//! fed to the transition function of the current [`ScanState`], which
//! records values and errors into the result and returns the next state.
//! Nothing aborts the scan; every anomaly becomes a [`ParseError`].
//!
//! Recognized token forms:
//!
//! - `-k`, `--word` (any number of leading dashes collapses to one)
//! - `-k value`, `--word value` for options taking a value
//! - `-k=value`, `--word=value` inline values
//! - `--` ends option parsing; the first bare word does too and is kept
//!
//! # Examples
//!
//! ```
//! use usage_core::{OptionSpec, OptionTable, ParseErrorKind, Validated, ValueType};
//!
//! let table = OptionTable::new()
//!     .with_option("hex", OptionSpec::required("x", "hex", ValueType::Hex))
//!     .with_option("name", OptionSpec::required("n", "name", ValueType::String));
//!
//! let result = Validated::scan(&table, ["-x=ff", "--name", "a", "--name", "b", "--"]);
//! assert_eq!(result.value("hex"), "0xff");
//! assert_eq!(result.value("name"), "b");
//! assert_eq!(result.errors().len(), 1);
//! assert_eq!(result.errors()[0].kind(), ParseErrorKind::Duplicate);
//! ```

use tracing::debug;

use crate::{Arity, OptionSpec, OptionTable, ParseError, Validated, ValueType, coerce};

/// Option waiting for its value token.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Pending {
    name: String,
    value_type: ValueType,
}

/// Scanner mode between two tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ScanState {
    /// Expecting an option token.
    Scanning,
    /// The next token is the value of a required-value option.
    AwaitingArg(Pending),
    /// The next token is the value unless it names another option.
    AwaitingOptionalArg(Pending),
    /// Option parsing is over; everything is copied verbatim.
    Remainder,
}

/// Shape of a token read while expecting an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    /// Blank, or a lone dash.
    Skip,
    /// The `--` marker.
    EndOfOptions,
    /// First word without a leading dash.
    Positional(&'a str),
    /// Option reference with dashes stripped.
    Option {
        text: &'a str,
        inline: Option<(&'a str, &'a str)>,
    },
}

fn collapse_dashes(token: &str) -> &str {
    let mut text = token;
    while text.starts_with("--") && text != "--" {
        text = &text[1..];
    }
    text
}

fn classify(token: &str) -> Token<'_> {
    let text = collapse_dashes(token.trim());
    if text.is_empty() {
        return Token::Skip;
    }
    if text == "--" {
        return Token::EndOfOptions;
    }
    let Some(stripped) = text.strip_prefix('-') else {
        return Token::Positional(text);
    };

    let text = stripped.trim_start();
    if text.is_empty() {
        return Token::Skip;
    }

    // A leading `0` keeps `=` literal so `-0=...` style tokens are looked up whole.
    let inline = match text.split_once('=') {
        Some((option, value)) if !option.is_empty() && !text.starts_with('0') => {
            Some((option, value))
        }
        _ => None,
    };
    Token::Option { text, inline }
}

/// Reads a candidate optional value as an option reference, without any
/// inline `=` handling.
fn option_reference(token: &str) -> Option<&str> {
    let text = collapse_dashes(token.trim());
    let text = text.strip_prefix('-')?.trim_start();
    (!text.is_empty()).then_some(text)
}

struct Scanner<'t> {
    table: &'t OptionTable,
    out: Validated,
}

impl<'t> Scanner<'t> {
    fn new(table: &'t OptionTable) -> Self {
        Self {
            table,
            out: Validated::default(),
        }
    }

    fn step(&mut self, state: ScanState, token: &str) -> ScanState {
        match state {
            ScanState::Scanning => self.scan_token(token),
            ScanState::AwaitingArg(pending) => self.take_value(pending, token),
            ScanState::AwaitingOptionalArg(pending) => self.take_optional_value(pending, token),
            ScanState::Remainder => {
                self.out.remainder.push(token.to_string());
                ScanState::Remainder
            }
        }
    }

    fn scan_token(&mut self, token: &str) -> ScanState {
        let (text, inline) = match classify(token) {
            Token::Skip => return ScanState::Scanning,
            Token::EndOfOptions => {
                debug!("end of options marker");
                return ScanState::Remainder;
            }
            Token::Positional(word) => {
                debug!(token = word, "first positional argument");
                self.out.remainder.push(word.to_string());
                return ScanState::Remainder;
            }
            Token::Option { text, inline } => (text, inline),
        };

        let table = self.table;
        if let Some((name, spec)) = table.find(text) {
            return self.begin_option(name, spec);
        }

        if let Some((option, value)) = inline {
            if let Some((name, spec)) = table.find_valued(option) {
                debug!(option = name, "inline value");
                self.check_duplicate(name);
                self.store(name, spec.value_type, value);
                return ScanState::Scanning;
            }
        }

        let unknown = inline.map_or(text, |(option, _)| option);
        debug!(option = unknown, "unknown option");
        self.out.errors.push(ParseError::UnknownOption {
            name: unknown.to_string(),
        });
        ScanState::Scanning
    }

    fn begin_option(&mut self, name: &str, spec: &OptionSpec) -> ScanState {
        debug!(option = name, arity = ?spec.arity, "matched option");
        self.check_duplicate(name);
        self.out.values.insert(name.to_string(), String::new());

        let pending = Pending {
            name: name.to_string(),
            value_type: spec.value_type,
        };
        match spec.arity {
            Arity::None => ScanState::Scanning,
            Arity::Required => ScanState::AwaitingArg(pending),
            Arity::Optional => ScanState::AwaitingOptionalArg(pending),
        }
    }

    fn take_value(&mut self, pending: Pending, token: &str) -> ScanState {
        self.store(&pending.name, pending.value_type, token);
        ScanState::Scanning
    }

    fn take_optional_value(&mut self, pending: Pending, token: &str) -> ScanState {
        let table = self.table;
        if let Some(text) = option_reference(token) {
            if let Some((name, spec)) = table.find(text) {
                if name != pending.name {
                    debug!(option = %pending.name, next = name, "optional value omitted");
                    return self.begin_option(name, spec);
                }
            }
        }
        self.take_value(pending, token)
    }

    fn check_duplicate(&mut self, name: &str) {
        if self.out.values.contains_key(name) {
            self.out.errors.push(ParseError::Duplicate {
                name: name.to_string(),
            });
        }
    }

    fn store(&mut self, name: &str, value_type: ValueType, raw: &str) {
        match coerce(raw, value_type) {
            Ok(value) => {
                self.out.values.insert(name.to_string(), value);
            }
            Err(err) => {
                debug!(option = name, error = %err, "rejected value");
                self.out.values.shift_remove(name);
                self.out.errors.push(ParseError::ArgValidation {
                    name: name.to_string(),
                    expected: err.expected,
                    value: err.value,
                });
            }
        }
    }

    fn finish(mut self, state: ScanState) -> Validated {
        if let ScanState::AwaitingArg(pending) = state {
            debug!(option = %pending.name, "missing required value");
            self.out.values.shift_remove(&pending.name);
            self.out.errors.push(ParseError::MissingArg {
                name: pending.name,
                expected: pending.value_type,
            });
        }
        self.out
    }
}

impl Validated {
    /// Scans `args` (program name excluded) against `table`.
    ///
    /// Always completes: unknown options, duplicates, rejected and missing
    /// values are collected in [`errors`](Self::errors) in detection order.
    /// The same input always yields the same result.
    pub fn scan<I>(table: &OptionTable, args: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut scanner = Scanner::new(table);
        let mut state = ScanState::Scanning;
        for arg in args {
            state = scanner.step(state, arg.as_ref());
        }
        let result = scanner.finish(state);

        debug!(
            values = result.len(),
            errors = result.errors().len(),
            remainder = result.remainder().len(),
            "scan complete"
        );
        result
    }
}
