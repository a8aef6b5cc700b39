//! Command-line option scanning and validation.
//!
//! This crate turns a raw argument vector into a structured result using a
//! caller-declared option table:
//!
//! - [`OptionTable`] — insertion-ordered [`OptionSpec`] declarations (short
//!   key, long word, [`Arity`], [`ValueType`]).
//! - [`Validated::scan`] — a single left-to-right pass producing accepted
//!   values, a list of [`ParseError`]s and the trailing remainder.
//! - [`coerce`] — typed value validation and normalization (integers,
//!   decimals, booleans, hexadecimal).
//! - [`Usage`] — program-level facade that also renders title, version and
//!   aligned help text.
//!
//! Scanning never stops at the first problem; callers decide which
//! [`ParseErrorKind`]s are fatal.
//!
//! # Example
//!
//! ```
//! use usage_core::*;
//!
//! let table = OptionTable::new()
//!     .with_option("age", OptionSpec::required("a", "age", ValueType::Int))
//!     .with_option("bool", OptionSpec::required("b", "bool", ValueType::Bool))
//!     .with_option("verbose", OptionSpec::flag("v", "verbose"));
//!
//! let result = Validated::scan(&table, ["-b", "yes", "--verbose", "-a", "12x"]);
//! assert_eq!(result.value("bool"), "true");
//! assert!(result.contains("verbose"));
//! assert!(!result.contains("age"));
//! assert_eq!(result.errors()[0].kind(), ParseErrorKind::ArgValidation);
//! assert!(!result.is_ok());
//! ```

mod coerce;
mod help;
mod lint;
mod result;
mod scan;
mod types;

pub use coerce::{CoercionError, coerce, is_float, is_hex, is_number};
pub use help::{Args, Usage};
pub use lint::{TableError, check_table};
pub use result::{OptionValue, ParseError, ParseErrorKind, ParseErrors, Validated};
pub use types::*;
