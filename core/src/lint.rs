//! Option table well-formedness checks.
//!
//! The scanner accepts any table, but a table with a clashing or malformed
//! alias produces surprising results (the earliest declaration silently
//! wins). [`check_table`] reports those problems up front; configuration
//! loading refuses tables that fail it.
//!
//! # Examples
//!
//! ```
//! use usage_core::*;
//!
//! let table = OptionTable::new().with_option("verbose", OptionSpec::flag("v", "verbose"));
//! assert!(check_table(&table).is_empty());
//!
//! // Invalid: alias written with its dash
//! let bad = OptionTable::new().with_option("verbose", OptionSpec::flag("-v", "verbose"));
//! assert!(!check_table(&bad).is_empty());
//! ```

use std::collections::HashMap;

use thiserror::Error;

use crate::OptionTable;

/// Problems found in an option table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// A matchable option has an empty name.
    #[error("option with alias {0:?} has an empty name")]
    EmptyName(String),
    /// An alias starts with `-`; aliases are declared without dashes.
    #[error("alias {alias:?} of option {option} must not start with '-'")]
    DashedAlias {
        /// Option name.
        option: String,
        /// Offending alias.
        alias: String,
    },
    /// An alias contains whitespace or `=` and can never be typed as one token.
    #[error("alias {alias:?} of option {option} contains whitespace or '='")]
    InvalidAlias {
        /// Option name.
        option: String,
        /// Offending alias.
        alias: String,
    },
    /// Two options share an alias; the earlier one always wins.
    #[error("alias {alias:?} of option {option} is already used by option {first}")]
    DuplicateAlias {
        /// Later option, which can never be matched through this alias.
        option: String,
        /// Shared alias.
        alias: String,
        /// Earlier option owning the alias.
        first: String,
    },
}

/// Checks every option of `table`, in declaration order.
///
/// Separator rows (no key and no word) are skipped. All problems are
/// reported, not just the first.
pub fn check_table(table: &OptionTable) -> Vec<TableError> {
    let mut errors = Vec::new();
    let mut owners: HashMap<&str, &str> = HashMap::new();

    for (name, spec) in table.iter() {
        if spec.is_separator() {
            continue;
        }

        let aliases = [spec.key.as_str(), spec.word.as_str()];
        if name.trim().is_empty() {
            let shown = aliases.iter().copied().find(|a| !a.is_empty()).unwrap_or_default();
            errors.push(TableError::EmptyName(shown.to_string()));
        }

        for alias in aliases.into_iter().filter(|a| !a.is_empty()) {
            if alias.starts_with('-') {
                errors.push(TableError::DashedAlias {
                    option: name.to_string(),
                    alias: alias.to_string(),
                });
                continue;
            }
            if alias.contains(|c: char| c.is_whitespace() || c == '=') {
                errors.push(TableError::InvalidAlias {
                    option: name.to_string(),
                    alias: alias.to_string(),
                });
                continue;
            }
            match owners.get(alias) {
                Some(first) if *first != name => errors.push(TableError::DuplicateAlias {
                    option: name.to_string(),
                    alias: alias.to_string(),
                    first: first.to_string(),
                }),
                Some(_) => {}
                None => {
                    owners.insert(alias, name);
                }
            }
        }
    }

    errors
}
