//! Option table type definitions.
//!
//! This module defines the declarative model a caller hands to the scanner:
//! one [`OptionSpec`] per option, collected into an insertion-ordered
//! [`OptionTable`], plus the descriptive [`ProgramInfo`] used only when
//! rendering help text. The types derive [`serde`] traits so a table can be
//! declared in a YAML or JSON file instead of code.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Whether an option takes a value.
///
/// # Examples
///
/// ```
/// use usage_core::Arity;
///
/// assert_eq!(Arity::default(), Arity::None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Arity {
    /// Bare flag, never takes a value (the default).
    #[default]
    None,
    /// The following token is the value and must be present.
    Required,
    /// The following token is the value unless it is another option.
    Optional,
}

/// Declared type of an option value.
///
/// The `Display` impl renders the expectation used in error summaries
/// (e.g. `integer number`).
///
/// # Examples
///
/// ```
/// use usage_core::ValueType;
///
/// assert_eq!(ValueType::default(), ValueType::String);
/// assert_eq!(ValueType::Hex.to_string(), "hexadecimal number");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    /// Free text, passed through untouched (the default).
    #[default]
    String,
    /// Unsigned decimal digits.
    Int,
    /// Decimal digits with at most one `.`.
    Float,
    /// `true`/`false` and their aliases (`yes`, `enabled`, `1`, ...).
    Bool,
    /// Hexadecimal digits, stored with a `0x` prefix.
    Hex,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ValueType::String => "string",
            ValueType::Int => "integer number",
            ValueType::Float => "decimal number",
            ValueType::Bool => "boolean",
            ValueType::Hex => "hexadecimal number",
        };
        f.write_str(text)
    }
}

/// Declaration of one command-line option.
///
/// An option is referenced on the command line by its short `key`
/// (`-n`) or its long `word` (`--name`); both are stored without dashes.
/// A spec whose key and word are both empty is a separator row and is
/// ignored by the scanner and the help renderer.
///
/// # Examples
///
/// ```
/// use usage_core::{Arity, OptionSpec, ValueType};
///
/// let sudo = OptionSpec::flag("s", "sudo").with_description("user can sudo");
/// assert_eq!(sudo.arity, Arity::None);
/// assert!(sudo.matches("s"));
/// assert!(sudo.matches("sudo"));
///
/// let age = OptionSpec::required("a", "age", ValueType::Int).with_arg_name("number");
/// assert!(age.takes_value());
/// assert_eq!(age.arg_name, "number");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionSpec {
    /// Short alias without the leading dash (e.g. `"n"`).
    pub key: String,
    /// Long alias without the leading dashes (e.g. `"name"`).
    pub word: String,
    /// Whether a value follows.
    pub arity: Arity,
    /// Type the value is validated against.
    #[serde(rename = "type")]
    pub value_type: ValueType,
    /// Placeholder shown in help text (`<name>`); `arg` when empty.
    pub arg_name: String,
    /// One-line description shown in help text.
    pub description: String,
}

impl OptionSpec {
    /// Creates a bare flag.
    pub fn flag(key: &str, word: &str) -> Self {
        Self {
            key: key.to_string(),
            word: word.to_string(),
            ..Default::default()
        }
    }

    /// Creates an option whose value is required.
    pub fn required(key: &str, word: &str, value_type: ValueType) -> Self {
        Self {
            key: key.to_string(),
            word: word.to_string(),
            arity: Arity::Required,
            value_type,
            ..Default::default()
        }
    }

    /// Creates an option whose value may be omitted.
    pub fn optional(key: &str, word: &str, value_type: ValueType) -> Self {
        Self {
            key: key.to_string(),
            word: word.to_string(),
            arity: Arity::Optional,
            value_type,
            ..Default::default()
        }
    }

    /// Sets the help placeholder name.
    pub fn with_arg_name(mut self, name: &str) -> Self {
        self.arg_name = name.to_string();
        self
    }

    /// Sets the help description.
    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = desc.to_string();
        self
    }

    /// Returns `true` for a row with neither key nor word.
    pub fn is_separator(&self) -> bool {
        self.key.is_empty() && self.word.is_empty()
    }

    /// Returns `true` if this option accepts a value (required or optional).
    pub fn takes_value(&self) -> bool {
        self.arity != Arity::None
    }

    /// Checks whether `alias` is this option's key or word.
    ///
    /// Empty aliases never match.
    pub fn matches(&self, alias: &str) -> bool {
        !alias.is_empty() && (self.key == alias || self.word == alias)
    }
}

/// Insertion-ordered mapping from option name to [`OptionSpec`].
///
/// Declaration order is significant: it breaks ties between specs sharing
/// an alias (earliest wins) and fixes the row order in help text.
///
/// # Examples
///
/// ```
/// use usage_core::{OptionSpec, OptionTable, ValueType};
///
/// let table = OptionTable::new()
///     .with_option("name", OptionSpec::required("n", "name", ValueType::String))
///     .with_option("sudo", OptionSpec::flag("s", "sudo"));
///
/// assert_eq!(table.len(), 2);
/// assert_eq!(table.find("sudo").map(|(name, _)| name), Some("sudo"));
/// assert!(table.find_valued("s").is_none());
/// assert_eq!(table.names().collect::<Vec<_>>(), vec!["name", "sudo"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionTable {
    options: IndexMap<String, OptionSpec>,
}

impl OptionTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an option, builder style.
    pub fn with_option(mut self, name: &str, spec: OptionSpec) -> Self {
        self.insert(name, spec);
        self
    }

    /// Adds or replaces an option.
    ///
    /// Replacing keeps the option at its original position. Returns the
    /// previous spec, if any.
    pub fn insert(&mut self, name: &str, spec: OptionSpec) -> Option<OptionSpec> {
        self.options.insert(name.to_string(), spec)
    }

    /// Looks up an option by name.
    pub fn get(&self, name: &str) -> Option<&OptionSpec> {
        self.options.get(name)
    }

    /// Returns the number of declared options, separators included.
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Returns `true` if nothing was declared.
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Iterates over `(name, spec)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionSpec)> {
        self.options.iter().map(|(name, spec)| (name.as_str(), spec))
    }

    /// Iterates over option names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.options.keys().map(String::as_str)
    }

    /// Iterates over options that can be referenced on the command line.
    pub fn matchable(&self) -> impl Iterator<Item = (&str, &OptionSpec)> {
        self.iter()
            .filter(|(name, spec)| !name.is_empty() && !spec.is_separator())
    }

    /// Finds the first declared option whose key or word is `alias`.
    pub fn find(&self, alias: &str) -> Option<(&str, &OptionSpec)> {
        self.matchable().find(|(_, spec)| spec.matches(alias))
    }

    /// Like [`find`](Self::find), restricted to options that take a value.
    ///
    /// This is the lookup used for inline `key=value` tokens.
    pub fn find_valued(&self, alias: &str) -> Option<(&str, &OptionSpec)> {
        self.matchable()
            .find(|(_, spec)| spec.takes_value() && spec.matches(alias))
    }
}

impl<'a> IntoIterator for &'a OptionTable {
    type Item = (&'a String, &'a OptionSpec);
    type IntoIter = indexmap::map::Iter<'a, String, OptionSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.options.iter()
    }
}

impl FromIterator<(String, OptionSpec)> for OptionTable {
    fn from_iter<I: IntoIterator<Item = (String, OptionSpec)>>(iter: I) -> Self {
        Self {
            options: iter.into_iter().collect(),
        }
    }
}

/// Descriptive program metadata used by the help renderer.
///
/// The `*_title` fields are literal prefixes, so they carry their own
/// spacing and line breaks.
///
/// # Examples
///
/// ```
/// use usage_core::ProgramInfo;
///
/// let info = ProgramInfo::new("usage_demo", "1.4.0");
/// assert_eq!(info.version_title, "\nVersion ");
/// assert_eq!(info.author_title, "Author ");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgramInfo {
    /// Program name shown in the title.
    pub name: String,
    /// Version string.
    pub version: String,
    /// Prefix placed before the version.
    pub version_title: String,
    /// Author name.
    pub author: String,
    /// Prefix placed before the author.
    pub author_title: String,
    /// Copyright notice.
    pub copyright: String,
    /// Prefix placed before the copyright notice.
    pub copyright_title: String,
    /// Prefix placed before the usage line.
    pub usage_title: String,
    /// Usage synopsis following the command name (e.g. `[options] files`).
    pub usage: String,
    /// Free text shown between the usage line and the options.
    pub description: String,
    /// Heading placed before the option rows.
    pub options_title: String,
    /// Free text shown after the option rows.
    pub footer: String,
}

impl Default for ProgramInfo {
    fn default() -> Self {
        Self {
            name: String::new(),
            version: String::new(),
            version_title: "\nVersion ".to_string(),
            author: String::new(),
            author_title: "Author ".to_string(),
            copyright: String::new(),
            copyright_title: "Copyright ".to_string(),
            usage_title: "usage: ".to_string(),
            usage: String::new(),
            description: String::new(),
            options_title: "\noptions:".to_string(),
            footer: String::new(),
        }
    }
}

impl ProgramInfo {
    /// Creates metadata with a name and version and default titles.
    pub fn new(name: &str, version: &str) -> Self {
        Self {
            name: name.to_string(),
            version: version.to_string(),
            ..Default::default()
        }
    }

    /// Sets the author.
    pub fn with_author(mut self, author: &str) -> Self {
        self.author = author.to_string();
        self
    }

    /// Sets the copyright notice.
    pub fn with_copyright(mut self, copyright: &str) -> Self {
        self.copyright = copyright.to_string();
        self
    }

    /// Sets the usage synopsis.
    pub fn with_usage(mut self, usage: &str) -> Self {
        self.usage = usage.to_string();
        self
    }

    /// Sets the description block.
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Sets the footer block.
    pub fn with_footer(mut self, footer: &str) -> Self {
        self.footer = footer.to_string();
        self
    }
}
