//! Program-level facade and help text rendering.
//!
//! [`Usage`] bundles the program metadata, the option table and the
//! acquired argument vector, scans once on construction and renders the
//! title, version and help text from the same declarations.
//!
//! # Example
//!
//! ```
//! use usage_core::*;
//!
//! let usage = Usage::new(
//!     ProgramInfo::new("greet", "1.0.0").with_author("Jane Doe"),
//!     OptionTable::new()
//!         .with_option(
//!             "name",
//!             OptionSpec::required("n", "name", ValueType::String)
//!                 .with_arg_name("name")
//!                 .with_description("who to greet"),
//!         )
//!         .with_option("help", OptionSpec::flag("h", "help").with_description("usage help")),
//!     Args::new(["greet", "--name", "world"]),
//! );
//!
//! assert_eq!(usage.value("name"), "world");
//! assert_eq!(usage.title(), "greet \nVersion 1.0.0\nAuthor Jane Doe");
//! assert!(usage.help().contains("-n, --name <name>"));
//! ```

use std::fmt;

use crate::{Arity, OptionSpec, OptionTable, OptionValue, ParseError, ProgramInfo, Validated};

const NO_OPTIONS: &str = "No options available for this program";
const ROW_INDENT: &str = "   ";
// Row indent plus the gap before descriptions.
const DESCRIPTION_GAP: usize = 7;

/// The process argument vector: program name plus the following tokens.
///
/// # Examples
///
/// ```
/// use usage_core::Args;
///
/// let args = Args::new(["prog", "-s", "file"]);
/// assert_eq!(args.cmd(), "prog");
/// assert_eq!(args.len(), 2);
/// assert_eq!(args.to_string(), "prog -s file");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Args {
    cmd: String,
    args: Vec<String>,
}

impl Args {
    /// Builds from an iterator whose first item is the program name.
    pub fn new<I>(argv: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut iter = argv.into_iter().map(Into::into);
        let cmd = iter.next().unwrap_or_default();
        Self {
            cmd,
            args: iter.collect(),
        }
    }

    /// Captures the current process arguments.
    ///
    /// Arguments that are not valid Unicode are converted lossily.
    pub fn from_env() -> Self {
        Self::new(std::env::args_os().map(|arg| arg.to_string_lossy().into_owned()))
    }

    /// Returns the program name as invoked.
    pub fn cmd(&self) -> &str {
        &self.cmd
    }

    /// Returns the number of arguments after the program name.
    pub fn len(&self) -> usize {
        self.args.len()
    }

    /// Returns `true` if nothing followed the program name.
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// Returns the argument at `index`, program name excluded.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }

    /// Iterates over the arguments after the program name.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.args.iter().map(String::as_str)
    }

    /// Returns the arguments after the program name.
    pub fn as_slice(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for Args {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.cmd)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Declarations plus the scan of one argument vector.
#[derive(Debug, Clone)]
pub struct Usage {
    info: ProgramInfo,
    options: OptionTable,
    args: Args,
    validated: Validated,
}

impl Usage {
    /// Scans `args` against `options`.
    pub fn new(info: ProgramInfo, options: OptionTable, args: Args) -> Self {
        let validated = Validated::scan(&options, args.iter());
        Self {
            info,
            options,
            args,
            validated,
        }
    }

    /// Returns the program metadata.
    pub fn info(&self) -> &ProgramInfo {
        &self.info
    }

    /// Returns the option table.
    pub fn options(&self) -> &OptionTable {
        &self.options
    }

    /// Returns the scanned argument vector.
    pub fn args(&self) -> &Args {
        &self.args
    }

    /// Returns the scan result.
    pub fn validated(&self) -> &Validated {
        &self.validated
    }

    /// Returns the declared program name.
    pub fn name(&self) -> &str {
        &self.info.name
    }

    /// Returns the program name as invoked.
    pub fn cmd(&self) -> &str {
        self.args.cmd()
    }

    /// Returns a typed view of one option.
    pub fn get(&self, name: &str) -> OptionValue {
        self.validated.get(name)
    }

    /// Returns the stored value, or an empty string if absent.
    pub fn value(&self, name: &str) -> &str {
        self.validated.value(name)
    }

    /// Returns `true` if the option was supplied and accepted.
    pub fn contains(&self, name: &str) -> bool {
        self.validated.contains(name)
    }

    /// Returns every scan anomaly in detection order.
    pub fn errors(&self) -> &[ParseError] {
        self.validated.errors()
    }

    /// Returns the trailing arguments.
    pub fn remainder(&self) -> &[String] {
        self.validated.remainder()
    }

    /// Renders the program name and version.
    pub fn version(&self) -> String {
        let info = &self.info;
        let mut out = String::new();

        if !info.name.is_empty() {
            out.push_str(&info.name);
            if !info.version.is_empty() {
                if !info.version.starts_with('\n') {
                    out.push(' ');
                }
                out.push_str(&info.version_title);
                out.push_str(&info.version);
            }
        } else if !info.version.is_empty() {
            out.push_str(info.version_title.trim_start());
            out.push_str(&info.version);
        }

        out
    }

    /// Renders the version block followed by author and copyright lines.
    pub fn title(&self) -> String {
        let info = &self.info;
        let mut out = self.version();

        for (title, text) in [
            (&info.author_title, &info.author),
            (&info.copyright_title, &info.copyright),
        ] {
            if text.is_empty() {
                continue;
            }
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(title);
            out.push_str(text);
        }

        out
    }

    /// Renders the usage line, description and aligned option rows.
    pub fn help(&self) -> String {
        if self.options.is_empty() {
            return NO_OPTIONS.to_string();
        }

        let info = &self.info;
        let mut out = String::new();

        if !info.usage_title.is_empty() || !info.usage.is_empty() {
            out.push_str(&info.usage_title);
            out.push_str(self.cmd());
            if !info.usage.is_empty() {
                out.push(' ');
                out.push_str(&info.usage);
            }
            out.push('\n');
        }
        out.push_str(&info.description);
        out.push_str(&info.options_title);

        let rows: Vec<&OptionSpec> = self.options.matchable().map(|(_, spec)| spec).collect();
        let key_width = rows
            .iter()
            .filter(|spec| !spec.key.is_empty())
            .map(|spec| spec.key.len() + 1)
            .max()
            .unwrap_or(0);
        let desc_column = rows.iter().map(|spec| row_width(spec)).max().unwrap_or(0) + DESCRIPTION_GAP;

        for spec in rows {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(&render_row(spec, key_width, desc_column));
        }

        if !info.footer.is_empty() {
            out.push('\n');
            out.push_str(&info.footer);
        }

        out
    }
}

impl fmt::Display for Usage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title())
    }
}

fn placeholder(spec: &OptionSpec) -> &str {
    if spec.arg_name.is_empty() {
        "arg"
    } else {
        &spec.arg_name
    }
}

// Width of `-k, --word <arg>` without indentation.
fn row_width(spec: &OptionSpec) -> usize {
    let mut width = 0;
    if !spec.key.is_empty() {
        width += 1 + spec.key.len();
    }
    if !spec.key.is_empty() && !spec.word.is_empty() {
        width += 2;
    }
    if !spec.word.is_empty() {
        width += 2 + spec.word.len();
    }
    if spec.takes_value() {
        width += 3 + placeholder(spec).len();
    }
    width
}

fn pad_to(row: &mut String, width: usize) {
    while row.len() < width {
        row.push(' ');
    }
}

fn render_row(spec: &OptionSpec, key_width: usize, desc_column: usize) -> String {
    let mut row = String::from(ROW_INDENT);

    if !spec.key.is_empty() {
        row.push('-');
        row.push_str(&spec.key);
        if !spec.word.is_empty() {
            row.push_str(", ");
        }
    }
    pad_to(&mut row, key_width + 5);

    if !spec.word.is_empty() {
        row.push_str("--");
        row.push_str(&spec.word);
    }

    match spec.arity {
        Arity::Required => row.push_str(&format!(" <{}>", placeholder(spec))),
        Arity::Optional => row.push_str(&format!(" [{}]", placeholder(spec))),
        Arity::None => {}
    }

    pad_to(&mut row, desc_column);
    row.push_str(&spec.description);
    row
}
