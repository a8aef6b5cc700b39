//! File-based declarations for `usage-core`.
//!
//! Programs that prefer to keep their option table out of code can declare
//! it, together with the program metadata, in a YAML or JSON file and load
//! it as a [`UsageConfig`]. Loading validates the table with
//! [`usage_core::check_table`].
//!
//! # Quick start
//!
//! ```no_run
//! use usage_config::UsageConfig;
//! use usage_core::Args;
//!
//! let config = UsageConfig::load("options.yml").unwrap();
//! let usage = config.into_usage(Args::from_env());
//! if usage.contains("help") {
//!     println!("{}\n\n{}", usage.title(), usage.help());
//! }
//! ```

mod config;
mod error;

pub use config::{ConfigFormat, UsageConfig};
pub use error::{ConfigError, Result};
