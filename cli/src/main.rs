use std::process::ExitCode;

use tracing::debug;
use tracing_subscriber::EnvFilter;
use usage_config::UsageConfig;
use usage_core::{
    Args, OptionSpec, OptionTable, OptionValue, ParseError, ParseErrorKind, ParseErrors,
    ProgramInfo, ValueType,
};

const PACKAGE_VERSION: &str = env!("CARGO_PKG_VERSION");
const PROGRAM_NAME: &str = "usage_demo";

/// Path to a YAML/JSON file replacing the built-in option table.
const CONFIG_ENV: &str = "USAGE_DEMO_CONFIG";
/// Log filter directives, e.g. `usage_core=debug`.
const LOG_ENV: &str = "USAGE_LOG";

fn main() -> ExitCode {
    init_tracing();

    match run(Args::from_env()) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(2)
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn default_config() -> UsageConfig {
    let info = ProgramInfo::new(PROGRAM_NAME, PACKAGE_VERSION)
        .with_author("usage-scan contributors")
        .with_copyright("2024, usage-scan contributors")
        .with_usage("[options] [--] [arguments]")
        .with_description("\nExample program for demonstrating the command-line parser\n");

    let options = OptionTable::new()
        .with_option(
            "name",
            OptionSpec::required("n", "name", ValueType::String)
                .with_arg_name("name")
                .with_description("user's name"),
        )
        .with_option(
            "age",
            OptionSpec::required("a", "age", ValueType::Int)
                .with_arg_name("number")
                .with_description("user's age"),
        )
        .with_option(
            "optional",
            OptionSpec::optional("o", "optional", ValueType::String)
                .with_arg_name("value")
                .with_description("optional arg"),
        )
        .with_option(
            "hex",
            OptionSpec::required("x", "hex", ValueType::Hex)
                .with_arg_name("hex")
                .with_description("hex value"),
        )
        .with_option("sudo", OptionSpec::flag("s", "sudo").with_description("user can sudo"))
        .with_option("help", OptionSpec::flag("h", "help").with_description("usage help"))
        .with_option("version", OptionSpec::flag("v", "version").with_description("show version"));

    UsageConfig { info, options }
}

fn load_config() -> Result<UsageConfig, String> {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) => {
            debug!(path = ?path, "loading option table from file");
            UsageConfig::load(&path).map_err(|err| {
                format!(
                    "Failed to load {CONFIG_ENV} '{}': {err}",
                    path.to_string_lossy()
                )
            })
        }
        None => Ok(default_config()),
    }
}

fn run(args: Args) -> Result<ExitCode, String> {
    let usage = load_config()?.into_usage(args);

    if usage.contains("help") {
        println!("{usage}\n\n{}\n", usage.help());
        return Ok(ExitCode::SUCCESS);
    }
    if usage.contains("version") {
        println!("{}", usage.version());
        return Ok(ExitCode::SUCCESS);
    }
    if usage.args().is_empty() {
        println!(
            "{usage}\n\n{} needs some arguments, none was provided;\n  try calling it with --help argument\n",
            usage.name()
        );
        return Ok(ExitCode::FAILURE);
    }

    println!("{usage}\n");

    if !usage.errors().is_empty() {
        println!("command-line errors found:\n{}", ParseErrors(usage.errors()));

        if usage.errors().iter().any(is_fatal) {
            println!("\naborting, fatal errors occurred while parsing command-line arguments.");
            return Ok(ExitCode::FAILURE);
        }
        println!();
    }

    for name in usage.options().names() {
        if usage.contains(name) {
            println!("{}", describe(name, &usage.get(name)));
        }
    }
    println!();

    if !usage.remainder().is_empty() {
        println!("remaining arguments: {}\n", usage.remainder().join(" "));
    }

    Ok(ExitCode::SUCCESS)
}

/// Unknown options and duplicates are reported but do not stop the program.
fn is_fatal(error: &ParseError) -> bool {
    !matches!(
        error.kind(),
        ParseErrorKind::Duplicate | ParseErrorKind::UnknownOption
    )
}

fn describe(name: &str, value: &OptionValue) -> String {
    match name {
        "name" => format!("user's name is {value}"),
        "age" => format!("user's age is {}", value.as_int()),
        "optional" if value.as_str().is_empty() => "optional is enabled".to_string(),
        "optional" => format!("optional is enabled with optional value: {value}"),
        "hex" => format!(
            "hex value is {value} and if converted to int: {}",
            value.as_hex()
        ),
        "sudo" => "and user can sudo".to_string(),
        _ if value.as_str().is_empty() => format!("{name} is set"),
        _ => format!("{name} is {value}"),
    }
}

#[cfg(test)]
mod tests {
    use usage_core::Usage;

    use super::*;

    fn scan(argv: &[&str]) -> Usage {
        default_config().into_usage(Args::new(argv.iter().copied()))
    }

    #[test]
    fn test_default_table_is_well_formed() {
        assert!(default_config().validate().is_ok());
    }

    #[test]
    fn test_is_fatal_policy() {
        let usage = scan(&["demo", "--bogus", "-s", "-s", "-a", "x", "-n"]);
        let fatal: Vec<bool> = usage.errors().iter().map(is_fatal).collect();

        assert_eq!(fatal, vec![false, false, true, true]);
    }

    #[test]
    fn test_describe_values() {
        assert_eq!(
            describe("hex", &OptionValue::new("0xff")),
            "hex value is 0xff and if converted to int: 255"
        );
        assert_eq!(describe("optional", &OptionValue::new("")), "optional is enabled");
        assert_eq!(describe("level", &OptionValue::new("3")), "level is 3");
        assert_eq!(describe("color", &OptionValue::new("")), "color is set");
    }
}
