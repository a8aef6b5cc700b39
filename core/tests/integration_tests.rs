use usage_core::{
    Args, OptionSpec, OptionTable, ParseError, ParseErrorKind, ParseErrors, ProgramInfo, Usage,
    Validated, ValueType,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn table() -> OptionTable {
    OptionTable::new()
        .with_option(
            "name",
            OptionSpec::required("n", "name", ValueType::String).with_arg_name("name"),
        )
        .with_option(
            "age",
            OptionSpec::required("a", "age", ValueType::Int).with_arg_name("number"),
        )
        .with_option(
            "optional",
            OptionSpec::optional("o", "optional", ValueType::String).with_arg_name("value"),
        )
        .with_option("hex", OptionSpec::required("x", "hex", ValueType::Hex))
        .with_option("bool", OptionSpec::required("b", "bool", ValueType::Bool))
        .with_option("ratio", OptionSpec::required("r", "ratio", ValueType::Float))
        .with_option("sudo", OptionSpec::flag("s", "sudo"))
        .with_option("flag", OptionSpec::flag("f", "flag"))
}

fn scan(args: &[&str]) -> Validated {
    Validated::scan(&table(), args)
}

fn kinds(result: &Validated) -> Vec<ParseErrorKind> {
    result.errors().iter().map(ParseError::kind).collect()
}

// ---------------------------------------------------------------------------
// Accepted input
// ---------------------------------------------------------------------------

#[test]
fn test_recognized_tokens_yield_exact_values() {
    let result = scan(&[
        "--name", "Ann", "-a", "33", "-x", "ff", "--bool", "no", "-r", "1.5", "-s",
    ]);

    assert!(result.is_ok());
    let values: Vec<(&str, &str)> = result
        .values()
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    assert_eq!(
        values,
        vec![
            ("name", "Ann"),
            ("age", "33"),
            ("hex", "0xff"),
            ("bool", "false"),
            ("ratio", "1.5"),
            ("sudo", ""),
        ]
    );
}

#[test]
fn test_flag_long_and_short_set_same_key() {
    let long = scan(&["--flag"]);
    let short = scan(&["-f"]);

    assert!(long.contains("flag"));
    assert!(short.contains("flag"));
    assert_eq!(long.values(), short.values());
}

#[test]
fn test_bool_yes_normalizes_to_true() {
    let result = scan(&["-b", "yes"]);

    assert_eq!(result.value("bool"), "true");
    assert!(result.get("bool").as_bool());
}

#[test]
fn test_hex_inline_forms_round_trip_to_integers() {
    let plain = scan(&["-x=ff"]);
    assert_eq!(plain.value("hex"), "0xff");
    assert_eq!(plain.get("hex").as_hex(), 255);

    let prefixed = scan(&["-x=0x1A"]);
    assert!(prefixed.is_ok());
    assert_eq!(prefixed.value("hex").to_ascii_lowercase(), "0x1a");
    assert_eq!(prefixed.get("hex").as_hex(), 26);
}

// ---------------------------------------------------------------------------
// Error accumulation
// ---------------------------------------------------------------------------

#[test]
fn test_duplicate_reports_once_and_keeps_last_value() {
    let result = scan(&["--name", "a", "--name", "b"]);

    assert_eq!(kinds(&result), vec![ParseErrorKind::Duplicate]);
    assert_eq!(result.value("name"), "b");
}

#[test]
fn test_trailing_required_option_is_missing() {
    let result = scan(&["-s", "--name"]);

    assert_eq!(kinds(&result), vec![ParseErrorKind::MissingArg]);
    assert!(!result.contains("name"));
}

#[test]
fn test_int_validation_failure() {
    let result = scan(&["-a", "12x"]);

    assert_eq!(
        result.errors(),
        [ParseError::ArgValidation {
            name: "age".into(),
            expected: ValueType::Int,
            value: "12x".into(),
        }]
    );
    assert!(!result.contains("age"));
    assert_eq!(
        ParseErrors(result.errors()).to_string(),
        " --age: validation failure, expected integer number, got 12x"
    );
}

#[test]
fn test_all_problems_surface_in_one_scan() {
    let result = scan(&["--bogus", "-f", "--flag", "-r", "1.2.3", "-x=#zz", "-a"]);

    assert_eq!(
        kinds(&result),
        vec![
            ParseErrorKind::UnknownOption,
            ParseErrorKind::Duplicate,
            ParseErrorKind::ArgValidation,
            ParseErrorKind::ArgValidation,
            ParseErrorKind::MissingArg,
        ]
    );
    assert_eq!(result.values().keys().collect::<Vec<_>>(), vec!["flag"]);
}

// ---------------------------------------------------------------------------
// Optional values
// ---------------------------------------------------------------------------

#[test]
fn test_optional_followed_by_recognized_option() {
    let result = scan(&["-o", "--sudo", "-a", "5"]);

    assert!(result.is_ok());
    assert_eq!(result.value("optional"), "");
    assert!(result.contains("optional"));
    assert!(result.contains("sudo"));
    assert_eq!(result.value("age"), "5");
}

#[test]
fn test_optional_redispatch_into_required_option() {
    let result = scan(&["--optional", "--name", "Zed"]);

    assert!(result.is_ok());
    assert_eq!(result.value("name"), "Zed");
    assert_eq!(result.value("optional"), "");
}

// ---------------------------------------------------------------------------
// Remainder
// ---------------------------------------------------------------------------

#[test]
fn test_tokens_after_double_dash_are_verbatim() {
    let result = scan(&["-s", "--", "-x", "--name", "plain", "--"]);

    assert!(result.is_ok());
    assert_eq!(result.remainder(), ["-x", "--name", "plain", "--"]);
    assert!(!result.contains("hex"));
}

#[test]
fn test_bare_token_switches_to_remainder() {
    let result = scan(&["-s", "file.txt", "-f", "--age", "3"]);

    assert!(result.is_ok());
    assert_eq!(result.remainder(), ["file.txt", "-f", "--age", "3"]);
    assert!(!result.contains("flag"));
}

// ---------------------------------------------------------------------------
// Determinism
// ---------------------------------------------------------------------------

#[test]
fn test_repeated_scans_are_identical() {
    let args = ["-o", "-a", "x", "--nope", "-s", "-s", "tail", "--name"];

    let first = scan(&args);
    let second = scan(&args);

    assert_eq!(first, second);
    assert_eq!(
        ParseErrors(first.errors()).to_string(),
        ParseErrors(second.errors()).to_string()
    );
}

#[test]
fn test_usage_facade_matches_direct_scan() {
    let argv = ["prog", "-n", "x", "-s", "rest"];
    let usage = Usage::new(ProgramInfo::new("prog", "1"), table(), Args::new(argv));

    assert_eq!(usage.validated(), &Validated::scan(&table(), &argv[1..]));
}
