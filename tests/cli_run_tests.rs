//! CLI Runner Tests
//!
//! Runs statements through the application layer with configuration
//! loaded from a temporary directory.

use gadgetry::{run, AppError, Config, Mode};
use gadgetry_core::{ErrorCategory, LexerOptions};
use serde_json::{json, Value};
use tempfile::TempDir;

fn run_json(statement: &str, config: &Config) -> Value {
    let output = run(statement, config, Mode::Execute).expect("statement should run");
    serde_json::from_str(&output).expect("output should be JSON")
}

#[test]
fn test_demo_query() {
    let value = run_json("SELECT Name FROM Customers", &Config::default());
    assert_eq!(value, json!([{"Name": "Joe"}, {"Name": "Fred"}]));
}

#[test]
fn test_orders_with_bracketed_column() {
    let value = run_json("SELECT Id, [Shipped On] FROM Orders", &Config::default());
    assert_eq!(value, json!([{"Id": 1, "Shipped On": null}]));
}

#[test]
fn test_parse_only_mode() {
    let output = run("select Age from Customers", &Config::default(), Mode::ParseOnly).unwrap();
    let value: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value, json!({"columns": ["Age"], "table_source": "Customers"}));
}

#[test]
fn test_tokens_mode() {
    let output = run("SELECT Name FROM Customers", &Config::default(), Mode::Tokens).unwrap();
    assert_eq!(output.lines().count(), 4);
    assert!(output.contains("FromKeyword"));
}

#[test]
fn test_case_sensitive_config() {
    let config = Config {
        lexer: LexerOptions::case_sensitive(),
        ..Config::default()
    };

    let err = run("select Name from Customers", &config, Mode::Execute).unwrap_err();
    assert!(matches!(err, AppError::Query(ref e) if e.category() == ErrorCategory::Lexical));
}

#[test]
fn test_semantic_error_surfaces() {
    let err = run("SELECT Name FROM Company", &Config::default(), Mode::Execute).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Semantic error: table source 'Company' is not a collection"
    );
}

#[test]
fn test_data_file_from_config_dir() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("gadgetry.toml"),
        "data = \"people.json\"\n\n[output]\npretty = false\n",
    )
    .unwrap();
    std::fs::write(
        dir.path().join("people.json"),
        r#"{"Customers": [{"Name": "Ann", "Age": 41}, {"Name": "Bo", "Age": 7}]}"#,
    )
    .unwrap();

    let config = Config::from_file(dir.path()).unwrap();
    let value = run_json("SELECT Age, Name FROM Customers", &config);
    assert_eq!(
        value,
        json!([{"Age": 41, "Name": "Ann"}, {"Age": 7, "Name": "Bo"}])
    );
}

#[test]
fn test_missing_data_file() {
    let config = Config {
        data: Some(std::path::PathBuf::from("/nonexistent/gadgetry-data.json")),
        ..Config::default()
    };
    let err = run("SELECT Name FROM Customers", &config, Mode::Execute).unwrap_err();
    assert!(matches!(err, AppError::IoError(_)));
}
