//! Configuration handling for the gadgetry CLI
//!
//! Manages the gadgetry.toml configuration file.
//!
//! ## Environment Variables
//!
//! The following environment variables override config file settings:
//!
//! - `GADGETRY_CASE_SENSITIVE` - Match SELECT/FROM in upper case only
//! - `GADGETRY_PRETTY` - Pretty-print JSON results
//! - `GADGETRY_DATA` - Path to a JSON data file for the sample context
//! - `GADGETRY_LOG` - Log filter directive
//!
//! These can be set in a `.env` file next to the config file.

use gadgetry_core::LexerOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = "gadgetry.toml";

/// Environment variable names
pub const ENV_CASE_SENSITIVE: &str = "GADGETRY_CASE_SENSITIVE";
pub const ENV_PRETTY: &str = "GADGETRY_PRETTY";
pub const ENV_DATA: &str = "GADGETRY_DATA";
pub const ENV_LOG: &str = "GADGETRY_LOG";

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Log filter used when RUST_LOG is not set
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    /// JSON file replacing the built-in sample data
    #[serde(default)]
    pub data: Option<PathBuf>,
    /// Keyword matching
    #[serde(default)]
    pub lexer: LexerOptions,
    /// Result rendering
    #[serde(default)]
    pub output: OutputConfig,
}

fn default_log_filter() -> String {
    "gadgetry=info,gadgetry_core=info".to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Pretty-print JSON output
    #[serde(default)]
    pub pretty: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
            data: None,
            lexer: LexerOptions::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a directory
    ///
    /// Loads any `.env` file in the directory, reads `gadgetry.toml` if it
    /// exists (defaults otherwise) and applies environment overrides.
    pub fn load(dir: &Path) -> anyhow::Result<Self> {
        // Load env file if present (ignore errors)
        let env_path = dir.join(".env");
        if env_path.exists() {
            let _ = dotenvy::from_path(&env_path);
        }

        let mut config = Self::from_file(dir)?;
        config.apply_env_overrides(dir);
        Ok(config)
    }

    /// Read `gadgetry.toml` from `dir` without environment overrides
    pub fn from_file(dir: &Path) -> anyhow::Result<Self> {
        let config_path = dir.join(CONFIG_FILE_NAME);
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&config_path)?;
        let mut config: Config = toml::from_str(&content)?;

        if let Some(data) = config.data.take() {
            config.data = Some(resolve_data_path(dir, data));
        }

        Ok(config)
    }

    /// Apply environment variable overrides to the configuration
    fn apply_env_overrides(&mut self, dir: &Path) {
        if let Some(flag) = env_flag(ENV_CASE_SENSITIVE) {
            self.lexer.case_sensitive = flag;
        }

        if let Some(flag) = env_flag(ENV_PRETTY) {
            self.output.pretty = flag;
        }

        if let Ok(data) = std::env::var(ENV_DATA) {
            if !data.is_empty() {
                self.data = Some(resolve_data_path(dir, PathBuf::from(data)));
            }
        }

        if let Ok(filter) = std::env::var(ENV_LOG) {
            if !filter.is_empty() {
                self.log_filter = filter;
            }
        }
    }
}

/// Data paths are relative to the config directory
fn resolve_data_path(dir: &Path, data: PathBuf) -> PathBuf {
    if data.is_relative() {
        dir.join(data)
    } else {
        data
    }
}

fn env_flag(name: &str) -> Option<bool> {
    let value = std::env::var(name).ok()?;
    parse_flag(&value)
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::from_file(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(!config.lexer.case_sensitive);
        assert!(!config.output.pretty);
    }

    #[test]
    fn test_reads_toml() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"
log_filter = "gadgetry=debug"
data = "customers.json"

[lexer]
case_sensitive = true

[output]
pretty = true
"#,
        )
        .unwrap();

        let config = Config::from_file(dir.path()).unwrap();
        assert_eq!(config.log_filter, "gadgetry=debug");
        assert!(config.lexer.case_sensitive);
        assert!(config.output.pretty);
        assert_eq!(config.data, Some(dir.path().join("customers.json")));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "[output]\npretty = true\n").unwrap();

        let config = Config::from_file(dir.path()).unwrap();
        assert!(config.output.pretty);
        assert_eq!(config.lexer, LexerOptions::default());
        assert_eq!(config.log_filter, default_log_filter());
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "[lexer\n").unwrap();
        assert!(Config::from_file(dir.path()).is_err());
    }

    #[test]
    fn test_env_file_overrides_toml() {
        let vars = [ENV_CASE_SENSITIVE, ENV_PRETTY, ENV_DATA, ENV_LOG];
        for var in vars {
            std::env::remove_var(var);
        }

        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "log_filter = \"gadgetry=warn\"\ndata = \"a.json\"\n\n[output]\npretty = true\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join(".env"),
            "GADGETRY_CASE_SENSITIVE=yes\nGADGETRY_PRETTY=off\nGADGETRY_DATA=b.json\nGADGETRY_LOG=gadgetry=trace\n",
        )
        .unwrap();

        let config = Config::load(dir.path()).unwrap();
        for var in vars {
            std::env::remove_var(var);
        }

        assert!(config.lexer.case_sensitive);
        assert!(!config.output.pretty);
        assert_eq!(config.data, Some(dir.path().join("b.json")));
        assert_eq!(config.log_filter, "gadgetry=trace");
    }

    #[test]
    fn test_absolute_data_path_is_kept() {
        let dir = TempDir::new().unwrap();
        let absolute = dir.path().join("elsewhere.json");
        assert_eq!(resolve_data_path(Path::new("conf"), absolute.clone()), absolute);
        assert_eq!(
            resolve_data_path(Path::new("conf"), PathBuf::from("rows.json")),
            Path::new("conf").join("rows.json")
        );
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" 0 "), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}
