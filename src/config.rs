//! Configuration file support for ots-sbom.
//!
//! Provides YAML-based configuration through `ots-sbom.config.yml` files,
//! and the merge of file values with command-line flags.

use anyhow::{bail, Context};
use ots_sbom::adapters::outbound::network::DEFAULT_REQUEST_TIMEOUT;
use ots_sbom::application::dto::{EnrichRequest, OutputFormat};
use ots_sbom::resolution::services::MatchMode;
use ots_sbom::shared::security::read_checked;
use ots_sbom::shared::Result;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cli::Args;

pub const CONFIG_FILENAME: &str = "ots-sbom.config.yml";

const MAX_WORKERS: usize = 64;

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub format: Option<String>,
    pub workers: Option<usize>,
    pub timeout_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    pub max_parents: Option<usize>,
    pub exclude_packages: Option<Vec<String>>,
    pub match_mode: Option<String>,
    pub include_parents: Option<bool>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = read_checked(path, "Config file").with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    // An empty file deserializes to null, not to an empty mapping
    if content.trim().is_empty() {
        return Ok(ConfigFile::default());
    }

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Loads `--config` when given, otherwise looks for the default file in `cwd`.
pub fn load_config(explicit: Option<&Path>, cwd: &Path) -> Result<Option<ConfigFile>> {
    match explicit {
        Some(path) => {
            let config = load_config_from_path(path)?;
            eprintln!("⚙️  Loaded config from: {}", path.display());
            Ok(Some(config))
        }
        None => {
            let config = discover_config(cwd)?;
            if config.is_some() {
                eprintln!("⚙️  Auto-discovered config file: {}", CONFIG_FILENAME);
            }
            Ok(config)
        }
    }
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(workers) = config.workers {
        if !(1..=MAX_WORKERS).contains(&workers) {
            bail!(
                "Invalid config: workers must be between 1 and {} (got {}).",
                MAX_WORKERS,
                workers
            );
        }
    }

    for (field, value) in [
        ("timeout_secs", config.timeout_secs),
        ("request_timeout_secs", config.request_timeout_secs),
    ] {
        if value == Some(0) {
            bail!("Invalid config: {} must be greater than 0.", field);
        }
    }

    if let Some(ref format) = config.format {
        format
            .parse::<OutputFormat>()
            .map_err(|e| anyhow::anyhow!("Invalid config: {}", e))?;
    }

    if let Some(ref mode) = config.match_mode {
        mode.parse::<MatchMode>()
            .map_err(|e| anyhow::anyhow!("Invalid config: {}", e))?;
    }

    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    let mut keys: Vec<&String> = config.unknown_fields.keys().collect();
    keys.sort();
    for key in keys {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}

/// Effective settings of one run
#[derive(Debug, Clone)]
pub struct Settings {
    pub request: EnrichRequest,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    /// Timeout of a single HTTP request
    pub request_timeout: Duration,
    pub github_token: Option<String>,
}

/// Merges command-line flags over config values over defaults.
///
/// Exclude patterns from both sources are combined.
pub fn merge(args: Args, config: Option<ConfigFile>) -> Result<Settings> {
    let config = config.unwrap_or_default();
    let mut request = EnrichRequest::new(args.sbom);

    let format = match (args.format, config.format.as_deref()) {
        (Some(format), _) => format,
        (None, Some(value)) => value.parse().map_err(anyhow::Error::msg)?,
        (None, None) => OutputFormat::default(),
    };

    if let Some(workers) = args.workers.map(usize::from).or(config.workers) {
        request.workers = workers;
    }
    if let Some(secs) = args.timeout.or(config.timeout_secs) {
        request.task_timeout = Duration::from_secs(secs);
    }

    request.max_parents = if args.no_parent_limit {
        None
    } else {
        args.max_parents
            .or(config.max_parents)
            .or(request.max_parents)
    };

    request.match_mode = match (args.match_mode, config.match_mode.as_deref()) {
        (Some(mode), _) => mode,
        (None, Some(value)) => value.parse().map_err(anyhow::Error::msg)?,
        (None, None) => MatchMode::default(),
    };

    request.include_parents = !args.no_parents && config.include_parents.unwrap_or(true);
    request.dry_run = args.dry_run;

    let mut exclude = config.exclude_packages.unwrap_or_default();
    for pattern in args.exclude {
        if !exclude.contains(&pattern) {
            exclude.push(pattern);
        }
    }
    request.exclude_patterns = exclude;

    let request_timeout = config
        .request_timeout_secs
        .map(Duration::from_secs)
        .unwrap_or(DEFAULT_REQUEST_TIMEOUT);

    Ok(Settings {
        request,
        format,
        output: args.output,
        request_timeout,
        github_token: args.github_token,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["ots-sbom", "sbom.json"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_load_valid_config() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "config.yml",
            r#"
format: json
workers: 8
timeout_secs: 20
request_timeout_secs: 5
max_parents: 4
exclude_packages:
  - "@angular/*"
  - tslib
match_mode: exact
include_parents: false
"#,
        );

        let config = load_config_from_path(&path).unwrap();
        assert_eq!(config.format.as_deref(), Some("json"));
        assert_eq!(config.workers, Some(8));
        assert_eq!(config.timeout_secs, Some(20));
        assert_eq!(config.request_timeout_secs, Some(5));
        assert_eq!(config.max_parents, Some(4));
        assert_eq!(
            config.exclude_packages.as_deref(),
            Some(&["@angular/*".to_string(), "tslib".to_string()][..])
        );
        assert_eq!(config.match_mode.as_deref(), Some("exact"));
        assert_eq!(config.include_parents, Some(false));
        assert!(config.unknown_fields.is_empty());
    }

    #[test]
    fn test_discover_config_found() {
        let dir = TempDir::new().unwrap();
        write(&dir, CONFIG_FILENAME, "format: yaml\n");

        let config = discover_config(dir.path()).unwrap().unwrap();
        assert_eq!(config.format.as_deref(), Some("yaml"));
    }

    #[test]
    fn test_discover_config_not_found() {
        let dir = TempDir::new().unwrap();
        assert!(discover_config(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_empty_config_file() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "empty.yml", "");
        let config = load_config_from_path(&path).unwrap();
        assert!(config.workers.is_none());
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config_from_path(Path::new("/nonexistent/config.yml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_load_config_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "bad.yml", "invalid: yaml: [[[broken");

        let err = load_config_from_path(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_workers_out_of_range() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "config.yml", "workers: 0\n");
        let err = load_config_from_path(&path).unwrap_err();
        assert!(err.to_string().contains("workers must be between 1 and 64"));

        let path = write(&dir, "config.yml", "workers: 65\n");
        assert!(load_config_from_path(&path).is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "config.yml", "request_timeout_secs: 0\n");
        let err = load_config_from_path(&path).unwrap_err();
        assert!(err
            .to_string()
            .contains("request_timeout_secs must be greater than 0"));
    }

    #[test]
    fn test_invalid_format_and_match_mode() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "config.yml", "format: markdown\n");
        assert!(load_config_from_path(&path).is_err());

        let path = write(&dir, "config.yml", "match_mode: fuzzy\n");
        assert!(load_config_from_path(&path).is_err());
    }

    #[test]
    fn test_unknown_fields_warning() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "config.yml",
            "format: json\ncheck_cve: true\nanother_unknown: value\n",
        );

        let config = load_config_from_path(&path).unwrap();
        assert_eq!(config.unknown_fields.len(), 2);
        assert!(config.unknown_fields.contains_key("check_cve"));
        assert!(config.unknown_fields.contains_key("another_unknown"));
    }

    #[test]
    fn test_merge_defaults() {
        let settings = merge(args(&[]), None).unwrap();

        assert_eq!(settings.format, OutputFormat::Yaml);
        assert_eq!(settings.request.sbom_path, PathBuf::from("sbom.json"));
        assert_eq!(settings.request.workers, 10);
        assert_eq!(settings.request.task_timeout, Duration::from_secs(30));
        assert_eq!(settings.request.max_parents, Some(3));
        assert_eq!(settings.request.match_mode, MatchMode::Substring);
        assert!(settings.request.include_parents);
        assert!(!settings.request.dry_run);
        assert_eq!(settings.request_timeout, DEFAULT_REQUEST_TIMEOUT);
    }

    #[test]
    fn test_merge_config_over_defaults() {
        let config = ConfigFile {
            format: Some("json".to_string()),
            workers: Some(4),
            timeout_secs: Some(12),
            request_timeout_secs: Some(3),
            max_parents: Some(6),
            match_mode: Some("exact".to_string()),
            include_parents: Some(false),
            ..Default::default()
        };

        let settings = merge(args(&[]), Some(config)).unwrap();
        assert_eq!(settings.format, OutputFormat::Json);
        assert_eq!(settings.request.workers, 4);
        assert_eq!(settings.request.task_timeout, Duration::from_secs(12));
        assert_eq!(settings.request_timeout, Duration::from_secs(3));
        assert_eq!(settings.request.max_parents, Some(6));
        assert_eq!(settings.request.match_mode, MatchMode::Exact);
        assert!(!settings.request.include_parents);
    }

    #[test]
    fn test_merge_cli_over_config() {
        let config = ConfigFile {
            format: Some("json".to_string()),
            workers: Some(4),
            max_parents: Some(6),
            match_mode: Some("exact".to_string()),
            ..Default::default()
        };

        let settings = merge(
            args(&[
                "-f",
                "yaml",
                "-w",
                "2",
                "--no-parent-limit",
                "--match-mode",
                "substring",
            ]),
            Some(config),
        )
        .unwrap();

        assert_eq!(settings.format, OutputFormat::Yaml);
        assert_eq!(settings.request.workers, 2);
        assert_eq!(settings.request.max_parents, None);
        assert_eq!(settings.request.match_mode, MatchMode::Substring);
    }

    #[test]
    fn test_merge_combines_exclude_patterns() {
        let config = ConfigFile {
            exclude_packages: Some(vec!["tslib".to_string(), "@angular/*".to_string()]),
            ..Default::default()
        };

        let settings = merge(args(&["-e", "zone.js", "-e", "tslib"]), Some(config)).unwrap();
        assert_eq!(
            settings.request.exclude_patterns,
            vec!["tslib", "@angular/*", "zone.js"]
        );
    }
}
