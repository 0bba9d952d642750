use crate::constants;
use crate::error::{CricketError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding one sub-directory of match files per category
    pub data_root: PathBuf,
    pub output_dir: PathBuf,
    pub database_path: PathBuf,
    pub query_results_dir: PathBuf,
    pub log_dir: PathBuf,
    /// Where to write a Prometheus snapshot at the end of a run
    pub metrics_file: Option<PathBuf>,
    pub categories: Vec<CategoryConfig>,
}

/// One match-format category and where its data lives
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryConfig {
    pub name: String,
    pub source_dir: String,
    pub csv_file: String,
    pub table: String,
}

impl CategoryConfig {
    pub fn new(name: &str, source_dir: &str, csv_file: &str, table: &str) -> Self {
        Self {
            name: name.to_string(),
            source_dir: source_dir.to_string(),
            csv_file: csv_file.to_string(),
            table: table.to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_root: PathBuf::from("."),
            output_dir: PathBuf::from(constants::DEFAULT_OUTPUT_DIR),
            database_path: PathBuf::from(constants::DEFAULT_DATABASE),
            query_results_dir: PathBuf::from(constants::DEFAULT_QUERY_RESULTS_DIR),
            log_dir: PathBuf::from(constants::DEFAULT_LOG_DIR),
            metrics_file: None,
            categories: vec![
                CategoryConfig::new(constants::IPL, "IPL", "ipl_matches.csv", constants::IPL_TABLE),
                CategoryConfig::new(constants::ODIS, "ODIs", "odi_matches.csv", constants::ODI_TABLE),
                CategoryConfig::new(constants::T20, "T20", "t20_matches.csv", constants::T20_TABLE),
                CategoryConfig::new(constants::TEST, "Test", "test_matches.csv", constants::TEST_TABLE),
            ],
        }
    }
}

impl Config {
    /// Load configuration from an explicit path, or fall back to
    /// `$CRICKET_CONFIG`, then `cricket.toml`, then the built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let env_path = std::env::var(constants::CONFIG_ENV_VAR).ok();
        let resolved = resolve_config_path(
            path,
            env_path.as_deref(),
            Path::new(constants::DEFAULT_CONFIG_FILE),
        );

        let config = match resolved {
            Some(p) => Self::from_file(&p)?,
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CricketError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.categories.is_empty() {
            return Err(CricketError::Config("no categories configured".to_string()));
        }

        let mut names = HashSet::new();
        let mut csv_files = HashSet::new();
        let mut tables = HashSet::new();
        for category in &self.categories {
            // Lookups are case-insensitive, so names must be unique regardless of case
            if !names.insert(category.name.to_ascii_lowercase()) {
                return Err(CricketError::Config(format!(
                    "duplicate category '{}'",
                    category.name
                )));
            }
            if !csv_files.insert(category.csv_file.as_str()) {
                return Err(CricketError::Config(format!(
                    "csv_file '{}' is used by more than one category",
                    category.csv_file
                )));
            }
            if !is_sql_identifier(&category.table) {
                return Err(CricketError::Config(format!(
                    "table name '{}' for category '{}' is not a plain SQL identifier",
                    category.table, category.name
                )));
            }
            if !tables.insert(category.table.to_ascii_lowercase()) {
                return Err(CricketError::Config(format!(
                    "table '{}' is used by more than one category",
                    category.table
                )));
            }
        }
        Ok(())
    }

    pub fn category(&self, name: &str) -> Result<&CategoryConfig> {
        self.categories
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| CricketError::UnknownCategory(name.to_string()))
    }

    /// Resolve a comma-separated selection (as passed on the CLI) to categories.
    /// `None` selects every configured category.
    pub fn select_categories(&self, selection: Option<&str>) -> Result<Vec<CategoryConfig>> {
        match selection {
            None => Ok(self.categories.clone()),
            Some(list) => list
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|name| self.category(name).cloned())
                .collect(),
        }
    }

    pub fn source_dir(&self, category: &CategoryConfig) -> PathBuf {
        self.data_root.join(&category.source_dir)
    }

    pub fn csv_path(&self, category: &CategoryConfig) -> PathBuf {
        self.output_dir.join(&category.csv_file)
    }
}

/// Pick the config file: an explicit path wins, then a non-blank
/// environment value, then `default_path` if it exists. `None` means defaults.
fn resolve_config_path(
    explicit: Option<&Path>,
    env_value: Option<&str>,
    default_path: &Path,
) -> Option<PathBuf> {
    if let Some(p) = explicit {
        return Some(p.to_path_buf());
    }
    match env_value {
        Some(v) if !v.trim().is_empty() => Some(PathBuf::from(v)),
        _ => default_path.exists().then(|| default_path.to_path_buf()),
    }
}

/// Table names are interpolated into DDL, so only `[A-Za-z_][A-Za-z0-9_]*` is accepted.
pub fn is_sql_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
