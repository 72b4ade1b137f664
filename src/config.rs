//! Suite configuration.
//!
//! Settings come from an optional TOML file, then environment variables
//! (`BASE_URL`, `API_TOKEN`, `REQUEST_TIMEOUT_SECS`, `REPORT_DIR`,
//! `REPORT_OVERWRITE`) override them. Variables missing from the process
//! environment are looked up in a `.env` file. Validate before use.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Validation result containing all found issues.
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    /// List of validation errors (fatal).
    pub errors: Vec<String>,
    /// List of validation warnings (non-fatal).
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// Returns true if validation passed (no errors).
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Adds an error message.
    pub fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    /// Adds a warning message.
    pub fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    /// Merges another validation result into this one.
    pub fn merge(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    /// Converts to a Result, failing if there are errors.
    pub fn into_result(self) -> Result<Vec<String>> {
        if self.is_valid() {
            Ok(self.warnings)
        } else {
            Err(Error::Config(self.errors.join("; ")))
        }
    }
}

/// Trait for validatable configuration types.
pub trait Validate {
    /// Validates the configuration and returns all issues found.
    fn validate(&self) -> ValidationResult;
}

/// Where and how the JSON run summary is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_report_enabled")]
    pub enabled: bool,
    #[serde(default = "default_report_dir")]
    pub dir: PathBuf,
    /// Reuse one file instead of a timestamped file per run.
    #[serde(default)]
    pub overwrite: bool,
}

fn default_report_enabled() -> bool {
    true
}

fn default_report_dir() -> PathBuf {
    PathBuf::from("reports")
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            enabled: default_report_enabled(),
            dir: default_report_dir(),
            overwrite: false,
        }
    }
}

/// Target API and run settings.
#[derive(Clone, Serialize, Deserialize)]
pub struct SuiteConfig {
    /// API root, e.g. `https://gorest.co.in/public/v2`.
    #[serde(default)]
    pub base_url: String,

    /// Bearer token sent on authenticated requests.
    #[serde(default)]
    pub api_token: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    #[serde(default)]
    pub report: ReportConfig,
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_token: String::new(),
            request_timeout_secs: default_request_timeout(),
            report: ReportConfig::default(),
        }
    }
}

impl SuiteConfig {
    /// Parses a TOML document.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("failed to parse config: {}", e)))
    }

    /// Loads the optional config file, then applies the process environment
    /// with `.env` in the working directory as fallback.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_dotenv(path, Path::new(DOTENV_FILE))
    }

    /// Like [`SuiteConfig::load`] with an explicit dotenv file. A missing
    /// dotenv file is not an error; process variables win over it.
    pub fn load_with_dotenv(path: Option<&Path>, dotenv: &Path) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_toml(&std::fs::read_to_string(path)?)?,
            None => Self::default(),
        };

        let file_vars = read_dotenv(dotenv)?;
        config.apply_env(|key| {
            std::env::var(key)
                .ok()
                .or_else(|| file_vars.get(key).cloned())
        })?;
        Ok(config)
    }

    /// Overrides fields from an environment lookup. Empty values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = get("BASE_URL") {
            self.base_url = url.trim().to_string();
        }
        if let Some(token) = get("API_TOKEN") {
            self.api_token = token.trim().to_string();
        }
        if let Some(secs) = get("REQUEST_TIMEOUT_SECS") {
            self.request_timeout_secs = secs.trim().parse().map_err(|_| {
                Error::Config(format!("REQUEST_TIMEOUT_SECS must be a number, got '{}'", secs))
            })?;
        }
        if let Some(dir) = get("REPORT_DIR") {
            self.report.dir = PathBuf::from(dir);
        }
        if let Some(overwrite) = get("REPORT_OVERWRITE") {
            self.report.overwrite = parse_flag("REPORT_OVERWRITE", &overwrite)?;
        }
        Ok(())
    }

    /// Per-request timeout for the HTTP client.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

const DOTENV_FILE: &str = ".env";

/// Reads `KEY=value` pairs from a dotenv file without touching the process
/// environment.
pub fn read_dotenv(path: &Path) -> Result<HashMap<String, String>> {
    if !path.exists() {
        return Ok(HashMap::new());
    }

    let read_error = |e: dotenvy::Error| {
        Error::Config(format!("failed to read {}: {}", path.display(), e))
    };

    let mut vars = HashMap::new();
    for item in dotenvy::from_path_iter(path).map_err(read_error)? {
        let (key, value) = item.map_err(read_error)?;
        vars.insert(key, value);
    }
    Ok(vars)
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" => Ok(true),
        "0" | "false" => Ok(false),
        _ => Err(Error::Config(format!(
            "{} must be true/false or 1/0, got '{}'",
            key, value
        ))),
    }
}

impl std::fmt::Debug for SuiteConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let token = if self.api_token.is_empty() {
            ""
        } else {
            "[REDACTED]"
        };
        f.debug_struct("SuiteConfig")
            .field("base_url", &self.base_url)
            .field("api_token", &token)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("report", &self.report)
            .finish()
    }
}

impl Validate for SuiteConfig {
    fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        if self.base_url.trim().is_empty() {
            result.add_error("base_url is not set (config file or BASE_URL)");
        } else if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            result.add_error(format!("base_url '{}' must start with http:// or https://", self.base_url));
        }

        if self.api_token.is_empty() {
            result.add_warning("api_token is empty; only unauthenticated scenarios can pass");
        }

        if self.request_timeout_secs == 0 {
            result.add_error("request_timeout_secs must be at least 1");
        }

        if self.request_timeout_secs > 300 {
            result.add_warning("request_timeout_secs over 5 minutes may hide a hung API");
        }

        result.merge(self.report.validate());
        result
    }
}

impl Validate for ReportConfig {
    fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();
        if self.enabled && self.dir.as_os_str().is_empty() {
            result.add_error("report.dir cannot be empty when reports are enabled");
        }
        result
    }
}
