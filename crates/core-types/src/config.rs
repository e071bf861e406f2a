//! Layered configuration: defaults, then `vectordesk.toml`, then environment.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::{DEFAULT_VECTOR_DIMENSION, MetricType};

pub const DEFAULT_CONFIG_FILE: &str = "vectordesk.toml";
pub const CONFIG_PATH_ENV: &str = "VECTORDESK_CONFIG";
pub const BASE_URL_ENV: &str = "VECTORDESK_BASE_URL";
pub const LOG_LEVEL_ENV: &str = "VECTORDESK_LOG";
pub const CONCURRENCY_ENV: &str = "VECTORDESK_CONCURRENCY";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub backend: BackendConfig,
    pub client: ClientConfig,
    pub form: FormDefaults,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub base_url: String,
    pub request_timeout_ms: u64,
    pub connect_timeout_ms: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            request_timeout_ms: 30_000,
            connect_timeout_ms: 5_000,
        }
    }
}

/// What happens when an action is dispatched while an earlier one of the
/// same kind is still waiting on the network.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConcurrencyPolicy {
    /// Both requests run; whichever response lands last wins.
    #[default]
    Race,
    /// The pending request is aborted; the latest call wins.
    Supersede,
}

impl FromStr for ConcurrencyPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "race" => Ok(Self::Race),
            "supersede" => Ok(Self::Supersede),
            other => bail!("unknown concurrency policy `{other}` (expected race or supersede)"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub concurrency: ConcurrencyPolicy,
}

/// Initial values of the form fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormDefaults {
    pub id: i64,
    pub limit: u32,
    pub metric: MetricType,
    pub vector_dimension: u32,
}

impl Default for FormDefaults {
    fn default() -> Self {
        Self {
            id: 1,
            limit: 10,
            metric: MetricType::Cosine,
            vector_dimension: DEFAULT_VECTOR_DIMENSION,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

/// Config path in precedence order: explicit, `VECTORDESK_CONFIG`, cwd default.
pub fn resolve_config_path(explicit: Option<&Path>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .or_else(|| std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

/// Load configuration; a missing file yields defaults.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let path = resolve_config_path(path);
    let mut cfg = if path.exists() {
        read_config_file(&path)?
    } else {
        tracing::debug!(path = %path.display(), "config file not found; using defaults");
        AppConfig::default()
    };
    cfg.apply_env_overrides(|key| std::env::var(key).ok())?;
    Ok(cfg)
}

/// Load configuration, writing a default file first if none exists.
pub fn load_or_create_config(path: Option<&Path>) -> Result<AppConfig> {
    let resolved = resolve_config_path(path);
    if !resolved.exists() {
        write_default_config(&resolved)?;
    }
    load_config(Some(&resolved))
}

pub fn write_default_config(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create config directory {}", parent.display()))?;
    }
    let body = AppConfig::default().to_toml()?;
    fs::write(path, body).with_context(|| format!("write default config {}", path.display()))?;
    tracing::info!(path = %path.display(), "wrote default config");
    Ok(())
}

fn read_config_file(path: &Path) -> Result<AppConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("parse config {}", path.display()))
}

impl AppConfig {
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("serialize config")
    }

    /// Apply environment overrides through `lookup` (normally `std::env::var`).
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(BASE_URL_ENV).filter(|v| !v.trim().is_empty()) {
            self.backend.base_url = url;
        }
        if let Some(level) = lookup(LOG_LEVEL_ENV).filter(|v| !v.trim().is_empty()) {
            self.logging.level = level;
        }
        if let Some(policy) = lookup(CONCURRENCY_ENV) {
            self.client.concurrency = policy
                .parse()
                .with_context(|| format!("invalid {CONCURRENCY_ENV}"))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn partial_file_keeps_defaults_for_missing_keys() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cfg.toml");
        fs::write(
            &path,
            "[backend]\nbase_url = \"http://vectors:9000\"\n\n[client]\nconcurrency = \"supersede\"\n",
        )
        .unwrap();

        let cfg = read_config_file(&path).unwrap();
        assert_eq!(cfg.backend.base_url, "http://vectors:9000");
        assert_eq!(cfg.backend.request_timeout_ms, 30_000);
        assert_eq!(cfg.client.concurrency, ConcurrencyPolicy::Supersede);
        assert_eq!(cfg.form, FormDefaults::default());
    }

    #[test]
    fn load_or_create_writes_parsable_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("vectordesk.toml");
        assert!(!path.exists());
        let loaded = load_or_create_config(Some(&path)).unwrap();
        assert!(path.exists());
        assert_eq!(read_config_file(&path).unwrap(), AppConfig::default());
        assert_eq!(loaded.form, AppConfig::default().form);

        fs::write(&path, "[form]\nlimit = 5\n").unwrap();
        let again = load_or_create_config(Some(&path)).unwrap();
        assert_eq!(again.form.limit, 5);
    }

    #[test]
    fn env_overrides_beat_file_values() {
        let env: HashMap<&str, &str> = HashMap::from([
            (BASE_URL_ENV, "http://override:1234"),
            (LOG_LEVEL_ENV, "debug"),
            (CONCURRENCY_ENV, "Supersede"),
        ]);
        let mut cfg = AppConfig::default();
        cfg.apply_env_overrides(|k| env.get(k).map(|v| (*v).to_string()))
            .unwrap();
        assert_eq!(cfg.backend.base_url, "http://override:1234");
        assert_eq!(cfg.logging.level, "debug");
        assert_eq!(cfg.client.concurrency, ConcurrencyPolicy::Supersede);
    }

    #[test]
    fn bad_concurrency_override_is_an_error() {
        let mut cfg = AppConfig::default();
        let err = cfg
            .apply_env_overrides(|k| (k == CONCURRENCY_ENV).then(|| "sometimes".to_string()))
            .unwrap_err();
        assert!(format!("{err:#}").contains("sometimes"));
    }

    #[test]
    fn malformed_file_reports_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "[backend\nbase_url = 3").unwrap();
        let err = read_config_file(&path).unwrap_err();
        assert!(format!("{err:#}").contains("broken.toml"));
    }
}
