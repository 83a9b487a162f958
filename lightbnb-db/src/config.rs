use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default maximum connections for the pool.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Connection and timeout settings for the LightBnB store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DbConfig {
    /// PostgreSQL connection string (`${VAR}` references are expanded)
    pub url: String,
    pub max_connections: u32,
    /// How long a caller waits for a pooled connection
    pub acquire_timeout_secs: u64,
    /// Server-side `statement_timeout` applied to every connection
    pub statement_timeout_ms: u64,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            url: "postgres://localhost/lightbnb".to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout_secs: 5,
            statement_timeout_ms: 10_000,
        }
    }
}

/// On-disk layout: settings live under a `[database]` table
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    database: DbConfig,
}

impl DbConfig {
    /// Load from the given TOML file, then apply `DATABASE_URL`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let mut config = Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file (invalid TOML): {:?}", path))?;
        config.apply_env();
        Ok(config)
    }

    /// Load from the default path if it exists, otherwise start from
    /// defaults. `DATABASE_URL` wins over either.
    pub fn load_or_default() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            return Self::load(path);
        }

        let mut config = Self::default();
        config.apply_env();
        Ok(config)
    }

    /// Get config file path: ~/.lightbnb/config.toml
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".lightbnb/config.toml")
    }

    /// Parse the `[database]` table and expand `${VAR}` references in the URL.
    pub fn from_toml(content: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(content)?;
        let mut config = file.database;
        config.url = expand_env(&config.url);
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Ok(url) = env::var("DATABASE_URL") {
            if !url.trim().is_empty() {
                self.url = url;
            }
        }
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    pub fn statement_timeout(&self) -> Duration {
        Duration::from_millis(self.statement_timeout_ms)
    }

    /// URL with any password replaced, for logging.
    pub fn redacted_url(&self) -> String {
        match (self.url.find("://"), self.url.rfind('@')) {
            (Some(scheme_end), Some(at)) if at > scheme_end => {
                let userinfo = &self.url[scheme_end + 3..at];
                match userinfo.split_once(':') {
                    Some((user, _)) => format!(
                        "{}{}:***{}",
                        &self.url[..scheme_end + 3],
                        user,
                        &self.url[at..]
                    ),
                    None => self.url.clone(),
                }
            }
            _ => self.url.clone(),
        }
    }
}

/// Expand ${VAR} references from the environment; unknown vars become empty.
fn expand_env(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(start) = rest.find("${") {
        result.push_str(&rest[..start]);
        match rest[start + 2..].find('}') {
            Some(end) => {
                let name = &rest[start + 2..start + 2 + end];
                result.push_str(&env::var(name).unwrap_or_default());
                rest = &rest[start + 2 + end + 1..];
            }
            None => {
                result.push_str(&rest[start..]);
                rest = "";
            }
        }
    }

    result.push_str(rest);
    result
}
