use crate::catalog::{Catalog, CatalogError};
use miette::Diagnostic;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

pub const CONFIG_FILE: &str = "pseudotrace.toml";

const ENV_MAX_STEPS: &str = "PSEUDOTRACE_MAX_STEPS";
const ENV_CATALOG: &str = "PSEUDOTRACE_CATALOG";
const ENV_LOG: &str = "PSEUDOTRACE_LOG";

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("Failed to read {}", path.display())]
    #[diagnostic(code(config::io))]
    Io {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },
    #[error("Invalid configuration in {}: {message}", path.display())]
    #[diagnostic(code(config::parse))]
    Parse { path: PathBuf, message: String },
    #[error("Invalid value `{value}` for {key}: {message}")]
    #[diagnostic(code(config::invalid_value))]
    InvalidValue {
        key: &'static str,
        value: String,
        message: String,
    },
}

/// Engine settings: `pseudotrace.toml` first, environment variables on top.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Step budget for `trace` and `check` runs.
    pub max_steps: usize,
    /// Problem catalog to load instead of the built-in one.
    pub catalog: Option<PathBuf>,
    /// `tracing` filter directive, e.g. `warn` or `pseudotrace=debug`.
    pub log: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_steps: 10_000,
            catalog: None,
            log: "warn".into(),
        }
    }
}

impl EngineConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new(CONFIG_FILE), |key| std::env::var(key).ok())
    }

    /// Reads `path` when it exists, then applies overrides looked up through `env`.
    pub fn load_from<F>(path: &Path, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = if path.exists() {
            Self::from_file(path)?
        } else {
            Self::default()
        };
        config.apply_env(env)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|error| ConfigError::Io {
            path: path.to_path_buf(),
            error,
        })?;
        toml::from_str(&content).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            message: error.to_string(),
        })
    }

    fn apply_env<F>(&mut self, env: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = env(ENV_MAX_STEPS) {
            self.max_steps = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: ENV_MAX_STEPS,
                message: "expected a positive step count".into(),
                value: raw,
            })?;
        }
        if let Some(path) = env(ENV_CATALOG).filter(|path| !path.trim().is_empty()) {
            self.catalog = Some(PathBuf::from(path));
        }
        if let Some(log) = env(ENV_LOG) {
            self.log = log;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_steps == 0 {
            return Err(ConfigError::InvalidValue {
                key: "max_steps",
                value: "0".into(),
                message: "expected a positive step count".into(),
            });
        }
        self.env_filter().map(|_| ())
    }

    pub fn env_filter(&self) -> Result<EnvFilter, ConfigError> {
        EnvFilter::try_new(&self.log).map_err(|error| ConfigError::InvalidValue {
            key: "log",
            value: self.log.clone(),
            message: error.to_string(),
        })
    }

    pub fn catalog(&self) -> Result<Catalog, CatalogError> {
        match &self.catalog {
            Some(path) => Catalog::load(path),
            None => Catalog::builtin(),
        }
    }
}
