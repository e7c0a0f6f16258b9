//! Layered hub configuration: built-in defaults, then an optional TOML file
//! named by `CLUBHUB_CONFIG`, then individual environment variables.

use serde::Deserialize;
use std::fs;
use std::time::Duration;

/// Path of the optional TOML configuration file.
pub const CONFIG_ENV: &str = "CLUBHUB_CONFIG";
pub const GRACE_ENV: &str = "CLUBHUB_GRACE_MS";
pub const LOG_ENV: &str = "CLUBHUB_LOG";

/// Upper bound on the shutdown grace period.
pub const MAX_GRACE_MS: u64 = 10_000;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// How long players get to exit after `end` before they are killed
    pub grace_period_ms: u64,
    /// `tracing` filter directive for the hub's diagnostic log
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grace_period_ms: 100,
            log_filter: "warn".into(),
        }
    }
}

impl Config {
    pub fn grace_period(&self) -> Duration {
        Duration::from_millis(self.grace_period_ms)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigSources {
    pub grace_period_ms: ValueSource,
    pub log_filter: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            grace_period_ms: ValueSource::Default,
            log_filter: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Loads configuration from the process environment.
pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    load_from(|key| std::env::var(key).ok())
}

/// Loads configuration using `env` to look up variables.
pub fn load_from<F>(env: F) -> Result<ConfigResolved, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Some(path) = env(CONFIG_ENV)
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.grace_period_ms {
            cfg.grace_period_ms = v;
            sources.grace_period_ms = ValueSource::File;
        }
        if let Some(v) = f.log_filter {
            cfg.log_filter = v;
            sources.log_filter = ValueSource::File;
        }
    }

    if let Some(grace) = env(GRACE_ENV)
        && !grace.is_empty()
    {
        cfg.grace_period_ms = grace
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("Invalid {}: {:?}", GRACE_ENV, grace)))?;
        sources.grace_period_ms = ValueSource::Env;
    }
    if let Some(filter) = env(LOG_ENV)
        && !filter.is_empty()
    {
        cfg.log_filter = filter;
        sources.log_filter = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    grace_period_ms: Option<u64>,
    #[serde(default)]
    log_filter: Option<String>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.grace_period_ms > MAX_GRACE_MS {
        return Err(ConfigError::Invalid(format!(
            "grace_period_ms must be <= {}",
            MAX_GRACE_MS
        )));
    }
    if tracing_subscriber::EnvFilter::try_new(&cfg.log_filter).is_err() {
        return Err(ConfigError::Invalid(format!(
            "invalid log filter {:?}",
            cfg.log_filter
        )));
    }
    Ok(())
}
