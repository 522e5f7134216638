// src/config.rs
use crate::application::ports::config::SluggableConfigProvider;
use serde_json::{Map, Value};
use std::env;
use thiserror::Error;

#[derive(Clone, Debug)]
pub struct AppConfig {
    database_url: String,
    database_max_connections: u32,
    redis_url: Option<String>,
    sluggable_defaults: Map<String, Value>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

fn default_database_url() -> String {
    "sqlite::memory:".into()
}

const fn default_max_connections() -> u32 {
    16
}

fn parse_bool(name: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        _ => Err(ConfigError::Invalid(format!("{name} must be a boolean"))),
    }
}

fn parse_list(raw: &str) -> Vec<Value> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| Value::String(item.to_string()))
        .collect()
}

fn parse_u64(name: &str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| ConfigError::Invalid(format!("{name} must be a non-negative integer")))
}

impl AppConfig {
    /// Build configuration from environment variables. Uses sensible defaults
    /// for optional values and validates what is present.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Allow dotenv files to populate env vars when present.
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`AppConfig::from_env`] with an explicit variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL").unwrap_or_else(default_database_url);

        let database_max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => u32::try_from(parse_u64("DATABASE_MAX_CONNECTIONS", &raw)?)
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| {
                    ConfigError::Invalid("DATABASE_MAX_CONNECTIONS must be a positive integer".into())
                })?,
            None => default_max_connections(),
        };

        let redis_url = lookup("REDIS_URL").filter(|url| !url.trim().is_empty());

        let mut defaults = Map::new();

        if let Some(raw) = lookup("SLUGGABLE_BUILD_FROM") {
            let fields = parse_list(&raw);
            let value = if fields.is_empty() {
                Value::Null
            } else {
                Value::Array(fields)
            };
            defaults.insert("build_from".into(), value);
        }

        if let Some(raw) = lookup("SLUGGABLE_SAVE_TO") {
            defaults.insert("save_to".into(), Value::String(raw.trim().to_string()));
        }

        if let Some(raw) = lookup("SLUGGABLE_SEPARATOR") {
            defaults.insert("separator".into(), Value::String(raw));
        }

        if let Some(raw) = lookup("SLUGGABLE_MAX_LENGTH") {
            let value = if raw.trim().is_empty() {
                Value::Null
            } else {
                Value::from(parse_u64("SLUGGABLE_MAX_LENGTH", &raw)?)
            };
            defaults.insert("max_length".into(), value);
        }

        for (name, key) in [
            ("SLUGGABLE_UNIQUE", "unique"),
            ("SLUGGABLE_INCLUDE_TRASHED", "include_trashed"),
            ("SLUGGABLE_ON_UPDATE", "on_update"),
        ] {
            if let Some(raw) = lookup(name) {
                defaults.insert(key.into(), Value::Bool(parse_bool(name, &raw)?));
            }
        }

        if let Some(raw) = lookup("SLUGGABLE_USE_CACHE") {
            let value = match parse_bool("SLUGGABLE_USE_CACHE", &raw) {
                Ok(enabled) => Value::Bool(enabled),
                Err(_) => Value::from(parse_u64("SLUGGABLE_USE_CACHE", &raw).map_err(|_| {
                    ConfigError::Invalid(
                        "SLUGGABLE_USE_CACHE must be a boolean or a TTL in seconds".into(),
                    )
                })?),
            };
            defaults.insert("use_cache".into(), value);
        }

        if let Some(raw) = lookup("SLUGGABLE_RESERVED") {
            defaults.insert("reserved".into(), Value::Array(parse_list(&raw)));
        }

        Ok(Self {
            database_url,
            database_max_connections,
            redis_url,
            sluggable_defaults: defaults,
        })
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub const fn database_max_connections(&self) -> u32 {
        self.database_max_connections
    }

    /// Redis endpoint for the slug counter cache, if one is configured.
    pub fn redis_url(&self) -> Option<&str> {
        self.redis_url.as_deref()
    }

    /// Fail with [`ConfigError::Missing`] when no Redis endpoint is configured.
    pub fn require_redis_url(&self) -> Result<&str, ConfigError> {
        self.redis_url().ok_or(ConfigError::Missing("REDIS_URL"))
    }
}

impl SluggableConfigProvider for AppConfig {
    fn sluggable_defaults(&self) -> Map<String, Value> {
        self.sluggable_defaults.clone()
    }
}
