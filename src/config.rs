//! Cache TTL configuration.
//!
//! TTLs are keyed by cache category. The built-in table depends on the
//! deployment [`Environment`]; a TOML document can override any entry.
//!
//! ```toml
//! environment = "production"
//! default_ttl_seconds = 300
//!
//! [ttl_seconds]
//! weather = 900
//! ```

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cache::category;
use crate::error::{Error, Result};

pub const DEFAULT_TTL_SECONDS: u64 = 300;
const GEOCODING_TTL_SECONDS: u64 = 3_600;
const CITIES_TTL_SECONDS: u64 = 86_400;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub const ENV_VAR: &'static str = "ENVIRONMENT";

    /// Unknown values fall back to development.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Environment::Production,
            _ => Environment::Development,
        }
    }

    pub fn from_env() -> Self {
        std::env::var(Self::ENV_VAR)
            .map(|v| Self::parse(&v))
            .unwrap_or_default()
    }

    fn weather_ttl_seconds(self) -> u64 {
        match self {
            Environment::Development => 600,
            Environment::Production => 1_800,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    pub environment: Environment,
    /// TTL for categories missing from `ttl_seconds`.
    pub default_ttl_seconds: u64,
    pub ttl_seconds: BTreeMap<String, u64>,
}

#[derive(Debug, Default, Deserialize)]
struct CacheConfigOverrides {
    environment: Option<Environment>,
    default_ttl_seconds: Option<u64>,
    #[serde(default)]
    ttl_seconds: BTreeMap<String, u64>,
}

impl CacheConfig {
    pub fn for_environment(environment: Environment) -> Self {
        let ttl_seconds = BTreeMap::from([
            (category::WEATHER.to_string(), environment.weather_ttl_seconds()),
            (category::GEOCODING.to_string(), GEOCODING_TTL_SECONDS),
            (category::CITIES.to_string(), CITIES_TTL_SECONDS),
        ]);
        Self {
            environment,
            default_ttl_seconds: DEFAULT_TTL_SECONDS,
            ttl_seconds,
        }
    }

    pub fn from_env() -> Self {
        Self::for_environment(Environment::from_env())
    }

    /// Overlay a TOML document on the defaults of the environment it names
    /// (development when absent).
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let overrides: CacheConfigOverrides = toml::from_str(contents)?;
        let mut config = Self::for_environment(overrides.environment.unwrap_or_default());
        if let Some(default_ttl) = overrides.default_ttl_seconds {
            config.default_ttl_seconds = default_ttl;
        }
        config.ttl_seconds.extend(overrides.ttl_seconds);
        config.validate()?;
        Ok(config)
    }

    pub fn with_ttl(mut self, category: impl Into<String>, seconds: u64) -> Self {
        self.ttl_seconds.insert(category.into(), seconds);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.default_ttl_seconds == 0 {
            return Err(Error::InvalidConfig(
                "default_ttl_seconds must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn ttl_seconds_for(&self, category: &str) -> u64 {
        self.ttl_seconds
            .get(category)
            .copied()
            .unwrap_or(self.default_ttl_seconds)
    }

    pub fn ttl_for(&self, category: &str) -> Duration {
        Duration::from_secs(self.ttl_seconds_for(category))
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::for_environment(Environment::Development)
    }
}
