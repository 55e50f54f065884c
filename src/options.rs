//! Injector options.
//!
//! Options can be built in code, parsed from a JSON document, or read from
//! environment variables (`CACONFIG_INJECTOR_SERVICE_RANKING`,
//! `CACONFIG_INJECTOR_WARN_ON_DECLINE`).

use std::env;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::OptionsError;

/// Default ranking of the injector among the host's injectors.
pub const DEFAULT_SERVICE_RANKING: i32 = 6000;

/// Default environment variable prefix.
pub const DEFAULT_ENV_PREFIX: &str = "CACONFIG_INJECTOR";

/// Tunables of the [`ContextAwareConfigurationInjector`](crate::ContextAwareConfigurationInjector).
///
/// # Examples
///
/// ```rust
/// use ferrous_caconfig::InjectorOptions;
///
/// let options = InjectorOptions::from_json(r#"{ "service_ranking": 100 }"#).unwrap();
/// assert_eq!(options.service_ranking, 100);
/// assert!(options.warn_on_decline);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InjectorOptions {
    /// Ranking the injector is published with.
    pub service_ranking: i32,
    /// Log declined injections at warn level instead of debug.
    pub warn_on_decline: bool,
}

impl Default for InjectorOptions {
    fn default() -> Self {
        Self {
            service_ranking: DEFAULT_SERVICE_RANKING,
            warn_on_decline: true,
        }
    }
}

impl InjectorOptions {
    pub fn from_json(document: &str) -> Result<Self, OptionsError> {
        Ok(serde_json::from_str(document)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, OptionsError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| OptionsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Reads options from `CACONFIG_INJECTOR_*` variables; unset variables keep defaults.
    pub fn from_env() -> Result<Self, OptionsError> {
        Self::from_env_with_prefix(DEFAULT_ENV_PREFIX)
    }

    pub fn from_env_with_prefix(prefix: &str) -> Result<Self, OptionsError> {
        let mut options = Self::default();
        if let Some(value) = env_value(prefix, "service_ranking") {
            options.service_ranking = parse(prefix, "service_ranking", value)?;
        }
        if let Some(value) = env_value(prefix, "warn_on_decline") {
            options.warn_on_decline = parse(prefix, "warn_on_decline", value)?;
        }
        Ok(options)
    }
}

fn env_key(prefix: &str, key: &str) -> String {
    format!("{}_{}", prefix.to_uppercase(), key.to_uppercase())
}

fn env_value(prefix: &str, key: &str) -> Option<String> {
    env::var(env_key(prefix, key)).ok()
}

fn parse<T: std::str::FromStr>(prefix: &str, key: &str, value: String) -> Result<T, OptionsError> {
    value.trim().parse().map_err(|_| OptionsError::InvalidValue {
        key: env_key(prefix, key),
        value,
    })
}
