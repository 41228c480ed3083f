//! SettingsManager: environment-backed settings with defaults and validation.

use std::collections::HashMap;

use super::defaults::DEFAULT_SETTINGS;
use super::validation::validate_setting;

/// Raw setting values keyed by setting name, resolved against the defaults
/// table on read.
#[derive(Debug, Clone, Default)]
pub struct SettingsManager {
    values: HashMap<String, String>,
}

impl SettingsManager {
    /// Capture every known setting from the process environment.
    pub fn from_env() -> Self {
        let values = DEFAULT_SETTINGS
            .keys()
            .filter_map(|key| std::env::var(key).ok().map(|v| (key.to_string(), v)))
            .collect();
        Self { values }
    }

    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Get a setting value. Empty or invalid values fall back to the default.
    pub fn get_setting(&self, key: &str) -> Result<String, anyhow::Error> {
        let def = DEFAULT_SETTINGS
            .get(key)
            .ok_or_else(|| anyhow::anyhow!("setting not found: {key}"))?;

        match self.values.get(key).map(|v| v.trim()) {
            Some(val) if !val.is_empty() => match validate_setting(key, val) {
                Ok(()) => Ok(val.to_string()),
                Err(e) => {
                    tracing::warn!(key, value = val, "Invalid setting ({e}), using default");
                    Ok(def.default.to_string())
                }
            },
            _ => Ok(def.default.to_string()),
        }
    }

    /// Set a setting value with validation.
    pub fn set_setting(&mut self, key: &str, value: &str) -> Result<(), anyhow::Error> {
        if !DEFAULT_SETTINGS.contains_key(key) {
            anyhow::bail!("unknown setting key: {key}");
        }
        validate_setting(key, value).map_err(|e| anyhow::anyhow!("validation error for {key}: {e}"))?;
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
