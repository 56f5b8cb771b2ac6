//! Configuration structures for extraction, form defaults and rendering.

use serde::{Deserialize, Serialize};

use super::package::{ServiceType, WeightUnit};

/// Main configuration for shiplabel.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShiplabelConfig {
    /// Address extraction configuration.
    pub extraction: ExtractionConfig,

    /// Package defaults used at session start and on reset.
    pub package: PackageDefaults,

    /// Label rendering configuration.
    pub render: RenderConfig,
}

/// Address extraction service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Base URL of the Gemini API.
    pub endpoint: String,

    /// Model used for address parsing.
    pub model: String,

    /// Environment variable holding the API key.
    pub api_key_env: String,

    /// Secondary environment variable checked when the first is unset.
    pub fallback_api_key_env: Option<String>,

    /// Country used when the text does not name one.
    pub default_country: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-2.5-flash".to_string(),
            api_key_env: "API_KEY".to_string(),
            fallback_api_key_env: Some("GEMINI_API_KEY".to_string()),
            default_country: "USA".to_string(),
        }
    }
}

impl ExtractionConfig {
    /// Look up the API key from the process environment.
    pub fn api_key(&self) -> Option<String> {
        self.api_key_with(|name| std::env::var(name).ok())
    }

    /// Look up the API key through a custom variable reader.
    pub fn api_key_with<F>(&self, lookup: F) -> Option<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        std::iter::once(self.api_key_env.as_str())
            .chain(self.fallback_api_key_env.as_deref())
            .filter_map(|name| lookup(name))
            .map(|key| key.trim().to_string())
            .find(|key| !key.is_empty())
    }

    /// Human-readable list of the variables searched for a key.
    pub fn key_sources(&self) -> String {
        match &self.fallback_api_key_env {
            Some(fallback) => format!("{} or {}", self.api_key_env, fallback),
            None => self.api_key_env.clone(),
        }
    }
}

/// Package fields restored on reset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageDefaults {
    /// Default weight.
    pub weight: f64,

    /// Default weight unit.
    pub weight_unit: WeightUnit,

    /// Default dimensions string.
    pub dimensions: String,

    /// Default service level.
    pub service_type: ServiceType,
}

impl Default for PackageDefaults {
    fn default() -> Self {
        Self {
            weight: 1.5,
            weight_unit: WeightUnit::Pounds,
            dimensions: "12x8x4".to_string(),
            service_type: ServiceType::Standard,
        }
    }
}

/// Label rendering configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Number of bars in the decorative barcode.
    pub barcode_bars: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { barcode_bars: 60 }
    }
}

impl ShiplabelConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    #[test]
    fn test_api_key_lookup_order() {
        let config = ExtractionConfig::default();
        let env: HashMap<&str, &str> =
            [("API_KEY", "primary"), ("GEMINI_API_KEY", "secondary")].into();
        assert_eq!(
            config.api_key_with(|n| env.get(n).map(|v| v.to_string())),
            Some("primary".to_string())
        );

        let env: HashMap<&str, &str> = [("API_KEY", "  "), ("GEMINI_API_KEY", "secondary")].into();
        assert_eq!(
            config.api_key_with(|n| env.get(n).map(|v| v.to_string())),
            Some("secondary".to_string())
        );

        assert_eq!(config.api_key_with(|_| None), None);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: ShiplabelConfig =
            serde_json::from_str(r#"{"extraction": {"model": "gemini-2.0-flash"}}"#).unwrap();
        assert_eq!(config.extraction.model, "gemini-2.0-flash");
        assert_eq!(config.extraction.default_country, "USA");
        assert_eq!(config.package.dimensions, "12x8x4");
        assert_eq!(config.render.barcode_bars, 60);
    }
}
