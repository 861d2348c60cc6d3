//! Startup configuration, read from a TOML file

use crate::backends::LinearCostModel;
use crate::predictor::PredictorError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("cannot serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct InsureConfig {
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ModelConfig {
    /// Location of the persisted model artifact
    #[serde(default = "default_model_path")]
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DisplayConfig {
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default = "default_decimals")]
    pub decimals: usize,
}

fn default_model_path() -> PathBuf {
    PathBuf::from("models/linear_cost_model.json")
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

fn default_decimals() -> usize {
    2
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: default_model_path(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency_symbol(),
            decimals: default_decimals(),
        }
    }
}

impl InsureConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = parse_config(&text)?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load the configured model artifact. Relative paths resolve against
    /// `base_dir`, normally the directory holding the config file.
    pub fn load_predictor(&self, base_dir: impl AsRef<Path>) -> Result<LinearCostModel, PredictorError> {
        let path = if self.model.path.is_absolute() {
            self.model.path.clone()
        } else {
            base_dir.as_ref().join(&self.model.path)
        };
        LinearCostModel::load(path)
    }
}

pub fn parse_config(text: &str) -> Result<InsureConfig, ConfigError> {
    Ok(toml::from_str::<InsureConfig>(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config, InsureConfig::default());
        assert_eq!(config.display.currency_symbol, "$");
        assert_eq!(config.display.decimals, 2);
        assert_eq!(config.model.path, PathBuf::from("models/linear_cost_model.json"));
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = parse_config(
            r#"
            [display]
            currency_symbol = "€"
            "#,
        )
        .unwrap();
        assert_eq!(config.display.currency_symbol, "€");
        assert_eq!(config.display.decimals, 2);
        assert_eq!(config.model, ModelConfig::default());
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        assert!(matches!(
            parse_config("[model\npath = 1"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn toml_round_trip() {
        let mut config = InsureConfig::default();
        config.model.path = PathBuf::from("/srv/models/rf.json");
        let text = config.to_toml().unwrap();
        assert_eq!(parse_config(&text).unwrap(), config);
    }
}
