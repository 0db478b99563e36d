use serde::Deserialize;

use crate::domain::{CacheError, KeyFormat};

/// Library configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    pub key: KeyFormatConfig,
    pub logging: LoggingConfig,
}

/// Key assembly settings, see [`KeyFormat`]
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KeyFormatConfig {
    pub separator: String,
    pub namespace: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl Default for KeyFormatConfig {
    fn default() -> Self {
        Self {
            separator: "_".to_string(),
            namespace: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl KeyFormatConfig {
    /// Validates the settings and converts them into a [`KeyFormat`]
    pub fn to_key_format(&self) -> Result<KeyFormat, CacheError> {
        let mut chars = self.separator.chars();
        let separator = match (chars.next(), chars.next()) {
            (Some(c), None) => c,
            _ => {
                return Err(CacheError::configuration(format!(
                    "key separator must be a single character, got '{}'",
                    self.separator
                )))
            }
        };

        let mut format = KeyFormat::default().with_separator(separator);

        if let Some(namespace) = &self.namespace {
            if namespace.trim().is_empty() {
                return Err(CacheError::configuration("key namespace must not be blank"));
            }
            format = format.with_namespace(namespace.trim());
        }

        Ok(format)
    }
}

impl CacheSettings {
    /// Loads settings from `.env`, `config/default`, `config/local` and
    /// `ELEMENT_CACHE__*` environment variables, later sources winning
    pub fn load() -> Result<Self, CacheError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("ELEMENT_CACHE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Self::from_config(config)
    }

    pub fn from_config(config: config::Config) -> Result<Self, CacheError> {
        let settings: Self = config.try_deserialize()?;
        settings.key.to_key_format()?;

        Ok(settings)
    }

    pub fn key_format(&self) -> Result<KeyFormat, CacheError> {
        self.key.to_key_format()
    }
}
