//! Map services configuration.
//!
//! Read from TOML:
//!
//! ```toml
//! api-key = "..."
//!
//! [dispatcher]
//! user-initiated-threads = 4
//! utility-threads = 2
//! ```
//!
//! `MERIDIAN_MAPS_API_KEY` overrides the file's key when set.

use std::path::Path;

use meridian_qos::DispatcherConfig;
use serde::Deserialize;

use crate::error::ConfigError;

/// Environment variable overriding the configured API key.
pub const API_KEY_ENV: &str = "MERIDIAN_MAPS_API_KEY";

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct MapServicesConfig {
	pub api_key: String,
	pub dispatcher: DispatcherConfig,
}

impl MapServicesConfig {
	/// Builds a config with the given key and default dispatcher sizing.
	pub fn with_api_key(api_key: impl Into<String>) -> Self {
		Self {
			api_key: api_key.into(),
			dispatcher: DispatcherConfig::default(),
		}
	}

	/// Parses and validates a TOML document.
	pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
		let config: Self = toml::from_str(input)?;
		config.validate()
	}

	/// Loads and validates a TOML file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let path = path.as_ref();
		let input = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		tracing::debug!(path = %path.display(), "map.config.load");
		Self::from_toml_str(&input)
	}

	/// Applies [`API_KEY_ENV`] when it is set and non-empty.
	pub fn with_env_override(self) -> Result<Self, ConfigError> {
		self.with_api_key_override(std::env::var(API_KEY_ENV).ok())
	}

	pub(crate) fn with_api_key_override(mut self, key: Option<String>) -> Result<Self, ConfigError> {
		if let Some(key) = key.filter(|k| !k.trim().is_empty()) {
			tracing::debug!("map.config.api_key_from_env");
			self.api_key = key;
		}
		self.validate()
	}

	fn validate(mut self) -> Result<Self, ConfigError> {
		let trimmed = self.api_key.trim();
		if trimmed.is_empty() {
			return Err(ConfigError::MissingApiKey);
		}
		if trimmed.len() != self.api_key.len() {
			self.api_key = trimmed.to_string();
		}
		Ok(self)
	}
}
