//! Error types for map service configuration and channel calls.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while loading map service configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("I/O error reading {path}: {error}")]
	Io {
		path: PathBuf,
		#[source]
		error: std::io::Error,
	},

	#[error("TOML parse error: {0}")]
	Parse(#[from] toml::de::Error),

	/// The SDK cannot start without a key.
	#[error("map services API key is not configured")]
	MissingApiKey,
}

/// Failure reported back across the method channel.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MethodError {
	#[error("invalid arguments for {0}")]
	InvalidArgs(String),

	#[error("method not implemented: {0}")]
	NotImplemented(String),
}

impl MethodError {
	/// Stable error code understood by the UI framework.
	pub const fn code(&self) -> &'static str {
		match self {
			Self::InvalidArgs(_) => "INVALID_ARGS",
			Self::NotImplemented(_) => "NOT_IMPLEMENTED",
		}
	}

	/// Wire envelope: `{ code, message, details }`.
	pub fn envelope(&self) -> serde_json::Value {
		serde_json::json!({
			"code": self.code(),
			"message": self.to_string(),
			"details": serde_json::Value::Null,
		})
	}
}
