//! Renderer configuration
//!
//! Settings can be built in code or loaded from JSON. Every field has a
//! default, so a partial document only overrides what it names.
//!
//! ```ignore
//! let config = RenderConfig::from_json(r#"{ "unknown_kind": "degrade" }"#)?;
//! assert_eq!(config.fallback_kind, "div");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What the renderer does when the host cannot create a node kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownKindPolicy {
	/// Abort the build with an error.
	#[default]
	Fail,
	/// Log and create a [`RenderConfig::fallback_kind`] node instead.
	Degrade,
}

/// Settings consumed by [`Renderer`](crate::renderer::Renderer).
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
	/// Handling of kind names the host rejects
	#[serde(default)]
	pub unknown_kind: UnknownKindPolicy,

	/// Container kind used when degrading
	#[serde(default = "default_container_kind")]
	pub fallback_kind: String,

	/// Host kind of the wrapper node a fragment is materialized as
	#[serde(default = "default_container_kind")]
	pub fragment_wrapper_kind: String,
}

fn default_container_kind() -> String {
	"div".to_string()
}

impl Default for RenderConfig {
	fn default() -> Self {
		Self {
			unknown_kind: UnknownKindPolicy::default(),
			fallback_kind: default_container_kind(),
			fragment_wrapper_kind: default_container_kind(),
		}
	}
}

impl RenderConfig {
	/// Create new settings with defaults
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_unknown_kind(mut self, policy: UnknownKindPolicy) -> Self {
		self.unknown_kind = policy;
		self
	}

	pub fn with_fallback_kind(mut self, kind: impl Into<String>) -> Self {
		self.fallback_kind = kind.into();
		self
	}

	pub fn with_fragment_wrapper_kind(mut self, kind: impl Into<String>) -> Self {
		self.fragment_wrapper_kind = kind.into();
		self
	}

	/// Load settings from a JSON document
	pub fn from_json(source: &str) -> Result<Self, ConfigError> {
		let config: Self =
			serde_json::from_str(source).map_err(|e| ConfigError::Parse(e.to_string()))?;
		config.validate()?;
		Ok(config)
	}

	/// Validate settings
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.fallback_kind.trim().is_empty() {
			return Err(ConfigError::Validation(
				"fallback_kind must not be empty".to_string(),
			));
		}
		if self.fragment_wrapper_kind.trim().is_empty() {
			return Err(ConfigError::Validation(
				"fragment_wrapper_kind must not be empty".to_string(),
			));
		}
		Ok(())
	}
}

/// Errors raised while loading a [`RenderConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
	#[error("Parse error: {0}")]
	Parse(String),

	#[error("Validation error: {0}")]
	Validation(String),
}
