use serde::Deserialize;

use crate::error::PropertyError;

/// Settings for [`PropertyContainerSerializer`](crate::PropertyContainerSerializer).
///
/// Loadable from TOML; unset fields keep their defaults.
///
/// ```toml
/// pretty = true
/// log_defaults = false
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SerializerConfig {
	/// Indent written documents.
	pub pretty: bool,
	/// Emit a debug event for every key defaulted on load.
	pub log_defaults: bool,
}

impl Default for SerializerConfig {
	fn default() -> Self {
		Self {
			pretty: false,
			log_defaults: true,
		}
	}
}

impl SerializerConfig {
	pub fn from_toml(text: &str) -> Result<Self, PropertyError> {
		Ok(toml::from_str(text)?)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_document_is_default() {
		assert_eq!(
			SerializerConfig::from_toml("").unwrap(),
			SerializerConfig::default()
		);
	}

	#[test]
	fn fields_override_defaults() {
		let config = SerializerConfig::from_toml("pretty = true\nlog_defaults = false\n").unwrap();
		assert!(config.pretty);
		assert!(!config.log_defaults);

		let partial = SerializerConfig::from_toml("pretty = true").unwrap();
		assert!(partial.log_defaults);
	}

	#[test]
	fn unknown_or_mistyped_fields_fail() {
		assert!(matches!(
			SerializerConfig::from_toml("colour = true"),
			Err(PropertyError::Config(_))
		));
		assert!(matches!(
			SerializerConfig::from_toml("pretty = \"yes\""),
			Err(PropertyError::Config(_))
		));
	}
}
