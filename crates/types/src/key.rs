use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Separator between namespace and name in the canonical form.
pub const SEPARATOR: char = ':';

/// Errors produced when building or parsing a [`NamespacedKey`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
	/// The namespace half is empty.
	#[error("empty namespace in key {0:?}")]
	EmptyNamespace(String),
	/// The name half is empty.
	#[error("empty name in key {0:?}")]
	EmptyName(String),
	/// Parsed text has no `:` separator.
	#[error("missing ':' separator in key {0:?}")]
	MissingSeparator(String),
	/// The namespace contains a character outside `[a-z0-9._-]`.
	#[error("invalid character {ch:?} in namespace of key {key:?}")]
	InvalidNamespace { key: String, ch: char },
	/// The name contains a character outside `[a-z0-9/._-]`.
	#[error("invalid character {ch:?} in name of key {key:?}")]
	InvalidName { key: String, ch: char },
}

/// A `(namespace, name)` pair with a canonical `"namespace:name"` form.
///
/// The canonical string is the persisted identity of whatever the key names.
/// It is stored once and both halves are views into it, so
/// [`NamespacedKey::as_str`] never allocates.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NamespacedKey {
	full: Box<str>,
	split: usize,
}

impl NamespacedKey {
	/// Builds a key from its two halves, validating both.
	pub fn new(namespace: &str, name: &str) -> Result<Self, KeyError> {
		let full = format!("{namespace}{SEPARATOR}{name}");
		validate(&full, namespace, name)?;
		Ok(Self {
			split: namespace.len(),
			full: full.into_boxed_str(),
		})
	}

	/// Parses the canonical form, splitting on the first `:`.
	pub fn parse(text: &str) -> Result<Self, KeyError> {
		let (namespace, name) = text
			.split_once(SEPARATOR)
			.ok_or_else(|| KeyError::MissingSeparator(text.to_string()))?;
		Self::new(namespace, name)
	}

	pub fn namespace(&self) -> &str {
		&self.full[..self.split]
	}

	pub fn name(&self) -> &str {
		&self.full[self.split + SEPARATOR.len_utf8()..]
	}

	/// Returns the canonical `"namespace:name"` string.
	#[inline]
	pub fn as_str(&self) -> &str {
		&self.full
	}
}

fn validate(full: &str, namespace: &str, name: &str) -> Result<(), KeyError> {
	if namespace.is_empty() {
		return Err(KeyError::EmptyNamespace(full.to_string()));
	}
	if name.is_empty() {
		return Err(KeyError::EmptyName(full.to_string()));
	}
	if let Some(ch) = namespace.chars().find(|&c| !is_namespace_char(c)) {
		return Err(KeyError::InvalidNamespace {
			key: full.to_string(),
			ch,
		});
	}
	if let Some(ch) = name.chars().find(|&c| !is_name_char(c)) {
		return Err(KeyError::InvalidName {
			key: full.to_string(),
			ch,
		});
	}
	Ok(())
}

fn is_namespace_char(c: char) -> bool {
	matches!(c, 'a'..='z' | '0'..='9' | '.' | '_' | '-')
}

fn is_name_char(c: char) -> bool {
	is_namespace_char(c) || c == '/'
}

impl fmt::Display for NamespacedKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.full)
	}
}

impl fmt::Debug for NamespacedKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("NamespacedKey").field(&&*self.full).finish()
	}
}

impl AsRef<str> for NamespacedKey {
	fn as_ref(&self) -> &str {
		&self.full
	}
}

impl std::str::FromStr for NamespacedKey {
	type Err = KeyError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::parse(s)
	}
}

impl Serialize for NamespacedKey {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(&self.full)
	}
}

impl<'de> Deserialize<'de> for NamespacedKey {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let text = String::deserialize(deserializer)?;
		Self::parse(&text).map_err(serde::de::Error::custom)
	}
}

#[cfg(test)]
mod tests;
