use keystone_types::KeyError;
use thiserror::Error;

use crate::def::PropertyDef;
use crate::value::ValueType;

/// Errors raised by the property subsystem.
///
/// Schema drift while deserializing is not represented here: missing keys are
/// defaulted and unknown keys are preserved.
#[derive(Error, Debug)]
pub enum PropertyError {
	/// A value's variant does not fit the property's declared type.
	#[error("value {value} does not match type {expected} of property {key}")]
	TypeMismatch {
		key: String,
		expected: ValueType,
		value: String,
	},
	/// Two different definitions were registered under one key.
	#[error("conflicting registration for {key}: existing {existing:?}, incoming {incoming:?}")]
	RegistrationConflict {
		key: String,
		existing: Box<PropertyDef>,
		incoming: Box<PropertyDef>,
	},
	/// A required value was unset, undefined or null.
	#[error("no value for required property {key}")]
	MissingValue { key: String },
	/// The property is not part of the container's schema.
	#[error("property {key} is not part of this container's schema")]
	UnknownProperty { key: String },
	/// The wire document could not be parsed.
	#[error("malformed property document: {0}")]
	Malformed(#[from] serde_json::Error),
	/// A stored payload could not be decoded as its property's type.
	#[error("cannot decode property {key}: {reason}")]
	Decode { key: String, reason: String },
	/// A value could not be encoded for the wire.
	#[error("cannot encode property {key}: {reason}")]
	Encode { key: String, reason: String },
	/// A definition is incomplete or self-inconsistent.
	#[error("invalid property definition: {reason}")]
	InvalidDefinition { reason: String },
	#[error("invalid property key: {0}")]
	InvalidKey(#[from] KeyError),
	/// Mutation was attempted through a read-only view.
	#[error("property view is read-only")]
	ReadOnly,
	#[error("invalid serializer config: {0}")]
	Config(#[from] toml::de::Error),
}

impl PropertyError {
	pub(crate) fn invalid(reason: impl Into<String>) -> Self {
		Self::InvalidDefinition {
			reason: reason.into(),
		}
	}
}
