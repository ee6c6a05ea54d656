use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Deserializer};
use serde_json::value::RawValue;

use crate::def::{Property, PropertyDef};
use crate::error::PropertyError;
use crate::value::{PropertyType, Value};

/// The exact bytes of a wire member whose property is not known.
///
/// Never decoded or re-encoded while its property is unknown, so it is written
/// back byte-for-byte. Compared and hashed by its text.
#[derive(Clone)]
pub struct RawPayload(Box<RawValue>);

impl RawPayload {
	/// Wraps a JSON fragment, failing if it is not valid JSON.
	pub fn parse(text: &str) -> Result<Self, PropertyError> {
		Ok(Self(RawValue::from_string(text.to_string())?))
	}

	pub fn as_str(&self) -> &str {
		self.0.get()
	}

	pub(crate) fn as_raw(&self) -> &RawValue {
		&self.0
	}
}

impl From<Box<RawValue>> for RawPayload {
	fn from(raw: Box<RawValue>) -> Self {
		Self(raw)
	}
}

impl<'de> Deserialize<'de> for RawPayload {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		Box::<RawValue>::deserialize(deserializer).map(Self)
	}
}

impl PartialEq for RawPayload {
	fn eq(&self, other: &Self) -> bool {
		self.as_str() == other.as_str()
	}
}

impl Hash for RawPayload {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.as_str().hash(state);
	}
}

impl fmt::Debug for RawPayload {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("RawPayload").field(&self.as_str()).finish()
	}
}

/// What a container holds for one key. *Unset* is the absence of an entry.
///
/// Entries compare by the member they would write. A provided value equals an
/// undefined payload whose JSON is `{"value": <that value>}`, so resolving an
/// entry does not change what it is equal to.
#[derive(Debug, Clone)]
pub enum StoredValue {
	/// Decoded and schema-known; `None` is an explicit null.
	Provided(Option<Value>),
	/// Present in storage, but its property was unknown when it was loaded.
	Undefined(RawPayload),
}

impl StoredValue {
	/// Converts to the typed view for `property` without resolving.
	///
	/// An undefined payload is decoded on the fly and returned as `Provided`;
	/// the caller decides whether to store the result.
	pub(crate) fn read<T: PropertyType>(
		&self,
		property: &Property<T>,
	) -> Result<PropertyValue<T>, PropertyError> {
		match self {
			StoredValue::Provided(value) => provided(property, value.clone()),
			StoredValue::Undefined(raw) => provided(property, property.decode_payload(raw)?),
		}
	}

	/// Converts a value displaced by a write, keeping undefined payloads as they were.
	pub(crate) fn into_previous<T: PropertyType>(
		self,
		property: &Property<T>,
	) -> Result<PropertyValue<T>, PropertyError> {
		match self {
			StoredValue::Provided(value) => provided(property, value),
			StoredValue::Undefined(raw) => Ok(PropertyValue::Undefined(raw)),
		}
	}

	/// The wire member this entry writes, parsed. `None` for a value JSON
	/// cannot hold.
	fn member(&self) -> Option<serde_json::Value> {
		match self {
			StoredValue::Provided(None) => Some(serde_json::json!({ "value": null })),
			StoredValue::Provided(Some(value)) => value
				.to_json()
				.ok()
				.map(|value| serde_json::json!({ "value": value })),
			StoredValue::Undefined(raw) => serde_json::from_str(raw.as_str()).ok(),
		}
	}

	/// Returns true if `property` can read this entry as a non-unset value.
	pub(crate) fn readable_as(&self, property: &PropertyDef) -> bool {
		match self {
			StoredValue::Provided(None) => true,
			StoredValue::Provided(Some(value)) => value.matches_type(property.value_type()),
			StoredValue::Undefined(raw) => property.decode_payload(raw).is_ok(),
		}
	}
}

impl PartialEq for StoredValue {
	fn eq(&self, other: &Self) -> bool {
		match (self.member(), other.member()) {
			(Some(a), Some(b)) => a == b,
			(None, None) => match (self, other) {
				(StoredValue::Provided(a), StoredValue::Provided(b)) => a == b,
				_ => false,
			},
			_ => false,
		}
	}
}

impl Hash for StoredValue {
	fn hash<H: Hasher>(&self, state: &mut H) {
		match self.member() {
			Some(member) => {
				0_u8.hash(state);
				member.hash(state);
			}
			None => {
				1_u8.hash(state);
				if let StoredValue::Provided(value) = self {
					value.hash(state);
				}
			}
		}
	}
}

fn provided<T: PropertyType>(
	property: &Property<T>,
	value: Option<Value>,
) -> Result<PropertyValue<T>, PropertyError> {
	property.cast(value).map(PropertyValue::Provided)
}

/// Typed, resolution-aware view of one property's value.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue<T> {
	/// Nothing stored.
	Unset,
	/// A decoded value, or an explicit null.
	Provided(Option<T>),
	/// Stored, but not yet decoded under a known property.
	Undefined(RawPayload),
}

impl<T> PropertyValue<T> {
	/// True only for [`PropertyValue::Provided`], including an explicit null.
	pub fn is_set(&self) -> bool {
		matches!(self, PropertyValue::Provided(_))
	}

	pub fn is_undefined(&self) -> bool {
		matches!(self, PropertyValue::Undefined(_))
	}

	pub fn value(&self) -> Option<&T> {
		match self {
			PropertyValue::Provided(value) => value.as_ref(),
			PropertyValue::Unset | PropertyValue::Undefined(_) => None,
		}
	}

	pub fn into_value(self) -> Option<T> {
		match self {
			PropertyValue::Provided(value) => value,
			PropertyValue::Unset | PropertyValue::Undefined(_) => None,
		}
	}
}
