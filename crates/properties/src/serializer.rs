//! JSON codec for [`PropertyContainer`]s that tolerates schema drift.
//!
//! A document is a flat object of `"namespace:name" -> {"value": ..}`:
//!
//! ```json
//! {
//!   "doors:open_speed": { "value": 1.5 },
//!   "doors:hinge": { "value": { "x": 3, "y": 1, "z": 4 } },
//!   "doors:locked": { "value": null }
//! }
//! ```
//!
//! Members the schema declares are decoded by their property's type. Members
//! it does not declare are kept as their exact bytes and written back
//! unchanged, so data owned by unavailable code survives a load/save cycle.
//! Declared properties absent from the document take their defaults.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::value::RawValue;

use crate::config::SerializerConfig;
use crate::container::PropertyContainer;
use crate::error::PropertyError;
use crate::read::{PropertyMap, PropertyRead};
use crate::schema::PropertySchema;
use crate::stored::{RawPayload, StoredValue};

#[derive(Serialize)]
#[serde(untagged)]
enum WireMember<'a> {
	Raw(&'a RawValue),
	Entry { value: Option<serde_json::Value> },
}

/// Reads and writes property documents.
///
/// Stateless apart from its [`SerializerConfig`].
#[derive(Debug, Clone, Default)]
pub struct PropertyContainerSerializer {
	config: SerializerConfig,
}

impl PropertyContainerSerializer {
	pub fn new(config: SerializerConfig) -> Self {
		Self { config }
	}

	pub fn config(&self) -> &SerializerConfig {
		&self.config
	}

	/// Writes one member per stored entry, in entry order.
	///
	/// Undefined entries are emitted verbatim. Fails with
	/// [`PropertyError::Encode`] on a non-finite float.
	pub fn serialize(&self, container: &impl PropertyRead) -> Result<String, PropertyError> {
		let mut document = IndexMap::with_capacity(container.len());
		for (key, stored) in container.stored_entries() {
			let member = match stored {
				StoredValue::Provided(value) => WireMember::Entry {
					value: value
						.as_ref()
						.map(|v| {
							v.to_json().map_err(|reason| PropertyError::Encode {
								key: key.to_string(),
								reason,
							})
						})
						.transpose()?,
				},
				StoredValue::Undefined(raw) => WireMember::Raw(raw.as_raw()),
			};
			document.insert(&**key, member);
		}

		let written = if self.config.pretty {
			serde_json::to_string_pretty(&document)
		} else {
			serde_json::to_string(&document)
		};
		written.map_err(|e| PropertyError::Encode {
			key: "document".to_string(),
			reason: e.to_string(),
		})
	}

	/// Reads a document into a container for `schema`.
	///
	/// Declared properties come first, in schema order, followed by undeclared
	/// members in document order. Fails without a partial result when the text
	/// is not a JSON object or a declared member does not decode.
	pub fn deserialize(
		&self,
		schema: &dyn PropertySchema,
		text: &str,
	) -> Result<PropertyContainer, PropertyError> {
		let document: IndexMap<String, RawPayload> = serde_json::from_str(text)?;
		let properties = schema.properties();
		let mut entries = PropertyMap::with_capacity(document.len().max(properties.len()));

		for def in properties {
			let stored = match document.get(def.full_key()) {
				Some(raw) => StoredValue::Provided(def.decode_payload(raw)?),
				None => {
					if self.config.log_defaults {
						tracing::debug!(
							domain = "properties",
							key = def.full_key(),
							schema = schema.schema_id(),
							default = %def.default_value(),
							"property missing from document, using default"
						);
					}
					StoredValue::Provided(Some(def.default_value().clone()))
				}
			};
			entries.insert(Box::from(def.full_key()), stored);
		}

		for (key, raw) in document {
			if !entries.contains_key(key.as_str()) {
				entries.insert(key.into_boxed_str(), StoredValue::Undefined(raw));
			}
		}

		PropertyContainer::from_entries(properties, entries)
	}

	/// Replaces the entry for `key` with the member text `raw`.
	///
	/// Only existing entries are patched: returns `Ok(false)` and changes
	/// nothing when `container` has no entry for `key`. A declared property is
	/// decoded by its type; anything else is stored undefined.
	pub fn update_property_map_entry(
		&self,
		schema: &dyn PropertySchema,
		container: &mut PropertyContainer,
		key: &str,
		raw: &str,
	) -> Result<bool, PropertyError> {
		if container.stored(key).is_none() {
			return Ok(false);
		}
		let payload = RawPayload::parse(raw)?;
		let stored = match schema.properties().iter().find(|def| def.full_key() == key) {
			Some(def) => StoredValue::Provided(def.decode_payload(&payload)?),
			None => StoredValue::Undefined(payload),
		};
		Ok(container.patch_entry(key, stored))
	}
}
