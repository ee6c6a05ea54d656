use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::def::{Property, PropertyDef};
use crate::error::PropertyError;
use crate::read::{self, PropertyMap, PropertyRead, StoredEntries};
use crate::schema::PropertySchema;
use crate::snapshot::PropertyContainerSnapshot;
use crate::stored::{PropertyValue, StoredValue};
use crate::value::{PropertyType, Value};

/// The live, mutable set of property values held by one owner.
///
/// Entries are kept in insertion order, which is also the order they are
/// serialized in. A key with no entry is *unset*. Reading a key whose entry
/// is still undefined through a typed [`Property`] decodes it and stores the
/// result, so later reads and writes see a provided value.
///
/// Equality and hashing look at the entries only, not at the schema and not
/// at entry order. Entries compare by what they would write, so a resolved
/// value equals the undefined payload it was decoded from.
#[derive(Debug, Clone, Default)]
pub struct PropertyContainer {
	schema: Arc<[Arc<PropertyDef>]>,
	entries: PropertyMap,
}

impl PropertyContainer {
	/// Creates a container holding every property at its default.
	pub fn for_properties(properties: impl IntoIterator<Item = Arc<PropertyDef>>) -> Self {
		let schema: Arc<[Arc<PropertyDef>]> = properties.into_iter().collect();
		let entries = schema
			.iter()
			.map(|def| {
				(
					Box::from(def.full_key()),
					StoredValue::Provided(Some(def.default_value().clone())),
				)
			})
			.collect();
		Self { schema, entries }
	}

	/// Creates a container holding every property `schema` declares, at its default.
	pub fn for_schema(schema: &dyn PropertySchema) -> Self {
		Self::for_properties(schema.properties().iter().cloned())
	}

	/// Builds a container from already-decoded entries.
	///
	/// Provided values of schema keys must fit their property's type and be
	/// encodable.
	pub fn from_entries(
		properties: &[Arc<PropertyDef>],
		entries: PropertyMap,
	) -> Result<Self, PropertyError> {
		for def in properties {
			if let Some(StoredValue::Provided(Some(value))) = entries.get(def.full_key()) {
				def.check_storable(value)?;
			}
		}
		Ok(Self {
			schema: Arc::from(properties),
			entries,
		})
	}

	/// The properties this container was created for.
	pub fn schema(&self) -> &[Arc<PropertyDef>] {
		&self.schema
	}

	/// Reads `property`, resolving an undefined entry in place.
	///
	/// A payload that does not decode as the property's type fails with
	/// [`PropertyError::Decode`] and is left undefined.
	pub fn get_property_value<T: PropertyType>(
		&mut self,
		property: &Property<T>,
	) -> Result<PropertyValue<T>, PropertyError> {
		let Some(stored) = self.entries.get_mut(property.full_key()) else {
			return Ok(PropertyValue::Unset);
		};
		if let StoredValue::Undefined(raw) = &*stored {
			let value = property.decode_payload(raw)?;
			tracing::trace!(
				domain = "properties",
				key = property.full_key(),
				"resolved undefined property"
			);
			*stored = StoredValue::Provided(value);
		}
		stored.read(property)
	}

	/// Like [`get_property_value`](Self::get_property_value), but fails with
	/// [`PropertyError::MissingValue`] unless a non-null value is provided.
	pub fn get_required_property_value<T: PropertyType>(
		&mut self,
		property: &Property<T>,
	) -> Result<T, PropertyError> {
		self.get_property_value(property)?
			.into_value()
			.ok_or_else(|| missing(property))
	}

	/// Stores `value` for `property` and returns what was there before.
	///
	/// Passing `None` stores an explicit null. Nothing changes on failure:
	/// [`PropertyError::UnknownProperty`] for a key outside the schema,
	/// [`PropertyError::TypeMismatch`] over an existing value of another type,
	/// and [`PropertyError::Encode`] for a non-finite float.
	pub fn set_property_value<T: PropertyType>(
		&mut self,
		property: &Property<T>,
		value: impl Into<Option<T>>,
	) -> Result<PropertyValue<T>, PropertyError> {
		self.schema_def(property)?;
		self.check_existing(property)?;
		let value = value.into().map(T::into_value);
		if let Some(value) = &value {
			property.check_storable(value)?;
		}
		match self
			.entries
			.insert(Box::from(property.full_key()), StoredValue::Provided(value))
		{
			None => Ok(PropertyValue::Unset),
			Some(previous) => previous.into_previous(property),
		}
	}

	/// Stores a dynamically-typed value for a property of this container's schema.
	pub fn set_untyped_property_value(
		&mut self,
		property: &PropertyDef,
		value: Option<Value>,
	) -> Result<(), PropertyError> {
		let def = self.schema_def(property)?;
		if let Some(value) = &value {
			def.check_storable(value)?;
		}
		self.entries
			.insert(Box::from(property.full_key()), StoredValue::Provided(value));
		Ok(())
	}

	/// Removes the entry for `property` and returns it; the key reads as unset afterwards.
	pub fn remove_property_value<T: PropertyType>(
		&mut self,
		property: &Property<T>,
	) -> Result<PropertyValue<T>, PropertyError> {
		self.check_existing(property)?;
		match self.entries.shift_remove(property.full_key()) {
			None => Ok(PropertyValue::Unset),
			Some(previous) => previous.into_previous(property),
		}
	}

	/// Takes an independent deep copy of the current entries.
	pub fn snapshot(&self) -> PropertyContainerSnapshot {
		PropertyContainerSnapshot::new(self.entries.clone())
	}

	/// Replaces an existing entry. Returns false, changing nothing, if `key` has no entry.
	pub(crate) fn patch_entry(&mut self, key: &str, value: StoredValue) -> bool {
		match self.entries.get_mut(key) {
			Some(slot) => {
				*slot = value;
				true
			}
			None => false,
		}
	}

	fn schema_def(&self, property: &PropertyDef) -> Result<&Arc<PropertyDef>, PropertyError> {
		self.schema
			.iter()
			.find(|def| def.full_key() == property.full_key())
			.ok_or_else(|| PropertyError::UnknownProperty {
				key: property.full_key().to_string(),
			})
	}

	fn check_existing<T: PropertyType>(&self, property: &Property<T>) -> Result<(), PropertyError> {
		match self.entries.get(property.full_key()) {
			Some(StoredValue::Provided(Some(existing))) => property.check(existing),
			_ => Ok(()),
		}
	}
}

pub(crate) fn missing(property: &PropertyDef) -> PropertyError {
	PropertyError::MissingValue {
		key: property.full_key().to_string(),
	}
}

impl PropertyRead for PropertyContainer {
	fn stored(&self, key: &str) -> Option<&StoredValue> {
		self.entries.get(key)
	}

	fn stored_entries(&self) -> StoredEntries<'_> {
		self.entries.iter()
	}

	fn len(&self) -> usize {
		self.entries.len()
	}
}

impl PartialEq for PropertyContainer {
	fn eq(&self, other: &Self) -> bool {
		self.entries == other.entries
	}
}

impl Hash for PropertyContainer {
	fn hash<H: Hasher>(&self, state: &mut H) {
		read::hash_map_unordered(&self.entries, state);
	}
}
