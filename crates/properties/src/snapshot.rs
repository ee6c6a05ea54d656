use std::hash::{Hash, Hasher};

use crate::container::missing;
use crate::def::Property;
use crate::error::PropertyError;
use crate::read::{self, PropertyMap, PropertyRead, StoredEntries};
use crate::stored::{PropertyValue, StoredValue};
use crate::value::PropertyType;

/// Frozen, read-only copy of a [`PropertyContainer`](crate::PropertyContainer).
///
/// Owns every entry it was taken with; later writes to the container are
/// never visible here. Undefined entries are decoded on each read and are
/// never resolved in place.
#[derive(Debug, Clone, Default)]
pub struct PropertyContainerSnapshot {
	entries: PropertyMap,
}

impl PropertyContainerSnapshot {
	pub(crate) fn new(entries: PropertyMap) -> Self {
		Self { entries }
	}

	pub fn get_property_value<T: PropertyType>(
		&self,
		property: &Property<T>,
	) -> Result<PropertyValue<T>, PropertyError> {
		self.read_property_value(property)
	}

	pub fn get_required_property_value<T: PropertyType>(
		&self,
		property: &Property<T>,
	) -> Result<T, PropertyError> {
		self.read_property_value(property)?
			.into_value()
			.ok_or_else(|| missing(property))
	}
}

impl PropertyRead for PropertyContainerSnapshot {
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

impl PartialEq for PropertyContainerSnapshot {
	fn eq(&self, other: &Self) -> bool {
		self.entries == other.entries
	}
}

impl Hash for PropertyContainerSnapshot {
	fn hash<H: Hasher>(&self, state: &mut H) {
		read::hash_map_unordered(&self.entries, state);
	}
}

#[cfg(test)]
mod tests {
	use std::thread;

	use keystone_types::NamespacedKey;

	use super::*;
	use crate::container::PropertyContainer;
	use crate::stored::RawPayload;

	fn label() -> Property<String> {
		Property::builder()
			.key(NamespacedKey::new("test", "label").unwrap())
			.default_value("A".to_string())
			.build_unregistered()
			.unwrap()
	}

	#[test]
	fn snapshot_is_isolated_from_later_writes() {
		let label = label();
		let mut container = PropertyContainer::for_properties([label.untyped()]);
		let snapshot = container.snapshot();

		container.set_property_value(&label, "B".to_string()).unwrap();

		assert_eq!(
			snapshot.get_property_value(&label).unwrap().value(),
			Some(&"A".to_string())
		);
		assert_eq!(
			container.get_property_value(&label).unwrap().value(),
			Some(&"B".to_string())
		);
	}

	#[test]
	fn removal_after_snapshot_does_not_leak() {
		let label = label();
		let mut container = PropertyContainer::for_properties([label.untyped()]);
		let snapshot = container.snapshot();
		container.remove_property_value(&label).unwrap();

		assert!(snapshot.has_property(&label));
		assert!(!container.has_property(&label));
	}

	#[test]
	fn undefined_entries_decode_without_resolving() {
		let label = label();
		let mut entries = PropertyMap::new();
		entries.insert(
			Box::from("test:label"),
			StoredValue::Undefined(RawPayload::parse(r#"{"value":"C"}"#).unwrap()),
		);
		let snapshot = PropertyContainerSnapshot::new(entries);

		assert_eq!(snapshot.get_required_property_value(&label).unwrap(), "C");
		assert!(matches!(
			snapshot.stored("test:label"),
			Some(StoredValue::Undefined(_))
		));
	}

	#[test]
	fn null_is_missing_for_required_reads() {
		let label = label();
		let mut container = PropertyContainer::for_properties([label.untyped()]);
		container.set_property_value(&label, None::<String>).unwrap();
		let snapshot = container.snapshot();

		assert!(snapshot.has_property(&label));
		assert!(matches!(
			snapshot.get_required_property_value(&label),
			Err(PropertyError::MissingValue { key }) if key == "test:label"
		));
	}

	#[test]
	fn iterator_refuses_removal() {
		let label = label();
		let snapshot = PropertyContainer::for_properties([label.untyped()]).snapshot();
		let mut iter = snapshot.iter();
		assert!(matches!(iter.remove(), Err(PropertyError::ReadOnly)));
		assert_eq!(iter.count(), 1);
	}

	#[test]
	fn snapshot_can_cross_threads() {
		let label = label();
		let snapshot = PropertyContainer::for_properties([label.untyped()]).snapshot();
		let read = thread::spawn(move || snapshot.get_required_property_value(&label))
			.join()
			.unwrap()
			.unwrap();
		assert_eq!(read, "A");
	}
}
