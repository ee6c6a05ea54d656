use std::hash::{Hash, Hasher};

use indexmap::IndexMap;

use crate::def::{Property, PropertyDef};
use crate::error::PropertyError;
use crate::stored::{PropertyValue, StoredValue};
use crate::value::{PropertyType, Value};

/// Backing map of containers and snapshots: canonical key to stored value,
/// in insertion order.
pub type PropertyMap = IndexMap<Box<str>, StoredValue>;

/// Iterator over stored `(canonical key, stored value)` pairs.
pub type StoredEntries<'a> = indexmap::map::Iter<'a, Box<str>, StoredValue>;

/// Read contract shared by [`PropertyContainer`](crate::PropertyContainer) and
/// [`PropertyContainerSnapshot`](crate::PropertyContainerSnapshot).
///
/// Nothing here resolves undefined entries in place; that is the container's
/// `get_property_value`.
pub trait PropertyRead {
	/// Returns the stored entry for a canonical key.
	fn stored(&self, key: &str) -> Option<&StoredValue>;

	/// Iterates stored entries in map order.
	fn stored_entries(&self) -> StoredEntries<'_>;

	fn len(&self) -> usize;

	fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Reads `property` without storing any resolution.
	fn read_property_value<T: PropertyType>(
		&self,
		property: &Property<T>,
	) -> Result<PropertyValue<T>, PropertyError> {
		match self.stored(property.full_key()) {
			None => Ok(PropertyValue::Unset),
			Some(stored) => stored.read(property),
		}
	}

	/// True if a non-unset entry exists that `property` can read.
	fn has_property(&self, property: &PropertyDef) -> bool {
		self.stored(property.full_key())
			.is_some_and(|stored| stored.readable_as(property))
	}

	/// True if every property is present. No properties is trivially true.
	fn has_properties(&self, properties: &[&PropertyDef]) -> bool {
		match properties {
			[] => true,
			[single] => self.has_property(single),
			many => many.iter().all(|p| self.has_property(p)),
		}
	}

	/// Read-only iteration over `(canonical key, value or null)`.
	fn iter(&self) -> PropertyIter<'_> {
		PropertyIter {
			inner: self.stored_entries(),
		}
	}
}

/// Read-only iterator over `(canonical key, value)` pairs.
///
/// Undefined entries yield `None`, as do explicit nulls.
#[derive(Debug, Clone)]
pub struct PropertyIter<'a> {
	inner: StoredEntries<'a>,
}

impl PropertyIter<'_> {
	/// Always fails: the iterator is a view and cannot mutate its source.
	pub fn remove(&mut self) -> Result<(), PropertyError> {
		Err(PropertyError::ReadOnly)
	}
}

impl<'a> Iterator for PropertyIter<'a> {
	type Item = (&'a str, Option<&'a Value>);

	fn next(&mut self) -> Option<Self::Item> {
		self.inner.next().map(|(key, stored)| {
			let value = match stored {
				StoredValue::Provided(value) => value.as_ref(),
				StoredValue::Undefined(_) => None,
			};
			(&**key, value)
		})
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		self.inner.size_hint()
	}
}

impl ExactSizeIterator for PropertyIter<'_> {}

/// Hashes a map independently of insertion order, matching `IndexMap`'s
/// order-insensitive equality.
pub(crate) fn hash_map_unordered<H: Hasher>(map: &PropertyMap, state: &mut H) {
	let mut entries: Vec<_> = map.iter().collect();
	entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
	entries.len().hash(state);
	for (key, value) in entries {
		key.hash(state);
		value.hash(state);
	}
}
