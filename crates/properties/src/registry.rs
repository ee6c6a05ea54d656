use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwap;
use rustc_hash::FxHashMap as HashMap;

use crate::def::{Property, PropertyDef};
use crate::error::PropertyError;
use crate::value::PropertyType;

/// Outcome of a successful [`PropertyRegistry::register`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum RegisterAction {
	/// The key was new; the definition was inserted.
	Inserted,
	/// An identical definition was already present; nothing changed.
	Unchanged,
}

#[derive(Clone, Default)]
struct RegistrySnapshot {
	by_key: HashMap<Box<str>, Arc<PropertyDef>>,
	/// Registration order, for dumps and iteration.
	items: Vec<Arc<PropertyDef>>,
}

/// Table of every known property definition, keyed by canonical key.
///
/// One instance is owned by the application and shared by reference. Reads
/// load the current snapshot without locking. Writes clone the snapshot,
/// insert, and publish with a compare-and-swap, retrying if another writer
/// got there first; the conflict check always runs against the snapshot being
/// replaced, so two racing registrations for one key cannot both succeed with
/// different data.
pub struct PropertyRegistry {
	snap: ArcSwap<RegistrySnapshot>,
}

impl Default for PropertyRegistry {
	fn default() -> Self {
		Self::new()
	}
}

impl PropertyRegistry {
	pub fn new() -> Self {
		Self {
			snap: ArcSwap::from_pointee(RegistrySnapshot::default()),
		}
	}

	/// Inserts `def` if its key is free.
	///
	/// An identical existing definition yields [`RegisterAction::Unchanged`].
	/// A differing one fails with [`PropertyError::RegistrationConflict`] and
	/// the existing definition stays authoritative.
	pub fn register(&self, def: Arc<PropertyDef>) -> Result<RegisterAction, PropertyError> {
		loop {
			let cur = self.snap.load_full();
			if let Some(existing) = cur.by_key.get(def.full_key()) {
				if **existing == *def {
					return Ok(RegisterAction::Unchanged);
				}
				tracing::warn!(
					domain = "properties",
					key = def.full_key(),
					"conflicting property registration rejected",
				);
				return Err(PropertyError::RegistrationConflict {
					key: def.full_key().to_string(),
					existing: Box::new((**existing).clone()),
					incoming: Box::new((*def).clone()),
				});
			}

			let mut next = (*cur).clone();
			next.by_key
				.insert(Box::from(def.full_key()), Arc::clone(&def));
			next.items.push(Arc::clone(&def));

			let prev = self.snap.compare_and_swap(&cur, Arc::new(next));
			if Arc::ptr_eq(&prev, &cur) {
				tracing::trace!(domain = "properties", key = def.full_key(), "property registered");
				return Ok(RegisterAction::Inserted);
			}
		}
	}

	/// Looks a definition up by canonical key.
	#[inline]
	pub fn lookup(&self, key: &str) -> Option<Arc<PropertyDef>> {
		self.snap.load().by_key.get(key).cloned()
	}

	/// Looks a definition up and recovers its typed handle.
	///
	/// Returns `None` for an unknown key and a [`PropertyError::TypeMismatch`]
	/// when the registered type is not `T`.
	pub fn lookup_typed<T: PropertyType>(
		&self,
		key: &str,
	) -> Option<Result<Property<T>, PropertyError>> {
		self.lookup(key).map(Property::from_def)
	}

	pub fn contains(&self, key: &str) -> bool {
		self.snap.load().by_key.contains_key(key)
	}

	pub fn len(&self) -> usize {
		self.snap.load().items.len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Returns every definition in registration order.
	pub fn definitions(&self) -> Vec<Arc<PropertyDef>> {
		self.snap.load().items.clone()
	}

	/// Lists every registered key, one per line. For diagnostics only.
	pub fn debug_dump(&self) -> String {
		let snap = self.snap.load();
		let mut out = format!("PropertyRegistry ({} definitions)\n", snap.items.len());
		for def in &snap.items {
			out.push_str(&format!("  {def}\n"));
		}
		out
	}
}

impl fmt::Debug for PropertyRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let snap = self.snap.load();
		f.debug_struct("PropertyRegistry")
			.field("count", &snap.items.len())
			.field(
				"keys",
				&snap.items.iter().map(|d| d.full_key()).collect::<Vec<_>>(),
			)
			.finish()
	}
}
