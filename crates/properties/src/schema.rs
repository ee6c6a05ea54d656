use std::sync::Arc;

use crate::def::{Property, PropertyDef};
use crate::value::PropertyType;

/// Something that declares which properties an owner type carries.
///
/// The property list is authoritative for decode and default-fill decisions.
/// The identifier only labels diagnostics.
pub trait PropertySchema {
	fn schema_id(&self) -> &str;

	fn properties(&self) -> &[Arc<PropertyDef>];
}

/// A named, ordered list of property definitions.
///
/// Keys are unique; a repeated key keeps its first definition.
#[derive(Debug, Clone, Default)]
pub struct Schema {
	id: String,
	properties: Vec<Arc<PropertyDef>>,
}

impl Schema {
	pub fn new(id: impl Into<String>, properties: impl IntoIterator<Item = Arc<PropertyDef>>) -> Self {
		let mut schema = Self {
			id: id.into(),
			properties: Vec::new(),
		};
		for def in properties {
			schema.push(def);
		}
		schema
	}

	/// Appends a typed property.
	pub fn with<T: PropertyType>(mut self, property: &Property<T>) -> Self {
		self.push(property.untyped());
		self
	}

	fn push(&mut self, def: Arc<PropertyDef>) {
		if !self.properties.iter().any(|d| d.full_key() == def.full_key()) {
			self.properties.push(def);
		}
	}
}

impl PropertySchema for Schema {
	fn schema_id(&self) -> &str {
		&self.id
	}

	fn properties(&self) -> &[Arc<PropertyDef>] {
		&self.properties
	}
}
