use std::collections::BTreeSet;
use std::sync::Arc;

use keystone_types::{KeyError, NamespacedKey};

use crate::access::AccessLevelFlags;
use crate::def::{Property, PropertyDef, ScopeTag};
use crate::error::PropertyError;
use crate::registry::PropertyRegistry;
use crate::value::PropertyType;

/// Builder for [`Property`].
///
/// Defaults: read-only access, no scopes, not user-addable. The key and the
/// default value are required; [`PropertyBuilder::build`] fails with
/// [`PropertyError::InvalidDefinition`] when either is missing.
///
/// ```ignore
/// let speed: Property<f64> = Property::builder()
/// 	.parse_key("doors:open_speed")
/// 	.default_value(1.0)
/// 	.access(AccessLevelFlags::USER_EDITABLE)
/// 	.build(&registry)?;
/// ```
#[derive(Debug)]
pub struct PropertyBuilder<T: PropertyType> {
	key: Option<Result<NamespacedKey, KeyError>>,
	default: Option<T>,
	access: AccessLevelFlags,
	hidden: bool,
	scopes: BTreeSet<ScopeTag>,
	user_addable: bool,
}

impl<T: PropertyType> Default for PropertyBuilder<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T: PropertyType> PropertyBuilder<T> {
	pub fn new() -> Self {
		Self {
			key: None,
			default: None,
			access: AccessLevelFlags::READ_ONLY,
			hidden: false,
			scopes: BTreeSet::new(),
			user_addable: false,
		}
	}

	pub fn key(mut self, key: NamespacedKey) -> Self {
		self.key = Some(Ok(key));
		self
	}

	/// Sets the key from its canonical `"namespace:name"` form.
	///
	/// A malformed key is reported by `build`.
	pub fn parse_key(mut self, text: &str) -> Self {
		self.key = Some(NamespacedKey::parse(text));
		self
	}

	pub fn default_value(mut self, value: T) -> Self {
		self.default = Some(value);
		self
	}

	pub fn access(mut self, access: AccessLevelFlags) -> Self {
		self.access = access;
		self
	}

	/// Forces [`AccessLevelFlags::HIDDEN`], overriding any `access` call.
	pub fn hidden(mut self) -> Self {
		self.hidden = true;
		self
	}

	pub fn scope(mut self, scope: ScopeTag) -> Self {
		self.scopes.insert(scope);
		self
	}

	pub fn scopes(mut self, scopes: impl IntoIterator<Item = ScopeTag>) -> Self {
		self.scopes.extend(scopes);
		self
	}

	pub fn user_addable(mut self, user_addable: bool) -> Self {
		self.user_addable = user_addable;
		self
	}

	/// Validates the definition and registers it.
	///
	/// Registering a field-for-field identical definition again is fine; a
	/// differing one fails with [`PropertyError::RegistrationConflict`].
	pub fn build(self, registry: &PropertyRegistry) -> Result<Property<T>, PropertyError> {
		let property = self.build_unregistered()?;
		registry.register(property.untyped())?;
		Ok(property)
	}

	/// Validates the definition without registering it.
	pub fn build_unregistered(self) -> Result<Property<T>, PropertyError> {
		let key = self
			.key
			.ok_or_else(|| PropertyError::invalid("missing key"))??;
		let default = self
			.default
			.ok_or_else(|| PropertyError::invalid(format!("missing default value for {key}")))?;
		let access = if self.hidden {
			AccessLevelFlags::HIDDEN
		} else {
			self.access
		};

		let def = PropertyDef::new(key, T::value_type(), default.into_value())?
			.with_access(access)
			.with_scopes(self.scopes)
			.with_user_addable(self.user_addable);
		Property::from_def(Arc::new(def))
	}
}
