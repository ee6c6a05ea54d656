use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fmt;
use std::marker::PhantomData;
use std::ops::Deref;
use std::sync::Arc;

use keystone_types::NamespacedKey;
use serde::Deserialize;

use crate::access::{AccessLevel, AccessLevelFlags};
use crate::builder::PropertyBuilder;
use crate::error::PropertyError;
use crate::stored::RawPayload;
use crate::value::{PropertyType, Value, ValueType};

/// A tag grouping properties by where they apply (e.g. `"redstone"`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScopeTag(Cow<'static, str>);

impl ScopeTag {
	pub const fn from_static(name: &'static str) -> Self {
		Self(Cow::Borrowed(name))
	}

	pub fn new(name: impl Into<String>) -> Self {
		Self(Cow::Owned(name.into()))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for ScopeTag {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// Untyped, immutable definition of a property.
///
/// This is the form held by the [`PropertyRegistry`](crate::PropertyRegistry)
/// and by schemas. Equality is field-for-field; the registry uses it to tell a
/// harmless re-registration from a conflict.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDef {
	key: NamespacedKey,
	value_type: ValueType,
	default: Value,
	access: AccessLevelFlags,
	scopes: BTreeSet<ScopeTag>,
	user_addable: bool,
}

impl PropertyDef {
	/// Creates a read-only, unscoped, non-addable definition.
	///
	/// Fails when `default` does not fit `value_type` or cannot be encoded.
	pub fn new(
		key: NamespacedKey,
		value_type: ValueType,
		default: Value,
	) -> Result<Self, PropertyError> {
		if !default.matches_type(&value_type) {
			return Err(PropertyError::invalid(format!(
				"default {default} of {key} does not match type {value_type}"
			)));
		}
		if let Value::Float(v) = default
			&& !v.is_finite()
		{
			return Err(PropertyError::invalid(format!(
				"default of {key} is not a finite float"
			)));
		}
		Ok(Self {
			key,
			value_type,
			default,
			access: AccessLevelFlags::READ_ONLY,
			scopes: BTreeSet::new(),
			user_addable: false,
		})
	}

	pub fn with_access(mut self, access: AccessLevelFlags) -> Self {
		self.access = access;
		self
	}

	pub fn with_scopes(mut self, scopes: impl IntoIterator<Item = ScopeTag>) -> Self {
		self.scopes = scopes.into_iter().collect();
		self
	}

	pub fn with_user_addable(mut self, user_addable: bool) -> Self {
		self.user_addable = user_addable;
		self
	}

	pub fn key(&self) -> &NamespacedKey {
		&self.key
	}

	/// Returns the canonical wire key, `"namespace:name"`.
	#[inline]
	pub fn full_key(&self) -> &str {
		self.key.as_str()
	}

	pub fn value_type(&self) -> &ValueType {
		&self.value_type
	}

	pub fn default_value(&self) -> &Value {
		&self.default
	}

	pub fn access(&self) -> AccessLevelFlags {
		self.access
	}

	pub fn scopes(&self) -> &BTreeSet<ScopeTag> {
		&self.scopes
	}

	pub fn has_scope(&self, scope: &ScopeTag) -> bool {
		self.scopes.contains(scope)
	}

	/// Whether users may add this property to an owner that lacks it.
	pub fn user_addable(&self) -> bool {
		self.user_addable
	}

	pub fn is_readable(&self) -> bool {
		self.access.has_flag(AccessLevel::Read)
	}

	pub fn is_editable(&self) -> bool {
		self.access.has_flags(&[AccessLevel::Read, AccessLevel::Edit])
	}

	pub fn is_hidden(&self) -> bool {
		self.access == AccessLevelFlags::HIDDEN
	}

	/// Fails with [`PropertyError::TypeMismatch`] unless `value` fits this property.
	pub fn check(&self, value: &Value) -> Result<(), PropertyError> {
		if value.matches_type(&self.value_type) {
			Ok(())
		} else {
			Err(PropertyError::TypeMismatch {
				key: self.full_key().to_string(),
				expected: self.value_type,
				value: format!("{value} ({})", value.type_name()),
			})
		}
	}

	/// Like [`check`](Self::check), but also fails with [`PropertyError::Encode`]
	/// for a value that could never be written out.
	pub(crate) fn check_storable(&self, value: &Value) -> Result<(), PropertyError> {
		self.check(value)?;
		value.to_json().map(drop).map_err(|reason| PropertyError::Encode {
			key: self.full_key().to_string(),
			reason,
		})
	}

	/// Decodes a wire member (`{"value": ..}`) as this property's type.
	///
	/// A `null` or absent `value` decodes to `None`.
	pub(crate) fn decode_payload(&self, raw: &RawPayload) -> Result<Option<Value>, PropertyError> {
		#[derive(Deserialize)]
		struct Member {
			#[serde(default)]
			value: Option<serde_json::Value>,
		}

		let member: Member =
			serde_json::from_str(raw.as_str()).map_err(|e| self.decode_error(e.to_string()))?;
		member
			.value
			.map(|json| Value::from_json(&self.value_type, &json).map_err(|r| self.decode_error(r)))
			.transpose()
	}

	fn decode_error(&self, reason: String) -> PropertyError {
		PropertyError::Decode {
			key: self.full_key().to_string(),
			reason,
		}
	}
}

impl fmt::Display for PropertyDef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} ({}, default {})", self.key, self.value_type, self.default)
	}
}

/// Typed handle to a property definition.
///
/// The definition's [`ValueType`] always equals `T::value_type()`, and the
/// default is kept in typed form so reading it never fails.
pub struct Property<T: PropertyType> {
	def: Arc<PropertyDef>,
	default: T,
	_marker: PhantomData<fn() -> T>,
}

impl<T: PropertyType> Property<T> {
	/// Starts a builder with nothing set.
	pub fn builder() -> PropertyBuilder<T> {
		PropertyBuilder::new()
	}

	/// Recovers a typed handle from an untyped definition.
	pub fn from_def(def: Arc<PropertyDef>) -> Result<Self, PropertyError> {
		let expected = T::value_type();
		if def.value_type != expected {
			return Err(PropertyError::TypeMismatch {
				key: def.full_key().to_string(),
				expected,
				value: format!("definition of type {}", def.value_type),
			});
		}
		let default = T::from_value(&def.default).ok_or_else(|| PropertyError::TypeMismatch {
			key: def.full_key().to_string(),
			expected,
			value: def.default.to_string(),
		})?;
		Ok(Self {
			def,
			default,
			_marker: PhantomData,
		})
	}

	pub fn def(&self) -> &PropertyDef {
		&self.def
	}

	/// Returns a shared handle to the untyped definition, e.g. for a schema list.
	pub fn untyped(&self) -> Arc<PropertyDef> {
		Arc::clone(&self.def)
	}

	pub fn default_value(&self) -> T {
		self.default.clone()
	}

	/// Converts a dynamically-typed value into `T`.
	///
	/// `None` passes through unchanged. A value of another variant fails with
	/// [`PropertyError::TypeMismatch`] naming the value, the type and the key.
	pub fn cast(&self, value: Option<Value>) -> Result<Option<T>, PropertyError> {
		let Some(value) = value else {
			return Ok(None);
		};
		self.def.check(&value)?;
		T::from_value(&value)
			.map(Some)
			.ok_or_else(|| PropertyError::TypeMismatch {
				key: self.def.full_key().to_string(),
				expected: self.def.value_type,
				value: value.to_string(),
			})
	}
}

impl<T: PropertyType> Clone for Property<T> {
	fn clone(&self) -> Self {
		Self {
			def: Arc::clone(&self.def),
			default: self.default.clone(),
			_marker: PhantomData,
		}
	}
}

impl<T: PropertyType> PartialEq for Property<T> {
	fn eq(&self, other: &Self) -> bool {
		self.def == other.def
	}
}

impl<T: PropertyType> Deref for Property<T> {
	type Target = PropertyDef;

	fn deref(&self) -> &PropertyDef {
		&self.def
	}
}

impl<T: PropertyType> AsRef<PropertyDef> for Property<T> {
	fn as_ref(&self) -> &PropertyDef {
		&self.def
	}
}

impl<T: PropertyType> fmt::Debug for Property<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Property")
			.field("key", &self.def.key)
			.field("type", &std::any::type_name::<T>())
			.finish()
	}
}
