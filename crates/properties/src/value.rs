//! The closed set of values a property can hold.
//!
//! Every property value is one of the [`Value`] variants and every property
//! declares one [`ValueType`]. Conversions between the two never coerce: an
//! integer is not a string, a string naming no variant is not an enum. The one
//! widening accepted on decode is a JSON integer read into a [`ValueType::Float`]
//! property, since JSON has a single number type.

use std::fmt;
use std::hash::{Hash, Hasher};

use keystone_types::Vec3i;
use serde::Deserialize;

/// Descriptor of an enum-by-name property type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnumType {
	pub name: &'static str,
	pub variants: &'static [&'static str],
}

impl EnumType {
	pub const fn new(name: &'static str, variants: &'static [&'static str]) -> Self {
		Self { name, variants }
	}

	/// Returns true if `variant` is one of the accepted names.
	pub fn accepts(&self, variant: &str) -> bool {
		self.variants.contains(&variant)
	}
}

/// The declared type of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
	Bool,
	Int,
	Float,
	String,
	Vec3,
	Enum(EnumType),
}

impl fmt::Display for ValueType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ValueType::Bool => f.write_str("bool"),
			ValueType::Int => f.write_str("int"),
			ValueType::Float => f.write_str("float"),
			ValueType::String => f.write_str("string"),
			ValueType::Vec3 => f.write_str("vec3"),
			ValueType::Enum(e) => write!(f, "enum {}", e.name),
		}
	}
}

/// A stored property value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	Bool(bool),
	Int(i64),
	Float(f64),
	String(String),
	Vec3(Vec3i),
	/// Enum variant, by name.
	Enum(String),
}

impl Value {
	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Value::Bool(v) => Some(*v),
			_ => None,
		}
	}

	pub fn as_int(&self) -> Option<i64> {
		match self {
			Value::Int(v) => Some(*v),
			_ => None,
		}
	}

	pub fn as_float(&self) -> Option<f64> {
		match self {
			Value::Float(v) => Some(*v),
			_ => None,
		}
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			Value::String(v) => Some(v),
			_ => None,
		}
	}

	pub fn as_vec3(&self) -> Option<Vec3i> {
		match self {
			Value::Vec3(v) => Some(*v),
			_ => None,
		}
	}

	/// Returns the variant name if this is an `Enum` value.
	pub fn as_enum(&self) -> Option<&str> {
		match self {
			Value::Enum(v) => Some(v),
			_ => None,
		}
	}

	/// Returns true if this value may be stored under `ty`.
	///
	/// Enum values must additionally name one of the type's variants.
	pub fn matches_type(&self, ty: &ValueType) -> bool {
		match (self, ty) {
			(Value::Bool(_), ValueType::Bool)
			| (Value::Int(_), ValueType::Int)
			| (Value::Float(_), ValueType::Float)
			| (Value::String(_), ValueType::String)
			| (Value::Vec3(_), ValueType::Vec3) => true,
			(Value::Enum(name), ValueType::Enum(e)) => e.accepts(name),
			_ => false,
		}
	}

	pub fn type_name(&self) -> &'static str {
		match self {
			Value::Bool(_) => "bool",
			Value::Int(_) => "int",
			Value::Float(_) => "float",
			Value::String(_) => "string",
			Value::Vec3(_) => "vec3",
			Value::Enum(_) => "enum",
		}
	}

	/// Encodes this value as JSON.
	///
	/// Fails for non-finite floats, which JSON cannot represent.
	pub fn to_json(&self) -> Result<serde_json::Value, String> {
		Ok(match self {
			Value::Bool(v) => serde_json::Value::Bool(*v),
			Value::Int(v) => serde_json::Value::from(*v),
			Value::Float(v) => serde_json::Number::from_f64(*v)
				.map(serde_json::Value::Number)
				.ok_or_else(|| format!("non-finite float {v}"))?,
			Value::String(v) | Value::Enum(v) => serde_json::Value::String(v.clone()),
			Value::Vec3(v) => serde_json::json!({ "x": v.x, "y": v.y, "z": v.z }),
		})
	}

	/// Decodes a JSON value as `ty`.
	pub fn from_json(ty: &ValueType, json: &serde_json::Value) -> Result<Value, String> {
		let mismatch = || format!("expected {ty}, got {json}");
		match ty {
			ValueType::Bool => json.as_bool().map(Value::Bool).ok_or_else(mismatch),
			ValueType::Int => json.as_i64().map(Value::Int).ok_or_else(mismatch),
			ValueType::Float => json.as_f64().map(Value::Float).ok_or_else(mismatch),
			ValueType::String => json
				.as_str()
				.map(|s| Value::String(s.to_string()))
				.ok_or_else(mismatch),
			ValueType::Vec3 => Vec3i::deserialize(json)
				.map(Value::Vec3)
				.map_err(|e| format!("expected vec3: {e}")),
			ValueType::Enum(e) => match json.as_str() {
				Some(name) if e.accepts(name) => Ok(Value::Enum(name.to_string())),
				Some(name) => Err(format!("{name:?} is not a variant of enum {}", e.name)),
				None => Err(mismatch()),
			},
		}
	}
}

impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Value::Bool(v) => write!(f, "{v}"),
			Value::Int(v) => write!(f, "{v}"),
			Value::Float(v) => write!(f, "{v}"),
			Value::String(v) => write!(f, "{v:?}"),
			Value::Vec3(v) => write!(f, "{v}"),
			Value::Enum(v) => f.write_str(v),
		}
	}
}

// Consistent with `PartialEq`: `0.0 == -0.0`, so both hash alike.
impl Hash for Value {
	fn hash<H: Hasher>(&self, state: &mut H) {
		std::mem::discriminant(self).hash(state);
		match self {
			Value::Bool(v) => v.hash(state),
			Value::Int(v) => v.hash(state),
			Value::Float(v) => {
				let bits = if *v == 0.0 { 0 } else { v.to_bits() };
				bits.hash(state);
			}
			Value::String(v) | Value::Enum(v) => v.hash(state),
			Value::Vec3(v) => v.hash(state),
		}
	}
}

impl From<bool> for Value {
	fn from(v: bool) -> Self {
		Value::Bool(v)
	}
}

impl From<i64> for Value {
	fn from(v: i64) -> Self {
		Value::Int(v)
	}
}

impl From<f64> for Value {
	fn from(v: f64) -> Self {
		Value::Float(v)
	}
}

impl From<String> for Value {
	fn from(v: String) -> Self {
		Value::String(v)
	}
}

impl From<&str> for Value {
	fn from(v: &str) -> Self {
		Value::String(v.to_string())
	}
}

impl From<Vec3i> for Value {
	fn from(v: Vec3i) -> Self {
		Value::Vec3(v)
	}
}

/// Rust types that can be the `T` of a [`Property<T>`](crate::Property).
///
/// Implemented for `bool`, `i64`, `f64`, `String` and [`Vec3i`]; enums get an
/// implementation from [`property_enum!`](crate::property_enum).
pub trait PropertyType: Clone + PartialEq + fmt::Debug + Send + Sync + 'static {
	/// Returns the [`ValueType`] a property of this type declares.
	fn value_type() -> ValueType;

	fn into_value(self) -> Value;

	/// Extracts `Self` from a value, returning `None` on a variant mismatch.
	fn from_value(value: &Value) -> Option<Self>;
}

impl PropertyType for bool {
	fn value_type() -> ValueType {
		ValueType::Bool
	}

	fn into_value(self) -> Value {
		Value::Bool(self)
	}

	fn from_value(value: &Value) -> Option<Self> {
		value.as_bool()
	}
}

impl PropertyType for i64 {
	fn value_type() -> ValueType {
		ValueType::Int
	}

	fn into_value(self) -> Value {
		Value::Int(self)
	}

	fn from_value(value: &Value) -> Option<Self> {
		value.as_int()
	}
}

impl PropertyType for f64 {
	fn value_type() -> ValueType {
		ValueType::Float
	}

	fn into_value(self) -> Value {
		Value::Float(self)
	}

	fn from_value(value: &Value) -> Option<Self> {
		value.as_float()
	}
}

impl PropertyType for String {
	fn value_type() -> ValueType {
		ValueType::String
	}

	fn into_value(self) -> Value {
		Value::String(self)
	}

	fn from_value(value: &Value) -> Option<Self> {
		value.as_str().map(str::to_string)
	}
}

impl PropertyType for Vec3i {
	fn value_type() -> ValueType {
		ValueType::Vec3
	}

	fn into_value(self) -> Value {
		Value::Vec3(self)
	}

	fn from_value(value: &Value) -> Option<Self> {
		value.as_vec3()
	}
}

/// Declares a fieldless enum usable as a property type, stored by name.
///
/// ```ignore
/// keystone_properties::property_enum! {
/// 	pub enum Direction {
/// 		North => "north",
/// 		South => "south",
/// 	}
/// }
/// ```
#[macro_export]
macro_rules! property_enum {
	(
		$(#[$meta:meta])*
		$vis:vis enum $name:ident {
			$( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
		}
	) => {
		$(#[$meta])*
		#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
		$vis enum $name {
			$( $(#[$vmeta])* $variant ),+
		}

		impl $name {
			/// Wire names of every variant, in declaration order.
			pub const VARIANTS: &'static [&'static str] = &[$($wire),+];

			/// Returns the wire name of this variant.
			pub const fn as_str(self) -> &'static str {
				match self {
					$( Self::$variant => $wire ),+
				}
			}

			/// Looks a variant up by wire name.
			pub fn from_name(name: &str) -> Option<Self> {
				match name {
					$( $wire => Some(Self::$variant), )+
					_ => None,
				}
			}
		}

		impl $crate::PropertyType for $name {
			fn value_type() -> $crate::ValueType {
				$crate::ValueType::Enum($crate::EnumType::new(stringify!($name), Self::VARIANTS))
			}

			fn into_value(self) -> $crate::Value {
				$crate::Value::Enum(self.as_str().to_string())
			}

			fn from_value(value: &$crate::Value) -> Option<Self> {
				value.as_enum().and_then(Self::from_name)
			}
		}
	};
}

#[cfg(test)]
mod tests;
