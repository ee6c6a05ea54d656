use std::fmt;

use serde::{Deserialize, Serialize};

/// A 3-component integer vector, encoded as `{"x":..,"y":..,"z":..}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Vec3i {
	pub x: i32,
	pub y: i32,
	pub z: i32,
}

impl Vec3i {
	pub const ZERO: Vec3i = Vec3i::new(0, 0, 0);

	pub const fn new(x: i32, y: i32, z: i32) -> Self {
		Self { x, y, z }
	}
}

impl From<(i32, i32, i32)> for Vec3i {
	fn from((x, y, z): (i32, i32, i32)) -> Self {
		Self::new(x, y, z)
	}
}

impl fmt::Display for Vec3i {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "({}, {}, {})", self.x, self.y, self.z)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn wire_shape_is_xyz_object() {
		let v = Vec3i::new(3, 1, 4);
		assert_eq!(serde_json::to_string(&v).unwrap(), r#"{"x":3,"y":1,"z":4}"#);
		let back: Vec3i = serde_json::from_str(r#"{"z":4,"x":3,"y":1}"#).unwrap();
		assert_eq!(back, v);
	}

	#[test]
	fn extra_components_are_rejected() {
		assert!(serde_json::from_str::<Vec3i>(r#"{"x":1,"y":2,"z":3,"w":9}"#).is_err());
	}

	#[test]
	fn display_is_tuple_like() {
		assert_eq!(Vec3i::from((1, -2, 3)).to_string(), "(1, -2, 3)");
	}
}
