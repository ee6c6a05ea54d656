//! Shared identity and geometry types for keystone.

/// Namespaced identifiers and their canonical string form.
pub mod key;
/// Integer vector types.
pub mod vector;

pub use key::{KeyError, NamespacedKey};
pub use vector::Vec3i;
