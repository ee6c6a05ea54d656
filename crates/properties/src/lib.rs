//! Typed, namespaced properties attached to owner objects.
//!
//! Properties are declared once, as [`Property<T>`] handles registered in a
//! [`PropertyRegistry`]. Each owner keeps its values in a
//! [`PropertyContainer`], which can be frozen into a
//! [`PropertyContainerSnapshot`] and persisted with a
//! [`PropertyContainerSerializer`].
//!
//! Persistence tolerates schema drift: keys the loading code does not know
//! are kept verbatim as undefined entries and resolve once a matching
//! property is supplied; keys it declares but the document lacks are
//! defaulted.
//!
//! ```ignore
//! let registry = PropertyRegistry::new();
//! let speed: Property<f64> = Property::builder()
//! 	.parse_key("doors:open_speed")
//! 	.default_value(1.0)
//! 	.build(&registry)?;
//!
//! let schema = Schema::new("doors:door", []).with(&speed);
//! let mut container = PropertyContainer::for_schema(&schema);
//! container.set_property_value(&speed, 2.5)?;
//!
//! let serializer = PropertyContainerSerializer::default();
//! let text = serializer.serialize(&container)?;
//! assert_eq!(serializer.deserialize(&schema, &text)?, container);
//! ```

/// Access-level bit flags.
pub mod access;
/// Fluent construction of property definitions.
pub mod builder;
/// Serializer settings.
pub mod config;
/// The mutable per-owner value store.
pub mod container;
/// Property definitions and typed handles.
pub mod def;
/// Error types.
pub mod error;
/// The read contract shared by containers and snapshots.
pub mod read;
/// The definition table.
pub mod registry;
/// Owner-type property lists.
pub mod schema;
/// Document encoding and decoding.
pub mod serializer;
/// Frozen container copies.
pub mod snapshot;
/// Stored entries and the typed tri-state view.
pub mod stored;
/// The closed value model.
pub mod value;

pub use access::{AccessLevel, AccessLevelFlags};
pub use builder::PropertyBuilder;
pub use config::SerializerConfig;
pub use container::PropertyContainer;
pub use def::{Property, PropertyDef, ScopeTag};
pub use error::PropertyError;
pub use keystone_types::{KeyError, NamespacedKey, Vec3i};
pub use read::{PropertyIter, PropertyMap, PropertyRead, StoredEntries};
pub use registry::{PropertyRegistry, RegisterAction};
pub use schema::{PropertySchema, Schema};
pub use serializer::PropertyContainerSerializer;
pub use snapshot::PropertyContainerSnapshot;
pub use stored::{PropertyValue, RawPayload, StoredValue};
pub use value::{EnumType, PropertyType, Value, ValueType};
