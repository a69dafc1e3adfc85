//! Kind-specific access to reflected values.
//!
//! - [`Opaque`]: leaves converted to and from a [`Primitive`](crate::codec::Primitive).
//! - [`Struct`]: composites with a declared, ordered field list.
//! - [`List`]: ordered sequences (e.g. `Vec<T>`).
//! - [`Map`]: key/value containers (e.g. `HashMap<K, V>`).
//!
//! Fields, elements, keys and values are exposed as
//! [`DynSlot`](crate::slot::DynSlot)s rather than as nodes, because a
//! position may be empty or may hold a value of a different runtime type
//! than its declared one.

// -----------------------------------------------------------------------------
// Modules

mod kind;
mod list_ops;
mod map_ops;
mod opaque_ops;
mod struct_ops;

// -----------------------------------------------------------------------------
// Exports

pub use kind::{ReflectMut, ReflectRef};
pub use list_ops::{List, ListItemIter};
pub use map_ops::Map;
pub use opaque_ops::Opaque;
pub use struct_ops::{Struct, StructFieldIter};
