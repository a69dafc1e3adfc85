//! Reflection for foreign types.
//!
//! - primitives and `String`: opaque leaves;
//! - `Vec<T>`: list;
//! - `HashMap<K, V>` with the fixed hash state: map;
//! - `Option<T>`, `Box<dyn Reflect>`: slots only, they are never nodes.

mod hash_map;
mod primitives;
mod slots;
mod vec;
