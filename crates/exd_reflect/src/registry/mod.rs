//! Type registry: type path lookup for default construction and surrogates.
//!
//! ## Menu
//!
//! - [`TypeTrait`]: a capability stored per type.
//! - [`FromType`]: builds a `TypeTrait` for a concrete type.
//! - [`TypeMeta`]: the type path plus a `TypeTrait` table.
//! - [`GetTypeMeta`]: builds the `TypeMeta` of a type.
//! - [`TypeRegistry`]: the process-wide table of `TypeMeta`s.
//! - TypeTraits:
//!     - [`TypeTraitDefault`]: builds a default instance, used to decode
//!       nodes whose slot is polymorphic.
//!     - [`TypeTraitSurrogate`]: encodes and decodes a type through a
//!       [`Surrogate`](crate::codec::Surrogate) instead of its structure.
//!
//! ## auto_register
//!
//! With the `auto_register` feature, types declared with
//! [`auto_register!`](crate::auto_register) are collected through the
//! [`inventory`] crate and added by [`TypeRegistry::auto_register`].
//!
//! The registry is filled once at startup and then only read, so it can be
//! shared between threads behind a plain `&` or an `Arc`.

// -----------------------------------------------------------------------------
// Modules

mod from_type;
mod traits;
mod type_meta;
mod type_registry;
mod type_trait;

// -----------------------------------------------------------------------------
// Exports

pub use from_type::FromType;
pub use traits::{TypeTraitDefault, TypeTraitSurrogate};
pub use type_meta::{GetTypeMeta, TypeMeta};
pub use type_registry::TypeRegistry;
pub use type_trait::TypeTrait;
