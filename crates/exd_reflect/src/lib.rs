//! Reflection model, type registry and graph codec.
//!
//! ## Menu
//!
//! - [`Reflect`]: a value the codec can walk. Every value has a kind,
//!   see [`ReflectRef`](ops::ReflectRef).
//! - [`slot`]: statically typed positions (fields, elements, keys) that
//!   hold nodes, possibly null or polymorphic.
//! - [`registry`]: type path to default constructor and surrogate lookup.
//! - [`external`]: references to host-owned objects and the per-pass
//!   handle table.
//! - [`codec`]: encodes a graph into bytes and decodes a detached replica.
//! - [`apply`]: exchanges the state of a replica with a live value.
//!
//! Types are declared with [`impl_reflect_struct!`] or
//! [`impl_reflect_opaque!`], and optionally collected at startup with
//! [`auto_register!`].

// -----------------------------------------------------------------------------
// Extern crates

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod impls;
mod macros;
mod reflection;

pub mod apply;
pub mod codec;
pub mod external;
pub mod info;
pub mod ops;
pub mod registry;
pub mod slot;

// -----------------------------------------------------------------------------
// Top-Level exports

#[doc(hidden)]
pub mod __macro_exports;

pub use reflection::Reflect;
