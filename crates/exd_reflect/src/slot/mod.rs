//! Statically typed positions that hold graph nodes.
//!
//! A node is a reflected value; a slot is where it lives. The same node type
//! may sit in a plain field (`T`), a nullable one (`Option<T>`) or a
//! polymorphic one (`Box<dyn Reflect>`, `Option<Box<dyn Reflect>>`). The
//! codec reads nodes out of slots when encoding and puts freshly decoded
//! nodes back through [`DynSlot::set_node`].

// -----------------------------------------------------------------------------
// Modules

mod error;
mod hint;
mod slot;

// -----------------------------------------------------------------------------
// Exports

pub use error::SlotError;
pub use hint::SlotHint;
pub use slot::{DynSlot, Slot, take_node};
