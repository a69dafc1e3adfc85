//! Serializable containers and the per-owner serialization unit.
//!
//! ## Menu
//!
//! - [`SerializationBundle`]: attached to one owner, turns it into bytes
//!   plus a list of external references and back.
//! - [`SerializationCallbacks`]: the two host hooks, implemented for every
//!   [`Bundled`] owner.
//! - [`SDictionary`]: a hash map that carries its own bundle.
//! - [`SField`]: a single value that carries its own bundle.
//! - [`prototype`]: an editable list of entries reconciled into a
//!   dictionary, with per-entry warnings and errors.
//!
//! The host persists [`SerializationBundle::encoded`] and
//! [`SerializationBundle::external_refs`] and hands them back through
//! [`SerializationBundle::restore`].

// -----------------------------------------------------------------------------
// Extern crates

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod bundle;
mod callbacks;
mod dictionary;
mod field;

pub mod prototype;

// -----------------------------------------------------------------------------
// Exports

pub use bundle::{BundleError, SerializationBundle};
pub use callbacks::{Bundled, SerializationCallbacks};
pub use dictionary::SDictionary;
pub use field::SField;
