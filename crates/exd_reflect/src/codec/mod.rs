//! The graph codec: object graph to bytes and back.
//!
//! ## Encoding
//!
//! [`encode`] walks the graph depth-first. Every node is written as its
//! runtime type path (interned into a table of tags) followed by a body:
//!
//! - a node whose type has a registered [`Surrogate`] is written by it;
//! - an [`Opaque`](crate::ops::Opaque) leaf is written as its [`Primitive`];
//! - a [`Struct`](crate::ops::Struct) writes its declared fields in order;
//! - a [`List`](crate::ops::List) writes its elements in order;
//! - a [`Map`](crate::ops::Map) writes its entries sorted by the encoding
//!   of their keys, so a map rebuilt by decoding encodes the same way.
//!
//! Empty slots are written as null. Encoding an unchanged graph twice
//! yields the same bytes. A graph nested deeper than [`MAX_DEPTH`] is
//! rejected.
//!
//! ## Decoding
//!
//! [`decode`] builds a new, detached value; it never touches a live one.
//! A node is built from its surrogate, from its slot's static type when the
//! tag matches it, or from the registry's default constructor. A tag that
//! resolves to none of these is handled by [`UnknownTypePolicy`].
//!
//! ## Stream
//!
//! The stream is `bincode` over the tag table, a flat table of nodes whose
//! bodies refer to their children by index, and the index of the root.
//! Every node is used once. It carries no version field.

// -----------------------------------------------------------------------------
// Modules

mod context;
mod decode;
mod encode;
mod error;
mod options;
mod surrogate;
mod wire;

pub mod serde_leaf;

// -----------------------------------------------------------------------------
// Exports

pub use context::{DecodeContext, EncodeContext};
pub use decode::{decode, decode_dyn};
pub use encode::encode;
pub use error::CodecError;
pub use options::{DecodeOptions, DecodeReport, UnknownTypePolicy};
pub use surrogate::{ReferenceSubstitutionPolicy, Surrogate};
pub use wire::Primitive;

/// Deepest nesting accepted by [`encode`] and [`decode`]; the root is at
/// depth zero.
///
/// Deeper graphs and streams fail with [`CodecError::CorruptData`].
pub const MAX_DEPTH: usize = 128;
