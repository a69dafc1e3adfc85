//! References to objects owned by the host.
//!
//! The host decides when such an object dies; this crate never owns one.
//! An [`ExternalRef`] keeps pointing at its object after the host marks it
//! destroyed and then reports [`is_missing`](ExternalRef::is_missing).
//!
//! During one serialization pass every distinct reference gets a small
//! integer [`ExternalHandle`] from the unit's [`ExternalRefTable`]. Only the
//! handle is written into the stream; the host persists the table itself.

// -----------------------------------------------------------------------------
// Modules

mod external_ref;
mod table;

// -----------------------------------------------------------------------------
// Exports

pub use external_ref::{ExternalObject, ExternalRef};
pub use table::{ExternalHandle, ExternalRefTable};
