//! Static type information: type paths and node kinds.

// -----------------------------------------------------------------------------
// Modules

mod cell;
mod kind;
mod type_path;

// -----------------------------------------------------------------------------
// Exports

pub use cell::GenericTypePathCell;
pub use kind::ReflectKind;
pub use type_path::TypePath;
