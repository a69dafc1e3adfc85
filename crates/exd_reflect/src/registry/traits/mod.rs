// -----------------------------------------------------------------------------
// Modules

mod default;
mod surrogate;

// -----------------------------------------------------------------------------
// Exports

pub use default::TypeTraitDefault;
pub use surrogate::TypeTraitSurrogate;
