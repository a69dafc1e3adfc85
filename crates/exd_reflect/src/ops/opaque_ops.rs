use crate::Reflect;
use crate::codec::{CodecError, Primitive};

/// A leaf value, encoded as a single [`Primitive`].
pub trait Opaque: Reflect {
    fn to_primitive(&self) -> Result<Primitive, CodecError>;

    /// Overwrites `self` with a decoded primitive.
    ///
    /// Fails if the primitive has the wrong variant or does not fit.
    fn apply_primitive(&mut self, value: Primitive) -> Result<(), CodecError>;
}
