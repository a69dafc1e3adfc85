use alloc::boxed::Box;

use crate::Reflect;
use crate::codec::{CodecError, DecodeContext, EncodeContext, Primitive};
use crate::external::{ExternalHandle, ExternalRef};
use crate::info::TypePath;

// -----------------------------------------------------------------------------
// Surrogate

/// A registered strategy that encodes a type instead of its structure.
///
/// Registered per type with
/// [`TypeRegistry::register_surrogate`](crate::registry::TypeRegistry::register_surrogate).
/// Surrogates are shared by every thread, so all per-pass state lives in
/// the context they receive.
pub trait Surrogate: Send + Sync + 'static {
    fn encode(&self, value: &dyn Reflect, cx: &mut EncodeContext<'_>) -> Result<Primitive, CodecError>;

    fn decode(&self, value: Primitive, cx: &DecodeContext<'_>) -> Result<Box<dyn Reflect>, CodecError>;
}

// -----------------------------------------------------------------------------
// ReferenceSubstitutionPolicy

/// Writes an [`ExternalRef`] as its handle in the unit's table.
///
/// The object behind the reference is never encoded. On decode the handle
/// is looked up again; a reference the host has destroyed in the meantime
/// is returned as it is and left for the caller to flag.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceSubstitutionPolicy;

impl Surrogate for ReferenceSubstitutionPolicy {
    fn encode(&self, value: &dyn Reflect, cx: &mut EncodeContext<'_>) -> Result<Primitive, CodecError> {
        let reference = value
            .downcast_ref::<ExternalRef>()
            .ok_or(CodecError::Unsupported {
                type_path: value.reflect_type_path(),
            })?;
        let handle = cx.register_external(reference);
        Ok(Primitive::UInt(u64::from(handle.index())))
    }

    fn decode(&self, value: Primitive, cx: &DecodeContext<'_>) -> Result<Box<dyn Reflect>, CodecError> {
        let Primitive::UInt(raw) = value else {
            return Err(CodecError::corrupt(format_args!(
                "expected an external handle, found {}",
                value.kind_name()
            )));
        };
        let index = u32::try_from(raw)
            .map_err(|_| CodecError::corrupt(format_args!("external handle {raw} is out of range")))?;

        let reference = cx.resolve_external(ExternalHandle::new(index))?;
        if reference.is_missing() {
            log::debug!(
                "decoded `{}` #{index} points at a destroyed object",
                ExternalRef::type_name()
            );
        }
        Ok(Box::new(reference))
    }
}
