use alloc::boxed::Box;
use core::any::{Any, TypeId};
use core::fmt;

use crate::apply::ApplyError;
use crate::info::ReflectKind;
use crate::ops::{ReflectMut, ReflectRef};

// -----------------------------------------------------------------------------
// Reflect

/// A value that the graph codec can walk.
///
/// Every reflected value reports its runtime type path, which is written as
/// the node's tag, and exposes itself as one of the kinds in [`ReflectRef`].
///
/// Implement it with [`impl_reflect_struct!`](crate::impl_reflect_struct)
/// for composites and [`impl_reflect_opaque!`](crate::impl_reflect_opaque)
/// for serde-backed leaves. Primitives, `String`, `Vec<T>`, the fixed-seed
/// `HashMap<K, V>` and [`ExternalRef`](crate::external::ExternalRef) are
/// implemented by this crate.
pub trait Reflect: Send + Sync + Any {
    /// Returns the type path of the concrete type behind this value.
    fn reflect_type_path(&self) -> &'static str;

    /// Returns the [`TypeId`] of the concrete type.
    ///
    /// Calling `type_id` on a `Box<dyn Reflect>` returns the id of the box,
    /// this method always dispatches to the value.
    #[inline]
    fn ty_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn reflect_kind(&self) -> ReflectKind;

    fn reflect_ref(&self) -> ReflectRef<'_>;

    fn reflect_mut(&mut self) -> ReflectMut<'_>;

    /// Exchanges the whole value with `other`.
    ///
    /// Fails with [`ApplyError::TypeMismatch`] if `other` is a different type.
    fn reflect_swap(&mut self, other: &mut dyn Reflect) -> Result<(), ApplyError>;
}

impl dyn Reflect {
    #[inline(always)]
    pub fn is<T: Any>(&self) -> bool {
        self.ty_id() == TypeId::of::<T>()
    }

    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        <dyn Any>::downcast_ref(self)
    }

    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        <dyn Any>::downcast_mut(self)
    }

    /// Moves the value out of the box if it is a `T`, or gives the box back.
    pub fn take<T: Any>(self: Box<dyn Reflect>) -> Result<T, Box<dyn Reflect>> {
        if !self.is::<T>() {
            return Err(self);
        }
        match <Box<dyn Any>>::downcast::<T>(self) {
            Ok(value) => Ok(*value),
            Err(_) => unreachable!("type checked above"),
        }
    }
}

impl fmt::Debug for dyn Reflect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dyn Reflect({})", self.reflect_type_path())
    }
}
