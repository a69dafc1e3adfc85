use alloc::boxed::Box;
use alloc::sync::Arc;
use core::any::Any;
use core::fmt;
use core::hash::{Hash, Hasher};

use crate::Reflect;
use crate::info::TypePath;
use crate::registry::{GetTypeMeta, TypeMeta};
use crate::slot::{Slot, SlotError, SlotHint, take_node};

// -----------------------------------------------------------------------------
// ExternalObject

/// An object whose lifetime is managed by the host.
pub trait ExternalObject: Any + Send + Sync {
    /// Returns `false` once the host has destroyed the object.
    fn is_alive(&self) -> bool;
}

// -----------------------------------------------------------------------------
// ExternalRef

/// A shared reference to an [`ExternalObject`].
///
/// Equality and hashing use the address of the object, never its value:
/// two references are equal only if they point at the same object.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use exd_reflect::external::{ExternalObject, ExternalRef};
///
/// struct Texture { alive: AtomicBool }
///
/// impl ExternalObject for Texture {
///     fn is_alive(&self) -> bool { self.alive.load(Ordering::Relaxed) }
/// }
///
/// let texture = Arc::new(Texture { alive: AtomicBool::new(true) });
/// let a = ExternalRef::new(texture.clone());
/// let b = ExternalRef::new(texture.clone());
/// assert_eq!(a, b);
///
/// texture.alive.store(false, Ordering::Relaxed);
/// assert!(a.is_missing());
/// ```
#[derive(Clone)]
pub struct ExternalRef(Arc<dyn ExternalObject>);

impl ExternalRef {
    #[inline]
    pub fn new<T: ExternalObject>(object: Arc<T>) -> Self {
        Self(object)
    }

    #[inline]
    pub fn from_arc(object: Arc<dyn ExternalObject>) -> Self {
        Self(object)
    }

    #[inline]
    pub(crate) fn addr(&self) -> usize {
        Arc::as_ptr(&self.0).cast::<()>().addr()
    }

    /// Returns `true` if both references point at the same object.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.addr() == other.addr()
    }

    /// Returns `true` if the host has destroyed the object.
    #[inline]
    pub fn is_missing(&self) -> bool {
        !self.0.is_alive()
    }

    #[inline]
    pub fn object(&self) -> &dyn ExternalObject {
        &*self.0
    }

    #[inline]
    pub fn downcast_ref<T: ExternalObject>(&self) -> Option<&T> {
        <dyn Any>::downcast_ref(&*self.0)
    }

    #[inline]
    pub fn as_arc(&self) -> &Arc<dyn ExternalObject> {
        &self.0
    }
}

impl PartialEq for ExternalRef {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for ExternalRef {}

impl Hash for ExternalRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.addr().hash(state);
    }
}

impl fmt::Debug for ExternalRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExternalRef")
            .field("addr", &format_args!("{:#x}", self.addr()))
            .field("missing", &self.is_missing())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Reflection

impl TypePath for ExternalRef {
    #[inline]
    fn type_path() -> &'static str {
        "exd_reflect::external::ExternalRef"
    }

    #[inline]
    fn type_name() -> &'static str {
        "ExternalRef"
    }
}

impl Reflect for ExternalRef {
    crate::__impl_reflect_cast_fn!(External);
}

impl Slot for ExternalRef {
    #[inline]
    fn slot_type_path() -> &'static str {
        Self::type_path()
    }

    #[inline]
    fn slot_hint() -> SlotHint {
        SlotHint::path_only::<Self>()
    }

    #[inline]
    fn as_node(&self) -> Option<&dyn Reflect> {
        Some(self)
    }

    #[inline]
    fn as_node_mut(&mut self) -> Option<&mut dyn Reflect> {
        Some(self)
    }

    fn from_node(node: Option<Box<dyn Reflect>>) -> Result<Self, SlotError> {
        take_node(node)
    }
}

impl GetTypeMeta for ExternalRef {
    fn get_type_meta() -> TypeMeta {
        TypeMeta::of::<Self>()
    }
}
