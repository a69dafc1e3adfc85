use core::any::Any;

/// A capability of a registered type, stored in its [`TypeMeta`](crate::registry::TypeMeta).
pub trait TypeTrait: Any + Send + Sync {}

impl dyn TypeTrait {
    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        <dyn Any>::downcast_ref(self)
    }

    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        <dyn Any>::downcast_mut(self)
    }
}
