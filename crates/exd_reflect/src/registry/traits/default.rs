use alloc::boxed::Box;

use crate::Reflect;
use crate::registry::{FromType, TypeTrait};

/// Builds a default instance of a registered type.
///
/// The decoder uses it for nodes in polymorphic slots, where only the
/// type path in the stream says which type to build.
#[derive(Clone)]
pub struct TypeTraitDefault {
    func: fn() -> Box<dyn Reflect>,
}

impl TypeTraitDefault {
    #[inline(always)]
    pub fn default(&self) -> Box<dyn Reflect> {
        (self.func)()
    }
}

impl<T: Default + Reflect> FromType<T> for TypeTraitDefault {
    fn from_type() -> Self {
        Self {
            func: || Box::<T>::default(),
        }
    }
}

impl TypeTrait for TypeTraitDefault {}
