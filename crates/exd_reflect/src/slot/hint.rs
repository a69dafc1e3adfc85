use alloc::boxed::Box;

use crate::Reflect;
use crate::info::TypePath;

/// What a slot knows statically about the nodes it holds.
///
/// When a decoded node's tag equals the hinted type path, the decoder builds
/// the node from the hint instead of looking it up in the registry, so
/// concrete field types do not need to be registered. Polymorphic slots
/// carry no hint.
#[derive(Debug, Clone, Copy)]
pub struct SlotHint {
    type_path: Option<&'static str>,
    fresh: Option<fn() -> Box<dyn Reflect>>,
}

fn fresh<T: Reflect + Default>() -> Box<dyn Reflect> {
    Box::<T>::default()
}

impl SlotHint {
    /// The hint of a polymorphic slot.
    pub const DYNAMIC: Self = Self {
        type_path: None,
        fresh: None,
    };

    /// A slot holding `T`, which can be default-constructed.
    pub fn of<T: Reflect + TypePath + Default>() -> Self {
        Self {
            type_path: Some(T::type_path()),
            fresh: Some(fresh::<T> as fn() -> Box<dyn Reflect>),
        }
    }

    /// A slot holding `T`, which is only ever produced by a surrogate.
    pub fn path_only<T: TypePath>() -> Self {
        Self {
            type_path: Some(T::type_path()),
            fresh: None,
        }
    }

    #[inline]
    pub fn type_path(&self) -> Option<&'static str> {
        self.type_path
    }

    /// Returns a default instance if `type_path` is the hinted type.
    pub fn fresh_for(&self, type_path: &str) -> Option<Box<dyn Reflect>> {
        match (self.type_path, self.fresh) {
            (Some(hinted), Some(fresh)) if hinted == type_path => Some(fresh()),
            _ => None,
        }
    }
}
