use alloc::boxed::Box;
use core::any::Any;
use core::mem;

use crate::Reflect;
use crate::apply::ApplyError;
use crate::info::TypePath;
use crate::slot::{SlotError, SlotHint};

// -----------------------------------------------------------------------------
// Slot

/// A statically typed position that holds at most one node.
pub trait Slot: Sized + Send + Sync + 'static {
    /// A stable name for the slot type, used in generic type paths.
    fn slot_type_path() -> &'static str;

    fn slot_hint() -> SlotHint;

    /// Returns the held node, or `None` if the slot is empty.
    fn as_node(&self) -> Option<&dyn Reflect>;

    fn as_node_mut(&mut self) -> Option<&mut dyn Reflect>;

    /// Builds a slot value from a decoded node.
    fn from_node(node: Option<Box<dyn Reflect>>) -> Result<Self, SlotError>;
}

/// Moves a decoded node into a `T`, failing on null or on another type.
pub fn take_node<T: Reflect + TypePath>(node: Option<Box<dyn Reflect>>) -> Result<T, SlotError> {
    let node = node.ok_or(SlotError::Null {
        slot: T::type_path(),
    })?;
    node.take::<T>().map_err(|node| SlotError::Mismatch {
        slot: T::type_path(),
        found: node.reflect_type_path(),
    })
}

// -----------------------------------------------------------------------------
// DynSlot

/// The object-safe side of [`Slot`], implemented for every `Slot`.
pub trait DynSlot: Send + Sync + Any {
    fn slot_type_name(&self) -> &'static str;

    fn hint(&self) -> SlotHint;

    fn node(&self) -> Option<&dyn Reflect>;

    fn node_mut(&mut self) -> Option<&mut dyn Reflect>;

    /// Replaces the slot's content with a decoded node.
    fn set_node(&mut self, node: Option<Box<dyn Reflect>>) -> Result<(), SlotError>;

    /// Exchanges the contents of two slots of the same type.
    fn swap_slot(&mut self, other: &mut dyn DynSlot) -> Result<(), ApplyError>;
}

impl<T: Slot> DynSlot for T {
    #[inline]
    fn slot_type_name(&self) -> &'static str {
        T::slot_type_path()
    }

    #[inline]
    fn hint(&self) -> SlotHint {
        T::slot_hint()
    }

    #[inline]
    fn node(&self) -> Option<&dyn Reflect> {
        self.as_node()
    }

    #[inline]
    fn node_mut(&mut self) -> Option<&mut dyn Reflect> {
        self.as_node_mut()
    }

    fn set_node(&mut self, node: Option<Box<dyn Reflect>>) -> Result<(), SlotError> {
        *self = T::from_node(node)?;
        Ok(())
    }

    fn swap_slot(&mut self, other: &mut dyn DynSlot) -> Result<(), ApplyError> {
        let replica = other.slot_type_name();
        match <dyn Any>::downcast_mut::<T>(other) {
            Some(other) => {
                mem::swap(self, other);
                Ok(())
            }
            None => Err(ApplyError::TypeMismatch {
                live: T::slot_type_path(),
                replica,
            }),
        }
    }
}

impl dyn DynSlot {
    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        <dyn Any>::downcast_ref(self)
    }

    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        <dyn Any>::downcast_mut(self)
    }
}
