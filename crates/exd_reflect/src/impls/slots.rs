use alloc::boxed::Box;
use alloc::format;

use crate::Reflect;
use crate::info::GenericTypePathCell;
use crate::slot::{Slot, SlotError, SlotHint};

// -----------------------------------------------------------------------------
// Option

/// A nullable slot. `None` is written as a null node.
impl<T: Slot> Slot for Option<T> {
    fn slot_type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| format!("core::option::Option<{}>", T::slot_type_path()))
    }

    #[inline]
    fn slot_hint() -> SlotHint {
        T::slot_hint()
    }

    #[inline]
    fn as_node(&self) -> Option<&dyn Reflect> {
        self.as_ref().and_then(T::as_node)
    }

    #[inline]
    fn as_node_mut(&mut self) -> Option<&mut dyn Reflect> {
        self.as_mut().and_then(T::as_node_mut)
    }

    fn from_node(node: Option<Box<dyn Reflect>>) -> Result<Self, SlotError> {
        match node {
            None => Ok(None),
            node => T::from_node(node).map(Some),
        }
    }
}

// -----------------------------------------------------------------------------
// Box<dyn Reflect>

/// A polymorphic slot: it holds a node of any registered type.
impl Slot for Box<dyn Reflect> {
    #[inline]
    fn slot_type_path() -> &'static str {
        "alloc::boxed::Box<dyn exd_reflect::Reflect>"
    }

    #[inline]
    fn slot_hint() -> SlotHint {
        SlotHint::DYNAMIC
    }

    #[inline]
    fn as_node(&self) -> Option<&dyn Reflect> {
        Some(&**self)
    }

    #[inline]
    fn as_node_mut(&mut self) -> Option<&mut dyn Reflect> {
        Some(&mut **self)
    }

    fn from_node(node: Option<Box<dyn Reflect>>) -> Result<Self, SlotError> {
        node.ok_or(SlotError::Null {
            slot: Self::slot_type_path(),
        })
    }
}
