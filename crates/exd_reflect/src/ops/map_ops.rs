use alloc::boxed::Box;

use crate::Reflect;
use crate::slot::{DynSlot, SlotError, SlotHint};

/// A key/value container.
///
/// Iteration order must only depend on the contents and their insertion
/// history, never on memory layout, so that encoding an unchanged map twice
/// yields the same bytes.
pub trait Map: Reflect {
    fn len(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn iter(&self) -> Box<dyn Iterator<Item = (&dyn DynSlot, &dyn DynSlot)> + '_>;

    fn key_hint(&self) -> SlotHint;

    fn value_hint(&self) -> SlotHint;

    fn clear(&mut self);

    /// Inserts a decoded entry.
    ///
    /// Fails with [`SlotError::DuplicateKey`] if an equal key is present.
    fn insert_node(
        &mut self,
        key: Option<Box<dyn Reflect>>,
        value: Option<Box<dyn Reflect>>,
    ) -> Result<(), SlotError>;
}
