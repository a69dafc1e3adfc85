use alloc::boxed::Box;

use crate::Reflect;
use crate::slot::{DynSlot, SlotError, SlotHint};

/// An ordered sequence of elements.
pub trait List: Reflect {
    fn len(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get(&self, index: usize) -> Option<&dyn DynSlot>;

    /// Describes the element slot, used to build decoded elements.
    fn element_hint(&self) -> SlotHint;

    fn clear(&mut self);

    /// Appends a decoded node, converting it into the element type.
    fn push_node(&mut self, node: Option<Box<dyn Reflect>>) -> Result<(), SlotError>;
}

impl dyn List {
    #[inline]
    pub fn iter(&self) -> ListItemIter<'_> {
        ListItemIter {
            target: self,
            index: 0,
        }
    }
}

/// An iterator over the elements of a [`List`].
pub struct ListItemIter<'a> {
    target: &'a dyn List,
    index: usize,
}

impl<'a> Iterator for ListItemIter<'a> {
    type Item = &'a dyn DynSlot;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.target.get(self.index)?;
        self.index += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.target.len().saturating_sub(self.index);
        (len, Some(len))
    }
}

impl ExactSizeIterator for ListItemIter<'_> {}
