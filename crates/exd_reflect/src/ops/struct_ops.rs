use crate::Reflect;
use crate::slot::DynSlot;

/// A composite with a declared, ordered list of fields.
///
/// The declared list is the contract used by both the codec and
/// [`swap_apply`](crate::apply::swap_apply): fields are encoded in this
/// order and exchanged in this order. Anything left out of it (such as a
/// container's serialization bundle) is neither encoded nor exchanged.
///
/// Implemented by [`impl_reflect_struct!`](crate::impl_reflect_struct).
pub trait Struct: Reflect {
    fn field_len(&self) -> usize;

    /// Returns the name of the field at `index`.
    fn name_at(&self, index: usize) -> Option<&'static str>;

    fn field_at(&self, index: usize) -> Option<&dyn DynSlot>;

    fn field_at_mut(&mut self, index: usize) -> Option<&mut dyn DynSlot>;

    fn index_of(&self, name: &str) -> Option<usize> {
        (0..self.field_len()).find(|&index| self.name_at(index) == Some(name))
    }
}

impl dyn Struct {
    pub fn field(&self, name: &str) -> Option<&dyn DynSlot> {
        self.field_at(self.index_of(name)?)
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut dyn DynSlot> {
        self.field_at_mut(self.index_of(name)?)
    }

    /// Iterates `(name, slot)` pairs in declaration order.
    #[inline]
    pub fn iter_fields(&self) -> StructFieldIter<'_> {
        StructFieldIter {
            target: self,
            index: 0,
        }
    }
}

/// An iterator over the fields of a [`Struct`], see [`iter_fields`](<dyn Struct>::iter_fields).
pub struct StructFieldIter<'a> {
    target: &'a dyn Struct,
    index: usize,
}

impl<'a> Iterator for StructFieldIter<'a> {
    type Item = (&'static str, &'a dyn DynSlot);

    fn next(&mut self) -> Option<Self::Item> {
        let name = self.target.name_at(self.index)?;
        let slot = self.target.field_at(self.index)?;
        self.index += 1;
        Some((name, slot))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.target.field_len().saturating_sub(self.index);
        (len, Some(len))
    }
}

impl ExactSizeIterator for StructFieldIter<'_> {}
