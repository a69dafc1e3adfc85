use alloc::vec::Vec;

use exd_utils::hash::HashMap;

use crate::codec::CodecError;
use crate::external::ExternalRef;

// -----------------------------------------------------------------------------
// ExternalHandle

/// An index into one unit's [`ExternalRefTable`], valid for one pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExternalHandle(u32);

impl ExternalHandle {
    #[inline]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    #[inline]
    pub const fn index(self) -> u32 {
        self.0
    }
}

// -----------------------------------------------------------------------------
// ExternalRefTable

/// Maps external references to handles and back.
///
/// Insertion order is handle order. A slot restored by the host may be
/// empty when the host could not resolve the object at all; asking for it
/// is an error, unlike asking for an object that is merely missing.
#[derive(Debug, Default)]
pub struct ExternalRefTable {
    slots: Vec<Option<ExternalRef>>,
    indices: HashMap<ExternalRef, u32>,
}

impl ExternalRefTable {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a table from the slots the host persisted.
    pub fn from_slots(slots: Vec<Option<ExternalRef>>) -> Self {
        let mut indices = HashMap::default();
        for (index, slot) in slots.iter().enumerate() {
            if let Some(reference) = slot {
                indices.entry(reference.clone()).or_insert(index as u32);
            }
        }
        Self { slots, indices }
    }

    /// Returns the handle of `reference`, adding it if this pass has not
    /// seen the same object yet.
    pub fn add(&mut self, reference: &ExternalRef) -> ExternalHandle {
        if let Some(&index) = self.indices.get(reference) {
            return ExternalHandle(index);
        }
        let index = self.slots.len() as u32;
        self.slots.push(Some(reference.clone()));
        self.indices.insert(reference.clone(), index);
        ExternalHandle(index)
    }

    /// Returns the reference behind `handle`.
    ///
    /// The reference may be missing; that is not an error here.
    pub fn get(&self, handle: ExternalHandle) -> Result<&ExternalRef, CodecError> {
        match self.slots.get(handle.0 as usize) {
            Some(Some(reference)) => Ok(reference),
            Some(None) => Err(CodecError::UnresolvedExternal { index: handle.0 }),
            None => Err(CodecError::IndexOutOfRange {
                index: handle.0,
                len: self.slots.len(),
            }),
        }
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.indices.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The slots in handle order, as the host should persist them.
    #[inline]
    pub fn as_slice(&self) -> &[Option<ExternalRef>] {
        &self.slots
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = Option<&ExternalRef>> {
        self.slots.iter().map(Option::as_ref)
    }
}
