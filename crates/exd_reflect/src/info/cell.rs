//! Static storage for the type paths of generic types.
//!
//! A `static` inside a generic function is shared by every instantiation,
//! so the cell keys its entries by `TypeId`.

use alloc::boxed::Box;
use alloc::string::String;
use core::any::{Any, TypeId};
use std::sync::{PoisonError, RwLock};

use exd_utils::TypeIdMap;

/// Caches one leaked `String` per concrete type.
///
/// # Examples
///
/// ```ignore
/// impl<T: Slot> TypePath for Vec<T> {
///     fn type_path() -> &'static str {
///         static CELL: GenericTypePathCell = GenericTypePathCell::new();
///         CELL.get_or_insert::<Self>(|| format!("alloc::vec::Vec<{}>", T::slot_type_path()))
///     }
/// }
/// ```
pub struct GenericTypePathCell(RwLock<TypeIdMap<&'static str>>);

impl GenericTypePathCell {
    #[inline]
    pub const fn new() -> Self {
        Self(RwLock::new(TypeIdMap::new()))
    }

    #[inline(always)]
    pub fn get_or_insert<G: Any + ?Sized>(&self, f: impl FnOnce() -> String) -> &'static str {
        self.get_or_insert_by_type_id(TypeId::of::<G>(), f)
    }

    #[inline(never)]
    fn get_or_insert_by_type_id(&self, type_id: TypeId, f: impl FnOnce() -> String) -> &'static str {
        let cached = self
            .0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .copied();
        match cached {
            Some(path) => path,
            None => *self
                .0
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .get_or_insert(type_id, || Box::leak(f().into_boxed_str())),
        }
    }
}
