use alloc::boxed::Box;
use alloc::format;
use alloc::vec::Vec;

use crate::Reflect;
use crate::info::{GenericTypePathCell, TypePath};
use crate::ops::List;
use crate::registry::{FromType, GetTypeMeta, TypeMeta, TypeTraitDefault};
use crate::slot::{DynSlot, Slot, SlotError, SlotHint, take_node};

impl<T: Slot> TypePath for Vec<T> {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| format!("alloc::vec::Vec<{}>", T::slot_type_path()))
    }
}

impl<T: Slot> Reflect for Vec<T> {
    crate::__impl_reflect_cast_fn!(List);
}

impl<T: Slot> List for Vec<T> {
    #[inline]
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    #[inline]
    fn get(&self, index: usize) -> Option<&dyn DynSlot> {
        <[T]>::get(self, index).map(|item| item as &dyn DynSlot)
    }

    #[inline]
    fn element_hint(&self) -> SlotHint {
        T::slot_hint()
    }

    #[inline]
    fn clear(&mut self) {
        Vec::clear(self);
    }

    fn push_node(&mut self, node: Option<Box<dyn Reflect>>) -> Result<(), SlotError> {
        self.push(T::from_node(node)?);
        Ok(())
    }
}

impl<T: Slot> Slot for Vec<T> {
    #[inline]
    fn slot_type_path() -> &'static str {
        Self::type_path()
    }

    #[inline]
    fn slot_hint() -> SlotHint {
        SlotHint::of::<Self>()
    }

    #[inline]
    fn as_node(&self) -> Option<&dyn Reflect> {
        Some(self)
    }

    #[inline]
    fn as_node_mut(&mut self) -> Option<&mut dyn Reflect> {
        Some(self)
    }

    fn from_node(node: Option<Box<dyn Reflect>>) -> Result<Self, SlotError> {
        take_node(node)
    }
}

impl<T: Slot> GetTypeMeta for Vec<T> {
    fn get_type_meta() -> TypeMeta {
        let mut meta = TypeMeta::of::<Self>();
        meta.insert_trait(<TypeTraitDefault as FromType<Self>>::from_type());
        meta
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    use crate::Reflect;
    use crate::info::TypePath;
    use crate::ops::{List, ReflectRef};
    use crate::slot::DynSlot;

    #[test]
    fn nested_paths() {
        assert_eq!(
            Vec::<Vec<String>>::type_path(),
            "alloc::vec::Vec<alloc::vec::Vec<alloc::string::String>>"
        );
        assert_eq!(
            Vec::<Option<u8>>::type_path(),
            "alloc::vec::Vec<core::option::Option<u8>>"
        );
    }

    #[test]
    fn list_view() {
        let mut items: Vec<Option<u8>> = vec![Some(1), None];
        let ReflectRef::List(list) = items.reflect_ref() else {
            panic!("expected a list");
        };
        let nodes: Vec<_> = list.iter().map(|slot| slot.node().is_some()).collect();
        assert_eq!(nodes, [true, false]);

        items.push_node(None).unwrap();
        items.push_node(Some(Box::new(9_u8))).unwrap();
        assert_eq!(items, [Some(1), None, None, Some(9)]);
        assert!(items.push_node(Some(Box::new(9_u16))).is_err());
    }
}
