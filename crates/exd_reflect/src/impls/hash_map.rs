use alloc::boxed::Box;
use alloc::format;
use core::hash::Hash;

use exd_utils::hash::{FixedHashState, HashMap};
use exd_utils::hash::hashbrown::hash_map::Entry;

use crate::Reflect;
use crate::info::{GenericTypePathCell, TypePath};
use crate::ops::Map;
use crate::registry::{FromType, GetTypeMeta, TypeMeta, TypeTraitDefault};
use crate::slot::{DynSlot, Slot, SlotError, SlotHint, take_node};

// Only the fixed hash state is reflected, so a map type has one type path.
// The codec sorts entries itself and never relies on iteration order.

impl<K, V> TypePath for HashMap<K, V, FixedHashState>
where
    K: Slot + Eq + Hash,
    V: Slot,
{
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| {
            format!(
                "exd_utils::hash::HashMap<{}, {}>",
                K::slot_type_path(),
                V::slot_type_path()
            )
        })
    }
}

impl<K, V> Reflect for HashMap<K, V, FixedHashState>
where
    K: Slot + Eq + Hash,
    V: Slot,
{
    crate::__impl_reflect_cast_fn!(Map);
}

impl<K, V> Map for HashMap<K, V, FixedHashState>
where
    K: Slot + Eq + Hash,
    V: Slot,
{
    #[inline]
    fn len(&self) -> usize {
        Self::len(self)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = (&dyn DynSlot, &dyn DynSlot)> + '_> {
        Box::new(Self::iter(self).map(|(k, v)| (k as &dyn DynSlot, v as &dyn DynSlot)))
    }

    #[inline]
    fn key_hint(&self) -> SlotHint {
        K::slot_hint()
    }

    #[inline]
    fn value_hint(&self) -> SlotHint {
        V::slot_hint()
    }

    #[inline]
    fn clear(&mut self) {
        Self::clear(self);
    }

    fn insert_node(
        &mut self,
        key: Option<Box<dyn Reflect>>,
        value: Option<Box<dyn Reflect>>,
    ) -> Result<(), SlotError> {
        let key = K::from_node(key)?;
        let value = V::from_node(value)?;
        match self.entry(key) {
            Entry::Occupied(_) => Err(SlotError::DuplicateKey {
                map: Self::type_path(),
            }),
            Entry::Vacant(entry) => {
                entry.insert(value);
                Ok(())
            }
        }
    }
}

impl<K, V> Slot for HashMap<K, V, FixedHashState>
where
    K: Slot + Eq + Hash,
    V: Slot,
{
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

impl<K, V> GetTypeMeta for HashMap<K, V, FixedHashState>
where
    K: Slot + Eq + Hash,
    V: Slot,
{
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

    use exd_utils::hash::HashMap;

    use crate::info::TypePath;
    use crate::ops::Map;
    use crate::slot::SlotError;

    #[test]
    fn type_path_names_both_parameters() {
        assert_eq!(
            HashMap::<String, u32>::type_path(),
            "exd_utils::hash::HashMap<alloc::string::String, u32>"
        );
    }

    #[test]
    fn insert_node_rejects_duplicates() {
        let mut map = HashMap::<String, u32>::default();
        map.insert_node(Some(Box::new(String::from("a"))), Some(Box::new(1_u32)))
            .unwrap();

        let err = map
            .insert_node(Some(Box::new(String::from("a"))), Some(Box::new(2_u32)))
            .unwrap_err();
        assert!(matches!(err, SlotError::DuplicateKey { .. }));
        assert_eq!(map["a"], 1);

        let err = map.insert_node(None, Some(Box::new(3_u32))).unwrap_err();
        assert!(matches!(err, SlotError::Null { .. }));
    }
}
