use alloc::boxed::Box;
use alloc::format;
use core::fmt;
use core::hash::Hash;
use core::ops::{Deref, DerefMut};

use exd_reflect::Reflect;
use exd_reflect::info::{GenericTypePathCell, TypePath};
use exd_reflect::ops::Struct;
use exd_reflect::registry::{FromType, GetTypeMeta, TypeMeta, TypeTraitDefault};
use exd_reflect::slot::{DynSlot, Slot, SlotError, SlotHint, take_node};
use exd_utils::hash::{FixedHashState, HashMap};

use crate::{Bundled, SerializationBundle};

/// A hash map that persists itself through its own [`SerializationBundle`].
///
/// Keys may be any concrete reflected type, [`ExternalRef`] included.
/// Values may be any slot type, including `Option<Box<dyn Reflect>>` for
/// polymorphic values.
///
/// The map is reachable through `Deref`, so every `HashMap` method works
/// directly on the dictionary.
///
/// [`ExternalRef`]: exd_reflect::external::ExternalRef
///
/// # Examples
///
/// ```
/// use exd_bundle::{SDictionary, SerializationCallbacks};
/// use exd_reflect::registry::TypeRegistry;
///
/// let registry = TypeRegistry::new();
/// let mut ages: SDictionary<String, u8> =
///     [("ann".to_owned(), 31), ("bo".to_owned(), 7)].into_iter().collect();
///
/// ages.on_before_serialize(&registry).unwrap();
/// ages.clear();
/// ages.on_after_deserialize(&registry).unwrap();
///
/// assert_eq!(ages.len(), 2);
/// assert_eq!(ages["ann"], 31);
/// ```
pub struct SDictionary<K, V> {
    map: HashMap<K, V>,
    bundle: SerializationBundle,
}

impl<K, V> SDictionary<K, V> {
    #[inline]
    pub fn new() -> Self {
        Self {
            map: HashMap::default(),
            bundle: SerializationBundle::new(),
        }
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            map: HashMap::with_capacity_and_hasher(capacity, FixedHashState),
            bundle: SerializationBundle::new(),
        }
    }

    /// Drops the bundle and returns the map.
    #[inline]
    pub fn into_map(self) -> HashMap<K, V> {
        self.map
    }
}

impl<K, V> Default for SDictionary<K, V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Deref for SDictionary<K, V> {
    type Target = HashMap<K, V>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.map
    }
}

impl<K, V> DerefMut for SDictionary<K, V> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.map
    }
}

impl<K, V> From<HashMap<K, V>> for SDictionary<K, V> {
    #[inline]
    fn from(map: HashMap<K, V>) -> Self {
        Self {
            map,
            bundle: SerializationBundle::new(),
        }
    }
}

impl<K: Eq + Hash, V> FromIterator<(K, V)> for SDictionary<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<HashMap<K, V>>())
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for SDictionary<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.map, f)
    }
}

// -----------------------------------------------------------------------------
// Reflection

impl<K, V> TypePath for SDictionary<K, V>
where
    K: Slot + Eq + Hash,
    V: Slot,
{
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| {
            format!(
                "exd_bundle::SDictionary<{}, {}>",
                K::slot_type_path(),
                V::slot_type_path()
            )
        })
    }
}

impl<K, V> Reflect for SDictionary<K, V>
where
    K: Slot + Eq + Hash,
    V: Slot,
{
    exd_reflect::__impl_reflect_cast_fn!(Struct);
}

impl<K, V> Struct for SDictionary<K, V>
where
    K: Slot + Eq + Hash,
    V: Slot,
{
    #[inline]
    fn field_len(&self) -> usize {
        1
    }

    #[inline]
    fn name_at(&self, index: usize) -> Option<&'static str> {
        (index == 0).then_some("map")
    }

    #[inline]
    fn field_at(&self, index: usize) -> Option<&dyn DynSlot> {
        (index == 0).then_some(&self.map as &dyn DynSlot)
    }

    #[inline]
    fn field_at_mut(&mut self, index: usize) -> Option<&mut dyn DynSlot> {
        (index == 0).then_some(&mut self.map as &mut dyn DynSlot)
    }
}

impl<K, V> Slot for SDictionary<K, V>
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

impl<K, V> GetTypeMeta for SDictionary<K, V>
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

impl<K, V> Bundled for SDictionary<K, V>
where
    K: Slot + Eq + Hash,
    V: Slot,
{
    #[inline]
    fn bundle(&self) -> &SerializationBundle {
        &self.bundle
    }

    #[inline]
    fn bundle_mut(&mut self) -> &mut SerializationBundle {
        &mut self.bundle
    }
}

#[cfg(test)]
mod tests {
    use exd_reflect::Reflect;
    use exd_reflect::info::TypePath;
    use exd_reflect::ops::ReflectRef;
    use exd_reflect::registry::TypeRegistry;

    use super::SDictionary;
    use crate::{Bundled, SerializationCallbacks};

    #[test]
    fn declares_only_the_map() {
        let dict = SDictionary::<String, u32>::new();
        let ReflectRef::Struct(fields) = dict.reflect_ref() else {
            panic!("expected a struct");
        };
        let names: Vec<_> = fields.iter_fields().map(|(name, _)| name).collect();
        assert_eq!(names, ["map"]);
        assert_eq!(
            SDictionary::<String, u32>::type_path(),
            "exd_bundle::SDictionary<alloc::string::String, u32>"
        );
    }

    #[test]
    fn bundle_survives_the_pass() {
        let registry = TypeRegistry::new();
        let mut dict: SDictionary<u8, String> = [(1, "a".to_owned())].into_iter().collect();

        dict.on_before_serialize(&registry).unwrap();
        assert!(dict.bundle().encoded().is_some());

        dict.insert(2, "b".to_owned());
        dict.on_after_deserialize(&registry).unwrap();
        assert_eq!(dict.len(), 1);
        assert_eq!(dict[&1], "a");
        assert!(dict.bundle().encoded().is_some());
    }
}
