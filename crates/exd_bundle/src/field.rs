use alloc::boxed::Box;
use alloc::format;
use core::fmt;
use core::mem;

use exd_reflect::Reflect;
use exd_reflect::info::{GenericTypePathCell, TypePath};
use exd_reflect::ops::Struct;
use exd_reflect::registry::{FromType, GetTypeMeta, TypeMeta, TypeTraitDefault};
use exd_reflect::slot::{DynSlot, Slot, SlotError, SlotHint, take_node};

use crate::{Bundled, SerializationBundle};

/// A single value that persists itself through its own
/// [`SerializationBundle`].
///
/// Usually `T` is `Option<Box<dyn Reflect>>`, which lets a host that only
/// stores plain data keep a polymorphic value. Conversions are explicit:
/// [`wrap`](Self::wrap) and [`unwrap`](Self::unwrap).
pub struct SField<T> {
    reference: T,
    bundle: SerializationBundle,
}

impl<T> SField<T> {
    #[inline]
    pub fn wrap(reference: T) -> Self {
        Self {
            reference,
            bundle: SerializationBundle::new(),
        }
    }

    #[inline]
    pub fn unwrap(self) -> T {
        self.reference
    }

    #[inline]
    pub fn get(&self) -> &T {
        &self.reference
    }

    #[inline]
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.reference
    }

    /// Replaces the value, returning the old one.
    #[inline]
    pub fn set(&mut self, reference: T) -> T {
        mem::replace(&mut self.reference, reference)
    }
}

impl<T: Default> Default for SField<T> {
    #[inline]
    fn default() -> Self {
        Self::wrap(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for SField<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SField").field(&self.reference).finish()
    }
}

// -----------------------------------------------------------------------------
// Reflection

impl<T: Slot + Default> TypePath for SField<T> {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| format!("exd_bundle::SField<{}>", T::slot_type_path()))
    }
}

impl<T: Slot + Default> Reflect for SField<T> {
    exd_reflect::__impl_reflect_cast_fn!(Struct);
}

impl<T: Slot + Default> Struct for SField<T> {
    #[inline]
    fn field_len(&self) -> usize {
        1
    }

    #[inline]
    fn name_at(&self, index: usize) -> Option<&'static str> {
        (index == 0).then_some("reference")
    }

    #[inline]
    fn field_at(&self, index: usize) -> Option<&dyn DynSlot> {
        (index == 0).then_some(&self.reference as &dyn DynSlot)
    }

    #[inline]
    fn field_at_mut(&mut self, index: usize) -> Option<&mut dyn DynSlot> {
        (index == 0).then_some(&mut self.reference as &mut dyn DynSlot)
    }
}

impl<T: Slot + Default> Slot for SField<T> {
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

impl<T: Slot + Default> GetTypeMeta for SField<T> {
    fn get_type_meta() -> TypeMeta {
        let mut meta = TypeMeta::of::<Self>();
        meta.insert_trait(<TypeTraitDefault as FromType<Self>>::from_type());
        meta
    }
}

impl<T: Slot + Default> Bundled for SField<T> {
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
    use exd_reflect::registry::TypeRegistry;

    use super::SField;
    use crate::SerializationCallbacks;

    #[derive(Default, Debug, PartialEq)]
    struct Sword {
        damage: u16,
    }

    exd_reflect::impl_reflect_struct!(Sword as "tests::Sword" { damage });

    #[test]
    fn explicit_accessors() {
        let mut field = SField::wrap(3_u8);
        assert_eq!(*field.get(), 3);
        *field.get_mut() += 1;
        assert_eq!(field.set(9), 4);
        assert_eq!(field.unwrap(), 9);
    }

    #[test]
    fn polymorphic_value_roundtrip() {
        let mut registry = TypeRegistry::new();
        registry.register::<Sword>();

        let mut field: SField<Option<Box<dyn Reflect>>> =
            SField::wrap(Some(Box::new(Sword { damage: 12 }) as Box<dyn Reflect>));
        field.on_before_serialize(&registry).unwrap();

        field.set(None);
        let report = field.on_after_deserialize(&registry).unwrap();
        assert!(report.is_clean());

        let sword = field.get().as_deref().and_then(|v| v.downcast_ref::<Sword>());
        assert_eq!(sword, Some(&Sword { damage: 12 }));
    }
}
