use alloc::string::String;
use core::any::TypeId;

use exd_utils::TypeIdMap;
use exd_utils::hash::HashMap;

use crate::codec::{ReferenceSubstitutionPolicy, Surrogate};
use crate::external::ExternalRef;
use crate::registry::{FromType, GetTypeMeta, TypeMeta, TypeTrait, TypeTraitSurrogate};

// -----------------------------------------------------------------------------
// TypeRegistry

/// A table of [`TypeMeta`]s, indexed by `TypeId` and by type path.
///
/// Populate it once, then share it read-only with every encode and decode.
///
/// # Examples
///
/// ```
/// use exd_reflect::registry::TypeRegistry;
///
/// #[derive(Default)]
/// struct Marker { id: u32 }
/// exd_reflect::impl_reflect_struct!(Marker as "demo::Marker" { id });
///
/// let mut registry = TypeRegistry::new();
/// registry.register::<Marker>();
///
/// let meta = registry.get_with_type_path("demo::Marker").unwrap();
/// assert_eq!(meta.type_name(), "Marker");
/// assert!(meta.default_value().is_some());
/// ```
pub struct TypeRegistry {
    type_meta_table: TypeIdMap<TypeMeta>,
    type_path_to_id: HashMap<&'static str, TypeId>,
}

impl Default for TypeRegistry {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// Creates a registry without any type.
    pub fn empty() -> Self {
        Self {
            type_meta_table: TypeIdMap::new(),
            type_path_to_id: HashMap::default(),
        }
    }

    /// Creates a registry with the primitive types, `String` and
    /// [`ExternalRef`] (with [`ReferenceSubstitutionPolicy`] as its
    /// surrogate).
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register::<bool>();
        registry.register::<char>();
        registry.register::<u8>();
        registry.register::<u16>();
        registry.register::<u32>();
        registry.register::<u64>();
        registry.register::<usize>();
        registry.register::<i8>();
        registry.register::<i16>();
        registry.register::<i32>();
        registry.register::<i64>();
        registry.register::<isize>();
        registry.register::<f32>();
        registry.register::<f64>();
        registry.register::<String>();
        registry.register_surrogate::<ExternalRef>(ReferenceSubstitutionPolicy);
        registry
    }

    /// Adds `type_meta` unless its type is already present.
    ///
    /// Returns `true` if it was added.
    pub fn try_insert_type_meta(&mut self, type_meta: TypeMeta) -> bool {
        let type_path_to_id = &mut self.type_path_to_id;
        self.type_meta_table.try_insert(type_meta.type_id(), || {
            type_path_to_id.insert(type_meta.type_path(), type_meta.type_id());
            type_meta
        })
    }

    /// Registers `T`. Registering a type twice keeps the first entry.
    pub fn register<T: GetTypeMeta>(&mut self) {
        if !self.contains(TypeId::of::<T>()) {
            self.try_insert_type_meta(T::get_type_meta());
        }
    }

    /// Adds a type trait built from `T` to an already registered `T`.
    ///
    /// # Panics
    ///
    /// Panics if `T` has not been registered.
    pub fn register_type_trait<T: GetTypeMeta, D: TypeTrait + FromType<T>>(&mut self) {
        match self.type_meta_table.get_mut(&TypeId::of::<T>()) {
            Some(type_meta) => type_meta.insert_trait(D::from_type()),
            None => panic!(
                "called `TypeRegistry::register_type_trait` for unregistered type `{}`",
                T::type_path(),
            ),
        }
    }

    /// Registers `T` if needed and makes `surrogate` encode and decode it.
    pub fn register_surrogate<T: GetTypeMeta>(&mut self, surrogate: impl Surrogate) {
        self.register::<T>();
        if let Some(type_meta) = self.type_meta_table.get_mut(&TypeId::of::<T>()) {
            type_meta.insert_trait(TypeTraitSurrogate::new(surrogate));
        }
    }

    /// Registers every type declared with [`auto_register!`](crate::auto_register).
    ///
    /// Returns `false` if the `auto_register` feature is disabled.
    pub fn auto_register(&mut self) -> bool {
        #[cfg(feature = "auto_register")]
        {
            crate::__macro_exports::auto_register::register_types(self);
            true
        }
        #[cfg(not(feature = "auto_register"))]
        {
            false
        }
    }

    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.type_meta_table.contains(&type_id)
    }

    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<&TypeMeta> {
        self.type_meta_table.get(&type_id)
    }

    #[inline]
    pub fn get_mut(&mut self, type_id: TypeId) -> Option<&mut TypeMeta> {
        self.type_meta_table.get_mut(&type_id)
    }

    pub fn get_with_type_path(&self, type_path: &str) -> Option<&TypeMeta> {
        match self.type_path_to_id.get(type_path) {
            Some(id) => self.get(*id),
            None => None,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.type_meta_table.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.type_meta_table.is_empty()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &TypeMeta> {
        self.type_meta_table.values()
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use core::any::TypeId;

    use super::TypeRegistry;
    use crate::external::ExternalRef;
    use crate::info::TypePath;
    use crate::registry::{TypeTraitDefault, TypeTraitSurrogate};

    #[derive(Default)]
    struct Point {
        x: i32,
        y: i32,
    }

    crate::impl_reflect_struct!(Point as "tests::Point" { x, y });

    #[test]
    fn new_registers_primitives() {
        let registry = TypeRegistry::new();
        assert!(registry.contains(TypeId::of::<i32>()));
        assert!(registry.contains(TypeId::of::<String>()));
        assert!(registry.get_with_type_path("alloc::string::String").is_some());
        assert!(TypeRegistry::empty().is_empty());
    }

    #[test]
    fn external_ref_has_surrogate() {
        let registry = TypeRegistry::new();
        let meta = registry
            .get_with_type_path(ExternalRef::type_path())
            .unwrap();
        assert!(meta.has_trait::<TypeTraitSurrogate>());
        assert!(meta.default_value().is_none());
    }

    #[test]
    fn register_is_idempotent() {
        let mut registry = TypeRegistry::empty();
        registry.register::<Point>();
        registry.register::<Point>();
        assert_eq!(registry.len(), 1);

        let meta = registry.get(TypeId::of::<Point>()).unwrap();
        assert_eq!(meta.type_path(), "tests::Point");
        assert!(meta.has_trait::<TypeTraitDefault>());

        let value = meta.default_value().unwrap();
        assert!(value.is::<Point>());
    }

    #[test]
    #[should_panic]
    fn type_trait_needs_registration() {
        let mut registry = TypeRegistry::empty();
        registry.register_type_trait::<Point, TypeTraitDefault>();
    }
}
