use alloc::boxed::Box;
use core::any::{Any, TypeId};
use core::ops::Deref;

use exd_utils::TypeIdMap;

use crate::Reflect;
use crate::codec::Surrogate;
use crate::info::TypePath;
use crate::registry::{TypeTrait, TypeTraitDefault, TypeTraitSurrogate};

// -----------------------------------------------------------------------------
// TypeMeta

/// Registration data of one type: its identity and its [`TypeTrait`] table.
pub struct TypeMeta {
    type_id: TypeId,
    type_path: &'static str,
    type_name: &'static str,
    trait_table: TypeIdMap<Box<dyn TypeTrait>>,
}

impl TypeMeta {
    #[inline]
    pub fn of<T: TypePath + Any>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_path: T::type_path(),
            type_name: T::type_name(),
            trait_table: TypeIdMap::new(),
        }
    }

    #[inline(always)]
    pub const fn type_id(&self) -> TypeId {
        self.type_id
    }

    #[inline(always)]
    pub const fn type_path(&self) -> &'static str {
        self.type_path
    }

    #[inline(always)]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    #[inline(always)]
    pub fn insert_trait<T: TypeTrait>(&mut self, data: T) {
        self.trait_table.insert_type::<T>(Box::new(data));
    }

    #[inline]
    pub fn get_trait<T: TypeTrait>(&self) -> Option<&T> {
        self.trait_table
            .get_type::<T>()
            .map(Deref::deref)
            .and_then(<dyn TypeTrait>::downcast_ref)
    }

    #[inline]
    pub fn has_trait<T: TypeTrait>(&self) -> bool {
        self.trait_table.contains_type::<T>()
    }

    #[inline]
    pub fn trait_len(&self) -> usize {
        self.trait_table.len()
    }

    /// Builds a default instance, if the type registered one.
    pub fn default_value(&self) -> Option<Box<dyn Reflect>> {
        self.get_trait::<TypeTraitDefault>()
            .map(TypeTraitDefault::default)
    }

    pub fn surrogate(&self) -> Option<&dyn Surrogate> {
        self.get_trait::<TypeTraitSurrogate>()
            .map(TypeTraitSurrogate::get)
    }
}

// -----------------------------------------------------------------------------
// GetTypeMeta

/// Builds the [`TypeMeta`] added by [`TypeRegistry::register`](crate::registry::TypeRegistry::register).
pub trait GetTypeMeta: TypePath + Reflect {
    fn get_type_meta() -> TypeMeta;
}
