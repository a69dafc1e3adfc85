// -----------------------------------------------------------------------------
// Internal helpers

/// Implements the kind-dependent methods of [`Reflect`](crate::Reflect).
///
/// Requires `Self: TypePath`.
#[doc(hidden)]
#[macro_export]
macro_rules! __impl_reflect_cast_fn {
    ($kind:ident) => {
        #[inline]
        fn reflect_type_path(&self) -> &'static str {
            <Self as $crate::info::TypePath>::type_path()
        }

        #[inline]
        fn reflect_kind(&self) -> $crate::info::ReflectKind {
            $crate::info::ReflectKind::$kind
        }

        #[inline]
        fn reflect_ref(&self) -> $crate::ops::ReflectRef<'_> {
            $crate::ops::ReflectRef::$kind(self)
        }

        #[inline]
        fn reflect_mut(&mut self) -> $crate::ops::ReflectMut<'_> {
            $crate::ops::ReflectMut::$kind(self)
        }

        #[inline]
        fn reflect_swap(
            &mut self,
            other: &mut dyn $crate::Reflect,
        ) -> ::core::result::Result<(), $crate::apply::ApplyError> {
            $crate::apply::swap_whole(self, other)
        }
    };
}

/// Implements [`Slot`](crate::slot::Slot) for a non-generic, `Default` type
/// whose slot always holds exactly one node.
#[doc(hidden)]
#[macro_export]
macro_rules! __impl_slot {
    ($ty:ty) => {
        impl $crate::slot::Slot for $ty {
            #[inline]
            fn slot_type_path() -> &'static str {
                <Self as $crate::info::TypePath>::type_path()
            }

            #[inline]
            fn slot_hint() -> $crate::slot::SlotHint {
                $crate::slot::SlotHint::of::<Self>()
            }

            #[inline]
            fn as_node(&self) -> ::core::option::Option<&dyn $crate::Reflect> {
                ::core::option::Option::Some(self)
            }

            #[inline]
            fn as_node_mut(&mut self) -> ::core::option::Option<&mut dyn $crate::Reflect> {
                ::core::option::Option::Some(self)
            }

            fn from_node(
                node: ::core::option::Option<$crate::__macro_exports::Box<dyn $crate::Reflect>>,
            ) -> ::core::result::Result<Self, $crate::slot::SlotError> {
                $crate::slot::take_node(node)
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __impl_get_type_meta {
    ($ty:ty) => {
        impl $crate::registry::GetTypeMeta for $ty {
            fn get_type_meta() -> $crate::registry::TypeMeta {
                let mut meta = $crate::registry::TypeMeta::of::<Self>();
                meta.insert_trait(
                    <$crate::registry::TypeTraitDefault as $crate::registry::FromType<Self>>::from_type(),
                );
                meta
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __impl_type_path {
    ($ty:ident, $path:expr) => {
        impl $crate::info::TypePath for $ty {
            #[inline]
            fn type_path() -> &'static str {
                $path
            }
        }
    };
}

// -----------------------------------------------------------------------------
// impl_reflect_struct

/// Implements reflection for a struct with named fields.
///
/// The listed fields, in the listed order, are what the codec writes and
/// what [`swap_apply`](crate::apply::swap_apply) exchanges. Fields left out
/// are neither encoded nor touched by apply. Every listed field must
/// implement [`Slot`](crate::slot::Slot), and the struct must implement
/// `Default`.
///
/// The type path defaults to `module_path!()` followed by the type name.
/// Give one explicitly with `as "path"` when the type may move between
/// modules, since the path is persisted in every stream.
///
/// # Examples
///
/// ```
/// use exd_reflect::Reflect;
/// use exd_reflect::ops::ReflectRef;
///
/// #[derive(Default)]
/// struct Door { open: bool, key: Option<String>, cache: u32 }
/// exd_reflect::impl_reflect_struct!(Door as "demo::Door" { open, key });
///
/// let door = Door::default();
/// let ReflectRef::Struct(s) = door.reflect_ref() else { unreachable!() };
/// assert_eq!(s.field_len(), 2);
/// assert_eq!(door.reflect_type_path(), "demo::Door");
/// ```
#[macro_export]
macro_rules! impl_reflect_struct {
    ($ty:ident as $path:literal { $($field:ident),* $(,)? }) => {
        $crate::__impl_reflect_struct!($ty, $path, [$($field),*]);
    };
    ($ty:ident { $($field:ident),* $(,)? }) => {
        $crate::__impl_reflect_struct!(
            $ty,
            ::core::concat!(::core::module_path!(), "::", ::core::stringify!($ty)),
            [$($field),*]
        );
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __impl_reflect_struct {
    ($ty:ident, $path:expr, [$($field:ident),*]) => {
        $crate::__impl_type_path!($ty, $path);

        impl $crate::Reflect for $ty {
            $crate::__impl_reflect_cast_fn!(Struct);
        }

        impl $ty {
            const __FIELD_NAMES: &'static [&'static str] = &[$(::core::stringify!($field)),*];
        }

        impl $crate::ops::Struct for $ty {
            #[inline]
            fn field_len(&self) -> usize {
                Self::__FIELD_NAMES.len()
            }

            #[inline]
            fn name_at(&self, index: usize) -> ::core::option::Option<&'static str> {
                Self::__FIELD_NAMES.get(index).copied()
            }

            #[allow(unused_variables, reason = "structs without fields")]
            fn field_at(
                &self,
                index: usize,
            ) -> ::core::option::Option<&dyn $crate::slot::DynSlot> {
                let name = Self::__FIELD_NAMES.get(index).copied()?;
                $(
                    if name == ::core::stringify!($field) {
                        return ::core::option::Option::Some(
                            &self.$field as &dyn $crate::slot::DynSlot,
                        );
                    }
                )*
                ::core::option::Option::None
            }

            #[allow(unused_variables, reason = "structs without fields")]
            fn field_at_mut(
                &mut self,
                index: usize,
            ) -> ::core::option::Option<&mut dyn $crate::slot::DynSlot> {
                let name = Self::__FIELD_NAMES.get(index).copied()?;
                $(
                    if name == ::core::stringify!($field) {
                        return ::core::option::Option::Some(
                            &mut self.$field as &mut dyn $crate::slot::DynSlot,
                        );
                    }
                )*
                ::core::option::Option::None
            }
        }

        $crate::__impl_slot!($ty);
        $crate::__impl_get_type_meta!($ty);
    };
}

// -----------------------------------------------------------------------------
// impl_reflect_opaque

/// Implements reflection for a leaf stored through its `serde` impls.
///
/// The type must implement `Serialize`, `DeserializeOwned` and `Default`.
///
/// # Examples
///
/// ```
/// use serde::{Deserialize, Serialize};
/// use exd_reflect::ops::Opaque;
///
/// #[derive(Default, Debug, PartialEq, Serialize, Deserialize)]
/// struct Rgb(u8, u8, u8);
/// exd_reflect::impl_reflect_opaque!(Rgb as "demo::Rgb");
///
/// let primitive = Rgb(1, 2, 3).to_primitive().unwrap();
/// let mut color = Rgb::default();
/// color.apply_primitive(primitive).unwrap();
/// assert_eq!(color, Rgb(1, 2, 3));
/// ```
#[macro_export]
macro_rules! impl_reflect_opaque {
    ($ty:ident as $path:literal) => {
        $crate::__impl_reflect_opaque!($ty, $path);
    };
    ($ty:ident) => {
        $crate::__impl_reflect_opaque!(
            $ty,
            ::core::concat!(::core::module_path!(), "::", ::core::stringify!($ty))
        );
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __impl_reflect_opaque {
    ($ty:ident, $path:expr) => {
        $crate::__impl_type_path!($ty, $path);

        impl $crate::Reflect for $ty {
            $crate::__impl_reflect_cast_fn!(Opaque);
        }

        impl $crate::ops::Opaque for $ty {
            #[inline]
            fn to_primitive(
                &self,
            ) -> ::core::result::Result<$crate::codec::Primitive, $crate::codec::CodecError> {
                $crate::codec::serde_leaf::to_primitive(self)
            }

            fn apply_primitive(
                &mut self,
                value: $crate::codec::Primitive,
            ) -> ::core::result::Result<(), $crate::codec::CodecError> {
                *self = $crate::codec::serde_leaf::from_primitive(value)?;
                ::core::result::Result::Ok(())
            }
        }

        $crate::__impl_slot!($ty);
        $crate::__impl_get_type_meta!($ty);
    };
}

// -----------------------------------------------------------------------------
// auto_register

/// Submits types to be added by [`TypeRegistry::auto_register`].
///
/// Expands to nothing when the `auto_register` feature is disabled.
///
/// [`TypeRegistry::auto_register`]: crate::registry::TypeRegistry::auto_register
///
/// # Examples
///
/// ```
/// use exd_reflect::registry::TypeRegistry;
///
/// #[derive(Default)]
/// struct Lamp { lit: bool }
/// exd_reflect::impl_reflect_struct!(Lamp as "demo::Lamp" { lit });
/// exd_reflect::auto_register!(Lamp);
///
/// let mut registry = TypeRegistry::empty();
/// if registry.auto_register() {
///     assert!(registry.get_with_type_path("demo::Lamp").is_some());
/// }
/// ```
#[cfg(feature = "auto_register")]
#[macro_export]
macro_rules! auto_register {
    ($($ty:ty),* $(,)?) => {$(
        #[allow(unsafe_code, reason = "static constructors emitted by `inventory`")]
        const _: () = {
            $crate::__macro_exports::auto_register::inventory::submit! {
                $crate::__macro_exports::auto_register::__AutoRegisterFunc(
                    <$ty as $crate::__macro_exports::auto_register::__RegisterType>::__register
                )
            }
        };
    )*};
}

/// Submits types to be added by [`TypeRegistry::auto_register`].
///
/// Expands to nothing when the `auto_register` feature is disabled.
///
/// [`TypeRegistry::auto_register`]: crate::registry::TypeRegistry::auto_register
#[cfg(not(feature = "auto_register"))]
#[macro_export]
macro_rules! auto_register {
    ($($ty:ty),* $(,)?) => {};
}
