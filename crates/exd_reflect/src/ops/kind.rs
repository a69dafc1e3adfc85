use crate::external::ExternalRef;
use crate::info::ReflectKind;
use crate::ops::{List, Map, Opaque, Struct};

/// An immutable view of a reflected value, by kind.
pub enum ReflectRef<'a> {
    Opaque(&'a dyn Opaque),
    Struct(&'a dyn Struct),
    List(&'a dyn List),
    Map(&'a dyn Map),
    External(&'a ExternalRef),
}

/// A mutable view of a reflected value, by kind.
pub enum ReflectMut<'a> {
    Opaque(&'a mut dyn Opaque),
    Struct(&'a mut dyn Struct),
    List(&'a mut dyn List),
    Map(&'a mut dyn Map),
    External(&'a mut ExternalRef),
}

macro_rules! impl_kind_fn {
    ($name:ident) => {
        impl $name<'_> {
            pub fn kind(&self) -> ReflectKind {
                match self {
                    Self::Opaque(_) => ReflectKind::Opaque,
                    Self::Struct(_) => ReflectKind::Struct,
                    Self::List(_) => ReflectKind::List,
                    Self::Map(_) => ReflectKind::Map,
                    Self::External(_) => ReflectKind::External,
                }
            }
        }
    };
}

impl_kind_fn!(ReflectRef);
impl_kind_fn!(ReflectMut);
