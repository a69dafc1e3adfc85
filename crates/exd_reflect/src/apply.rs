//! In-place apply: moving decoded state into a live value.
//!
//! Decoding always builds a detached replica. [`swap_apply`] then exchanges
//! the declared fields of the replica with those of the live value, so the
//! live value keeps its address while its contents become the decoded ones.
//! The replica ends up holding the old contents and is usually dropped.

use core::mem;

use thiserror::Error;

use crate::Reflect;
use crate::info::ReflectKind;
use crate::ops::{ReflectMut, Struct};
use crate::slot::DynSlot;

// -----------------------------------------------------------------------------
// ApplyError

/// Errors raised while exchanging state between two values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ApplyError {
    /// The two values are of different runtime types.
    #[error("cannot exchange `{replica}` with `{live}`")]
    TypeMismatch {
        live: &'static str,
        replica: &'static str,
    },
    /// The two values declare a different number of fields.
    #[error("`{type_path}` has {live} fields on the live value but {replica} on the replica")]
    FieldCount {
        type_path: &'static str,
        live: usize,
        replica: usize,
    },
}

// -----------------------------------------------------------------------------
// Apply

/// Exchanges all state between `live` and `replica`.
///
/// Both must have the same runtime type. Struct values are exchanged field
/// by field in declaration order, recursing into nested struct fields whose
/// runtime types match; every other node is exchanged whole.
///
/// # Examples
///
/// ```
/// use exd_reflect::apply::swap_apply;
///
/// #[derive(Default, Debug, PartialEq)]
/// struct Stats { hp: u32, name: String }
/// exd_reflect::impl_reflect_struct!(Stats { hp, name });
///
/// let mut live = Stats { hp: 1, name: "old".into() };
/// let mut replica = Stats { hp: 9, name: "new".into() };
/// let before: *const Stats = &live;
///
/// swap_apply(&mut live, &mut replica).unwrap();
///
/// assert_eq!(live, Stats { hp: 9, name: "new".into() });
/// assert_eq!(replica, Stats { hp: 1, name: "old".into() });
/// assert!(core::ptr::eq(before, &live));
/// ```
pub fn swap_apply(live: &mut dyn Reflect, replica: &mut dyn Reflect) -> Result<(), ApplyError> {
    let type_path = live.reflect_type_path();
    if live.ty_id() != replica.ty_id() {
        return Err(ApplyError::TypeMismatch {
            live: type_path,
            replica: replica.reflect_type_path(),
        });
    }

    if let (ReflectMut::Struct(live), ReflectMut::Struct(replica)) =
        (live.reflect_mut(), replica.reflect_mut())
    {
        return swap_fields(type_path, live, replica);
    }

    live.reflect_swap(replica)
}

fn swap_fields(
    type_path: &'static str,
    live: &mut dyn Struct,
    replica: &mut dyn Struct,
) -> Result<(), ApplyError> {
    let len = live.field_len();
    let count_error = |replica: usize| ApplyError::FieldCount {
        type_path,
        live: len,
        replica,
    };

    if replica.field_len() != len {
        return Err(count_error(replica.field_len()));
    }

    for index in 0..len {
        let (Some(a), Some(b)) = (live.field_at_mut(index), replica.field_at_mut(index)) else {
            return Err(count_error(index));
        };
        swap_slots(a, b)?;
    }
    Ok(())
}

fn swap_slots(live: &mut dyn DynSlot, replica: &mut dyn DynSlot) -> Result<(), ApplyError> {
    let nested = match (live.node(), replica.node()) {
        (Some(a), Some(b)) => a.reflect_kind() == ReflectKind::Struct && a.ty_id() == b.ty_id(),
        _ => false,
    };

    if nested && let (Some(a), Some(b)) = (live.node_mut(), replica.node_mut()) {
        return swap_apply(a, b);
    }

    live.swap_slot(replica)
}

/// Exchanges two values of the same concrete type.
///
/// Used as the [`Reflect::reflect_swap`] of every non-struct type.
pub fn swap_whole<T: Reflect>(this: &mut T, other: &mut dyn Reflect) -> Result<(), ApplyError> {
    let replica = other.reflect_type_path();
    match other.downcast_mut::<T>() {
        Some(other) => {
            mem::swap(this, other);
            Ok(())
        }
        None => Err(ApplyError::TypeMismatch {
            live: this.reflect_type_path(),
            replica,
        }),
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    use super::{ApplyError, swap_apply};
    use crate::Reflect;

    #[derive(Default, Debug, PartialEq)]
    struct Inner {
        level: u8,
    }

    crate::impl_reflect_struct!(Inner as "tests::Inner" { level });

    #[derive(Default, Debug)]
    struct Outer {
        inner: Inner,
        tags: Vec<String>,
        any: Option<Box<dyn Reflect>>,
    }

    crate::impl_reflect_struct!(Outer as "tests::Outer" { inner, tags, any });

    #[test]
    fn exchanges_every_field() {
        let mut live = Outer {
            inner: Inner { level: 1 },
            tags: vec!["a".into()],
            any: None,
        };
        let mut replica = Outer {
            inner: Inner { level: 7 },
            tags: vec!["b".into(), "c".into()],
            any: Some(Box::new(5_u32)),
        };

        swap_apply(&mut live, &mut replica).unwrap();

        assert_eq!(live.inner, Inner { level: 7 });
        assert_eq!(live.tags, ["b", "c"]);
        assert_eq!(live.any.as_deref().and_then(|v| v.downcast_ref::<u32>()), Some(&5));
        assert_eq!(replica.inner, Inner { level: 1 });
        assert!(replica.any.is_none());
    }

    #[test]
    fn nested_struct_keeps_its_address() {
        let mut live = Outer {
            any: Some(Box::new(Inner { level: 1 })),
            ..Outer::default()
        };
        let mut replica = Outer {
            any: Some(Box::new(Inner { level: 2 })),
            ..Outer::default()
        };
        let before = live.any.as_deref().map(|v| v as *const dyn Reflect as *const ());

        swap_apply(&mut live, &mut replica).unwrap();

        let after = live.any.as_deref().map(|v| v as *const dyn Reflect as *const ());
        assert_eq!(before, after);
        assert_eq!(
            live.any.as_deref().and_then(|v| v.downcast_ref::<Inner>()),
            Some(&Inner { level: 2 })
        );
    }

    #[test]
    fn mismatched_types_fail() {
        let mut live = Inner::default();
        let mut replica = 3_u8;
        let err = swap_apply(&mut live, &mut replica).unwrap_err();
        assert_eq!(
            err,
            ApplyError::TypeMismatch {
                live: "tests::Inner",
                replica: "u8",
            }
        );
    }

    #[test]
    fn opaque_values_swap_whole() {
        let mut live = String::from("old");
        let mut replica = String::from("new");
        swap_apply(&mut live, &mut replica).unwrap();
        assert_eq!(live, "new");
        assert_eq!(replica, "old");
    }
}
