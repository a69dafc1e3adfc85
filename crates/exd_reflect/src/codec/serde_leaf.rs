//! Leaves stored through their own `serde` implementation.
//!
//! Used by [`impl_reflect_opaque!`](crate::impl_reflect_opaque): the value is
//! written with `bincode` and carried as [`Primitive::Bytes`].

use alloc::format;
use alloc::string::ToString;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::codec::{CodecError, Primitive};
use crate::info::TypePath;

pub fn to_primitive<T: Serialize + TypePath>(value: &T) -> Result<Primitive, CodecError> {
    bincode::serialize(value)
        .map(Primitive::Bytes)
        .map_err(|e| CodecError::Primitive {
            type_path: T::type_path(),
            reason: e.to_string(),
        })
}

pub fn from_primitive<T: DeserializeOwned + TypePath>(value: Primitive) -> Result<T, CodecError> {
    let Primitive::Bytes(bytes) = value else {
        return Err(CodecError::Primitive {
            type_path: T::type_path(),
            reason: format!("expected bytes, found {}", value.kind_name()),
        });
    };
    bincode::deserialize(&bytes).map_err(|e| CodecError::Primitive {
        type_path: T::type_path(),
        reason: e.to_string(),
    })
}
