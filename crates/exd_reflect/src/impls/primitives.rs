use alloc::format;
use alloc::string::String;

use crate::Reflect;
use crate::codec::{CodecError, Primitive};
use crate::info::TypePath;
use crate::ops::Opaque;

fn mismatch(type_path: &'static str, found: &Primitive) -> CodecError {
    CodecError::Primitive {
        type_path,
        reason: format!("unexpected {}", found.kind_name()),
    }
}

macro_rules! impl_reflect_primitive {
    ($($ty:ty => $path:literal),* $(,)?) => {$(
        impl TypePath for $ty {
            #[inline]
            fn type_path() -> &'static str {
                $path
            }
        }

        impl Reflect for $ty {
            crate::__impl_reflect_cast_fn!(Opaque);
        }

        crate::__impl_slot!($ty);
        crate::__impl_get_type_meta!($ty);
    )*};
}

impl_reflect_primitive!(
    bool => "bool",
    char => "char",
    u8 => "u8",
    u16 => "u16",
    u32 => "u32",
    u64 => "u64",
    usize => "usize",
    i8 => "i8",
    i16 => "i16",
    i32 => "i32",
    i64 => "i64",
    isize => "isize",
    f32 => "f32",
    f64 => "f64",
    String => "alloc::string::String",
);

// Integers are widened to 64 bits on the wire and narrowed back on decode.
macro_rules! impl_opaque_int {
    ($variant:ident($wide:ty): $($ty:ty),*) => {$(
        #[allow(
            clippy::unnecessary_cast,
            clippy::unnecessary_fallible_conversions,
            reason = "shared by the 64-bit types"
        )]
        impl Opaque for $ty {
            #[inline]
            fn to_primitive(&self) -> Result<Primitive, CodecError> {
                Ok(Primitive::$variant(*self as $wide))
            }

            fn apply_primitive(&mut self, value: Primitive) -> Result<(), CodecError> {
                let raw = match value {
                    Primitive::$variant(raw) => raw,
                    other => return Err(mismatch(Self::type_path(), &other)),
                };
                *self = <$ty>::try_from(raw).map_err(|_| CodecError::Primitive {
                    type_path: Self::type_path(),
                    reason: format!("{raw} is out of range"),
                })?;
                Ok(())
            }
        }
    )*};
}

impl_opaque_int!(Int(i64): i8, i16, i32, i64, isize);
impl_opaque_int!(UInt(u64): u8, u16, u32, u64, usize);

macro_rules! impl_opaque_copy {
    ($($ty:ty => $variant:ident),*) => {$(
        impl Opaque for $ty {
            #[inline]
            fn to_primitive(&self) -> Result<Primitive, CodecError> {
                Ok(Primitive::$variant(*self))
            }

            fn apply_primitive(&mut self, value: Primitive) -> Result<(), CodecError> {
                match value {
                    Primitive::$variant(raw) => {
                        *self = raw;
                        Ok(())
                    }
                    other => Err(mismatch(Self::type_path(), &other)),
                }
            }
        }
    )*};
}

impl_opaque_copy!(
    bool => Bool,
    char => Char,
    f32 => F32,
    f64 => F64
);

impl Opaque for String {
    #[inline]
    fn to_primitive(&self) -> Result<Primitive, CodecError> {
        Ok(Primitive::Str(self.clone()))
    }

    fn apply_primitive(&mut self, value: Primitive) -> Result<(), CodecError> {
        match value {
            Primitive::Str(raw) => {
                *self = raw;
                Ok(())
            }
            other => Err(mismatch(Self::type_path(), &other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use crate::codec::{CodecError, Primitive};
    use crate::ops::Opaque;

    #[test]
    fn integers_widen_and_narrow() {
        let mut value = 0_i8;
        assert_eq!((-5_i8).to_primitive().unwrap(), Primitive::Int(-5));
        value.apply_primitive(Primitive::Int(-7)).unwrap();
        assert_eq!(value, -7);

        let err = value.apply_primitive(Primitive::Int(300)).unwrap_err();
        assert!(matches!(err, CodecError::Primitive { type_path: "i8", .. }));
    }

    #[test]
    fn wrong_variant_is_rejected() {
        let mut value = String::new();
        let err = value.apply_primitive(Primitive::Bool(true)).unwrap_err();
        assert!(err.is_corrupt());

        value.apply_primitive(Primitive::Str("ok".into())).unwrap();
        assert_eq!(value, "ok");
    }
}
