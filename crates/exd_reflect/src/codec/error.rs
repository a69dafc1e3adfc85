use alloc::string::{String, ToString};
use core::fmt::Display;

use thiserror::Error;

use crate::slot::SlotError;

/// Errors raised by [`encode`](crate::codec::encode) and [`decode`](crate::codec::decode).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CodecError {
    /// The stream is malformed, truncated or does not fit the target types.
    #[error("corrupt data: {0}")]
    CorruptData(String),
    /// A tag in the stream names a type that cannot be built.
    #[error("unknown type `{type_path}`")]
    UnknownType { type_path: String },
    /// An external handle points past the end of the table.
    #[error("external handle {index} is out of range, the table holds {len} references")]
    IndexOutOfRange { index: u32, len: usize },
    /// An external handle points at a slot the host left empty.
    #[error("external handle {index} was never resolved")]
    UnresolvedExternal { index: u32 },
    /// A node of this type needs a surrogate but none is registered.
    #[error("type `{type_path}` cannot be encoded without a surrogate")]
    Unsupported { type_path: &'static str },
    /// A leaf could not be converted to or from its primitive.
    #[error("invalid primitive for `{type_path}`: {reason}")]
    Primitive {
        type_path: &'static str,
        reason: String,
    },
    /// The encoded tree could not be written.
    #[error("failed to write the stream: {0}")]
    Write(String),
}

impl CodecError {
    #[inline]
    pub(crate) fn corrupt(message: impl Display) -> Self {
        Self::CorruptData(message.to_string())
    }

    /// Returns `true` for errors caused by inconsistent input data.
    ///
    /// Handle table errors count as corrupt data.
    pub fn is_corrupt(&self) -> bool {
        matches!(
            self,
            Self::CorruptData(_)
                | Self::IndexOutOfRange { .. }
                | Self::UnresolvedExternal { .. }
                | Self::Primitive { .. }
        )
    }
}

impl From<SlotError> for CodecError {
    #[inline]
    fn from(value: SlotError) -> Self {
        Self::corrupt(value)
    }
}
