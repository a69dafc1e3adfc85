use alloc::string::String;
use alloc::vec::Vec;

/// What the decoder does with a node whose type cannot be built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownTypePolicy {
    /// Drop the node and everything below it, then go on.
    ///
    /// A struct field keeps its default value, a list element or map entry
    /// is left out. Each skipped node is recorded in the [`DecodeReport`]
    /// and logged as a warning. The root itself can never be skipped.
    #[default]
    SkipSubtree,
    /// Fail the whole decode with [`CodecError::UnknownType`](crate::codec::CodecError::UnknownType).
    Abort,
}

/// Options of one decode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    pub unknown_types: UnknownTypePolicy,
}

impl DecodeOptions {
    #[inline]
    pub const fn new() -> Self {
        Self {
            unknown_types: UnknownTypePolicy::SkipSubtree,
        }
    }

    #[inline]
    pub const fn with_unknown_types(mut self, policy: UnknownTypePolicy) -> Self {
        self.unknown_types = policy;
        self
    }
}

/// Non-fatal findings of a successful decode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeReport {
    skipped: Vec<String>,
}

impl DecodeReport {
    /// Type paths of the skipped subtrees, in stream order.
    #[inline]
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    /// Returns `true` if nothing was skipped.
    #[inline]
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }

    pub(crate) fn push_skipped(&mut self, type_path: &str) {
        self.skipped.push(type_path.into());
    }
}
