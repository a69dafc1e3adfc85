use crate::codec::CodecError;
use crate::external::{ExternalHandle, ExternalRef, ExternalRefTable};

/// State a [`Surrogate`](crate::codec::Surrogate) may use while encoding.
pub struct EncodeContext<'a> {
    externals: &'a mut ExternalRefTable,
}

impl<'a> EncodeContext<'a> {
    #[inline]
    pub(crate) fn new(externals: &'a mut ExternalRefTable) -> Self {
        Self { externals }
    }

    /// Returns the handle of `reference` within the current pass.
    #[inline]
    pub fn register_external(&mut self, reference: &ExternalRef) -> ExternalHandle {
        self.externals.add(reference)
    }
}

/// State a [`Surrogate`](crate::codec::Surrogate) may use while decoding.
pub struct DecodeContext<'a> {
    externals: &'a ExternalRefTable,
}

impl<'a> DecodeContext<'a> {
    #[inline]
    pub(crate) fn new(externals: &'a ExternalRefTable) -> Self {
        Self { externals }
    }

    /// Returns the reference behind `handle`, which may be missing.
    #[inline]
    pub fn resolve_external(&self, handle: ExternalHandle) -> Result<ExternalRef, CodecError> {
        self.externals.get(handle).cloned()
    }
}
