use alloc::vec::Vec;

use exd_reflect::Reflect;
use exd_reflect::apply::{ApplyError, swap_apply};
use exd_reflect::codec::{self, CodecError, DecodeOptions, DecodeReport};
use exd_reflect::external::{ExternalRef, ExternalRefTable};
use exd_reflect::registry::TypeRegistry;
use exd_reflect::slot::Slot;
use thiserror::Error;

// -----------------------------------------------------------------------------
// BundleError

/// Errors raised by a [`SerializationBundle`] pass.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BundleError {
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error(transparent)]
    Apply(#[from] ApplyError),
}

// -----------------------------------------------------------------------------
// SerializationBundle

/// The serialization unit of one owner.
///
/// A bundle is never part of its owner's declared fields, so it is neither
/// encoded nor exchanged when the owner is applied.
///
/// # Examples
///
/// ```
/// use exd_bundle::SerializationBundle;
/// use exd_reflect::registry::TypeRegistry;
///
/// #[derive(Default, Debug, PartialEq)]
/// struct Save { level: u32 }
/// exd_reflect::impl_reflect_struct!(Save as "demo::Save" { level });
///
/// let registry = TypeRegistry::new();
/// let mut bundle = SerializationBundle::new();
///
/// let mut save = Save { level: 3 };
/// bundle.serialize(Some(&save), &registry).unwrap();
///
/// save.level = 0;
/// bundle.deserialize(&mut save, &registry).unwrap();
/// assert_eq!(save.level, 3);
/// ```
#[derive(Debug, Default)]
pub struct SerializationBundle {
    externals: ExternalRefTable,
    encoded: Option<Vec<u8>>,
    options: DecodeOptions,
}

impl SerializationBundle {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_options(options: DecodeOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    #[inline]
    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    /// Encodes `owner` into this bundle.
    ///
    /// Does nothing if there is no owner. Otherwise the handle table is
    /// rebuilt from scratch and the previous bytes are replaced. If encoding
    /// fails, the bytes and handle table of the previous pass are kept.
    pub fn serialize(
        &mut self,
        owner: Option<&dyn Reflect>,
        registry: &TypeRegistry,
    ) -> Result<(), BundleError> {
        let Some(owner) = owner else {
            log::trace!("serialize skipped: no owner");
            return Ok(());
        };

        let mut externals = ExternalRefTable::new();
        let bytes = codec::encode(owner, registry, &mut externals)?;
        log::debug!(
            "serialized `{}`: {} bytes, {} external references",
            owner.reflect_type_path(),
            bytes.len(),
            externals.len()
        );
        self.externals = externals;
        self.encoded = Some(bytes);
        Ok(())
    }

    /// Decodes the stored bytes and applies them to `owner` in place.
    ///
    /// Does nothing if no bytes are stored. A failed decode leaves `owner`
    /// untouched.
    pub fn deserialize<T: Slot + Reflect>(
        &mut self,
        owner: &mut T,
        registry: &TypeRegistry,
    ) -> Result<DecodeReport, BundleError> {
        let bytes = match self.encoded.as_deref() {
            Some(bytes) if !bytes.is_empty() => bytes,
            _ => {
                log::trace!("deserialize skipped: no stored bytes");
                return Ok(DecodeReport::default());
            }
        };

        let (mut replica, report) = codec::decode::<T>(bytes, registry, &self.externals, &self.options)?;
        swap_apply(owner, &mut replica)?;
        log::debug!(
            "deserialized `{}`: {} bytes, {} skipped subtrees",
            owner.reflect_type_path(),
            bytes.len(),
            report.skipped().len()
        );
        Ok(report)
    }

    /// The bytes of the last serialize pass or restore.
    #[inline]
    pub fn encoded(&self) -> Option<&[u8]> {
        self.encoded.as_deref()
    }

    /// The external references of the last pass, in handle order.
    #[inline]
    pub fn external_refs(&self) -> &[Option<ExternalRef>] {
        self.externals.as_slice()
    }

    /// Loads data the host persisted earlier.
    ///
    /// A slot is `None` where the host could not resolve the object at all.
    pub fn restore(&mut self, bytes: Vec<u8>, external_refs: Vec<Option<ExternalRef>>) {
        self.encoded = Some(bytes);
        self.externals = ExternalRefTable::from_slots(external_refs);
    }
}
