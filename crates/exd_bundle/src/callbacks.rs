use core::mem;

use exd_reflect::Reflect;
use exd_reflect::codec::DecodeReport;
use exd_reflect::registry::TypeRegistry;
use exd_reflect::slot::Slot;

use crate::{BundleError, SerializationBundle};

/// An owner that carries its own [`SerializationBundle`].
pub trait Bundled: Slot + Reflect {
    fn bundle(&self) -> &SerializationBundle;

    fn bundle_mut(&mut self) -> &mut SerializationBundle;
}

/// The hooks a host calls around persisting and restoring an owner.
pub trait SerializationCallbacks {
    /// Called right before the host persists the owner.
    fn on_before_serialize(&mut self, registry: &TypeRegistry) -> Result<(), BundleError>;

    /// Called right after the host restored the bundle's data.
    fn on_after_deserialize(&mut self, registry: &TypeRegistry) -> Result<DecodeReport, BundleError>;
}

// The bundle is moved out for the pass so that the owner can be borrowed
// whole, then put back whatever the outcome.
impl<T: Bundled> SerializationCallbacks for T {
    fn on_before_serialize(&mut self, registry: &TypeRegistry) -> Result<(), BundleError> {
        let mut bundle = mem::take(self.bundle_mut());
        let result = bundle.serialize(Some(&*self), registry);
        *self.bundle_mut() = bundle;
        result
    }

    fn on_after_deserialize(&mut self, registry: &TypeRegistry) -> Result<DecodeReport, BundleError> {
        let mut bundle = mem::take(self.bundle_mut());
        let result = bundle.deserialize(&mut *self, registry);
        *self.bundle_mut() = bundle;
        result
    }
}
