use alloc::sync::Arc;

use crate::codec::Surrogate;
use crate::registry::TypeTrait;

/// The registered [`Surrogate`] of a type.
///
/// Consulted by the encoder and decoder before a node's own structure.
#[derive(Clone)]
pub struct TypeTraitSurrogate(Arc<dyn Surrogate>);

impl TypeTraitSurrogate {
    #[inline]
    pub fn new(surrogate: impl Surrogate) -> Self {
        Self(Arc::new(surrogate))
    }

    #[inline]
    pub fn get(&self) -> &dyn Surrogate {
        &*self.0
    }
}

impl TypeTrait for TypeTraitSurrogate {}
