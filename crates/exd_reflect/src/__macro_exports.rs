//! Paths used by the exported macros.

pub use alloc::boxed::Box;

#[cfg(feature = "auto_register")]
#[allow(unsafe_code, reason = "expanded from `inventory::collect!`")]
pub mod auto_register {
    pub use inventory;

    use crate::registry::{GetTypeMeta, TypeRegistry};

    pub struct __AutoRegisterFunc(pub fn(&mut TypeRegistry));

    inventory::collect!(__AutoRegisterFunc);

    pub trait __RegisterType {
        fn __register(registry: &mut TypeRegistry);
    }

    impl<T: GetTypeMeta> __RegisterType for T {
        #[inline]
        fn __register(registry: &mut TypeRegistry) {
            registry.register::<T>();
        }
    }

    pub(crate) fn register_types(registry: &mut TypeRegistry) {
        for func in inventory::iter::<__AutoRegisterFunc> {
            (func.0)(registry);
        }
        log::debug!("auto registration finished with {} types", registry.len());
    }
}
