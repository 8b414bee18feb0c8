//! Built-in backend variants
//!
//! The variant set is closed and assembled here in a fixed order; the CLI
//! index addresses into it. Each entry is a lazy factory, so only the
//! selected variant ever loads its extraction engine.

pub mod pdfium;
pub mod tika;

pub use pdfium::PdfiumBackend;
pub use tika::TikaBackend;

use crate::registry::{BackendRegistry, BackendSpec};

/// Registry of all built-in variants, in their stable index order
pub fn builtin_registry() -> BackendRegistry {
    let mut registry = BackendRegistry::new();

    registry.register(BackendSpec::new(PdfiumBackend::NAME, |config| {
        Box::new(PdfiumBackend::new(config))
    }));
    registry.register(BackendSpec::new(TikaBackend::NAME, |config| {
        Box::new(TikaBackend::new(config))
    }));

    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_registry_order_is_stable() {
        let registry = builtin_registry();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(0).unwrap().name(), "pdfium");
        assert_eq!(registry.get(1).unwrap().name(), "tika-server");
    }
}
