//! Ordered registry of backend variants
//!
//! Variants are registered as name + factory pairs and addressed by ordinal
//! position only. Registration never loads anything: instantiation is cheap
//! and deferred to the [`Runner`](crate::Runner), and the expensive work
//! happens later inside the selected backend's own `load`. Unselected
//! variants therefore incur zero load cost, which is what keeps per-variant
//! memory attribution meaningful.

use crate::backend::Backend;
use crate::config::BenchConfig;
use crate::{Error, Result};

/// Lazy constructor for one backend variant
pub type BackendFactory = Box<dyn Fn(&BenchConfig) -> Box<dyn Backend>>;

/// A registered, not-yet-loaded backend variant
pub struct BackendSpec {
    name: String,
    factory: BackendFactory,
}

impl BackendSpec {
    pub fn new(
        name: impl Into<String>,
        factory: impl Fn(&BenchConfig) -> Box<dyn Backend> + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            factory: Box::new(factory),
        }
    }

    /// Stable variant name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Construct the backend instance; no loading happens here
    pub fn instantiate(&self, config: &BenchConfig) -> Box<dyn Backend> {
        (self.factory)(config)
    }
}

/// Index-addressable, ordered collection of backend variants
#[derive(Default)]
pub struct BackendRegistry {
    specs: Vec<BackendSpec>,
}

impl BackendRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a variant; position is its address
    pub fn register(&mut self, spec: BackendSpec) {
        self.specs.push(spec);
    }

    /// Look up the variant at `index`
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfRange`] carrying the valid bounds when `index` is
    /// not in `[0, len())`.
    pub fn get(&self, index: usize) -> Result<&BackendSpec> {
        self.specs.get(index).ok_or(Error::IndexOutOfRange {
            index,
            len: self.specs.len(),
        })
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::ParsedDocument;
    use async_trait::async_trait;
    use std::path::Path;

    struct NullBackend;

    #[async_trait(?Send)]
    impl Backend for NullBackend {
        fn name(&self) -> &str {
            "null"
        }

        async fn load(&mut self) -> Result<()> {
            Ok(())
        }

        async fn parse(&mut self, _path: &Path) -> Result<ParsedDocument> {
            Ok(ParsedDocument::new())
        }
    }

    fn registry_with(names: &[&str]) -> BackendRegistry {
        let mut registry = BackendRegistry::new();
        for name in names {
            registry.register(BackendSpec::new(*name, |_| Box::new(NullBackend)));
        }
        registry
    }

    #[test]
    fn test_get_returns_registered_variant() {
        let registry = registry_with(&["first", "second"]);

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(0).unwrap().name(), "first");
        assert_eq!(registry.get(1).unwrap().name(), "second");
    }

    #[test]
    fn test_get_out_of_range_carries_bounds() {
        let registry = registry_with(&["first", "second"]);

        let Err(err) = registry.get(5) else {
            panic!("expected an out-of-range error");
        };
        assert!(matches!(err, Error::IndexOutOfRange { index: 5, len: 2 }));
        assert!(err.to_string().contains("[0, 2)"));
    }

    #[test]
    fn test_empty_registry_rejects_index_zero() {
        let registry = BackendRegistry::new();
        assert!(registry.is_empty());
        assert!(matches!(
            registry.get(0),
            Err(Error::IndexOutOfRange { index: 0, len: 0 })
        ));
    }

    #[test]
    fn test_instantiate_builds_fresh_backend() {
        let registry = registry_with(&["null"]);
        let backend = registry.get(0).unwrap().instantiate(&BenchConfig::default());
        assert_eq!(backend.name(), "null");
    }
}
