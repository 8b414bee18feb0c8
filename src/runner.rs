//! Benchmark runner for one backend invocation
//!
//! The runner benchmarks exactly one variant end-to-end: it resolves the
//! backend by index, wraps the `load` phase in one probe and the `parse`
//! phase in a second, and assembles the report. Phases are strictly
//! sequential, so each probe's memory delta is attributable to exactly one
//! phase and backends are never measured concurrently.

use crate::config::BenchConfig;
use crate::probe::Probe;
use crate::registry::BackendRegistry;
use crate::report::Report;
use crate::{Error, Result};

/// Orchestrates one probe-instrumented backend run
pub struct Runner {
    config: BenchConfig,
    registry: BackendRegistry,
}

impl Runner {
    /// Create a new runner over the given configuration and registry
    pub fn new(config: BenchConfig, registry: BackendRegistry) -> Self {
        Self { config, registry }
    }

    /// Reference to the benchmark configuration
    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    /// Reference to the backend registry
    pub fn registry(&self) -> &BackendRegistry {
        &self.registry
    }

    /// Benchmark the backend at `index` against the configured document
    ///
    /// A bad index propagates as [`Error::IndexOutOfRange`] before any
    /// backend is instantiated. Load and parse failures propagate unretried.
    pub async fn run(&self, index: usize) -> Result<Report> {
        let spec = self.registry.get(index)?;
        let mut backend = spec.instantiate(&self.config);

        let load_label = format!("loading {}...", spec.name());
        let mut loading = Probe::start(Some(load_label.as_str()))?;
        backend.load().await?;
        let load = loading.stop()?.clone();

        let parse_label = format!("parsing with {}...", spec.name());
        let mut parsing = Probe::start(Some(parse_label.as_str()))?;
        let document = backend.parse(&self.config.document).await?;
        let parse = parsing.stop()?.clone();

        let file_size = std::fs::metadata(&self.config.document).map_err(Error::Io)?.len();

        Ok(Report {
            backend: spec.name().to_string(),
            document,
            load,
            parse,
            file_size,
        })
    }
}
