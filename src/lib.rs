//! Single-run micro-benchmark harness for document text-extraction backends
//!
//! Compares interchangeable extraction backends on load cost, parse cost, and
//! memory footprint. One invocation selects one backend from an ordered
//! registry, wraps its `load` and `parse` phases in time/memory probes, and
//! renders a human-readable report.

pub mod backend;
pub mod backends;
pub mod config;
pub mod error;
pub mod probe;
pub mod registry;
pub mod report;
pub mod runner;

pub use backend::{Backend, FieldValue, ParsedDocument};
pub use backends::{PdfiumBackend, TikaBackend, builtin_registry};
pub use config::BenchConfig;
pub use error::{Error, Result};
pub use probe::{Diff, Probe};
pub use registry::{BackendRegistry, BackendSpec};
pub use report::Report;
pub use runner::Runner;
