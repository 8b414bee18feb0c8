//! Benchmark configuration

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Document benchmarked when `BENCH_DOCUMENT` is not set.
pub const DEFAULT_DOCUMENT: &str = "fixtures/release-notes.pdf";

/// Default location of the Tika server JAR relative to the working directory.
pub const DEFAULT_TIKA_JAR: &str = "libs/tika-server-standard.jar";

/// Default port the Tika server is started on.
pub const DEFAULT_TIKA_PORT: u16 = 9998;

/// Configuration for a benchmark run
///
/// The target document is a fixed, externally supplied value: it is resolved
/// once at startup (defaults overridden by environment variables) and threaded
/// through the [`Runner`](crate::Runner), never read from a global.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchConfig {
    /// Document every backend is benchmarked against
    pub document: PathBuf,

    /// Path to the Tika server JAR (separately provisioned artifact)
    pub tika_jar: PathBuf,

    /// Port the Tika server listens on
    pub tika_port: u16,

    /// Directory holding the Pdfium shared library; system library when unset
    pub pdfium_lib_dir: Option<PathBuf>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            document: PathBuf::from(DEFAULT_DOCUMENT),
            tika_jar: PathBuf::from(DEFAULT_TIKA_JAR),
            tika_port: DEFAULT_TIKA_PORT,
            pdfium_lib_dir: None,
        }
    }
}

impl BenchConfig {
    /// Build the configuration from environment overrides on top of the defaults
    ///
    /// Recognized variables: `BENCH_DOCUMENT`, `TIKA_JAR`, `TIKA_PORT`,
    /// `PDFIUM_LIB_DIR`.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            document: env::var_os("BENCH_DOCUMENT")
                .map(PathBuf::from)
                .unwrap_or(defaults.document),
            tika_jar: env::var_os("TIKA_JAR").map(PathBuf::from).unwrap_or(defaults.tika_jar),
            tika_port: env::var("TIKA_PORT")
                .ok()
                .and_then(|port| port.parse().ok())
                .unwrap_or(defaults.tika_port),
            pdfium_lib_dir: env::var_os("PDFIUM_LIB_DIR").map(PathBuf::from),
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Config`] if any configuration value is invalid
    pub fn validate(&self) -> crate::Result<()> {
        if self.document.as_os_str().is_empty() {
            return Err(crate::Error::Config("document path must not be empty".to_string()));
        }

        if self.tika_port == 0 {
            return Err(crate::Error::Config("tika_port must be > 0".to_string()));
        }

        Ok(())
    }
}
