//! Human-readable rendering of one benchmark run
//!
//! Rendering is a pure function of the report fields onto any writer. Text
//! fields show only their byte length; structured fields are pretty-printed
//! JSON, untruncated. The line shapes follow the harness's fixed stdout
//! format.

use crate::backend::{FieldValue, ParsedDocument};
use crate::probe::Diff;
use std::fmt::Write as _;
use std::io;

/// Presentation-only view of one completed run; never persisted
#[derive(Debug, Clone)]
pub struct Report {
    /// Name of the benchmarked backend
    pub backend: String,

    /// What the backend extracted
    pub document: ParsedDocument,

    /// Measurement of the load phase
    pub load: Diff,

    /// Measurement of the parse phase
    pub parse: Diff,

    /// Size of the benchmarked document in bytes
    pub file_size: u64,
}

impl Report {
    /// Render the report to `out`
    pub fn write_to<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        let mut summary = String::new();
        for (name, value) in self.document.fields() {
            let _ = write!(summary, "\n  {name}: {}", render_field(value));
        }

        writeln!(out, "=> {summary}")?;
        writeln!(out, "(i) size of pdf file: {} bytes", self.file_size)?;
        write_diff(out, "to load the parser", &self.load)?;
        write_diff(out, "to parse the file", &self.parse)?;

        Ok(())
    }

    /// Render the report to stdout
    pub fn print(&self) -> io::Result<()> {
        self.write_to(&mut io::stdout().lock())
    }
}

fn render_field(value: &FieldValue) -> String {
    match value {
        FieldValue::Text(text) => format!("({} bytes)", text.len()),
        FieldValue::Structured(value) => {
            serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
        }
    }
}

fn write_diff<W: io::Write>(out: &mut W, context: &str, diff: &Diff) -> io::Result<()> {
    writeln!(
        out,
        "(i) {context}: {}, {} s.",
        diff.memory_delta_bytes,
        diff.elapsed.as_millis() as f64 / 1000.0
    )
}
