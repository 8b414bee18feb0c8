//! Backend contract shared by all extraction variants

use crate::Result;
use async_trait::async_trait;
use serde::Serialize;
use std::path::Path;

/// One field of a parsed document: either an extracted text blob or
/// structured metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Extracted text; reports render only its byte length
    Text(String),
    /// JSON-like metadata; reports render it fully, pretty-printed
    Structured(serde_json::Value),
}

/// Backend-agnostic output of a parse phase
///
/// An ordered mapping of field name to [`FieldValue`]. The harness treats it
/// as opaque except for enumerating entries; there is no fixed schema across
/// backends. Insertion order is preserved so reports render deterministically.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedDocument {
    fields: Vec<(String, FieldValue)>,
}

impl ParsedDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a text field
    pub fn push_text(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.fields.push((name.into(), FieldValue::Text(text.into())));
    }

    /// Append a structured metadata field
    pub fn push_structured(&mut self, name: impl Into<String>, value: serde_json::Value) {
        self.fields.push((name.into(), FieldValue::Structured(value)));
    }

    /// Enumerate fields in insertion order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A swappable document text-extraction implementation with a two-phase
/// lifecycle
///
/// `load` performs the one-time expensive acquisition (binding a native
/// library, starting an auxiliary server process) and must leave the backend
/// ready to parse; it is called at most once per run. `parse` may rely on
/// state established by `load` and on nothing else. Neither failure is
/// retried; both propagate with the underlying cause visible.
///
/// The whole run is single-threaded and cooperative: one backend at a time,
/// awaited to completion on one task. Backends may therefore hold
/// thread-bound engine handles, hence the `?Send` contract.
#[async_trait(?Send)]
pub trait Backend {
    /// Stable name, unique within the registry
    fn name(&self) -> &str;

    /// One-time initialization; arbitrarily expensive
    async fn load(&mut self) -> Result<()>;

    /// Extract a [`ParsedDocument`] from the file at `path`
    async fn parse(&mut self, path: &Path) -> Result<ParsedDocument>;
}
