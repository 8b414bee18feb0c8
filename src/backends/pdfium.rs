//! Native-library backend using Pdfium
//!
//! `load` binds the Pdfium shared library dynamically, so the acquisition
//! cost of the extraction engine lands inside the load probe rather than at
//! process start. `parse` opens the document, extracts first-page text and
//! the standard metadata tags.

use crate::backend::{Backend, ParsedDocument};
use crate::config::BenchConfig;
use crate::{Error, Result};
use async_trait::async_trait;
use pdfium_render::prelude::*;
use serde_json::json;
use std::path::{Path, PathBuf};

/// Pdfium-backed extraction variant
pub struct PdfiumBackend {
    lib_dir: Option<PathBuf>,
    pdfium: Option<Pdfium>,
}

impl PdfiumBackend {
    pub const NAME: &'static str = "pdfium";

    /// Create the variant without binding anything yet
    pub fn new(config: &BenchConfig) -> Self {
        Self {
            lib_dir: config.pdfium_lib_dir.clone(),
            pdfium: None,
        }
    }

    fn load_error(&self, message: impl Into<String>) -> Error {
        Error::Load {
            backend: Self::NAME.to_string(),
            message: message.into(),
        }
    }

    fn parse_error(&self, file: &Path, message: impl Into<String>) -> Error {
        Error::Parse {
            backend: Self::NAME.to_string(),
            file: file.to_path_buf(),
            message: message.into(),
        }
    }
}

#[async_trait(?Send)]
impl Backend for PdfiumBackend {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn load(&mut self) -> Result<()> {
        let bindings = match &self.lib_dir {
            Some(dir) => Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(dir)),
            None => Pdfium::bind_to_system_library(),
        }
        .map_err(|e| self.load_error(format!("failed to bind Pdfium: {e}")))?;

        self.pdfium = Some(Pdfium::new(bindings));
        Ok(())
    }

    async fn parse(&mut self, path: &Path) -> Result<ParsedDocument> {
        let pdfium = self
            .pdfium
            .as_ref()
            .ok_or_else(|| self.parse_error(path, "parse called before load"))?;

        let document = pdfium
            .load_pdf_from_file(path, None)
            .map_err(|e| self.parse_error(path, format!("failed to open document: {e}")))?;

        let metadata = document.metadata();
        let mut info = serde_json::Map::new();

        let tags = [
            ("Title", PdfDocumentMetadataTagType::Title),
            ("Author", PdfDocumentMetadataTagType::Author),
            ("Subject", PdfDocumentMetadataTagType::Subject),
            ("Keywords", PdfDocumentMetadataTagType::Keywords),
            ("Creator", PdfDocumentMetadataTagType::Creator),
            ("Producer", PdfDocumentMetadataTagType::Producer),
            ("CreationDate", PdfDocumentMetadataTagType::CreationDate),
            ("ModificationDate", PdfDocumentMetadataTagType::ModificationDate),
        ];
        for (name, tag_type) in tags {
            if let Some(tag) = metadata.get(tag_type) {
                info.insert(name.to_string(), json!(tag.value()));
            }
        }

        let pages = document.pages();
        info.insert("Pages".to_string(), json!(pages.len()));

        let first_page = pages
            .get(0)
            .map_err(|e| self.parse_error(path, format!("failed to open page 1: {e}")))?;
        let text = first_page
            .text()
            .map_err(|e| self.parse_error(path, format!("failed to extract page 1 text: {e}")))?
            .all();

        let mut parsed = ParsedDocument::new();
        parsed.push_structured("info", serde_json::Value::Object(info));
        parsed.push_text("text", text);

        Ok(parsed)
    }
}
