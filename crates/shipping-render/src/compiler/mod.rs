//! Typst compilation wrapper with error handling

pub mod errors;
pub mod render;

pub use errors::{CompileError, ErrorSeverity, RenderError};
pub use render::{compile_pdf, validate_syntax};

use std::collections::HashMap;

use typst::foundations::Bytes;

/// Request to render a document
#[derive(Debug, Clone, Default)]
pub struct RenderRequest {
    /// Typst source of the main file
    pub source: String,
    /// Variables injected into sys.inputs
    pub inputs: HashMap<String, serde_json::Value>,
    /// Files mounted next to the main file, keyed by virtual path
    pub assets: HashMap<String, Bytes>,
}

impl RenderRequest {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            ..Self::default()
        }
    }

    pub fn with_input(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.inputs.insert(key.into(), value);
        self
    }

    pub fn with_asset(mut self, path: impl Into<String>, content: impl Into<Bytes>) -> Self {
        self.assets.insert(path.into(), content.into());
        self
    }
}

/// A compiled PDF
#[derive(Debug, Clone)]
pub struct RenderedPdf {
    pub bytes: Vec<u8>,
    pub page_count: usize,
    pub warnings: Vec<CompileError>,
}
