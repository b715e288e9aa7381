//! Bill of lading rendering
//!
//! The manifest file written by the batch run is mounted as `/bol.json` and
//! read by the template with Typst's `json()`.

use std::path::Path;

use shipping_core::BolRenderer;

use crate::compiler::{compile_pdf, RenderError, RenderRequest};
use crate::labels::Shipper;
use crate::templates::{get_template_source, BILL_OF_LADING};

const MANIFEST_PATH: &str = "/bol.json";

/// Renders the bill of lading with the embedded Typst template
#[derive(Debug, Clone)]
pub struct TypstBolRenderer {
    shipper: Shipper,
}

impl TypstBolRenderer {
    pub fn new(shipper: Shipper) -> Self {
        Self { shipper }
    }
}

impl BolRenderer for TypstBolRenderer {
    type Error = RenderError;

    fn render_bol(&self, manifest_path: &Path) -> Result<Vec<u8>, Self::Error> {
        let manifest = std::fs::read(manifest_path)?;

        // Catch a malformed manifest here rather than as a template error
        serde_json::from_slice::<serde_json::Value>(&manifest)?;

        let request = RenderRequest::new(get_template_source(BILL_OF_LADING)?)
            .with_asset(MANIFEST_PATH, manifest)
            .with_input("shipper", self.shipper.to_input());

        let rendered = compile_pdf(request)?;
        tracing::info!(
            "Rendered bill of lading from {} ({} pages, {} warnings)",
            manifest_path.display(),
            rendered.page_count,
            rendered.warnings.len()
        );

        Ok(rendered.bytes)
    }
}
