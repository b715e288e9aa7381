//! Label sheet rendering
//!
//! Each allocation pass becomes one Typst document. Labels are placed at their
//! absolute anchors and every order number is drawn as a QR code beside its
//! text form.

use std::collections::HashMap;
use std::path::Path;

use serde_json::{json, Value};
use shipping_core::{LabelFormat, LabelRenderer, LabelRequest, ShipperConfig};

use crate::compiler::{compile_pdf, RenderError, RenderRequest};
use crate::qr;
use crate::templates::{get_template_source, LABEL_SHEET};

/// The shipper block printed on every label and on the bill of lading
#[derive(Debug, Clone, Default)]
pub struct Shipper {
    pub return_address: Vec<String>,
    /// Logo image: file extension and raw bytes
    pub logo: Option<(String, Vec<u8>)>,
}

impl Shipper {
    pub fn new(return_address: Vec<String>) -> Self {
        Self {
            return_address,
            logo: None,
        }
    }

    pub fn with_logo(mut self, extension: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.logo = Some((extension.into(), bytes));
        self
    }

    /// Build from config, reading the logo image if one is configured
    pub fn from_config(config: &ShipperConfig) -> Result<Self, RenderError> {
        let shipper = Self::new(config.return_address.clone());
        match &config.logo {
            Some(path) => {
                let bytes = std::fs::read(path)?;
                Ok(shipper.with_logo(logo_extension(path), bytes))
            }
            None => Ok(shipper),
        }
    }

    /// Virtual path the logo is mounted at
    fn logo_path(&self) -> Option<String> {
        self.logo
            .as_ref()
            .map(|(extension, _)| format!("/logo.{}", extension))
    }

    /// The shipper value handed to templates through sys.inputs
    pub(crate) fn to_input(&self) -> Value {
        json!({
            "return_address": self.return_address,
            "logo": self.logo_path(),
        })
    }

    pub(crate) fn mount_logo(&self, request: RenderRequest) -> RenderRequest {
        match (&self.logo, self.logo_path()) {
            (Some((_, bytes)), Some(path)) => request.with_asset(path, bytes.clone()),
            _ => request,
        }
    }
}

fn logo_extension(path: &Path) -> String {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_else(|| "png".to_string())
}

/// Renders label sheets with the embedded Typst template
#[derive(Debug, Clone)]
pub struct TypstLabelRenderer {
    shipper: Shipper,
}

impl TypstLabelRenderer {
    pub fn new(shipper: Shipper) -> Self {
        Self { shipper }
    }

    fn sheet_input(format: &LabelFormat) -> Value {
        let style = &format.style;
        json!({
            "page_width": format.page.width,
            "page_height": format.page.height,
            "label_width": style.label_width,
            "label_depth": style.label_depth,
            "logo_width": style.logo_width,
            "recipient_offset": style.recipient_offset,
            "return_font_size": style.return_font_size,
            "recipient_font_size": style.recipient_font_size,
            "order_font_size": style.order_font_size,
        })
    }
}

impl LabelRenderer for TypstLabelRenderer {
    type Error = RenderError;

    fn render_labels<I>(&self, format: &LabelFormat, labels: I) -> Result<Vec<u8>, Self::Error>
    where
        I: Iterator<Item = LabelRequest>,
    {
        let mut request = RenderRequest::new(get_template_source(LABEL_SHEET)?);

        // One QR image per order, shared by all of that order's labels
        let mut qr_paths: HashMap<String, String> = HashMap::new();
        let mut entries = Vec::new();

        for label in labels {
            let qr_path = match qr_paths.get(&label.order_id) {
                Some(path) => path.clone(),
                None => {
                    let path = format!("/qr/{}.svg", qr_paths.len());
                    let svg = qr::encode_svg(&label.order_id, 0)?;
                    request = request.with_asset(path.clone(), svg.into_bytes());
                    qr_paths.insert(label.order_id.clone(), path.clone());
                    path
                }
            };

            entries.push(json!({
                "recipient": label.recipient_text.lines().collect::<Vec<_>>(),
                "order_id": label.order_id,
                "qr": qr_path,
                "x": label.position.x,
                "y": label.position.y,
                "new_page": label.is_new_page,
            }));
        }

        let label_count = entries.len();
        let request = self
            .shipper
            .mount_logo(request)
            .with_input("sheet", Self::sheet_input(format))
            .with_input("shipper", self.shipper.to_input())
            .with_input("labels", Value::Array(entries));

        let rendered = compile_pdf(request)?;
        tracing::info!(
            "Rendered {} labels on {} pages for format {} ({} warnings)",
            label_count,
            rendered.page_count,
            format.name,
            rendered.warnings.len()
        );

        Ok(rendered.bytes)
    }
}
