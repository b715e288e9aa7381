//! Document templates

pub mod embedded;

pub use embedded::{get_embedded_template, list_embedded_templates, BILL_OF_LADING, LABEL_SHEET};

use crate::compiler::RenderError;

/// Load a template's source by name
pub fn get_template_source(name: &str) -> Result<String, RenderError> {
    get_embedded_template(name)
        .map(str::to_string)
        .ok_or_else(|| RenderError::TemplateNotFound(name.to_string()))
}
