//! Interfaces to the document renderers
//!
//! The core crate decides what goes on each label and on the bill of lading;
//! drawing it is left to implementations of these traits.

use std::path::Path;

use crate::config::LabelFormat;
use crate::model::LabelRequest;

/// Draws one label sheet document for a format
pub trait LabelRenderer {
    type Error;

    /// Render every label of one allocation pass into a PDF
    ///
    /// A request with `is_new_page` set starts a new physical page.
    fn render_labels<I>(&self, format: &LabelFormat, labels: I) -> Result<Vec<u8>, Self::Error>
    where
        I: Iterator<Item = LabelRequest>;
}

/// Draws the bill of lading from the manifest file written by the batch run
pub trait BolRenderer {
    type Error;

    fn render_bol(&self, manifest_path: &Path) -> Result<Vec<u8>, Self::Error>;
}
