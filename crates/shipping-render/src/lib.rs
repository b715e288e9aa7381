//! Typst rendering for shipping documents
//!
//! This crate draws the documents of a shipping batch with an in-memory Typst
//! compiler:
//! - Label sheets, one PDF per label format
//! - The bill of lading, from the manifest file
//! - QR codes of order numbers, embedded as SVG

pub mod bol;
pub mod compiler;
pub mod labels;
pub mod qr;
pub mod templates;
pub mod world;

pub use bol::TypstBolRenderer;
pub use compiler::{compile_pdf, CompileError, RenderError, RenderRequest, RenderedPdf};
pub use labels::{Shipper, TypstLabelRenderer};
