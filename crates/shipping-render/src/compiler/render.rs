//! Core rendering logic
//!
//! Compiles a Typst document in a [`VirtualWorld`] and exports it to PDF.
//! Compilation is synchronous; a batch renders its documents one after the
//! other.

use typst::diag::{Severity, SourceDiagnostic};

use super::errors::{CompileError, RenderError};
use super::{RenderRequest, RenderedPdf};
use crate::world::VirtualWorld;

/// Compile a Typst document to PDF
pub fn compile_pdf(request: RenderRequest) -> Result<RenderedPdf, RenderError> {
    let world = VirtualWorld::new(request.source, request.inputs, request.assets)?;

    // Warned<Result<Document, EcoVec<SourceDiagnostic>>> - access .output field
    let warned = typst::compile(&world);
    let (_, warnings) = categorize_diagnostics(&warned.warnings);
    for warning in &warnings {
        tracing::warn!("Typst warning: {}", warning);
    }

    let document = match warned.output {
        Ok(document) => document,
        Err(diagnostics) => {
            let (errors, _) = categorize_diagnostics(&diagnostics);
            if errors.is_empty() {
                return Err(RenderError::CompileFailed(vec![CompileError::new(
                    "Compilation failed with unknown error",
                )]));
            }
            return Err(RenderError::CompileFailed(errors));
        }
    };

    let bytes = typst_pdf::pdf(&document, &typst_pdf::PdfOptions::default()).map_err(|diagnostics| {
        let (errors, _) = categorize_diagnostics(&diagnostics);
        RenderError::ExportFailed(
            errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; "),
        )
    })?;

    Ok(RenderedPdf {
        bytes,
        page_count: document.pages.len(),
        warnings,
    })
}

/// Validate Typst syntax without full compilation
pub fn validate_syntax(source: &str) -> Vec<CompileError> {
    use typst::syntax::parse;

    let parsed = parse(source);

    parsed
        .errors()
        .into_iter()
        .map(|error| CompileError::new(error.message.to_string()))
        .collect()
}

/// Categorize diagnostics into errors and warnings
fn categorize_diagnostics(
    diagnostics: &[SourceDiagnostic],
) -> (Vec<CompileError>, Vec<CompileError>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    for diag in diagnostics {
        let mut compile_error = CompileError::new(diag.message.to_string());

        if !diag.hints.is_empty() {
            let hint = diag
                .hints
                .iter()
                .map(|h| h.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            compile_error = compile_error.with_hint(hint);
        }

        match diag.severity {
            Severity::Error => errors.push(compile_error),
            Severity::Warning => warnings.push(compile_error.as_warning()),
        }
    }

    (errors, warnings)
}
