//! Shipping batch runner
//!
//! Drives one batch from an order export to the finished documents: a label
//! sheet PDF per configured format and the bill of lading.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use shipping_core::{
    allocate, load_line_items_from_path, summarize, write_manifest, BatchState, BolManifest,
    BolRenderer, LabelRenderer, OrderBook, ShippingConfig,
};
use shipping_render::{Shipper, TypstBolRenderer, TypstLabelRenderer};

/// Labels written for one format pass
#[derive(Debug, Clone, PartialEq)]
pub struct FormatReport {
    pub name: String,
    pub output: PathBuf,
    pub labels: u64,
}

/// What a batch run produced
#[derive(Debug, Clone)]
pub struct BatchReport {
    pub line_items: usize,
    pub orders: usize,
    /// Empty when the export held no orders
    pub formats: Vec<FormatReport>,
    pub bol: PathBuf,
    pub manifest: BolManifest,
}

/// Run a full batch for the export at `input`
///
/// Every row is validated before anything is written. Label sheets are written
/// as each format pass finishes, so a failing bill of lading leaves them in
/// place.
pub fn run_batch(config: &ShippingConfig, input: &Path) -> Result<BatchReport> {
    let items = load_line_items_from_path(input)
        .with_context(|| format!("Failed to load order export {}", input.display()))?;
    let book = OrderBook::from_line_items(&items)?;
    tracing::info!(
        "Loaded {} line items for {} orders ({} items)",
        items.len(),
        book.len(),
        book.total_items()
    );

    let shipper = Shipper::from_config(&config.shipper).context("Failed to load shipper logo")?;
    let capacity = config.batch.per_label_capacity;

    let mut batch = BatchState::new();
    let mut formats = Vec::new();

    if book.is_empty() {
        tracing::warn!("Order export {} has no orders, skipping labels", input.display());
    } else {
        let renderer = TypstLabelRenderer::new(shipper.clone());
        for format in &config.formats {
            let mut pass = BatchState::new();
            let labels = allocate(&book, &format.positions, capacity, &mut pass);
            let pdf = renderer
                .render_labels(format, labels)
                .with_context(|| format!("Failed to render {} labels", format.name))?;
            fs::write(&format.output, pdf)
                .with_context(|| format!("Failed to write {}", format.output.display()))?;

            tracing::info!(
                "Wrote {} {} labels to {}",
                pass.total_boxes(),
                format.name,
                format.output.display()
            );
            formats.push(FormatReport {
                name: format.name.clone(),
                output: format.output.clone(),
                labels: pass.total_boxes(),
            });
            batch.merge(pass);
        }
    }

    let manifest = summarize(&items, &config.meal_codes, &batch)?;
    write_bol(config, shipper, &manifest)?;

    Ok(BatchReport {
        line_items: items.len(),
        orders: book.len(),
        formats,
        bol: config.bol.output.clone(),
        manifest,
    })
}

fn write_bol(config: &ShippingConfig, shipper: Shipper, manifest: &BolManifest) -> Result<()> {
    let manifest_path = &config.bol.manifest;
    write_manifest(manifest, manifest_path)
        .with_context(|| format!("Failed to write manifest {}", manifest_path.display()))?;

    let pdf = TypstBolRenderer::new(shipper)
        .render_bol(manifest_path)
        .context("Failed to render bill of lading")?;
    fs::write(&config.bol.output, pdf)
        .with_context(|| format!("Failed to write {}", config.bol.output.display()))?;
    tracing::info!(
        "Wrote bill of lading for {} boxes to {}",
        manifest.boxes,
        config.bol.output.display()
    );

    if !config.bol.keep_manifest {
        discard_manifest(manifest_path);
    }
    Ok(())
}

/// Remove the intermediate manifest once the BOL is on disk
///
/// The BOL is already written when this runs; failures are only logged.
fn discard_manifest(path: &Path) -> bool {
    match fs::remove_file(path) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("Could not remove manifest {}: {}", path.display(), e);
            false
        }
    }
}
