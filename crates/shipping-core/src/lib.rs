//! Order-to-label allocation and cargo aggregation
//!
//! This crate turns a storefront order export into the data behind a shipping
//! batch:
//! - Loading export rows into line items
//! - Folding line items into one record per order
//! - Allocating labels onto multi-up pages
//! - Summarizing cargo for the bill of lading
//!
//! # Example
//!
//! ```
//! use shipping_core::{allocate, load_line_items, summarize, BatchState, OrderBook, ShippingConfig};
//!
//! # fn example() -> Result<(), shipping_core::ShippingError> {
//! let csv = "Name,Shipping Name,Shipping Street,Shipping City,Shipping Province,Shipping Zip,Lineitem name,Lineitem quantity\n\
//!            #1001,Ada Lovelace,12 Pearl St,Boulder,CO,80302,Potato Sausage and Egg Burrito Bowl,7\n";
//! let config = ShippingConfig::default();
//! let items = load_line_items(csv.as_bytes())?;
//! let book = OrderBook::from_line_items(&items)?;
//!
//! let mut batch = BatchState::new();
//! let format = &config.formats[0];
//! let labels: Vec<_> = allocate(&book, &format.positions, 6, &mut batch).collect();
//! assert_eq!(labels.len(), 2);
//!
//! let manifest = summarize(&items, &config.meal_codes, &batch)?;
//! assert_eq!(manifest.boxes, 2);
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod allocate;
pub mod batch;
pub mod cargo;
pub mod config;
pub mod error;
pub mod input;
pub mod loader;
pub mod model;
pub mod render;

pub use aggregate::OrderBook;
pub use allocate::{allocate, labels_needed, LabelAllocation, PositionCycle, Slot};
pub use batch::BatchState;
pub use cargo::{describe_meal, summarize};
pub use config::{
    BatchConfig, BolConfig, LabelFormat, LabelStyle, MealCodeTable, PageSize, ShipperConfig,
    ShippingConfig,
};
pub use error::ShippingError;
pub use input::resolve_input;
pub use loader::{load_line_items, load_line_items_from_path};
pub use model::{BolManifest, CargoEntry, LabelRequest, OrderLineItem, OrderRecord, Position};
pub use render::{BolRenderer, LabelRenderer};

/// Write the manifest the BOL renderer reads
pub fn write_manifest(
    manifest: &BolManifest,
    path: &std::path::Path,
) -> Result<(), ShippingError> {
    let json = serde_json::to_string_pretty(manifest)?;
    std::fs::write(path, json)?;
    tracing::debug!("Wrote BOL manifest to {}", path.display());
    Ok(())
}
