//! Records flowing between the loader, aggregator, allocator and summarizer

use serde::{Deserialize, Serialize};

/// One row of the order export: a single meal and its quantity within an order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLineItem {
    pub order_id: String,
    pub recipient_name: String,
    pub street: String,
    pub city_state_zip: String,
    pub meal_name: String,
    pub quantity: u32,
}

/// All line items of one order folded together
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub order_id: String,
    pub item_count: u32,
    pub recipient_name: String,
    pub street: String,
    pub city_state_zip: String,
}

impl OrderRecord {
    pub(crate) fn from_line_item(item: &OrderLineItem) -> Self {
        Self {
            order_id: item.order_id.clone(),
            item_count: item.quantity,
            recipient_name: item.recipient_name.clone(),
            street: item.street.clone(),
            city_state_zip: item.city_state_zip.clone(),
        }
    }

    /// Address block as printed on a label, one line per field
    pub fn recipient_text(&self) -> String {
        [
            self.recipient_name.as_str(),
            self.street.as_str(),
            self.city_state_zip.as_str(),
        ]
        .join("\n")
    }

    /// Single-line address used to deduplicate BOL destinations
    pub fn destination(&self) -> String {
        [
            self.recipient_name.as_str(),
            self.street.as_str(),
            self.city_state_zip.as_str(),
        ]
        .join(", ")
    }
}

/// Anchor point of a label on a physical page, in centimetres
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One physical label to draw
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelRequest {
    pub recipient_text: String,
    pub order_id: String,
    pub position: Position,
    pub is_new_page: bool,
}

/// One BOL cargo line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CargoEntry {
    pub order_id: String,
    pub meal_code: String,
    pub description: String,
    pub quantity: u32,
}

/// Everything the BOL renderer needs, written out as the intermediate manifest file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BolManifest {
    pub boxes: u64,
    pub cargo: Vec<CargoEntry>,
    /// Distinct order ids of `cargo`, comma separated
    pub order_ids: String,
    pub destinations: Vec<String>,
    /// Cargo groups left out because their meal has no carrier code
    #[serde(default)]
    pub dropped_lines: usize,
}
