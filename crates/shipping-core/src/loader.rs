//! Order export loader
//!
//! Reads the storefront's order CSV into [`OrderLineItem`]s, one per row, in
//! file order. Only the columns below are read; any others are ignored.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};

use crate::error::ShippingError;
use crate::model::OrderLineItem;

pub const COL_ORDER: &str = "Name";
pub const COL_SHIP_NAME: &str = "Shipping Name";
pub const COL_SHIP_STREET: &str = "Shipping Street";
pub const COL_SHIP_CITY: &str = "Shipping City";
pub const COL_SHIP_PROVINCE: &str = "Shipping Province";
pub const COL_SHIP_ZIP: &str = "Shipping Zip";
pub const COL_ITEM_NAME: &str = "Lineitem name";
pub const COL_ITEM_QUANTITY: &str = "Lineitem quantity";

/// Marker the storefront puts in front of order numbers ("#1001")
const ORDER_MARKER: char = '#';

/// Column indices resolved from the header row
struct Columns {
    order: usize,
    name: usize,
    street: usize,
    city: usize,
    province: usize,
    zip: usize,
    item_name: usize,
    quantity: usize,
}

impl Columns {
    fn resolve(headers: &[String]) -> Result<Self, ShippingError> {
        let find = |column: &str| {
            headers
                .iter()
                .position(|h| h == column)
                .ok_or_else(|| ShippingError::MissingColumn(column.to_string()))
        };

        Ok(Self {
            order: find(COL_ORDER)?,
            name: find(COL_SHIP_NAME)?,
            street: find(COL_SHIP_STREET)?,
            city: find(COL_SHIP_CITY)?,
            province: find(COL_SHIP_PROVINCE)?,
            zip: find(COL_SHIP_ZIP)?,
            item_name: find(COL_ITEM_NAME)?,
            quantity: find(COL_ITEM_QUANTITY)?,
        })
    }
}

/// Load line items from an order export on disk
pub fn load_line_items_from_path(path: &Path) -> Result<Vec<OrderLineItem>, ShippingError> {
    if !path.is_file() {
        return Err(ShippingError::InputNotFound(path.to_path_buf()));
    }

    let file = File::open(path)?;
    let items = load_line_items(file)?;
    tracing::info!("Loaded {} line items from {}", items.len(), path.display());
    Ok(items)
}

/// Load line items from any CSV source
pub fn load_line_items<R: Read>(source: R) -> Result<Vec<OrderLineItem>, ShippingError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(source);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    let columns = Columns::resolve(&headers)?;

    let mut items = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let record = result?;
        let row = index + 1;

        if record.iter().all(|v| v.trim().is_empty()) {
            continue;
        }

        items.push(parse_row(&record, &columns, row)?);
    }

    Ok(items)
}

/// Strip the storefront's order marker from an order number
pub fn normalize_order_id(raw: &str) -> &str {
    raw.trim().trim_start_matches(ORDER_MARKER)
}

fn parse_row(
    record: &StringRecord,
    columns: &Columns,
    row: usize,
) -> Result<OrderLineItem, ShippingError> {
    let field = |index: usize, column: &str| {
        record
            .get(index)
            .map(str::trim)
            .ok_or_else(|| ShippingError::MissingField {
                row,
                column: column.to_string(),
            })
    };

    let order_id = normalize_order_id(field(columns.order, COL_ORDER)?);
    if order_id.is_empty() {
        return Err(ShippingError::MissingField {
            row,
            column: COL_ORDER.to_string(),
        });
    }

    let raw_quantity = field(columns.quantity, COL_ITEM_QUANTITY)?;
    let quantity = parse_quantity(raw_quantity).ok_or_else(|| ShippingError::InvalidQuantity {
        row,
        value: raw_quantity.to_string(),
    })?;

    let city_state_zip = format!(
        "{}, {} {}",
        field(columns.city, COL_SHIP_CITY)?,
        field(columns.province, COL_SHIP_PROVINCE)?,
        field(columns.zip, COL_SHIP_ZIP)?,
    );

    Ok(OrderLineItem {
        order_id: order_id.to_string(),
        recipient_name: field(columns.name, COL_SHIP_NAME)?.to_string(),
        street: field(columns.street, COL_SHIP_STREET)?.to_string(),
        city_state_zip,
        meal_name: field(columns.item_name, COL_ITEM_NAME)?.to_string(),
        quantity,
    })
}

fn parse_quantity(raw: &str) -> Option<u32> {
    raw.parse::<u32>().ok().filter(|q| *q >= 1)
}
