//! Embedded template loader
//!
//! Templates live in `templates/` and are embedded in the binary at compile
//! time.

/// Label sheet template - loaded from templates/label_sheet.typ
pub const LABEL_SHEET_TEMPLATE: &str = include_str!("../../templates/label_sheet.typ");

/// Bill of lading template - loaded from templates/bill_of_lading.typ
pub const BILL_OF_LADING_TEMPLATE: &str = include_str!("../../templates/bill_of_lading.typ");

pub const LABEL_SHEET: &str = "label_sheet";
pub const BILL_OF_LADING: &str = "bill_of_lading";

/// Get an embedded template by name
pub fn get_embedded_template(name: &str) -> Option<&'static str> {
    match name {
        LABEL_SHEET => Some(LABEL_SHEET_TEMPLATE),
        BILL_OF_LADING => Some(BILL_OF_LADING_TEMPLATE),
        _ => None,
    }
}

/// List all available embedded template names
pub fn list_embedded_templates() -> Vec<&'static str> {
    vec![LABEL_SHEET, BILL_OF_LADING]
}
