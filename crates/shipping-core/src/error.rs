use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShippingError {
    #[error("No order export given and none found in {0}")]
    NoInput(PathBuf),

    #[error("File does not exist: {0}")]
    InputNotFound(PathBuf),

    #[error("Order export is missing the '{0}' column")]
    MissingColumn(String),

    #[error("Row {row}: missing value for '{column}'")]
    MissingField { row: usize, column: String },

    #[error("Row {row}: invalid line item quantity '{value}'")]
    InvalidQuantity { row: usize, value: String },

    #[error("Order {order_id}: total quantity is too large")]
    QuantityOverflow { order_id: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
