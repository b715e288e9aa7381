//! Configuration parsing for a shipping batch
//!
//! Every section of the TOML file is optional. The defaults reproduce the
//! letter-sheet and 4x3 thermal label layouts, the shipper block and the
//! carrier code table used for the weekly meal shipments.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ShippingError;
use crate::model::Position;

/// Meal name as it appears in the order export, mapped to its carrier code
pub type MealCodeTable = BTreeMap<String, String>;

/// Main configuration structure loaded from TOML files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingConfig {
    /// Allocation and input discovery settings
    #[serde(default)]
    pub batch: BatchConfig,
    /// Return address block printed on every label and the BOL
    #[serde(default)]
    pub shipper: ShipperConfig,
    /// Label formats, one allocation pass each
    #[serde(default = "default_formats")]
    pub formats: Vec<LabelFormat>,
    /// Bill of lading output settings
    #[serde(default)]
    pub bol: BolConfig,
    /// Carrier codes; meals missing here are left off the BOL
    #[serde(default = "default_meal_codes")]
    pub meal_codes: MealCodeTable,
}

impl Default for ShippingConfig {
    fn default() -> Self {
        Self {
            batch: BatchConfig::default(),
            shipper: ShipperConfig::default(),
            formats: default_formats(),
            bol: BolConfig::default(),
            meal_codes: default_meal_codes(),
        }
    }
}

impl ShippingConfig {
    /// Load and validate configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML is malformed, or
    /// the values fail [`ShippingConfig::validate`].
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ShippingError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_str(&content)
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_str(s: &str) -> Result<Self, ShippingError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the allocator cannot work with
    pub fn validate(&self) -> Result<(), ShippingError> {
        if self.batch.per_label_capacity == 0 {
            return Err(ShippingError::InvalidConfig(
                "per_label_capacity must be at least 1".to_string(),
            ));
        }

        let mut names = HashSet::new();
        for format in &self.formats {
            if format.positions.is_empty() {
                return Err(ShippingError::InvalidConfig(format!(
                    "format '{}' has no label positions",
                    format.name
                )));
            }
            if !names.insert(format.name.as_str()) {
                return Err(ShippingError::InvalidConfig(format!(
                    "format '{}' is defined twice",
                    format.name
                )));
            }
        }

        Ok(())
    }

    /// Look up a format by name
    pub fn format(&self, name: &str) -> Option<&LabelFormat> {
        self.formats.iter().find(|f| f.name == name)
    }
}

/// Allocation and input discovery settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Meals that fit in one box, and therefore on one label (default: 6)
    #[serde(default = "default_per_label_capacity")]
    pub per_label_capacity: u32,
    /// File name prefix of auto-discovered exports (default: "orders_export")
    #[serde(default = "default_input_prefix")]
    pub input_prefix: String,
    /// File extension of auto-discovered exports (default: "csv")
    #[serde(default = "default_input_extension")]
    pub input_extension: String,
    /// Directory searched when no input path is given
    #[serde(default)]
    pub downloads_dir: Option<PathBuf>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            per_label_capacity: default_per_label_capacity(),
            input_prefix: default_input_prefix(),
            input_extension: default_input_extension(),
            downloads_dir: None,
        }
    }
}

fn default_per_label_capacity() -> u32 {
    6
}

fn default_input_prefix() -> String {
    "orders_export".to_string()
}

fn default_input_extension() -> String {
    "csv".to_string()
}

/// Shipper identity printed on labels and the BOL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipperConfig {
    #[serde(default = "default_return_address")]
    pub return_address: Vec<String>,
    /// Logo image drawn in the top left corner of each label
    #[serde(default)]
    pub logo: Option<PathBuf>,
}

impl Default for ShipperConfig {
    fn default() -> Self {
        Self {
            return_address: default_return_address(),
            logo: None,
        }
    }
}

fn default_return_address() -> Vec<String> {
    vec![
        "Boulder Valley Meals".to_string(),
        "3645 Wazee St".to_string(),
        "Denver, CO 80216".to_string(),
    ]
}

/// A physical label format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelFormat {
    pub name: String,
    /// Where the rendered PDF is written
    pub output: PathBuf,
    pub page: PageSize,
    /// Label anchors on one page, filled in order
    pub positions: Vec<Position>,
    #[serde(default)]
    pub style: LabelStyle,
}

impl LabelFormat {
    pub fn labels_per_page(&self) -> usize {
        self.positions.len()
    }
}

/// Page dimensions in centimetres
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

/// Geometry and type sizes inside one label, relative to its anchor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelStyle {
    /// Content right bound (cm)
    pub label_width: f64,
    /// Content lower bound (cm)
    pub label_depth: f64,
    pub logo_width: f64,
    /// Distance from the anchor down to the recipient block (cm)
    pub recipient_offset: f64,
    pub return_font_size: f64,
    pub recipient_font_size: f64,
    pub order_font_size: f64,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            label_width: 11.8,
            label_depth: 8.5,
            logo_width: 5.0,
            recipient_offset: 6.0,
            return_font_size: 14.0,
            recipient_font_size: 16.0,
            order_font_size: 16.0,
        }
    }
}

fn default_formats() -> Vec<LabelFormat> {
    let margin = 1.6;
    let mid_x = 14.4;
    let mid_y = 11.75;

    vec![
        LabelFormat {
            name: "letter-4up".to_string(),
            output: PathBuf::from("./export_labels_A4.pdf"),
            page: PageSize {
                width: 27.94,
                height: 21.59,
            },
            positions: vec![
                Position::new(margin, margin),
                Position::new(mid_x, margin),
                Position::new(margin, mid_y),
                Position::new(mid_x, mid_y),
            ],
            style: LabelStyle::default(),
        },
        LabelFormat {
            name: "4x3".to_string(),
            output: PathBuf::from("./export_labels_4x3.pdf"),
            page: PageSize {
                width: 10.16,
                height: 7.62,
            },
            positions: vec![Position::new(0.3, 0.3)],
            style: LabelStyle {
                label_width: 9.2,
                label_depth: 7.0,
                logo_width: 4.0,
                recipient_offset: 5.0,
                return_font_size: 14.0,
                recipient_font_size: 12.0,
                order_font_size: 12.0,
            },
        },
    ]
}

/// Bill of lading output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BolConfig {
    #[serde(default = "default_bol_output")]
    pub output: PathBuf,
    /// Intermediate manifest handed to the BOL renderer
    #[serde(default = "default_bol_manifest")]
    pub manifest: PathBuf,
    /// Leave the manifest on disk after a successful render
    #[serde(default)]
    pub keep_manifest: bool,
}

impl Default for BolConfig {
    fn default() -> Self {
        Self {
            output: default_bol_output(),
            manifest: default_bol_manifest(),
            keep_manifest: false,
        }
    }
}

fn default_bol_output() -> PathBuf {
    PathBuf::from("./export_bol.pdf")
}

fn default_bol_manifest() -> PathBuf {
    PathBuf::from("./tmp-bol.json")
}

fn default_meal_codes() -> MealCodeTable {
    [
        ("Chorizo, Egg, Potato and Rice Burrito Bowl", "BV-BG"),
        ("Potato, Chorizo and Egg Burrito Bowl", "BV-BR"),
        ("Potato, Egg, Sausage, Cheese and Bacon Burrito Bowl", "BV-BY"),
        ("Potato, Sausage and Egg Burrito Bowl", "BV-BO"),
        ("Texas-Inspired Bacon Wrapped Chicken Breasts", "BV-GT"),
        ("Three Cheese Bacon Wrapped Chicken Breasts", "BV-GC"),
    ]
    .into_iter()
    .map(|(name, code)| (name.to_string(), code.to_string()))
    .collect()
}
