//! Cargo manifest for the bill of lading
//!
//! Line items are grouped by (meal, order) and their quantities summed. Meals
//! without a carrier code are left off the manifest; they still count toward
//! the order's item total and therefore its boxes.

use std::collections::{HashMap, HashSet};

use crate::batch::BatchState;
use crate::config::MealCodeTable;
use crate::error::ShippingError;
use crate::model::{BolManifest, CargoEntry, OrderLineItem};

pub const DESCRIPTION_PREFIX: &str = "Frozen meal: ";
pub const DESCRIPTION_MAX_CHARS: usize = 32;

/// BOL description for a meal: commas dropped, cut to 32 characters, prefixed
pub fn describe_meal(meal_name: &str) -> String {
    let trimmed: String = meal_name
        .chars()
        .filter(|c| *c != ',')
        .take(DESCRIPTION_MAX_CHARS)
        .collect();
    format!("{}{}", DESCRIPTION_PREFIX, trimmed)
}

/// Build the BOL manifest
///
/// `batch` must be read after every allocation pass that the BOL should
/// reflect has finished.
pub fn summarize(
    items: &[OrderLineItem],
    meal_codes: &MealCodeTable,
    batch: &BatchState,
) -> Result<BolManifest, ShippingError> {
    // (meal, order) groups in order of first appearance
    let mut groups: Vec<(&str, &str, u32)> = Vec::new();
    let mut index: HashMap<(&str, &str), usize> = HashMap::new();
    for item in items {
        let key = (item.meal_name.as_str(), item.order_id.as_str());
        match index.get(&key) {
            Some(&i) => {
                groups[i].2 = groups[i].2.checked_add(item.quantity).ok_or_else(|| {
                    ShippingError::QuantityOverflow {
                        order_id: item.order_id.clone(),
                    }
                })?;
            }
            None => {
                index.insert(key, groups.len());
                groups.push((key.0, key.1, item.quantity));
            }
        }
    }

    let mut cargo = Vec::with_capacity(groups.len());
    let mut dropped_lines = 0;
    for (meal_name, order_id, quantity) in groups {
        let Some(meal_code) = meal_codes.get(meal_name) else {
            tracing::debug!("No carrier code for '{}' (order {})", meal_name, order_id);
            dropped_lines += 1;
            continue;
        };
        cargo.push(CargoEntry {
            order_id: order_id.to_string(),
            meal_code: meal_code.clone(),
            description: describe_meal(meal_name),
            quantity,
        });
    }

    if dropped_lines > 0 {
        tracing::warn!(
            "{} cargo line(s) left off the bill of lading: meal has no carrier code",
            dropped_lines
        );
    }

    cargo.sort_by(|a, b| {
        order_sort_key(&a.order_id)
            .cmp(&order_sort_key(&b.order_id))
            .then_with(|| a.meal_code.cmp(&b.meal_code))
    });

    let mut seen = HashSet::new();
    let order_ids: Vec<&str> = cargo
        .iter()
        .map(|entry| entry.order_id.as_str())
        .filter(|id| seen.insert(*id))
        .collect();
    let order_ids = order_ids.join(", ");

    Ok(BolManifest {
        boxes: batch.total_boxes(),
        cargo,
        order_ids,
        destinations: batch.destinations().to_vec(),
        dropped_lines,
    })
}

/// Numeric order ids sort numerically, anything else after them
fn order_sort_key(order_id: &str) -> (u64, &str) {
    (order_id.parse().unwrap_or(u64::MAX), order_id)
}
