//! Folding line items into one record per order

use std::collections::HashMap;

use crate::error::ShippingError;
use crate::model::{OrderLineItem, OrderRecord};

/// Orders keyed by id, iterated in order of first appearance
///
/// When several line items of one order disagree on the recipient or address,
/// the first line item wins and later values are ignored. Storefront exports
/// only fill the shipping columns on an order's first row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderBook {
    records: Vec<OrderRecord>,
    index: HashMap<String, usize>,
}

impl OrderBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Aggregate a full set of line items
    pub fn from_line_items<'a, I>(items: I) -> Result<Self, ShippingError>
    where
        I: IntoIterator<Item = &'a OrderLineItem>,
    {
        let mut book = Self::new();
        for item in items {
            book.add(item)?;
        }
        tracing::debug!("Aggregated {} orders", book.len());
        Ok(book)
    }

    /// Fold one line item into its order
    ///
    /// Fails if the order's item count no longer fits in a `u32`; the book is
    /// left unchanged in that case.
    pub fn add(&mut self, item: &OrderLineItem) -> Result<(), ShippingError> {
        match self.index.get(&item.order_id) {
            Some(&i) => {
                let record = &mut self.records[i];
                record.item_count = record.item_count.checked_add(item.quantity).ok_or_else(|| {
                    ShippingError::QuantityOverflow {
                        order_id: item.order_id.clone(),
                    }
                })?;
            }
            None => {
                self.index
                    .insert(item.order_id.clone(), self.records.len());
                self.records.push(OrderRecord::from_line_item(item));
            }
        }
        Ok(())
    }

    pub fn get(&self, order_id: &str) -> Option<&OrderRecord> {
        self.index.get(order_id).map(|&i| &self.records[i])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, OrderRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sum of item counts over all orders
    pub fn total_items(&self) -> u64 {
        self.records.iter().map(|r| u64::from(r.item_count)).sum()
    }
}

impl<'a> IntoIterator for &'a OrderBook {
    type Item = &'a OrderRecord;
    type IntoIter = std::slice::Iter<'a, OrderRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn item(order_id: &str, name: &str, meal: &str, quantity: u32) -> OrderLineItem {
        OrderLineItem {
            order_id: order_id.to_string(),
            recipient_name: name.to_string(),
            street: format!("{} St", name),
            city_state_zip: "Boulder, CO 80302".to_string(),
            meal_name: meal.to_string(),
            quantity,
        }
    }

    #[test]
    fn test_same_order_rows_collapse() {
        let items = vec![item("1001", "Ada", "Meal A", 2), item("1001", "Ada", "Meal B", 5)];
        let book = OrderBook::from_line_items(&items).unwrap();

        assert_eq!(book.len(), 1);
        assert_eq!(book.get("1001").unwrap().item_count, 7);
    }

    #[test]
    fn test_first_appearance_order() {
        let items = vec![
            item("1003", "C", "M", 1),
            item("1001", "A", "M", 1),
            item("1003", "C", "M", 1),
            item("1002", "B", "M", 1),
        ];
        let book = OrderBook::from_line_items(&items).unwrap();

        let ids: Vec<&str> = book.iter().map(|r| r.order_id.as_str()).collect();
        assert_eq!(ids, vec!["1003", "1001", "1002"]);
    }

    #[test]
    fn test_first_seen_address_wins() {
        let items = vec![item("1001", "Ada", "M", 1), item("1001", "Grace", "M", 1)];
        let book = OrderBook::from_line_items(&items).unwrap();

        let record = book.get("1001").unwrap();
        assert_eq!(record.recipient_name, "Ada");
        assert_eq!(record.street, "Ada St");
        assert_eq!(record.item_count, 2);
    }

    #[test]
    fn test_item_count_overflow_rejected() {
        let items = vec![
            item("1001", "Ada", "M", u32::MAX),
            item("1002", "Grace", "M", 3),
            item("1001", "Ada", "M", 1),
        ];
        let err = OrderBook::from_line_items(&items).unwrap_err();
        assert!(matches!(err, ShippingError::QuantityOverflow { ref order_id } if order_id == "1001"));
    }

    #[test]
    fn test_failed_add_leaves_count() {
        let mut book = OrderBook::new();
        book.add(&item("1001", "Ada", "M", u32::MAX)).unwrap();
        assert!(book.add(&item("1001", "Ada", "M", 1)).is_err());
        assert_eq!(book.get("1001").unwrap().item_count, u32::MAX);
    }

    #[test]
    fn test_empty() {
        let book = OrderBook::from_line_items(std::iter::empty()).unwrap();
        assert!(book.is_empty());
        assert_eq!(book.total_items(), 0);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn line_items() -> impl Strategy<Value = Vec<OrderLineItem>> {
        prop::collection::vec((0u8..8, 1u32..20), 1..40).prop_map(|rows| {
            rows.into_iter()
                .map(|(order, quantity)| OrderLineItem {
                    order_id: format!("{}", 1000 + u32::from(order)),
                    recipient_name: format!("Customer {}", order),
                    street: "1 Main St".to_string(),
                    city_state_zip: "Lyons, CO 80540".to_string(),
                    meal_name: "Meal".to_string(),
                    quantity,
                })
                .collect()
        })
    }

    proptest! {
        /// Property: item_count is the sum of the order's quantities
        #[test]
        fn item_count_is_sum_of_quantities(items in line_items()) {
            let book = OrderBook::from_line_items(&items).unwrap();
            for record in &book {
                let expected: u32 = items
                    .iter()
                    .filter(|i| i.order_id == record.order_id)
                    .map(|i| i.quantity)
                    .sum();
                prop_assert_eq!(record.item_count, expected);
            }
        }

        /// Property: row order does not change any order's item_count
        #[test]
        fn item_count_independent_of_row_order(items in line_items()) {
            let forward = OrderBook::from_line_items(&items).unwrap();
            let reversed: Vec<OrderLineItem> = items.iter().rev().cloned().collect();
            let backward = OrderBook::from_line_items(&reversed).unwrap();

            prop_assert_eq!(forward.len(), backward.len());
            for record in &forward {
                let other = backward.get(&record.order_id).unwrap();
                prop_assert_eq!(record.item_count, other.item_count);
            }
        }
    }
}
