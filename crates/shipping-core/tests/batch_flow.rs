//! Whole-batch checks: export rows through both label passes into the BOL manifest

use pretty_assertions::assert_eq;
use shipping_core::{
    allocate, labels_needed, load_line_items, summarize, BatchState, CargoEntry, LabelRequest,
    OrderBook, ShippingConfig, ShippingError,
};

const HEADER: &str = "Name,Email,Financial Status,Shipping Name,Shipping Street,Shipping City,Shipping Province,Shipping Zip,Lineitem name,Lineitem quantity";

fn export(rows: &[&str]) -> String {
    let mut csv = String::from(HEADER);
    for row in rows {
        csv.push('\n');
        csv.push_str(row);
    }
    csv.push('\n');
    csv
}

fn weekly_export() -> String {
    export(&[
        r#"#1001,ada@example.com,paid,Ada Lovelace,12 Pearl St,Boulder,CO,80302,"Potato, Egg, Sausage, Cheese and Bacon Burrito Bowl",3"#,
        r#"#1001,ada@example.com,paid,,,,,,"Potato, Egg, Sausage, Cheese and Bacon Burrito Bowl",4"#,
        r#"#1002,grace@example.com,paid,Grace Hopper,7 Walnut St,Boulder,CO,80302,Three Cheese Bacon Wrapped Chicken Breasts,2"#,
        r#"#1002,grace@example.com,paid,,,,,,Seasonal Squash Soup,5"#,
        r#"#1003,alan@example.com,paid,Ada Lovelace,12 Pearl St,Boulder,CO,80302,"Potato, Sausage and Egg Burrito Bowl",12"#,
    ])
}

struct Run {
    letter: Vec<LabelRequest>,
    thermal: Vec<LabelRequest>,
    batch: BatchState,
}

fn run_both_formats(config: &ShippingConfig, book: &OrderBook) -> Run {
    let capacity = config.batch.per_label_capacity;
    let letter_format = config.format("letter-4up").unwrap();
    let thermal_format = config.format("4x3").unwrap();

    let mut batch = BatchState::new();
    let letter = allocate(book, &letter_format.positions, capacity, &mut batch).collect();
    let thermal = allocate(book, &thermal_format.positions, capacity, &mut batch).collect();
    Run {
        letter,
        thermal,
        batch,
    }
}

#[test]
fn test_weekly_batch() {
    let config = ShippingConfig::default();
    let items = load_line_items(weekly_export().as_bytes()).unwrap();
    let book = OrderBook::from_line_items(&items).unwrap();

    assert_eq!(items.len(), 5);
    assert_eq!(book.len(), 3);
    assert_eq!(book.get("1001").unwrap().item_count, 7);
    // the unmapped soup still counts toward the order's boxes
    assert_eq!(book.get("1002").unwrap().item_count, 7);
    assert_eq!(book.get("1003").unwrap().item_count, 12);

    let run = run_both_formats(&config, &book);
    assert_eq!(run.letter.len(), 6);
    assert_eq!(run.thermal.len(), 6);

    let letter_pages = run.letter.iter().filter(|l| l.is_new_page).count();
    assert_eq!(letter_pages, 2);
    assert!(run.thermal.iter().all(|l| l.is_new_page));

    // two passes: every box counted once per format
    assert_eq!(run.batch.total_boxes(), 12);
    assert_eq!(
        run.batch.total_boxes(),
        (run.letter.len() + run.thermal.len()) as u64
    );
    assert_eq!(
        run.batch.destinations(),
        [
            "Ada Lovelace, 12 Pearl St, Boulder, CO 80302".to_string(),
            "Grace Hopper, 7 Walnut St, Boulder, CO 80302".to_string(),
        ]
    );

    let manifest = summarize(&items, &config.meal_codes, &run.batch).unwrap();
    assert_eq!(manifest.boxes, 12);
    assert_eq!(manifest.dropped_lines, 1);
    assert_eq!(manifest.order_ids, "1001, 1002, 1003");
    assert_eq!(
        manifest.cargo,
        vec![
            CargoEntry {
                order_id: "1001".to_string(),
                meal_code: "BV-BY".to_string(),
                description: "Frozen meal: Potato Egg Sausage Cheese and Ba".to_string(),
                quantity: 7,
            },
            CargoEntry {
                order_id: "1002".to_string(),
                meal_code: "BV-GC".to_string(),
                description: "Frozen meal: Three Cheese Bacon Wrapped Chick".to_string(),
                quantity: 2,
            },
            CargoEntry {
                order_id: "1003".to_string(),
                meal_code: "BV-BO".to_string(),
                description: "Frozen meal: Potato Sausage and Egg Burrito B".to_string(),
                quantity: 12,
            },
        ]
    );
}

#[test]
fn test_labels_per_order_match_item_counts() {
    let config = ShippingConfig::default();
    let items = load_line_items(weekly_export().as_bytes()).unwrap();
    let book = OrderBook::from_line_items(&items).unwrap();
    let run = run_both_formats(&config, &book);

    for record in &book {
        let expected = labels_needed(record.item_count, 6) as usize;
        let letter = run
            .letter
            .iter()
            .filter(|l| l.order_id == record.order_id)
            .count();
        let thermal = run
            .thermal
            .iter()
            .filter(|l| l.order_id == record.order_id)
            .count();
        assert_eq!(letter, expected);
        assert_eq!(thermal, expected);
    }
}

#[test]
fn test_two_rows_two_meals_one_order() {
    let config = ShippingConfig::default();
    let csv = export(&[
        r#"#1001,,,Ada Lovelace,12 Pearl St,Boulder,CO,80302,"Potato, Chorizo and Egg Burrito Bowl",2"#,
        r#"#1001,,,Ada Lovelace,12 Pearl St,Boulder,CO,80302,Texas-Inspired Bacon Wrapped Chicken Breasts,5"#,
    ]);
    let items = load_line_items(csv.as_bytes()).unwrap();
    let book = OrderBook::from_line_items(&items).unwrap();

    assert_eq!(book.len(), 1);
    assert_eq!(book.get("1001").unwrap().item_count, 7);

    let manifest = summarize(&items, &config.meal_codes, &BatchState::new()).unwrap();
    let codes: Vec<&str> = manifest.cargo.iter().map(|e| e.meal_code.as_str()).collect();
    assert_eq!(codes, vec!["BV-BR", "BV-GT"]);
    assert!(manifest.cargo.iter().all(|e| e.order_id == "1001"));
}

#[test]
fn test_malformed_row_aborts() {
    let csv = export(&[
        "#1001,,,Ada Lovelace,12 Pearl St,Boulder,CO,80302,Meal,2",
        "#1002,,,Grace Hopper,7 Walnut St,Boulder,CO,80302,Meal,two",
    ]);
    assert!(load_line_items(csv.as_bytes()).is_err());
}

#[test]
fn test_quantities_past_u32_rejected() {
    let config = ShippingConfig::default();
    let csv = export(&[
        r#"#1001,,,Ada Lovelace,12 Pearl St,Boulder,CO,80302,"Potato, Sausage and Egg Burrito Bowl",4294967295"#,
        r#"#1001,,,Ada Lovelace,12 Pearl St,Boulder,CO,80302,"Potato, Sausage and Egg Burrito Bowl",1"#,
    ]);
    // Each row is valid on its own
    let items = load_line_items(csv.as_bytes()).unwrap();
    assert_eq!(items.len(), 2);

    assert!(matches!(
        OrderBook::from_line_items(&items),
        Err(ShippingError::QuantityOverflow { .. })
    ));
    assert!(matches!(
        summarize(&items, &config.meal_codes, &BatchState::new()),
        Err(ShippingError::QuantityOverflow { .. })
    ));
}
