use std::collections::HashSet;

use serde::Serialize;

/// Box counter and destination set accumulated over every allocation pass
///
/// Passed by `&mut` into each pass. Every pass adds to the same counter, so
/// generating two label formats in one run counts each box twice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchState {
    total_boxes: u64,
    /// Destinations in order of first sighting
    destinations: Vec<String>,
    #[serde(skip)]
    seen: HashSet<String>,
}

impl BatchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Account for one emitted label
    pub fn record_label(&mut self, destination: &str) {
        self.total_boxes += 1;
        self.add_destination(destination);
    }

    /// Add a destination; adding a known one is a no-op
    pub fn add_destination(&mut self, destination: &str) {
        if !self.seen.contains(destination) {
            self.seen.insert(destination.to_string());
            self.destinations.push(destination.to_string());
        }
    }

    /// Fold another accumulator into this one
    pub fn merge(&mut self, other: BatchState) {
        self.total_boxes += other.total_boxes;
        for destination in other.destinations {
            self.add_destination(&destination);
        }
    }

    pub fn total_boxes(&self) -> u64 {
        self.total_boxes
    }

    pub fn destinations(&self) -> &[String] {
        &self.destinations
    }
}
