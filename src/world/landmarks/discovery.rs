//! Proximity reveal tracking for the marker catalog.

use std::collections::HashSet;

use super::{MarkerIcon, MarkerRecord};
use crate::world::geo::{self, Coordinate};

/// Reveal progress for the loaded catalog
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DiscoveryProgress {
    /// Total markers in the catalog
    pub total: usize,
    /// Markers revealed this round
    pub revealed: usize,
}

impl DiscoveryProgress {
    /// Revealed fraction in `[0, 1]`
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.revealed as f64 / self.total as f64
        }
    }

    /// Calculate percentage complete
    pub fn percentage(&self) -> f64 {
        self.fraction() * 100.0
    }

    /// Check if fully discovered
    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.revealed >= self.total
    }
}

/// All points of interest for a round and which of them the player has seen.
///
/// A marker is revealed at most once per round, and reveal order is the
/// order in which proximity checks found them.
#[derive(Debug, Default)]
pub struct MarkerCatalog {
    /// Records in load order
    records: Vec<MarkerRecord>,
    /// Indices into `records`, in reveal order
    reveal_order: Vec<usize>,
    /// Fast membership for `reveal_order`
    revealed: HashSet<usize>,
}

impl MarkerCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog holding `records`
    pub fn with_records(records: Vec<MarkerRecord>) -> Self {
        let mut catalog = Self::new();
        catalog.load(records);
        catalog
    }

    /// Replace every record and forget all reveals
    pub fn load(&mut self, records: Vec<MarkerRecord>) {
        self.records = records;
        self.reset();
        tracing::debug!("Marker catalog loaded with {} records", self.records.len());
    }

    /// Forget reveals but keep the records (new round)
    pub fn reset(&mut self) {
        self.reveal_order.clear();
        self.revealed.clear();
    }

    /// Reveal every hidden marker strictly closer than `radius_meters`.
    ///
    /// Returns the newly revealed records in catalog order.
    pub fn check_proximity(&mut self, position: Coordinate, radius_meters: f64) -> Vec<MarkerRecord> {
        let mut newly = Vec::new();
        self.check_proximity_with(position, radius_meters, |record| newly.push(record.clone()));
        newly
    }

    /// Like [`MarkerCatalog::check_proximity`], calling `on_reveal` for each
    /// new reveal instead of collecting them. Returns the reveal count.
    pub fn check_proximity_with<F>(
        &mut self,
        position: Coordinate,
        radius_meters: f64,
        mut on_reveal: F,
    ) -> usize
    where
        F: FnMut(&MarkerRecord),
    {
        let mut count = 0;
        for (index, record) in self.records.iter().enumerate() {
            if self.revealed.contains(&index) {
                continue;
            }
            if geo::distance(position, record.coords) < radius_meters {
                self.revealed.insert(index);
                self.reveal_order.push(index);
                count += 1;
                tracing::debug!(
                    "Revealed '{}' ({}/{})",
                    record.title,
                    self.reveal_order.len(),
                    self.records.len()
                );
                on_reveal(record);
            }
        }
        count
    }

    /// Index of the first record at `coords`
    pub fn position(&self, coords: Coordinate) -> Option<usize> {
        self.records.iter().position(|r| r.coords == coords)
    }

    /// Look up the first record at `coords`
    pub fn get(&self, coords: Coordinate) -> Option<&MarkerRecord> {
        self.position(coords).and_then(|index| self.get_at(index))
    }

    /// Look up a record by catalog index
    pub fn get_at(&self, index: usize) -> Option<&MarkerRecord> {
        self.records.get(index)
    }

    /// Check if any record at `coords` has been revealed
    pub fn is_revealed(&self, coords: Coordinate) -> bool {
        self.records
            .iter()
            .enumerate()
            .any(|(i, r)| r.coords == coords && self.revealed.contains(&i))
    }

    pub fn is_revealed_at(&self, index: usize) -> bool {
        self.revealed.contains(&index)
    }

    /// Revealed records in reveal order
    pub fn revealed(&self) -> Vec<&MarkerRecord> {
        self.reveal_order.iter().map(|&i| &self.records[i]).collect()
    }

    /// Catalog indices of revealed records, in reveal order
    pub fn revealed_indices(&self) -> &[usize] {
        &self.reveal_order
    }

    /// All records in catalog order
    pub fn records(&self) -> &[MarkerRecord] {
        &self.records
    }

    /// Revealed count against total
    pub fn progress(&self) -> DiscoveryProgress {
        DiscoveryProgress {
            total: self.records.len(),
            revealed: self.reveal_order.len(),
        }
    }

    /// Revealed percentage in `[0, 100]`
    pub fn progress_percent(&self) -> f64 {
        self.progress().percentage()
    }

    /// Count of records per icon kind, as (revealed, total)
    pub fn breakdown(&self, icon: &MarkerIcon) -> (usize, usize) {
        self.records
            .iter()
            .enumerate()
            .filter(|(_, r)| &r.icon == icon)
            .fold((0, 0), |(revealed, total), (i, _)| {
                (revealed + usize::from(self.revealed.contains(&i)), total + 1)
            })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
