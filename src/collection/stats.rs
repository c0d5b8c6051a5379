//! Collection aggregates.

use log::debug;

use super::CardCollection;
use crate::error::{CollectionError, Result};
use crate::models::{Rarity, Vocabulary};

/// Snapshot of collection statistics
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionStats {
    pub count: usize,
    pub total_value: f64,
    pub average_value: f64,
    /// One entry per rarity, in presentation order
    pub by_rarity: Vec<(Rarity, usize)>,
}

impl CollectionStats {
    /// Count of cards with the given rarity
    pub fn rarity_count(&self, rarity: Rarity) -> usize {
        self.by_rarity
            .iter()
            .find(|(r, _)| *r == rarity)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }
}

impl CardCollection {
    /// Mean card value. Fails with [`CollectionError::DivideByZero`] when empty.
    pub fn average_value(&self) -> Result<f64> {
        if self.is_empty() {
            return Err(CollectionError::DivideByZero);
        }
        Ok(self.total_value() / self.len() as f64)
    }

    /// Computes statistics, or `None` for an empty collection.
    pub fn statistics(&self) -> Option<CollectionStats> {
        if self.is_empty() {
            debug!("No statistics available - collection is empty");
            return None;
        }

        let total_value = self.total_value();
        let average_value = self.average_value().ok()?;
        let by_rarity = Rarity::all()
            .iter()
            .map(|rarity| {
                let count = self.iter().filter(|card| card.rarity() == *rarity).count();
                (*rarity, count)
            })
            .collect();

        Some(CollectionStats {
            count: self.len(),
            total_value,
            average_value,
            by_rarity,
        })
    }
}
