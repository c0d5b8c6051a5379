//! The card collection manager.
//!
//! [`CardCollection`] owns an insertion-ordered list of cards and exposes
//! CRUD, search, filtering, statistics and CSV persistence.
//!
//! # Module Structure
//!
//! - [`stats`] - Aggregates (total, average, per-rarity counts)
//! - [`csv_codec`] - CSV export and tolerant row-by-row import
//!
//! # Example
//!
//! ```
//! use card_tracker::{CardCollection, CardDraft};
//!
//! let mut collection = CardCollection::new("Binder");
//! let card = CardDraft { name: "Lightning Bolt".to_string(), ..Default::default() }
//!     .build()
//!     .unwrap();
//! collection.add(card).unwrap();
//!
//! assert_eq!(collection.search_by_name("bolt").len(), 1);
//! ```

pub mod csv_codec;
pub mod stats;

use log::{debug, info, warn};

use crate::error::{CollectionError, Result};
use crate::models::{sample_cards, Card, CardUpdate, Vocabulary};

pub use csv_codec::{ImportReport, CSV_HEADER};
pub use stats::CollectionStats;

/// Label used when no collection name is given
pub const DEFAULT_COLLECTION_NAME: &str = "My MTG Collection";

/// An ordered, in-memory set of cards with a display name.
///
/// Duplicates are allowed; insertion order is the only ordering.
#[derive(Debug, Clone)]
pub struct CardCollection {
    name: String,
    cards: Vec<Card>,
}

impl Default for CardCollection {
    fn default() -> Self {
        Self {
            name: DEFAULT_COLLECTION_NAME.to_string(),
            cards: Vec::new(),
        }
    }
}

impl CardCollection {
    /// Creates an empty collection. A blank name falls back to the default label.
    pub fn new(name: &str) -> Self {
        let mut collection = Self::default();
        if collection.set_name(name).is_err() {
            debug!("Blank collection name, using '{DEFAULT_COLLECTION_NAME}'");
        }
        collection
    }

    /// Creates a collection pre-seeded with the demonstration cards.
    pub fn with_samples(name: &str) -> Self {
        let mut collection = Self::new(name);
        collection.cards.extend(sample_cards());
        collection
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renames the collection. Blank names are rejected and leave the label unchanged.
    pub fn set_name(&mut self, name: &str) -> Result<()> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(CollectionError::BlankField {
                field: "Collection name",
            });
        }
        self.name = trimmed.to_string();
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over cards in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Appends a card and returns the new card count.
    ///
    /// Accepts a `Card` or an `Option<Card>`; `None` is rejected with
    /// [`CollectionError::NullRecord`].
    pub fn add(&mut self, card: impl Into<Option<Card>>) -> Result<usize> {
        let Some(card) = card.into() else {
            warn!("Refusing to add an empty card record");
            return Err(CollectionError::NullRecord);
        };

        debug!("Card '{}' added to collection '{}'", card.name(), self.name);
        self.cards.push(card);
        Ok(self.cards.len())
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.cards.len() {
            warn!(
                "Invalid card index {index}, collection holds {} card(s)",
                self.cards.len()
            );
            return Err(CollectionError::IndexOutOfRange {
                index,
                len: self.cards.len(),
            });
        }
        Ok(())
    }

    /// Removes and returns the card at `index`, shifting later cards down.
    pub fn remove_by_index(&mut self, index: usize) -> Result<Card> {
        self.check_index(index)?;
        let removed = self.cards.remove(index);
        info!("Card '{}' removed from collection", removed.name());
        Ok(removed)
    }

    /// Removes the first card whose name matches exactly, ignoring case.
    pub fn remove_by_name(&mut self, name: &str) -> Result<Card> {
        let wanted = name.to_lowercase();
        let Some(index) = self
            .cards
            .iter()
            .position(|card| card.name().to_lowercase() == wanted)
        else {
            warn!("Card '{name}' not found in collection");
            return Err(CollectionError::NotFound {
                name: name.to_string(),
            });
        };

        let removed = self.cards.remove(index);
        info!("Card '{}' removed from collection", removed.name());
        Ok(removed)
    }

    /// Read-only access to the card at `index`. Edits go through [`modify`](Self::modify).
    pub fn get(&self, index: usize) -> Result<&Card> {
        self.check_index(index)?;
        Ok(&self.cards[index])
    }

    /// Applies one validated field edit to the card at `index`.
    ///
    /// A rejected edit leaves the stored card untouched.
    pub fn modify(&mut self, index: usize, update: &CardUpdate) -> Result<&Card> {
        self.check_index(index)?;
        let card = &mut self.cards[index];
        update.apply(card)?;
        info!("Updated {} of card '{}'", update.field(), card.name());
        Ok(&*card)
    }

    /// Case-insensitive substring search on card name.
    ///
    /// Returns `(index, card)` pairs in insertion order; an empty term matches
    /// every card.
    pub fn search_by_name(&self, term: &str) -> Vec<(usize, &Card)> {
        let needle = term.to_lowercase();
        self.matching(|card| card.name().to_lowercase().contains(&needle))
    }

    /// Case-insensitive exact match on rarity. The filter value is not
    /// validated; an unknown rarity simply matches nothing.
    pub fn filter_by_rarity(&self, rarity: &str) -> Vec<(usize, &Card)> {
        let wanted = rarity.to_lowercase();
        self.matching(|card| card.rarity().as_str().to_lowercase() == wanted)
    }

    /// Case-insensitive exact match on color, with the same rules as
    /// [`filter_by_rarity`](Self::filter_by_rarity).
    pub fn filter_by_color(&self, color: &str) -> Vec<(usize, &Card)> {
        let wanted = color.to_lowercase();
        self.matching(|card| card.color().as_str().to_lowercase() == wanted)
    }

    fn matching<F>(&self, predicate: F) -> Vec<(usize, &Card)>
    where
        F: Fn(&Card) -> bool,
    {
        self.cards
            .iter()
            .enumerate()
            .filter(|(_, card)| predicate(card))
            .collect()
    }

    /// Sum of card values; 0.0 when empty.
    pub fn total_value(&self) -> f64 {
        self.cards.iter().map(Card::value).sum()
    }
}

impl<'a> IntoIterator for &'a CardCollection {
    type Item = &'a Card;
    type IntoIter = std::slice::Iter<'a, Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.iter()
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
