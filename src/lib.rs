//! Card Tracker - MTG Card Collection Manager
//!
//! Keeps a personal collection of Magic: The Gathering cards with validated
//! records, search and filter queries, statistics, and CSV import/export.

pub mod collection;
pub mod error;
pub mod formatters;
pub mod models;

pub use collection::{CardCollection, CollectionStats, ImportReport, DEFAULT_COLLECTION_NAME};
pub use error::{CollectionError, Result};
pub use formatters::{format_card_details, format_card_list, format_statistics};
pub use models::{sample_cards, Card, CardDraft, CardUpdate, Color, Condition, Rarity, Vocabulary};
