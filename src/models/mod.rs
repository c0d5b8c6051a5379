//! Card data model: closed vocabularies and the validated card record.

mod attributes;
mod card;

pub use attributes::{Color, Condition, Rarity, Vocabulary};
pub use card::{sample_cards, Card, CardDraft, CardUpdate};
