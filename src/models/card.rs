use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::{CollectionError, Result};
use crate::models::attributes::{Color, Condition, Rarity, Vocabulary};

/// A collected MTG card.
///
/// Fields are private; every write goes through a validating setter that
/// rejects bad input without touching the stored value.
#[derive(Debug, Clone)]
pub struct Card {
    name: String,
    rarity: Rarity,
    condition: Condition,
    value: f64,
    edition: String,
    card_type: String,
    color: Color,
    mana_cost: u32,
    subtype: String,
    is_foil: bool,
}

impl Default for Card {
    fn default() -> Self {
        Self {
            name: "Unknown".to_string(),
            rarity: Rarity::default(),
            condition: Condition::default(),
            value: 0.0,
            edition: "Unknown".to_string(),
            card_type: "Unknown".to_string(),
            color: Color::default(),
            mana_cost: 0,
            subtype: "None".to_string(),
            is_foil: false,
        }
    }
}

/// Raw, unvalidated field values for building a [`Card`].
///
/// `Default` yields the documented defaults for every field except `name`,
/// which must be supplied.
#[derive(Debug, Clone, PartialEq)]
pub struct CardDraft {
    pub name: String,
    pub rarity: String,
    pub condition: String,
    pub value: f64,
    pub edition: String,
    pub card_type: String,
    pub color: String,
    pub mana_cost: i32,
    pub subtype: String,
    pub is_foil: bool,
}

impl Default for CardDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            rarity: Rarity::default().as_str().to_string(),
            condition: Condition::default().as_str().to_string(),
            value: 0.0,
            edition: "Unknown".to_string(),
            card_type: "Unknown".to_string(),
            color: Color::default().as_str().to_string(),
            mana_cost: 0,
            subtype: "None".to_string(),
            is_foil: false,
        }
    }
}

impl CardDraft {
    /// Validate every field and build the card. The first failing field wins.
    pub fn build(self) -> Result<Card> {
        let mut card = Card::default();
        card.set_name(&self.name)?;
        card.set_rarity(&self.rarity)?;
        card.set_condition(&self.condition)?;
        card.set_value(self.value)?;
        card.set_edition(&self.edition)?;
        card.set_card_type(&self.card_type)?;
        card.set_color(&self.color)?;
        card.set_mana_cost(self.mana_cost)?;
        card.set_subtype(&self.subtype)?;
        card.set_foil(self.is_foil);
        Ok(card)
    }
}

impl TryFrom<CardDraft> for Card {
    type Error = CollectionError;

    fn try_from(draft: CardDraft) -> Result<Self> {
        draft.build()
    }
}

fn non_blank(field: &'static str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CollectionError::BlankField { field });
    }
    Ok(trimmed.to_string())
}

impl Card {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rarity(&self) -> Rarity {
        self.rarity
    }

    pub fn condition(&self) -> Condition {
        self.condition
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn edition(&self) -> &str {
        &self.edition
    }

    pub fn card_type(&self) -> &str {
        &self.card_type
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn mana_cost(&self) -> u32 {
        self.mana_cost
    }

    pub fn subtype(&self) -> &str {
        &self.subtype
    }

    pub fn is_foil(&self) -> bool {
        self.is_foil
    }

    pub fn set_name(&mut self, name: &str) -> Result<()> {
        self.name = non_blank("Card name", name)?;
        Ok(())
    }

    pub fn set_rarity(&mut self, rarity: &str) -> Result<()> {
        self.rarity = Rarity::parse(rarity)?;
        Ok(())
    }

    pub fn set_condition(&mut self, condition: &str) -> Result<()> {
        self.condition = Condition::parse(condition)?;
        Ok(())
    }

    /// Rejects negative amounts and NaN.
    pub fn set_value(&mut self, value: f64) -> Result<()> {
        if value < 0.0 || value.is_nan() {
            return Err(CollectionError::NegativeValue {
                field: "Value",
                value: value.to_string(),
            });
        }
        self.value = value;
        Ok(())
    }

    pub fn set_edition(&mut self, edition: &str) -> Result<()> {
        self.edition = non_blank("Edition", edition)?;
        Ok(())
    }

    pub fn set_card_type(&mut self, card_type: &str) -> Result<()> {
        self.card_type = non_blank("Card type", card_type)?;
        Ok(())
    }

    pub fn set_color(&mut self, color: &str) -> Result<()> {
        self.color = Color::parse(color)?;
        Ok(())
    }

    /// Only negative costs are rejected here; the 0-20 range is an input-layer rule.
    pub fn set_mana_cost(&mut self, mana_cost: i32) -> Result<()> {
        self.mana_cost = u32::try_from(mana_cost).map_err(|_| CollectionError::NegativeValue {
            field: "Mana cost",
            value: mana_cost.to_string(),
        })?;
        Ok(())
    }

    pub fn set_subtype(&mut self, subtype: &str) -> Result<()> {
        self.subtype = non_blank("Card subtype", subtype)?;
        Ok(())
    }

    pub fn set_foil(&mut self, is_foil: bool) {
        self.is_foil = is_foil;
    }

    /// True when both cards share name and edition, ignoring case.
    pub fn same_identity(&self, other: &Card) -> bool {
        self.name.to_lowercase() == other.name.to_lowercase()
            && self.edition.to_lowercase() == other.edition.to_lowercase()
    }
}

/// Equality is card identity (name + edition, case-insensitive), not field equality.
impl PartialEq for Card {
    fn eq(&self, other: &Self) -> bool {
        self.same_identity(other)
    }
}

impl Eq for Card {}

impl Hash for Card {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.to_lowercase().hash(state);
        self.edition.to_lowercase().hash(state);
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Name: {} | Rarity: {} | Condition: {} | Value: ${:.2} | Edition: {} | Type: {} | Color: {} | Mana: {} | Subtype: {} | Foil: {}",
            self.name,
            self.rarity,
            self.condition,
            self.value,
            self.edition,
            self.card_type,
            self.color,
            self.mana_cost,
            self.subtype,
            if self.is_foil { "Yes" } else { "No" }
        )
    }
}

/// One field edit applied through [`Card`]'s validating setters.
#[derive(Debug, Clone, PartialEq)]
pub enum CardUpdate {
    Name(String),
    Rarity(String),
    Condition(String),
    Value(f64),
    Edition(String),
    CardType(String),
    Color(String),
    ManaCost(i32),
    Subtype(String),
    Foil(bool),
    ToggleFoil,
}

impl CardUpdate {
    /// Apply the edit. On error the card is left unchanged.
    pub fn apply(&self, card: &mut Card) -> Result<()> {
        match self {
            CardUpdate::Name(name) => card.set_name(name),
            CardUpdate::Rarity(rarity) => card.set_rarity(rarity),
            CardUpdate::Condition(condition) => card.set_condition(condition),
            CardUpdate::Value(value) => card.set_value(*value),
            CardUpdate::Edition(edition) => card.set_edition(edition),
            CardUpdate::CardType(card_type) => card.set_card_type(card_type),
            CardUpdate::Color(color) => card.set_color(color),
            CardUpdate::ManaCost(cost) => card.set_mana_cost(*cost),
            CardUpdate::Subtype(subtype) => card.set_subtype(subtype),
            CardUpdate::Foil(is_foil) => {
                card.set_foil(*is_foil);
                Ok(())
            }
            CardUpdate::ToggleFoil => {
                card.set_foil(!card.is_foil());
                Ok(())
            }
        }
    }

    /// Human-readable name of the edited field
    pub fn field(&self) -> &'static str {
        match self {
            CardUpdate::Name(_) => "name",
            CardUpdate::Rarity(_) => "rarity",
            CardUpdate::Condition(_) => "condition",
            CardUpdate::Value(_) => "value",
            CardUpdate::Edition(_) => "edition",
            CardUpdate::CardType(_) => "card type",
            CardUpdate::Color(_) => "color",
            CardUpdate::ManaCost(_) => "mana cost",
            CardUpdate::Subtype(_) => "subtype",
            CardUpdate::Foil(_) | CardUpdate::ToggleFoil => "foil status",
        }
    }
}

/// The demonstration cards a fresh collection can be seeded with.
pub fn sample_cards() -> Vec<Card> {
    let drafts = vec![
        CardDraft {
            name: "Black Lotus".to_string(),
            rarity: "Rare".to_string(),
            condition: "Near Mint".to_string(),
            value: 50000.00,
            edition: "Alpha".to_string(),
            card_type: "Artifact".to_string(),
            color: "Colorless".to_string(),
            mana_cost: 0,
            subtype: "Artifact".to_string(),
            is_foil: false,
        },
        CardDraft {
            name: "Lightning Bolt".to_string(),
            rarity: "Common".to_string(),
            condition: "Excellent".to_string(),
            value: 5.50,
            edition: "Unlimited".to_string(),
            card_type: "Instant".to_string(),
            color: "Red".to_string(),
            mana_cost: 1,
            subtype: "Instant".to_string(),
            is_foil: false,
        },
        CardDraft {
            name: "Nicol Bolas, Dragon-God".to_string(),
            rarity: "Mythic Rare".to_string(),
            condition: "Mint".to_string(),
            value: 35.99,
            edition: "War of the Spark".to_string(),
            card_type: "Planeswalker".to_string(),
            color: "Multicolor".to_string(),
            mana_cost: 4,
            subtype: "Elder Dragon Planeswalker".to_string(),
            is_foil: true,
        },
    ];

    drafts
        .into_iter()
        .filter_map(|draft| match draft.build() {
            Ok(card) => Some(card),
            Err(e) => {
                log::warn!("Skipping invalid sample card: {e}");
                None
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "card_tests.rs"]
mod tests;
