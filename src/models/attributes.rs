//! Closed vocabularies for card rarity, condition and color.
//!
//! Each vocabulary matches input case-insensitively and always stores the
//! canonical spelling, so `"mythic rare"` becomes [`Rarity::MythicRare`] and
//! renders back as `"Mythic Rare"`.

use std::fmt;

use crate::error::{CollectionError, Result};

/// A closed set of accepted labels for one card field.
pub trait Vocabulary: Sized + Copy + 'static {
    /// Field name used in error messages (e.g. "rarity")
    const FIELD: &'static str;

    /// All members in presentation order
    fn all() -> &'static [Self];

    /// Canonical label of this member
    fn as_str(&self) -> &'static str;

    /// Case-insensitive lookup of a label, ignoring surrounding whitespace
    fn parse(value: &str) -> Result<Self> {
        let wanted = value.trim().to_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|member| member.as_str().to_lowercase() == wanted)
            .ok_or_else(|| CollectionError::InvalidEnumeration {
                field: Self::FIELD,
                value: value.to_string(),
                accepted: Self::labels().join(", "),
            })
    }

    /// Canonical labels of all members, for presentation
    fn labels() -> Vec<&'static str> {
        Self::all().iter().map(|member| member.as_str()).collect()
    }
}

/// Card rarity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    MythicRare,
    Special,
}

impl Vocabulary for Rarity {
    const FIELD: &'static str = "rarity";

    fn all() -> &'static [Rarity] {
        &[
            Rarity::Common,
            Rarity::Uncommon,
            Rarity::Rare,
            Rarity::MythicRare,
            Rarity::Special,
        ]
    }

    fn as_str(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::MythicRare => "Mythic Rare",
            Rarity::Special => "Special",
        }
    }
}

/// Physical condition of a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Condition {
    Mint,
    #[default]
    NearMint,
    Excellent,
    Good,
    LightPlayed,
    Played,
    Poor,
    Damaged,
}

impl Vocabulary for Condition {
    const FIELD: &'static str = "condition";

    fn all() -> &'static [Condition] {
        &[
            Condition::Mint,
            Condition::NearMint,
            Condition::Excellent,
            Condition::Good,
            Condition::LightPlayed,
            Condition::Played,
            Condition::Poor,
            Condition::Damaged,
        ]
    }

    fn as_str(&self) -> &'static str {
        match self {
            Condition::Mint => "Mint",
            Condition::NearMint => "Near Mint",
            Condition::Excellent => "Excellent",
            Condition::Good => "Good",
            Condition::LightPlayed => "Light Played",
            Condition::Played => "Played",
            Condition::Poor => "Poor",
            Condition::Damaged => "Damaged",
        }
    }
}

/// Card color identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    White,
    Blue,
    Black,
    Red,
    Green,
    #[default]
    Colorless,
    Multicolor,
}

impl Vocabulary for Color {
    const FIELD: &'static str = "color";

    fn all() -> &'static [Color] {
        &[
            Color::White,
            Color::Blue,
            Color::Black,
            Color::Red,
            Color::Green,
            Color::Colorless,
            Color::Multicolor,
        ]
    }

    fn as_str(&self) -> &'static str {
        match self {
            Color::White => "White",
            Color::Blue => "Blue",
            Color::Black => "Black",
            Color::Red => "Red",
            Color::Green => "Green",
            Color::Colorless => "Colorless",
            Color::Multicolor => "Multicolor",
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
