//! CSV persistence for card collections.
//!
//! Format: a fixed header line followed by one unquoted, comma-separated row
//! per card:
//!
//! ```text
//! Name,Rarity,Condition,Value,Edition,CardType,Color,ManaCost,Subtype,Foil
//! Lightning Bolt,Common,Excellent,5.50,Unlimited,Instant,Red,1,Instant,No
//! ```
//!
//! Fields are written as-is. A comma inside a text field shifts the columns
//! of that row, and import will skip it.

use std::fs::File;
use std::io;
use std::path::Path;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use super::CardCollection;
use crate::error::{CollectionError, Result};
use crate::models::{Card, CardDraft, Vocabulary};

/// Column names, in file order
pub const CSV_HEADER: [&str; 10] = [
    "Name",
    "Rarity",
    "Condition",
    "Value",
    "Edition",
    "CardType",
    "Color",
    "ManaCost",
    "Subtype",
    "Foil",
];

/// One CSV row as raw text
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CardRow {
    name: String,
    rarity: String,
    condition: String,
    value: String,
    edition: String,
    card_type: String,
    color: String,
    mana_cost: String,
    subtype: String,
    foil: String,
}

impl From<&Card> for CardRow {
    fn from(card: &Card) -> Self {
        Self {
            name: card.name().to_string(),
            rarity: card.rarity().as_str().to_string(),
            condition: card.condition().as_str().to_string(),
            value: format_cents(card.value()),
            edition: card.edition().to_string(),
            card_type: card.card_type().to_string(),
            color: card.color().as_str().to_string(),
            mana_cost: card.mana_cost().to_string(),
            subtype: card.subtype().to_string(),
            foil: if card.is_foil() { "Yes" } else { "No" }.to_string(),
        }
    }
}

/// Two-decimal rendering that rounds half-up on the shortest decimal form,
/// so 0.125 is written as `0.13` and 2.675 as `2.68`.
fn format_cents(value: f64) -> String {
    let cents = format!("{value}e2").parse::<f64>().unwrap_or(value * 100.0);
    if !cents.is_finite() {
        return format!("{value:.2}");
    }
    format!("{:.2}", cents.round() / 100.0)
}

impl CardRow {
    /// Builds a validated card, returning a readable reason on failure.
    fn into_card(self) -> std::result::Result<Card, String> {
        let value = self
            .value
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("Value '{}' is not a number", self.value))?;
        let mana_cost = self
            .mana_cost
            .trim()
            .parse::<i32>()
            .map_err(|_| format!("ManaCost '{}' is not a whole number", self.mana_cost))?;
        // Anything other than "Yes" means non-foil
        let is_foil = self.foil.trim().eq_ignore_ascii_case("Yes");

        CardDraft {
            name: self.name,
            rarity: self.rarity,
            condition: self.condition,
            value,
            edition: self.edition,
            card_type: self.card_type,
            color: self.color,
            mana_cost,
            subtype: self.subtype,
            is_foil,
        }
        .build()
        .map_err(|e| e.to_string())
    }
}

/// Outcome of a CSV import
#[derive(Debug, Default)]
pub struct ImportReport {
    /// Cards appended to the collection
    pub imported: usize,
    /// Rows ignored because they did not have exactly ten fields
    pub skipped: usize,
    /// Ten-field rows that failed validation, as [`CollectionError::MalformedRow`]
    pub rejected: Vec<CollectionError>,
}

impl CardCollection {
    /// Writes the header and every card to `writer`. Returns the number of cards written.
    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<usize> {
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .quote_style(csv::QuoteStyle::Never)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(writer);

        wtr.write_record(CSV_HEADER)?;
        let mut written = 0;
        for card in self.iter() {
            wtr.serialize(CardRow::from(card))?;
            written += 1;
        }
        wtr.flush().map_err(csv::Error::from)?;

        debug!("Wrote {written} card rows");
        Ok(written)
    }

    /// Exports the collection to a CSV file, replacing any existing file.
    pub fn export_csv<P: AsRef<Path>>(&self, path: P) -> Result<usize> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| CollectionError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let written = self.write_csv(file)?;
        info!("Collection exported successfully to {}", path.display());
        Ok(written)
    }

    /// Reads CSV rows from `reader` and appends every valid card.
    ///
    /// The first line is treated as a header and not checked. Rows without
    /// exactly ten fields are skipped silently; ten-field rows that fail
    /// validation are logged and skipped. A read fault aborts the import, but
    /// cards appended before it stay in the collection.
    pub fn read_csv<R: io::Read>(&mut self, reader: R) -> Result<ImportReport> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .quoting(false)
            .from_reader(reader);

        let mut report = ImportReport::default();

        for result in rdr.records() {
            let record = match result {
                Ok(record) => record,
                Err(e) if e.is_io_error() => return Err(e.into()),
                Err(e) => {
                    warn!("Skipping unreadable CSV row: {e}");
                    report.skipped += 1;
                    continue;
                }
            };
            let line = record.position().map(|p| p.line()).unwrap_or(0);

            if record.len() != CSV_HEADER.len() {
                debug!(
                    "Skipping line {line}: expected {} fields, found {}",
                    CSV_HEADER.len(),
                    record.len()
                );
                report.skipped += 1;
                continue;
            }

            let name = record.get(0).unwrap_or_default().to_string();
            let card = record
                .deserialize::<CardRow>(None)
                .map_err(|e| e.to_string())
                .and_then(CardRow::into_card);

            match card {
                Ok(card) => {
                    self.add(card)?;
                    report.imported += 1;
                }
                Err(reason) => {
                    let error = CollectionError::MalformedRow { line, name, reason };
                    warn!("Error importing card: {error}");
                    report.rejected.push(error);
                }
            }
        }

        info!(
            "Imported {} cards ({} skipped, {} rejected)",
            report.imported,
            report.skipped,
            report.rejected.len()
        );
        Ok(report)
    }

    /// Imports cards from a CSV file. See [`read_csv`](Self::read_csv).
    pub fn import_csv<P: AsRef<Path>>(&mut self, path: P) -> Result<ImportReport> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| CollectionError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let report = self.read_csv(file)?;
        info!("Imported {} cards from {}", report.imported, path.display());
        Ok(report)
    }
}

#[cfg(test)]
#[path = "csv_codec_tests.rs"]
mod tests;
