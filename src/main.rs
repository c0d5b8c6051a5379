//! Card Tracker - command line front end
//!
//! Loads the collection file, runs one command and saves the file again when
//! the command changed the collection.

use std::path::{Path, PathBuf};

use card_tracker::{
    format_card_details, format_card_list, format_statistics, sample_cards, Card, CardCollection,
    CardDraft, CardUpdate, Color, Condition, Rarity, Vocabulary, DEFAULT_COLLECTION_NAME,
};
use clap::{Args as ClapArgs, Parser, Subcommand};

/// MTG card collection tracker
#[derive(Parser, Debug)]
#[command(name = "card_tracker")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the collection CSV file
    #[arg(short, long, default_value_t = default_collection_path())]
    file: String,

    /// Display name of the collection
    #[arg(long, default_value = DEFAULT_COLLECTION_NAME)]
    collection_name: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add a new card
    Add(NewCardArgs),
    /// Remove a card by index or by name
    Remove {
        #[arg(long, conflicts_with = "name", required_unless_present = "name")]
        index: Option<usize>,
        #[arg(long)]
        name: Option<String>,
    },
    /// Change one field of a card
    Modify {
        /// Index of the card to modify
        index: usize,
        #[command(flatten)]
        field: ModifyArgs,
    },
    /// Show one card in detail
    Show { index: usize },
    /// List all cards
    List {
        /// Print every card in the detailed layout
        #[arg(long)]
        detailed: bool,
    },
    /// Search cards by name (case-insensitive substring)
    Search { term: String },
    /// Filter cards by rarity or color
    Filter {
        #[arg(
            long,
            conflicts_with = "color",
            required_unless_present = "color",
            value_parser = choice::<Rarity>
        )]
        rarity: Option<String>,
        #[arg(long, value_parser = choice::<Color>)]
        color: Option<String>,
    },
    /// Show collection statistics
    Stats,
    /// Export the collection to another CSV file
    Export { path: String },
    /// Import cards from a CSV file into the collection
    Import { path: String },
    /// Add the demonstration cards
    Seed,
}

#[derive(ClapArgs, Debug)]
struct NewCardArgs {
    #[arg(long, value_parser = csv_text)]
    name: String,
    #[arg(long, default_value = "Common", value_parser = choice::<Rarity>)]
    rarity: String,
    #[arg(long, default_value = "Near Mint", value_parser = choice::<Condition>)]
    condition: String,
    #[arg(long, default_value_t = 0.0, value_parser = non_negative)]
    value: f64,
    #[arg(long, default_value = "Unknown", value_parser = csv_text)]
    edition: String,
    #[arg(long, default_value = "Unknown", value_parser = csv_text)]
    card_type: String,
    #[arg(long, default_value = "Colorless", value_parser = choice::<Color>)]
    color: String,
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(i32).range(0..=20))]
    mana_cost: i32,
    #[arg(long, default_value = "None", value_parser = csv_text)]
    subtype: String,
    #[arg(long)]
    foil: bool,
}

#[derive(ClapArgs, Debug)]
#[group(required = true, multiple = false)]
struct ModifyArgs {
    #[arg(long, value_parser = csv_text)]
    name: Option<String>,
    #[arg(long)]
    rarity: Option<String>,
    #[arg(long)]
    condition: Option<String>,
    #[arg(long, value_parser = non_negative)]
    value: Option<f64>,
    #[arg(long, value_parser = csv_text)]
    edition: Option<String>,
    #[arg(long, value_parser = csv_text)]
    card_type: Option<String>,
    #[arg(long)]
    color: Option<String>,
    #[arg(long, value_parser = clap::value_parser!(i32).range(0..=20))]
    mana_cost: Option<i32>,
    #[arg(long, value_parser = csv_text)]
    subtype: Option<String>,
    #[arg(long)]
    toggle_foil: bool,
}

impl ModifyArgs {
    fn into_update(self) -> CardUpdate {
        if let Some(name) = self.name {
            CardUpdate::Name(name)
        } else if let Some(rarity) = self.rarity {
            CardUpdate::Rarity(rarity)
        } else if let Some(condition) = self.condition {
            CardUpdate::Condition(condition)
        } else if let Some(value) = self.value {
            CardUpdate::Value(value)
        } else if let Some(edition) = self.edition {
            CardUpdate::Edition(edition)
        } else if let Some(card_type) = self.card_type {
            CardUpdate::CardType(card_type)
        } else if let Some(color) = self.color {
            CardUpdate::Color(color)
        } else if let Some(cost) = self.mana_cost {
            CardUpdate::ManaCost(cost)
        } else if let Some(subtype) = self.subtype {
            CardUpdate::Subtype(subtype)
        } else {
            CardUpdate::ToggleFoil
        }
    }
}

/// Returns the default collection path: ~/.local/share/card_tracker/collection.csv
fn default_collection_path() -> String {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("card_tracker")
        .join("collection.csv")
        .to_string_lossy()
        .to_string()
}

/// Accepts a vocabulary member in any casing and yields its canonical label
fn choice<T: Vocabulary>(raw: &str) -> Result<String, String> {
    T::parse(raw)
        .map(|member| member.as_str().to_string())
        .map_err(|e| e.to_string())
}

/// Rejects text the unquoted collection file cannot store
fn csv_text(raw: &str) -> Result<String, String> {
    if raw.contains([',', '\n', '\r']) {
        return Err("text cannot contain commas or line breaks".to_string());
    }
    Ok(raw.to_string())
}

/// True when every text field of `card` survives a save and reload
fn storable(card: &Card) -> bool {
    [card.name(), card.edition(), card.card_type(), card.subtype()]
        .iter()
        .all(|text| csv_text(text).is_ok())
}

fn non_negative(raw: &str) -> Result<f64, String> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("'{raw}' is not a valid decimal number"))?;
    if value < 0.0 {
        return Err("Value cannot be negative".to_string());
    }
    Ok(value)
}

/// Appends `.csv` unless the path already ends with it (any casing)
fn with_csv_extension(path: &str) -> PathBuf {
    if path.to_lowercase().ends_with(".csv") {
        PathBuf::from(path)
    } else {
        PathBuf::from(format!("{path}.csv"))
    }
}

/// A collection read from disk
struct Loaded {
    collection: CardCollection,
    /// File rows that were skipped or rejected and would be lost on save
    dropped_rows: usize,
}

fn load_collection(path: &Path, name: &str) -> card_tracker::Result<Loaded> {
    let mut collection = CardCollection::new(name);
    let mut dropped_rows = 0;
    if path.exists() {
        let report = collection.import_csv(path)?;
        log::info!("Loaded {} cards from {}", report.imported, path.display());
        dropped_rows = report.skipped + report.rejected.len();
        if dropped_rows > 0 {
            log::warn!(
                "{dropped_rows} row(s) in {} could not be read; the file will not be overwritten",
                path.display()
            );
        }
    } else {
        log::info!("No collection file at {}, starting empty", path.display());
    }
    Ok(Loaded {
        collection,
        dropped_rows,
    })
}

fn save_collection(collection: &CardCollection, path: &Path) -> card_tracker::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|source| {
                card_tracker::CollectionError::Io {
                    path: parent.display().to_string(),
                    source,
                }
            })?;
            log::info!("Created directory: {}", parent.display());
        }
    }
    collection.export_csv(path)?;
    Ok(())
}

fn print_matches(label: &str, matches: &[(usize, &Card)]) {
    if matches.is_empty() {
        println!("No cards found {label}");
        return;
    }
    println!("Found {} card(s) {label}:", matches.len());
    for (index, card) in matches {
        println!("[Card #{index}]");
        print!("{}", format_card_details(card));
    }
}

/// Runs one command. Returns true when the collection changed.
fn run(command: Command, collection: &mut CardCollection) -> card_tracker::Result<bool> {
    match command {
        Command::Add(args) => {
            let card = CardDraft {
                name: args.name,
                rarity: args.rarity,
                condition: args.condition,
                value: args.value,
                edition: args.edition,
                card_type: args.card_type,
                color: args.color,
                mana_cost: args.mana_cost,
                subtype: args.subtype,
                is_foil: args.foil,
            }
            .build()?;
            println!("--- New Card Added ---");
            print!("{}", format_card_details(&card));
            collection.add(card)?;
            Ok(true)
        }
        Command::Remove { index, name } => {
            let removed = match (index, name) {
                (Some(index), _) => collection.remove_by_index(index)?,
                (None, Some(name)) => collection.remove_by_name(&name)?,
                (None, None) => return Ok(false),
            };
            println!("Card '{}' removed from collection.", removed.name());
            Ok(true)
        }
        Command::Modify { index, field } => {
            let update = field.into_update();
            let card = collection.modify(index, &update)?;
            println!("Updated {} of '{}'", update.field(), card.name());
            print!("{}", format_card_details(card));
            Ok(true)
        }
        Command::Show { index } => {
            print!("{}", format_card_details(collection.get(index)?));
            Ok(false)
        }
        Command::List { detailed } => {
            if detailed && !collection.is_empty() {
                for (index, card) in collection.iter().enumerate() {
                    println!("[Card #{index}]");
                    print!("{}", format_card_details(card));
                }
            } else {
                print!("{}", format_card_list(collection));
            }
            Ok(false)
        }
        Command::Search { term } => {
            print_matches(&format!("matching '{term}'"), &collection.search_by_name(&term));
            Ok(false)
        }
        Command::Filter { rarity, color } => {
            if let Some(rarity) = rarity {
                print_matches(
                    &format!("with rarity '{rarity}'"),
                    &collection.filter_by_rarity(&rarity),
                );
            } else if let Some(color) = color {
                print_matches(
                    &format!("with color '{color}'"),
                    &collection.filter_by_color(&color),
                );
            }
            Ok(false)
        }
        Command::Stats => {
            print!("{}", format_statistics(collection));
            Ok(false)
        }
        Command::Export { path } => {
            let path = with_csv_extension(&path);
            let written = collection.export_csv(&path)?;
            println!("Exported {written} cards to {}", path.display());
            Ok(false)
        }
        Command::Import { path } => {
            let path = with_csv_extension(&path);
            let report = collection.import_csv(&path)?;
            println!("Successfully imported {} cards.", report.imported);
            for rejected in &report.rejected {
                println!("  {rejected}");
            }
            Ok(report.imported > 0)
        }
        Command::Seed => {
            let mut added = 0;
            for card in sample_cards() {
                if !storable(&card) {
                    log::warn!(
                        "Skipping sample card '{}': the collection file cannot store commas",
                        card.name()
                    );
                    continue;
                }
                collection.add(card)?;
                added += 1;
            }
            println!("Added {added} sample cards.");
            Ok(added > 0)
        }
    }
}

fn main() {
    // Initialize logger. Set RUST_LOG environment variable to control log level.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let path = PathBuf::from(&args.file);
    log::info!("Collection file: {}", path.display());

    let Loaded {
        mut collection,
        dropped_rows,
    } = match load_collection(&path, &args.collection_name) {
        Ok(loaded) => loaded,
        Err(e) => {
            log::error!("Failed to load collection: {e}");
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let changed = match run(args.command, &mut collection) {
        Ok(changed) => changed,
        Err(e) => {
            log::error!("Command failed: {e}");
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    if changed {
        if dropped_rows > 0 {
            log::error!(
                "Not saving: {dropped_rows} unreadable row(s) in {} would be lost",
                path.display()
            );
            eprintln!(
                "Error: {} has {dropped_rows} unreadable row(s); fix the file before changing it",
                path.display()
            );
            std::process::exit(1);
        }
        if let Err(e) = save_collection(&collection, &path) {
            log::error!("Failed to save collection: {e}");
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
