use crate::collection::CardCollection;
use crate::models::{Card, Vocabulary};

/// Detailed multi-line view of a single card
pub fn format_card_details(card: &Card) -> String {
    let mut output = String::new();
    let rule = "=".repeat(80);

    output.push_str(&format!("{rule}\nMTG CARD DETAILS\n{rule}\n"));
    output.push_str(&format!(
        "Name:           {}{}\n",
        card.name(),
        if card.is_foil() { " (FOIL)" } else { "" }
    ));
    output.push_str(&format!("Edition:        {}\n", card.edition()));
    output.push_str(&format!("Card Type:      {}\n", card.card_type()));
    output.push_str(&format!("Subtype:        {}\n", card.subtype()));
    output.push_str(&format!("Color:          {}\n", card.color()));
    output.push_str(&format!("Mana Cost:      {}\n", card.mana_cost()));
    output.push_str(&format!("Rarity:         {}\n", card.rarity()));
    output.push_str(&format!("Condition:      {}\n", card.condition()));
    output.push_str(&format!("Value:          ${:.2}\n", card.value()));
    output.push_str(&rule);
    output.push('\n');

    output
}

/// Compact table of every card with its index
pub fn format_card_list(collection: &CardCollection) -> String {
    if collection.is_empty() {
        return "Collection is empty.\n".to_string();
    }

    let mut output = String::new();
    let rule = "=".repeat(100);

    output.push_str(&format!("{rule}\nCARD LIST - {}\n{rule}\n", collection.name()));
    output.push_str(&format!(
        "{:<5} {:<30} {:<20} {:<15} {:<10}\n",
        "Index", "Name", "Edition", "Rarity", "Value"
    ));
    output.push_str(&"-".repeat(100));
    output.push('\n');

    for (index, card) in collection.iter().enumerate() {
        output.push_str(&format!(
            "{:<5} {:<30} {:<20} {:<15} ${:<9.2}\n",
            index,
            card.name(),
            card.edition(),
            card.rarity().as_str(),
            card.value()
        ));
    }
    output.push_str(&rule);
    output.push('\n');

    output
}

/// Statistics report, or a notice when the collection is empty
pub fn format_statistics(collection: &CardCollection) -> String {
    let Some(stats) = collection.statistics() else {
        return "No statistics available - collection is empty.\n".to_string();
    };

    let mut output = String::new();
    let rule = "=".repeat(60);

    output.push_str(&format!(
        "{rule}\nCOLLECTION STATISTICS - {}\n{rule}\n",
        collection.name()
    ));
    output.push_str(&format!("Total Cards:        {}\n", stats.count));
    output.push_str(&format!("Total Value:        ${:.2}\n", stats.total_value));
    output.push_str(&format!("Average Card Value: ${:.2}\n", stats.average_value));
    output.push_str("\nCards by Rarity:\n");
    for (rarity, count) in &stats.by_rarity {
        let label = format!("{}:", rarity.as_str());
        output.push_str(&format!("  {label:<13}{count}\n"));
    }
    output.push_str(&rule);
    output.push('\n');

    output
}
