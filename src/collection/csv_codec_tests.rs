//! Unit tests for CSV export and import.

use super::*;

const HEADER_LINE: &str = "Name,Rarity,Condition,Value,Edition,CardType,Color,ManaCost,Subtype,Foil";

fn bolt() -> Card {
    CardDraft {
        name: "Bolt".to_string(),
        rarity: "Common".to_string(),
        condition: "Excellent".to_string(),
        value: 5.50,
        edition: "Unlimited".to_string(),
        card_type: "Instant".to_string(),
        color: "Red".to_string(),
        mana_cost: 1,
        subtype: "Instant".to_string(),
        is_foil: false,
    }
    .build()
    .unwrap()
}

fn export_to_string(collection: &CardCollection) -> String {
    let mut buffer = Vec::new();
    collection.write_csv(&mut buffer).unwrap();
    String::from_utf8(buffer).unwrap()
}

fn import_str(content: &str) -> (CardCollection, ImportReport) {
    let mut collection = CardCollection::default();
    let report = collection.read_csv(content.as_bytes()).unwrap();
    (collection, report)
}

mod write_tests {
    use super::*;

    #[test]
    fn empty_collection_writes_header_only() {
        let output = export_to_string(&CardCollection::default());
        assert_eq!(output, format!("{HEADER_LINE}\n"));
    }

    #[test]
    fn writes_one_row_per_card_in_order() {
        let mut collection = CardCollection::default();
        collection.add(bolt()).unwrap();
        let mut foil = bolt();
        foil.set_name("Foil Bolt").unwrap();
        foil.set_value(12.0).unwrap();
        foil.set_foil(true);
        collection.add(foil).unwrap();

        let output = export_to_string(&collection);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], HEADER_LINE);
        assert_eq!(
            lines[1],
            "Bolt,Common,Excellent,5.50,Unlimited,Instant,Red,1,Instant,No"
        );
        assert_eq!(
            lines[2],
            "Foil Bolt,Common,Excellent,12.00,Unlimited,Instant,Red,1,Instant,Yes"
        );
    }

    #[test]
    fn value_is_rounded_to_two_decimals() {
        let mut card = bolt();
        card.set_value(35.999).unwrap();
        let mut collection = CardCollection::default();
        collection.add(card).unwrap();

        let output = export_to_string(&collection);
        assert!(output.contains(",36.00,"));
    }

    #[test]
    fn value_ties_round_half_up() {
        assert_eq!(format_cents(0.125), "0.13");
        assert_eq!(format_cents(2.675), "2.68");
        assert_eq!(format_cents(1.005), "1.01");
        assert_eq!(format_cents(5.5), "5.50");
        assert_eq!(format_cents(50000.0), "50000.00");
        assert_eq!(format_cents(0.0), "0.00");
    }

    #[test]
    fn text_fields_are_not_quoted() {
        let mut card = bolt();
        card.set_name("Nicol Bolas, Dragon-God").unwrap();
        let mut collection = CardCollection::default();
        collection.add(card).unwrap();

        let output = export_to_string(&collection);
        assert!(output.contains("\nNicol Bolas, Dragon-God,Common,"));
        assert!(!output.contains('"'));
    }

    #[test]
    fn header_constant_matches_file_header() {
        assert_eq!(CSV_HEADER.join(","), HEADER_LINE);
    }
}

mod read_tests {
    use super::*;

    #[test]
    fn reads_valid_rows() {
        let content = format!(
            "{HEADER_LINE}\nBolt,Common,Excellent,5.50,Unlimited,Instant,Red,1,Instant,No\nLotus,rare,near mint,50000.00,Alpha,Artifact,colorless,0,Artifact,yes\n"
        );

        let (collection, report) = import_str(&content);

        assert_eq!(report.imported, 2);
        assert_eq!(report.skipped, 0);
        assert!(report.rejected.is_empty());
        assert_eq!(collection.len(), 2);

        let lotus = collection.get(1).unwrap();
        assert_eq!(lotus.rarity().as_str(), "Rare");
        assert_eq!(lotus.condition().as_str(), "Near Mint");
        assert_eq!(lotus.color().as_str(), "Colorless");
        assert!((lotus.value() - 50000.0).abs() < 0.001);
        assert!(lotus.is_foil());
    }

    #[test]
    fn header_line_is_not_checked() {
        let content = "whatever header\nBolt,Common,Excellent,5.50,Unlimited,Instant,Red,1,Instant,No\n";
        let (collection, report) = import_str(content);
        assert_eq!(report.imported, 1);
        assert_eq!(collection.get(0).unwrap().name(), "Bolt");
    }

    #[test]
    fn wrong_field_count_rows_are_skipped_silently() {
        let content = format!(
            "{HEADER_LINE}\nBolt,Common,Excellent,5.50,Unlimited,Instant,Red,1,Instant\nNicol Bolas, Dragon-God,Mythic Rare,Mint,35.99,War of the Spark,Planeswalker,Multicolor,4,Elder Dragon,Yes\nBolt,Common,Excellent,5.50,Unlimited,Instant,Red,1,Instant,No\n"
        );

        let (collection, report) = import_str(&content);

        assert_eq!(report.imported, 1);
        assert_eq!(report.skipped, 2);
        assert!(report.rejected.is_empty());
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn invalid_rows_are_rejected_with_name() {
        let content = format!(
            "{HEADER_LINE}\nBroken,Legendary,Mint,1.00,Alpha,Creature,Red,1,Dragon,No\nPricey,Rare,Mint,lots,Alpha,Creature,Red,1,Dragon,No\nCostly,Rare,Mint,1.00,Alpha,Creature,Red,x,Dragon,No\nFine,Rare,Mint,1.00,Alpha,Creature,Red,1,Dragon,No\n"
        );

        let (collection, report) = import_str(&content);

        assert_eq!(report.imported, 1);
        assert_eq!(report.rejected.len(), 3);
        assert_eq!(collection.get(0).unwrap().name(), "Fine");

        match &report.rejected[0] {
            CollectionError::MalformedRow { line, name, reason } => {
                assert_eq!(*line, 2);
                assert_eq!(name, "Broken");
                assert!(reason.contains("Legendary"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(report.rejected[1].to_string().contains("Pricey"));
        assert!(report.rejected[2].to_string().contains("ManaCost"));
    }

    #[test]
    fn negative_numbers_are_rejected() {
        let content = format!(
            "{HEADER_LINE}\nA,Rare,Mint,-1.00,Alpha,Creature,Red,1,Dragon,No\nB,Rare,Mint,1.00,Alpha,Creature,Red,-2,Dragon,No\n"
        );
        let (collection, report) = import_str(&content);
        assert_eq!(report.imported, 0);
        assert_eq!(report.rejected.len(), 2);
        assert!(collection.is_empty());
    }

    #[test]
    fn unrecognised_foil_tokens_mean_non_foil() {
        let content = format!(
            "{HEADER_LINE}\nA,Rare,Mint,1.00,Alpha,Creature,Red,1,Dragon,maybe\nB,Rare,Mint,1.00,Alpha,Creature,Red,1,Dragon,YES\n"
        );
        let (collection, report) = import_str(&content);
        assert_eq!(report.imported, 2);
        assert!(!collection.get(0).unwrap().is_foil());
        assert!(collection.get(1).unwrap().is_foil());
    }

    #[test]
    fn empty_trailing_foil_field_means_non_foil() {
        let content = format!("{HEADER_LINE}\nA,Rare,Mint,1.00,Alpha,Creature,Red,1,Dragon,\n");
        let (collection, report) = import_str(&content);
        assert_eq!(report.imported, 1);
        assert_eq!(report.skipped, 0);
        assert!(!collection.get(0).unwrap().is_foil());
    }

    #[test]
    fn read_fault_aborts_but_keeps_earlier_cards() {
        struct FailingReader {
            data: Vec<u8>,
            pos: usize,
        }

        impl io::Read for FailingReader {
            fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
                if self.pos >= self.data.len() {
                    return Err(io::Error::other("disk went away"));
                }
                let n = buf.len().min(self.data.len() - self.pos);
                buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
                self.pos += n;
                Ok(n)
            }
        }

        let content = format!(
            "{HEADER_LINE}\nBolt,Common,Excellent,5.50,Unlimited,Instant,Red,1,Instant,No\nLotus,Rare,Mint,1.00,Alpha,Artifact,Colorless,0,Artifact,No\n"
        );
        let reader = FailingReader {
            data: content.into_bytes(),
            pos: 0,
        };
        let mut collection = CardCollection::default();

        let result = collection.read_csv(reader);

        assert!(matches!(result, Err(CollectionError::Csv(_))));
        assert_eq!(collection.len(), 2);
        assert_eq!(collection.get(1).unwrap().name(), "Lotus");
    }

    #[test]
    fn import_appends_to_existing_cards() {
        let mut collection = CardCollection::default();
        collection.add(bolt()).unwrap();

        let content = format!(
            "{HEADER_LINE}\nLotus,Rare,Mint,1.00,Alpha,Artifact,Colorless,0,Artifact,No\n"
        );
        collection.read_csv(content.as_bytes()).unwrap();

        assert_eq!(collection.len(), 2);
        assert_eq!(collection.get(0).unwrap().name(), "Bolt");
        assert_eq!(collection.get(1).unwrap().name(), "Lotus");
    }

    #[test]
    fn empty_input_imports_nothing() {
        let (collection, report) = import_str("");
        assert_eq!(report.imported, 0);
        assert!(collection.is_empty());
    }

    #[test]
    fn text_fields_are_trimmed_on_import() {
        let content = format!(
            "{HEADER_LINE}\n Bolt , Common ,Excellent, 5.50 ,Unlimited,Instant, Red , 1 ,Instant, No\n"
        );
        let (collection, report) = import_str(&content);
        assert_eq!(report.imported, 1);
        let card = collection.get(0).unwrap();
        assert_eq!(card.name(), "Bolt");
        assert_eq!(card.color().as_str(), "Red");
        assert_eq!(card.mana_cost(), 1);
    }

    #[test]
    fn crlf_line_endings_are_accepted() {
        let content = format!(
            "{HEADER_LINE}\r\nBolt,Common,Excellent,5.50,Unlimited,Instant,Red,1,Instant,Yes\r\n"
        );
        let (collection, report) = import_str(&content);
        assert_eq!(report.imported, 1);
        assert!(collection.get(0).unwrap().is_foil());
    }
}

mod round_trip_tests {
    use super::*;

    #[test]
    fn export_then_import_preserves_every_field() {
        let mut original = CardCollection::default();
        original.add(bolt()).unwrap();
        let other = CardDraft {
            name: "Serra Angel".to_string(),
            rarity: "Uncommon".to_string(),
            condition: "Light Played".to_string(),
            value: 1.25,
            edition: "Alpha".to_string(),
            card_type: "Creature".to_string(),
            color: "White".to_string(),
            mana_cost: 5,
            subtype: "Angel".to_string(),
            is_foil: true,
        }
        .build()
        .unwrap();
        original.add(other).unwrap();

        let mut buffer = Vec::new();
        original.write_csv(&mut buffer).unwrap();
        let mut restored = CardCollection::default();
        let report = restored.read_csv(buffer.as_slice()).unwrap();

        assert_eq!(report.imported, 2);
        for (before, after) in original.iter().zip(restored.iter()) {
            assert_eq!(before.name(), after.name());
            assert_eq!(before.rarity(), after.rarity());
            assert_eq!(before.condition(), after.condition());
            assert!((before.value() - after.value()).abs() < 0.001);
            assert_eq!(before.edition(), after.edition());
            assert_eq!(before.card_type(), after.card_type());
            assert_eq!(before.color(), after.color());
            assert_eq!(before.mana_cost(), after.mana_cost());
            assert_eq!(before.subtype(), after.subtype());
            assert_eq!(before.is_foil(), after.is_foil());
        }
    }

    #[test]
    fn names_with_commas_do_not_survive_a_round_trip() {
        let original = CardCollection::with_samples("Samples");

        let mut buffer = Vec::new();
        original.write_csv(&mut buffer).unwrap();
        let mut restored = CardCollection::default();
        let report = restored.read_csv(buffer.as_slice()).unwrap();

        assert_eq!(report.imported, 2);
        assert_eq!(report.skipped, 1);
        assert!(restored.search_by_name("Nicol Bolas").is_empty());
    }
}
