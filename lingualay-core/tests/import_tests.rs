use lingualay_core::{
    import_deck, parse_csv_cards, parse_json_deck, parse_text_cards, Card, Deck, MediaIndex,
};
use std::fs;

#[test]
fn text_lines_pair_up() {
    let cards = parse_text_cards("hola\nhello\n\n  adios \ngoodbye\norphan\n");
    assert_eq!(cards.len(), 2);
    assert_eq!(cards[1].front, "adios");
    assert_eq!(cards[1].back, "goodbye");
    assert_eq!(cards[0].interval, 1);
    assert_eq!(cards[0].repetitions, 0);
}

#[test]
fn csv_with_header_and_tags() {
    let data = "front,back,tags\nhola,hello,greeting;spanish\n\"uno, dos\",\"one, two\"\n,\n";
    let cards = parse_csv_cards(data.as_bytes()).unwrap();
    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0].tags.len(), 2);
    assert!(cards[0].tags.contains("spanish"));
    assert_eq!(cards[1].front, "uno, dos");
    assert!(cards[1].tags.is_empty());
}

#[test]
fn json_deck_tolerates_missing_fields() {
    let data = r#"{
        "name": "Mixed",
        "totalCards": 99,
        "cards": [
            {"id": 1500000000001, "front": "A"},
            {"back": "only back", "dueDate": "2024-01-01T00:00:00Z", "interval": 6, "repetitions": 2},
            {"id": "dup", "front": "x", "back": "y"},
            {"id": "dup", "front": "z", "back": "w"},
            {"front": null, "back": "b", "tags": null}
        ]
    }"#;
    let deck = parse_json_deck(data).unwrap();
    assert_eq!(deck.total_cards(), 5);
    assert_eq!(deck.cards[0].id, "1500000000001");
    assert_eq!(deck.cards[0].back, "");
    assert_eq!(deck.cards[1].front, "");
    assert_eq!(deck.cards[1].repetitions, 2);
    assert_eq!(deck.cards[2].id, "dup");
    assert_ne!(deck.cards[3].id, "dup");
    assert_eq!(deck.cards[4].front, "");
    assert_eq!(deck.cards[4].back, "b");
    assert!(deck.cards[4].tags.is_empty());
}

#[test]
fn json_deck_with_null_name_still_loads() {
    let deck = parse_json_deck(r#"{"name": null, "description": null, "cards": [{"front": "q", "back": null}]}"#).unwrap();
    assert_eq!(deck.name, "");
    assert_eq!(deck.cards[0].back, "");
}

#[test]
fn deck_json_writes_derived_total() {
    let mut deck = Deck::new("D", "desc", vec![Card::new("a", "b")]);
    deck.cards.push(Card::new("c", "d"));
    let v: serde_json::Value = serde_json::to_value(&deck).unwrap();
    assert_eq!(v["totalCards"], 2);
    assert!(v["cards"][0]["dueAt"].is_string());

    let back: Deck = serde_json::from_value(v).unwrap();
    assert_eq!(back, deck);
}

#[test]
fn import_file_normalizes_media() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Spanish Basics.txt");
    fs::write(&path, "hola [sound:hola.mp3]\nhello\n").unwrap();

    let media = MediaIndex::with_scheme(["hola.mp3"], "anki://");
    let deck = import_deck(&path, &media).unwrap();
    assert_eq!(deck.name, "Spanish Basics");
    assert_eq!(deck.total_cards(), 1);
    assert!(deck.cards[0].front.contains(r#"<source src="anki://hola.mp3""#));
}

#[test]
fn binary_packages_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("deck.apkg");
    fs::write(&path, [0u8, 1, 2]).unwrap();
    assert!(import_deck(&path, &MediaIndex::new()).is_err());
    assert!(import_deck(dir.path().join("deck.md"), &MediaIndex::new()).is_err());
}
