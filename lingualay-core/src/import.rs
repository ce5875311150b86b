//! Deck importers for the plain-text formats the extension accepts.
//!
//! Binary Anki packages (`.apkg`, `.anki2`) are rejected; only their
//! text-based exports are read.

use crate::{normalize_content, Card, CoreError, Deck, MediaIndex};
use std::fs;
use std::io::Read;
use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeckFormat {
    Text,
    Csv,
    Json,
}

impl DeckFormat {
    pub fn from_path(path: &Path) -> Result<Self, CoreError> {
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.to_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "txt" => Ok(DeckFormat::Text),
            "csv" => Ok(DeckFormat::Csv),
            "json" => Ok(DeckFormat::Json),
            "apkg" | "anki2" => Err(CoreError::Invalid("binary Anki packages are not supported")),
            _ => Err(CoreError::Invalid("unrecognized deck file extension")),
        }
    }
}

/// Reads a deck file, naming the deck after the file stem unless the file
/// carries its own name.
pub fn import_deck(path: impl AsRef<Path>, media: &MediaIndex) -> Result<Deck, CoreError> {
    let path = path.as_ref();
    let format = DeckFormat::from_path(path)?;
    let data = fs::read_to_string(path).map_err(|_| CoreError::NotFound("deck file"))?;
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Imported deck".to_string());

    let mut deck = match format {
        DeckFormat::Text => Deck::new(stem, "", parse_text_cards(&data)),
        DeckFormat::Csv => Deck::new(stem, "", parse_csv_cards(data.as_bytes())?),
        DeckFormat::Json => {
            let mut d = parse_json_deck(&data)?;
            if d.name.trim().is_empty() {
                d.name = stem;
            }
            d
        }
    };
    normalize_deck(&mut deck, media);
    tracing::info!(deck = %deck.name, cards = deck.total_cards(), ?format, "imported deck");
    Ok(deck)
}

pub fn normalize_deck(deck: &mut Deck, media: &MediaIndex) {
    if media.is_empty() {
        return;
    }
    for card in deck.cards.iter_mut() {
        card.front = normalize_content(&card.front, media);
        card.back = normalize_content(&card.back, media);
    }
}

/// Non-blank lines taken two at a time as front and back. A trailing odd
/// line has no answer and is dropped.
pub fn parse_text_cards(text: &str) -> Vec<Card> {
    let lines: Vec<&str> = text.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
    lines
        .chunks_exact(2)
        .map(|pair| Card::new(pair[0], pair[1]))
        .collect()
}

/// Rows of `front,back[,tags]`; tags are `;`-separated. A leading
/// `front,back` header row is skipped.
pub fn parse_csv_cards<R: Read>(input: R) -> Result<Vec<Card>, CoreError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let mut cards = Vec::new();
    for (i, rec) in rdr.records().enumerate() {
        let rec = rec.map_err(|e| CoreError::Parse(format!("csv row {}: {e}", i + 1)))?;
        let front = rec.get(0).unwrap_or("");
        let back = rec.get(1).unwrap_or("");
        if i == 0 && front.eq_ignore_ascii_case("front") && back.eq_ignore_ascii_case("back") {
            continue;
        }
        if front.is_empty() && back.is_empty() {
            continue;
        }
        let tags = rec.get(2).unwrap_or("").split(';');
        cards.push(Card::new(front, back).with_tags(tags));
    }
    Ok(cards)
}

pub fn parse_json_deck(data: &str) -> Result<Deck, CoreError> {
    serde_json::from_str(data).map_err(|e| CoreError::Parse(format!("deck json: {e}")))
}
