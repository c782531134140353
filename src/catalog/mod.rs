//! Vocabulary catalog
//!
//! The catalog is a read-only list of decks loaded once at startup from a
//! JSON file:
//!
//! ```json
//! { "decks": [ { "name": "high", "items": [
//!     { "id": "environment", "text": "environment",
//!       "translations": ["환경"],
//!       "sentences": [ { "text": "We must protect the environment",
//!                        "translation": "환경을 보호해야 한다" } ] } ] } ] }
//! ```

pub mod models;

pub use models::*;

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Deck not found: {0}")]
    DeckNotFound(String),
}

pub type Result<T> = std::result::Result<T, CatalogError>;

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    decks: Vec<Deck>,
}

/// All decks known to the application
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    decks: Vec<Deck>,
}

impl Catalog {
    /// Build a catalog, dropping duplicate item ids within each deck
    pub fn new(decks: Vec<Deck>) -> Self {
        let decks = decks.into_iter().map(dedup_items).collect();
        Self { decks }
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(content)?;
        Ok(Self::new(file.decks))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let catalog = Self::from_json(&content)?;
        log::debug!("Loaded {} decks from {:?}", catalog.decks.len(), path);
        Ok(catalog)
    }

    pub fn decks(&self) -> &[Deck] {
        &self.decks
    }

    pub fn deck(&self, name: &str) -> Result<&Deck> {
        self.decks
            .iter()
            .find(|d| d.name == name)
            .ok_or_else(|| CatalogError::DeckNotFound(name.to_string()))
    }
}

fn dedup_items(mut deck: Deck) -> Deck {
    let mut seen = HashSet::new();
    let before = deck.items.len();
    deck.items.retain(|item| seen.insert(item.id.clone()));
    if deck.items.len() != before {
        log::debug!(
            "Dropped {} duplicate items from deck {}",
            before - deck.items.len(),
            deck.name
        );
    }
    deck
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "decks": [
            { "name": "high", "items": [
                { "id": "environment", "text": "environment", "translations": ["환경"],
                  "sentences": [ { "text": "We must protect the environment",
                                   "translation": "환경을 보호해야 한다" } ] },
                { "id": "company", "text": "company" },
                { "id": "environment", "text": "duplicate" }
            ] },
            { "name": "low", "items": [] }
        ]
    }"#;

    #[test]
    fn test_parse_catalog() {
        let catalog = Catalog::from_json(SAMPLE).unwrap();
        assert_eq!(catalog.decks().len(), 2);

        let high = catalog.deck("high").unwrap();
        assert_eq!(high.len(), 2);
        assert_eq!(high.item_ids().collect::<Vec<_>>(), vec!["environment", "company"]);

        let env = high.item("environment").unwrap();
        assert_eq!(env.text, "environment");
        assert_eq!(env.sentences[0].translation, "환경을 보호해야 한다");
        assert!(high.item("company").unwrap().sentences.is_empty());
    }

    #[test]
    fn test_unknown_deck() {
        let catalog = Catalog::from_json(SAMPLE).unwrap();
        assert!(matches!(catalog.deck("middle"), Err(CatalogError::DeckNotFound(_))));
        assert!(catalog.deck("low").unwrap().is_empty());
    }

    #[test]
    fn test_demo_catalog_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/words.json");
        let catalog = Catalog::load(&path).unwrap();
        assert_eq!(catalog.deck("high").unwrap().len(), 12);
        assert_eq!(catalog.deck("basic").unwrap().len(), 10);
    }
}
