//! Vocabulary catalog models

use serde::{Deserialize, Serialize};

/// An example sentence with its translation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sentence {
    pub text: String,
    #[serde(default)]
    pub translation: String,
}

/// A single vocabulary item shown on a flashcard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyItem {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub translations: Vec<String>,
    #[serde(default)]
    pub sentences: Vec<Sentence>,
}

/// An ordered collection of items sharing one scheduling partition
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    pub name: String,
    #[serde(default)]
    pub items: Vec<VocabularyItem>,
}

impl Deck {
    pub fn new(name: impl Into<String>, items: Vec<VocabularyItem>) -> Self {
        Self {
            name: name.into(),
            items,
        }
    }

    /// Item ids in source order
    pub fn item_ids(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|item| item.id.as_str())
    }

    pub fn item(&self, id: &str) -> Option<&VocabularyItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
