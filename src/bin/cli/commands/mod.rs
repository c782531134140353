pub mod next;
pub mod recall;
pub mod reset;
pub mod stats;
pub mod today;

use wordcard_lib::catalog::VocabularyItem;

/// One-line summary of an item: text and its translations
pub fn item_line(item: &VocabularyItem) -> String {
    if item.translations.is_empty() {
        item.text.clone()
    } else {
        format!("{} - {}", item.text, item.translations.join(", "))
    }
}
