use vocab_types::{Category, CategoryFilter, Word, WordDraft};

use crate::collection::CollectionStore;
use crate::error::SyncError;

pub type WordStore = CollectionStore<Word>;

/// Shown for words without a category or pointing at a deleted one
pub const UNKNOWN_CATEGORY: &str = "N/A";

impl CollectionStore<Word> {
    /// Create a word; new words always start unlearned
    pub async fn add(&self, mut draft: WordDraft) -> Result<Word, SyncError> {
        draft.is_learned = false;
        self.create(draft).await
    }
}

/// Words whose text contains `text` (case-insensitive) and that pass `filter`
pub fn search<'a>(words: &'a [Word], text: &str, filter: &CategoryFilter) -> Vec<&'a Word> {
    let needle = text.to_lowercase();
    words
        .iter()
        .filter(|w| w.word.to_lowercase().contains(&needle) && filter.matches(w))
        .collect()
}

/// Name of the word's category, or [`UNKNOWN_CATEGORY`]
pub fn category_label<'a>(word: &Word, categories: &'a [Category]) -> &'a str {
    word.category_id
        .as_ref()
        .and_then(|id| categories.iter().find(|c| &c.id == id))
        .map(|c| c.name.as_str())
        .unwrap_or(UNKNOWN_CATEGORY)
}
