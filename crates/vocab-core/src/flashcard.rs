use vocab_types::{CategoryFilter, Word};

use crate::error::SyncError;
use crate::words::WordStore;

/// Learned share of a deck
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub learned: usize,
    pub total: usize,
}

impl Progress {
    /// Rounded to the nearest whole percent; an empty deck is 0%
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        (self.learned as f64 / self.total as f64 * 100.0).round() as u32
    }
}

/// Transient review state over the word collection. Nothing here is
/// persisted; the deck itself is derived from the words on every call.
#[derive(Debug, Clone, Default)]
pub struct ReviewSession {
    filter: CategoryFilter,
    current_index: usize,
    is_flipped: bool,
}

impl ReviewSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(&self) -> &CategoryFilter {
        &self.filter
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn is_flipped(&self) -> bool {
        self.is_flipped
    }

    /// Words in the active category, in collection order
    pub fn deck<'a>(&self, words: &'a [Word]) -> Vec<&'a Word> {
        words.iter().filter(|w| self.filter.matches(w)).collect()
    }

    /// `None` when the deck is empty or shrank below the current index
    pub fn current<'a>(&self, words: &'a [Word]) -> Option<&'a Word> {
        self.deck(words).get(self.current_index).copied()
    }

    pub fn set_filter(&mut self, filter: CategoryFilter) {
        self.filter = filter;
        self.current_index = 0;
        self.is_flipped = false;
    }

    pub fn next(&mut self, words: &[Word]) {
        let len = self.deck(words).len();
        if len <= 1 {
            return;
        }
        self.current_index = (self.current_index + 1) % len;
        self.is_flipped = false;
    }

    pub fn previous(&mut self, words: &[Word]) {
        let len = self.deck(words).len();
        if len <= 1 {
            return;
        }
        self.current_index = (self.current_index + len - 1) % len;
        self.is_flipped = false;
    }

    /// Move back onto the deck after it shrank under the current index
    pub fn clamp_to(&mut self, words: &[Word]) {
        let len = self.deck(words).len();
        if self.current_index >= len.max(1) {
            self.current_index = len.saturating_sub(1);
            self.is_flipped = false;
        }
    }

    pub fn flip(&mut self) {
        self.is_flipped = !self.is_flipped;
    }

    pub fn progress(&self, words: &[Word]) -> Progress {
        let deck = self.deck(words);
        Progress {
            learned: deck.iter().filter(|w| w.is_learned).count(),
            total: deck.len(),
        }
    }

    /// Mark the current word learned through the word store.
    ///
    /// Returns `Ok(false)` without touching the server when there is no
    /// current word or it is already learned.
    pub async fn mark_as_learned(&self, store: &WordStore) -> Result<bool, SyncError> {
        let words = store.data();
        let Some(word) = self.current(&words) else {
            return Ok(false);
        };
        if word.is_learned {
            return Ok(false);
        }

        let mut draft = word.to_draft();
        draft.is_learned = true;
        store.update(word.id.clone(), draft).await?;
        Ok(true)
    }
}
