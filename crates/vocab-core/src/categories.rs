use vocab_types::{Category, CategoryDraft, Id};

use crate::collection::CollectionStore;
use crate::error::SyncError;

pub type CategoryStore = CollectionStore<Category>;

pub const NAME_REQUIRED: &str = "Please enter a category name!";
pub const NAME_BLANK: &str = "Category name cannot be only whitespace!";
pub const NAME_TAKEN: &str = "Category name already exists! Please choose another one.";

/// Check a category name against the rules of the edit form.
///
/// Names are compared trimmed and case-insensitively; the category being
/// edited does not collide with itself.
pub fn check_name(
    existing: &[Category],
    name: &str,
    editing: Option<&Id>,
) -> Result<(), &'static str> {
    if name.is_empty() {
        return Err(NAME_REQUIRED);
    }

    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(NAME_BLANK);
    }

    let wanted = trimmed.to_lowercase();
    let taken = existing
        .iter()
        .any(|c| c.name.to_lowercase() == wanted && Some(&c.id) != editing);
    if taken {
        return Err(NAME_TAKEN);
    }

    Ok(())
}

impl CollectionStore<Category> {
    /// Trim, check name rules, then create
    pub async fn add(&self, draft: CategoryDraft) -> Result<Category, SyncError> {
        check_name(&self.data(), &draft.name, None).map_err(|e| SyncError::Rejected(e.into()))?;
        self.create(draft.trimmed()).await
    }

    /// Trim, check name rules, then update the category with `id`
    pub async fn edit(&self, id: Id, draft: CategoryDraft) -> Result<Category, SyncError> {
        check_name(&self.data(), &draft.name, Some(&id))
            .map_err(|e| SyncError::Rejected(e.into()))?;
        self.update(id, draft.trimmed()).await
    }
}

/// Search and page state of the categories screen
#[derive(Debug, Clone)]
pub struct CategoryListing {
    search: String,
    page: usize,
    page_size: usize,
}

impl CategoryListing {
    pub fn new(page_size: usize) -> Self {
        Self {
            search: String::new(),
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// New search text sends the view back to the first page
    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search = text.into();
        self.page = 1;
    }

    /// Select a page, kept within the pages `categories` fills
    pub fn set_page(&mut self, page: usize, categories: &[Category]) {
        self.page = page.clamp(1, self.last_page(categories));
    }

    /// The underlying list changed
    pub fn reset_page(&mut self) {
        self.page = 1;
    }

    /// Categories whose name or description contains the search text
    pub fn matching<'a>(&self, categories: &'a [Category]) -> Vec<&'a Category> {
        let needle = self.search.to_lowercase();
        categories
            .iter()
            .filter(|c| {
                c.name.to_lowercase().contains(&needle)
                    || c.description.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Page actually shown; falls back to the last page when the list shrank
    pub fn current_page(&self, categories: &[Category]) -> usize {
        self.page.clamp(1, self.last_page(categories))
    }

    /// Rows on the current page
    pub fn rows<'a>(&self, categories: &'a [Category]) -> Vec<&'a Category> {
        let start = (self.current_page(categories) - 1).saturating_mul(self.page_size);
        self.matching(categories)
            .into_iter()
            .skip(start)
            .take(self.page_size)
            .collect()
    }

    pub fn page_count(&self, categories: &[Category]) -> usize {
        self.matching(categories).len().div_ceil(self.page_size)
    }

    fn last_page(&self, categories: &[Category]) -> usize {
        self.page_count(categories).max(1)
    }
}
