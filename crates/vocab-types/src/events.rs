use crate::types::{Category, CategoryDraft, CategoryFilter, Id, WordDraft};

/// Commands sent from the UI loop to the app loop
#[derive(Debug, Clone)]
pub enum AppEvent {
    Navigate(String),
    Register {
        full_name: String,
        email: String,
        password: String,
        confirm_password: String,
    },
    Login {
        email: String,
        password: String,
    },
    Logout,

    LoadCategories,
    CreateCategory(CategoryDraft),
    UpdateCategory {
        id: Id,
        draft: CategoryDraft,
    },
    DeleteCategory(Id),
    SearchCategories(String),
    CategoryPage(usize),

    LoadWords,
    CreateWord(WordDraft),
    UpdateWord {
        id: Id,
        draft: WordDraft,
    },
    DeleteWord(Id),
    SearchWords {
        text: String,
        filter: CategoryFilter,
    },

    Review(ReviewCommand),
    DismissError(Page),
}

#[derive(Debug, Clone)]
pub enum ReviewCommand {
    SelectCategory(CategoryFilter),
    Next,
    Previous,
    Flip,
    MarkLearned,
}

/// Screen owning an error slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Auth,
    Categories,
    Words,
}

/// Updates sent from the app loop back to the UI loop
#[derive(Debug, Clone)]
pub enum UiEvent {
    BackendReady,
    Redirect(String),
    Notice(String),
    Error {
        page: Page,
        message: String,
    },
    ErrorCleared(Page),
    ShowCategories {
        rows: Vec<Category>,
        page: usize,
        total: usize,
    },
    ShowWords(Vec<WordRow>),
    ShowCard(CardView),
    Quiz,
}

/// A word as listed on the words screen
#[derive(Debug, Clone)]
pub struct WordRow {
    pub id: Id,
    pub word: String,
    pub meaning: String,
    pub category: String,
    pub is_learned: bool,
}

/// The visible face of the current flashcard plus deck progress
#[derive(Debug, Clone)]
pub struct CardView {
    pub face: Option<String>,
    pub flipped: bool,
    pub position: usize,
    pub total: usize,
    pub learned: usize,
    pub progress_percent: u32,
}
