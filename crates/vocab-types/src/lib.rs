pub mod events;
pub mod types;

pub use events::{AppEvent, CardView, Page, ReviewCommand, UiEvent, WordRow};
pub use types::{
    Category, CategoryDraft, CategoryFilter, Entity, Id, NewUser, Operation, SessionUser, User,
    Word, WordDraft,
};
