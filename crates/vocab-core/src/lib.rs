pub mod auth;
pub mod categories;
pub mod collection;
pub mod error;
pub mod flashcard;
pub mod password;
pub mod routes;
pub mod session;
pub mod storage;
pub mod validation;
pub mod words;

pub use auth::{AuthState, AuthStore};
pub use categories::{CategoryListing, CategoryStore};
pub use collection::{CollectionState, CollectionStore};
pub use error::{AuthError, StorageError, SyncError};
pub use flashcard::{Progress, ReviewSession};
pub use routes::{Navigation, Route};
pub use session::SessionContext;
pub use storage::{FileStorage, MemoryStorage, SessionStorage};
pub use words::WordStore;

#[cfg(test)]
mod tests;
