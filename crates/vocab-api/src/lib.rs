mod client;
mod error;

pub use client::{ApiClient, HttpCollection};
pub use error::ApiError;

use vocab_types::{Entity, Id, NewUser, SessionUser, User};

/// Remote store holding one collection of records
#[async_trait::async_trait]
pub trait RemoteCollection<T: Entity>: Send + Sync {
    /// Fetch every record, in server order
    async fn list(&self) -> Result<Vec<T>, ApiError>;

    /// Store a new record and return it with its assigned id
    async fn create(&self, draft: &T::Draft) -> Result<T, ApiError>;

    /// Replace every field of the record with `id`
    async fn update(&self, id: &Id, draft: &T::Draft) -> Result<T, ApiError>;

    async fn delete(&self, id: &Id) -> Result<(), ApiError>;
}

/// Remote user accounts
#[async_trait::async_trait]
pub trait UserDirectory: Send + Sync {
    async fn list_users(&self) -> Result<Vec<User>, ApiError>;

    async fn create_user(&self, user: &NewUser) -> Result<SessionUser, ApiError>;
}
