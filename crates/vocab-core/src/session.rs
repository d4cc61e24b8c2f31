use std::sync::Arc;

use tokio::sync::watch;
use vocab_types::SessionUser;

use crate::error::StorageError;
use crate::storage::SessionStorage;

/// Single source of truth for who is signed in.
///
/// Every change goes to durable storage first and only then to the
/// in-memory value, so the two stay mirrored. Routing and the auth store
/// both read from here instead of touching storage themselves.
#[derive(Clone)]
pub struct SessionContext {
    storage: Arc<dyn SessionStorage>,
    key: String,
    current: Arc<watch::Sender<Option<SessionUser>>>,
}

impl SessionContext {
    pub fn new(storage: Arc<dyn SessionStorage>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            current: Arc::new(watch::Sender::new(None)),
        }
    }

    /// Load the stored session into memory. Called once at startup.
    ///
    /// An unreadable record is treated as signed out.
    pub fn rehydrate(&self) -> Option<SessionUser> {
        let restored = match self.storage.read(&self.key) {
            Ok(Some(blob)) => match serde_json::from_str::<SessionUser>(&blob) {
                Ok(user) => Some(user),
                Err(e) => {
                    tracing::warn!("Ignoring unreadable session record: {e}");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::warn!("Failed to read session storage: {e}");
                None
            }
        };

        match &restored {
            Some(user) => tracing::info!("Restored session for {}", user.email),
            None => tracing::debug!("No stored session"),
        }

        self.current.send_replace(restored.clone());
        restored
    }

    pub fn sign_in(&self, user: SessionUser) -> Result<(), StorageError> {
        let blob = serde_json::to_string(&user)?;
        self.storage.write(&self.key, &blob)?;
        self.current.send_replace(Some(user));
        Ok(())
    }

    pub fn sign_out(&self) -> Result<(), StorageError> {
        self.storage.remove(&self.key)?;
        self.current.send_replace(None);
        Ok(())
    }

    pub fn current(&self) -> Option<SessionUser> {
        self.current.borrow().clone()
    }

    pub fn is_signed_in(&self) -> bool {
        self.current.borrow().is_some()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<SessionUser>> {
        self.current.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use vocab_types::Id;

    use super::*;
    use crate::storage::MemoryStorage;

    fn ann() -> SessionUser {
        SessionUser {
            id: Id::Num(1),
            full_name: "Ann Lee".into(),
            email: "ann@example.com".into(),
            role: "user".into(),
        }
    }

    #[test]
    fn test_sign_in_mirrors_storage() {
        let storage = Arc::new(MemoryStorage::new());
        let session = SessionContext::new(storage.clone(), "currentUser");

        session.sign_in(ann()).unwrap();
        assert!(session.is_signed_in());
        let blob = storage.read("currentUser").unwrap().unwrap();
        assert!(blob.contains("ann@example.com"));

        session.sign_out().unwrap();
        assert!(!session.is_signed_in());
        assert_eq!(storage.read("currentUser").unwrap(), None);
    }

    #[test]
    fn test_rehydrate_is_explicit() {
        let storage = Arc::new(MemoryStorage::new());
        SessionContext::new(storage.clone(), "currentUser")
            .sign_in(ann())
            .unwrap();

        let fresh = SessionContext::new(storage, "currentUser");
        assert_eq!(fresh.current(), None);
        assert_eq!(fresh.rehydrate(), Some(ann()));
        assert_eq!(fresh.current(), Some(ann()));
    }

    #[test]
    fn test_rehydrate_ignores_garbage() {
        let storage = Arc::new(MemoryStorage::new());
        storage.write("currentUser", "{not json").unwrap();

        let session = SessionContext::new(storage, "currentUser");
        assert_eq!(session.rehydrate(), None);
        assert!(!session.is_signed_in());
    }
}
