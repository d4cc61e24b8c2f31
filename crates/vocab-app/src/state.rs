use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::RwLock;
use vocab_api::{ApiClient, RemoteCollection, UserDirectory};
use vocab_config::Config;
use vocab_core::{
    AuthStore, CategoryListing, CategoryStore, CollectionStore, FileStorage, ReviewSession, Route,
    SessionContext, SessionStorage, WordStore,
};
use vocab_types::{Category, CategoryFilter, Word};

/// Screen-local state that never leaves the process
pub struct Views {
    pub route: Route,
    pub categories: CategoryListing,
    pub word_search: String,
    pub word_filter: CategoryFilter,
    pub review: ReviewSession,
}

impl Views {
    pub fn new(page_size: usize) -> Self {
        Self {
            route: Route::Home,
            categories: CategoryListing::new(page_size),
            word_search: String::new(),
            word_filter: CategoryFilter::All,
            review: ReviewSession::new(),
        }
    }
}

pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    pub session: SessionContext,
    pub auth: AuthStore,
    pub categories: CategoryStore,
    pub words: WordStore,
    views: Mutex<Views>,
}

impl AppState {
    /// Wire the stores to the HTTP backend and file-backed session storage
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let timeout = config
            .api
            .request_timeout_ms
            .map(std::time::Duration::from_millis);
        let api = ApiClient::new(config.api.base_url.clone(), timeout)?;
        let storage = Arc::new(FileStorage::new(config.session.file.clone()));

        Ok(Self::with_backends(
            config,
            Arc::new(api.clone()),
            Arc::new(api.collection::<Category>()),
            Arc::new(api.collection::<Word>()),
            storage,
        ))
    }

    pub fn with_backends(
        config: Config,
        users: Arc<dyn UserDirectory>,
        categories: Arc<dyn RemoteCollection<Category>>,
        words: Arc<dyn RemoteCollection<Word>>,
        storage: Arc<dyn SessionStorage>,
    ) -> Self {
        let session = SessionContext::new(storage, config.session.key.clone());
        let views = Views::new(config.ui.page_size);

        Self {
            config: Arc::new(RwLock::new(config)),
            auth: AuthStore::new(users, session.clone()),
            session,
            categories: CollectionStore::new(categories),
            words: CollectionStore::new(words),
            views: Mutex::new(views),
        }
    }

    /// Lock the view state. Never hold the guard across an await.
    pub fn views(&self) -> MutexGuard<'_, Views> {
        self.views.lock().unwrap_or_else(|e| e.into_inner())
    }
}
