use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;
use vocab_api::{ApiError, RemoteCollection};
use vocab_types::{Entity, Id, Operation};

use crate::error::SyncError;

/// Local mirror of one remote collection
#[derive(Debug, Clone)]
pub struct CollectionState<T> {
    /// Requests started and not yet settled
    pub pending: usize,
    pub error: Option<String>,
    /// Bumped every time an error is set, so a repeated message still
    /// counts as a new error
    pub error_seq: u64,
    pub data: Vec<T>,
}

impl<T> Default for CollectionState<T> {
    fn default() -> Self {
        Self {
            pending: 0,
            error: None,
            error_seq: 0,
            data: Vec::new(),
        }
    }
}

impl<T> CollectionState<T> {
    pub fn is_loading(&self) -> bool {
        self.pending > 0
    }

    /// Key of the error currently set, if any
    pub fn error_key(&self) -> Option<u64> {
        self.error.as_ref().map(|_| self.error_seq)
    }
}

/// Pairs a [`RemoteCollection`] with its local [`CollectionState`].
///
/// Each request bumps `pending` and clears `error` when it starts, then
/// applies its own outcome when it settles. Overlapping requests are not
/// serialized; whichever settles last wins for `data`, while `pending`
/// keeps the loading flag up until all of them are done.
pub struct CollectionStore<T: Entity> {
    remote: Arc<dyn RemoteCollection<T>>,
    state: Arc<watch::Sender<CollectionState<T>>>,
}

impl<T: Entity> Clone for CollectionStore<T> {
    fn clone(&self) -> Self {
        Self {
            remote: self.remote.clone(),
            state: self.state.clone(),
        }
    }
}

impl<T: Entity> CollectionStore<T> {
    pub fn new(remote: Arc<dyn RemoteCollection<T>>) -> Self {
        Self {
            remote,
            state: Arc::new(watch::Sender::new(CollectionState::default())),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<CollectionState<T>> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> CollectionState<T> {
        self.state.borrow().clone()
    }

    pub fn data(&self) -> Vec<T> {
        self.state.borrow().data.clone()
    }

    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading()
    }

    pub fn find(&self, id: &Id) -> Option<T> {
        self.state.borrow().data.iter().find(|e| e.id() == id).cloned()
    }

    pub fn clear_error(&self) {
        self.state.send_if_modified(|state| state.error.take().is_some());
    }

    /// Replace `data` with the server's records, in server order
    pub async fn list(&self) -> Result<Vec<T>, SyncError> {
        let remote = self.remote.clone();
        self.run(Operation::List, remote.list(), |state, items: &Vec<T>| {
            state.data = items.clone();
        })
        .await
    }

    /// Append the created record to the end of `data`
    pub async fn create(&self, draft: T::Draft) -> Result<T, SyncError> {
        let remote = self.remote.clone();
        self.run(
            Operation::Create,
            async move { remote.create(&draft).await },
            |state, created: &T| state.data.push(created.clone()),
        )
        .await
    }

    /// Replace the record with `id` in place. A record missing locally is
    /// left missing.
    pub async fn update(&self, id: Id, draft: T::Draft) -> Result<T, SyncError> {
        let remote = self.remote.clone();
        self.run(
            Operation::Update,
            async move { remote.update(&id, &draft).await },
            |state, updated: &T| {
                match state.data.iter_mut().find(|e| e.id() == updated.id()) {
                    Some(slot) => *slot = updated.clone(),
                    None => tracing::warn!(
                        "Updated {} {} is not in the local list, dropping",
                        T::RESOURCE,
                        updated.id()
                    ),
                }
            },
        )
        .await
    }

    /// Delete remotely, then drop the record from `data`.
    ///
    /// The request is sent even when `id` is not held locally.
    pub async fn delete(&self, id: Id) -> Result<Id, SyncError> {
        let remote = self.remote.clone();
        let target = id.clone();
        self.run(
            Operation::Delete,
            async move { remote.delete(&target).await.map(|_| target) },
            |state, deleted: &Id| {
                let before = state.data.len();
                state.data.retain(|e| e.id() != deleted);
                if state.data.len() == before {
                    tracing::debug!("Deleted {} {} was not held locally", T::RESOURCE, deleted);
                }
            },
        )
        .await
    }

    async fn run<R, F, A>(&self, op: Operation, request: F, apply: A) -> Result<R, SyncError>
    where
        F: Future<Output = Result<R, ApiError>>,
        A: FnOnce(&mut CollectionState<T>, &R),
    {
        self.state.send_modify(|state| {
            state.pending += 1;
            state.error = None;
        });
        tracing::debug!("{} {:?} pending", T::RESOURCE, op);

        let result = request.await;

        match result {
            Ok(value) => {
                self.state.send_modify(|state| {
                    state.pending = state.pending.saturating_sub(1);
                    apply(state, &value);
                });
                tracing::debug!("{} {:?} fulfilled", T::RESOURCE, op);
                Ok(value)
            }
            Err(source) => {
                let message = source.display_message(T::default_error(op));
                tracing::error!("{} {:?} rejected: {source}", T::RESOURCE, op);
                self.state.send_modify(|state| {
                    state.pending = state.pending.saturating_sub(1);
                    state.error = Some(message.clone());
                    state.error_seq = state.error_seq.wrapping_add(1);
                });
                Err(SyncError::Remote { message, source })
            }
        }
    }
}
