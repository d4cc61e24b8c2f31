use std::marker::PhantomData;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use vocab_types::{Entity, Id, NewUser, SessionUser, User};

use crate::{ApiError, RemoteCollection, UserDirectory};

/// JSON client for the vocabulary REST backend
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: builder.build()?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Typed handle on one collection, sharing this client's connection pool
    pub fn collection<T: Entity>(&self) -> HttpCollection<T> {
        HttpCollection {
            api: self.clone(),
            _entity: PhantomData,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        tracing::debug!("GET /{path}");
        let response = self.client.get(self.url(path)).send().await?;
        Self::decode(response).await
    }

    async fn post<B: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, ApiError> {
        tracing::debug!("POST /{path}");
        let response = self.client.post(self.url(path)).json(body).send().await?;
        Self::decode(response).await
    }

    async fn put<B: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, ApiError> {
        tracing::debug!("PUT /{path}");
        let response = self.client.put(self.url(path)).json(body).send().await?;
        Self::decode(response).await
    }

    async fn delete(&self, path: &str) -> Result<(), ApiError> {
        tracing::debug!("DELETE /{path}");
        let response = self.client.delete(self.url(path)).send().await?;
        Self::check(response).await.map(|_| ())
    }

    async fn decode<R: DeserializeOwned>(response: reqwest::Response) -> Result<R, ApiError> {
        let response = Self::check(response).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::warn!("Request failed with {status}");
        Err(ApiError::from_body(status.as_u16(), &body))
    }
}

/// [`RemoteCollection`] backed by `/{T::RESOURCE}` endpoints
pub struct HttpCollection<T> {
    api: ApiClient,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Clone for HttpCollection<T> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            _entity: PhantomData,
        }
    }
}

#[async_trait::async_trait]
impl<T: Entity> RemoteCollection<T> for HttpCollection<T> {
    async fn list(&self) -> Result<Vec<T>, ApiError> {
        self.api.get(T::RESOURCE).await
    }

    async fn create(&self, draft: &T::Draft) -> Result<T, ApiError> {
        self.api.post(T::RESOURCE, draft).await
    }

    async fn update(&self, id: &Id, draft: &T::Draft) -> Result<T, ApiError> {
        self.api.put(&format!("{}/{id}", T::RESOURCE), draft).await
    }

    async fn delete(&self, id: &Id) -> Result<(), ApiError> {
        self.api.delete(&format!("{}/{id}", T::RESOURCE)).await
    }
}

#[async_trait::async_trait]
impl UserDirectory for ApiClient {
    async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        self.get("users").await
    }

    async fn create_user(&self, user: &NewUser) -> Result<SessionUser, ApiError> {
        self.post("users", user).await
    }
}
