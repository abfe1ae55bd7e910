//! HTTP implementation of [`TaskRepository`] using `reqwest`.
//!
//! Endpoints are resolved against a single base URL. Non-success responses
//! are decoded as the service's JSON [`ErrorBody`] when possible so the
//! store can surface the service's own message.

use std::time::Duration;

use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use taskboard_proto::error::ErrorBody;
use taskboard_proto::task::{
    PositionUpdate, Task, TaskCreate, TaskId, TaskList, TaskStatus, TaskUpdate, TasksByStatus,
};
use url::Url;

use super::{RepositoryError, TaskRepository};

/// Repository talking to the task service over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTaskRepository {
    client: Client,
    base_url: Url,
}

impl HttpTaskRepository {
    /// Creates a repository for the service at `base_url` with no request
    /// timeout.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Network`] if the HTTP client cannot be
    /// built.
    pub fn new(base_url: Url) -> Result<Self, RepositoryError> {
        Self::with_timeout(base_url, None)
    }

    /// Creates a repository with an optional per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Network`] if the HTTP client cannot be
    /// built.
    pub fn with_timeout(
        mut base_url: Url,
        timeout: Option<Duration>,
    ) -> Result<Self, RepositoryError> {
        // Url::join replaces the last segment unless the path ends in '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| RepositoryError::Network(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client, base_url })
    }

    /// The normalized base URL (always ends with `/`).
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, RepositoryError> {
        self.base_url
            .join(path)
            .map_err(|e| RepositoryError::Network(format!("invalid request URL {path}: {e}")))
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&(impl serde::Serialize + Sync)>,
    ) -> Result<Response, RepositoryError> {
        let url = self.endpoint(path)?;
        tracing::debug!(%method, %url, "task service request");
        let mut request = self.client.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await.map_err(|e| transport_error(&e))?;
        check_status(response).await
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&(impl serde::Serialize + Sync)>,
    ) -> Result<T, RepositoryError> {
        let response = self.send(method, path, body).await?;
        response.json::<T>().await.map_err(|e| {
            if e.is_decode() {
                RepositoryError::Decode(e.to_string())
            } else {
                transport_error(&e)
            }
        })
    }
}

/// No request body.
const NO_BODY: Option<&()> = None;

fn transport_error(error: &reqwest::Error) -> RepositoryError {
    if error.is_timeout() {
        RepositoryError::Network("request timed out".to_string())
    } else if error.is_connect() {
        RepositoryError::Network(format!("connection failed: {error}"))
    } else {
        RepositoryError::Network(error.to_string())
    }
}

async fn check_status(response: Response) -> Result<Response, RepositoryError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let fallback = status
        .canonical_reason()
        .unwrap_or("request failed")
        .to_string();
    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.message,
        Err(_) => fallback,
    };
    tracing::warn!(status = status.as_u16(), message = %message, "task service error");
    Err(RepositoryError::Http {
        status: status.as_u16(),
        message,
    })
}

impl TaskRepository for HttpTaskRepository {
    async fn list(&self) -> Result<TaskList, RepositoryError> {
        self.send_json(Method::GET, "api/tasks/", NO_BODY).await
    }

    async fn list_by_status(&self) -> Result<TasksByStatus, RepositoryError> {
        self.send_json(Method::GET, "api/tasks/by-status", NO_BODY)
            .await
    }

    async fn get(&self, id: TaskId) -> Result<Task, RepositoryError> {
        self.send_json(Method::GET, &format!("api/tasks/{id}"), NO_BODY)
            .await
    }

    async fn create(&self, data: &TaskCreate) -> Result<Task, RepositoryError> {
        self.send_json(Method::POST, "api/tasks/", Some(data)).await
    }

    async fn update(&self, id: TaskId, data: &TaskUpdate) -> Result<Task, RepositoryError> {
        self.send_json(Method::PUT, &format!("api/tasks/{id}"), Some(data))
            .await
    }

    async fn reposition(
        &self,
        id: TaskId,
        status: TaskStatus,
        position: u32,
    ) -> Result<Task, RepositoryError> {
        let body = PositionUpdate { status, position };
        self.send_json(
            Method::PATCH,
            &format!("api/tasks/{id}/position"),
            Some(&body),
        )
        .await
    }

    async fn delete(&self, id: TaskId) -> Result<(), RepositoryError> {
        self.send(Method::DELETE, &format!("api/tasks/{id}"), NO_BODY)
            .await
            .map(|_| ())
    }
}
