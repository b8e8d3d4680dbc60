//! # Taskboard Client
//!
//! Thin HTTP client for the task API.
//!
//! [`TaskClient`] maps each task operation onto one request against `<api url>/api/tasks` and
//! hands back the [`reqwest::Response`] as received. Status codes and bodies are left for the
//! caller to interpret; the only errors raised here are the transport errors `reqwest` reports.

use api_shared::TASKS_PATH;
use reqwest::Url;
use serde_json::Value;

pub use reqwest::Response;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("invalid API URL '{0}': {1}")]
    InvalidUrl(String, String),
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}

pub type ClientResult<T> = std::result::Result<T, ClientError>;

#[derive(Clone, Debug)]
pub struct TaskClient {
    tasks_url: String,
    http: reqwest::Client,
}

impl TaskClient {
    /// Create a client for the API served at `api_url` (scheme, host and port; any trailing
    /// slash is ignored).
    ///
    /// # Errors
    /// Returns [`ClientError::InvalidUrl`] if `api_url` is not an absolute URL, or
    /// [`ClientError::Http`] if the HTTP client cannot be built.
    pub fn new(api_url: &str) -> ClientResult<Self> {
        let http = reqwest::Client::builder().build()?;
        Self::with_http_client(api_url, http)
    }

    /// Like [`TaskClient::new`], reusing an existing `reqwest::Client`.
    pub fn with_http_client(api_url: &str, http: reqwest::Client) -> ClientResult<Self> {
        let base = api_url.trim_end_matches('/');
        Url::parse(base).map_err(|e| ClientError::InvalidUrl(api_url.to_owned(), e.to_string()))?;

        let tasks_url = format!("{base}{TASKS_PATH}");
        tracing::info!("Using API URL: {}", tasks_url);

        Ok(Self { tasks_url, http })
    }

    /// The resolved task collection URL.
    pub fn tasks_url(&self) -> &str {
        &self.tasks_url
    }

    /// `GET /api/tasks`
    pub async fn get_tasks(&self) -> ClientResult<Response> {
        Ok(self.http.get(&self.tasks_url).send().await?)
    }

    /// `POST /api/tasks` with `task` as the JSON body.
    pub async fn add_task(&self, task: &Value) -> ClientResult<Response> {
        Ok(self.http.post(&self.tasks_url).json(task).send().await?)
    }

    /// `PUT /api/tasks/{id}` with `task` as the JSON body.
    pub async fn update_task(&self, id: &str, task: &Value) -> ClientResult<Response> {
        Ok(self.http.put(self.task_url(id)).json(task).send().await?)
    }

    /// `DELETE /api/tasks/{id}`
    pub async fn delete_task(&self, id: &str) -> ClientResult<Response> {
        Ok(self.http.delete(self.task_url(id)).send().await?)
    }

    fn task_url(&self, id: &str) -> String {
        format!("{}/{}", self.tasks_url, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolves_tasks_url() {
        let client = TaskClient::new("http://127.0.0.1:3000/").unwrap();
        assert_eq!(client.tasks_url(), "http://127.0.0.1:3000/api/tasks");
        assert_eq!(
            client.task_url("abc"),
            "http://127.0.0.1:3000/api/tasks/abc"
        );
    }

    #[test]
    fn test_rejects_relative_url() {
        assert!(matches!(
            TaskClient::new("/api"),
            Err(ClientError::InvalidUrl(_, _))
        ));
    }
}
