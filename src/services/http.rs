use reqwest::{Client, Method, RequestBuilder};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;

use crate::utils::AppError;

/// Thin wrapper over reqwest bound to the collaborator origin.
///
/// No retries, no auth headers, no caching. Every non-2xx status is treated
/// as a failure and the response body is not inspected.
#[derive(Debug, Clone)]
pub struct ServiceClient {
    base_url: String,
    http: Client,
}

impl ServiceClient {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, AppError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| AppError::request_failed("build HTTP client", e))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get_json<T>(&self, path: &str, operation: &str) -> Result<T, AppError>
    where
        T: DeserializeOwned,
    {
        let request = self.request(Method::GET, path);
        self.execute_json(request, operation).await
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B, operation: &str) -> Result<T, AppError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::POST, path).json(body);
        self.execute_json(request, operation).await
    }

    /// POST without a body (the review service takes everything in the URL).
    pub async fn post_empty<T>(&self, path: &str, operation: &str) -> Result<T, AppError>
    where
        T: DeserializeOwned,
    {
        let request = self.request(Method::POST, path);
        self.execute_json(request, operation).await
    }

    pub async fn put_json<B, T>(&self, path: &str, body: &B, operation: &str) -> Result<T, AppError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::PUT, path).json(body);
        self.execute_json(request, operation).await
    }

    pub async fn delete(&self, path: &str, operation: &str) -> Result<(), AppError> {
        let request = self.request(Method::DELETE, path);
        self.execute(request, operation).await.map(|_| ())
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        log::debug!("➡️  {} {}", method, path);
        self.http
            .request(method, self.url(path))
            .header("Accept", "application/json")
    }

    async fn execute(
        &self,
        request: RequestBuilder,
        operation: &str,
    ) -> Result<reqwest::Response, AppError> {
        let response = request
            .send()
            .await
            .map_err(|e| AppError::request_failed(operation, e))?;

        if !response.status().is_success() {
            return Err(AppError::request_failed(operation, response.status()));
        }

        Ok(response)
    }

    async fn execute_json<T>(&self, request: RequestBuilder, operation: &str) -> Result<T, AppError>
    where
        T: DeserializeOwned,
    {
        self.execute(request, operation)
            .await?
            .json::<T>()
            .await
            .map_err(|e| AppError::request_failed(operation, e))
    }
}
