//! Minimal Appwrite REST client.
//!
//! Covers exactly the surface the portal consumes: account creation,
//! email/password sessions, the current-account lookup, session deletion,
//! and document create/get with per-document permissions. Session state is
//! carried by the provider's session cookie, which reqwest's cookie store
//! persists for the lifetime of the client.

pub mod account;
pub mod databases;
mod error;
pub mod models;
mod permission;

use reqwest::header;
use serde::de::DeserializeOwned;

pub use account::Account;
pub use databases::Databases;
pub use error::AppwriteError;
pub use permission::{Permission, Role, ID};

/// Connection details for an Appwrite project.
#[derive(Debug, Clone)]
pub struct AppwriteOptions {
    pub endpoint: String,
    pub project_id: String,
}

/// Client handle shared by the API groups.
#[derive(Debug, Clone)]
pub struct AppwriteClient {
    http: reqwest::Client,
    options: AppwriteOptions,
}

impl AppwriteClient {
    pub fn new(options: AppwriteOptions) -> Result<Self, AppwriteError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            "X-Appwrite-Project",
            options
                .project_id
                .parse()
                .map_err(|_| AppwriteError::invalid_config("project id is not a valid header value"))?,
        );
        headers.insert(
            "X-Appwrite-Response-Format",
            header::HeaderValue::from_static("1.6.0"),
        );

        // The session cookie set on login is the only credential the client
        // holds; the cookie store keeps it for the lifetime of this client.
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .default_headers(headers)
            .build()?;

        Ok(Self { http, options })
    }

    /// Account and session operations.
    pub fn account(&self) -> Account<'_> {
        Account::new(self)
    }

    /// Document operations.
    pub fn databases(&self) -> Databases<'_> {
        Databases::new(self)
    }

    pub fn endpoint(&self) -> &str {
        &self.options.endpoint
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.options.endpoint.trim_end_matches('/'), path)
    }

    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<T, AppwriteError> {
        let response = self.http.post(self.url(path)).json(body).send().await?;
        Self::parse(response).await
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppwriteError> {
        let response = self.http.get(self.url(path)).send().await?;
        Self::parse(response).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), AppwriteError> {
        let response = self.http.delete(self.url(path)).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        Err(error::from_response(status, response.text().await.unwrap_or_default()))
    }

    async fn parse<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, AppwriteError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(error::from_response(status, body));
        }
        Ok(response.json::<T>().await?)
    }
}
