//! Ports and HTTP adapters for the records API. Stores depend on the
//! [`cases::CaseApi`] and [`documents::DocumentApi`] traits; the `Http*`
//! adapters are the reqwest-backed production implementations.

pub mod cases;
pub mod documents;

use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use shared_types::AppError;

use crate::session::Session;

/// Shared plumbing for the HTTP adapters: base URL joining, bearer
/// attachment and uniform response decoding.
#[derive(Clone)]
pub(crate) struct Endpoint {
    http: reqwest::Client,
    base_url: String,
    session: Session,
}

impl Endpoint {
    pub(crate) fn new(http: reqwest::Client, base_url: impl Into<String>, session: Session) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            session,
        }
    }

    /// Start a request against `{base_url}{path}`, attaching the bearer
    /// credential when a session exists. Without one the request still goes
    /// out unauthenticated — skipping is the store's decision, not ours.
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self
            .http
            .request(method, format!("{}{}", self.base_url, path));
        if let Some(token) = self.session.bearer_token() {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    /// Send and decode. Transport failures map to `AppErrorKind::Transport`;
    /// non-2xx statuses are decoded from the error body.
    pub(crate) async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, AppError> {
        let response = builder
            .send()
            .await
            .map_err(|e| AppError::transport(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::from_status(status.as_u16(), &body));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| AppError::internal(format!("Malformed API response: {}", e)))
    }
}
