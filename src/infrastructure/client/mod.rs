pub mod books;
pub mod reviews;
pub mod users;

/// Generates the owner-gated `create`, `update`, and `delete` methods shared
/// by every entity client. Reads differ per entity and are written by hand.
macro_rules! define_client_mutations {
    (
        entity_path: $path:expr,
        id_type: $id:ty,
        entity_type: $entity:ty,
        new_type: $new:ty,
        update_type: $update:ty
    ) => {
        pub async fn create(&self, payload: &$new) -> anyhow::Result<$entity> {
            let url = self.client.endpoint($path)?;
            let response = self
                .client
                .request(reqwest::Method::POST, url)
                .json(payload)
                .send()
                .await?;
            self.client.handle_response(response).await
        }

        pub async fn update(&self, id: $id, payload: &$update) -> anyhow::Result<$entity> {
            let url = self.client.endpoint(&format!(concat!($path, "/{}"), id))?;
            let response = self
                .client
                .request(reqwest::Method::PUT, url)
                .json(payload)
                .send()
                .await?;
            self.client.handle_response(response).await
        }

        pub async fn delete(&self, id: $id) -> anyhow::Result<()> {
            let url = self.client.endpoint(&format!(concat!($path, "/{}"), id))?;
            let response = self
                .client
                .request(reqwest::Method::DELETE, url)
                .send()
                .await?;
            if response.status().is_success() {
                Ok(())
            } else {
                Err(self.client.response_error(response).await)
            }
        }
    };
}

pub(crate) use define_client_mutations;

use anyhow::{Context, Result, anyhow};
use reqwest::{Client, Url};

use crate::application::errors::ErrorResponse;

pub struct BookReviewClient {
    base_url: Url,
    http: Client,
    token: Option<String>,
}

impl BookReviewClient {
    pub fn new(base_url: Url, token: Option<String>) -> Result<Self> {
        let mut normalized = base_url;
        if !normalized.path().ends_with('/') {
            normalized.set_path(&format!("{}/", normalized.path().trim_end_matches('/')));
        }

        let http = Client::builder()
            .user_agent(concat!("bookreview-cli/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to configure HTTP client")?;

        Ok(Self {
            base_url: normalized,
            http,
            token: token.filter(|value| !value.trim().is_empty()),
        })
    }

    /// Reads the bearer token from `BOOKREVIEW_TOKEN` when set.
    pub fn from_base_url(base_url: &str) -> Result<Self> {
        let url = Url::parse(base_url).with_context(|| format!("invalid API url: {base_url}"))?;
        Self::new(url, std::env::var("BOOKREVIEW_TOKEN").ok())
    }

    pub fn books(&self) -> books::BooksClient<'_> {
        books::BooksClient::new(self)
    }

    pub fn reviews(&self) -> reviews::ReviewsClient<'_> {
        reviews::ReviewsClient::new(self)
    }

    pub fn users(&self) -> users::UsersClient<'_> {
        users::UsersClient::new(self)
    }

    pub(crate) fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .with_context(|| format!("invalid API path: {path}"))
    }

    /// Build a request with authentication if token is available
    pub(crate) fn request(&self, method: reqwest::Method, url: Url) -> reqwest::RequestBuilder {
        let mut request = self.http.request(method, url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        request
    }

    pub(crate) async fn handle_response<T>(&self, response: reqwest::Response) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        if response.status().is_success() {
            response
                .json::<T>()
                .await
                .context("failed to deserialize response body")
        } else {
            Err(self.response_error(response).await)
        }
    }

    pub(crate) async fn response_error(&self, response: reqwest::Response) -> anyhow::Error {
        let status = response.status();
        let bytes = response.bytes().await.unwrap_or_default();

        if let Ok(err) = serde_json::from_slice::<ErrorResponse>(&bytes) {
            return anyhow!("request failed ({status}): {}", err.message);
        }

        let message = String::from_utf8_lossy(&bytes);
        anyhow!("request failed ({status}): {message}")
    }
}
