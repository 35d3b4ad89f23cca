use std::sync::Arc;

use async_trait::async_trait;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::{Response, Url};
use thiserror::Error;

use crate::model::{MessageBody, ProductPage};

pub const SESSION_COOKIE: &str = "catalog_session";
pub const CSRF_COOKIE: &str = "XSRF-TOKEN";
pub const CSRF_HEADER: &str = "X-XSRF-TOKEN";

const PRODUCTS_PATH: &str = "api/products";
const CSRF_COOKIE_PATH: &str = "api/csrf-cookie";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The service answered with a non-2xx status.
    #[error("request failed with status code {status}: {message}")]
    Status { status: u16, message: String },
    /// No response was received at all.
    #[error("network error: {0}")]
    Network(String),
    #[error("invalid response: {0}")]
    Decode(String),
    #[error("invalid client configuration: {0}")]
    Config(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Operations the client needs from the catalog service.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn list(&self, page: u64) -> Result<ProductPage, ApiError>;

    /// Establish whatever the service requires before a mutating call
    /// (the CSRF cookie).
    async fn prepare_session(&self) -> Result<(), ApiError>;

    /// Delete a product, returning the service's confirmation message.
    async fn delete(&self, id: u64) -> Result<String, ApiError>;
}

/// [`CatalogApi`] over HTTP, with a cookie jar holding the session and CSRF
/// cookies.
pub struct HttpCatalogApi {
    http: reqwest::Client,
    jar: Arc<Jar>,
    base_url: Url,
}

impl HttpCatalogApi {
    pub fn new(base_url: &str, session_token: Option<&str>) -> Result<Self, ApiError> {
        let mut base_url =
            Url::parse(base_url).map_err(|err| ApiError::Config(format!("{base_url}: {err}")))?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let jar = Arc::new(Jar::default());
        if let Some(token) = session_token {
            jar.add_cookie_str(&format!("{SESSION_COOKIE}={token}; Path=/"), &base_url);
        }

        let http = reqwest::Client::builder()
            .cookie_provider(jar.clone())
            .build()
            .map_err(|err| ApiError::Config(err.to_string()))?;

        Ok(Self {
            http,
            jar,
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|err| ApiError::Config(format!("{path}: {err}")))
    }

    fn csrf_token(&self) -> Option<String> {
        let cookies = self.jar.cookies(&self.base_url)?;
        let cookies = cookies.to_str().ok()?;
        cookies
            .split(';')
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == CSRF_COOKIE)
            .map(|(_, value)| value.to_string())
    }
}

async fn status_error(response: Response) -> ApiError {
    let status = response.status();
    let message = match response.json::<MessageBody>().await {
        Ok(body) => body.message,
        Err(_) => status.canonical_reason().unwrap_or("Unknown error").to_string(),
    };
    ApiError::Status {
        status: status.as_u16(),
        message,
    }
}

#[async_trait]
impl CatalogApi for HttpCatalogApi {
    async fn list(&self, page: u64) -> Result<ProductPage, ApiError> {
        let url = self.endpoint(PRODUCTS_PATH)?;
        tracing::debug!(%url, page, "fetching products");

        let response = self.http.get(url).query(&[("page", page)]).send().await?;
        if !response.status().is_success() {
            return Err(status_error(response).await);
        }
        Ok(response.json::<ProductPage>().await?)
    }

    async fn prepare_session(&self) -> Result<(), ApiError> {
        let response = self.http.get(self.endpoint(CSRF_COOKIE_PATH)?).send().await?;
        if !response.status().is_success() {
            return Err(status_error(response).await);
        }
        Ok(())
    }

    async fn delete(&self, id: u64) -> Result<String, ApiError> {
        let url = self.endpoint(&format!("{PRODUCTS_PATH}/{id}"))?;
        let mut request = self.http.delete(url);
        match self.csrf_token() {
            Some(token) => request = request.header(CSRF_HEADER, token),
            None => tracing::warn!("no CSRF cookie present; the delete will likely be rejected"),
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(status_error(response).await);
        }
        let body = response.json::<MessageBody>().await?;
        Ok(body.message)
    }
}
