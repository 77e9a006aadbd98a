use crate::domain::model::{Bean, Color, Combination, Health, Page};
use crate::domain::ports::{CatalogApi, DEFAULT_PAGE_SIZE};
use crate::utils::error::{CatalogError, Result};
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://tikal-home-assignment.vercel.app";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub token: Option<String>,
    pub page_size: u32,
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            page_size: DEFAULT_PAGE_SIZE,
            timeout: None,
        }
    }
}

/// Typed client for the jelly bean catalog REST API.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: Client,
    base_url: Url,
    token: Option<String>,
    page_size: u32,
}

impl CatalogClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            CatalogError::InvalidConfigValueError {
                field: "api.base_url".to_string(),
                value: config.base_url.clone(),
                reason: format!("Invalid URL format: {}", e),
            }
        })?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url,
            token: config.token.filter(|t| !t.is_empty()),
            page_size: config.page_size.max(1),
        })
    }

    pub fn with_base_url(base_url: &str) -> Result<Self> {
        Self::new(ClientConfig {
            base_url: base_url.to_string(),
            ..ClientConfig::default()
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.set_auth_token(token);
        self
    }

    /// Every request sent after this carries `Authorization: Bearer <token>`.
    /// An empty token clears it.
    pub fn set_auth_token(&mut self, token: impl Into<String>) {
        let token = token.into();
        self.token = if token.is_empty() { None } else { Some(token) };
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds the request URL, skipping query parameters whose value is `None`.
    pub fn endpoint(&self, path: &str, params: &[(&str, Option<String>)]) -> Result<Url> {
        let joined = format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path);
        let mut url = Url::parse(&joined).map_err(|e| CatalogError::ConfigError {
            message: format!("Cannot build URL for {}: {}", path, e),
        })?;

        let present: Vec<(&str, &str)> = params
            .iter()
            .filter_map(|(key, value)| value.as_deref().map(|v| (*key, v)))
            .collect();
        if !present.is_empty() {
            url.query_pairs_mut().extend_pairs(present);
        }
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        tracing::debug!("GET {}", url);

        let mut request = self
            .client
            .get(url.clone())
            .header(CONTENT_TYPE, "application/json");
        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("Response status {} for {}", status, url);

        if !status.is_success() {
            return Err(CatalogError::RequestFailed {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl CatalogApi for CatalogClient {
    async fn list_beans(&self, limit: Option<u32>, offset: Option<u32>) -> Result<Page<Bean>> {
        let url = self.endpoint(
            "/api/beans",
            &[
                ("limit", limit.map(|v| v.to_string())),
                ("offset", offset.map(|v| v.to_string())),
            ],
        )?;
        self.get_json(url).await
    }

    async fn list_colors(&self, color_id: Option<&str>) -> Result<Page<Color>> {
        let url = self.endpoint("/api/colors", &[("colorId", color_id.map(str::to_string))])?;
        self.get_json(url).await
    }

    async fn list_combinations(&self) -> Result<Page<Combination>> {
        let url = self.endpoint("/api/combinations", &[])?;
        self.get_json(url).await
    }

    async fn health(&self) -> Result<Health> {
        let url = self.endpoint("/api/health", &[])?;
        self.get_json(url).await
    }

    fn page_size(&self) -> u32 {
        self.page_size
    }
}
