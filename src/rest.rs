//! Minimal PostgREST client.
//!
//! Tables live under `<base-url>/rest/v1/<table>`. Every request carries the access
//! key twice: as the `apikey` header and as a bearer token.

use std::time::Duration;

use reqwest::{Client, header};
use serde::de::DeserializeOwned;

use crate::credentials::Credentials;
use crate::error::QueryError;

const REST_PREFIX: &str = "/rest/v1";
const API_KEY_HEADER: &str = "apikey";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Query parameters for a single table read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Select {
    columns: Option<String>,
    filters: Vec<(String, String)>,
    order: Option<String>,
    limit: Option<usize>,
}

impl Select {
    /// Read the given comma-separated columns (`*` for all).
    pub fn columns(columns: impl Into<String>) -> Self {
        Self {
            columns: Some(columns.into()),
            ..Default::default()
        }
    }

    /// Keep only rows where `column` equals `value`.
    pub fn eq(mut self, column: impl Into<String>, value: impl AsRef<str>) -> Self {
        self.filters
            .push((column.into(), format!("eq.{}", value.as_ref())));
        self
    }

    pub fn order_desc(mut self, column: impl AsRef<str>) -> Self {
        self.order = Some(format!("{}.desc", column.as_ref()));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Query string pairs, filters before `select`, as PostgREST clients send them.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = self.filters.clone();
        if let Some(ref columns) = self.columns {
            pairs.push(("select".to_string(), columns.clone()));
        }
        if let Some(ref order) = self.order {
            pairs.push(("order".to_string(), order.clone()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        pairs
    }
}

/// Configuration for RestClient
#[derive(Debug, Clone)]
pub struct RestConfig {
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for RestConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

pub struct RestClient {
    http_client: Client,
    base_url: String,
    key: String,
}

impl RestClient {
    pub fn new(credentials: &Credentials) -> Result<Self, QueryError> {
        Self::with_config(credentials, RestConfig::default())
    }

    pub fn with_config(credentials: &Credentials, config: RestConfig) -> Result<Self, QueryError> {
        let http_client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            http_client,
            base_url: credentials.url.trim_end_matches('/').to_string(),
            key: credentials.key.clone(),
        })
    }

    /// Full endpoint for a table.
    pub fn table_url(&self, table: &str) -> String {
        format!("{}{}/{}", self.base_url, REST_PREFIX, table)
    }

    /// GET rows from `table` and decode the body as `T`.
    ///
    /// Non-2xx responses are returned as [`QueryError::Status`] without decoding.
    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &Select,
    ) -> Result<T, QueryError> {
        let url = self.table_url(table);
        tracing::debug!("GET {} {:?}", url, query.to_pairs());

        let response = self
            .http_client
            .get(&url)
            .query(&query.to_pairs())
            .header(API_KEY_HEADER, &self.key)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.key))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(QueryError::Status {
                table: table.to_string(),
                status,
                body,
            });
        }

        serde_json::from_str(&body).map_err(|source| QueryError::Decode {
            table: table.to_string(),
            source,
        })
    }
}
