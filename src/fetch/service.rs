// src/fetch/service.rs

use serde::Deserialize;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use url::Url;

use crate::config::{AppConfig, DEFAULT_PAGE_SIZE};
use crate::domain::types::{FilterSpec, Pagination, SortSpec};
use crate::fetch::FetchError;

/// Parameters for one page fetch. Only `query`, `city`, and `state` from
/// the filters are forwarded to the backend; the remaining filter fields
/// are not part of the current query contract.
#[derive(Debug, Clone)]
pub struct FetchParams {
    pub page: u32,
    pub page_size: u32,
    pub sort: Option<SortSpec>,
    pub filters: FilterSpec,
}

impl Default for FetchParams {
    fn default() -> Self {
        Self {
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
            sort: None,
            filters: FilterSpec::default(),
        }
    }
}

/// One fetched page: raw records plus the echoed pagination.
#[derive(Debug, Clone)]
pub struct PagedResult {
    pub items: Vec<Value>,
    pub pagination: Pagination,
}

// The backend answers with either a bare array of records or a paging
// envelope. Structural inspection picks the variant; both normalize to
// the same PagedResult.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ResponseEnvelope {
    Paged {
        items: Vec<Value>,
        total: Option<u64>,
    },
    Bare(Vec<Value>),
}

/// HTTP client for the property listing endpoint.
pub struct PropertyClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl PropertyClient {
    /// Build a client against the configured base URL. A bare path such as
    /// the default `/api` is resolved against a localhost origin.
    pub fn new(config: &AppConfig) -> Result<Self, FetchError> {
        let endpoint = resolve_endpoint(&config.base_url)?;
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        Ok(Self { http, endpoint })
    }

    /// Fetch one page of raw property records.
    ///
    /// Accepts both response envelopes and normalizes them; when the
    /// server omits `total` the returned item count stands in for it.
    /// Firing `cancel` before completion fails with
    /// [`FetchError::Cancelled`] and no other observable effect.
    pub async fn fetch_properties(
        &self,
        params: &FetchParams,
        cancel: &CancellationToken,
    ) -> Result<PagedResult, FetchError> {
        let url = self.request_url(params);
        debug!(%url, "fetching properties");

        let (items, total) = tokio::select! {
            _ = cancel.cancelled() => return Err(FetchError::Cancelled),
            result = self.execute(url) => result?,
        };

        Ok(PagedResult {
            pagination: Pagination {
                page: params.page,
                page_size: params.page_size,
                total: total.unwrap_or(items.len() as u64),
            },
            items,
        })
    }

    fn request_url(&self, params: &FetchParams) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("page", &params.page.to_string());
            query.append_pair("pageSize", &params.page_size.to_string());
            if let Some(sort) = &params.sort {
                query.append_pair("sortField", sort.field.as_str());
                query.append_pair("sortDirection", sort.direction.as_str());
            }
            if let Some(q) = &params.filters.query {
                query.append_pair("q", q);
            }
            if let Some(city) = &params.filters.city {
                query.append_pair("city", city);
            }
            if let Some(state) = &params.filters.state {
                query.append_pair("state", state);
            }
        }
        url
    }

    async fn execute(&self, url: Url) -> Result<(Vec<Value>, Option<u64>), FetchError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.to_string()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        decode_envelope(&body)
    }
}

fn decode_envelope(body: &str) -> Result<(Vec<Value>, Option<u64>), FetchError> {
    let envelope: ResponseEnvelope =
        serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))?;

    Ok(match envelope {
        ResponseEnvelope::Paged { items, total } => (items, total),
        ResponseEnvelope::Bare(items) => (items, None),
    })
}

/// Resolve the configured base URL into the `/properties` endpoint.
/// Relative values resolve against `http://localhost`, mirroring how the
/// UI shell resolves them against its own origin.
fn resolve_endpoint(base_url: &str) -> Result<Url, FetchError> {
    let joined = format!("{}/properties", base_url.trim_end_matches('/'));
    match Url::parse(&joined) {
        Ok(url) => Ok(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse("http://localhost")
            .and_then(|origin| origin.join(&joined))
            .map_err(|e| FetchError::BaseUrl(e.to_string())),
        Err(e) => Err(FetchError::BaseUrl(e.to_string())),
    }
}
