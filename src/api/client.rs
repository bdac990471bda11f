//! HTTP client for the recipe search endpoint
//!
//! One blocking GET per page. The API key travels as a query parameter, so
//! every error is scrubbed of its URL before it can reach a log line or an
//! error chain.

use crate::api::types::{PageRequest, SearchPage, PAGE_SIZE};
use crate::search::filters::FilterField;
use std::time::Duration;
use thiserror::Error;

/// Spoonacular complex search, the default endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.spoonacular.com/recipes/complexSearch";

/// Timeout for a single page fetch
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub type ApiResult<T> = Result<T, ApiError>;

/// Why a page fetch failed. Messages never contain the request URL.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Connection, DNS, or timeout failure before a response arrived
    #[error("transport error: {0}")]
    Transport(String),
    /// The endpoint answered with a non-success HTTP status
    #[error("endpoint returned HTTP {0}")]
    Status(u16),
    /// The response body did not match the expected shape
    #[error("could not decode response: {0}")]
    Decode(String),
}

/// Source of recipe pages. The search session fetches through this seam,
/// so tests can substitute scripted sources for the real endpoint.
pub trait RecipeSource: Send + Sync {
    fn fetch_page(&self, request: &PageRequest) -> ApiResult<SearchPage>;
}

/// [`RecipeSource`] backed by the real HTTP endpoint.
pub struct HttpClient {
    http: reqwest::blocking::Client,
    endpoint: String,
    api_key: String,
}

impl HttpClient {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> ApiResult<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| ApiError::Transport(scrub(err)))?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        })
    }

    /// Assemble the query string for one page. Inactive filters are
    /// omitted entirely rather than sent as empty values.
    fn params(&self, request: &PageRequest) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("apiKey", self.api_key.clone()),
            ("query", request.term.clone()),
        ];
        for field in FilterField::ALL {
            if let Some(value) = request.filters.get(field) {
                params.push((field.param(), value));
            }
        }
        params.push(("offset", request.offset.to_string()));
        params.push(("number", PAGE_SIZE.to_string()));
        params
    }
}

impl RecipeSource for HttpClient {
    fn fetch_page(&self, request: &PageRequest) -> ApiResult<SearchPage> {
        let response = self
            .http
            .get(self.endpoint.as_str())
            .query(&self.params(request))
            .send()
            .map_err(|err| ApiError::Transport(scrub(err)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }

        response
            .json::<SearchPage>()
            .map_err(|err| ApiError::Decode(scrub(err)))
    }
}

/// Render a transport error without its URL; the URL carries the API key.
fn scrub(err: reqwest::Error) -> String {
    err.without_url().to_string()
}
