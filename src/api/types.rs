//! Wire types for the recipe search endpoint
//!
//! Mirrors the complex-search response shape. Fields the endpoint may omit
//! carry `#[serde(default)]` so a sparse payload still decodes.

use crate::search::filters::FilterSet;
use serde::{Deserialize, Serialize};

/// Fixed number of results requested per page.
pub const PAGE_SIZE: usize = 10;

/// One recipe summary as returned by the search endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub id: u64,
    pub title: String,
    /// Thumbnail URL; not every recipe has one
    #[serde(default)]
    pub image: Option<String>,
    /// Preparation time in minutes
    #[serde(default, rename = "readyInMinutes")]
    pub ready_in_minutes: Option<u32>,
}

/// One page of search results.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchPage {
    #[serde(default)]
    pub results: Vec<Recipe>,
    /// Total match count across all pages, when the endpoint reports it
    #[serde(default, rename = "totalResults")]
    pub total_results: Option<u64>,
}

impl SearchPage {
    /// A page that came back at capacity signals more results may follow;
    /// a short page is the end of the result set.
    pub fn is_full(&self) -> bool {
        self.results.len() >= PAGE_SIZE
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Parameters for one page fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Trimmed, non-empty search term
    pub term: String,
    /// Active filters; absent ones are omitted from the request
    pub filters: FilterSet,
    /// Zero-based result offset (page index times page size)
    pub offset: usize,
}
