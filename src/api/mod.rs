//! Recipe search API: wire types and the HTTP client

pub mod client;
pub mod types;

pub use client::{ApiError, ApiResult, HttpClient, RecipeSource, DEFAULT_ENDPOINT};
pub use types::{PageRequest, Recipe, SearchPage, PAGE_SIZE};
