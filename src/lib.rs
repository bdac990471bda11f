//! # ladle - Recipe Search for the Terminal
//!
//! ladle is a terminal client for recipe search: debounced as-you-type
//! queries, four refinement filters, and paged results accumulated in
//! fetch order. Typing never blocks on the network; pages are fetched on
//! background threads and folded in by polling from the event loop.
//!
//! ## Architecture
//!
//! The crate is organized into these main modules:
//!
//! - [`search`] - Debouncer, query identity, and the paged fetch session
//! - [`api`] - Wire types and the HTTP client
//! - [`tui`] - Interactive terminal UI
//! - [`output`] - One-shot result printing
//! - [`config`] - API credentials and the app data directory
//! - [`logging`] - File-backed diagnostics
//!
//! ## Quick Start
//!
//! ```ignore
//! use ladle::api::{HttpClient, DEFAULT_ENDPOINT};
//! use ladle::search::{FilterField, SearchSession};
//! use std::sync::Arc;
//!
//! let client = HttpClient::new(DEFAULT_ENDPOINT, "your-api-key").unwrap();
//! let mut session = SearchSession::new(Arc::new(client));
//!
//! session.set_filter(FilterField::Cuisine, "italian");
//! session.set_query("pasta");
//! session.submit();
//!
//! session.poll();
//! while session.is_loading() {
//!     std::thread::sleep(std::time::Duration::from_millis(50));
//!     session.poll();
//! }
//!
//! for recipe in session.snapshot().recipes {
//!     println!("{}", recipe.title);
//! }
//! ```
//!
//! ## Search lifecycle
//!
//! Every committed search is identified by a key derived from the trimmed
//! term plus all filters. Query keystrokes settle through a 500ms quiet
//! period; filter edits take effect immediately. Whenever the key changes,
//! loaded pages are discarded and fetching restarts from the first page.
//! Responses that arrive for a superseded key are recognized by their
//! generation tag and discarded, so stale pages can never overwrite a
//! newer search.

pub mod api;
pub mod config;
pub mod logging;
pub mod output;
pub mod search;

#[cfg(feature = "interactive")]
pub mod tui;
