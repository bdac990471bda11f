//! Query identity
//!
//! A [`QueryKey`] names one logical search: the trimmed term plus the full
//! filter set. Two keys compare equal exactly when every component is
//! equal, so the session can tell "same search, keep the pages" apart from
//! "new search, start over" by value, not by which edit produced the key.

use crate::search::filters::FilterSet;
use std::fmt;

/// Identity of one logical search.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    term: String,
    filters: FilterSet,
}

impl QueryKey {
    /// Derive the key for a term and filter set. Pure: no clocks, no
    /// randomness, and the inputs are not consumed.
    pub fn derive(term: &str, filters: &FilterSet) -> Self {
        Self {
            term: term.trim().to_string(),
            filters: filters.clone(),
        }
    }

    /// The trimmed search term
    pub fn term(&self) -> &str {
        &self.term
    }

    /// The filters this key was derived with
    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    /// False when the term is empty; such a key must never reach the wire
    pub fn is_searchable(&self) -> bool {
        !self.term.is_empty()
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} [{}]", self.term, self.filters)
    }
}
