//! Search pipeline: debounced input, query identity, and the paged session

pub mod controller;
pub mod debouncer;
pub mod filters;
pub mod key;

pub use controller::{Phase, SearchError, SearchSession, Snapshot};
pub use debouncer::{Debouncer, DEFAULT_QUIET_PERIOD};
pub use filters::{FilterField, FilterSet};
pub use key::QueryKey;
