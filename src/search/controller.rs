//! Paginated search session
//!
//! [`SearchSession`] is the state machine between the input widgets and the
//! recipe endpoint. Query keystrokes pass through the debouncer; filter
//! edits apply immediately. Either way the session derives a [`QueryKey`],
//! and a changed key discards every loaded page and starts over from the
//! first one.
//!
//! Page fetches run on background threads and report back over a channel
//! tagged with the generation the session was in when the request left.
//! [`SearchSession::poll`], called from the owning event loop, applies only
//! outcomes whose generation still matches; anything older belongs to a
//! superseded search and is dropped on the floor. In-flight requests are
//! never cancelled, only outrun. Dropping the session closes the channel
//! and late workers fail their send harmlessly.
//!
//! At most one request is in flight at a time, so pages always land in
//! offset order and the accumulated list never reorders.

use crate::api::{ApiError, PageRequest, Recipe, RecipeSource, SearchPage, PAGE_SIZE};
use crate::search::debouncer::Debouncer;
use crate::search::filters::{FilterField, FilterSet};
use crate::search::key::QueryKey;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error};

/// User-facing search errors. Transport detail never appears here; it goes
/// to the log instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The settled search term was empty; nothing was sent
    #[error("Please enter a search term.")]
    EmptyQuery,
    /// A page request failed
    #[error("Failed to fetch recipes. Please try again.")]
    Fetch,
}

/// Where the session is in the paged fetch lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No search committed yet
    Idle,
    /// Fetching the first page of a fresh key
    LoadingFirst,
    /// Appending another page to the current key
    LoadingMore,
    /// Pages loaded, nothing in flight
    Ready,
    /// The last operation failed
    Failed,
}

/// Read-only view of the session for presentation.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub phase: Phase,
    /// Loaded recipes, flattened across pages in fetch order
    pub recipes: Vec<Recipe>,
    /// Whether another page may exist
    pub has_more: bool,
    /// User-facing error message, set only in [`Phase::Failed`]
    pub error: Option<String>,
    /// Total match count reported by the endpoint, if any
    pub total_results: Option<u64>,
    /// Number of pages loaded so far
    pub page_count: usize,
}

/// What a worker thread sent back.
struct PageOutcome {
    generation: u64,
    result: Result<SearchPage, ApiError>,
}

/// Debounced, paginated search over a [`RecipeSource`].
pub struct SearchSession {
    source: Arc<dyn RecipeSource>,
    debouncer: Debouncer<String>,
    filters: FilterSet,
    /// Identity of the committed search; `None` until the first commit
    key: Option<QueryKey>,
    phase: Phase,
    pages: Vec<SearchPage>,
    has_more: bool,
    error: Option<SearchError>,
    /// Bumped on every key change; outcomes from older generations are stale
    generation: u64,
    /// Offset of the request currently out, if any
    in_flight: Option<usize>,
    outcome_tx: Sender<PageOutcome>,
    outcome_rx: Receiver<PageOutcome>,
}

impl SearchSession {
    /// Create a session with the default keystroke quiet period
    pub fn new(source: Arc<dyn RecipeSource>) -> Self {
        Self::with_quiet_period(source, crate::search::debouncer::DEFAULT_QUIET_PERIOD)
    }

    /// Create a session with a custom quiet period
    pub fn with_quiet_period(source: Arc<dyn RecipeSource>, quiet_period: Duration) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::channel();
        Self {
            source,
            debouncer: Debouncer::with_quiet_period(quiet_period),
            filters: FilterSet::default(),
            key: None,
            phase: Phase::Idle,
            pages: Vec::new(),
            has_more: false,
            error: None,
            generation: 0,
            in_flight: None,
            outcome_tx,
            outcome_rx,
        }
    }

    /// Record a query keystroke. Nothing is fetched until the quiet period
    /// elapses; each call re-arms it and only the last text counts.
    pub fn set_query(&mut self, raw: &str) {
        self.debouncer.push(raw.to_string());
    }

    /// Apply a filter edit immediately. A changed effective value re-derives
    /// the key and restarts the search from the first page. Returns whether
    /// observable state changed.
    pub fn set_filter(&mut self, field: FilterField, raw: &str) -> bool {
        self.filters.set(field, raw);
        let term = self.committed_term().to_string();
        self.install_key(QueryKey::derive(&term, &self.filters))
    }

    /// Commit the pending query text now, skipping the quiet period
    pub fn submit(&mut self) -> bool {
        match self.debouncer.flush() {
            Some(term) => self.install_key(QueryKey::derive(&term, &self.filters)),
            None => false,
        }
    }

    /// Request the page after the last loaded one. Only valid when the
    /// session is [`Phase::Ready`] with more results expected and nothing
    /// in flight; otherwise this is a no-op.
    pub fn load_next_page(&mut self) -> bool {
        if self.phase != Phase::Ready || !self.has_more || self.in_flight.is_some() {
            return false;
        }
        let Some(key) = self.key.clone() else {
            return false;
        };
        self.phase = Phase::LoadingMore;
        self.spawn_fetch(&key, self.pages.len() * PAGE_SIZE);
        true
    }

    /// Drop pending input, strand any in-flight request, and return to
    /// [`Phase::Idle`] with no pages.
    pub fn clear(&mut self) {
        self.debouncer.cancel();
        self.generation += 1;
        self.in_flight = None;
        self.key = None;
        self.filters = FilterSet::default();
        self.pages.clear();
        self.has_more = false;
        self.error = None;
        self.phase = Phase::Idle;
    }

    /// Single tick entry point for the owning event loop: settle the
    /// debouncer and apply any completed fetches. Returns whether
    /// observable state changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        if let Some(term) = self.debouncer.take_settled() {
            changed |= self.install_key(QueryKey::derive(&term, &self.filters));
        }
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            changed |= self.apply_outcome(outcome);
        }
        changed
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::LoadingFirst | Phase::LoadingMore)
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Active filters as last applied
    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    /// Read-only view for rendering
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            recipes: self
                .pages
                .iter()
                .flat_map(|page| page.results.iter().cloned())
                .collect(),
            has_more: self.has_more,
            error: self.error.map(|err| err.to_string()),
            total_results: self.pages.iter().rev().find_map(|p| p.total_results),
            page_count: self.pages.len(),
        }
    }

    /// Term of the committed key, or empty before the first commit
    fn committed_term(&self) -> &str {
        self.key.as_ref().map(QueryKey::term).unwrap_or("")
    }

    /// Make `key` the current search. Equal keys are a no-op; a changed key
    /// discards all pages, strands any in-flight request, and either starts
    /// the first-page fetch or reports the empty-term error.
    fn install_key(&mut self, key: QueryKey) -> bool {
        if self.key.as_ref() == Some(&key) {
            return false;
        }

        self.generation += 1;
        self.in_flight = None;
        self.pages.clear();
        self.has_more = false;
        self.error = None;

        if !key.is_searchable() {
            debug!(generation = self.generation, "empty term, no request issued");
            self.phase = Phase::Failed;
            self.error = Some(SearchError::EmptyQuery);
            self.key = Some(key);
            return true;
        }

        debug!(generation = self.generation, key = %key, "starting search");
        self.phase = Phase::LoadingFirst;
        self.spawn_fetch(&key, 0);
        self.key = Some(key);
        true
    }

    fn spawn_fetch(&mut self, key: &QueryKey, offset: usize) {
        let request = PageRequest {
            term: key.term().to_string(),
            filters: key.filters().clone(),
            offset,
        };
        let generation = self.generation;
        self.in_flight = Some(offset);

        let source = Arc::clone(&self.source);
        let tx = self.outcome_tx.clone();
        debug!(generation, offset, "requesting page");
        thread::spawn(move || {
            let result = source.fetch_page(&request);
            // The session may have moved on or been dropped; a failed send
            // just means nobody wants this page anymore.
            let _ = tx.send(PageOutcome { generation, result });
        });
    }

    fn apply_outcome(&mut self, outcome: PageOutcome) -> bool {
        if outcome.generation != self.generation {
            debug!(
                generation = outcome.generation,
                current = self.generation,
                "discarding stale page outcome"
            );
            return false;
        }
        let Some(offset) = self.in_flight.take() else {
            return false;
        };

        match outcome.result {
            Ok(page) => {
                self.has_more = page.is_full();
                debug!(
                    offset,
                    results = page.len(),
                    has_more = self.has_more,
                    "page received"
                );
                self.pages.push(page);
                self.phase = Phase::Ready;
                self.error = None;
            }
            Err(err) => {
                // Full detail to the log; the UI gets the generic message
                error!(offset, error = %err, "page request failed");
                self.phase = Phase::Failed;
                self.error = Some(SearchError::Fetch);
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::thread::sleep;

    /// Scripted [`RecipeSource`] that records every request and answers
    /// from a queue, optionally after a delay.
    struct ScriptedSource {
        script: Mutex<VecDeque<Result<SearchPage, ApiError>>>,
        requests: Mutex<Vec<PageRequest>>,
        delay: Duration,
    }

    impl ScriptedSource {
        fn new(script: Vec<Result<SearchPage, ApiError>>) -> Arc<Self> {
            Self::with_delay(script, Duration::ZERO)
        }

        fn with_delay(
            script: Vec<Result<SearchPage, ApiError>>,
            delay: Duration,
        ) -> Arc<Self> {
            Arc::new(Self {
                script: Mutex::new(script.into()),
                requests: Mutex::new(Vec::new()),
                delay,
            })
        }

        fn requests(&self) -> Vec<PageRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl RecipeSource for ScriptedSource {
        fn fetch_page(&self, request: &PageRequest) -> Result<SearchPage, ApiError> {
            self.requests.lock().unwrap().push(request.clone());
            if !self.delay.is_zero() {
                sleep(self.delay);
            }
            self.script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(ApiError::Status(599)))
        }
    }

    fn page(count: usize, first_id: u64) -> SearchPage {
        SearchPage {
            results: (0..count as u64)
                .map(|i| Recipe {
                    id: first_id + i,
                    title: format!("Recipe {}", first_id + i),
                    image: None,
                    ready_in_minutes: Some(25),
                })
                .collect(),
            total_results: Some(16),
        }
    }

    /// Poll until no request is in flight
    fn settle(session: &mut SearchSession) {
        for _ in 0..500 {
            session.poll();
            if !session.is_loading() {
                return;
            }
            sleep(Duration::from_millis(2));
        }
        panic!("session never settled");
    }

    fn instant_session(source: Arc<ScriptedSource>) -> SearchSession {
        SearchSession::with_quiet_period(source, Duration::ZERO)
    }

    #[test]
    fn test_no_fetch_until_the_quiet_period_elapses() {
        let source = ScriptedSource::new(vec![Ok(page(10, 0))]);
        let mut session =
            SearchSession::with_quiet_period(Arc::clone(&source) as Arc<dyn RecipeSource>, Duration::from_millis(40));

        session.set_query("pasta");
        session.poll();
        assert_eq!(session.phase(), Phase::Idle);
        assert!(source.requests().is_empty());

        sleep(Duration::from_millis(60));
        settle(&mut session);

        assert_eq!(session.phase(), Phase::Ready);
        let requests = source.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].term, "pasta");
        assert_eq!(requests[0].offset, 0);
    }

    #[test]
    fn test_empty_term_is_a_validation_error_with_no_request() {
        let source = ScriptedSource::new(vec![]);
        let mut session = instant_session(Arc::clone(&source));

        session.set_query("   ");
        settle(&mut session);

        assert_eq!(session.phase(), Phase::Failed);
        let snapshot = session.snapshot();
        assert_eq!(snapshot.error.as_deref(), Some("Please enter a search term."));
        assert!(snapshot.recipes.is_empty());
        assert!(source.requests().is_empty());
    }

    #[test]
    fn test_settled_repeat_of_the_current_key_is_a_no_op() {
        let source = ScriptedSource::new(vec![Ok(page(10, 0))]);
        let mut session = instant_session(Arc::clone(&source));

        session.set_query("pasta");
        settle(&mut session);
        assert_eq!(session.phase(), Phase::Ready);

        session.set_query("pasta");
        settle(&mut session);

        assert_eq!(session.phase(), Phase::Ready);
        assert_eq!(session.snapshot().recipes.len(), 10);
        assert_eq!(source.requests().len(), 1);
    }

    #[test]
    fn test_pages_accumulate_in_fetch_order() {
        let source = ScriptedSource::new(vec![Ok(page(10, 0)), Ok(page(6, 10))]);
        let mut session = instant_session(Arc::clone(&source));

        session.set_query("pasta");
        settle(&mut session);
        assert_eq!(session.snapshot().recipes.len(), 10);
        assert!(session.has_more());

        assert!(session.load_next_page());
        settle(&mut session);

        let snapshot = session.snapshot();
        assert_eq!(snapshot.page_count, 2);
        assert_eq!(snapshot.recipes.len(), 16);
        assert!(!snapshot.has_more);
        let ids: Vec<u64> = snapshot.recipes.iter().map(|r| r.id).collect();
        assert_eq!(ids, (0..16).collect::<Vec<u64>>());

        let offsets: Vec<usize> = source.requests().iter().map(|r| r.offset).collect();
        assert_eq!(offsets, vec![0, 10]);
    }

    #[test]
    fn test_short_page_ends_pagination() {
        let source = ScriptedSource::new(vec![Ok(page(3, 0))]);
        let mut session = instant_session(Arc::clone(&source));

        session.set_query("pasta");
        settle(&mut session);

        assert_eq!(session.phase(), Phase::Ready);
        assert!(!session.has_more());
        assert!(!session.load_next_page());
        assert_eq!(source.requests().len(), 1);
    }

    #[test]
    fn test_load_next_page_is_rejected_when_idle() {
        let source = ScriptedSource::new(vec![]);
        let mut session = instant_session(source);
        assert!(!session.load_next_page());
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn test_loading_phases_and_the_single_flight_guard() {
        let source = ScriptedSource::with_delay(
            vec![Ok(page(10, 0)), Ok(page(10, 10))],
            Duration::from_millis(40),
        );
        let mut session = instant_session(Arc::clone(&source));

        session.set_query("pasta");
        session.poll();
        assert_eq!(session.phase(), Phase::LoadingFirst);
        assert!(session.is_loading());

        settle(&mut session);
        assert_eq!(session.phase(), Phase::Ready);

        assert!(session.load_next_page());
        assert_eq!(session.phase(), Phase::LoadingMore);
        // Second request while one is in flight must be refused
        assert!(!session.load_next_page());

        settle(&mut session);
        assert_eq!(session.snapshot().recipes.len(), 20);
        assert_eq!(source.requests().len(), 2);
    }

    #[test]
    fn test_failure_surfaces_only_the_generic_message() {
        let source = ScriptedSource::new(vec![Err(ApiError::Status(401))]);
        let mut session = instant_session(Arc::clone(&source));

        session.set_query("pasta");
        settle(&mut session);

        assert_eq!(session.phase(), Phase::Failed);
        let snapshot = session.snapshot();
        let message = snapshot.error.unwrap();
        assert_eq!(message, "Failed to fetch recipes. Please try again.");
        assert!(!message.contains("401"));
        assert!(snapshot.recipes.is_empty());
    }

    #[test]
    fn test_failure_on_a_later_page_keeps_loaded_pages() {
        let source = ScriptedSource::new(vec![
            Ok(page(10, 0)),
            Err(ApiError::Transport("connection reset".to_string())),
        ]);
        let mut session = instant_session(Arc::clone(&source));

        session.set_query("pasta");
        settle(&mut session);
        assert!(session.load_next_page());
        settle(&mut session);

        assert_eq!(session.phase(), Phase::Failed);
        let snapshot = session.snapshot();
        assert_eq!(snapshot.recipes.len(), 10);
        let message = snapshot.error.unwrap();
        assert!(!message.contains("connection reset"));
        // Failed sessions do not paginate further
        assert!(!session.load_next_page());
    }

    #[test]
    fn test_filters_apply_eagerly_while_queries_debounce() {
        let source = ScriptedSource::new(vec![Ok(page(10, 0)), Ok(page(4, 100)), Ok(page(2, 200))]);
        let mut session =
            SearchSession::with_quiet_period(Arc::clone(&source) as Arc<dyn RecipeSource>, Duration::from_millis(40));

        session.set_query("pasta");
        sleep(Duration::from_millis(60));
        settle(&mut session);
        assert_eq!(session.snapshot().recipes.len(), 10);

        // Filter edit goes out before any poll happens
        assert!(session.set_filter(FilterField::Cuisine, "italian"));
        sleep(Duration::from_millis(20));
        assert_eq!(source.requests().len(), 2);
        assert_eq!(source.requests()[1].filters.cuisine.as_deref(), Some("italian"));
        assert_eq!(source.requests()[1].offset, 0);

        settle(&mut session);
        let snapshot = session.snapshot();
        assert_eq!(snapshot.recipes.len(), 4);
        assert_eq!(snapshot.recipes[0].id, 100);

        // A query edit waits out the quiet period first
        session.set_query("pizza");
        session.poll();
        sleep(Duration::from_millis(20));
        session.poll();
        assert_eq!(source.requests().len(), 2);

        sleep(Duration::from_millis(40));
        settle(&mut session);
        assert_eq!(source.requests().len(), 3);
        assert_eq!(source.requests()[2].term, "pizza");
        assert_eq!(session.snapshot().recipes[0].id, 200);
    }

    #[test]
    fn test_filter_edit_before_any_query_reports_the_empty_term() {
        let source = ScriptedSource::new(vec![]);
        let mut session = instant_session(Arc::clone(&source));

        assert!(session.set_filter(FilterField::Diet, "vegan"));
        assert_eq!(session.phase(), Phase::Failed);
        assert_eq!(
            session.snapshot().error.as_deref(),
            Some("Please enter a search term.")
        );
        assert!(source.requests().is_empty());
    }

    #[test]
    fn test_submit_skips_the_quiet_period() {
        let source = ScriptedSource::new(vec![Ok(page(10, 0))]);
        let mut session =
            SearchSession::with_quiet_period(Arc::clone(&source) as Arc<dyn RecipeSource>, Duration::from_secs(60));

        session.set_query("pasta");
        assert!(session.submit());
        settle(&mut session);

        assert_eq!(session.phase(), Phase::Ready);
        assert_eq!(source.requests().len(), 1);
    }

    #[test]
    fn test_clear_returns_to_idle_and_cancels_pending_input() {
        let source = ScriptedSource::new(vec![Ok(page(10, 0))]);
        let mut session =
            SearchSession::with_quiet_period(Arc::clone(&source) as Arc<dyn RecipeSource>, Duration::from_millis(40));

        session.set_query("pasta");
        sleep(Duration::from_millis(60));
        settle(&mut session);
        assert_eq!(session.snapshot().recipes.len(), 10);

        session.set_query("piz");
        session.clear();

        assert_eq!(session.phase(), Phase::Idle);
        assert!(session.snapshot().recipes.is_empty());
        assert!(session.filters().is_empty());

        // The pending "piz" must never settle into a fetch
        sleep(Duration::from_millis(60));
        session.poll();
        assert_eq!(session.phase(), Phase::Idle);
        assert_eq!(source.requests().len(), 1);
    }

    #[test]
    fn test_snapshot_reports_the_latest_total() {
        let source = ScriptedSource::new(vec![Ok(SearchPage {
            results: page(10, 0).results,
            total_results: Some(86),
        })]);
        let mut session = instant_session(source);

        session.set_query("pasta");
        settle(&mut session);

        let snapshot = session.snapshot();
        assert_eq!(snapshot.total_results, Some(86));
        assert!(snapshot.has_more);
    }
}
