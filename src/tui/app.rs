use crate::api::RecipeSource;
use crate::search::{FilterField, Phase, SearchSession, Snapshot};
use ratatui::widgets::ListState;
use std::sync::Arc;

/// Preset cuisine choices; empty means no restriction
pub const CUISINE_OPTIONS: [&str; 3] = ["", "italian", "mexican"];

/// Preset diet choices; empty means no restriction
pub const DIET_OPTIONS: [&str; 3] = ["", "vegetarian", "vegan"];

/// Which widget owns keystrokes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Query,
    Filter(FilterField),
}

impl Focus {
    const RING: [Focus; 5] = [
        Focus::Query,
        Focus::Filter(FilterField::Cuisine),
        Focus::Filter(FilterField::Diet),
        Focus::Filter(FilterField::ExcludeIngredients),
        Focus::Filter(FilterField::MaxReadyTime),
    ];

    fn index(self) -> usize {
        Self::RING.iter().position(|f| *f == self).unwrap_or(0)
    }

    fn next(self) -> Focus {
        Self::RING[(self.index() + 1) % Self::RING.len()]
    }

    fn prev(self) -> Focus {
        Self::RING[(self.index() + Self::RING.len() - 1) % Self::RING.len()]
    }
}

/// Application state
pub struct App {
    session: SearchSession,
    /// Cached view of the session, refreshed when it reports a change
    pub snapshot: Snapshot,
    pub focus: Focus,
    /// Query text box content; keystrokes are debounced by the session
    pub query_input: String,
    pub cuisine_index: usize,
    pub diet_index: usize,
    pub exclude_input: String,
    pub max_time_input: String,
    pub selected: usize,
    pub list_state: ListState,
}

impl App {
    pub fn new(source: Arc<dyn RecipeSource>, initial_query: Option<String>) -> Self {
        let session = SearchSession::new(source);
        let snapshot = session.snapshot();
        let mut app = Self {
            session,
            snapshot,
            focus: Focus::Query,
            query_input: String::new(),
            cuisine_index: 0,
            diet_index: 0,
            exclude_input: String::new(),
            max_time_input: String::new(),
            selected: 0,
            list_state: ListState::default(),
        };

        if let Some(query) = initial_query {
            app.query_input = query.clone();
            app.session.set_query(&query);
            app.session.submit();
            app.refresh();
        }

        app
    }

    /// Advance the session on every event-loop tick (non-blocking)
    pub fn tick(&mut self) {
        if self.session.poll() {
            self.refresh();
        }
    }

    /// Re-read the session snapshot and keep the selection in bounds
    fn refresh(&mut self) {
        self.snapshot = self.session.snapshot();
        let len = self.snapshot.recipes.len();
        self.selected = self.selected.min(len.saturating_sub(1));
        self.list_state
            .select((len > 0).then_some(self.selected));
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Route a typed character to the focused widget. Query keystrokes go
    /// through the debouncer; filter edits apply immediately. Cuisine and
    /// diet are preset pickers and ignore typed characters.
    pub fn push_char(&mut self, c: char) {
        match self.focus {
            Focus::Query => {
                self.query_input.push(c);
                self.session.set_query(&self.query_input);
            }
            Focus::Filter(FilterField::ExcludeIngredients) => {
                self.exclude_input.push(c);
                self.apply_filter(FilterField::ExcludeIngredients);
            }
            Focus::Filter(FilterField::MaxReadyTime) => {
                if c.is_ascii_digit() {
                    self.max_time_input.push(c);
                    self.apply_filter(FilterField::MaxReadyTime);
                }
            }
            Focus::Filter(_) => {}
        }
    }

    pub fn backspace(&mut self) {
        match self.focus {
            Focus::Query => {
                self.query_input.pop();
                self.session.set_query(&self.query_input);
            }
            Focus::Filter(FilterField::ExcludeIngredients) => {
                self.exclude_input.pop();
                self.apply_filter(FilterField::ExcludeIngredients);
            }
            Focus::Filter(FilterField::MaxReadyTime) => {
                self.max_time_input.pop();
                self.apply_filter(FilterField::MaxReadyTime);
            }
            Focus::Filter(_) => {}
        }
    }

    /// Step the focused preset picker (cuisine or diet)
    pub fn cycle_option(&mut self, forward: bool) {
        match self.focus {
            Focus::Filter(FilterField::Cuisine) => {
                self.cuisine_index = cycle(self.cuisine_index, CUISINE_OPTIONS.len(), forward);
                self.apply_filter(FilterField::Cuisine);
            }
            Focus::Filter(FilterField::Diet) => {
                self.diet_index = cycle(self.diet_index, DIET_OPTIONS.len(), forward);
                self.apply_filter(FilterField::Diet);
            }
            _ => {}
        }
    }

    /// Commit the query text now instead of waiting out the debounce
    pub fn submit(&mut self) {
        self.session.submit();
        self.refresh();
    }

    /// Current display value of one filter field
    pub fn filter_value(&self, field: FilterField) -> String {
        match field {
            FilterField::Cuisine => CUISINE_OPTIONS[self.cuisine_index].to_string(),
            FilterField::Diet => DIET_OPTIONS[self.diet_index].to_string(),
            FilterField::ExcludeIngredients => self.exclude_input.clone(),
            FilterField::MaxReadyTime => self.max_time_input.clone(),
        }
    }

    fn apply_filter(&mut self, field: FilterField) {
        let value = self.filter_value(field);
        if self.session.set_filter(field, &value) {
            self.selected = 0;
        }
        self.refresh();
    }

    pub fn select_next(&mut self) {
        let len = self.snapshot.recipes.len();
        if len == 0 {
            return;
        }
        if self.selected + 1 < len {
            self.selected += 1;
            self.refresh();
        } else if self.snapshot.has_more {
            // At the bottom: pull the next page in
            self.session.load_next_page();
            self.refresh();
        }
    }

    pub fn select_prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            self.refresh();
        }
    }

    pub fn select_page_down(&mut self) {
        let len = self.snapshot.recipes.len();
        if len == 0 {
            return;
        }
        if self.selected == len - 1 && self.snapshot.has_more {
            self.session.load_next_page();
        } else {
            self.selected = (self.selected + 10).min(len - 1);
        }
        self.refresh();
    }

    pub fn select_page_up(&mut self) {
        self.selected = self.selected.saturating_sub(10);
        self.refresh();
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
        self.refresh();
    }

    pub fn select_last(&mut self) {
        let len = self.snapshot.recipes.len();
        if len > 0 {
            self.selected = len - 1;
            self.refresh();
        }
    }

    /// Whether any input widget holds text or a non-default choice
    pub fn has_any_input(&self) -> bool {
        !self.query_input.is_empty()
            || self.cuisine_index != 0
            || self.diet_index != 0
            || !self.exclude_input.is_empty()
            || !self.max_time_input.is_empty()
    }

    /// Reset every input and drop the loaded results
    pub fn clear(&mut self) {
        self.query_input.clear();
        self.cuisine_index = 0;
        self.diet_index = 0;
        self.exclude_input.clear();
        self.max_time_input.clear();
        self.focus = Focus::Query;
        self.selected = 0;
        self.session.clear();
        self.refresh();
    }

    /// One-line summary of where the search stands
    pub fn status_line(&self) -> String {
        match self.snapshot.phase {
            Phase::Idle => "Type to search recipes".to_string(),
            Phase::LoadingFirst => "Loading recipes...".to_string(),
            Phase::LoadingMore => "Loading more recipes...".to_string(),
            Phase::Ready => {
                let shown = self.snapshot.recipes.len();
                if shown == 0 {
                    return "No recipes found for your search.".to_string();
                }
                let total = match self.snapshot.total_results {
                    Some(total) => format!(" of {total}"),
                    None => String::new(),
                };
                if self.snapshot.has_more {
                    format!("{shown}{total} recipes loaded (scroll down for more)")
                } else {
                    format!("{shown}{total} recipes (end of results)")
                }
            }
            Phase::Failed => self
                .snapshot
                .error
                .clone()
                .unwrap_or_else(|| "Failed to fetch recipes. Please try again.".to_string()),
        }
    }
}

fn cycle(index: usize, len: usize, forward: bool) -> usize {
    if forward {
        (index + 1) % len
    } else {
        (index + len - 1) % len
    }
}
