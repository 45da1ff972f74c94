//! # Filter/URL State Coordinator
//!
//! The navigable URL query string is the single source of truth for
//! filters, sort, and page. [`UrlState`] owns the parse/render round-trip
//! and the update commands; [`FilterCoordinator`] layers the search-term
//! debounce on top so keystroke-rate updates don't become fetch-rate API
//! calls.
//!
//! Owned query parameters: `q`, `status`, `species`, `gender`, `type`,
//! `page`, `sortBy`, `sortDir`.

use crate::debounce::Debouncer;
use crate::model::{CharacterStatus, FilterCriteria, Gender};
use crate::sort::{SortDirection, SortKey, SortSpec};
use std::collections::BTreeMap;
use std::time::Duration;
use tokio::sync::watch;

/// Quiet period applied to the search term before it participates in the
/// debounced filters.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Filter fields addressable by the update command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKey {
    Name,
    Status,
    Species,
    Gender,
    Kind,
    Page,
}

impl FilterKey {
    /// The URL query parameter this key owns.
    pub fn param(&self) -> &'static str {
        match self {
            FilterKey::Name => "q",
            FilterKey::Status => "status",
            FilterKey::Species => "species",
            FilterKey::Gender => "gender",
            FilterKey::Kind => "type",
            FilterKey::Page => "page",
        }
    }
}

/// Parsed, canonical URL query state. In-memory state holds nothing
/// durable beyond this map; rendering back to a query string and
/// re-parsing is lossless.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UrlState {
    params: BTreeMap<String, String>,
}

impl UrlState {
    /// Parse a query string (with or without a leading `?`).
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let params = url::form_urlencoded::parse(query.as_bytes())
            .filter(|(_, value)| !value.is_empty())
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();
        Self { params }
    }

    /// Render the canonical query string. Empty state renders as `""`
    /// (the bare path).
    pub fn to_query_string(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.params {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }

    /// Current filter criteria. Absent parameters mean "no constraint";
    /// an unparsable page falls back to 1.
    pub fn filters(&self) -> FilterCriteria {
        FilterCriteria {
            name: self.params.get("q").cloned(),
            status: self
                .params
                .get("status")
                .and_then(|v| CharacterStatus::parse(v)),
            species: self.params.get("species").cloned(),
            kind: self.params.get("type").cloned(),
            gender: self.params.get("gender").and_then(|v| Gender::parse(v)),
            page: self
                .params
                .get("page")
                .and_then(|v| v.parse::<u32>().ok())
                .filter(|page| *page >= 1)
                .unwrap_or(1),
        }
    }

    /// Current sort spec; defaults to `{name, asc}`.
    pub fn sort_spec(&self) -> SortSpec {
        SortSpec {
            key: self
                .params
                .get("sortBy")
                .map(|v| SortKey::parse(v))
                .unwrap_or_default(),
            direction: self
                .params
                .get("sortDir")
                .map(|v| SortDirection::parse(v))
                .unwrap_or_default(),
        }
    }

    /// Rewrite one filter parameter. `None` or an empty string removes
    /// it. Changing any filter other than the page itself invalidates the
    /// current page position, so `page` is dropped back to its canonical
    /// absent form.
    pub fn update_filter(&mut self, key: FilterKey, value: Option<&str>) {
        match value {
            Some(v) if !v.is_empty() => {
                self.params.insert(key.param().to_string(), v.to_string());
            }
            _ => {
                self.params.remove(key.param());
            }
        }
        if key != FilterKey::Page {
            self.params.remove("page");
        }
    }

    /// Update the sort key and/or direction independently.
    pub fn update_sort(&mut self, key: Option<SortKey>, direction: Option<SortDirection>) {
        if let Some(key) = key {
            self.params.insert("sortBy".to_string(), key.as_str().to_string());
        }
        if let Some(direction) = direction {
            self.params
                .insert("sortDir".to_string(), direction.as_str().to_string());
        }
    }

    /// Reset to the bare path.
    pub fn clear(&mut self) {
        self.params.clear();
    }

    /// Whether any filter field is set or the sort deviates from the
    /// `{name, asc}` default. Page position alone does not count.
    pub fn has_active_filters(&self) -> bool {
        let filters = self.filters();
        filters.name.is_some()
            || filters.status.is_some()
            || filters.species.is_some()
            || filters.kind.is_some()
            || filters.gender.is_some()
            || self.sort_spec() != SortSpec::default()
    }
}

/// URL state plus the search-term debounce. Commands mutate the URL
/// immediately; the name term additionally feeds the debouncer, and only
/// the settled term participates in [`FilterCoordinator::debounced_filters`].
pub struct FilterCoordinator {
    url: UrlState,
    debouncer: Debouncer<String>,
}

impl Default for FilterCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterCoordinator {
    /// Must be constructed inside a tokio runtime (the debouncer spawns
    /// its timer task).
    pub fn new() -> Self {
        Self::with_query("")
    }

    pub fn with_query(query: &str) -> Self {
        let url = UrlState::parse(query);
        let initial = url.filters().name.unwrap_or_default();
        Self {
            url,
            debouncer: Debouncer::new(initial, SEARCH_DEBOUNCE),
        }
    }

    pub fn update_filter(&mut self, key: FilterKey, value: Option<&str>) {
        self.url.update_filter(key, value);
        if key == FilterKey::Name {
            self.debouncer
                .update(value.unwrap_or_default().to_string());
        }
    }

    pub fn update_sort(&mut self, key: Option<SortKey>, direction: Option<SortDirection>) {
        self.url.update_sort(key, direction);
    }

    pub fn clear(&mut self) {
        self.url.clear();
        self.debouncer.update(String::new());
    }

    /// The raw, undebounced search term, for input display.
    pub fn search_term(&self) -> String {
        self.url.filters().name.unwrap_or_default()
    }

    /// Current filters with the name term replaced by its settled value.
    /// This is the value that should trigger remote fetches.
    pub fn debounced_filters(&self) -> FilterCriteria {
        let mut filters = self.url.filters();
        let settled = self.debouncer.current();
        filters.name = if settled.is_empty() { None } else { Some(settled) };
        filters
    }

    /// Subscribe to settled search terms; each change is a cue to refetch.
    pub fn settled_terms(&self) -> watch::Receiver<String> {
        self.debouncer.subscribe()
    }

    pub fn filters(&self) -> FilterCriteria {
        self.url.filters()
    }

    pub fn sort_spec(&self) -> SortSpec {
        self.url.sort_spec()
    }

    pub fn has_active_filters(&self) -> bool {
        self.url.has_active_filters()
    }

    pub fn query_string(&self) -> String {
        self.url.to_query_string()
    }

    /// Explicit teardown of the debounce timer task.
    pub fn shutdown(&self) {
        self.debouncer.shutdown();
    }
}
