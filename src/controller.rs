//! Search-state controller
//!
//! Single authority for when a search fires and how every outcome folds
//! into visible state. One transition function per user action; each one
//! re-derives a [`SearchQuery`] from current state, stamps it with the next
//! sequence number, and flags the request as in flight. The caller performs
//! the request and feeds the outcome back through [`SearchController::apply`].
//!
//! Responses are applied only if their sequence number is the latest issued,
//! so a slow superseded request can never overwrite newer state.

use log::debug;

use crate::error::ApiError;
use crate::github::{Repo, SearchQuery, SearchResults, SortOrder, PER_PAGE};
use crate::history::RecentSearches;

/// GitHub serves at most 1000 search results, 100 pages at 10 per page.
const MAX_PAGES: u64 = 100;

/// A query handed out by the controller, tagged with the sequence number
/// its outcome must carry back.
#[derive(Debug, Clone)]
pub struct IssuedSearch {
    pub seq: u64,
    pub query: SearchQuery,
}

/// The full user-visible state bundle.
#[derive(Debug, Default)]
pub struct SearchController {
    // Query inputs
    pub topic: String,
    pub language: Option<String>,
    pub sort_by_stars: bool,
    pub order: SortOrder,
    pub page: u32,

    // Last applied result set
    pub items: Vec<Repo>,
    pub total_count: u64,

    // Request status
    pub loading: bool,
    pub has_result: bool,
    pub has_error: bool,
    pub error_message: Option<String>,

    pub history: RecentSearches,

    last_seq: u64,
}

impl SearchController {
    pub fn new() -> Self {
        Self {
            page: 1,
            ..Self::default()
        }
    }

    /// Explicit search with the current filter/sort/order/page. Always
    /// allowed, even while a request is in flight; the newer sequence
    /// number supersedes the older request.
    pub fn submit(&mut self) -> IssuedSearch {
        self.issue()
    }

    /// Update the language filter and re-fire, preserving the current page.
    /// Ignored while loading, like the other filter controls.
    pub fn set_language(&mut self, language: Option<String>) -> Option<IssuedSearch> {
        if self.loading {
            return None;
        }
        self.language = language.filter(|l| !l.is_empty());
        Some(self.issue())
    }

    /// Flip the sort-by-stars directive and re-fire.
    pub fn toggle_sort(&mut self) -> Option<IssuedSearch> {
        if self.loading {
            return None;
        }
        self.sort_by_stars = !self.sort_by_stars;
        Some(self.issue())
    }

    /// Flip the sort direction and re-fire.
    pub fn toggle_order(&mut self) -> Option<IssuedSearch> {
        if self.loading {
            return None;
        }
        self.order = self.order.toggled();
        Some(self.issue())
    }

    /// Jump to a page and re-fire with everything else unchanged.
    pub fn set_page(&mut self, page: u32) -> Option<IssuedSearch> {
        if self.loading {
            return None;
        }
        self.page = page.max(1);
        Some(self.issue())
    }

    fn issue(&mut self) -> IssuedSearch {
        self.last_seq += 1;
        self.loading = true;

        let query = SearchQuery {
            topic: self.topic.clone(),
            language: self.language.clone(),
            sort_by_stars: self.sort_by_stars,
            page: self.page,
            order: self.order,
        };

        debug!("issuing search #{}: {:?}", self.last_seq, query);
        IssuedSearch {
            seq: self.last_seq,
            query,
        }
    }

    /// Fold a request outcome into state. Outcomes tagged with anything but
    /// the latest issued sequence number are discarded.
    pub fn apply(&mut self, seq: u64, outcome: Result<SearchResults, ApiError>) {
        if seq != self.last_seq {
            debug!("discarding superseded response #{} (latest #{})", seq, self.last_seq);
            return;
        }

        self.loading = false;
        self.has_result = true;

        match outcome {
            Ok(results) if results.items.is_empty() => {
                self.items.clear();
                self.total_count = results.total_count;
                self.has_error = true;
                self.error_message = None;
            }
            Ok(results) => {
                self.items = results.items;
                self.total_count = results.total_count;
                if !self.topic.is_empty() {
                    self.history.record(&self.topic);
                }
                self.has_error = false;
                self.error_message = None;
            }
            Err(err) => {
                debug!("search #{} failed: {}", seq, err);
                self.error_message = err.provider_message().map(str::to_owned);
                self.items.clear();
                self.language = None;
                self.sort_by_stars = false;
                self.page = 1;
                self.total_count = 0;
                self.has_error = true;
            }
        }
    }

    /// Copy a stored topic into the topic field. Does not fire a search.
    pub fn select_history(&mut self, index: usize) -> bool {
        match self.history.get(index) {
            Some(topic) => {
                self.topic = topic.to_string();
                true
            }
            None => false,
        }
    }

    /// Pagination controls are shown only when more than one page exists.
    pub fn show_pagination(&self) -> bool {
        self.total_count > PER_PAGE as u64
    }

    /// Number of reachable pages, clamped to the provider's result window.
    pub fn page_count(&self) -> u32 {
        self.total_count.div_ceil(PER_PAGE as u64).min(MAX_PAGES) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo(name: &str) -> Repo {
        Repo {
            id: 1,
            name: name.to_string(),
            language: Some("Rust".to_string()),
            description: None,
            forks: 3,
            stargazers_count: 42,
            html_url: format!("https://github.com/test/{}", name),
            owner: None,
        }
    }

    fn ok_results(names: &[&str], total: u64) -> Result<SearchResults, ApiError> {
        Ok(SearchResults {
            total_count: total,
            items: names.iter().map(|n| repo(n)).collect(),
        })
    }

    fn searched(controller: &mut SearchController, topic: &str, outcome: Result<SearchResults, ApiError>) {
        controller.topic = topic.to_string();
        let issued = controller.submit();
        controller.apply(issued.seq, outcome);
    }

    #[test]
    fn submit_issues_query_from_current_state() {
        let mut controller = SearchController::new();
        controller.topic = "react".to_string();

        let issued = controller.submit();
        assert!(controller.loading);
        assert_eq!(
            issued.query.to_url("https://api.github.com"),
            "https://api.github.com/search/repositories\
             ?q=react&page=1&per_page=10&order=desc"
        );
    }

    #[test]
    fn success_replaces_items_and_records_history() {
        let mut controller = SearchController::new();
        searched(&mut controller, "react", ok_results(&["react"], 120));

        assert!(!controller.loading);
        assert!(controller.has_result);
        assert!(!controller.has_error);
        assert_eq!(controller.items.len(), 1);
        assert_eq!(controller.total_count, 120);
        assert_eq!(controller.history.get(0), Some("react"));
    }

    #[test]
    fn result_set_is_replaced_wholesale_not_appended() {
        let mut controller = SearchController::new();
        searched(&mut controller, "react", ok_results(&["a", "b"], 20));
        searched(&mut controller, "react", ok_results(&["c"], 20));

        let names: Vec<&str> = controller.items.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["c"]);
    }

    #[test]
    fn repeat_search_keeps_one_history_entry_at_front() {
        let mut controller = SearchController::new();
        searched(&mut controller, "react", ok_results(&["a"], 11));
        searched(&mut controller, "vue", ok_results(&["b"], 11));
        searched(&mut controller, "react", ok_results(&["c"], 11));

        let entries: Vec<&str> = controller.history.iter().collect();
        assert_eq!(entries, ["react", "vue"]);
    }

    #[test]
    fn empty_response_flags_error_without_touching_history() {
        let mut controller = SearchController::new();
        searched(&mut controller, "react", ok_results(&["a"], 50));
        searched(&mut controller, "zzzznomatch", ok_results(&[], 0));

        assert!(controller.has_error);
        assert!(controller.error_message.is_none());
        assert!(controller.items.is_empty());
        assert_eq!(controller.page_count(), 0);
        let entries: Vec<&str> = controller.history.iter().collect();
        assert_eq!(entries, ["react"]);
    }

    #[test]
    fn empty_items_flag_error_even_with_nonzero_total() {
        let mut controller = SearchController::new();
        searched(&mut controller, "react", ok_results(&[], 37));

        assert!(controller.has_error);
        assert!(controller.items.is_empty());
        assert_eq!(controller.total_count, 37);
    }

    #[test]
    fn failure_resets_filters_page_and_count() {
        let mut controller = SearchController::new();
        controller.topic = "react".to_string();
        let issued = controller.set_language(Some("python".to_string())).unwrap();
        controller.apply(issued.seq, ok_results(&["a"], 200));
        let issued = controller.toggle_sort().unwrap();
        controller.apply(issued.seq, ok_results(&["a"], 200));
        let issued = controller.set_page(3).unwrap();
        controller.apply(
            issued.seq,
            Err(ApiError::Status {
                status: 403,
                message: Some("API rate limit exceeded".to_string()),
            }),
        );

        assert!(controller.has_error);
        assert_eq!(
            controller.error_message.as_deref(),
            Some("API rate limit exceeded")
        );
        assert!(controller.items.is_empty());
        assert_eq!(controller.language, None);
        assert!(!controller.sort_by_stars);
        assert_eq!(controller.page, 1);
        assert_eq!(controller.total_count, 0);
    }

    #[test]
    fn failure_without_provider_message_has_none() {
        let mut controller = SearchController::new();
        searched(
            &mut controller,
            "react",
            Err(ApiError::Status {
                status: 502,
                message: None,
            }),
        );
        assert!(controller.has_error);
        assert!(controller.error_message.is_none());
    }

    #[test]
    fn stale_outcome_is_discarded() {
        let mut controller = SearchController::new();
        controller.topic = "react".to_string();

        let first = controller.submit();
        let second = controller.submit();

        // The slow first response lands after the second was issued.
        controller.apply(first.seq, ok_results(&["stale"], 999));
        assert!(controller.loading);
        assert!(controller.items.is_empty());

        controller.apply(second.seq, ok_results(&["fresh"], 30));
        assert!(!controller.loading);
        assert_eq!(controller.items[0].name, "fresh");
        assert_eq!(controller.total_count, 30);
    }

    #[test]
    fn filter_actions_are_ignored_while_loading() {
        let mut controller = SearchController::new();
        controller.topic = "react".to_string();
        let _inflight = controller.submit();

        assert!(controller.set_language(Some("c".to_string())).is_none());
        assert!(controller.toggle_sort().is_none());
        assert!(controller.toggle_order().is_none());
        assert!(controller.set_page(4).is_none());

        assert_eq!(controller.language, None);
        assert!(!controller.sort_by_stars);
        assert_eq!(controller.order, SortOrder::Descending);
        assert_eq!(controller.page, 1);
    }

    #[test]
    fn language_change_preserves_page() {
        let mut controller = SearchController::new();
        searched(&mut controller, "react", ok_results(&["a"], 500));
        let issued = controller.set_page(5).unwrap();
        controller.apply(issued.seq, ok_results(&["b"], 500));

        let issued = controller.set_language(Some("python".to_string())).unwrap();
        assert_eq!(issued.query.page, 5);
        assert_eq!(issued.query.language.as_deref(), Some("python"));
    }

    #[test]
    fn empty_language_clears_filter() {
        let mut controller = SearchController::new();
        controller.topic = "react".to_string();
        let issued = controller.set_language(Some(String::new())).unwrap();
        assert_eq!(issued.query.language, None);
    }

    #[test]
    fn pagination_shown_iff_total_exceeds_one_page() {
        let mut controller = SearchController::new();
        searched(&mut controller, "react", ok_results(&["a"], 10));
        assert!(!controller.show_pagination());

        searched(&mut controller, "react", ok_results(&["a"], 11));
        assert!(controller.show_pagination());
        assert_eq!(controller.page_count(), 2);
    }

    #[test]
    fn page_count_clamps_to_provider_window() {
        let mut controller = SearchController::new();
        searched(&mut controller, "react", ok_results(&["a"], 2_000_000));
        assert_eq!(controller.page_count(), 100);
    }

    #[test]
    fn history_selection_sets_topic_without_searching() {
        let mut controller = SearchController::new();
        searched(&mut controller, "react", ok_results(&["a"], 20));
        controller.topic = "something else".to_string();

        assert!(controller.select_history(0));
        assert_eq!(controller.topic, "react");
        assert!(!controller.loading);

        assert!(!controller.select_history(9));
    }
}
