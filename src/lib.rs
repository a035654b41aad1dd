//! repohub - Search GitHub repositories from your terminal
//!
//! A thin client over the GitHub repository search API: type a topic,
//! filter by language, sort by stars, page through results.
//!
//! # Features
//!
//! - **Interactive TUI**: search bar, filters, paginated result table,
//!   detail view with browser hand-off
//! - **Recent searches**: bounded, deduplicated, most-recent-first
//! - **One-shot CLI**: `repohub search <topic>` with text or JSON output
//! - **No persistence**: everything lives for the process and no longer
//!
//! # Example
//!
//! ```no_run
//! use repohub::{GitHubClient, SearchQuery};
//!
//! fn main() -> repohub::Result<()> {
//!     let client = GitHubClient::new()?;
//!
//!     let query = SearchQuery {
//!         topic: "ratatui".to_string(),
//!         ..Default::default()
//!     };
//!
//!     let results = client.search(&query)?;
//!     println!("{} repositories match", results.total_count);
//!     for repo in &results.items {
//!         println!("  {} ({} stars)", repo.name, repo.stargazers_count);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod controller;
pub mod error;
pub mod github;
pub mod history;
pub mod logging;
pub mod tui;

// Re-export main types
pub use controller::{IssuedSearch, SearchController};
pub use error::{ApiError, RepoHubError, Result};
pub use github::{GitHubClient, Repo, SearchQuery, SearchResults, SortOrder, PER_PAGE};
pub use history::{RecentSearches, MAX_RECENT_SEARCHES};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Format a count with thousands separators ("1,234,567")
pub fn format_count(count: u64) -> String {
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_count_groups_thousands() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_000), "1,000");
        assert_eq!(format_count(12_345), "12,345");
        assert_eq!(format_count(1_234_567), "1,234,567");
    }
}
