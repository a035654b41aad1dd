//! GitHub search gateway
//!
//! Builds one request per invocation against the repository search endpoint
//! and hands back the parsed result set verbatim. No caching, no retry; the
//! response is the caller's problem from here on.

use log::{debug, warn};
use reqwest::header::ACCEPT;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Production API endpoint. Injectable so tests and mirrors can point the
/// client elsewhere.
pub const API_BASE_URL: &str = "https://api.github.com";

/// Media type GitHub expects for v3 requests.
pub const ACCEPT_HEADER: &str = "application/vnd.github.v3+json";

/// Results per page; the UI's pagination math assumes this value.
pub const PER_PAGE: u32 = 10;

/// Sort direction applied to the chosen sort key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }

    /// Value for the `order` query parameter.
    pub fn as_param(self) -> &'static str {
        match self {
            SortOrder::Ascending => "asc",
            SortOrder::Descending => "desc",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortOrder::Ascending => "ASC",
            SortOrder::Descending => "DESC",
        }
    }
}

/// One fully-determined search request.
///
/// Rebuilt from controller state on every triggering action; never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub topic: String,
    pub language: Option<String>,
    pub sort_by_stars: bool,
    pub page: u32,
    pub order: SortOrder,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            topic: String::new(),
            language: None,
            sort_by_stars: false,
            page: 1,
            order: SortOrder::default(),
        }
    }
}

impl SearchQuery {
    /// The `q` parameter: the topic, optionally conjoined with a language
    /// constraint. Topic and language are encoded individually so the `+`
    /// separator survives as-is.
    pub fn query_param(&self) -> String {
        let mut q = urlencoding::encode(&self.topic).into_owned();
        if let Some(lang) = &self.language {
            q.push_str("+language:");
            q.push_str(&urlencoding::encode(lang));
        }
        q
    }

    /// Full request URL against the given API base.
    pub fn to_url(&self, base: &str) -> String {
        let mut url = format!(
            "{}/search/repositories?q={}&page={}&per_page={}&order={}",
            base,
            self.query_param(),
            self.page,
            PER_PAGE,
            self.order.as_param()
        );
        if self.sort_by_stars {
            url.push_str("&sort=stars");
        }
        url
    }
}

/// Owner of a repository as the provider reports it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Owner {
    pub login: String,
}

/// One repository summary from the search response.
///
/// Read-only provider data; fields the provider may omit stay optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repo {
    pub id: u64,
    pub name: String,
    pub language: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub forks: u64,
    #[serde(default)]
    pub stargazers_count: u64,
    pub html_url: String,
    pub owner: Option<Owner>,
}

/// Search response: item sequence plus total match count
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResults {
    pub total_count: u64,
    pub items: Vec<Repo>,
}

/// Error body shape GitHub uses for non-2xx responses. Decoded guardedly;
/// anything unexpected just means "no message".
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Blocking client for the repository search endpoint
pub struct GitHubClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl GitHubClient {
    pub fn new() -> Result<Self, ApiError> {
        Self::with_base_url(API_BASE_URL)
    }

    pub fn with_base_url(base: impl Into<String>) -> Result<Self, ApiError> {
        // GitHub rejects requests without a User-Agent
        let http = reqwest::blocking::Client::builder()
            .user_agent(concat!("repohub/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: base.into(),
        })
    }

    /// Perform one search. Exactly one network call; the result set and
    /// total count are returned untouched.
    pub fn search(&self, query: &SearchQuery) -> Result<SearchResults, ApiError> {
        let url = query.to_url(&self.base_url);
        debug!("GET {}", url);

        let response = self.http.get(&url).header(ACCEPT, ACCEPT_HEADER).send()?;

        let status = response.status();
        if !status.is_success() {
            let message = response.json::<ErrorBody>().ok().and_then(|b| b.message);
            warn!("search returned {}: {:?}", status, message);
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let results: SearchResults = response
            .json()
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        debug!(
            "search '{}' page {}: {} items of {}",
            query.topic,
            query.page,
            results.items.len(),
            results.total_count
        );
        Ok(results)
    }
}
