//! Search dispatch: maps a criterion and query string to gateway calls and
//! returns the paginated sequence tagged with its entity kind.

mod profession;

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::github::types::{Repository, User};
use crate::github::{GitHubClient, GitHubError, query};
use crate::pagination::{self, CombinedPage, PageSource, RemotePage};
use crate::store::{Store, StoreError};

/// The search mode selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criterion {
    Username,
    Location,
    Language,
    Profession,
}

impl Criterion {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::Location => "location",
            Self::Language => "language",
            Self::Profession => "profession",
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Criterion {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "username" | "name" => Ok(Self::Username),
            "location" | "loc" => Ok(Self::Location),
            "language" | "lang" => Ok(Self::Language),
            "profession" | "prof" => Ok(Self::Profession),
            other => Err(SearchError::UnknownCriterion(other.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("Unknown search criterion '{0}'. Use username, location, language, or profession.")]
    UnknownCriterion(String),

    #[error("Search query must not be empty")]
    EmptyQuery,

    #[error("{0}")]
    GitHub(#[from] GitHubError),

    #[error("{0}")]
    Store(#[from] StoreError),
}

/// A dispatched search: the paginated sequence tagged with its entity kind.
pub enum SearchResults {
    Users(RemotePage<User>),
    Repositories(CombinedPage<RemotePage<Repository>>),
}

/// One fetched page, tagged like the sequence it came from.
pub enum ResultsPage {
    Users(Vec<User>),
    Repositories(Vec<Repository>),
}

impl SearchResults {
    pub async fn total_count(&self) -> Result<u64, GitHubError> {
        match self {
            Self::Users(page) => page.total_count().await,
            Self::Repositories(combined) => combined.total_count().await,
        }
    }

    pub async fn page_count(&self) -> Result<u32, GitHubError> {
        Ok(pagination::page_count(self.total_count().await?))
    }

    pub async fn fetch_page(&self, page: u32) -> Result<ResultsPage, GitHubError> {
        match self {
            Self::Users(source) => Ok(ResultsPage::Users(source.get_page(page).await?)),
            Self::Repositories(combined) => {
                Ok(ResultsPage::Repositories(combined.get_page(page).await?))
            }
        }
    }
}

/// Map a criterion and query to the gateway calls backing it.
///
/// No remote request is made here; the returned sequence fetches lazily.
/// Language queries are resolved against the local language cache when a
/// cached entry matches, so the canonical name is what hits the API.
pub fn dispatch(
    client: &GitHubClient,
    store: &Store,
    query: &str,
    by: Criterion,
) -> Result<SearchResults, SearchError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(SearchError::EmptyQuery);
    }
    let results = match by {
        Criterion::Username => {
            SearchResults::Users(client.search_users(&query::by_username(query)))
        }
        Criterion::Location => {
            SearchResults::Users(client.search_users(&query::by_location(query)))
        }
        Criterion::Language => {
            let language = store
                .find_language(query)
                .map(|l| l.name.as_str())
                .unwrap_or(query);
            SearchResults::Users(client.search_users(&query::by_language(language)?))
        }
        Criterion::Profession => {
            let combined = profession::search(client, store, query);
            debug!(sources = combined.source_count(), "profession search dispatched");
            SearchResults::Repositories(combined)
        }
    };
    Ok(results)
}
