//! The per-request results flow: resolve the criterion, fetch the total,
//! validate the page bound, fetch one page, and adapt repository pages to
//! their deduplicated owners.

use std::collections::HashSet;

use tracing::debug;

use crate::github::GitHubClient;
use crate::github::types::Repository;
use crate::pagination;
use crate::search::{self, Criterion, ResultsPage, SearchError};
use crate::store::Store;

/// Outcome of one results request. A requested page beyond the computed
/// page count redirects to page 1 instead of erroring.
pub enum ResultsOutcome {
    Redirect { page: u32, path: String },
    Page(ResultsView),
}

pub struct ResultsView {
    pub criterion: Criterion,
    pub query: String,
    /// 1-based page shown.
    pub page: u32,
    pub page_count: u32,
    pub total_count: u64,
    pub rows: Vec<UserRow>,
    pub links: Vec<PageLink>,
}

/// One user-facing result row. Repository results are adapted to their
/// owners before reaching here.
pub struct UserRow {
    pub login: String,
    pub url: String,
}

/// One pagination link. `path` is `None` for the current page, which is
/// rendered without a link.
pub struct PageLink {
    pub number: u32,
    pub path: Option<String>,
}

/// Run one results request for a 1-based `page`.
///
/// Page 1 of an empty sequence renders an empty page rather than
/// redirecting to itself. Remote failures propagate; there are no retries.
pub async fn run(
    client: &GitHubClient,
    store: &Store,
    query: &str,
    by: Criterion,
    page: u32,
) -> Result<ResultsOutcome, SearchError> {
    let page = page.max(1);
    let results = search::dispatch(client, store, query, by)?;
    let total_count = results.total_count().await?;
    let page_count = pagination::page_count(total_count);

    if page > page_count && page != 1 {
        debug!(page, page_count, "requested page out of range, redirecting");
        return Ok(ResultsOutcome::Redirect {
            page: 1,
            path: results_path(by, query, 1),
        });
    }

    let rows = if page_count == 0 {
        Vec::new()
    } else {
        adapt_rows(results.fetch_page(page - 1).await?)
    };

    Ok(ResultsOutcome::Page(ResultsView {
        criterion: by,
        query: query.to_string(),
        page,
        page_count,
        total_count,
        rows,
        links: pagination_links(by, query, page, page_count),
    }))
}

/// Repository pages map to their owners, deduplicated in first-seen order;
/// user pages pass through. A deduplicated page may hold fewer than 30
/// rows — accepted.
fn adapt_rows(page: ResultsPage) -> Vec<UserRow> {
    match page {
        ResultsPage::Users(users) => users
            .into_iter()
            .map(|u| UserRow {
                login: u.login,
                url: u.html_url,
            })
            .collect(),
        ResultsPage::Repositories(repos) => dedupe_owners(repos),
    }
}

fn dedupe_owners(repos: Vec<Repository>) -> Vec<UserRow> {
    let mut seen = HashSet::new();
    let mut rows = Vec::new();
    for repo in repos {
        if seen.insert(repo.owner.login.clone()) {
            rows.push(UserRow {
                login: repo.owner.login,
                url: repo.owner.html_url,
            });
        }
    }
    rows
}

/// Page numbers from `max(page - 2, 1)` up to but excluding
/// `min(page + 3, page_count)`, the current page unlinked.
fn pagination_links(by: Criterion, query: &str, page: u32, page_count: u32) -> Vec<PageLink> {
    let start = page.saturating_sub(2).max(1);
    let end = (page + 3).min(page_count);
    (start..end)
        .map(|number| PageLink {
            number,
            path: (number != page).then(|| results_path(by, query, number)),
        })
        .collect()
}

/// Canonical path for a results page: `results/{criterion}/{query-slug}/{page}`.
pub fn results_path(by: Criterion, query: &str, page: u32) -> String {
    format!("results/{by}/{}/{page}", slugify(query))
}

/// Lowercase, alphanumerics kept, separator runs collapsed to one hyphen,
/// leading and trailing hyphens trimmed.
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut pending_hyphen = false;
    for c in value.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }
    slug
}
