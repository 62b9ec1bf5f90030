use tracing::debug;

use crate::github::types::Repository;
use crate::github::{GitHubClient, query};
use crate::pagination::{CombinedPage, RemotePage};
use crate::store::Store;

/// Profession search: two orthogonal repository sub-queries merged into one
/// combined sequence.
///
/// Sub-query A searches readmes and descriptions sorted by stars descending;
/// sub-query B searches topics. Source order matters: virtual page 0 of the
/// combined sequence is A's page 0.
pub(super) fn search(
    client: &GitHubClient,
    store: &Store,
    query_str: &str,
) -> CombinedPage<RemotePage<Repository>> {
    let keywords = resolve_keywords(store, query_str);
    let readme = client.search_repositories(
        &query::readme_and_description(&keywords),
        Some("stars"),
        Some("desc"),
    );
    let topics = client.search_repositories(&query::topics(&keywords), None, None);
    CombinedPage::new(vec![readme, topics])
}

/// Keywords backing a profession query: the stored skill list when a
/// profession name matches (case-insensitive substring, first match wins),
/// otherwise the raw trimmed query as a single keyword. The fallback keeps
/// an unmatched profession search non-failing.
pub fn resolve_keywords(store: &Store, query: &str) -> Vec<String> {
    if let Some(profession) = store.find_profession(query) {
        let skills = profession.skills_list();
        if !skills.is_empty() {
            debug!(profession = %profession.name, "matched stored profession");
            return skills;
        }
    }
    vec![query.trim().to_string()]
}
