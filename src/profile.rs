//! The user-details flow: full profile, complete repository walk, language
//! tally, and opportunistic mirror upserts into the local store.

use std::collections::HashMap;

use tracing::debug;

use crate::github::types::{Repository, UserProfile};
use crate::github::{GitHubClient, GitHubError, query};
use crate::pagination::{self, PageSource};
use crate::store::records::{StoredRepository, StoredUser};
use crate::store::{Store, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum DetailsError {
    #[error("{0}")]
    GitHub(#[from] GitHubError),

    #[error("{0}")]
    Store(#[from] StoreError),
}

pub struct UserDetails {
    pub profile: UserProfile,
    pub repositories: Vec<Repository>,
    /// `(language, bytes)` aggregated across all repositories, most bytes first.
    pub languages: Vec<(String, u64)>,
}

/// Fetch a user's profile, walk every page of their repositories, aggregate
/// per-repo language byte counts, and upsert the user and repository
/// mirrors. Unknown logins propagate `NotFound`.
pub async fn fetch_user_details(
    client: &GitHubClient,
    store: &mut Store,
    login: &str,
) -> Result<UserDetails, DetailsError> {
    let profile = client.get_user(login).await?;

    let repo_pages = client.search_repositories(&query::by_owner(&profile.login), None, None);
    let total = repo_pages.total_count().await?;
    let mut repositories = Vec::new();
    for page in 0..pagination::page_count(total) {
        repositories.extend(repo_pages.get_page(page).await?);
    }
    debug!(login = %profile.login, repos = repositories.len(), "collected repositories");

    let mut tally: HashMap<String, u64> = HashMap::new();
    for repo in &repositories {
        let counts = client
            .get_repo_languages(&repo.owner.login, &repo.name)
            .await?;
        for (language, bytes) in &counts {
            *tally.entry(language.clone()).or_default() += bytes;
        }
        store.upsert_repository(StoredRepository {
            owner: repo.owner.login.clone(),
            name: repo.name.clone(),
            created_at: repo.created_at.clone(),
            description: repo.description.clone(),
            forks_count: repo.forks_count,
            languages: sorted_by_bytes(counts.into_iter().collect())
                .into_iter()
                .map(|(name, _)| name)
                .collect(),
            license: repo.license.as_ref().map(|l| l.name.clone()),
        });
    }

    let languages = sorted_by_bytes(tally.into_iter().collect());
    store.upsert_user(StoredUser {
        login: profile.login.clone(),
        name: profile.name.clone(),
        bio: profile.bio.clone(),
        blog: profile.blog.clone(),
        company: profile.company.clone(),
        email: profile.email.clone(),
        hireable: profile.hireable,
        html_url: profile.html_url.clone(),
        location: profile.location.clone(),
        public_repos: profile.public_repos,
        languages: languages.iter().map(|(name, _)| name.clone()).collect(),
    });
    store.save()?;

    Ok(UserDetails {
        profile,
        repositories,
        languages,
    })
}

/// Most bytes first; name breaks ties so the order is deterministic.
fn sorted_by_bytes(mut counts: Vec<(String, u64)>) -> Vec<(String, u64)> {
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorted_by_bytes_orders_descending_with_name_tiebreak() {
        let sorted = sorted_by_bytes(vec![
            ("Shell".into(), 300),
            ("Rust".into(), 12000),
            ("C".into(), 300),
        ]);
        let names: Vec<_> = sorted.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["Rust", "C", "Shell"]);
    }
}
