use serde::Deserialize;

/// Envelope shared by all `GET /search/*` endpoints.
#[derive(Deserialize, Debug)]
pub struct SearchResponse<T> {
    pub total_count: u64,
    pub items: Vec<T>,
}

/// A user as returned by `GET /search/users`.
#[derive(Deserialize, Debug, Clone)]
pub struct User {
    pub login: String,
    pub html_url: String,
}

/// Full profile from `GET /users/{login}`.
#[derive(Deserialize, Debug, Clone)]
pub struct UserProfile {
    pub login: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub blog: Option<String>,
    pub company: Option<String>,
    pub email: Option<String>,
    pub hireable: Option<bool>,
    pub html_url: String,
    pub location: Option<String>,
    pub public_repos: u64,
}

/// A repository as returned by `GET /search/repositories`.
#[derive(Deserialize, Debug, Clone)]
pub struct Repository {
    pub name: String,
    pub full_name: String,
    pub owner: RepoOwner,
    pub html_url: String,
    pub description: Option<String>,
    pub created_at: Option<String>,
    pub stargazers_count: u64,
    pub forks_count: u64,
    pub language: Option<String>,
    pub license: Option<LicenseInfo>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct RepoOwner {
    pub login: String,
    pub html_url: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct LicenseInfo {
    pub name: String,
}

/// Response from `GET /repos/{owner}/{repo}/contents/{path}`.
#[derive(Deserialize, Debug)]
pub struct ContentsResponse {
    pub content: Option<String>,
}
