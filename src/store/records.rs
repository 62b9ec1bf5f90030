use serde::{Deserialize, Serialize};

/// A known programming language mirrored from the linguist manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Language {
    pub name: String,
    #[serde(default)]
    pub file_extensions: Vec<String>,
}

impl AsRef<str> for Language {
    fn as_ref(&self) -> &str {
        &self.name
    }
}

/// A named bundle of skill keywords.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profession {
    pub name: String,
    /// Skill keywords as entered, comma-delimited.
    pub skills: String,
}

impl Profession {
    pub const DELIMITER: char = ',';

    /// Parsed skill keywords: lowercase, trimmed, blanks dropped.
    pub fn skills_list(&self) -> Vec<String> {
        self.skills
            .split(Self::DELIMITER)
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

/// Locally cached mirror of a fetched user, keyed by login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredUser {
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
    /// Languages across the user's repositories, most bytes first.
    #[serde(default)]
    pub languages: Vec<String>,
}

/// Locally cached mirror of a fetched repository, keyed by `owner/name`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredRepository {
    pub owner: String,
    pub name: String,
    pub created_at: Option<String>,
    pub description: Option<String>,
    pub forks_count: u64,
    /// Languages by byte share, largest first.
    #[serde(default)]
    pub languages: Vec<String>,
    pub license: Option<String>,
}

impl StoredRepository {
    pub fn key(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}
