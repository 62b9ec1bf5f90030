pub mod records;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use records::{Language, Profession, StoredRepository, StoredUser};

const STORE_FILE: &str = "store.json";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt store file {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Everything persisted between invocations, as one JSON document.
///
/// Collections are keyed by their natural key (lowercased language name,
/// login, `owner/name`), so concurrent invocations racing to upsert the
/// same record converge last-write-wins.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreData {
    #[serde(default)]
    languages: BTreeMap<String, Language>,
    #[serde(default)]
    professions: Vec<Profession>,
    #[serde(default)]
    users: BTreeMap<String, StoredUser>,
    #[serde(default)]
    repositories: BTreeMap<String, StoredRepository>,
}

pub struct Store {
    dir: PathBuf,
    data: StoreData,
}

impl Store {
    /// Open the store under `dir`, creating an empty one if no file exists.
    pub fn open(dir: &Path) -> Result<Self, StoreError> {
        let path = dir.join(STORE_FILE);
        let data = if path.exists() {
            let content = fs::read_to_string(&path)?;
            serde_json::from_str(&content).map_err(|e| StoreError::Parse {
                path: path.clone(),
                message: e.to_string(),
            })?
        } else {
            StoreData::default()
        };
        debug!(path = %path.display(), "store opened");
        Ok(Self {
            dir: dir.to_path_buf(),
            data,
        })
    }

    pub fn save(&self) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(STORE_FILE);
        let content = serde_json::to_string_pretty(&self.data).map_err(|e| StoreError::Parse {
            path: path.clone(),
            message: e.to_string(),
        })?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// Default data directory: `PROSPECT_DATA_DIR`, else the platform data
    /// dir under `prospect/`, else `.prospect` in the working directory.
    pub fn default_dir() -> PathBuf {
        std::env::var_os("PROSPECT_DATA_DIR")
            .map(PathBuf::from)
            .or_else(|| dirs::data_dir().map(|d| d.join("prospect")))
            .unwrap_or_else(|| PathBuf::from(".prospect"))
    }

    // Languages. The collection is read-derived from the linguist manifest:
    // the mutators are crate-private and only the `languages` module calls
    // them, so there is no public write surface.

    pub fn has_languages(&self) -> bool {
        !self.data.languages.is_empty()
    }

    /// Language names in stable (sorted) order.
    pub fn language_names(&self) -> Vec<String> {
        self.data
            .languages
            .values()
            .map(|l| l.name.clone())
            .collect()
    }

    pub fn find_language(&self, name: &str) -> Option<&Language> {
        self.data.languages.get(&name.to_lowercase())
    }

    pub(crate) fn upsert_language(&mut self, language: Language) {
        self.data
            .languages
            .insert(language.name.to_lowercase(), language);
    }

    pub(crate) fn clear_languages(&mut self) {
        self.data.languages.clear();
    }

    // Professions.

    /// Add a profession, replacing any existing one with the same name
    /// (case-insensitive).
    pub fn add_profession(&mut self, name: &str, skills: &str) {
        self.data
            .professions
            .retain(|p| !p.name.eq_ignore_ascii_case(name));
        self.data.professions.push(Profession {
            name: name.to_string(),
            skills: skills.to_string(),
        });
    }

    pub fn professions(&self) -> &[Profession] {
        &self.data.professions
    }

    /// First profession whose name contains `query`, case-insensitively.
    pub fn find_profession(&self, query: &str) -> Option<&Profession> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }
        self.data
            .professions
            .iter()
            .find(|p| p.name.to_lowercase().contains(&needle))
    }

    // Entity mirrors, upserted opportunistically when full records are fetched.

    pub fn upsert_user(&mut self, user: StoredUser) {
        self.data.users.insert(user.login.clone(), user);
    }

    pub fn upsert_repository(&mut self, repo: StoredRepository) {
        self.data.repositories.insert(repo.key(), repo);
    }

    #[cfg(test)]
    pub(crate) fn user(&self, login: &str) -> Option<&StoredUser> {
        self.data.users.get(login)
    }

    #[cfg(test)]
    pub(crate) fn repository(&self, owner: &str, name: &str) -> Option<&StoredRepository> {
        self.data.repositories.get(&format!("{owner}/{name}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored_user(login: &str, repos: u64) -> StoredUser {
        StoredUser {
            login: login.into(),
            name: None,
            bio: None,
            blog: None,
            company: None,
            email: None,
            hireable: None,
            html_url: format!("https://github.com/{login}"),
            location: None,
            public_repos: repos,
            languages: vec![],
        }
    }

    #[test]
    fn open_missing_file_yields_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path()).unwrap();
        assert!(!store.has_languages());
        assert!(store.professions().is_empty());
    }

    #[test]
    fn save_and_reopen_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = Store::open(dir.path()).unwrap();
        store.add_profession("Backend", "python, django");
        store.upsert_language(Language {
            name: "Rust".into(),
            file_extensions: vec![".rs".into()],
        });
        store.upsert_user(stored_user("octocat", 8));
        store.save().unwrap();

        let reopened = Store::open(dir.path()).unwrap();
        assert_eq!(reopened.language_names(), vec!["Rust"]);
        assert_eq!(reopened.professions()[0].name, "Backend");
        assert_eq!(reopened.user("octocat").unwrap().public_repos, 8);
    }

    #[test]
    fn open_corrupt_file_fails_with_parse() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(STORE_FILE), "{not json").unwrap();
        assert!(matches!(
            Store::open(dir.path()),
            Err(StoreError::Parse { .. })
        ));
    }

    #[test]
    fn upsert_language_is_last_write_wins() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = Store::open(dir.path()).unwrap();
        store.upsert_language(Language {
            name: "Rust".into(),
            file_extensions: vec![],
        });
        store.upsert_language(Language {
            name: "rust".into(),
            file_extensions: vec![".rs".into()],
        });
        assert_eq!(store.language_names().len(), 1);
        assert_eq!(
            store.find_language("RUST").unwrap().file_extensions,
            vec![".rs"]
        );
    }

    #[test]
    fn language_names_are_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = Store::open(dir.path()).unwrap();
        for name in ["Ruby", "c", "Python"] {
            store.upsert_language(Language {
                name: name.into(),
                file_extensions: vec![],
            });
        }
        assert_eq!(store.language_names(), vec!["c", "Python", "Ruby"]);
    }

    #[test]
    fn find_profession_matches_substring_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = Store::open(dir.path()).unwrap();
        store.add_profession("Backend Developer", "python");
        store.add_profession("Frontend Developer", "react");

        assert_eq!(
            store.find_profession("backend").unwrap().name,
            "Backend Developer"
        );
        assert_eq!(
            store.find_profession("FRONT").unwrap().name,
            "Frontend Developer"
        );
        assert!(store.find_profession("data").is_none());
        assert!(store.find_profession("  ").is_none());
    }

    #[test]
    fn add_profession_replaces_same_name() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = Store::open(dir.path()).unwrap();
        store.add_profession("Backend", "python");
        store.add_profession("backend", "rust, tokio");
        assert_eq!(store.professions().len(), 1);
        assert_eq!(store.professions()[0].skills, "rust, tokio");
    }

    #[test]
    fn upsert_repository_keyed_by_owner_and_name() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = Store::open(dir.path()).unwrap();
        let repo = StoredRepository {
            owner: "octocat".into(),
            name: "hello".into(),
            created_at: None,
            description: Some("first".into()),
            forks_count: 1,
            languages: vec![],
            license: None,
        };
        store.upsert_repository(repo.clone());
        store.upsert_repository(StoredRepository {
            description: Some("second".into()),
            ..repo
        });
        assert_eq!(
            store
                .repository("octocat", "hello")
                .unwrap()
                .description
                .as_deref(),
            Some("second")
        );
    }
}
