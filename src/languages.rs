use std::collections::BTreeMap;

use serde::Deserialize;
use tracing::info;

use crate::github::{GitHubClient, GitHubError, query};
use crate::store::records::Language;
use crate::store::{Store, StoreError};

const MANIFEST_OWNER: &str = "github";
const MANIFEST_REPO: &str = "linguist";
const MANIFEST_PATH: &str = "lib/linguist/languages.yml";

#[derive(Debug, thiserror::Error)]
pub enum LanguageError {
    #[error("{0}")]
    GitHub(#[from] GitHubError),

    #[error("{0}")]
    Store(#[from] StoreError),

    #[error("Malformed language manifest: {0}")]
    Manifest(String),
}

/// One language's attributes in the linguist manifest. Everything except
/// the extension list is ignored.
#[derive(Deserialize)]
struct ManifestEntry {
    #[serde(default)]
    extensions: Vec<String>,
}

/// Known language names in stable order, populating the local cache from
/// the linguist manifest on first use.
///
/// Subsequent calls are served from the store without a remote fetch.
/// Racing first-calls both fetch and upsert; keyed last-write-wins upserts
/// make that idempotent.
pub async fn known_languages(
    client: &GitHubClient,
    store: &mut Store,
) -> Result<Vec<String>, LanguageError> {
    if !store.has_languages() {
        info!("language cache empty, fetching linguist manifest");
        populate(client, store).await?;
    }
    Ok(store.language_names())
}

/// Clear the cache; the next `known_languages` call re-fetches the manifest.
pub fn reset_known_languages(store: &mut Store) -> Result<(), LanguageError> {
    store.clear_languages();
    store.save()?;
    Ok(())
}

/// Unconditionally re-fetch the manifest and refresh every cached entry
/// without clearing first.
pub async fn update_known_languages(
    client: &GitHubClient,
    store: &mut Store,
) -> Result<Vec<String>, LanguageError> {
    populate(client, store).await?;
    Ok(store.language_names())
}

async fn populate(client: &GitHubClient, store: &mut Store) -> Result<(), LanguageError> {
    let contents = client
        .get_contents(MANIFEST_OWNER, MANIFEST_REPO, MANIFEST_PATH)
        .await?;
    let encoded = contents
        .content
        .ok_or_else(|| LanguageError::Manifest("manifest response carried no content".into()))?;
    let text = query::decode_content(&encoded)?;
    let languages = parse_manifest(&text)?;
    info!(count = languages.len(), "caching known languages");
    for language in languages {
        store.upsert_language(language);
    }
    store.save()?;
    Ok(())
}

/// Parse the manifest YAML: a mapping from language name to attribute set.
fn parse_manifest(text: &str) -> Result<Vec<Language>, LanguageError> {
    let manifest: BTreeMap<String, ManifestEntry> =
        serde_yaml::from_str(text).map_err(|e| LanguageError::Manifest(e.to_string()))?;
    Ok(manifest
        .into_iter()
        .map(|(name, entry)| Language {
            name,
            file_extensions: entry.extensions,
        })
        .collect())
}
