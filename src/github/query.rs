use base64::{Engine as _, engine::general_purpose::STANDARD};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use super::GitHubError;

/// Characters to percent-encode in URL path segments.
/// Preserves `/` for path structure but encodes query/fragment delimiters and special chars.
const PATH_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'?')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'@')
    .add(b'[')
    .add(b']')
    .add(b';')
    .add(b'=');

/// Characters to percent-encode in a `q=` search parameter.
/// `+` and `:` stay literal — the search syntax uses them as keyword joiner
/// and qualifier separator (`in:login`, `topic:rust`).
const QUERY_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'?')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'=');

pub(super) fn encode_path(s: &str) -> String {
    utf8_percent_encode(s, PATH_ENCODE_SET).to_string()
}

pub(crate) fn encode_query(s: &str) -> String {
    utf8_percent_encode(s, QUERY_ENCODE_SET).to_string()
}

/// Search query matching usernames: `{name} in:login`.
pub fn by_username(name: &str) -> String {
    format!("{} in:login", name.trim())
}

/// Search query matching user locations: `{location} in:location`.
pub fn by_location(location: &str) -> String {
    format!("{} in:location", location.trim())
}

/// Search query matching users by language: `language:{name}`.
///
/// Accepts a raw name or a cached `Language` record via `AsRef<str>`.
pub fn by_language(language: impl AsRef<str>) -> Result<String, GitHubError> {
    let name = language.as_ref().trim();
    if name.is_empty() {
        return Err(GitHubError::InvalidQuery("language name is empty".into()));
    }
    Ok(format!("language:{name}"))
}

/// Repository search over readmes and descriptions, keywords joined with `+`.
/// Callers pair this with `sort=stars&order=desc`.
pub fn readme_and_description(keywords: &[String]) -> String {
    format!("{}+in:readme+in:description", keywords.join("+"))
}

/// Repository search over topics: `topic:{kw}` entries, space-joined.
pub fn topics(keywords: &[String]) -> String {
    keywords
        .iter()
        .map(|kw| format!("topic:{kw}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Repository search scoped to one owner: `user:{login}`.
pub fn by_owner(login: &str) -> String {
    format!("user:{}", login.trim())
}

/// Decode base64-encoded content from the GitHub Contents API.
pub fn decode_content(encoded: &str) -> Result<String, GitHubError> {
    let clean: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = STANDARD
        .decode(&clean)
        .map_err(|e| GitHubError::Decode(e.to_string()))?;
    String::from_utf8(bytes)
        .map_err(|_| GitHubError::Decode("file appears to be binary (not valid UTF-8)".into()))
}
