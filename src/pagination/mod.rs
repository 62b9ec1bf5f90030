mod combined;
mod remote;

pub use combined::CombinedPage;
pub use remote::RemotePage;

use crate::github::GitHubError;

/// Fixed page size imposed by the GitHub search API.
pub const PAGE_SIZE: u64 = 30;

/// One paginated result sequence addressable by zero-based page index.
///
/// Implemented by `RemotePage` for production and by in-memory fakes in
/// tests; `CombinedPage` implements it over its own sources so combined
/// sequences nest and dispatch code never cares which one it holds.
pub trait PageSource {
    type Item;

    /// Server-reported total matches. Fetched on first access and memoized
    /// for the instance's lifetime; a stale value is tolerated if the
    /// underlying result set shifts mid-session.
    async fn total_count(&self) -> Result<u64, GitHubError>;

    /// Fetch the zero-based page. The remote result set is not snapshotted,
    /// so consecutive calls may observe shifted data.
    async fn get_page(&self, page: u32) -> Result<Vec<Self::Item>, GitHubError>;
}

/// Number of pages needed for `total` results: `ceil(total / 30)`.
pub fn page_count(total: u64) -> u32 {
    total.div_ceil(PAGE_SIZE) as u32
}
