use futures::future::join_all;
use tokio::sync::OnceCell;

use super::PageSource;
use crate::github::GitHubError;

/// Merges N independent page sources into one virtually paginated sequence.
///
/// Virtual page `n` is addressed by divmod: with `k` sources, page `n` is
/// served by `sources[n % k].get_page(n / k)`. Virtual page indices are
/// dense integers from 0; once a smaller source is exhausted its slots
/// return empty pages.
///
/// The combined total is the sum of the source totals at first access,
/// memoized for the instance's lifetime.
pub struct CombinedPage<S> {
    sources: Vec<S>,
    total: OnceCell<u64>,
}

impl<S: PageSource> CombinedPage<S> {
    /// `sources` must not be empty.
    pub fn new(sources: Vec<S>) -> Self {
        debug_assert!(!sources.is_empty(), "CombinedPage requires at least one source");
        Self {
            sources,
            total: OnceCell::new(),
        }
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }
}

impl<S: PageSource> PageSource for CombinedPage<S> {
    type Item = S::Item;

    async fn total_count(&self) -> Result<u64, GitHubError> {
        self.total
            .get_or_try_init(|| async {
                let totals = join_all(self.sources.iter().map(|s| s.total_count())).await;
                let mut sum = 0u64;
                for total in totals {
                    sum += total?;
                }
                Ok(sum)
            })
            .await
            .copied()
    }

    async fn get_page(&self, page: u32) -> Result<Vec<S::Item>, GitHubError> {
        let count = self.sources.len() as u32;
        let (source_page, index) = (page / count, page % count);
        self.sources[index as usize].get_page(source_page).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// In-memory source: each page is a vec of labels, plus a mutable total
    /// so memoization can be observed against a shifting upstream count.
    struct FakeSource {
        total: Mutex<u64>,
        pages: Vec<Vec<&'static str>>,
    }

    impl FakeSource {
        fn new(total: u64, pages: Vec<Vec<&'static str>>) -> Self {
            Self {
                total: Mutex::new(total),
                pages,
            }
        }

        fn set_total(&self, total: u64) {
            *self.total.lock().unwrap() = total;
        }
    }

    impl PageSource for FakeSource {
        type Item = &'static str;

        async fn total_count(&self) -> Result<u64, GitHubError> {
            Ok(*self.total.lock().unwrap())
        }

        async fn get_page(&self, page: u32) -> Result<Vec<&'static str>, GitHubError> {
            Ok(self.pages.get(page as usize).cloned().unwrap_or_default())
        }
    }

    #[tokio::test]
    async fn total_is_sum_of_sources() {
        let combined = CombinedPage::new(vec![
            FakeSource::new(40, vec![]),
            FakeSource::new(25, vec![]),
        ]);
        assert_eq!(combined.total_count().await.unwrap(), 65);
    }

    #[tokio::test]
    async fn total_is_memoized_against_shifting_sources() {
        let a = FakeSource::new(40, vec![]);
        let b = FakeSource::new(25, vec![]);
        let combined = CombinedPage::new(vec![a, b]);
        assert_eq!(combined.total_count().await.unwrap(), 65);

        combined.sources[0].set_total(100);
        assert_eq!(combined.total_count().await.unwrap(), 65);
    }

    #[tokio::test]
    async fn divmod_addressing_alternates_sources() {
        let combined = CombinedPage::new(vec![
            FakeSource::new(60, vec![vec!["a0"], vec!["a1"]]),
            FakeSource::new(60, vec![vec!["b0"], vec!["b1"]]),
        ]);

        assert_eq!(combined.get_page(0).await.unwrap(), vec!["a0"]);
        assert_eq!(combined.get_page(1).await.unwrap(), vec!["b0"]);
        assert_eq!(combined.get_page(2).await.unwrap(), vec!["a1"]);
        assert_eq!(combined.get_page(3).await.unwrap(), vec!["b1"]);
    }

    #[tokio::test]
    async fn divmod_addressing_matches_formula() {
        let sources: Vec<FakeSource> = (0..3)
            .map(|i| {
                FakeSource::new(
                    90,
                    (0..3).map(|p| vec![LABELS[i][p]]).collect(),
                )
            })
            .collect();
        let combined = CombinedPage::new(sources);

        for page in 0..9u32 {
            let (source_page, index) = (page / 3, page % 3);
            let got = combined.get_page(page).await.unwrap();
            assert_eq!(got, vec![LABELS[index as usize][source_page as usize]]);
        }
    }

    const LABELS: [[&str; 3]; 3] = [
        ["a0", "a1", "a2"],
        ["b0", "b1", "b2"],
        ["c0", "c1", "c2"],
    ];

    #[tokio::test]
    async fn exhausted_source_returns_empty_page() {
        let combined = CombinedPage::new(vec![
            FakeSource::new(60, vec![vec!["a0"], vec!["a1"]]),
            FakeSource::new(1, vec![vec!["b0"]]),
        ]);

        assert_eq!(combined.get_page(3).await.unwrap(), Vec::<&str>::new());
        assert_eq!(combined.get_page(2).await.unwrap(), vec!["a1"]);
    }

    #[tokio::test]
    async fn single_source_is_identity() {
        let combined = CombinedPage::new(vec![FakeSource::new(
            31,
            vec![vec!["x0"], vec!["x1"]],
        )]);
        assert_eq!(combined.get_page(0).await.unwrap(), vec!["x0"]);
        assert_eq!(combined.get_page(1).await.unwrap(), vec!["x1"]);
        assert_eq!(combined.total_count().await.unwrap(), 31);
    }
}
