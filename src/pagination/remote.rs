use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use tokio::sync::OnceCell;
use tracing::debug;

use super::{PAGE_SIZE, PageSource};
use crate::github::query::encode_query;
use crate::github::types::SearchResponse;
use crate::github::{GitHubClient, GitHubError};

/// One remote search query's paginated result set.
///
/// Construction is free of I/O; the first call to `total_count` or
/// `get_page` hits the API. The server-reported total is memoized per
/// instance, so one results request sees a stable page count even if the
/// live total drifts.
pub struct RemotePage<T> {
    client: GitHubClient,
    path: &'static str,
    query: String,
    sort: Option<String>,
    order: Option<String>,
    total: OnceCell<u64>,
    _item: PhantomData<fn() -> T>,
}

impl<T> RemotePage<T> {
    pub(crate) fn new(
        client: GitHubClient,
        path: &'static str,
        query: &str,
        sort: Option<&str>,
        order: Option<&str>,
    ) -> Self {
        Self {
            client,
            path,
            query: query.to_string(),
            sort: sort.map(str::to_string),
            order: order.map(str::to_string),
            total: OnceCell::new(),
            _item: PhantomData,
        }
    }

    /// The API is one-based; `page` here is zero-based.
    fn page_path(&self, page: u32, per_page: u64) -> String {
        let mut path = format!(
            "{}?q={}&page={}&per_page={per_page}",
            self.path,
            encode_query(&self.query),
            page + 1
        );
        if let Some(ref sort) = self.sort {
            path.push_str(&format!("&sort={sort}"));
        }
        if let Some(ref order) = self.order {
            path.push_str(&format!("&order={order}"));
        }
        path
    }
}

impl<T: DeserializeOwned> PageSource for RemotePage<T> {
    type Item = T;

    async fn total_count(&self) -> Result<u64, GitHubError> {
        self.total
            .get_or_try_init(|| async {
                // A minimal request: the envelope carries the total, items are ignored.
                let response: SearchResponse<serde_json::Value> =
                    self.client.get_json(&self.page_path(0, 1)).await?;
                debug!(query = %self.query, total = response.total_count, "fetched total count");
                Ok(response.total_count)
            })
            .await
            .copied()
    }

    async fn get_page(&self, page: u32) -> Result<Vec<T>, GitHubError> {
        let response: SearchResponse<T> = self
            .client
            .get_json(&self.page_path(page, PAGE_SIZE))
            .await?;
        // A page fetch carries the total too; seed the memo if still unset.
        let _ = self.total.set(response.total_count);
        Ok(response.items)
    }
}
