use crate::domain::model::{Bean, Color, Combination, Health, Page};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Page size used by [`CatalogApi::fetch_all_beans`] unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn list_beans(&self, limit: Option<u32>, offset: Option<u32>) -> Result<Page<Bean>>;
    async fn list_colors(&self, color_id: Option<&str>) -> Result<Page<Color>>;
    async fn list_combinations(&self) -> Result<Page<Combination>>;
    async fn health(&self) -> Result<Health>;

    fn page_size(&self) -> u32 {
        DEFAULT_PAGE_SIZE
    }

    /// Fetches the whole bean collection.
    ///
    /// The first page reports the total; the remaining pages are requested
    /// concurrently and stitched together by offset, so the result follows
    /// server ordering no matter which response lands first. One failed page
    /// fails the whole call.
    async fn fetch_all_beans(&self) -> Result<Vec<Bean>> {
        let page_size = self.page_size().max(1);
        let first = self.list_beans(Some(page_size), Some(0)).await?;

        let offsets = remaining_offsets(first.total, page_size);
        tracing::debug!(
            "Bean collection reports {} records, fetching {} more page(s) of {}",
            first.total,
            offsets.len(),
            page_size
        );

        let pages = futures::future::try_join_all(
            offsets
                .into_iter()
                .map(|offset| self.list_beans(Some(page_size), Some(offset))),
        )
        .await?;

        let mut beans = first.data;
        for page in pages {
            beans.extend(page.data);
        }
        Ok(beans)
    }
}

/// Offsets of every page after the first, ascending.
pub fn remaining_offsets(total: u64, page_size: u32) -> Vec<u32> {
    let page_size = u64::from(page_size.max(1));
    let pages = total.div_ceil(page_size);
    (1..pages)
        .filter_map(|i| u32::try_from(i * page_size).ok())
        .collect()
}
