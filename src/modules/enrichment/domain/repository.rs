use async_trait::async_trait;

use super::entities::EnrichmentRecord;
use crate::shared::errors::AppResult;

/// Secondary source keyed by the catalog ID
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnrichmentSource: Send + Sync {
    /// First match for `catalog_id`, `Ok(None)` when the source has none
    async fn fetch_by_catalog_id(&self, catalog_id: &str) -> AppResult<Option<EnrichmentRecord>>;
}
