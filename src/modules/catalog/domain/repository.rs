use async_trait::async_trait;

use super::entities::CatalogRecord;
use crate::shared::errors::AppResult;

/// Primary metadata source, queried one external ID at a time
///
/// `Ok(None)` means the catalog answered but has no such record. Errors are
/// classified (`AppError::kind`) so the service layer can decide whether to
/// fold them into absence.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_anime(&self, id: &str) -> AppResult<Option<CatalogRecord>>;
}
