use std::collections::HashSet;
use std::sync::Arc;

use crate::modules::catalog::domain::{CatalogRecord, CatalogSource, RelatedSummary};
use crate::shared::errors::AppResult;
use crate::shared::utils::LogContext;
use crate::{log_debug, log_error};

/// Catalog boundary used by the pipeline
///
/// Not-found, transport, timeout, status and payload errors are logged with
/// their classification and surface as `Ok(None)`; only fatal errors
/// (misconfiguration, internal faults) reach the caller.
pub struct CatalogService {
    source: Arc<dyn CatalogSource>,
    provider_name: String,
}

impl CatalogService {
    pub fn new(source: Arc<dyn CatalogSource>, provider_name: &str) -> Self {
        Self {
            source,
            provider_name: provider_name.to_string(),
        }
    }

    pub async fn fetch_by_id(&self, id: &str) -> AppResult<Option<CatalogRecord>> {
        match self.source.fetch_anime(id).await {
            Ok(Some(record)) => Ok(Some(record)),
            Ok(None) => {
                log_debug!("{}: no anime with ID {}", self.provider_name, id);
                Ok(None)
            }
            Err(e) if e.is_absorbable() => {
                LogContext::fetch_failure(&self.provider_name, id, &e);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Resolve each unique ID once; IDs that resolve to nothing are dropped
    pub async fn fetch_related(&self, ids: &[String]) -> Vec<RelatedSummary> {
        let mut seen = HashSet::new();
        let mut summaries = Vec::new();

        for id in ids.iter().filter(|id| seen.insert(id.as_str())) {
            match self.fetch_by_id(id).await {
                Ok(Some(record)) => summaries.push(record.to_summary()),
                Ok(None) => {}
                Err(e) => {
                    log_error!(
                        "{}: related anime {} skipped after fatal error: {}",
                        self.provider_name,
                        id,
                        e
                    );
                }
            }
        }

        summaries
    }
}
