use std::sync::Arc;

use crate::modules::enrichment::domain::{EnrichmentRecord, EnrichmentSource};
use crate::shared::utils::LogContext;
use crate::{log_debug, log_error};

/// Enrichment boundary: every failure reads as "no enrichment"
pub struct EnrichmentService {
    source: Arc<dyn EnrichmentSource>,
    provider_name: String,
}

impl EnrichmentService {
    pub fn new(source: Arc<dyn EnrichmentSource>, provider_name: &str) -> Self {
        Self {
            source,
            provider_name: provider_name.to_string(),
        }
    }

    pub async fn fetch_by_catalog_id(&self, catalog_id: &str) -> Option<EnrichmentRecord> {
        match self.source.fetch_by_catalog_id(catalog_id).await {
            Ok(Some(record)) => Some(record),
            Ok(None) => {
                log_debug!("{}: nothing found for {}", self.provider_name, catalog_id);
                None
            }
            Err(e) if e.is_absorbable() => {
                LogContext::fetch_failure(&self.provider_name, catalog_id, &e);
                None
            }
            Err(e) => {
                log_error!(
                    "{}: lookup for {} failed: {}",
                    self.provider_name,
                    catalog_id,
                    e
                );
                None
            }
        }
    }
}
