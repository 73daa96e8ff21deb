use serde::Deserialize;

use crate::modules::enrichment::domain::EnrichmentRecord;

#[derive(Debug, Deserialize)]
pub struct KodikSearchResponse {
    #[serde(default)]
    pub total: Option<i64>,
    #[serde(default)]
    pub results: Option<Vec<EnrichmentRecord>>,
}
