//! Kodik search adapter

use async_trait::async_trait;
use reqwest::Url;

use super::dto::KodikSearchResponse;
use crate::modules::enrichment::domain::{EnrichmentRecord, EnrichmentSource};
use crate::shared::config::AppConfig;
use crate::shared::errors::AppResult;
use crate::shared::http_client::RateLimitClient;
use crate::log_debug;

pub const PROVIDER_NAME: &str = "Kodik";

pub struct KodikClient {
    http_client: RateLimitClient,
    search_url: Url,
    token: String,
}

impl KodikClient {
    pub fn new(http_client: RateLimitClient, search_url: Url, token: &str) -> Self {
        Self {
            http_client,
            search_url,
            token: token.to_string(),
        }
    }

    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        let http_client =
            RateLimitClient::new(PROVIDER_NAME, config.http_timeout, &config.user_agent, 0.0)?;
        Ok(Self::new(
            http_client,
            config.enrichment_api_url.clone(),
            &config.enrichment_token,
        ))
    }

    pub(crate) fn search_url_for(&self, catalog_id: &str) -> Url {
        let mut url = self.search_url.clone();
        url.query_pairs_mut()
            .append_pair("token", &self.token)
            .append_pair("shikimori_id", catalog_id)
            .append_pair("with_episodes", "true")
            .append_pair("with_material_data", "true");
        url
    }

    /// Best effort: the first result wins, no ranking
    pub(crate) fn first_match(response: KodikSearchResponse) -> Option<EnrichmentRecord> {
        if response.total.unwrap_or(0) <= 0 {
            return None;
        }
        response.results.and_then(|results| results.into_iter().next())
    }
}

#[async_trait]
impl EnrichmentSource for KodikClient {
    async fn fetch_by_catalog_id(&self, catalog_id: &str) -> AppResult<Option<EnrichmentRecord>> {
        let url = self.search_url_for(catalog_id);
        let response: KodikSearchResponse = self.http_client.get_json(&url).await?;

        let total = response.total.unwrap_or(0);
        let record = Self::first_match(response);
        log_debug!(
            "{}: {} match(es) for catalog ID {}",
            PROVIDER_NAME,
            total,
            catalog_id
        );
        Ok(record)
    }
}
