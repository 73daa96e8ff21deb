//! Shikimori GraphQL catalog adapter

use async_trait::async_trait;
use reqwest::Url;

use super::dto::{AnimesData, AnimesVariables, GraphQlRequest, GraphQlResponse};
use super::queries::ANIMES_BY_IDS_QUERY;
use crate::modules::catalog::domain::{CatalogRecord, CatalogSource};
use crate::shared::config::AppConfig;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::http_client::RateLimitClient;
use crate::log_info;

pub const PROVIDER_NAME: &str = "Shikimori";

pub struct ShikimoriClient {
    http_client: RateLimitClient,
    endpoint: Url,
}

impl ShikimoriClient {
    pub fn new(http_client: RateLimitClient, endpoint: Url) -> Self {
        Self {
            http_client,
            endpoint,
        }
    }

    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        let http_client = RateLimitClient::new(
            PROVIDER_NAME,
            config.http_timeout,
            &config.user_agent,
            config.catalog_requests_per_second,
        )?;
        Ok(Self::new(http_client, config.catalog_api_url.clone()))
    }

    /// Pick the single record out of a GraphQL reply
    pub(crate) fn extract_first(
        response: GraphQlResponse<AnimesData>,
        id: &str,
    ) -> AppResult<Option<CatalogRecord>> {
        if let Some(errors) = response.errors.filter(|e| !e.is_null()) {
            return Err(AppError::ApiError(format!(
                "{} GraphQL errors for ID {}: {}",
                PROVIDER_NAME, id, errors
            )));
        }

        Ok(response
            .data
            .and_then(|data| data.animes)
            .and_then(|animes| animes.into_iter().next()))
    }
}

#[async_trait]
impl CatalogSource for ShikimoriClient {
    async fn fetch_anime(&self, id: &str) -> AppResult<Option<CatalogRecord>> {
        log_info!("{}: requesting anime with ID {}", PROVIDER_NAME, id);

        let request = GraphQlRequest {
            query: ANIMES_BY_IDS_QUERY,
            variables: AnimesVariables { ids: id.to_string() },
        };

        let response: GraphQlResponse<AnimesData> =
            self.http_client.post_json(&self.endpoint, &request).await?;

        let record = Self::extract_first(response, id)?;
        if record.is_some() {
            log_info!("{}: received anime with ID {}", PROVIDER_NAME, id);
        }
        Ok(record)
    }
}
