use async_trait::async_trait;
use reqwest::Url;

use crate::modules::publishing::domain::{OutboundRecord, Publisher};
use crate::shared::config::AppConfig;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::http_client::RateLimitClient;
use crate::{log_error, log_info};

pub const DESTINATION_NAME: &str = "Destination";

/// POSTs each record to the destination's create endpoint, once
pub struct HttpPublisher {
    http_client: RateLimitClient,
    endpoint: Url,
}

impl HttpPublisher {
    pub fn new(http_client: RateLimitClient, endpoint: Url) -> Self {
        Self {
            http_client,
            endpoint,
        }
    }

    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        let http_client =
            RateLimitClient::new(DESTINATION_NAME, config.http_timeout, &config.user_agent, 0.0)?;
        Ok(Self::new(http_client, config.destination_api_url.clone()))
    }
}

#[async_trait]
impl Publisher for HttpPublisher {
    async fn publish(&self, record: &OutboundRecord) -> bool {
        match self.http_client.post_for_status(&self.endpoint, record).await {
            Ok(status) => {
                log_info!("Anime {} stored (HTTP {})", record.id, status);
                true
            }
            Err(AppError::HttpStatus { status, body }) => {
                log_error!("Failed to store anime {}: HTTP {}", record.id, status);
                if !body.is_empty() {
                    log_error!("Destination response: {}", body);
                }
                false
            }
            Err(e) => {
                log_error!("Failed to store anime {} [{}]: {}", record.id, e.kind(), e);
                false
            }
        }
    }
}
