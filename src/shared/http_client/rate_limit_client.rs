//! Paced HTTP client shared by the catalog, enrichment and destination adapters
//!
//! Every call has a hard timeout and is attempted exactly once. Responses are
//! classified into `AppError` variants so callers can log the cause before
//! folding the failure into absence.

use std::num::NonZeroU32;
use std::time::Duration;

use governor::{DefaultDirectRateLimiter, Quota, RateLimiter as GovernorRateLimiter};
use reqwest::{Client, Method, Response, Url};
use serde::{de::DeserializeOwned, Serialize};

use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::{LogContext, TimedOperation};

/// Longest response excerpt carried inside an error
const ERROR_BODY_LIMIT: usize = 500;

pub struct RateLimitClient {
    client: Client,
    rate_limiter: Option<DefaultDirectRateLimiter>,
    provider_name: String,
}

impl RateLimitClient {
    /// Create a client; `requests_per_second <= 0` disables pacing
    pub fn new(
        provider_name: &str,
        timeout: Duration,
        user_agent: &str,
        requests_per_second: f64,
    ) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            rate_limiter: Self::create_rate_limiter(provider_name, requests_per_second)?,
            provider_name: provider_name.to_string(),
        })
    }

    /// One request per period, no burst: the pipeline is strictly sequential anyway
    fn create_rate_limiter(
        provider_name: &str,
        requests_per_second: f64,
    ) -> AppResult<Option<DefaultDirectRateLimiter>> {
        if !(requests_per_second > 0.0) || !requests_per_second.is_finite() {
            return Ok(None);
        }

        let period = Duration::try_from_secs_f64(1.0 / requests_per_second).map_err(|e| {
            AppError::ConfigError(format!(
                "{}: cannot pace at {} requests per second: {}",
                provider_name, requests_per_second, e
            ))
        })?;
        let quota = Quota::with_period(period)
            .zip(NonZeroU32::new(1))
            .map(|(quota, burst)| quota.allow_burst(burst));
        Ok(quota.map(GovernorRateLimiter::direct))
    }

    /// GET a JSON document
    pub async fn get_json<T>(&self, url: &Url) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        let response = self.send(Method::GET, url, None::<&()>).await?;
        self.parse_response(response).await
    }

    /// POST a JSON body and decode a JSON reply
    pub async fn post_json<B, T>(&self, url: &Url, body: &B) -> AppResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(Method::POST, url, Some(body)).await?;
        self.parse_response(response).await
    }

    /// POST a JSON body; only the status matters
    pub async fn post_for_status<B>(&self, url: &Url, body: &B) -> AppResult<u16>
    where
        B: Serialize + ?Sized,
    {
        let response = self.send(Method::POST, url, Some(body)).await?;
        Ok(response.status().as_u16())
    }

    async fn send<B>(&self, method: Method, url: &Url, body: Option<&B>) -> AppResult<Response>
    where
        B: Serialize + ?Sized,
    {
        if let Some(limiter) = &self.rate_limiter {
            limiter.until_ready().await;
        }

        let timer = TimedOperation::new(&format!("{} {} {}", self.provider_name, method, url.path()));

        let mut request = self
            .client
            .request(method.clone(), url.clone())
            .header("Accept", "application/json");
        if let Some(json_body) = body {
            request = request.json(json_body);
        }

        let response = request.send().await?;
        let status = response.status();
        LogContext::api_call(
            &self.provider_name,
            &format!("{} {}", method, url.path()),
            status.as_str(),
            Some(timer.elapsed_ms()),
        );

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(Self::status_error(status.as_u16(), body))
    }

    fn status_error(status: u16, body: String) -> AppError {
        let body = truncate(body);
        match status {
            429 => AppError::RateLimitError(body),
            404 => AppError::NotFound(body),
            _ => AppError::HttpStatus { status, body },
        }
    }

    async fn parse_response<T>(&self, response: Response) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        let response_text = response.text().await?;

        serde_json::from_str(&response_text).map_err(|e| {
            AppError::SerializationError(format!(
                "Failed to parse {} response: {}. Response: {}",
                self.provider_name,
                e,
                truncate(response_text)
            ))
        })
    }

    /// Check if a request can be made now (for testing/debugging)
    pub fn can_make_request_now(&self) -> bool {
        self.rate_limiter
            .as_ref()
            .map_or(true, |limiter| limiter.check().is_ok())
    }

    pub fn is_paced(&self) -> bool {
        self.rate_limiter.is_some()
    }

    pub fn provider_name(&self) -> &str {
        &self.provider_name
    }
}

fn truncate(mut text: String) -> String {
    if text.len() > ERROR_BODY_LIMIT {
        let mut cut = ERROR_BODY_LIMIT;
        while !text.is_char_boundary(cut) {
            cut -= 1;
        }
        text.truncate(cut);
        text.push_str("...");
    }
    text
}
