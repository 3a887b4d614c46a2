//! Blocking HTTP client for the price guide endpoint.

use std::time::{Duration, Instant};

use log::{debug, warn};

use super::oauth;
use super::price_guide::{ApiEnvelope, PriceGuide};
use crate::config::{mask, Credentials, Settings};
use crate::error::{ApiError, ApiResult};
use crate::models::{Condition, LineItem};

/// BrickLink store API v1
pub const DEFAULT_BASE_URL: &str = "https://api.bricklink.com/api/store/v1";

/// Minimum spacing between two consecutive API calls
pub const DEFAULT_REQUEST_DELAY: Duration = Duration::from_millis(100);

const USER_AGENT: &str = concat!("bricklink_pricer/", env!("CARGO_PKG_VERSION"));

/// Characters of a response body echoed in debug logs
const DEBUG_BODY_LIMIT: usize = 500;

/// Signed, rate-limited client for BrickLink price guide lookups.
pub struct BricklinkClient {
    client: reqwest::blocking::Client,
    credentials: Credentials,
    base_url: String,
    request_delay: Duration,
    last_request: Option<Instant>,
}

impl BricklinkClient {
    pub fn new(settings: Settings) -> Self {
        log::info!("Creating BrickLink API client");
        debug!("API base URL: {}", settings.base_url);
        debug!("Consumer key: {}", mask(&settings.credentials.consumer_key));
        debug!("Token key: {}", mask(&settings.credentials.token_key));

        Self {
            client: reqwest::blocking::Client::new(),
            credentials: settings.credentials,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            request_delay: settings.request_delay,
            last_request: None,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches the stock price guide (USD) for an item in the given condition.
    ///
    /// A guide without data is still `Ok`; see [`PriceGuide::has_data`].
    pub fn fetch_price_guide(
        &mut self,
        item: &LineItem,
        condition: Condition,
    ) -> ApiResult<PriceGuide> {
        let url = format!(
            "{}/items/{}/{}/price",
            self.base_url,
            item.item_type.api_name(),
            urlencoding::encode(&item.item_id)
        );

        let mut query: Vec<(&str, &str)> = vec![
            ("new_or_used", condition.code()),
            ("guide_type", "stock"),
            ("currency_code", "USD"),
        ];
        if let Some(color_id) = item.color_id() {
            query.push(("color_id", color_id));
        }

        debug!("Requesting URL: {url}");
        debug!("Parameters: {query:?}");

        let authorization = oauth::authorization_header(
            &self.credentials,
            "GET",
            &url,
            &query,
            chrono::Utc::now().timestamp(),
            &oauth::generate_nonce(),
        )?;

        self.throttle();

        let response = self
            .client
            .get(&url)
            .query(&query)
            .header("Authorization", authorization)
            .header("User-Agent", USER_AGENT)
            .send()?;

        let status = response.status();
        let body = response.text()?;
        debug!("Response status: {status}");
        debug!(
            "Response body: {}",
            body.chars().take(DEBUG_BODY_LIMIT).collect::<String>()
        );

        parse_price_response(status, &body)
    }

    /// Sleeps until the configured delay since the previous request has passed.
    fn throttle(&mut self) {
        if let Some(last) = self.last_request {
            let elapsed = last.elapsed();
            if elapsed < self.request_delay {
                std::thread::sleep(self.request_delay - elapsed);
            }
        }
        self.last_request = Some(Instant::now());
    }
}

/// Decodes a price guide response body.
pub(crate) fn parse_price_response(
    status: reqwest::StatusCode,
    body: &str,
) -> ApiResult<PriceGuide> {
    let envelope: ApiEnvelope<PriceGuide> = match serde_json::from_str(body) {
        Ok(envelope) => envelope,
        Err(_) if !status.is_success() => return Err(ApiError::HttpStatus(status)),
        Err(e) => return Err(ApiError::Parse(e)),
    };

    if envelope.meta.code != 200 {
        let message = envelope.meta.error_message();
        warn!("BrickLink API error {}: {message}", envelope.meta.code);
        return Err(ApiError::ApiResponse {
            code: envelope.meta.code,
            message,
        });
    }

    Ok(envelope.data.unwrap_or_default())
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
