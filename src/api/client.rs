//! HTTP client for the trading agent's status and trade endpoints.

use crate::api::error::ApiError;
use crate::api::models::{BotStatus, TradeOrder, TradeReceipt};
use crate::trading::order::TradeSide;
use reqwest::Client;
use rust_decimal::Decimal;
use std::time::Duration;
use tracing::{debug, info};

/// Transport-level ceiling; the poll interval and the trade deadline bound
/// the interesting cases well before this fires.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the bot's HTTP API.
///
/// Fetches are read-only and side-effect free; `submit_trade` is the single
/// mutating call in the application.
pub struct BotApiClient {
    client: Client,
    base_url: String,
}

impl BotApiClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the current status snapshot.
    ///
    /// A non-2xx response or a body that is not valid JSON is a hard
    /// failure; the caller keeps showing its last known-good snapshot.
    /// Partial payloads are not an error: missing optional fields normalize
    /// to defaults during deserialization.
    pub async fn fetch_status(&self) -> Result<BotStatus, ApiError> {
        let url = format!("{}/api/status", self.base_url);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        let body = response.text().await?;

        debug!("status poll: {} - {}", status, &body[..body.len().min(200)]);

        if !status.is_success() {
            return Err(ApiError::Status(status));
        }

        let parsed: BotStatus = serde_json::from_str(&body)?;
        Ok(parsed)
    }

    /// Submit a manual trade. Called exactly once per confirmed submission.
    pub async fn submit_trade(
        &self,
        side: TradeSide,
        amount: Decimal,
    ) -> Result<TradeReceipt, ApiError> {
        let url = format!("{}/api/trade", self.base_url);
        let order = TradeOrder { side, amount };

        info!("submitting {} for {}", side, amount);

        let response = self.client.post(&url).json(&order).send().await?;

        let status = response.status();
        let body = response.text().await?;

        debug!("trade response: {} - {}", status, &body[..body.len().min(200)]);

        if !status.is_success() {
            return Err(ApiError::Status(status));
        }

        let receipt: TradeReceipt = serde_json::from_str(&body)?;
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_stripped() {
        let client = BotApiClient::new("http://localhost:5000/").unwrap();
        assert_eq!(client.base_url, "http://localhost:5000");
    }
}
