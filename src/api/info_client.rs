//! Client for the Hyperliquid info endpoint (`POST /info`).
//!
//! Every request is a JSON body of the form `{"type": <kind>, ...}`. Each kind
//! has its own response shape; only the few the tool relies on are typed.

use anyhow::{Context, Result};
use reqwest::{Client, Method};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

use super::error::ApiResult;
use super::request::send_json;
use super::types::*;

pub const INFO_API_BASE: &str = "https://api.hyperliquid.xyz";

/// Client for the info endpoint (read-only queries).
pub struct InfoClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl InfoClient {
    /// Create with custom base URL and per-request timeout.
    pub fn with_base_url(base_url: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    pub fn info_url(&self) -> String {
        format!("{}/info", self.base_url)
    }

    /// POST an arbitrary payload and return the decoded JSON body.
    pub async fn post_raw(&self, payload: &Value) -> ApiResult<Value> {
        debug!(payload = %payload, "Posting info request");
        send_json(
            &self.client,
            Method::POST,
            &self.info_url(),
            Some(payload),
            self.timeout,
        )
        .await
    }

    /// Margin summaries and asset positions for `user`, untyped.
    pub async fn clearinghouse_state_raw(&self, user: &str) -> ApiResult<Value> {
        self.post_raw(&json!({"type": "clearinghouseState", "user": user}))
            .await
    }

    /// Margin summaries and asset positions for `user`.
    pub async fn clearinghouse_state(&self, user: &str) -> ApiResult<ClearinghouseStateResponse> {
        send_json(
            &self.client,
            Method::POST,
            &self.info_url(),
            Some(&json!({"type": "clearinghouseState", "user": user})),
            self.timeout,
        )
        .await
    }

    /// Mid price for every listed coin.
    pub async fn all_mids(&self) -> ApiResult<AllMidsResponse> {
        send_json(
            &self.client,
            Method::POST,
            &self.info_url(),
            Some(&json!({"type": "allMids"})),
            self.timeout,
        )
        .await
    }

    /// Perpetuals universe (asset names, size decimals, max leverage).
    pub async fn meta(&self) -> ApiResult<MetaResponse> {
        send_json(
            &self.client,
            Method::POST,
            &self.info_url(),
            Some(&json!({"type": "meta"})),
            self.timeout,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use rust_decimal_macros::dec;
    use tokio_test::assert_ok;

    fn client_for(server: &mockito::ServerGuard) -> InfoClient {
        InfoClient::with_base_url(server.url(), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_clearinghouse_state_posts_user() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/info")
            .match_body(Matcher::Json(json!({
                "type": "clearinghouseState",
                "user": "0xabc"
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"marginSummary": {"accountValue": "10.5", "totalNtlPos": "0",
                    "totalRawUsd": "10.5", "totalMarginUsed": "0"},
                    "assetPositions": [], "withdrawable": "10.5"}"#,
            )
            .create_async()
            .await;

        let state = client_for(&server).clearinghouse_state("0xabc").await.unwrap();

        mock.assert_async().await;
        assert!(state.asset_positions.is_empty());
        assert_eq!(state.withdrawable, Some(dec!(10.5)));
    }

    #[tokio::test]
    async fn test_all_mids() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/info")
            .match_body(Matcher::Json(json!({"type": "allMids"})))
            .with_status(200)
            .with_body(r#"{"BTC": "64000.5", "@1": "0.25"}"#)
            .create_async()
            .await;

        let mids = assert_ok!(client_for(&server).all_mids().await);
        assert_eq!(mids.len(), 2);
        assert_eq!(mids["BTC"], dec!(64000.5));
    }

    #[tokio::test]
    async fn test_meta_universe() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/info")
            .match_body(Matcher::Json(json!({"type": "meta"})))
            .with_status(200)
            .with_body(r#"{"universe": [{"name": "BTC", "szDecimals": 5, "maxLeverage": 40}]}"#)
            .create_async()
            .await;

        let meta = client_for(&server).meta().await.unwrap();
        assert_eq!(meta.universe[0].name, "BTC");
        assert_eq!(meta.universe[0].max_leverage, 40);
    }

    #[tokio::test]
    async fn test_unknown_kind_surfaces_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/info")
            .with_status(422)
            .with_body("Failed to deserialize the JSON body into the target type")
            .create_async()
            .await;

        let err = client_for(&server)
            .post_raw(&json!({"type": "mainnetLeaderboard"}))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "status");
    }
}
