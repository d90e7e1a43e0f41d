//! Client for the Hyperliquid stats endpoint that serves the leaderboard.

use anyhow::{Context, Result};
use reqwest::{Client, Method, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::models::LeaderboardRow;

use super::error::ApiResult;
use super::request::{send, send_json};
use super::types::LeaderboardResponse;

pub const STATS_API_BASE: &str = "https://stats-data.hyperliquid.xyz";
const LEADERBOARD_PATH: &str = "/Mainnet/leaderboard";

/// Client for the stats-data host.
pub struct StatsClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl StatsClient {
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

    /// Leaderboard URL, optionally with a `timeWindow` query.
    pub fn leaderboard_url(&self, time_window: Option<&str>) -> String {
        match time_window {
            Some(w) => format!("{}{}?timeWindow={}", self.base_url, LEADERBOARD_PATH, w),
            None => format!("{}{}", self.base_url, LEADERBOARD_PATH),
        }
    }

    /// Fetch the leaderboard body without interpreting its shape, along with
    /// the status it came back with.
    pub async fn get_leaderboard_raw(
        &self,
        time_window: Option<&str>,
    ) -> ApiResult<(StatusCode, Value)> {
        let url = self.leaderboard_url(time_window);
        debug!(url = %url, "Fetching leaderboard");

        let raw = send(&self.client, Method::GET, &url, None, self.timeout)
            .await?
            .error_for_status()?;
        let body = raw.json()?;
        Ok((raw.status, body))
    }

    /// Fetch and normalise leaderboard rows.
    pub async fn get_leaderboard(&self, time_window: Option<&str>) -> ApiResult<Vec<LeaderboardRow>> {
        let url = self.leaderboard_url(time_window);
        debug!(url = %url, "Fetching leaderboard");

        let response: LeaderboardResponse =
            send_json(&self.client, Method::GET, &url, None, self.timeout).await?;

        Ok(response.into_rows().into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use rust_decimal_macros::dec;

    const ROWS: &str = r#"[
        {"ethAddress": "0xaaa", "accountValue": "5000000.0", "displayName": "alpha",
         "windowPerformances": [["day", {"pnl": "10", "roi": "0.1", "vlm": "100"}]]},
        {"ethAddress": "0xbbb", "accountValue": "120.0", "displayName": null,
         "windowPerformances": []}
    ]"#;

    #[tokio::test]
    async fn test_get_leaderboard_wrapped_rows() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/Mainnet/leaderboard")
            .with_status(200)
            .with_body(format!(r#"{{"leaderboardRows": {}}}"#, ROWS))
            .create_async()
            .await;

        let client = StatsClient::with_base_url(server.url(), Duration::from_secs(5)).unwrap();
        let rows = client.get_leaderboard(None).await.unwrap();

        mock.assert_async().await;
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].address, "0xaaa");
        assert_eq!(rows[0].account_value, dec!(5000000));
        assert_eq!(rows[0].display_name(), "alpha");
        assert_eq!(rows[0].performance("day").map(|p| p.pnl), Some(dec!(10)));
    }

    #[tokio::test]
    async fn test_get_leaderboard_bare_list_with_window() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/Mainnet/leaderboard")
            .match_query(Matcher::UrlEncoded("timeWindow".into(), "allTime".into()))
            .with_status(200)
            .with_body(ROWS)
            .create_async()
            .await;

        let client = StatsClient::with_base_url(server.url(), Duration::from_secs(5)).unwrap();
        let rows = client.get_leaderboard(Some("allTime")).await.unwrap();

        mock.assert_async().await;
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].display_name, None);
    }

    #[tokio::test]
    async fn test_get_leaderboard_raw_keeps_status_and_shape() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/Mainnet/leaderboard")
            .with_status(203)
            .with_body(ROWS)
            .create_async()
            .await;

        let client = StatsClient::with_base_url(server.url(), Duration::from_secs(5)).unwrap();
        let (status, body) = client.get_leaderboard_raw(None).await.unwrap();

        assert_eq!(status.as_u16(), 203);
        assert_eq!(body.as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn test_leaderboard_url() {
        let client =
            StatsClient::with_base_url("http://host/".to_string(), Duration::from_secs(1)).unwrap();
        assert_eq!(client.leaderboard_url(None), "http://host/Mainnet/leaderboard");
        assert_eq!(
            client.leaderboard_url(Some("day")),
            "http://host/Mainnet/leaderboard?timeWindow=day"
        );
    }
}
