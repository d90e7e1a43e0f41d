//! One-shot HTTP exchange shared by the typed clients and the probe runner.

use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use super::error::{ApiError, ApiResult};

/// Raw HTTP response: status plus the full body text.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

impl RawResponse {
    /// Turn a non-2xx status into [`ApiError::Status`].
    pub fn error_for_status(self) -> ApiResult<Self> {
        if self.status.is_success() {
            Ok(self)
        } else {
            Err(ApiError::status(self.status, &self.body))
        }
    }

    pub fn json<T: DeserializeOwned>(&self) -> ApiResult<T> {
        serde_json::from_str(&self.body).map_err(ApiError::decode)
    }
}

/// Send a single request and read the whole body.
///
/// A POST carries `payload` as a JSON body (which also sets the
/// `Content-Type: application/json` header). The body of a GET is ignored.
pub async fn send(
    client: &Client,
    method: Method,
    url: &str,
    payload: Option<&Value>,
    timeout: Duration,
) -> ApiResult<RawResponse> {
    debug!(method = %method, url = %url, payload = ?payload, "Sending request");

    let mut builder = client.request(method.clone(), url).timeout(timeout);
    if method != Method::GET {
        if let Some(body) = payload {
            builder = builder.json(body);
        }
    }

    let response = builder
        .send()
        .await
        .map_err(|e| ApiError::from_reqwest(url, e))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ApiError::from_reqwest(url, e))?;

    debug!(status = %status, bytes = body.len(), "Received response");

    Ok(RawResponse { status, body })
}

/// Send a request and decode a successful JSON body into `T`.
pub async fn send_json<T: DeserializeOwned>(
    client: &Client,
    method: Method,
    url: &str,
    payload: Option<&Value>,
    timeout: Duration,
) -> ApiResult<T> {
    send(client, method, url, payload, timeout)
        .await?
        .error_for_status()?
        .json()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn http() -> Client {
        Client::builder().build().unwrap()
    }

    #[tokio::test]
    async fn test_post_sends_json_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/info")
            .match_header("content-type", "application/json")
            .match_body(mockito::Matcher::Json(json!({"type": "meta"})))
            .with_status(200)
            .with_body(r#"{"universe":[]}"#)
            .create_async()
            .await;

        let url = format!("{}/info", server.url());
        let value: Value = send_json(
            &http(),
            Method::POST,
            &url,
            Some(&json!({"type": "meta"})),
            Duration::from_secs(5),
        )
        .await
        .unwrap();

        mock.assert_async().await;
        assert_eq!(value, json!({"universe": []}));
    }

    #[tokio::test]
    async fn test_non_success_status_is_status_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/leaderboard")
            .with_status(404)
            .with_body("Not Found")
            .create_async()
            .await;

        let url = format!("{}/leaderboard", server.url());
        let err = send_json::<Value>(&http(), Method::GET, &url, None, Duration::from_secs(5))
            .await
            .unwrap_err();

        match err {
            ApiError::Status { status, body } => {
                assert_eq!(status, StatusCode::NOT_FOUND);
                assert_eq!(body, "Not Found");
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_json_is_decode_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/info")
            .with_status(200)
            .with_body("<html>oops</html>")
            .create_async()
            .await;

        let url = format!("{}/info", server.url());
        let err = send_json::<Value>(
            &http(),
            Method::POST,
            &url,
            Some(&json!({"type": "meta"})),
            Duration::from_secs(5),
        )
        .await
        .unwrap_err();

        assert_eq!(err.kind(), "decode");
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        // Port 9 (discard) on localhost is not expected to accept HTTP.
        let result = send(
            &http(),
            Method::GET,
            "http://127.0.0.1:9/",
            None,
            Duration::from_secs(2),
        )
        .await;

        let err = result.unwrap_err();
        assert!(matches!(err.kind(), "network" | "timeout"));
    }
}
