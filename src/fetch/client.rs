//! DataMall HTTP client.

use std::sync::Arc;

use log::{debug, warn};
use reqwest::header::ACCEPT;
use serde_json::Value;
use tokio_retry::RetryIf;
use url::Url;

use crate::config::{ACCOUNT_KEY_HEADER, SKIP_QUERY_PARAM};
use crate::error_handling::FetchError;

use super::page::{Page, PageSource};
use super::retry::RetryPolicy;

/// Authenticated client for the car park availability endpoint.
///
/// Every request carries the `AccountKey` header and asks for JSON. Failed
/// attempts are retried according to the [`RetryPolicy`]; once attempts are
/// exhausted the last error is returned.
#[derive(Clone)]
pub struct DataMallClient {
    client: Arc<reqwest::Client>,
    base_url: Url,
    account_key: String,
    retry: RetryPolicy,
}

impl DataMallClient {
    /// Creates a client for `base_url` using a shared `reqwest` client.
    ///
    /// The per-attempt timeout is whatever `client` was built with.
    pub fn new(
        client: Arc<reqwest::Client>,
        base_url: Url,
        account_key: impl Into<String>,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            client,
            base_url,
            account_key: account_key.into(),
            retry,
        }
    }

    /// Fetches and decodes the response body for one offset.
    ///
    /// # Errors
    ///
    /// Returns the error of the final attempt when every attempt failed, or
    /// the first permanent error (see [`FetchError::is_transient`]).
    pub async fn fetch_json(&self, offset: u64) -> Result<Value, FetchError> {
        let max_attempts = self.retry.max_attempts();
        let mut attempt = 0u32;

        RetryIf::start(
            self.retry.delays(),
            || {
                attempt += 1;
                let current = attempt;
                async move {
                    let result = self.request_once(offset).await;
                    if let Err(e) = &result {
                        warn!(
                            "Attempt {}/{} for offset {} failed ({}): {}",
                            current,
                            max_attempts,
                            offset,
                            e.kind(),
                            e
                        );
                    }
                    result
                }
            },
            FetchError::is_transient,
        )
        .await
    }

    async fn request_once(&self, offset: u64) -> Result<Value, FetchError> {
        debug!("GET {} {}={}", self.base_url, SKIP_QUERY_PARAM, offset);
        let response = self
            .client
            .get(self.base_url.clone())
            .header(ACCOUNT_KEY_HEADER, &self.account_key)
            .header(ACCEPT, "application/json")
            .query(&[(SKIP_QUERY_PARAM, offset)])
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

impl PageSource for DataMallClient {
    async fn fetch_page(&self, offset: u64) -> Result<Page, FetchError> {
        let body = self.fetch_json(offset).await?;
        Ok(Page::from_json(&body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httptest::{matchers::*, responders::*, Expectation, Server};
    use serde_json::json;
    use std::time::Duration;

    const PATH: &str = "/ltaodataservice/CarParkAvailabilityv2";

    fn test_client(server: &Server, attempts: u32) -> DataMallClient {
        let base_url = Url::parse(&server.url_str(PATH)).unwrap();
        DataMallClient::new(
            Arc::new(reqwest::Client::new()),
            base_url,
            "test-key",
            RetryPolicy::new(attempts, Duration::from_millis(10), 1.5),
        )
    }

    #[tokio::test]
    async fn test_fetch_page_sends_key_accept_and_skip() {
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method_path("GET", PATH),
                request::headers(contains(("accountkey", "test-key"))),
                request::headers(contains(("accept", "application/json"))),
                request::query(url_decoded(contains(("$skip", "500")))),
            ])
            .respond_with(json_encoded(json!({
                "value": [
                    { "CarParkID": "1", "Location": "1.29375 103.85718" }
                ]
            }))),
        );

        let client = test_client(&server, 3);
        let page = client.fetch_page(500).await.unwrap();
        assert_eq!(page.rows.len(), 1);
        assert_eq!(page.rows[0].carpark_id.as_deref(), Some("1"));
    }

    #[tokio::test]
    async fn test_fetch_page_retries_server_error_then_succeeds() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", PATH))
                .times(2)
                .respond_with(cycle![
                    status_code(503),
                    json_encoded(json!({ "value": [] })),
                ]),
        );

        let client = test_client(&server, 3);
        let page = client.fetch_page(0).await.unwrap();
        assert!(page.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_page_retries_malformed_json() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", PATH))
                .times(2)
                .respond_with(cycle![
                    status_code(200).body("<html>maintenance</html>"),
                    json_encoded(json!({ "value": [{ "CarParkID": "7", "Location": "1 2" }] })),
                ]),
        );

        let client = test_client(&server, 3);
        let page = client.fetch_page(0).await.unwrap();
        assert_eq!(page.rows.len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_page_gives_up_after_max_attempts() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", PATH))
                .times(3)
                .respond_with(status_code(500)),
        );

        let client = test_client(&server, 3);
        let err = client.fetch_page(0).await.unwrap_err();
        assert!(matches!(err, FetchError::Http(_)));
        assert_eq!(err.kind(), "server error");
    }

    #[tokio::test]
    async fn test_fetch_page_timed_out_attempt_is_retried() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", PATH))
                .times(2)
                .respond_with(delay_and_then(
                    Duration::from_secs(2),
                    json_encoded(json!({ "value": [] })),
                )),
        );

        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(300))
            .build()
            .unwrap();
        let client = DataMallClient::new(
            Arc::new(http),
            Url::parse(&server.url_str(PATH)).unwrap(),
            "test-key",
            RetryPolicy::new(2, Duration::from_millis(10), 1.5),
        );

        let err = client.fetch_page(0).await.unwrap_err();
        assert!(err.is_transient());
        assert_eq!(err.kind(), "timeout");
    }

    #[tokio::test]
    async fn test_fetch_page_unauthorized_is_retried() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", PATH))
                .times(2)
                .respond_with(status_code(401)),
        );

        let client = test_client(&server, 2);
        let err = client.fetch_page(0).await.unwrap_err();
        assert_eq!(err.kind(), "unauthorized");
    }
}
