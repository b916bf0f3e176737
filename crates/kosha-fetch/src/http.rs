use std::time::Duration;

use async_trait::async_trait;
use kosha_config::upstream::UpstreamConfig;

use crate::{FetchError, PageFetcher};

/// `reqwest` backed fetcher with a hard per-request timeout
#[derive(Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(FetchError::Network)?;

        Ok(Self { client })
    }

    pub fn from_config(config: &UpstreamConfig) -> Result<Self, FetchError> {
        Self::new(&config.user_agent, config.timeout())
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        tracing::debug!(url, "fetching page");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify(e, url))?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(url, status = status.as_u16(), "upstream rejected request");
            return Err(FetchError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        response.text().await.map_err(|e| classify(e, url))
    }
}

fn classify(error: reqwest::Error, url: &str) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        FetchError::Network(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fetcher(timeout: Duration) -> HttpFetcher {
        HttpFetcher::new("kosha-test-agent", timeout).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_returns_body_and_sends_user_agent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/word/abc"))
            .and(header("user-agent", "kosha-test-agent"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
            .expect(1)
            .mount(&server)
            .await;

        let body = fetcher(Duration::from_secs(3))
            .fetch(&format!("{}/word/abc", server.uri()))
            .await
            .unwrap();

        assert_eq!(body, "<html>ok</html>");
    }

    #[tokio::test]
    async fn test_non_success_status_is_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let error = fetcher(Duration::from_secs(3))
            .fetch(&format!("{}/word/abc", server.uri()))
            .await
            .unwrap_err();

        assert!(matches!(error, FetchError::Http { status: 503, .. }));
        assert_eq!(error.status(), Some(503));
    }

    #[tokio::test]
    async fn test_slow_upstream_is_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("late")
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let error = fetcher(Duration::from_millis(100))
            .fetch(&format!("{}/word/abc", server.uri()))
            .await
            .unwrap_err();

        assert!(matches!(error, FetchError::Timeout { .. }));
    }

    #[tokio::test]
    async fn test_refused_connection_is_network_error() {
        let error = fetcher(Duration::from_secs(3))
            .fetch("http://127.0.0.1:1/word/abc")
            .await
            .unwrap_err();

        assert!(matches!(error, FetchError::Network(_)));
    }
}
