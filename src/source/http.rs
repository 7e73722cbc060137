//! HTTP message source.

use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use super::MessageSource;
use crate::error::{FeedError, Result};
use crate::feed::Message;

/// Path of the read endpoint, relative to the base URL.
const MESSAGES_PATH: &str = "messages";

/// Query parameter carrying the search term.
const SEARCH_PARAM: &str = "search";

/// Reads messages from a webhook receiver's `/messages` endpoint.
///
/// # Example
///
/// ```rust,no_run
/// use std::time::Duration;
/// use webhook_feed::source::{HttpMessageSource, MessageSource};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let source = HttpMessageSource::new("http://localhost:5000/", Duration::from_secs(10))?;
/// let messages = source.fetch("order").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpMessageSource {
    base_url: Url,
    http: reqwest::Client,
}

impl HttpMessageSource {
    /// Create a source whose requests give up after `timeout`.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Where the receiver is served (e.g., "http://localhost:5000/").
    ///   Keep a trailing `/` if the receiver lives under a path prefix.
    /// * `timeout` - Total time allowed per request.
    pub fn new(base_url: impl AsRef<str>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(FeedError::HttpClient)?;
        Self::with_client(base_url, http)
    }

    /// Create a source with a custom reqwest client.
    pub fn with_client(base_url: impl AsRef<str>, http: reqwest::Client) -> Result<Self> {
        let base_url = Url::parse(base_url.as_ref())?;
        // Fail now rather than on every poll.
        base_url.join(MESSAGES_PATH)?;
        Ok(Self { base_url, http })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build the request URL for `search`, with the term percent-encoded.
    pub fn messages_url(&self, search: &str) -> Result<Url> {
        let mut url = self.base_url.join(MESSAGES_PATH)?;
        url.query_pairs_mut()
            .clear()
            .append_pair(SEARCH_PARAM, search);
        Ok(url)
    }
}

#[async_trait]
impl MessageSource for HttpMessageSource {
    async fn fetch(&self, search: &str) -> Result<Vec<Message>> {
        let url = self.messages_url(search)?;
        tracing::trace!(url = %url, "GET messages");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(FeedError::Network)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FeedError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.bytes().await.map_err(FeedError::Network)?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(base: &str) -> HttpMessageSource {
        HttpMessageSource::new(base, Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn test_empty_search_still_sends_param() {
        let url = source("http://localhost:5000").messages_url("").unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/messages?search=");
    }

    #[test]
    fn test_search_is_encoded() {
        let url = source("http://localhost:5000/")
            .messages_url("a&b c#d%e")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:5000/messages?search=a%26b+c%23d%25e"
        );

        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs, vec![("search".to_string(), "a&b c#d%e".to_string())]);
    }

    #[test]
    fn test_base_path_prefix_is_kept_with_trailing_slash() {
        let url = source("https://hooks.example.com/receiver/")
            .messages_url("x")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://hooks.example.com/receiver/messages?search=x"
        );
    }

    #[test]
    fn test_base_query_is_replaced() {
        let url = source("http://localhost:5000/?search=old")
            .messages_url("new")
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/messages?search=new");
    }

    #[test]
    fn test_invalid_base_url() {
        let err = HttpMessageSource::new("not a url", Duration::from_secs(1)).unwrap_err();
        assert_eq!(err.kind(), "invalid_url");
    }
}
