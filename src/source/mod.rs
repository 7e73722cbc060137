//! Where feed messages come from.
//!
//! - [`MessageSource`]: the fetch seam the controller polls
//! - [`HttpMessageSource`]: `GET /messages?search=<term>` over HTTP

mod http;

pub use http::HttpMessageSource;

use async_trait::async_trait;

use crate::error::Result;
use crate::feed::Message;

/// A backend that returns the messages matching a search term.
///
/// Filtering is entirely the backend's business; an empty term asks for its
/// default set.
#[async_trait]
pub trait MessageSource: Send + Sync + std::fmt::Debug {
    /// Fetch the messages matching `search`, in display order.
    async fn fetch(&self, search: &str) -> Result<Vec<Message>>;
}
