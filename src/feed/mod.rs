//! The polling feed: state, ordering guard, timer and controller.
//!
//! # Architecture
//!
//! - [`FeedState`]: the messages on screen and the current search text
//! - [`RefreshSequence`]: decides whether a completed fetch may be applied
//! - [`RefreshTimer`]: owned handle for the repeating refresh schedule
//! - [`MessageFeedController`]: ties the above to a source and a view
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use webhook_feed::feed::MessageFeedController;
//! use webhook_feed::source::HttpMessageSource;
//! use webhook_feed::view::TerminalView;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let source = HttpMessageSource::new("http://localhost:5000/", Duration::from_secs(10))?;
//! let view = TerminalView::new(std::io::stdout(), 20);
//! let mut controller = MessageFeedController::new(Arc::new(source), view);
//!
//! controller.start();
//! loop {
//!     controller.step().await;
//! }
//! # }
//! ```

mod controller;
mod sequence;
mod state;
mod timer;

pub use controller::{CycleEvent, MessageFeedController, REFRESH_INTERVAL, RefreshOutcome};
pub use sequence::RefreshSequence;
pub use state::{FeedState, Message};
pub use timer::RefreshTimer;
