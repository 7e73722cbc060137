//! Rendering surface for the feed.
//!
//! The controller only knows [`FeedView`]. [`TerminalView`] is the view the
//! binary uses; [`ScrollViewport`] is the scroll model it is built on.

mod terminal;
mod viewport;

pub use terminal::TerminalView;
pub use viewport::ScrollViewport;

use crate::feed::FeedState;

/// Something that can display a [`FeedState`].
pub trait FeedView {
    /// Redraw from `state`. Called whenever the messages or the search text change.
    fn render(&mut self, state: &FeedState);

    /// Move the scroll position to the last message.
    ///
    /// Called after every applied refresh, right after [`render`](Self::render).
    fn scroll_to_bottom(&mut self);
}
