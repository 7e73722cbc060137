//! Plain-text feed view.

use std::fmt::Write as _;
use std::io::Write;

use crate::feed::{FeedState, Message};
use crate::view::{FeedView, ScrollViewport};

/// ANSI: clear screen, cursor home.
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Draws the feed as text into any writer.
///
/// Each frame is a search header, the visible window of messages and a
/// position footer. Write failures are logged and otherwise ignored.
pub struct TerminalView<W> {
    out: W,
    viewport: ScrollViewport,
    messages: Vec<Message>,
    search_query: String,
    pretty_json: bool,
    clear_screen: bool,
}

impl<W> std::fmt::Debug for TerminalView<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminalView")
            .field("viewport", &self.viewport)
            .field("messages", &self.messages.len())
            .field("search_query", &self.search_query)
            .field("pretty_json", &self.pretty_json)
            .field("clear_screen", &self.clear_screen)
            .finish_non_exhaustive()
    }
}

impl<W: Write> TerminalView<W> {
    /// Create a view showing up to `height` messages at a time.
    ///
    /// JSON payloads are pretty-printed and the screen is not cleared
    /// between frames unless configured otherwise.
    pub fn new(out: W, height: usize) -> Self {
        Self {
            out,
            viewport: ScrollViewport::new(height),
            messages: Vec::new(),
            search_query: String::new(),
            pretty_json: true,
            clear_screen: false,
        }
    }

    /// Pretty-print payloads that parse as JSON objects or arrays.
    #[must_use]
    pub fn with_pretty_json(mut self, pretty_json: bool) -> Self {
        self.pretty_json = pretty_json;
        self
    }

    /// Clear the terminal before each frame.
    #[must_use]
    pub fn with_clear_screen(mut self, clear_screen: bool) -> Self {
        self.clear_screen = clear_screen;
        self
    }

    /// Current scroll position.
    pub fn viewport(&self) -> &ScrollViewport {
        &self.viewport
    }

    /// Messages currently inside the viewport.
    pub fn visible_messages(&self) -> &[Message] {
        &self.messages[self.viewport.visible_range()]
    }

    /// Scroll towards older messages and redraw.
    pub fn scroll_up(&mut self, rows: usize) {
        self.viewport.scroll_up(rows);
        self.draw();
    }

    /// Scroll towards newer messages and redraw.
    pub fn scroll_down(&mut self, rows: usize) {
        self.viewport.scroll_down(rows);
        self.draw();
    }

    /// The underlying writer.
    pub fn writer(&self) -> &W {
        &self.out
    }

    fn frame(&self) -> String {
        let mut frame = String::new();
        if self.clear_screen {
            frame.push_str(CLEAR_SCREEN);
        }

        let _ = writeln!(
            frame,
            "search: {:?} | {} message(s)",
            self.search_query,
            self.messages.len()
        );
        frame.push_str("----\n");

        for message in self.visible_messages() {
            frame.push_str(&format_message(message, self.pretty_json));
            frame.push('\n');
        }

        let range = self.viewport.visible_range();
        if !range.is_empty() {
            let _ = writeln!(
                frame,
                "---- {}-{} of {}",
                range.start + 1,
                range.end,
                self.messages.len()
            );
        }
        frame
    }

    fn draw(&mut self) {
        let frame = self.frame();
        let result = self
            .out
            .write_all(frame.as_bytes())
            .and_then(|()| self.out.flush());
        if let Err(e) = result {
            tracing::warn!(error = %e, "Failed to draw feed");
        }
    }
}

impl<W: Write> FeedView for TerminalView<W> {
    fn render(&mut self, state: &FeedState) {
        self.messages = state.messages().to_vec();
        self.search_query = state.search_query().to_owned();
        self.viewport.set_content_len(self.messages.len());
        self.draw();
    }

    fn scroll_to_bottom(&mut self) {
        let before = self.viewport.offset();
        self.viewport.scroll_to_bottom();
        if self.viewport.offset() != before {
            self.draw();
        }
    }
}

/// One message as display text: `[timestamp] data`.
///
/// With `pretty_json`, object and array payloads are expanded onto
/// indented lines below the timestamp.
pub(crate) fn format_message(message: &Message, pretty_json: bool) -> String {
    match pretty_json.then(|| pretty_payload(&message.data)).flatten() {
        Some(body) => format!("[{}]\n{body}", message.timestamp),
        None => format!("[{}] {}", message.timestamp, message.data),
    }
}

fn pretty_payload(data: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(data).ok()?;
    if !(value.is_object() || value.is_array()) {
        return None;
    }
    let pretty = serde_json::to_string_pretty(&value).ok()?;
    Some(
        pretty
            .lines()
            .map(|line| format!("  {line}"))
            .collect::<Vec<_>>()
            .join("\n"),
    )
}
