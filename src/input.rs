//! Line-based user input.
//!
//! Every line the user types becomes an [`Action`]. `:up [n]` and `:down [n]`
//! scroll the list; any other line is the new search term.

/// Something the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Replace the search term (already trimmed).
    Search(String),
    /// Scroll towards older messages by this many rows.
    ScrollUp(usize),
    /// Scroll towards newer messages by this many rows.
    ScrollDown(usize),
}

impl Action {
    /// Parse one input line.
    ///
    /// A scroll command with a missing or unparsable count moves one row.
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let mut words = line.split_whitespace();

        match words.next() {
            Some(":up") => Self::ScrollUp(rows(words.next())),
            Some(":down") => Self::ScrollDown(rows(words.next())),
            _ => Self::Search(line.to_owned()),
        }
    }
}

fn rows(count: Option<&str>) -> usize {
    count.and_then(|n| n.parse().ok()).unwrap_or(1)
}
