//! Feed controller: polling, ordering and view updates.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use crate::error::FeedError;
use crate::feed::{FeedState, Message, RefreshSequence, RefreshTimer};
use crate::source::MessageSource;
use crate::view::FeedView;

/// Fixed period between timer-driven refreshes.
pub const REFRESH_INTERVAL: Duration = Duration::from_millis(5000);

/// Result of handling one completed fetch.
#[derive(Debug)]
pub enum RefreshOutcome {
    /// The response replaced the displayed messages.
    Applied {
        /// Number of messages now displayed.
        count: usize,
    },
    /// A newer response had already been applied; this one was dropped.
    Discarded {
        /// Sequence number of the response currently displayed.
        latest_applied: u64,
    },
    /// The fetch failed; the displayed messages are unchanged.
    Failed(FeedError),
}

impl RefreshOutcome {
    /// Whether the response made it to the screen.
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

/// What one call to [`MessageFeedController::step`] did.
#[derive(Debug)]
pub enum CycleEvent {
    /// A timer tick issued a new refresh.
    Issued {
        /// Sequence number of the new request.
        seq: u64,
    },
    /// A fetch completed and was handled.
    Finished {
        /// Sequence number of the completed request.
        seq: u64,
        /// What happened to its response.
        outcome: RefreshOutcome,
    },
}

/// Messages delivered to the controller's loop.
#[derive(Debug)]
enum FeedEvent {
    /// Tick from the schedule started as `generation`.
    Tick { generation: u64 },
    Completed {
        seq: u64,
        result: Result<Vec<Message>, FeedError>,
    },
}

/// Owns the feed state and keeps it in sync with a [`MessageSource`].
///
/// Fetches run as detached tasks and may overlap. Their completions and the
/// timer ticks arrive over a single channel and are handled one at a time by
/// [`step`](Self::step), so the state is only ever touched from the task that
/// drives the controller.
pub struct MessageFeedController<V> {
    source: Arc<dyn MessageSource>,
    view: V,
    state: FeedState,
    sequence: RefreshSequence,
    events_tx: mpsc::UnboundedSender<FeedEvent>,
    events_rx: mpsc::UnboundedReceiver<FeedEvent>,
    timer: Option<RefreshTimer>,
    generation: u64,
    in_flight: usize,
}

impl<V: std::fmt::Debug> std::fmt::Debug for MessageFeedController<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageFeedController")
            .field("source", &self.source)
            .field("view", &self.view)
            .field("state", &self.state)
            .field("sequence", &self.sequence)
            .field("running", &self.timer.is_some())
            .field("in_flight", &self.in_flight)
            .finish_non_exhaustive()
    }
}

impl<V: FeedView> MessageFeedController<V> {
    /// Create a controller with an empty search term.
    pub fn new(source: Arc<dyn MessageSource>, view: V) -> Self {
        Self::with_state(source, view, FeedState::new())
    }

    /// Create a controller starting from the given state.
    pub fn with_state(source: Arc<dyn MessageSource>, view: V, state: FeedState) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            source,
            view,
            state,
            sequence: RefreshSequence::new(),
            events_tx,
            events_rx,
            timer: None,
            generation: 0,
            in_flight: 0,
        }
    }

    /// Current state, for display.
    pub fn state(&self) -> &FeedState {
        &self.state
    }

    /// The view the controller draws into.
    pub fn view(&self) -> &V {
        &self.view
    }

    /// Mutable access to the view, e.g. for user scrolling.
    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Number of fetches issued but not yet handled.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Whether the repeating schedule is active.
    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    /// Sequence number of the response currently displayed (0 if none).
    pub fn last_applied(&self) -> u64 {
        self.sequence.last_applied()
    }

    /// Replace the search text and refresh right away.
    ///
    /// Responses to requests issued before this call are discarded from now
    /// on, even if the new request fails. Returns the sequence number of the
    /// issued refresh.
    pub fn set_search_query(&mut self, term: impl Into<String>) -> u64 {
        let term = term.into();
        tracing::debug!(search = %term, "Search query changed");
        self.state.set_search_query(term);
        self.view.render(&self.state);
        let seq = self.refresh();
        self.sequence.raise_floor(seq);
        seq
    }

    /// Fetch messages for the current search text.
    ///
    /// The request runs in the background; its completion is handled by a
    /// later [`step`](Self::step). Returns its sequence number.
    pub fn refresh(&mut self) -> u64 {
        let seq = self.sequence.issue();
        let search = self.state.search_query().to_owned();
        let source = Arc::clone(&self.source);
        let events = self.events_tx.clone();

        tracing::debug!(seq, search = %search, "Issuing refresh");
        self.in_flight += 1;

        tokio::spawn(async move {
            let result = source.fetch(&search).await;
            // Only fails once the controller is gone.
            let _ = events.send(FeedEvent::Completed { seq, result });
        });

        seq
    }

    /// Refresh now, then every [`REFRESH_INTERVAL`] until [`stop`](Self::stop).
    pub fn start(&mut self) {
        if self.timer.is_some() {
            tracing::warn!("Feed already started, ignoring");
            return;
        }

        tracing::info!(
            name: "feed.started",
            interval = ?REFRESH_INTERVAL,
            search = %self.state.search_query(),
            "Feed polling started"
        );

        self.refresh();

        self.generation += 1;
        let generation = self.generation;
        let events = self.events_tx.clone();
        self.timer = Some(RefreshTimer::spawn(REFRESH_INTERVAL, move || {
            events.send(FeedEvent::Tick { generation }).is_ok()
        }));
    }

    /// Cancel the repeating schedule.
    ///
    /// Dropping the controller has the same effect. In-flight fetches still
    /// complete and are handled normally. Returns whether a schedule was
    /// running.
    pub fn stop(&mut self) -> bool {
        match self.timer.take() {
            Some(timer) => {
                timer.cancel();
                tracing::info!(name: "feed.stopped", "Feed polling stopped");
                true
            }
            None => false,
        }
    }

    /// Wait for the next tick or completion and handle it.
    ///
    /// Cancel-safe: dropping the future before it resolves loses nothing.
    pub async fn step(&mut self) -> CycleEvent {
        loop {
            // The controller holds a sender, so the channel never closes.
            let Some(event) = self.events_rx.recv().await else {
                unreachable!("controller owns a sender");
            };

            match event {
                FeedEvent::Tick { generation }
                    if self.timer.is_none() || generation != self.generation =>
                {
                    tracing::debug!(generation, "Dropping tick queued before stop");
                }
                FeedEvent::Tick { .. } => {
                    let seq = self.refresh();
                    return CycleEvent::Issued { seq };
                }
                FeedEvent::Completed { seq, result } => {
                    let outcome = self.complete(seq, result);
                    return CycleEvent::Finished { seq, outcome };
                }
            }
        }
    }

    /// Handle events until no fetch is in flight.
    ///
    /// Returns the outcomes of the completions handled, in handling order.
    pub async fn settle(&mut self) -> Vec<(u64, RefreshOutcome)> {
        let mut outcomes = Vec::new();
        while self.in_flight > 0 {
            if let CycleEvent::Finished { seq, outcome } = self.step().await {
                outcomes.push((seq, outcome));
            }
        }
        outcomes
    }

    fn complete(&mut self, seq: u64, result: Result<Vec<Message>, FeedError>) -> RefreshOutcome {
        self.in_flight = self.in_flight.saturating_sub(1);

        let messages = match result {
            Ok(messages) => messages,
            Err(error) => {
                tracing::warn!(
                    seq,
                    kind = error.kind(),
                    error = %error,
                    "Refresh failed, keeping current messages"
                );
                return RefreshOutcome::Failed(error);
            }
        };

        if !self.sequence.try_apply(seq) {
            let latest_applied = self.sequence.last_applied();
            tracing::debug!(seq, latest_applied, "Discarding stale response");
            return RefreshOutcome::Discarded { latest_applied };
        }

        let count = messages.len();
        self.state.replace_messages(messages);
        self.view.render(&self.state);
        self.view.scroll_to_bottom();

        tracing::debug!(seq, count, "Applied refresh");
        RefreshOutcome::Applied { count }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    struct FixedSource {
        responses: Mutex<Vec<Result<Vec<Message>>>>,
        searches: Mutex<Vec<String>>,
    }

    impl FixedSource {
        fn new(responses: Vec<Result<Vec<Message>>>) -> Self {
            Self {
                responses: Mutex::new(responses),
                searches: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl MessageSource for FixedSource {
        async fn fetch(&self, search: &str) -> Result<Vec<Message>> {
            self.searches.lock().unwrap().push(search.to_string());
            self.responses.lock().unwrap().remove(0)
        }
    }

    #[derive(Debug, Default)]
    struct CountingView {
        renders: usize,
        scrolls: usize,
    }

    impl FeedView for CountingView {
        fn render(&mut self, _state: &FeedState) {
            self.renders += 1;
        }

        fn scroll_to_bottom(&mut self) {
            self.scrolls += 1;
        }
    }

    #[tokio::test]
    async fn test_applied_refresh_renders_then_scrolls() {
        let source = Arc::new(FixedSource::new(vec![Ok(vec![Message::new("t1", "a")])]));
        let mut controller = MessageFeedController::new(source, CountingView::default());

        let seq = controller.refresh();
        assert_eq!(controller.in_flight(), 1);

        match controller.step().await {
            CycleEvent::Finished { seq: done, outcome } => {
                assert_eq!(done, seq);
                assert!(matches!(outcome, RefreshOutcome::Applied { count: 1 }));
            }
            other => panic!("unexpected event: {other:?}"),
        }
        assert_eq!(controller.in_flight(), 0);
        assert_eq!(controller.last_applied(), seq);
        assert_eq!(controller.view().renders, 1);
        assert_eq!(controller.view().scrolls, 1);
    }

    #[tokio::test]
    async fn test_failure_keeps_messages_and_skips_view() {
        let source = Arc::new(FixedSource::new(vec![
            Ok(vec![Message::new("t1", "a")]),
            Err(FeedError::Server {
                status: 500,
                body: "boom".to_string(),
            }),
        ]));
        let mut controller = MessageFeedController::new(source, CountingView::default());

        controller.refresh();
        controller.settle().await;
        let before = controller.state().clone();

        controller.refresh();
        let outcomes = controller.settle().await;
        assert!(matches!(
            outcomes[0].1,
            RefreshOutcome::Failed(FeedError::Server { status: 500, .. })
        ));
        assert_eq!(controller.state(), &before);
        assert_eq!(controller.view().renders, 1);
        assert_eq!(controller.view().scrolls, 1);
    }

    #[tokio::test]
    async fn test_search_query_is_sent_and_rendered() {
        let source = Arc::new(FixedSource::new(vec![Ok(vec![])]));
        let mut controller = MessageFeedController::new(
            Arc::clone(&source) as Arc<dyn MessageSource>,
            CountingView::default(),
        );

        controller.set_search_query("order id");
        assert_eq!(controller.state().search_query(), "order id");
        assert_eq!(controller.view().renders, 1);

        controller.settle().await;
        assert_eq!(*source.searches.lock().unwrap(), vec!["order id".to_string()]);
    }

    #[tokio::test]
    async fn test_stop_without_start() {
        let source = Arc::new(FixedSource::default());
        let mut controller = MessageFeedController::new(source, CountingView::default());
        assert!(!controller.is_running());
        assert!(!controller.stop());
    }
}
