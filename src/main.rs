//! Webhook feed viewer
//!
//! Entry point: polls the configured receiver and draws the feed on stdout.
//! Each line read from stdin becomes the new search term, except `:up [n]`
//! and `:down [n]`, which scroll the list.

use mimalloc::MiMalloc;

/// Global allocator for improved performance (M-MIMALLOC-APPS).
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

use std::sync::Arc;

use anyhow::Context;
use dotenvy::dotenv;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use webhook_feed::config::{LogFormat, LoggingConfig, ViewerConfig};
use webhook_feed::feed::{CycleEvent, FeedState, MessageFeedController, RefreshOutcome};
use webhook_feed::input::Action;
use webhook_feed::source::HttpMessageSource;
use webhook_feed::view::TerminalView;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Load .env (if present)
    let _ = dotenv();

    let config = ViewerConfig::load().context("failed to load configuration")?;
    init_tracing(&config.logging);

    let source = HttpMessageSource::new(
        &config.backend.base_url,
        config.backend.request_timeout(),
    )
    .with_context(|| format!("invalid backend URL: {}", config.backend.base_url))?;

    info!(
        name: "feed.config.loaded",
        base_url = %source.base_url(),
        timeout_secs = config.backend.request_timeout_secs,
        "Backend configured"
    );

    let view = TerminalView::new(std::io::stdout(), config.view.height)
        .with_pretty_json(config.view.pretty_json)
        .with_clear_screen(config.view.clear_screen);
    let state = FeedState::with_search_query(config.view.initial_search.clone());
    let mut controller = MessageFeedController::with_state(Arc::new(source), view, state);

    let mut input = BufReader::new(tokio::io::stdin()).lines();
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    controller.start();

    loop {
        tokio::select! {
            line = input.next_line() => match line {
                Ok(Some(line)) => match Action::parse(&line) {
                    Action::Search(term) => {
                        controller.set_search_query(term);
                    }
                    Action::ScrollUp(rows) => controller.view_mut().scroll_up(rows),
                    Action::ScrollDown(rows) => controller.view_mut().scroll_down(rows),
                },
                Ok(None) => {
                    info!("stdin closed, shutting down");
                    break;
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to read search input");
                    break;
                }
            },
            event = controller.step() => log_cycle(&event),
            _ = &mut shutdown => {
                info!("Interrupted, shutting down");
                break;
            }
        }
    }

    controller.stop();
    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.filter.as_str()));

    // Logs go to stderr so they never interleave with the feed on stdout.
    match logging.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(filter)
            .init(),
        LogFormat::Text => tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .with(filter)
            .init(),
    }
}

fn log_cycle(event: &CycleEvent) {
    match event {
        CycleEvent::Issued { seq } => tracing::trace!(seq, "Timer refresh issued"),
        CycleEvent::Finished {
            seq,
            outcome: RefreshOutcome::Applied { count },
        } => tracing::trace!(seq, count, "Feed updated"),
        CycleEvent::Finished { .. } => {}
    }
}
