//! Webhook feed viewer
//!
//! Polls a webhook receiver for the messages matching a search term and keeps
//! a scrolling list of them up to date.
//!
//! # Architecture
//!
//! - **Controller**: owns the feed state, refreshes it on a fixed 5 s schedule
//!   and on every search change, and never lets an older response overwrite a
//!   newer one
//! - **Source**: `GET /messages?search=<term>` against the receiver
//! - **View**: anything implementing [`view::FeedView`]; a terminal view ships
//!   with the crate
//!
//! # Modules
//!
//! - [`feed`]: state, ordering guard, timer and controller
//! - [`source`]: message sources
//! - [`view`]: rendering surface
//! - [`config`]: CLI, file and environment configuration
//! - [`input`]: search and scroll commands typed by the user
//! - [`error`]: error taxonomy

// Allow pedantic clippy warnings that don't add value for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::missing_fields_in_debug)]
#![allow(clippy::cargo_common_metadata)]
#![allow(clippy::multiple_crate_versions)]

pub mod config;
pub mod error;
pub mod feed;
pub mod input;
pub mod source;
pub mod view;

pub use error::{FeedError, Result};
pub use feed::{FeedState, Message, MessageFeedController};
