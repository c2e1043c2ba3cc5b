//! HTTP adapters for feedq.
//!
//! - [`DefaultFeedClient`] implements `ItemSourcePort` against a batch
//!   endpoint answering `GET ?count=N&exclude=a,b,c` with
//!   `{"success": true, "data": {"items": [...]}}`.
//! - [`HttpPreloader`] implements `ResourcePreloaderPort` by downloading
//!   each resource once in the background.
//!
//! ```no_run
//! use feedq_core::ItemSourcePort;
//! use feedq_http::{DefaultFeedClient, FeedClientConfig};
//!
//! # async fn run() -> Result<(), feedq_core::FetchError> {
//! let client = DefaultFeedClient::new(&FeedClientConfig::new("https://feed.example/api/items"))?;
//! let _items = client.fetch_batch(10, &[]).await?;
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
// DefaultFeedClient is meant to be used through ItemSourcePort, not its
// internal generic structure
#![allow(private_interfaces)]

mod client;
mod config;
mod error;
mod http;
mod models;
mod parsing;
mod port;
mod preload;
mod url;

pub use client::DefaultFeedClient;
pub use config::{FeedClientConfig, RetryPolicy};
pub use preload::{DEFAULT_MAX_IN_FLIGHT, HttpPreloader};
