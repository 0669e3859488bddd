//! `cdp-testkit` is a browser test automation toolkit for headless Chrome.
//!
//! It wraps the DevTools protocol (via `chromiumoxide`) with the scaffolding
//! an end-to-end suite needs:
//! - [`ConfigStore`] — environment-driven settings with typed accessors
//! - [`RetryPolicy`] — exponential-backoff retries for flaky operations
//! - [`BrowserSession`] / [`Page`] — session management and logged page actions
//! - [`pages`] — page objects for the site under test
//! - [`Screenshots`], [`ApiClient`], [`data`] — artifact, HTTP, and test-data
//!   helpers

mod api;
mod browser;
pub mod config;
pub mod data;
mod error;
pub mod logging;
mod page;
pub mod pages;
mod retry;
mod screenshot;

pub use api::{ApiClient, ApiResponse};
pub use browser::BrowserSession;
pub use config::ConfigStore;
pub use error::TestkitError;
pub use page::Page;
pub use retry::{retry, RetryPolicy};
pub use screenshot::Screenshots;

pub type Result<T> = std::result::Result<T, TestkitError>;
