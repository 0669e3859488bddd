use std::time::Duration;

use chromiumoxide::browser::{Browser, BrowserConfig};
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::{keys, ConfigStore};
use crate::logging;
use crate::page::Page;
use crate::{Result, TestkitError};

/// A running headless Chrome instance plus its CDP message pump.
///
/// One session per test flow; [`BrowserSession::close`] shuts the browser
/// process down. Pages handed out by the session are bound to the configured
/// `BASE_URL` and `ACTION_TIMEOUT`.
pub struct BrowserSession {
    browser: Browser,
    handler_task: JoinHandle<()>,
    base_url: String,
    action_timeout: Duration,
}

impl BrowserSession {
    /// Launches Chrome according to the configuration.
    ///
    /// Consults `BROWSER` (anything but "chromium" is rejected — CDP only
    /// drives Chromium), `HEADLESS`, and `DEFAULT_TIMEOUT`, then logs the
    /// full configuration summary the way a suite-level setup hook would.
    pub async fn launch(config: &ConfigStore) -> Result<Self> {
        let browser_name = config.get(keys::BROWSER)?;
        if !browser_name.eq_ignore_ascii_case("chromium") {
            return Err(TestkitError::InvalidArgument(format!(
                "unsupported BROWSER \"{browser_name}\": only chromium is available over CDP"
            )));
        }
        let headless = config.get_bool(keys::HEADLESS)?;
        let launch_timeout = config.get_number(keys::DEFAULT_TIMEOUT)?;
        let action_timeout = config.get_number(keys::ACTION_TIMEOUT)?;
        let base_url = config.get(keys::BASE_URL)?;

        logging::log_config_summary(config);

        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .window_size(1280, 720)
            .request_timeout(Duration::from_millis(launch_timeout));
        if !headless {
            builder = builder.with_head();
        }
        let browser_config = builder.build().map_err(TestkitError::Launch)?;

        info!("launching chromium (headless: {headless})");
        let (browser, mut handler) = Browser::launch(browser_config).await?;

        // Drain CDP events until the websocket closes.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    debug!("cdp handler loop ended");
                    break;
                }
            }
        });

        Ok(Self {
            browser,
            handler_task,
            base_url: base_url.trim_end_matches('/').to_owned(),
            action_timeout: Duration::from_millis(action_timeout),
        })
    }

    /// Opens a blank tab.
    pub async fn new_page(&self) -> Result<Page> {
        let page = self.browser.new_page("about:blank").await?;
        Ok(Page::new(page, self.base_url.clone(), self.action_timeout))
    }

    /// Opens a tab already navigated to `path` under the base URL.
    pub async fn open(&self, path: &str) -> Result<Page> {
        let page = self.new_page().await?;
        page.goto(path).await?;
        Ok(page)
    }

    /// Base URL pages navigate against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Shuts the browser process down and stops the message pump.
    pub async fn close(mut self) {
        info!("shutting down browser");
        if let Err(err) = self.browser.close().await {
            warn!("error closing browser: {err}");
        }
        self.handler_task.abort();
    }
}
